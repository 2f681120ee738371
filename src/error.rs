use super::*;

/// Failures of the field table and of the tracer that owns it.
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Field error: ny must be odd but it is {ny}.")]
    InvalidGridParity { ny: usize },

    #[error("Field error: cannot open field file {}.", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Field error: file size mismatch, {found} bytes found while {expected} expected.")]
    FileSizeMismatch { expected: u64, found: u64 },

    #[error("Field error: no magnetic field has been loaded.")]
    NotReady,

    #[error("Field error: central field is zero and cannot be rescaled.")]
    ZeroCentralField,
}
