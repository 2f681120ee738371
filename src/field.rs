use super::*;

/// Shape of a field table: node counts and mesh size (mm) along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParameters {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl GridParameters {
    pub fn new(nx: usize, ny: usize, nz: usize, dx: f64, dy: f64, dz: f64) -> GridParameters {
        GridParameters {
            nx,
            ny,
            nz,
            dx,
            dy,
            dz
        }
    }

    /// Number of stored f32 values.
    pub fn num_values(&self) -> usize {
        self.nx*self.ny*self.nz*FIELD_DIMENSION
    }

    /// Exact size in bytes of a field file with this shape.
    pub fn expected_file_size(&self) -> u64 {
        (self.num_values()*FIELD_SAMPLE_BYTES) as u64
    }
}

impl Default for GridParameters {
    fn default() -> GridParameters {
        GridParameters::new(DEFAULT_NX, DEFAULT_NY, DEFAULT_NZ, DEFAULT_MESH, DEFAULT_MESH, DEFAULT_MESH)
    }
}

/// Measured dipole field tabulated on a regular lattice.
///
/// Coordinates follow the field-map convention: x is beam left, y is upward
/// and z is downstream. Only x >= 0 and z >= 0 are stored; negative queries
/// are mirrored onto them. The y axis is stored in full with node `ny/2` at
/// y = 0, so `ny` must be odd.
///
/// Samples are kept in one buffer laid out exactly like the field file:
/// x outermost, then y, then z, then the (Bx, By, Bz) component.
#[derive(Clone, Debug)]
pub struct FieldGrid {
    field: Vec<f32>,
    parameters: GridParameters,
    scale: f64,
}

impl FieldGrid {
    /// Reads a headerless file of native f32 triplets with the given shape.
    pub fn load<P: AsRef<Path>>(path: P, scale: f64, parameters: &GridParameters) -> Result<FieldGrid, FieldError> {
        let path = path.as_ref();
        check_parity(parameters)?;

        let unreadable = |source: std::io::Error| FieldError::FileUnreadable {
            path: path.to_path_buf(),
            source
        };

        let mut file = File::open(path).map_err(unreadable)?;

        let expected = parameters.expected_file_size();
        let found = file.metadata().map_err(unreadable)?.len();
        if found != expected {
            return Err(FieldError::FileSizeMismatch {expected, found});
        }

        let mut bytes = vec![0u8; expected as usize];
        file.read_exact(&mut bytes).map_err(unreadable)?;

        let field: Vec<f32> = bytes.chunks_exact(FIELD_SAMPLE_BYTES)
            .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();

        FieldGrid::from_samples(field, scale, parameters)
    }

    /// Wraps samples already in memory, laid out as in a field file.
    pub fn from_samples(field: Vec<f32>, scale: f64, parameters: &GridParameters) -> Result<FieldGrid, FieldError> {
        check_parity(parameters)?;

        let expected = parameters.expected_file_size();
        let found = (field.len()*FIELD_SAMPLE_BYTES) as u64;
        if found != expected {
            return Err(FieldError::FileSizeMismatch {expected, found});
        }

        Ok(FieldGrid {
            field,
            parameters: *parameters,
            scale
        })
    }

    /// Field at (x, y, z) in mm, in T. Zero outside the tabulated domain, where the field is weak.
    pub fn eval(&self, x: f64, y: f64, z: f64) -> Vector {
        match self.find_cell(x, y, z) {
            Some((i, j, k, p, q, r)) => self.interpolate(i, j, k, p, q, r),
            None => Vector::zero(),
        }
    }

    /// Cell indices and fractional offsets of (x, y, z), or None outside the lattice.
    fn find_cell(&self, x: f64, y: f64, z: f64) -> Option<(usize, usize, usize, f64, f64, f64)> {
        if !(x.is_finite() && y.is_finite() && z.is_finite()) {
            return None;
        }

        let GridParameters {nx, ny, nz, dx, dy, dz} = self.parameters;

        //x and z are mirror symmetric, y is not
        let (i, p) = div_rem(x.abs(), dx);
        let (j, q) = div_rem(y, dy);
        let (k, r) = div_rem(z.abs(), dz);
        //quotients of huge inputs saturate, so the shift must not overflow
        let j = j.checked_add((ny/2) as i64)?;

        let inside = |index: i64, n: usize| (0 <= index) & (index < n as i64 - 1);
        if inside(i, nx) & inside(j, ny) & inside(k, nz) {
            Some((i as usize, j as usize, k as usize, p/dx, q/dy, r/dz))
        } else {
            None
        }
    }

    fn interpolate(&self, i: usize, j: usize, k: usize, p: f64, q: f64, r: f64) -> Vector {
        let mut c = [0.; FIELD_DIMENSION];

        for (axis, value) in c.iter_mut().enumerate() {
            let b = |i, j, k| self.field[self.index(i, j, k, axis)] as f64;

            let c00 = (1. - p)*b(i, j, k) + p*b(i + 1, j, k);
            let c01 = (1. - p)*b(i, j, k + 1) + p*b(i + 1, j, k + 1);
            let c10 = (1. - p)*b(i, j + 1, k) + p*b(i + 1, j + 1, k);
            let c11 = (1. - p)*b(i, j + 1, k + 1) + p*b(i + 1, j + 1, k + 1);

            let c0 = (1. - q)*c00 + q*c10;
            let c1 = (1. - q)*c01 + q*c11;

            *value = (1. - r)*c0 + r*c1;
        }

        Vector::new(c[0], c[1], c[2]).scale(self.scale)
    }

    /// Offset of component `axis` of node (i, j, k) in the sample buffer.
    #[inline]
    fn index(&self, i: usize, j: usize, k: usize, axis: usize) -> usize {
        let GridParameters {ny, nz, ..} = self.parameters;
        ((i*ny + j)*nz + k)*FIELD_DIMENSION + axis
    }

    /// Unscaled sample stored at node (i, j, k).
    pub fn node(&self, i: usize, j: usize, k: usize) -> Vector {
        Vector::new(
            self.field[self.index(i, j, k, 0)] as f64,
            self.field[self.index(i, j, k, 1)] as f64,
            self.field[self.index(i, j, k, 2)] as f64,
        )
    }

    /// Upward field component at the magnet center, scaled.
    pub fn central_field(&self) -> f64 {
        self.field[self.index(0, self.parameters.ny/2, 0, 1)] as f64*self.scale
    }

    pub fn parameters(&self) -> &GridParameters {
        &self.parameters
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn reset_scale(&mut self) {
        self.scale = 1.;
    }
}

fn check_parity(parameters: &GridParameters) -> Result<(), FieldError> {
    if parameters.ny % 2 == 0 {
        Err(FieldError::InvalidGridParity {ny: parameters.ny})
    } else {
        Ok(())
    }
}

/// Floored quotient and remainder of x/y.
#[inline]
fn div_rem(x: f64, y: f64) -> (i64, f64) {
    let div = (x/y).floor();
    (div as i64, x - div*y)
}
