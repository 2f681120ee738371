use super::*;

/// Internal representation of an input file.
#[derive(Deserialize, Clone)]
pub struct Input {
    #[serde(default)]
    pub options: Options,
    #[serde(default)]
    pub geometry_input: GeometryInput,
    pub magnet_parameters: MagnetParameters,
    pub trajectory_parameters: TrajectoryParameters,
}

impl Input {
    pub fn new(string: &str) -> Result<Input> {
        toml::from_str(string).context(
            "Could not parse TOML file. Be sure the [magnet_parameters] and [trajectory_parameters] tables are present."
        )
    }
}

///This helper function is a workaround to issue #368 in serde
fn default_name() -> String {
    String::new()
}

///This helper function is a workaround to issue #368 in serde
fn default_x_range() -> (f64, f64) {
    (-8000., 8000.)
}

///This helper function is a workaround to issue #368 in serde
fn default_y_range() -> (f64, f64) {
    (-6000., 10000.)
}

///This helper function is a workaround to issue #368 in serde
fn default_max_point() -> usize {
    500
}

///This helper function is a workaround to issue #368 in serde
fn default_step_length() -> f64 {
    50.
}

///This helper function is a workaround to issue #368 in serde
fn one_usize() -> usize {
    1
}

///This helper function is a workaround to issue #368 in serde
fn default_buffer_size() -> usize {
    8192
}

///This helper function is a workaround to issue #368 in serde
fn default_target_center() -> (f64, f64) {
    (0., -4000.)
}

///This helper function is a workaround to issue #368 in serde
fn default_magnet_angle() -> f64 {
    -30.
}

///This helper function is a workaround to issue #368 in serde
fn default_end_plane_distance() -> f64 {
    DEFAULT_END_PLANE_DISTANCE
}

///This helper function is a workaround to issue #368 in serde
fn default_end_plane_angle() -> f64 {
    DEFAULT_END_PLANE_ANGLE
}

///This helper function is a workaround to issue #368 in serde
fn default_nx() -> usize {
    DEFAULT_NX
}

///This helper function is a workaround to issue #368 in serde
fn default_ny() -> usize {
    DEFAULT_NY
}

///This helper function is a workaround to issue #368 in serde
fn default_nz() -> usize {
    DEFAULT_NZ
}

///This helper function is a workaround to issue #368 in serde
fn default_mesh() -> f64 {
    DEFAULT_MESH
}

///This helper function is a workaround to issue #368 in serde
fn one_f64() -> f64 {
    1.
}

/// Run-level options: output prefix, viewport and stepping.
#[derive(Deserialize, Clone, Debug)]
pub struct Options {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_x_range")]
    pub x_range: (f64, f64),
    #[serde(default = "default_y_range")]
    pub y_range: (f64, f64),
    #[serde(default = "default_max_point")]
    pub max_point: usize,
    #[serde(default = "default_step_length")]
    pub step_length: f64,
    #[serde(default = "one_usize")]
    pub num_threads: usize,
    #[serde(default = "default_buffer_size")]
    pub write_buffer_size: usize,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            name: default_name(),
            x_range: default_x_range(),
            y_range: default_y_range(),
            max_point: default_max_point(),
            step_length: default_step_length(),
            num_threads: one_usize(),
            write_buffer_size: default_buffer_size(),
        }
    }
}

/// Spectrometer layout in the lab frame, mm and degrees.
#[derive(Deserialize, Clone, Debug)]
pub struct GeometryInput {
    #[serde(default = "default_target_center")]
    pub target_center: (f64, f64),
    #[serde(default = "default_magnet_angle")]
    pub magnet_angle: f64,
    #[serde(default = "default_end_plane_distance")]
    pub end_plane_distance: f64,
    #[serde(default = "default_end_plane_angle")]
    pub end_plane_angle: f64,
}

impl Default for GeometryInput {
    fn default() -> GeometryInput {
        GeometryInput {
            target_center: default_target_center(),
            magnet_angle: default_magnet_angle(),
            end_plane_distance: default_end_plane_distance(),
            end_plane_angle: default_end_plane_angle(),
        }
    }
}

/// Field map location, shape and normalization.
#[derive(Deserialize, Clone, Debug)]
pub struct MagnetParameters {
    pub field_file: PathBuf,
    pub central_field: Option<f64>,
    #[serde(default = "one_f64")]
    pub scale: f64,
    #[serde(default = "default_nx")]
    pub nx: usize,
    #[serde(default = "default_ny")]
    pub ny: usize,
    #[serde(default = "default_nz")]
    pub nz: usize,
    #[serde(default = "default_mesh")]
    pub dx: f64,
    #[serde(default = "default_mesh")]
    pub dy: f64,
    #[serde(default = "default_mesh")]
    pub dz: f64,
}

impl MagnetParameters {
    pub fn grid_parameters(&self) -> GridParameters {
        GridParameters::new(self.nx, self.ny, self.nz, self.dx, self.dy, self.dz)
    }
}

/// Per-trajectory settings as parallel arrays.
#[derive(Deserialize, Clone, Debug)]
pub struct TrajectoryParameters {
    pub Z: Vec<f64>,
    pub A: Vec<f64>,
    /// Momentum per nucleon in MeV/c.
    pub p: Vec<f64>,
    /// Lateral offset at the target in mm.
    pub x: Vec<f64>,
    /// Horizontal angle in degrees.
    pub theta: Vec<f64>,
    #[serde(default)]
    pub comment: Vec<String>,
}

/// Initial state of one trajectory in the tracer frame.
#[derive(Clone, Debug)]
pub struct TrajectoryInput {
    pub Z: f64,
    pub A: f64,
    pub p: f64,
    pub theta: f64,
    pub comment: String,
    pub position: Vector,
    pub momentum: Vector,
}

impl TrajectoryInput {
    /// Places a particle at the target, shifted by `x`, heading downstream at `theta` degrees.
    pub fn new(Z: f64, A: f64, p: f64, x: f64, theta: f64, comment: String, geometry: &GeometryInput) -> TrajectoryInput {
        let (target_x, target_y) = geometry.target_center;
        let momentum = p*A;
        let (s, c) = theta.to_radians().sin_cos();

        TrajectoryInput {
            Z,
            A,
            p,
            theta,
            comment,
            position: Vector::new(-target_x - x, target_y, 0.),
            momentum: Vector::new(-momentum*s, momentum*c, 0.),
        }
    }
}

/// Reads and checks an input file. A relative field file is resolved against the input file's directory.
pub fn input(input_file: &Path) -> Result<(Vec<TrajectoryInput>, Options, GeometryInput, MagnetParameters)> {

    let input_toml = std::fs::read_to_string(input_file)
        .with_context(|| format!("Input error: could not open input file {}.", input_file.display()))?;

    let input = Input::new(&input_toml)?;

    let options = input.options;
    let geometry_input = input.geometry_input;
    let mut magnet_parameters = input.magnet_parameters;
    let trajectory_parameters = input.trajectory_parameters;

    ensure!(options.num_threads > 0, "Input error: num_threads must be greater than zero.");
    ensure!(options.step_length > 0., "Input error: step_length must be greater than zero.");
    ensure!(magnet_parameters.ny % 2 == 1, "Input error: ny must be odd but it is {}.", magnet_parameters.ny);

    if magnet_parameters.field_file.is_relative() {
        if let Some(directory) = input_file.parent() {
            magnet_parameters.field_file = directory.join(&magnet_parameters.field_file);
        }
    }

    let trajectory_inputs = trajectory_inputs(&trajectory_parameters, &geometry_input)?;

    Ok((trajectory_inputs, options, geometry_input, magnet_parameters))
}

/// Expands the parallel trajectory arrays into initial states.
pub fn trajectory_inputs(trajectory_parameters: &TrajectoryParameters, geometry_input: &GeometryInput) -> Result<Vec<TrajectoryInput>> {
    let TrajectoryParameters {Z, A, p, x, theta, comment} = trajectory_parameters;
    let N = Z.len();

    ensure!(N > 0, "Input error: no trajectories given in [trajectory_parameters].");

    //Check that trajectory arrays are equal length
    ensure!(A.len() == N && p.len() == N && x.len() == N && theta.len() == N,
        "Input error: trajectory input arrays of unequal length.");
    ensure!(comment.is_empty() || comment.len() == N,
        "Input error: trajectory comment array must be empty or match the other trajectory arrays.");

    let inputs = izip!(Z, A, p, x, theta).enumerate()
        .map(|(index, (&Z, &A, &p, &x, &theta))| {
            let comment = comment.get(index).cloned().unwrap_or_default();
            TrajectoryInput::new(Z, A, p, x, theta, comment, geometry_input)
        })
        .collect();

    Ok(inputs)
}
