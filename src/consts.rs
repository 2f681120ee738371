//Physical constants
/// Speed of light in meters/second.
pub const C: f64 = 299792458.;
/// Converts c*B*ds/p to radians when B is in T, ds in mm and p in MeV/c.
pub const DEFLECTION_UNIT: f64 = 1E-9;

//Field table layout
/// Number of field components stored per lattice node (Bx, By, Bz).
pub const FIELD_DIMENSION: usize = 3;
/// Size in bytes of one stored field component.
pub const FIELD_SAMPLE_BYTES: usize = std::mem::size_of::<f32>();

//Default SAMURAI field table shape
pub const DEFAULT_NX: usize = 301;
pub const DEFAULT_NY: usize = 81;
pub const DEFAULT_NZ: usize = 301;
/// Default mesh size in mm.
pub const DEFAULT_MESH: f64 = 10.;

//Default SAMURAI layout, mm and degrees
pub const DEFAULT_END_PLANE_DISTANCE: f64 = 6750.;
pub const DEFAULT_END_PLANE_ANGLE: f64 = -60.;
pub const MAGNET_WIDTH: f64 = 6700.;
pub const MAGNET_DEPTH: f64 = 3500.;
