use super::*;

/// 3D vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Vector {
        Vector {
            x,
            y,
            z
        }
    }

    /// Builds a vector of length `magnitude` at polar angle `theta` (from +z) and azimuth `phi` (from +x).
    pub fn from_spherical(magnitude: f64, theta: f64, phi: f64) -> Vector {
        Vector::new(
            magnitude*theta.sin()*phi.cos(),
            magnitude*theta.sin()*phi.sin(),
            magnitude*theta.cos()
        )
    }

    pub fn zero() -> Vector {
        Vector::new(0., 0., 0.)
    }

    /// Calculates vector magnitude.
    pub fn magnitude(&self) -> f64 {
        (self.x*self.x + self.y*self.y + self.z*self.z).sqrt()
    }

    /// Magnitude of the projection onto the (x, y) plane.
    pub fn xy_magnitude(&self) -> f64 {
        (self.x*self.x + self.y*self.y).sqrt()
    }

    /// Polar angle measured from +z. Zero for the null vector.
    pub fn theta(&self) -> f64 {
        self.xy_magnitude().atan2(self.z)
    }

    /// Azimuthal angle in the (x, y) plane. Zero when the projection vanishes.
    pub fn phi(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Add this vector and another and return a new vector.
    pub fn add(&self, other: &Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn scale(&self, factor: f64) -> Vector {
        Vector::new(self.x*factor, self.y*factor, self.z*factor)
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x*other.x + self.y*other.y + self.z*other.z
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Sampled path of one traced particle.
#[derive(Clone, Debug)]
pub struct Trajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    /// True if the exit plane was crossed.
    pub reached: bool,
    /// Path length to the exit plane in mm. NaN if the plane was not reached or the path was clipped.
    pub flight_length: f64,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Keeps the first `n` samples. A shortened path no longer ends on the exit plane.
    pub fn truncate(&mut self, n: usize) {
        if n < self.len() {
            self.x.truncate(n);
            self.y.truncate(n);
            self.z.truncate(n);
            self.flight_length = f64::NAN;
        }
    }
}
