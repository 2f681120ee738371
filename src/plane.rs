use super::*;

/// Vertical plane that terminates tracing.
///
/// The plane lies `distance` mm from the origin along the horizontal normal
/// (-sin(angle), cos(angle)), with `angle` in degrees. A position is past the
/// plane when its signed distance is negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitPlane {
    pub distance: f64,
    pub angle: f64,
}

impl ExitPlane {
    pub fn new(distance: f64, angle: f64) -> ExitPlane {
        ExitPlane {
            distance,
            angle
        }
    }

    /// Unit normal in the (x, y) plane.
    pub fn normal(&self) -> Vector {
        let (s, c) = self.angle.to_radians().sin_cos();
        Vector::new(-s, c, 0.)
    }

    pub fn signed_distance(&self, position: &Vector) -> f64 {
        self.distance - position.dot(&self.normal())
    }

    pub fn crossed(&self, position: &Vector) -> bool {
        self.signed_distance(position) < 0.
    }

    /// Path length from a position past the plane back to it, along `momentum`. Negative when past the plane.
    pub fn correction(&self, signed_distance: f64, momentum: &Vector) -> f64 {
        signed_distance*momentum.magnitude()/momentum.dot(&self.normal())
    }
}

impl Default for ExitPlane {
    fn default() -> ExitPlane {
        ExitPlane::new(DEFAULT_END_PLANE_DISTANCE, DEFAULT_END_PLANE_ANGLE)
    }
}

impl fmt::Display for ExitPlane {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Exit plane at {} mm, {} deg", self.distance, self.angle)
    }
}
