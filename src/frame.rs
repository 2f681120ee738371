use super::*;

/// Mounting of the field table in the tracer frame.
///
/// The tracer works with (x, y) horizontal and z upward. The field table uses
/// x horizontal, y upward and z horizontal, and is turned by `rotation_angle`
/// degrees about the vertical axis. Positions are rotated back by the mounting
/// angle before the lookup and the field is rotated forward afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MountingFrame {
    pub rotation_angle: f64,
}

impl MountingFrame {
    pub fn new(rotation_angle: f64) -> MountingFrame {
        MountingFrame {
            rotation_angle
        }
    }

    /// Field at `position` (tracer frame), expressed in the tracer frame.
    pub fn field_at(&self, field: &FieldGrid, position: &Vector) -> Vector {
        let angle = self.rotation_angle.to_radians();

        let (x_table, z_table) = rotate_2d(position.x, position.y, -angle);
        let b = field.eval(x_table, position.z, z_table);

        //table y is vertical; table x has opposite handedness
        let (bx, by) = rotate_2d(-b.x, b.z, angle);
        Vector::new(bx, by, b.y)
    }
}

/// Rotates (x, y) counterclockwise by `angle` radians.
pub fn rotate_2d(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (s, c) = angle.sin_cos();
    (c*x - s*y, s*x + c*y)
}
