use super::*;

/// Number of corrector passes per step.
const CORRECTOR_ITERATIONS: usize = 2;

/// Trajectory tracer through a tabulated dipole field.
///
/// Lengths are in mm, momenta in MeV/c, fields in T and angles in degrees.
/// Each step is a predictor-corrector update of the momentum direction under
/// the Lorentz force. The position advances by exactly `step_length` along the
/// mean of the old and new momentum. Tracing stops when the exit plane is
/// crossed or after `max_point` steps.
///
/// `trace` reuses the sample buffers of the tracer, so one instance must not
/// trace on several threads at once. Clones share the read-only field table.
#[derive(Clone, Debug)]
pub struct Tracer {
    max_point: usize,
    step_length: f64,
    frame: MountingFrame,
    end_plane: ExitPlane,
    field: Option<Arc<FieldGrid>>,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    flight_length: f64,
    position: Vector,
    momentum: Vector,
    charge: f64,
}

impl Tracer {
    pub fn new() -> Tracer {
        Tracer {
            max_point: 0,
            step_length: 0.,
            frame: MountingFrame::default(),
            end_plane: ExitPlane::default(),
            field: None,
            x: vec![],
            y: vec![],
            z: vec![],
            flight_length: f64::NAN,
            position: Vector::zero(),
            momentum: Vector::zero(),
            charge: 0.,
        }
    }

    /// Loads a field file, replacing any previous field. On failure the tracer is left without a field.
    pub fn load_field<P: AsRef<Path>>(&mut self, path: P, scale: f64, parameters: &GridParameters) -> Result<(), FieldError> {
        let path = path.as_ref();
        self.field = None;

        match FieldGrid::load(path, scale, parameters) {
            Ok(field) => {
                info!("Loaded magnet field from {}", path.display());
                self.field = Some(Arc::new(field));
                Ok(())
            },
            Err(e) => {
                error!("Failed to load magnet field: {}", e);
                Err(e)
            }
        }
    }

    /// Installs a field table that is already in memory.
    pub fn set_field(&mut self, field: FieldGrid) {
        self.field = Some(Arc::new(field));
    }

    pub fn field(&self) -> Option<&FieldGrid> {
        self.field.as_deref()
    }

    pub fn is_good(&self) -> bool {
        self.field.is_some()
    }

    pub fn set_max_point(&mut self, max_point: usize) {
        self.max_point = max_point;
        for samples in [&mut self.x, &mut self.y, &mut self.z] {
            samples.clear();
            samples.reserve(max_point);
        }
    }

    pub fn set_step_length(&mut self, step_length: f64) {
        self.step_length = step_length;
    }

    pub fn set_rotation_angle(&mut self, angle: f64) {
        self.frame = MountingFrame::new(angle);
    }

    pub fn set_end_plane(&mut self, distance: f64, angle: f64) {
        self.end_plane = ExitPlane::new(distance, angle);
    }

    pub fn set_end_plane_distance(&mut self, distance: f64) {
        self.end_plane.distance = distance;
    }

    pub fn set_end_plane_angle(&mut self, angle: f64) {
        self.end_plane.angle = angle;
    }

    /// Applies run and geometry settings.
    pub fn configure(&mut self, options: &Options, geometry: &GeometryInput) {
        self.set_max_point(options.max_point);
        self.set_step_length(options.step_length);
        self.set_rotation_angle(geometry.magnet_angle);
        self.set_end_plane(geometry.end_plane_distance, geometry.end_plane_angle);
    }

    pub fn max_point(&self) -> usize {
        self.max_point
    }

    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    pub fn frame(&self) -> &MountingFrame {
        &self.frame
    }

    pub fn end_plane(&self) -> &ExitPlane {
        &self.end_plane
    }

    /// Traces a particle from `xi` with momentum `pi` and charge `charge` (units of e).
    ///
    /// Returns Ok(true) if the exit plane was reached and Ok(false) if the step budget
    /// ran out first. Fails with `NotReady` if no field has been loaded.
    pub fn trace(&mut self, xi: &Vector, pi: &Vector, charge: f64) -> Result<bool, FieldError> {
        let field = match &self.field {
            Some(field) => Arc::clone(field),
            None => return Err(FieldError::NotReady),
        };

        self.position = *xi;
        self.momentum = *pi;
        self.charge = charge;
        self.x.clear();
        self.y.clear();
        self.z.clear();
        self.flight_length = f64::NAN;

        for step_index in 0..self.max_point {
            self.trace_one_step(&field);

            let distance = self.end_plane.signed_distance(&self.position);
            if distance < 0. {
                self.flight_length = (step_index + 1) as f64*self.step_length
                    + self.end_plane.correction(distance, &self.momentum);
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn trace_one_step(&mut self, field: &FieldGrid) {
        let p0 = self.momentum;
        let r0 = self.position;
        let mut p_new = p0;
        let mut r_new = r0;

        let mut b = self.frame.field_at(field, &r0);
        let p1 = deflect(&p0, &p0, &b, p0.xy_magnitude(), self.step_length, self.charge);

        for iteration in 0..CORRECTOR_ITERATIONS {
            if iteration > 0 {
                b = self.frame.field_at(field, &r_new);
            }

            let p2 = deflect(&p0, &p1, &b, p_new.xy_magnitude(), self.step_length, self.charge);
            p_new = p1.add(&p2).scale(0.5);

            let dx = p0.add(&p_new);
            r_new = r0.add(&dx.scale(self.step_length/dx.magnitude()));
        }

        self.position = r_new;
        self.momentum = p_new;
        self.x.push(r_new.x);
        self.y.push(r_new.y);
        self.z.push(r_new.z);
    }

    /// Field in the tracer frame at `position`. Zero if no field is loaded.
    pub fn field_at(&self, position: &Vector) -> Vector {
        match &self.field {
            Some(field) => self.frame.field_at(field, position),
            None => Vector::zero(),
        }
    }

    /// Path length to the exit plane of the last trace. NaN unless it reached the plane.
    pub fn flight_length(&self) -> f64 {
        self.flight_length
    }

    pub fn x_array(&self) -> &[f64] {
        &self.x
    }

    pub fn y_array(&self) -> &[f64] {
        &self.y
    }

    pub fn z_array(&self) -> &[f64] {
        &self.z
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn momentum(&self) -> &Vector {
        &self.momentum
    }

    /// Copy of the last traced path.
    pub fn trajectory(&self) -> Trajectory {
        Trajectory {
            x: self.x.clone(),
            y: self.y.clone(),
            z: self.z.clone(),
            reached: !self.flight_length.is_nan(),
            flight_length: self.flight_length,
        }
    }

    /// Upward field at the magnet center in T. Zero if no field is loaded.
    pub fn central_field(&self) -> f64 {
        self.field.as_ref().map_or(0., |field| field.central_field())
    }

    /// Rescales the field so that the central field equals `field` T.
    pub fn scale_central_field_to(&mut self, field: f64) -> Result<(), FieldError> {
        let grid = Arc::make_mut(self.field.as_mut().ok_or(FieldError::NotReady)?);

        grid.reset_scale();
        let central_field = grid.central_field();
        if central_field == 0. {
            return Err(FieldError::ZeroCentralField);
        }
        grid.set_scale(field/central_field);
        Ok(())
    }
}

impl Default for Tracer {
    fn default() -> Tracer {
        Tracer::new()
    }
}

/// Turns the reference momentum `pi` by the deflection one step of length `step` causes.
///
/// The angular change is computed from the working momentum `pb` and field `b`, with
/// `pxy` the transverse magnitude used in the denominators. The result keeps the
/// magnitude of `pi`. No deflection is applied when `pxy` vanishes, since the azimuth
/// is undefined there.
pub fn deflect(pi: &Vector, pb: &Vector, b: &Vector, pxy: f64, step: f64, charge: f64) -> Vector {
    let pi_mag = pi.magnitude();
    if pi_mag == 0. {
        return *pi;
    }

    let factor = step*C*charge/pi_mag*DEFLECTION_UNIT;

    let (d_phi, d_theta) = if pxy > 0. {
        (
            factor*(pb.z*(pb.x*b.x + pb.y*b.y)/pxy/pxy - b.z),
            factor*(pb.x*b.y - pb.y*b.x)/pxy
        )
    } else {
        (0., 0.)
    };

    Vector::from_spherical(pi_mag, pi.theta() + d_theta, pi.phi() + d_phi)
}
