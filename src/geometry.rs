use super::*;
use geo::algorithm::contains::Contains;
use geo::algorithm::rotate::Rotate;
use geo::{Polygon, LineString, Point};

/// Visible region of the lab frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    /// Constructs a viewport from (min, max) ranges, swapping reversed pairs.
    pub fn new(x_range: (f64, f64), y_range: (f64, f64)) -> Viewport {
        let (x_min, x_max) = if x_range.1 < x_range.0 {(x_range.1, x_range.0)} else {x_range};
        let (y_min, y_max) = if y_range.1 < y_range.0 {(y_range.1, y_range.0)} else {y_range};

        Viewport {
            x_min,
            x_max,
            y_min,
            y_max
        }
    }

    pub fn inside(&self, x: f64, y: f64) -> bool {
        (self.x_min < x) & (x < self.x_max) & (self.y_min < y) & (y < self.y_max)
    }
}

/// Regions a drawn trajectory must stop at: the magnet side yokes and the viewport edge.
pub struct Bounds {
    pub yokes: Vec<Polygon<f64>>,
    pub viewport: Viewport,
}

impl Bounds {
    pub fn new(options: &Options, geometry: &GeometryInput) -> Bounds {
        Bounds {
            yokes: side_yokes(geometry.magnet_angle),
            viewport: Viewport::new(options.x_range, options.y_range),
        }
    }

    /// True if (x, y) lies in a yoke or outside the viewport.
    pub fn blocks(&self, x: f64, y: f64) -> bool {
        let point = Point::new(x, y);
        self.yokes.iter().any(|yoke| yoke.contains(&point)) | !self.viewport.inside(x, y)
    }

    /// Number of leading samples of `trajectory` before the first blocked one.
    pub fn visible_length(&self, trajectory: &Trajectory) -> usize {
        trajectory.x.iter().zip(&trajectory.y)
            .position(|(&x, &y)| self.blocks(x, y))
            .unwrap_or(trajectory.len())
    }

    /// Cuts `trajectory` at the first blocked sample.
    pub fn clip(&self, trajectory: &mut Trajectory) {
        let n = self.visible_length(trajectory);
        trajectory.truncate(n);
    }
}

/// The four side yokes of the dipole, turned by `magnet_angle` degrees about the magnet center.
pub fn side_yokes(magnet_angle: f64) -> Vec<Polygon<f64>> {
    let outline = [
        (MAGNET_WIDTH/2. - 700., -MAGNET_DEPTH/2.),
        (MAGNET_WIDTH/2. - 1600., -1200./2.),
        (MAGNET_WIDTH/2. - 1600., -200.),
        (MAGNET_WIDTH/2., -200.),
        (MAGNET_WIDTH/2., -MAGNET_DEPTH/2.),
    ];

    (0..4).map(|i| {
        let x_sign = if i % 2 == 1 {1.} else {-1.};
        let y_sign = if i / 2 == 1 {1.} else {-1.};

        let points: Vec<(f64, f64)> = outline.iter()
            .map(|(x, y)| (x*x_sign, y*y_sign))
            .collect();

        Polygon::new(LineString::from(points), vec![])
            .rotate_around_point(magnet_angle, Point::new(0., 0.))
    }).collect()
}
