use crate::geometry::{Point, elastic, interpolate};
use crate::spring::{Spring, SpringConfig};

pub const DEFAULT_BASE_SIZE: f64 = 180.0;
pub const KNOB_RATIO: f64 = 0.4;
pub const DRAG_ELASTICITY: f64 = 0.1;
pub const RETURN_SPRING: SpringConfig = SpringConfig::new(150.0, 15.0);

/// Knob position inside a square constraint box, reported as a vector in
/// `[-1, 1] x [-1, 1]`.
///
/// Only drag input produces change notifications. The spring that pulls the
/// knob back to center after release moves the knob but emits nothing.
#[derive(Debug, Clone)]
pub struct Joystick {
    base_size: f64,
    knob_size: f64,
    constraint: f64,
    x: Spring,
    y: Spring,
    drag_origin: Point,
    dragging: bool,
}

impl Joystick {
    pub fn new(base_size: f64) -> Self {
        let base_size = base_size.max(1.0);
        let knob_size = base_size * KNOB_RATIO;
        let constraint = base_size - knob_size;
        let center = constraint / 2.0;
        Self {
            base_size,
            knob_size,
            constraint,
            x: Spring::new(RETURN_SPRING, center),
            y: Spring::new(RETURN_SPRING, center),
            drag_origin: Point::new(center, center),
            dragging: false,
        }
    }

    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    pub fn knob_size(&self) -> f64 {
        self.knob_size
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn center(&self) -> f64 {
        self.constraint / 2.0
    }

    /// Top-left corner of the knob in pixels.
    pub fn knob_origin(&self) -> Point {
        Point::new(self.x.value(), self.y.value())
    }

    pub fn knob_center(&self) -> Point {
        let half = self.knob_size / 2.0;
        Point::new(self.x.value() + half, self.y.value() + half)
    }

    pub fn hits_knob(&self, p: Point) -> bool {
        p.distance_to(self.knob_center()) <= self.knob_size / 2.0
    }

    pub fn normalized(&self) -> (f64, f64) {
        let stops = [(0.0, -1.0), (self.constraint, 1.0)];
        (
            interpolate(self.x.value(), &stops),
            interpolate(self.y.value(), &stops),
        )
    }

    pub fn begin_drag(&mut self) {
        let origin = self.knob_origin();
        self.x.jump_to(origin.x);
        self.y.jump_to(origin.y);
        self.drag_origin = origin;
        self.dragging = true;
    }

    /// Moves the knob by the pointer offset since drag start.
    pub fn drag_by(&mut self, dx: f64, dy: f64) -> Option<(f64, f64)> {
        if !self.dragging {
            return None;
        }
        let hi = self.constraint;
        self.x.jump_to(elastic(self.drag_origin.x + dx, 0.0, hi, DRAG_ELASTICITY));
        self.y.jump_to(elastic(self.drag_origin.y + dy, 0.0, hi, DRAG_ELASTICITY));
        Some(self.normalized())
    }

    /// Starts the return animation and yields the final centered position.
    pub fn end_drag(&mut self) -> Option<(f64, f64)> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;
        let center = self.center();
        self.x.animate_to(center, RETURN_SPRING);
        self.y.animate_to(center, RETURN_SPRING);
        Some((0.0, 0.0))
    }

    /// Advances the return animation. Returns `true` while the knob is moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        let moving_x = self.x.step(dt);
        let moving_y = self.y.step(dt);
        moving_x || moving_y
    }

    pub fn is_animating(&self) -> bool {
        !self.x.is_settled() || !self.y.is_settled()
    }

    /// Readout text with two decimals per axis.
    pub fn readout(&self) -> (String, String) {
        let (x, y) = self.normalized();
        (format!("{x:.2}"), format!("{y:.2}"))
    }
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(joystick: &mut Joystick) {
        for _ in 0..600 {
            if !joystick.tick(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn test_starts_centered() {
        let joystick = Joystick::default();
        assert_eq!(joystick.normalized(), (0.0, 0.0));
        assert!(!joystick.is_animating());
    }

    #[test]
    fn test_drag_reports_normalized_position() {
        let mut joystick = Joystick::new(180.0);
        joystick.begin_drag();
        // constraint is 108, center 54
        let (x, y) = joystick.drag_by(27.0, -54.0).unwrap();
        assert!((x - 0.5).abs() < 1e-9);
        assert!((y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_overshoot_stays_in_unit_square() {
        let mut joystick = Joystick::default();
        joystick.begin_drag();
        for (dx, dy) in [(500.0, 500.0), (-500.0, 0.0), (0.0, -900.0), (77.0, -3.0)] {
            let (x, y) = joystick.drag_by(dx, dy).unwrap();
            assert!((-1.0..=1.0).contains(&x));
            assert!((-1.0..=1.0).contains(&y));
        }
    }

    #[test]
    fn test_release_returns_to_origin_and_emits_zero() {
        let mut joystick = Joystick::default();
        joystick.begin_drag();
        joystick.drag_by(40.0, 20.0);
        assert_eq!(joystick.end_drag(), Some((0.0, 0.0)));
        assert!(joystick.is_animating());
        settle(&mut joystick);
        assert_eq!(joystick.normalized(), (0.0, 0.0));
        assert_eq!(joystick.readout(), ("0.00".to_string(), "0.00".to_string()));
    }

    #[test]
    fn test_return_animation_does_not_emit() {
        let mut joystick = Joystick::default();
        joystick.begin_drag();
        joystick.drag_by(40.0, 20.0);
        joystick.end_drag();
        joystick.tick(1.0 / 60.0);
        assert_eq!(joystick.drag_by(5.0, 5.0), None);
        assert_eq!(joystick.end_drag(), None);
    }

    #[test]
    fn test_regrab_during_return_continues_from_current_position() {
        let mut joystick = Joystick::default();
        joystick.begin_drag();
        joystick.drag_by(54.0, 0.0);
        joystick.end_drag();
        joystick.tick(0.05);
        let mid = joystick.knob_origin();
        joystick.begin_drag();
        assert!(!joystick.is_animating());
        let (x, _) = joystick.drag_by(0.0, 0.0).unwrap();
        let expected = mid.x / 108.0 * 2.0 - 1.0;
        assert!((x - expected).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_uses_knob_circle() {
        let joystick = Joystick::default();
        assert!(joystick.hits_knob(Point::new(90.0, 90.0)));
        assert!(!joystick.hits_knob(Point::new(5.0, 5.0)));
    }
}
