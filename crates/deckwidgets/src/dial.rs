use crate::geometry::Point;
use strum::Display;

/// Start of the usable arc, measured clockwise from 12 o'clock.
pub const ARC_START: f64 = 30.0;
pub const ARC_END: f64 = 330.0;
pub const ARC_SWEEP: f64 = ARC_END - ARC_START;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl DialRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            step: step.abs(),
        }
    }

    fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Quantizes to `step`, rounds to one decimal and clamps into range.
    pub fn normalize(&self, value: f64) -> f64 {
        let mut v = value;
        if self.step > 0.0 {
            v = (v / self.step).round() * self.step;
        }
        v = (v * 10.0).round() / 10.0;
        v.clamp(self.min, self.max)
    }

    pub fn angle_to_value(&self, angle: f64) -> f64 {
        let angle = angle.clamp(ARC_START, ARC_END);
        self.normalize((angle - ARC_START) / ARC_SWEEP * self.span() + self.min)
    }

    pub fn value_to_angle(&self, value: f64) -> f64 {
        if self.span() <= f64::EPSILON {
            return ARC_START;
        }
        let value = value.clamp(self.min, self.max);
        (value - self.min) / self.span() * ARC_SWEEP + ARC_START
    }
}

impl Default for DialRange {
    fn default() -> Self {
        Self::new(10.0, 30.0, 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub angle: f64,
    pub major: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Comfort {
    Cool,
    Comfort,
    Warm,
}

impl Comfort {
    pub fn for_temperature(value: f64) -> Self {
        if value < 18.0 {
            Self::Cool
        } else if value < 22.0 {
            Self::Comfort
        } else {
            Self::Warm
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dial {
    range: DialRange,
    value: f64,
    angle: f64,
    dragging: bool,
}

impl Dial {
    pub fn new(range: DialRange, initial: f64) -> Self {
        let value = range.normalize(initial);
        Self {
            range,
            value,
            angle: range.value_to_angle(value),
            dragging: false,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn range(&self) -> DialRange {
        self.range
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn comfort(&self) -> Comfort {
        Comfort::for_temperature(self.value)
    }

    /// Pointer offset from the track center to a clockwise angle in `[0, 360)`
    /// with 0° at the top.
    pub fn angle_from_offset(dx: f64, dy: f64) -> f64 {
        let angle = dy.atan2(dx).to_degrees() + 90.0;
        if angle < 0.0 { angle + 360.0 } else { angle }
    }

    /// Angles in the dead zone snap to the nearest end of the arc.
    pub fn clamp_to_arc(angle: f64) -> f64 {
        if angle > ARC_END {
            ARC_END
        } else if angle < ARC_START {
            ARC_START
        } else {
            angle
        }
    }

    pub fn begin_drag(&mut self, dx: f64, dy: f64) -> f64 {
        self.dragging = true;
        self.update_from_offset(dx, dy)
    }

    /// Returns the new value, or `None` when no drag is in progress.
    pub fn drag_to(&mut self, dx: f64, dy: f64) -> Option<f64> {
        self.dragging.then(|| self.update_from_offset(dx, dy))
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    fn update_from_offset(&mut self, dx: f64, dy: f64) -> f64 {
        self.angle = Self::clamp_to_arc(Self::angle_from_offset(dx, dy));
        self.value = self.range.angle_to_value(self.angle);
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = self.range.normalize(value);
        self.angle = self.range.value_to_angle(self.value);
    }

    pub fn set_range(&mut self, range: DialRange) {
        self.range = range;
        self.set_value(self.value);
    }

    pub fn ticks(&self) -> Vec<Tick> {
        if self.range.step <= 0.0 || self.range.span() <= f64::EPSILON {
            return Vec::new();
        }
        let total = (self.range.span() / self.range.step).round() as usize;
        let tick_step = ARC_SWEEP / total as f64;
        (0..=total)
            .map(|i| Tick {
                angle: ARC_START + i as f64 * tick_step,
                major: i % 2 == 0,
            })
            .collect()
    }
}

/// Point on a circle for a dial angle (0° at the top, clockwise).
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    let rad = (angle - 90.0).to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_for_angle(angle: f64) -> (f64, f64) {
        let p = point_on_circle(Point::default(), 50.0, angle);
        (p.x, p.y)
    }

    #[test]
    fn test_reference_values() {
        let range = DialRange::new(10.0, 30.0, 0.5);
        assert_eq!(range.angle_to_value(30.0), 10.0);
        assert_eq!(range.angle_to_value(330.0), 30.0);
        assert_eq!(range.angle_to_value(180.0), 20.0);
    }

    #[test]
    fn test_pointer_angle_is_clockwise_from_top() {
        assert!((Dial::angle_from_offset(0.0, -10.0) - 0.0).abs() < 1e-9);
        assert!((Dial::angle_from_offset(10.0, 0.0) - 90.0).abs() < 1e-9);
        assert!((Dial::angle_from_offset(0.0, 10.0) - 180.0).abs() < 1e-9);
        assert!((Dial::angle_from_offset(-10.0, 0.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_dead_zone_clamps_to_nearest_boundary() {
        let mut dial = Dial::new(DialRange::default(), 21.0);

        let (dx, dy) = offset_for_angle(10.0);
        assert_eq!(dial.begin_drag(dx, dy), 10.0);
        assert_eq!(dial.angle(), ARC_START);

        let (dx, dy) = offset_for_angle(350.0);
        assert_eq!(dial.drag_to(dx, dy), Some(30.0));
        assert_eq!(dial.angle(), ARC_END);

        // straight up sits in the dead zone
        assert_eq!(dial.drag_to(0.0, -40.0), Some(10.0));
    }

    #[test]
    fn test_values_are_quantized_and_bounded() {
        let range = DialRange::new(10.0, 30.0, 0.5);
        for i in 0..=720 {
            let v = range.angle_to_value(i as f64 * 0.5);
            assert!((10.0..=30.0).contains(&v));
            let steps = (v - 10.0) / 0.5;
            assert!((steps - steps.round()).abs() < 1e-9, "{v} not on step");
        }
    }

    #[test]
    fn test_drag_requires_active_interaction() {
        let mut dial = Dial::new(DialRange::default(), 21.0);
        assert_eq!(dial.drag_to(10.0, 0.0), None);
        dial.begin_drag(10.0, 0.0);
        assert!(dial.is_dragging());
        dial.end_drag();
        assert_eq!(dial.drag_to(0.0, 10.0), None);
        assert_eq!(dial.value(), 14.0);
    }

    #[test]
    fn test_initial_value_places_handle() {
        let dial = Dial::new(DialRange::default(), 21.0);
        assert!((dial.angle() - 195.0).abs() < 1e-9);
        assert_eq!(dial.comfort(), Comfort::Comfort);
    }

    #[test]
    fn test_initial_value_is_quantized() {
        let range = DialRange::new(10.0, 30.0, 0.5);
        let dial = Dial::new(range, 21.3);
        assert_eq!(dial.value(), 21.5);
        assert_eq!(dial.angle(), range.value_to_angle(21.5));
        assert_eq!(Dial::new(range, 4.0).value(), 10.0);
    }

    #[test]
    fn test_set_range_renormalizes_value() {
        let mut dial = Dial::new(DialRange::default(), 28.0);
        dial.set_range(DialRange::new(16.0, 24.0, 1.0));
        assert_eq!(dial.value(), 24.0);
        assert_eq!(dial.angle(), ARC_END);
    }

    #[test]
    fn test_ticks_alternate_major_minor() {
        let dial = Dial::new(DialRange::default(), 21.0);
        let ticks = dial.ticks();
        assert_eq!(ticks.len(), 41);
        assert!(ticks[0].major);
        assert!(!ticks[1].major);
        assert!((ticks[40].angle - ARC_END).abs() < 1e-9);
    }

    #[test]
    fn test_comfort_labels() {
        assert_eq!(Comfort::for_temperature(17.5).to_string(), "Cool");
        assert_eq!(Comfort::for_temperature(18.0).to_string(), "Comfort");
        assert_eq!(Comfort::for_temperature(22.0).to_string(), "Warm");
    }
}
