#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Offset of `self` relative to `origin`.
    pub fn offset_from(&self, origin: Point) -> (f64, f64) {
        (self.x - origin.x, self.y - origin.y)
    }
}

/// Piecewise-linear mapping through `(input, output)` stops.
///
/// Stops must be sorted by input. Values outside the first or last stop clamp
/// to that stop's output, so the result never leaves the output range.
pub fn interpolate(input: f64, stops: &[(f64, f64)]) -> f64 {
    let (Some(&(first_in, first_out)), Some(&(last_in, last_out))) = (stops.first(), stops.last())
    else {
        return input;
    };

    if input <= first_in {
        return first_out;
    }
    if input >= last_in {
        return last_out;
    }

    stops
        .windows(2)
        .find(|w| input >= w[0].0 && input <= w[1].0)
        .map(|w| {
            let (a_in, a_out) = w[0];
            let (b_in, b_out) = w[1];
            let span = b_in - a_in;
            if span <= f64::EPSILON {
                b_out
            } else {
                a_out + (b_out - a_out) * ((input - a_in) / span)
            }
        })
        .unwrap_or(last_out)
}

/// Drag elasticity outside `[lo, hi]`: overshoot moves at `factor` of the
/// pointer's speed.
pub fn elastic(raw: f64, lo: f64, hi: f64, factor: f64) -> f64 {
    if raw < lo {
        lo - (lo - raw) * factor
    } else if raw > hi {
        hi + (raw - hi) * factor
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_clamps_to_end_stops() {
        let stops = [(0.0, -1.0), (100.0, 1.0)];
        assert_eq!(interpolate(-50.0, &stops), -1.0);
        assert_eq!(interpolate(150.0, &stops), 1.0);
        assert_eq!(interpolate(50.0, &stops), 0.0);
    }

    #[test]
    fn test_interpolate_multiple_segments() {
        let stops = [(0.0, 0.5), (10.0, 0.8), (20.0, 1.0)];
        assert!((interpolate(5.0, &stops) - 0.65).abs() < 1e-9);
        assert!((interpolate(15.0, &stops) - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_interpolate_degenerate_stops() {
        assert_eq!(interpolate(3.0, &[]), 3.0);
        assert_eq!(interpolate(0.0, &[(0.0, 0.0), (0.0, 1.0)]), 0.0);
        assert_eq!(interpolate(1.0, &[(0.0, 0.0), (0.0, 1.0)]), 1.0);
    }

    #[test]
    fn test_elastic_scales_overshoot() {
        assert_eq!(elastic(50.0, 0.0, 100.0, 0.1), 50.0);
        assert!((elastic(120.0, 0.0, 100.0, 0.1) - 102.0).abs() < 1e-9);
        assert!((elastic(-30.0, 0.0, 100.0, 0.1) + 3.0).abs() < 1e-9);
    }
}
