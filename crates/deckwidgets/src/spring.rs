//! Damped spring used for the return and snap animations.
//!
//! Integrated with RK4 in fixed sub-steps so large frame gaps stay stable.

const MAX_SUBSTEP: f64 = 1.0 / 240.0;
const REST_DISTANCE: f64 = 0.01;
const REST_VELOCITY: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    fn acceleration(&self, displacement: f64, velocity: f64) -> f64 {
        (-self.stiffness * displacement - self.damping * velocity) / self.mass
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::new(100.0, 10.0)
    }
}

#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Moves immediately and stops any running animation.
    pub fn jump_to(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn animate_to(&mut self, target: f64, config: SpringConfig) {
        self.config = config;
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DISTANCE && self.velocity.abs() < REST_VELOCITY
    }

    /// Advances the simulation by `dt` seconds. Returns `true` while still moving.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return false;
        }

        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            let h = remaining.min(MAX_SUBSTEP);
            self.integrate(h);
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            false
        } else {
            true
        }
    }

    fn integrate(&mut self, h: f64) {
        let cfg = self.config;
        let (x, v) = (self.value - self.target, self.velocity);

        let (k1x, k1v) = (v, cfg.acceleration(x, v));
        let (k2x, k2v) = (
            v + k1v * h / 2.0,
            cfg.acceleration(x + k1x * h / 2.0, v + k1v * h / 2.0),
        );
        let (k3x, k3v) = (
            v + k2v * h / 2.0,
            cfg.acceleration(x + k2x * h / 2.0, v + k2v * h / 2.0),
        );
        let (k4x, k4v) = (v + k3v * h, cfg.acceleration(x + k3x * h, v + k3v * h));

        self.value += h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity += h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f64) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = Spring::new(SpringConfig::new(150.0, 15.0), 0.0);
        spring.animate_to(64.0, SpringConfig::new(150.0, 15.0));
        run(&mut spring, 5.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 64.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 20.0), 100.0);
        spring.animate_to(0.0, SpringConfig::new(400.0, 20.0));
        let mut min_seen = f64::MAX;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            min_seen = min_seen.min(spring.value());
        }
        assert!(min_seen < 0.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_jump_stops_animation() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.animate_to(10.0, SpringConfig::default());
        spring.step(1.0 / 60.0);
        spring.jump_to(3.0);
        assert!(spring.is_settled());
        assert!(!spring.step(1.0 / 60.0));
        assert_eq!(spring.value(), 3.0);
    }

    #[test]
    fn test_large_frame_gap_stays_stable() {
        let mut spring = Spring::new(SpringConfig::new(200.0, 20.0), 0.0);
        spring.animate_to(156.0, SpringConfig::new(200.0, 20.0));
        spring.step(2.0);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 156.0).abs() < 1.0);
    }
}
