/// Bounded integer stepper, e.g. the camera zoom percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    value: i32,
    min: i32,
    max: i32,
    step: i32,
}

impl Stepper {
    pub fn new(min: i32, max: i32, step: i32, initial: i32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: initial.clamp(min, max),
            min,
            max,
            step: step.abs().max(1),
        }
    }

    /// Zoom percentage: 0 to 100 in steps of 10.
    pub fn percentage(initial: i32) -> Self {
        Self::new(0, 100, 10, initial)
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn can_increment(&self) -> bool {
        self.value < self.max
    }

    pub fn can_decrement(&self) -> bool {
        self.value > self.min
    }

    pub fn increment(&mut self) -> Option<i32> {
        self.nudge(self.step)
    }

    pub fn decrement(&mut self) -> Option<i32> {
        self.nudge(-self.step)
    }

    /// Returns the new value, or `None` when already at the bound.
    fn nudge(&mut self, delta: i32) -> Option<i32> {
        let next = (self.value + delta).clamp(self.min, self.max);
        (next != self.value).then(|| {
            self.value = next;
            next
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_disable_controls() {
        let mut zoom = Stepper::percentage(90);
        assert!(zoom.can_increment());
        assert_eq!(zoom.increment(), Some(100));
        assert!(!zoom.can_increment());
        assert_eq!(zoom.increment(), None);

        let mut zoom = Stepper::percentage(10);
        assert_eq!(zoom.decrement(), Some(0));
        assert!(!zoom.can_decrement());
        assert_eq!(zoom.decrement(), None);
    }

    #[test]
    fn test_initial_is_clamped() {
        assert_eq!(Stepper::percentage(350).value(), 100);
        assert_eq!(Stepper::percentage(-5).value(), 0);
    }

    #[test]
    fn test_partial_step_lands_on_bound() {
        let mut stepper = Stepper::new(0, 25, 10, 20);
        assert_eq!(stepper.increment(), Some(25));
    }
}
