use crate::geometry::interpolate;
use crate::spring::{Spring, SpringConfig};
use std::time::Duration;

pub const THUMB_SIZE: f64 = 54.0;
pub const TRACK_HEIGHT: f64 = 60.0;
pub const DEFAULT_TRACK_WIDTH: f64 = 210.0;
pub const COMPLETE_THRESHOLD: f64 = 0.9;
pub const SUCCESS_HIDE_DELAY: Duration = Duration::from_millis(300);
pub const SNAP_SPRING: SpringConfig = SpringConfig::new(200.0, 20.0);
pub const RETURN_SPRING: SpringConfig = SpringConfig::new(400.0, 20.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Released past the threshold; fire the completion callback.
    Completed,
    /// Released short of the threshold; the thumb springs back.
    Returned,
    /// No drag was in progress.
    Ignored,
}

/// Opacities derived from the thumb offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeVisuals {
    pub thumb: f64,
    pub track: f64,
    pub arrow: f64,
    pub check: f64,
    pub prompt: f64,
    pub success: f64,
}

#[derive(Debug, Clone)]
pub struct SwipeSlider {
    max_x: f64,
    thumb: Spring,
    drag_origin: f64,
    dragging: bool,
    complete: bool,
    show_success: bool,
}

impl SwipeSlider {
    pub fn new(track_width: f64) -> Self {
        Self {
            max_x: (track_width - THUMB_SIZE).max(0.0),
            thumb: Spring::new(RETURN_SPRING, 0.0),
            drag_origin: 0.0,
            dragging: false,
            complete: false,
            show_success: false,
        }
    }

    pub fn track_width(&self) -> f64 {
        self.max_x + THUMB_SIZE
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn thumb_x(&self) -> f64 {
        self.thumb.value()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn shows_success(&self) -> bool {
        self.show_success
    }

    pub fn hits_thumb(&self, x: f64) -> bool {
        let left = self.thumb.value();
        (left..=left + THUMB_SIZE).contains(&x)
    }

    /// A completed slider stays locked at the end until it is reset.
    pub fn begin_drag(&mut self) -> bool {
        if self.complete {
            return false;
        }
        let x = self.thumb.value();
        self.thumb.jump_to(x);
        self.drag_origin = x;
        self.dragging = true;
        true
    }

    pub fn drag_by(&mut self, dx: f64) {
        if self.dragging {
            self.thumb
                .jump_to((self.drag_origin + dx).clamp(0.0, self.max_x));
        }
    }

    pub fn end_drag(&mut self) -> SwipeOutcome {
        if !self.dragging {
            return SwipeOutcome::Ignored;
        }
        self.dragging = false;

        if self.thumb.value() >= self.max_x * COMPLETE_THRESHOLD {
            self.thumb.animate_to(self.max_x, SNAP_SPRING);
            self.complete = true;
            self.show_success = true;
            SwipeOutcome::Completed
        } else {
            self.thumb.animate_to(0.0, RETURN_SPRING);
            SwipeOutcome::Returned
        }
    }

    /// Track click after completion. Returns the delay after which
    /// [`Self::hide_success`] should run.
    pub fn click_track(&mut self) -> Option<Duration> {
        if !self.complete || self.dragging {
            return None;
        }
        self.thumb.animate_to(0.0, RETURN_SPRING);
        self.complete = false;
        Some(SUCCESS_HIDE_DELAY)
    }

    pub fn hide_success(&mut self) {
        if !self.complete {
            self.show_success = false;
        }
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        self.thumb.step(dt)
    }

    pub fn is_animating(&self) -> bool {
        !self.thumb.is_settled()
    }

    pub fn visuals(&self) -> SwipeVisuals {
        let x = self.thumb.value();
        let m = self.max_x;
        SwipeVisuals {
            thumb: interpolate(x, &[(0.0, 0.5), (m * 0.05, 0.8), (m * 0.1, 1.0)]),
            track: interpolate(x, &[(0.0, 0.3), (m, 0.0)]),
            arrow: interpolate(x, &[(0.0, 1.0), (m * 0.9, 0.0), (m, 0.0)]),
            check: interpolate(x, &[(m * 0.9, 0.0), (m, 1.0)]),
            prompt: interpolate(x, &[(0.0, 0.8), (m * 0.5, 0.0)]),
            success: interpolate(x, &[(m * 0.8, 0.0), (m, 1.0)]),
        }
    }
}

impl Default for SwipeSlider {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(slider: &mut SwipeSlider) {
        for _ in 0..600 {
            if !slider.tick(1.0 / 60.0) {
                break;
            }
        }
    }

    fn swipe(slider: &mut SwipeSlider, dx: f64) -> SwipeOutcome {
        slider.begin_drag();
        slider.drag_by(dx);
        slider.end_drag()
    }

    #[test]
    fn test_full_swipe_completes_once() {
        let mut slider = SwipeSlider::default();
        let max = slider.max_x();
        assert_eq!(swipe(&mut slider, max), SwipeOutcome::Completed);
        settle(&mut slider);
        assert_eq!(slider.thumb_x(), max);
        assert!(slider.is_complete());
        assert!(slider.shows_success());

        // locked until reset
        assert!(!slider.begin_drag());
        assert_eq!(slider.end_drag(), SwipeOutcome::Ignored);
    }

    #[test]
    fn test_threshold_is_ninety_percent() {
        let mut slider = SwipeSlider::default();
        let max = slider.max_x();
        assert_eq!(swipe(&mut slider, max * 0.89), SwipeOutcome::Returned);
        settle(&mut slider);
        assert_eq!(slider.thumb_x(), 0.0);
        assert!(!slider.is_complete());

        assert_eq!(swipe(&mut slider, max * 0.9), SwipeOutcome::Completed);
    }

    #[test]
    fn test_drag_is_clamped_to_track() {
        let mut slider = SwipeSlider::default();
        slider.begin_drag();
        slider.drag_by(-40.0);
        assert_eq!(slider.thumb_x(), 0.0);
        slider.drag_by(1000.0);
        assert_eq!(slider.thumb_x(), slider.max_x());
    }

    #[test]
    fn test_reset_hides_success_after_delay() {
        let mut slider = SwipeSlider::default();
        assert_eq!(slider.click_track(), None);

        let max = slider.max_x();
        swipe(&mut slider, max);
        assert_eq!(slider.click_track(), Some(SUCCESS_HIDE_DELAY));
        assert!(!slider.is_complete());
        assert!(slider.shows_success());

        slider.hide_success();
        assert!(!slider.shows_success());
        settle(&mut slider);
        assert_eq!(slider.thumb_x(), 0.0);
    }

    #[test]
    fn test_stale_hide_does_not_clear_new_success() {
        let mut slider = SwipeSlider::default();
        let max = slider.max_x();
        swipe(&mut slider, max);
        slider.click_track();
        settle(&mut slider);
        swipe(&mut slider, max);
        slider.hide_success();
        assert!(slider.shows_success());
    }

    #[test]
    fn test_visuals_at_rest_and_end() {
        let mut slider = SwipeSlider::default();
        let rest = slider.visuals();
        assert_eq!(rest.thumb, 0.5);
        assert_eq!(rest.track, 0.3);
        assert_eq!(rest.arrow, 1.0);
        assert_eq!(rest.check, 0.0);
        assert_eq!(rest.prompt, 0.8);
        assert_eq!(rest.success, 0.0);

        let max = slider.max_x();
        slider.begin_drag();
        slider.drag_by(max);
        let end = slider.visuals();
        assert_eq!(end.thumb, 1.0);
        assert_eq!(end.track, 0.0);
        assert_eq!(end.arrow, 0.0);
        assert_eq!(end.check, 1.0);
        assert_eq!(end.prompt, 0.0);
        assert_eq!(end.success, 1.0);
    }

    #[test]
    fn test_hit_test_follows_thumb() {
        let mut slider = SwipeSlider::default();
        assert!(slider.hits_thumb(10.0));
        slider.begin_drag();
        slider.drag_by(100.0);
        assert!(!slider.hits_thumb(10.0));
        assert!(slider.hits_thumb(120.0));
    }
}
