pub const DEFAULT_TRACK_HEIGHT: f64 = 300.0;
pub const TRACK_WIDTH: f64 = 80.0;
pub const THUMB_HEIGHT: f64 = 22.0;
pub const INITIAL_VOLUME: f64 = 0.5;

/// Vertical volume slider. The top of the track is full volume.
///
/// The start/stop flag is tracked here for convenience but never touches the
/// volume.
#[derive(Debug, Clone)]
pub struct VolumeSlider {
    track_height: f64,
    volume: f64,
    drag_origin: f64,
    dragging: bool,
    started: bool,
}

impl VolumeSlider {
    pub fn new(track_height: f64) -> Self {
        Self {
            track_height: track_height.max(THUMB_HEIGHT + 1.0),
            volume: INITIAL_VOLUME,
            drag_origin: 0.0,
            dragging: false,
            started: false,
        }
    }

    pub fn track_height(&self) -> f64 {
        self.track_height
    }

    fn travel(&self) -> f64 {
        self.track_height - THUMB_HEIGHT
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn percent(&self) -> u32 {
        (self.volume * 100.0).round() as u32
    }

    pub fn is_muted(&self) -> bool {
        self.volume <= 0.0
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Top edge of the thumb in pixels.
    pub fn thumb_y(&self) -> f64 {
        (1.0 - self.volume) * self.travel()
    }

    pub fn hits_thumb(&self, y: f64) -> bool {
        let top = self.thumb_y();
        (top..=top + THUMB_HEIGHT).contains(&y)
    }

    pub fn volume_for_thumb_y(&self, y: f64) -> f64 {
        (1.0 - y / self.travel()).clamp(0.0, 1.0)
    }

    pub fn begin_drag(&mut self) {
        self.drag_origin = self.thumb_y();
        self.dragging = true;
    }

    /// Returns the new volume when a drag is in progress.
    pub fn drag_by(&mut self, dy: f64) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        self.volume = self.volume_for_thumb_y(self.drag_origin + dy);
        Some(self.volume)
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn toggle_started(&mut self) -> bool {
        self.started = !self.started;
        self.started
    }
}

impl Default for VolumeSlider {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let slider = VolumeSlider::default();
        assert_eq!(slider.volume(), 0.5);
        assert_eq!(slider.percent(), 50);
        assert!(!slider.is_started());
        assert_eq!(slider.thumb_y(), 139.0);
    }

    #[test]
    fn test_drag_up_raises_volume() {
        let mut slider = VolumeSlider::default();
        slider.begin_drag();
        let v = slider.drag_by(-139.0).unwrap();
        assert_eq!(v, 1.0);
        let v = slider.drag_by(139.0).unwrap();
        assert_eq!(v, 0.0);
        assert!(slider.is_muted());
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let mut slider = VolumeSlider::default();
        slider.begin_drag();
        for dy in [-5000.0, 5000.0, -200.0, 420.0] {
            let v = slider.drag_by(dy).unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
        slider.set_volume(3.0);
        assert_eq!(slider.volume(), 1.0);
        slider.set_volume(-1.0);
        assert_eq!(slider.volume(), 0.0);
    }

    #[test]
    fn test_toggle_is_independent_of_volume() {
        let mut slider = VolumeSlider::default();
        assert!(slider.toggle_started());
        assert_eq!(slider.volume(), 0.5);
        assert!(!slider.toggle_started());
        assert_eq!(slider.volume(), 0.5);
    }

    #[test]
    fn test_drag_needs_begin() {
        let mut slider = VolumeSlider::default();
        assert_eq!(slider.drag_by(10.0), None);
        slider.begin_drag();
        slider.end_drag();
        assert_eq!(slider.drag_by(10.0), None);
    }
}
