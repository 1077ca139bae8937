use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::Cell;

/// Longest step handed to a frame callback, so a stalled frame clock does not
/// launch a spring across the widget.
const MAX_FRAME_DT: f64 = 1.0 / 20.0;

/// Drives a per-frame callback off a widget's frame clock until stopped.
#[derive(Default)]
pub struct FrameTicker {
    id: Option<gtk::TickCallbackId>,
}

impl FrameTicker {
    /// Starts ticking `widget`. `on_frame` receives the seconds elapsed since
    /// the previous frame. Does nothing if already running.
    pub fn start(&mut self, widget: &impl IsA<gtk::Widget>, on_frame: impl Fn(f64) + 'static) {
        if self.id.is_some() {
            return;
        }
        let last = Cell::new(None::<i64>);
        let id = widget.add_tick_callback(move |_, clock| {
            let now = clock.frame_time();
            let dt = last
                .get()
                .map_or(1.0 / 60.0, |prev| (now - prev) as f64 / 1_000_000.0);
            last.set(Some(now));
            on_frame(dt.clamp(0.0, MAX_FRAME_DT));
            glib::ControlFlow::Continue
        });
        self.id = Some(id);
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.id.take() {
            id.remove();
        }
    }

    pub fn is_running(&self) -> bool {
        self.id.is_some()
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
