//! Window-wide pointer tracking for drags that leave the widget they started on.
//!
//! A [`PointerGrab`] hooks motion and release controllers onto the toplevel in
//! the capture phase. Dropping it removes both, so the listeners live exactly
//! as long as the interaction that owns them.

use deckwidgets::Point;
use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use std::rc::Rc;

pub struct PointerGrab {
    root: gtk::Widget,
    motion: gtk::EventControllerMotion,
    release: gtk::EventControllerLegacy,
}

impl PointerGrab {
    /// Reports pointer positions in `anchor` coordinates until the button is
    /// released anywhere in the window. Returns `None` if `anchor` is not in a
    /// window yet.
    pub fn acquire(
        anchor: &impl IsA<gtk::Widget>,
        on_motion: impl Fn(Point) + 'static,
        on_release: impl Fn() + 'static,
    ) -> Option<Self> {
        let root = anchor.as_ref().root()?.upcast::<gtk::Widget>();
        let on_release = Rc::new(on_release);

        let motion = gtk::EventControllerMotion::new();
        motion.set_propagation_phase(gtk::PropagationPhase::Capture);
        let anchor_weak = anchor.as_ref().downgrade();
        let root_weak = root.downgrade();
        let release_on_motion = on_release.clone();
        motion.connect_motion(move |controller, x, y| {
            // A release that happened before the grab was installed.
            if !holds_primary_button(controller.current_event_state()) {
                release_on_motion();
                return;
            }
            let (Some(anchor), Some(root)) = (anchor_weak.upgrade(), root_weak.upgrade()) else {
                return;
            };
            if let Some((ax, ay)) = root.translate_coordinates(&anchor, x, y) {
                on_motion(Point::new(ax, ay));
            }
        });

        let release = gtk::EventControllerLegacy::new();
        release.set_propagation_phase(gtk::PropagationPhase::Capture);
        release.connect_event(move |_, event| {
            if matches!(
                event.event_type(),
                gdk::EventType::ButtonRelease
                    | gdk::EventType::TouchEnd
                    | gdk::EventType::TouchCancel
            ) {
                on_release();
            }
            glib::Propagation::Proceed
        });

        root.add_controller(motion.clone());
        root.add_controller(release.clone());

        Some(Self {
            root,
            motion,
            release,
        })
    }
}

fn holds_primary_button(state: gdk::ModifierType) -> bool {
    state.contains(gdk::ModifierType::BUTTON1_MASK)
}

/// The grab of the drag in progress, tagged with the drag's id.
///
/// Releases arrive asynchronously, so a late release of an older drag must
/// not drop the grab of a newer one.
pub struct GrabSlot<G = PointerGrab> {
    current: Option<(u64, G)>,
    last_id: u64,
}

impl<G> Default for GrabSlot<G> {
    fn default() -> Self {
        Self {
            current: None,
            last_id: 0,
        }
    }
}

impl<G> GrabSlot<G> {
    /// Id for the next drag. Call before acquiring so the release callback
    /// can carry it.
    pub fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    /// Replaces (and drops) any previous grab.
    pub fn install(&mut self, id: u64, grab: G) {
        self.current = Some((id, grab));
    }

    /// Drops the grab if it belongs to drag `id`. Returns whether it did.
    pub fn release(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|(current, _)| *current == id) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn active_id(&self) -> Option<u64> {
        self.current.as_ref().map(|(id, _)| *id)
    }
}

impl Drop for PointerGrab {
    fn drop(&mut self) {
        self.root.remove_controller(&self.motion);
        self.root.remove_controller(&self.release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountDrop<'a>(&'a Cell<u32>);

    impl Drop for CountDrop<'_> {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_motion_without_button_counts_as_release() {
        assert!(holds_primary_button(gdk::ModifierType::BUTTON1_MASK));
        assert!(holds_primary_button(
            gdk::ModifierType::BUTTON1_MASK | gdk::ModifierType::SHIFT_MASK
        ));
        assert!(!holds_primary_button(gdk::ModifierType::empty()));
        assert!(!holds_primary_button(gdk::ModifierType::SHIFT_MASK));
        assert!(!holds_primary_button(gdk::ModifierType::BUTTON3_MASK));
    }

    #[test]
    fn test_stale_release_keeps_newer_grab() {
        let dropped = Cell::new(0);
        let mut slot = GrabSlot::default();

        let first = slot.next_id();
        slot.install(first, CountDrop(&dropped));
        // Second press before the first release was handled.
        let second = slot.next_id();
        slot.install(second, CountDrop(&dropped));
        assert_eq!(dropped.get(), 1);

        assert!(!slot.release(first));
        assert_eq!(slot.active_id(), Some(second));
        assert_eq!(dropped.get(), 1);

        assert!(slot.release(second));
        assert_eq!(slot.active_id(), None);
        assert_eq!(dropped.get(), 2);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut slot: GrabSlot<()> = GrabSlot::default();
        let id = slot.next_id();
        slot.install(id, ());
        assert!(slot.release(id));
        assert!(!slot.release(id));
    }
}
