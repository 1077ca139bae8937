//! Interactive controls. Each is a relm4 component wrapping a toolkit-free
//! state machine from `deckwidgets`.

pub mod dial;
pub mod feed;
pub mod joystick;
pub mod power;
pub mod select;
pub mod stepper;
pub mod swipe;
pub mod volume;
