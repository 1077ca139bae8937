//! Toolkit-free state for the dashboard widgets.
//!
//! Every type here is a plain state holder: pointer input goes in, values and
//! change notifications come out. Rendering lives in the `homedeck` crate.

pub mod macros;

pub mod dial;
pub mod feed;
pub mod geometry;
pub mod joystick;
pub mod power;
pub mod select;
pub mod spring;
pub mod stepper;
pub mod swipe;
pub mod volume;

pub use geometry::Point;
pub use spring::{Spring, SpringConfig};
