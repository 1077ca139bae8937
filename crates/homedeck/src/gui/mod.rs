pub mod anim;
pub mod app;
pub mod cards;
pub mod draw;
pub mod grab;
pub mod theme;
pub mod widgets;
