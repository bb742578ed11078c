//! Recording surface: the canvas state machine, the paint effect pipeline and pictures.

pub mod canvas;
pub mod config;
pub mod layer_delegate;
pub mod paint;
pub mod picture;
