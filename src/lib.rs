//! Recording core of a retained 2D drawing engine.
//!
//! A [`Canvas`] turns drawing and state commands into an [`EntityPass`] render graph:
//!
//! - `save` / `restore` maintain a stack of transform and clip state, optionally opening child
//!   passes for layers
//! - every draw call builds its [`Contents`] through the [`Paint`] effect pipeline and lands as
//!   an [`Entity`] in the current pass
//! - [`Canvas::end_recording_as_picture`] detaches the graph as a [`Picture`] that can be
//!   replayed into another recording
//!
//! Nothing here rasterizes; a backend walks the finished graph.
#![forbid(unsafe_code)]

mod foundation;

pub mod recording;
pub mod render_graph;

pub use crate::foundation::core::{
    Affine, BezPath, BlendMode, Cap, Color, Join, Point, Rect, Size, Vec2,
};
pub use crate::foundation::error::{CanvasError, CanvasResult};
pub use crate::foundation::math::{Matrix, Vec3};
pub use crate::recording::canvas::{Canvas, CanvasStackEntry, DrawAtlasOptions};
pub use crate::recording::config::CanvasConfig;
pub use crate::recording::layer_delegate::PaintPassDelegate;
pub use crate::recording::paint::{MaskBlurDescriptor, Paint, PaintStyle};
pub use crate::recording::picture::Picture;
pub use crate::render_graph::contents::{ClipOperation, Contents};
pub use crate::render_graph::entity::Entity;
pub use crate::render_graph::filters::{BlurStyle, TileMode};
pub use crate::render_graph::pass::{EntityPass, EntityPassDelegate, PassId};
pub use crate::render_graph::texture::{Image, SamplerDescriptor, Texture};
