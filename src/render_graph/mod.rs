//! Retained render graph: passes, draw records and the drawables they carry.
//!
//! Nothing here rasterizes. Backends walk an [`pass::EntityPass`] tree and turn each
//! [`entity::Entity`] into GPU work.

pub mod contents;
pub mod entity;
pub mod filters;
pub mod geometry;
pub mod glyph_atlas;
pub mod pass;
pub mod snapshot;
pub mod texture;
