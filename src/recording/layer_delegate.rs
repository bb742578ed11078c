use std::sync::Arc;

use crate::foundation::core::{BlendMode, Point, Rect};
use crate::foundation::math::Matrix;
use crate::recording::paint::Paint;
use crate::render_graph::contents::{Contents, TextureContents};
use crate::render_graph::pass::EntityPassDelegate;
use crate::render_graph::texture::Texture;

/// Delegate attached to the pass created by `Canvas::save_layer`. The layer paint decides how
/// the rendered layer is blended back.
#[derive(Debug, Clone)]
pub struct PaintPassDelegate {
    paint: Paint,
    bounds: Option<Rect>,
}

impl PaintPassDelegate {
    pub fn new(paint: Paint, bounds: Option<Rect>) -> Self {
        Self { paint, bounds }
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

impl EntityPassDelegate for PaintPassDelegate {
    fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        self.bounds.map(|b| transform.transform_bounds(b))
    }

    fn can_elide(&self) -> bool {
        self.paint.blend_mode == BlendMode::Destination
    }

    fn can_collapse_into_parent_pass(&self) -> bool {
        !self.paint.has_effects()
            && self.paint.color_source.is_none()
            && self.paint.color.is_opaque()
            && self.paint.blend_mode == BlendMode::SourceOver
    }

    fn create_contents_for_subpass_target(
        &self,
        target: Arc<Texture>,
        effect_transform: &Matrix,
    ) -> Contents {
        let destination = Rect::from_origin_size(Point::ZERO, target.size());
        let mut contents = TextureContents::make_rect(destination, target);
        contents.opacity = self.paint.color.a;
        self.paint
            .with_filters_for_subpass_target(Contents::Texture(contents), effect_transform)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recording/layer_delegate.rs"]
mod tests;
