use std::sync::Arc;

use crate::foundation::core::{
    BezPath, BlendMode, Color, Point, Rect, Vec2, rect_is_empty, size_is_empty,
};
use crate::foundation::math::{Matrix, Vec3};
use crate::recording::config::CanvasConfig;
use crate::recording::layer_delegate::PaintPassDelegate;
use crate::recording::paint::{Paint, PaintStyle};
use crate::recording::picture::Picture;
use crate::render_graph::contents::{
    AtlasContents, ClipContents, ClipOperation, Contents, RRectShadowContents, TextContents,
    TextureContents, VerticesContents,
};
use crate::render_graph::entity::Entity;
use crate::render_graph::filters::{BlurStyle, ImageFilterProc};
use crate::render_graph::geometry::{
    Geometry, VerticesGeometry, circle_path, rect_path, rounded_rect_path,
};
use crate::render_graph::glyph_atlas::{TextFrame, lock_atlas};
use crate::render_graph::pass::{EntityPass, PassId};
use crate::render_graph::texture::{Image, SamplerDescriptor};

/// Transform and clip state of one save level.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanvasStackEntry {
    pub transform: Matrix,
    pub stencil_depth: u32,
    pub is_subpass: bool,
    pub contains_clips: bool,
}

/// Per-sprite data for [`Canvas::draw_atlas`].
#[derive(Clone, Debug, Default)]
pub struct DrawAtlasOptions {
    pub transforms: Vec<Matrix>,
    pub texture_coordinates: Vec<Rect>,
    pub colors: Vec<Color>,
    pub blend_mode: BlendMode,
    pub sampler: SamplerDescriptor,
    pub cull_rect: Option<Rect>,
}

/// Records drawing commands into a retained [`EntityPass`] graph.
///
/// The canvas keeps a save/restore stack of transform and clip state next to a handle to the
/// pass that draws currently land in. `save_with(true, ..)` and `save_layer` open a child pass;
/// the matching `restore` returns to the parent. The top of the stack lives outside the saved
/// entries, so there is always a current entry and `save_count()` is at least 1.
#[derive(Debug)]
pub struct Canvas {
    config: CanvasConfig,
    pass: EntityPass,
    current_pass: PassId,
    top: CanvasStackEntry,
    saved: Vec<CanvasStackEntry>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::default())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let pass = EntityPass::new();
        let current_pass = pass.root();
        debug_assert_eq!(pass.subpasses_depth(current_pass), 1);
        Self {
            config,
            pass,
            current_pass,
            top: CanvasStackEntry::default(),
            saved: Vec::new(),
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Discards everything recorded so far and starts a fresh recording.
    pub fn reset(&mut self) {
        let config = self.config.clone();
        *self = Self::with_config(config);
    }

    pub fn save(&mut self) {
        self.save_with(false, BlendMode::SourceOver, None);
    }

    /// Pushes a copy of the current state. With `create_subpass` the new level draws into a new
    /// child pass carrying `blend_mode` and `backdrop_filter`.
    pub fn save_with(
        &mut self,
        create_subpass: bool,
        blend_mode: BlendMode,
        backdrop_filter: Option<ImageFilterProc>,
    ) {
        let mut entry = CanvasStackEntry {
            transform: self.top.transform,
            stencil_depth: self.top.stencil_depth,
            ..CanvasStackEntry::default()
        };
        if create_subpass {
            entry.is_subpass = true;
            let subpass = self.pass.add_subpass(self.current_pass);
            let node = self.pass.node_mut(subpass);
            node.set_transform(entry.transform);
            node.set_stencil_depth(entry.stencil_depth);
            node.set_blend_mode(blend_mode);
            node.set_backdrop_filter(backdrop_filter);
            self.current_pass = subpass;
        }
        self.push_entry(entry);
    }

    /// Pops one save level. Returns `false` without touching anything at the bottom level.
    pub fn restore(&mut self) -> bool {
        let Some(popped) = self.pop_entry() else {
            tracing::debug!("restore at save count 1 ignored");
            return false;
        };
        if popped.contains_clips {
            self.restore_clip();
        }
        true
    }

    /// Restores until `save_count() == count`, stopping quietly at the bottom level.
    pub fn restore_to_count(&mut self, count: usize) {
        while self.save_count() > count {
            if !self.restore() {
                return;
            }
        }
    }

    pub fn save_count(&self) -> usize {
        self.saved.len() + 1
    }

    pub fn stencil_depth(&self) -> u32 {
        self.top.stencil_depth
    }

    fn push_entry(&mut self, entry: CanvasStackEntry) {
        let previous = std::mem::replace(&mut self.top, entry);
        self.saved.push(previous);
    }

    fn pop_entry(&mut self) -> Option<CanvasStackEntry> {
        let previous = self.saved.pop()?;
        let popped = std::mem::replace(&mut self.top, previous);
        if popped.is_subpass {
            match self.pass.superpass(self.current_pass) {
                Some(parent) => self.current_pass = parent,
                None => debug_assert!(false, "subpass entry without a parent pass"),
            }
        }
        Some(popped)
    }

    fn restore_clip(&mut self) {
        // clip restore draws a full-target quad, so it carries no geometry
        let entity = Entity::new(Contents::ClipRestore)
            .with_transform(self.top.transform)
            .with_stencil_depth(self.top.stencil_depth);
        self.pass.add_entity(self.current_pass, entity);
    }

    pub fn current_transform(&self) -> &Matrix {
        &self.top.transform
    }

    /// `current = current * transform`.
    pub fn concat(&mut self, transform: &Matrix) {
        self.top.transform = self.top.transform * *transform;
    }

    /// `current = transform * current`.
    pub fn pre_concat(&mut self, transform: &Matrix) {
        self.top.transform = *transform * self.top.transform;
    }

    pub fn transform(&mut self, transform: &Matrix) {
        self.concat(transform);
    }

    pub fn reset_transform(&mut self) {
        self.top.transform = Matrix::IDENTITY;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.concat(&Matrix::make_translation(offset));
    }

    pub fn scale(&mut self, scale: Vec2) {
        self.concat(&Matrix::make_scale(Vec3::new(scale.x, scale.y, 1.0)));
    }

    pub fn scale3(&mut self, scale: Vec3) {
        self.concat(&Matrix::make_scale(scale));
    }

    pub fn skew(&mut self, sx: f64, sy: f64) {
        self.concat(&Matrix::make_skew(sx, sy));
    }

    pub fn rotate(&mut self, radians: f64) {
        self.concat(&Matrix::make_rotation_z(radians));
    }

    fn add_entity(&mut self, contents: Contents, blend_mode: BlendMode) {
        self.add_entity_with_transform(contents, blend_mode, self.top.transform);
    }

    fn add_entity_with_transform(
        &mut self,
        contents: Contents,
        blend_mode: BlendMode,
        transform: Matrix,
    ) {
        let entity = Entity::new(contents)
            .with_transform(transform)
            .with_stencil_depth(self.top.stencil_depth)
            .with_blend_mode(blend_mode);
        self.pass.add_entity(self.current_pass, entity);
    }

    pub fn draw_path(&mut self, path: BezPath, paint: &Paint) {
        let contents = paint.create_contents_for_entity(path, false);
        self.add_entity(
            paint.with_filters(contents, None, &Matrix::IDENTITY),
            paint.blend_mode,
        );
    }

    /// Fills the whole target with `paint`.
    pub fn draw_paint(&mut self, paint: &Paint) {
        let contents = paint.create_contents_for_entity(BezPath::new(), true);
        self.add_entity(
            paint.with_filters(contents, None, &Matrix::IDENTITY),
            paint.blend_mode,
        );
    }

    /// Draws a mask-blurred, flat-colored fill of a rounded rect as one analytic shadow instead
    /// of a shape plus a separate blur. Returns `false` when `paint` does not qualify; nothing is
    /// recorded in that case.
    pub fn attempt_draw_blurred_rrect(
        &mut self,
        rect: Rect,
        corner_radius: f64,
        paint: &Paint,
    ) -> bool {
        if !self.config.blurred_rrect_fast_path
            || paint.color_source.is_some()
            || paint.style != PaintStyle::Fill
        {
            return false;
        }
        let Some(blur) = paint
            .mask_blur_descriptor
            .filter(|d| d.style == BlurStyle::Normal)
        else {
            return false;
        };

        let mut new_paint = paint.clone();
        new_paint.mask_blur_descriptor = None;

        let contents = Contents::RRectShadow(RRectShadowContents {
            rect,
            corner_radius,
            sigma: blur.sigma,
            color: new_paint.color,
        });
        self.add_entity(
            new_paint.with_filters(contents, None, &Matrix::IDENTITY),
            new_paint.blend_mode,
        );
        true
    }

    pub fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        if paint.style == PaintStyle::Stroke {
            self.draw_path(rect_path(rect), paint);
            return;
        }
        if self.attempt_draw_blurred_rrect(rect, 0.0, paint) {
            return;
        }
        let contents = paint.create_contents_for_geometry(Geometry::make_rect(rect));
        self.add_entity(
            paint.with_filters(contents, None, &Matrix::IDENTITY),
            paint.blend_mode,
        );
    }

    pub fn draw_rrect(&mut self, rect: Rect, corner_radius: f64, paint: &Paint) {
        if self.attempt_draw_blurred_rrect(rect, corner_radius, paint) {
            return;
        }
        self.draw_path(rounded_rect_path(rect, corner_radius), paint);
    }

    pub fn draw_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        let bounds = Rect::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        if self.attempt_draw_blurred_rrect(bounds, radius, paint) {
            return;
        }
        self.draw_path(circle_path(center, radius), paint);
    }

    /// Draws `image` at its natural size with its top-left corner at `offset`.
    pub fn draw_image(
        &mut self,
        image: Option<&Image>,
        offset: Point,
        paint: &Paint,
        sampler: SamplerDescriptor,
    ) {
        let Some(image) = image else {
            tracing::trace!("draw_image without an image ignored");
            return;
        };
        let source = Rect::from_origin_size(Point::ZERO, image.size());
        let dest = Rect::from_origin_size(offset, image.size());
        self.draw_image_rect(Some(image), source, dest, paint, sampler);
    }

    /// Draws the `source` region of `image` into `dest`.
    pub fn draw_image_rect(
        &mut self,
        image: Option<&Image>,
        source: Rect,
        dest: Rect,
        paint: &Paint,
        sampler: SamplerDescriptor,
    ) {
        let Some(image) = image else {
            tracing::trace!("draw_image_rect without an image ignored");
            return;
        };
        if rect_is_empty(source) || rect_is_empty(dest) || size_is_empty(image.size()) {
            tracing::trace!(?source, ?dest, "draw_image_rect with empty area ignored");
            return;
        }

        let mut contents = TextureContents::make_rect(dest, image.texture());
        contents.source_rect = source;
        contents.sampler = sampler;
        contents.opacity = paint.color.a;

        self.add_entity(
            paint.with_filters(Contents::Texture(contents), Some(false), &Matrix::IDENTITY),
            paint.blend_mode,
        );
    }

    /// Draws `frame` with its origin at `position`. The frame's glyphs are registered with the
    /// graph's lazy glyph atlas.
    pub fn draw_text_frame(&mut self, frame: &TextFrame, position: Point, paint: &Paint) {
        let glyph_atlas = self.pass.lazy_glyph_atlas();
        lock_atlas(&glyph_atlas).add_text_frame(frame);

        let contents = Contents::Text(TextContents {
            frame: frame.clone(),
            glyph_atlas,
            color: paint.color,
        });
        let transform =
            self.top.transform * Matrix::make_translation(Vec3::from(position.to_vec2()));
        self.add_entity_with_transform(
            paint.with_filters(contents, Some(true), &Matrix::IDENTITY),
            paint.blend_mode,
            transform,
        );
    }

    /// Draws a triangle mesh. Without a color source the mesh is drawn in the paint color,
    /// combined with per-vertex colors through `blend_mode`.
    pub fn draw_vertices(
        &mut self,
        vertices: VerticesGeometry,
        blend_mode: BlendMode,
        paint: &Paint,
    ) {
        let geometry = Geometry::Vertices(vertices);
        let contents = match &paint.color_source {
            Some(source) => {
                let mut contents = source();
                contents.set_geometry(geometry);
                contents.set_alpha(paint.color.a);
                contents
            }
            None => Contents::Vertices(VerticesContents {
                geometry,
                color: paint.color,
                blend_mode,
            }),
        };
        self.add_entity(
            paint.with_filters(contents, Some(true), &Matrix::IDENTITY),
            paint.blend_mode,
        );
    }

    /// Draws sprites out of `atlas`.
    pub fn draw_atlas(&mut self, atlas: Option<&Image>, options: DrawAtlasOptions, paint: &Paint) {
        let Some(atlas) = atlas else {
            tracing::trace!("draw_atlas without an atlas ignored");
            return;
        };
        if size_is_empty(atlas.size()) {
            tracing::trace!("draw_atlas with an empty atlas ignored");
            return;
        }

        let DrawAtlasOptions {
            transforms,
            texture_coordinates,
            colors,
            blend_mode,
            sampler,
            cull_rect,
        } = options;
        let contents = Contents::Atlas(AtlasContents {
            texture: atlas.texture(),
            transforms,
            texture_coordinates,
            colors,
            blend_mode,
            sampler,
            cull_rect,
            alpha: paint.color.a,
        });
        self.add_entity(
            paint.with_filters(contents, Some(false), &Matrix::IDENTITY),
            paint.blend_mode,
        );
    }

    /// Replays `picture` at the current transform and clip depth.
    ///
    /// The picture's graph is cloned, every entity and subpass is moved under the current
    /// transform and stencil depth, and the result is spliced into the current pass.
    #[tracing::instrument(skip_all, fields(entities = picture.entity_count()))]
    pub fn draw_picture(&mut self, picture: &Picture) {
        let Some(pass) = picture.pass() else {
            tracing::trace!("draw_picture with an empty picture ignored");
            return;
        };

        let transform = self.top.transform;
        let stencil_depth = self.top.stencil_depth;
        let mut pass = pass.clone();
        pass.iterate_all_entities(|entity| {
            entity.increment_stencil_depth(stencil_depth);
            entity.set_transform(transform * *entity.transform());
            true
        });
        pass.iterate_all_subpasses(|node| {
            node.set_stencil_depth(node.stencil_depth() + stencil_depth);
            node.set_transform(transform * *node.transform());
        });

        self.pass.add_subpass_inline(self.current_pass, pass);
    }

    pub fn clip_path(&mut self, path: BezPath, clip_op: ClipOperation) {
        self.clip_geometry(Geometry::make_fill_path(path), clip_op);
    }

    pub fn clip_rect(&mut self, rect: Rect, clip_op: ClipOperation) {
        self.clip_geometry(Geometry::make_rect(rect), clip_op);
    }

    pub fn clip_rrect(&mut self, rect: Rect, corner_radius: f64, clip_op: ClipOperation) {
        self.clip_geometry(Geometry::make_rrect(rect, corner_radius), clip_op);
    }

    fn clip_geometry(&mut self, geometry: Geometry, clip_op: ClipOperation) {
        let contents = Contents::Clip(ClipContents { geometry, clip_op });
        self.add_entity(contents, BlendMode::SourceOver);
        self.top.stencil_depth += 1;
        self.top.contains_clips = true;
    }

    /// Opens a layer: a child pass composited back through `paint` on `restore`.
    ///
    /// Layers without a backdrop filter may be drawn straight into the parent, which drops
    /// the implicit clamp to the layer target; given `bounds`, that clamp is recorded as an
    /// explicit clip.
    #[tracing::instrument(skip_all, fields(bounds = ?bounds, backdrop = backdrop_filter.is_some()))]
    pub fn save_layer(
        &mut self,
        paint: &Paint,
        bounds: Option<Rect>,
        backdrop_filter: Option<ImageFilterProc>,
    ) {
        let has_backdrop_filter = backdrop_filter.is_some();
        self.save_with(true, paint.blend_mode, backdrop_filter);

        let delegate = PaintPassDelegate::new(paint.clone(), bounds);
        self.pass
            .node_mut(self.current_pass)
            .set_delegate(Arc::new(delegate));

        if let Some(bounds) = bounds
            && !has_backdrop_filter
            && self.config.clip_layer_bounds
        {
            self.clip_rect(bounds, ClipOperation::Intersect);
        }
    }

    /// Hands the recorded graph over as a [`Picture`] and starts a fresh recording.
    #[tracing::instrument(skip_all, fields(save_count = self.save_count()))]
    pub fn end_recording_as_picture(&mut self) -> Picture {
        let config = self.config.clone();
        let finished = std::mem::replace(self, Self::with_config(config));
        tracing::debug!(entities = finished.pass.entity_count(), "recording captured");
        Picture::new(finished.pass)
    }

    /// The graph recorded so far.
    pub fn pass(&self) -> &EntityPass {
        &self.pass
    }

    pub fn current_pass(&self) -> PassId {
        self.current_pass
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recording/canvas.rs"]
mod tests;
