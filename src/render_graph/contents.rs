use std::sync::Arc;

use crate::foundation::core::{BlendMode, Color, Point, Rect};
use crate::foundation::math::Matrix;
use crate::render_graph::filters::{FilterContents, TileMode};
use crate::render_graph::geometry::Geometry;
use crate::render_graph::glyph_atlas::{SharedGlyphAtlas, TextFrame};
use crate::render_graph::texture::{SamplerDescriptor, Texture};

/// How a clip combines with the clips already active at its stencil depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ClipOperation {
    Difference,
    #[default]
    Intersect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolidColorContents {
    pub geometry: Geometry,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradientContents {
    pub start_point: Point,
    pub end_point: Point,
    pub colors: Vec<Color>,
    pub stops: Vec<f32>,
    pub tile_mode: TileMode,
    pub geometry: Geometry,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradientContents {
    pub center: Point,
    pub radius: f64,
    pub colors: Vec<Color>,
    pub stops: Vec<f32>,
    pub tile_mode: TileMode,
    pub geometry: Geometry,
    pub alpha: f32,
}

/// Image shader: a texture repeated over the geometry.
#[derive(Clone, Debug)]
pub struct TiledTextureContents {
    pub texture: Arc<Texture>,
    pub x_tile_mode: TileMode,
    pub y_tile_mode: TileMode,
    pub sampler: SamplerDescriptor,
    pub geometry: Geometry,
    pub alpha: f32,
}

/// A region of a texture drawn into a destination rect.
#[derive(Clone, Debug)]
pub struct TextureContents {
    pub destination: Rect,
    pub texture: Arc<Texture>,
    pub source_rect: Rect,
    pub sampler: SamplerDescriptor,
    pub opacity: f32,
}

impl TextureContents {
    pub fn make_rect(destination: Rect, texture: Arc<Texture>) -> Self {
        let source_rect = Rect::from_origin_size(Point::ZERO, texture.size());
        Self {
            destination,
            texture,
            source_rect,
            sampler: SamplerDescriptor::default(),
            opacity: 1.0,
        }
    }
}

/// Analytic (distance field) blurred rounded rect.
#[derive(Clone, Debug, PartialEq)]
pub struct RRectShadowContents {
    pub rect: Rect,
    pub corner_radius: f64,
    pub sigma: f64,
    pub color: Color,
}

#[derive(Clone, Debug)]
pub struct TextContents {
    pub frame: TextFrame,
    pub glyph_atlas: SharedGlyphAtlas,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VerticesContents {
    pub geometry: Geometry,
    pub color: Color,
    pub blend_mode: BlendMode,
}

#[derive(Clone, Debug)]
pub struct AtlasContents {
    pub texture: Arc<Texture>,
    pub transforms: Vec<Matrix>,
    pub texture_coordinates: Vec<Rect>,
    pub colors: Vec<Color>,
    pub blend_mode: BlendMode,
    pub sampler: SamplerDescriptor,
    pub cull_rect: Option<Rect>,
    pub alpha: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClipContents {
    pub geometry: Geometry,
    pub clip_op: ClipOperation,
}

/// Everything a draw record can draw.
///
/// The set of drawable kinds is closed. Recording code only goes through the uniform
/// `set_geometry` / `set_alpha` / `set_color` contract; kinds a setter does not apply to
/// ignore it.
#[derive(Clone, Debug, PartialEq)]
pub enum Contents {
    SolidColor(SolidColorContents),
    LinearGradient(LinearGradientContents),
    RadialGradient(RadialGradientContents),
    TiledTexture(TiledTextureContents),
    Texture(TextureContents),
    RRectShadow(RRectShadowContents),
    Text(TextContents),
    Vertices(VerticesContents),
    Atlas(AtlasContents),
    Clip(ClipContents),
    /// Full-target quad that pops the stencil back to the entity's depth.
    ClipRestore,
    Filter(FilterContents),
}

impl Contents {
    pub fn solid_color(geometry: Geometry, color: Color) -> Self {
        Self::SolidColor(SolidColorContents { geometry, color })
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        match self {
            Self::SolidColor(c) => c.geometry = geometry,
            Self::LinearGradient(c) => c.geometry = geometry,
            Self::RadialGradient(c) => c.geometry = geometry,
            Self::TiledTexture(c) => c.geometry = geometry,
            Self::Vertices(c) => c.geometry = geometry,
            Self::Clip(c) => c.geometry = geometry,
            Self::Texture(_)
            | Self::RRectShadow(_)
            | Self::Text(_)
            | Self::Atlas(_)
            | Self::ClipRestore
            | Self::Filter(_) => {}
        }
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        match self {
            Self::SolidColor(c) => c.color.a = alpha,
            Self::LinearGradient(c) => c.alpha = alpha,
            Self::RadialGradient(c) => c.alpha = alpha,
            Self::TiledTexture(c) => c.alpha = alpha,
            Self::Texture(c) => c.opacity = alpha,
            Self::Atlas(c) => c.alpha = alpha,
            Self::Text(c) => c.color.a = alpha,
            Self::RRectShadow(c) => c.color.a = alpha,
            Self::Vertices(c) => c.color.a = alpha,
            Self::Clip(_) | Self::ClipRestore | Self::Filter(_) => {}
        }
    }

    pub fn set_color(&mut self, color: Color) {
        match self {
            Self::SolidColor(c) => c.color = color,
            Self::RRectShadow(c) => c.color = color,
            Self::Text(c) => c.color = color,
            Self::Vertices(c) => c.color = color,
            Self::LinearGradient(_)
            | Self::RadialGradient(_)
            | Self::TiledTexture(_)
            | Self::Texture(_)
            | Self::Atlas(_)
            | Self::Clip(_)
            | Self::ClipRestore
            | Self::Filter(_) => {}
        }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match self {
            Self::SolidColor(c) => Some(&c.geometry),
            Self::LinearGradient(c) => Some(&c.geometry),
            Self::RadialGradient(c) => Some(&c.geometry),
            Self::TiledTexture(c) => Some(&c.geometry),
            Self::Vertices(c) => Some(&c.geometry),
            Self::Clip(c) => Some(&c.geometry),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::SolidColor(_) => "solid_color",
            Self::LinearGradient(_) => "linear_gradient",
            Self::RadialGradient(_) => "radial_gradient",
            Self::TiledTexture(_) => "tiled_texture",
            Self::Texture(_) => "texture",
            Self::RRectShadow(_) => "rrect_shadow",
            Self::Text(_) => "text",
            Self::Vertices(_) => "vertices",
            Self::Atlas(_) => "atlas",
            Self::Clip(_) => "clip",
            Self::ClipRestore => "clip_restore",
            Self::Filter(f) => f.kind.kind_name(),
        }
    }

    pub fn as_filter(&self) -> Option<&FilterContents> {
        match self {
            Self::Filter(f) => Some(f),
            _ => None,
        }
    }

    /// Visits these contents and every contents nested as a filter input, outermost first.
    pub fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Contents)) {
        f(self);
        if let Self::Filter(filter) = self {
            filter.input.contents_mut().visit_mut(f);
        }
    }
}

impl From<FilterContents> for Contents {
    fn from(filter: FilterContents) -> Self {
        Self::Filter(filter)
    }
}

impl PartialEq for TiledTextureContents {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.texture, &other.texture)
            && self.x_tile_mode == other.x_tile_mode
            && self.y_tile_mode == other.y_tile_mode
            && self.sampler == other.sampler
            && self.geometry == other.geometry
            && self.alpha == other.alpha
    }
}

impl PartialEq for TextureContents {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.texture, &other.texture)
            && self.destination == other.destination
            && self.source_rect == other.source_rect
            && self.sampler == other.sampler
            && self.opacity == other.opacity
    }
}

impl PartialEq for TextContents {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.glyph_atlas, &other.glyph_atlas)
            && self.frame == other.frame
            && self.color == other.color
    }
}

impl PartialEq for AtlasContents {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.texture, &other.texture)
            && self.transforms == other.transforms
            && self.texture_coordinates == other.texture_coordinates
            && self.colors == other.colors
            && self.blend_mode == other.blend_mode
            && self.sampler == other.sampler
            && self.cull_rect == other.cull_rect
            && self.alpha == other.alpha
    }
}

/// Produces a fresh color-source drawable; geometry and alpha are set by the caller.
pub type ColorSourceProc = Arc<dyn Fn() -> Contents + Send + Sync>;

pub fn linear_gradient_source(
    start_point: Point,
    end_point: Point,
    colors: Vec<Color>,
    stops: Vec<f32>,
    tile_mode: TileMode,
) -> ColorSourceProc {
    Arc::new(move || {
        Contents::LinearGradient(LinearGradientContents {
            start_point,
            end_point,
            colors: colors.clone(),
            stops: stops.clone(),
            tile_mode,
            geometry: Geometry::Cover,
            alpha: 1.0,
        })
    })
}

pub fn radial_gradient_source(
    center: Point,
    radius: f64,
    colors: Vec<Color>,
    stops: Vec<f32>,
    tile_mode: TileMode,
) -> ColorSourceProc {
    Arc::new(move || {
        Contents::RadialGradient(RadialGradientContents {
            center,
            radius,
            colors: colors.clone(),
            stops: stops.clone(),
            tile_mode,
            geometry: Geometry::Cover,
            alpha: 1.0,
        })
    })
}

pub fn image_source(
    texture: Arc<Texture>,
    x_tile_mode: TileMode,
    y_tile_mode: TileMode,
    sampler: SamplerDescriptor,
) -> ColorSourceProc {
    Arc::new(move || {
        Contents::TiledTexture(TiledTextureContents {
            texture: Arc::clone(&texture),
            x_tile_mode,
            y_tile_mode,
            sampler: sampler.clone(),
            geometry: Geometry::Cover,
            alpha: 1.0,
        })
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render_graph/contents.rs"]
mod tests;
