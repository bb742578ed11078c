use crate::foundation::core::{BezPath, BlendMode, Cap, Color, Join};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::Matrix;
use crate::render_graph::contents::{ColorSourceProc, Contents};
use crate::render_graph::filters::{
    BlurStyle, ColorFilterProc, ColorMatrix, FilterContents, FilterInput, ImageFilterProc,
    TileMode,
};
use crate::render_graph::geometry::Geometry;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PaintStyle {
    #[default]
    Fill,
    Stroke,
}

/// Mask blur applied to the coverage of whatever a paint draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskBlurDescriptor {
    pub style: BlurStyle,
    pub sigma: f64,
}

impl MaskBlurDescriptor {
    pub fn new(style: BlurStyle, sigma: f64) -> CanvasResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(CanvasError::validation(
                "mask blur sigma must be finite and >= 0",
            ));
        }
        Ok(Self { style, sigma })
    }

    /// Gaussian blur for solid colors, a cheaper border-mask blur for anything else.
    pub fn create_mask_blur(
        &self,
        input: FilterInput,
        is_solid_color: bool,
        effect_transform: &Matrix,
    ) -> FilterContents {
        if is_solid_color {
            return FilterContents::make_gaussian_blur(
                input,
                self.sigma,
                self.sigma,
                self.style,
                TileMode::Decal,
                *effect_transform,
            );
        }
        FilterContents::make_border_mask_blur(
            input,
            self.sigma,
            self.sigma,
            self.style,
            *effect_transform,
        )
    }
}

/// Style configuration for a draw call.
///
/// A paint turns geometry into a drawable and then layers its effects on top, always in the
/// same order: mask blur, image filter, color filter, color inversion. None of the pipeline
/// functions mutate the paint.
#[derive(Clone)]
pub struct Paint {
    pub color: Color,
    pub color_source: Option<ColorSourceProc>,
    pub stroke_width: f64,
    pub stroke_cap: Cap,
    pub stroke_join: Join,
    pub stroke_miter: f64,
    pub style: PaintStyle,
    pub blend_mode: BlendMode,
    pub invert_colors: bool,
    pub image_filter: Option<ImageFilterProc>,
    pub color_filter: Option<ColorFilterProc>,
    pub mask_blur_descriptor: Option<MaskBlurDescriptor>,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            color_source: None,
            stroke_width: 0.0,
            stroke_cap: Cap::Butt,
            stroke_join: Join::Miter,
            stroke_miter: 4.0,
            style: PaintStyle::Fill,
            blend_mode: BlendMode::SourceOver,
            invert_colors: false,
            image_filter: None,
            color_filter: None,
            mask_blur_descriptor: None,
        }
    }
}

impl std::fmt::Debug for Paint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paint")
            .field("color", &self.color)
            .field("has_color_source", &self.color_source.is_some())
            .field("stroke_width", &self.stroke_width)
            .field("stroke_cap", &self.stroke_cap)
            .field("stroke_join", &self.stroke_join)
            .field("stroke_miter", &self.stroke_miter)
            .field("style", &self.style)
            .field("blend_mode", &self.blend_mode)
            .field("invert_colors", &self.invert_colors)
            .field("has_image_filter", &self.image_filter.is_some())
            .field("has_color_filter", &self.color_filter.is_some())
            .field("mask_blur_descriptor", &self.mask_blur_descriptor)
            .finish()
    }
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    pub fn stroke(color: Color, width: f64) -> Self {
        Self {
            color,
            stroke_width: width,
            style: PaintStyle::Stroke,
            ..Self::default()
        }
    }

    /// `true` when any effect stage would wrap the drawable.
    pub fn has_effects(&self) -> bool {
        self.mask_blur_descriptor.is_some()
            || self.image_filter.is_some()
            || self.color_filter.is_some()
            || self.invert_colors
    }

    /// Geometry for `path` according to the paint style; `cover` ignores the path and covers
    /// the whole target.
    pub fn create_contents_for_entity(&self, path: BezPath, cover: bool) -> Contents {
        let geometry = if cover {
            Geometry::make_cover()
        } else {
            match self.style {
                PaintStyle::Fill => Geometry::make_fill_path(path),
                PaintStyle::Stroke => Geometry::make_stroke_path(
                    path,
                    self.stroke_width,
                    self.stroke_miter,
                    self.stroke_cap,
                    self.stroke_join,
                ),
            }
        };
        self.create_contents_for_geometry(geometry)
    }

    pub fn create_contents_for_geometry(&self, geometry: Geometry) -> Contents {
        match &self.color_source {
            Some(source) => {
                let mut contents = source();
                contents.set_geometry(geometry);
                contents.set_alpha(self.color.a);
                contents
            }
            None => Contents::solid_color(geometry, self.color),
        }
    }

    /// Wraps `input` in this paint's effects. `is_solid_color` overrides whether the mask blur
    /// may assume a solid color; by default that holds when there is no color source.
    pub fn with_filters(
        &self,
        input: Contents,
        is_solid_color: Option<bool>,
        effect_transform: &Matrix,
    ) -> Contents {
        let is_solid_color = is_solid_color.unwrap_or(self.color_source.is_none());
        let input = self.with_mask_blur(input, is_solid_color, effect_transform);
        let input = self.with_image_filter(input, effect_transform);
        let input = with_color_filter(input, self.color_filter.as_ref(), false);
        self.with_invert(input, false)
    }

    /// Effect chain for a whole composited subpass: the mask blur never assumes a solid color
    /// and the color stages absorb opacity.
    pub fn with_filters_for_subpass_target(
        &self,
        input: Contents,
        effect_transform: &Matrix,
    ) -> Contents {
        let input = self.with_mask_blur(input, false, effect_transform);
        let input = self.with_image_filter(input, effect_transform);
        let input = with_color_filter(input, self.color_filter.as_ref(), true);
        self.with_invert(input, true)
    }

    fn with_mask_blur(
        &self,
        input: Contents,
        is_solid_color: bool,
        effect_transform: &Matrix,
    ) -> Contents {
        match &self.mask_blur_descriptor {
            Some(blur) => blur
                .create_mask_blur(FilterInput::make(input), is_solid_color, effect_transform)
                .into(),
            None => input,
        }
    }

    fn with_image_filter(&self, input: Contents, effect_transform: &Matrix) -> Contents {
        match &self.image_filter {
            Some(filter) => filter(FilterInput::make(input), effect_transform).into(),
            None => input,
        }
    }

    fn with_invert(&self, input: Contents, absorb_opacity: bool) -> Contents {
        if !self.invert_colors {
            return input;
        }
        let mut invert =
            FilterContents::make_color_matrix(FilterInput::make(input), ColorMatrix::INVERT);
        invert.set_absorb_opacity(absorb_opacity);
        invert.into()
    }
}

fn with_color_filter(
    input: Contents,
    filter: Option<&ColorFilterProc>,
    absorb_opacity: bool,
) -> Contents {
    let Some(filter) = filter else {
        return input;
    };
    // the filter consumes its input; keep a copy in case it declines
    match filter(FilterInput::make(input.clone())) {
        Some(mut contents) => {
            contents.set_absorb_opacity(absorb_opacity);
            contents.into()
        }
        None => input,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recording/paint.rs"]
mod tests;
