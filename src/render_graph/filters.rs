use std::sync::Arc;

use crate::foundation::core::{BlendMode, Color};
use crate::foundation::math::Matrix;
use crate::render_graph::contents::Contents;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BlurStyle {
    /// Blurred inside and outside.
    #[default]
    Normal,
    /// Solid inside, blurred outside.
    Solid,
    /// Nothing inside, blurred outside.
    Outer,
    /// Blurred inside, nothing outside.
    Inner,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TileMode {
    Clamp,
    Repeat,
    Mirror,
    #[default]
    Decal,
}

/// 4x5 row-major color matrix applied to unpremultiplied RGBA.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix {
    pub array: [f32; 20],
}

impl ColorMatrix {
    #[rustfmt::skip]
    pub const INVERT: Self = Self {
        array: [
            -1.0, 0.0, 0.0, 0.0, 1.0,
            0.0, -1.0, 0.0, 0.0, 1.0,
            0.0, 0.0, -1.0, 0.0, 1.0,
            0.0, 0.0, 0.0, 1.0, 0.0,
        ],
    };

    pub fn apply(&self, c: Color) -> Color {
        let a = &self.array;
        let v = [c.r, c.g, c.b, c.a];
        let row = |r: usize| {
            (0..4).map(|k| a[r * 5 + k] * v[k]).sum::<f32>() + a[r * 5 + 4]
        };
        Color::new(row(0), row(1), row(2), row(3))
    }
}

/// What a filter stage does to its input.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterKind {
    GaussianBlur {
        sigma_x: f64,
        sigma_y: f64,
        style: BlurStyle,
        tile_mode: TileMode,
    },
    /// Cheap blur of the coverage border, used when the input is not a solid color.
    BorderMaskBlur {
        sigma_x: f64,
        sigma_y: f64,
        style: BlurStyle,
    },
    ColorMatrix(ColorMatrix),
    BlendColor {
        color: Color,
        blend_mode: BlendMode,
    },
    LocalMatrix(Matrix),
}

impl FilterKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::GaussianBlur { .. } => "gaussian_blur",
            Self::BorderMaskBlur { .. } => "border_mask_blur",
            Self::ColorMatrix(_) => "color_matrix",
            Self::BlendColor { .. } => "blend_color",
            Self::LocalMatrix(_) => "local_matrix",
        }
    }

    pub fn is_color_filter(&self) -> bool {
        matches!(self, Self::ColorMatrix(_) | Self::BlendColor { .. })
    }
}

/// Input to a filter stage: the drawable being filtered.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterInput(Box<Contents>);

impl FilterInput {
    pub fn make(contents: Contents) -> Self {
        Self(Box::new(contents))
    }

    pub fn contents(&self) -> &Contents {
        &self.0
    }

    pub(crate) fn contents_mut(&mut self) -> &mut Contents {
        &mut self.0
    }

    pub fn into_contents(self) -> Contents {
        *self.0
    }
}

/// A drawable produced by wrapping another drawable in an effect.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterContents {
    pub kind: FilterKind,
    pub input: FilterInput,
    pub effect_transform: Matrix,
    /// When set, the filter folds the input's opacity into its own output instead of leaving it
    /// for a later blend.
    pub absorb_opacity: bool,
}

impl FilterContents {
    fn new(kind: FilterKind, input: FilterInput, effect_transform: Matrix) -> Self {
        Self {
            kind,
            input,
            effect_transform,
            absorb_opacity: false,
        }
    }

    pub fn make_gaussian_blur(
        input: FilterInput,
        sigma_x: f64,
        sigma_y: f64,
        style: BlurStyle,
        tile_mode: TileMode,
        effect_transform: Matrix,
    ) -> Self {
        Self::new(
            FilterKind::GaussianBlur {
                sigma_x,
                sigma_y,
                style,
                tile_mode,
            },
            input,
            effect_transform,
        )
    }

    pub fn make_border_mask_blur(
        input: FilterInput,
        sigma_x: f64,
        sigma_y: f64,
        style: BlurStyle,
        effect_transform: Matrix,
    ) -> Self {
        Self::new(
            FilterKind::BorderMaskBlur {
                sigma_x,
                sigma_y,
                style,
            },
            input,
            effect_transform,
        )
    }

    pub fn make_color_matrix(input: FilterInput, matrix: ColorMatrix) -> Self {
        Self::new(FilterKind::ColorMatrix(matrix), input, Matrix::IDENTITY)
    }

    pub fn make_blend(input: FilterInput, color: Color, blend_mode: BlendMode) -> Self {
        Self::new(
            FilterKind::BlendColor { color, blend_mode },
            input,
            Matrix::IDENTITY,
        )
    }

    pub fn make_local_matrix(
        input: FilterInput,
        matrix: Matrix,
        effect_transform: Matrix,
    ) -> Self {
        Self::new(FilterKind::LocalMatrix(matrix), input, effect_transform)
    }

    pub fn set_absorb_opacity(&mut self, absorb_opacity: bool) {
        self.absorb_opacity = absorb_opacity;
    }

    pub fn input(&self) -> &Contents {
        self.input.contents()
    }
}

/// Builds an image filter around an input under the given effect transform.
pub type ImageFilterProc = Arc<dyn Fn(FilterInput, &Matrix) -> FilterContents + Send + Sync>;

/// Builds a color filter around an input; `None` leaves the input unfiltered.
pub type ColorFilterProc = Arc<dyn Fn(FilterInput) -> Option<FilterContents> + Send + Sync>;

/// Gaussian blur image filter.
pub fn blur_image_filter(sigma_x: f64, sigma_y: f64, tile_mode: TileMode) -> ImageFilterProc {
    Arc::new(move |input: FilterInput, effect_transform: &Matrix| {
        FilterContents::make_gaussian_blur(
            input,
            sigma_x,
            sigma_y,
            BlurStyle::Normal,
            tile_mode,
            *effect_transform,
        )
    })
}

/// Image filter that draws its input under an additional local transform.
pub fn matrix_image_filter(matrix: Matrix) -> ImageFilterProc {
    Arc::new(move |input: FilterInput, effect_transform: &Matrix| {
        FilterContents::make_local_matrix(input, matrix, *effect_transform)
    })
}

pub fn matrix_color_filter(matrix: ColorMatrix) -> ColorFilterProc {
    Arc::new(move |input: FilterInput| Some(FilterContents::make_color_matrix(input, matrix)))
}

pub fn blend_color_filter(color: Color, blend_mode: BlendMode) -> ColorFilterProc {
    Arc::new(move |input: FilterInput| Some(FilterContents::make_blend(input, color, blend_mode)))
}

#[cfg(test)]
#[path = "../../tests/unit/render_graph/filters.rs"]
mod tests;
