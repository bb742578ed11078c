use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{CanvasError, CanvasResult};

/// Already-uploaded pixel storage referenced by texture, atlas and subpass contents.
///
/// Pixels are premultiplied RGBA8, row-major. Textures are shared read-only between draw
/// records; nothing in the recording core mutates them.
#[derive(Clone)]
pub struct Texture {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba8_premul.len())
            .finish()
    }
}

impl Texture {
    /// Wrap a premultiplied RGBA8 buffer. The buffer length must match `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> CanvasResult<Self> {
        let expected = u64::from(width) * u64::from(height) * 4;
        if rgba8_premul.len() as u64 != expected {
            return Err(CanvasError::validation(format!(
                "texture buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Adopt an `image` buffer, premultiplying its straight alpha.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            for c in &mut px[..3] {
                *c = (((u16::from(*c) * a) + 127) / 255) as u8;
            }
        }
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }

    /// An empty texture, e.g. a render target that has not been allocated yet.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            rgba8_premul: Arc::new(Vec::new()),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }
}

/// Client-facing image handle. Cloning shares the underlying texture.
#[derive(Clone, Debug)]
pub struct Image {
    texture: Arc<Texture>,
}

impl Image {
    pub fn new(texture: Texture) -> Self {
        Self {
            texture: Arc::new(texture),
        }
    }

    pub fn size(&self) -> Size {
        self.texture.size()
    }

    pub fn texture(&self) -> Arc<Texture> {
        Arc::clone(&self.texture)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MinMagFilter {
    #[default]
    Nearest,
    Linear,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SamplerAddressMode {
    #[default]
    ClampToEdge,
    Repeat,
    Mirror,
    Decal,
}

/// How a texture is sampled when drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SamplerDescriptor {
    pub label: String,
    pub min_filter: MinMagFilter,
    pub mag_filter: MinMagFilter,
    pub width_address_mode: SamplerAddressMode,
    pub height_address_mode: SamplerAddressMode,
}

#[cfg(test)]
#[path = "../../tests/unit/render_graph/texture.rs"]
mod tests;
