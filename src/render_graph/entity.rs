use crate::foundation::core::BlendMode;
use crate::foundation::math::Matrix;
use crate::render_graph::contents::Contents;

/// One recorded draw: contents positioned by a transform and masked by a stencil depth.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    transform: Matrix,
    stencil_depth: u32,
    blend_mode: BlendMode,
    contents: Contents,
}

impl Entity {
    pub fn new(contents: Contents) -> Self {
        Self {
            transform: Matrix::IDENTITY,
            stencil_depth: 0,
            blend_mode: BlendMode::default(),
            contents,
        }
    }

    pub fn with_transform(mut self, transform: Matrix) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_stencil_depth(mut self, stencil_depth: u32) -> Self {
        self.stencil_depth = stencil_depth;
        self
    }

    pub fn with_blend_mode(mut self, blend_mode: BlendMode) -> Self {
        self.blend_mode = blend_mode;
        self
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Matrix) {
        self.transform = transform;
    }

    pub fn stencil_depth(&self) -> u32 {
        self.stencil_depth
    }

    pub fn increment_stencil_depth(&mut self, by: u32) {
        self.stencil_depth += by;
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    pub(crate) fn contents_mut(&mut self) -> &mut Contents {
        &mut self.contents
    }
}
