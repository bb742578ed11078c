use kurbo::Shape;

use crate::foundation::core::{BezPath, Cap, Color, Join, Point, Rect};
use crate::foundation::math::Matrix;

/// Tolerance used when flattening analytic shapes into paths.
pub const PATH_TOLERANCE: f64 = 0.1;

/// Shape description consumed by color-producing contents.
///
/// Geometry is never tessellated here; backends turn it into vertex buffers later.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Rect(Rect),
    RoundedRect {
        rect: Rect,
        corner_radius: f64,
    },
    FillPath(BezPath),
    StrokePath {
        path: BezPath,
        width: f64,
        miter_limit: f64,
        cap: Cap,
        join: Join,
    },
    /// Covers the whole render target regardless of transform.
    Cover,
    Vertices(VerticesGeometry),
}

impl Geometry {
    pub fn make_rect(rect: Rect) -> Self {
        Self::Rect(rect)
    }

    pub fn make_rrect(rect: Rect, corner_radius: f64) -> Self {
        Self::RoundedRect {
            rect,
            corner_radius,
        }
    }

    pub fn make_fill_path(path: BezPath) -> Self {
        Self::FillPath(path)
    }

    pub fn make_stroke_path(
        path: BezPath,
        width: f64,
        miter_limit: f64,
        cap: Cap,
        join: Join,
    ) -> Self {
        Self::StrokePath {
            path,
            width,
            miter_limit,
            cap,
            join,
        }
    }

    pub fn make_cover() -> Self {
        Self::Cover
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Rect(_) => "rect",
            Self::RoundedRect { .. } => "rrect",
            Self::FillPath(_) => "fill_path",
            Self::StrokePath { .. } => "stroke_path",
            Self::Cover => "cover",
            Self::Vertices(_) => "vertices",
        }
    }

    /// Device-space bounds under `transform`, or `None` for unbounded geometry.
    pub fn coverage(&self, transform: &Matrix) -> Option<Rect> {
        let local = match self {
            Self::Rect(r) => *r,
            Self::RoundedRect { rect, .. } => *rect,
            Self::FillPath(path) => path.bounding_box(),
            Self::StrokePath { path, width, .. } => {
                path.bounding_box().inflate(width / 2.0, width / 2.0)
            }
            Self::Cover => return None,
            Self::Vertices(v) => v.bounds()?,
        };
        Some(transform.transform_bounds(local))
    }
}

/// Helpers mirroring a path builder for the analytic shapes the canvas records.
pub fn rect_path(rect: Rect) -> BezPath {
    rect.to_path(PATH_TOLERANCE)
}

pub fn rounded_rect_path(rect: Rect, corner_radius: f64) -> BezPath {
    kurbo::RoundedRect::from_rect(rect, corner_radius).to_path(PATH_TOLERANCE)
}

pub fn circle_path(center: Point, radius: f64) -> BezPath {
    kurbo::Circle::new(center, radius).to_path(PATH_TOLERANCE)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VertexMode {
    #[default]
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Client-supplied mesh drawn with `draw_vertices`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerticesGeometry {
    pub mode: VertexMode,
    pub positions: Vec<Point>,
    pub indices: Vec<u16>,
    pub texture_coordinates: Vec<Point>,
    pub colors: Vec<Color>,
}

impl VerticesGeometry {
    pub fn new(mode: VertexMode, positions: Vec<Point>) -> Self {
        Self {
            mode,
            positions,
            ..Self::default()
        }
    }

    pub fn has_vertex_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    pub fn has_texture_coordinates(&self) -> bool {
        !self.texture_coordinates.is_empty()
    }

    /// Bounds of all positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Rect> {
        let (first, rest) = self.positions.split_first()?;
        Some(
            rest.iter()
                .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render_graph/geometry.rs"]
mod tests;
