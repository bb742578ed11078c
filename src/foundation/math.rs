use std::ops::{Mul, MulAssign};

use crate::foundation::core::{Affine, Point, Rect, Vec2};

/// Three-component vector used for translation and scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec2> for Vec3 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y, 0.0)
    }
}

/// Column-major 4x4 transform matrix.
///
/// `m[12]`, `m[13]`, `m[14]` hold the translation. `a * b` maps a point through `b` first,
/// then `a`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix {
    pub m: [f64; 16],
}

impl Matrix {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    #[rustfmt::skip]
    pub fn make_translation(t: Vec3) -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                t.x, t.y, t.z, 1.0,
            ],
        }
    }

    #[rustfmt::skip]
    pub fn make_scale(s: Vec3) -> Self {
        Self {
            m: [
                s.x, 0.0, 0.0, 0.0,
                0.0, s.y, 0.0, 0.0,
                0.0, 0.0, s.z, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    #[rustfmt::skip]
    pub fn make_skew(sx: f64, sy: f64) -> Self {
        Self {
            m: [
                1.0, sy,  0.0, 0.0,
                sx,  1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    #[rustfmt::skip]
    pub fn make_rotation_z(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            m: [
                c,   s,   0.0, 0.0,
                -s,  c,   0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[12], self.m[13], self.m[14])
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps a 2D point (z = 0) through the matrix, including the perspective divide.
    pub fn transform_point(&self, p: Point) -> Point {
        let m = &self.m;
        let x = m[0] * p.x + m[4] * p.y + m[12];
        let y = m[1] * p.x + m[5] * p.y + m[13];
        let w = m[3] * p.x + m[7] * p.y + m[15];
        if w != 0.0 && w != 1.0 {
            Point::new(x / w, y / w)
        } else {
            Point::new(x, y)
        }
    }

    /// Axis-aligned bounds of the four transformed corners.
    pub fn transform_bounds(&self, rect: Rect) -> Rect {
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]
        .map(|p| self.transform_point(p));

        corners[1..]
            .iter()
            .fold(Rect::from_points(corners[0], corners[0]), |acc, p| {
                acc.union_pt(*p)
            })
    }

    pub fn to_cols_array(&self) -> [f64; 16] {
        self.m
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<Affine> for Matrix {
    #[rustfmt::skip]
    fn from(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self {
            m: [
                a,   b,   0.0, 0.0,
                c,   d,   0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                e,   f,   0.0, 1.0,
            ],
        }
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        let a = &self.m;
        let b = &rhs.m;
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
            }
        }
        Matrix { m: out }
    }
}

impl MulAssign for Matrix {
    fn mul_assign(&mut self, rhs: Matrix) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
