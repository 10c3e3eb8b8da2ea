//! 2D affine transformations between scene space and node space.

use glam::{Affine2, Vec2};

use crate::types::Point;

/// A 2D affine transformation.
///
/// Wraps a [`glam::Affine2`]: a 2x2 linear part (scale, rotation, skew) and
/// a translation.
///
/// # Examples
///
/// ```
/// use horizon_sprite_render::{Point, Transform2D};
///
/// // First scale, then move: composed right-to-left with `then`.
/// let node = Transform2D::translate(100.0, 50.0).then(&Transform2D::scale_xy(2.0, 2.0));
/// assert_eq!(node.transform_point(Point::new(5.0, 0.0)), Point::new(110.0, 50.0));
///
/// // The inverse maps scene points back into node space.
/// let local = node.inverse().unwrap().transform_point(Point::new(110.0, 50.0));
/// assert!((local.x - 5.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    affine: Affine2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        affine: Affine2::IDENTITY,
    };

    /// Create a translation transform.
    #[inline]
    pub fn translate(tx: f32, ty: f32) -> Self {
        Self {
            affine: Affine2::from_translation(Vec2::new(tx, ty)),
        }
    }

    /// Create a non-uniform scaling transform.
    #[inline]
    pub fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            affine: Affine2::from_scale(Vec2::new(sx, sy)),
        }
    }

    /// Create a counter-clockwise rotation (angle in radians).
    #[inline]
    pub fn rotate(angle: f32) -> Self {
        Self {
            affine: Affine2::from_angle(angle),
        }
    }

    /// Concatenate this transform with another (self * other).
    ///
    /// The resulting transform first applies `other`, then `self`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        Self {
            affine: self.affine * other.affine,
        }
    }

    /// Transform a point.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        self.affine.transform_point2(p.to_vec2()).into()
    }

    /// Determinant of the linear part.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.affine.matrix2.determinant()
    }

    /// Compute the inverse of this transform, if it exists.
    ///
    /// A node scaled to zero on either axis has no inverse.
    pub fn inverse(&self) -> Option<Self> {
        if self.determinant().abs() < 1e-10 {
            return None;
        }
        Some(Self {
            affine: self.affine.inverse(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let p = Transform2D::rotate(FRAC_PI_2).transform_point(Point::new(1.0, 0.0));
        assert!(approx(p, Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_inverse_undoes_composed_transform() {
        let t = Transform2D::translate(30.0, -10.0)
            .then(&Transform2D::rotate(0.7))
            .then(&Transform2D::scale_xy(2.0, 0.5));
        let inv = t.inverse().expect("invertible");
        let p = Point::new(3.0, 4.0);
        assert!(approx(inv.transform_point(t.transform_point(p)), p));
        assert!(approx(t.then(&inv).transform_point(p), p));
    }

    #[test]
    fn test_zero_scale_has_no_inverse() {
        assert!(Transform2D::scale_xy(0.0, 1.0).inverse().is_none());
        assert_eq!(Transform2D::scale_xy(2.0, 3.0).determinant(), 6.0);
        assert_eq!(Transform2D::default(), Transform2D::IDENTITY);
    }
}
