//! Geometric primitives for pathway element placement.
//!
//! This module provides the value types used by shaped elements and lines to
//! describe where they sit on the pathway board.
//!
//! # Overview
//!
//! - [`Coordinate`] - A 2D position on the board
//! - [`RectProperty`] - Center, width and height of a shaped element
//! - [`Bounds`] - An axis-aligned bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! GPML uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Rotations are expressed in radians, clockwise on screen (positive angles
//! turn +X towards +Y).

use crate::error::ModelError;

/// A 2D point on the pathway board.
///
/// # Examples
///
/// ```
/// # use gpml_core::geometry::Coordinate;
/// let p1 = Coordinate::new(0.0, 0.0);
/// let p2 = Coordinate::new(30.0, 40.0);
///
/// assert_eq!(p1.distance(p2), 50.0);
/// assert_eq!(p1.lerp(p2, 0.5), Coordinate::new(15.0, 20.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coordinate {
    x: f64,
    y: f64,
}

impl Coordinate {
    /// Creates a new coordinate
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    /// Euclidean distance to another coordinate
    pub fn distance(self, other: Coordinate) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation towards `other`; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Coordinate, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Rotates this coordinate around `center` by `angle` radians.
    pub fn rotate_around(self, center: Coordinate, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Self {
            x: center.x + dx * cos - dy * sin,
            y: center.y + dx * sin + dy * cos,
        }
    }
}

/// Rectangular geometry of a shaped element: a center plus non-negative size.
///
/// Width and height can only be set through validating constructors and
/// setters; a negative value is rejected with [`ModelError::NegativeDimension`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RectProperty {
    center: Coordinate,
    width: f64,
    height: f64,
}

impl RectProperty {
    /// Creates a rect, rejecting negative dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpml_core::geometry::{Coordinate, RectProperty};
    /// let rect = RectProperty::new(Coordinate::new(50.0, 50.0), 20.0, 10.0).unwrap();
    /// assert_eq!(rect.bounds().min_x(), 40.0);
    /// assert!(RectProperty::new(Coordinate::new(0.0, 0.0), -1.0, 10.0).is_err());
    /// ```
    pub fn new(center: Coordinate, width: f64, height: f64) -> Result<Self, ModelError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        Ok(Self {
            center,
            width,
            height,
        })
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_center(&mut self, center: Coordinate) {
        self.center = center;
    }

    pub fn set_width(&mut self, width: f64) -> Result<(), ModelError> {
        check_dimension("width", width)?;
        self.width = width;
        Ok(())
    }

    pub fn set_height(&mut self, height: f64) -> Result<(), ModelError> {
        check_dimension("height", height)?;
        self.height = height;
        Ok(())
    }

    /// Axis-aligned bounds of the unrotated rectangle.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_center(self.center, self.width, self.height)
    }
}

fn check_dimension(field: &'static str, value: f64) -> Result<(), ModelError> {
    if value < 0.0 || value.is_nan() {
        return Err(ModelError::NegativeDimension { field, value });
    }
    Ok(())
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates bounds from explicit extremes.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Coordinate, width: f64, height: f64) -> Self {
        let half_width = width / 2.0;
        let half_height = height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Smallest bounds containing both endpoints.
    pub fn from_corners(a: Coordinate, b: Coordinate) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    pub fn min_x(self) -> f64 {
        self.min_x
    }

    pub fn min_y(self) -> f64 {
        self.min_y
    }

    pub fn max_x(self) -> f64 {
        self.max_x
    }

    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Coordinate {
        Coordinate::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpml_core::geometry::{Bounds, Coordinate};
    /// let a = Bounds::new(0.0, 0.0, 100.0, 30.0);
    /// let b = Bounds::new(10.0, 40.0, 130.0, 120.0);
    ///
    /// let combined = a.merge(&b);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    /// Axis-aligned bounds of this rectangle after rotating it by `angle`
    /// radians around its own center.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gpml_core::geometry::Bounds;
    /// let bounds = Bounds::new(0.0, 0.0, 40.0, 20.0);
    /// let rotated = bounds.rotated(std::f64::consts::FRAC_PI_2);
    /// assert!((rotated.width() - 20.0).abs() < 1e-9);
    /// assert!((rotated.height() - 40.0).abs() < 1e-9);
    /// ```
    pub fn rotated(&self, angle: f64) -> Self {
        if angle == 0.0 {
            return *self;
        }
        let center = self.center();
        let corners = [
            Coordinate::new(self.min_x, self.min_y),
            Coordinate::new(self.max_x, self.min_y),
            Coordinate::new(self.max_x, self.max_y),
            Coordinate::new(self.min_x, self.max_y),
        ];
        let rotated = corners.map(|corner| corner.rotate_around(center, angle));
        rotated
            .iter()
            .skip(1)
            .fold(Bounds::from_corners(rotated[0], rotated[0]), |acc, corner| {
                acc.merge(&Bounds::from_corners(*corner, *corner))
            })
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use float_cmp::approx_eq;

    use super::*;

    #[test]
    fn test_coordinate_new() {
        let point = Coordinate::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_coordinate_distance_and_lerp() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.lerp(b, 0.5), Coordinate::new(1.5, 2.0));
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn test_coordinate_rotate_around() {
        let rotated = Coordinate::new(10.0, 0.0).rotate_around(Coordinate::default(), PI / 2.0);
        assert!(approx_eq!(f64, rotated.x(), 0.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, rotated.y(), 10.0, epsilon = 1e-9));
    }

    #[test]
    fn test_rect_rejects_negative_dimensions() {
        let center = Coordinate::new(0.0, 0.0);
        assert!(matches!(
            RectProperty::new(center, -0.5, 1.0),
            Err(ModelError::NegativeDimension { field: "width", .. })
        ));
        assert!(matches!(
            RectProperty::new(center, 1.0, -2.0),
            Err(ModelError::NegativeDimension {
                field: "height",
                ..
            })
        ));

        let mut rect = RectProperty::new(center, 1.0, 1.0).unwrap();
        assert!(rect.set_width(-3.0).is_err());
        assert_eq!(rect.width(), 1.0);
        assert!(rect.set_height(0.0).is_ok());
    }

    #[test]
    fn test_rect_bounds() {
        let rect = RectProperty::new(Coordinate::new(50.0, 60.0), 20.0, 30.0).unwrap();
        let bounds = rect.bounds();
        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 45.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.max_y(), 75.0);
        assert_eq!(bounds.center(), rect.center());
    }

    #[test]
    fn test_bounds_expand() {
        let bounds = Bounds::new(10.0, 10.0, 20.0, 20.0).expand(8.0);
        assert_eq!(bounds, Bounds::new(2.0, 2.0, 28.0, 28.0));
    }

    #[test]
    fn test_bounds_rotated_quarter_turn() {
        let bounds = Bounds::new(0.0, 0.0, 40.0, 20.0);
        let rotated = bounds.rotated(PI / 2.0);
        assert!(approx_eq!(f64, rotated.min_x(), 10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, rotated.min_y(), -10.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, rotated.max_x(), 30.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, rotated.max_y(), 30.0, epsilon = 1e-9));
    }

    #[test]
    fn test_bounds_rotated_zero_is_identity() {
        let bounds = Bounds::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(bounds.rotated(0.0), bounds);
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f64..1000.0,
            -1000.0f64..1000.0,
            1.0f64..500.0,
            1.0f64..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new(x, y, x + w, y + h))
    }

    fn angle_strategy() -> impl Strategy<Value = f64> {
        -10.0f64..10.0
    }

    /// Bounds merge should be commutative: a.merge(b) == b.merge(a).
    fn check_bounds_merge_is_commutative(b1: Bounds, b2: Bounds) -> Result<(), TestCaseError> {
        prop_assert_eq!(b1.merge(&b2), b2.merge(&b1));
        Ok(())
    }

    /// Rotation keeps the center fixed and never shrinks the box below the
    /// larger of the original width/height projections.
    fn check_rotation_preserves_center(bounds: Bounds, angle: f64) -> Result<(), TestCaseError> {
        let rotated = bounds.rotated(angle);
        prop_assert!(approx_eq!(
            f64,
            rotated.center().x(),
            bounds.center().x(),
            epsilon = 1e-6
        ));
        prop_assert!(approx_eq!(
            f64,
            rotated.center().y(),
            bounds.center().y(),
            epsilon = 1e-6
        ));
        let diagonal = bounds.width().hypot(bounds.height());
        prop_assert!(rotated.width() <= diagonal + 1e-6);
        prop_assert!(rotated.height() <= diagonal + 1e-6);
        Ok(())
    }

    /// Any non-negative size is accepted, any negative size rejected.
    fn check_rect_dimension_domain(width: f64, height: f64) -> Result<(), TestCaseError> {
        let result = RectProperty::new(Coordinate::default(), width, height);
        prop_assert_eq!(result.is_ok(), width >= 0.0 && height >= 0.0);
        Ok(())
    }

    proptest! {
        #[test]
        fn bounds_merge_is_commutative(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            check_bounds_merge_is_commutative(b1, b2)?;
        }

        #[test]
        fn rotation_preserves_center(bounds in bounds_strategy(), angle in angle_strategy()) {
            check_rotation_preserves_center(bounds, angle)?;
        }

        #[test]
        fn rect_dimension_domain(width in -100.0f64..100.0, height in -100.0f64..100.0) {
            check_rect_dimension_domain(width, height)?;
        }
    }
}
