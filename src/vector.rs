use std::ops::{Add, Div, Mul, Sub};

/// Immutable 2D vector in world units.
///
/// Every operation returns a fresh value. Arithmetic is available against
/// another vector (component-wise) and against an `f64` (broadcast to both
/// components). Division by zero follows IEEE rules and is never trapped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance_to(self, other: Self) -> f64 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or zero if the length is exactly zero.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len != 0.0 { self / len } else { Self::ZERO }
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn rotate(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Component-wise floor, used to find the grid cell containing a point.
    #[inline]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Vector2 {
            type Output = Vector2;

            #[inline]
            fn $method(self, rhs: Vector2) -> Vector2 {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl $trait<f64> for Vector2 {
            type Output = Vector2;

            #[inline]
            fn $method(self, rhs: f64) -> Vector2 {
                Vector2::new(self.x $op rhs, self.y $op rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, +);
impl_binary_op!(Sub, sub, -);
impl_binary_op!(Mul, mul, *);
impl_binary_op!(Div, div, /);
