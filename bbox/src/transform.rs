use crate::common::*;

/// Per-axis affine map `x' = x * sx + tx`, `y' = y * sy + ty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transform<T> {
    pub sy: T,
    pub sx: T,
    pub ty: T,
    pub tx: T,
}

impl<T> Transform<T>
where
    T: Copy + Num + Neg<Output = T>,
{
    /// Mirror along the vertical axis of an image `width` wide, `x' = width - x`.
    pub fn flip_horizontal(width: T) -> Self {
        Self {
            sy: T::one(),
            sx: -T::one(),
            ty: T::zero(),
            tx: width,
        }
    }
}

/// Composition, `(a * b)` applies `b` first.
impl<T> Mul<&Transform<T>> for &Transform<T>
where
    T: Copy + Num,
{
    type Output = Transform<T>;

    fn mul(self, rhs: &Transform<T>) -> Self::Output {
        Transform {
            sx: self.sx * rhs.sx,
            sy: self.sy * rhs.sy,
            tx: rhs.tx * self.sx + self.tx,
            ty: rhs.ty * self.sy + self.ty,
        }
    }
}
