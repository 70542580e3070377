//! Class-labeled geometric shapes.

use bbox::{Quad, Transform};
use num_traits::Num;
use std::ops::Mul;

/// A shape paired with its class. Transforms act on the shape only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label<R, C> {
    pub rect: R,
    pub class: C,
}

impl<T, C> Label<Quad<T>, C>
where
    T: Copy,
    C: Copy,
{
    /// Apply `f` to every coordinate, keeping the class.
    pub fn map_coords<U, F>(&self, f: F) -> Label<Quad<U>, C>
    where
        F: FnMut(T) -> U,
    {
        Label {
            rect: self.rect.map(f),
            class: self.class,
        }
    }
}

impl<'a, T, C> Mul<&'a Label<Quad<T>, C>> for &'a Transform<T>
where
    T: Copy + Num,
    C: Copy,
{
    type Output = Label<Quad<T>, C>;

    fn mul(self, rhs: &'a Label<Quad<T>, C>) -> Self::Output {
        Label {
            rect: self * &rhs.rect,
            class: rhs.class,
        }
    }
}
