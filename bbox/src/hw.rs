use crate::common::*;

/// The height and width of an image or a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HW<T> {
    h: T,
    w: T,
}

impl<T> HW<T>
where
    T: Unsigned + Copy,
{
    /// Build from unsigned values, which are never negative.
    pub fn from_hw(hw: [T; 2]) -> Self {
        let [h, w] = hw;
        Self { h, w }
    }

    pub fn h(&self) -> T {
        self.h
    }

    pub fn w(&self) -> T {
        self.w
    }

    pub fn hw(&self) -> [T; 2] {
        [self.h, self.w]
    }

    pub fn area(&self) -> T {
        self.h * self.w
    }
}
