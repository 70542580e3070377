use crate::common::*;

/// Axis-aligned box in TLBR format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TLBR<T> {
    pub(crate) t: T,
    pub(crate) l: T,
    pub(crate) b: T,
    pub(crate) r: T,
}

impl<T> TLBR<T>
where
    T: Copy + Num + PartialOrd,
{
    pub fn t(&self) -> T {
        self.t
    }

    pub fn l(&self) -> T {
        self.l
    }

    pub fn b(&self) -> T {
        self.b
    }

    pub fn r(&self) -> T {
        self.r
    }

    pub fn h(&self) -> T {
        self.b - self.t
    }

    pub fn w(&self) -> T {
        self.r - self.l
    }

    pub fn tlbr(&self) -> [T; 4] {
        [self.t, self.l, self.b, self.r]
    }
}
