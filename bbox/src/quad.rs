use crate::{common::*, Transform, TLBR};

/// Oriented bounding box described by four vertices.
///
/// The vertices are stored in the order given by the annotation, as
/// `[x, y]` pairs. No ordering or convexity is enforced, so the shape
/// survives any sequence of transforms vertex by vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quad<T> {
    pub(crate) points: [[T; 2]; 4],
}

impl<T> Quad<T>
where
    T: Copy,
{
    /// Build from coordinates in `x1, y1, x2, y2, x3, y3, x4, y4` order.
    pub fn from_xy8(coords: [T; 8]) -> Self {
        let [x1, y1, x2, y2, x3, y3, x4, y4] = coords;
        Self {
            points: [[x1, y1], [x2, y2], [x3, y3], [x4, y4]],
        }
    }

    pub fn to_xy8(&self) -> [T; 8] {
        let [[x1, y1], [x2, y2], [x3, y3], [x4, y4]] = self.points;
        [x1, y1, x2, y2, x3, y3, x4, y4]
    }

    pub fn xs(&self) -> [T; 4] {
        self.points.map(|[x, _]| x)
    }

    pub fn ys(&self) -> [T; 4] {
        self.points.map(|[_, y]| y)
    }

    /// Apply `f` to every coordinate.
    pub fn map<U, F>(&self, mut f: F) -> Quad<U>
    where
        F: FnMut(T) -> U,
    {
        Quad {
            points: self.points.map(|[x, y]| [f(x), f(y)]),
        }
    }

    /// Apply `f` to every `[x, y]` vertex.
    pub fn map_points<U, F>(&self, f: F) -> Quad<U>
    where
        F: FnMut([T; 2]) -> [U; 2],
    {
        Quad {
            points: self.points.map(f),
        }
    }
}

impl<T> Quad<T>
where
    T: Copy + Num,
{
    pub fn transform(&self, transform: &Transform<T>) -> Self {
        let Transform { sy, sx, ty, tx } = *transform;
        self.map_points(|[x, y]| [x * sx + tx, y * sy + ty])
    }
}

impl<T> Quad<T>
where
    T: Copy + Num + PartialOrd,
{
    /// The smallest axis-aligned box containing all four vertices.
    pub fn enclosing_tlbr(&self) -> TLBR<T> {
        let [[x0, y0], rest @ ..] = self.points;
        let (t, l, b, r) = rest
            .iter()
            .fold((y0, x0, y0, x0), |(t, l, b, r), &[x, y]| {
                (
                    if y < t { y } else { t },
                    if x < l { x } else { l },
                    if y > b { y } else { b },
                    if x > r { x } else { r },
                )
            });
        TLBR { t, l, b, r }
    }
}

impl<T> Mul<&Quad<T>> for &Transform<T>
where
    T: Copy + Num,
{
    type Output = Quad<T>;

    fn mul(self, rhs: &Quad<T>) -> Self::Output {
        rhs.transform(self)
    }
}
