//! Oriented box sets and their geometric transforms.

use crate::{common::*, error::PreprocessError};

/// Number of columns in the dense box layout, `x1 y1 x2 y2 x3 y3 x4 y4 label`.
pub const BOX_COLUMNS: usize = 9;

/// An oriented quadrilateral in pixel units with its class index.
pub type OrientedBox = Label<Quad<f64>, usize>;

/// The rounding applied to every box coordinate after a resize.
///
/// `Floor` reproduces floor-division semantics `x * new // orig` on the
/// annotation grid when applied by [resize_boxes]. `Exact` keeps sub-pixel
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordRounding {
    Floor,
    Exact,
}

impl CoordRounding {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Floor => value.floor(),
            Self::Exact => value,
        }
    }
}

impl Default for CoordRounding {
    fn default() -> Self {
        Self::Floor
    }
}

/// Map boxes through a per-axis transform, then round every coordinate.
///
/// Order and class labels are preserved.
pub fn transform_boxes(
    boxes: &[OrientedBox],
    transform: &Transform<f64>,
    rounding: CoordRounding,
) -> Vec<OrientedBox> {
    boxes
        .iter()
        .map(|label| (transform * label).map_coords(|value| rounding.apply(value)))
        .collect()
}

/// Multiply x coordinates by `scale_x` and y coordinates by `scale_y`.
pub fn scale_boxes(
    boxes: &[OrientedBox],
    scale_x: f64,
    scale_y: f64,
    rounding: CoordRounding,
) -> Vec<OrientedBox> {
    let transform = Transform {
        sy: scale_y,
        sx: scale_x,
        ty: 0.0,
        tx: 0.0,
    };
    transform_boxes(boxes, &transform, rounding)
}

/// Scale boxes annotated on an image of `orig_size` onto `new_size`.
///
/// Each coordinate is multiplied by the new length before dividing by the
/// original one, so integer coordinates floor exactly like `x * new // orig`.
pub fn resize_boxes(
    boxes: &[OrientedBox],
    orig_size: &HW<usize>,
    new_size: &HW<usize>,
    rounding: CoordRounding,
) -> Vec<OrientedBox> {
    let [orig_h, orig_w] = orig_size.hw().map(|len| len as f64);
    let [new_h, new_w] = new_size.hw().map(|len| len as f64);

    boxes
        .iter()
        .map(|label| Label {
            rect: label.rect.map_points(|[x, y]| {
                [
                    rounding.apply(x * new_w / orig_w),
                    rounding.apply(y * new_h / orig_h),
                ]
            }),
            class: label.class,
        })
        .collect()
}

/// Mirror boxes on an image `image_width` wide, `x' = image_width - x`.
///
/// Results are not clamped to `[0, image_width]`, so a coordinate lying
/// outside the image stays outside on the other side.
pub fn flip_boxes_horizontal(boxes: &[OrientedBox], image_width: usize) -> Vec<OrientedBox> {
    let flip = Transform::flip_horizontal(image_width as f64);
    boxes.iter().map(|label| &flip * label).collect()
}

/// Read boxes from a dense `(N, 9)` array whose last column holds class labels.
pub fn boxes_from_array(array: ArrayView2<f64>) -> Result<Vec<OrientedBox>> {
    let (_, n_cols) = array.dim();
    if n_cols != BOX_COLUMNS {
        return Err(PreprocessError::InvalidShape(format!(
            "box array must have {} columns, but get {}",
            BOX_COLUMNS, n_cols
        ))
        .into());
    }

    array
        .outer_iter()
        .map(|row| -> Result<_> {
            let class = row[8];
            if !(class.is_finite() && class >= 0.0 && class.fract() == 0.0) {
                return Err(PreprocessError::InvalidLabel(class).into());
            }
            let coords = [
                row[0], row[1], row[2], row[3], row[4], row[5], row[6], row[7],
            ];
            Ok(Label {
                rect: Quad::from_xy8(coords),
                class: class as usize,
            })
        })
        .try_collect()
}

/// Write boxes into a dense `(N, 9)` array.
pub fn boxes_to_array(boxes: &[OrientedBox]) -> Array2<f64> {
    let mut array = Array2::zeros((boxes.len(), BOX_COLUMNS));
    array
        .outer_iter_mut()
        .zip(boxes)
        .for_each(|(mut row, label)| {
            label
                .rect
                .to_xy8()
                .iter()
                .enumerate()
                .for_each(|(col, &value)| row[col] = value);
            row[8] = label.class as f64;
        });
    array
}
