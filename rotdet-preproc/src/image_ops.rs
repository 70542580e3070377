//! Pixel-space transforms on HWC `f32` images.

use crate::{common::*, error::PreprocessError};
use image::RgbImage;

/// Get the spatial size of an HWC image, rejecting zero-sized images.
pub fn image_size(image: &ArrayView3<f32>) -> Result<HW<usize>> {
    let (height, width, channels) = image.dim();
    if height == 0 || width == 0 || channels == 0 {
        return Err(PreprocessError::DegenerateInput(format!(
            "image must have non-zero size, but get {}x{}x{}",
            height, width, channels
        ))
        .into());
    }
    Ok(HW::from_hw([height, width]))
}

/// Convert a dynamically shaped array into an HWC image.
///
/// A 2D `(H, W)` array is treated as a single-channel image.
pub fn image_from_dyn(array: ArrayD<f32>) -> Result<Array3<f32>> {
    let array = match array.ndim() {
        2 => array.insert_axis(Axis(2)),
        3 => array,
        ndim => {
            return Err(PreprocessError::InvalidShape(format!(
                "image must have shape [height, width] or [height, width, channels], but get {} dimensions",
                ndim
            ))
            .into())
        }
    };
    let image = array
        .into_dimensionality::<Ix3>()
        .map_err(|err| PreprocessError::InvalidShape(err.to_string()))?;
    Ok(image)
}

/// Source sampling positions along one axis.
///
/// Output pixel `i` samples input position `i * in_len / out_len`, with corners
/// unaligned. Each entry holds the lower index, the upper index, and the weight
/// of the upper index.
fn sampling_table(in_len: usize, out_len: usize) -> Vec<(usize, usize, f32)> {
    let scale = in_len as f32 / out_len as f32;
    (0..out_len)
        .map(|index| {
            let pos = index as f32 * scale;
            let lower = (pos.floor() as usize).min(in_len - 1);
            let upper = (lower + 1).min(in_len - 1);
            (lower, upper, pos - lower as f32)
        })
        .collect()
}

/// Resample an image to `new_h` by `new_w` with bilinear interpolation.
///
/// The channel count is unchanged. The input is never modified.
pub fn resize_bilinear(image: ArrayView3<f32>, new_h: usize, new_w: usize) -> Result<Array3<f32>> {
    let size = image_size(&image)?;
    if new_h == 0 || new_w == 0 {
        return Err(PreprocessError::DegenerateInput(format!(
            "resize target must have non-zero size, but get {}x{}",
            new_h, new_w
        ))
        .into());
    }

    let channels = image.dim().2;
    let rows = sampling_table(size.h(), new_h);
    let cols = sampling_table(size.w(), new_w);

    let output = Array3::from_shape_fn((new_h, new_w, channels), |(y, x, c)| {
        let (y0, y1, dy) = rows[y];
        let (x0, x1, dx) = cols[x];

        let top = image[[y0, x0, c]] * (1.0 - dx) + image[[y0, x1, c]] * dx;
        let bottom = image[[y1, x0, c]] * (1.0 - dx) + image[[y1, x1, c]] * dx;
        top * (1.0 - dy) + bottom * dy
    });

    Ok(output)
}

/// Reverse the column order of an image.
pub fn flip_left_right(image: ArrayView3<f32>) -> Array3<f32> {
    image.slice(s![.., ..;-1, ..]).to_owned()
}

/// Convert an 8-bit RGB image to an HWC `f32` array with values in `0..=255`.
pub fn from_rgb_image(image: &RgbImage) -> Result<Array3<f32>> {
    let (width, height) = image.dimensions();
    let values: Vec<f32> = image.as_raw().iter().map(|&value| value as f32).collect();
    let array = Array3::from_shape_vec((height as usize, width as usize, 3), values)?;
    Ok(array)
}

/// Convert an HWC `f32` array back to an 8-bit RGB image, clamping to `0..=255`.
pub fn to_rgb_image(image: ArrayView3<f32>) -> Result<RgbImage> {
    let (height, width, channels) = image.dim();
    ensure!(
        channels == 3,
        "channel size must be 3, but get {}",
        channels
    );

    let values: Vec<u8> = image
        .iter()
        .map(|&value| value.round().clamp(0.0, 255.0) as u8)
        .collect();
    RgbImage::from_raw(width as u32, height as u32, values)
        .ok_or_else(|| format_err!("pixel buffer does not match {}x{}", height, width))
}
