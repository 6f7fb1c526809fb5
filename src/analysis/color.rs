//! Colour sampling and colour distance
//!
//! Regions are summarised by their per-channel quadratic mean, which weights
//! brighter pixels more heavily than an arithmetic mean would.

use image::{Rgb, RgbImage};

/// Largest value [`color_distance`] can return (black to white)
pub const MAX_COLOR_DISTANCE: u32 = 441;

/// Per-channel quadratic mean of a whole image
pub fn average_color(image: &RgbImage) -> Rgb<u8> {
    average_color_of_region(image, 0, 0, image.width(), image.height())
}

/// Per-channel quadratic mean of the `width × height` region at `(x0, y0)`
///
/// Each channel is `sqrt(mean(c²))`, rounded to the nearest integer and clamped
/// to `[0, 255]`. Pixels of the region outside the image are skipped; a region
/// with no pixels yields black.
pub fn average_color_of_region(
    image: &RgbImage,
    x0: u32,
    y0: u32,
    width: u32,
    height: u32,
) -> Rgb<u8> {
    let x1 = x0.saturating_add(width).min(image.width());
    let y1 = y0.saturating_add(height).min(image.height());

    let mut squared_sums = [0_u64; 3];
    let mut pixel_count = 0_u64;
    for y in y0..y1 {
        for x in x0..x1 {
            if let Some(Rgb(channels)) = image.get_pixel_checked(x, y) {
                for (sum, &channel) in squared_sums.iter_mut().zip(channels) {
                    *sum += u64::from(channel) * u64::from(channel);
                }
                pixel_count += 1;
            }
        }
    }

    if pixel_count == 0 {
        return Rgb([0, 0, 0]);
    }
    Rgb(squared_sums.map(|sum| quadratic_mean_channel(sum, pixel_count)))
}

fn quadratic_mean_channel(squared_sum: u64, pixel_count: u64) -> u8 {
    let mean = squared_sum as f64 / pixel_count as f64;
    mean.sqrt().round().clamp(0.0, 255.0) as u8
}

/// Euclidean distance between two colours in RGB space, truncated to an integer
///
/// Symmetric, zero only for equal colours, and never above [`MAX_COLOR_DISTANCE`].
pub fn color_distance(a: Rgb<u8>, b: Rgb<u8>) -> u32 {
    let squared: u32 = a
        .0
        .iter()
        .zip(b.0.iter())
        .map(|(&left, &right)| {
            let delta = u32::from(left.abs_diff(right));
            delta * delta
        })
        .sum();

    f64::from(squared).sqrt() as u32
}
