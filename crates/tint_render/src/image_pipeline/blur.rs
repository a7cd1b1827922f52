use log::debug;

use super::buffer::{PixelBuffer, CHANNELS};
use super::kernel::GaussianKernel;

#[derive(Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Blurs `buffer` in place with a separable Gaussian of strength `radius`.
///
/// Taps falling outside the image are dropped and the remaining weights renormalised,
/// so borders keep their brightness.
pub fn gaussian_blur(buffer: &mut PixelBuffer, radius: f32) {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;

    // Taps further out than the longest axis never land inside the image.
    let kernel = GaussianKernel::from_radius_within(radius, width.max(height) - 1);
    if kernel.is_identity() {
        return;
    }

    debug!("gaussian blur {}x{} with {} taps", width, height, kernel.len());

    let source: Vec<f32> = buffer.as_raw().iter().map(|&v| f32::from(v)).collect();
    let horizontal = convolve(&source, width, height, &kernel, Axis::Horizontal);
    let vertical = convolve(&horizontal, width, height, &kernel, Axis::Vertical);

    for (dst, value) in buffer.as_raw_mut().iter_mut().zip(vertical) {
        *dst = quantize(value);
    }
}

/// Blurred copy of `buffer`; the input is left untouched.
pub fn blurred(buffer: &PixelBuffer, radius: f32) -> PixelBuffer {
    let mut output = buffer.clone();
    gaussian_blur(&mut output, radius);
    output
}

fn convolve(
    input: &[f32],
    width: usize,
    height: usize,
    kernel: &GaussianKernel,
    axis: Axis,
) -> Vec<f32> {
    let mut output = vec![0.0; input.len()];
    let reach = kernel.half_width() as isize;
    let weights = kernel.weights();

    for y in 0..height {
        for x in 0..width {
            let (position, limit) = match axis {
                Axis::Horizontal => (x as isize, width as isize),
                Axis::Vertical => (y as isize, height as isize),
            };

            let mut accum = [0.0f32; CHANNELS];
            let mut gauss_sum = 0.0f32;

            for offset in -reach..=reach {
                let k = position + offset;
                if k < 0 || k >= limit {
                    continue;
                }

                let idx = match axis {
                    Axis::Horizontal => (y * width + k as usize) * CHANNELS,
                    Axis::Vertical => (k as usize * width + x) * CHANNELS,
                };
                let w = weights[(offset + reach) as usize];
                for channel in 0..CHANNELS {
                    accum[channel] += input[idx + channel] * w;
                }
                gauss_sum += w;
            }

            // The centre tap is always in range, so gauss_sum is positive.
            let idx = (y * width + x) * CHANNELS;
            for channel in 0..CHANNELS {
                output[idx + channel] = accum[channel] / gauss_sum;
            }
        }
    }

    output
}

/// Rounds half to even and clamps into the byte range.
#[inline]
fn quantize(value: f32) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}
