use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tint_render::PixelBuffer;

/// Deterministic noise image, so failures reproduce.
pub fn noise_rgba(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height * 4).map(|_| rng.gen::<u8>()).collect();
    PixelBuffer::new(width, height, data).expect("noise dimensions are valid")
}

/// Alternating `dark`/`light` squares of `cell` pixels.
pub fn checkerboard_rgba(
    width: u32,
    height: u32,
    cell: u32,
    dark: [u8; 4],
    light: [u8; 4],
) -> PixelBuffer {
    assert!(cell > 0, "cell size must be positive");

    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let color = if (x / cell + y / cell) % 2 == 0 { dark } else { light };
            data.extend_from_slice(&color);
        }
    }
    PixelBuffer::new(width, height, data).expect("checkerboard dimensions are valid")
}

/// Direct 2-D Gaussian convolution with the same border renormalisation as the separable blur.
pub fn reference_blur(buffer: &PixelBuffer, weights: &[f32]) -> Vec<f64> {
    let width = buffer.width() as isize;
    let height = buffer.height() as isize;
    let reach = (weights.len() / 2) as isize;
    let mut out = Vec::with_capacity(buffer.as_raw().len());

    for y in 0..height {
        for x in 0..width {
            let mut accum = [0.0f64; 4];
            let mut weight_sum = 0.0f64;
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    let (sx, sy) = (x + dx, y + dy);
                    if sx < 0 || sx >= width || sy < 0 || sy >= height {
                        continue;
                    }
                    let w = f64::from(weights[(dx + reach) as usize])
                        * f64::from(weights[(dy + reach) as usize]);
                    let px = buffer.pixel(sx as usize, sy as usize);
                    for (acc, value) in accum.iter_mut().zip(px) {
                        *acc += f64::from(value) * w;
                    }
                    weight_sum += w;
                }
            }
            out.extend(accum.iter().map(|v| v / weight_sum));
        }
    }
    out
}
