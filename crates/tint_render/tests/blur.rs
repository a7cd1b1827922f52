mod common;

use common::synthetic_image::{checkerboard_rgba, noise_rgba, reference_blur};
use tint_render::{blurred, gaussian_blur, GaussianKernel, PixelBuffer};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn separable_blur_matches_direct_convolution() {
    init_logger();
    for (radius, seed) in [(0.5, 1), (1.0, 2), (2.0, 3)] {
        let image = noise_rgba(5, 5, seed);
        let kernel = GaussianKernel::from_radius(radius);
        let expected = reference_blur(&image, kernel.weights());
        let actual = blurred(&image, radius);

        for (i, (&got, want)) in actual.as_raw().iter().zip(expected).enumerate() {
            assert!(
                (f64::from(got) - want).abs() <= 1.0,
                "radius {radius}: channel {i} got {got}, want {want:.3}"
            );
        }
    }
}

#[test]
fn separable_blur_matches_on_wide_image() {
    let image = noise_rgba(17, 4, 42);
    let kernel = GaussianKernel::from_radius(1.0);
    let expected = reference_blur(&image, kernel.weights());
    let actual = blurred(&image, 1.0);

    let worst = actual
        .as_raw()
        .iter()
        .zip(&expected)
        .map(|(&got, want)| (f64::from(got) - want).abs())
        .fold(0.0, f64::max);
    assert!(worst <= 1.0, "max deviation {worst}");
}

#[test]
fn uniform_color_survives_every_radius() {
    init_logger();
    for radius in [0.5, 1.0, 2.0, 3.3, 10.0] {
        let mut image = PixelBuffer::filled(10, 10, [100, 100, 100, 255]).unwrap();
        gaussian_blur(&mut image, radius);
        assert!(
            image.as_raw().chunks(4).all(|px| px == [100, 100, 100, 255]),
            "radius {radius} changed a uniform image"
        );
    }
}

#[test]
fn dimensions_are_preserved() {
    for (w, h) in [(1, 1), (3, 9), (16, 2), (31, 17)] {
        let image = noise_rgba(w, h, u64::from(w * h));
        let out = blurred(&image, 2.0);
        assert_eq!((out.width(), out.height()), (w, h));
        assert_eq!(out.as_raw().len(), image.as_raw().len());
    }
}

#[test]
fn zero_radius_returns_input() {
    let image = noise_rgba(6, 6, 7);
    assert_eq!(blurred(&image, 0.0), image);
    assert_eq!(blurred(&image, 0.33), image);
}

#[test]
fn blur_reduces_checkerboard_contrast() {
    let image = checkerboard_rgba(16, 16, 1, [0, 0, 0, 255], [255, 255, 255, 255]);
    let out = blurred(&image, 1.0);

    for px in out.as_raw().chunks(4) {
        assert!(px[0] > 60 && px[0] < 195, "pixel not smoothed: {px:?}");
        assert_eq!(px[3], 255);
    }
}
