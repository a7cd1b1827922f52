use std::f32::consts::PI;

/// One-dimensional Gaussian weights, centred on `half_width`.
///
/// Weights are not normalised; the convolution divides by the sum of the taps that
/// actually fall inside the image.
#[derive(Clone, Debug, PartialEq)]
pub struct GaussianKernel {
    weights: Vec<f32>,
    half_width: usize,
}

impl GaussianKernel {
    /// Builds the kernel for a blur strength `radius`.
    ///
    /// The half width is `floor(radius * 3)` and the standard deviation a third of that, so
    /// `radius` roughly tracks sigma. Radii that resolve to a zero half width, including
    /// negative and non-finite ones, give the identity kernel `[1.0]`.
    pub fn from_radius(radius: f32) -> Self {
        Self::from_radius_within(radius, usize::MAX)
    }

    /// Same weights as [`from_radius`](Self::from_radius), evaluated only for offsets up to
    /// `max_reach`.
    ///
    /// Sigma still follows the full `floor(radius * 3)` half width, so the kept taps are
    /// identical to the centre of the untruncated kernel.
    pub fn from_radius_within(radius: f32, max_reach: usize) -> Self {
        let scaled = (radius * 3.0).floor();
        if !scaled.is_finite() || scaled < 1.0 {
            return Self::identity();
        }

        let half_width = (scaled as usize).min(max_reach);
        if half_width == 0 {
            return Self::identity();
        }

        let sigma = scaled / 3.0;
        let a = 1.0 / ((2.0 * PI).sqrt() * sigma);
        let b = -1.0 / (2.0 * sigma * sigma);

        let reach = half_width as isize;
        let weights = (-reach..=reach)
            .map(|offset| {
                let offset = offset as f32;
                a * (b * offset * offset).exp()
            })
            .collect();

        Self { weights, half_width }
    }

    pub fn identity() -> Self {
        Self { weights: vec![1.0], half_width: 0 }
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn half_width(&self) -> usize {
        self.half_width
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.half_width == 0
    }

    /// Weight for a signed tap offset, `None` outside `[-half_width, half_width]`.
    pub fn weight(&self, offset: isize) -> Option<f32> {
        let index = offset.checked_add(self.half_width as isize)?;
        usize::try_from(index).ok().and_then(|index| self.weights.get(index).copied())
    }
}
