//! Pixel Sizes
//!
//! Integer width/height pairs and the scale arithmetic shared by both
//! quantization strategies.

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two dimensions
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }

    /// True when either dimension is zero (a hidden element's box)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// True when this size is at least `other` in both dimensions
    pub fn covers(&self, other: Size) -> bool {
        self.width >= other.width && self.height >= other.height
    }

    /// Width-to-height ratio
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Component-wise minimum with `max`
    pub fn clamp_to(&self, max: Size) -> Size {
        Size::new(self.width.min(max.width), self.height.min(max.height))
    }
}

/// Divide both dimensions by `scale`, truncating toward zero.
///
/// Truncation (not rounding) is load-bearing: the two quantization
/// strategies differ only in where this truncation happens.
pub fn scale_size(size: Size, scale: f64) -> Size {
    Size::new(
        (size.width as f64 / scale) as u32,
        (size.height as f64 / scale) as u32,
    )
}

/// Coefficient that grows an image of `size` by `step` pixels along its
/// smaller dimension. Larger originals therefore take bigger absolute
/// steps, keeping the bucket count roughly constant across resolutions.
///
/// `size.min_side()` must be non-zero.
pub fn scale_from_step(size: Size, step: u32) -> f64 {
    let d = size.min_side() as f64;
    (d + step as f64) / d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers() {
        let a = Size::new(100, 50);
        assert!(a.covers(Size::new(100, 50)));
        assert!(a.covers(Size::new(99, 50)));
        assert!(!a.covers(Size::new(101, 50)));
        assert!(!a.covers(Size::new(100, 51)));
    }

    #[test]
    fn test_scale_size_truncates() {
        // 100 / 1.1 = 90.909..., truncates to 90
        let scaled = scale_size(Size::new(100, 100), 1.1);
        assert_eq!(scaled, Size::new(90, 90));
    }

    #[test]
    fn test_scale_from_step() {
        // min side 500, step 50 -> 1.1
        let scale = scale_from_step(Size::new(1000, 500), 50);
        assert!((scale - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_to() {
        let clamped = Size::new(900, 400).clamp_to(Size::new(800, 600));
        assert_eq!(clamped, Size::new(800, 400));
    }

    #[test]
    fn test_is_empty() {
        assert!(Size::new(0, 100).is_empty());
        assert!(Size::new(100, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }
}
