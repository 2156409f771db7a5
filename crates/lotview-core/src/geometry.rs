//! Display/native coordinate mapping for a letterboxed camera frame.
//!
//! The frame is rendered with "contain" semantics: scaled to the largest
//! size that fits the container while preserving aspect ratio, centered on
//! the axis with slack. Regions are stored in the frame's native pixel
//! space so they stay valid regardless of how the frame is scaled
//! on screen.

use crate::error::{LotviewError, Result};

/// On-screen rendering box, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// True pixel dimensions of the source frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeSize {
    pub width: f64,
    pub height: f64,
}

impl NativeSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A point in either coordinate space; which one is determined by context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in display pixels, relative to the viewport
/// origin (not the letterboxed image origin).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl DisplayRect {
    /// Normalize two arbitrary corner points into a rectangle with
    /// non-negative extent.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            w: (b.x - a.x).abs(),
            h: (b.y - a.y).abs(),
        }
    }
}

/// "Contain" fit of a native frame into a viewport.
///
/// Derived, read-only: recompute (and fully replace) whenever the viewport
/// resizes or the native dimensions become known. Mapping laws:
/// `native = (display - offset) * scale` and
/// `display = native / scale + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    display_width: f64,
    display_height: f64,
}

impl FitTransform {
    /// Compute the contain fit for `native` inside `viewport`.
    ///
    /// Exactly one branch applies: a relatively wider container constrains
    /// the image by height (horizontal letterbox bars), otherwise by width.
    /// The unused offset axis is exactly zero. Both scales are equal in
    /// value since aspect is preserved, but kept as independent fields.
    pub fn contain(viewport: Viewport, native: NativeSize) -> Result<Self> {
        if !(viewport.width.is_finite() && viewport.height.is_finite())
            || viewport.width <= 0.0
            || viewport.height <= 0.0
        {
            return Err(LotviewError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if !(native.width.is_finite() && native.height.is_finite())
            || native.width <= 0.0
            || native.height <= 0.0
        {
            return Err(LotviewError::InvalidNativeSize {
                width: native.width,
                height: native.height,
            });
        }

        let container_ratio = viewport.width / viewport.height;
        let img_ratio = native.width / native.height;

        let (display_width, display_height, offset_x, offset_y) = if container_ratio > img_ratio {
            // Height-constrained: bars left and right.
            let display_height = viewport.height;
            let display_width = display_height * img_ratio;
            (
                display_width,
                display_height,
                (viewport.width - display_width) / 2.0,
                0.0,
            )
        } else {
            // Width-constrained: bars top and bottom.
            let display_width = viewport.width;
            let display_height = display_width / img_ratio;
            (
                display_width,
                display_height,
                0.0,
                (viewport.height - display_height) / 2.0,
            )
        };

        Ok(Self {
            scale_x: native.width / display_width,
            scale_y: native.height / display_height,
            offset_x,
            offset_y,
            display_width,
            display_height,
        })
    }

    /// The rectangle the image actually occupies on screen, relative to the
    /// viewport origin.
    pub fn display_rect(&self) -> DisplayRect {
        DisplayRect {
            x: self.offset_x,
            y: self.offset_y,
            w: self.display_width,
            h: self.display_height,
        }
    }

    /// Map a display-space point to native pixel space.
    pub fn to_native(&self, display: Point) -> Point {
        Point {
            x: (display.x - self.offset_x) * self.scale_x,
            y: (display.y - self.offset_y) * self.scale_y,
        }
    }

    /// Map a native-space point back to display space.
    pub fn to_display(&self, native: Point) -> Point {
        Point {
            x: native.x / self.scale_x + self.offset_x,
            y: native.y / self.scale_y + self.offset_y,
        }
    }

    /// Map a display rectangle to native space by mapping its corners
    /// independently. Width and height scale by `scale_x`/`scale_y`
    /// respectively; they are never scaled by a single mixed factor.
    pub fn rect_to_native(&self, rect: DisplayRect) -> (Point, Point) {
        let top_left = self.to_native(Point::new(rect.x, rect.y));
        let bottom_right = self.to_native(Point::new(rect.x + rect.w, rect.y + rect.h));
        (top_left, bottom_right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // Deterministic xorshift, enough spread for property checks.
    struct Rng(u64);

    impl Rng {
        fn next_f64(&mut self) -> f64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }

        fn in_range(&mut self, lo: f64, hi: f64) -> f64 {
            lo + self.next_f64() * (hi - lo)
        }
    }

    #[test]
    fn width_constrained_example() {
        // 800x600 container, 1920x1080 frame: image ratio 1.778 beats
        // container ratio 1.333, so the width is the constraint.
        let t = FitTransform::contain(
            Viewport::new(800.0, 600.0),
            NativeSize::new(1920.0, 1080.0),
        )
        .unwrap();

        assert_relative_eq!(t.scale_x, 2.4, epsilon = 1e-9);
        assert_relative_eq!(t.scale_y, 2.4, epsilon = 1e-9);
        assert_relative_eq!(t.offset_x, 0.0);
        assert_relative_eq!(t.offset_y, 75.0, epsilon = 1e-9);

        let rect = t.display_rect();
        assert_relative_eq!(rect.w, 800.0);
        assert_relative_eq!(rect.h, 450.0, epsilon = 1e-9);
    }

    #[test]
    fn height_constrained_example() {
        // Wide container, tall image: bars on the sides, vertical offset 0.
        let t = FitTransform::contain(
            Viewport::new(1600.0, 600.0),
            NativeSize::new(1080.0, 1080.0),
        )
        .unwrap();

        assert_relative_eq!(t.offset_y, 0.0);
        assert_relative_eq!(t.offset_x, 500.0, epsilon = 1e-9);
        assert_relative_eq!(t.scale_x, 1080.0 / 600.0, epsilon = 1e-9);
    }

    #[test]
    fn exactly_one_offset_axis_is_zero() {
        let mut rng = Rng(0x5eed_1234);
        for _ in 0..20 {
            let viewport = Viewport::new(rng.in_range(100.0, 3000.0), rng.in_range(100.0, 3000.0));
            let native = NativeSize::new(rng.in_range(100.0, 4000.0), rng.in_range(100.0, 4000.0));
            let t = FitTransform::contain(viewport, native).unwrap();

            assert!(
                t.offset_x == 0.0 || t.offset_y == 0.0,
                "one offset axis must be exactly zero: {t:?}"
            );
            assert!(t.offset_x >= 0.0 && t.offset_y >= 0.0);
        }
    }

    #[test]
    fn round_trip_within_tolerance() {
        let mut rng = Rng(0xdead_beef);
        for _ in 0..20 {
            let viewport = Viewport::new(rng.in_range(200.0, 2000.0), rng.in_range(200.0, 2000.0));
            let native = NativeSize::new(rng.in_range(320.0, 4096.0), rng.in_range(240.0, 2160.0));
            let t = FitTransform::contain(viewport, native).unwrap();

            for _ in 0..100 {
                let p = Point::new(
                    rng.in_range(0.0, viewport.width),
                    rng.in_range(0.0, viewport.height),
                );
                let back = t.to_display(t.to_native(p));
                assert_relative_eq!(back.x, p.x, epsilon = crate::consts::ROUND_TRIP_EPSILON);
                assert_relative_eq!(back.y, p.y, epsilon = crate::consts::ROUND_TRIP_EPSILON);
            }
        }
    }

    #[test]
    fn scales_are_equal_on_both_axes() {
        let t = FitTransform::contain(
            Viewport::new(1024.0, 768.0),
            NativeSize::new(640.0, 480.0),
        )
        .unwrap();
        assert_relative_eq!(t.scale_x, t.scale_y, epsilon = 1e-12);
    }

    #[test]
    fn rect_from_corners_normalizes() {
        let r = DisplayRect::from_corners(Point::new(140.0, 100.0), Point::new(100.0, 130.0));
        assert_relative_eq!(r.x, 100.0);
        assert_relative_eq!(r.y, 100.0);
        assert_relative_eq!(r.w, 40.0);
        assert_relative_eq!(r.h, 30.0);
    }

    #[test]
    fn rect_to_native_maps_corners_independently() {
        let t = FitTransform::contain(
            Viewport::new(800.0, 600.0),
            NativeSize::new(1920.0, 1080.0),
        )
        .unwrap();
        let rect = DisplayRect::from_corners(Point::new(100.0, 100.0), Point::new(140.0, 130.0));
        let (tl, br) = t.rect_to_native(rect);

        assert_relative_eq!(tl.x, 240.0, epsilon = 1e-9);
        assert_relative_eq!(tl.y, 60.0, epsilon = 1e-9);
        assert_relative_eq!(br.x - tl.x, 96.0, epsilon = 1e-9);
        assert_relative_eq!(br.y - tl.y, 72.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_dimensions_are_rejected() {
        assert!(FitTransform::contain(
            Viewport::new(0.0, 600.0),
            NativeSize::new(1920.0, 1080.0)
        )
        .is_err());
        assert!(FitTransform::contain(
            Viewport::new(800.0, 600.0),
            NativeSize::new(1920.0, f64::NAN)
        )
        .is_err());
    }
}
