use foundation::{Aabb2, Vec2};

/// Minimum camera scale: never zooms out past the overview.
pub const MIN_SCALE: f64 = 1.0;

/// Maximum camera scale: caps zoom on tiny regions.
pub const MAX_SCALE: f64 = 8.0;

/// Fraction of the viewport left free around a framed region.
pub const DEFAULT_PADDING: f64 = 0.12;

/// Camera transform over the rendered map: pixel coordinates are scaled
/// then translated. Derived state, recomputed on demand.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    pub translate: Vec2,
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };

    pub fn new(scale: f64, translate: Vec2) -> Self {
        Self { scale, translate }
    }

    /// Transform framing `bounds` centered in a viewport, with `padding`
    /// of the viewport kept free.
    ///
    /// Scale is `(1 - padding) / max(bw/vw, bh/vh)` hard-clamped to
    /// `[MIN_SCALE, MAX_SCALE]`: a region already larger than the padded
    /// viewport pins to the overview scale instead of zooming out, and a
    /// tiny region cannot zoom past the cap.
    pub fn frame(bounds: Aabb2, viewport_w: f64, viewport_h: f64, padding: f64) -> Self {
        let ratio = (bounds.width() / viewport_w).max(bounds.height() / viewport_h);
        let scale = ((1.0 - padding) / ratio).clamp(MIN_SCALE, MAX_SCALE);

        let center = bounds.center();
        let translate = Vec2::new(
            viewport_w / 2.0 - scale * center.x,
            viewport_h / 2.0 - scale * center.y,
        );
        Self { scale, translate }
    }

    /// Maps an untransformed pixel position into camera space.
    pub fn apply(&self, p: Vec2) -> Vec2 {
        self.translate + p * self.scale
    }

    /// Interpolation used by the animation driver; `t` is pre-eased.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            scale: self.scale + (other.scale - self.scale) * t,
            translate: self.translate.lerp(other.translate, t),
        }
    }
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use foundation::{Aabb2, Vec2};
    use pretty_assertions::assert_eq;

    use super::{MAX_SCALE, ViewportTransform};

    fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Aabb2 {
        Aabb2::new(Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    #[test]
    fn oversized_bounds_pin_to_overview_scale() {
        // Region twice the viewport on both axes: the raw factor would be
        // 0.44, pinned to 1 instead of zooming out.
        let t = ViewportTransform::frame(bounds(0.0, 0.0, 1000.0, 1000.0), 500.0, 500.0, 0.12);
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn tiny_bounds_cap_at_max_scale() {
        let t = ViewportTransform::frame(bounds(100.0, 100.0, 110.0, 110.0), 500.0, 500.0, 0.12);
        assert_eq!(t.scale, MAX_SCALE);
    }

    #[test]
    fn framed_bounds_center_lands_on_viewport_center() {
        let b = bounds(40.0, 80.0, 240.0, 180.0);
        let t = ViewportTransform::frame(b, 800.0, 600.0, 0.12);
        assert_eq!(t.apply(b.center()), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn padding_shrinks_the_framed_region() {
        let b = bounds(0.0, 0.0, 100.0, 100.0);
        let padded = ViewportTransform::frame(b, 800.0, 800.0, 0.12);
        let tight = ViewportTransform::frame(b, 800.0, 800.0, 0.0);
        assert!(padded.scale < tight.scale);
        assert!((padded.scale - 7.04).abs() < 1e-9);
        assert_eq!(tight.scale, 8.0);
    }

    #[test]
    fn lerp_hits_both_endpoints() {
        let a = ViewportTransform::IDENTITY;
        let b = ViewportTransform::new(4.0, Vec2::new(-100.0, 60.0));
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid.scale, 2.5);
        assert_eq!(mid.translate, Vec2::new(-50.0, 30.0));
    }
}
