use foundation::Vec2;

use crate::transform::{MAX_SCALE, MIN_SCALE, ViewportTransform};

/// Duration of the animated zoom onto a framed region (milliseconds).
pub const ZOOM_TO_REGION_MS: f64 = 700.0;

/// Duration of the animated reset to the overview (milliseconds).
pub const RESET_MS: f64 = 500.0;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Animation {
    from: ViewportTransform,
    to: ViewportTransform,
    elapsed_ms: f64,
    duration_ms: f64,
}

/// Camera state for panning and zooming the rendered map.
///
/// Programmatic animation and gesture input mutate the same transform, so
/// the two can never disagree: starting an animation replaces any gesture
/// result as the in-flight target, and a gesture cancels an in-flight
/// animation before applying.
///
/// Animations are time-based; the owner advances them with `tick`. A new
/// `animate_to` always cancels the in-flight one (last caller wins, no
/// queueing).
#[derive(Debug, Clone, Default)]
pub struct Camera {
    current: ViewportTransform,
    animation: Option<Animation>,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> ViewportTransform {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Starts interpolating toward `target`. A non-positive duration jumps
    /// immediately.
    pub fn animate_to(&mut self, target: ViewportTransform, duration_ms: f64) {
        if duration_ms <= 0.0 {
            self.current = target;
            self.animation = None;
            return;
        }
        self.animation = Some(Animation {
            from: self.current,
            to: target,
            elapsed_ms: 0.0,
            duration_ms,
        });
    }

    /// Animates back to the identity (overview) transform.
    pub fn reset(&mut self) {
        self.animate_to(ViewportTransform::IDENTITY, RESET_MS);
    }

    /// Advances the in-flight animation, if any. Completion snaps exactly
    /// onto the target transform.
    pub fn tick(&mut self, dt_ms: f64) {
        let Some(anim) = &mut self.animation else {
            return;
        };
        anim.elapsed_ms += dt_ms.max(0.0);

        if anim.elapsed_ms >= anim.duration_ms {
            self.current = anim.to;
            self.animation = None;
            return;
        }

        let t = ease_cubic_in_out(anim.elapsed_ms / anim.duration_ms);
        self.current = anim.from.lerp(anim.to, t);
    }

    /// Gesture pan: shifts the view by a pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.animation = None;
        self.current.translate = self.current.translate + Vec2::new(dx, dy);
    }

    /// Gesture zoom about a viewport point (wheel/pinch origin). The point
    /// under the pointer stays fixed; scale stays within the camera bound.
    pub fn zoom_about(&mut self, origin: Vec2, factor: f64) {
        self.animation = None;

        let old = self.current.scale;
        let new = (old * factor).clamp(MIN_SCALE, MAX_SCALE);
        if new == old {
            return;
        }

        let ratio = new / old;
        self.current.translate = origin - (origin - self.current.translate) * ratio;
        self.current.scale = new;
    }
}

/// Symmetric cubic easing for zoom transitions.
fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        (t * t * t) / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use foundation::Vec2;
    use pretty_assertions::assert_eq;

    use super::{Camera, ease_cubic_in_out};
    use crate::transform::ViewportTransform;

    fn target() -> ViewportTransform {
        ViewportTransform::new(4.0, Vec2::new(-320.0, -120.0))
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_cubic_in_out(0.0), 0.0);
        assert_eq!(ease_cubic_in_out(0.5), 0.5);
        assert_eq!(ease_cubic_in_out(1.0), 1.0);
    }

    #[test]
    fn animation_reaches_target_exactly() {
        let mut cam = Camera::new();
        cam.animate_to(target(), 700.0);
        assert!(cam.is_animating());

        for _ in 0..6 {
            cam.tick(100.0);
        }
        assert!(cam.is_animating());
        cam.tick(100.0);
        assert_eq!(cam.transform(), target());
        assert!(!cam.is_animating());
    }

    #[test]
    fn overshooting_tick_still_snaps_to_target() {
        let mut cam = Camera::new();
        cam.animate_to(target(), 700.0);
        cam.tick(10_000.0);
        assert_eq!(cam.transform(), target());
    }

    #[test]
    fn midway_transform_is_eased_between_endpoints() {
        let mut cam = Camera::new();
        cam.animate_to(target(), 700.0);
        cam.tick(350.0);
        let t = cam.transform();
        assert_eq!(t.scale, 1.0 + (4.0 - 1.0) * 0.5);
        assert_eq!(t.translate, Vec2::new(-160.0, -60.0));
    }

    #[test]
    fn new_animation_replaces_in_flight_one() {
        let mut cam = Camera::new();
        cam.animate_to(target(), 700.0);
        cam.tick(350.0);
        let midway = cam.transform();

        let second = ViewportTransform::new(2.0, Vec2::new(50.0, 50.0));
        cam.animate_to(second, 500.0);
        // The replacement starts from the interrupted state, not from the
        // first animation's origin or target.
        cam.tick(0.0);
        assert_eq!(cam.transform(), midway);
        cam.tick(500.0);
        assert_eq!(cam.transform(), second);
    }

    #[test]
    fn reset_animates_to_identity() {
        let mut cam = Camera::new();
        cam.animate_to(target(), 0.0);
        cam.reset();
        assert!(cam.is_animating());
        cam.tick(500.0);
        assert_eq!(cam.transform(), ViewportTransform::IDENTITY);
    }

    #[test]
    fn zero_duration_jumps_without_animation() {
        let mut cam = Camera::new();
        cam.animate_to(target(), 0.0);
        assert!(!cam.is_animating());
        assert_eq!(cam.transform(), target());
    }

    #[test]
    fn gestures_cancel_in_flight_animation() {
        let mut cam = Camera::new();
        cam.animate_to(target(), 700.0);
        cam.pan_by(10.0, -5.0);
        assert!(!cam.is_animating());
        assert_eq!(cam.transform().translate, Vec2::new(10.0, -5.0));

        cam.animate_to(target(), 700.0);
        cam.zoom_about(Vec2::new(100.0, 100.0), 2.0);
        assert!(!cam.is_animating());
    }

    #[test]
    fn programmatic_animation_overrides_gesture_state() {
        let mut cam = Camera::new();
        cam.zoom_about(Vec2::new(200.0, 150.0), 3.0);
        cam.animate_to(ViewportTransform::IDENTITY, 100.0);
        cam.tick(100.0);
        assert_eq!(cam.transform(), ViewportTransform::IDENTITY);
    }

    #[test]
    fn zoom_about_keeps_the_origin_fixed() {
        let mut cam = Camera::new();
        let origin = Vec2::new(240.0, 180.0);
        // The map point currently under the origin.
        let map_point = Vec2::new(240.0, 180.0);
        cam.zoom_about(origin, 2.0);
        assert_eq!(cam.transform().apply(map_point), origin);
        assert_eq!(cam.transform().scale, 2.0);
    }

    #[test]
    fn zoom_out_clamps_at_overview_scale() {
        let mut cam = Camera::new();
        cam.zoom_about(Vec2::ZERO, 0.25);
        assert_eq!(cam.transform(), ViewportTransform::IDENTITY);
    }
}
