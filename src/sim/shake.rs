//! Camera shake and window shake
//!
//! Both effects share one idle/active state machine: a trigger arms the timer,
//! every update counts it down and draws a fresh random offset whose magnitude
//! follows the effect's curve, and an expired timer snaps the offset back to zero.
//!
//! The curves differ on purpose. Camera shake runs the remaining fraction
//! through an elastic ease-out, which overshoots `intensity` for part of the
//! run. Window shake uses a plain quadratic and never exceeds `intensity`.

use glam::{IVec2, UVec2, Vec2};
use rand::Rng;

use crate::{ease_out_elastic, ease_out_quad_remaining, random_float};

/// Position and size of a monitor in desktop coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorRect {
    pub position: IVec2,
    pub size: UVec2,
}

impl MonitorRect {
    /// Top-left position that centers a window of `window_size` on this monitor
    pub fn centered_origin(&self, window_size: UVec2) -> IVec2 {
        let free = self.size.as_ivec2() - window_size.as_ivec2();
        self.position + free / 2
    }
}

/// The OS window as seen by window shake
pub trait WindowPlacement {
    /// Monitor the window currently lives on, if the platform can tell
    fn monitor(&self) -> Option<MonitorRect>;
    /// Client-area size of the window in pixels
    fn screen_size(&self) -> UVec2;
    /// Move the window's top-left corner
    fn set_position(&mut self, position: IVec2);
}

/// Receiver of camera-shake translation while drawing
pub trait CameraTarget {
    /// Translate everything drawn until `end_mode_2d` by `offset`
    fn begin_mode_2d(&mut self, offset: Vec2);
    fn end_mode_2d(&mut self);
}

/// Shared timer/offset state machine
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Shake {
    intensity: f32,
    duration: f32,
    timer: f32,
    offset: Vec2,
}

impl Shake {
    fn trigger(&mut self, intensity: f32, duration: f32) {
        self.intensity = intensity;
        self.duration = duration;
        self.timer = duration;
    }

    fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R, curve: fn(f32) -> f32) {
        if self.timer <= 0.0 {
            self.offset = Vec2::ZERO;
            return;
        }

        self.timer -= dt;
        if self.timer <= 0.0 {
            self.timer = 0.0;
            self.offset = Vec2::ZERO;
            return;
        }

        let t = self.timer / self.duration;
        let strength = self.intensity * curve(t);
        self.offset = Vec2::new(
            random_float(rng, -strength, strength),
            random_float(rng, -strength, strength),
        );
    }

    fn clear(&mut self) {
        self.timer = 0.0;
        self.offset = Vec2::ZERO;
    }
}

fn elastic_strength(t: f32) -> f32 {
    ease_out_elastic(1.0 - t)
}

/// Render-space shake: translates every draw between `begin` and the end of the scope
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraShake {
    shake: Shake,
}

impl CameraShake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the shake. Restarts the curve from the beginning.
    pub fn trigger(&mut self, intensity: f32, duration: f32) {
        self.shake.trigger(intensity, duration);
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.shake.update(dt, rng, elastic_strength);
    }

    /// Start drawing with the current offset applied. The scope ends on drop.
    pub fn begin<'a, T: CameraTarget>(&self, target: &'a mut T) -> CameraScope<'a, T> {
        target.begin_mode_2d(self.shake.offset);
        CameraScope { target }
    }

    pub fn offset(&self) -> Vec2 {
        self.shake.offset
    }

    pub fn timer(&self) -> f32 {
        self.shake.timer
    }

    pub fn intensity(&self) -> f32 {
        self.shake.intensity
    }

    pub fn duration(&self) -> f32 {
        self.shake.duration
    }

    pub fn is_active(&self) -> bool {
        self.shake.timer > 0.0
    }
}

/// Drawing scope opened by [`CameraShake::begin`]
pub struct CameraScope<'a, T: CameraTarget> {
    target: &'a mut T,
}

impl<T: CameraTarget> CameraScope<'_, T> {
    /// Close the scope explicitly
    pub fn end(self) {}
}

impl<T: CameraTarget> std::ops::Deref for CameraScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.target
    }
}

impl<T: CameraTarget> std::ops::DerefMut for CameraScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut *self.target
    }
}

impl<T: CameraTarget> Drop for CameraScope<'_, T> {
    fn drop(&mut self) {
        self.target.end_mode_2d();
    }
}

/// OS-window shake: moves the real window around its screen-centered anchor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowShake {
    shake: Shake,
    anchor: IVec2,
}

impl WindowShake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the shake and recompute the anchor from the window's monitor.
    ///
    /// `trigger(0.0, 0.0, ..)` only refreshes the anchor. If the monitor is
    /// unknown or the window has no size, the previous anchor is kept.
    pub fn trigger<W: WindowPlacement + ?Sized>(
        &mut self,
        intensity: f32,
        duration: f32,
        window: &W,
    ) {
        self.shake.trigger(intensity, duration);

        let size = window.screen_size();
        match window.monitor() {
            // Minimized windows report a zero size
            Some(monitor) if size.x > 0 && size.y > 0 => {
                self.anchor = monitor.centered_origin(size);
            }
            _ => log::debug!("Window not placeable, keeping anchor at {}", self.anchor),
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.shake.update(dt, rng, ease_out_quad_remaining);
    }

    /// Move the window to `anchor + offset`. Call once per frame.
    pub fn apply<W: WindowPlacement + ?Sized>(&self, window: &mut W) {
        window.set_position(self.position());
    }

    /// Stop shaking and put the window back on its anchor
    pub fn clear<W: WindowPlacement + ?Sized>(&mut self, window: &mut W) {
        self.shake.clear();
        window.set_position(self.anchor);
    }

    /// Where `apply` puts the window (offset truncated toward zero)
    pub fn position(&self) -> IVec2 {
        let offset = self.shake.offset;
        self.anchor + IVec2::new(offset.x as i32, offset.y as i32)
    }

    pub fn anchor(&self) -> IVec2 {
        self.anchor
    }

    pub fn offset(&self) -> Vec2 {
        self.shake.offset
    }

    pub fn timer(&self) -> f32 {
        self.shake.timer
    }

    pub fn intensity(&self) -> f32 {
        self.shake.intensity
    }

    pub fn duration(&self) -> f32 {
        self.shake.duration
    }

    pub fn is_active(&self) -> bool {
        self.shake.timer > 0.0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Highest value `ease_out_elastic` reaches on [0, 1]
    const ELASTIC_PEAK: f32 = 1.374;

    /// Records every move instead of touching a real window
    #[derive(Debug, Default)]
    pub(crate) struct MockWindow {
        pub monitor: Option<MonitorRect>,
        pub size: UVec2,
        pub moves: Vec<IVec2>,
    }

    impl MockWindow {
        pub(crate) fn on_1080p(size: UVec2) -> Self {
            Self {
                monitor: Some(MonitorRect {
                    position: IVec2::ZERO,
                    size: UVec2::new(1920, 1080),
                }),
                size,
                moves: Vec::new(),
            }
        }
    }

    impl WindowPlacement for MockWindow {
        fn monitor(&self) -> Option<MonitorRect> {
            self.monitor
        }

        fn screen_size(&self) -> UVec2 {
            self.size
        }

        fn set_position(&mut self, position: IVec2) {
            self.moves.push(position);
        }
    }

    #[derive(Debug, Default)]
    struct MockCamera {
        offset: Option<Vec2>,
        begins: u32,
        ends: u32,
    }

    impl CameraTarget for MockCamera {
        fn begin_mode_2d(&mut self, offset: Vec2) {
            self.offset = Some(offset);
            self.begins += 1;
        }

        fn end_mode_2d(&mut self) {
            self.offset = None;
            self.ends += 1;
        }
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0xBADC0FFEE)
    }

    #[test]
    fn test_monitor_centering() {
        let monitor = MonitorRect {
            position: IVec2::new(1920, 0),
            size: UVec2::new(2560, 1440),
        };
        assert_eq!(
            monitor.centered_origin(UVec2::new(800, 450)),
            IVec2::new(1920 + 880, 495)
        );
    }

    #[test]
    fn test_camera_idle_by_default() {
        let mut shake = CameraShake::new();
        assert!(!shake.is_active());
        shake.update(0.016, &mut rng());
        assert_eq!(shake.offset(), Vec2::ZERO);
        assert_eq!(shake.timer(), 0.0);
    }

    #[test]
    fn test_camera_trigger_then_expire() {
        let mut rng = rng();
        let mut shake = CameraShake::new();
        shake.trigger(35.0, 0.45);
        assert!(shake.is_active());
        assert_eq!(shake.timer(), 0.45);
        assert_eq!(shake.intensity(), 35.0);
        assert_eq!(shake.duration(), 0.45);

        shake.update(0.1, &mut rng);
        assert!(shake.is_active());
        assert!(shake.offset().x.abs() <= 35.0 * ELASTIC_PEAK);

        for _ in 0..10 {
            shake.update(0.1, &mut rng);
        }
        assert!(!shake.is_active());
        assert_eq!(shake.offset(), Vec2::ZERO);
        assert_eq!(shake.timer(), 0.0);
    }

    #[test]
    fn test_camera_retrigger_restarts_timer() {
        let mut rng = rng();
        let mut shake = CameraShake::new();
        shake.trigger(35.0, 0.45);
        shake.update(0.3, &mut rng);

        shake.trigger(10.0, 1.0);
        assert_eq!(shake.timer(), 1.0);
        assert_eq!(shake.intensity(), 10.0);
        assert_eq!(shake.duration(), 1.0);

        // Fresh curve: zero strength at the very start
        shake.update(0.0, &mut rng);
        assert_eq!(shake.offset(), Vec2::ZERO);
        assert!(shake.is_active());
    }

    #[test]
    fn test_window_retrigger_restarts_timer() {
        let mut rng = rng();
        let window = MockWindow::on_1080p(UVec2::new(800, 450));
        let mut shake = WindowShake::new();
        shake.trigger(25.0, 0.4, &window);
        shake.update(0.3, &mut rng);

        shake.trigger(10.0, 1.0, &window);
        assert_eq!(shake.timer(), 1.0);
        assert_eq!(shake.intensity(), 10.0);
        assert_eq!(shake.duration(), 1.0);

        shake.update(0.0, &mut rng);
        assert_eq!(shake.offset(), Vec2::ZERO);
        assert!(shake.is_active());
    }

    #[test]
    fn test_camera_overshoot_is_allowed() {
        // Remaining fraction t = 0.865 puts the elastic curve at its peak
        let mut rng = rng();
        let mut peak = 0.0f32;
        for _ in 0..200 {
            let mut shake = CameraShake::new();
            shake.trigger(10.0, 1.0);
            shake.update(0.135, &mut rng);
            peak = peak.max(shake.offset().x.abs()).max(shake.offset().y.abs());
        }
        assert!(peak > 10.0, "elastic overshoot never observed: {peak}");
        assert!(peak <= 10.0 * ELASTIC_PEAK);
    }

    #[test]
    fn test_camera_scope_brackets_target() {
        let mut shake = CameraShake::new();
        shake.trigger(5.0, 1.0);
        shake.update(0.5, &mut rng());

        let mut camera = MockCamera::default();
        {
            let scope = shake.begin(&mut camera);
            assert_eq!(scope.offset, Some(shake.offset()));
            assert_eq!(scope.begins, 1);
        }
        assert_eq!(camera.offset, None);
        assert_eq!(camera.ends, 1);

        let scope = shake.begin(&mut camera);
        scope.end();
        assert_eq!(camera.begins, 2);
        assert_eq!(camera.ends, 2);
    }

    #[test]
    fn test_window_degenerate_trigger_sets_anchor_only() {
        let window = MockWindow::on_1080p(UVec2::new(800, 450));
        let mut shake = WindowShake::new();
        shake.trigger(0.0, 0.0, &window);

        assert_eq!(shake.anchor(), IVec2::new(560, 315));
        assert!(!shake.is_active());
        assert_eq!(shake.position(), IVec2::new(560, 315));
        assert!(window.moves.is_empty());
    }

    #[test]
    fn test_window_trigger_keeps_anchor_without_monitor() {
        let mut window = MockWindow::on_1080p(UVec2::new(800, 450));
        let mut shake = WindowShake::new();
        shake.trigger(0.0, 0.0, &window);

        window.monitor = None;
        shake.trigger(25.0, 0.4, &window);
        assert_eq!(shake.anchor(), IVec2::new(560, 315));
        assert!(shake.is_active());
    }

    #[test]
    fn test_window_trigger_keeps_anchor_when_minimized() {
        let mut window = MockWindow::on_1080p(UVec2::new(800, 450));
        let mut shake = WindowShake::new();
        shake.trigger(0.0, 0.0, &window);

        window.size = UVec2::ZERO;
        shake.trigger(25.0, 0.4, &window);
        assert_eq!(shake.anchor(), IVec2::new(560, 315));
    }

    #[test]
    fn test_window_trigger_recomputes_anchor() {
        let mut window = MockWindow::on_1080p(UVec2::new(800, 450));
        let mut shake = WindowShake::new();
        shake.trigger(0.0, 0.0, &window);

        window.monitor = Some(MonitorRect {
            position: IVec2::new(-1280, 0),
            size: UVec2::new(1280, 1024),
        });
        shake.trigger(25.0, 0.4, &window);
        assert_eq!(shake.anchor(), IVec2::new(-1280 + 240, 287));
    }

    #[test]
    fn test_window_apply_moves_to_anchor_plus_offset() {
        let mut window = MockWindow::on_1080p(UVec2::new(800, 450));
        let mut shake = WindowShake::new();
        shake.trigger(25.0, 0.4, &window);
        shake.update(0.2, &mut rng());

        shake.apply(&mut window);
        let offset = shake.offset();
        assert_eq!(
            window.moves,
            vec![IVec2::new(560 + offset.x as i32, 315 + offset.y as i32)]
        );
    }

    #[test]
    fn test_window_clear_restores_anchor() {
        let mut rng = rng();
        let mut window = MockWindow::on_1080p(UVec2::new(800, 450));
        let mut shake = WindowShake::new();
        shake.trigger(25.0, 0.4, &window);
        shake.update(0.3, &mut rng);

        shake.clear(&mut window);
        assert_eq!(shake.offset(), Vec2::ZERO);
        assert_eq!(shake.timer(), 0.0);
        assert_eq!(window.moves.last(), Some(&IVec2::new(560, 315)));
    }

    proptest! {
        #[test]
        fn prop_window_offset_never_exceeds_intensity(
            seed in any::<u64>(),
            intensity in 0.0f32..100.0,
            duration in 0.01f32..2.0,
            steps in proptest::collection::vec(0.0f32..0.1, 1..60),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let window = MockWindow::on_1080p(UVec2::new(800, 450));
            let mut shake = WindowShake::new();
            shake.trigger(intensity, duration, &window);

            for dt in steps {
                shake.update(dt, &mut rng);
                prop_assert!(shake.offset().x.abs() <= intensity);
                prop_assert!(shake.offset().y.abs() <= intensity);
                if shake.timer() <= 0.0 {
                    prop_assert_eq!(shake.offset(), Vec2::ZERO);
                }
            }
        }

        #[test]
        fn prop_camera_offset_bounded_by_elastic_peak(
            seed in any::<u64>(),
            intensity in 0.0f32..100.0,
            duration in 0.01f32..2.0,
            steps in proptest::collection::vec(0.0f32..0.1, 1..60),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut shake = CameraShake::new();
            shake.trigger(intensity, duration);

            for dt in steps {
                shake.update(dt, &mut rng);
                prop_assert!(shake.offset().x.abs() <= intensity * ELASTIC_PEAK);
                prop_assert!(shake.offset().y.abs() <= intensity * ELASTIC_PEAK);
                if shake.timer() <= 0.0 {
                    prop_assert_eq!(shake.offset(), Vec2::ZERO);
                }
            }
        }

        #[test]
        fn prop_window_clear_always_zeroes(
            seed in any::<u64>(),
            intensity in 0.0f32..100.0,
            duration in 0.0f32..2.0,
            dt in 0.0f32..0.5,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut window = MockWindow::on_1080p(UVec2::new(800, 450));
            let mut shake = WindowShake::new();
            shake.trigger(intensity, duration, &window);
            shake.update(dt, &mut rng);

            shake.clear(&mut window);
            prop_assert_eq!(shake.offset(), Vec2::ZERO);
            prop_assert_eq!(shake.timer(), 0.0);
            prop_assert_eq!(window.moves.last().copied(), Some(shake.anchor()));
        }
    }
}
