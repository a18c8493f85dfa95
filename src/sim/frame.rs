//! Per-frame simulation step
//!
//! The scene owns every piece of mutable demo state, including both shake
//! effects and the RNG they draw from. One call to [`Scene::step`] advances
//! everything in a fixed order:
//!
//! 1. Move the ball
//! 2. Move the sprite and resolve wall hits against the configured screen size
//! 3. If a sprite velocity component changed sign, trigger both shakes
//! 4. Advance camera shake, then window shake
//!
//! Drawing and applying the window offset happen afterwards, outside the sim.

use glam::{UVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::MovingEntity;
use super::shake::{CameraShake, WindowPlacement, WindowShake};
use super::sprite::{BounceAxis, BouncingSprite, SpriteImage};
use crate::consts::*;
use crate::settings::{Settings, ShakeParams};

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameEvents {
    /// Axis the sprite bounced on
    pub bounce: Option<BounceAxis>,
    /// Shakes were (re)triggered this frame
    pub shook: bool,
}

/// True if any component went from strictly positive to strictly negative or back
pub fn velocity_flipped(old: Vec2, new: Vec2) -> bool {
    let flipped = |a: f32, b: f32| (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0);
    flipped(old.x, new.x) || flipped(old.y, new.y)
}

/// All demo state advanced by the frame loop
#[derive(Debug, Clone)]
pub struct Scene {
    pub ball: MovingEntity,
    pub sprite: BouncingSprite,
    pub camera_shake: CameraShake,
    pub window_shake: WindowShake,
    /// Configured client size; sprite hits are tested against it
    screen: UVec2,
    /// `None` when the effect is switched off
    camera_params: Option<ShakeParams>,
    window_params: Option<ShakeParams>,
    rng: Pcg32,
}

impl Scene {
    /// Ball at its start position, sprite launched from the ball with a random velocity
    pub fn new(settings: &Settings, image: SpriteImage, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);

        let ball = MovingEntity::new(
            Vec2::new(BALL_START.0, BALL_START.1),
            Vec2::new(BALL_VELOCITY.0, BALL_VELOCITY.1),
        );

        let mut sprite = BouncingSprite::new(image);
        sprite.position = ball.position;
        sprite.velocity = Vec2::new(
            rng.random_range(SPRITE_SPEED_X.0..=SPRITE_SPEED_X.1) as f32,
            rng.random_range(SPRITE_SPEED_Y.0..=SPRITE_SPEED_Y.1) as f32,
        );

        Self {
            ball,
            sprite,
            camera_shake: CameraShake::new(),
            window_shake: WindowShake::new(),
            screen: UVec2::new(settings.width, settings.height),
            camera_params: settings
                .effective_camera_shake()
                .then_some(settings.camera_shake_params),
            window_params: settings
                .effective_window_shake()
                .then_some(settings.window_shake_params),
            rng,
        }
    }

    /// Advance one frame of `dt` seconds
    pub fn step<W: WindowPlacement + ?Sized>(&mut self, dt: f32, window: &W) -> FrameEvents {
        let old_velocity = self.sprite.velocity;

        self.ball.update(dt);
        let bounce = self.sprite.update(dt, self.screen);

        let shook = velocity_flipped(old_velocity, self.sprite.velocity);
        if shook {
            log::debug!(
                "Sprite bounced on {:?} at ({:.1}, {:.1})",
                bounce,
                self.sprite.position.x,
                self.sprite.position.y
            );
            self.trigger_shakes(window);
        }

        self.camera_shake.update(dt, &mut self.rng);
        self.window_shake.update(dt, &mut self.rng);

        FrameEvents { bounce, shook }
    }

    /// Fire both enabled shakes with their configured parameters
    pub fn trigger_shakes<W: WindowPlacement + ?Sized>(&mut self, window: &W) {
        if let Some(params) = self.camera_params {
            self.camera_shake.trigger(params.intensity, params.duration);
        }
        if let Some(params) = self.window_params {
            self.window_shake
                .trigger(params.intensity, params.duration, window);
        }
    }
}
