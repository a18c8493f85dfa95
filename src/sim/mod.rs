//! Simulation module
//!
//! All per-frame logic lives here. Nothing in this module touches the GPU or
//! the OS window directly; the window is reached only through
//! [`WindowPlacement`] and drawing only through [`CameraTarget`].

pub mod entity;
pub mod frame;
pub mod shake;
pub mod sprite;

pub use entity::MovingEntity;
pub use frame::{FrameEvents, Scene, velocity_flipped};
pub use shake::{
    CameraScope, CameraShake, CameraTarget, MonitorRect, WindowPlacement, WindowShake,
};
pub use sprite::{BounceAxis, BouncingSprite, PixelBufferSizeMismatch, SpriteImage};
