//! Native frame loop
//!
//! Owns the winit window, the GPU state and the [`Scene`], and drives one
//! simulation step plus one rendered frame per paced redraw.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::assets;
use crate::platform::{FpsCounter, FrameClock, FramePacer, OsWindow};
use crate::renderer::{DrawList, RenderState, compose_frame};
use crate::settings::Settings;
use crate::sim::{Scene, SpriteImage, WindowPlacement};

/// Everything that only exists while the window is open
struct Running {
    window: OsWindow,
    renderer: RenderState,
    scene: Scene,
    draw: DrawList,
}

impl Drop for Running {
    fn drop(&mut self) {
        // Leave the window where it was anchored, not mid-shake
        self.scene.window_shake.clear(&mut self.window);
        log::info!("Window restored to {:?}", self.scene.window_shake.anchor());
    }
}

pub struct App {
    settings: Settings,
    /// Sprite waiting for the window; moved into the scene on resume
    sprite: Option<SpriteImage>,
    seed: u64,
    running: Option<Running>,
    clock: FrameClock,
    pacer: FramePacer,
    fps: FpsCounter,
    /// First fatal error raised inside the event loop
    error: Option<anyhow::Error>,
}

impl App {
    fn new(settings: Settings, sprite: SpriteImage, seed: u64) -> Self {
        let pacer = FramePacer::new(settings.target_fps, Instant::now());
        Self {
            settings,
            sprite: Some(sprite),
            seed,
            running: None,
            clock: FrameClock::new(),
            pacer,
            fps: FpsCounter::new(),
            error: None,
        }
    }

    /// Load assets, open the window and run until it is closed
    pub fn run(settings: Settings) -> anyhow::Result<()> {
        let sprite = assets::load_sprite(&settings.sprite_path)?;

        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("RNG seed: {}", seed);

        let event_loop = EventLoop::new().context("Failed to create event loop")?;
        let mut app = App::new(settings, sprite, seed);
        event_loop
            .run_app(&mut app)
            .context("Event loop terminated abnormally")?;

        app.running = None;
        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let Some(image) = self.sprite.take() else {
            return Ok(());
        };

        let attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(PhysicalSize::new(self.settings.width, self.settings.height))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );

        let scene = Scene::new(&self.settings, image, self.seed);
        let renderer = pollster::block_on(RenderState::new(window.clone(), scene.sprite.image()))?;

        let window = OsWindow::new(window);
        let draw = DrawList::new(window.screen_size());
        let mut running = Running {
            window,
            renderer,
            scene,
            draw,
        };

        // A zero-strength shake just anchors the window at the monitor center
        running
            .scene
            .window_shake
            .trigger(0.0, 0.0, &running.window);
        running.scene.window_shake.apply(&mut running.window);
        log::info!(
            "Window centered at {:?}",
            running.scene.window_shake.anchor()
        );

        self.running = Some(running);
        self.clock = FrameClock::new();
        self.pacer = FramePacer::new(self.settings.target_fps, Instant::now());
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        self.error.get_or_insert(err);
        self.running = None;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.delta();
        self.fps.update(dt);

        let Some(running) = self.running.as_mut() else {
            return;
        };

        running.scene.step(dt, &running.window);

        running.draw.begin_frame(running.window.screen_size());
        compose_frame(
            &mut running.draw,
            &running.scene,
            &self.settings,
            self.fps.fps(),
        );
        running.scene.window_shake.apply(&mut running.window);

        match running.renderer.render(&running.draw) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = running.window.screen_size();
                running.renderer.resize(size.x, size.y);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(event_loop, anyhow::anyhow!("GPU out of memory"));
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                self.running = None;
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("Escape pressed, exiting");
                self.running = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(running) = self.running.as_mut() {
                    running.renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_ref() else {
            return;
        };
        if self.pacer.poll(Instant::now()) {
            running.window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.pacer.next_frame()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.running = None;
    }
}
