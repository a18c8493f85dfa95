//! OS window adapter

use std::sync::Arc;

use glam::{IVec2, UVec2};
use winit::dpi::PhysicalPosition;
use winit::window::Window;

use crate::sim::{MonitorRect, WindowPlacement};

/// The winit window, shared with the GPU surface
#[derive(Debug, Clone)]
pub struct OsWindow {
    window: Arc<Window>,
}

impl OsWindow {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

impl WindowPlacement for OsWindow {
    fn monitor(&self) -> Option<MonitorRect> {
        let monitor = self.window.current_monitor()?;
        let position = monitor.position();
        let size = monitor.size();
        Some(MonitorRect {
            position: IVec2::new(position.x, position.y),
            size: UVec2::new(size.width, size.height),
        })
    }

    fn screen_size(&self) -> UVec2 {
        let size = self.window.inner_size();
        UVec2::new(size.width, size.height)
    }

    fn set_position(&mut self, position: IVec2) {
        let inner = self.window.inner_position().ok();
        let outer = self.window.outer_position().ok();
        let frame = frame_origin(
            position,
            inner.map(|p| IVec2::new(p.x, p.y)),
            outer.map(|p| IVec2::new(p.x, p.y)),
        );
        // No-op on platforms that do not let clients move windows (Wayland)
        self.window
            .set_outer_position(PhysicalPosition::new(frame.x, frame.y));
    }
}

/// Outer frame position that puts the client area at `client`.
///
/// Without both positions the decoration size is unknown and taken as zero.
fn frame_origin(client: IVec2, inner: Option<IVec2>, outer: Option<IVec2>) -> IVec2 {
    match (inner, outer) {
        (Some(inner), Some(outer)) => client - (inner - outer),
        _ => client,
    }
}
