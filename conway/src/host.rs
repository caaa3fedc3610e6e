// host.rs - Callback contract between the core and the windowing host

use crate::surface::Scene;

/// What a hook tells the host loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop invoking the game; the host should close down.
    Stop,
}

/// Receives composed frames for presentation. The scene is only borrowed for
/// the call; keep a copy if it must outlive it.
pub trait Screen {
    fn present(&mut self, scene: &Scene);
}

/// The three hooks a host runtime drives. The host owns the cadence and the
/// thread; every call is synchronous.
pub trait Game {
    /// Called once per host iteration.
    fn update(&mut self) -> Flow;

    /// Called once per display refresh.
    fn draw(&mut self, screen: &mut dyn Screen) -> Flow;

    /// Fixed presentation size in host units, whatever the outside size.
    fn layout(&self, outside_width: f32, outside_height: f32) -> (usize, usize);
}
