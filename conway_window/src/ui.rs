// ui.rs - eframe host: drives the core's Game hooks once per frame and paints
// the presented scene with the egui painter

use conway::{Canvas, Flow, Game, Renderer, Scene, Screen};
use eframe::egui;
use egui::{Color32, Sense, Vec2};

/// Keeps a copy of the scene handed over by the render hook.
struct SceneSlot<'a> {
    scene: &'a mut Option<Scene>,
}

impl Screen for SceneSlot<'_> {
    fn present(&mut self, scene: &Scene) {
        *self.scene = Some(scene.clone());
    }
}

/// What the window does with its viewport after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAction {
    /// Keep the host calling back.
    Repaint,
    /// The game stopped on its own; ask the viewport to close.
    Close,
    /// Already closing, either by request or by an earlier `Close`.
    Wait,
}

/// Runs both hooks for one host iteration. `draw` runs even after `update`
/// reports `Stop` so the render side can hang up the handshake. A close
/// request from the window is turned into a shutdown request first.
pub fn drive_frame<G: Game>(
    game: &mut G,
    screen: &mut dyn Screen,
    close_requested: bool,
    closing: &mut bool,
    request_shutdown: impl FnOnce(),
) -> WindowAction {
    if close_requested {
        request_shutdown();
    }

    let updated = game.update();
    let drawn = game.draw(screen);
    if updated == Flow::Continue && drawn == Flow::Continue {
        return WindowAction::Repaint;
    }

    let already_closing = *closing || close_requested;
    *closing = true;
    if already_closing { WindowAction::Wait } else { WindowAction::Close }
}

pub struct LifeWindow {
    renderer: Renderer<Canvas>,
    presented: Option<Scene>,
    closing: bool,
}

impl LifeWindow {
    pub fn new(renderer: Renderer<Canvas>) -> Self {
        Self { renderer, presented: None, closing: false }
    }
}

impl eframe::App for LifeWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let close_requested = ctx.input(|i| i.viewport().close_requested());
        let coordinator = self.renderer.coordinator().clone();
        let action = drive_frame(
            &mut self.renderer,
            &mut SceneSlot { scene: &mut self.presented },
            close_requested,
            &mut self.closing,
            || coordinator.request_shutdown(),
        );

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (width, height) = self.renderer.layout(available.x, available.y);
                let (rect, _) = ui.allocate_exact_size(Vec2::new(width as f32, height as f32), Sense::hover());
                if let Some(scene) = &self.presented {
                    ui.painter().extend(scene.placed_at(rect.min));
                }
            });

        match action {
            // The handshake paces the frames; keep the host calling back
            WindowAction::Repaint => ctx.request_repaint(),
            WindowAction::Close => {
                log::info!("render loop reported stop, closing window");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            WindowAction::Wait => {}
        }
    }
}
