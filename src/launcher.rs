use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::Result;
use crate::overlay::EguiLayer;
use crate::platform::CursorTracker;
use crate::render::GpuState;

/// What the launcher asks the app to do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherAction {
    None,
    ActivatePet,
    Quit,
}

/// Read-only inputs for drawing the launcher.
#[derive(Debug, Clone, Default)]
pub struct LauncherView {
    /// A pet is already running; the button is disabled.
    pub activated: bool,
    /// Last activation failure, shown under the button.
    pub error: Option<String>,
}

/// Small window with a single button that spawns the pet.
pub struct Launcher {
    window: Arc<Window>,
    gpu: GpuState,
    egui: EguiLayer,
    view: LauncherView,
}

impl Launcher {
    pub fn new(event_loop: &ActiveEventLoop) -> Result<Self> {
        let attrs = WindowAttributes::default()
            .with_title("Desktop Pet")
            .with_inner_size(LogicalSize::new(280, 140))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(attrs)?);
        let gpu = GpuState::new(window.clone(), "launcher")?;
        let egui = EguiLayer::new(&window, &gpu);

        log::info!("Launcher window created");
        Ok(Self {
            window,
            gpu,
            egui,
            view: LauncherView::default(),
        })
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// A pet is running: disable the button and clear any old error.
    pub fn set_activated(&mut self) {
        self.view.activated = true;
        self.view.error = None;
        self.window.request_redraw();
    }

    /// Activation failed: keep the button enabled and show why.
    pub fn set_error(&mut self, message: String) {
        self.view.error = Some(message);
        self.window.request_redraw();
    }

    pub fn window_event(&mut self, event: &WindowEvent, cursor: &mut CursorTracker) -> LauncherAction {
        let (_, repaint) = self.egui.on_window_event(&self.window, event);
        if repaint {
            self.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => LauncherAction::Quit,
            WindowEvent::Resized(size) => {
                self.gpu.resize(size.width, size.height);
                LauncherAction::None
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor.record(&self.window, *position);
                LauncherAction::None
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => LauncherAction::None,
        }
    }

    fn render(&mut self) -> LauncherAction {
        let (w, h) = self.gpu.size();
        let view = &self.view;
        let mut clicked = false;
        let ui = self.egui.run(&self.window, [w, h], |ctx| {
            clicked = draw_launcher(ctx, view);
        });

        if let Some(mut frame) = self.gpu.begin_frame() {
            // egui's central panel covers the whole window.
            drop(GpuState::begin_clear_pass(
                &mut frame.encoder,
                &frame.view,
                wgpu::Color::BLACK,
            ));
            let extra = self
                .egui
                .paint(&self.gpu, &mut frame.encoder, &frame.view, &ui);
            self.gpu.finish_frame(frame.encoder, frame.output, extra);
        }
        self.egui.free_textures(&ui);

        if clicked {
            // Redraw so the disabled button (or error) shows up.
            self.window.request_redraw();
            LauncherAction::ActivatePet
        } else {
            LauncherAction::None
        }
    }
}

/// Launcher layout. Returns true when "Activate" was clicked.
pub fn draw_launcher(ctx: &egui::Context, view: &LauncherView) -> bool {
    let mut clicked = false;
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.label(egui::RichText::new("Your Desktop Pet").size(16.0));
            ui.add_space(6.0);

            let button = egui::Button::new(egui::RichText::new("Activate").size(16.0));
            clicked = ui.add_enabled(!view.activated, button).clicked();

            ui.add_space(4.0);
            match &view.error {
                Some(err) => {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
                None => {
                    ui.small("Right-click pet → Close");
                }
            }
        });
    });
    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(view: &LauncherView) -> (bool, egui::FullOutput) {
        let ctx = egui::Context::default();
        let mut clicked = true;
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            clicked = draw_launcher(ctx, view);
        });
        (clicked, output)
    }

    #[test]
    fn test_no_click_without_input() {
        let (clicked, output) = run(&LauncherView::default());
        assert!(!clicked);
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn test_activated_view_draws() {
        let view = LauncherView {
            activated: true,
            error: None,
        };
        let (clicked, _) = run(&view);
        assert!(!clicked);
    }

    #[test]
    fn test_error_view_draws() {
        let view = LauncherView {
            activated: false,
            error: Some("no idle sprites".into()),
        };
        let (clicked, output) = run(&view);
        assert!(!clicked);
        assert!(!output.shapes.is_empty());
    }
}
