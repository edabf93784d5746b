pub mod hover;
pub mod menu;
pub mod runtime;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use glam::{IVec2, UVec2, Vec2};
use instant::Instant;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId, WindowLevel};

use self::hover::{HoverEdge, HoverTracker};
use self::menu::{ContextMenu, MenuCommand};
use self::runtime::{PetRuntime, TickInput};
use crate::config::PetConfig;
use crate::error::Result;
use crate::overlay::EguiLayer;
use crate::platform::{self, CursorTracker};
use crate::render::instance::SpriteInstance;
use crate::render::pipeline::{SpritePipeline, SpriteTextures};
use crate::render::GpuState;
use crate::sprites::{SpriteCategory, SpriteLibrary};
use crate::util::schedule::{CancelToken, TickSchedule};

/// One desktop pet: its window, GPU resources, sprites and animation state.
pub struct Pet {
    window: Arc<Window>,
    gpu: GpuState,
    pipeline: SpritePipeline,
    textures: SpriteTextures,
    egui: EguiLayer,

    config: PetConfig,
    library: SpriteLibrary,
    runtime: PetRuntime,
    hover: HoverTracker,
    menu: ContextMenu,
    schedule: TickSchedule,

    /// Last pointer position over the window (logical, window-local).
    pointer: Option<Vec2>,
    /// Frame drawn on the next redraw.
    current_frame: (SpriteCategory, usize),
}

impl Pet {
    /// Load sprites, open the pet window and start its animation loop.
    ///
    /// Fails without opening anything if there are no idle sprites.
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: PetConfig,
        sprite_root: &Path,
        token: CancelToken,
    ) -> Result<Self> {
        let library = SpriteLibrary::load(sprite_root, config.sprite_size)?;

        // Start hidden so the first visible frame already has the color key.
        let attrs = WindowAttributes::default()
            .with_title("Desktop Pet")
            .with_decorations(false)
            .with_resizable(false)
            .with_visible(false)
            .with_window_level(WindowLevel::AlwaysOnTop)
            .with_inner_size(LogicalSize::new(config.canvas_size.x, config.canvas_size.y))
            .with_position(PhysicalPosition::new(config.start_pos.x, config.start_pos.y));

        let window = Arc::new(event_loop.create_window(attrs)?);
        platform::apply_color_key(&window, config.color_key);

        let gpu = GpuState::new(window.clone(), "pet")?;
        let pipeline = SpritePipeline::new(&gpu.device, gpu.format());
        let textures = SpriteTextures::upload(&gpu.device, &gpu.queue, &pipeline, &library);
        let egui = EguiLayer::new(&window, &gpu);

        let size = window.inner_size();
        let now = Instant::now();
        let mut pet = Self {
            runtime: PetRuntime::new(&config, UVec2::new(size.width, size.height), now),
            hover: HoverTracker::new(config.canvas_size, config.sprite_size),
            menu: ContextMenu::default(),
            schedule: TickSchedule::new(config.frame_interval, now, token),
            pointer: None,
            current_frame: (SpriteCategory::Idle, 0),
            window,
            gpu,
            pipeline,
            textures,
            egui,
            config,
            library,
        };
        pet.sync_surface_size();

        pet.window.set_visible(true);
        log::info!(
            "Pet window created at ({}, {})",
            pet.config.start_pos.x,
            pet.config.start_pos.y
        );
        Ok(pet)
    }

    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// Next time the animation loop wants to run, `None` once closed.
    pub fn deadline(&self) -> Option<Instant> {
        self.schedule.deadline()
    }

    pub fn is_closed(&self) -> bool {
        self.schedule.is_cancelled()
    }

    /// Stop the animation loop and hide the window. The window itself is
    /// destroyed when the owner drops the pet. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.schedule.is_cancelled() {
            return;
        }
        self.schedule.cancel();
        self.menu.dismiss();
        self.window.set_visible(false);
        log::info!("Pet closed");
    }

    /// Run the animation tick if it is due.
    pub fn update(&mut self, now: Instant, cursor: &CursorTracker) {
        if !self.schedule.poll(now) {
            return;
        }

        let window_pos = self
            .window
            .outer_position()
            .ok()
            .map(|p| IVec2::new(p.x, p.y));

        let outcome = self.runtime.tick(TickInput {
            now,
            mouse: cursor.position(),
            window_pos,
        });

        if let Some((from, to)) = outcome.transition {
            log::debug!("Pet state {from:?} -> {to:?}");
        }
        if let Some(pos) = outcome.moved_to {
            self.window
                .set_outer_position(PhysicalPosition::new(pos.x, pos.y));
        }

        self.current_frame = runtime::select_frame(&self.library, &outcome);
        self.window.request_redraw();
    }

    /// Handle an event for the pet window.
    pub fn window_event(&mut self, event: &WindowEvent, cursor: &mut CursorTracker) {
        let (consumed, repaint) = self.egui.on_window_event(&self.window, event);
        if repaint {
            self.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => self.close(),
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.sync_surface_size();
            }
            WindowEvent::CursorMoved { position, .. } => {
                cursor.record(&self.window, *position);
                let logical = position.to_logical::<f32>(self.window.scale_factor());
                let p = Vec2::new(logical.x, logical.y);
                self.pointer = Some(p);
                let edge = self.hover.pointer_moved(p);
                self.on_hover_edge(edge);
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer = None;
                let edge = self.hover.pointer_left();
                self.on_hover_edge(edge);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Right,
                ..
            } if !consumed => {
                if let Some(p) = self.pointer.filter(|&p| self.hover.contains(p)) {
                    self.menu.open(egui::pos2(p.x, p.y));
                    self.window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.render(),
            _ => {}
        }
    }

    fn on_hover_edge(&mut self, edge: Option<HoverEdge>) {
        match edge {
            Some(HoverEdge::Enter) => self.runtime.set_hovering(true),
            Some(HoverEdge::Leave) => self.runtime.set_hovering(false),
            None => {}
        }
    }

    /// Match surface, uniforms and runtime geometry to the window size.
    fn sync_surface_size(&mut self) {
        let size = self.window.inner_size();
        self.gpu.resize(size.width, size.height);
        let (w, h) = self.gpu.size();
        self.pipeline
            .update_screen_size(&self.gpu.queue, w as f32, h as f32);
        self.pipeline.update_instance(
            &self.gpu.queue,
            &SpriteInstance::centered(
                UVec2::new(w, h),
                self.config.sprite_size,
                self.window.scale_factor() as f32,
            ),
        );
        self.runtime.set_canvas_size(UVec2::new(w, h));
    }

    fn render(&mut self) {
        if self.is_closed() {
            return;
        }

        let (w, h) = self.gpu.size();
        let mut command = None;
        let ui = self.egui.run(&self.window, [w, h], |ctx| {
            command = self.menu.show(ctx);
        });

        if command == Some(MenuCommand::ClosePet) {
            self.egui.free_textures(&ui);
            self.close();
            return;
        }

        let Some(mut frame) = self.gpu.begin_frame() else {
            self.egui.free_textures(&ui);
            return;
        };

        {
            let mut pass = GpuState::begin_clear_pass(
                &mut frame.encoder,
                &frame.view,
                self.config.clear_color(),
            );
            let (category, index) = self.current_frame;
            if let Some(bind_group) = self.textures.frame(category, index) {
                self.pipeline.draw(&mut pass, bind_group);
            }
        }

        let extra = self
            .egui
            .paint(&self.gpu, &mut frame.encoder, &frame.view, &ui);
        self.gpu.finish_frame(frame.encoder, frame.output, extra);
        self.egui.free_textures(&ui);
    }
}
