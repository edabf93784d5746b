use winit::window::Window;

use crate::render::GpuState;

/// Tessellated egui output for one frame, ready for `paint`.
pub struct EguiFrame {
    pub primitives: Vec<egui::epaint::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub screen_descriptor: egui_wgpu::ScreenDescriptor,
}

/// egui glue for one window: input state, context, wgpu renderer.
pub struct EguiLayer {
    pub egui_ctx: egui::Context,
    pub egui_state: egui_winit::State,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl EguiLayer {
    pub fn new(window: &Window, gpu: &GpuState) -> Self {
        let egui_ctx = egui::Context::default();

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            Some(gpu.device.limits().max_texture_dimension_2d as usize),
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.format(),
            egui_wgpu::RendererOptions {
                depth_stencil_format: None,
                msaa_samples: 1,
                dithering: true,
                predictable_texture_filtering: false,
            },
        );

        Self {
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    /// Forward a winit event to egui. Returns (consumed, wants_repaint).
    pub fn on_window_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> (bool, bool) {
        let response = self.egui_state.on_window_event(window, event);
        (response.consumed, response.repaint)
    }

    /// Run the UI closure and tessellate its output.
    pub fn run(
        &mut self,
        window: &Window,
        size_in_pixels: [u32; 2],
        ui: impl FnMut(&egui::Context),
    ) -> EguiFrame {
        let raw_input = self.egui_state.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, ui);

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, pixels_per_point);

        EguiFrame {
            primitives,
            textures_delta: full_output.textures_delta,
            screen_descriptor: egui_wgpu::ScreenDescriptor {
                size_in_pixels,
                pixels_per_point,
            },
        }
    }

    /// Upload textures and buffers, then draw on top of whatever `view` holds.
    /// Returns the extra command buffers egui needs submitted first.
    pub fn paint(
        &mut self,
        gpu: &GpuState,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: &EguiFrame,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }

        let cmd_bufs = self.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            encoder,
            &frame.primitives,
            &frame.screen_descriptor,
        );

        {
            let mut render_pass = GpuState::begin_egui_pass(encoder, view);
            self.egui_renderer
                .render(&mut render_pass, &frame.primitives, &frame.screen_descriptor);
        }

        cmd_bufs
    }

    /// Free textures after present.
    pub fn free_textures(&mut self, frame: &EguiFrame) {
        for &id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(&id);
        }
    }
}
