use std::time::Duration;

use glam::{IVec2, UVec2};

/// Tunables for one pet instance. Passed to `Pet::new`, never global.
#[derive(Debug, Clone)]
pub struct PetConfig {
    /// Initial top-left window position in screen pixels.
    pub start_pos: IVec2,
    /// Canvas (window client area) size in logical pixels.
    pub canvas_size: UVec2,
    /// Every sprite frame is resized to this.
    pub sprite_size: UVec2,
    /// Mouse farther than this from the pet center is ignored.
    pub interaction_radius: f32,
    /// Max |dx| for a headpat.
    pub headpat_half_width: i32,
    /// Mouse must be at least this far above center for a headpat.
    pub headpat_min_rise: i32,
    /// Mouse must be more than this far below center to surf.
    pub surf_min_drop: i32,
    /// Pixels moved per tick while walking.
    pub walk_step: i32,
    /// Minimum time between two state evaluations.
    pub eval_interval: Duration,
    /// Period of the animation tick.
    pub frame_interval: Duration,
    /// Background color treated as transparent (RGB).
    pub color_key: [u8; 3],
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            start_pos: IVec2::new(400, 200),
            canvas_size: UVec2::new(100, 100),
            sprite_size: UVec2::new(80, 80),
            interaction_radius: 120.0,
            headpat_half_width: 40,
            headpat_min_rise: 30,
            surf_min_drop: 50,
            walk_step: 2,
            eval_interval: Duration::from_millis(50),
            frame_interval: Duration::from_millis(120),
            color_key: [255, 0, 255],
        }
    }
}

impl PetConfig {
    /// Color key as a wgpu clear color (the surface is sRGB, the key is exact).
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.color_key;
        wgpu::Color {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }
}
