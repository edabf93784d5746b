use bytemuck::{Pod, Zeroable};
use glam::{UVec2, Vec2};

/// Per-instance data for the sprite quad.
/// Stride = 16 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Center of the sprite in surface pixels.
    pub position: [f32; 2],
    /// Width and height in surface pixels.
    pub size: [f32; 2],
}

impl SpriteInstance {
    /// Sprite centered on a surface of `surface` pixels, scaled by `scale`.
    pub fn centered(surface: UVec2, sprite: UVec2, scale: f32) -> Self {
        let center = surface.as_vec2() * 0.5;
        let size = sprite.as_vec2() * scale;
        Self {
            position: center.into(),
            size: Vec2::new(size.x.round(), size.y.round()).into(),
        }
    }
}
