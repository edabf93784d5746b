use glam::{IVec2, UVec2};

use crate::config::PetConfig;
use crate::sprites::SpriteCategory;

/// What the pet is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PetState {
    #[default]
    Idle,
    Left,
    Right,
    Headpat,
    Surf,
    Hover,
}

impl PetState {
    /// Sprite set shown in this state. Both walk directions share one set.
    pub fn category(self) -> SpriteCategory {
        match self {
            PetState::Idle => SpriteCategory::Idle,
            PetState::Left | PetState::Right => SpriteCategory::Walk,
            PetState::Headpat => SpriteCategory::Headpat,
            PetState::Surf => SpriteCategory::Surf,
            PetState::Hover => SpriteCategory::Hover,
        }
    }

    /// Horizontal window shift per tick (in walk steps).
    pub fn walk_direction(self) -> i32 {
        match self {
            PetState::Left => -1,
            PetState::Right => 1,
            _ => 0,
        }
    }
}

/// Thresholds for `decide`, lifted out of `PetConfig`.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub radius: f32,
    pub headpat_half_width: i32,
    pub headpat_min_rise: i32,
    pub surf_min_drop: i32,
}

impl From<&PetConfig> for Thresholds {
    fn from(cfg: &PetConfig) -> Self {
        Self {
            radius: cfg.interaction_radius,
            headpat_half_width: cfg.headpat_half_width,
            headpat_min_rise: cfg.headpat_min_rise,
            surf_min_drop: cfg.surf_min_drop,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&PetConfig::default())
    }
}

/// Everything one evaluation looks at.
#[derive(Debug, Clone, Copy)]
pub struct Observation {
    /// Global cursor position.
    pub mouse: IVec2,
    /// Top-left of the pet window.
    pub window_pos: IVec2,
    /// Size of the canvas the sprite is centered in.
    pub canvas_size: UVec2,
    /// Pointer is over the sprite image.
    pub hovering: bool,
}

impl Observation {
    pub fn center(&self) -> IVec2 {
        self.window_pos + (self.canvas_size / 2).as_ivec2()
    }

    /// Cursor offset from the pet center.
    pub fn delta(&self) -> IVec2 {
        self.mouse - self.center()
    }
}

/// Pick the next state from the cursor position.
///
/// Precedence, first match wins:
/// 1. outside the radius: idle, except while hovering, where `prev` is kept
///    until the pointer leaves the sprite
/// 2. hovering: hover
/// 3. roughly centered and above: headpat
/// 4. well below: surf
/// 5. horizontally dominant: walk towards the cursor
/// 6. otherwise idle
pub fn decide(obs: &Observation, prev: PetState, t: &Thresholds) -> PetState {
    let d = obs.delta();
    let distance = (d.x as f32).hypot(d.y as f32);

    if distance > t.radius {
        return if obs.hovering { prev } else { PetState::Idle };
    }

    if obs.hovering {
        return PetState::Hover;
    }

    if d.x.abs() < t.headpat_half_width && d.y < -t.headpat_min_rise {
        return PetState::Headpat;
    }
    if d.y > t.surf_min_drop {
        return PetState::Surf;
    }

    if d.x.abs() > d.y.abs() {
        if d.x > 0 {
            PetState::Right
        } else {
            PetState::Left
        }
    } else {
        PetState::Idle
    }
}
