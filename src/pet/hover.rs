use glam::{UVec2, Vec2};

/// Boundary crossing of the sprite image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEdge {
    Enter,
    Leave,
}

/// Turns raw pointer positions into enter/leave edges for the sprite rect
/// (the sprite drawn centered in the canvas, window-local logical pixels).
#[derive(Debug)]
pub struct HoverTracker {
    min: Vec2,
    max: Vec2,
    inside: bool,
}

impl HoverTracker {
    pub fn new(canvas: UVec2, sprite: UVec2) -> Self {
        let center = canvas.as_vec2() * 0.5;
        let half = sprite.as_vec2() * 0.5;
        Self {
            min: center - half,
            max: center + half,
            inside: false,
        }
    }

    /// Is `p` (window-local) over the sprite image?
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x < self.max.x && p.y < self.max.y
    }

    pub fn is_hovering(&self) -> bool {
        self.inside
    }

    pub fn pointer_moved(&mut self, p: Vec2) -> Option<HoverEdge> {
        self.set_inside(self.contains(p))
    }

    /// Pointer left the window entirely.
    pub fn pointer_left(&mut self) -> Option<HoverEdge> {
        self.set_inside(false)
    }

    fn set_inside(&mut self, inside: bool) -> Option<HoverEdge> {
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            HoverEdge::Enter
        } else {
            HoverEdge::Leave
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> HoverTracker {
        HoverTracker::new(UVec2::new(100, 100), UVec2::new(80, 80))
    }

    #[test]
    fn test_sprite_rect_is_centered() {
        let t = tracker();
        assert!(t.contains(Vec2::new(10.0, 10.0)));
        assert!(t.contains(Vec2::new(89.9, 89.9)));
        assert!(!t.contains(Vec2::new(9.9, 50.0)));
        assert!(!t.contains(Vec2::new(50.0, 90.0)));
    }

    #[test]
    fn test_edges_fire_once() {
        let mut t = tracker();
        assert_eq!(t.pointer_moved(Vec2::new(5.0, 5.0)), None);
        assert_eq!(t.pointer_moved(Vec2::new(50.0, 50.0)), Some(HoverEdge::Enter));
        assert_eq!(t.pointer_moved(Vec2::new(60.0, 40.0)), None);
        assert!(t.is_hovering());
        assert_eq!(t.pointer_moved(Vec2::new(95.0, 40.0)), Some(HoverEdge::Leave));
        assert!(!t.is_hovering());
    }

    #[test]
    fn test_leaving_window_ends_hover() {
        let mut t = tracker();
        t.pointer_moved(Vec2::new(50.0, 50.0));
        assert_eq!(t.pointer_left(), Some(HoverEdge::Leave));
        assert_eq!(t.pointer_left(), None);
    }
}
