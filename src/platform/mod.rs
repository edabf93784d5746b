#[cfg(windows)]
pub mod win32;

use glam::IVec2;
use winit::dpi::PhysicalPosition;
use winit::window::Window;

/// Source of the global cursor position.
///
/// Windows can be asked directly. Elsewhere winit only reports the pointer
/// while it is over one of our windows, so the last such report is kept.
#[derive(Debug, Default)]
pub struct CursorTracker {
    last: Option<IVec2>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `CursorMoved` position (window-local, physical pixels).
    pub fn record(&mut self, window: &Window, local: PhysicalPosition<f64>) {
        if let Ok(origin) = window.inner_position() {
            self.record_screen(to_screen(IVec2::new(origin.x, origin.y), local));
        }
    }

    pub fn record_screen(&mut self, pos: IVec2) {
        self.last = Some(pos);
    }

    /// Current cursor position in screen pixels, if known.
    pub fn position(&self) -> Option<IVec2> {
        #[cfg(windows)]
        if let Some(pos) = win32::get_mouse_pos() {
            return Some(pos);
        }
        self.last
    }
}

/// Window-local pointer position to screen pixels.
pub fn to_screen(window_origin: IVec2, local: PhysicalPosition<f64>) -> IVec2 {
    window_origin + IVec2::new(local.x.floor() as i32, local.y.floor() as i32)
}

/// Apply the color key so `key` pixels show the desktop through the window.
pub fn apply_color_key(window: &Window, key: [u8; 3]) {
    #[cfg(windows)]
    win32::setup_color_key(window, key);

    #[cfg(not(windows))]
    {
        let _ = window;
        log::warn!(
            "Color key #{:02X}{:02X}{:02X} is only applied on Windows",
            key[0],
            key[1],
            key[2]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_screen_offsets_by_origin() {
        let pos = to_screen(IVec2::new(400, 200), PhysicalPosition::new(12.7, 3.2));
        assert_eq!(pos, IVec2::new(412, 203));
    }

    #[test]
    fn test_to_screen_negative_local() {
        let pos = to_screen(IVec2::new(0, 0), PhysicalPosition::new(-0.5, -3.0));
        assert_eq!(pos, IVec2::new(-1, -3));
    }

    #[cfg(not(windows))]
    #[test]
    fn test_tracker_keeps_last_report() {
        let mut cursor = CursorTracker::new();
        assert_eq!(cursor.position(), None);
        cursor.record_screen(IVec2::new(5, 6));
        cursor.record_screen(IVec2::new(7, 8));
        assert_eq!(cursor.position(), Some(IVec2::new(7, 8)));
    }
}
