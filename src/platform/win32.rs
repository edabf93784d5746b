use glam::IVec2;
use raw_window_handle::{HasWindowHandle, RawWindowHandle};
use windows::Win32::Foundation::{COLORREF, HWND, POINT};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetWindowLongPtrW, SetLayeredWindowAttributes, SetWindowLongPtrW, SetWindowPos,
    GWL_EXSTYLE, LWA_COLORKEY, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SWP_NOZORDER, WS_EX_LAYERED, WS_EX_TOOLWINDOW,
};

/// Extract the Win32 HWND from a winit window.
pub fn get_hwnd(window: &winit::window::Window) -> Option<HWND> {
    let handle = window.window_handle().ok()?;
    match handle.as_raw() {
        RawWindowHandle::Win32(h) => Some(HWND(h.hwnd.get() as *mut core::ffi::c_void)),
        _ => None,
    }
}

/// Make `key` fully transparent and keep the window out of the taskbar.
pub unsafe fn make_color_keyed(hwnd: HWND, key: [u8; 3]) {
    let style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
    let new_style = style | WS_EX_LAYERED.0 as isize | WS_EX_TOOLWINDOW.0 as isize;
    SetWindowLongPtrW(hwnd, GWL_EXSTYLE, new_style);

    log::debug!("Window ex-style: 0x{:08X} -> 0x{:08X}", style, new_style);

    let [r, g, b] = key;
    let colorref = COLORREF(r as u32 | (g as u32) << 8 | (b as u32) << 16);
    if let Err(e) = SetLayeredWindowAttributes(hwnd, colorref, 255, LWA_COLORKEY) {
        log::warn!("SetLayeredWindowAttributes failed: {e}");
    }

    // Force the frame to pick up the new ex-style.
    let _ = SetWindowPos(
        hwnd,
        HWND::default(),
        0,
        0,
        0,
        0,
        SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
    );
}

/// Apply the color key to a winit window.
pub fn setup_color_key(window: &winit::window::Window, key: [u8; 3]) {
    let Some(hwnd) = get_hwnd(window) else {
        log::warn!("No Win32 handle, color key not applied");
        return;
    };
    unsafe {
        make_color_keyed(hwnd, key);
    }
    log::info!("Win32 color key applied (#{:02X}{:02X}{:02X})", key[0], key[1], key[2]);
}

/// Get the current global mouse cursor position in screen pixels.
pub fn get_mouse_pos() -> Option<IVec2> {
    let mut point = POINT::default();
    unsafe { GetCursorPos(&mut point) }.ok()?;
    Some(IVec2::new(point.x, point.y))
}
