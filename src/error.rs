use std::path::PathBuf;

/// Everything that can stop a window (or the whole program) from coming up.
#[derive(Debug, thiserror::Error)]
pub enum PetError {
    #[error("no idle sprites found in {}; add PNG files to sprites/idle", .0.display())]
    NoIdleSprites(PathBuf),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create wgpu surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}

pub type Result<T> = std::result::Result<T, PetError>;
