use std::path::PathBuf;

use instant::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::WindowId;

use crate::config::PetConfig;
use crate::error::{PetError, Result};
use crate::launcher::{Launcher, LauncherAction};
use crate::pet::Pet;
use crate::platform::CursorTracker;
use crate::sprites;
use crate::util::schedule::CancelToken;

/// Top-level application state.
struct App {
    launcher: Option<Launcher>,
    pet: Option<Pet>,
    cursor: CursorTracker,

    config: PetConfig,
    sprite_root: PathBuf,

    /// Error that made us leave the event loop early.
    fatal: Option<PetError>,
}

impl App {
    fn new(config: PetConfig, sprite_root: PathBuf) -> Self {
        Self {
            launcher: None,
            pet: None,
            cursor: CursorTracker::new(),
            config,
            sprite_root,
            fatal: None,
        }
    }

    /// Spawn the pet. Only one pet per launcher.
    fn activate_pet(&mut self, event_loop: &ActiveEventLoop) {
        if self.pet.is_some() {
            return;
        }

        log::info!("Activating pet (sprites from {})", self.sprite_root.display());
        match Pet::new(
            event_loop,
            self.config.clone(),
            &self.sprite_root,
            CancelToken::new(),
        ) {
            Ok(pet) => {
                self.pet = Some(pet);
                if let Some(launcher) = &mut self.launcher {
                    launcher.set_activated();
                }
            }
            Err(e) => {
                log::error!("Failed to create pet: {e}");
                if let Some(launcher) = &mut self.launcher {
                    launcher.set_error(e.to_string());
                }
            }
        }
    }

    /// Drop a closed pet, which destroys its window.
    fn reap_pet(&mut self) {
        if self.pet.as_ref().is_some_and(Pet::is_closed) {
            self.pet = None;
            log::info!("Pet window destroyed");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.launcher.is_some() {
            return;
        }

        match Launcher::new(event_loop) {
            Ok(launcher) => self.launcher = Some(launcher),
            Err(e) => {
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(pet) = self.pet.as_mut().filter(|p| p.id() == window_id) {
            pet.window_event(&event, &mut self.cursor);
            self.reap_pet();
            return;
        }

        let Some(launcher) = self.launcher.as_mut().filter(|l| l.id() == window_id) else {
            return;
        };

        match launcher.window_event(&event, &mut self.cursor) {
            LauncherAction::ActivatePet => self.activate_pet(event_loop),
            LauncherAction::Quit => {
                log::info!("Launcher closed, exiting");
                event_loop.exit();
            }
            LauncherAction::None => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(pet) = &mut self.pet {
            pet.update(Instant::now(), &self.cursor);
        }
        self.reap_pet();

        match self.pet.as_ref().and_then(Pet::deadline) {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(pet) = &mut self.pet {
            pet.close();
        }
        self.pet = None;
        self.launcher = None;
    }
}

/// Entry point: create event loop and run.
pub fn run() -> Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(PetConfig::default(), sprites::sprite_root());
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
