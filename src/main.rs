mod app;
mod config;
mod error;
mod launcher;
mod overlay;
mod pet;
mod platform;
mod render;
mod sprites;
mod util;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Desktop Pet starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
