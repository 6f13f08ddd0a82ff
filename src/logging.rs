use log::LevelFilter;
use simplelog::{Config, WriteLogger};
use std::fs::File;

/// File logging for the engine process. stdout belongs to the command
/// protocol, so diagnostics go to ember.log instead; running without the
/// file is fine, logging just stays off.
pub fn init_logging() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(file) = File::create("ember.log") {
        let _ = WriteLogger::init(level, Config::default(), file);
        log::info!("logging initialized");
    }
}
