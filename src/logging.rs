//! Logger setup. Native builds use `env_logger` (honours `RUST_LOG`), the
//! browser build forwards records to the devtools console.

#[cfg(not(feature = "web"))]
pub fn init(level: log::LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

#[cfg(feature = "web")]
struct ConsoleLogger {
    level: log::LevelFilter,
}

#[cfg(feature = "web")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line.into()),
            log::Level::Warn => web_sys::console::warn_1(&line.into()),
            log::Level::Info => web_sys::console::info_1(&line.into()),
            _ => web_sys::console::debug_1(&line.into()),
        }
    }

    fn flush(&self) {}
}

#[cfg(feature = "web")]
pub fn init(level: log::LevelFilter) {
    if log::set_boxed_logger(Box::new(ConsoleLogger { level })).is_ok() {
        log::set_max_level(level);
    }
}
