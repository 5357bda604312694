// src/logging.rs
use env_logger::{Env, TimestampPrecision};
use gdal::errors::CplErrType;

/// Initialise `env_logger`; `RUST_LOG` overrides the verbosity flag
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(Some(TimestampPrecision::Millis))
        .try_init();

    forward_gdal_messages();
}

/// Route GDAL's CPL error messages into the `log` facade
pub fn forward_gdal_messages() {
    gdal::config::set_error_handler(|class, number, message| {
        let message = message.replace('\n', " ");
        match class {
            CplErrType::None | CplErrType::Debug => {
                log::debug!(target: "gdal", "{}", message)
            }
            CplErrType::Warning => log::warn!(target: "gdal", "[{}] {}", number, message),
            CplErrType::Failure | CplErrType::Fatal => {
                log::error!(target: "gdal", "[{}] {}", number, message)
            }
        }
    });
}
