mod error;
mod io;
mod settings;

#[cfg(test)]
mod tests;

pub use error::{ConfigError, Result};
pub use io::{load_settings, save_settings};
pub use settings::ViewerSettings;
