use crate::config::ConfigError;
use crate::edit::EditError;
use crate::metrics::MetricsError;
use crate::model::CoreError;
use crate::render::RenderError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("case validation failed: {0}")]
    Core(#[from] CoreError),

    #[error("edit failed: {0}")]
    Edit(#[from] EditError),

    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("metrics failed: {0}")]
    Metrics(#[from] MetricsError),

    #[error("invalid viewer settings: {0}")]
    Config(#[from] ConfigError),

    #[error("session lock poisoned")]
    Poisoned,
}
