use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid plugin configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("plugin configuration lists no component factories")]
    NoFactories,

    #[error("plugin configuration field `{field}` must not be empty")]
    Empty { field: &'static str },
}
