use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid validation config: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn json(source: serde_json::Error) -> Self {
        Self::Json { source }
    }
}
