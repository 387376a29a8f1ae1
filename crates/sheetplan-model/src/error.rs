use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown item tag: {0}")]
    UnknownTag(String),
    #[error("unknown correction model: {0}")]
    UnknownModel(String),
}
