pub type LowPolyResult<T> = Result<T, LowPolyError>;

#[derive(thiserror::Error, Debug)]
pub enum LowPolyError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LowPolyError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for LowPolyError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}
