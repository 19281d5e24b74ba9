use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum StoreErrKind {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("{op} failed: {message}")]
    Command { op: &'static str, message: String },
    #[error("invalid store config: {0}")]
    InvalidConfig(String),
}

#[derive(Clone, Debug, Error)]
#[error(transparent)]
pub struct StoreError(pub StoreErrKind);

impl StoreError {
    pub fn new(kind: StoreErrKind) -> Self {
        Self(kind)
    }

    pub fn command(op: &'static str, err: impl std::fmt::Display) -> Self {
        Self(StoreErrKind::Command {
            op,
            message: err.to_string(),
        })
    }

    pub fn kind(&self) -> &StoreErrKind {
        &self.0
    }
}

impl From<StoreErrKind> for StoreError {
    fn from(kind: StoreErrKind) -> Self {
        StoreError(kind)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
