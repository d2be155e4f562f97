/// Errors surfaced by the ranking engine.
///
/// `InvalidState`, `EmptyList` and `RankOutOfRange` are contract violations: a
/// well-behaved caller never triggers them, and the engine never mutates state
/// when it returns one. `MalformedShareCode` is an expected runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RankError {
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("cannot run an insertion search against an empty ranked list")]
    EmptyList,

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("malformed share code: {0}")]
    MalformedShareCode(String),

    #[error("duplicate item ID: {0}")]
    DuplicateItem(String),

    #[error("an owner name is required to share a ranking")]
    OwnerNameRequired,

    #[error("rank {rank} is out of range for a list of {len} items")]
    RankOutOfRange { rank: usize, len: usize },
}

impl RankError {
    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        RankError::InvalidState(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, RankError>;
