/// Errors raised by family tree construction and queries
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FamilyError {
    #[error("member '{0}' not found in family")]
    NotFound(String),

    #[error("member '{0}' is already registered in family")]
    DuplicateName(String),

    #[error("members '{0}' and '{1}' share no common ancestor")]
    NoCommonAncestor(String, String),
}

pub type FamilyResult<T> = std::result::Result<T, FamilyError>;
