//! Error Module
//!
//! Error type for the checked builder operations.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccumulatorError {
    #[error("unbalanced pop #{count}: no component is open")]
    UnbalancedPop { count: usize },
}

pub type Result<T> = std::result::Result<T, AccumulatorError>;
