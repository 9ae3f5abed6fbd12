//! Config Module
//!
//! Options controlling how a `MessageAccumulator` builds its tree.

use serde::{Deserialize, Serialize};

/// What to do when `pop` is called while the current context is the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum UnbalancedPopStrategy {
    /// Report an error; `try_pop` returns `Err`
    Error = 0,
    #[default]
    Warning = 1,
    Ignore = 2,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccumulatorOptions {
    /// Collapse whitespace runs in `add_text` to a single space
    pub collapse_whitespace: bool,
    pub unbalanced_pop: UnbalancedPopStrategy,
}

impl AccumulatorOptions {
    pub fn strict() -> Self {
        AccumulatorOptions {
            unbalanced_pop: UnbalancedPopStrategy::Error,
            ..Default::default()
        }
    }
}
