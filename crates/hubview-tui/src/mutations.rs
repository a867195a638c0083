//! Cross-slice state mutations.
//!
//! A slice reducer may only touch its own slice. When it needs another slice
//! to change, it returns a `StateMutation` and the root reducer applies it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    Repos(RepoMutation),
    /// Set or clear the status-line notice.
    SetNotice(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoMutation {
    /// Force the repository machine back to Idle and forget its data and task.
    Reset,
}
