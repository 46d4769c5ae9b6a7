//! Checkpoint / revert support for collaborator state.
//!
//! A vault operation is one atomic unit: if any step fails, every token
//! movement, pool update and position change it already caused must be
//! undone.  Each collaborator therefore exposes its state as a
//! [`Journaled`] value the vault can snapshot before the call and roll
//! back to on error.
//!
//! # Contract
//!
//! - `revert_to(checkpoint())` restores the exact observable state at the
//!   time of the checkpoint, including state changed through *other*
//!   handles to the same collaborator.
//! - Checkpoints are only ever restored in LIFO order; implementations
//!   need not support restoring an older checkpoint after a newer one.

/// State that can be snapshotted and restored.
pub trait Journaled {
    /// Opaque snapshot of the state.
    type Checkpoint;

    /// Captures the current state.
    #[must_use]
    fn checkpoint(&self) -> Self::Checkpoint;

    /// Restores the state captured by `checkpoint`.
    fn revert_to(&self, checkpoint: Self::Checkpoint);
}
