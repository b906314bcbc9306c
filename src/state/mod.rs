//! Persisted flag state consumed by the boot decision.
//!
//! The on-flash encoding of these predicates (redundant words, majority
//! voting, dedicated sectors) is the store's own business; the core only
//! depends on the operations below. All of them survive power loss.

use crate::Error;

#[cfg(feature = "simple_state")]
pub mod simple;

/// The persisted flag operations the boot decision needs.
///
/// Queries and mutators are fallible because real stores live in flash. A
/// failure is fatal at this layer and aborts the boot decision.
#[allow(async_fn_in_trait)]
pub trait FlagStore {
    /// Does the download slot hold a validated image awaiting install?
    async fn has_firmware_to_swap(&mut self) -> Result<bool, Error>;

    /// Was the last installed image never committed?
    async fn should_rollback(&mut self) -> Result<bool, Error>;

    /// Record that an image was installed this boot.
    async fn mark_has_new_firmware(&mut self) -> Result<(), Error>;

    /// Clear the installed-this-boot record.
    async fn mark_no_new_firmware(&mut self) -> Result<(), Error>;

    /// Record that this boot restored the previous image.
    async fn mark_after_rollback(&mut self) -> Result<(), Error>;

    /// Clear the post-rollback record.
    async fn mark_not_after_rollback(&mut self) -> Result<(), Error>;

    /// Arm the auto-revert safety net for the next boot.
    async fn mark_should_rollback(&mut self) -> Result<(), Error>;

    /// Declare the currently active image accepted, disarming auto-revert.
    async fn commit_firmware(&mut self) -> Result<(), Error>;

    /// Mark any staged image as consumed. Called at the end of every boot.
    async fn invalidate_download_slot(&mut self) -> Result<(), Error>;
}
