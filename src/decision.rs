//! The once-per-boot decision between booting unchanged, installing a staged
//! image, and rolling a failed update back.
//!
//! Rollback is checked before a pending swap on purpose: the rollback flag is
//! only ever armed as the side effect of an install, so it means "an update
//! was installed but never confirmed good". Consulting it first guarantees an
//! unconfirmed update is reverted before any newer staged image is considered,
//! so a fresh download can never paper over a still-unconfirmed one.

use crate::state::FlagStore;
use crate::{BootObserver, BootStatus, Error, Scratch, SlotFlash, swap};

/// Run the boot decision and bring flash and flags up to date.
///
/// Evaluates the persisted flags once, performs at most one slot exchange,
/// records the new flag state, unconditionally invalidates the download slot
/// and notifies `observer`. The returned status is final: the caller's only
/// remaining step is the hardware hand-off via [`crate::boot::Boot`].
///
/// Re-entrant from cold boot at any point: no state lives outside `flags` and
/// the flash contents, so a reset anywhere simply re-derives the decision.
pub async fn run<F, S, O>(
    flash: &mut F,
    flags: &mut S,
    scratch: &mut Scratch<'_>,
    observer: &mut O,
) -> Result<BootStatus, Error>
where
    F: SlotFlash,
    S: FlagStore,
    O: BootObserver,
{
    observer.bootloader_started();

    let status = if flags.should_rollback().await? {
        info!("rolling back to the previous firmware");
        swap::swap(flash, scratch, observer).await?;
        flags.commit_firmware().await?;
        flags.mark_no_new_firmware().await?;
        flags.mark_after_rollback().await?;
        BootStatus::Rollback
    } else if flags.has_firmware_to_swap().await? {
        info!("swapping in the downloaded firmware");
        swap::swap(flash, scratch, observer).await?;
        flags.mark_has_new_firmware().await?;
        flags.mark_not_after_rollback().await?;
        // Arm the safety net: unless the new image commits itself before the
        // next reset, the next boot reverts it.
        flags.mark_should_rollback().await?;
        BootStatus::Swap
    } else {
        info!("nothing to swap");
        flags.commit_firmware().await?;
        flags.mark_no_new_firmware().await?;
        BootStatus::Ok
    };

    // A consumed or stale staged image must never be swapped in again, no
    // matter which branch ran.
    flags.invalidate_download_slot().await?;
    observer.boot_completed(status);
    Ok(status)
}
