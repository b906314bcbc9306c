//! Decision-and-swap core for a dual-slot, fail-safe firmware-update bootloader.
//!
//! Runs once per reset, before the application: it decides from persisted flag
//! state whether to boot unchanged, install a staged image by exchanging the
//! application and download slots sector by sector, or roll a failed update
//! back. The flag encoding, the flash driver and the final jump are injected
//! collaborators, which keeps the core runnable against in-memory fakes.
#![no_std]

// This mod MUST go first, so that the others see its macros.
mod fmt;

use core::num::NonZeroU32;

pub mod boot;
pub mod decision;
pub mod nor;
pub mod region;
pub mod state;
pub mod swap;

#[cfg(test)]
extern crate std;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A scratch buffer length does not match the device sector size.
    ScratchLen,
    /// A region base or length is not sector aligned, or a slot pair is malformed.
    Misaligned,
    /// Sector arithmetic landed outside its region.
    OutOfBounds,
    /// The flash device or the flag backing store failed. Fatal at this layer.
    Flash,
}

/// One of the two equally sized image slots being exchanged.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Slot {
    /// Slot the vector table is read from and code executes out of after boot.
    Application,
    /// Slot an external updater stages a new image into.
    Download,
}

/// Outcome of a single boot decision, reported to [`BootObserver::boot_completed`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStatus {
    /// Nothing pending, boot the current application unchanged.
    Ok,
    /// A staged image was installed this boot.
    Swap,
    /// A previously installed but never committed image was reverted.
    Rollback,
}

/// The two one-sector RAM buffers used while a sector pair is in flight.
///
/// Both must be exactly one sector long; the swap engine checks this before
/// touching flash. Bounding the buffers to a sector keeps RAM use independent
/// of the image size.
pub struct Scratch<'b> {
    pub download: &'b mut [u8],
    pub application: &'b mut [u8],
}

/// Sector-addressed access to the slot pair of a concrete flash device.
///
/// Implementations map `(slot, index)` onto the linker-defined slot regions,
/// see [`nor::NorSlotFlash`] for the generic NOR-flash adapter.
#[allow(async_fn_in_trait)]
pub trait SlotFlash {
    /// Erase granularity of the device, a power of two. Both slots span a
    /// whole number of sectors of this size.
    fn sector_size(&self) -> usize;

    /// Number of sectors per slot.
    fn sector_count(&self) -> NonZeroU32;

    /// Read sector `index` of `slot` into `buf` (one sector long).
    async fn read_sector(&mut self, slot: Slot, index: u32, buf: &mut [u8]) -> Result<(), Error>;

    /// Erase sector `index` of `slot`.
    async fn erase_sector(&mut self, slot: Slot, index: u32) -> Result<(), Error>;

    /// Program sector `index` of `slot` with `data` (one sector long).
    /// The sector must have been erased first.
    async fn program_sector(&mut self, slot: Slot, index: u32, data: &[u8]) -> Result<(), Error>;

    /// Power-loss-safe execution wrapper.
    ///
    /// Everything the swap engine does to one sector pair runs through this.
    /// The platform must guarantee that flash operations inside `op` are not
    /// interrupted by concurrent flash access (on XIP devices this means
    /// suspending anything fetching code from flash) and that a reset leaves
    /// the hardware pre- or post-operation, never torn mid-page.
    ///
    /// The default passes `op` straight through, for devices whose driver
    /// already provides these guarantees per operation.
    async fn lockout(
        &mut self,
        op: impl AsyncFnOnce(&mut Self) -> Result<(), Error>,
    ) -> Result<(), Error>
    where
        Self: Sized,
    {
        op(self).await
    }
}

/// Hooks invoked around the boot decision, all defaulted to no-ops.
pub trait BootObserver {
    /// Invoked once at entry of [`decision::run`].
    fn bootloader_started(&mut self) {}

    /// Invoked once per sector while a swap is in progress.
    fn flash_progress(&mut self, current_sector: u32, total_sectors: u32) {
        let _ = (current_sector, total_sectors);
    }

    /// Invoked once with the boot outcome, just before hand-off.
    fn boot_completed(&mut self, status: BootStatus) {
        let _ = status;
    }
}

/// Observe nothing.
impl BootObserver for () {}
