//! Typed flash region descriptors.
//!
//! Slot bases and lengths come from the linker script on real hardware.
//! Wrapping them in validated descriptors replaces manual pointer arithmetic:
//! every sector address is derived from a bounds-checked `(slot, index)` pair,
//! which rules out off-by-sector mistakes at the edges of the slots.

use core::num::NonZeroU32;

use crate::{Error, Slot};

/// A fixed flash address range, in device offsets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Region {
    base: u32,
    len: u32,
}

impl Region {
    pub const fn new(base: u32, len: u32) -> Self {
        Region { base, len }
    }

    pub const fn base(&self) -> u32 {
        self.base
    }

    pub const fn len(&self) -> u32 {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn overlaps(&self, other: &Region) -> bool {
        // Widen so regions near the top of the address space cannot wrap.
        let self_end = self.base as u64 + self.len as u64;
        let other_end = other.base as u64 + other.len as u64;
        (self.base as u64) < other_end && (other.base as u64) < self_end
    }

    /// Device address of sector `index`, validated against this region.
    fn sector_addr(&self, sector_size: u32, index: u32) -> Result<u32, Error> {
        let offset = index.checked_mul(sector_size).ok_or(Error::OutOfBounds)?;
        if offset >= self.len {
            return Err(Error::OutOfBounds);
        }
        self.base.checked_add(offset).ok_or(Error::OutOfBounds)
    }
}

/// The slot pair that gets exchanged as a unit, plus the sector geometry.
///
/// The constructor enforces the layout invariants once, so address math done
/// during a swap cannot fail for geometry reasons.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwapSpace {
    application: Region,
    download: Region,
    sector_size: u32,
    sector_count: NonZeroU32,
}

impl SwapSpace {
    /// Build a swap space from the two slot regions.
    ///
    /// Requires a power-of-two sector size, sector-aligned bases, equal
    /// non-zero lengths that are a whole number of sectors, and slots that do
    /// not overlap.
    pub fn new(application: Region, download: Region, sector_size: u32) -> Result<Self, Error> {
        if !sector_size.is_power_of_two() {
            return Err(Error::Misaligned);
        }
        for region in [&application, &download] {
            if region.base % sector_size != 0 || region.len % sector_size != 0 {
                return Err(Error::Misaligned);
            }
            if region.base.checked_add(region.len).is_none() {
                return Err(Error::OutOfBounds);
            }
        }
        if application.len != download.len {
            return Err(Error::Misaligned);
        }
        if application.overlaps(&download) {
            return Err(Error::Misaligned);
        }
        let sector_count =
            NonZeroU32::new(application.len / sector_size).ok_or(Error::Misaligned)?;
        Ok(SwapSpace {
            application,
            download,
            sector_size,
            sector_count,
        })
    }

    pub const fn sector_size(&self) -> u32 {
        self.sector_size
    }

    pub const fn sector_count(&self) -> NonZeroU32 {
        self.sector_count
    }

    pub const fn region(&self, slot: Slot) -> Region {
        match slot {
            Slot::Application => self.application,
            Slot::Download => self.download,
        }
    }

    /// Device address of sector `index` within `slot`.
    pub fn sector_addr(&self, slot: Slot, index: u32) -> Result<u32, Error> {
        self.region(slot).sector_addr(self.sector_size, index)
    }
}
