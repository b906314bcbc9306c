//! [`SlotFlash`] over any `embedded-storage-async` NOR flash device.
//!
//! Maps `(slot, sector)` pairs onto device offsets through a validated
//! [`SwapSpace`], so the swap engine never does raw address math. Platforms
//! that need more than the driver's per-operation guarantees (XIP parts where
//! code fetches must be suspended around erase/program) should wrap this type
//! or implement [`SlotFlash`] directly with a real
//! [`lockout`](SlotFlash::lockout).

use core::num::NonZeroU32;

use embedded_storage_async::nor_flash::NorFlash;

use crate::region::SwapSpace;
use crate::{Error, Slot, SlotFlash};

pub struct NorSlotFlash<F> {
    flash: F,
    space: SwapSpace,
}

impl<F: NorFlash> NorSlotFlash<F> {
    /// Wrap `flash`, checking that the swap space's sector size is a whole
    /// multiple of the device's erase and write granularities.
    pub fn new(flash: F, space: SwapSpace) -> Result<Self, Error> {
        let sector_size = space.sector_size() as usize;
        if sector_size % F::ERASE_SIZE != 0 || sector_size % F::WRITE_SIZE != 0 {
            return Err(Error::Misaligned);
        }
        Ok(NorSlotFlash { flash, space })
    }

    pub fn release(self) -> F {
        self.flash
    }
}

impl<F: NorFlash> SlotFlash for NorSlotFlash<F> {
    fn sector_size(&self) -> usize {
        self.space.sector_size() as usize
    }

    fn sector_count(&self) -> NonZeroU32 {
        self.space.sector_count()
    }

    async fn read_sector(&mut self, slot: Slot, index: u32, buf: &mut [u8]) -> Result<(), Error> {
        if buf.len() != self.sector_size() {
            return Err(Error::ScratchLen);
        }
        let addr = self.space.sector_addr(slot, index)?;
        self.flash.read(addr, buf).await.map_err(|_| Error::Flash)
    }

    async fn erase_sector(&mut self, slot: Slot, index: u32) -> Result<(), Error> {
        let addr = self.space.sector_addr(slot, index)?;
        let end = addr
            .checked_add(self.space.sector_size())
            .ok_or(Error::OutOfBounds)?;
        self.flash.erase(addr, end).await.map_err(|_| Error::Flash)
    }

    async fn program_sector(&mut self, slot: Slot, index: u32, data: &[u8]) -> Result<(), Error> {
        if data.len() != self.sector_size() {
            return Err(Error::ScratchLen);
        }
        let addr = self.space.sector_addr(slot, index)?;
        self.flash.write(addr, data).await.map_err(|_| Error::Flash)
    }
}
