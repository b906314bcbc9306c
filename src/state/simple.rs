//! Simple straightforward implementation of keeping the flag state.
//!
//! This implementation focusses on correctness and ease, contrary to
//! efficiency and code size. Leverages `sequential-storage` and `postcard` to
//! store and serialize/deserialize the persisted flags in a dedicated flash
//! range, outside both image slots. Wear levelling and torn-write recovery
//! come from `sequential-storage`'s append-only map.

use core::ops::Range;

use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};
use serde::{Deserialize, Serialize};

use super::FlagStore;
use crate::Error;

/// Single map key under which the whole flag set lives.
const FLAGS_KEY: u8 = 0;

#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
struct Flags {
    new_firmware: bool,
    rollback_armed: bool,
    after_rollback: bool,
    download_valid: bool,
}

/// Flag store over any NOR flash, persisted on every mutation.
///
/// Besides the [`FlagStore`] operations the core consumes, this carries the
/// application- and updater-facing operations: validating a freshly staged
/// image and querying what the previous boot did.
pub struct SimpleFlagStore<F: NorFlash> {
    flash: F,
    range: Range<u32>,
    flags: Flags,
}

impl<F: NorFlash> SimpleFlagStore<F> {
    /// Load the flag state from `range` of `flash`.
    ///
    /// A blank or undecodable range yields the all-clear default, which maps
    /// to the no-op boot path.
    pub async fn new(mut flash: F, range: Range<u32>) -> Result<Self, Error> {
        let mut buffer = [0u8; 32];
        let stored: Option<&[u8]> = fetch_item(
            &mut flash,
            range.clone(),
            &mut NoCache::new(),
            &mut buffer,
            &FLAGS_KEY,
        )
        .await
        .map_err(|_| Error::Flash)?;
        let flags = match stored {
            Some(bytes) => postcard::from_bytes(bytes).unwrap_or_default(),
            None => Flags::default(),
        };
        Ok(SimpleFlagStore {
            flash,
            range,
            flags,
        })
    }

    /// Updater-side hook: declare the image staged in the download slot valid
    /// and ready to be installed on the next boot.
    pub async fn mark_download_slot_valid(&mut self) -> Result<(), Error> {
        self.flags.download_valid = true;
        self.persist().await
    }

    /// Did the previous boot restore the previous image?
    pub fn is_after_rollback(&self) -> bool {
        self.flags.after_rollback
    }

    /// Was a new image installed on the previous boot?
    pub fn has_new_firmware(&self) -> bool {
        self.flags.new_firmware
    }

    /// Hand the backing flash back, e.g. to share it with other partitions.
    pub fn release(self) -> F {
        self.flash
    }

    async fn persist(&mut self) -> Result<(), Error> {
        let mut serialized = [0u8; 8];
        let value: &[u8] =
            postcard::to_slice(&self.flags, &mut serialized).map_err(|_| Error::Flash)?;
        let mut buffer = [0u8; 32];
        store_item(
            &mut self.flash,
            self.range.clone(),
            &mut NoCache::new(),
            &mut buffer,
            &FLAGS_KEY,
            &value,
        )
        .await
        .map_err(|_| Error::Flash)
    }
}

impl<F: NorFlash> FlagStore for SimpleFlagStore<F> {
    async fn has_firmware_to_swap(&mut self) -> Result<bool, Error> {
        Ok(self.flags.download_valid)
    }

    async fn should_rollback(&mut self) -> Result<bool, Error> {
        Ok(self.flags.rollback_armed)
    }

    async fn mark_has_new_firmware(&mut self) -> Result<(), Error> {
        self.flags.new_firmware = true;
        self.persist().await
    }

    async fn mark_no_new_firmware(&mut self) -> Result<(), Error> {
        self.flags.new_firmware = false;
        self.persist().await
    }

    async fn mark_after_rollback(&mut self) -> Result<(), Error> {
        self.flags.after_rollback = true;
        self.persist().await
    }

    async fn mark_not_after_rollback(&mut self) -> Result<(), Error> {
        self.flags.after_rollback = false;
        self.persist().await
    }

    async fn mark_should_rollback(&mut self) -> Result<(), Error> {
        self.flags.rollback_armed = true;
        self.persist().await
    }

    async fn commit_firmware(&mut self) -> Result<(), Error> {
        self.flags.rollback_armed = false;
        self.persist().await
    }

    async fn invalidate_download_slot(&mut self) -> Result<(), Error> {
        self.flags.download_valid = false;
        self.persist().await
    }
}
