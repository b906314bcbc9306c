//! Sector-by-sector exchange of the two image slots.
//!
//! The engine is a blind content exchange: it attaches no meaning to either
//! slot and touches no persisted flag. The caller decides what the exchange
//! means (install or rollback) and records it afterwards.
//!
//! Per sector, both slots are read into the scratch buffers, both sectors are
//! erased, then both are reprogrammed with the other slot's contents. The
//! whole per-sector sequence runs inside [`SlotFlash::lockout`], so a reset
//! can only ever land between well-defined flash states. An interrupted swap
//! leaves already-processed sectors exchanged and unreached sectors untouched:
//! no sector is ever torn, and each sector pair always holds both source
//! sectors. There is no persisted progress; a restarted exchange runs from
//! sector zero again.

use crate::{BootObserver, Error, Scratch, Slot, SlotFlash};

/// Exchange the full contents of the application and download slots.
///
/// Reports `(sector, total)` to `observer` before each sector is processed.
/// Returns once every sector has been exchanged.
pub async fn swap<F: SlotFlash>(
    flash: &mut F,
    scratch: &mut Scratch<'_>,
    observer: &mut impl BootObserver,
) -> Result<(), Error> {
    let sector_size = flash.sector_size();
    if scratch.download.len() != sector_size || scratch.application.len() != sector_size {
        return Err(Error::ScratchLen);
    }

    let total = flash.sector_count().get();
    for index in 0..total {
        observer.flash_progress(index, total);
        flash
            .lockout(async |f| {
                f.read_sector(Slot::Download, index, &mut scratch.download[..])
                    .await?;
                f.read_sector(Slot::Application, index, &mut scratch.application[..])
                    .await?;
                f.erase_sector(Slot::Application, index).await?;
                f.erase_sector(Slot::Download, index).await?;
                f.program_sector(Slot::Application, index, &scratch.download[..])
                    .await?;
                f.program_sector(Slot::Download, index, &scratch.application[..])
                    .await?;
                Ok(())
            })
            .await?;
    }
    Ok(())
}
