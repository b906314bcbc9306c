use crate::Error;
use crate::state::FlagStore;

/// In-memory flag store with directly inspectable state.
#[derive(Debug, Default)]
pub struct MockFlags {
    pub new_firmware: bool,
    pub rollback_armed: bool,
    pub after_rollback: bool,
    pub download_valid: bool,
    pub commits: usize,
    pub invalidations: usize,
}

impl FlagStore for MockFlags {
    async fn has_firmware_to_swap(&mut self) -> Result<bool, Error> {
        Ok(self.download_valid)
    }

    async fn should_rollback(&mut self) -> Result<bool, Error> {
        Ok(self.rollback_armed)
    }

    async fn mark_has_new_firmware(&mut self) -> Result<(), Error> {
        self.new_firmware = true;
        Ok(())
    }

    async fn mark_no_new_firmware(&mut self) -> Result<(), Error> {
        self.new_firmware = false;
        Ok(())
    }

    async fn mark_after_rollback(&mut self) -> Result<(), Error> {
        self.after_rollback = true;
        Ok(())
    }

    async fn mark_not_after_rollback(&mut self) -> Result<(), Error> {
        self.after_rollback = false;
        Ok(())
    }

    async fn mark_should_rollback(&mut self) -> Result<(), Error> {
        self.rollback_armed = true;
        Ok(())
    }

    async fn commit_firmware(&mut self) -> Result<(), Error> {
        self.rollback_armed = false;
        self.commits += 1;
        Ok(())
    }

    async fn invalidate_download_slot(&mut self) -> Result<(), Error> {
        self.download_valid = false;
        self.invalidations += 1;
        Ok(())
    }
}
