use embedded_storage_async::nor_flash::{
    ErrorType, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
};

#[derive(Debug, Clone, Copy)]
pub struct RamNorError(NorFlashErrorKind);

impl NorFlashError for RamNorError {
    fn kind(&self) -> NorFlashErrorKind {
        self.0
    }
}

/// RAM-backed NOR flash: erase sets `0xff`, programming can only clear bits.
pub struct RamNorFlash<const SIZE: usize> {
    pub mem: [u8; SIZE],
}

impl<const SIZE: usize> RamNorFlash<SIZE> {
    pub const fn new() -> Self {
        RamNorFlash { mem: [0xff; SIZE] }
    }

    fn check(offset: u32, len: usize, align: usize) -> Result<(), RamNorError> {
        if offset as usize + len > SIZE {
            return Err(RamNorError(NorFlashErrorKind::OutOfBounds));
        }
        if offset as usize % align != 0 || len % align != 0 {
            return Err(RamNorError(NorFlashErrorKind::NotAligned));
        }
        Ok(())
    }
}

impl<const SIZE: usize> ErrorType for RamNorFlash<SIZE> {
    type Error = RamNorError;
}

impl<const SIZE: usize> ReadNorFlash for RamNorFlash<SIZE> {
    const READ_SIZE: usize = 1;

    async fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        Self::check(offset, bytes.len(), Self::READ_SIZE)?;
        let offset = offset as usize;
        bytes.copy_from_slice(&self.mem[offset..offset + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        SIZE
    }
}

impl<const SIZE: usize> NorFlash for RamNorFlash<SIZE> {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = 64;

    async fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        if to < from {
            return Err(RamNorError(NorFlashErrorKind::OutOfBounds));
        }
        Self::check(from, (to - from) as usize, Self::ERASE_SIZE)?;
        self.mem[from as usize..to as usize].fill(0xff);
        Ok(())
    }

    async fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        Self::check(offset, bytes.len(), Self::WRITE_SIZE)?;
        let offset = offset as usize;
        for (cell, byte) in self.mem[offset..offset + bytes.len()].iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        Ok(())
    }
}
