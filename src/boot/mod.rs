//! Hand-off from the bootloader to the application.

#[cfg(feature = "cortex_m")]
pub mod cortex_m;

/// Final control transfer into the application slot.
///
/// Implementations must, in this order: mask every interrupt source and clear
/// pending flags, reset peripherals not needed for the jump to power-on
/// defaults, relocate the vector table base to `addr`, load the initial stack
/// pointer from that table's first entry, and branch to the reset handler in
/// its second entry. The ordering is load-bearing: the vector table base must
/// move before the stack pointer is read from it, and interrupts must be
/// fully masked before either, or a stray interrupt vectors into the old (or
/// garbage) table.
pub trait Boot {
    /// Jump to the image whose vector table starts at `addr`, never returning.
    ///
    /// # Safety
    ///
    /// `addr` must point at a valid vector table at the base of the
    /// application slot, and the boot decision must have fully completed.
    unsafe fn boot(addr: *const u32) -> !;
}
