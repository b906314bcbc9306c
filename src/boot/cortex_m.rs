use crate::boot::Boot;

/// Hand-off for Cortex-M without support for TrustZone.
///
/// Masks PRIMASK, stops SysTick, disables and un-pends every NVIC line, then
/// lets [`cortex_m::asm::bootload`] move VTOR, reload MSP and jump.
pub struct SimpleCortexM;

impl Boot for SimpleCortexM {
    unsafe fn boot(addr: *const u32) -> ! {
        cortex_m::interrupt::disable();

        unsafe {
            let syst = &*cortex_m::peripheral::SYST::PTR;
            syst.csr.write(0);

            let nvic = &*cortex_m::peripheral::NVIC::PTR;
            for icer in nvic.icer.iter() {
                icer.write(u32::MAX);
            }
            for icpr in nvic.icpr.iter() {
                icpr.write(u32::MAX);
            }

            cortex_m::asm::bootload(addr)
        }
    }
}
