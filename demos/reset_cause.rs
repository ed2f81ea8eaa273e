//! Prints why the chip came out of reset, then clears the flags

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_semihosting as _;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use hc32_hal::pwc::Protection;
use hc32_hal::rmu::ResetCause;
use hc32_hal::{pac, prelude::*};

#[entry]
fn main() -> ! {
    let p = pac::Peripherals::take().unwrap();

    let mut pwc = p.PWC.constrain();
    let mut rmu = p.RMU.constrain();

    let flags = rmu.status.flags();
    hprintln!("reset flags={:08x}", flags.bits());
    if flags.contains(ResetCause::POWER_ON) {
        hprintln!("power on reset");
    }
    if flags.intersects(ResetCause::WATCHDOG | ResetCause::SPECIAL_WATCHDOG) {
        hprintln!("watchdog reset");
    }
    if rmu.status.contains(ResetCause::SOFTWARE) {
        hprintln!("software reset");
    }

    pwc.fprc.unlock(Protection::Code1);
    rmu.status.clear(&pwc.fprc).unwrap();
    pwc.fprc.lock(Protection::Code1);

    #[allow(clippy::empty_loop)]
    loop {}
}
