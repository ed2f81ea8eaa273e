//! CRC32 of the standard check string

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_semihosting as _;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use hc32_hal::crc::{Config, Protocol};
use hc32_hal::{pac, prelude::*};

#[entry]
fn main() -> ! {
    let p = pac::Peripherals::take().unwrap();

    let mut pwc = p.PWC.constrain();
    let mut crc = p.CRC.constrain(&mut pwc.fcg0);

    crc.init(&Config::default().protocol(Protocol::Crc32));
    let val = crc.crc32_calculate(0xFFFF_FFFF, &b"123456789"[..]).unwrap();
    hprintln!("found={:08x}, expected={:08x}", val, 0xcbf43926u32);

    #[allow(clippy::empty_loop)]
    loop {}
}
