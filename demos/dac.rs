//! Outputs a staircase on DAC1 channel 1

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_halt as _;

use cortex_m_rt::entry;
use hc32_hal::dac::{Alignment, Channel, Config, Dac};
use hc32_hal::{pac, prelude::*};

#[entry]
fn main() -> ! {
    let p = pac::Peripherals::take().unwrap();

    let mut pwc = p.PWC.constrain();
    let mut dac = Dac::new(p.DAC1, &mut pwc.fcg3);

    dac.init(
        Channel::Ch1,
        &Config::default().alignment(Alignment::Right).output(true),
    )
    .unwrap();
    dac.start(Channel::Ch1).unwrap();

    let mut level: u16 = 0;
    loop {
        dac.set_data(Channel::Ch1, level).unwrap();
        level = (level + 0x100) & 0x0FFF;
        for _ in 0..10_000 {
            cortex_m::asm::nop();
        }
    }
}
