//! Window comparator on CMP1/CMP2, thresholds from the DAC1 outputs

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_semihosting as _;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use hc32_hal::cmp::{Comparator, NegativeInput, Window, WindowConfig};
use hc32_hal::dac::{Channel, Config as DacConfig, Dac};
use hc32_hal::{pac, prelude::*};

#[entry]
fn main() -> ! {
    let p = pac::Peripherals::take().unwrap();

    let mut pwc = p.PWC.constrain();

    let mut dac = Dac::new(p.DAC1, &mut pwc.fcg3);
    for (ch, level) in [(Channel::Ch1, 0x400), (Channel::Ch2, 0xC00)] {
        dac.init(ch, &DacConfig::default()).unwrap();
        dac.set_data(ch, level).unwrap();
        dac.start(ch).unwrap();
    }

    let cmp1 = Comparator::new(p.CMP1, &mut pwc.fcg3);
    let cmp2 = Comparator::new(p.CMP2, &mut pwc.fcg3);
    let mut window = Window::new(cmp1, cmp2);
    window.init(
        &WindowConfig::default().thresholds(NegativeInput::Inm3, NegativeInput::Inm4),
    );
    window.enable();

    let mut inside = !window.output();
    loop {
        let now = window.output();
        if now != inside {
            hprintln!("inside window: {}", now);
            inside = now;
        }
    }
}
