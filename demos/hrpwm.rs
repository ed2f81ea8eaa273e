//! Complementary 50% PWM with dead time on HRPWM1

#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_semihosting as _;

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;
use hc32_hal::hrpwm::{
    Action, Channel, Common, Config, CountMode, DeadTimeConfig, Hrpwm, PwmConfig,
};
use hc32_hal::{pac, prelude::*};

#[entry]
fn main() -> ! {
    let p = pac::Peripherals::take().unwrap();

    let mut pwc = p.PWC.constrain();
    let mut common = Common::new(p.HRPWM_COMMON);
    let mut pwm = Hrpwm::new(p.HRPWM1, &mut pwc.fcg2);

    if let Err(e) = common.calibrate() {
        hprintln!("calibration: {}", e);
    }

    let period = 0x1000 << 6;
    pwm.init(
        &Config::default()
            .mode(CountMode::Triangle)
            .period(period),
    )
    .unwrap();

    let high_on_match = PwmConfig {
        compare: period / 2,
        valley: Action::Low,
        up_match_a: Action::High,
        down_match_a: Action::Low,
        ..PwmConfig::default()
    };
    pwm.channel(Channel::A).init(&high_on_match).unwrap();
    pwm.channel(Channel::B)
        .init(&PwmConfig {
            up_match_b: Action::Low,
            down_match_b: Action::High,
            valley: Action::High,
            ..high_on_match
        })
        .unwrap();

    pwm.set_dead_time_values(0x20 << 6, 0x20 << 6).unwrap();
    pwm.init_dead_time(&DeadTimeConfig {
        equal: true,
        ..DeadTimeConfig::default()
    });

    pwm.channel(Channel::A).enable();
    pwm.channel(Channel::B).enable();
    pwm.start(&common);

    #[allow(clippy::empty_loop)]
    loop {}
}
