// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # High resolution PWM
//!
//! Six timer units (`HRPWM1`..`HRPWM6`) share one common block holding the delay line
//! calibration, the burst mode controller, the external event inputs and the software sync
//! registers. Data registers carry the count in bits `6..=21`; the low six bits are the
//! sub-cycle fraction. [`MAX_DATA`] is the largest value any of them accepts.
//!
//! ```ignore
//! let mut common = Common::new(dp.HRPWM_COMMON);
//! common.calibrate()?;
//!
//! let mut pwm = Hrpwm::new(dp.HRPWM1, &mut pwc.fcg2);
//! pwm.init(&Config::default().period(0x1000 << 6))?;
//! pwm.channel(Channel::A).init(&PwmConfig {
//!     compare: 0x800 << 6,
//!     valley: Action::High,
//!     up_match_a: Action::Low,
//!     ..PwmConfig::default()
//! })?;
//! pwm.start(&common);
//! ```

use core::ops::{BitOr, Deref};

use embedded_hal::PwmPin;

use crate::fcg::{Enable, Fcg2};
use crate::pac::hrpwm::{self, common};
use crate::pac::{Reg, HRPWM1, HRPWM2, HRPWM3, HRPWM4, HRPWM5, HRPWM6, HRPWM_COMMON};
use crate::poll::wait_until;
use crate::pwc::Fprc;
use crate::rmu::{Frst2, Reset};
use crate::Error;

/// Largest value of the period, compare and dead time registers
pub const MAX_DATA: u32 = hrpwm::DATA_RESET;

/// Largest value of the phase compare registers
pub const MAX_PHASE: u32 = hrpwm::phscmp::RESET;

/// Polling budget for a single calibration run
pub const CALIBRATION_TIMEOUT: u32 = 0x1000;

/// HRPWM timer unit
pub trait Instance: Deref<Target = hrpwm::RegisterBlock> + Enable<Bus = Fcg2> {
    /// One based unit number
    const UNIT: u8;
    /// Bit of the unit in the common sync registers
    const MASK: Units;
}

macro_rules! instance {
    ($($HRPWMX:ident: $unit:expr,)+) => {
        $(
            impl Instance for $HRPWMX {
                const UNIT: u8 = $unit;
                const MASK: Units = Units(1 << ($unit - 1));
            }
        )+
    };
}

instance! {
    HRPWM1: 1,
    HRPWM2: 2,
    HRPWM3: 3,
    HRPWM4: 4,
    HRPWM5: 5,
    HRPWM6: 6,
}

/// Set of units addressed by a software sync operation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Units(u32);

impl Units {
    pub const UNIT1: Self = Self(1 << 0);
    pub const UNIT2: Self = Self(1 << 1);
    pub const UNIT3: Self = Self(1 << 2);
    pub const UNIT4: Self = Self(1 << 3);
    pub const UNIT5: Self = Self(1 << 4);
    pub const UNIT6: Self = Self(1 << 5);
    pub const ALL: Self = Self(0x3F);

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for Units {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

fn check_data(value: u32) -> Result<(), Error> {
    if value > MAX_DATA {
        warn!("hrpwm data value {=u32:#x} out of range", value);
        Err(Error::InvalidParameter)
    } else {
        Ok(())
    }
}

fn write_flag(reg: &Reg<u32>, mask: u32, enable: bool) {
    if enable {
        reg.set_bits(mask);
    } else {
        reg.clear_bits(mask);
    }
}

/* Common block */

/// Input pin of the hardware trigger filters
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerPin {
    A,
    B,
    C,
    D,
}

impl TriggerPin {
    const fn shift(self) -> u32 {
        self as u32 * common::fcntr::STRIDE
    }
}

/// Sampling clock of a trigger pin filter
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinFilterClock {
    Pclk0,
    Pclk0Div4,
    Pclk0Div16,
    Pclk0Div64,
}

/// How the burst mode controller runs
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BurstOperation {
    /// One burst period per trigger
    SingleShot,
    /// Burst periods repeat until burst mode is turned off
    Continuous,
}

/// Clock of the burst mode counter
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BurstClock {
    /// Period point of unit `n`, `1..=6`
    UnitPeriod(u8),
    /// PCLK0 through the burst prescaler
    Pclk0,
}

impl BurstClock {
    fn bits(self) -> Result<u32, Error> {
        match self {
            BurstClock::UnitPeriod(n @ 1..=6) => Ok(u32::from(n - 1)),
            BurstClock::UnitPeriod(_) => Err(Error::InvalidParameter),
            BurstClock::Pclk0 => Ok(0xA),
        }
    }
}

/// Hardware triggers of burst mode, one bit per source across `BMSTRG1` and `BMSTRG2`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstTrigger(u64);

impl BurstTrigger {
    pub const NONE: Self = Self(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }
}

impl BitOr for BurstTrigger {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Burst mode controller settings
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstConfig {
    pub operation: BurstOperation,
    pub clock: BurstClock,
    /// PCLK0 prescaler as a power of two, `0..=15`
    pub prescaler: u8,
    pub period: u16,
    pub compare: u16,
    /// Restart the burst counter from zero on every trigger
    pub reload: bool,
    pub triggers: BurstTrigger,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            operation: BurstOperation::SingleShot,
            clock: BurstClock::UnitPeriod(1),
            prescaler: 0,
            period: 0,
            compare: 0,
            reload: false,
            triggers: BurstTrigger::NONE,
        }
    }
}

/// External event input
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExternalEvent {
    Ev1,
    Ev2,
    Ev3,
    Ev4,
    Ev5,
    Ev6,
    Ev7,
    Ev8,
    Ev9,
    Ev10,
}

impl ExternalEvent {
    const fn index(self) -> u32 {
        self as u32
    }

    /// Events 1 to 5 are the fast group in `EECR1`/`EEFLTCR1`.
    const fn is_fast_group(self) -> bool {
        self.index() < 5
    }

    /// Index inside its group of five.
    const fn slot(self) -> u32 {
        self.index() % 5
    }
}

/// Signal feeding an external event
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventSource {
    Src1,
    /// Source 2 with its second level select, `0..=3`, 0 picking CMP1
    Src2(u8),
    Src3,
    Src4,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidLevel {
    High,
    Low,
}

/// What of the event signal counts as an event
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidAction {
    Level,
    Rising,
    Falling,
    BothEdges,
}

/// External event settings
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventConfig {
    pub source: EventSource,
    pub level: ValidLevel,
    pub action: ValidAction,
    /// Bypass synchronisation, events 1 to 5 only
    pub fast: bool,
    /// Digital filter clock `0..=15`, 0 disabling the filter; events 6 to 10 only
    pub filter: u8,
    /// Use the generic event detector
    pub detect: bool,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            source: EventSource::Src1,
            level: ValidLevel::High,
            action: ValidAction::Level,
            fast: false,
            filter: 0,
            detect: false,
        }
    }
}

/// Sync output settings
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncOutputConfig {
    /// Sync source select, `0..=15`, 0 being the unit 1 valley
    pub source: u8,
    /// Match B counts while counting up instead of down
    pub match_b_up: bool,
    /// Emit a pulse instead of a level
    pub pulse: bool,
    pub pulse_width: u8,
}

impl Default for SyncOutputConfig {
    fn default() -> Self {
        Self {
            source: 0,
            match_b_up: false,
            pulse: false,
            pulse_width: 1,
        }
    }
}

/// Registers shared by all HRPWM units
pub struct Common {
    common: HRPWM_COMMON,
}

impl Common {
    pub fn new(common: HRPWM_COMMON) -> Self {
        Common { common }
    }

    /// Runs one calibration of the delay lines.
    ///
    /// PCLK0 must be running.
    pub fn calibrate(&mut self) -> Result<(), Error> {
        let calcr = &self.common.calcr;
        calcr.clear_bits(
            common::calcr::CALEN
                | common::calcr::CALPEN
                | common::calcr::ENDF
                | common::calcr::ERRF,
        );
        calcr.set_bits(common::calcr::CALEN);

        wait_until(CALIBRATION_TIMEOUT, || calcr.is_set(common::calcr::ENDF)).map_err(|e| {
            warn!("hrpwm calibration timed out");
            e
        })?;
        if calcr.is_set(common::calcr::ERRF) {
            warn!("hrpwm calibration failed");
            return Err(Error::Failed);
        }
        Ok(())
    }

    /// Programs the periodic calibration interval, `0..=15`, and starts periodic calibration.
    pub fn set_calibration_period(&mut self, period: u8) -> Result<(), Error> {
        if u32::from(period) > common::calcr::CALPRD >> common::calcr::CALPRD_POS {
            return Err(Error::InvalidParameter);
        }
        let calcr = &self.common.calcr;
        calcr.clear_bits(
            common::calcr::CALEN
                | common::calcr::CALPEN
                | common::calcr::ENDF
                | common::calcr::ERRF,
        );
        calcr.modify_bits(
            common::calcr::CALPRD,
            u32::from(period) << common::calcr::CALPRD_POS,
        );
        calcr.set_bits(common::calcr::CALPEN);
        Ok(())
    }

    pub fn set_periodic_calibration(&mut self, enable: bool) {
        write_flag(&self.common.calcr, common::calcr::CALPEN, enable);
    }

    /// Writes the reset value to every common register.
    pub fn deinit(&mut self) {
        let regs = &*self.common;
        regs.calcr.write(0);
        regs.scapr.write(0);
        regs.sstaidlr.write(0);
        regs.sstarunr1.write(0);
        regs.sstadidlr.write(0);
        regs.gctlr.write(0);
        regs.gbconr.write(common::gbconr::RESET);
        regs.gbsflr.write(0);
        regs.bmcr.write(0);
        regs.bmstrg1.write(0);
        regs.bmstrg2.write(0);
        regs.bmperar.write(common::bm::RESET);
        regs.bmperbr.write(common::bm::RESET);
        regs.bmcmar.write(common::bm::RESET);
        regs.bmcmbr.write(common::bm::RESET);
        regs.eecr1.write(0);
        regs.eecr2.write(0);
        regs.eecr3.write(0);
        regs.synocr.write(common::synocr::RESET);
        regs.eedselr.write(0);
        regs.fcntr.write(0);
        regs.sstar.write(0);
        regs.sstpr.write(0);
        regs.sclrr.write(0);
        regs.supdr.write(0);
    }

    /// Resets every unit and the common block through the RMU.
    pub fn reset(&mut self, frst2: &mut Frst2, fprc: &Fprc) -> Result<(), Error> {
        trace!("hrpwm reset");
        HRPWM_COMMON::reset(frst2, fprc)
    }

    /// Starts the counters of `units` together.
    pub fn start(&self, units: Units) {
        self.common.sstar.write(units.bits());
    }

    pub fn stop(&self, units: Units) {
        self.common.sstpr.write(units.bits());
    }

    /// Clears the counters of `units`.
    pub fn clear(&self, units: Units) {
        self.common.sclrr.write(units.bits());
    }

    /// Forces a buffer transfer on `units`.
    pub fn update(&self, units: Units) {
        self.common.supdr.write(units.bits());
    }

    pub fn set_trigger_pin_filter_clock(&mut self, pin: TriggerPin, clock: PinFilterClock) {
        self.common.fcntr.modify_bits(
            common::fcntr::NOFICKTA << pin.shift(),
            (clock as u32) << (common::fcntr::NOFICKTA_POS + pin.shift()),
        );
    }

    pub fn enable_trigger_pin_filter(&mut self, pin: TriggerPin) {
        self.common
            .fcntr
            .set_bits(common::fcntr::NOFIENTA << pin.shift());
    }

    pub fn disable_trigger_pin_filter(&mut self, pin: TriggerPin) {
        self.common
            .fcntr
            .clear_bits(common::fcntr::NOFIENTA << pin.shift());
    }

    fn modify_bmcr(&self, mask: u32, value: u32) {
        // BMF clears on 0, keep writing 1 to it
        self.common
            .bmcr
            .modify(|r| (r & !mask) | (value & mask) | common::bmcr::BMF);
    }

    /// Programs the burst mode controller. Burst mode stays in its current on/off state.
    pub fn init_burst_mode(&mut self, config: &BurstConfig) -> Result<(), Error> {
        if u32::from(config.prescaler) > common::bmcr::BMPSC >> common::bmcr::BMPSC_POS {
            return Err(Error::InvalidParameter);
        }
        let clock = config.clock.bits()?;

        let mut value = (clock << common::bmcr::BMCLKS_POS)
            | (u32::from(config.prescaler) << common::bmcr::BMPSC_POS);
        if config.operation == BurstOperation::Continuous {
            value |= common::bmcr::BMMD;
        }
        if config.reload {
            value |= common::bmcr::BMCTN;
        }
        self.modify_bmcr(
            common::bmcr::BMMD | common::bmcr::BMCLKS | common::bmcr::BMPSC | common::bmcr::BMCTN,
            value,
        );

        let regs = &*self.common;
        regs.bmperar.write(u32::from(config.period));
        regs.bmcmar.write(u32::from(config.compare));
        regs.bmstrg1.write(config.triggers.bits() as u32);
        regs.bmstrg2.write((config.triggers.bits() >> 32) as u32);
        Ok(())
    }

    pub fn set_burst_mode(&mut self, enable: bool) {
        let value = if enable { common::bmcr::BMEN } else { 0 };
        self.modify_bmcr(common::bmcr::BMEN, value);
    }

    /// `true` once a burst period has elapsed.
    pub fn burst_flag(&self) -> bool {
        self.common.bmcr.is_set(common::bmcr::BMF)
    }

    pub fn clear_burst_flag(&mut self) {
        self.common.bmcr.clear_bits(common::bmcr::BMF);
    }

    fn set_unit_burst_reset(&self, unit: u8, reset: bool) {
        let bit = 1 << (common::bmcr::BMTMR1_POS + u32::from(unit) - 1);
        self.modify_bmcr(bit, if reset { bit } else { 0 });
    }

    /// Configures external event `event`.
    ///
    /// Fast mode is only available on events 1 to 5 and the digital filter only on events 6 to
    /// 10; asking for either on the other group gives [`Error::InvalidParameter`].
    pub fn configure_event(
        &mut self,
        event: ExternalEvent,
        config: &EventConfig,
    ) -> Result<(), Error> {
        let (source, src2) = match config.source {
            EventSource::Src1 => (0, None),
            EventSource::Src2(sel @ 0..=3) => (1, Some(u32::from(sel))),
            EventSource::Src2(_) => return Err(Error::InvalidParameter),
            EventSource::Src3 => (2, None),
            EventSource::Src4 => (3, None),
        };
        if u32::from(config.filter) > common::eecr3::EE6F {
            return Err(Error::InvalidParameter);
        }
        if event.is_fast_group() && config.filter != 0 {
            return Err(Error::InvalidParameter);
        }
        if !event.is_fast_group() && config.fast {
            return Err(Error::InvalidParameter);
        }

        let mut field = source;
        if config.level == ValidLevel::Low {
            field |= common::eecr::POL;
        }
        field |= (config.action as u32) << common::eecr::SNS_POS;

        let regs = &*self.common;
        let shift = event.slot() * common::eecr::STRIDE;
        if event.is_fast_group() {
            if config.fast {
                field |= common::eecr::FAST;
            }
            regs.eecr1
                .modify_bits(common::eecr::FIELD1 << shift, field << shift);
        } else {
            regs.eecr2
                .modify_bits(common::eecr::FIELD2 << shift, field << shift);
            let shift = event.slot() * common::eecr3::STRIDE;
            regs.eecr3.modify_bits(
                common::eecr3::EE6F << shift,
                u32::from(config.filter) << shift,
            );
        }

        if let Some(sel) = src2 {
            let shift = match event.index() {
                n @ 0..=1 => common::gctlr::EE2SRC2_POS * n,
                n => common::gctlr::EE3SRC2_POS + common::gctlr::EE2SRC2_POS * (n - 2),
            };
            regs.gctlr
                .modify_bits(common::gctlr::EE1SRC2 << shift, sel << shift);
        }

        write_flag(&regs.eedselr, 1 << event.index(), config.detect);
        Ok(())
    }

    pub fn configure_sync_output(&mut self, config: &SyncOutputConfig) -> Result<(), Error> {
        if u32::from(config.source) > common::synocr::SRC {
            return Err(Error::InvalidParameter);
        }
        let mut value = u32::from(config.source)
            | (u32::from(config.pulse_width) << common::synocr::SYNCMP_POS);
        if config.match_b_up {
            value |= common::synocr::MATCHB_DIR;
        }
        if config.pulse {
            value |= common::synocr::PULSE;
        }
        self.common.synocr.write(value);
        Ok(())
    }

    /// Releases the common block
    pub fn free(self) -> HRPWM_COMMON {
        self.common
    }
}

/* Timer unit */

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountMode {
    Sawtooth,
    Triangle,
}

/// Unit settings
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub mode: CountMode,
    /// Keep counting after a period; otherwise the counter stops at the end of the period
    pub reload: bool,
    /// Period in data register units, at most [`MAX_DATA`]
    pub period: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: CountMode::Sawtooth,
            reload: true,
            period: MAX_DATA,
        }
    }
}

impl Config {
    pub fn mode(mut self, mode: CountMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn reload(mut self, reload: bool) -> Self {
        self.reload = reload;
        self
    }

    pub fn period(mut self, period: u32) -> Self {
        self.period = period;
        self
    }
}

/// General compare registers
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompareRegister {
    A,
    B,
    /// Buffer of A
    C,
    /// Buffer of B
    D,
    E,
    F,
    G,
    H,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpecialCompare {
    A,
    B,
    /// Buffer of A
    C,
    /// Buffer of B
    D,
}

/// Interrupt events, sharing their bit in `ICONR` and `STFLR1`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    MatchA,
    MatchB,
    MatchC,
    MatchD,
    MatchE,
    MatchF,
    Overflow,
    Underflow,
    DeadTimeError,
    SpecialAUp,
    SpecialADown,
    SpecialBUp,
    SpecialBDown,
}

impl Event {
    const fn mask(self) -> u32 {
        1 << self as u32
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    A,
    B,
}

/// Output level change on a counter event
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Low,
    High,
    Hold,
    Invert,
}

impl Action {
    const fn at(self, pos: u32) -> u32 {
        (self as u32) << pos
    }
}

/// Waveform of a PWM channel
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmConfig {
    /// Compare value of the channel, register A for channel A and B for channel B
    pub compare: u32,
    pub start: Action,
    pub stop: Action,
    pub peak: Action,
    pub valley: Action,
    pub up_match_a: Action,
    pub down_match_a: Action,
    pub up_match_b: Action,
    pub down_match_b: Action,
    pub up_match_e: Action,
    pub down_match_e: Action,
    pub up_match_f: Action,
    pub down_match_f: Action,
    pub up_match_special_a: Action,
    pub down_match_special_a: Action,
    pub up_match_special_b: Action,
    pub down_match_special_b: Action,
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self {
            compare: MAX_DATA,
            start: Action::Low,
            stop: Action::Low,
            peak: Action::Low,
            valley: Action::Low,
            up_match_a: Action::Low,
            down_match_a: Action::Low,
            up_match_b: Action::Low,
            down_match_b: Action::Low,
            up_match_e: Action::Low,
            down_match_e: Action::Low,
            up_match_f: Action::Low,
            down_match_f: Action::Low,
            up_match_special_a: Action::Low,
            down_match_special_a: Action::Low,
            up_match_special_b: Action::Low,
            down_match_special_b: Action::Low,
        }
    }
}

impl PwmConfig {
    fn port1(&self) -> u32 {
        use hrpwm::pcnr1::*;

        self.start.at(STAC_POS)
            | self.stop.at(STPC_POS)
            | self.peak.at(OVFC_POS)
            | self.valley.at(UDFC_POS)
            | self.up_match_a.at(CMAU_POS)
            | self.down_match_a.at(CMAD_POS)
            | self.up_match_b.at(CMBU_POS)
            | self.down_match_b.at(CMBD_POS)
    }

    fn port2(&self) -> u32 {
        use hrpwm::pcnr23::*;

        self.up_match_e.at(CME_POS)
            | self.up_match_f.at(CMF_POS)
            | self.up_match_special_a.at(CMSA_POS)
            | self.up_match_special_b.at(CMSB_POS)
    }

    fn port3(&self) -> u32 {
        use hrpwm::pcnr23::*;

        self.down_match_e.at(CME_POS)
            | self.down_match_f.at(CMF_POS)
            | self.down_match_special_a.at(CMSA_POS)
            | self.down_match_special_b.at(CMSB_POS)
    }
}

/// When `SWAPEN` takes effect
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwapMode {
    /// At the next buffer transfer
    Buffered,
    Immediate,
}

/// Output stage settings shared by both channels
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputConfig {
    pub swap_mode: SwapMode,
    /// Exchange the A and B outputs
    pub swap: bool,
    pub invert_a: bool,
    pub invert_b: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            swap_mode: SwapMode::Buffered,
            swap: false,
            invert_a: false,
            invert_b: false,
        }
    }
}

impl OutputConfig {
    fn bits(&self) -> u32 {
        let mut bits = 0;
        if self.swap_mode == SwapMode::Immediate {
            bits |= hrpwm::gconr1::SWAPMD;
        }
        if self.swap {
            bits |= hrpwm::gconr1::SWAPEN;
        }
        if self.invert_a {
            bits |= hrpwm::gconr1::INVCAEN;
        }
        if self.invert_b {
            bits |= hrpwm::gconr1::INVCBEN;
        }
        bits
    }
}

const OUTPUT_MASK: u32 =
    hrpwm::gconr1::SWAPMD | hrpwm::gconr1::SWAPEN | hrpwm::gconr1::INVCAEN | hrpwm::gconr1::INVCBEN;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeadTimeConfig {
    /// The down dead time follows the up value
    pub equal: bool,
    /// Load the up dead time through its buffer
    pub buffer_up: bool,
    /// Load the down dead time through its buffer
    pub buffer_down: bool,
}

/// Register group with a buffer stage
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferTarget {
    /// General compare A and E
    GeneralAE,
    /// General compare B and F
    GeneralBF,
    Period,
    SpecialA,
    SpecialB,
    EventWindow,
    EventOffset,
    /// Port and output control registers
    Control,
    DeadTime,
}

impl BufferTarget {
    const fn index(self) -> u32 {
        self as u32
    }
}

/// Counter points that move buffers into the active registers
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferCondition {
    Disabled,
    Peak,
    Valley,
    PeakAndValley,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BufferConfig {
    pub condition: TransferCondition,
    /// Also transfer when unit 1 fires a single shot. Units 2 to 6 only.
    pub on_unit1_single: bool,
    /// Also transfer right after a unit 1 single shot. Units 2 to 6 only.
    pub after_unit1_single: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            condition: TransferCondition::Disabled,
            on_unit1_single: false,
            after_unit1_single: false,
        }
    }
}

/// Event that delays entering idle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DelayTrigger {
    Event6,
    Event7,
    Event8,
    Event9,
    Event10,
}

/// Counter point reported as the complete period
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodPoint {
    /// Peak in sawtooth mode, valley in triangle mode
    Complete,
    Peak,
    Valley,
    PeakAndValley,
}

/// Level of a channel while idle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IdleOutput {
    /// The channel keeps its PWM output
    Off,
    Low,
    High,
    HighImpedance,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleDelayConfig {
    pub trigger: DelayTrigger,
    pub period_point: PeriodPoint,
    pub output_a: IdleOutput,
    pub output_b: IdleOutput,
}

impl Default for IdleDelayConfig {
    fn default() -> Self {
        Self {
            trigger: DelayTrigger::Event6,
            period_point: PeriodPoint::Complete,
            output_a: IdleOutput::Off,
            output_b: IdleOutput::Off,
        }
    }
}

/// How the unit behaves during burst mode idle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BurstOutputConfig {
    pub output_a: IdleOutput,
    pub output_b: IdleOutput,
    /// Enter idle on channel A after the dead time
    pub delay_a: bool,
    pub delay_b: bool,
    /// Channel B follows channel A into idle
    pub follow: bool,
    /// Reset the unit counter when burst mode starts
    pub reset_counter: bool,
}

impl Default for BurstOutputConfig {
    fn default() -> Self {
        Self {
            output_a: IdleOutput::Off,
            output_b: IdleOutput::Off,
            delay_a: false,
            delay_b: false,
            follow: false,
            reset_counter: false,
        }
    }
}

/// Periods counted between two valid periods
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriodCount {
    Disabled,
    Peak,
    Valley,
    PeakAndValley,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidPeriodConfig {
    pub count: PeriodCount,
    /// `0..=7`
    pub interval: u8,
    /// Special compare A events only fire in valid periods
    pub special_a: bool,
    pub special_b: bool,
}

impl Default for ValidPeriodConfig {
    fn default() -> Self {
        Self {
            count: PeriodCount::Disabled,
            interval: 0,
            special_a: false,
            special_b: false,
        }
    }
}

/// Unit local filtering of an external event
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventFilterConfig {
    /// Filter mode `0..=15`, 0 turning the filter off
    pub mode: u8,
    /// Latch the event until the end of the filter window
    pub latch: bool,
    /// End the window on timeout
    pub window_timeout: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

/// Shape of the event filter signal
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterSignalConfig {
    pub initial_high: bool,
    pub offset: u32,
    pub offset_direction: Direction,
    pub window: u32,
    pub window_direction: Direction,
}

impl Default for FilterSignalConfig {
    fn default() -> Self {
        Self {
            initial_high: false,
            offset: 0,
            offset_direction: Direction::Down,
            window: 0,
            window_direction: Direction::Down,
        }
    }
}

/// Counter point that triggers the DAC
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacTriggerSource {
    Valley,
    Peak,
    MatchE,
    MatchF,
}

/// DAC unit(s) synchronised by a trigger line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacTarget {
    None,
    Dac1,
    Dac2,
    Both,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DacTriggerConfig {
    pub source: DacTriggerSource,
    pub channel1: DacTarget,
    pub channel2: DacTarget,
}

impl Default for DacTriggerConfig {
    fn default() -> Self {
        Self {
            source: DacTriggerSource::Valley,
            channel1: DacTarget::None,
            channel2: DacTarget::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhaseConfig {
    /// Phase compare pair in use, `1..=5`
    pub index: u8,
    pub force_a: bool,
    pub force_b: bool,
    /// Take the period from the phase master
    pub period_link: bool,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            index: 1,
            force_a: false,
            force_b: false,
            period_link: false,
        }
    }
}

/// When a channel leaves the emergency brake state
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmbRelease {
    Immediate,
    Peak,
    Valley,
    PeakAndValley,
}

/// Channel level during an emergency brake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EmbPinState {
    /// No change
    Normal,
    HighImpedance,
    Low,
    High,
    Invert,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbConfig {
    /// EMB group `0..=3` the channel responds to
    pub group: u8,
    pub release: EmbRelease,
    pub pin: EmbPinState,
}

impl Default for EmbConfig {
    fn default() -> Self {
        Self {
            group: 0,
            release: EmbRelease::Immediate,
            pin: EmbPinState::Normal,
        }
    }
}

/// HRPWM timer unit driver
pub struct Hrpwm<HRPWM> {
    hrpwm: HRPWM,
}

impl<HRPWM: Instance> Hrpwm<HRPWM> {
    /// Enables the unit clock and takes ownership of it.
    pub fn new(hrpwm: HRPWM, fcg2: &mut Fcg2) -> Self {
        HRPWM::enable(fcg2);
        Hrpwm { hrpwm }
    }

    pub fn init(&mut self, config: &Config) -> Result<(), Error> {
        check_data(config.period)?;
        trace!("hrpwm{=u8} init", HRPWM::UNIT);

        let mut gconr = match config.mode {
            CountMode::Sawtooth => 0,
            CountMode::Triangle => 1 << hrpwm::gconr::MODE_POS,
        };
        if !config.reload {
            gconr |= hrpwm::gconr::OVSTP;
        }
        self.hrpwm.hrperar.write(config.period);
        self.hrpwm.gconr.write(gconr);
        Ok(())
    }

    /// Writes the reset value to every register of the unit.
    pub fn deinit(&mut self) {
        let regs = &*self.hrpwm;
        regs.gconr.write(0);
        regs.cnter.write(0);
        regs.updar.write(0);

        for reg in [
            &regs.hrperar,
            &regs.hrperbr,
            &regs.hrgcmar,
            &regs.hrgcmbr,
            &regs.hrgcmcr,
            &regs.hrgcmdr,
            &regs.hrgcmer,
            &regs.hrgcmfr,
            &regs.hrgcmgr,
            &regs.hrgcmhr,
            &regs.scmar,
            &regs.scmbr,
            &regs.scmcr,
            &regs.scmdr,
            &regs.hrdtuar,
            &regs.hrdtdar,
            &regs.hrdtubr,
            &regs.hrdtdbr,
        ] {
            reg.write(hrpwm::DATA_RESET);
        }

        for reg in [
            &regs.iconr,
            &regs.bconr1,
            &regs.bconr2,
            &regs.dconr,
            &regs.pcnar1,
            &regs.pcnbr1,
            &regs.vperr,
            &regs.stflr2,
            &regs.hstar1,
            &regs.hstar2,
            &regs.hclrr1,
            &regs.hclrr2,
            &regs.hcpar1,
            &regs.hcpbr1,
            &regs.hcpar2,
            &regs.hcpbr2,
            &regs.eefltcr1,
            &regs.eefltcr2,
            &regs.idlecr,
            &regs.gconr1,
            &regs.biconr,
            &regs.bpcnar1,
            &regs.bpcnbr1,
            &regs.bgconr1,
            &regs.scmaselr,
            &regs.cr,
            &regs.phsctl,
        ] {
            reg.write(0);
        }

        regs.stflr1.write(hrpwm::stflr1::RESET);

        for reg in [
            &regs.pcnar2,
            &regs.pcnbr2,
            &regs.pcnar3,
            &regs.pcnbr3,
            &regs.bpcnar2,
            &regs.bpcnbr2,
            &regs.bpcnar3,
            &regs.bpcnbr3,
        ] {
            reg.write(hrpwm::pcnr23::RESET);
        }

        for reg in [
            &regs.eefoffsetar,
            &regs.eefoffsetbr,
            &regs.eefwinar,
            &regs.eefwinbr,
        ] {
            reg.write(hrpwm::eef::RESET);
        }

        for pair in regs.phscmp.iter() {
            pair.a.write(hrpwm::phscmp::RESET);
            pair.b.write(hrpwm::phscmp::RESET);
        }
    }

    /// Starts the counter through the common sync start register.
    pub fn start(&mut self, common: &Common) {
        common.start(HRPWM::MASK);
    }

    pub fn stop(&mut self, common: &Common) {
        common.stop(HRPWM::MASK);
    }

    pub fn reset_counter(&mut self, common: &Common) {
        common.clear(HRPWM::MASK);
    }

    /// Forces a buffer transfer.
    pub fn update(&mut self, common: &Common) {
        common.update(HRPWM::MASK);
    }

    pub fn is_running(&self) -> bool {
        self.hrpwm.gconr.is_set(hrpwm::gconr::START)
    }

    pub fn is_counting_up(&self) -> bool {
        self.hrpwm.stflr1.is_set(hrpwm::stflr1::DIRF)
    }

    pub fn set_period(&mut self, period: u32) -> Result<(), Error> {
        check_data(period)?;
        self.hrpwm.hrperar.write(period);
        Ok(())
    }

    pub fn period(&self) -> u32 {
        self.hrpwm.hrperar.read()
    }

    fn compare_reg(&self, reg: CompareRegister) -> &Reg<u32> {
        let regs = &*self.hrpwm;
        match reg {
            CompareRegister::A => &regs.hrgcmar,
            CompareRegister::B => &regs.hrgcmbr,
            CompareRegister::C => &regs.hrgcmcr,
            CompareRegister::D => &regs.hrgcmdr,
            CompareRegister::E => &regs.hrgcmer,
            CompareRegister::F => &regs.hrgcmfr,
            CompareRegister::G => &regs.hrgcmgr,
            CompareRegister::H => &regs.hrgcmhr,
        }
    }

    pub fn set_compare(&mut self, reg: CompareRegister, value: u32) -> Result<(), Error> {
        check_data(value)?;
        self.compare_reg(reg).write(value);
        Ok(())
    }

    pub fn compare(&self, reg: CompareRegister) -> u32 {
        self.compare_reg(reg).read()
    }

    pub fn set_special_compare(&mut self, reg: SpecialCompare, value: u32) -> Result<(), Error> {
        check_data(value)?;
        let regs = &*self.hrpwm;
        let reg = match reg {
            SpecialCompare::A => &regs.scmar,
            SpecialCompare::B => &regs.scmbr,
            SpecialCompare::C => &regs.scmcr,
            SpecialCompare::D => &regs.scmdr,
        };
        reg.write(value);
        Ok(())
    }

    /// Current counter value.
    pub fn count(&self) -> u32 {
        self.hrpwm.cnter.read()
    }

    /// Starts listening for an `event`
    pub fn listen(&mut self, event: Event) {
        self.hrpwm.iconr.set_bits(event.mask());
    }

    /// Stops listening for an `event`
    pub fn unlisten(&mut self, event: Event) {
        self.hrpwm.iconr.clear_bits(event.mask());
    }

    pub fn is_pending(&self, event: Event) -> bool {
        self.hrpwm.stflr1.is_set(event.mask())
    }

    pub fn clear_pending(&mut self, event: Event) {
        self.hrpwm.stflr1.clear_bits(event.mask());
    }

    /// Borrows one of the two PWM channels.
    pub fn channel(&mut self, channel: Channel) -> Pwm<'_, HRPWM> {
        Pwm {
            unit: self,
            channel,
        }
    }

    pub fn configure_output(&mut self, config: &OutputConfig) {
        self.hrpwm.gconr1.modify_bits(OUTPUT_MASK, config.bits());
    }

    /// Same as [`Hrpwm::configure_output`], through the `BGCONR1` buffer.
    pub fn configure_output_buffered(&mut self, config: &OutputConfig) {
        self.hrpwm.bgconr1.modify_bits(OUTPUT_MASK, config.bits());
    }

    /// Writes the dead time control bits and turns dead time insertion on.
    pub fn init_dead_time(&mut self, config: &DeadTimeConfig) {
        let mut value = hrpwm::dconr::DTCEN;
        if config.equal {
            value |= hrpwm::dconr::SEPA;
        }
        if config.buffer_up {
            value |= hrpwm::dconr::DTBENU;
        }
        if config.buffer_down {
            value |= hrpwm::dconr::DTBEND;
        }
        self.hrpwm.dconr.modify_bits(
            hrpwm::dconr::DTCEN
                | hrpwm::dconr::SEPA
                | hrpwm::dconr::DTBENU
                | hrpwm::dconr::DTBEND,
            value,
        );
    }

    pub fn set_dead_time(&mut self, enable: bool) {
        write_flag(&self.hrpwm.dconr, hrpwm::dconr::DTCEN, enable);
    }

    pub fn set_dead_time_values(&mut self, up: u32, down: u32) -> Result<(), Error> {
        check_data(up)?;
        check_data(down)?;
        self.hrpwm.hrdtuar.write(up);
        self.hrpwm.hrdtdar.write(down);
        Ok(())
    }

    /// Sets the buffer transfer condition of `target`.
    ///
    /// The unit 1 single shot transfers only exist on units 2 to 6; requesting them on unit 1
    /// gives [`Error::InvalidParameter`].
    pub fn configure_buffer(
        &mut self,
        target: BufferTarget,
        config: &BufferConfig,
    ) -> Result<(), Error> {
        if HRPWM::UNIT == 1 && (config.on_unit1_single || config.after_unit1_single) {
            return Err(Error::InvalidParameter);
        }
        self.write_buffer(target, config);
        Ok(())
    }

    /// Stops all buffer transfers into `target`.
    pub fn disable_buffer(&mut self, target: BufferTarget) {
        self.write_buffer(target, &BufferConfig::default());
    }

    fn write_buffer(&mut self, target: BufferTarget, config: &BufferConfig) {
        let regs = &*self.hrpwm;
        let condition = config.condition as u32;

        match target {
            BufferTarget::GeneralAE
            | BufferTarget::GeneralBF
            | BufferTarget::Period
            | BufferTarget::SpecialA
            | BufferTarget::SpecialB => {
                let pos = target.index() * 2;
                regs.bconr1.modify_bits(0b11 << pos, condition << pos);
            }
            BufferTarget::EventWindow | BufferTarget::EventOffset | BufferTarget::Control => {
                let pos = (target.index() - BufferTarget::EventWindow.index()) * 2;
                regs.bconr2.modify_bits(0b11 << pos, condition << pos);
            }
            BufferTarget::DeadTime => {
                regs.dconr.modify_bits(
                    hrpwm::dconr::DTBTR,
                    condition << hrpwm::dconr::DTBTRU_POS,
                );
            }
        }

        if HRPWM::UNIT != 1 {
            let on = 1 << (hrpwm::bconr2::BTRU0P_POS + target.index());
            let after = 1 << (hrpwm::bconr2::BTRU0_POS + target.index());
            let mut value = 0;
            if config.on_unit1_single {
                value |= on;
            }
            if config.after_unit1_single {
                value |= after;
            }
            regs.bconr2.modify_bits(on | after, value);
        }
    }

    pub fn init_idle_delay(&mut self, config: &IdleDelayConfig) {
        let value = (config.trigger as u32)
            | ((config.output_a as u32) << hrpwm::idlecr::DLYCHA_POS)
            | ((config.output_b as u32) << hrpwm::idlecr::DLYCHB_POS);
        self.hrpwm.idlecr.modify_bits(
            hrpwm::idlecr::DLYEVSEL | hrpwm::idlecr::DLYCHA | hrpwm::idlecr::DLYCHB,
            value,
        );
        self.hrpwm.gconr1.modify_bits(
            hrpwm::gconr1::PRDSEL,
            (config.period_point as u32) << hrpwm::gconr1::PRDSEL_POS,
        );
    }

    /// Sets how the unit idles in burst mode. Only this unit's counter reset bit in the common
    /// burst control register is touched.
    pub fn init_burst_output(&mut self, common: &Common, config: &BurstOutputConfig) {
        let mut value = ((config.output_a as u32) << hrpwm::idlecr::IDLEBMA_POS)
            | ((config.output_b as u32) << hrpwm::idlecr::IDLEBMB_POS);
        if config.delay_a {
            value |= hrpwm::idlecr::DIDLA;
        }
        if config.delay_b {
            value |= hrpwm::idlecr::DIDLB;
        }
        if config.follow {
            value |= hrpwm::idlecr::FOLLOW;
        }
        self.hrpwm.idlecr.modify_bits(
            hrpwm::idlecr::IDLEBMA
                | hrpwm::idlecr::IDLEBMB
                | hrpwm::idlecr::DIDLA
                | hrpwm::idlecr::DIDLB
                | hrpwm::idlecr::FOLLOW,
            value,
        );
        common.set_unit_burst_reset(HRPWM::UNIT, config.reset_counter);
    }

    pub fn configure_valid_period(&mut self, config: &ValidPeriodConfig) -> Result<(), Error> {
        if u32::from(config.interval) > hrpwm::vperr::PCNTS >> hrpwm::vperr::PCNTS_POS {
            return Err(Error::InvalidParameter);
        }
        let mut value =
            (config.count as u32) | (u32::from(config.interval) << hrpwm::vperr::PCNTS_POS);
        if config.special_a {
            value |= hrpwm::vperr::SPPERIA;
        }
        if config.special_b {
            value |= hrpwm::vperr::SPPERIB;
        }
        self.hrpwm.vperr.modify_bits(
            hrpwm::vperr::PCNTE
                | hrpwm::vperr::PCNTS
                | hrpwm::vperr::SPPERIA
                | hrpwm::vperr::SPPERIB,
            value,
        );
        Ok(())
    }

    pub fn configure_event_filter(
        &mut self,
        event: ExternalEvent,
        config: &EventFilterConfig,
    ) -> Result<(), Error> {
        if u32::from(config.mode) > hrpwm::eefltcr::FLT {
            return Err(Error::InvalidParameter);
        }
        let mut value = u32::from(config.mode);
        if config.latch {
            value |= hrpwm::eefltcr::LAT;
        }
        if config.window_timeout {
            value |= hrpwm::eefltcr::TIMEOUT;
        }
        let reg = if event.is_fast_group() {
            &self.hrpwm.eefltcr1
        } else {
            &self.hrpwm.eefltcr2
        };
        let shift = event.slot() * hrpwm::eefltcr::STRIDE;
        reg.modify_bits(hrpwm::eefltcr::FIELD << shift, value << shift);
        Ok(())
    }

    pub fn configure_filter_signal(&mut self, config: &FilterSignalConfig) -> Result<(), Error> {
        check_data(config.offset)?;
        check_data(config.window)?;
        let dir = |d: Direction| match d {
            Direction::Up => 0,
            Direction::Down => hrpwm::eef::DIR,
        };

        let regs = &*self.hrpwm;
        write_flag(
            &regs.eefltcr1,
            hrpwm::eefltcr::EEINTPOL,
            config.initial_high,
        );
        regs.eefoffsetar
            .write(config.offset | dir(config.offset_direction));
        regs.eefwinar
            .write(config.window | dir(config.window_direction));
        Ok(())
    }

    pub fn configure_dac_trigger(&mut self, config: &DacTriggerConfig) {
        self.hrpwm.cr.modify_bits(
            hrpwm::cr::DACSRC | hrpwm::cr::DACSYNC1 | hrpwm::cr::DACSYNC2,
            (config.source as u32)
                | ((config.channel1 as u32) << hrpwm::cr::DACSYNC1_POS)
                | ((config.channel2 as u32) << hrpwm::cr::DACSYNC2_POS),
        );
    }

    /// Sets up phase shifting against unit 1, so units 2 to 6 only.
    pub fn configure_phase(&mut self, config: &PhaseConfig) -> Result<(), Error> {
        if HRPWM::UNIT == 1 || !(1..=5).contains(&config.index) {
            return Err(Error::InvalidParameter);
        }
        let mut value = u32::from(config.index - 1);
        if config.force_a {
            value |= hrpwm::phsctl::PHFCA;
        }
        if config.force_b {
            value |= hrpwm::phsctl::PHFCB;
        }
        self.hrpwm.phsctl.write(value);
        write_flag(&self.hrpwm.gconr1, hrpwm::gconr1::PRDLK, config.period_link);
        Ok(())
    }

    /// Loads phase compare pair `index`, `1..=5`. Units 2 to 6 only.
    pub fn set_phase_compare(&mut self, index: u8, a: u32, b: u32) -> Result<(), Error> {
        if HRPWM::UNIT == 1 {
            return Err(Error::InvalidParameter);
        }
        let pair = usize::from(index)
            .checked_sub(1)
            .and_then(|i| self.hrpwm.phscmp.get(i))
            .ok_or(Error::InvalidParameter)?;
        if a > MAX_PHASE || b > MAX_PHASE {
            return Err(Error::InvalidParameter);
        }
        pair.a.write(a);
        pair.b.write(b);
        Ok(())
    }

    /// Releases the unit
    pub fn free(self) -> HRPWM {
        self.hrpwm
    }
}

/// One PWM channel of a unit
pub struct Pwm<'a, HRPWM> {
    unit: &'a mut Hrpwm<HRPWM>,
    channel: Channel,
}

impl<'a, HRPWM: Instance> Pwm<'a, HRPWM> {
    fn port1(&self, buffered: bool) -> &Reg<u32> {
        let regs = &*self.unit.hrpwm;
        match (self.channel, buffered) {
            (Channel::A, false) => &regs.pcnar1,
            (Channel::A, true) => &regs.bpcnar1,
            (Channel::B, false) => &regs.pcnbr1,
            (Channel::B, true) => &regs.bpcnbr1,
        }
    }

    fn ports23(&self, buffered: bool) -> (&Reg<u32>, &Reg<u32>) {
        let regs = &*self.unit.hrpwm;
        match (self.channel, buffered) {
            (Channel::A, false) => (&regs.pcnar2, &regs.pcnar3),
            (Channel::A, true) => (&regs.bpcnar2, &regs.bpcnar3),
            (Channel::B, false) => (&regs.pcnbr2, &regs.pcnbr3),
            (Channel::B, true) => (&regs.bpcnbr2, &regs.bpcnbr3),
        }
    }

    fn compare_reg(&self, buffered: bool) -> &Reg<u32> {
        let regs = &*self.unit.hrpwm;
        match (self.channel, buffered) {
            (Channel::A, false) => &regs.hrgcmar,
            (Channel::A, true) => &regs.hrgcmcr,
            (Channel::B, false) => &regs.hrgcmbr,
            (Channel::B, true) => &regs.hrgcmdr,
        }
    }

    fn apply(&mut self, config: &PwmConfig, buffered: bool) -> Result<(), Error> {
        check_data(config.compare)?;
        self.compare_reg(buffered).write(config.compare);
        self.port1(buffered)
            .modify_bits(hrpwm::pcnr1::POLARITY, config.port1());
        let (port2, port3) = self.ports23(buffered);
        port2.modify_bits(hrpwm::pcnr23::POLARITY, config.port2());
        port3.modify_bits(hrpwm::pcnr23::POLARITY, config.port3());
        Ok(())
    }

    /// Programs the compare value and output actions of the channel.
    pub fn init(&mut self, config: &PwmConfig) -> Result<(), Error> {
        self.apply(config, false)
    }

    /// Programs the channel through its buffer registers, taking effect at the next transfer.
    pub fn init_buffered(&mut self, config: &PwmConfig) -> Result<(), Error> {
        self.apply(config, true)
    }

    fn emb_bits(config: &EmbConfig) -> Result<u32, Error> {
        if u32::from(config.group) > hrpwm::pcnr1::EMBS >> hrpwm::pcnr1::EMBS_POS {
            return Err(Error::InvalidParameter);
        }
        Ok((u32::from(config.group) << hrpwm::pcnr1::EMBS_POS)
            | ((config.release as u32) << hrpwm::pcnr1::EMBR_POS)
            | ((config.pin as u32) << hrpwm::pcnr1::EMBC_POS))
    }

    /// Sets how the channel reacts to an emergency brake.
    pub fn configure_emb(&mut self, config: &EmbConfig) -> Result<(), Error> {
        let bits = Self::emb_bits(config)?;
        self.port1(false).modify_bits(
            hrpwm::pcnr1::EMBS | hrpwm::pcnr1::EMBR | hrpwm::pcnr1::EMBC,
            bits,
        );
        Ok(())
    }

    pub fn configure_emb_buffered(&mut self, config: &EmbConfig) -> Result<(), Error> {
        let bits = Self::emb_bits(config)?;
        self.port1(true).modify_bits(
            hrpwm::pcnr1::EMBS | hrpwm::pcnr1::EMBR | hrpwm::pcnr1::EMBC,
            bits,
        );
        Ok(())
    }
}

impl<'a, HRPWM: Instance> PwmPin for Pwm<'a, HRPWM> {
    type Duty = u32;

    fn disable(&mut self) {
        self.port1(false).clear_bits(hrpwm::pcnr1::OUTEN);
    }

    fn enable(&mut self) {
        self.port1(false).set_bits(hrpwm::pcnr1::OUTEN);
    }

    fn get_duty(&self) -> u32 {
        self.compare_reg(false).read()
    }

    fn get_max_duty(&self) -> u32 {
        self.unit.period()
    }

    fn set_duty(&mut self, duty: u32) {
        let max = self.get_max_duty();
        self.compare_reg(false).write(duty.min(max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit<HRPWM: Instance>(raw: HRPWM) -> (Hrpwm<HRPWM>, &'static hrpwm::RegisterBlock) {
        let mut pwc = crate::pwc::mock();
        let rb = unsafe { &*(&*raw as *const hrpwm::RegisterBlock) };
        (Hrpwm::new(raw, &mut pwc.fcg2), rb)
    }

    fn common() -> (Common, &'static common::RegisterBlock) {
        let raw = HRPWM_COMMON::mock();
        let rb = unsafe { &*raw.as_ptr() };
        (Common::new(raw), rb)
    }

    #[test]
    fn calibration_times_out_without_end_flag() {
        let (mut common, rb) = common();
        rb.calcr
            .write(common::calcr::CALPEN | common::calcr::ERRF);
        assert_eq!(common.calibrate(), Err(Error::Timeout));
        assert_eq!(rb.calcr.read(), common::calcr::CALEN);
    }

    #[test]
    fn calibration_period_restarts_periodic_mode() {
        let (mut common, rb) = common();
        assert_eq!(
            common.set_calibration_period(16),
            Err(Error::InvalidParameter)
        );
        rb.calcr.write(common::calcr::CALEN | common::calcr::ENDF);
        common.set_calibration_period(0x9).unwrap();
        assert_eq!(rb.calcr.read(), (0x9 << 4) | common::calcr::CALPEN);
        common.set_periodic_calibration(false);
        assert_eq!(rb.calcr.read(), 0x9 << 4);
    }

    #[test]
    fn init_writes_period_and_mode() {
        let (mut pwm, rb) = unit(HRPWM2::mock());
        pwm.init(
            &Config::default()
                .mode(CountMode::Triangle)
                .reload(false)
                .period(0x1000 << 6),
        )
        .unwrap();
        assert_eq!(rb.hrperar.read(), 0x4_0000);
        assert_eq!(rb.gconr.read(), (1 << 1) | hrpwm::gconr::OVSTP);

        assert_eq!(
            pwm.init(&Config::default().period(MAX_DATA + 1)),
            Err(Error::InvalidParameter)
        );
        assert_eq!(pwm.period(), 0x4_0000);
    }

    #[test]
    fn deinit_restores_reset_values() {
        let (mut pwm, rb) = unit(HRPWM1::mock());
        rb.gconr.write(0x0000_0103);
        rb.iconr.write(0x1FFF);
        pwm.deinit();

        assert_eq!(rb.gconr.read(), 0);
        assert_eq!(rb.iconr.read(), 0);
        assert_eq!(rb.hrperar.read(), 0x003F_FFC0);
        assert_eq!(rb.hrgcmhr.read(), 0x003F_FFC0);
        assert_eq!(rb.hrdtdbr.read(), 0x003F_FFC0);
        assert_eq!(rb.pcnar2.read(), 0x000A_AAAA);
        assert_eq!(rb.bpcnbr3.read(), 0x000A_AAAA);
        assert_eq!(rb.eefwinbr.read(), 0x0040_0000);
        assert_eq!(rb.stflr1.read(), 0x8000_0000);
        assert_eq!(rb.phscmp[4].b.read(), 0x007F_FFC0);
    }

    #[test]
    fn common_deinit_restores_reset_values() {
        let (mut common, rb) = common();
        rb.bmcr.write(0x8000_0001);
        rb.gbsflr.write(0x3F);
        rb.sstar.write(0x3F);
        rb.sstpr.write(0x3F);
        rb.sclrr.write(0x3F);
        rb.supdr.write(0x3F);
        common.deinit();
        assert_eq!(rb.bmcr.read(), 0);
        assert_eq!(rb.gbsflr.read(), 0);
        assert_eq!(rb.sstar.read(), 0);
        assert_eq!(rb.sstpr.read(), 0);
        assert_eq!(rb.sclrr.read(), 0);
        assert_eq!(rb.supdr.read(), 0);
        assert_eq!(rb.gbconr.read(), 0x3F);
        assert_eq!(rb.bmperar.read(), 0xFFFF);
        assert_eq!(rb.bmcmbr.read(), 0xFFFF);
        assert_eq!(rb.synocr.read(), 0x1000);
    }

    #[test]
    fn sync_registers_address_the_unit_bit() {
        let (common, crb) = common();
        let (mut pwm, _) = unit(HRPWM4::mock());
        pwm.start(&common);
        assert_eq!(crb.sstar.read(), 1 << 3);
        pwm.stop(&common);
        assert_eq!(crb.sstpr.read(), 1 << 3);
        pwm.reset_counter(&common);
        assert_eq!(crb.sclrr.read(), 1 << 3);
        common.update(Units::UNIT1 | Units::UNIT6);
        assert_eq!(crb.supdr.read(), 0x21);
    }

    #[test]
    fn pwm_channel_b_programs_compare_and_actions() {
        let (mut pwm, rb) = unit(HRPWM3::mock());
        rb.pcnbr1.write(hrpwm::pcnr1::OUTEN);
        rb.pcnbr2.write(hrpwm::pcnr23::RESET);

        pwm.channel(Channel::B)
            .init(&PwmConfig {
                compare: 0x100 << 6,
                valley: Action::High,
                up_match_b: Action::Invert,
                up_match_e: Action::Hold,
                down_match_special_b: Action::High,
                ..PwmConfig::default()
            })
            .unwrap();

        assert_eq!(rb.hrgcmbr.read(), 0x4000);
        assert_eq!(rb.hrgcmar.read(), 0);
        assert_eq!(
            rb.pcnbr1.read(),
            hrpwm::pcnr1::OUTEN | (1 << 6) | (3 << 12)
        );
        assert_eq!(rb.pcnbr2.read(), 0x000A_AA00 | 2);
        assert_eq!(rb.pcnbr3.read(), 1 << 6);
    }

    #[test]
    fn buffered_channel_a_uses_buffer_registers() {
        let (mut pwm, rb) = unit(HRPWM1::mock());
        pwm.channel(Channel::A)
            .init_buffered(&PwmConfig {
                compare: 0x40,
                start: Action::High,
                ..PwmConfig::default()
            })
            .unwrap();
        assert_eq!(rb.hrgcmcr.read(), 0x40);
        assert_eq!(rb.bpcnar1.read(), 1);
        assert_eq!(rb.pcnar1.read(), 0);

        assert_eq!(
            pwm.channel(Channel::A).init(&PwmConfig {
                compare: MAX_DATA + 1,
                ..PwmConfig::default()
            }),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn pwm_pin_duty_and_enable() {
        let (mut pwm, rb) = unit(HRPWM5::mock());
        pwm.set_period(0x2000).unwrap();
        let mut ch = pwm.channel(Channel::A);
        ch.enable();
        ch.set_duty(0x1000);
        assert_eq!(ch.get_duty(), 0x1000);
        assert_eq!(ch.get_max_duty(), 0x2000);
        ch.set_duty(0x3000);
        assert_eq!(ch.get_duty(), 0x2000);
        assert!(rb.pcnar1.is_set(hrpwm::pcnr1::OUTEN));
        ch.disable();
        assert_eq!(rb.pcnar1.read(), 0);
    }

    #[test]
    fn output_and_dead_time() {
        let (mut pwm, rb) = unit(HRPWM2::mock());
        pwm.configure_output(&OutputConfig {
            swap: true,
            invert_b: true,
            ..OutputConfig::default()
        });
        assert_eq!(rb.gconr1.read(), (1 << 1) | (1 << 3));
        pwm.configure_output_buffered(&OutputConfig {
            swap_mode: SwapMode::Immediate,
            ..OutputConfig::default()
        });
        assert_eq!(rb.bgconr1.read(), 1);

        pwm.init_dead_time(&DeadTimeConfig {
            equal: true,
            buffer_up: true,
            buffer_down: false,
        });
        assert_eq!(
            rb.dconr.read(),
            hrpwm::dconr::DTCEN | hrpwm::dconr::SEPA | hrpwm::dconr::DTBENU
        );
        pwm.set_dead_time(false);
        assert!(!rb.dconr.is_set(hrpwm::dconr::DTCEN));
        pwm.set_dead_time_values(0x80, 0xC0).unwrap();
        assert_eq!((rb.hrdtuar.read(), rb.hrdtdar.read()), (0x80, 0xC0));
    }

    #[test]
    fn buffer_single_shot_transfers_need_units_2_to_6() {
        let (mut pwm1, _) = unit(HRPWM1::mock());
        let single = BufferConfig {
            condition: TransferCondition::Peak,
            on_unit1_single: true,
            after_unit1_single: false,
        };
        assert_eq!(
            pwm1.configure_buffer(BufferTarget::Period, &single),
            Err(Error::InvalidParameter)
        );

        let (mut pwm6, rb) = unit(HRPWM6::mock());
        pwm6.configure_buffer(BufferTarget::Period, &single).unwrap();
        assert_eq!(rb.bconr1.read(), 1 << 4);
        assert_eq!(rb.bconr2.read(), 1 << (8 + 2));

        pwm6.configure_buffer(
            BufferTarget::DeadTime,
            &BufferConfig {
                condition: TransferCondition::PeakAndValley,
                on_unit1_single: false,
                after_unit1_single: true,
            },
        )
        .unwrap();
        assert_eq!(rb.dconr.read(), 3 << 4);
        assert_eq!(rb.bconr2.read(), (1 << 10) | (1 << 28));

        pwm6.configure_buffer(
            BufferTarget::Control,
            &BufferConfig {
                condition: TransferCondition::Valley,
                ..BufferConfig::default()
            },
        )
        .unwrap();
        assert_eq!(rb.bconr2.read(), (1 << 10) | (1 << 28) | (2 << 4));

        pwm6.disable_buffer(BufferTarget::Period);
        assert_eq!(rb.bconr1.read(), 0);
        assert_eq!(rb.bconr2.read(), (1 << 28) | (2 << 4));
    }

    #[test]
    fn burst_output_touches_only_own_counter_reset_bit() {
        let (common, crb) = common();
        crb.bmcr.write(0x003F_0000 | common::bmcr::BMEN);

        let (mut pwm, rb) = unit(HRPWM3::mock());
        pwm.init_burst_output(
            &common,
            &BurstOutputConfig {
                output_a: IdleOutput::High,
                follow: true,
                reset_counter: false,
                ..BurstOutputConfig::default()
            },
        );
        assert_eq!(rb.idlecr.read(), (2 << 8) | hrpwm::idlecr::FOLLOW);
        assert_eq!(
            crb.bmcr.read(),
            0x003B_0000 | common::bmcr::BMEN | common::bmcr::BMF
        );

        pwm.init_burst_output(
            &common,
            &BurstOutputConfig {
                reset_counter: true,
                ..BurstOutputConfig::default()
            },
        );
        assert_eq!(
            crb.bmcr.read() & common::bmcr::BMTMR,
            0x003F_0000
        );
    }

    #[test]
    fn burst_mode_init_and_flag() {
        let (mut common, rb) = common();
        assert_eq!(
            common.init_burst_mode(&BurstConfig {
                clock: BurstClock::UnitPeriod(7),
                ..BurstConfig::default()
            }),
            Err(Error::InvalidParameter)
        );

        common
            .init_burst_mode(&BurstConfig {
                operation: BurstOperation::Continuous,
                clock: BurstClock::UnitPeriod(2),
                prescaler: 3,
                period: 0x1234,
                compare: 0x0100,
                reload: true,
                triggers: BurstTrigger::from_bits(0x0000_0001_8000_0002),
            })
            .unwrap();
        assert_eq!(
            rb.bmcr.read(),
            common::bmcr::BMF
                | common::bmcr::BMCTN
                | (3 << 6)
                | (1 << 2)
                | common::bmcr::BMMD
        );
        assert_eq!(rb.bmperar.read(), 0x1234);
        assert_eq!(rb.bmcmar.read(), 0x0100);
        assert_eq!(rb.bmstrg1.read(), 0x8000_0002);
        assert_eq!(rb.bmstrg2.read(), 1);

        common.set_burst_mode(true);
        assert!(rb.bmcr.is_set(common::bmcr::BMEN));
        assert!(common.burst_flag());
        common.clear_burst_flag();
        assert!(!common.burst_flag());
        assert!(rb.bmcr.is_set(common::bmcr::BMEN));
    }

    #[test]
    fn external_event_fields() {
        let (mut common, rb) = common();
        common
            .configure_event(
                ExternalEvent::Ev2,
                &EventConfig {
                    source: EventSource::Src2(2),
                    level: ValidLevel::Low,
                    action: ValidAction::Rising,
                    fast: true,
                    detect: true,
                    ..EventConfig::default()
                },
            )
            .unwrap();
        assert_eq!(rb.eecr1.read(), (1 | (1 << 2) | (1 << 3) | (1 << 5)) << 6);
        assert_eq!(rb.gctlr.read(), 2 << 2);
        assert_eq!(rb.eedselr.read(), 1 << 1);

        common
            .configure_event(
                ExternalEvent::Ev8,
                &EventConfig {
                    source: EventSource::Src2(1),
                    action: ValidAction::BothEdges,
                    filter: 5,
                    ..EventConfig::default()
                },
            )
            .unwrap();
        assert_eq!(rb.eecr2.read(), (1 | (3 << 3)) << 12);
        assert_eq!(rb.eecr3.read(), 5 << 8);
        assert_eq!(rb.gctlr.read(), (2 << 2) | (1 << (8 + 10)));

        assert_eq!(
            common.configure_event(
                ExternalEvent::Ev6,
                &EventConfig {
                    fast: true,
                    ..EventConfig::default()
                }
            ),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            common.configure_event(
                ExternalEvent::Ev1,
                &EventConfig {
                    filter: 1,
                    ..EventConfig::default()
                }
            ),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn trigger_pin_filters() {
        let (mut common, rb) = common();
        common.set_trigger_pin_filter_clock(TriggerPin::C, PinFilterClock::Pclk0Div16);
        common.enable_trigger_pin_filter(TriggerPin::C);
        common.enable_trigger_pin_filter(TriggerPin::A);
        assert_eq!(rb.fcntr.read(), (2 << 9) | (1 << 8) | 1);
        common.disable_trigger_pin_filter(TriggerPin::C);
        assert_eq!(rb.fcntr.read(), (2 << 9) | 1);
    }

    #[test]
    fn event_filter_and_signal() {
        let (mut pwm, rb) = unit(HRPWM2::mock());
        pwm.configure_event_filter(
            ExternalEvent::Ev7,
            &EventFilterConfig {
                mode: 3,
                latch: true,
                window_timeout: false,
            },
        )
        .unwrap();
        assert_eq!(rb.eefltcr2.read(), (3 | (1 << 4)) << 6);

        assert_eq!(
            pwm.configure_filter_signal(&FilterSignalConfig {
                initial_high: true,
                offset: 0x200,
                offset_direction: Direction::Up,
                window: 0x400,
                ..FilterSignalConfig::default()
            }),
            Ok(())
        );
        assert_eq!(rb.eefltcr1.read(), hrpwm::eefltcr::EEINTPOL);
        assert_eq!(rb.eefoffsetar.read(), 0x200);
        assert_eq!(rb.eefwinar.read(), 0x400 | hrpwm::eef::DIR);
    }

    #[test]
    fn valid_period_phase_and_emb() {
        let (mut pwm, rb) = unit(HRPWM4::mock());
        assert_eq!(
            pwm.configure_valid_period(&ValidPeriodConfig {
                interval: 8,
                ..ValidPeriodConfig::default()
            }),
            Err(Error::InvalidParameter)
        );
        pwm.configure_valid_period(&ValidPeriodConfig {
            count: PeriodCount::Valley,
            interval: 5,
            special_a: false,
            special_b: true,
        })
        .unwrap();
        assert_eq!(rb.vperr.read(), 2 | (5 << 8) | (1 << 17));

        pwm.configure_phase(&PhaseConfig {
            index: 3,
            force_b: true,
            period_link: true,
            ..PhaseConfig::default()
        })
        .unwrap();
        assert_eq!(rb.phsctl.read(), 2 | hrpwm::phsctl::PHFCB);
        assert!(rb.gconr1.is_set(hrpwm::gconr1::PRDLK));
        assert_eq!(
            pwm.set_phase_compare(0, 0, 0),
            Err(Error::InvalidParameter)
        );
        pwm.set_phase_compare(5, 0x40, 0x80).unwrap();
        assert_eq!((rb.phscmp[4].a.read(), rb.phscmp[4].b.read()), (0x40, 0x80));

        pwm.channel(Channel::B)
            .configure_emb(&EmbConfig {
                group: 2,
                release: EmbRelease::Valley,
                pin: EmbPinState::Low,
            })
            .unwrap();
        assert_eq!(rb.pcnbr1.read(), (2 << 16) | (2 << 18) | (2 << 20));
        pwm.channel(Channel::A)
            .configure_emb_buffered(&EmbConfig::default())
            .unwrap();
        assert_eq!(rb.bpcnar1.read(), 0);
    }

    #[test]
    fn phase_shift_is_rejected_on_unit_1() {
        let (mut pwm, rb) = unit(HRPWM1::mock());
        assert_eq!(
            pwm.configure_phase(&PhaseConfig {
                index: 2,
                period_link: true,
                ..PhaseConfig::default()
            }),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            pwm.set_phase_compare(1, 0x40, 0x80),
            Err(Error::InvalidParameter)
        );
        assert_eq!(rb.phsctl.read(), 0);
        assert_eq!(rb.gconr1.read(), 0);
        assert_eq!(rb.phscmp[0].a.read(), 0);

        let (mut pwm2, rb2) = unit(HRPWM2::mock());
        pwm2.configure_phase(&PhaseConfig {
            index: 2,
            ..PhaseConfig::default()
        })
        .unwrap();
        assert_eq!(rb2.phsctl.read(), 1);
    }

    #[test]
    fn idle_delay_sync_and_dac_trigger() {
        let (mut pwm, rb) = unit(HRPWM1::mock());
        pwm.init_idle_delay(&IdleDelayConfig {
            trigger: DelayTrigger::Event9,
            period_point: PeriodPoint::Valley,
            output_a: IdleOutput::Low,
            output_b: IdleOutput::HighImpedance,
        });
        assert_eq!(rb.idlecr.read(), 3 | (1 << 4) | (3 << 6));
        assert_eq!(rb.gconr1.read(), 2 << 4);

        pwm.configure_dac_trigger(&DacTriggerConfig {
            source: DacTriggerSource::MatchE,
            channel1: DacTarget::Dac2,
            channel2: DacTarget::Both,
        });
        assert_eq!(rb.cr.read(), 2 | (2 << 4) | (3 << 6));

        let (mut common, crb) = common();
        common
            .configure_sync_output(&SyncOutputConfig {
                source: 4,
                pulse: true,
                pulse_width: 0x20,
                ..SyncOutputConfig::default()
            })
            .unwrap();
        assert_eq!(crb.synocr.read(), 4 | common::synocr::PULSE | (0x20 << 8));
    }

    #[test]
    fn interrupt_events() {
        let (mut pwm, rb) = unit(HRPWM6::mock());
        pwm.listen(Event::Overflow);
        pwm.listen(Event::SpecialBDown);
        assert_eq!(rb.iconr.read(), (1 << 6) | (1 << 12));
        pwm.unlisten(Event::Overflow);
        assert_eq!(rb.iconr.read(), 1 << 12);

        rb.stflr1.write(hrpwm::stflr1::DIRF | (1 << 1));
        assert!(pwm.is_pending(Event::MatchB));
        assert!(pwm.is_counting_up());
        pwm.clear_pending(Event::MatchB);
        assert!(!pwm.is_pending(Event::MatchB));
        assert!(pwm.is_counting_up());
    }

    #[test]
    fn reset_requires_unlocked_fprc() {
        let (mut common, _) = common();
        let mut rmu = crate::rmu::mock();
        let pwc = crate::pwc::mock();
        assert_eq!(
            common.reset(&mut rmu.frst2, &pwc.fprc),
            Err(Error::Locked)
        );
    }
}
