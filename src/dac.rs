// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Digital to analog converter
//!
//! Each unit converts 12 bit values, right or left aligned in a 16 bit data register. On the
//! HC32F334 `DAC1` has two channels and a dual mode while `DAC2` has a single channel; on the
//! HC32F4A0 both units have two channels.
//!
//! ```ignore
//! let mut dac = Dac::new(dp.DAC1, &mut pwc.fcg3);
//! dac.init(Channel::Ch1, &Config::default())?;
//! dac.set_data(Channel::Ch1, 0x800)?;
//! dac.start(Channel::Ch1)?;
//! ```

use core::ops::{BitOr, Deref};

use crate::fcg::{Enable, Fcg3};
use crate::pac::{dac, DAC1, DAC2};
#[cfg(feature = "hc32f334")]
use crate::{
    pwc::Fprc,
    rmu::{Frst3, Reset},
};
use crate::Error;

/// Data mask of right aligned values
pub const RIGHT_ALIGN_MASK: u16 = 0x0FFF;
/// Data mask of left aligned values
pub const LEFT_ALIGN_MASK: u16 = 0xFFF0;

/// DAC unit
pub trait Instance: Deref<Target = dac::RegisterBlock> + Enable<Bus = Fcg3> {
    /// Zero based unit number
    const UNIT: u8;
    /// Number of output channels
    const CHANNELS: u8;
}

/// Unit with two channels that can be driven together
pub trait DualChannel: Instance {}

impl Instance for DAC1 {
    const UNIT: u8 = 0;
    const CHANNELS: u8 = 2;
}

impl DualChannel for DAC1 {}

impl Instance for DAC2 {
    const UNIT: u8 = 1;
    #[cfg(feature = "hc32f334")]
    const CHANNELS: u8 = 1;
    #[cfg(feature = "hc32f4a0")]
    const CHANNELS: u8 = 2;
}

#[cfg(feature = "hc32f4a0")]
impl DualChannel for DAC2 {}

/// Output channel
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Ch1,
    Ch2,
}

impl Channel {
    const fn index(self) -> u16 {
        match self {
            Channel::Ch1 => 0,
            Channel::Ch2 => 1,
        }
    }
}

/// Data alignment within the 16 bit data register
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Alignment {
    /// Data in bits 0..=11
    Right,
    /// Data in bits 4..=15
    Left,
}

impl Alignment {
    const fn mask(self) -> u16 {
        match self {
            Alignment::Right => RIGHT_ALIGN_MASK,
            Alignment::Left => LEFT_ALIGN_MASK,
        }
    }
}

/// Where a channel takes its conversion data from
#[cfg(feature = "hc32f4a0")]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataSource {
    /// The channel data register
    DataRegister,
    /// The data computing unit
    Dcu,
}

/// How a written value reaches the converter
#[cfg(feature = "hc32f334")]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferMode {
    /// Loaded right away
    Normal,
    /// Loaded on an HRPWM DAC trigger
    Hrpwm,
}

/// Channel configuration
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub alignment: Alignment,
    /// Drive the output pin
    pub output: bool,
    #[cfg(feature = "hc32f4a0")]
    pub source: DataSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alignment: Alignment::Right,
            output: true,
            #[cfg(feature = "hc32f4a0")]
            source: DataSource::DataRegister,
        }
    }
}

impl Config {
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn output(mut self, output: bool) -> Self {
        self.output = output;
        self
    }

    #[cfg(feature = "hc32f4a0")]
    pub fn source(mut self, source: DataSource) -> Self {
        self.source = source;
        self
    }
}

/// ADCs a conversion yields to while ADC priority is on
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcSelect(u16);

impl AdcSelect {
    pub const ADC1: Self = Self(dac::daadpcr::ADCSL1);
    pub const ADC2: Self = Self(dac::daadpcr::ADCSL2);
    pub const ADC3: Self = Self(dac::daadpcr::ADCSL3);
    pub const ALL: Self = Self(0x0007);

    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl BitOr for AdcSelect {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// DAC driver
pub struct Dac<DAC> {
    dac: DAC,
}

impl<DAC: Instance> Dac<DAC> {
    /// Enables the unit clock and takes ownership of it.
    pub fn new(dac: DAC, fcg3: &mut Fcg3) -> Self {
        DAC::enable(fcg3);
        Dac { dac }
    }

    fn check(&self, ch: Channel) -> Result<(), Error> {
        if ch.index() < DAC::CHANNELS as u16 {
            Ok(())
        } else {
            Err(Error::InvalidParameter)
        }
    }

    /// Applies `config` to channel `ch`.
    pub fn init(&mut self, ch: Channel, config: &Config) -> Result<(), Error> {
        self.check(ch)?;
        trace!("dac{=u8} init", DAC::UNIT + 1);
        #[cfg(feature = "hc32f4a0")]
        self.set_data_source(ch, config.source)?;
        self.set_alignment(config.alignment);
        self.set_output(ch, config.output)
    }

    /// Puts the unit back into its reset state through the RMU.
    #[cfg(feature = "hc32f334")]
    pub fn deinit(&mut self, frst3: &mut Frst3, fprc: &Fprc) -> Result<(), Error>
    where
        DAC: Reset<Bus = Frst3>,
    {
        DAC::reset(frst3, fprc)
    }

    /// Writes the reset value to every control and data register.
    #[cfg(feature = "hc32f4a0")]
    pub fn deinit(&mut self) -> Result<(), Error> {
        self.dac.dacr.write(0);
        self.dac.daocr.write(0);
        self.dac.daadpcr.write(0);
        self.dac.dadr().write(0);
        Ok(())
    }

    /// Sets the data alignment of both channels.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        let bits = match alignment {
            Alignment::Right => 0,
            Alignment::Left => dac::dacr::DPSEL,
        };
        self.dac.dacr.modify_bits(dac::dacr::DPSEL, bits);
    }

    pub fn alignment(&self) -> Alignment {
        if self.dac.dacr.is_set(dac::dacr::DPSEL) {
            Alignment::Left
        } else {
            Alignment::Right
        }
    }

    /// Connects or disconnects the channel from its output pin.
    pub fn set_output(&mut self, ch: Channel, enable: bool) -> Result<(), Error> {
        self.check(ch)?;
        let bit = dac::daocr::DAODIS1 << ch.index();
        if enable {
            self.dac.daocr.clear_bits(bit);
        } else {
            self.dac.daocr.set_bits(bit);
        }
        Ok(())
    }

    /// Turns the output amplifier on or off.
    ///
    /// On the HC32F334 the amplifier can only be turned on while the channel output is enabled.
    pub fn set_amplifier(&mut self, ch: Channel, enable: bool) -> Result<(), Error> {
        self.check(ch)?;
        if cfg!(feature = "hc32f334")
            && enable
            && self.dac.daocr.is_set(dac::daocr::DAODIS1 << ch.index())
        {
            return Err(Error::InvalidMode);
        }
        let bit = dac::dacr::DAAMP1 << ch.index();
        if enable {
            self.dac.dacr.set_bits(bit);
        } else {
            self.dac.dacr.clear_bits(bit);
        }
        Ok(())
    }

    /// Makes conversions wait for the selected ADCs.
    ///
    /// On the HC32F4A0 this is only allowed while both channels convert from their data registers.
    pub fn set_adc_priority(&mut self, enable: bool) -> Result<(), Error> {
        if enable && !self.adc_priority_allowed() {
            return Err(Error::InvalidMode);
        }
        if enable {
            self.dac.daadpcr.set_bits(dac::daadpcr::ADPEN);
        } else {
            self.dac.daadpcr.clear_bits(dac::daadpcr::ADPEN);
        }
        Ok(())
    }

    #[cfg(feature = "hc32f334")]
    fn adc_priority_allowed(&self) -> bool {
        true
    }

    #[cfg(feature = "hc32f4a0")]
    fn adc_priority_allowed(&self) -> bool {
        !self
            .dac
            .dacr
            .is_set(dac::dacr::EXTDSL1 | dac::dacr::EXTDSL2)
    }

    /// Adds or removes ADCs from the priority set.
    pub fn configure_adc_priority(&mut self, adcs: AdcSelect, enable: bool) -> Result<(), Error> {
        if adcs.bits() == 0 {
            return Err(Error::InvalidParameter);
        }
        if enable {
            self.dac.daadpcr.set_bits(adcs.bits());
        } else {
            self.dac.daadpcr.clear_bits(adcs.bits());
        }
        Ok(())
    }

    fn dual_mode(&self) -> bool {
        self.dac.dacr.is_set(dac::dacr::DAE)
    }

    /// Starts conversion on `ch`, refused while dual mode is on.
    pub fn start(&mut self, ch: Channel) -> Result<(), Error> {
        self.check(ch)?;
        if self.dual_mode() {
            return Err(Error::InvalidMode);
        }
        self.dac.dacr.set_bits(dac::dacr::DA1E << ch.index());
        Ok(())
    }

    /// Stops conversion on `ch`, refused while dual mode is on.
    pub fn stop(&mut self, ch: Channel) -> Result<(), Error> {
        self.check(ch)?;
        if self.dual_mode() {
            return Err(Error::InvalidMode);
        }
        self.dac.dacr.clear_bits(dac::dacr::DA1E << ch.index());
        Ok(())
    }

    /// Loads `value` into the data register of `ch`.
    ///
    /// The value must fit the current alignment.
    pub fn set_data(&mut self, ch: Channel, value: u16) -> Result<(), Error> {
        self.check(ch)?;
        if value & !self.alignment().mask() != 0 {
            return Err(Error::InvalidParameter);
        }
        match ch {
            Channel::Ch1 => self.dac.dadr1.write(value),
            Channel::Ch2 => self.dac.dadr2.write(value),
        }
        Ok(())
    }

    /// Returns `Ok` once the last conversion of `ch` went through.
    ///
    /// Fails with [`Error::InvalidMode`] unless ADC priority is on, since the pending flags only
    /// exist in that mode.
    pub fn conversion_state(&self, ch: Channel) -> nb::Result<(), Error> {
        self.check(ch)?;
        if !self.dac.daadpcr.is_set(dac::daadpcr::ADPEN) {
            return Err(nb::Error::Other(Error::InvalidMode));
        }
        if self.dac.daadpcr.is_set(dac::daadpcr::DA1SF << ch.index()) {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }

    /// Selects when written data reaches the converter.
    #[cfg(feature = "hc32f334")]
    pub fn set_transfer_mode(&mut self, ch: Channel, mode: TransferMode) -> Result<(), Error> {
        self.check(ch)?;
        let bit = match ch {
            Channel::Ch1 => dac::dacr2::LDMD1,
            Channel::Ch2 => dac::dacr2::LDMD2,
        };
        let value = match mode {
            TransferMode::Normal => 0,
            TransferMode::Hrpwm => bit,
        };
        self.dac.dacr2.modify_bits(bit, value);
        Ok(())
    }

    /// Value the converter is currently outputting.
    #[cfg(feature = "hc32f334")]
    pub fn active_data(&self, ch: Channel) -> Result<u16, Error> {
        self.check(ch)?;
        let raw = match ch {
            Channel::Ch1 => self.dac.dadactr1.read(),
            Channel::Ch2 => self.dac.dadactr2.read(),
        };
        Ok(raw & dac::ACTIVE_DATA_MASK)
    }

    /// Selects where `ch` takes its conversion data from.
    #[cfg(feature = "hc32f4a0")]
    pub fn set_data_source(&mut self, ch: Channel, source: DataSource) -> Result<(), Error> {
        self.check(ch)?;
        let bit = dac::dacr::EXTDSL1 << ch.index();
        let value = match source {
            DataSource::DataRegister => 0,
            DataSource::Dcu => bit,
        };
        self.dac.dacr.modify_bits(bit, value);
        Ok(())
    }

    /// Releases the DAC peripheral
    pub fn free(self) -> DAC {
        self.dac
    }
}

impl<DAC: DualChannel> Dac<DAC> {
    /// Starts both channels together.
    pub fn start_dual(&mut self) {
        self.dac.dacr.set_bits(dac::dacr::DAE);
    }

    pub fn stop_dual(&mut self) {
        self.dac.dacr.clear_bits(dac::dacr::DAE);
    }

    /// Loads both data registers with a single write.
    pub fn set_dual_data(&mut self, data1: u16, data2: u16) -> Result<(), Error> {
        let mask = self.alignment().mask();
        if (data1 | data2) & !mask != 0 {
            return Err(Error::InvalidParameter);
        }
        self.dac
            .dadr()
            .write((u32::from(data2) << 16) | u32::from(data1));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dac1() -> (Dac<DAC1>, &'static dac::RegisterBlock) {
        let mut pwc = crate::pwc::mock();
        let raw = DAC1::mock();
        let rb = unsafe { &*raw.as_ptr() };
        (Dac::new(raw, &mut pwc.fcg3), rb)
    }

    #[test]
    fn init_sets_alignment_and_output() {
        let (mut dac, rb) = dac1();
        rb.daocr.write(dac::daocr::DAODIS1 | dac::daocr::DAODIS2);

        dac.init(Channel::Ch2, &Config::default().alignment(Alignment::Left))
            .unwrap();
        assert_eq!(dac.alignment(), Alignment::Left);
        assert_eq!(rb.daocr.read(), dac::daocr::DAODIS1);

        dac.init(Channel::Ch1, &Config::default().output(false)).unwrap();
        assert_eq!(dac.alignment(), Alignment::Right);
        assert_eq!(rb.daocr.read(), dac::daocr::DAODIS1);
    }

    #[test]
    fn data_must_fit_alignment() {
        let (mut dac, rb) = dac1();
        assert_eq!(dac.set_data(Channel::Ch1, 0x1000), Err(Error::InvalidParameter));
        dac.set_data(Channel::Ch1, 0x0FFF).unwrap();
        assert_eq!(rb.dadr1.read(), 0x0FFF);

        dac.set_alignment(Alignment::Left);
        assert_eq!(dac.set_data(Channel::Ch2, 0x0FFF), Err(Error::InvalidParameter));
        dac.set_data(Channel::Ch2, 0xABC0).unwrap();
        assert_eq!(rb.dadr2.read(), 0xABC0);
    }

    #[test]
    fn dual_data_is_one_word_write() {
        let (mut dac, rb) = dac1();
        dac.set_dual_data(0x0123, 0x0456).unwrap();
        assert_eq!(rb.dadr1.read(), 0x0123);
        assert_eq!(rb.dadr2.read(), 0x0456);
        assert_eq!(dac.set_dual_data(0x0123, 0xF000), Err(Error::InvalidParameter));
    }

    #[test]
    fn single_channel_control_is_refused_in_dual_mode() {
        let (mut dac, rb) = dac1();
        dac.start(Channel::Ch2).unwrap();
        assert_eq!(rb.dacr.read(), dac::dacr::DA2E);

        dac.start_dual();
        assert_eq!(dac.stop(Channel::Ch2), Err(Error::InvalidMode));
        assert_eq!(dac.start(Channel::Ch1), Err(Error::InvalidMode));
        dac.stop_dual();
        dac.stop(Channel::Ch2).unwrap();
        assert_eq!(rb.dacr.read(), 0);
    }

    #[test]
    fn conversion_state_needs_adc_priority() {
        let (mut dac, rb) = dac1();
        assert_eq!(
            dac.conversion_state(Channel::Ch1),
            Err(nb::Error::Other(Error::InvalidMode))
        );

        dac.set_adc_priority(true).unwrap();
        rb.daadpcr.set_bits(dac::daadpcr::DA2SF);
        assert_eq!(dac.conversion_state(Channel::Ch1), Ok(()));
        assert_eq!(dac.conversion_state(Channel::Ch2), Err(nb::Error::WouldBlock));
    }

    #[test]
    fn adc_priority_selection_must_not_be_empty() {
        let (mut dac, rb) = dac1();
        dac.configure_adc_priority(AdcSelect::ADC1 | AdcSelect::ADC3, true)
            .unwrap();
        assert_eq!(rb.daadpcr.read(), 0b101);
        dac.configure_adc_priority(AdcSelect::ADC1, false).unwrap();
        assert_eq!(rb.daadpcr.read(), 0b100);
        assert_eq!(
            dac.configure_adc_priority(AdcSelect(0), true),
            Err(Error::InvalidParameter)
        );
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn amplifier_needs_the_output_enabled() {
        let (mut dac, rb) = dac1();
        dac.set_output(Channel::Ch1, false).unwrap();
        assert_eq!(dac.set_amplifier(Channel::Ch1, true), Err(Error::InvalidMode));
        dac.set_amplifier(Channel::Ch1, false).unwrap();

        dac.set_output(Channel::Ch1, true).unwrap();
        dac.set_amplifier(Channel::Ch1, true).unwrap();
        assert_eq!(rb.dacr.read(), dac::dacr::DAAMP1);
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn dac2_has_a_single_channel() {
        let mut pwc = crate::pwc::mock();
        let mut dac = Dac::new(DAC2::mock(), &mut pwc.fcg3);
        assert_eq!(dac.start(Channel::Ch2), Err(Error::InvalidParameter));
        assert_eq!(
            dac.init(Channel::Ch2, &Config::default()),
            Err(Error::InvalidParameter)
        );
        assert!(dac.start(Channel::Ch1).is_ok());
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn transfer_mode_and_active_data() {
        let (mut dac, rb) = dac1();
        dac.set_transfer_mode(Channel::Ch2, TransferMode::Hrpwm).unwrap();
        assert_eq!(rb.dacr2.read(), dac::dacr2::LDMD2);
        dac.set_transfer_mode(Channel::Ch2, TransferMode::Normal).unwrap();
        assert_eq!(rb.dacr2.read(), 0);

        rb.dadactr1.write(0xFABC);
        assert_eq!(dac.active_data(Channel::Ch1), Ok(0x0ABC));
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn deinit_resets_the_matching_unit() {
        let mut pwc = crate::pwc::mock();
        let rmu = crate::pac::RMU::mock();
        let rrb = unsafe { &*rmu.as_ptr() };
        rrb.frst3.write(crate::pac::rmu::frst::FRST3_ALL);
        let mut rmu = crate::rmu::RmuExt::constrain(rmu);
        pwc.fprc.unlock(crate::pwc::Protection::Code1);

        let mut dac = Dac::new(DAC2::mock(), &mut pwc.fcg3);
        assert_eq!(dac.deinit(&mut rmu.frst3, &pwc.fprc), Err(Error::Timeout));
        assert_eq!(rrb.frst3.read(), crate::pac::rmu::frst::FRST3_ALL & !(1 << 5));
    }

    #[cfg(feature = "hc32f4a0")]
    #[test]
    fn adc_priority_needs_data_register_sources() {
        let (mut dac, rb) = dac1();
        dac.init(Channel::Ch2, &Config::default().source(DataSource::Dcu))
            .unwrap();
        assert_eq!(rb.dacr.read(), dac::dacr::EXTDSL2);
        assert_eq!(dac.set_adc_priority(true), Err(Error::InvalidMode));
        dac.set_data_source(Channel::Ch2, DataSource::DataRegister)
            .unwrap();
        assert_eq!(dac.set_adc_priority(true), Ok(()));
    }

    #[cfg(feature = "hc32f4a0")]
    #[test]
    fn deinit_clears_registers() {
        let (mut dac, rb) = dac1();
        rb.dacr.write(0x1FFF);
        rb.daocr.write(0xC000);
        rb.dadr1.write(0x0123);
        rb.dadr2.write(0x0456);
        dac.deinit().unwrap();
        assert_eq!(rb.dacr.read(), 0);
        assert_eq!(rb.daocr.read(), 0);
        assert_eq!(rb.dadr().read(), 0);
    }
}
