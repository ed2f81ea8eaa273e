// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Asynchronous output/trigger selector
//!
//! The AOS routes peripheral events to the trigger inputs of DMA, timers, ADCs and the event
//! ports. Every trigger input has a select register holding an event number; two common trigger
//! registers can additionally be OR-ed into any input.
//!
//! ```ignore
//! let mut aos = dp.AOS.constrain(&mut pwc.fcg0);
//! aos.set_trigger_source(Target::Adc1_0, EventSource::SOFTWARE);
//! aos.software_trigger();
//! ```

use core::ops::BitOr;

use crate::fcg::{Enable, Fcg0};
use crate::pac::{aos, Reg, AOS};
use crate::pwc::Fprc;
use crate::rmu::{Frst0, Reset};
use crate::Error;

/// Extension trait to constrain the AOS peripheral
pub trait AosExt {
    fn constrain(self, fcg0: &mut Fcg0) -> Aos;
}

impl AosExt for AOS {
    fn constrain(self, fcg0: &mut Fcg0) -> Aos {
        AOS::enable(fcg0);
        Aos { aos: self }
    }
}

/// Trigger input fed by the AOS
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Target {
    /// DMA channel `n` transfer request, `0..=7`
    Dma(u8),
    /// DMA re-configuration
    DmaReconfig,
    /// TMR6 hardware trigger `n`, `0..=3`
    Tmr6(u8),
    /// HRPWM hardware trigger `n`, `0..=3`
    Hrpwm(u8),
    Tmr4,
    /// Event ports 1 and 2
    EventPort12,
    /// Event ports 3 and 4
    EventPort34,
    Tmr0,
    /// TMRA hardware trigger `n`, `0..=3`
    TmrA(u8),
    Adc1_0,
    Adc1_1,
    Adc2_0,
    Adc2_1,
    Adc3_0,
    Adc3_1,
    /// Common trigger 1 select
    Common1,
    /// Common trigger 2 select
    Common2,
}

/// Event number of a peripheral event, `0..=0x1FF`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventSource(u16);

impl EventSource {
    /// Software trigger through [`Aos::software_trigger`]
    pub const SOFTWARE: Self = Self(0x1FF);

    /// `None` if `number` does not fit the 9 bit select field.
    pub const fn new(number: u16) -> Option<Self> {
        if number as u32 <= aos::trgsel::TRGSEL {
            Some(Self(number))
        } else {
            None
        }
    }

    pub const fn number(self) -> u16 {
        self.0
    }
}

/// Common trigger lines
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommonTrigger(u32);

impl CommonTrigger {
    pub const TRIG1: Self = Self(aos::trgsel::COMEN1);
    pub const TRIG2: Self = Self(aos::trgsel::COMEN2);

    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl BitOr for CommonTrigger {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Constrained AOS peripheral
pub struct Aos {
    aos: AOS,
}

impl Aos {
    fn select(&self, target: Target) -> Result<&Reg<u32>, Error> {
        let aos = &*self.aos;
        let reg = match target {
            Target::Dma(n) => aos.dma_trgsel.get(n as usize),
            Target::DmaReconfig => Some(&aos.dma_rc_trgsel),
            Target::Tmr6(n) => aos.tmr6_trgsel.get(n as usize),
            Target::Hrpwm(n) => aos.hrpwm_trgsel.get(n as usize),
            Target::Tmr4 => Some(&aos.tmr4_trgsel),
            Target::EventPort12 => Some(&aos.pevnt_trgsel12),
            Target::EventPort34 => Some(&aos.pevnt_trgsel34),
            Target::Tmr0 => Some(&aos.tmr0_trgsel),
            Target::TmrA(n) => aos.tmra_trgsel.get(n as usize),
            Target::Adc1_0 => Some(&aos.adc1_trgsel[0]),
            Target::Adc1_1 => Some(&aos.adc1_trgsel[1]),
            Target::Adc2_0 => Some(&aos.adc2_trgsel[0]),
            Target::Adc2_1 => Some(&aos.adc2_trgsel[1]),
            Target::Adc3_0 => Some(&aos.adc3_trgsel[0]),
            Target::Adc3_1 => Some(&aos.adc3_trgsel[1]),
            Target::Common1 => Some(&aos.comtrgsel1),
            Target::Common2 => Some(&aos.comtrgsel2),
        };
        reg.ok_or(Error::InvalidParameter)
    }

    /// Routes `source` to `target`.
    pub fn set_trigger_source(&mut self, target: Target, source: EventSource) -> Result<(), Error> {
        self.select(target)?
            .modify_bits(aos::trgsel::TRGSEL, u32::from(source.number()));
        Ok(())
    }

    /// Event currently routed to `target`.
    pub fn trigger_source(&self, target: Target) -> Result<EventSource, Error> {
        let bits = self.select(target)?.read_bits(aos::trgsel::TRGSEL);
        Ok(EventSource(bits as u16))
    }

    /// Adds or removes the common triggers `trigger` as sources of `target`.
    pub fn set_common_trigger(
        &mut self,
        target: Target,
        trigger: CommonTrigger,
        enable: bool,
    ) -> Result<(), Error> {
        let reg = self.select(target)?;
        if enable {
            reg.set_bits(trigger.bits());
        } else {
            reg.clear_bits(trigger.bits());
        }
        Ok(())
    }

    /// Fires the software event.
    pub fn software_trigger(&mut self) {
        self.aos.intsfttrg.write(aos::intsfttrg::STRG);
    }

    /// Puts every select register back into its reset state through the RMU.
    pub fn deinit(&mut self, frst0: &mut Frst0, fprc: &Fprc) -> Result<(), Error> {
        trace!("aos deinit");
        AOS::reset(frst0, fprc)
    }

    /// Releases the AOS peripheral
    pub fn free(self) -> AOS {
        self.aos
    }
}
