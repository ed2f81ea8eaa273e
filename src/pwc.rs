// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Power controller
//!
//! The PWC holds the function clock gates (see [`fcg`](crate::fcg)) and the function protect
//! register `FPRC`, which guards clock, reset and power registers against stray writes.
//!
//! ```ignore
//! let mut pwc = dp.PWC.constrain();
//!
//! pwc.fprc.unlock(Protection::Code1);
//! // ... touch RMU registers ...
//! pwc.fprc.lock(Protection::Code1);
//! ```

use crate::fcg::{Fcg0, Fcg1, Fcg2, Fcg3};
use crate::pac::{pwc, PWC};
use crate::Error;

/// Extension trait to split the PWC into its parts.
pub trait PwcExt {
    fn constrain(self) -> Pwc;
}

impl PwcExt for PWC {
    fn constrain(self) -> Pwc {
        let rb = self.as_ptr();
        Pwc {
            fcg0: Fcg0::new(rb),
            fcg1: Fcg1::new(rb),
            fcg2: Fcg2::new(rb),
            fcg3: Fcg3::new(rb),
            fprc: Fprc { rb },
        }
    }
}

/// Constrained PWC peripheral
pub struct Pwc {
    /// Clock gates of the system bus peripherals
    pub fcg0: Fcg0,
    /// Clock gates of the communication peripherals
    pub fcg1: Fcg1,
    /// Clock gates of the timers
    pub fcg2: Fcg2,
    /// Clock gates of the analog peripherals and USARTs
    pub fcg3: Fcg3,
    /// Function protect control
    pub fprc: Fprc,
}

/// Write protection groups of `FPRC`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protection {
    /// Clock controller registers
    Code0,
    /// Power controller, reset management and clock gating registers
    Code1,
    /// Voltage detector registers
    Code2,
}

impl Protection {
    const fn code(self) -> u16 {
        fprc_code(self) | pwc::fprc::KEY
    }
}

const fn fprc_code(protection: Protection) -> u16 {
    match protection {
        Protection::Code0 => pwc::fprc::FPRCB0,
        Protection::Code1 => pwc::fprc::FPRCB1,
        Protection::Code2 => pwc::fprc::FPRCB3,
    }
}

/// Function protect control register
pub struct Fprc {
    rb: *const pwc::RegisterBlock,
}

unsafe impl Send for Fprc {}

impl Fprc {
    fn fprc(&self) -> &crate::pac::Reg<u16> {
        // NOTE(unsafe) FPRC is only ever accessed through this part
        unsafe { &(*self.rb).fprc }
    }

    /// Lifts the write protection of `protection`.
    pub fn unlock(&mut self, protection: Protection) {
        self.fprc().set_bits(protection.code());
    }

    /// Restores the write protection of `protection`.
    pub fn lock(&mut self, protection: Protection) {
        let fprc = self.fprc();
        fprc.write(pwc::fprc::KEY | (!protection.code() & fprc.read()));
    }

    pub fn is_unlocked(&self, protection: Protection) -> bool {
        self.fprc().is_set(fprc_code(protection))
    }

    /// Returns [`Error::Locked`] unless `protection` is lifted.
    pub(crate) fn ensure_unlocked(&self, protection: Protection) -> Result<(), Error> {
        if self.is_unlocked(protection) {
            Ok(())
        } else {
            warn!("write protection is active");
            Err(Error::Locked)
        }
    }
}

#[cfg(test)]
pub(crate) fn mock() -> Pwc {
    PWC::mock().constrain()
}
