// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # CRC calculation unit
//!
//! The unit computes CRC16 (CCITT, `x^16 + x^12 + x^5 + 1`) or CRC32 (IEEE 802.3) over data
//! written to its data register, using 8, 16 or 32 bit bus accesses. The width of every write is
//! given by the element type of the slice handed to the driver, see [`Word`].
//!
//! ```ignore
//! let mut crc = dp.CRC.constrain(&mut pwc.fcg0);
//! crc.init(&Config::default().protocol(Protocol::Crc32));
//!
//! let sum = crc.crc32_calculate(0xFFFF_FFFF, b"123456789")?;
//! assert!(crc.crc32_check(0xFFFF_FFFF, b"123456789", sum));
//! ```

use crate::fcg::{Enable, Fcg0};
use crate::pac::{crc, CRC};
use crate::poll;
#[cfg(feature = "hc32f334")]
use crate::{
    pwc::Fprc,
    rmu::{Frst0, Reset},
};
use crate::Error;

/// Cycles the unit needs to latch the comparison flag after the checked value was written.
const CHECK_CYCLES: u32 = 10;

/// Extension trait to constrain the CRC peripheral
pub trait CrcExt {
    /// Constrains the CRC peripheral to play nicely with the other abstractions
    fn constrain(self, fcg0: &mut Fcg0) -> Crc;
}

impl CrcExt for CRC {
    fn constrain(self, fcg0: &mut Fcg0) -> Crc {
        CRC::enable(fcg0);
        Crc { crc: self }
    }
}

/// CRC algorithm
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Protocol {
    Crc16,
    Crc32,
}

/// CRC configuration
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub protocol: Protocol,
    /// Seed written to the result register, truncated to 16 bits for CRC16
    pub init_value: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: Protocol::Crc16,
            init_value: 0xFFFF_FFFF,
        }
    }
}

impl Config {
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn init_value(mut self, init_value: u32) -> Self {
        self.init_value = init_value;
        self
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Data word the unit can be fed with, written with a bus access of its own width
pub trait Word: sealed::Sealed + Copy {
    #[doc(hidden)]
    unsafe fn write_to(self, dat: *mut u32);
}

macro_rules! word {
    ($($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Word for $ty {
                #[inline(always)]
                unsafe fn write_to(self, dat: *mut u32) {
                    core::ptr::write_volatile(dat as *mut $ty, self)
                }
            }
        )+
    };
}

word!(u8, u16, u32);

/// Constrained CRC peripheral
pub struct Crc {
    crc: CRC,
}

impl Crc {
    /// Selects the protocol and loads the seed.
    pub fn init(&mut self, config: &Config) {
        trace!("crc init");
        match config.protocol {
            Protocol::Crc16 => {
                self.crc.cr.clear_bits(crc::cr::CR);
                self.write_result16(config.init_value as u16);
            }
            Protocol::Crc32 => {
                self.crc.cr.set_bits(crc::cr::CR);
                self.crc.reslt.write(config.init_value);
            }
        }
    }

    /// Puts the unit back into its reset state through the RMU.
    #[cfg(feature = "hc32f334")]
    pub fn deinit(&mut self, frst0: &mut Frst0, fprc: &Fprc) -> Result<(), Error> {
        CRC::reset(frst0, fprc)
    }

    /// Puts the control register back into its reset state.
    #[cfg(feature = "hc32f4a0")]
    pub fn deinit(&mut self) -> Result<(), Error> {
        self.crc.cr.write(crc::cr::RESET);
        Ok(())
    }

    /// Protocol currently selected in the control register.
    pub fn protocol(&self) -> Protocol {
        if self.crc.cr.is_set(crc::cr::CR) {
            Protocol::Crc32
        } else {
            Protocol::Crc16
        }
    }

    /// Current result, only the low 16 bits in CRC16 mode.
    pub fn result(&self) -> u32 {
        match self.protocol() {
            Protocol::Crc32 => self.crc.reslt.read(),
            Protocol::Crc16 => self.crc.reslt.read_bits(0xFFFF),
        }
    }

    /// Reloads the seed, truncated to 16 bits in CRC16 mode.
    pub fn set_init_value(&mut self, value: u32) {
        match self.protocol() {
            Protocol::Crc32 => self.crc.reslt.write(value),
            Protocol::Crc16 => self.crc.reslt.write(value & 0xFFFF),
        }
    }

    /// Returns `true` if the last checked value matched the result.
    pub fn result_status(&self) -> bool {
        self.crc.cr.is_set(crc::cr::FLAG)
    }

    fn write_result16(&mut self, value: u16) {
        // NOTE(unsafe) RESLT accepts halfword writes
        unsafe { core::ptr::write_volatile(self.crc.reslt.as_ptr() as *mut u16, value) }
    }

    fn feed<W: Word>(&mut self, data: &[W]) {
        let dat = self.crc.dat0.as_ptr();
        for &word in data {
            // NOTE(unsafe) DAT0 accepts byte, halfword and word writes
            unsafe { word.write_to(dat) }
        }
    }

    fn latch_check<W: Word>(&mut self, expected: W) -> bool {
        self.feed(&[expected]);
        poll::delay_cycles(CHECK_CYCLES);
        self.result_status()
    }

    /// Feeds `data` on top of the current result and returns the new CRC16.
    pub fn crc16_accumulate<W: Word>(&mut self, data: &[W]) -> Result<u16, Error> {
        if data.is_empty() {
            return Err(Error::InvalidParameter);
        }
        self.feed(data);
        Ok(self.crc.reslt.read() as u16)
    }

    /// Feeds `data` on top of the current result and returns the new CRC32.
    pub fn crc32_accumulate<W: Word>(&mut self, data: &[W]) -> Result<u32, Error> {
        if data.is_empty() {
            return Err(Error::InvalidParameter);
        }
        self.feed(data);
        Ok(self.crc.reslt.read())
    }

    /// CRC16 of `data` starting from `init`.
    pub fn crc16_calculate<W: Word>(&mut self, init: u16, data: &[W]) -> Result<u16, Error> {
        if data.is_empty() {
            return Err(Error::InvalidParameter);
        }
        self.write_result16(init);
        self.crc16_accumulate(data)
    }

    /// CRC32 of `data` starting from `init`.
    pub fn crc32_calculate<W: Word>(&mut self, init: u32, data: &[W]) -> Result<u32, Error> {
        if data.is_empty() {
            return Err(Error::InvalidParameter);
        }
        self.crc.reslt.write(init);
        self.crc32_accumulate(data)
    }

    /// Calculates the CRC16 of `data` and compares it against `expected` in hardware.
    ///
    /// Empty input never matches.
    pub fn crc16_check<W: Word>(&mut self, init: u16, data: &[W], expected: u16) -> bool {
        if self.crc16_calculate(init, data).is_err() {
            return false;
        }
        self.latch_check(expected)
    }

    /// Calculates the CRC32 of `data` and compares it against `expected` in hardware.
    ///
    /// Empty input never matches.
    pub fn crc32_check<W: Word>(&mut self, init: u32, data: &[W], expected: u32) -> bool {
        if self.crc32_calculate(init, data).is_err() {
            return false;
        }
        self.latch_check(expected)
    }

    /// Compares the current CRC16 result against `expected`.
    pub fn crc16_check_result(&mut self, expected: u16) -> bool {
        self.latch_check(expected)
    }

    /// Compares the current CRC32 result against `expected`.
    pub fn crc32_check_result(&mut self, expected: u32) -> bool {
        self.latch_check(expected)
    }

    /// Releases the CRC peripheral
    pub fn free(self) -> CRC {
        self.crc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crc() -> (Crc, &'static crc::RegisterBlock) {
        let mut pwc = crate::pwc::mock();
        let raw = CRC::mock();
        let rb = unsafe { &*raw.as_ptr() };
        (raw.constrain(&mut pwc.fcg0), rb)
    }

    #[test]
    fn init_selects_protocol_and_seed_width() {
        let (mut crc, rb) = crc();
        rb.reslt.write(0xDEAD_BEEF);

        crc.init(&Config::default().init_value(0x1234_5678));
        assert_eq!(crc.protocol(), Protocol::Crc16);
        // halfword write leaves the upper half alone
        assert_eq!(rb.reslt.read(), 0xDEAD_5678);
        assert_eq!(crc.result(), 0x5678);

        crc.init(&Config::default().protocol(Protocol::Crc32).init_value(0x1234_5678));
        assert_eq!(rb.cr.read(), crc::cr::CR);
        assert_eq!(crc.result(), 0x1234_5678);
    }

    #[test]
    fn set_init_value_follows_protocol() {
        let (mut crc, rb) = crc();
        crc.set_init_value(0xAABB_CCDD);
        assert_eq!(rb.reslt.read(), 0x0000_CCDD);

        rb.cr.write(crc::cr::CR);
        crc.set_init_value(0xAABB_CCDD);
        assert_eq!(rb.reslt.read(), 0xAABB_CCDD);
    }

    #[test]
    fn data_is_written_at_element_width() {
        let (mut crc, rb) = crc();
        rb.dat0.write(0xFFFF_FFFF);
        crc.crc32_accumulate(&[0x12u8, 0x34]).unwrap();
        assert_eq!(rb.dat0.read(), 0xFFFF_FF34);

        crc.crc32_accumulate(&[0xABCDu16]).unwrap();
        assert_eq!(rb.dat0.read(), 0xFFFF_ABCD);

        crc.crc32_accumulate(&[0x0102_0304u32]).unwrap();
        assert_eq!(rb.dat0.read(), 0x0102_0304);
    }

    #[test]
    fn calculate_seeds_then_accumulates() {
        let (mut crc, rb) = crc();
        rb.reslt.write(0xFFFF_FFFF);
        // plain memory does not compute, the seed comes back unchanged
        assert_eq!(crc.crc16_calculate(0x1D0F, &[0x31u8]), Ok(0x1D0F));
        assert_eq!(rb.reslt.read(), 0xFFFF_1D0F);
        assert_eq!(crc.crc32_calculate(0x0BAD_F00D, &[1u32, 2]), Ok(0x0BAD_F00D));
        assert_eq!(rb.dat0.read(), 2);
    }

    #[test]
    fn empty_input_is_rejected() {
        let (mut crc, rb) = crc();
        let empty: [u8; 0] = [];
        assert_eq!(crc.crc16_accumulate(&empty), Err(Error::InvalidParameter));
        assert_eq!(crc.crc32_calculate(0, &empty), Err(Error::InvalidParameter));

        rb.cr.write(crc::cr::FLAG);
        assert!(!crc.crc32_check(0, &empty, 0));
        assert!(!crc.crc16_check(0, &empty, 0));
    }

    #[test]
    fn check_writes_expected_value_and_reads_flag() {
        let (mut crc, rb) = crc();
        assert!(!crc.crc16_check(0xFFFF, &[0x55u8], 0x1234));
        assert_eq!(rb.dat0.read(), 0x1234);

        rb.cr.write(crc::cr::CR | crc::cr::FLAG);
        assert!(crc.crc32_check_result(0xCBF4_3926));
        assert_eq!(rb.dat0.read(), 0xCBF4_3926);
    }

    #[cfg(feature = "hc32f4a0")]
    #[test]
    fn deinit_restores_control_register() {
        let (mut crc, rb) = crc();
        rb.cr.write(crc::cr::CR | crc::cr::FLAG);
        crc.deinit().unwrap();
        assert_eq!(rb.cr.read(), crc::cr::RESET);
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn deinit_needs_the_rmu_unlocked() {
        let (mut crc, _) = crc();
        let mut rmu = crate::rmu::mock();
        let mut pwc = crate::pwc::mock();
        assert_eq!(crc.deinit(&mut rmu.frst0, &pwc.fprc), Err(Error::Locked));
        pwc.fprc.unlock(crate::pwc::Protection::Code1);
        assert_eq!(crc.deinit(&mut rmu.frst0, &pwc.fprc), Err(Error::Timeout));
    }
}
