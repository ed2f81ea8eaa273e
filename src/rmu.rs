// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Reset management unit
//!
//! The RMU latches the cause of the last reset in `RSTF0` and, on the HC32F334, can put single
//! peripherals back into their reset state through the four `FRSTx` registers.
//!
//! Both the flag clear and the peripheral resets are write protected: lift
//! [`Protection::Code1`] on the [`Fprc`] part first.
//!
//! ```ignore
//! let mut pwc = dp.PWC.constrain();
//! let mut rmu = dp.RMU.constrain();
//!
//! if rmu.status.contains(ResetCause::WATCHDOG) {
//!     // ...
//! }
//!
//! pwc.fprc.unlock(Protection::Code1);
//! rmu.status.clear(&pwc.fprc).unwrap();
//! pwc.fprc.lock(Protection::Code1);
//! ```

use core::ops::BitOr;

#[cfg(feature = "hc32f334")]
use crate::pac;
use crate::pac::{rmu, RMU};
use crate::poll;
use crate::pwc::{Fprc, Protection};
use crate::Error;

/// Extension trait to split the RMU into its parts.
pub trait RmuExt {
    fn constrain(self) -> Rmu;
}

impl RmuExt for RMU {
    fn constrain(self) -> Rmu {
        let rb = self.as_ptr();
        Rmu {
            #[cfg(feature = "hc32f334")]
            frst0: Frst0 { rb },
            #[cfg(feature = "hc32f334")]
            frst1: Frst1 { rb },
            #[cfg(feature = "hc32f334")]
            frst2: Frst2 { rb },
            #[cfg(feature = "hc32f334")]
            frst3: Frst3 { rb },
            status: ResetStatus { rb },
        }
    }
}

/// Constrained RMU peripheral
pub struct Rmu {
    /// Resets of the system bus peripherals
    #[cfg(feature = "hc32f334")]
    pub frst0: Frst0,
    /// Resets of the communication peripherals
    #[cfg(feature = "hc32f334")]
    pub frst1: Frst1,
    /// Resets of the timers
    #[cfg(feature = "hc32f334")]
    pub frst2: Frst2,
    /// Resets of the analog peripherals and USARTs
    #[cfg(feature = "hc32f334")]
    pub frst3: Frst3,
    /// Reset cause flags
    pub status: ResetStatus,
}

/// Set of reset causes as latched in `RSTF0`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResetCause(u32);

impl ResetCause {
    pub const POWER_ON: Self = Self(rmu::rstf0::PORF);
    pub const PIN: Self = Self(rmu::rstf0::PINRF);
    pub const BROWN_OUT: Self = Self(rmu::rstf0::BORF);
    pub const PVD1: Self = Self(rmu::rstf0::PVD1RF);
    pub const PVD2: Self = Self(rmu::rstf0::PVD2RF);
    pub const WATCHDOG: Self = Self(rmu::rstf0::WDRF);
    pub const SPECIAL_WATCHDOG: Self = Self(rmu::rstf0::SWDRF);
    pub const POWER_DOWN: Self = Self(rmu::rstf0::PDRF);
    pub const SOFTWARE: Self = Self(rmu::rstf0::SWRF);
    pub const MPU_ERROR: Self = Self(rmu::rstf0::MPUERF);
    pub const RAM_PARITY_ERROR: Self = Self(rmu::rstf0::RAPERF);
    pub const RAM_ECC_ERROR: Self = Self(rmu::rstf0::RAECRF);
    pub const CLOCK_FAULT: Self = Self(rmu::rstf0::CKFERF);
    pub const XTAL_FAULT: Self = Self(rmu::rstf0::XTALERF);
    pub const CPU_LOCKUP: Self = Self(rmu::rstf0::LKUPRF);
    /// More than one cause was latched
    pub const MULTIPLE: Self = Self(rmu::rstf0::MULTIRF);

    /// Every cause flag
    pub const ALL: Self = Self(0x4000_7FFF);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Keeps only the bits that name a reset cause.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every cause in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if `self` and `other` share at least one cause.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for ResetCause {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Reset flags and reset control
pub struct ResetStatus {
    rb: *const rmu::RegisterBlock,
}

unsafe impl Send for ResetStatus {}

impl ResetStatus {
    fn regs(&self) -> &rmu::RegisterBlock {
        // NOTE(unsafe) RSTF0 and PRSTCR0 are only accessed through this part
        unsafe { &*self.rb }
    }

    /// Latched reset causes.
    pub fn flags(&self) -> ResetCause {
        ResetCause::from_bits_truncate(self.regs().rstf0.read())
    }

    /// Returns `true` if any cause in `cause` is latched.
    pub fn contains(&self, cause: ResetCause) -> bool {
        self.regs().rstf0.is_set(cause.bits())
    }

    /// Clears every reset flag.
    pub fn clear(&mut self, fprc: &Fprc) -> Result<(), Error> {
        fprc.ensure_unlocked(Protection::Code1)?;
        self.regs().rstf0.set_bits(rmu::rstf0::CLRF);
        // the clear takes a few cycles to propagate to the flags
        poll::delay_cycles(6);
        Ok(())
    }

    /// Turns the reset on CPU lockup on or off.
    pub fn cpu_lockup_reset(&mut self, enable: bool, fprc: &Fprc) -> Result<(), Error> {
        fprc.ensure_unlocked(Protection::Code1)?;
        let prstcr0 = &self.regs().prstcr0;
        if enable {
            prstcr0.set_bits(rmu::prstcr0::LKUPREN);
        } else {
            prstcr0.clear_bits(rmu::prstcr0::LKUPREN);
        }
        Ok(())
    }
}

/// Polling budget for a peripheral to leave reset.
#[cfg(feature = "hc32f334")]
const RESET_TIMEOUT: u32 = 100;

#[cfg(feature = "hc32f334")]
macro_rules! frst {
    ($(
        $(#[$attr:meta])*
        $FRSTX:ident, $Periph:ident, $reg:ident, $valid:expr, {
            $($(#[$pattr:meta])* $NAME:ident = $bit:expr,)*
        }
    )+) => {
        $(
            /// Set of peripherals reset through one FRST register
            #[derive(Clone, Copy, Debug, Eq, PartialEq)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub struct $Periph(u32);

            impl $Periph {
                $(
                    $(#[$pattr])*
                    pub const $NAME: Self = Self(1 << $bit);
                )*

                /// Every peripheral of this register.
                pub const ALL: Self = Self($valid);

                /// Builds a set from raw bits, `None` if a bit is not implemented.
                pub const fn from_bits(bits: u32) -> Option<Self> {
                    if bits & !$valid == 0 {
                        Some(Self(bits))
                    } else {
                        None
                    }
                }

                pub const fn bits(self) -> u32 {
                    self.0
                }
            }

            impl BitOr for $Periph {
                type Output = Self;

                fn bitor(self, rhs: Self) -> Self {
                    Self(self.0 | rhs.0)
                }
            }

            $(#[$attr])*
            pub struct $FRSTX {
                rb: *const rmu::RegisterBlock,
            }

            unsafe impl Send for $FRSTX {}

            impl $FRSTX {
                /// Pulses the reset of every peripheral in `periph` and waits for them to leave
                /// reset.
                pub fn reset(&mut self, periph: $Periph, fprc: &Fprc) -> Result<(), Error> {
                    let bits = periph.bits();
                    if bits == 0 {
                        return Err(Error::InvalidParameter);
                    }
                    fprc.ensure_unlocked(Protection::Code1)?;

                    // NOTE(unsafe) this part is the only one touching its FRST register
                    let reg = unsafe { &(*self.rb).$reg };
                    trace!("peripheral reset {=u32:#x}", bits);
                    reg.clear_bits(bits);
                    poll::wait_until(RESET_TIMEOUT, || reg.read_bits(bits) == bits).map_err(|e| {
                        warn!("peripheral reset timed out");
                        e
                    })
                }
            }
        )+
    };
}

#[cfg(feature = "hc32f334")]
frst! {
    /// Resets of the system bus peripherals
    Frst0, Frst0Periph, frst0, rmu::frst::FRST0_ALL, {
        PLA = 11,
        DMA = 14,
        FCM = 16,
        AOS = 17,
        CTC = 18,
        CRC = 23,
    }
    /// Resets of the communication peripherals
    Frst1, Frst1Periph, frst1, rmu::frst::FRST1_ALL, {
        MCAN1 = 0,
        MCAN2 = 1,
        I2C = 4,
        SPI = 16,
    }
    /// Resets of the timers
    Frst2, Frst2Periph, frst2, rmu::frst::FRST2_ALL, {
        /// All TMR6 units
        TMR6 = 0,
        TMR4 = 8,
        /// All HRPWM units and the common block
        HRPWM = 11,
        TMR0_1 = 12,
        TMR0_2 = 13,
        EMB = 15,
        TMRA_1 = 20,
        TMRA_2 = 21,
        TMRA_3 = 22,
        TMRA_4 = 23,
        TMRA_5 = 24,
    }
    /// Resets of the analog peripherals and USARTs
    Frst3, Frst3Periph, frst3, rmu::frst::FRST3_ALL, {
        ADC1 = 0,
        ADC2 = 1,
        ADC3 = 2,
        DAC1 = 4,
        DAC2 = 5,
        /// Comparators 1 and 2 share one reset
        CMP12 = 8,
        CMP3 = 9,
        USART1 = 20,
        USART2 = 21,
        USART3 = 22,
        USART4 = 23,
    }
}

/// Peripheral reset through the bus part it is reset by
#[cfg(feature = "hc32f334")]
pub trait Reset {
    type Bus;

    fn reset(bus: &mut Self::Bus, fprc: &Fprc) -> Result<(), Error>;
}

#[cfg(feature = "hc32f334")]
macro_rules! bus {
    ($($PER:ident => ($Bus:ident, $periph:expr),)+) => {
        $(
            impl Reset for pac::$PER {
                type Bus = $Bus;

                #[inline(always)]
                fn reset(bus: &mut Self::Bus, fprc: &Fprc) -> Result<(), Error> {
                    bus.reset($periph, fprc)
                }
            }
        )+
    };
}

#[cfg(feature = "hc32f334")]
bus! {
    AOS => (Frst0, Frst0Periph::AOS),
    CRC => (Frst0, Frst0Periph::CRC),
    DMA1 => (Frst0, Frst0Periph::DMA),
    HRPWM1 => (Frst2, Frst2Periph::HRPWM),
    HRPWM2 => (Frst2, Frst2Periph::HRPWM),
    HRPWM3 => (Frst2, Frst2Periph::HRPWM),
    HRPWM4 => (Frst2, Frst2Periph::HRPWM),
    HRPWM5 => (Frst2, Frst2Periph::HRPWM),
    HRPWM6 => (Frst2, Frst2Periph::HRPWM),
    HRPWM_COMMON => (Frst2, Frst2Periph::HRPWM),
    DAC1 => (Frst3, Frst3Periph::DAC1),
    DAC2 => (Frst3, Frst3Periph::DAC2),
    CMP1 => (Frst3, Frst3Periph::CMP12),
    CMP2 => (Frst3, Frst3Periph::CMP12),
    CMP3 => (Frst3, Frst3Periph::CMP3),
}

#[cfg(test)]
pub(crate) fn mock() -> Rmu {
    RMU::mock().constrain()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_ignore_reserved_bits() {
        let rmu = RMU::mock();
        let rb = unsafe { &*rmu.as_ptr() };
        rb.rstf0.write(rmu::rstf0::WDRF | rmu::rstf0::MULTIRF | rmu::rstf0::PINRF | 1 << 20);
        let parts = rmu.constrain();

        let flags = parts.status.flags();
        assert_eq!(
            flags,
            ResetCause::WATCHDOG | ResetCause::MULTIPLE | ResetCause::PIN
        );
        assert!(flags.contains(ResetCause::WATCHDOG | ResetCause::PIN));
        assert!(!flags.contains(ResetCause::WATCHDOG | ResetCause::POWER_ON));
        assert!(parts.status.contains(ResetCause::PIN));
        assert!(!parts.status.contains(ResetCause::SOFTWARE));
    }

    #[test]
    fn clear_requires_code1() {
        let rmu = RMU::mock();
        let rb = unsafe { &*rmu.as_ptr() };
        let mut parts = rmu.constrain();
        let mut pwc = crate::pwc::mock();

        assert_eq!(parts.status.clear(&pwc.fprc), Err(Error::Locked));
        assert_eq!(rb.rstf0.read(), 0);

        pwc.fprc.unlock(Protection::Code1);
        assert_eq!(parts.status.clear(&pwc.fprc), Ok(()));
        assert!(rb.rstf0.is_set(rmu::rstf0::CLRF));
    }

    #[test]
    fn cpu_lockup_reset_toggles_lkupren() {
        let rmu = RMU::mock();
        let rb = unsafe { &*rmu.as_ptr() };
        let mut parts = rmu.constrain();
        let mut pwc = crate::pwc::mock();
        pwc.fprc.unlock(Protection::Code1);

        parts.status.cpu_lockup_reset(true, &pwc.fprc).unwrap();
        assert_eq!(rb.prstcr0.read(), rmu::prstcr0::LKUPREN);
        parts.status.cpu_lockup_reset(false, &pwc.fprc).unwrap();
        assert_eq!(rb.prstcr0.read(), 0);
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn peripheral_reset_checks_protection_and_times_out() {
        let rmu = RMU::mock();
        let rb = unsafe { &*rmu.as_ptr() };
        rb.frst3.write(rmu::frst::FRST3_ALL);
        let mut parts = rmu.constrain();
        let mut pwc = crate::pwc::mock();

        assert_eq!(
            parts.frst3.reset(Frst3Periph::DAC1, &pwc.fprc),
            Err(Error::Locked)
        );
        assert_eq!(rb.frst3.read(), rmu::frst::FRST3_ALL);

        pwc.fprc.unlock(Protection::Code1);
        // plain memory never releases the reset
        assert_eq!(
            parts.frst3.reset(Frst3Periph::DAC1 | Frst3Periph::CMP3, &pwc.fprc),
            Err(Error::Timeout)
        );
        assert_eq!(rb.frst3.read(), rmu::frst::FRST3_ALL & !((1 << 4) | (1 << 9)));
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn empty_and_foreign_masks_are_rejected() {
        let mut parts = mock();
        let mut pwc = crate::pwc::mock();
        pwc.fprc.unlock(Protection::Code1);

        assert_eq!(Frst0Periph::from_bits(1 << 0), None);
        assert_eq!(Frst2Periph::from_bits(0x01F0_B901), Some(Frst2Periph::ALL));
        let empty = Frst1Periph::from_bits(0).unwrap();
        assert_eq!(
            parts.frst1.reset(empty, &pwc.fprc),
            Err(Error::InvalidParameter)
        );
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn reset_trait_targets_the_right_register() {
        let rmu = RMU::mock();
        let rb = unsafe { &*rmu.as_ptr() };
        rb.frst0.write(rmu::frst::FRST0_ALL);
        let mut parts = rmu.constrain();
        let mut pwc = crate::pwc::mock();
        pwc.fprc.unlock(Protection::Code1);

        assert_eq!(
            <pac::CRC as Reset>::reset(&mut parts.frst0, &pwc.fprc),
            Err(Error::Timeout)
        );
        assert_eq!(rb.frst0.read(), rmu::frst::FRST0_ALL & !(1 << 23));
    }
}
