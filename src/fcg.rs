// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Function clock gating
//!
//! Every peripheral clock passes through a gate in one of the four `FCGx` registers of the PWC. A
//! cleared bit lets the clock through, a set bit stops it. `FCG0` is additionally guarded by the
//! `FCG0PC` key, which the [`Fcg0`] part opens and closes around each change.
//!
//! Drivers take the bus part their peripheral hangs off and enable the clock themselves through
//! the [`Enable`] trait, so calling the raw gates is only needed for peripherals this crate has no
//! driver for.

use core::ops::BitOr;

use crate::pac::{self, pwc, Reg};

/// Peripheral clock control through the bus part it is gated by
pub trait Enable {
    type Bus;

    fn enable(bus: &mut Self::Bus);
    fn disable(bus: &mut Self::Bus);
    fn is_enabled(bus: &Self::Bus) -> bool;
}

macro_rules! fcg {
    ($(
        $(#[$attr:meta])*
        $FCGX:ident, $Periph:ident, $reg:ident, $valid:expr, protected: $protected:expr, {
            $($(#[$pattr:meta])* $NAME:ident = $bit:expr,)*
        }
    )+) => {
        $(
            /// Set of peripherals gated by one FCG register
            #[derive(Clone, Copy, Debug, Eq, PartialEq)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub struct $Periph(u32);

            impl $Periph {
                $(
                    $(#[$pattr])*
                    pub const $NAME: Self = Self(1 << $bit);
                )*

                /// Bits this register implements.
                pub const VALID: u32 = $valid;

                /// Builds a set from raw bits, `None` if a bit is not implemented.
                pub const fn from_bits(bits: u32) -> Option<Self> {
                    if bits & !Self::VALID == 0 {
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
            pub struct $FCGX {
                rb: *const pwc::RegisterBlock,
            }

            unsafe impl Send for $FCGX {}

            impl $FCGX {
                pub(crate) fn new(rb: *const pwc::RegisterBlock) -> Self {
                    Self { rb }
                }

                fn regs(&self) -> &pwc::RegisterBlock {
                    // NOTE(unsafe) this part is the only one touching its gate register
                    unsafe { &*self.rb }
                }

                fn gate<F>(&mut self, f: F)
                where
                    F: FnOnce(&Reg<u32>),
                {
                    let regs = self.regs();
                    if $protected {
                        regs.fcg0pc.write(pwc::fcg0pc::UNLOCK);
                    }
                    f(&regs.$reg);
                    if $protected {
                        regs.fcg0pc.write(pwc::fcg0pc::LOCK);
                    }
                }

                /// Starts the clock of every peripheral in `periph`.
                pub fn enable(&mut self, periph: $Periph) {
                    self.gate(|reg| reg.clear_bits(periph.bits()));
                }

                /// Stops the clock of every peripheral in `periph`.
                pub fn disable(&mut self, periph: $Periph) {
                    self.gate(|reg| reg.set_bits(periph.bits()));
                }

                /// Returns `true` if every peripheral in `periph` is clocked.
                pub fn is_enabled(&self, periph: $Periph) -> bool {
                    !self.regs().$reg.is_set(periph.bits())
                }
            }
        )+
    };
}

#[cfg(feature = "hc32f334")]
fcg! {
    /// Clock gates of the memories, DMA and system bus peripherals
    Fcg0, Fcg0Periph, fcg0, 0x0087_4C11, protected: true, {
        SRAMH = 0,
        SRAM0 = 4,
        SRAMB = 10,
        PLA = 11,
        DMA = 14,
        FCM = 16,
        AOS = 17,
        CTC = 18,
        CRC = 23,
    }
    /// Clock gates of the CAN, I2C and SPI peripherals
    Fcg1, Fcg1Periph, fcg1, 0x0001_0013, protected: false, {
        MCAN1 = 0,
        MCAN2 = 1,
        I2C = 4,
        SPI = 16,
    }
    /// Clock gates of the timers
    Fcg2, Fcg2Periph, fcg2, 0x01F0_B7FF, protected: false, {
        TMR6_1 = 0,
        TMR6_2 = 1,
        TMR6_3 = 2,
        TMR6_4 = 3,
        HRPWM_1 = 4,
        HRPWM_2 = 5,
        HRPWM_3 = 6,
        HRPWM_4 = 7,
        HRPWM_5 = 8,
        HRPWM_6 = 9,
        TMR4 = 10,
        TMR0_1 = 12,
        TMR0_2 = 13,
        EMB = 15,
        TMRA_1 = 20,
        TMRA_2 = 21,
        TMRA_3 = 22,
        TMRA_4 = 23,
        TMRA_5 = 24,
    }
    /// Clock gates of the analog peripherals and USARTs
    Fcg3, Fcg3Periph, fcg3, 0x00F0_0337, protected: false, {
        ADC1 = 0,
        ADC2 = 1,
        ADC3 = 2,
        DAC1 = 4,
        DAC2 = 5,
        /// Comparators 1 and 2 share one gate
        CMP12 = 8,
        CMP3 = 9,
        USART1 = 20,
        USART2 = 21,
        USART3 = 22,
        USART4 = 23,
    }
}

#[cfg(feature = "hc32f4a0")]
fcg! {
    /// Clock gates of the memories, DMA and system bus peripherals
    Fcg0, Fcg0Periph, fcg0, 0xFFFF_FFFF, protected: true, {
        SRAMH = 0,
        SRAMB = 10,
        DMA1 = 14,
        DMA2 = 15,
        AOS = 17,
        CRC = 23,
    }
    /// Clock gates of the communication peripherals
    Fcg1, Fcg1Periph, fcg1, 0xFFFF_FFFF, protected: false, {}
    /// Clock gates of the timers
    Fcg2, Fcg2Periph, fcg2, 0xFFFF_FFFF, protected: false, {}
    /// Clock gates of the analog peripherals and USARTs
    Fcg3, Fcg3Periph, fcg3, 0xFFFF_FFFF, protected: false, {
        ADC1 = 0,
        ADC2 = 1,
        ADC3 = 2,
        DAC1 = 4,
        DAC2 = 5,
    }
}

macro_rules! bus {
    ($($PER:ident => ($Bus:ident, $periph:expr),)+) => {
        $(
            impl Enable for pac::$PER {
                type Bus = $Bus;

                #[inline(always)]
                fn enable(bus: &mut Self::Bus) {
                    bus.enable($periph);
                }

                #[inline(always)]
                fn disable(bus: &mut Self::Bus) {
                    bus.disable($periph);
                }

                #[inline(always)]
                fn is_enabled(bus: &Self::Bus) -> bool {
                    bus.is_enabled($periph)
                }
            }
        )+
    };
}

bus! {
    CRC => (Fcg0, Fcg0Periph::CRC),
    DAC1 => (Fcg3, Fcg3Periph::DAC1),
    DAC2 => (Fcg3, Fcg3Periph::DAC2),
}

#[cfg(feature = "hc32f334")]
bus! {
    AOS => (Fcg0, Fcg0Periph::AOS),
    DMA1 => (Fcg0, Fcg0Periph::DMA),
    CMP1 => (Fcg3, Fcg3Periph::CMP12),
    CMP2 => (Fcg3, Fcg3Periph::CMP12),
    CMP3 => (Fcg3, Fcg3Periph::CMP3),
    HRPWM1 => (Fcg2, Fcg2Periph::HRPWM_1),
    HRPWM2 => (Fcg2, Fcg2Periph::HRPWM_2),
    HRPWM3 => (Fcg2, Fcg2Periph::HRPWM_3),
    HRPWM4 => (Fcg2, Fcg2Periph::HRPWM_4),
    HRPWM5 => (Fcg2, Fcg2Periph::HRPWM_5),
    HRPWM6 => (Fcg2, Fcg2Periph::HRPWM_6),
}

#[cfg(feature = "hc32f4a0")]
bus! {
    DMA1 => (Fcg0, Fcg0Periph::DMA1),
    DMA2 => (Fcg0, Fcg0Periph::DMA2),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::PWC;
    use crate::pwc::PwcExt;

    #[test]
    fn enable_clears_and_disable_sets_gate_bits() {
        let pwc = PWC::mock();
        let rb = unsafe { &*pwc.as_ptr() };
        rb.fcg3.write(0xFFFF_FFFF);
        let mut parts = pwc.constrain();

        parts.fcg3.enable(Fcg3Periph::DAC1 | Fcg3Periph::ADC2);
        assert_eq!(rb.fcg3.read(), !((1 << 4) | (1 << 1)));
        assert!(parts.fcg3.is_enabled(Fcg3Periph::DAC1));
        assert!(!parts.fcg3.is_enabled(Fcg3Periph::DAC2));

        parts.fcg3.disable(Fcg3Periph::DAC1);
        assert!(!parts.fcg3.is_enabled(Fcg3Periph::DAC1));
        assert!(parts.fcg3.is_enabled(Fcg3Periph::ADC2));
    }

    #[test]
    fn fcg0_changes_are_bracketed_by_the_key() {
        let pwc = PWC::mock();
        let rb = unsafe { &*pwc.as_ptr() };
        rb.fcg0.write(0xFFFF_FFFF);
        let mut parts = pwc.constrain();

        parts.fcg0.enable(Fcg0Periph::CRC);
        assert!(parts.fcg0.is_enabled(Fcg0Periph::CRC));
        assert_eq!(rb.fcg0.read(), !(1 << 23));
        assert_eq!(rb.fcg0pc.read(), 0xA5A5_0000);
    }

    #[test]
    fn enable_trait_targets_the_right_gate() {
        let mut parts = crate::pwc::mock();
        parts.fcg3.disable(Fcg3Periph::DAC2);
        <pac::DAC2 as Enable>::enable(&mut parts.fcg3);
        assert!(<pac::DAC2 as Enable>::is_enabled(&parts.fcg3));
        <pac::DAC2 as Enable>::disable(&mut parts.fcg3);
        assert!(!parts.fcg3.is_enabled(Fcg3Periph::DAC2));
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn from_bits_rejects_unimplemented_bits() {
        assert_eq!(Fcg0Periph::from_bits(1 << 23), Some(Fcg0Periph::CRC));
        assert_eq!(Fcg0Periph::from_bits(1 << 1), None);
        assert_eq!(Fcg2Periph::from_bits(0x01F0_B7FF).map(Fcg2Periph::bits), Some(0x01F0_B7FF));
    }
}
