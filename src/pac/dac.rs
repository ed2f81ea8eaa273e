// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DAC registers

use super::Reg;

#[repr(C, align(4))]
pub struct RegisterBlock {
    /// 0x00 - Channel 1 data
    pub dadr1: Reg<u16>,
    /// 0x02 - Channel 2 data
    pub dadr2: Reg<u16>,
    /// 0x04 - Control register
    pub dacr: Reg<u16>,
    /// 0x06 - ADC priority control
    pub daadpcr: Reg<u16>,
    _reserved0: [u16; 10],
    /// 0x1C - Output control
    pub daocr: Reg<u16>,
    _reserved1: u16,
    /// 0x20 - Data load mode
    #[cfg(feature = "hc32f334")]
    pub dacr2: Reg<u16>,
    #[cfg(feature = "hc32f334")]
    _reserved2: u16,
    /// 0x24 - Channel 1 active data
    #[cfg(feature = "hc32f334")]
    pub dadactr1: Reg<u16>,
    /// 0x26 - Channel 2 active data
    #[cfg(feature = "hc32f334")]
    pub dadactr2: Reg<u16>,
}

impl RegisterBlock {
    /// Both data registers as a single 32 bit register, channel 1 in the low half.
    #[inline(always)]
    pub fn dadr(&self) -> &Reg<u32> {
        // NOTE(unsafe) DADR1 sits at offset 0 and the block is 4-byte aligned
        unsafe { &*(self as *const Self as *const Reg<u32>) }
    }
}

pub mod dacr {
    /// Dual channel mode
    pub const DAE: u16 = 1 << 0;
    pub const DA1E: u16 = 1 << 1;
    pub const DA2E: u16 = 1 << 2;
    /// Left aligned data
    pub const DPSEL: u16 = 1 << 8;
    pub const DAAMP1: u16 = 1 << 9;
    pub const DAAMP2: u16 = 1 << 10;
    /// Channel 1 data comes from the DCU
    #[cfg(feature = "hc32f4a0")]
    pub const EXTDSL1: u16 = 1 << 11;
    #[cfg(feature = "hc32f4a0")]
    pub const EXTDSL2: u16 = 1 << 12;
}

pub mod daadpcr {
    pub const ADCSL1: u16 = 1 << 0;
    pub const ADCSL2: u16 = 1 << 1;
    pub const ADCSL3: u16 = 1 << 2;
    /// Channel 1 conversion pending behind an ADC
    pub const DA1SF: u16 = 1 << 8;
    pub const DA2SF: u16 = 1 << 9;
    pub const ADPEN: u16 = 1 << 15;
}

pub mod daocr {
    pub const DAODIS1: u16 = 1 << 14;
    pub const DAODIS2: u16 = 1 << 15;
}

#[cfg(feature = "hc32f334")]
pub mod dacr2 {
    pub const LDMD1: u16 = 1 << 0;
    pub const LDMD2: u16 = 1 << 8;
}

pub const ACTIVE_DATA_MASK: u16 = 0x0FFF;
