// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reset management unit registers

use super::Reg;

#[repr(C, align(4))]
pub struct RegisterBlock {
    /// 0x00 - Peripheral reset 0
    pub frst0: Reg<u32>,
    /// 0x04 - Peripheral reset 1
    pub frst1: Reg<u32>,
    /// 0x08 - Peripheral reset 2
    pub frst2: Reg<u32>,
    /// 0x0C - Peripheral reset 3
    pub frst3: Reg<u32>,
    /// 0x10 - Reset control 0
    pub prstcr0: Reg<u32>,
    /// 0x14 - Reset flags 0
    pub rstf0: Reg<u32>,
}

pub mod prstcr0 {
    /// Reset on CPU lockup
    pub const LKUPREN: u32 = 1 << 5;
}

pub mod rstf0 {
    pub const PORF: u32 = 1 << 0;
    pub const PINRF: u32 = 1 << 1;
    pub const BORF: u32 = 1 << 2;
    pub const PVD1RF: u32 = 1 << 3;
    pub const PVD2RF: u32 = 1 << 4;
    pub const WDRF: u32 = 1 << 5;
    pub const SWDRF: u32 = 1 << 6;
    pub const PDRF: u32 = 1 << 7;
    pub const SWRF: u32 = 1 << 8;
    pub const MPUERF: u32 = 1 << 9;
    pub const RAPERF: u32 = 1 << 10;
    pub const RAECRF: u32 = 1 << 11;
    pub const CKFERF: u32 = 1 << 12;
    pub const XTALERF: u32 = 1 << 13;
    pub const LKUPRF: u32 = 1 << 14;
    pub const MULTIRF: u32 = 1 << 30;
    /// Write 1 to clear all flags
    pub const CLRF: u32 = 1 << 31;
}

#[cfg(feature = "hc32f334")]
pub mod frst {
    pub const FRST0_ALL: u32 = 0x0087_4800;
    pub const FRST1_ALL: u32 = 0x0001_0013;
    pub const FRST2_ALL: u32 = 0x01F0_B901;
    pub const FRST3_ALL: u32 = 0x00F0_0337;
}
