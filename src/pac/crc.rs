// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CRC registers

use super::Reg;

#[repr(C, align(4))]
pub struct RegisterBlock {
    /// 0x00 - Control register
    pub cr: Reg<u32>,
    /// 0x04 - Result register
    pub reslt: Reg<u32>,
    _reserved0: [u32; 30],
    /// 0x80 - Data register, accepts 8, 16 and 32 bit writes
    pub dat0: Reg<u32>,
}

pub mod cr {
    /// Protocol select, set for CRC32
    pub const CR: u32 = 1 << 1;
    /// Result matches the checked value
    pub const FLAG: u32 = 1 << 3;
    pub const RESET: u32 = 0x0001;
}
