// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Power controller registers: function clock gating and write protection

use super::Reg;

#[repr(C, align(4))]
pub struct RegisterBlock {
    /// 0x00 - Function clock gate 0
    pub fcg0: Reg<u32>,
    /// 0x04 - Function clock gate 1
    pub fcg1: Reg<u32>,
    /// 0x08 - Function clock gate 2
    pub fcg2: Reg<u32>,
    /// 0x0C - Function clock gate 3
    pub fcg3: Reg<u32>,
    /// 0x10 - FCG0 protect control
    pub fcg0pc: Reg<u32>,
    _reserved0: [u8; 0x3EA],
    /// 0x3FE - Function protect control
    pub fprc: Reg<u16>,
}

pub mod fcg0pc {
    pub const UNLOCK: u32 = 0xA5A5_0001;
    pub const LOCK: u32 = 0xA5A5_0000;
}

pub mod fprc {
    /// Write key, must accompany every write
    pub const KEY: u16 = 0xA500;
    pub const FPRCB0: u16 = 1 << 0;
    pub const FPRCB1: u16 = 1 << 1;
    pub const FPRCB3: u16 = 1 << 3;
}
