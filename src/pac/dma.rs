// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DMA registers

use super::Reg;

/// Number of channels per DMA unit
pub const CHANNELS: usize = 8;

#[repr(C)]
pub struct RegisterBlock {
    /// 0x00 - Unit enable
    pub en: Reg<u32>,
    /// 0x04 - Error flags
    pub intstat0: Reg<u32>,
    /// 0x08 - Transfer and block complete flags
    pub intstat1: Reg<u32>,
    /// 0x0C - Error interrupt masks
    pub intmask0: Reg<u32>,
    /// 0x10 - Transfer and block complete interrupt masks
    pub intmask1: Reg<u32>,
    /// 0x14 - Error flag clear
    pub intclr0: Reg<u32>,
    /// 0x18 - Transfer and block complete flag clear
    pub intclr1: Reg<u32>,
    /// 0x1C - Channel enable, write 1 to set
    pub chen: Reg<u32>,
    /// 0x20 - Request status
    pub reqstat: Reg<u32>,
    /// 0x24 - Channel status
    pub chstat: Reg<u32>,
    /// 0x28 - Software request
    pub swreq: Reg<u32>,
    /// 0x2C - Re-configuration control
    pub rcfgctl: Reg<u32>,
    _reserved0: u32,
    /// 0x34 - Channel enable clear, write 1 to clear
    pub chenclr: Reg<u32>,
    _reserved1: [u32; 2],
    /// 0x40 - Channel registers, 0x40 apart
    pub ch: [Channel; CHANNELS],
}

#[repr(C)]
pub struct Channel {
    /// 0x00 - Source address
    pub sar: Reg<u32>,
    /// 0x04 - Destination address
    pub dar: Reg<u32>,
    /// 0x08 - Block size and transfer count
    pub dtctl: Reg<u32>,
    /// 0x0C - Repeat sizes
    pub rpt: Reg<u32>,
    /// 0x10 - Source non-sequence control
    pub snseqctl: Reg<u32>,
    /// 0x14 - Destination non-sequence control
    pub dnseqctl: Reg<u32>,
    /// 0x18 - Linked list pointer
    pub llp: Reg<u32>,
    /// 0x1C - Channel control
    pub chctl: Reg<u32>,
    /// 0x20 - Current source address
    pub monsar: Reg<u32>,
    /// 0x24 - Current destination address
    pub mondar: Reg<u32>,
    /// 0x28 - Current block size and transfer count
    pub mondtctl: Reg<u32>,
    /// 0x2C - Current repeat sizes
    pub monrpt: Reg<u32>,
    /// 0x30 - Current source non-sequence control
    pub monsnseqctl: Reg<u32>,
    /// 0x34 - Current destination non-sequence control
    pub mondnseqctl: Reg<u32>,
    _reserved: [u32; 2],
}

pub mod en {
    pub const EN: u32 = 1 << 0;
}

/// Per channel bit groups of `INTSTAT0`, `INTMASK0` and `INTCLR0`
pub mod int0 {
    pub const TRNERR_POS: u32 = 0;
    pub const REQERR_POS: u32 = 16;
}

/// Per channel bit groups of `INTSTAT1`, `INTMASK1` and `INTCLR1`
pub mod int1 {
    pub const TC_POS: u32 = 0;
    pub const BTC_POS: u32 = 16;
}

pub mod chen {
    pub const CHEN: u32 = 0xFF;
}

pub mod reqstat {
    pub const CHREQ: u32 = 0xFF;
    pub const RCFGREQ: u32 = 1 << 15;
}

pub mod chstat {
    pub const DMAACT: u32 = 1 << 0;
    pub const RCFGACT: u32 = 1 << 1;
    pub const CHACT_POS: u32 = 16;
}

pub mod swreq {
    pub const SWREQ: u32 = 0xFF;
    pub const SWREQWP_POS: u32 = 16;
    /// Write key that must accompany a software request
    pub const KEY: u32 = 0xA1 << SWREQWP_POS;
}

pub mod dtctl {
    /// Block size, 0 means 1024
    pub const BLKSIZE: u32 = 0x3FF;
    pub const CNT_POS: u32 = 16;
    pub const CNT: u32 = 0xFFFF << CNT_POS;
    pub const RESET: u32 = 0x0000_0001;
}

pub mod rpt {
    pub const SRPT: u32 = 0x3FF;
    pub const DRPT_POS: u32 = 16;
    pub const DRPT: u32 = 0x3FF << DRPT_POS;
}

/// Layout shared by `SNSEQCTL` and `DNSEQCTL`
pub mod nseqctl {
    pub const OFFSET: u32 = 0x000F_FFFF;
    pub const CNT_POS: u32 = 20;
    pub const CNT: u32 = 0xFFF << CNT_POS;
}

pub mod llp {
    pub const LLP: u32 = 0xFFFF_FFFC;
}

pub mod chctl {
    pub const SINC_POS: u32 = 0;
    pub const SINC: u32 = 0b11 << SINC_POS;
    pub const DINC_POS: u32 = 2;
    pub const DINC: u32 = 0b11 << DINC_POS;
    pub const SRPTEN: u32 = 1 << 4;
    pub const DRPTEN: u32 = 1 << 5;
    pub const SNSEQEN: u32 = 1 << 6;
    pub const DNSEQEN: u32 = 1 << 7;
    pub const HSIZE_POS: u32 = 8;
    pub const HSIZE: u32 = 0b11 << HSIZE_POS;
    pub const LLPEN: u32 = 1 << 10;
    /// Load the next descriptor and keep running instead of waiting for a request
    pub const LLPRUN: u32 = 1 << 11;
    pub const IE: u32 = 1 << 12;
    /// AHB bufferable and cacheable transfers
    pub const HPROT: u32 = 0b11 << 13;
    pub const RESET: u32 = 0x0000_1000;
}
