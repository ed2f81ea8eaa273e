// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AOS registers

use super::Reg;

#[repr(C, align(4))]
pub struct RegisterBlock {
    /// 0x00 - Software trigger
    pub intsfttrg: Reg<u32>,
    /// 0x04 - DMA channel 0-7 trigger select
    pub dma_trgsel: [Reg<u32>; 8],
    /// 0x24 - DMA re-config trigger select
    pub dma_rc_trgsel: Reg<u32>,
    /// 0x28 - TMR6 trigger select 0-3
    pub tmr6_trgsel: [Reg<u32>; 4],
    /// 0x38 - HRPWM trigger select 0-3
    pub hrpwm_trgsel: [Reg<u32>; 4],
    /// 0x48 - TMR4 trigger select
    pub tmr4_trgsel: Reg<u32>,
    /// 0x4C - Event port 1/2 trigger select
    pub pevnt_trgsel12: Reg<u32>,
    /// 0x50 - Event port 3/4 trigger select
    pub pevnt_trgsel34: Reg<u32>,
    /// 0x54 - TMR0 trigger select
    pub tmr0_trgsel: Reg<u32>,
    /// 0x58 - TMRA trigger select 0-3
    pub tmra_trgsel: [Reg<u32>; 4],
    /// 0x68 - ADC1 trigger select 0-1
    pub adc1_trgsel: [Reg<u32>; 2],
    /// 0x70 - ADC2 trigger select 0-1
    pub adc2_trgsel: [Reg<u32>; 2],
    /// 0x78 - ADC3 trigger select 0-1
    pub adc3_trgsel: [Reg<u32>; 2],
    /// 0x80 - Common trigger select 1
    pub comtrgsel1: Reg<u32>,
    /// 0x84 - Common trigger select 2
    pub comtrgsel2: Reg<u32>,
}

pub mod intsfttrg {
    pub const STRG: u32 = 1 << 0;
}

pub mod trgsel {
    pub const TRGSEL: u32 = 0x1FF;
    pub const COMEN1: u32 = 1 << 30;
    pub const COMEN2: u32 = 1 << 31;
}
