// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comparator registers

use super::Reg;

#[repr(C, align(4))]
pub struct RegisterBlock {
    /// 0x00 - Mode
    pub mdr: Reg<u16>,
    /// 0x02 - Filter and interrupt
    pub fir: Reg<u16>,
    /// 0x04 - Output control
    pub ocr: Reg<u16>,
    /// 0x06 - Input select
    pub pmsr: Reg<u16>,
    _reserved0: u16,
    /// 0x0A - Blank window source select
    pub bwsr1: Reg<u16>,
    /// 0x0C - Blank window valid condition
    pub bwsr2: Reg<u16>,
    /// 0x0E - Blank window mask width
    pub bwpr: Reg<u16>,
    /// 0x10 - Scan status
    pub scmr: Reg<u16>,
    /// 0x12 - Scan source select
    pub sccr: Reg<u16>,
    /// 0x14 - Scan time
    pub sctr: Reg<u16>,
    _reserved1: u16,
}

pub mod mdr {
    pub const CENB: u16 = 1 << 0;
    /// Window mode, only on CMP2
    pub const CWDE: u16 = 1 << 1;
    pub const CSMD_POS: u16 = 4;
    pub const CSMD: u16 = 0b11 << CSMD_POS;
    pub const HYST_POS: u16 = 8;
    pub const HYST: u16 = 0b111 << HYST_POS;
    /// Comparison result
    pub const CMON: u16 = 1 << 15;
    pub const RESET: u16 = 0x0000;
}

pub mod fir {
    pub const FCKS: u16 = 0b111;
    pub const EDGS_POS: u16 = 4;
    pub const EDGS: u16 = 0b11 << EDGS_POS;
    pub const CIEN: u16 = 1 << 6;
    /// Rising edge detected
    pub const CRF: u16 = 1 << 8;
    /// Falling edge detected
    pub const CFF: u16 = 1 << 9;
    pub const RESET: u16 = 0x0000;
}

pub mod ocr {
    pub const COEN: u16 = 1 << 0;
    pub const COPS: u16 = 1 << 1;
    pub const CPOE: u16 = 1 << 2;
    pub const BWEN: u16 = 1 << 3;
    /// Blank window edge mode
    pub const BWMD: u16 = 1 << 4;
    pub const BWOL_POS: u16 = 5;
    pub const BWOL: u16 = 0b11 << BWOL_POS;
    pub const RESET: u16 = 0x0000;
}

pub mod pmsr {
    pub const RVSL: u16 = 0x1F;
    pub const CVSL_POS: u16 = 8;
    pub const CVSL: u16 = 0b11 << CVSL_POS;
    pub const RESET: u16 = 0x0000;
}

pub mod bwsr2 {
    pub const TWEG: u16 = 0b11;
    pub const TWLV: u16 = 1 << 2;
}

pub mod bwpr {
    pub const TWPW: u16 = 0xFF;
}

pub mod scmr {
    pub const CVST: u16 = 0b11;
    pub const RVST_POS: u16 = 8;
    pub const RVST: u16 = 0x1F << RVST_POS;
}

pub mod sccr {
    pub const SCSL: u16 = 0x1F;
    pub const SCEN: u16 = 1 << 15;
}

pub mod sctr {
    pub const STB: u16 = 0x3F;
    pub const PRD_POS: u16 = 8;
    pub const PRD: u16 = 0xFF << PRD_POS;
}
