// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! High resolution PWM registers

use super::Reg;

/// A/B pair of phase compare registers.
#[repr(C)]
pub struct PhaseCompare {
    pub a: Reg<u32>,
    pub b: Reg<u32>,
}

#[repr(C, align(4))]
pub struct RegisterBlock {
    /// 0x00 - Counter
    pub cnter: Reg<u32>,
    /// 0x04 - Update
    pub updar: Reg<u32>,
    /// 0x08 - Period
    pub hrperar: Reg<u32>,
    /// 0x0C - Period buffer
    pub hrperbr: Reg<u32>,
    /// 0x10 - General compare A
    pub hrgcmar: Reg<u32>,
    pub hrgcmbr: Reg<u32>,
    pub hrgcmcr: Reg<u32>,
    pub hrgcmdr: Reg<u32>,
    pub hrgcmer: Reg<u32>,
    pub hrgcmfr: Reg<u32>,
    pub hrgcmgr: Reg<u32>,
    pub hrgcmhr: Reg<u32>,
    /// 0x30 - Special compare A
    pub scmar: Reg<u32>,
    pub scmbr: Reg<u32>,
    pub scmcr: Reg<u32>,
    pub scmdr: Reg<u32>,
    /// 0x40 - Dead time, count up
    pub hrdtuar: Reg<u32>,
    /// 0x44 - Dead time, count down
    pub hrdtdar: Reg<u32>,
    /// 0x48 - Dead time buffer, count up
    pub hrdtubr: Reg<u32>,
    /// 0x4C - Dead time buffer, count down
    pub hrdtdbr: Reg<u32>,
    /// 0x50 - Interrupt enable
    pub iconr: Reg<u32>,
    /// 0x54 - Buffer control 1
    pub bconr1: Reg<u32>,
    /// 0x58 - Buffer control 2
    pub bconr2: Reg<u32>,
    /// 0x5C - Dead time control
    pub dconr: Reg<u32>,
    /// 0x60 - Channel A port control 1
    pub pcnar1: Reg<u32>,
    pub pcnbr1: Reg<u32>,
    pub pcnar2: Reg<u32>,
    pub pcnbr2: Reg<u32>,
    pub pcnar3: Reg<u32>,
    pub pcnbr3: Reg<u32>,
    /// 0x78 - Valid period
    pub vperr: Reg<u32>,
    /// 0x7C - Status flags 1
    pub stflr1: Reg<u32>,
    pub stflr2: Reg<u32>,
    /// 0x84 - Hardware start event select
    pub hstar1: Reg<u32>,
    pub hstar2: Reg<u32>,
    /// 0x8C - Hardware clear event select
    pub hclrr1: Reg<u32>,
    pub hclrr2: Reg<u32>,
    /// 0x94 - Hardware capture A event select
    pub hcpar1: Reg<u32>,
    pub hcpbr1: Reg<u32>,
    pub hcpar2: Reg<u32>,
    pub hcpbr2: Reg<u32>,
    /// 0xA4 - External event filter offset
    pub eefoffsetar: Reg<u32>,
    pub eefoffsetbr: Reg<u32>,
    /// 0xAC - External event filter window
    pub eefwinar: Reg<u32>,
    pub eefwinbr: Reg<u32>,
    /// 0xB4 - External event filter control, events 1-5
    pub eefltcr1: Reg<u32>,
    /// 0xB8 - External event filter control, events 6-10
    pub eefltcr2: Reg<u32>,
    /// 0xBC - Idle control
    pub idlecr: Reg<u32>,
    /// 0xC0 - General control
    pub gconr: Reg<u32>,
    /// 0xC4 - General control 1
    pub gconr1: Reg<u32>,
    /// 0xC8 - Interrupt enable buffer
    pub biconr: Reg<u32>,
    /// 0xCC - Port control buffers
    pub bpcnar1: Reg<u32>,
    pub bpcnbr1: Reg<u32>,
    pub bpcnar2: Reg<u32>,
    pub bpcnbr2: Reg<u32>,
    pub bpcnar3: Reg<u32>,
    pub bpcnbr3: Reg<u32>,
    /// 0xE4 - General control 1 buffer
    pub bgconr1: Reg<u32>,
    /// 0xE8 - Special compare A select
    pub scmaselr: Reg<u32>,
    /// 0xEC - DAC trigger control
    pub cr: Reg<u32>,
    /// 0xF0 - Phase control
    pub phsctl: Reg<u32>,
    /// 0xF4 - Phase compare 1-5
    pub phscmp: [PhaseCompare; 5],
}

/// Value of a data register after reset.
pub const DATA_RESET: u32 = 0x003F_FFC0;
/// Fractional bits below the counter value in data registers.
pub const DATA_FRACTION_BITS: u32 = 6;

pub mod gconr {
    pub const START: u32 = 1 << 0;
    pub const MODE_POS: u32 = 1;
    pub const MODE: u32 = 0b11 << MODE_POS;
    /// Counting up
    pub const DIR: u32 = 1 << 8;
    /// Stop at overflow
    pub const OVSTP: u32 = 1 << 16;
}

pub mod gconr1 {
    pub const SWAPMD: u32 = 1 << 0;
    pub const SWAPEN: u32 = 1 << 1;
    pub const INVCAEN: u32 = 1 << 2;
    pub const INVCBEN: u32 = 1 << 3;
    pub const PRDSEL_POS: u32 = 4;
    pub const PRDSEL: u32 = 0b11 << PRDSEL_POS;
    pub const PRDLK: u32 = 1 << 8;
}

/// Channel port control 1, identical layout for channel A and B
pub mod pcnr1 {
    pub const STAC_POS: u32 = 0;
    pub const STPC_POS: u32 = 2;
    pub const OVFC_POS: u32 = 4;
    pub const UDFC_POS: u32 = 6;
    pub const CMAU_POS: u32 = 8;
    pub const CMAD_POS: u32 = 10;
    pub const CMBU_POS: u32 = 12;
    pub const CMBD_POS: u32 = 14;
    pub const POLARITY: u32 = 0xFFFF;
    pub const EMBS_POS: u32 = 16;
    pub const EMBS: u32 = 0b11 << EMBS_POS;
    pub const EMBR_POS: u32 = 18;
    pub const EMBR: u32 = 0b11 << EMBR_POS;
    pub const EMBC_POS: u32 = 20;
    pub const EMBC: u32 = 0b111 << EMBC_POS;
    /// Port output enable
    pub const OUTEN: u32 = 1 << 31;
}

/// Channel port control 2 (count up) and 3 (count down)
pub mod pcnr23 {
    pub const CME_POS: u32 = 0;
    pub const CMF_POS: u32 = 2;
    pub const CMSA_POS: u32 = 4;
    pub const CMSB_POS: u32 = 6;
    pub const POLARITY: u32 = 0xFF;
    pub const RESET: u32 = 0x000A_AAAA;
}

pub mod dconr {
    pub const DTCEN: u32 = 1 << 0;
    pub const DTBENU: u32 = 1 << 2;
    pub const DTBEND: u32 = 1 << 3;
    pub const DTBTRU_POS: u32 = 4;
    pub const DTBTR: u32 = 0b11 << DTBTRU_POS;
    /// Down dead time follows the up value
    pub const SEPA: u32 = 1 << 8;
}

pub mod bconr1 {
    pub const AE_POS: u32 = 0;
    pub const BF_POS: u32 = 2;
    pub const P_POS: u32 = 4;
    pub const SPA_POS: u32 = 6;
    pub const SPB_POS: u32 = 8;
}

pub mod bconr2 {
    pub const EEFWIN_POS: u32 = 0;
    pub const EEFOFF_POS: u32 = 2;
    pub const CTL_POS: u32 = 4;
    /// Transfer at unit 1 single shot, bits 8..=16 in target order
    pub const BTRU0P_POS: u32 = 8;
    /// Transfer after unit 1 single shot, bits 20..=28 in target order
    pub const BTRU0_POS: u32 = 20;
}

pub mod iconr {
    pub const INTENA: u32 = 1 << 0;
    pub const INTENB: u32 = 1 << 1;
    pub const INTENC: u32 = 1 << 2;
    pub const INTEND: u32 = 1 << 3;
    pub const INTENE: u32 = 1 << 4;
    pub const INTENF: u32 = 1 << 5;
    pub const INTENOVF: u32 = 1 << 6;
    pub const INTENUDF: u32 = 1 << 7;
    pub const INTENDTE: u32 = 1 << 8;
    pub const INTENSAU: u32 = 1 << 9;
    pub const INTENSAD: u32 = 1 << 10;
    pub const INTENSBU: u32 = 1 << 11;
    pub const INTENSBD: u32 = 1 << 12;
}

pub mod stflr1 {
    /// Counting up
    pub const DIRF: u32 = 1 << 31;
    pub const RESET: u32 = DIRF;
}

pub mod vperr {
    pub const PCNTE: u32 = 0b11;
    pub const PCNTS_POS: u32 = 8;
    pub const PCNTS: u32 = 0b111 << PCNTS_POS;
    pub const SPPERIA: u32 = 1 << 16;
    pub const SPPERIB: u32 = 1 << 17;
}

pub mod eef {
    pub const DIR: u32 = 1 << 22;
    pub const RESET: u32 = DIR;
}

pub mod eefltcr {
    pub const FLT: u32 = 0xF;
    pub const LAT: u32 = 1 << 4;
    pub const TIMEOUT: u32 = 1 << 5;
    pub const FIELD: u32 = 0x3F;
    pub const STRIDE: u32 = 6;
    /// Initial polarity of the filter signal, EEFLTCR1 only
    pub const EEINTPOL: u32 = 1 << 31;
}

pub mod idlecr {
    pub const DLYEVSEL: u32 = 0xF;
    pub const DLYCHA_POS: u32 = 4;
    pub const DLYCHA: u32 = 0b11 << DLYCHA_POS;
    pub const DLYCHB_POS: u32 = 6;
    pub const DLYCHB: u32 = 0b11 << DLYCHB_POS;
    pub const IDLEBMA_POS: u32 = 8;
    pub const IDLEBMA: u32 = 0b11 << IDLEBMA_POS;
    pub const IDLEBMB_POS: u32 = 10;
    pub const IDLEBMB: u32 = 0b11 << IDLEBMB_POS;
    pub const DIDLA: u32 = 1 << 12;
    pub const DIDLB: u32 = 1 << 13;
    pub const FOLLOW: u32 = 1 << 14;
}

pub mod cr {
    pub const DACSRC: u32 = 0b11;
    pub const DACSYNC1_POS: u32 = 4;
    pub const DACSYNC1: u32 = 0b11 << DACSYNC1_POS;
    pub const DACSYNC2_POS: u32 = 6;
    pub const DACSYNC2: u32 = 0b11 << DACSYNC2_POS;
}

pub mod phsctl {
    pub const PHCMPSEL: u32 = 0b111;
    pub const PHFCA: u32 = 1 << 8;
    pub const PHFCB: u32 = 1 << 9;
}

pub mod phscmp {
    pub const RESET: u32 = 0x007F_FFC0;
}

pub mod common {
    //! Registers shared by all units

    use super::super::Reg;

    #[repr(C, align(4))]
    pub struct RegisterBlock {
        /// 0x00 - Calibration control
        pub calcr: Reg<u32>,
        /// 0x04 - Software capture
        pub scapr: Reg<u32>,
        /// 0x08 - Software idle entry, one bit per channel
        pub sstaidlr: Reg<u32>,
        /// 0x0C - Software idle exit, one bit per channel
        pub sstarunr1: Reg<u32>,
        /// 0x10 - Software delayed idle entry
        pub sstadidlr: Reg<u32>,
        /// 0x14 - Global control
        pub gctlr: Reg<u32>,
        /// 0x18 - Global buffer control
        pub gbconr: Reg<u32>,
        /// 0x1C - Global buffer status
        pub gbsflr: Reg<u32>,
        /// 0x20 - Burst mode control
        pub bmcr: Reg<u32>,
        /// 0x24 - Burst mode trigger select, low word
        pub bmstrg1: Reg<u32>,
        /// 0x28 - Burst mode trigger select, high word
        pub bmstrg2: Reg<u32>,
        /// 0x2C - Burst mode period
        pub bmperar: Reg<u32>,
        pub bmperbr: Reg<u32>,
        /// 0x34 - Burst mode compare
        pub bmcmar: Reg<u32>,
        pub bmcmbr: Reg<u32>,
        /// 0x3C - External event control, events 1-5
        pub eecr1: Reg<u32>,
        /// 0x40 - External event control, events 6-10
        pub eecr2: Reg<u32>,
        /// 0x44 - External event filter clocks, events 6-10
        pub eecr3: Reg<u32>,
        /// 0x48 - Sync output control
        pub synocr: Reg<u32>,
        /// 0x4C - External event detect select
        pub eedselr: Reg<u32>,
        /// 0x50 - Trigger pin filter control
        pub fcntr: Reg<u32>,
        /// 0x54 - Software sync start
        pub sstar: Reg<u32>,
        /// 0x58 - Software sync stop
        pub sstpr: Reg<u32>,
        /// 0x5C - Software sync clear
        pub sclrr: Reg<u32>,
        /// 0x60 - Software sync update
        pub supdr: Reg<u32>,
    }

    pub mod calcr {
        /// Single calibration enable
        pub const CALEN: u32 = 1 << 0;
        /// Periodic calibration enable
        pub const CALPEN: u32 = 1 << 1;
        pub const CALPRD_POS: u32 = 4;
        pub const CALPRD: u32 = 0xF << CALPRD_POS;
        pub const ENDF: u32 = 1 << 8;
        pub const ERRF: u32 = 1 << 9;
    }

    pub mod gbconr {
        pub const RESET: u32 = 0x0000_003F;
    }

    pub mod bmcr {
        pub const BMEN: u32 = 1 << 0;
        pub const BMMD: u32 = 1 << 1;
        pub const BMCLKS_POS: u32 = 2;
        pub const BMCLKS: u32 = 0xF << BMCLKS_POS;
        pub const BMPSC_POS: u32 = 6;
        pub const BMPSC: u32 = 0xF << BMPSC_POS;
        pub const BMCTN: u32 = 1 << 10;
        pub const BMTMR1_POS: u32 = 16;
        pub const BMTMR: u32 = 0x3F << BMTMR1_POS;
        /// Burst period elapsed, write 0 to clear
        pub const BMF: u32 = 1 << 31;
    }

    pub mod bm {
        pub const RESET: u32 = 0x0000_FFFF;
    }

    pub mod eecr {
        pub const SRC: u32 = 0b11;
        pub const POL: u32 = 1 << 2;
        pub const SNS_POS: u32 = 3;
        pub const SNS: u32 = 0b11 << SNS_POS;
        pub const FAST: u32 = 1 << 5;
        pub const STRIDE: u32 = 6;
        pub const FIELD1: u32 = 0x3F;
        /// Events 6-10 have no fast mode
        pub const FIELD2: u32 = 0x1F;
    }

    pub mod eecr3 {
        pub const EE6F: u32 = 0xF;
        pub const STRIDE: u32 = 4;
    }

    pub mod gctlr {
        pub const EE1SRC2: u32 = 0b11;
        pub const EE2SRC2_POS: u32 = 2;
        pub const EE3SRC2_POS: u32 = 8;
    }

    pub mod synocr {
        pub const SRC: u32 = 0xF;
        pub const MATCHB_DIR: u32 = 1 << 4;
        pub const PULSE: u32 = 1 << 5;
        pub const SYNCMP_POS: u32 = 8;
        pub const SYNCMP: u32 = 0xFF << SYNCMP_POS;
        pub const RESET: u32 = 0x0000_1000;
    }

    pub mod fcntr {
        pub const NOFIENTA: u32 = 1 << 0;
        pub const NOFICKTA_POS: u32 = 1;
        pub const NOFICKTA: u32 = 0b11 << NOFICKTA_POS;
        /// Distance between the per-pin fields
        pub const STRIDE: u32 = 4;
    }
}
