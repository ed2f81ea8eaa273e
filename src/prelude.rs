// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub use crate::crc::CrcExt as _hc32_hal_crc_CrcExt;
pub use crate::dma::DmaExt as _hc32_hal_dma_DmaExt;
pub use crate::fcg::Enable as _hc32_hal_fcg_Enable;
pub use crate::pwc::PwcExt as _hc32_hal_pwc_PwcExt;
pub use crate::rmu::RmuExt as _hc32_hal_rmu_RmuExt;
pub use embedded_hal::prelude::*;

#[cfg(feature = "hc32f334")]
pub use crate::aos::AosExt as _hc32_hal_aos_AosExt;
#[cfg(feature = "hc32f334")]
pub use crate::rmu::Reset as _hc32_hal_rmu_Reset;
