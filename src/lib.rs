// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # HAL for the HC32F334 and HC32F4A0 families of microcontrollers
//!
//! This crate drives the CRC engine, DAC, DMA controller, comparators, AOS event router, function
//! clock gating, reset management unit and high resolution PWM timer of the HC32F334, plus the
//! subset of those the HC32F4A0 shares with it. Where a matching [`embedded-hal`] trait exists it
//! is implemented.
//!
//! [`embedded-hal`]: https://crates.io/crates/embedded-hal
//!
//! # Usage
//!
//! Select the device with exactly one of the `hc32f334` (default) or `hc32f4a0` features.
//!
//! ## Commonly used setup
//! Peripheral clocks are gated by the `PWC`, and peripheral resets as well as a few other
//! registers are write protected. Both are exposed as bus parts which drivers borrow.
//!
//! ```ignore
//! // Get access to the device specific peripherals
//! let dp = pac::Peripherals::take().unwrap();
//!
//! // Take ownership over the raw PWC and RMU and convert them into the corresponding HAL structs
//! let mut pwc = dp.PWC.constrain();
//! let mut rmu = dp.RMU.constrain();
//!
//! // Clock the CRC unit and hand it to its driver
//! let mut crc = dp.CRC.constrain(&mut pwc.fcg0);
//!
//! // Resetting a peripheral requires the PWC write protection to be lifted
//! pwc.fprc.unlock(Protection::Code1);
//! crc.deinit(&mut rmu.frst0, &pwc.fprc).unwrap();
//! pwc.fprc.lock(Protection::Code1);
//! ```
//!
//! ## Usage examples
//!
//! See the `demos` folder.

#![cfg_attr(not(test), no_std)]
#![deny(rustdoc::broken_intra_doc_links)]

#[cfg(all(feature = "hc32f334", feature = "hc32f4a0"))]
compile_error!("Select exactly one device feature: `hc32f334` or `hc32f4a0`, not both");

#[cfg(not(any(feature = "hc32f334", feature = "hc32f4a0")))]
compile_error!(
    "This crate requires one of the following device features enabled:
        hc32f334
        hc32f4a0"
);

// Must come first so the other modules see its macros.
#[macro_use]
mod fmt;

pub mod pac;

mod error;
mod poll;

#[cfg(feature = "hc32f334")]
pub mod aos;
#[cfg(feature = "hc32f334")]
pub mod cmp;
pub mod crc;
pub mod dac;
pub mod dma;
pub mod fcg;
#[cfg(feature = "hc32f334")]
pub mod hrpwm;
pub mod prelude;
pub mod pwc;
pub mod rmu;

pub use crate::error::Error;
