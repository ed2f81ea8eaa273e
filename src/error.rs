// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Driver error type

use core::fmt;

/// Error returned by fallible driver calls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// An argument is outside the range the hardware accepts.
    InvalidParameter,
    /// The peripheral is in a mode that does not allow the operation.
    InvalidMode,
    /// The operation has not finished yet.
    Busy,
    /// The hardware did not respond before the polling budget ran out.
    Timeout,
    /// The register is write protected, see [`Fprc`](crate::pwc::Fprc).
    Locked,
    /// The hardware reported an error.
    Failed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "Invalid parameter"),
            Error::InvalidMode => write!(f, "Operation not allowed in the current mode"),
            Error::Busy => write!(f, "Peripheral busy"),
            Error::Timeout => write!(f, "Timed out waiting for the hardware"),
            Error::Locked => write!(f, "Register is write protected"),
            Error::Failed => write!(f, "Hardware reported an error"),
        }
    }
}
