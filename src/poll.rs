// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Busy-wait helpers shared by the drivers.

use crate::Error;

/// Burns one CPU cycle.
#[inline(always)]
pub(crate) fn nop() {
    #[cfg(all(target_arch = "arm", target_os = "none"))]
    cortex_m::asm::nop();
    #[cfg(not(all(target_arch = "arm", target_os = "none")))]
    core::hint::spin_loop();
}

/// Burns roughly `cycles` CPU cycles.
pub(crate) fn delay_cycles(cycles: u32) {
    for _ in 0..cycles {
        nop();
    }
}

/// Polls `done` until it returns `true`, giving up after `timeout` extra attempts.
pub(crate) fn wait_until<F>(timeout: u32, mut done: F) -> Result<(), Error>
where
    F: FnMut() -> bool,
{
    let mut remaining = timeout;
    while !done() {
        if remaining == 0 {
            return Err(Error::Timeout);
        }
        remaining -= 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_until_counts_attempts() {
        let mut calls = 0;
        assert_eq!(
            wait_until(3, || {
                calls += 1;
                false
            }),
            Err(Error::Timeout)
        );
        assert_eq!(calls, 4);

        let mut calls = 0;
        assert_eq!(
            wait_until(10, || {
                calls += 1;
                calls == 2
            }),
            Ok(())
        );
        assert_eq!(calls, 2);
    }
}
