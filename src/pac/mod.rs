// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Peripheral access layer
//!
//! Register blocks for the peripherals this crate drives, laid out as `#[repr(C)]` structs of
//! volatile cells, plus one owned token per peripheral instance. The tokens follow the shape of an
//! svd2rust PAC: a `PTR` constant with the fixed base address, `steal()`, and `Deref` to the
//! register block.

use core::ops::{BitAnd, BitOr, Not};
use core::sync::atomic::{AtomicBool, Ordering};
use vcell::VolatileCell;

pub mod crc;
pub mod dac;
pub mod dma;
pub mod pwc;
pub mod rmu;

#[cfg(feature = "hc32f334")]
pub mod aos;
#[cfg(feature = "hc32f334")]
pub mod cmp;
#[cfg(feature = "hc32f334")]
pub mod hrpwm;

mod sealed {
    pub trait Sealed {}
}

/// Integer types a register can hold.
pub trait RegValue:
    sealed::Sealed
    + Copy
    + PartialEq
    + Default
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
{
}

macro_rules! reg_value {
    ($($ty:ty),+) => {
        $(
            impl sealed::Sealed for $ty {}
            impl RegValue for $ty {}
        )+
    };
}

reg_value!(u8, u16, u32);

/// A single memory-mapped register.
#[repr(transparent)]
pub struct Reg<T: Copy> {
    value: VolatileCell<T>,
}

impl<T: RegValue> Reg<T> {
    /// Reads the register.
    #[inline(always)]
    pub fn read(&self) -> T {
        self.value.get()
    }

    /// Writes `value` to the register.
    #[inline(always)]
    pub fn write(&self, value: T) {
        self.value.set(value)
    }

    /// Read-modify-write.
    #[inline(always)]
    pub fn modify<F>(&self, f: F)
    where
        F: FnOnce(T) -> T,
    {
        self.write(f(self.read()))
    }

    #[inline(always)]
    pub fn set_bits(&self, mask: T) {
        self.modify(|r| r | mask)
    }

    #[inline(always)]
    pub fn clear_bits(&self, mask: T) {
        self.modify(|r| r & !mask)
    }

    /// Replaces the bits selected by `mask` with the matching bits of `value`.
    #[inline(always)]
    pub fn modify_bits(&self, mask: T, value: T) {
        self.modify(|r| (r & !mask) | (value & mask))
    }

    #[inline(always)]
    pub fn read_bits(&self, mask: T) -> T {
        self.read() & mask
    }

    /// Returns `true` if any bit of `mask` is set.
    #[inline(always)]
    pub fn is_set(&self, mask: T) -> bool {
        self.read_bits(mask) != T::default()
    }

    /// Raw address of the register.
    #[inline(always)]
    pub fn as_ptr(&self) -> *mut T {
        self.value.as_ptr()
    }
}

macro_rules! peripherals {
    ($($(#[$attr:meta])* $name:ident: $module:ident @ $addr:expr,)+) => {
        $(
            $(#[$attr])*
            pub struct $name {
                rb: *const $module::RegisterBlock,
            }

            unsafe impl Send for $name {}

            impl $name {
                /// Pointer to the register block.
                pub const PTR: *const $module::RegisterBlock = $addr as *const _;

                /// Returns the register block pointer.
                #[inline(always)]
                pub const fn ptr() -> *const $module::RegisterBlock {
                    Self::PTR
                }

                /// Unchecked access to the peripheral.
                ///
                /// # Safety
                ///
                /// The caller must make sure no other owner of this peripheral exists.
                #[inline(always)]
                pub unsafe fn steal() -> Self {
                    Self { rb: Self::PTR }
                }

                /// Builds the token over a register block at an arbitrary location.
                ///
                /// # Safety
                ///
                /// `rb` must point to a valid register block that lives for as long as the token
                /// and is not owned by anything else.
                #[inline(always)]
                pub unsafe fn from_ptr(rb: *const $module::RegisterBlock) -> Self {
                    Self { rb }
                }

                /// Returns the register block pointer this token owns.
                #[inline(always)]
                pub fn as_ptr(&self) -> *const $module::RegisterBlock {
                    self.rb
                }

                #[cfg(test)]
                pub(crate) fn mock() -> Self {
                    unsafe { Self::from_ptr(mock_block::<$module::RegisterBlock>()) }
                }
            }

            impl core::ops::Deref for $name {
                type Target = $module::RegisterBlock;

                #[inline(always)]
                fn deref(&self) -> &Self::Target {
                    // NOTE(unsafe) the pointer is either the fixed device address or was vouched
                    // for by the caller of `from_ptr`
                    unsafe { &*self.rb }
                }
            }
        )+

        /// All the peripherals
        #[allow(non_snake_case)]
        pub struct Peripherals {
            $(
                $(#[$attr])*
                pub $name: $name,
            )+
        }

        impl Peripherals {
            /// Returns all the peripherals *once*.
            pub fn take() -> Option<Self> {
                critical_section::with(|_| {
                    if TAKEN.load(Ordering::Relaxed) {
                        None
                    } else {
                        Some(unsafe { Peripherals::steal() })
                    }
                })
            }

            /// Unchecked version of [`Peripherals::take`].
            ///
            /// # Safety
            ///
            /// Every token returned here may alias one handed out before.
            pub unsafe fn steal() -> Self {
                TAKEN.store(true, Ordering::Relaxed);
                Peripherals {
                    $(
                        $(#[$attr])*
                        $name: $name::steal(),
                    )+
                }
            }
        }
    };
}

static TAKEN: AtomicBool = AtomicBool::new(false);

#[cfg(feature = "hc32f334")]
peripherals! {
    /// Cyclic redundancy check calculation unit
    CRC: crc @ 0x4000_8C00,
    /// Asynchronous output/trigger selector
    AOS: aos @ 0x4001_0800,
    /// High resolution PWM unit 1
    HRPWM1: hrpwm @ 0x4003_C000,
    /// High resolution PWM unit 2
    HRPWM2: hrpwm @ 0x4003_C400,
    /// High resolution PWM unit 3
    HRPWM3: hrpwm @ 0x4003_C800,
    /// High resolution PWM unit 4
    HRPWM4: hrpwm @ 0x4003_CC00,
    /// High resolution PWM unit 5
    HRPWM5: hrpwm @ 0x4003_D000,
    /// High resolution PWM unit 6
    HRPWM6: hrpwm @ 0x4003_D400,
    /// Registers shared by all high resolution PWM units
    #[allow(non_camel_case_types)]
    HRPWM_COMMON: hrpwm_common @ 0x4003_D800,
    /// Digital to analog converter 1
    DAC1: dac @ 0x4004_1000,
    /// Digital to analog converter 2
    DAC2: dac @ 0x4004_1400,
    /// Power controller: clock gating and write protection
    PWC: pwc @ 0x4004_8000,
    /// Direct memory access controller
    DMA1: dma @ 0x4005_3000,
    /// Analog comparator 1
    CMP1: cmp @ 0x4004_A000,
    /// Analog comparator 2
    CMP2: cmp @ 0x4004_A020,
    /// Analog comparator 3
    CMP3: cmp @ 0x4004_A040,
    /// Reset management unit
    RMU: rmu @ 0x4004_C000,
}

#[cfg(feature = "hc32f4a0")]
peripherals! {
    /// Cyclic redundancy check calculation unit
    CRC: crc @ 0x4000_8C00,
    /// Digital to analog converter 1
    DAC1: dac @ 0x4004_1000,
    /// Digital to analog converter 2
    DAC2: dac @ 0x4004_1400,
    /// Power controller: clock gating and write protection
    PWC: pwc @ 0x4004_8000,
    /// Reset management unit
    RMU: rmu @ 0x4004_C000,
    /// Direct memory access controller 1
    DMA1: dma @ 0x4005_3000,
    /// Direct memory access controller 2
    DMA2: dma @ 0x4005_3400,
}

#[cfg(feature = "hc32f334")]
use hrpwm::common as hrpwm_common;

/// Allocates a zeroed register block on the heap for host tests.
#[cfg(test)]
pub(crate) fn mock_block<T>() -> *const T {
    use std::alloc::{alloc_zeroed, Layout};

    let layout = Layout::new::<T>();
    // NOTE(unsafe) register blocks are plain integers, all-zero is a valid bit pattern
    let ptr = unsafe { alloc_zeroed(layout) } as *const T;
    assert!(!ptr.is_null());
    ptr
}
