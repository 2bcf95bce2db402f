/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the error type and error codes shared by the boot
    crypto drivers.

--*/
#![cfg_attr(not(any(feature = "std", test)), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Crypto driver error.
///
/// The upper 16 bits identify the component, the lower 16 bits the failure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CryptoError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: CryptoError = CryptoError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl CryptoError {
    /// Create an error from a const context. A zero value is rejected at
    /// compile time; use `CryptoError::try_from()` for runtime values.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("CryptoError cannot be 0"),
        }
    }

    /// Component identifier (upper 16 bits of the code).
    pub fn component(&self) -> u16 {
        (self.0.get() >> 16) as u16
    }

    define_error_constants![
        (
            DRIVER_AES_INVALID_SIZE,
            0x0001_0001,
            "AES input is not a whole number of 16-byte blocks"
        ),
        (
            DRIVER_AES_INVALID_SLICE,
            0x0001_0002,
            "AES output buffer is shorter than the input"
        ),
        (
            DRIVER_AES_MISSING_IV,
            0x0001_0003,
            "AES chaining mode requested without an IV or counter"
        ),
        (
            DRIVER_KEYSLOT_INVALID_OTP_SIZE,
            0x0003_0001,
            "One-time-programmable secret has the wrong size"
        ),
        (
            DRIVER_NAND_BUFFER_TOO_SMALL,
            0x0004_0001,
            "NAND buffer is too small for the requested sector count"
        ),
        (
            DRIVER_NAND_UNALIGNED_SIZE,
            0x0004_0002,
            "Firmware region size is not a multiple of the sector size"
        ),
        (
            DRIVER_NAND_SECTOR_OVERFLOW,
            0x0004_0003,
            "Sector index overflows the addressable NAND range"
        ),
        (
            DRIVER_NCCH_INVALID_HEADER,
            0x0005_0001,
            "Partition container is too short to hold its header"
        ),
        (
            DRIVER_NCCH_REGION_OUT_OF_BOUNDS,
            0x0005_0002,
            "Executable region lies outside the partition container"
        ),
        (
            KAT_SHA256_DIGEST_MISMATCH,
            0x0006_0001,
            "SHA-256 known answer test failed"
        ),
        (
            KAT_SHA224_DIGEST_MISMATCH,
            0x0006_0002,
            "SHA-224 known answer test failed"
        ),
        (
            KAT_SHA1_DIGEST_MISMATCH,
            0x0006_0003,
            "SHA-1 known answer test failed"
        ),
    ];
}

impl From<core::num::NonZeroU32> for crate::CryptoError {
    fn from(val: core::num::NonZeroU32) -> Self {
        crate::CryptoError(val)
    }
}

impl From<CryptoError> for core::num::NonZeroU32 {
    fn from(val: CryptoError) -> Self {
        val.0
    }
}

impl From<CryptoError> for u32 {
    fn from(val: CryptoError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for CryptoError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(CryptoError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type CryptoResult<T> = Result<T, CryptoError>;
