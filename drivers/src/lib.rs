/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the boot crypto driver library.

--*/

#![cfg_attr(not(any(feature = "std", test)), no_std)]

mod aes;
mod counter;
mod engine;
mod keyslot;
pub mod layout;
mod nand;
mod ncch;
pub mod printer;
mod sha;
mod storage;
mod verify;
mod wait;

pub use aes::AesMode;
pub use counter::{advance, convert_order, IvOrder};
pub use ctrcrypt_error::{CryptoError, CryptoResult};
pub use ctrcrypt_registers::{HardwareCryptoEngine, KeyFifo};
pub use engine::CryptoEngine;
pub use keyslot::{InjectionMode, KeySector};
pub use nand::{derive_base_ctr, FirmSlot, HwProfile, NandCrypto};
pub use sha::{ShaDigest, ShaMode};
pub use storage::{BlockDevice, StorageStatus};

pub use ctrcrypt_registers::RealMmio;

/// Driver context bound to the memory-mapped coprocessors.
pub type MmioCryptoEngine = CryptoEngine<RealMmio>;
