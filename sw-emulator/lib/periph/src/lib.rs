/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the coprocessor emulator used by the driver
    tests.

--*/

mod aes;
mod coprocessor;
mod hash_sha;

pub use aes::{AesPeriph, Keyslot, KEYSLOT_COUNT};
pub use coprocessor::Coprocessor;
pub use hash_sha::{HashSha, SHA_BLOCK_LATENCY};
