/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the software reference primitives backing the
    coprocessor emulator.

--*/

mod aes128;
mod helpers;
mod key_scrambler;
mod sha;

pub use aes128::{Aes128Mode, Aes128Stream, AES_128_BLOCK_SIZE, AES_128_KEY_SIZE};
pub use helpers::EndianessTransform;
pub use key_scrambler::scramble_key;
pub use sha::{ShaHasher, ShaMode, SHA_MAX_DIGEST_SIZE};
