/*++

Licensed under the Apache-2.0 license.

File Name:

    aes128.rs

Abstract:

    File contains a block-at-a-time AES-128 engine for ECB, CBC and CTR.

--*/

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{
    BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit,
    StreamCipherCore,
};
use aes::Aes128;

pub const AES_128_BLOCK_SIZE: usize = 16;
pub const AES_128_KEY_SIZE: usize = 16;

type Ctr = ctr::CtrCore<Aes128, ctr::flavors::Ctr128BE>;

/// Block cipher mode, with direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Aes128Mode {
    EcbEncrypt,
    EcbDecrypt,
    CbcEncrypt,
    CbcDecrypt,
    Ctr,
}

enum Cryptor {
    EcbEncrypt(Aes128),
    EcbDecrypt(Aes128),
    CbcEncrypt(cbc::Encryptor<Aes128>),
    CbcDecrypt(cbc::Decryptor<Aes128>),
    Ctr(Ctr),
}

/// Streaming AES-128. The chaining state (CBC IV, CTR counter) carries
/// across calls to `crypt_block`, as it does inside the coprocessor for the
/// duration of one operation.
pub struct Aes128Stream {
    cryptor: Cryptor,
}

impl Aes128Stream {
    /// Create a new engine
    ///
    /// # Arguments
    ///
    /// * `mode` - Mode and direction
    /// * `key` - Normal key
    /// * `iv` - IV or initial counter, ignored for ECB
    pub fn new(
        mode: Aes128Mode,
        key: &[u8; AES_128_KEY_SIZE],
        iv: &[u8; AES_128_BLOCK_SIZE],
    ) -> Self {
        let key = GenericArray::from_slice(key);
        let iv = GenericArray::from_slice(iv);
        let cryptor = match mode {
            Aes128Mode::EcbEncrypt => Cryptor::EcbEncrypt(Aes128::new(key)),
            Aes128Mode::EcbDecrypt => Cryptor::EcbDecrypt(Aes128::new(key)),
            Aes128Mode::CbcEncrypt => Cryptor::CbcEncrypt(cbc::Encryptor::new(key, iv)),
            Aes128Mode::CbcDecrypt => Cryptor::CbcDecrypt(cbc::Decryptor::new(key, iv)),
            Aes128Mode::Ctr => Cryptor::Ctr(Ctr::new(key, iv)),
        };
        Self { cryptor }
    }

    /// Process a single block and return the output.
    pub fn crypt_block(&mut self, block: &[u8; AES_128_BLOCK_SIZE]) -> [u8; AES_128_BLOCK_SIZE] {
        let mut out_block = GenericArray::clone_from_slice(block);
        match &mut self.cryptor {
            Cryptor::EcbEncrypt(c) => c.encrypt_block(&mut out_block),
            Cryptor::EcbDecrypt(c) => c.decrypt_block(&mut out_block),
            Cryptor::CbcEncrypt(c) => c.encrypt_block_mut(&mut out_block),
            Cryptor::CbcDecrypt(c) => c.decrypt_block_mut(&mut out_block),
            Cryptor::Ctr(c) => c.apply_keystream_blocks(core::slice::from_mut(&mut out_block)),
        }
        out_block.into()
    }
}
