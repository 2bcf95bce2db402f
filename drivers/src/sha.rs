/*++

Licensed under the Apache-2.0 license.

File Name:

    sha.rs

Abstract:

    File contains API for the SHA coprocessor (SHA-256, SHA-224, SHA-1).

--*/

use crate::{wait, CryptoEngine};
use core::ops::Deref;
use ctrcrypt_registers::{HardwareCryptoEngine, SHA_CNT, SHA_FIFO_DEPTH_BYTES};
use tock_registers::fields::FieldValue;
use tock_registers::LocalRegisterCopy;
use zeroize::Zeroize;

const SHA_MAX_DIGEST_SIZE: usize = 32;

type ShaCnt = LocalRegisterCopy<u32, SHA_CNT::Register>;

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum ShaMode {
    #[default]
    Sha256,
    Sha224,
    Sha1,
}

impl ShaMode {
    /// Digest size in bytes.
    pub fn digest_size(self) -> usize {
        match self {
            ShaMode::Sha256 => 32,
            ShaMode::Sha224 => 28,
            ShaMode::Sha1 => 20,
        }
    }

    fn cnt_mode(self) -> FieldValue<u32, SHA_CNT::Register> {
        match self {
            ShaMode::Sha256 => SHA_CNT::MODE::Sha256,
            ShaMode::Sha224 => SHA_CNT::MODE::Sha224,
            ShaMode::Sha1 => SHA_CNT::MODE::Sha1,
        }
    }
}

/// Digest sized by the mode that produced it.
#[derive(Debug, Clone, Eq, PartialEq, Zeroize)]
pub struct ShaDigest {
    bytes: [u8; SHA_MAX_DIGEST_SIZE],
    len: usize,
}

impl ShaDigest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Deref for ShaDigest {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for ShaDigest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<H: HardwareCryptoEngine> CryptoEngine<H> {
    fn sha_wait_idle(&mut self) {
        wait::until(|| !ShaCnt::new(self.hw.sha_cnt()).is_set(SHA_CNT::NORMAL_ROUND));
    }

    /// Calculate the digest of `data`.
    ///
    /// Full 64-byte blocks are streamed once the engine is idle; the tail is
    /// written word by word, then byte by byte, before the final round.
    ///
    /// # Arguments
    ///
    /// * `data` - Data to hash, any length
    /// * `mode` - Hash algorithm
    pub fn sha_compute(&mut self, data: &[u8], mode: ShaMode) -> ShaDigest {
        self.sha_wait_idle();
        self.hw.set_sha_cnt(
            (mode.cnt_mode() + SHA_CNT::OUTPUT_ENDIAN::Big + SHA_CNT::NORMAL_ROUND::SET).value,
        );

        let mut blocks = data.chunks_exact(SHA_FIFO_DEPTH_BYTES);
        for block in blocks.by_ref() {
            self.sha_wait_idle();
            for word in block.chunks_exact(4) {
                self.hw
                    .write_sha_fifo(u32::from_le_bytes([word[0], word[1], word[2], word[3]]));
            }
        }

        self.sha_wait_idle();
        let mut tail = blocks.remainder().chunks_exact(4);
        for word in tail.by_ref() {
            self.hw
                .write_sha_fifo(u32::from_le_bytes([word[0], word[1], word[2], word[3]]));
        }
        for byte in tail.remainder() {
            self.hw.write_sha_fifo_byte(*byte);
        }

        let cnt = self.hw.sha_cnt() & !SHA_CNT::NORMAL_ROUND::SET.value;
        self.hw.set_sha_cnt(cnt | SHA_CNT::FINAL_ROUND::SET.value);
        wait::until(|| !ShaCnt::new(self.hw.sha_cnt()).is_set(SHA_CNT::FINAL_ROUND));
        self.sha_wait_idle();

        let mut digest = ShaDigest {
            bytes: self.last_digest(),
            len: mode.digest_size(),
        };
        digest.bytes[digest.len..].fill(0);
        digest
    }

    /// SHA-256 of `data`. Callers holding secret-derived digests wipe the
    /// returned array themselves.
    pub fn sha256(&mut self, data: &[u8]) -> [u8; SHA_MAX_DIGEST_SIZE] {
        self.sha_compute(data, ShaMode::Sha256).bytes
    }

    /// Read the digest register as left by the most recent hash operation,
    /// whoever ran it.
    pub fn last_digest(&mut self) -> [u8; SHA_MAX_DIGEST_SIZE] {
        let mut bytes = [0u8; SHA_MAX_DIGEST_SIZE];
        for (idx, chunk) in bytes.chunks_exact_mut(4).enumerate() {
            chunk.copy_from_slice(&self.hw.sha_hash(idx).to_le_bytes());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_sizes() {
        assert_eq!(ShaMode::default(), ShaMode::Sha256);
        assert_eq!(ShaMode::Sha256.digest_size(), 32);
        assert_eq!(ShaMode::Sha224.digest_size(), 28);
        assert_eq!(ShaMode::Sha1.digest_size(), 20);
    }

    #[test]
    fn test_digest_view_is_truncated() {
        let digest = ShaDigest {
            bytes: [0xAA; SHA_MAX_DIGEST_SIZE],
            len: 20,
        };
        assert_eq!(digest.len(), 20);
        assert_eq!(digest.as_ref(), &[0xAA; 20]);
    }
}
