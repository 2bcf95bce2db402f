/*++

Licensed under the Apache-2.0 license.

File Name:

    hash_sha.rs

Abstract:

    File contains the SHA coprocessor model.

--*/

use ctrcrypt_emu_crypto::{ShaHasher, ShaMode, SHA_MAX_DIGEST_SIZE};
use ctrcrypt_registers::{SHA_CNT, SHA_FIFO_DEPTH_BYTES};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::InMemoryRegister;
use tock_registers::LocalRegisterCopy;

/// Number of `SHA_CNT` polls a round stays busy.
pub const SHA_BLOCK_LATENCY: u32 = 3;

/// SHA coprocessor model.
pub struct HashSha {
    control: InMemoryRegister<u32, SHA_CNT::Register>,

    hasher: Option<ShaHasher>,

    fifo: [u8; SHA_FIFO_DEPTH_BYTES],

    fifo_len: usize,

    /// Remaining polls before the current round completes.
    busy: u32,

    /// Set while the busy countdown belongs to the final round.
    finalizing: bool,

    digest: [u8; SHA_MAX_DIGEST_SIZE],
}

impl Default for HashSha {
    fn default() -> Self {
        Self::new()
    }
}

impl HashSha {
    pub fn new() -> Self {
        Self {
            control: InMemoryRegister::new(0),
            hasher: None,
            fifo: [0; SHA_FIFO_DEPTH_BYTES],
            fifo_len: 0,
            busy: 0,
            finalizing: false,
            digest: [0; SHA_MAX_DIGEST_SIZE],
        }
    }

    fn mode(&self) -> ShaMode {
        match self.control.read_as_enum(SHA_CNT::MODE) {
            Some(SHA_CNT::MODE::Value::Sha224) => ShaMode::Sha224,
            Some(SHA_CNT::MODE::Value::Sha1) => ShaMode::Sha1,
            _ => ShaMode::Sha256,
        }
    }

    /// Read `SHA_CNT`. The round bits read back set while a round is in
    /// progress.
    pub fn read_cnt(&mut self) -> u32 {
        let mut val = self.control.get();
        if self.busy > 0 {
            self.busy -= 1;
            val |= if self.finalizing {
                SHA_CNT::FINAL_ROUND::SET.value
            } else {
                SHA_CNT::NORMAL_ROUND::SET.value
            };
        }
        val
    }

    /// Write `SHA_CNT`.
    pub fn write_cnt(&mut self, val: u32) {
        let written = LocalRegisterCopy::<u32, SHA_CNT::Register>::new(val);
        let stored = val
            & !(SHA_CNT::NORMAL_ROUND::SET.value
                | SHA_CNT::FINAL_ROUND::SET.value
                | SHA_CNT::CLEAR_FIFO::SET.value);
        self.control.set(stored);

        if written.is_set(SHA_CNT::CLEAR_FIFO) {
            self.fifo_len = 0;
        }

        if written.is_set(SHA_CNT::FINAL_ROUND) {
            let mut hasher = self
                .hasher
                .take()
                .unwrap_or_else(|| ShaHasher::new(self.mode()));
            hasher.update(&self.fifo[..self.fifo_len]);
            self.fifo_len = 0;
            self.digest = hasher.finalize();
            self.busy = SHA_BLOCK_LATENCY;
            self.finalizing = true;
        } else if written.is_set(SHA_CNT::NORMAL_ROUND) && self.hasher.is_none() {
            self.hasher = Some(ShaHasher::new(self.mode()));
            self.fifo_len = 0;
            self.busy = 0;
            self.finalizing = false;
        }
    }

    pub fn write_fifo(&mut self, word: u32) {
        for byte in word.to_le_bytes() {
            self.write_fifo_byte(byte);
        }
    }

    pub fn write_fifo_byte(&mut self, byte: u8) {
        assert!(self.busy == 0, "SHA input FIFO written while busy");
        self.fifo[self.fifo_len] = byte;
        self.fifo_len += 1;
        if self.fifo_len == SHA_FIFO_DEPTH_BYTES {
            if let Some(hasher) = self.hasher.as_mut() {
                hasher.update(&self.fifo);
            }
            self.fifo_len = 0;
            self.busy = SHA_BLOCK_LATENCY;
            self.finalizing = false;
        }
    }

    /// Read word `idx` of the digest register.
    pub fn read_hash(&self, idx: usize) -> u32 {
        let bytes: [u8; 4] = match self.digest.get(idx * 4..idx * 4 + 4) {
            Some(b) => [b[0], b[1], b[2], b[3]],
            None => return 0,
        };
        if self.control.matches_all(SHA_CNT::OUTPUT_ENDIAN::Big) {
            u32::from_le_bytes(bytes)
        } else {
            u32::from_be_bytes(bytes)
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(sha: &mut HashSha) {
        sha.write_cnt((SHA_CNT::OUTPUT_ENDIAN::Big + SHA_CNT::NORMAL_ROUND::SET).value);
    }

    fn finish(sha: &mut HashSha) -> Vec<u8> {
        sha.write_cnt(sha.control.get() | SHA_CNT::FINAL_ROUND::SET.value);
        while sha.read_cnt() & SHA_CNT::FINAL_ROUND::SET.value != 0 {}
        (0..8).flat_map(|i| sha.read_hash(i).to_le_bytes()).collect()
    }

    #[test]
    fn test_sha256_abc() {
        let mut sha = HashSha::new();
        start(&mut sha);
        for byte in b"abc" {
            sha.write_fifo_byte(*byte);
        }
        assert_eq!(
            hex::encode(finish(&mut sha)),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_full_block_sets_busy() {
        let mut sha = HashSha::new();
        start(&mut sha);
        for word in 0..16u32 {
            sha.write_fifo(word);
        }
        assert!(sha.is_busy());
        let mut polls = 0;
        while sha.read_cnt() & SHA_CNT::NORMAL_ROUND::SET.value != 0 {
            polls += 1;
        }
        assert_eq!(polls, SHA_BLOCK_LATENCY);
    }

    #[test]
    #[should_panic(expected = "SHA input FIFO written while busy")]
    fn test_write_while_busy_is_caught() {
        let mut sha = HashSha::new();
        start(&mut sha);
        for word in 0..17u32 {
            sha.write_fifo(word);
        }
    }
}
