/*++

Licensed under the Apache-2.0 license.

File Name:

    coprocessor.rs

Abstract:

    File contains the combined AES/SHA coprocessor model.

--*/

use crate::{AesPeriph, HashSha, Keyslot};
use ctrcrypt_registers::{HardwareCryptoEngine, KeyFifo};

/// Software model of the AES and SHA coprocessors. Drivers built on
/// `HardwareCryptoEngine` run against it unchanged.
#[derive(Default)]
pub struct Coprocessor {
    pub aes: AesPeriph,
    pub sha: HashSha,
}

impl Coprocessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyslot(&self, slot: u8) -> &Keyslot {
        self.aes.keyslot(slot)
    }

    /// Number of AES operations started so far.
    pub fn aes_batches(&self) -> usize {
        self.aes.batches()
    }
}

impl HardwareCryptoEngine for Coprocessor {
    fn aes_cnt(&mut self) -> u32 {
        self.aes.read_cnt()
    }

    fn set_aes_cnt(&mut self, val: u32) {
        self.aes.write_cnt(val)
    }

    fn set_aes_blkcnt(&mut self, blocks: u16) {
        self.aes.write_blkcnt(blocks)
    }

    fn write_aes_fifo(&mut self, word: u32) {
        self.aes.write_fifo(word)
    }

    fn read_aes_fifo(&mut self) -> u32 {
        self.aes.read_fifo()
    }

    fn aes_keycnt(&mut self) -> u8 {
        self.aes.read_keycnt()
    }

    fn set_aes_keycnt(&mut self, val: u8) {
        self.aes.write_keycnt(val)
    }

    fn set_aes_keysel(&mut self, slot: u8) {
        self.aes.write_keysel(slot)
    }

    fn write_aes_key_fifo(&mut self, fifo: KeyFifo, word: u32) {
        self.aes.write_key_fifo(fifo, word)
    }

    fn set_aes_ctr(&mut self, idx: usize, word: u32) {
        self.aes.write_ctr(idx, word)
    }

    fn sha_cnt(&mut self) -> u32 {
        self.sha.read_cnt()
    }

    fn set_sha_cnt(&mut self, val: u32) {
        self.sha.write_cnt(val)
    }

    fn write_sha_fifo(&mut self, word: u32) {
        self.sha.write_fifo(word)
    }

    fn write_sha_fifo_byte(&mut self, byte: u8) {
        self.sha.write_fifo_byte(byte)
    }

    fn sha_hash(&mut self, idx: usize) -> u32 {
        self.sha.read_hash(idx)
    }
}
