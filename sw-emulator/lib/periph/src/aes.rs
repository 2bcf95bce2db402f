/*++

Licensed under the Apache-2.0 license.

File Name:

    aes.rs

Abstract:

    File contains the AES coprocessor model: keyslots with the X/Y
    scrambler, the word-order and endianness options, and the input and
    output FIFOs.

--*/

use ctrcrypt_emu_crypto::{
    scramble_key, Aes128Mode, Aes128Stream, EndianessTransform, AES_128_BLOCK_SIZE,
};
use ctrcrypt_registers::{KeyFifo, AES_CNT, AES_FIFO_DEPTH_WORDS, AES_KEYCNT};
use std::collections::VecDeque;
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::InMemoryRegister;
use tock_registers::LocalRegisterCopy;

/// Number of hardware keyslots.
pub const KEYSLOT_COUNT: usize = 0x40;

const WORDS_PER_BLOCK: usize = AES_128_BLOCK_SIZE / 4;

/// Key material held by one keyslot.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Keyslot {
    pub key_x: [u8; 16],
    pub key_y: [u8; 16],
    pub normal: [u8; 16],
}

struct Operation {
    stream: Aes128Stream,
    remaining: u32,
}

/// AES coprocessor model.
pub struct AesPeriph {
    /// Control bits; the FIFO counts are computed on read.
    control: InMemoryRegister<u32, AES_CNT::Register>,

    blkcnt: u16,

    input: VecDeque<u32>,

    output: VecDeque<u32>,

    keycnt: LocalRegisterCopy<u8, AES_KEYCNT::Register>,

    keysel: u8,

    /// Key FIFO staging, indexed by `KeyFifo`.
    key_words: [[u32; 4]; 3],

    key_word_count: [usize; 3],

    slots: [Keyslot; KEYSLOT_COUNT],

    active_key: [u8; 16],

    /// Counter/IV register, latched in block byte order.
    ctr: [u8; 16],

    op: Option<Operation>,

    batches: usize,
}

impl Default for AesPeriph {
    fn default() -> Self {
        Self::new()
    }
}

/// Assemble a block from four FIFO words.
fn words_to_block(words: &[u32; 4], big_endian: bool, normal_order: bool) -> [u8; 16] {
    let mut block = [0u8; 16];
    for (i, chunk) in block.chunks_exact_mut(4).enumerate() {
        let word = if normal_order { words[i] } else { words[3 - i] };
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    if !big_endian {
        block.change_endianess();
    }
    block
}

/// Split a block into four FIFO words; inverse of `words_to_block`.
fn block_to_words(block: &[u8; 16], big_endian: bool, normal_order: bool) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (i, chunk) in block.chunks_exact(4).enumerate() {
        let idx = if normal_order { i } else { 3 - i };
        words[idx] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    if !big_endian {
        words.change_endianess();
    }
    words
}

impl AesPeriph {
    pub fn new() -> Self {
        Self {
            control: InMemoryRegister::new(0),
            blkcnt: 0,
            input: VecDeque::with_capacity(AES_FIFO_DEPTH_WORDS),
            output: VecDeque::with_capacity(AES_FIFO_DEPTH_WORDS),
            keycnt: LocalRegisterCopy::new(0),
            keysel: 0,
            key_words: [[0; 4]; 3],
            key_word_count: [0; 3],
            slots: [Keyslot::default(); KEYSLOT_COUNT],
            active_key: [0; 16],
            ctr: [0; 16],
            op: None,
            batches: 0,
        }
    }

    fn input_big_endian(&self) -> bool {
        self.control.matches_all(AES_CNT::INPUT_ENDIAN::Big)
    }

    fn input_normal_order(&self) -> bool {
        self.control.matches_all(AES_CNT::INPUT_ORDER::Normal)
    }

    /// Read `AES_CNT`. Each read lets the engine make progress on one block.
    pub fn read_cnt(&mut self) -> u32 {
        self.step();
        let mut val = self.control.get();
        val |= (self.input.len() as u32) << AES_CNT::WRFIFO_COUNT.shift;
        val |= (self.output.len() as u32) << AES_CNT::RDFIFO_COUNT.shift;
        if self.op.is_some() {
            val |= AES_CNT::START::SET.value;
        }
        val
    }

    /// Write `AES_CNT`.
    pub fn write_cnt(&mut self, val: u32) {
        let written = LocalRegisterCopy::<u32, AES_CNT::Register>::new(val);

        if written.is_set(AES_CNT::FLUSH_WRITE) {
            self.input.clear();
        }
        if written.is_set(AES_CNT::FLUSH_READ) {
            self.output.clear();
        }
        if written.is_set(AES_CNT::UPDATE_KEYSLOT) {
            self.active_key = self.slots[usize::from(self.keysel)].normal;
        }

        // Counts, flushes and the keyslot update are not stored.
        let stored = val
            & !(AES_CNT::WRFIFO_COUNT::SET.value
                | AES_CNT::RDFIFO_COUNT::SET.value
                | AES_CNT::FLUSH_WRITE::SET.value
                | AES_CNT::FLUSH_READ::SET.value
                | AES_CNT::UPDATE_KEYSLOT::SET.value
                | AES_CNT::START::SET.value);
        self.control.set(stored);

        if written.is_set(AES_CNT::START) && self.op.is_none() && self.blkcnt != 0 {
            self.start();
        }
    }

    fn start(&mut self) {
        let mode = match self.control.read_as_enum(AES_CNT::MODE) {
            Some(AES_CNT::MODE::Value::Ctr) | Some(AES_CNT::MODE::Value::CtrAlt) => {
                Aes128Mode::Ctr
            }
            Some(AES_CNT::MODE::Value::CbcDecrypt) => Aes128Mode::CbcDecrypt,
            Some(AES_CNT::MODE::Value::CbcEncrypt) => Aes128Mode::CbcEncrypt,
            Some(AES_CNT::MODE::Value::EcbDecrypt) => Aes128Mode::EcbDecrypt,
            Some(AES_CNT::MODE::Value::EcbEncrypt) => Aes128Mode::EcbEncrypt,
            _ => panic!("CCM is not modelled"),
        };
        self.op = Some(Operation {
            stream: Aes128Stream::new(mode, &self.active_key, &self.ctr),
            remaining: u32::from(self.blkcnt),
        });
        self.batches += 1;
    }

    /// Move one block through the engine if a full block is waiting and the
    /// output FIFO has room for it.
    fn step(&mut self) {
        let Some(op) = self.op.as_mut() else {
            return;
        };
        if self.input.len() < WORDS_PER_BLOCK
            || self.output.len() > AES_FIFO_DEPTH_WORDS - WORDS_PER_BLOCK
        {
            return;
        }

        let mut words = [0u32; 4];
        for word in words.iter_mut() {
            *word = self.input.pop_front().unwrap_or_default();
        }
        let block = words_to_block(
            &words,
            self.control.matches_all(AES_CNT::INPUT_ENDIAN::Big),
            self.control.matches_all(AES_CNT::INPUT_ORDER::Normal),
        );
        let out = op.stream.crypt_block(&block);
        let out_words = block_to_words(
            &out,
            self.control.matches_all(AES_CNT::OUTPUT_ENDIAN::Big),
            self.control.matches_all(AES_CNT::OUTPUT_ORDER::Normal),
        );
        self.output.extend(out_words);

        op.remaining -= 1;
        if op.remaining == 0 {
            self.op = None;
        }
    }

    pub fn write_blkcnt(&mut self, blocks: u16) {
        self.blkcnt = blocks;
    }

    pub fn write_fifo(&mut self, word: u32) {
        assert!(
            self.input.len() < AES_FIFO_DEPTH_WORDS,
            "AES input FIFO overflow"
        );
        self.input.push_back(word);
    }

    pub fn read_fifo(&mut self) -> u32 {
        self.output.pop_front().expect("AES output FIFO underflow")
    }

    pub fn read_keycnt(&mut self) -> u8 {
        self.keycnt.get()
    }

    pub fn write_keycnt(&mut self, val: u8) {
        self.keycnt.set(val);
        if self.keycnt.is_set(AES_KEYCNT::WRITE) {
            self.key_word_count = [0; 3];
        }
    }

    pub fn write_keysel(&mut self, slot: u8) {
        self.keysel = slot & 0x3F;
    }

    pub fn write_key_fifo(&mut self, fifo: KeyFifo, word: u32) {
        let kind = fifo as usize;
        let count = self.key_word_count[kind];
        self.key_words[kind][count] = word;
        if count + 1 < 4 {
            self.key_word_count[kind] = count + 1;
            return;
        }
        self.key_word_count[kind] = 0;

        let key = words_to_block(
            &self.key_words[kind],
            self.input_big_endian(),
            self.input_normal_order(),
        );
        let slot = &mut self.slots[usize::from(self.keycnt.read(AES_KEYCNT::SLOT))];
        match fifo {
            KeyFifo::Normal => slot.normal = key,
            KeyFifo::X => slot.key_x = key,
            KeyFifo::Y => {
                slot.key_y = key;
                slot.normal = scramble_key(&slot.key_x, &slot.key_y);
            }
        }
    }

    /// Write one counter word. The register's word order is fixed
    /// (reversed); only the endianness option applies.
    pub fn write_ctr(&mut self, idx: usize, word: u32) {
        if idx >= 4 {
            return;
        }
        let bytes = if self.input_big_endian() {
            word.to_le_bytes()
        } else {
            word.to_be_bytes()
        };
        let pos = (3 - idx) * 4;
        self.ctr[pos..pos + 4].copy_from_slice(&bytes);
    }

    pub fn keyslot(&self, slot: u8) -> &Keyslot {
        &self.slots[usize::from(slot & 0x3F)]
    }

    /// Counter/IV register as the engine will consume it.
    pub fn ctr(&self) -> &[u8; 16] {
        &self.ctr
    }

    /// Number of operations started since reset.
    pub fn batches(&self) -> usize {
        self.batches
    }

    pub fn is_busy(&self) -> bool {
        self.op.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natural_flags() -> u32 {
        (AES_CNT::INPUT_ENDIAN::Big
            + AES_CNT::OUTPUT_ENDIAN::Big
            + AES_CNT::INPUT_ORDER::Normal
            + AES_CNT::OUTPUT_ORDER::Normal)
            .value
    }

    #[test]
    fn test_word_block_round_trip() {
        let block: [u8; 16] = core::array::from_fn(|i| i as u8);
        for big_endian in [false, true] {
            for normal in [false, true] {
                let words = block_to_words(&block, big_endian, normal);
                assert_eq!(words_to_block(&words, big_endian, normal), block);
            }
        }
    }

    #[test]
    fn test_natural_flags_keep_memory_order() {
        let block: [u8; 16] = core::array::from_fn(|i| i as u8);
        let words = [
            u32::from_le_bytes([0, 1, 2, 3]),
            u32::from_le_bytes([4, 5, 6, 7]),
            u32::from_le_bytes([8, 9, 10, 11]),
            u32::from_le_bytes([12, 13, 14, 15]),
        ];
        assert_eq!(words_to_block(&words, true, true), block);
    }

    #[test]
    fn test_ecb_through_fifos() {
        // FIPS-197 appendix C.1
        let key = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let pt = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        let ct = hex::decode("69c4e0d86a7b0430d8cdb78070b4c55a").unwrap();

        let mut aes = AesPeriph::new();
        aes.write_cnt(natural_flags());
        aes.write_keycnt(0x80 | 0x20);
        for chunk in key.chunks_exact(4) {
            aes.write_key_fifo(KeyFifo::Normal, u32::from_le_bytes(chunk.try_into().unwrap()));
        }
        aes.write_keysel(0x20);
        aes.write_cnt(natural_flags() | AES_CNT::UPDATE_KEYSLOT::SET.value);

        aes.write_blkcnt(1);
        aes.write_cnt(natural_flags() | (AES_CNT::MODE::EcbEncrypt + AES_CNT::START::SET).value);
        assert!(aes.is_busy());
        for chunk in pt.chunks_exact(4) {
            aes.write_fifo(u32::from_le_bytes(chunk.try_into().unwrap()));
        }

        let cnt = aes.read_cnt();
        assert_eq!((cnt >> AES_CNT::RDFIFO_COUNT.shift) & 0x1F, 4);
        assert!(!aes.is_busy());

        let mut out = Vec::new();
        for _ in 0..4 {
            out.extend_from_slice(&aes.read_fifo().to_le_bytes());
        }
        assert_eq!(out, ct);
    }

    #[test]
    fn test_y_write_scrambles() {
        let mut aes = AesPeriph::new();
        aes.write_cnt(natural_flags());
        aes.write_keycnt(0x80 | 0x11);
        for fifo in [KeyFifo::X, KeyFifo::Y] {
            for word in [0x0403_0201u32, 0x0807_0605, 0x0C0B_0A09, 0x100F_0E0D] {
                aes.write_key_fifo(fifo, word);
            }
        }
        let slot = aes.keyslot(0x11);
        let expected: [u8; 16] = core::array::from_fn(|i| i as u8 + 1);
        assert_eq!(slot.key_x, expected);
        assert_eq!(slot.key_y, expected);
        assert_eq!(slot.normal, scramble_key(&expected, &expected));
    }

    #[test]
    fn test_ctr_register_is_word_reversed() {
        let mut aes = AesPeriph::new();
        aes.write_cnt(natural_flags());
        aes.write_ctr(0, u32::from_le_bytes([12, 13, 14, 15]));
        aes.write_ctr(3, u32::from_le_bytes([0, 1, 2, 3]));
        assert_eq!(&aes.ctr()[0..4], &[0, 1, 2, 3]);
        assert_eq!(&aes.ctr()[12..16], &[12, 13, 14, 15]);
    }

    #[test]
    #[should_panic(expected = "AES input FIFO overflow")]
    fn test_fifo_overflow_is_caught() {
        let mut aes = AesPeriph::new();
        for word in 0..=AES_FIFO_DEPTH_WORDS as u32 {
            aes.write_fifo(word);
        }
    }
}
