/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    Register map of the AES and SHA coprocessors, and the capability
    trait through which the drivers reach them.

--*/
#![no_std]

mod mmio;

pub use mmio::RealMmio;

use tock_registers::register_bitfields;

/// Base address of the AES coprocessor register block.
pub const AES_BASE_ADDR: usize = 0x1000_9000;

/// Base address of the SHA coprocessor register block.
pub const SHA_BASE_ADDR: usize = 0x1000_A000;

/// Depth of the AES input and output FIFOs in 32-bit words.
pub const AES_FIFO_DEPTH_WORDS: usize = 16;

/// Depth of the SHA input FIFO in bytes.
pub const SHA_FIFO_DEPTH_BYTES: usize = 64;

register_bitfields! [
    u32,

    /// AES control register
    pub AES_CNT [
        WRFIFO_COUNT OFFSET(0) NUMBITS(5) [],
        RDFIFO_COUNT OFFSET(5) NUMBITS(5) [],
        FLUSH_WRITE OFFSET(10) NUMBITS(1) [],
        FLUSH_READ OFFSET(11) NUMBITS(1) [],
        OUTPUT_ENDIAN OFFSET(22) NUMBITS(1) [
            Little = 0,
            Big = 1,
        ],
        INPUT_ENDIAN OFFSET(23) NUMBITS(1) [
            Little = 0,
            Big = 1,
        ],
        OUTPUT_ORDER OFFSET(24) NUMBITS(1) [
            Reversed = 0,
            Normal = 1,
        ],
        INPUT_ORDER OFFSET(25) NUMBITS(1) [
            Reversed = 0,
            Normal = 1,
        ],
        UPDATE_KEYSLOT OFFSET(26) NUMBITS(1) [],
        MODE OFFSET(27) NUMBITS(3) [
            CcmDecrypt = 0,
            CcmEncrypt = 1,
            Ctr = 2,
            CtrAlt = 3,
            CbcDecrypt = 4,
            CbcEncrypt = 5,
            EcbDecrypt = 6,
            EcbEncrypt = 7,
        ],
        IRQ_ENABLE OFFSET(30) NUMBITS(1) [],
        START OFFSET(31) NUMBITS(1) [],
    ],

    /// SHA control register
    pub SHA_CNT [
        NORMAL_ROUND OFFSET(0) NUMBITS(1) [],
        FINAL_ROUND OFFSET(1) NUMBITS(1) [],
        IRQ_ENABLE OFFSET(2) NUMBITS(1) [],
        OUTPUT_ENDIAN OFFSET(3) NUMBITS(1) [
            Little = 0,
            Big = 1,
        ],
        MODE OFFSET(4) NUMBITS(2) [
            Sha256 = 0,
            Sha224 = 1,
            Sha1 = 2,
        ],
        CLEAR_FIFO OFFSET(8) NUMBITS(1) [],
    ],
];

register_bitfields! [
    u8,

    /// AES key write control register
    pub AES_KEYCNT [
        SLOT OFFSET(0) NUMBITS(6) [],
        TWL_SCRAMBLER OFFSET(6) NUMBITS(1) [],
        WRITE OFFSET(7) NUMBITS(1) [],
    ],
];

/// Key FIFO a key-write word is pushed into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyFifo {
    /// Full normal key, bypassing the scrambler.
    Normal = 0,

    /// X component of a scrambled key.
    X = 1,

    /// Y component of a scrambled key. Writing the last Y word makes the
    /// coprocessor derive the normal key of the slot.
    Y = 2,
}

/// Exclusive access to the AES and SHA coprocessors.
///
/// Every method is one register access. Reads of status registers may have
/// side effects on a model of the hardware, hence `&mut self` throughout.
/// The drivers own an implementation exclusively; there is no locking.
pub trait HardwareCryptoEngine {
    /// Read `AES_CNT`.
    fn aes_cnt(&mut self) -> u32;

    /// Write `AES_CNT`.
    fn set_aes_cnt(&mut self, val: u32);

    /// Program the number of blocks of the next AES operation.
    fn set_aes_blkcnt(&mut self, blocks: u16);

    /// Push one word into the AES input FIFO.
    fn write_aes_fifo(&mut self, word: u32);

    /// Pop one word from the AES output FIFO.
    fn read_aes_fifo(&mut self) -> u32;

    /// Read `AES_KEYCNT`.
    fn aes_keycnt(&mut self) -> u8;

    /// Write `AES_KEYCNT`.
    fn set_aes_keycnt(&mut self, val: u8);

    /// Write `AES_KEYSEL`.
    fn set_aes_keysel(&mut self, slot: u8);

    /// Push one word into the given key FIFO.
    fn write_aes_key_fifo(&mut self, fifo: KeyFifo, word: u32);

    /// Write word `idx` (0..4) of the counter/IV register.
    fn set_aes_ctr(&mut self, idx: usize, word: u32);

    /// Read `SHA_CNT`.
    fn sha_cnt(&mut self) -> u32;

    /// Write `SHA_CNT`.
    fn set_sha_cnt(&mut self, val: u32);

    /// Push one word into the SHA input FIFO.
    fn write_sha_fifo(&mut self, word: u32);

    /// Push one byte into the SHA input FIFO.
    fn write_sha_fifo_byte(&mut self, byte: u8);

    /// Read word `idx` (0..8) of the digest register.
    fn sha_hash(&mut self, idx: usize) -> u32;
}
