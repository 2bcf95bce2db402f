/*++

Licensed under the Apache-2.0 license.

File Name:

    mmio.rs

Abstract:

    Memory-mapped implementation of the coprocessor capability.

--*/

use crate::{
    HardwareCryptoEngine, KeyFifo, AES_BASE_ADDR, AES_CNT, AES_KEYCNT, SHA_BASE_ADDR, SHA_CNT,
};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::register_structs;
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};

register_structs! {
    AesRegisters {
        (0x000 => cnt: ReadWrite<u32, AES_CNT::Register>),
        (0x004 => blkcnt: ReadWrite<u32>),
        (0x008 => wrfifo: WriteOnly<u32>),
        (0x00C => rdfifo: ReadOnly<u32>),
        (0x010 => keysel: ReadWrite<u8>),
        (0x011 => keycnt: ReadWrite<u8, AES_KEYCNT::Register>),
        (0x012 => _reserved0),
        (0x020 => ctr: [WriteOnly<u32>; 4]),
        (0x030 => _reserved1),
        (0x100 => keyfifo: WriteOnly<u32>),
        (0x104 => keyxfifo: WriteOnly<u32>),
        (0x108 => keyyfifo: WriteOnly<u32>),
        (0x10C => @END),
    }
}

register_structs! {
    ShaRegisters {
        (0x00 => cnt: ReadWrite<u32, SHA_CNT::Register>),
        (0x04 => blkcnt: ReadWrite<u32>),
        (0x08 => _reserved0),
        (0x40 => hash: [ReadOnly<u32>; 8]),
        (0x60 => _reserved1),
        (0x80 => infifo: [WriteOnly<u32>; 16]),
        (0xC0 => @END),
    }
}

/// The coprocessors as seen through their memory-mapped registers.
pub struct RealMmio {
    aes: *const AesRegisters,
    sha: *const ShaRegisters,
}

impl RealMmio {
    /// # Safety
    ///
    /// Only one instance may exist at a time, and it may only be created on
    /// the SoC that maps the coprocessors at `AES_BASE_ADDR` and
    /// `SHA_BASE_ADDR`.
    pub unsafe fn new() -> Self {
        Self {
            aes: AES_BASE_ADDR as *const AesRegisters,
            sha: SHA_BASE_ADDR as *const ShaRegisters,
        }
    }

    fn aes(&self) -> &AesRegisters {
        // SAFETY: the pointer was fixed in `new`, whose caller guarantees it
        // maps the AES register block.
        unsafe { &*self.aes }
    }

    fn sha(&self) -> &ShaRegisters {
        // SAFETY: see `aes`.
        unsafe { &*self.sha }
    }
}

impl HardwareCryptoEngine for RealMmio {
    fn aes_cnt(&mut self) -> u32 {
        self.aes().cnt.get()
    }

    fn set_aes_cnt(&mut self, val: u32) {
        self.aes().cnt.set(val);
    }

    fn set_aes_blkcnt(&mut self, blocks: u16) {
        // The block count lives in the upper half; the lower half is the
        // CCM MAC block count, unused here.
        self.aes().blkcnt.set(u32::from(blocks) << 16);
    }

    fn write_aes_fifo(&mut self, word: u32) {
        self.aes().wrfifo.set(word);
    }

    fn read_aes_fifo(&mut self) -> u32 {
        self.aes().rdfifo.get()
    }

    fn aes_keycnt(&mut self) -> u8 {
        self.aes().keycnt.get()
    }

    fn set_aes_keycnt(&mut self, val: u8) {
        self.aes().keycnt.set(val);
    }

    fn set_aes_keysel(&mut self, slot: u8) {
        self.aes().keysel.set(slot);
    }

    fn write_aes_key_fifo(&mut self, fifo: KeyFifo, word: u32) {
        let aes = self.aes();
        match fifo {
            KeyFifo::Normal => aes.keyfifo.set(word),
            KeyFifo::X => aes.keyxfifo.set(word),
            KeyFifo::Y => aes.keyyfifo.set(word),
        }
    }

    fn set_aes_ctr(&mut self, idx: usize, word: u32) {
        if let Some(reg) = self.aes().ctr.get(idx) {
            reg.set(word);
        }
    }

    fn sha_cnt(&mut self) -> u32 {
        self.sha().cnt.get()
    }

    fn set_sha_cnt(&mut self, val: u32) {
        self.sha().cnt.set(val);
    }

    fn write_sha_fifo(&mut self, word: u32) {
        self.sha().infifo[0].set(word);
    }

    fn write_sha_fifo_byte(&mut self, byte: u8) {
        let fifo = self.sha().infifo.as_ptr() as *mut u8;
        // SAFETY: the FIFO window accepts byte writes; every address in it
        // feeds the same FIFO.
        unsafe { core::ptr::write_volatile(fifo, byte) };
    }

    fn sha_hash(&mut self, idx: usize) -> u32 {
        self.sha().hash.get(idx).map_or(0, |reg| reg.get())
    }
}
