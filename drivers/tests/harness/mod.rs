/*++

Licensed under the Apache-2.0 license.

File Name:

    mod.rs

Abstract:

    File contains the shared test harness for the driver integration tests:
    an in-memory NAND, engine construction and reference primitives.

--*/

#![allow(dead_code)]

use aes::cipher::block_padding::NoPadding;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{
    BlockDecrypt, BlockDecryptMut, BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit, StreamCipher,
};
use aes::Aes128;
use ctrcrypt_drivers::layout::MEDIA_UNIT_SIZE;
use ctrcrypt_drivers::{BlockDevice, CryptoEngine, IvOrder, KeyFifo, StorageStatus};
use ctrcrypt_emu_periph::Coprocessor;
use sha2::Digest;
use std::collections::BTreeMap;

pub type TestEngine = CryptoEngine<Coprocessor>;

pub fn new_engine() -> TestEngine {
    CryptoEngine::new(Coprocessor::new())
}

/// Load a normal key into `slot` and select it.
pub fn use_normal_key(engine: &mut TestEngine, slot: u8, key: &[u8; 16]) {
    engine.set_key(slot, key, KeyFifo::Normal, IvOrder::NATURAL);
    engine.use_keyslot(slot);
}

/// Deterministic, non-repeating test data.
pub fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u32).wrapping_mul(0x9E37_79B1).rotate_left(seed as u32 % 32) as u8 ^ seed)
        .collect()
}

/// In-memory NAND. Unwritten sectors read as zero.
#[derive(Default)]
pub struct RamNand {
    sectors: BTreeMap<u32, [u8; MEDIA_UNIT_SIZE]>,
    cid: [u8; 16],
    /// Status returned by every read and write.
    pub status: StorageStatus,
    /// `(sector, count)` of every read, in order.
    pub reads: Vec<(u32, u32)>,
}

impl RamNand {
    pub fn new(cid: [u8; 16]) -> Self {
        Self {
            cid,
            ..Default::default()
        }
    }

    /// Store `data` starting at `sector`, bypassing any encryption.
    pub fn store(&mut self, sector: u32, data: &[u8]) {
        for (i, chunk) in data.chunks(MEDIA_UNIT_SIZE).enumerate() {
            let mut raw = [0u8; MEDIA_UNIT_SIZE];
            raw[..chunk.len()].copy_from_slice(chunk);
            self.sectors.insert(sector + i as u32, raw);
        }
    }

    /// Raw contents of `count` sectors starting at `sector`.
    pub fn load(&self, sector: u32, count: u32) -> Vec<u8> {
        (sector..sector + count)
            .flat_map(|s| self.sectors.get(&s).copied().unwrap_or([0; MEDIA_UNIT_SIZE]))
            .collect()
    }
}

impl BlockDevice for RamNand {
    fn read_sectors(&mut self, sector: u32, count: u32, buf: &mut [u8]) -> StorageStatus {
        self.reads.push((sector, count));
        let data = self.load(sector, count);
        buf[..data.len()].copy_from_slice(&data);
        self.status
    }

    fn write_sectors(&mut self, sector: u32, count: u32, buf: &[u8]) -> StorageStatus {
        self.store(sector, &buf[..count as usize * MEDIA_UNIT_SIZE]);
        self.status
    }

    fn read_cid(&mut self) -> [u8; 16] {
        self.cid
    }
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    sha2::Sha256::digest(data).into()
}

pub fn ref_ecb(key: &[u8; 16], data: &[u8], encrypt: bool) -> Vec<u8> {
    let cipher = Aes128::new(GenericArray::from_slice(key));
    let mut out = data.to_vec();
    for block in out.chunks_exact_mut(16) {
        let block = GenericArray::from_mut_slice(block);
        if encrypt {
            cipher.encrypt_block(block);
        } else {
            cipher.decrypt_block(block);
        }
    }
    out
}

pub fn ref_cbc_encrypt(key: &[u8; 16], iv: &[u8; 16], data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    cbc::Encryptor::<Aes128>::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .encrypt_padded_mut::<NoPadding>(&mut out, data.len())
        .unwrap();
    out
}

pub fn ref_cbc_decrypt(key: &[u8; 16], iv: &[u8; 16], data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    cbc::Decryptor::<Aes128>::new(GenericArray::from_slice(key), GenericArray::from_slice(iv))
        .decrypt_padded_mut::<NoPadding>(&mut out)
        .unwrap();
    out
}

/// CTR with a big-endian 128-bit counter.
pub fn ref_ctr(key: &[u8; 16], ctr: &[u8; 16], data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    let mut cipher =
        ctr::Ctr128BE::<Aes128>::new(GenericArray::from_slice(key), GenericArray::from_slice(ctr));
    cipher.apply_keystream(&mut out);
    out
}

/// Big-endian counter plus `blocks`.
pub fn ctr_plus(ctr: &[u8; 16], blocks: u128) -> [u8; 16] {
    u128::from_be_bytes(*ctr).wrapping_add(blocks).to_be_bytes()
}
