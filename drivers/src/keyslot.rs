/*++

Licensed under the Apache-2.0 license.

File Name:

    keyslot.rs

Abstract:

    File contains the trusted keyslot setup and the key sector
    encryption and decryption.

--*/

use crate::counter::IvOrder;
use crate::layout::{
    AES_BLOCK_SIZE, KEY2_TABLE, KEY_SECTOR_BLOCKS, KEY_SECTOR_NAND_SECTOR, KEY_SECTOR_SIZE,
    OTP_SIZE, TRUSTED_KEYSLOT,
};
use crate::{cprintln, AesMode, BlockDevice, CryptoEngine, StorageStatus};
use ctrcrypt_error::{CryptoError, CryptoResult};
use ctrcrypt_registers::{HardwareCryptoEngine, KeyFifo};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Persisted 32-block key sector. Cleared on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeySector([u8; KEY_SECTOR_SIZE]);

impl Default for KeySector {
    fn default() -> Self {
        Self([0; KEY_SECTOR_SIZE])
    }
}

impl KeySector {
    pub fn new(bytes: [u8; KEY_SECTOR_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SECTOR_SIZE] {
        &self.0
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8; KEY_SECTOR_SIZE] {
        &mut self.0
    }

    /// Block `idx` of the sector.
    pub fn block(&self, idx: usize) -> Option<&[u8]> {
        let start = idx.checked_mul(AES_BLOCK_SIZE)?;
        self.0.get(start..start.checked_add(AES_BLOCK_SIZE)?)
    }
}

/// Secondary value injected into block 1 of the key sector.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InjectionMode {
    /// Mode 0: `KEY2_TABLE[2]`, then encrypt.
    TableEntry2,

    /// Mode 1: a copy of block 0; the sector is left as is.
    CopyBlock0,

    /// Any other mode: `KEY2_TABLE[0]`, then encrypt.
    TableEntry0,
}

impl From<u32> for InjectionMode {
    fn from(mode: u32) -> Self {
        match mode {
            0 => InjectionMode::TableEntry2,
            1 => InjectionMode::CopyBlock0,
            _ => InjectionMode::TableEntry0,
        }
    }
}

impl InjectionMode {
    pub fn encrypts(self) -> bool {
        self != InjectionMode::CopyBlock0
    }
}

impl<H: HardwareCryptoEngine> CryptoEngine<H> {
    /// Derive the trusted keyslot from the one-time-programmable secret.
    ///
    /// With `reuse_last_digest` the SHA-256 is taken from the digest
    /// register as left by the previous boot stage and `otp` is not read.
    /// Otherwise `otp` must be exactly `OTP_SIZE` bytes.
    pub fn setup_trusted_keyslot(
        &mut self,
        otp: &[u8],
        reuse_last_digest: bool,
    ) -> CryptoResult<()> {
        let mut digest = if reuse_last_digest {
            self.last_digest()
        } else {
            if otp.len() != OTP_SIZE {
                return Err(CryptoError::DRIVER_KEYSLOT_INVALID_OTP_SIZE);
            }
            self.sha256(otp)
        };

        let mut key_x = [0u8; 16];
        let mut key_y = [0u8; 16];
        key_x.copy_from_slice(&digest[..16]);
        key_y.copy_from_slice(&digest[16..]);
        self.set_key(TRUSTED_KEYSLOT, &key_x, KeyFifo::X, IvOrder::NATURAL);
        self.set_key(TRUSTED_KEYSLOT, &key_y, KeyFifo::Y, IvOrder::NATURAL);

        digest.zeroize();
        key_x.zeroize();
        key_y.zeroize();

        if reuse_last_digest {
            cprintln!("[keyslot] Trusted keyslot from carried-over digest");
        } else {
            cprintln!("[keyslot] Trusted keyslot from OTP");
        }
        Ok(())
    }

    /// Inject the secondary value into block 1, then encrypt every block
    /// under the trusted keyslot unless `mode` skips encryption.
    pub fn encrypt_key_sector(
        &mut self,
        sector: &mut KeySector,
        mode: InjectionMode,
    ) -> CryptoResult<()> {
        let bytes = sector.as_bytes_mut();
        match mode {
            InjectionMode::TableEntry2 => bytes[16..32].copy_from_slice(&KEY2_TABLE[2]),
            InjectionMode::CopyBlock0 => bytes.copy_within(0..16, 16),
            InjectionMode::TableEntry0 => bytes[16..32].copy_from_slice(&KEY2_TABLE[0]),
        }
        if !mode.encrypts() {
            cprintln!("[keyslot] Key sector generated, left unencrypted");
            return Ok(());
        }

        self.key_sector_ecb(sector, AesMode::EcbEncrypt)?;
        cprintln!("[keyslot] Key sector generated and encrypted");
        Ok(())
    }

    /// Read the key sector from NAND, decrypting it if `encrypted`.
    pub fn decrypt_key_sector<D: BlockDevice>(
        &mut self,
        nand: &mut D,
        sector: &mut KeySector,
        encrypted: bool,
    ) -> CryptoResult<StorageStatus> {
        let status = nand.read_sectors(KEY_SECTOR_NAND_SECTOR, 1, sector.as_bytes_mut());
        if encrypted {
            self.key_sector_ecb(sector, AesMode::EcbDecrypt)?;
        }
        Ok(status)
    }

    /// One single-block hardware operation per block.
    fn key_sector_ecb(&mut self, sector: &mut KeySector, mode: AesMode) -> CryptoResult<()> {
        self.use_keyslot(TRUSTED_KEYSLOT);
        for block in sector
            .as_bytes_mut()
            .chunks_exact_mut(AES_BLOCK_SIZE)
            .take(KEY_SECTOR_BLOCKS)
        {
            self.process_in_place(block, None, mode, IvOrder::empty())?;
        }
        Ok(())
    }
}
