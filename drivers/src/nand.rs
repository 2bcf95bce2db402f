/*++

Licensed under the Apache-2.0 license.

File Name:

    nand.rs

Abstract:

    File contains the NAND crypto context: the device-wide CTR counter,
    the per-profile keyslot and partition base, and the encrypted sector
    and firmware region accessors.

--*/

use crate::counter::{advance, IvOrder};
use crate::layout::{
    AES_BLOCK_SIZE, BLOCKS_PER_MEDIA_UNIT, FIRM0_OFFSET, FIRM1_OFFSET, FIRM_KEYSLOT,
    MEDIA_UNIT_SIZE, NAND_BASE_SECTOR_NEW, NAND_BASE_SECTOR_ORIGINAL, NAND_KEYSLOT_NEW,
    NAND_KEYSLOT_ORIGINAL, NAND_KEY_Y_NEW,
};
use crate::printer::HexBytes;
use crate::{cprintln, AesMode, BlockDevice, CryptoEngine, StorageStatus};
use ctrcrypt_error::{CryptoError, CryptoResult};
use ctrcrypt_registers::{HardwareCryptoEngine, KeyFifo};

/// Hardware revision.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HwProfile {
    Original,
    New,
}

impl HwProfile {
    /// Keyslot protecting the NAND partition.
    pub fn nand_keyslot(self) -> u8 {
        match self {
            HwProfile::Original => NAND_KEYSLOT_ORIGINAL,
            HwProfile::New => NAND_KEYSLOT_NEW,
        }
    }

    /// First physical sector of the NAND partition.
    pub fn base_sector(self) -> u32 {
        match self {
            HwProfile::Original => NAND_BASE_SECTOR_ORIGINAL,
            HwProfile::New => NAND_BASE_SECTOR_NEW,
        }
    }
}

/// Firmware copy.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FirmSlot {
    Firm0,
    Firm1,
}

impl FirmSlot {
    /// Byte offset of the copy on NAND.
    pub fn offset(self) -> u32 {
        match self {
            FirmSlot::Firm0 => FIRM0_OFFSET,
            FirmSlot::Firm1 => FIRM1_OFFSET,
        }
    }
}

/// NAND-wide CTR counter: the first 16 bytes of SHA-256 over the device
/// identity.
pub fn derive_base_ctr<H: HardwareCryptoEngine, D: BlockDevice>(
    engine: &mut CryptoEngine<H>,
    nand: &mut D,
) -> [u8; 16] {
    let cid = nand.read_cid();
    let digest = engine.sha256(&cid);
    let mut ctr = [0u8; 16];
    ctr.copy_from_slice(&digest[..16]);
    ctr
}

/// NAND crypto context, built once by `init` and passed to every access.
#[derive(Debug, Clone)]
pub struct NandCrypto {
    base_ctr: [u8; 16],
    keyslot: u8,
    base_sector: u32,
}

impl NandCrypto {
    /// Derive the base counter and select the keyslot and partition base
    /// for `profile`. The New profile also loads its fixed Y component.
    pub fn init<H: HardwareCryptoEngine, D: BlockDevice>(
        engine: &mut CryptoEngine<H>,
        nand: &mut D,
        profile: HwProfile,
    ) -> Self {
        let base_ctr = derive_base_ctr(engine, nand);

        if profile == HwProfile::New {
            engine.set_key(
                NAND_KEYSLOT_NEW,
                &NAND_KEY_Y_NEW,
                KeyFifo::Y,
                IvOrder::NATURAL,
            );
        }

        let ctx = Self {
            base_ctr,
            keyslot: profile.nand_keyslot(),
            base_sector: profile.base_sector(),
        };
        cprintln!(
            "[nand] Crypto context ready, keyslot 0x{}, partition at sector 0x{}",
            HexBytes(&[ctx.keyslot]),
            HexBytes(&ctx.base_sector.to_be_bytes())
        );
        ctx
    }

    pub fn base_ctr(&self) -> &[u8; 16] {
        &self.base_ctr
    }

    pub fn keyslot(&self) -> u8 {
        self.keyslot
    }

    pub fn base_sector(&self) -> u32 {
        self.base_sector
    }

    /// Base counter advanced by `block` blocks.
    fn ctr_at_block(&self, block: u32) -> [u8; 16] {
        let mut ctr = self.base_ctr;
        advance(&mut ctr, block, IvOrder::NATURAL);
        ctr
    }

    /// Read and decrypt `count` sectors of the NAND partition.
    ///
    /// # Arguments
    ///
    /// * `sector` - First sector, relative to the partition base
    /// * `count` - Number of sectors
    /// * `buf` - Output; at least `count` sectors long
    ///
    /// # Returns
    ///
    /// * `StorageStatus` - Status of the block device read, as reported
    pub fn read_sectors<H: HardwareCryptoEngine, D: BlockDevice>(
        &self,
        engine: &mut CryptoEngine<H>,
        nand: &mut D,
        sector: u32,
        count: u32,
        buf: &mut [u8],
    ) -> CryptoResult<StorageStatus> {
        let len = (count as usize)
            .checked_mul(MEDIA_UNIT_SIZE)
            .ok_or(CryptoError::DRIVER_NAND_BUFFER_TOO_SMALL)?;
        let buf = buf
            .get_mut(..len)
            .ok_or(CryptoError::DRIVER_NAND_BUFFER_TOO_SMALL)?;
        let physical = sector
            .checked_add(self.base_sector)
            .ok_or(CryptoError::DRIVER_NAND_SECTOR_OVERFLOW)?;
        let block = physical
            .checked_mul(BLOCKS_PER_MEDIA_UNIT)
            .ok_or(CryptoError::DRIVER_NAND_SECTOR_OVERFLOW)?;
        let mut ctr = self.ctr_at_block(block);

        let status = nand.read_sectors(physical, count, buf);

        engine.use_keyslot(self.keyslot);
        engine.process_in_place(buf, Some(&mut ctr), AesMode::Ctr, IvOrder::NATURAL)?;
        Ok(status)
    }

    /// Read and decrypt one firmware copy. `buf.len()` is the region size
    /// and must be a whole number of sectors.
    pub fn read_firm<H: HardwareCryptoEngine, D: BlockDevice>(
        &self,
        engine: &mut CryptoEngine<H>,
        nand: &mut D,
        slot: FirmSlot,
        buf: &mut [u8],
    ) -> CryptoResult<StorageStatus> {
        let count = firm_sector_count(buf.len())?;
        let offset = slot.offset();

        let status = nand.read_sectors(offset / MEDIA_UNIT_SIZE as u32, count, buf);

        let mut ctr = self.ctr_at_block(offset / AES_BLOCK_SIZE as u32);
        engine.use_keyslot(FIRM_KEYSLOT);
        engine.process_in_place(buf, Some(&mut ctr), AesMode::Ctr, IvOrder::NATURAL)?;
        Ok(status)
    }

    /// Encrypt `buf` in place and write it to one firmware copy. `buf` holds
    /// ciphertext afterwards.
    pub fn write_firm<H: HardwareCryptoEngine, D: BlockDevice>(
        &self,
        engine: &mut CryptoEngine<H>,
        nand: &mut D,
        slot: FirmSlot,
        buf: &mut [u8],
    ) -> CryptoResult<StorageStatus> {
        let count = firm_sector_count(buf.len())?;
        let offset = slot.offset();

        let mut ctr = self.ctr_at_block(offset / AES_BLOCK_SIZE as u32);
        engine.use_keyslot(FIRM_KEYSLOT);
        engine.process_in_place(buf, Some(&mut ctr), AesMode::Ctr, IvOrder::NATURAL)?;

        Ok(nand.write_sectors(offset / MEDIA_UNIT_SIZE as u32, count, buf))
    }
}

fn firm_sector_count(size: usize) -> CryptoResult<u32> {
    if size % MEDIA_UNIT_SIZE != 0 {
        return Err(CryptoError::DRIVER_NAND_UNALIGNED_SIZE);
    }
    u32::try_from(size / MEDIA_UNIT_SIZE).map_err(|_| CryptoError::DRIVER_NAND_UNALIGNED_SIZE)
}
