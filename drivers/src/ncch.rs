/*++

Licensed under the Apache-2.0 license.

File Name:

    ncch.rs

Abstract:

    File contains the partition container (NCCH) executable region
    decryption.

--*/

use crate::counter::{advance, IvOrder};
use crate::layout::{
    BLOCKS_PER_MEDIA_UNIT, MEDIA_UNIT_SIZE, NCCH_EXEFS_CTR_TAG, NCCH_HEADER_SIZE, NCCH_KEYSLOT,
};
use crate::{AesMode, CryptoEngine};
use ctrcrypt_error::{CryptoError, CryptoResult};
use ctrcrypt_registers::{HardwareCryptoEngine, KeyFifo};
use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, KnownLayout, Unaligned};

/// Leading part of the container header, up to the executable region
/// descriptor.
#[repr(C)]
#[derive(FromBytes, KnownLayout, Immutable, Unaligned)]
struct NcchHeader {
    /// First 16 bytes of the header signature, used as the key Y seed.
    key_y: [u8; 16],
    _signature: [u8; 0xF0],
    _magic: [u8; 4],
    _content_size: U32,
    partition_id: [u8; 8],
    _reserved: [u8; 0x90],
    /// In media units from the start of the container.
    exefs_offset: U32,
    /// In media units.
    exefs_size: U32,
}

const _: () = assert!(core::mem::size_of::<NcchHeader>() == NCCH_HEADER_SIZE);

impl NcchHeader {
    /// Initial counter of the executable region: the partition id reversed
    /// into the high half, followed by the region tag.
    fn exefs_ctr(&self) -> [u8; 16] {
        let mut ctr = [0u8; 16];
        for (i, byte) in self.partition_id.iter().enumerate() {
            ctr[7 - i] = *byte;
        }
        ctr[8] = NCCH_EXEFS_CTR_TAG;
        ctr
    }
}

impl<H: HardwareCryptoEngine> CryptoEngine<H> {
    /// Decrypt the executable region of the container in `buf`.
    ///
    /// The first media unit of the region is its own header and is skipped.
    /// The rest is decrypted to the start of `buf`, overwriting the
    /// container header.
    ///
    /// # Returns
    ///
    /// * `usize` - Number of decrypted bytes at the start of `buf`
    pub fn decrypt_exefs(&mut self, buf: &mut [u8]) -> CryptoResult<usize> {
        let (header, _) = NcchHeader::ref_from_prefix(&*buf)
            .map_err(|_| CryptoError::DRIVER_NCCH_INVALID_HEADER)?;

        let size = (header.exefs_size.get() as usize)
            .checked_mul(MEDIA_UNIT_SIZE)
            .ok_or(CryptoError::DRIVER_NCCH_REGION_OUT_OF_BOUNDS)?;
        if size < MEDIA_UNIT_SIZE {
            return Err(CryptoError::DRIVER_NCCH_INVALID_HEADER);
        }
        let start = (header.exefs_offset.get() as usize)
            .checked_mul(MEDIA_UNIT_SIZE)
            .and_then(|offset| offset.checked_add(MEDIA_UNIT_SIZE))
            .ok_or(CryptoError::DRIVER_NCCH_REGION_OUT_OF_BOUNDS)?;
        let len = size - MEDIA_UNIT_SIZE;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= buf.len())
            .ok_or(CryptoError::DRIVER_NCCH_REGION_OUT_OF_BOUNDS)?;

        let mut ctr = header.exefs_ctr();
        advance(&mut ctr, BLOCKS_PER_MEDIA_UNIT, IvOrder::NATURAL);
        let key_y = header.key_y;

        self.set_key(NCCH_KEYSLOT, &key_y, KeyFifo::Y, IvOrder::NATURAL);
        self.use_keyslot(NCCH_KEYSLOT);

        buf.copy_within(start..end, 0);
        self.process_in_place(&mut buf[..len], Some(&mut ctr), AesMode::Ctr, IvOrder::NATURAL)?;
        Ok(len)
    }
}
