/*++

Licensed under the Apache-2.0 license.

File Name:

    aes.rs

Abstract:

    File contains API for the AES coprocessor: keyslot programming, IV
    programming and the FIFO-driven ECB/CBC/CTR block pump.

--*/

use crate::counter::{advance, convert_order, load_words, IvOrder};
use crate::layout::{AES_BLOCK_SIZE, AES_MAX_BATCH_BLOCKS, MAX_KEYSLOT, RESERVED_KEYSLOT_MAX};
use crate::{wait, CryptoEngine};
use ctrcrypt_error::{CryptoError, CryptoResult};
use ctrcrypt_registers::{
    HardwareCryptoEngine, KeyFifo, AES_CNT, AES_FIFO_DEPTH_WORDS, AES_KEYCNT,
};
use tock_registers::fields::FieldValue;
use tock_registers::LocalRegisterCopy;

const WORDS_PER_BLOCK: usize = AES_BLOCK_SIZE / 4;

/// AES block cipher mode and direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AesMode {
    EcbEncrypt,
    EcbDecrypt,
    CbcEncrypt,
    CbcDecrypt,
    Ctr,
}

impl AesMode {
    fn cnt_mode(self) -> FieldValue<u32, AES_CNT::Register> {
        match self {
            AesMode::EcbEncrypt => AES_CNT::MODE::EcbEncrypt,
            AesMode::EcbDecrypt => AES_CNT::MODE::EcbDecrypt,
            AesMode::CbcEncrypt => AES_CNT::MODE::CbcEncrypt,
            AesMode::CbcDecrypt => AES_CNT::MODE::CbcDecrypt,
            AesMode::Ctr => AES_CNT::MODE::Ctr,
        }
    }

    /// Whether the mode chains through the IV/counter register.
    pub fn uses_iv(self) -> bool {
        !matches!(self, AesMode::EcbEncrypt | AesMode::EcbDecrypt)
    }
}

type AesCnt = LocalRegisterCopy<u32, AES_CNT::Register>;

impl<H: HardwareCryptoEngine> CryptoEngine<H> {
    /// Replace the input order bits of `AES_CNT`, leaving the rest alone.
    fn set_input_order(&mut self, order: IvOrder) {
        let cnt = self.hw.aes_cnt() & !IvOrder::all().bits();
        self.hw.set_aes_cnt(cnt | order.bits());
    }

    /// Write one 128-bit key component into `slot`.
    ///
    /// Writes to the reserved slots 0..=3 and to slots above the valid range
    /// are ignored.
    ///
    /// # Arguments
    ///
    /// * `slot` - Destination keyslot
    /// * `key` - Key material, laid out according to `order`
    /// * `fifo` - Normal key, X component or Y component
    /// * `order` - Byte and word order of `key`
    pub fn set_key(&mut self, slot: u8, key: &[u8; 16], fifo: KeyFifo, order: IvOrder) {
        if slot <= RESERVED_KEYSLOT_MAX || slot > MAX_KEYSLOT {
            return;
        }
        self.set_input_order(order);

        let mut keycnt = LocalRegisterCopy::<u8, AES_KEYCNT::Register>::new(self.hw.aes_keycnt());
        keycnt.modify(AES_KEYCNT::SLOT.val(slot) + AES_KEYCNT::WRITE::SET);
        self.hw.set_aes_keycnt(keycnt.get());

        for word in load_words(key) {
            self.hw.write_aes_key_fifo(fifo, word);
        }
    }

    /// Make `slot` the active key. Slots above the valid range are ignored.
    pub fn use_keyslot(&mut self, slot: u8) {
        if slot > MAX_KEYSLOT {
            return;
        }
        self.hw.set_aes_keysel(slot);
        let cnt = self.hw.aes_cnt();
        self.hw.set_aes_cnt(cnt | AES_CNT::UPDATE_KEYSLOT::SET.value);
    }

    /// Program the IV/counter register.
    ///
    /// The register's word order is fixed (reversed), so a value in normal
    /// word order is written last word first.
    pub fn set_iv(&mut self, iv: &[u8; 16], order: IvOrder) {
        self.set_input_order(order);
        let words = load_words(iv);
        for idx in 0..4 {
            let word = if order.contains(IvOrder::NORMAL_ORDER) {
                words[3 - idx]
            } else {
                words[idx]
            };
            self.hw.set_aes_ctr(idx, word);
        }
    }

    /// Encrypt or decrypt `src` into `dst` with the active keyslot.
    ///
    /// # Arguments
    ///
    /// * `dst` - Output buffer, at least as long as `src`
    /// * `src` - Input, a whole number of blocks
    /// * `iv` - IV or counter for CBC and CTR; updated to continue the
    ///   stream after the last block. Ignored for ECB.
    /// * `mode` - Cipher mode and direction
    /// * `iv_order` - Byte and word order of `iv`
    pub fn process(
        &mut self,
        dst: &mut [u8],
        src: &[u8],
        iv: Option<&mut [u8; 16]>,
        mode: AesMode,
        iv_order: IvOrder,
    ) -> CryptoResult<()> {
        if dst.len() < src.len() {
            return Err(CryptoError::DRIVER_AES_INVALID_SLICE);
        }
        self.crypt(&mut dst[..src.len()], Some(src), iv, mode, iv_order)
    }

    /// Same as `process`, with `buf` as both input and output.
    pub fn process_in_place(
        &mut self,
        buf: &mut [u8],
        iv: Option<&mut [u8; 16]>,
        mode: AesMode,
        iv_order: IvOrder,
    ) -> CryptoResult<()> {
        self.crypt(buf, None, iv, mode, iv_order)
    }

    /// `src == None` means `dst` holds the input.
    fn crypt(
        &mut self,
        dst: &mut [u8],
        src: Option<&[u8]>,
        mut iv: Option<&mut [u8; 16]>,
        mode: AesMode,
        iv_order: IvOrder,
    ) -> CryptoResult<()> {
        if dst.len() % AES_BLOCK_SIZE != 0 {
            return Err(CryptoError::DRIVER_AES_INVALID_SIZE);
        }
        if mode.uses_iv() && iv.is_none() {
            return Err(CryptoError::DRIVER_AES_MISSING_IV);
        }
        if dst.is_empty() {
            return Ok(());
        }

        self.hw.set_aes_cnt(
            (mode.cnt_mode()
                + AES_CNT::INPUT_ORDER::Normal
                + AES_CNT::OUTPUT_ORDER::Normal
                + AES_CNT::INPUT_ENDIAN::Big
                + AES_CNT::OUTPUT_ENDIAN::Big
                + AES_CNT::FLUSH_READ::SET
                + AES_CNT::FLUSH_WRITE::SET)
                .value,
        );

        let mut offset = 0;
        while offset < dst.len() {
            let blocks = ((dst.len() - offset) / AES_BLOCK_SIZE).min(AES_MAX_BATCH_BLOCKS);
            let end = offset + blocks * AES_BLOCK_SIZE;
            let last = end - AES_BLOCK_SIZE..end;

            if mode.uses_iv() {
                if let Some(iv) = iv.as_deref_mut() {
                    // Programming the IV switches the input order; data
                    // is always streamed in natural order.
                    self.set_iv(iv, iv_order);
                    self.set_input_order(IvOrder::NATURAL);

                    // The next batch chains from this batch's last
                    // ciphertext block, which the batch may overwrite.
                    if mode == AesMode::CbcDecrypt {
                        let input = src.unwrap_or(&*dst);
                        iv.copy_from_slice(&input[last.clone()]);
                        convert_order(iv, IvOrder::NATURAL, iv_order);
                    }
                }
            }

            self.batch(
                &mut dst[offset..end],
                src.map(|src| &src[offset..end]),
                blocks,
            );

            if let Some(iv) = iv.as_deref_mut() {
                match mode {
                    AesMode::CbcEncrypt => {
                        iv.copy_from_slice(&dst[last]);
                        convert_order(iv, IvOrder::NATURAL, iv_order);
                    }
                    AesMode::Ctr => advance(iv, blocks as u32, iv_order),
                    _ => {}
                }
            }

            offset = end;
        }

        Ok(())
    }

    /// Run one hardware operation of `blocks` blocks, feeding the input
    /// FIFO and draining the output FIFO four words at a time.
    fn batch(&mut self, dst: &mut [u8], src: Option<&[u8]>, blocks: usize) {
        self.hw.set_aes_blkcnt(blocks as u16);
        let cnt = self.hw.aes_cnt();
        self.hw.set_aes_cnt(cnt | AES_CNT::START::SET.value);

        let mut written = 0;
        let mut read = 0;
        while read < blocks {
            let cnt = AesCnt::new(self.hw.aes_cnt());
            let queued = cnt.read(AES_CNT::WRFIFO_COUNT) as usize;
            let free = AES_FIFO_DEPTH_WORDS.saturating_sub(queued);
            if written < blocks && free >= WORDS_PER_BLOCK {
                let range = written * AES_BLOCK_SIZE..(written + 1) * AES_BLOCK_SIZE;
                let block = match src {
                    Some(src) => &src[range],
                    None => &dst[range],
                };
                for word in block.chunks_exact(4) {
                    self.hw
                        .write_aes_fifo(u32::from_le_bytes([word[0], word[1], word[2], word[3]]));
                }
                written += 1;
            }

            let cnt = AesCnt::new(self.hw.aes_cnt());
            if cnt.read(AES_CNT::RDFIFO_COUNT) as usize >= WORDS_PER_BLOCK {
                let range = read * AES_BLOCK_SIZE..(read + 1) * AES_BLOCK_SIZE;
                for word in dst[range].chunks_exact_mut(4) {
                    word.copy_from_slice(&self.hw.read_aes_fifo().to_le_bytes());
                }
                read += 1;
            }
        }

        // The engine drops START once the last block has left the core.
        wait::until(|| !AesCnt::new(self.hw.aes_cnt()).is_set(AES_CNT::START));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_iv() {
        assert!(!AesMode::EcbEncrypt.uses_iv());
        assert!(!AesMode::EcbDecrypt.uses_iv());
        assert!(AesMode::CbcEncrypt.uses_iv());
        assert!(AesMode::CbcDecrypt.uses_iv());
        assert!(AesMode::Ctr.uses_iv());
    }

    #[test]
    fn test_mode_field_values() {
        assert_eq!(AesMode::Ctr.cnt_mode().value, 2 << 27);
        assert_eq!(AesMode::CbcDecrypt.cnt_mode().value, 4 << 27);
        assert_eq!(AesMode::EcbEncrypt.cnt_mode().value, 7 << 27);
    }
}
