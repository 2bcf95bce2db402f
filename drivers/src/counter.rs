/*++

Licensed under the Apache-2.0 license.

File Name:

    counter.rs

Abstract:

    File contains 128-bit counter arithmetic and order conversion for AES
    IVs and counters.

--*/

use bitflags::bitflags;
use ctrcrypt_registers::AES_CNT;

bitflags! {
    /// Byte and word order of a 128-bit value exchanged with the AES
    /// engine. The bits are the `AES_CNT` input order bits.
    pub struct IvOrder: u32 {
        /// Each 32-bit limb is stored big-endian.
        const BIG_ENDIAN = AES_CNT::INPUT_ENDIAN::Big.value;

        /// Limbs are stored most significant first.
        const NORMAL_ORDER = AES_CNT::INPUT_ORDER::Normal.value;

        /// Plain big-endian 128-bit integer.
        const NATURAL = Self::BIG_ENDIAN.bits | Self::NORMAL_ORDER.bits;
    }
}

/// Split a 16-byte value into its four in-memory limbs.
pub(crate) fn load_words(bytes: &[u8; 16]) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    words
}

pub(crate) fn store_words(words: &[u32; 4], bytes: &mut [u8; 16]) {
    for (word, chunk) in words.iter().zip(bytes.chunks_exact_mut(4)) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

fn swap_limb_bytes(words: &mut [u32; 4]) {
    for word in words.iter_mut() {
        *word = word.swap_bytes();
    }
}

/// Add `delta` to the 128-bit counter `ctr`, interpreted according to
/// `order`. A carry out of the most significant limb is dropped.
pub fn advance(ctr: &mut [u8; 16], delta: u32, order: IvOrder) {
    let mut words = load_words(ctr);
    if order.contains(IvOrder::BIG_ENDIAN) {
        swap_limb_bytes(&mut words);
    }

    // Least significant limb first.
    let limbs: [usize; 4] = if order.contains(IvOrder::NORMAL_ORDER) {
        [3, 2, 1, 0]
    } else {
        [0, 1, 2, 3]
    };
    let mut carry = delta;
    for idx in limbs {
        if carry == 0 {
            break;
        }
        let (sum, overflow) = words[idx].overflowing_add(carry);
        words[idx] = sum;
        carry = u32::from(overflow);
    }

    if order.contains(IvOrder::BIG_ENDIAN) {
        swap_limb_bytes(&mut words);
    }
    store_words(&words, ctr);
}

/// Re-encode `ctr` from `from` order into `to` order.
pub fn convert_order(ctr: &mut [u8; 16], from: IvOrder, to: IvOrder) {
    let changed = from ^ to;
    let mut words = load_words(ctr);
    if changed.contains(IvOrder::BIG_ENDIAN) {
        swap_limb_bytes(&mut words);
    }
    if changed.contains(IvOrder::NORMAL_ORDER) {
        words.swap(0, 3);
        words.swap(1, 2);
    }
    store_words(&words, ctr);
}
