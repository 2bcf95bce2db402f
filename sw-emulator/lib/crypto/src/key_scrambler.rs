/*++

Licensed under the Apache-2.0 license.

File Name:

    key_scrambler.rs

Abstract:

    File contains the keyslot X/Y key scrambler.

--*/

use crate::AES_128_KEY_SIZE;

/// Scrambler constant `C` of the coprocessor key schedule.
const KEY_SCRAMBLER_CONSTANT: u128 = 0x1FF9_E9AA_C5FE_0408_0245_91DC_5D52_768A;

/// Derive the normal key of a keyslot from its X and Y components:
/// `normal = ((X <<< 2) ^ Y) + C) <<< 87`, all values big-endian 128-bit.
pub fn scramble_key(
    key_x: &[u8; AES_128_KEY_SIZE],
    key_y: &[u8; AES_128_KEY_SIZE],
) -> [u8; AES_128_KEY_SIZE] {
    let x = u128::from_be_bytes(*key_x);
    let y = u128::from_be_bytes(*key_y);
    (x.rotate_left(2) ^ y)
        .wrapping_add(KEY_SCRAMBLER_CONSTANT)
        .rotate_left(87)
        .to_be_bytes()
}
