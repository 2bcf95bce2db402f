/*++
Licensed under the Apache-2.0 license.

File Name:

    layout.rs

Abstract:

    The file contains the fixed storage layout, keyslot assignments and
    constant key material used by the boot crypto drivers.

--*/

//
// Block and media unit sizes
//
pub const AES_BLOCK_SIZE: usize = 16;
pub const MEDIA_UNIT_SIZE: usize = 0x200;
pub const BLOCKS_PER_MEDIA_UNIT: u32 = (MEDIA_UNIT_SIZE / AES_BLOCK_SIZE) as u32;

/// Width of the AES block-count register.
pub const AES_MAX_BATCH_BLOCKS: usize = 0xFFFF;

//
// Keyslots
//
/// Slots 0..=3 hold the legacy-mode keys and are never written here.
pub const RESERVED_KEYSLOT_MAX: u8 = 0x03;
pub const MAX_KEYSLOT: u8 = 0x3F;
pub const TRUSTED_KEYSLOT: u8 = 0x11;
pub const FIRM_KEYSLOT: u8 = 0x06;
pub const NCCH_KEYSLOT: u8 = 0x2C;
pub const NAND_KEYSLOT_ORIGINAL: u8 = 0x04;
pub const NAND_KEYSLOT_NEW: u8 = 0x05;

/// Y component loaded into `NAND_KEYSLOT_NEW` on the New hardware profile.
pub const NAND_KEY_Y_NEW: [u8; 16] = [
    0x4D, 0x80, 0x4F, 0x4E, 0x99, 0x90, 0x19, 0x46, 0x13, 0xA2, 0x04, 0xAC, 0x58, 0x44, 0x60, 0xBE,
];

//
// NAND layout
//
/// First sector of the logical NAND partition, per hardware profile.
pub const NAND_BASE_SECTOR_ORIGINAL: u32 = 0x5CAE5;
pub const NAND_BASE_SECTOR_NEW: u32 = 0x5CAD7;

/// Byte offsets of the two firmware copies.
pub const FIRM0_OFFSET: u32 = 0x0B13_0000;
pub const FIRM1_OFFSET: u32 = 0x0B53_0000;

//
// Key sector
//
pub const KEY_SECTOR_NAND_SECTOR: u32 = 0x96;
pub const KEY_SECTOR_BLOCKS: usize = 32;
pub const KEY_SECTOR_SIZE: usize = KEY_SECTOR_BLOCKS * AES_BLOCK_SIZE;

/// One-time-programmable secret size in bytes.
pub const OTP_SIZE: usize = 0x90;

/// Secondary key material injected into block 1 of the key sector. Entry 1
/// is carried for completeness; no injection mode selects it.
pub const KEY2_TABLE: [[u8; 16]; 3] = [
    [
        0x42, 0x3F, 0x81, 0x7A, 0x23, 0x52, 0x58, 0x31, 0x6E, 0x75, 0x8E, 0x3A, 0x39, 0x43, 0x2E,
        0xD0,
    ],
    [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x3B, 0xF5,
        0xF6,
    ],
    [
        0x65, 0x29, 0x3E, 0x12, 0x56, 0x0C, 0x0B, 0xD1, 0xDD, 0xB5, 0x63, 0x1C, 0xB6, 0xD9, 0x52,
        0x75,
    ],
];

//
// Partition container (NCCH)
//
pub const NCCH_HEADER_SIZE: usize = 0x1A8;

/// Low-order tag byte of the executable-region counter.
pub const NCCH_EXEFS_CTR_TAG: u8 = 2;
