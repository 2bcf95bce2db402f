// Licensed under the Apache-2.0 license

mod harness;

use ctrcrypt_drivers::layout::{
    KEY2_TABLE, KEY_SECTOR_NAND_SECTOR, KEY_SECTOR_SIZE, OTP_SIZE, TRUSTED_KEYSLOT,
};
use ctrcrypt_drivers::{CryptoError, InjectionMode, KeySector};
use ctrcrypt_emu_crypto::scramble_key;
use harness::*;

fn otp() -> Vec<u8> {
    pattern(OTP_SIZE, 0x42)
}

fn trusted_key(otp: &[u8]) -> [u8; 16] {
    let digest = sha256(otp);
    scramble_key(
        digest[..16].try_into().unwrap(),
        digest[16..].try_into().unwrap(),
    )
}

fn plaintext_sector() -> [u8; KEY_SECTOR_SIZE] {
    pattern(KEY_SECTOR_SIZE, 0x43).try_into().unwrap()
}

#[test]
fn test_trusted_keyslot_from_otp() {
    let otp = otp();
    let digest = sha256(&otp);
    let mut engine = new_engine();
    engine.setup_trusted_keyslot(&otp, false).unwrap();

    let slot = engine.hw().keyslot(TRUSTED_KEYSLOT);
    assert_eq!(&slot.key_x[..], &digest[..16]);
    assert_eq!(&slot.key_y[..], &digest[16..]);
    assert_eq!(slot.normal, trusted_key(&otp));
}

#[test]
fn test_trusted_keyslot_from_carried_over_digest() {
    let otp = otp();
    let mut engine = new_engine();

    // An earlier boot stage hashed the OTP and left the digest behind.
    engine.sha256(&otp);
    engine.setup_trusted_keyslot(&[], true).unwrap();

    assert_eq!(
        engine.hw().keyslot(TRUSTED_KEYSLOT).normal,
        trusted_key(&otp)
    );
}

#[test]
fn test_trusted_keyslot_rejects_wrong_otp_size() {
    let mut engine = new_engine();
    for len in [0, OTP_SIZE - 1, OTP_SIZE + 1] {
        assert_eq!(
            engine.setup_trusted_keyslot(&vec![0u8; len], false),
            Err(CryptoError::DRIVER_KEYSLOT_INVALID_OTP_SIZE)
        );
    }
    assert_eq!(engine.hw().keyslot(TRUSTED_KEYSLOT).normal, [0; 16]);
}

#[test]
fn test_encrypt_key_sector_modes() {
    let otp = otp();
    let key = trusted_key(&otp);

    for (mode, key2) in [
        (InjectionMode::from(0), KEY2_TABLE[2]),
        (InjectionMode::from(2), KEY2_TABLE[0]),
        (InjectionMode::from(7), KEY2_TABLE[0]),
    ] {
        let mut engine = new_engine();
        engine.setup_trusted_keyslot(&otp, false).unwrap();

        let mut expected = plaintext_sector();
        expected[16..32].copy_from_slice(&key2);

        let mut sector = KeySector::new(plaintext_sector());
        let before = engine.hw().aes_batches();
        engine.encrypt_key_sector(&mut sector, mode).unwrap();

        // One hardware operation per block.
        assert_eq!(engine.hw().aes_batches() - before, 32);
        assert_eq!(&sector.as_bytes()[..], &ref_ecb(&key, &expected, true)[..]);
    }
}

#[test]
fn test_copy_mode_leaves_sector_unencrypted() {
    let mut engine = new_engine();
    engine.setup_trusted_keyslot(&otp(), false).unwrap();

    let mut expected = plaintext_sector();
    expected.copy_within(0..16, 16);

    let mut sector = KeySector::new(plaintext_sector());
    let before = engine.hw().aes_batches();
    engine
        .encrypt_key_sector(&mut sector, InjectionMode::from(1))
        .unwrap();
    assert_eq!(engine.hw().aes_batches(), before);
    assert_eq!(sector.as_bytes(), &expected);
}

#[test]
fn test_key_sector_round_trip_through_nand() {
    let otp = otp();
    for (mode, key2) in [
        (InjectionMode::TableEntry2, KEY2_TABLE[2]),
        (InjectionMode::TableEntry0, KEY2_TABLE[0]),
    ] {
        let mut engine = new_engine();
        engine.setup_trusted_keyslot(&otp, false).unwrap();

        let mut sector = KeySector::new(plaintext_sector());
        engine.encrypt_key_sector(&mut sector, mode).unwrap();

        let mut nand = RamNand::default();
        nand.store(KEY_SECTOR_NAND_SECTOR, sector.as_bytes());

        let mut read_back = KeySector::default();
        let status = engine
            .decrypt_key_sector(&mut nand, &mut read_back, true)
            .unwrap();
        assert_eq!(status, 0);
        assert_eq!(nand.reads, vec![(KEY_SECTOR_NAND_SECTOR, 1)]);

        let mut expected = plaintext_sector();
        expected[16..32].copy_from_slice(&key2);
        assert_eq!(read_back.as_bytes(), &expected);
        assert_ne!(read_back.block(1), sector.block(1));
    }
}

#[test]
fn test_unencrypted_key_sector_is_returned_raw() {
    let mut engine = new_engine();
    engine.setup_trusted_keyslot(&otp(), false).unwrap();

    let raw = plaintext_sector();
    let mut nand = RamNand::default();
    nand.store(KEY_SECTOR_NAND_SECTOR, &raw);
    nand.status = 3;

    let mut sector = KeySector::default();
    let status = engine
        .decrypt_key_sector(&mut nand, &mut sector, false)
        .unwrap();
    assert_eq!(status, 3);
    assert_eq!(sector.as_bytes(), &raw);
}
