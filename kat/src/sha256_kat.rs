/*++

Licensed under the Apache-2.0 license.

File Name:

    sha256_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for SHA-256 operations.

--*/

use ctrcrypt_drivers::{
    cprintln, CryptoEngine, CryptoError, CryptoResult, HardwareCryptoEngine, ShaMode,
};

const EXPECTED_NO_DATA: [u8; 32] = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
];

// Two-block message "abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq".
const MSG_TWO_BLOCKS: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

const EXPECTED_TWO_BLOCKS: [u8; 32] = [
    0x24, 0x8d, 0x6a, 0x61, 0xd2, 0x06, 0x38, 0xb8, 0xe5, 0xc0, 0x26, 0x93, 0x0c, 0x3e, 0x60, 0x39,
    0xa3, 0x3c, 0xe4, 0x59, 0x64, 0xff, 0x21, 0x67, 0xf6, 0xec, 0xed, 0xd4, 0x19, 0xdb, 0x06, 0xc1,
];

#[derive(Default, Debug)]
pub struct Sha256Kat {}

impl Sha256Kat {
    /// This function executes the Known Answer Tests (aka KAT) for SHA-256.
    ///
    /// Test vector source: FIPS 180-2 appendix B.
    ///
    /// # Arguments
    ///
    /// * `engine` - Crypto engine
    ///
    /// # Returns
    ///
    /// * `CryptoResult` - Result denoting the KAT outcome.
    pub fn execute<H: HardwareCryptoEngine>(
        &self,
        engine: &mut CryptoEngine<H>,
    ) -> CryptoResult<()> {
        self.kat_no_data(engine)?;
        self.kat_two_blocks(engine)
    }

    fn kat_no_data<H: HardwareCryptoEngine>(
        &self,
        engine: &mut CryptoEngine<H>,
    ) -> CryptoResult<()> {
        if engine.sha_compute(&[], ShaMode::Sha256).as_bytes() != EXPECTED_NO_DATA {
            cprintln!("[kat] SHA-256 no-data test failed");
            return Err(CryptoError::KAT_SHA256_DIGEST_MISMATCH);
        }
        Ok(())
    }

    fn kat_two_blocks<H: HardwareCryptoEngine>(
        &self,
        engine: &mut CryptoEngine<H>,
    ) -> CryptoResult<()> {
        if engine.sha_compute(MSG_TWO_BLOCKS, ShaMode::Sha256).as_bytes() != EXPECTED_TWO_BLOCKS {
            cprintln!("[kat] SHA-256 two-block test failed");
            return Err(CryptoError::KAT_SHA256_DIGEST_MISMATCH);
        }
        Ok(())
    }
}
