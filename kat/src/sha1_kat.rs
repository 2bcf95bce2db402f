/*++

Licensed under the Apache-2.0 license.

File Name:

    sha1_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for SHA-1 operations.

--*/

use ctrcrypt_drivers::{
    cprintln, CryptoEngine, CryptoError, CryptoResult, HardwareCryptoEngine, ShaMode,
};

const EXPECTED_ABC: [u8; 20] = [
    0xa9, 0x99, 0x3e, 0x36, 0x47, 0x06, 0x81, 0x6a, 0xba, 0x3e, 0x25, 0x71, 0x78, 0x50, 0xc2, 0x6c,
    0x9c, 0xd0, 0xd8, 0x9d,
];

#[derive(Default, Debug)]
pub struct Sha1Kat {}

impl Sha1Kat {
    // Test vector source: FIPS 180-2 appendix A.1.
    pub fn execute<H: HardwareCryptoEngine>(
        &self,
        engine: &mut CryptoEngine<H>,
    ) -> CryptoResult<()> {
        if engine.sha_compute(b"abc", ShaMode::Sha1).as_bytes() != EXPECTED_ABC {
            cprintln!("[kat] SHA-1 \"abc\" test failed");
            return Err(CryptoError::KAT_SHA1_DIGEST_MISMATCH);
        }
        Ok(())
    }
}
