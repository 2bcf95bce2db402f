/*++

Licensed under the Apache-2.0 license.

File Name:

    sha224_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for SHA-224 operations.

--*/

use ctrcrypt_drivers::{
    cprintln, CryptoEngine, CryptoError, CryptoResult, HardwareCryptoEngine, ShaMode,
};

const EXPECTED_NO_DATA: [u8; 28] = [
    0xd1, 0x4a, 0x02, 0x8c, 0x2a, 0x3a, 0x2b, 0xc9, 0x47, 0x61, 0x02, 0xbb, 0x28, 0x82, 0x34, 0xc4,
    0x15, 0xa2, 0xb0, 0x1f, 0x82, 0x8e, 0xa6, 0x2a, 0xc5, 0xb3, 0xe4, 0x2f,
];

#[derive(Default, Debug)]
pub struct Sha224Kat {}

impl Sha224Kat {
    /// Executes the SHA-224 Known Answer Test.
    pub fn execute<H: HardwareCryptoEngine>(
        &self,
        engine: &mut CryptoEngine<H>,
    ) -> CryptoResult<()> {
        if engine.sha_compute(&[], ShaMode::Sha224).as_bytes() != EXPECTED_NO_DATA {
            cprintln!("[kat] SHA-224 no-data test failed");
            return Err(CryptoError::KAT_SHA224_DIGEST_MISMATCH);
        }
        Ok(())
    }
}
