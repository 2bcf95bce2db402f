/*++

Licensed under the Apache-2.0 license.

File Name:

    verify.rs

Abstract:

    File contains the SHA-256 integrity check.

--*/

use crate::CryptoEngine;
use ctrcrypt_registers::HardwareCryptoEngine;

impl<H: HardwareCryptoEngine> CryptoEngine<H> {
    /// Whether SHA-256 of `data` equals `expected`. All bytes are compared.
    pub fn verify(&mut self, data: &[u8], expected: &[u8; 32]) -> bool {
        let digest = self.sha256(data);
        let diff = digest
            .iter()
            .zip(expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        diff == 0
    }
}
