/*++

Licensed under the Apache-2.0 license.

File Name:

    engine.rs

Abstract:

    File contains the driver context owning the AES and SHA coprocessors.

--*/

use ctrcrypt_registers::HardwareCryptoEngine;

/// Exclusive owner of the crypto coprocessors.
///
/// Every operation is synchronous and busy-waits on the hardware; there is
/// no timeout and no cancellation. The AES operations live in `aes.rs`, the
/// hash operations in `sha.rs`, and the keyslot and key sector operations
/// in `keyslot.rs`.
pub struct CryptoEngine<H: HardwareCryptoEngine> {
    pub(crate) hw: H,
}

impl<H: HardwareCryptoEngine> CryptoEngine<H> {
    pub fn new(hw: H) -> Self {
        Self { hw }
    }

    /// Access the underlying coprocessors.
    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn into_inner(self) -> H {
        self.hw
    }
}
