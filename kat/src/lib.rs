/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the hash engine Known Answer Tests.

--*/

#![cfg_attr(not(test), no_std)]

mod sha1_kat;
mod sha224_kat;
mod sha256_kat;

pub use ctrcrypt_drivers::{CryptoError, CryptoResult};
pub use sha1_kat::Sha1Kat;
pub use sha224_kat::Sha224Kat;
pub use sha256_kat::Sha256Kat;

use ctrcrypt_drivers::{cprintln, CryptoEngine, HardwareCryptoEngine};

/// Run every hash KAT, stopping at the first failure.
pub fn execute_kats<H: HardwareCryptoEngine>(engine: &mut CryptoEngine<H>) -> CryptoResult<()> {
    cprintln!("[kat] ++");
    Sha256Kat::default().execute(engine)?;
    Sha224Kat::default().execute(engine)?;
    Sha1Kat::default().execute(engine)?;
    cprintln!("[kat] --");
    Ok(())
}
