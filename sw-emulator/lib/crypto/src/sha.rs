/*++

Licensed under the Apache-2.0 license.

File Name:

    sha.rs

Abstract:

    File contains a streaming SHA-256 / SHA-224 / SHA-1 hasher.

--*/

use sha2::Digest;

/// Largest digest produced by any mode.
pub const SHA_MAX_DIGEST_SIZE: usize = 32;

/// SHA Mode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaMode {
    Sha256,
    Sha224,
    Sha1,
}

impl ShaMode {
    /// Digest size in bytes.
    pub fn digest_size(&self) -> usize {
        match self {
            ShaMode::Sha256 => 32,
            ShaMode::Sha224 => 28,
            ShaMode::Sha1 => 20,
        }
    }
}

enum State {
    Sha256(sha2::Sha256),
    Sha224(sha2::Sha224),
    Sha1(sha1::Sha1),
}

pub struct ShaHasher {
    state: State,
}

impl ShaHasher {
    pub fn new(mode: ShaMode) -> Self {
        let state = match mode {
            ShaMode::Sha256 => State::Sha256(sha2::Sha256::new()),
            ShaMode::Sha224 => State::Sha224(sha2::Sha224::new()),
            ShaMode::Sha1 => State::Sha1(sha1::Sha1::new()),
        };
        Self { state }
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.state {
            State::Sha256(h) => h.update(data),
            State::Sha224(h) => h.update(data),
            State::Sha1(h) => h.update(data),
        }
    }

    /// Finish the hash. Digests shorter than `SHA_MAX_DIGEST_SIZE` are
    /// zero-padded at the end.
    pub fn finalize(self) -> [u8; SHA_MAX_DIGEST_SIZE] {
        let mut out = [0u8; SHA_MAX_DIGEST_SIZE];
        match self.state {
            State::Sha256(h) => out.copy_from_slice(&h.finalize()),
            State::Sha224(h) => out[..28].copy_from_slice(&h.finalize()),
            State::Sha1(h) => out[..20].copy_from_slice(&h.finalize()),
        }
        out
    }
}
