/*++

Licensed under the Apache-2.0 license.

File Name:

    helpers.rs

Abstract:

    File contains byte-order helpers shared by the peripheral models.

--*/

pub trait EndianessTransform {
    fn change_endianess(&mut self);
}

impl EndianessTransform for [u8] {
    fn change_endianess(&mut self) {
        for word in self.chunks_exact_mut(4) {
            word.reverse();
        }
    }
}

impl EndianessTransform for [u32] {
    fn change_endianess(&mut self) {
        for word in self.iter_mut() {
            *word = word.swap_bytes();
        }
    }
}
