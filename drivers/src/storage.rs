/*++

Licensed under the Apache-2.0 license.

File Name:

    storage.rs

Abstract:

    File contains the interface of the raw NAND block device.

--*/

/// Status reported by the block device; `0` is success. Passed through to
/// callers uninterpreted.
pub type StorageStatus = u32;

/// Raw NAND access, addressed in 0x200-byte sectors.
pub trait BlockDevice {
    /// Read `count` sectors starting at `sector` into the front of `buf`.
    fn read_sectors(&mut self, sector: u32, count: u32, buf: &mut [u8]) -> StorageStatus;

    /// Write `count` sectors starting at `sector` from the front of `buf`.
    fn write_sectors(&mut self, sector: u32, count: u32, buf: &[u8]) -> StorageStatus;

    /// Read the 16-byte device identity (CID) of the NAND controller.
    fn read_cid(&mut self) -> [u8; 16];
}
