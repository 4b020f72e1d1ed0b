//! Configuration storage trait
//!
//! A single fixed-size record in non-volatile memory. Integrity
//! checking is layered above this trait; implementations only move
//! bytes.

/// Errors from the storage cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Read failed
    Read,
    /// Write failed or did not verify
    Write,
    /// Caller buffer does not match the record size
    Length,
}

/// Fixed-size non-volatile record storage
pub trait ConfigStorage {
    /// Read the whole record into `buf`
    ///
    /// `buf` must be exactly the record size.
    fn read_block(&mut self, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Write the whole record from `data` as one atomic block
    ///
    /// `data` must be exactly the record size.
    fn write_block(&mut self, data: &[u8]) -> Result<(), StorageError>;
}
