//! Async byte-addressable storage.
//!
//! External EEPROMs on I2C or SPI report the end of their internal write cycle
//! over the bus (acknowledge polling, status register). Drivers for those
//! parts implement this trait so the write cycle can be awaited instead of
//! busy-waited.

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::log::{log_trace, log_warn};
use crate::storage::ErrorType;

/// Async byte-addressable storage.
///
/// Same contract as the blocking [`crate::storage::ByteStorage`]: one byte per
/// call, and the implementation decides what an out-of-range address means.
pub trait ByteStorage: ErrorType {
    /// Reads the byte stored at `address`.
    fn read_byte(&mut self, address: usize) -> impl core::future::Future<Output = Result<u8, Self::Error>>;

    /// Writes `byte` to `address`, resolving once the device's write cycle is done.
    fn write_byte(&mut self, address: usize, byte: u8) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}

impl<T: ByteStorage + ?Sized> ByteStorage for &mut T {
    #[inline]
    fn read_byte(&mut self, address: usize) -> impl core::future::Future<Output = Result<u8, Self::Error>> {
        T::read_byte(self, address)
    }

    #[inline]
    fn write_byte(&mut self, address: usize, byte: u8) -> impl core::future::Future<Output = Result<(), Self::Error>> {
        T::write_byte(self, address, byte)
    }
}

/// Writes the raw bytes of `value` to consecutive cells starting at `address`.
///
/// Async counterpart of [`crate::write_struct`]. Each device write is awaited
/// before the next one is issued, in ascending address order. Dropping the
/// returned future part way leaves the range partially written.
pub async fn write_struct<S, T>(storage: &mut S, address: usize, value: &T) -> Result<(), S::Error>
where
    S: ByteStorage + ?Sized,
    T: IntoBytes + Immutable,
{
    let bytes = value.as_bytes();
    log_trace!("async write {=usize} bytes at {=usize}", bytes.len(), address);

    for (offset, &byte) in bytes.iter().enumerate() {
        let cell = address.wrapping_add(offset);
        storage.write_byte(cell, byte).await.map_err(|err| {
            log_warn!("async write failed at {=usize}: {}", cell, crate::storage::Error::kind(&err));
            err
        })?;
    }

    Ok(())
}

/// Overwrites `value` with consecutive cells read starting at `address`.
///
/// Async counterpart of [`crate::read_struct`].
pub async fn read_struct<S, T>(storage: &mut S, address: usize, value: &mut T) -> Result<(), S::Error>
where
    S: ByteStorage + ?Sized,
    T: IntoBytes + FromBytes,
{
    let bytes = value.as_mut_bytes();
    log_trace!("async read {=usize} bytes at {=usize}", bytes.len(), address);

    for (offset, byte) in bytes.iter_mut().enumerate() {
        let cell = address.wrapping_add(offset);
        *byte = storage.read_byte(cell).await.map_err(|err| {
            log_warn!("async read failed at {=usize}: {}", cell, crate::storage::Error::kind(&err));
            err
        })?;
    }

    Ok(())
}

/// Reads a new `T` from consecutive cells starting at `address`.
///
/// Async counterpart of [`crate::load_struct`].
pub async fn load_struct<S, T>(storage: &mut S, address: usize) -> Result<T, S::Error>
where
    S: ByteStorage + ?Sized,
    T: IntoBytes + FromBytes,
{
    let mut value = T::new_zeroed();
    read_struct(storage, address, &mut value).await?;
    Ok(value)
}
