//! Copying plain-data values to and from byte storage.
//!
//! A value is stored as its raw in-memory bytes, one storage cell per byte,
//! starting at a caller-chosen address and moving upward. There is no header,
//! length prefix, checksum or version tag: a later read only makes sense if it
//! uses the same type and the same address as the write.
//!
//! The byte order inside the stored image is the host's native order, so a
//! stored image is only portable between targets that agree on the layout of
//! `T`.

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::log::{log_trace, log_warn};
use crate::storage::ByteStorage;

/// Number of storage cells occupied by a value of type `T`.
pub const fn stored_len<T>() -> usize {
    core::mem::size_of::<T>()
}

/// Writes the raw bytes of `value` to consecutive cells starting at `address`.
///
/// Byte `i` of `value` goes to `address + i`, strictly in ascending order, one
/// `write_byte` call per byte, whether or not the cell already holds that
/// byte. The address range is not checked against the device's capacity.
///
/// The first device error stops the copy and is returned. Cells written before
/// the failure keep their new contents.
pub fn write_struct<S, T>(storage: &mut S, address: usize, value: &T) -> Result<(), S::Error>
where
    S: ByteStorage + ?Sized,
    T: IntoBytes + Immutable,
{
    let bytes = value.as_bytes();
    log_trace!("write {=usize} bytes at {=usize}", bytes.len(), address);

    for (offset, &byte) in bytes.iter().enumerate() {
        let cell = address.wrapping_add(offset);
        storage.write_byte(cell, byte).map_err(|err| {
            log_warn!("write failed at {=usize}: {}", cell, crate::storage::Error::kind(&err));
            err
        })?;
    }

    Ok(())
}

/// Overwrites `value` with consecutive cells read starting at `address`.
///
/// Byte `i` of `value` is replaced by the cell at `address + i`, in ascending
/// order, so on success nothing of the previous contents of `value` survives.
/// Cells that were never written are returned as whatever the device reports
/// for them.
pub fn read_struct<S, T>(storage: &mut S, address: usize, value: &mut T) -> Result<(), S::Error>
where
    S: ByteStorage + ?Sized,
    T: IntoBytes + FromBytes,
{
    let bytes = value.as_mut_bytes();
    log_trace!("read {=usize} bytes at {=usize}", bytes.len(), address);

    for (offset, byte) in bytes.iter_mut().enumerate() {
        let cell = address.wrapping_add(offset);
        *byte = storage.read_byte(cell).map_err(|err| {
            log_warn!("read failed at {=usize}: {}", cell, crate::storage::Error::kind(&err));
            err
        })?;
    }

    Ok(())
}

/// Reads a new `T` from consecutive cells starting at `address`.
pub fn load_struct<S, T>(storage: &mut S, address: usize) -> Result<T, S::Error>
where
    S: ByteStorage + ?Sized,
    T: IntoBytes + FromBytes,
{
    let mut value = T::new_zeroed();
    read_struct(storage, address, &mut value)?;
    Ok(value)
}
