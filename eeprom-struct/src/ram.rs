//! In-memory storage device.

use crate::storage::{asynch, ByteStorage, Error, ErrorKind, ErrorType};

/// Value of a storage cell that has never been written (erased EEPROM).
pub const ERASED_BYTE: u8 = 0xFF;

/// Errors reported by [`RamStorage`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum RamStorageError {
    /// The address is not below the device capacity.
    OutOfRange {
        /// The rejected address.
        address: usize,
    },
}

impl Error for RamStorageError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
        }
    }
}

/// RAM-backed simulation of an `N`-byte EEPROM.
///
/// Cells start out erased ([`ERASED_BYTE`]). Accesses at or beyond `N` are
/// rejected with [`RamStorageError::OutOfRange`] and leave the contents
/// untouched.
#[derive(Debug, Clone)]
pub struct RamStorage<const N: usize> {
    cells: [u8; N],
    writes: usize,
}

impl<const N: usize> RamStorage<N> {
    /// Creates an erased device.
    pub const fn new() -> Self {
        Self {
            cells: [ERASED_BYTE; N],
            writes: 0,
        }
    }

    /// Number of cells on the device.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Raw view of every cell.
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.cells
    }

    /// Number of accepted `write_byte` calls since creation.
    ///
    /// Every call counts, including ones that store the value a cell already
    /// holds, the same way a real EEPROM spends a write cycle on them.
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ErrorType for RamStorage<N> {
    type Error = RamStorageError;
}

impl<const N: usize> ByteStorage for RamStorage<N> {
    fn read_byte(&mut self, address: usize) -> Result<u8, Self::Error> {
        self.cells
            .get(address)
            .copied()
            .ok_or(RamStorageError::OutOfRange { address })
    }

    fn write_byte(&mut self, address: usize, byte: u8) -> Result<(), Self::Error> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(RamStorageError::OutOfRange { address })?;
        *cell = byte;
        self.writes += 1;
        Ok(())
    }
}

impl<const N: usize> asynch::ByteStorage for RamStorage<N> {
    async fn read_byte(&mut self, address: usize) -> Result<u8, Self::Error> {
        ByteStorage::read_byte(self, address)
    }

    async fn write_byte(&mut self, address: usize, byte: u8) -> Result<(), Self::Error> {
        ByteStorage::write_byte(self, address, byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_device_is_erased() {
        let mut ram = RamStorage::<8>::new();
        assert_eq!(ram.capacity(), 8);
        assert_eq!(ram.as_bytes(), &[ERASED_BYTE; 8]);
        assert_eq!(ram.read_byte(7), Ok(ERASED_BYTE));
        assert_eq!(ram.write_count(), 0);
    }

    #[test]
    fn test_write_then_read() {
        let mut ram = RamStorage::<8>::default();
        ram.write_byte(3, 0x5A).unwrap();
        assert_eq!(ram.read_byte(3), Ok(0x5A));
        assert_eq!(ram.as_bytes(), &[0xFF, 0xFF, 0xFF, 0x5A, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(ram.write_count(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut ram = RamStorage::<8>::new();
        assert_eq!(ram.read_byte(8), Err(RamStorageError::OutOfRange { address: 8 }));
        assert_eq!(
            ram.write_byte(usize::MAX, 0),
            Err(RamStorageError::OutOfRange { address: usize::MAX })
        );
        assert_eq!(ram.write_count(), 0);
        assert_eq!(RamStorageError::OutOfRange { address: 8 }.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_rewriting_same_value_spends_a_write() {
        let mut ram = RamStorage::<4>::new();
        ram.write_byte(0, 0x11).unwrap();
        ram.write_byte(0, 0x11).unwrap();
        assert_eq!(ram.write_count(), 2);
    }
}
