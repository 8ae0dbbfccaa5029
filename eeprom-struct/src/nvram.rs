//! Traits for NVRAM (Non-Volatile Random Access Memory) storage and management.
//!
//! Many MCUs keep a small bank of word-sized registers alive across resets and
//! on battery power. [`NvramBytes`] lets those cells serve as byte storage for
//! [`crate::write_struct`] and [`crate::read_struct`].

use crate::storage::{ByteStorage, Error, ErrorKind, ErrorType};

/// An individual NVRAM storage cell.
pub trait NvramStorage<'a, T>: Send {
    /// Reads the value from the NVRAM storage cell.
    fn read(&self) -> T;

    /// Writes a value to the NVRAM storage cell.
    fn write(&mut self, value: T);
}

/// Trait for a collection of individually-addressable NVRAM storage cells.
/// StoredType is typically the word size of the platform CPU (e.g. u32).
pub trait Nvram<'a, StorageType, StoredType, const CELL_COUNT: usize>: Send
where
    StorageType: NvramStorage<'a, StoredType>,
{
    /// Returns an array of mutable storage cells.
    fn storage(&'a mut self) -> &'a mut [StorageType; CELL_COUNT];
}

/// Word type held by an NVRAM cell, viewed as little-endian bytes.
///
/// `BYTES` must be non-zero; [`NvramBytes`] refuses to build over a word
/// that holds no bytes:
///
/// ```compile_fail
/// use eeprom_struct::{NvramBytes, NvramStorage, NvramWord};
///
/// #[derive(Clone, Copy)]
/// struct Empty;
///
/// impl NvramWord for Empty {
///     const BYTES: usize = 0;
///     fn byte(self, _lane: usize) -> u8 {
///         0
///     }
///     fn with_byte(self, _lane: usize, _byte: u8) -> Self {
///         self
///     }
/// }
///
/// struct Cell;
///
/// impl<'a> NvramStorage<'a, Empty> for Cell {
///     fn read(&self) -> Empty {
///         Empty
///     }
///     fn write(&mut self, _value: Empty) {}
/// }
///
/// let mut cells = [Cell, Cell];
/// let _bytes = NvramBytes::from_cells(&mut cells);
/// ```
pub trait NvramWord: Copy {
    /// Number of bytes in one word.
    const BYTES: usize;

    /// Returns byte lane `lane` (0 is the least significant byte).
    fn byte(self, lane: usize) -> u8;

    /// Returns the word with byte lane `lane` replaced by `byte`.
    fn with_byte(self, lane: usize, byte: u8) -> Self;
}

macro_rules! impl_nvram_word {
    ($($ty:ty),+) => {
        $(
            impl NvramWord for $ty {
                const BYTES: usize = core::mem::size_of::<$ty>();

                #[inline]
                fn byte(self, lane: usize) -> u8 {
                    (self >> (lane * 8)) as u8
                }

                #[inline]
                fn with_byte(self, lane: usize, byte: u8) -> Self {
                    let shift = lane * 8;
                    (self & !((0xFF as $ty) << shift)) | ((byte as $ty) << shift)
                }
            }
        )+
    };
}

impl_nvram_word!(u8, u16, u32);

/// Errors reported by [`NvramBytes`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum NvramError {
    /// The byte address falls beyond the last cell.
    OutOfRange,
}

impl Error for NvramError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfRange => ErrorKind::OutOfRange,
        }
    }
}

/// Byte storage backed by a bank of NVRAM cells.
///
/// Byte address `a` maps to cell `a / W::BYTES`, byte lane `a % W::BYTES`.
/// Writing a byte rewrites the whole containing word with the other lanes
/// unchanged.
pub struct NvramBytes<'a, C, W, const N: usize>
where
    C: NvramStorage<'a, W>,
{
    cells: &'a mut [C; N],
    _word: core::marker::PhantomData<W>,
}

impl<'a, C, W, const N: usize> NvramBytes<'a, C, W, N>
where
    C: NvramStorage<'a, W>,
    W: NvramWord,
{
    /// Wraps the cells of `nvram`.
    pub fn new<R>(nvram: &'a mut R) -> Self
    where
        R: Nvram<'a, C, W, N>,
    {
        Self::from_cells(nvram.storage())
    }

    /// Bytes per cell. Rejects zero-byte words at compile time.
    const LANES: usize = {
        assert!(W::BYTES > 0, "NvramWord::BYTES must be non-zero");
        W::BYTES
    };

    /// Wraps a bank of cells directly.
    pub fn from_cells(cells: &'a mut [C; N]) -> Self {
        let _ = Self::LANES;
        Self {
            cells,
            _word: core::marker::PhantomData,
        }
    }

    /// Capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N * Self::LANES
    }

    fn locate(address: usize) -> Result<(usize, usize), NvramError> {
        let index = address / Self::LANES;
        if index >= N {
            return Err(NvramError::OutOfRange);
        }
        Ok((index, address % Self::LANES))
    }
}

impl<'a, C, W, const N: usize> ErrorType for NvramBytes<'a, C, W, N>
where
    C: NvramStorage<'a, W>,
{
    type Error = NvramError;
}

impl<'a, C, W, const N: usize> ByteStorage for NvramBytes<'a, C, W, N>
where
    C: NvramStorage<'a, W>,
    W: NvramWord,
{
    fn read_byte(&mut self, address: usize) -> Result<u8, Self::Error> {
        let (index, lane) = Self::locate(address)?;
        Ok(self.cells[index].read().byte(lane))
    }

    fn write_byte(&mut self, address: usize, byte: u8) -> Result<(), Self::Error> {
        let (index, lane) = Self::locate(address)?;
        let cell = &mut self.cells[index];
        let word = cell.read().with_byte(lane, byte);
        cell.write(word);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use zerocopy::{Immutable, IntoBytes, KnownLayout};

    use super::*;
    use crate::record::{load_struct, write_struct};

    #[derive(Default)]
    struct Register<W>(W);

    impl<'a, W: Copy + Send> NvramStorage<'a, W> for Register<W> {
        fn read(&self) -> W {
            self.0
        }

        fn write(&mut self, value: W) {
            self.0 = value;
        }
    }

    struct BackupDomain {
        registers: [Register<u32>; 4],
    }

    impl<'a> Nvram<'a, Register<u32>, u32, 4> for BackupDomain {
        fn storage(&'a mut self) -> &'a mut [Register<u32>; 4] {
            &mut self.registers
        }
    }

    #[derive(zerocopy::FromBytes, IntoBytes, Immutable, KnownLayout, PartialEq, Debug, Clone, Copy)]
    #[repr(C)]
    struct ResetInfo {
        count: u16,
        reason: u8,
        flags: u8,
        last_fault: u32,
    }

    #[test]
    fn test_word_lanes() {
        assert_eq!(0x1122_3344u32.byte(0), 0x44);
        assert_eq!(0x1122_3344u32.byte(3), 0x11);
        assert_eq!(0x1122_3344u32.with_byte(1, 0xAB), 0x1122_AB44);
        assert_eq!(0xBEEFu16.with_byte(1, 0x00), 0x00EF);
        assert_eq!(0x7Fu8.with_byte(0, 0x80), 0x80);
    }

    #[test]
    fn test_byte_writes_preserve_other_lanes() {
        let mut cells: [Register<u32>; 2] = Default::default();
        cells[0].0 = 0xAABB_CCDD;
        let mut bytes = NvramBytes::from_cells(&mut cells);

        bytes.write_byte(2, 0x00).unwrap();
        assert_eq!(bytes.read_byte(0), Ok(0xDD));
        assert_eq!(bytes.read_byte(2), Ok(0x00));
        assert_eq!(bytes.read_byte(3), Ok(0xAA));
        assert_eq!(cells[0].0, 0xAA00_CCDD);
    }

    #[test]
    fn test_struct_roundtrip_through_registers() {
        let mut domain = BackupDomain {
            registers: Default::default(),
        };
        let info = ResetInfo {
            count: 513,
            reason: 4,
            flags: 0x81,
            last_fault: 0x0800_1F3C,
        };

        let mut bytes = NvramBytes::new(&mut domain);
        assert_eq!(bytes.capacity(), 16);
        write_struct(&mut bytes, 4, &info).unwrap();
        assert_eq!(load_struct::<_, ResetInfo>(&mut bytes, 4), Ok(info));
        assert_eq!(domain.registers[0].0, 0);
    }

    #[test]
    fn test_wide_word_addressing() {
        let mut cells: [Register<u16>; 2] = Default::default();
        let mut bytes = NvramBytes::from_cells(&mut cells);

        assert_eq!(bytes.capacity(), 4);
        bytes.write_byte(3, 0xC3).unwrap();
        assert_eq!(bytes.read_byte(4), Err(NvramError::OutOfRange));
        assert_eq!(cells[1].0, 0xC300);
    }

    #[test]
    fn test_byte_cells() {
        let mut cells: [Register<u8>; 3] = Default::default();
        let mut bytes = NvramBytes::from_cells(&mut cells);

        write_struct(&mut bytes, 1, &0x0102u16).unwrap();
        assert_eq!(write_struct(&mut bytes, 2, &0x0102u16), Err(NvramError::OutOfRange));
        assert_eq!(NvramError::OutOfRange.kind(), ErrorKind::OutOfRange);
    }
}
