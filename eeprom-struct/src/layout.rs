//! Address layout for several values sharing one device.

use core::marker::PhantomData;

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::record::{load_struct, read_struct, stored_len, write_struct};
use crate::storage::ByteStorage;

/// A typed storage address: where a value of type `T` lives on the device.
///
/// A slot is only a coordinate. It does not own the cells it names and knows
/// nothing about the device's capacity.
#[derive(Debug)]
pub struct Slot<T> {
    address: usize,
    _type: PhantomData<fn() -> T>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

impl<T> Slot<T> {
    /// Creates a slot for a `T` stored at `address`.
    pub const fn new(address: usize) -> Self {
        Self {
            address,
            _type: PhantomData,
        }
    }

    /// First cell of the slot.
    pub const fn address(&self) -> usize {
        self.address
    }

    /// Number of cells in the slot.
    pub const fn len(&self) -> usize {
        stored_len::<T>()
    }

    /// Returns true for slots of zero-sized types.
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First cell after the slot.
    pub const fn end(&self) -> usize {
        self.address.wrapping_add(self.len())
    }
}

impl<T: IntoBytes + Immutable> Slot<T> {
    /// Stores `value` in this slot.
    pub fn write<S: ByteStorage + ?Sized>(&self, storage: &mut S, value: &T) -> Result<(), S::Error> {
        write_struct(storage, self.address, value)
    }
}

impl<T: IntoBytes + FromBytes> Slot<T> {
    /// Overwrites `value` with the contents of this slot.
    pub fn read<S: ByteStorage + ?Sized>(&self, storage: &mut S, value: &mut T) -> Result<(), S::Error> {
        read_struct(storage, self.address, value)
    }

    /// Reads a new value from this slot.
    pub fn load<S: ByteStorage + ?Sized>(&self, storage: &mut S) -> Result<T, S::Error> {
        load_struct(storage, self.address)
    }
}

/// Hands out back-to-back slots starting at a base address.
///
/// ```
/// use eeprom_struct::{Layout, RamStorage};
///
/// let mut layout = Layout::new(0x10);
/// let boot_count = layout.slot::<u32>();
/// let serial = layout.slot::<[u8; 12]>();
/// assert_eq!(serial.address(), 0x14);
///
/// let mut eeprom = RamStorage::<64>::new();
/// boot_count.write(&mut eeprom, &7).unwrap();
/// serial.write(&mut eeprom, b"SN-000000042").unwrap();
/// assert_eq!(boot_count.load(&mut eeprom), Ok(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Layout {
    next: usize,
}

impl Layout {
    /// Creates a layout whose first slot starts at `base`.
    pub const fn new(base: usize) -> Self {
        Self { next: base }
    }

    /// Address the next slot will be placed at.
    pub const fn position(&self) -> usize {
        self.next
    }

    /// Places a `T` at the current position and moves past it.
    pub fn slot<T>(&mut self) -> Slot<T> {
        let slot = Slot::new(self.next);
        self.next = slot.end();
        slot
    }

    /// Leaves `len` cells unused, e.g. to reserve room for a later field.
    pub fn skip(&mut self, len: usize) -> &mut Self {
        self.next = self.next.wrapping_add(len);
        self
    }
}

#[cfg(test)]
mod tests {
    use zerocopy::KnownLayout;

    use super::*;
    use crate::ram::{RamStorage, RamStorageError, ERASED_BYTE};

    #[derive(zerocopy::FromBytes, IntoBytes, Immutable, KnownLayout, PartialEq, Debug, Clone, Copy)]
    #[repr(C)]
    struct Trim {
        x: i16,
        y: i16,
        z: i16,
    }

    #[test]
    fn test_slots_are_adjacent() {
        let mut layout = Layout::new(8);
        let a = layout.slot::<u32>();
        let b = layout.slot::<Trim>();
        let c = layout.skip(2).slot::<u8>();

        assert_eq!((a.address(), a.len(), a.end()), (8, 4, 12));
        assert_eq!((b.address(), b.len(), b.end()), (12, 6, 18));
        assert_eq!((c.address(), c.end()), (20, 21));
        assert_eq!(layout.position(), 21);
    }

    #[test]
    fn test_zero_sized_slot_takes_no_room() {
        let mut layout = Layout::new(4);
        let unit = layout.slot::<()>();

        assert!(unit.is_empty());
        assert_eq!(unit.address(), 4);
        assert_eq!(layout.position(), 4);
    }

    #[test]
    fn test_slot_roundtrip_without_overlap() {
        let mut layout = Layout::new(0);
        let counter = layout.slot::<u32>();
        let trim = layout.slot::<Trim>();
        let mut ram = RamStorage::<16>::new();

        counter.write(&mut ram, &0xCAFE_F00D).unwrap();
        trim.write(&mut ram, &Trim { x: -3, y: 14, z: 159 }).unwrap();
        counter.write(&mut ram, &1).unwrap();

        assert_eq!(trim.load(&mut ram), Ok(Trim { x: -3, y: 14, z: 159 }));
        let mut count = 0u32;
        counter.read(&mut ram, &mut count).unwrap();
        assert_eq!(count, 1);
        assert_eq!(&ram.as_bytes()[trim.end()..], &[ERASED_BYTE; 6]);
    }

    #[test]
    fn test_slot_past_capacity_is_reported_by_device() {
        let mut layout = Layout::new(14);
        let slot = layout.slot::<u32>();
        let mut ram = RamStorage::<16>::new();

        assert_eq!(slot.write(&mut ram, &0), Err(RamStorageError::OutOfRange { address: 16 }));
    }
}
