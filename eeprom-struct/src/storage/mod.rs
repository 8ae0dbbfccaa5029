//! Byte-addressable storage capability.
//!
//! A storage device is anything that can read and write a single byte at an
//! integer address: an on-chip EEPROM peripheral, an external I2C/SPI EEPROM,
//! a bank of battery-backed registers or a RAM simulation.

pub mod asynch;

/// Storage device error.
pub trait Error: core::fmt::Debug {
    /// Convert error to a generic storage error kind.
    ///
    /// By using this method, errors freely defined by device implementations
    /// can be converted to a set of generic storage errors upon which generic
    /// code can act.
    fn kind(&self) -> ErrorKind;
}

impl Error for core::convert::Infallible {
    #[inline]
    fn kind(&self) -> ErrorKind {
        match *self {}
    }
}

/// Storage error kind.
///
/// This represents a common set of storage device errors. Device
/// implementations are free to define more specific or additional error
/// types. However, by providing a mapping to these common errors, generic
/// code can still react to them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum ErrorKind {
    /// The address lies outside the device's capacity.
    OutOfRange,
    /// The device did not complete its internal write cycle in time.
    WriteTimeout,
    /// A different error occurred. The original error may contain more information.
    Other,
}

impl Error for ErrorKind {
    #[inline]
    fn kind(&self) -> ErrorKind {
        *self
    }
}

impl core::fmt::Display for ErrorKind {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange => write!(f, "Address outside of the storage device's capacity"),
            Self::WriteTimeout => write!(f, "Storage device write cycle timed out"),
            Self::Other => write!(
                f,
                "A different error occurred. The original error may contain more information"
            ),
        }
    }
}

/// Storage error type trait.
///
/// This just defines the error type, to be used by the other traits.
pub trait ErrorType {
    /// Error type
    type Error: Error;
}

impl<T: ErrorType + ?Sized> ErrorType for &mut T {
    type Error = T::Error;
}

/// Blocking byte-addressable storage.
///
/// Implementations decide what an address outside their capacity means: they
/// may report `ErrorKind::OutOfRange`, wrap around, or silently ignore it. Code
/// built on top of this trait performs no bounds checking of its own.
pub trait ByteStorage: ErrorType {
    /// Reads the byte stored at `address`.
    fn read_byte(&mut self, address: usize) -> Result<u8, Self::Error>;

    /// Writes `byte` to `address`.
    ///
    /// On real hardware this blocks until the device's write cycle completes.
    fn write_byte(&mut self, address: usize, byte: u8) -> Result<(), Self::Error>;
}

impl<T: ByteStorage + ?Sized> ByteStorage for &mut T {
    #[inline]
    fn read_byte(&mut self, address: usize) -> Result<u8, Self::Error> {
        T::read_byte(self, address)
    }

    #[inline]
    fn write_byte(&mut self, address: usize, byte: u8) -> Result<(), Self::Error> {
        T::write_byte(self, address, byte)
    }
}
