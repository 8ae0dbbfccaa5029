#![cfg_attr(not(test), no_std)]
//! Persist fixed-size plain-data values to byte-addressable non-volatile storage.
//!
//! [`write_struct`] copies the raw bytes of a value into consecutive storage
//! cells and [`read_struct`] copies them back. The storage device is anything
//! implementing [`storage::ByteStorage`] (or [`storage::asynch::ByteStorage`]).
//!
//! Values must be plain data: the `zerocopy` traits are the bound, so padding,
//! pointers and types with invalid bit patterns are rejected at compile time.
//! Enable the `derive` feature to derive them through the re-exported
//! [`zerocopy`].

mod log;

pub mod storage;

mod record;
pub use record::{load_struct, read_struct, stored_len, write_struct};

mod layout;
pub use layout::{Layout, Slot};

/// Traits for NVRAM (Non-Volatile Random Access Memory) storage and management.
mod nvram;
pub use nvram::{Nvram, NvramBytes, NvramError, NvramStorage, NvramWord};

mod ram;
pub use ram::{RamStorage, RamStorageError, ERASED_BYTE};

pub use zerocopy;
