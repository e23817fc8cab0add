//! # rigor-buffer — append-only byte accumulation
//!
//! One buffer type, two storage modes:
//!
//! - **Fixed**: bound over caller-owned storage, never grows, never owns.
//!   Writes that would not leave at least one spare byte fail with
//!   `CapacityFull` and leave the buffer untouched.
//! - **Growable**: owns its storage and doubles capacity whenever a write
//!   would exceed it, transparently to the caller. Allocator refusal
//!   surfaces as `AllocFailed`, never as an abort.
//!
//! Storage is zero-filled on init, on growth, and on `clear()`, so the
//! unwritten tail is always readable zeros.

mod buffer;
mod error;

pub use buffer::Buffer;
pub use error::{BufferError, Result};
