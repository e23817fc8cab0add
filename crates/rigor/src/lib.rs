//! # rigor — strict error propagation for small systems code
//!
//! Facade over the toolkit crates:
//!
//! - [`rigor_core`]: the propagation macros (`throw!`, `assume!`,
//!   `presume!`, `crash!`, `demand!`, `catch!`) and the scope-exit
//!   guards (`defer!`, `defer_if!`).
//! - [`rigor_buffer`]: the fixed/growable append-only byte [`Buffer`].
//! - [`rigor_testkit`]: the [`TestRunner`] smoke-test harness.
//!
//! Plus [`fsops`], a worked example of the discipline over file I/O.
//!
//! ## Quick Start
//!
//! ```
//! use rigor::{demand, Buffer};
//!
//! let mut buf = demand!(Buffer::growable(8));
//! demand!(buf.append_str("hello"));
//! assert_eq!(buf.as_bytes(), b"hello");
//! ```

pub mod fsops;

// ── Re-exports ────────────────────────────────────────────────────

pub use rigor_buffer::{Buffer, BufferError};
pub use rigor_core::traceback;
pub use rigor_core::{Cause, Defer, Frame, Site};
pub use rigor_core::{assume, catch, crash, defer, defer_if, demand, presume, throw};
pub use rigor_testkit::TestRunner;
