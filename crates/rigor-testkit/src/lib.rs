//! # rigor-testkit
//!
//! A minimal in-process test harness: a [`TestRunner`] counts checks,
//! prints one line per result, and reports an exit status at the end.
//! Meant for smoke-test binaries that exercise a stack end to end, not
//! as a replacement for `#[test]`.

mod runner;

pub use runner::TestRunner;
