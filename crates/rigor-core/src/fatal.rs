//! The refusal path: print the diagnostic trail and terminate.
//!
//! There is no unwinding and no recovery — a refused error is a program
//! bug, and the process exits with a nonzero status. Deferred cleanup
//! registered in still-open scopes does not run; `std::process::exit`
//! never returns to those scopes.

use std::io::Write;
use std::process;

use crate::traceback;
use crate::traceback::Frame;

/// Exit status used by the fatal path.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Print the recorded traceback plus `frame` to stderr and exit.
///
/// The final frame is always printed, even when recording is disabled
/// or the recorder is full.
pub fn abort(frame: Frame) -> ! {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    let _ = writeln!(out, "Traceback (most recent call last):");
    for recorded in traceback::snapshot() {
        let _ = writeln!(out, "{}", recorded);
    }
    let _ = writeln!(out, "{}", frame);
    let _ = out.flush();
    process::exit(FATAL_EXIT_CODE)
}
