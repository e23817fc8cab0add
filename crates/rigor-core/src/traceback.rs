//! Per-thread throw-site recorder.
//!
//! Every `throw!` / `assume!` / `propagate` arm pushes a [`Frame`] here so
//! that a later refusal can print the path the error took, Python-style.
//! Recording is bounded at [`MAX_FRAMES`]; frames past the cap are dropped.
//!
//! The frame list is thread-local: an error's path through the program
//! never crosses a thread boundary, and each thread's trail stays
//! independent. The on/off toggle is process-wide.
//!
//! # Environment Variables
//!
//! - `RIGOR_TRACEBACK=1|0` — force recording on or off. When unset,
//!   recording follows `cfg!(debug_assertions)`. Resolved once, at the
//!   first recorded frame.
//!
//! Compile the whole recorder out with `default-features = false`
//! (the `traceback` feature); the API remains and becomes a no-op.

use crate::Site;

#[cfg(feature = "traceback")]
use std::cell::RefCell;
#[cfg(feature = "traceback")]
use std::sync::atomic::{AtomicU8, Ordering};

/// Maximum number of recorded frames per thread.
pub const MAX_FRAMES: usize = 128;

/// Which macro recorded the frame.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Cause {
    Throw,
    Assume,
    Presume,
    Crash,
    Propagate,
    Refuse,
    Demand,
}

impl Cause {
    pub fn label(&self) -> &'static str {
        match self {
            Cause::Throw => "throw",
            Cause::Assume => "assume",
            Cause::Presume => "presume",
            Cause::Crash => "crash",
            Cause::Propagate => "propagate",
            Cause::Refuse => "refuse",
            Cause::Demand => "demand",
        }
    }
}

/// One recorded step of an error's path through the program.
#[derive(Clone, Debug)]
pub struct Frame {
    pub site: Site,
    pub cause: Cause,
    pub detail: String,
}

impl Frame {
    pub fn new(site: Site, cause: Cause, detail: String) -> Self {
        Self { site, cause, detail }
    }
}

impl core::fmt::Display for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "    {}\n        {} {}",
            self.site,
            self.cause.label(),
            self.detail
        )
    }
}

// ── Recorder state ────────────────────────────────────────────────

#[cfg(feature = "traceback")]
thread_local! {
    static FRAMES: RefCell<Vec<Frame>> = RefCell::new(Vec::new());
}

// 0 = unresolved, 1 = off, 2 = on
#[cfg(feature = "traceback")]
static ENABLED: AtomicU8 = AtomicU8::new(0);

#[cfg(feature = "traceback")]
fn enabled() -> bool {
    match ENABLED.load(Ordering::Relaxed) {
        1 => false,
        2 => true,
        _ => {
            let on = match std::env::var("RIGOR_TRACEBACK") {
                Ok(val) => matches!(val.as_str(), "1" | "true" | "yes" | "on"),
                Err(_) => cfg!(debug_assertions),
            };
            ENABLED.store(if on { 2 } else { 1 }, Ordering::Relaxed);
            on
        }
    }
}

/// Force recording on or off, overriding the environment resolution.
pub fn set_enabled(on: bool) {
    #[cfg(feature = "traceback")]
    ENABLED.store(if on { 2 } else { 1 }, Ordering::Relaxed);
    #[cfg(not(feature = "traceback"))]
    let _ = on;
}

/// Record one frame. `detail` is only rendered if recording is active
/// and the recorder is not full.
#[inline]
pub fn record(site: Site, cause: Cause, detail: impl FnOnce() -> String) {
    #[cfg(feature = "traceback")]
    {
        if enabled() {
            FRAMES.with(|frames| {
                let mut frames = frames.borrow_mut();
                if frames.len() < MAX_FRAMES {
                    frames.push(Frame::new(site, cause, detail()));
                }
            });
        }
    }
    #[cfg(not(feature = "traceback"))]
    {
        let _ = (site, cause, detail);
    }
}

/// Drop this thread's recorded frames. Called when a `presume!` or
/// `demand!` succeeds — the path up to here turned out fine.
pub fn reset() {
    #[cfg(feature = "traceback")]
    FRAMES.with(|frames| frames.borrow_mut().clear());
}

/// Snapshot of this thread's recorded frames, oldest first.
pub fn snapshot() -> Vec<Frame> {
    #[cfg(feature = "traceback")]
    {
        FRAMES.with(|frames| frames.borrow().clone())
    }
    #[cfg(not(feature = "traceback"))]
    {
        Vec::new()
    }
}

/// Render the recorded frames as a printable block.
/// Empty string when nothing was recorded.
pub fn render() -> String {
    let frames = snapshot();
    if frames.is_empty() {
        return String::new();
    }
    let mut out = String::from("Traceback (most recent call last):\n");
    for frame in &frames {
        out.push_str(&format!("{}\n", frame));
    }
    out
}

#[cfg(all(test, feature = "traceback"))]
mod tests {
    use super::*;

    fn here() -> Site {
        set_enabled(true);
        Site::new(file!(), line!(), module_path!())
    }

    #[test]
    fn record_and_snapshot() {
        reset();
        record(here(), Cause::Throw, || "stale handle".into());
        let frames = snapshot();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].cause, Cause::Throw);
        assert_eq!(frames[0].detail, "stale handle");
        reset();
    }

    #[test]
    fn reset_clears() {
        record(here(), Cause::Assume, || "short read".into());
        reset();
        assert!(snapshot().is_empty());
    }

    #[test]
    fn capped_at_max_frames() {
        reset();
        for i in 0..(MAX_FRAMES + 50) {
            record(here(), Cause::Throw, || format!("frame {}", i));
        }
        assert_eq!(snapshot().len(), MAX_FRAMES);
        reset();
    }

    #[test]
    fn detail_is_lazy_once_full() {
        reset();
        for _ in 0..MAX_FRAMES {
            record(here(), Cause::Throw, || "filler".into());
        }
        record(here(), Cause::Throw, || panic!("must not render"));
        assert_eq!(snapshot().len(), MAX_FRAMES);
        reset();
    }

    #[test]
    fn render_has_header_and_frames() {
        reset();
        assert!(render().is_empty());
        record(here(), Cause::Propagate, || "rerouted".into());
        let text = render();
        assert!(text.starts_with("Traceback (most recent call last):"));
        assert!(text.contains("propagate rerouted"));
        reset();
    }

    #[test]
    fn threads_do_not_share_frames() {
        reset();
        record(here(), Cause::Throw, || "main thread only".into());
        let other = std::thread::spawn(|| snapshot().len()).join().unwrap();
        assert_eq!(other, 0);
        assert_eq!(snapshot().len(), 1);
        reset();
    }

    #[test]
    fn throw_macro_records_a_frame() {
        #[derive(Debug, PartialEq)]
        enum ProbeError {
            Offline,
        }
        fn probe() -> Result<(), ProbeError> {
            crate::throw!(ProbeError::Offline);
        }

        set_enabled(true);
        reset();
        assert_eq!(probe(), Err(ProbeError::Offline));
        let frames = snapshot();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].cause, Cause::Throw);
        assert_eq!(frames[0].detail, "Offline");
        reset();
    }
}
