//! End-to-end smoke test over the toolkit's observable guarantees:
//!   Part A — Buffer: fixed bound, growth doubling, clear, deinit
//!   Part B — Propagation: throw, catch! remapping, ignore arms
//!   Part C — Defer: LIFO order, early-return path, captured conditions
//!   Part D — File operations: typed failures, no crashes
//!
//! Run: cargo run -p rigor-selfcheck

use rigor::fsops::{read_file, validate_file, ReadFileError, ValidateFileError};
use rigor::{catch, defer, defer_if, demand, throw};
use rigor::{Buffer, BufferError, TestRunner};

use std::cell::RefCell;
use std::io::Write;

// ── Part A: Buffer ──────────────────────────────────────────

fn check_buffer(t: &mut TestRunner) {
    t.section("Part A: Buffer");

    let mut storage = [0u8; 16];
    let mut fixed = match Buffer::fixed(&mut storage) {
        Ok(buf) => buf,
        Err(err) => {
            t.fail("fixed init over 16 bytes", &format!("{}", err));
            return;
        }
    };
    t.check("fixed init over 16 bytes", true, "");
    t.check_eq("append hello: result", fixed.append_bytes(b"hello"), Ok(()));
    t.check_eq("append hello: len", fixed.len(), 5);
    t.check("append hello: contents", fixed.as_bytes() == b"hello", "mismatch");
    t.check(
        "append hello: tail stays zero",
        fixed.storage_bytes()[5..].iter().all(|&b| b == 0),
        "nonzero tail",
    );

    // Fill to the reserved byte, then one past it.
    let mut small_storage = [0u8; 8];
    let mut small = demand!(Buffer::fixed(&mut small_storage));
    for i in 0..7u8 {
        let _ = small.append_byte(i);
    }
    t.check_eq("fixed fills to capacity - 1", small.len(), 7);
    t.check_eq(
        "one more byte is refused",
        small.append_byte(0xFF),
        Err(BufferError::CapacityFull),
    );
    t.check_eq("refused append leaves len", small.len(), 7);

    let mut growable = demand!(Buffer::growable(4));
    t.check_eq("growable(4) append 8 bytes", growable.append_bytes(b"abcdefgh"), Ok(()));
    t.check_eq("growth doubles to 16", growable.capacity(), 16);
    t.check_eq("len tracks appended bytes", growable.len(), 8);

    growable.clear();
    t.check_eq("clear resets len", growable.len(), 0);
    t.check(
        "clear zero-fills capacity",
        growable.storage_bytes().iter().all(|&b| b == 0),
        "nonzero byte",
    );
    let after_once: Vec<u8> = growable.storage_bytes().to_vec();
    growable.clear();
    t.check(
        "clear is idempotent",
        growable.storage_bytes() == after_once.as_slice() && growable.is_empty(),
        "state changed",
    );

    growable.deinit();
    t.check_eq("deinit drops capacity", growable.capacity(), 0);
    t.check_eq(
        "appends after deinit are refused",
        growable.append_byte(1),
        Err(BufferError::ZeroCapacity),
    );

    let mut kept = [0u8; 8];
    {
        let mut buf = demand!(Buffer::fixed(&mut kept));
        let _ = buf.append_bytes(b"abc");
        buf.deinit();
    }
    t.check(
        "deinit leaves caller storage readable",
        kept.iter().all(|&b| b == 0),
        "storage not zeroed",
    );
}

// ── Part B: Propagation ─────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepError {
    Blocked,
    Missing,
    Flaky,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskError {
    Unready,
    Absent,
}

fn step(fail: Option<StepError>) -> Result<u32, StepError> {
    match fail {
        None => Ok(11),
        Some(err) => throw!(err),
    }
}

fn task(fail: Option<StepError>) -> Result<u32, TaskError> {
    let val = catch!(step(fail), {
        ignore StepError::Flaky => 0,
        propagate StepError::Blocked => TaskError::Unready,
        propagate StepError::Missing => TaskError::Absent,
    });
    Ok(val)
}

fn check_propagation(t: &mut TestRunner) {
    t.section("Part B: Propagation");

    t.check_eq("success passes through", task(None), Ok(11));
    t.check_eq(
        "Blocked remaps to Unready",
        task(Some(StepError::Blocked)),
        Err(TaskError::Unready),
    );
    t.check_eq(
        "Missing remaps to Absent",
        task(Some(StepError::Missing)),
        Err(TaskError::Absent),
    );
    t.check_eq(
        "ignored failure substitutes a value",
        task(Some(StepError::Flaky)),
        Ok(0),
    );
}

// ── Part C: Defer ───────────────────────────────────────────

fn check_defer(t: &mut TestRunner) {
    t.section("Part C: Defer");

    let trail = RefCell::new(Vec::new());
    {
        defer!(trail.borrow_mut().push(1));
        defer!(trail.borrow_mut().push(2));
        defer!(trail.borrow_mut().push(3));
    }
    t.check_eq("LIFO order", trail.borrow().clone(), vec![3, 2, 1]);

    fn bail(trail: &RefCell<Vec<&'static str>>) -> Result<(), ()> {
        defer!(trail.borrow_mut().push("cleanup"));
        trail.borrow_mut().push("work");
        if trail.borrow().len() > 0 {
            return Err(());
        }
        Ok(())
    }
    let early = RefCell::new(Vec::new());
    let _ = bail(&early);
    t.check_eq(
        "cleanup runs on early return",
        early.borrow().clone(),
        vec!["work", "cleanup"],
    );

    let hits = RefCell::new(0);
    let mut armed = true;
    {
        defer_if!(armed, *hits.borrow_mut() += 1);
        armed = false;
        let _ = armed;
    }
    t.check_eq("defer_if captures its condition", *hits.borrow(), 1);
}

// ── Part D: File operations ─────────────────────────────────

fn check_fsops(t: &mut TestRunner) {
    t.section("Part D: File operations");

    let mut buf = [0u8; 16];
    t.check_eq(
        "missing file is OpenFailed, not a crash",
        read_file("definitely/not/a/real/path.txt", &mut buf),
        Err(ReadFileError::OpenFailed),
    );

    let path = std::env::temp_dir().join(format!("rigor-selfcheck-{}", std::process::id()));
    defer!(std::fs::remove_file(&path).ok());

    let written = std::fs::File::create(&path)
        .and_then(|mut file| file.write_all(b"lowercase"))
        .is_ok();
    t.check("scratch file created", written, "io error");
    if !written {
        return;
    }

    t.check_eq("read_file returns byte count", read_file(&path, &mut buf), Ok(9));
    t.check("read_file contents", &buf[..9] == b"lowercase", "mismatch");
    t.check_eq("validate accepts lowercase", validate_file(&path), Ok(()));

    let rewritten = std::fs::File::create(&path)
        .and_then(|mut file| file.write_all(b"abc4ef"))
        .is_ok();
    t.check("scratch file rewritten", rewritten, "io error");
    t.check_eq(
        "validate reports the invalid index",
        validate_file(&path),
        Err(ValidateFileError::InvalidByte(3)),
    );
}

// ════════════════════════════════════════════════════════════

fn main() {
    println!("=== rigor selfcheck ===");

    let mut t = TestRunner::new();

    check_buffer(&mut t);
    check_propagation(&mut t);
    check_defer(&mut t);
    check_fsops(&mut t);

    t.summary();
    std::process::exit(t.exit_code());
}
