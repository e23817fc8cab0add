//! In-process check runner.

use std::fmt::Debug;

const LINE: &str = "────────────────────────────────────────────────────────────";

/// Counts checks and prints one line per result.
///
/// The counters live here, not in process globals: whoever owns the
/// runner owns the verdict, and `exit_code()` turns it into a process
/// status at the very end.
pub struct TestRunner {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

impl TestRunner {
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
        }
    }

    pub fn section(&self, name: &str) {
        println!("\n{}", LINE);
        println!("  {}", name);
        println!("{}", LINE);
    }

    pub fn pass(&mut self, name: &str) {
        self.total += 1;
        self.passed += 1;
        println!("  [{:2}] {:<52} PASS", self.total, name);
    }

    pub fn fail(&mut self, name: &str, reason: &str) {
        self.total += 1;
        self.failed += 1;
        println!("  [{:2}] {:<52} FAIL: {}", self.total, name, reason);
    }

    pub fn check(&mut self, name: &str, ok: bool, reason: &str) {
        if ok {
            self.pass(name);
        } else {
            self.fail(name, reason);
        }
    }

    /// Compare two values, failing with both renderings on mismatch.
    pub fn check_eq<T: PartialEq + Debug>(&mut self, name: &str, actual: T, expected: T) {
        if actual == expected {
            self.pass(name);
        } else {
            let reason = format!("{:?} != {:?}", actual, expected);
            self.fail(name, &reason);
        }
    }

    pub fn summary(&self) {
        println!("\n{}", LINE);
        println!(
            "  Total: {}  Passed: {}  Failed: {}",
            self.total, self.passed, self.failed
        );
        println!("{}", LINE);
    }

    /// Process exit status: 0 iff every check passed.
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else {
            0
        }
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}
