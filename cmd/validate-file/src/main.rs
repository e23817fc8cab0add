//! Check that a file consists only of ASCII lowercase letters.
//!
//! Demonstrates nested operations: `validate_file` handles every
//! `read_file` error at one `catch!` dispatch point, remapping the
//! environment failures into its own vocabulary and refusing the
//! variants it has ruled out.
//!
//! Run: cargo run -p rigor-validate-file -- <path>

use rigor::defer;
use rigor::fsops::{validate_file, ValidateFileError};

use std::time::Instant;

fn run(path: &str) -> i32 {
    let started = Instant::now();
    defer!(eprintln!("validate-file: finished in {:?}", started.elapsed()));

    match validate_file(path) {
        Ok(()) => {
            println!("File {} is valid!", path);
            0
        }
        Err(ValidateFileError::OpenFailed) => {
            eprintln!("ERROR: Failed to open file with path {}!", path);
            1
        }
        Err(ValidateFileError::ReadFailed) => {
            eprintln!("ERROR: Failed to read file!");
            1
        }
        Err(ValidateFileError::InvalidByte(index)) => {
            eprintln!("ERROR: Invalid byte found at index {}", index);
            1
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Please provide a text file to validate!");
        std::process::exit(1);
    }

    std::process::exit(run(&args[1]));
}
