//! Read a text file into a deliberately small fixed buffer.
//!
//! Demonstrates the basic discipline: one error enum per operation, one
//! `match` arm per failure cause at the top level, `defer!` for
//! end-of-run reporting.
//!
//! Run: cargo run -p rigor-read-file -- <path>

use rigor::defer;
use rigor::fsops::{read_file, ReadFileError};

use std::time::Instant;

const BUFFER_SIZE: usize = 16;

fn run(path: &str) -> i32 {
    let started = Instant::now();
    defer!(eprintln!("read-file: finished in {:?}", started.elapsed()));

    let mut buffer = [0u8; BUFFER_SIZE];
    match read_file(path, &mut buffer) {
        Ok(count) => {
            println!(
                "Read {} bytes: {}",
                count,
                String::from_utf8_lossy(&buffer[..count])
            );
            0
        }
        Err(ReadFileError::OpenFailed) => {
            eprintln!("ERROR: Failed to open file with path {}!", path);
            1
        }
        Err(ReadFileError::ReadFailed) => {
            eprintln!("ERROR: Failed to read file!");
            1
        }
        Err(ReadFileError::BufferTooSmall) => {
            eprintln!("ERROR: Buffer size of {} is not enough!", BUFFER_SIZE);
            1
        }
        Err(ReadFileError::EmptyBuffer) => {
            eprintln!("ERROR: Destination buffer is empty!");
            1
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Please provide a text file to read!");
        std::process::exit(1);
    }

    std::process::exit(run(&args[1]));
}
