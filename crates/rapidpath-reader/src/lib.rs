//! # RapidPath Reader
//!
//! Scans G-code program text for the two inputs of the travel optimizer:
//! every height the program uses and the XY targets of its rapid moves.
//!
//! Scanning is forgiving. Tokens whose value does not parse as a number are
//! skipped and counted in [`ReadStats::skipped_tokens`]; they never abort a
//! scan.

pub mod file_io;
pub mod reader;
pub mod scan;

pub use file_io::ProgramFileReader;
pub use reader::{ProgramReader, ReaderSettings};
pub use scan::{ProgramScan, ReadStats};
