//! Snapshot input and report writers used by the command-line front end.

pub mod input;
pub mod output;
pub mod writers;

pub use input::{parse_snapshots, read_snapshots};
pub use output::{create_writer, OutputFormat, OutputWriter};
