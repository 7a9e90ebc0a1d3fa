pub mod cli;
pub mod config;
pub mod executor;
pub mod formatter;

pub use grader_common as common;
pub use grader_parser as parser;
