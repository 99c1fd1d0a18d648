//! Resume scanner library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeScannerError};
pub use processing::scanner::ResumeScanner;
