//! Integration scenarios for the comwatch workspace.
//!
//! Each module covers one slice of end-to-end behavior:
//! - Alarm timelines from boot through loss and recovery
//! - Counter wraparound across the u32 boundary
//! - Configuration loading and validation

mod common;
mod config_test;
mod timeline_test;
mod wraparound_test;
