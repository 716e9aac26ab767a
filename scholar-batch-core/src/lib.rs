#![doc = "scholar-batch-core: core logic library for scholar-batch."]

//! This crate holds every step of the batch formatting pipeline: mapping
//! definitions, item directory discovery, Dublin Core extraction, manifest
//! parsing and the tab-separated table writer.
//!
//! # Usage
//! The CLI crate resolves a mapping file and hands a root directory to
//! [`format::format_directory`]. Tests drive the smaller pieces directly.

pub mod contract;
pub mod directories;
pub mod dublin_core;
pub mod error;
pub mod format;
pub mod manifest;
pub mod mapping;
pub mod table;

pub use error::{FormatError, Result};
