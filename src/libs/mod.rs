//! Ambient support modules shared by the config layer and the CLI.
//!
//! Mirrors the teacher's `libs::data_storage` in spirit: a single
//! platform-path resolver that everything else (configuration, the sqlite
//! file) builds on.

pub mod data_storage;
