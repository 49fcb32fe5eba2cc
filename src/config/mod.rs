//! Configuration module for formguard.
//!
//! This module handles loading the TOML configuration that points the form at
//! its backend and tunes debounce and timeout behaviour.
//!
//! ## Author
//! a13x.h.cc@gmail.com

mod config;

pub use config::{ApiSettings, Config, FormSettings, LoggingSettings, RemoteCheckSettings};
