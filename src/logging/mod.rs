//! # Logging Module
//!
//! Diagnostics go through [`tracing`]. The CLI installs a stderr subscriber
//! with [`init_tracing`], whose level follows the `-v`/`-q` flags unless
//! `RUST_LOG` is set. Terminal colors for user-facing output are controlled
//! with [`ColorMode`].
//!
//! ## Example
//!
//! ```rust
//! use edheader::logging::{ColorMode, init_tracing, level_for};
//!
//! assert_eq!(level_for(false, 2), "debug");
//!
//! ColorMode::Never.apply();
//! init_tracing(false, 1);
//! tracing::info!("Processing file: {}", "example.rs");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, level_for};
