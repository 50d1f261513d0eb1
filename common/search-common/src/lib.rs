//! Search Common - Shared utilities for the video search workspace
//!
//! - **Initialization**: [`init_tracing`] for standardized logging setup
//!
//! # Example
//!
//! ```rust,ignore
//! use search_common::{init_tracing, level_for_verbosity};
//!
//! init_tracing("video_search", level_for_verbosity(1))?;
//! ```

pub mod init;

pub use init::{init_tracing, level_for_verbosity};
