//! Error types for the Draftsmith library.
//!
//! This crate provides the error taxonomy shared by every Draftsmith crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Failures raised inside the generation pipeline are additionally tagged with
//! the [`Stage`] that produced them.
//!
//! # Examples
//!
//! ```
//! use draftsmith_error::{DraftsmithResult, GatewayError, GatewayErrorKind, Stage};
//!
//! fn call_model() -> DraftsmithResult<String> {
//!     Err(GatewayError::new(GatewayErrorKind::EmptyResponse))?
//! }
//!
//! let err = call_model().map_err(|e| e.at_stage(Stage::PostGeneration)).unwrap_err();
//! assert_eq!(err.stage(), Some(Stage::PostGeneration));
//! assert!(!err.is_client_error());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod diff;
mod error;
mod extraction;
mod gateway;
mod http;
mod input;
mod json;
mod prompt_store;
mod stage;

pub use config::ConfigError;
pub use diff::{DiffError, DiffErrorKind};
pub use error::{DraftsmithError, DraftsmithErrorKind, DraftsmithResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use gateway::{GatewayError, GatewayErrorKind};
pub use http::HttpError;
pub use input::{InputError, InputErrorKind};
pub use json::JsonError;
pub use prompt_store::{PromptStoreError, PromptStoreErrorKind};
pub use stage::Stage;
