//! Edit diff validation and incremental-reveal animation for Draftsmith.
//!
//! An edit replaces one draft with another. Rather than swapping the text, the
//! renderer replays the change as a finite sequence of [`Frame`]s:
//!
//! - **structured** when the edit came with a [`ChangeSet`](draftsmith_core::ChangeSet):
//!   each `remove` and `add` segment is one frame, `keep` segments advance silently;
//! - **fallback** otherwise: trailing characters past the common prefix are
//!   deleted one at a time, then the new suffix is typed one character at a time.
//!
//! Frames are produced by plain iterators, so they can be driven synchronously.
//! [`Animator`] adds timing and cancel-and-restart semantics on top.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animator;
mod config;
mod frames;
mod validate;

pub use animator::{Animation, AnimationOutcome, Animator};
pub use config::{AnimationConfig, AnimationConfigBuilder};
pub use frames::{FallbackFrames, Frame, Frames, StructuredFrames};
pub use validate::validate;
