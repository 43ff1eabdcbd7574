//! Timed playback with cancel-and-restart.

use crate::{AnimationConfig, Frame, Frames};
use async_stream::stream;
use draftsmith_core::ChangeSet;
use draftsmith_error::DiffError;
use futures::Stream;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

/// How a played animation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The terminal frame was rendered; holds the final text
    Completed(String),
    /// A newer animation started (or [`Animator::cancel`] was called) first
    Cancelled,
}

/// Starts animations; starting one cancels the one in flight.
///
/// Every start bumps a shared epoch. An [`Animation`] checks the epoch before
/// sleeping and again before rendering each frame, and stops as soon as it is
/// no longer the latest, so a cancelled animation never renders its terminal
/// frame.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    config: AnimationConfig,
    epoch: Arc<AtomicU64>,
}

impl Animator {
    /// Create an animator.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Timing configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Plan and start an animation of `old -> new`.
    ///
    /// # Errors
    ///
    /// A supplied change set that does not describe `old -> new`; nothing is
    /// started and the animation in flight is left alone.
    pub fn animate(&self, old: &str, new: &str, changes: Option<ChangeSet>) -> Result<Animation, DiffError> {
        let frames = Frames::plan(old, new, changes, &self.config)?;
        Ok(self.start(frames))
    }

    /// Start playing `frames`, cancelling any animation in flight.
    pub fn start(&self, frames: Frames) -> Animation {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(epoch, mode = frames.mode(), "Starting animation");
        Animation {
            frames,
            epoch,
            current: Arc::clone(&self.epoch),
        }
    }

    /// Cancel the animation in flight, if any.
    pub fn cancel(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(epoch, "Animation cancelled");
    }
}

/// A started animation. Finite and not restartable.
#[derive(Debug)]
pub struct Animation {
    frames: Frames,
    epoch: u64,
    current: Arc<AtomicU64>,
}

impl Animation {
    /// Whether no newer animation has been started.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.epoch
    }

    /// Play every frame, sleeping each frame's delay, calling `render` per frame.
    #[instrument(skip(self, render), fields(epoch = self.epoch, mode = self.frames.mode()))]
    pub async fn run<F>(mut self, mut render: F) -> AnimationOutcome
    where
        F: FnMut(&Frame),
    {
        let mut rendered = 0usize;
        while let Some(frame) = self.frames.next() {
            if !self.is_current() {
                break;
            }
            tokio::time::sleep(frame.delay).await;
            if !self.is_current() {
                break;
            }
            render(&frame);
            rendered += 1;
            if frame.done {
                debug!(frames = rendered, "Animation completed");
                return AnimationOutcome::Completed(frame.text);
            }
        }
        debug!(frames = rendered, "Animation superseded");
        AnimationOutcome::Cancelled
    }

    /// The timed frames as a stream that ends early once superseded.
    pub fn into_stream(self) -> impl Stream<Item = Frame> {
        let Animation {
            frames,
            epoch,
            current,
        } = self;
        stream! {
            for frame in frames {
                if current.load(Ordering::SeqCst) != epoch {
                    break;
                }
                tokio::time::sleep(frame.delay).await;
                if current.load(Ordering::SeqCst) != epoch {
                    break;
                }
                yield frame;
            }
        }
    }
}
