//! Frame generators for both animation modes.

use crate::{AnimationConfig, validate};
use draftsmith_core::{ChangeKind, ChangeSet, common_prefix};
use draftsmith_error::DiffError;
use std::time::Duration;

/// One rendered state of an animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Full text to display
    pub text: String,
    /// Last frame; `text` equals the edited draft
    pub done: bool,
    /// Pause before showing this frame
    pub delay: Duration,
}

/// Byte offsets of every char boundary of `text`, including `text.len()`.
fn boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Texts are equal: one terminal frame
    Settle,
    /// `chars` characters of `old` are still shown
    Deleting { chars: usize },
    /// `chars` characters of `new` are shown
    Inserting { chars: usize },
    Finished,
}

/// Fallback mode: delete back to the common prefix, then type the rest of `new`.
///
/// # Examples
///
/// ```
/// use draftsmith_diff::{AnimationConfig, FallbackFrames};
///
/// let texts: Vec<String> = FallbackFrames::new("cat", "cow", &AnimationConfig::instant())
///     .map(|frame| frame.text)
///     .collect();
/// assert_eq!(texts, vec!["ca", "c", "co", "cow"]);
/// ```
#[derive(Debug, Clone)]
pub struct FallbackFrames {
    old: String,
    new: String,
    old_bounds: Vec<usize>,
    new_bounds: Vec<usize>,
    prefix_chars: usize,
    phase: Phase,
    delay: Duration,
}

impl FallbackFrames {
    /// Frames for `old -> new`.
    pub fn new(old: &str, new: &str, config: &AnimationConfig) -> Self {
        let prefix_chars = common_prefix(old, new).chars().count();
        let old_bounds = boundaries(old);
        let phase = if old == new {
            Phase::Settle
        } else {
            Phase::Deleting {
                chars: old_bounds.len() - 1,
            }
        };
        Self {
            old: old.to_string(),
            new: new.to_string(),
            old_bounds,
            new_bounds: boundaries(new),
            prefix_chars,
            phase,
            delay: config.step_delay(),
        }
    }

    /// The common prefix: the text shown once all deletions are done.
    pub fn prefix(&self) -> &str {
        &self.old[..self.old_bounds[self.prefix_chars]]
    }

    fn new_chars(&self) -> usize {
        self.new_bounds.len() - 1
    }
}

impl Iterator for FallbackFrames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        loop {
            match self.phase {
                Phase::Settle => {
                    self.phase = Phase::Finished;
                    return Some(Frame {
                        text: self.new.clone(),
                        done: true,
                        delay: Duration::ZERO,
                    });
                }
                Phase::Deleting { chars } if chars > self.prefix_chars => {
                    let chars = chars - 1;
                    let done = chars == self.prefix_chars && self.prefix_chars == self.new_chars();
                    self.phase = if done {
                        Phase::Finished
                    } else {
                        Phase::Deleting { chars }
                    };
                    return Some(Frame {
                        text: self.old[..self.old_bounds[chars]].to_string(),
                        done,
                        delay: self.delay,
                    });
                }
                Phase::Deleting { .. } => {
                    self.phase = Phase::Inserting {
                        chars: self.prefix_chars,
                    };
                }
                Phase::Inserting { chars } if chars < self.new_chars() => {
                    let chars = chars + 1;
                    let done = chars == self.new_chars();
                    self.phase = if done {
                        Phase::Finished
                    } else {
                        Phase::Inserting { chars }
                    };
                    return Some(Frame {
                        text: self.new[..self.new_bounds[chars]].to_string(),
                        done,
                        delay: self.delay,
                    });
                }
                Phase::Inserting { .. } | Phase::Finished => {
                    self.phase = Phase::Finished;
                    return None;
                }
            }
        }
    }
}

/// Structured mode: one frame per `remove` or `add` segment.
///
/// The rendered text is the processed part (kept and added segments) followed by
/// the unprocessed rest of the old text. A removal drops the segment at the
/// cursor; an addition appends to the processed part.
#[derive(Debug, Clone)]
pub struct StructuredFrames {
    changes: ChangeSet,
    old: String,
    index: usize,
    processed: String,
    old_offset: usize,
    last_visible: Option<usize>,
    delay: Duration,
    finished: bool,
}

impl StructuredFrames {
    /// Frames for a validated change set.
    ///
    /// # Errors
    ///
    /// The [`validate`] error when `changes` does not describe `old -> new`.
    pub fn new(
        changes: ChangeSet,
        old: &str,
        new: &str,
        config: &AnimationConfig,
    ) -> Result<Self, DiffError> {
        validate(&changes, old, new)?;
        let last_visible = changes
            .changes()
            .iter()
            .rposition(|c| c.kind != ChangeKind::Keep && !c.text.is_empty());
        Ok(Self {
            changes,
            old: old.to_string(),
            index: 0,
            processed: String::with_capacity(new.len()),
            old_offset: 0,
            last_visible,
            delay: config.segment_delay(),
            finished: false,
        })
    }

    fn rendered(&self) -> String {
        format!("{}{}", self.processed, &self.old[self.old_offset..])
    }
}

impl Iterator for StructuredFrames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.finished {
            return None;
        }

        let Some(last_visible) = self.last_visible else {
            // Only keep segments: the texts are equal.
            self.finished = true;
            return Some(Frame {
                text: self.rendered(),
                done: true,
                delay: Duration::ZERO,
            });
        };

        while let Some(change) = self.changes.changes().get(self.index) {
            let index = self.index;
            self.index += 1;
            match change.kind {
                ChangeKind::Keep => {
                    self.processed.push_str(&change.text);
                    self.old_offset += change.text.len();
                }
                ChangeKind::Remove if !change.text.is_empty() => {
                    self.old_offset += change.text.len();
                }
                ChangeKind::Add if !change.text.is_empty() => {
                    self.processed.push_str(&change.text);
                }
                ChangeKind::Remove | ChangeKind::Add => continue,
            }
            if change.kind == ChangeKind::Keep {
                continue;
            }

            let done = index == last_visible;
            if done {
                // Trailing keep segments are already on screen; fold them in.
                for rest in &self.changes.changes()[self.index..] {
                    self.processed.push_str(&rest.text);
                    self.old_offset += rest.text.len();
                }
                self.index = self.changes.len();
                self.finished = true;
            }
            return Some(Frame {
                text: self.rendered(),
                done,
                delay: self.delay,
            });
        }

        self.finished = true;
        None
    }
}

/// Frames of either mode.
#[derive(Debug, Clone)]
pub enum Frames {
    /// Replay of a supplied change set
    Structured(StructuredFrames),
    /// Prefix-based delete-then-type
    Fallback(FallbackFrames),
}

impl Frames {
    /// Structured frames when `changes` is supplied, fallback frames otherwise.
    ///
    /// # Errors
    ///
    /// A supplied change set that fails [`validate`].
    pub fn plan(
        old: &str,
        new: &str,
        changes: Option<ChangeSet>,
        config: &AnimationConfig,
    ) -> Result<Self, DiffError> {
        match changes {
            Some(changes) => Ok(Self::Structured(StructuredFrames::new(changes, old, new, config)?)),
            None => Ok(Self::Fallback(FallbackFrames::new(old, new, config))),
        }
    }

    /// Mode name for logs.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Structured(_) => "structured",
            Self::Fallback(_) => "fallback",
        }
    }
}

impl Iterator for Frames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        match self {
            Self::Structured(frames) => frames.next(),
            Self::Fallback(frames) => frames.next(),
        }
    }
}
