//! Role types for chat participants.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
///
/// # Examples
///
/// ```
/// use draftsmith_core::Role;
///
/// assert_ne!(Role::User, Role::Assistant);
/// assert_eq!(format!("{}", Role::System), "system");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation
    #[display("system")]
    System,
    /// Messages from the human side
    #[display("user")]
    User,
    /// Messages from the model
    #[display("assistant")]
    Assistant,
}
