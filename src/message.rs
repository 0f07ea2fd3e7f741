// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Recorded message layout.
//!
//! A __message__ is a piece of human-readable text produced during a
//! provisioning run, tagged with a __kind__ that classifies it. The kind is
//! what decides whether a message ends up in the deprecation summary printed
//! at the end of a run.

use serde::{Deserialize, Serialize};
use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Single message recorded during a provisioning run.
#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Message {
    /// Human-readable content.
    pub text: String,

    /// Category of the message.
    #[serde(default)]
    pub kind: MessageKind,
}

impl Message {
    /// Construct new message of a given kind.
    pub fn new(text: impl Into<String>, kind: impl Into<MessageKind>) -> Self {
        Self {
            text: text.into(),
            kind: kind.into(),
        }
    }

    /// Check if message is a deprecation notice.
    pub fn is_deprecation(&self) -> bool {
        self.kind == MessageKind::Deprecation
    }
}

impl Display for Message {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(fmt, "[{}] {}", self.kind, self.text)
    }
}

/// Category tag of a recorded message.
///
/// Any identifier is a valid kind. The two that the recorder knows about get
/// their own variants, everything else is kept as-is in [`Custom`].
///
/// Kinds compare by identifier, so `Custom("deprecation")` is the same
/// category as [`Deprecation`].
///
/// [`Custom`]: MessageKind::Custom
/// [`Deprecation`]: MessageKind::Deprecation
#[derive(Default, Debug, Clone, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    /// Generic operational note.
    #[default]
    Info,

    /// Notice that some setting or behavior will be removed or changed.
    Deprecation,

    /// Caller defined category.
    Custom(String),
}

impl MessageKind {
    /// Textual identifier of kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Info => "info",
            Self::Deprecation => "deprecation",
            Self::Custom(name) => name.as_str(),
        }
    }
}

impl PartialEq for MessageKind {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for MessageKind {}

impl Hash for MessageKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Display for MessageKind {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(self.as_str())
    }
}

impl FromStr for MessageKind {
    type Err = Infallible;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        Ok(match data {
            "info" => Self::Info,
            "deprecation" => Self::Deprecation,
            other => Self::Custom(other.into()),
        })
    }
}

impl From<&str> for MessageKind {
    fn from(data: &str) -> Self {
        match data.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<String> for MessageKind {
    fn from(data: String) -> Self {
        Self::from(data.as_str())
    }
}

impl From<MessageKind> for String {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Custom(name) => name,
            known => known.as_str().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use simple_test_case::test_case;

    #[test]
    fn message_kind_defaults_to_info() {
        assert_eq!(MessageKind::default(), MessageKind::Info);
    }

    #[test_case("info", MessageKind::Info; "info")]
    #[test_case("deprecation", MessageKind::Deprecation; "deprecation")]
    #[test_case("fake", MessageKind::Custom("fake".into()); "custom")]
    #[test]
    fn message_kind_from_identifier(name: &str, expect: MessageKind) {
        let result = MessageKind::from(name);
        assert_eq!(result, expect);
        assert_eq!(result.to_string(), name);
    }

    #[test]
    fn message_is_deprecation() {
        assert!(Message::new("gone soon", MessageKind::Deprecation).is_deprecation());
        assert!(!Message::new("still here", MessageKind::Info).is_deprecation());
        assert!(!Message::new("deprecation", "fake").is_deprecation());
    }

    #[test]
    fn message_kind_compares_by_identifier() {
        let kind = MessageKind::Custom("deprecation".into());
        assert_eq!(kind, MessageKind::Deprecation);
        assert_eq!(MessageKind::from(String::from(kind.clone())), kind);
        assert_ne!(MessageKind::Custom("infos".into()), MessageKind::Info);
        assert!(Message::new("gone soon", kind).is_deprecation());
    }

    #[test]
    fn message_serializes_kind_as_identifier() -> anyhow::Result<()> {
        let result = toml::to_string(&Message::new("gone soon", MessageKind::Deprecation))?;
        assert_eq!(result, "text = \"gone soon\"\nkind = \"deprecation\"\n");

        let result: Message = toml::from_str("text = \"three\"\nkind = \"fake\"\n")?;
        assert_eq!(result, Message::new("three", MessageKind::Custom("fake".into())));

        let result: Message = toml::from_str("text = \"note\"\n")?;
        assert_eq!(result.kind, MessageKind::Info);

        Ok(())
    }

    #[test]
    fn message_display() {
        let result = Message::new("hello", "fake").to_string();
        assert_eq!(result, "[fake] hello");
    }
}
