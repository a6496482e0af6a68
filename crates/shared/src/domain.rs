use std::fmt;

use serde::{Deserialize, Serialize};

/// A single reflective prompt. Equality is plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prompt(pub String);

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Prompt {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Prompt {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for Prompt {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Prompt {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Vibration request forwarded to a haptic capability, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VibratePattern {
    Pulse(u32),
    Sequence(Vec<u32>),
}

impl VibratePattern {
    /// Total time the pattern keeps the device busy.
    pub fn total_ms(&self) -> u32 {
        match self {
            Self::Pulse(ms) => *ms,
            Self::Sequence(steps) => steps.iter().sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

pub const SHARE_TITLE: &str = "Reflection Dice Prompt";

impl SharePayload {
    pub fn for_prompt(prompt: &Prompt) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: format!("Here's a thoughtful prompt: \"{prompt}\""),
        }
    }
}
