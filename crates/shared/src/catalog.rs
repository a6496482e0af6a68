//! Immutable prompt catalogs, either built in or supplied by configuration.

use std::sync::Arc;

use crate::{domain::Prompt, error::CatalogError};

pub const BUILTIN_PROMPTS: &[&str] = &[
    "What is one thing you are grateful for right now?",
    "Take three slow breaths. What do you notice in your body?",
    "What is weighing on your mind, and is it within your control?",
    "Name one small win from today.",
    "Who made a difference in your week, and have you told them?",
    "What would you do today if you were being kind to yourself?",
    "Describe the sounds around you without judging them.",
    "What emotion has visited you most today?",
    "What are you holding onto that you could let go of?",
    "When did you last feel truly rested?",
    "What is one thing you are looking forward to?",
    "What did you learn about yourself this week?",
    "Where in your body are you holding tension? Let it soften.",
    "What would your future self thank you for doing today?",
    "What is a boundary you need to protect right now?",
    "Recall a moment today when you felt calm. What made it so?",
    "What story are you telling yourself that might not be true?",
    "How can you bring more play into the rest of your day?",
    "What does enough look like for you today?",
    "Notice five things you can see. Which one surprises you?",
    "What is something you are avoiding, and why?",
    "Who could use a word of encouragement from you?",
    "What part of your routine nourishes you the most?",
    "If today had a title, what would it be?",
    "What is one assumption you could question this week?",
    "How have you grown in the last year?",
    "What would it feel like to do one thing slowly today?",
    "What are you proud of that nobody else knows about?",
    "Which worry can wait until tomorrow?",
    "What does your mind need less of right now?",
];

/// Ordered, read-only prompt list. Cloning shares the underlying storage.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    prompts: Arc<[Prompt]>,
    has_alternatives: bool,
}

impl PromptCatalog {
    pub fn new<I, P>(prompts: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Prompt>,
    {
        let prompts: Vec<Prompt> = prompts.into_iter().map(Into::into).collect();
        if prompts.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(index) = prompts.iter().position(|p| p.as_str().trim().is_empty()) {
            return Err(CatalogError::BlankEntry { index });
        }
        Ok(Self::from_prompts(prompts))
    }

    pub fn builtin() -> Self {
        Self::from_prompts(BUILTIN_PROMPTS.iter().map(|p| Prompt::from(*p)).collect())
    }

    fn from_prompts(prompts: Vec<Prompt>) -> Self {
        let has_alternatives = prompts.windows(2).any(|pair| pair[0] != pair[1]);
        Self {
            prompts: prompts.into(),
            has_alternatives,
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Never true for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// True when at least two distinct prompts exist, so a draw can always
    /// avoid the previous one.
    pub fn has_alternatives(&self) -> bool {
        self.has_alternatives
    }

    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.prompts.get(index)
    }

    /// Index is reduced modulo the catalog length.
    pub fn nth_wrapping(&self, index: usize) -> &Prompt {
        &self.prompts[index % self.prompts.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prompt> {
        self.prompts.iter()
    }

    pub fn contains(&self, prompt: &Prompt) -> bool {
        self.prompts.contains(prompt)
    }
}
