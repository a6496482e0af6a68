use serde::{Deserialize, Serialize};
use shared::domain::Prompt;

/// Insertion-ordered favorites with unique membership. Persisted as a plain
/// JSON array; duplicates in stored data collapse to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Prompt>", into = "Vec<Prompt>")]
pub struct Favorites {
    items: Vec<Prompt>,
}

impl Favorites {
    pub fn contains(&self, prompt: &Prompt) -> bool {
        self.items.contains(prompt)
    }

    /// Returns true when `prompt` is a favorite afterwards.
    pub fn toggle(&mut self, prompt: &Prompt) -> bool {
        if self.remove(prompt) {
            false
        } else {
            self.items.push(prompt.clone());
            true
        }
    }

    /// Returns true when something was removed.
    pub fn remove(&mut self, prompt: &Prompt) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p != prompt);
        self.items.len() != before
    }

    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prompt> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Prompt] {
        &self.items
    }
}

impl From<Vec<Prompt>> for Favorites {
    fn from(prompts: Vec<Prompt>) -> Self {
        let mut items: Vec<Prompt> = Vec::with_capacity(prompts.len());
        for prompt in prompts {
            if !items.contains(&prompt) {
                items.push(prompt);
            }
        }
        Self { items }
    }
}

impl From<Favorites> for Vec<Prompt> {
    fn from(favorites: Favorites) -> Self {
        favorites.items
    }
}
