use std::time::{Duration, Instant};

use shared::{
    catalog::PromptCatalog,
    domain::{Prompt, SharePayload, VibratePattern},
    settings::{DEFAULT_ROLL_DURATION_MS, FAVORITES_KEY, ROLL_DURATION_KEY},
};
use storage::{KeyValueMedium, PreferenceStore};
use tracing::{debug, error, info};

pub mod capabilities;
pub mod draw;
pub mod favorites;

pub use capabilities::{Capabilities, Haptics, ShareTarget};
pub use draw::{draw_prompt, Draw, RandomSource, SeededRandom, ThreadRandom};
pub use favorites::Favorites;

use capabilities::{FAVORITE_PULSE_MS, ROLL_START_PULSE_MS, SETTLE_PULSES_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    /// Input is suppressed until `deadline`; the deadline never moves.
    Rolling { deadline: Instant },
    Settled(Prompt),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// No share capability was detected at startup.
    Unavailable,
    /// Nothing is settled, e.g. while rolling.
    NothingToShare,
    /// The capability reported an error; it has been logged.
    Failed,
}

/// Owns the session state and the two persisted preferences (favorites and
/// roll duration). Every preference mutation is written through before the
/// call returns.
pub struct SessionController<M, R = ThreadRandom> {
    catalog: PromptCatalog,
    prefs: PreferenceStore<M>,
    random: R,
    capabilities: Capabilities,
    state: SessionState,
    last_shown: Option<Prompt>,
    favorites: Favorites,
    roll_duration_ms: u32,
}

impl<M, R> SessionController<M, R>
where
    M: KeyValueMedium,
    R: RandomSource,
{
    pub async fn open(
        catalog: PromptCatalog,
        prefs: PreferenceStore<M>,
        random: R,
        capabilities: Capabilities,
    ) -> Self {
        let favorites: Favorites = prefs.load(FAVORITES_KEY, Favorites::default()).await;
        let roll_duration_ms: u32 = prefs
            .load(ROLL_DURATION_KEY, DEFAULT_ROLL_DURATION_MS)
            .await;
        info!(
            catalog_len = catalog.len(),
            favorites = favorites.len(),
            roll_duration_ms,
            haptics = capabilities.has_haptics(),
            share = capabilities.can_share(),
            "session: opened"
        );
        Self {
            catalog,
            prefs,
            random,
            capabilities,
            state: SessionState::Idle,
            last_shown: None,
            favorites,
            roll_duration_ms,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The settled prompt; `None` while idle or rolling.
    pub fn current_prompt(&self) -> Option<&Prompt> {
        match &self.state {
            SessionState::Settled(prompt) => Some(prompt),
            _ => None,
        }
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.state, SessionState::Rolling { .. })
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            SessionState::Rolling { deadline } => Some(deadline),
            _ => None,
        }
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_current_favorite(&self) -> bool {
        self.current_prompt()
            .is_some_and(|prompt| self.favorites.contains(prompt))
    }

    pub fn roll_duration_ms(&self) -> u32 {
        self.roll_duration_ms
    }

    pub fn can_share(&self) -> bool {
        self.capabilities.can_share()
    }

    pub fn preferences(&self) -> &PreferenceStore<M> {
        &self.prefs
    }

    /// Starts a roll that settles `roll_duration_ms` after `now`. Ignored
    /// while a roll is already pending; returns whether a roll started.
    pub fn roll(&mut self, now: Instant) -> bool {
        if let SessionState::Rolling { deadline } = self.state {
            debug!(?deadline, "session: roll ignored; already rolling");
            return false;
        }

        let deadline = now + Duration::from_millis(u64::from(self.roll_duration_ms));
        self.capabilities
            .vibrate(VibratePattern::Pulse(ROLL_START_PULSE_MS));
        self.state = SessionState::Rolling { deadline };
        debug!(roll_duration_ms = self.roll_duration_ms, "session: rolling");
        true
    }

    /// Settles a pending roll once `now` reaches its deadline and returns the
    /// newly shown prompt.
    pub fn tick(&mut self, now: Instant) -> Option<&Prompt> {
        match self.state {
            SessionState::Rolling { deadline } if now >= deadline => {}
            _ => return None,
        }

        let draw = draw_prompt(&self.catalog, self.last_shown.as_ref(), &mut self.random);
        debug!(attempts = draw.attempts, "session: settled");
        self.last_shown = Some(draw.prompt.clone());
        self.state = SessionState::Settled(draw.prompt);
        self.capabilities
            .vibrate(VibratePattern::Sequence(SETTLE_PULSES_MS.to_vec()));
        self.current_prompt()
    }

    /// Adds or removes the settled prompt. Returns whether it is a favorite
    /// afterwards, or `None` when nothing is settled.
    pub async fn toggle_favorite(&mut self) -> Option<bool> {
        let SessionState::Settled(prompt) = &self.state else {
            return None;
        };
        self.capabilities
            .vibrate(VibratePattern::Pulse(FAVORITE_PULSE_MS));
        let now_favorite = self.favorites.toggle(prompt);
        debug!(now_favorite, total = self.favorites.len(), "favorites: toggled");
        self.prefs.save(FAVORITES_KEY, &self.favorites).await;
        Some(now_favorite)
    }

    /// Removes `prompt` from favorites in any session state.
    pub async fn remove_favorite(&mut self, prompt: &Prompt) -> bool {
        self.capabilities
            .vibrate(VibratePattern::Pulse(FAVORITE_PULSE_MS));
        if !self.favorites.remove(prompt) {
            debug!("favorites: remove ignored; not a favorite");
            return false;
        }
        debug!(total = self.favorites.len(), "favorites: removed");
        self.prefs.save(FAVORITES_KEY, &self.favorites).await;
        true
    }

    /// Stores a new roll duration. Range checks belong to the input surface;
    /// a roll already in flight keeps its deadline.
    pub async fn set_roll_duration(&mut self, roll_duration_ms: u32) {
        self.roll_duration_ms = roll_duration_ms;
        debug!(roll_duration_ms, "session: roll duration changed");
        self.prefs
            .save(ROLL_DURATION_KEY, &self.roll_duration_ms)
            .await;
    }

    pub async fn share(&self) -> ShareOutcome {
        let Some(target) = self.capabilities.share_target() else {
            return ShareOutcome::Unavailable;
        };
        let Some(prompt) = self.current_prompt() else {
            return ShareOutcome::NothingToShare;
        };

        let payload = SharePayload::for_prompt(prompt);
        match target.share(&payload).await {
            Ok(()) => {
                info!("session: prompt shared");
                ShareOutcome::Shared
            }
            Err(err) => {
                error!(error = %err, "session: error sharing prompt");
                ShareOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
