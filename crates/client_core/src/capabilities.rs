//! Optional platform capabilities, resolved once at startup.

use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{SharePayload, VibratePattern};

pub const ROLL_START_PULSE_MS: u32 = 100;
pub const SETTLE_PULSES_MS: [u32; 2] = [50, 50];
pub const FAVORITE_PULSE_MS: u32 = 20;

/// Fire-and-forget vibration.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, pattern: &VibratePattern);
}

#[async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, payload: &SharePayload) -> Result<()>;
}

/// Whatever the host platform offered at startup. A missing capability is
/// never probed again.
#[derive(Default)]
pub struct Capabilities {
    haptics: Option<Box<dyn Haptics>>,
    share: Option<Box<dyn ShareTarget>>,
}

impl Capabilities {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Some(Box::new(haptics));
        self
    }

    pub fn with_share(mut self, share: impl ShareTarget + 'static) -> Self {
        self.share = Some(Box::new(share));
        self
    }

    pub fn has_haptics(&self) -> bool {
        self.haptics.is_some()
    }

    pub fn can_share(&self) -> bool {
        self.share.is_some()
    }

    pub(crate) fn vibrate(&self, pattern: VibratePattern) {
        if let Some(haptics) = &self.haptics {
            haptics.vibrate(&pattern);
        }
    }

    pub(crate) fn share_target(&self) -> Option<&dyn ShareTarget> {
        self.share.as_deref()
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("haptics", &self.has_haptics())
            .field("share", &self.can_share())
            .finish()
    }
}
