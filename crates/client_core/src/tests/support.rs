//! Test doubles shared by the client_core unit tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::{SharePayload, VibratePattern};

use crate::{capabilities::Haptics, capabilities::ShareTarget, draw::RandomSource};

/// Replays fixed indices, then keeps returning the last one.
pub struct ScriptedRandom {
    indices: VecDeque<usize>,
    last: usize,
    pub calls: usize,
}

impl ScriptedRandom {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            last: 0,
            calls: 0,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, upper: usize) -> usize {
        self.calls += 1;
        if let Some(next) = self.indices.pop_front() {
            self.last = next;
        }
        self.last % upper
    }
}

#[derive(Clone, Default)]
pub struct RecordingHaptics {
    pub patterns: Arc<Mutex<Vec<VibratePattern>>>,
}

impl RecordingHaptics {
    pub fn recorded(&self) -> Vec<VibratePattern> {
        self.patterns.lock().expect("haptics lock").clone()
    }
}

impl Haptics for RecordingHaptics {
    fn vibrate(&self, pattern: &VibratePattern) {
        self.patterns
            .lock()
            .expect("haptics lock")
            .push(pattern.clone());
    }
}

#[derive(Clone, Default)]
pub struct RecordingShare {
    pub payloads: Arc<Mutex<Vec<SharePayload>>>,
    pub fail_with: Option<String>,
}

impl RecordingShare {
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            payloads: Arc::default(),
            fail_with: Some(message.into()),
        }
    }

    pub fn recorded(&self) -> Vec<SharePayload> {
        self.payloads.lock().expect("share lock").clone()
    }
}

#[async_trait]
impl ShareTarget for RecordingShare {
    async fn share(&self, payload: &SharePayload) -> Result<()> {
        self.payloads
            .lock()
            .expect("share lock")
            .push(payload.clone());
        match &self.fail_with {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(()),
        }
    }
}
