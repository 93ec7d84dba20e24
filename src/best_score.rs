//! Best score record
//!
//! Stored as a decimal string under [`BestScore::STORAGE_KEY`]. Storage
//! trouble is never surfaced: a failed or unreadable load means 0, a failed
//! save keeps the in-memory value for the rest of the session.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;

/// Highest run score seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    pub const STORAGE_KEY: &'static str = "bestScore";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Does a finished run beat the record?
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.value
    }

    /// Take `score` as the new record if it beats the old one
    ///
    /// Returns true if the record changed.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        true
    }

    /// Read the stored record, treating any problem as "no record"
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u32>() {
                Ok(value) => {
                    log::info!("Loaded best score {}", value);
                    Self::new(value)
                }
                Err(_) => {
                    log::warn!("Ignoring unreadable best score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not load best score: {}", e);
                Self::default()
            }
        }
    }

    /// Best-effort write of the record
    pub fn save(&self, store: &mut impl KeyValueStore) {
        match store.set(Self::STORAGE_KEY, &self.value.to_string()) {
            Ok(()) => log::info!("Best score {} saved", self.value),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}
