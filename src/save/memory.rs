//! In-memory profile storage

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use super::profile::{ProfileStorage, UserProfile};
use crate::error::StorageError;

/// Profiles kept in a map, with switchable save failures
#[derive(Debug, Default)]
pub struct MemoryProfileStorage {
    profiles: Mutex<HashMap<String, UserProfile>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryProfileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one profile
    pub fn with_profile(profile: UserProfile) -> Self {
        let storage = Self::new();
        storage.profiles.lock().insert(profile.id.clone(), profile);
        storage
    }

    /// Make subsequent saves fail (or succeed again)
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn get(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.lock().get(user_id).cloned()
    }
}

impl ProfileStorage for MemoryProfileStorage {
    fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StorageError> {
        Ok(self.get(user_id))
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("saves disabled".to_string()));
        }
        self.profiles.lock().insert(profile.id.clone(), profile.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
