//! Progress store
//!
//! Sole writer of the current `UserProfile`. Readers get clones, so they
//! never see a half-applied update.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::error::{ProgressError, StorageError};
use crate::progression::ProfileUpdate;
use crate::save::{ProfileStorage, UserProfile};

#[derive(Debug)]
struct StoreState {
    profile: UserProfile,
    /// Bumped on every applied update
    revision: u64,
}

/// Result of applying an update
#[derive(Debug)]
pub struct AppliedUpdate {
    pub profile: UserProfile,
    /// Set when the new state could not be saved; memory still holds it
    pub persist_error: Option<StorageError>,
}

/// Holds the current profile and hands changes to storage
pub struct ProgressStore {
    state: RwLock<StoreState>,
    storage: Arc<dyn ProfileStorage>,
    /// Held across apply and save so saves land in revision order
    writer: Mutex<()>,
}

impl ProgressStore {
    pub fn new(profile: UserProfile, storage: Arc<dyn ProfileStorage>) -> Self {
        Self {
            state: RwLock::new(StoreState { profile, revision: 0 }),
            storage,
            writer: Mutex::new(()),
        }
    }

    /// Load the user's profile, or start a fresh one if none is stored
    pub fn open(storage: Arc<dyn ProfileStorage>, user_id: &str) -> Result<Self, StorageError> {
        let profile = match storage.load_profile(user_id)? {
            Some(profile) => profile,
            None => {
                log::info!("Creating new profile for {}", user_id);
                UserProfile::new(user_id)
            }
        };
        Ok(Self::new(profile, storage))
    }

    pub fn current(&self) -> UserProfile {
        self.state.read().profile.clone()
    }

    /// Current profile together with its revision
    pub fn snapshot(&self) -> (UserProfile, u64) {
        let state = self.state.read();
        (state.profile.clone(), state.revision)
    }

    pub fn revision(&self) -> u64 {
        self.state.read().revision
    }

    /// Install an update and request its persistence.
    ///
    /// The update must have been computed against the current revision.
    /// Save failures do not roll back the in-memory state.
    pub fn apply_update(&self, update: &ProfileUpdate) -> Result<AppliedUpdate, ProgressError> {
        let _writer = self.writer.lock();

        let profile = {
            let mut state = self.state.write();

            if update.user_id != state.profile.id {
                return Err(ProgressError::ProfileMismatch {
                    update: update.user_id.clone(),
                    store: state.profile.id.clone(),
                });
            }
            if update.base_revision != state.revision {
                return Err(ProgressError::StaleUpdate {
                    expected: update.base_revision,
                    found: state.revision,
                });
            }
            if update.total_xp < state.profile.total_xp {
                return Err(ProgressError::XpDecrease {
                    current: state.profile.total_xp,
                    proposed: update.total_xp,
                });
            }

            state.profile = update.applied_to(&state.profile);
            state.revision += 1;
            state.profile.clone()
        };

        let persist_error = match self.storage.save_profile(&profile) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Progress for {} kept in memory only: {}", profile.id, e);
                Some(e)
            }
        };

        Ok(AppliedUpdate {
            profile,
            persist_error,
        })
    }
}
