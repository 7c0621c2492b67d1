//! User profile and its durable storage
//!
//! The profile holds cumulative progress only. Level is derived from XP and
//! is never written to disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::progression::level;

/// Current profile version for compatibility
pub const PROFILE_VERSION: u32 = 1;

/// Persistent user profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Version for compatibility checking
    pub version: u32,
    /// Stable account identifier
    pub id: String,
    /// Cumulative XP, never decreases
    pub total_xp: u64,
    /// Consecutive calendar days with at least one completed exercise
    pub streak_days: u32,
    /// Day of the most recent completed exercise
    pub last_practice_date: Option<NaiveDate>,
    pub exercises_completed: u64,
}

impl UserProfile {
    /// Fresh profile for a first-time user
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            version: PROFILE_VERSION,
            id: id.into(),
            total_xp: 0,
            streak_days: 0,
            last_practice_date: None,
            exercises_completed: 0,
        }
    }

    pub fn level(&self) -> u64 {
        level::level_for_xp(self.total_xp)
    }

    pub fn progress_fraction(&self) -> f64 {
        level::progress_fraction(self.total_xp)
    }
}

/// Durable profile storage
///
/// Implementations retry or queue failed saves themselves; callers only
/// report the error.
pub trait ProfileStorage: Send + Sync {
    fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StorageError>;
    fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError>;
}

// ============================================================================
// JSON file storage
// ============================================================================

/// One pretty-printed JSON file per user
#[derive(Debug, Clone)]
pub struct JsonProfileStorage {
    dir: PathBuf,
}

impl JsonProfileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage under the platform data directory
    pub fn in_data_dir() -> Self {
        Self::new(default_profile_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the profile file path for a user
    pub fn profile_path(&self, user_id: &str) -> Result<PathBuf, StorageError> {
        let valid = !user_id.is_empty()
            && user_id != "."
            && user_id != ".."
            && !user_id.contains(['/', '\\', '\0']);
        if !valid {
            return Err(StorageError::InvalidUserId(user_id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", user_id)))
    }
}

/// Leading fields shared by every profile version
#[derive(Deserialize)]
struct ProfileHeader {
    version: u32,
}

/// Get the default profile directory
pub fn default_profile_dir() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "sightreadpro", "SightReadPro") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("profiles");
        path
    } else {
        PathBuf::from("./profiles")
    }
}

impl ProfileStorage for JsonProfileStorage {
    fn load_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StorageError> {
        let path = self.profile_path(user_id)?;
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;
        // Check the version before trusting the rest of the layout
        let header: ProfileHeader = serde_json::from_str(&data)?;
        if header.version != PROFILE_VERSION {
            return Err(StorageError::VersionMismatch {
                expected: PROFILE_VERSION,
                found: header.version,
            });
        }
        let profile: UserProfile = serde_json::from_str(&data)?;

        log::info!("Profile loaded from {:?}", path);
        Ok(Some(profile))
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let path = self.profile_path(&profile.id)?;
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StorageError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;

        let json = serde_json::to_string_pretty(profile)?;

        // Write beside the target, then swap it in
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;

        log::info!("Profile saved to {:?}", path);
        Ok(())
    }
}
