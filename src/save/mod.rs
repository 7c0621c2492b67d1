//! Save/load system
//!
//! Handles profile persistence behind the `ProfileStorage` trait.

pub mod profile;
pub mod memory;

pub use profile::{
    UserProfile, ProfileStorage, JsonProfileStorage,
    default_profile_dir, PROFILE_VERSION,
};

pub use memory::MemoryProfileStorage;
