pub mod credential_store;
pub mod fixture;
pub mod paths;
pub mod settings_service;
pub mod storage;

pub use crate::credential_store::FileTokenStore;
pub use crate::fixture::{FixtureAuthService, FixturePumpService};
pub use crate::paths::PumpMasterPaths;
pub use crate::settings_service::SettingsService;
pub use crate::storage::TomlFileStore;
