//! Goal settings persistence
//!
//! The hosted client kept settings in browser storage when signed out and
//! in the backend when signed in, with an ad hoc one-time migration. Here
//! that becomes an explicit [`SettingsStore`] trait with two
//! implementations; the caller picks one and passes it in, there is no
//! ambient global lookup.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{GoalConfig, GoalPeriod};

/// Persisted user settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Spending target for the goal window
    pub target: f64,
    pub period: GoalPeriod,
    /// First day of the goal window
    pub start_date: NaiveDate,
    /// Preferred summary window on the ledger view ("week", "month")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_period: Option<String>,
}

impl UserSettings {
    /// Defaults matching the hosted client: $5000 over a month from today
    pub fn default_for(today: NaiveDate) -> Self {
        Self {
            target: 5000.0,
            period: GoalPeriod::Month,
            start_date: today,
            summary_period: None,
        }
    }

    pub fn goal_config(&self) -> GoalConfig {
        GoalConfig {
            target: self.target,
            period: self.period,
            start_date: self.start_date,
        }
    }
}

/// Where settings live; selected by the caller, not by ambient state
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load settings; `None` when nothing has been saved yet
    async fn load(&self) -> Result<Option<UserSettings>>;

    /// Save (create or replace) settings
    async fn save(&self, settings: &UserSettings) -> Result<()>;
}

/// Settings in a TOML file under the data dir
pub struct LocalSettingsStore {
    path: PathBuf,
}

impl LocalSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<data dir>/settings.toml`
    pub fn default_path() -> Option<Self> {
        crate::prompts::data_dir().map(|d| Self::new(d.join("settings.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove the local file (after a successful migration)
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsStore for LocalSettingsStore {
    async fn load(&self) -> Result<Option<UserSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let settings = toml::from_str(&raw)
            .map_err(|e| Error::Settings(format!("Invalid settings file: {}", e)))?;
        Ok(Some(settings))
    }

    async fn save(&self, settings: &UserSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(settings)
            .map_err(|e| Error::Settings(format!("Failed to serialize settings: {}", e)))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Settings in the hosted backend, one row per user
pub struct RemoteSettingsStore {
    http_client: reqwest::Client,
    base_url: String,
    user_id: String,
    token: Option<String>,
}

impl RemoteSettingsStore {
    pub fn new(base_url: &str, user_id: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id: user_id.to_string(),
            token: None,
        }
    }

    pub fn with_token(base_url: &str, user_id: &str, token: &str) -> Self {
        let mut store = Self::new(base_url, user_id);
        store.token = Some(token.to_string());
        store
    }

    /// Create from environment variables
    ///
    /// Required: `WALLET_BACKEND_URL`, `WALLET_USER_ID`
    /// Optional: `WALLET_BACKEND_TOKEN`
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("WALLET_BACKEND_URL").ok()?;
        let user_id = std::env::var("WALLET_USER_ID").ok()?;
        let mut store = Self::new(&base_url, &user_id);
        store.token = std::env::var("WALLET_BACKEND_TOKEN").ok();
        Some(store)
    }

    fn settings_url(&self) -> String {
        format!("{}/api/settings/{}", self.base_url, self.user_id)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token {
            Some(ref token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }
}

#[async_trait]
impl SettingsStore for RemoteSettingsStore {
    async fn load(&self) -> Result<Option<UserSettings>> {
        let response = self
            .authorize(self.http_client.get(self.settings_url()))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::Settings(format!(
                "Backend error loading settings: {}",
                response.status()
            )));
        }

        Ok(Some(response.json().await?))
    }

    async fn save(&self, settings: &UserSettings) -> Result<()> {
        let response = self
            .authorize(self.http_client.put(self.settings_url()))
            .json(settings)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Settings(format!(
                "Backend error saving settings: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// One-time migration of locally stored settings to a remote store
///
/// No-op when the destination already has settings or the local file does
/// not exist. The local file is removed only after a successful save.
pub async fn migrate_settings<S: SettingsStore>(
    local: &LocalSettingsStore,
    destination: &S,
) -> Result<bool> {
    if destination.load().await?.is_some() {
        return Ok(false);
    }
    let Some(settings) = local.load().await? else {
        return Ok(false);
    };

    destination.save(&settings).await?;
    local.clear()?;
    info!("migrated local settings to remote store");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserSettings {
        UserSettings {
            target: 700.0,
            period: GoalPeriod::Week,
            start_date: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            summary_period: Some("week".to_string()),
        }
    }

    #[tokio::test]
    async fn local_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSettingsStore::new(dir.path().join("settings.toml"));

        assert_eq!(store.load().await.unwrap(), None);
        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(sample()));
    }

    #[tokio::test]
    async fn local_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalSettingsStore::new(dir.path().join("nested/deep/settings.toml"));
        store.save(&sample()).await.unwrap();
        assert!(store.exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_settings_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "not = [valid").unwrap();
        let store = LocalSettingsStore::new(path);
        assert!(matches!(store.load().await, Err(Error::Settings(_))));
    }

    #[tokio::test]
    async fn migration_moves_settings_once() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalSettingsStore::new(dir.path().join("local.toml"));
        let destination = LocalSettingsStore::new(dir.path().join("remote.toml"));

        local.save(&sample()).await.unwrap();

        assert!(migrate_settings(&local, &destination).await.unwrap());
        assert_eq!(destination.load().await.unwrap(), Some(sample()));
        assert!(!local.exists());

        // Second run is a no-op
        assert!(!migrate_settings(&local, &destination).await.unwrap());
    }

    #[tokio::test]
    async fn migration_never_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalSettingsStore::new(dir.path().join("local.toml"));
        let destination = LocalSettingsStore::new(dir.path().join("remote.toml"));

        let mut remote_settings = sample();
        remote_settings.target = 9999.0;
        destination.save(&remote_settings).await.unwrap();
        local.save(&sample()).await.unwrap();

        assert!(!migrate_settings(&local, &destination).await.unwrap());
        assert_eq!(
            destination.load().await.unwrap().unwrap().target,
            9999.0
        );
        // Local file stays put when nothing migrated
        assert!(local.exists());
    }

    #[test]
    fn defaults_match_hosted_client() {
        let today = NaiveDate::from_ymd_opt(2024, 11, 7).unwrap();
        let settings = UserSettings::default_for(today);
        assert_eq!(settings.target, 5000.0);
        assert_eq!(settings.period, GoalPeriod::Month);
        assert_eq!(settings.goal_config().start_date, today);
    }
}
