//! Portal configuration loading from config.toml
//!
//! The file is optional. It sets the list limit and default announcement
//! language, and can list provinces and priests to seed the directory with on
//! first run.

use crate::core::{
    announcement::{AnnouncementForm, Lang},
    directory,
    ledger::DEFAULT_LIST_LIMIT,
};
use crate::errors::{Error, Result};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Environment variable naming the config file.
pub const CONFIG_PATH_VAR: &str = "PORTAL_CONFIG";
/// Config file used when `PORTAL_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Maximum rows returned by ledger list queries
    #[serde(default = "default_list_limit")]
    pub list_limit: u64,
    /// Language code preselected on new announcements
    #[serde(default = "default_lang")]
    pub default_lang: String,
    /// Provinces to create if missing
    #[serde(default)]
    pub provinces: Vec<ProvinceSeed>,
    /// Priests to create if missing
    #[serde(default)]
    pub priests: Vec<PriestSeed>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            default_lang: default_lang(),
            provinces: Vec::new(),
            priests: Vec::new(),
        }
    }
}

impl PortalConfig {
    /// The configured default language, checked against the supported set.
    pub fn lang(&self) -> Result<Lang> {
        self.default_lang.parse().map_err(|_| Error::Config {
            message: format!("Unsupported default_lang '{}'", self.default_lang),
        })
    }

    /// A blank announcement form with the configured language preselected.
    pub fn announcement_form(&self) -> Result<AnnouncementForm> {
        Ok(AnnouncementForm {
            lang: self.lang()?.code().to_string(),
            ..Default::default()
        })
    }
}

/// A province entry under `[[provinces]]`
#[derive(Debug, Clone, Deserialize)]
pub struct ProvinceSeed {
    pub name: String,
    #[serde(default)]
    pub country: String,
}

/// A priest entry under `[[priests]]`
#[derive(Debug, Clone, Deserialize)]
pub struct PriestSeed {
    pub name: String,
    pub email: Option<String>,
    /// Name of a province, seeded or already stored
    pub province: Option<String>,
}

const fn default_list_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

fn default_lang() -> String {
    "en".to_string()
}

/// Loads portal configuration from a TOML file
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read or is not valid TOML
/// for [`PortalConfig`].
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PortalConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    let config: PortalConfig = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file: {e}"),
    })?;
    config.lang()?;
    Ok(config)
}

/// Loads the file named by `PORTAL_CONFIG`, or `config.toml`.
///
/// A missing default file yields the default configuration; a missing file
/// that was named explicitly is an error.
pub fn load_default_config() -> Result<PortalConfig> {
    match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => load_config(path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        Err(_) => {
            info!("No {DEFAULT_CONFIG_PATH} found, using defaults");
            Ok(PortalConfig::default())
        }
    }
}

/// Creates the configured provinces and priests that are not stored yet.
///
/// Existing rows are matched by name and left untouched. Returns how many rows
/// were created.
pub async fn seed_directory(db: &DatabaseConnection, config: &PortalConfig) -> Result<usize> {
    let mut created = 0;

    for seed in &config.provinces {
        if directory::get_province_by_name(db, &seed.name).await?.is_none() {
            directory::create_province(db, &seed.name, &seed.country).await?;
            created += 1;
        }
    }

    for seed in &config.priests {
        if directory::get_priest_by_name(db, &seed.name).await?.is_some() {
            continue;
        }

        let province_id = match seed.province.as_deref() {
            Some(name) => {
                let province = directory::get_province_by_name(db, name).await?;
                if province.is_none() {
                    warn!(priest = %seed.name, province = name, "Unknown province in seed");
                }
                province.map(|p| p.id)
            }
            None => None,
        };

        directory::create_priest(db, &seed.name, seed.email.as_deref(), province_id).await?;
        created += 1;
    }

    info!(created, "Directory seeded");
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{clock_at, setup_test_db};

    const SAMPLE: &str = r#"
        list_limit = 25
        default_lang = "ml"

        [[provinces]]
        name = "Kerala"
        country = "India"

        [[priests]]
        name = "Fr. Joseph"
        email = "joseph@example.org"
        province = "Kerala"

        [[priests]]
        name = "Fr. Thomas"
    "#;

    #[test]
    fn test_parse_portal_config() {
        let config: PortalConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.list_limit, 25);
        assert_eq!(config.lang().unwrap(), Lang::Malayalam);
        assert_eq!(config.provinces.len(), 1);
        assert_eq!(config.priests.len(), 2);
        assert_eq!(config.priests[0].province.as_deref(), Some("Kerala"));
        assert_eq!(config.priests[1].email, None);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: PortalConfig = toml::from_str("").unwrap();
        assert_eq!(config.list_limit, DEFAULT_LIST_LIMIT);
        assert_eq!(config.lang().unwrap(), Lang::English);
        assert!(config.priests.is_empty());
    }

    #[test]
    fn test_load_config_errors() {
        let missing = load_config("does/not/exist.toml");
        assert!(matches!(missing, Err(Error::Config { .. })));

        let config: PortalConfig = toml::from_str(r#"default_lang = "fr""#).unwrap();
        assert!(matches!(config.lang(), Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_announcement_form_uses_default_lang() -> Result<()> {
        use crate::core::announcement::{self, Pool};

        let db = setup_test_db().await?;
        let config: PortalConfig = toml::from_str(SAMPLE).unwrap();

        let form = config.announcement_form()?;
        assert_eq!(form.lang, "ml");

        let view = announcement::create(
            &db,
            &clock_at(2024, 1, 1),
            Pool::Common,
            AnnouncementForm {
                title: "Clergy retreat".to_string(),
                ..form
            },
        )
        .await?;
        assert_eq!(view.announcement.lang, "ml");

        let fallback = PortalConfig::default().announcement_form()?;
        assert_eq!(fallback.lang, "en");
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_directory_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        let config: PortalConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(seed_directory(&db, &config).await?, 3);
        assert_eq!(seed_directory(&db, &config).await?, 0);

        let joseph = directory::get_priest_by_name(&db, "Fr. Joseph").await?.unwrap();
        let kerala = directory::get_province_by_name(&db, "Kerala").await?.unwrap();
        assert_eq!(joseph.province_id, Some(kerala.id));
        assert_eq!(joseph.email.as_deref(), Some("joseph@example.org"));
        Ok(())
    }
}
