//! Provider-level configuration.
//!
//! This module handles loading the Azure DevOps connection settings from
//! multiple sources:
//! - a TOML configuration file following the XDG Base Directory layout
//! - environment variables (`ADO_PROVIDER_ORGANIZATION`, `ADO_PROVIDER_PAT`)
//!
//! Environment variables take precedence over the file. Per-resource
//! configuration is typed and validated separately in [`crate::resources`].

use crate::api::AzureDevOpsClient;
use crate::error::ConfigError;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable naming the organization.
pub const ENV_ORGANIZATION: &str = "ADO_PROVIDER_ORGANIZATION";
/// Environment variable holding the personal access token.
pub const ENV_PAT: &str = "ADO_PROVIDER_PAT";

/// On-disk shape of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    pub organization: Option<String>,
    pub pat: Option<String>,
}

/// Provider connection settings.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Azure DevOps organization name.
    pub organization: Option<String>,
    /// Personal access token for authenticating with Azure DevOps.
    pub pat: Option<String>,
}

impl ProviderConfig {
    /// Default location of the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ado-provider").join("config.toml"))
    }

    /// Loads configuration from the default file location.
    ///
    /// A missing file yields an empty configuration; an unreadable or
    /// malformed file is an error.
    pub fn load_from_file() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(&path)
    }

    /// Loads configuration from a specific file path.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self {
            organization: file.organization,
            pat: file.pat,
        })
    }

    /// Loads configuration from environment variables.
    pub fn load_from_env() -> Self {
        Self {
            organization: std::env::var(ENV_ORGANIZATION).ok(),
            pat: std::env::var(ENV_PAT).ok(),
        }
    }

    /// Merges another configuration over this one; values in `other` win.
    pub fn merge(self, other: Self) -> Self {
        Self {
            organization: other.organization.or(self.organization),
            pat: other.pat.or(self.pat),
        }
    }

    /// Loads from file then overlays environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::load_from_file()?.merge(Self::load_from_env()))
    }

    /// Builds the aggregated client, requiring both settings to be present.
    pub fn into_client(self) -> Result<AzureDevOpsClient, ConfigError> {
        let organization = self
            .organization
            .filter(|o| !o.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired {
                field: "organization".to_string(),
                env_var: ENV_ORGANIZATION.to_string(),
            })?;
        let pat = self
            .pat
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ConfigError::MissingRequired {
                field: "pat".to_string(),
                env_var: ENV_PAT.to_string(),
            })?;

        AzureDevOpsClient::new_with_secret(organization, SecretString::from(pat)).map_err(|e| {
            ConfigError::InvalidValue {
                field: "pat".to_string(),
                message: e.to_string(),
            }
        })
    }
}
