use std::path::Path;

use metscalc_core::models::derived::ADULT_AGE_YEARS;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Age sent to the risk-score model when no birth date was entered. The
/// severity model is normed on adults and needs some age; 25 places the
/// subject in the adult population without implying a specific age band.
pub const DEFAULT_UNKNOWN_AGE: u16 = 25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Whole years from which a subject takes the adult branch.
    #[serde(default = "default_adult_age_years")]
    pub adult_age_years: u16,
    #[serde(default)]
    pub unknown_age: UnknownAgePolicy,
}

fn default_adult_age_years() -> u16 {
    ADULT_AGE_YEARS
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            adult_age_years: ADULT_AGE_YEARS,
            unknown_age: UnknownAgePolicy::default(),
        }
    }
}

/// What to send as `age` when the subject's age is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UnknownAgePolicy {
    /// Score as an adult of the given age.
    AssumeAdult { age: u16 },
    /// Send no age; only for scorers that accept a missing age.
    PassThrough,
}

impl Default for UnknownAgePolicy {
    fn default() -> Self {
        Self::AssumeAdult {
            age: DEFAULT_UNKNOWN_AGE,
        }
    }
}

impl UnknownAgePolicy {
    pub fn age(&self) -> Option<u16> {
        match self {
            Self::AssumeAdult { age } => Some(*age),
            Self::PassThrough => None,
        }
    }
}

impl CalculatorConfig {
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let migrated = migrate(json, on_disk_version)?;
        let config: CalculatorConfig = serde_json::from_value(migrated)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adult_age_years == 0 {
            return Err(ConfigError::Invalid(
                "adult_age_years must be at least 1".to_string(),
            ));
        }
        if let UnknownAgePolicy::AssumeAdult { age } = self.unknown_age
            && age < self.adult_age_years
        {
            return Err(ConfigError::Invalid(format!(
                "unknown_age.age {age} is below adult_age_years {}",
                self.adult_age_years
            )));
        }
        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<CalculatorConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = CalculatorConfig::from_json(&contents)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(
    mut json: serde_json::Value,
    from_version: u64,
) -> Result<serde_json::Value, ConfigError> {
    if from_version > u64::from(CURRENT_VERSION) {
        return Err(ConfigError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: stamp the version; missing fields take their serde defaults
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1");
    }

    Ok(json)
}

pub fn save_config(config: &CalculatorConfig, path: &Path) -> Result<(), ConfigError> {
    let write_err = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(write_err)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes()).map_err(write_err)?;
    std::fs::rename(&tmp_path, path).map_err(write_err)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Write the default config to `path`. An existing file is left alone unless
/// `force` is set.
pub fn init_config(path: &Path, force: bool) -> Result<CalculatorConfig, ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let config = CalculatorConfig::default();
    save_config(&config, path)?;
    Ok(config)
}
