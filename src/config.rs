//! Engine configuration.
//!
//! Re-exports the index selector from `nearby-types` for convenience.
use serde::de::Error;

pub use nearby_types::config::SpatialIndexKind;

/// Build and query configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub spatial_index: SpatialIndexKind,

    /// Reject NaN and infinite coordinates in records and queries
    #[serde(default = "Config::default_validate_coordinates")]
    pub validate_coordinates: bool,

    /// Upper bound on a query's target count
    #[serde(default)]
    pub max_target_count: Option<usize>,
}

impl Config {
    const fn default_validate_coordinates() -> bool {
        true
    }

    pub fn with_spatial_index(mut self, kind: SpatialIndexKind) -> Self {
        self.spatial_index = kind;
        self
    }

    pub fn with_validate_coordinates(mut self, validate: bool) -> Self {
        self.validate_coordinates = validate;
        self
    }

    pub fn with_max_target_count(mut self, max: usize) -> Self {
        assert!(max > 0, "Max target count must be greater than zero");

        if max > 10_000_000 {
            log::warn!(
                "Max target count of {} is very large; a single query may allocate \
                that many IDs.",
                max
            );
        }

        self.max_target_count = Some(max);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(max) = self.max_target_count
            && max == 0
        {
            return Err("Max target count must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load a configuration file, picking the format from its extension.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        use crate::error::NearbyError;

        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                Config::from_json(&text).map_err(|e| NearbyError::Config(e.to_string()))
            }
            #[cfg(feature = "toml")]
            Some("toml") => {
                Config::from_toml(&text).map_err(|e| NearbyError::Config(e.to_string()))
            }
            other => Err(NearbyError::Config(format!(
                "unsupported config format {:?} for {}",
                other,
                path.display()
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spatial_index: SpatialIndexKind::default(),
            validate_coordinates: Self::default_validate_coordinates(),
            max_target_count: None,
        }
    }
}
