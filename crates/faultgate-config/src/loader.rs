use std::path::Path;

use crate::Config;

const STATUS_RANGE: std::ops::RangeInclusive<u16> = 100..=999;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Config::from_toml`] fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config = Self::from_toml(&raw)?;
        tracing::debug!(path = %path.display(), mappings = config.error_handling.mappings.len(), "configuration loaded");

        Ok(config)
    }

    /// Parse configuration text
    ///
    /// Expands `{{ env.VAR }}` placeholders, deserializes, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, TOML parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a status code is outside the HTTP range, a fault
    /// kind name is blank, or the logging options are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_error_handling()?;
        self.logging.validate()?;
        Ok(())
    }

    fn validate_error_handling(&self) -> anyhow::Result<()> {
        let error_handling = &self.error_handling;

        if !STATUS_RANGE.contains(&error_handling.default_status_code) {
            anyhow::bail!(
                "error_handling.default_status_code must be between 100 and 999, got {}",
                error_handling.default_status_code
            );
        }

        for (kind, code) in &error_handling.mappings {
            if kind.trim().is_empty() {
                anyhow::bail!("error_handling.mappings contains an empty fault kind");
            }

            if !STATUS_RANGE.contains(code) {
                anyhow::bail!("status code for fault kind '{kind}' must be between 100 and 999, got {code}");
            }
        }

        Ok(())
    }
}
