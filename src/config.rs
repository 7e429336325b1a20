use crate::error::AppError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

const ENV_PREFIX: &str = "NUSANTARA_LENS";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub log_level: String,
    /// Wall-clock budget the transport layer races each analysis against.
    pub analysis_deadline_secs: u64,
    pub capability_timeout_ms: Option<u64>,
    pub max_concurrent_analyses: Option<usize>,
    /// Issue vision recognition and text reading at the same time.
    pub concurrent_capture: bool,
    pub progress_buffer_size: usize,
    pub synthesis: SynthesisConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            analysis_deadline_secs: 15,
            capability_timeout_ms: None,
            max_concurrent_analyses: None,
            concurrent_capture: true,
            progress_buffer_size: 16,
            synthesis: SynthesisConfig::default(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.3,
        }
    }
}

impl Configuration {
    /// Layer an optional TOML file and `NUSANTARA_LENS__*` environment variables over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        let configuration: Configuration = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        configuration
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid configuration: {}", e)))?;
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.log_level.parse::<Level>().is_err() {
            return Err(format!("Unknown log level '{}'", self.log_level));
        }

        if self.analysis_deadline_secs == 0 {
            return Err("Analysis deadline must be greater than 0".to_string());
        }

        if self.capability_timeout_ms == Some(0) {
            return Err("Capability timeout must be greater than 0".to_string());
        }

        if self.max_concurrent_analyses == Some(0) {
            return Err("Max concurrent analyses must be greater than 0".to_string());
        }

        if self.progress_buffer_size == 0 {
            return Err("Progress buffer size must be greater than 0".to_string());
        }

        if self.synthesis.max_tokens == 0 {
            return Err("Synthesis max tokens must be greater than 0".to_string());
        }

        if !(0.0..=2.0).contains(&self.synthesis.temperature) {
            return Err("Synthesis temperature must be between 0.0 and 2.0".to_string());
        }

        Ok(())
    }

    /// Falls back to INFO only for configurations that skipped `validate()`.
    pub fn log_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }

    pub fn analysis_deadline(&self) -> Duration {
        Duration::from_secs(self.analysis_deadline_secs)
    }

    pub fn capability_timeout(&self) -> Option<Duration> {
        self.capability_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let configuration = Configuration::default();
        assert!(configuration.validate().is_ok());
        assert_eq!(configuration.analysis_deadline(), Duration::from_secs(15));
        assert_eq!(configuration.capability_timeout(), None);
        assert_eq!(configuration.synthesis.max_tokens, 1000);
    }

    #[test]
    fn zero_deadline_is_rejected() {
        let configuration = Configuration {
            analysis_deadline_secs: 0,
            ..Configuration::default()
        };
        assert!(configuration.validate().is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let configuration = Configuration {
            log_level: "chatty".to_string(),
            ..Configuration::default()
        };
        assert!(configuration.validate().unwrap_err().contains("chatty"));

        let configuration = Configuration {
            log_level: "DEBUG".to_string(),
            ..Configuration::default()
        };
        assert!(configuration.validate().is_ok());
        assert_eq!(configuration.log_level(), Level::DEBUG);
    }

    #[test]
    fn out_of_range_temperature_is_rejected() {
        let mut configuration = Configuration::default();
        configuration.synthesis.temperature = 3.5;
        assert!(configuration.validate().is_err());
    }

    #[test]
    fn loads_overrides_from_toml_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "analysis_deadline_secs = 30\ncapability_timeout_ms = 4000\nconcurrent_capture = false\n\n[synthesis]\ntemperature = 0.1"
        )
        .unwrap();

        let configuration = Configuration::load(Some(file.path())).unwrap();
        assert_eq!(configuration.analysis_deadline_secs, 30);
        assert_eq!(
            configuration.capability_timeout(),
            Some(Duration::from_millis(4000))
        );
        assert!(!configuration.concurrent_capture);
        assert_eq!(configuration.synthesis.max_tokens, 1000);
        assert!((configuration.synthesis.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn invalid_file_values_fail_validation() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "progress_buffer_size = 0").unwrap();

        let err = Configuration::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
