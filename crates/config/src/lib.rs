use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    pub host: String,
    pub port: u16,
    /// Maximum multipart upload size in bytes (audio recordings).
    pub max_upload_bytes: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

/// MongoDB connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "pronuncia".to_string(),
        }
    }
}

/// JWT auth settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me".to_string(),
            token_ttl_secs: 24 * 3600,
        }
    }
}

/// Settings for the pronunciation assessment engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentSettings {
    /// ASR backend to use: "local_whisper" is the only built-in.
    pub backend: String,
    /// Path to the GGML Whisper model file (for local_whisper).
    pub whisper_model_path: Option<String>,
    /// Language hint for ASR (e.g. "en"). None = auto-detect.
    pub language: Option<String>,
    /// Timeout in seconds for the ffmpeg normalization step.
    pub ffmpeg_timeout_secs: u64,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            backend: "local_whisper".to_string(),
            whisper_model_path: None,
            language: Some("en".to_string()),
            ffmpeg_timeout_secs: 180,
        }
    }
}

/// Top-level application settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub mongo: MongoSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub assessment: AssessmentSettings,
}

impl Settings {
    /// Loads settings from an optional `config/default.toml` file with
    /// `PRONUNCIA_*` environment overrides (e.g. `PRONUNCIA_MONGO__URI`).
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                Environment::with_prefix("PRONUNCIA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert_eq!(settings.http.port, 5000);
        assert_eq!(settings.mongo.database, "pronuncia");
        assert_eq!(settings.assessment.backend, "local_whisper");
        assert!(settings.assessment.ffmpeg_timeout_secs > 0);
    }

    #[test]
    fn deserializes_partial_toml() {
        let settings: Settings = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [mongo]
                uri = "mongodb://db:27017"
                database = "pronuncia_test"

                [assessment]
                backend = "local_whisper"
                language = "en"
                ffmpeg_timeout_secs = 60
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.mongo.database, "pronuncia_test");
        assert_eq!(settings.assessment.ffmpeg_timeout_secs, 60);
        // Sections absent from the file fall back to defaults.
        assert_eq!(settings.http.port, 5000);
    }
}
