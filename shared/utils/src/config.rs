use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

/// Default download names for exported workbooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub trims_filename: String,
    pub color_bom_filename: String,
    pub measurements_filename: String,
    pub combined_filename: String,
    pub pivot_filename: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = AppConfig::default();

        let config = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("server.max_request_size", defaults.server.max_request_size as i64)?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("export.trims_filename", defaults.export.trims_filename)?
            .set_default("export.color_bom_filename", defaults.export.color_bom_filename)?
            .set_default("export.measurements_filename", defaults.export.measurements_filename)?
            .set_default("export.combined_filename", defaults.export.combined_filename)?
            .set_default("export.pivot_filename", defaults.export.pivot_filename)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Local overrides (gitignored)
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("TRIMFLOW").separator("__"));

        config.build()?.try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_request_size: 16 * 1024 * 1024, // 16MB
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                file_path: None,
            },
            export: ExportConfig {
                trims_filename: "trim_data.xlsx".to_string(),
                color_bom_filename: "color_bom.xlsx".to_string(),
                measurements_filename: "measurements.xlsx".to_string(),
                combined_filename: "specification.xlsx".to_string(),
                pivot_filename: "pivot_data.xlsx".to_string(),
            },
        }
    }
}
