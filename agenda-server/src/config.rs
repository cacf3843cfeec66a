//! Server settings: defaults, overridden by `agenda.toml`, overridden by
//! environment variables.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bind_addr: String,
    pub database_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".into(),
            database_url: "sqlite://./data/agenda.db".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = std::fs::read_to_string("agenda.toml") {
        match toml::from_str::<Settings>(&raw) {
            Ok(file_cfg) => settings = file_cfg,
            Err(err) => tracing::warn!(%err, "ignoring malformed agenda.toml"),
        }
    }

    if let Ok(v) = std::env::var("AGENDA_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("AGENDA_DATABASE_URL") {
        settings.database_url = v;
    }

    settings
}
