use std::{env, fs};

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Scoring-service endpoint configuration, resolved once at startup and
/// passed into the client by parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_url: Option<String>,
}

/// Defaults, then an optional `client.toml` in the working directory, then
/// environment overrides.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("client.toml") {
        if let Ok(file_cfg) = toml::from_str::<FileConfig>(&raw) {
            if let Some(v) = file_cfg.api_url {
                settings.api_url = v;
            }
        }
    }

    if let Ok(v) = env::var("CHD_API_URL") {
        settings.api_url = v;
    }
    if let Ok(v) = env::var("APP__API_URL") {
        settings.api_url = v;
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so the env/cwd mutations cannot race each other.
    #[test]
    fn settings_layer_default_file_and_env() {
        env::remove_var("CHD_API_URL");
        env::remove_var("APP__API_URL");

        assert_eq!(load_settings().api_url, DEFAULT_API_URL);

        let suffix = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let temp_root = env::temp_dir().join(format!("chd_client_config_test_{suffix}"));
        fs::create_dir_all(&temp_root).expect("temp root");
        let original_dir = env::current_dir().expect("cwd");
        env::set_current_dir(&temp_root).expect("set cwd");

        fs::write("client.toml", "api_url = \"http://scoring.internal:9000\"\n")
            .expect("write config");
        assert_eq!(load_settings().api_url, "http://scoring.internal:9000");

        env::set_var("CHD_API_URL", "http://from-env:7000");
        assert_eq!(load_settings().api_url, "http://from-env:7000");

        env::set_var("APP__API_URL", "http://from-app-env:7100");
        assert_eq!(load_settings().api_url, "http://from-app-env:7100");

        env::remove_var("CHD_API_URL");
        env::remove_var("APP__API_URL");
        env::set_current_dir(original_dir).expect("restore cwd");
        fs::remove_dir_all(temp_root).expect("cleanup");
    }
}
