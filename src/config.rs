use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/history.json";
pub const DEFAULT_SOP_PATH: &str = "output/content.json";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub sop_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            port: non_empty("PORT")
                .and_then(|value| value.trim().parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            data_path: non_empty("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            sop_path: non_empty("SOP_CONTEXT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SOP_PATH)),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_endpoint: non_empty("GEMINI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.sop_path, PathBuf::from(DEFAULT_SOP_PATH));
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
    }

    #[test]
    fn values_are_read_and_blanks_ignored() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9090"),
            ("APP_DATA_PATH", "/tmp/history.json"),
            ("GEMINI_API_KEY", "  "),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(|value| value.to_string()));
        assert_eq!(config.port, 9090);
        assert_eq!(config.data_path, PathBuf::from("/tmp/history.json"));
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, "gemini-1.5-pro");
    }

    #[test]
    fn bad_port_falls_back() {
        let config = Config::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
