/// Application configuration and secrets
///
/// Config lives in a JSON file under the user's config directory:
/// - Linux: ~/.config/artify/config.json
/// - macOS: ~/Library/Application Support/artify/config.json
/// - Windows: %APPDATA%\artify\config.json
///
/// Environment variables (OPENAI_API_KEY, SUPABASE_URL, SUPABASE_ANON_KEY,
/// ARTIFY_LIBRARY_DIR) override the file. A missing file is a normal
/// first-run state; missing credentials disable the matching actions in the
/// UI rather than failing at startup.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::state::options::GenerationOptions;

/// Default library location, relative to the working directory
const DEFAULT_LIBRARY_DIR: &str = "image_library";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the image generation service
    pub openai_api_key: Option<String>,
    /// Identity provider base URL
    pub supabase_url: Option<String>,
    /// Identity provider anon key
    pub supabase_anon_key: Option<String>,
    /// Override for the library directory
    pub library_dir: Option<PathBuf>,
    /// Last-used generation options, restored at startup
    #[serde(default)]
    pub options: Option<GenerationOptions>,
}

impl AppConfig {
    /// Full path of the config file, when a config directory exists
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("artify").join("config.json"))
    }

    /// Load the config file and apply environment overrides
    pub fn load() -> Self {
        let mut config: Self = Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|content| match serde_json::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("ignoring malformed config file: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        if let Ok(key) = env::var("OPENAI_API_KEY") {
            config.openai_api_key = Some(key);
        }
        if let Ok(url) = env::var("SUPABASE_URL") {
            config.supabase_url = Some(url);
        }
        if let Ok(key) = env::var("SUPABASE_ANON_KEY") {
            config.supabase_anon_key = Some(key);
        }
        if let Ok(dir) = env::var("ARTIFY_LIBRARY_DIR") {
            config.library_dir = Some(PathBuf::from(dir));
        }

        config
    }

    /// Persist the config (pretty-printed JSON)
    pub fn save(&self) -> std::io::Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    /// The library directory, defaulting to ./image_library
    pub fn library_root(&self) -> PathBuf {
        self.library_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LIBRARY_DIR))
    }

    /// Generation API key, when configured
    pub fn generation_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }

    /// Identity provider URL + anon key, when both are configured
    pub fn identity(&self) -> Option<(&str, &str)> {
        match (self.supabase_url.as_deref(), self.supabase_anon_key.as_deref()) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_library_root() {
        let config = AppConfig::default();
        assert_eq!(config.library_root(), PathBuf::from("image_library"));
    }

    #[test]
    fn test_identity_requires_both_values() {
        let mut config = AppConfig::default();
        assert_eq!(config.identity(), None);

        config.supabase_url = Some("https://example.supabase.co".into());
        assert_eq!(config.identity(), None);

        config.supabase_anon_key = Some("anon".into());
        assert_eq!(
            config.identity(),
            Some(("https://example.supabase.co", "anon"))
        );
    }

    #[test]
    fn test_parse_config_file() {
        let json = r#"{
            "openai_api_key": "sk-test",
            "supabase_url": "https://example.supabase.co",
            "supabase_anon_key": "anon",
            "library_dir": "/tmp/results",
            "options": { "background": "opaque", "quality": "low", "size": "auto", "count": 2 }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.generation_key(), Some("sk-test"));
        assert_eq!(config.library_root(), PathBuf::from("/tmp/results"));
        let options = config.options.unwrap();
        assert_eq!(options.count, 2);
        assert_eq!(options.effective_user(), None);
    }
}
