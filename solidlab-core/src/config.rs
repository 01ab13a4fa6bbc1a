/// Persisted application preferences
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Application preferences.
///
/// Missing fields in stored JSON fall back to the defaults, so a partial
/// document deserializes into a complete config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub theme: Theme,
    pub language: String,
    pub auto_rotate: bool,
    pub show_grid: bool,
    pub version: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: "zh-CN".to_string(),
            auto_rotate: true,
            show_grid: true,
            version: "1.0.0".to_string(),
        }
    }
}

/// A partial update to [`AppConfig`]; unset fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfigPatch {
    pub theme: Option<Theme>,
    pub language: Option<String>,
    pub auto_rotate: Option<bool>,
    pub show_grid: Option<bool>,
}

impl AppConfig {
    pub fn apply(&mut self, patch: AppConfigPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(language) = patch.language {
            self.language = language;
        }
        if let Some(auto_rotate) = patch.auto_rotate {
            self.auto_rotate = auto_rotate;
        }
        if let Some(show_grid) = patch.show_grid {
            self.show_grid = show_grid;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"theme":"dark","showGrid":false}"#).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert!(!config.show_grid);
        assert!(config.auto_rotate);
        assert_eq!(config.version, "1.0.0");
    }

    #[test]
    fn test_patch_only_touches_set_fields() {
        let mut config = AppConfig::default();
        config.apply(AppConfigPatch {
            auto_rotate: Some(false),
            ..Default::default()
        });
        assert!(!config.auto_rotate);
        assert_eq!(config.theme, Theme::Light);
    }
}
