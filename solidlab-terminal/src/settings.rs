/// Process settings read from the environment
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "SOLIDLAB_DATA_DIR";
pub const LOG_VAR: &str = "SOLIDLAB_LOG";
pub const FPS_VAR: &str = "SOLIDLAB_FPS";

const DEFAULT_DATA_DIR: &str = ".solidlab";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_FPS: u32 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding the stored entries and the log file
    pub data_dir: PathBuf,
    pub log_level: String,
    pub fps: u32,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let log_level = lookup(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let fps = lookup(FPS_VAR)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|fps| (1..=240).contains(fps))
            .unwrap_or(DEFAULT_FPS);

        Self {
            data_dir,
            log_level,
            fps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let settings = settings(&[]);
        assert_eq!(settings.data_dir, PathBuf::from(".solidlab"));
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.fps, 30);
    }

    #[test]
    fn test_overrides() {
        let settings = settings(&[
            (DATA_DIR_VAR, "/tmp/solids"),
            (LOG_VAR, "solidlab_core=debug"),
            (FPS_VAR, "60"),
        ]);
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/solids"));
        assert_eq!(settings.log_level, "solidlab_core=debug");
        assert_eq!(settings.fps, 60);
    }

    #[test]
    fn test_bad_fps_falls_back() {
        assert_eq!(settings(&[(FPS_VAR, "fast")]).fps, 30);
        assert_eq!(settings(&[(FPS_VAR, "0")]).fps, 30);
    }
}
