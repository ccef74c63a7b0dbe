use crate::settings::Settings;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub settings_path: Option<PathBuf>,
    pub quiet: bool,
}

impl Config {
    pub fn resolved_settings_path(&self) -> PathBuf {
        self.settings_path
            .clone()
            .unwrap_or_else(Settings::default_path)
    }
}
