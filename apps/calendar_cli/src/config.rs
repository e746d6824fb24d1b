use std::{fs, path::PathBuf};

use calendar_core::WeekStart;
use tracing::warn;

pub const CONFIG_FILE: &str = "calendar.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub releases_path: Option<PathBuf>,
    pub week_start: WeekStart,
    pub user_id: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            releases_path: None,
            week_start: WeekStart::Sunday,
            user_id: 1,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let file_cfg = match toml::from_str::<toml::Table>(raw) {
        Ok(table) => table,
        Err(err) => {
            warn!(file = CONFIG_FILE, error = %err, "ignoring malformed config file");
            return;
        }
    };

    if let Some(v) = file_cfg.get("releases_path").and_then(toml::Value::as_str) {
        settings.releases_path = Some(PathBuf::from(v));
    }
    if let Some(v) = file_cfg.get("week_start").and_then(toml::Value::as_str) {
        set_week_start(settings, v);
    }
    if let Some(v) = file_cfg.get("user_id").and_then(toml::Value::as_integer) {
        settings.user_id = v;
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("CALENDAR_RELEASES_PATH") {
        settings.releases_path = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("APP__RELEASES_PATH") {
        settings.releases_path = Some(PathBuf::from(v));
    }

    if let Some(v) = lookup("APP__WEEK_START") {
        set_week_start(settings, &v);
    }

    if let Some(v) = lookup("APP__USER_ID") {
        match v.parse::<i64>() {
            Ok(parsed) => settings.user_id = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__USER_ID"),
        }
    }
}

fn set_week_start(settings: &mut Settings, value: &str) {
    match WeekStart::parse(value) {
        Some(week_start) => settings.week_start = week_start,
        None => warn!(value, "ignoring unknown week start"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
