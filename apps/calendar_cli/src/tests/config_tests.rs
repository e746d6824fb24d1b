use super::{apply_env, apply_file, Settings};

use std::{collections::HashMap, path::PathBuf};

use calendar_core::WeekStart;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_use_seed_catalog_and_sunday() {
    let settings = Settings::default();
    assert_eq!(settings.releases_path, None);
    assert_eq!(settings.week_start, WeekStart::Sunday);
    assert_eq!(settings.user_id, 1);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
releases_path = "./data/releases.json"
week_start = "monday"
user_id = 42
"#,
    );
    assert_eq!(
        settings.releases_path,
        Some(PathBuf::from("./data/releases.json"))
    );
    assert_eq!(settings.week_start, WeekStart::Monday);
    assert_eq!(settings.user_id, 42);
}

#[test]
fn malformed_file_and_unknown_values_are_ignored() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "week_start = ");
    assert_eq!(settings, Settings::default());

    apply_file(&mut settings, "week_start = \"friday\"\nuser_id = \"seven\"");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("CALENDAR_RELEASES_PATH", "legacy.json"),
            ("APP__RELEASES_PATH", "current.json"),
            ("APP__WEEK_START", "Mon"),
            ("APP__USER_ID", "9"),
        ]),
    );
    assert_eq!(settings.releases_path, Some(PathBuf::from("current.json")));
    assert_eq!(settings.week_start, WeekStart::Monday);
    assert_eq!(settings.user_id, 9);
}

#[test]
fn env_overrides_file() {
    let mut settings = Settings::default();
    apply_file(&mut settings, "user_id = 3\nweek_start = \"monday\"");
    apply_env(&mut settings, env(&[("APP__USER_ID", "not-a-number")]));
    assert_eq!(settings.user_id, 3);

    apply_env(&mut settings, env(&[("APP__WEEK_START", "sunday")]));
    assert_eq!(settings.week_start, WeekStart::Sunday);
}
