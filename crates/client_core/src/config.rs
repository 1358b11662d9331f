use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub brand_catalog_path: Option<PathBuf>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api/mcn".into(),
            request_timeout_secs: 30,
            brand_catalog_path: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    brand_catalog_path: Option<PathBuf>,
}

/// Defaults, then `dashboard.toml` (or `path`), then environment.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let file_cfg = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
            parse_file(&raw, path)?
        }
        None => match fs::read_to_string(DEFAULT_SETTINGS_FILE) {
            Ok(raw) => parse_file(&raw, Path::new(DEFAULT_SETTINGS_FILE))?,
            Err(_) => FileSettings::default(),
        },
    };

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.brand_catalog_path {
        settings.brand_catalog_path = Some(v);
    }

    if let Some(v) = env("MCN_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        settings.request_timeout_secs = v
            .trim()
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_SECS is not a number: '{v}'"))?;
    }
    if let Some(v) = env("APP__BRAND_CATALOG_PATH") {
        settings.brand_catalog_path = Some(PathBuf::from(v));
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    if settings.request_timeout_secs == 0 {
        return Err(anyhow!("request timeout must be at least one second"));
    }
    Ok(settings)
}

fn parse_file(raw: &str, path: &Path) -> anyhow::Result<FileSettings> {
    toml::from_str(raw).with_context(|| format!("invalid settings file '{}'", path.display()))
}

pub fn normalize_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("invalid api base url '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!(
            "api base url must start with http:// or https://, got '{raw}'"
        ));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    fn temp_file(contents: &str) -> PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = std::env::temp_dir().join(format!("dashboard_settings_test_{suffix}.toml"));
        fs::write(&path, contents).expect("write settings");
        path
    }

    #[test]
    fn file_values_override_defaults_and_env_overrides_file() {
        let path = temp_file(
            "api_base_url = \"http://backend.local:9000/api/mcn/\"\nrequest_timeout_secs = 5\n",
        );
        let env: HashMap<&str, &str> = HashMap::from([("APP__REQUEST_TIMEOUT_SECS", "12")]);

        let settings =
            load_settings_with(Some(&path), |k| env.get(k).map(|v| v.to_string())).expect("load");
        assert_eq!(settings.api_base_url, "http://backend.local:9000/api/mcn");
        assert_eq!(settings.request_timeout_secs, 12);
        assert_eq!(settings.brand_catalog_path, None);

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn app_prefixed_env_wins_over_plain_env() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("MCN_API_BASE_URL", "http://a.example/api"),
            ("APP__API_BASE_URL", "https://b.example/api"),
        ]);
        let path = temp_file("");
        let settings =
            load_settings_with(Some(&path), |k| env.get(k).map(|v| v.to_string())).expect("load");
        assert_eq!(settings.api_base_url, "https://b.example/api");
        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(normalize_base_url("ftp://files.example").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = std::env::temp_dir().join("dashboard_settings_does_not_exist.toml");
        assert!(load_settings_with(Some(&missing), |_| None).is_err());
    }
}
