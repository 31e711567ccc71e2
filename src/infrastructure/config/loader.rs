//! 설정 파일 탐색/병합 로더.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::config::Config;

pub(crate) const CONFIG_ENV: &str = "CODEHELPER_CONFIG";
pub(crate) const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone)]
pub(crate) struct LoadedConfig {
    pub config: Config,
    pub searched_paths: Vec<PathBuf>,
    pub loaded_paths: Vec<PathBuf>,
}

/// 우선순위 경로를 순회해 JSON 설정을 병합하고 환경변수 override를 적용한다.
pub(crate) fn load_merged_config() -> Result<LoadedConfig> {
    let paths = config_paths();
    let mut loaded = merge_config_files(&paths)?;
    apply_env_overrides(&mut loaded.config, env::var(PORT_ENV).ok().as_deref())?;
    Ok(loaded)
}

/// 낮은 우선순위에서 높은 우선순위 순서로 존재하는 파일만 병합한다.
/// 파일이 하나도 없으면 기본값만으로 동작한다.
pub(crate) fn merge_config_files(paths: &[PathBuf]) -> Result<LoadedConfig> {
    let mut merged = Config::default();
    let mut loaded_paths = Vec::new();

    for path in paths {
        if !path.exists() {
            continue;
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        let parsed: Config = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?;
        merged.merge_from(parsed);
        loaded_paths.push(path.to_path_buf());
    }

    Ok(LoadedConfig {
        config: merged,
        searched_paths: paths.to_vec(),
        loaded_paths,
    })
}

/// `PORT` 환경변수는 설정 파일보다 우선한다(CLI 플래그보다는 후순위).
pub(crate) fn apply_env_overrides(config: &mut Config, port: Option<&str>) -> Result<()> {
    if let Some(raw) = port.map(str::trim).filter(|v| !v.is_empty()) {
        let port = raw
            .parse::<u16>()
            .with_context(|| format!("invalid {PORT_ENV} value: {raw}"))?;
        config.server.port = Some(port);
    }
    Ok(())
}

/// 시스템 + 사용자 + 프로젝트 + 명시 경로 순으로 병합 경로를 구성한다.
pub fn config_paths() -> Vec<PathBuf> {
    // 낮은 우선순위 -> 높은 우선순위 순서로 병합됨.
    let mut paths = vec![PathBuf::from("/etc/codehelper/config.json")];

    if let Some(base) = dirs::config_dir() {
        paths.push(base.join("codehelper").join("config.json"));
    }

    paths.push(PathBuf::from(".codehelper/config.json"));

    if let Ok(path) = env::var(CONFIG_ENV) {
        paths.push(Path::new(&path).to_path_buf());
    }

    dedup_paths(paths)
}

fn dedup_paths(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for p in paths {
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_existing_files_in_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        let low = dir.path().join("low.json");
        let high = dir.path().join("high.json");
        let missing = dir.path().join("missing.json");
        fs::write(&low, r#"{"server":{"port":7000,"host":"127.0.0.1"},"provider":{"model":"m1"}}"#)
            .unwrap();
        fs::write(&high, r#"{"server":{"port":7001}}"#).unwrap();

        let loaded = merge_config_files(&[low.clone(), missing, high.clone()]).unwrap();

        assert_eq!(loaded.loaded_paths, vec![low, high]);
        assert_eq!(loaded.searched_paths.len(), 3);
        assert_eq!(loaded.config.port(), 7001);
        assert_eq!(loaded.config.host(), "127.0.0.1");
        assert_eq!(loaded.config.provider.model(), "m1");
    }

    #[test]
    fn no_files_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = merge_config_files(&[dir.path().join("none.json")]).unwrap();
        assert!(loaded.loaded_paths.is_empty());
        assert_eq!(loaded.config.port(), 5000);
    }

    #[test]
    fn invalid_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = merge_config_files(&[path.clone()]).unwrap_err();
        assert!(format!("{err:#}").contains(&path.display().to_string()));
    }

    #[test]
    fn port_env_overrides_file_value() {
        let mut config = Config::default();
        config.server.port = Some(7000);

        apply_env_overrides(&mut config, Some(" 8123 ")).unwrap();
        assert_eq!(config.port(), 8123);

        apply_env_overrides(&mut config, Some("")).unwrap();
        assert_eq!(config.port(), 8123);

        assert!(apply_env_overrides(&mut config, Some("http")).is_err());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let paths = dedup_paths(vec![
            PathBuf::from("a.json"),
            PathBuf::from("b.json"),
            PathBuf::from("a.json"),
        ]);
        assert_eq!(paths, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    }
}
