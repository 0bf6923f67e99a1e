use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::layout::LayoutParams;

/// How `source_url` is turned into a downloadable archive URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// `source_url` is a Yandex Disk public share link resolved through the public API.
    #[default]
    YandexPublic,
    /// `source_url` points at the archive itself.
    Direct,
}

/// HTTP timeouts (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    /// Upper bound for a whole transfer, including the archive body.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 3600,
        }
    }
}

/// Configuration loaded from `~/.config/gridtiff/config.toml`.
///
/// Passed explicitly into the pipeline; CLI flags override fields for a single run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Public share link (or direct archive URL when `source = "direct"`).
    pub source_url: String,
    pub source: SourceKind,
    /// Endpoint used to resolve public share links into a download href.
    pub yandex_api_base: String,
    /// Where the archive is unpacked.
    pub extract_dir: PathBuf,
    /// Where `<folder>.tif` files are written.
    pub output_dir: PathBuf,
    /// File name suffixes (matched case-insensitively) treated as images.
    pub extensions: Vec<String>,
    pub layout: LayoutParams,
    /// Optional timeouts; if missing, built-in defaults are used.
    pub fetch: Option<FetchConfig>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            source_url: "https://disk.yandex.ru/d/V47MEP5hZ3U1kg".to_string(),
            source: SourceKind::YandexPublic,
            yandex_api_base: "https://cloud-api.yandex.net/v1/disk/public/resources/download"
                .to_string(),
            extract_dir: PathBuf::from("yandex_disk_content"),
            output_dir: PathBuf::from("tiff_files"),
            extensions: ["png", "jpg", "jpeg", "bmp", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            layout: LayoutParams::default(),
            fetch: None,
        }
    }
}

impl GridConfig {
    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gridtiff")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GridConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GridConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

pub fn load_from_path(path: &Path) -> Result<GridConfig> {
    let data = fs::read_to_string(path)?;
    let cfg: GridConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = GridConfig::default();
        assert_eq!(cfg.layout.images_per_row, 4);
        assert_eq!(cfg.layout.padding, 80);
        assert_eq!(cfg.source, SourceKind::YandexPublic);
        assert_eq!(cfg.output_dir, PathBuf::from("tiff_files"));
        assert_eq!(cfg.extensions.len(), 5);
        assert_eq!(cfg.fetch_config().timeout_secs, 3600);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = GridConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: GridConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.source_url, cfg.source_url);
        assert_eq!(parsed.layout, cfg.layout);
        assert_eq!(parsed.extract_dir, cfg.extract_dir);
    }

    #[test]
    fn config_toml_partial_uses_defaults() {
        let toml = r#"
            source = "direct"
            source_url = "https://example.com/pics.zip"

            [layout]
            images_per_row = 3
            padding = 0
        "#;
        let cfg: GridConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.source, SourceKind::Direct);
        assert_eq!(cfg.layout, LayoutParams { images_per_row: 3, padding: 0 });
        assert_eq!(cfg.extract_dir, PathBuf::from("yandex_disk_content"));
        assert!(cfg.fetch.is_none());
    }

    #[test]
    fn config_toml_fetch_section() {
        let toml = r#"
            [fetch]
            connect_timeout_secs = 5
            timeout_secs = 60
        "#;
        let cfg: GridConfig = toml::from_str(toml).unwrap();
        let fetch = cfg.fetch_config();
        assert_eq!(fetch.connect_timeout_secs, 5);
        assert_eq!(fetch.timeout_secs, 60);
    }

    #[test]
    fn partial_layout_section() {
        let cfg: GridConfig = toml::from_str("[layout]\npadding = 5\n").unwrap();
        assert_eq!(cfg.layout, LayoutParams { images_per_row: 4, padding: 5 });
    }

    #[test]
    fn negative_padding_rejected() {
        let toml = r#"
            [layout]
            images_per_row = 4
            padding = -1
        "#;
        assert!(toml::from_str::<GridConfig>(toml).is_err());
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_dir = \"out\"\n").unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("out"));
    }
}
