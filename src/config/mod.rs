use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "lyrics-finder";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lyrics: LyricsConfig,
    pub catalog: CatalogConfig,
    pub karaoke: KaraokeConfig,
    pub player: PlayerConfig,
    pub paths: PathsConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    /// LRCLIB API root, without the trailing `/search`.
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// iTunes-compatible search endpoint.
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KaraokeConfig {
    /// Clock cadence in milliseconds.
    pub tick_ms: u64,
    /// Keep the active line centred while playing.
    pub auto_scroll: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// mpv audio device name (see `mpv --audio-device=help`)
    pub audio_device: Option<String>,
    /// Volume level (0-100)
    pub volume: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Log files live here.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct UiConfig {
    /// Last visited view (restored on startup)
    pub last_view: Option<String>,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://lrclib.net/api".to_string(),
            user_agent: format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 10,
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://itunes.apple.com/search".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for KaraokeConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            auto_scroll: true,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_device: None,
            volume: 80,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME));
        Self { data_dir }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", APP_NAME, APP_NAME)
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = project_dirs().context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

fn write_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    write_config(cfg, &path)
}

/// Load the config, writing the defaults first when the file is missing.
pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        let cfg = Config::default();
        write_config(&cfg, &path).context("write default config")?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("{APP_NAME}-test-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.lyrics.base_url, "https://lrclib.net/api");
        assert_eq!(cfg.catalog.base_url, "https://itunes.apple.com/search");
        assert_eq!(cfg.karaoke.tick_ms, 100);
        assert!(cfg.karaoke.auto_scroll);
        assert_eq!(cfg.player.volume, 80);
        assert!(cfg.ui.last_view.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let raw = "[karaoke]\ntick_ms = 50\n\n[ui]\nlast_view = \"lyrics\"\n";
        let cfg: Config = toml::from_str(raw).unwrap();
        assert_eq!(cfg.karaoke.tick_ms, 50);
        assert!(cfg.karaoke.auto_scroll);
        assert_eq!(cfg.ui.last_view.as_deref(), Some("lyrics"));
        assert_eq!(cfg.lyrics.timeout_secs, 10);
    }

    #[test]
    fn test_load_creates_then_round_trips() {
        let path = scratch_path("roundtrip");
        let _ = fs::remove_file(&path);

        let created = load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(created.karaoke.tick_ms, 100);

        let mut cfg = created;
        cfg.player.audio_device = Some("pulse".to_string());
        cfg.ui.last_view = Some("search".to_string());
        save(&cfg, Some(&path)).unwrap();

        let loaded = load(Some(&path)).unwrap();
        assert_eq!(loaded.player.audio_device.as_deref(), Some("pulse"));
        assert_eq!(loaded.ui.last_view.as_deref(), Some("search"));

        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
