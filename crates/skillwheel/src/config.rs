use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use wheelchart::chart::{
    DEFAULT_HEIGHT, DEFAULT_LABEL_OFFSET, DEFAULT_LAYERS, DEFAULT_SECTOR_SPACING,
};
use wheelchart::{INNER_RADIUS_RATIO, Segment, Theme, WheelProps};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub height: f64,
    pub width: Option<f64>,
    pub default_layers: usize,
    pub sector_spacing: f64,
    pub layer_spacing: Option<f64>,
    pub label_offset: f64,
    pub inner_ratio: f64,
    pub title: Option<String>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            width: None,
            default_layers: DEFAULT_LAYERS,
            sector_spacing: DEFAULT_SECTOR_SPACING,
            layer_spacing: None,
            label_offset: DEFAULT_LABEL_OFFSET,
            inner_ratio: INNER_RADIUS_RATIO,
            title: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    pub records: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub diagram: DiagramConfig,
    pub theme: Theme,
}

impl Config {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from("wheel.svg"))
    }

    pub fn to_props(&self, segments: Vec<Segment>) -> WheelProps {
        let d = &self.diagram;
        WheelProps {
            segments,
            selected: None,
            height: d.height,
            width: d.width,
            default_layers: d.default_layers,
            sector_spacing: d.sector_spacing,
            layer_spacing: d.layer_spacing,
            label_offset: d.label_offset,
            inner_ratio: d.inner_ratio,
            title: d.title.clone(),
            theme: self.theme.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("dev", "skillwheel", "skillwheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("SKILLWHEEL")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("falling back to default config: {e}");
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config = parse("");
        assert_eq!(config.diagram.height, DEFAULT_HEIGHT);
        assert_eq!(config.diagram.inner_ratio, INNER_RADIUS_RATIO);
        assert!(config.records.is_none());
        assert_eq!(config.output_path(), PathBuf::from("wheel.svg"));
    }

    #[test]
    fn partial_tables_override_only_what_they_name() {
        let config = parse(
            r##"
            records = "records.json"

            [diagram]
            height = 500.0
            title = "Team skills"

            [theme]
            neutral_gray = "#999999"
            draw_separators = true
            "##,
        );

        assert_eq!(config.records, Some(PathBuf::from("records.json")));
        assert_eq!(config.diagram.height, 500.0);
        assert_eq!(config.diagram.title.as_deref(), Some("Team skills"));
        assert_eq!(config.diagram.default_layers, DEFAULT_LAYERS);
        assert_eq!(config.theme.neutral_gray.to_string(), "#999999");
        assert!(config.theme.draw_separators);
    }

    #[test]
    fn config_converts_into_props() {
        let config = parse("[diagram]\nheight = 420.0\nwidth = 420.0");
        let props = config.to_props(Vec::new());
        assert_eq!(props.height, 420.0);
        assert_eq!(props.width, Some(420.0));
        assert!(props.selected.is_none());
    }

    #[test]
    fn default_config_template_parses() {
        let config = parse(DEFAULT_CONFIG);
        // the template ships fully commented out
        assert!(config.records.is_none());
    }
}
