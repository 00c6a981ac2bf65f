use serde::Deserialize;
use std::path::PathBuf;

/// Optional `skicam.toml` settings, merged under CLI flags
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub pistes_dir: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub resorts: Option<PathBuf>,
    #[serde(default)]
    pub regions: Option<PathBuf>,
    #[serde(default)]
    pub pass_table: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub sequential: bool,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("skicam.toml"));
    paths.push(PathBuf::from(".skicam.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("skicam").join("config.toml"));
        paths.push(config_dir.join("skicam.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".skicam.toml"));
        paths.push(home.join(".config").join("skicam").join("config.toml"));
    }

    paths
}
