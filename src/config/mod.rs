use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

pub mod app;
pub mod file;

pub fn load(path: Option<&Path>) -> anyhow::Result<file::Config> {
    let config = match path.map(Path::to_path_buf).or_else(default_path) {
        Some(path) => fs::read_to_string(&path)
            .with_context(|| format!("Unable to read '{}'", path.display()))?,
        None => include_str!("../../config.toml").to_string(),
    };

    parse(&config)
}

fn parse(config: &str) -> anyhow::Result<file::Config> {
    toml::from_str(config).context("Unable to parse config")
}

fn default_path() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("kalmanop")
        .ok()
        .and_then(|dirs| dirs.find_config_file("config.toml"))
}
