mod config;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use mediagrab_core::{MediaError, MediaResult};

pub use config::{
    DEFAULT_FILE_STEM, DEFAULT_FORMAT, DEFAULT_OUTPUT_DIR, MediaGrabConfig, OutputConfig,
    ProcessingConfig,
};

pub const FORMATS_ENV: &str = "MEDIAGRAB_FORMATS";
pub const WATERMARK_ENV: &str = "MEDIAGRAB_WATERMARK_REMOVAL";

/// Keys accepted by `get`/`set`, in display order.
pub const KNOWN_KEYS: &[&str] = &[
    "output.default_formats",
    "output.directory",
    "output.file_stem",
    "processing.enable_watermark_removal",
];

pub fn config_path() -> MediaResult<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| MediaError::Config("home directory not found".to_string()))?;
    Ok(home.join(".mediagrab").join("config.toml"))
}

/// Reads the config file; a missing file means defaults.
pub fn load_config_from(path: &Path) -> MediaResult<MediaGrabConfig> {
    if !path.exists() {
        return Ok(MediaGrabConfig::default());
    }
    let content = fs::read_to_string(path)
        .map_err(|err| MediaError::Config(format!("failed to read config: {err}")))?;
    let config = toml::from_str(&content)
        .map_err(|err| MediaError::Config(format!("failed to parse config: {err}")))?;
    Ok(config)
}

/// Like [`load_config_from`], but an unreadable or malformed file only logs a
/// warning and yields defaults.
pub fn load_config_or_default(path: &Path) -> MediaGrabConfig {
    match load_config_from(path) {
        Ok(config) => {
            tracing::debug!("loaded settings from {}", path.display());
            config
        }
        Err(err) => {
            tracing::warn!("{err}; using default settings ({})", path.display());
            MediaGrabConfig::default()
        }
    }
}

pub fn save_config_to(path: &Path, config: &MediaGrabConfig) -> MediaResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| MediaError::Config(format!("failed to create config dir: {err}")))?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|err| MediaError::Config(format!("failed to serialize config: {err}")))?;
    fs::write(path, content)
        .map_err(|err| MediaError::Config(format!("failed to write config: {err}")))?;
    Ok(())
}

pub fn resolve_default_formats(config: &MediaGrabConfig) -> Vec<String> {
    formats_from(env::var(FORMATS_ENV).ok(), config)
}

fn formats_from(env_value: Option<String>, config: &MediaGrabConfig) -> Vec<String> {
    if let Some(value) = env_value
        && !value.trim().is_empty()
    {
        return split_list(&value);
    }
    config
        .output
        .default_formats
        .clone()
        .filter(|formats| !formats.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_FORMAT.to_string()])
}

pub fn resolve_watermark_removal(config: &MediaGrabConfig) -> bool {
    watermark_removal_from(env::var(WATERMARK_ENV).ok(), config)
}

fn watermark_removal_from(env_value: Option<String>, config: &MediaGrabConfig) -> bool {
    if let Some(value) = env_value {
        let normalized = value.to_lowercase();
        return normalized == "1" || normalized == "true" || normalized == "yes";
    }
    config.processing.enable_watermark_removal.unwrap_or(true)
}

pub fn resolve_output_dir(config: &MediaGrabConfig) -> PathBuf {
    PathBuf::from(
        config
            .output
            .directory
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_DIR),
    )
}

pub fn resolve_file_stem(config: &MediaGrabConfig) -> String {
    config
        .output
        .file_stem
        .clone()
        .filter(|stem| !stem.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_STEM.to_string())
}

pub fn get_config_value(config: &MediaGrabConfig, key_path: &str) -> Option<String> {
    let parts: Vec<&str> = key_path.split('.').collect();

    match parts.as_slice() {
        ["output", "default_formats"] => config.output.default_formats.as_ref().map(|f| f.join(",")),
        ["output", "directory"] => config.output.directory.clone(),
        ["output", "file_stem"] => config.output.file_stem.clone(),
        ["processing", "enable_watermark_removal"] => config
            .processing
            .enable_watermark_removal
            .map(|b| b.to_string()),
        _ => None,
    }
}

/// Writes one typed value into the file at `path`, keeping the rest of the
/// document (comments included) intact.
pub fn set_config_value_at(path: &Path, key_path: &str, value: &str) -> MediaResult<()> {
    let content = if path.exists() {
        fs::read_to_string(path)
            .map_err(|err| MediaError::Config(format!("failed to read config: {err}")))?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .unwrap_or_default();

    let (section, key) = key_path
        .split_once('.')
        .ok_or_else(|| {
            MediaError::Config(
                "key path must have 2 parts (e.g., 'output.default_formats')".to_string(),
            )
        })?;
    let item = typed_value(key_path, value)?;

    let table = doc
        .as_table_mut()
        .entry(section)
        .or_insert(toml_edit::Item::Table(Default::default()))
        .as_table_mut()
        .ok_or_else(|| MediaError::Config(format!("cannot set nested value in '{key_path}'")))?;
    table[key] = item;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| MediaError::Config(format!("failed to create config dir: {err}")))?;
    }
    fs::write(path, doc.to_string())
        .map_err(|err| MediaError::Config(format!("failed to write config: {err}")))?;

    Ok(())
}

pub fn set_config_value(key_path: &str, value: &str) -> MediaResult<()> {
    set_config_value_at(&config_path()?, key_path, value)
}

fn typed_value(key_path: &str, raw: &str) -> MediaResult<toml_edit::Item> {
    match key_path {
        "output.default_formats" => {
            let mut array = toml_edit::Array::new();
            for format in split_list(raw) {
                array.push(format);
            }
            Ok(toml_edit::value(array))
        }
        "processing.enable_watermark_removal" => {
            let flag = raw.trim().parse::<bool>().map_err(|_| {
                MediaError::Config(format!("'{key_path}' expects true or false, got '{raw}'"))
            })?;
            Ok(toml_edit::value(flag))
        }
        "output.directory" | "output.file_stem" => Ok(toml_edit::value(raw)),
        _ => Err(MediaError::Config(format!("unknown config key '{key_path}'"))),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn open_in_editor(path: &Path) -> MediaResult<()> {
    if !path.exists() {
        save_config_to(path, &MediaGrabConfig::default())?;
    }

    let editor = env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(target_os = "windows") {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "vim".to_string()
        } else {
            "nano".to_string()
        }
    });

    let status = Command::new(&editor)
        .arg(path)
        .status()
        .map_err(|err| MediaError::Config(format!("failed to open editor '{editor}': {err}")))?;

    if !status.success() {
        return Err(MediaError::Config(format!("editor exited with status: {status}")));
    }

    Ok(())
}
