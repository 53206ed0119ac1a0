mod logging;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use console::style;
use mediagrab_config::{
    KNOWN_KEYS, MediaGrabConfig, config_path, get_config_value, load_config_from,
    load_config_or_default, open_in_editor, resolve_default_formats, resolve_file_stem,
    resolve_output_dir, resolve_watermark_removal, set_config_value_at,
};
use mediagrab_core::{ExtractionRecord, MediaError, MediaResult, load_input_urls};
use mediagrab_export::{ExportFormat, export_records, resolve_formats, write_slideshows};
use mediagrab_extract::Pipeline;

const DEFAULT_INPUT: &str = "data/input_samples.json";

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration values
    List,
    /// Print the config file location
    Path,
    /// Open config file in editor
    Edit,
}

#[derive(Debug, Parser)]
#[command(name = "mediagrab")]
#[command(version, about = "Media metadata extractor (offline demo)", long_about = None)]
#[command(subcommand_precedence_over_arg = true)]
struct Cli {
    /// JSON file with the URLs to process
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Directory to write outputs into
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Output formats (json, csv, excel); repeat or comma-separate. Overrides the config file
    #[arg(long, num_args = 1, value_delimiter = ',', action = ArgAction::Append)]
    formats: Vec<String>,
    /// File name stem for exported files
    #[arg(long)]
    name: Option<String>,
    /// Config file to use instead of ~/.mediagrab/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Keep watermarked media entries as extracted
    #[arg(long)]
    no_watermark_removal: bool,
    /// Also write placeholder slideshow files for multi-image posts
    #[arg(long, value_name = "DIR")]
    slideshow_dir: Option<PathBuf>,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// URLs to process instead of the input file
    #[arg(value_name = "URL")]
    urls: Vec<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Some(Commands::Config { action }) = &cli.command {
        if let Err(err) = handle_config_command(action, cli.config.as_deref()) {
            eprintln!("{} {err}", style("Error:").red());
            std::process::exit(1);
        }
        return;
    }

    if let Err(err) = run(&cli) {
        eprintln!("{} {err}", style("Error:").red());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> MediaResult<()> {
    let config = load_settings(cli.config.as_deref());

    let urls = gather_urls(cli).inspect_err(|err| {
        tracing::error!("failed to load input urls: {err}");
    })?;

    let requested = if cli.formats.is_empty() {
        resolve_default_formats(&config)
    } else {
        cli.formats.clone()
    };
    let formats = resolve_formats(&requested);
    let enable_watermark_removal = !cli.no_watermark_removal && resolve_watermark_removal(&config);

    tracing::info!(
        "loaded {} url(s). output formats: {}",
        urls.len(),
        format_list(&formats)
    );

    let records = Pipeline::new(enable_watermark_removal).run(&urls);

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| resolve_output_dir(&config));
    let stem = cli.name.clone().unwrap_or_else(|| resolve_file_stem(&config));
    fs::create_dir_all(&output_dir)?;

    for format in formats {
        let path = export_records(&records, format, &output_dir, &stem)?;
        println!("{} {}", style("Wrote").green(), path.display());
    }

    if let Some(dir) = &cli.slideshow_dir {
        for path in write_slideshows(&records, dir)? {
            println!("{} {}", style("Slideshow").green(), path.display());
        }
    }

    print_summary(&records);
    tracing::info!("processing completed successfully");
    Ok(())
}

fn load_settings(explicit: Option<&Path>) -> MediaGrabConfig {
    match settings_path(explicit) {
        Ok(path) => load_config_or_default(&path),
        Err(err) => {
            tracing::info!("{err}; using default settings");
            MediaGrabConfig::default()
        }
    }
}

fn settings_path(explicit: Option<&Path>) -> MediaResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config_path(),
    }
}

fn gather_urls(cli: &Cli) -> MediaResult<Vec<String>> {
    if !cli.urls.is_empty() {
        return Ok(cli.urls.clone());
    }
    load_input_urls(&cli.input)
}

fn format_list(formats: &[ExportFormat]) -> String {
    formats
        .iter()
        .map(|format| format.extension())
        .collect::<Vec<_>>()
        .join(", ")
}

fn handle_config_command(action: &ConfigAction, explicit: Option<&Path>) -> MediaResult<()> {
    let path = settings_path(explicit)?;
    match action {
        ConfigAction::Get { key } => {
            ensure_known_key(key)?;
            let config = load_config_from(&path)?;
            match get_config_value(&config, key) {
                Some(v) => println!("{} = {}", key, v),
                None => println!("{} = <null>", key),
            }
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            set_config_value_at(&path, key, value)?;
            println!("{} Set {} = {}", style("✓").green(), key, value);
            Ok(())
        }
        ConfigAction::List => {
            let config = load_config_from(&path)?;
            println!("Current configuration:");
            let mut current_section = "";
            for &key in KNOWN_KEYS {
                let (section, name) = key.split_once('.').unwrap_or(("", key));
                if section != current_section {
                    println!("\n[{section}]");
                    current_section = section;
                }
                let value = get_config_value(&config, key);
                println!("{name} = {}", value.as_deref().unwrap_or("<null>"));
            }
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Edit => open_in_editor(&path),
    }
}

fn ensure_known_key(key: &str) -> MediaResult<()> {
    if KNOWN_KEYS.contains(&key) {
        return Ok(());
    }
    Err(MediaError::Config(format!("unknown config key '{key}'")))
}

fn print_summary(records: &[ExtractionRecord]) {
    let failed = records.iter().filter(|record| record.error).count();
    println!(
        "{} Total: {} | Success: {} | Failed: {}",
        style("Summary:").bold(),
        records.len(),
        records.len() - failed,
        failed
    );
}
