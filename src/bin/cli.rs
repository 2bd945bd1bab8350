//! settingskv CLI
//!
//! Command-line interface for inspecting and editing settings files.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use settingskv::{Config, SaveDurability, Settings};
use tracing_subscriber::{fmt, EnvFilter};

/// settingskv CLI
#[derive(Parser, Debug)]
#[command(name = "settingskv-cli")]
#[command(about = "Inspect and edit mod manager settings")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./settings_data")]
    data_dir: String,

    /// Sectioned settings file name (inside the data directory)
    #[arg(long, default_value = "settings.ini")]
    settings_file: String,

    /// Flat app settings file name (inside the data directory)
    #[arg(long, default_value = "app.cfg")]
    app_file: String,

    /// Localization directory (relative to the data directory)
    #[arg(short, long, default_value = "lang")]
    lang_dir: String,

    /// Skip fsync when replacing files on save
    #[arg(long)]
    no_fsync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a sectioned value
    Get {
        section: String,
        key: String,

        /// Printed when the key is absent
        #[arg(long, default_value = "")]
        default: String,
    },

    /// Set a sectioned value and save
    Set {
        section: String,
        key: String,
        value: String,
    },

    /// Remove a sectioned value and save
    Remove { section: String, key: String },

    /// List sections, or the entries of one section
    Sections {
        /// Section to list entries for
        section: Option<String>,
    },

    /// Get an app setting by composite key, e.g. "[Dev]IsDevBuild"
    AppGet {
        key: String,

        #[arg(long, default_value = "")]
        default: String,
    },

    /// Set an app setting and save
    AppSet { key: String, value: String },

    /// Resolve a localized string
    Resolve {
        key: String,

        /// Culture, e.g. en-US
        #[arg(short, long, default_value = "en-US")]
        culture: String,
    },

    /// List available cultures
    Cultures,
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,settingskv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let durability = if args.no_fsync {
        SaveDurability::BestEffort
    } else {
        SaveDurability::Durable
    };

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .settings_file(&args.settings_file)
        .app_settings_file(&args.app_file)
        .localization_dir(&args.lang_dir)
        .save_durability(durability)
        .build();

    let settings = match Settings::open(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&settings, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings, command: Commands) -> settingskv::Result<()> {
    match command {
        Commands::Get {
            section,
            key,
            default,
        } => {
            println!("{}", settings.store().get_string(&section, &key, &default));
        }
        Commands::Set {
            section,
            key,
            value,
        } => {
            if settings.store().set_string(&section, &key, &value) {
                settings.save()?;
            }
        }
        Commands::Remove { section, key } => {
            if settings.store().remove(&section, &key) {
                settings.save()?;
            }
        }
        Commands::Sections { section: None } => {
            for name in settings.store().sections() {
                println!("{}", name);
            }
        }
        Commands::Sections {
            section: Some(section),
        } => {
            for (key, value) in settings.store().section_entries(&section) {
                println!("{}={}", key, value);
            }
        }
        Commands::AppGet { key, default } => {
            println!("{}", settings.app().get(&key, &default));
        }
        Commands::AppSet { key, value } => {
            if settings.app().set(&key, &value) {
                settings.save()?;
            }
        }
        Commands::Resolve { key, culture } => {
            println!("{}", settings.strings().text(&key, &culture));
        }
        Commands::Cultures => {
            for culture in settings.cultures() {
                println!("{}\t{}", culture, culture.hyphenated());
            }
        }
    }
    Ok(())
}
