//! quoteme - Entry Point

use clap::{ArgGroup, CommandFactory, FromArgMatches, Parser};
use quoteme::commands::{Commands, ImageRequest};
use quoteme::config::{self, ConfigFile, ConfigStore};
use quoteme::model::Resolution;
use quoteme::shell::{hook_command, ShellRc};
use quoteme::source::{HttpSource, LocalLibrary};
use quoteme::view::{ColorConfig, Output, Tone};
use std::path::PathBuf;
use tracing::{info, warn};

/// quoteme - random quotes, facts and jokes in your terminal
#[derive(Parser, Debug)]
#[command(name = "quoteme")]
#[command(version)]
#[command(about = "Random quotes, facts and jokes in your terminal, optionally rendered as images")]
#[command(group(
    ArgGroup::new("action")
        .args(["fact", "joke", "resolution", "enable", "disable", "auto_status"])
        .multiple(false)
))]
pub struct Args {
    /// Show a quote by this author (case-insensitive, partial match)
    #[arg(short, long, value_name = "NAME")]
    pub author: Option<String>,

    /// Also render the quote as a PNG, optionally to PATH (file or directory)
    #[arg(short, long, value_name = "PATH", num_args = 0..=1)]
    pub image: Option<Option<PathBuf>>,

    /// Show a random fun fact
    #[arg(short, long)]
    pub fact: bool,

    /// Show a random joke
    #[arg(short, long)]
    pub joke: bool,

    /// Set image resolution (preset name or WIDTHxHEIGHT); omit RES for a menu
    #[arg(short, long, value_name = "RES", num_args = 0..=1)]
    pub resolution: Option<Option<String>>,

    /// Show a quote every time a new shell starts
    #[arg(long)]
    pub enable: bool,

    /// Stop showing quotes on shell startup
    #[arg(long)]
    pub disable: bool,

    /// Show whether auto-display is enabled
    #[arg(long)]
    pub auto_status: bool,

    /// Only print the content box (used by the shell hook)
    #[arg(long)]
    pub silent: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Command definition with the default image directory spelled out in `--image` help.
fn cli() -> clap::Command {
    let save_dir = config::default_save_dir();
    Args::command().mut_arg("image", |arg| {
        arg.help(format!(
            "Also render the quote as a PNG, optionally to PATH (file or directory) \
             [default directory: {}]",
            save_dir.display()
        ))
    })
}

fn parse_args() -> Args {
    Args::from_arg_matches(&cli().get_matches()).unwrap_or_else(|e| e.exit())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args();
    let colors = ColorConfig::from_env_and_args(args.no_color);
    let mut out = Output::stdout(colors);

    // Unreadable config falls back to defaults; the next write replaces it.
    let config_path = config::resolve_config_path(args.config.clone());
    let (config_file, config_problem) =
        match config::load_config_with_precedence(args.config.clone()) {
            Ok(file) => (file, None),
            Err(e) => (None, Some(e)),
        };

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let resolved = {
        let merged = config::merge_config(config_file.as_ref());
        let with_env = config::apply_env_overrides(merged);
        let cli_resolution = args
            .resolution
            .as_ref()
            .and_then(|value| value.as_deref())
            .and_then(|value| value.parse::<Resolution>().ok());
        config::apply_cli_overrides(with_env, cli_resolution)
    };

    if let Err(e) = quoteme::logging::init(&resolved.log_file_path) {
        eprintln!("quoteme: file logging disabled: {e}");
    }
    if let Some(e) = config_problem {
        warn!(error = %e, "Config file unusable, using defaults");
        if !args.silent {
            out.notice(Tone::Warning, "⚠️  Could not parse config file, using defaults")?;
        }
    }
    info!(config = ?resolved, "Configuration loaded and resolved");

    let store = ConfigStore::new(config_path, config_file.unwrap_or_default());
    let library = LocalLibrary::load(resolved.data_dir.as_deref())?;
    let source = HttpSource::new(resolved.unsplash_access_key.clone())?;
    let mut rng = rand::rng();

    let mut commands =
        Commands::new(out, resolved, store, &source, library, &mut rng).silent(args.silent);

    if args.enable {
        let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("quoteme"));
        commands.enable_auto_display(&ShellRc::detect()?, &hook_command(&exe))?;
    } else if args.disable {
        commands.disable_auto_display(&ShellRc::detect()?)?;
    } else if args.auto_status {
        commands.auto_display_status(&ShellRc::detect()?)?;
    } else if let Some(value) = args.resolution {
        let stdin = std::io::stdin();
        commands.select_resolution(value.as_deref(), &mut stdin.lock())?;
    } else if args.fact {
        commands.show_fact()?;
    } else if args.joke {
        commands.show_joke()?;
    } else {
        let image = args.image.map(|output| ImageRequest { output });
        commands.show_quote(args.author.as_deref(), image.as_ref())?;
    }

    Ok(())
}
