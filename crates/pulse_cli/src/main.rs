//! `pulse-theme` - inspect and change the Pulse color scheme preference
//!
//! ```text
//! pulse-theme show
//! pulse-theme toggle
//! pulse-theme set dark
//! pulse-theme system on
//! pulse-theme watch --duration 60
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pollster::block_on;
use pulse_theme::config::ConfiguredAppearance;
use pulse_theme::{
    use_theme, ColorScheme, SystemSchemeWatcher, ThemeConfig, ThemeContext, ThemePreferenceStore,
    ThemeProvider,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pulse-theme")]
#[command(version, about = "Inspect and change the Pulse color scheme preference")]
struct Cli {
    /// Config file or directory containing pulse.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the preference storage directory
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current preference and theme (default)
    Show,

    /// Switch to the opposite color scheme
    Toggle,

    /// Pick a color scheme explicitly
    Set {
        /// light or dark
        scheme: ColorScheme,
    },

    /// Follow the OS appearance, or stop following it
    System {
        #[arg(value_enum)]
        state: Switch,
    },

    /// Print every theme change until interrupted
    Watch {
        /// Stop after this many seconds
        #[arg(long)]
        duration: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ThemeConfig::load_or_default(cli.config.as_deref())?;
    if let Some(dir) = cli.storage_dir {
        config.storage.dir = Some(dir);
    }

    let storage = config
        .storage()
        .context("No storage directory available. Pass --storage-dir or set [storage] dir.")?;
    tracing::debug!("preference storage at {}", storage.dir().display());

    let appearance = config.appearance_source();
    ThemePreferenceStore::init(Arc::new(storage), appearance.source());
    let provider = ThemeProvider::global();
    block_on(provider.mount());

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => provider.provide(|| print_context(&use_theme())),
        Commands::Toggle => {
            block_on(provider.context().toggle_color_scheme());
            print_context(&provider.context());
        }
        Commands::Set { scheme } => {
            block_on(provider.context().set_color_scheme(scheme));
            print_context(&provider.context());
        }
        Commands::System { state } => {
            block_on(provider.context().set_is_system_theme(matches!(state, Switch::On)));
            print_context(&provider.context());
        }
        Commands::Watch { duration } => watch(&provider, &config, &appearance, duration)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_context(ctx: &ThemeContext) {
    let mode = if ctx.is_system_theme { "system" } else { "manual" };
    println!("color scheme : {}", ctx.color_scheme);
    println!("mode         : {}", mode);
    println!("background   : {}", ctx.theme.colors.background);
    println!("text         : {}", ctx.theme.colors.text);
    println!("primary      : {}", ctx.theme.colors.primary);
}

fn watch(
    provider: &ThemeProvider,
    config: &ThemeConfig,
    appearance: &ConfiguredAppearance,
    duration: Option<u64>,
) -> Result<()> {
    provider.consume(|ctx| {
        let mode = if ctx.is_system_theme { "system" } else { "manual" };
        println!(
            "{} ({}) background={}",
            ctx.color_scheme, mode, ctx.theme.colors.background
        );
    });

    let _watcher = match appearance {
        ConfiguredAppearance::System(source) if config.appearance.watch => Some(
            SystemSchemeWatcher::spawn(Arc::clone(source), config.appearance.watcher_config())
                .context("Failed to start the appearance watcher")?,
        ),
        _ => {
            tracing::info!("OS appearance is fixed or unwatched; only local changes are reported");
            None
        }
    };

    let ctx = provider.context();
    println!(
        "watching from {} ({})",
        ctx.color_scheme,
        if ctx.is_system_theme { "system" } else { "manual" }
    );

    match duration {
        Some(secs) => {
            let deadline = Instant::now() + Duration::from_secs(secs);
            while let Some(left) = deadline.checked_duration_since(Instant::now()) {
                std::thread::park_timeout(left);
            }
        }
        None => loop {
            std::thread::park();
        },
    }

    Ok(())
}
