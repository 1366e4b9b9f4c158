use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use skillmatch_config::{ConfigLoader, SkillmatchConfig};
use skillmatch_core::Tier;
use skillmatch_matcher::SkillMatcher;
use skillmatch_skills::{RegistryLayout, SkillRegistry};

mod matching;
mod skills;
mod validate;

/// Tiered skill discovery and registry validation
#[derive(Parser)]
#[command(name = "skillmatch", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to skillmatch.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Registry root directory (overrides registry.root)
    #[arg(short, long, global = true)]
    registry: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a query against one skill or the whole registry
    Match {
        /// The user's request text
        query: String,

        /// Match against this skill only
        #[arg(short, long)]
        skill: Option<String>,

        /// Lowest tier to report for whole-registry matching (none, solves, keyword, medium, high)
        #[arg(short, long)]
        min_tier: Option<Tier>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate every skill in the registry (non-zero exit on any failure)
    Validate {
        /// JSON file mapping category -> allowed terms (replaces [categories])
        #[arg(long)]
        categories: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List discovered skills
    List,
    /// Show a skill's dialect and extracted signals
    Show {
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version and build info
    Version,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub fn run(self) -> skillmatch_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let mut config = config_loader.get();
        if let Some(root) = &self.registry {
            config.registry.root = root.clone();
        }

        // Resolve log level: --verbose > --quiet > --log-level > config
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(&config.logging.level)
        };
        init_tracing(log_level, &config.logging.format);

        match self.command {
            Commands::Match {
                query,
                skill,
                min_tier,
                json,
            } => {
                let min_tier = min_tier.unwrap_or(config.matcher.registry_min_tier);
                matching::cmd_match(&config, &query, skill.as_deref(), min_tier, json)
            }
            Commands::Validate { categories, json } => {
                validate::cmd_validate(config, categories.as_deref(), json)
            }
            Commands::List => skills::cmd_list(&config),
            Commands::Show { name, json } => skills::cmd_show(&config, &name, json),
            Commands::Config { json } => Self::cmd_config(&config, json),
            Commands::Version => Self::cmd_version(),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    fn cmd_config(config: &SkillmatchConfig, json: bool) -> skillmatch_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(config)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(config)
                    .map_err(|e| skillmatch_core::SkillmatchError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_version() -> skillmatch_core::Result<()> {
        println!("skillmatch v{}", env!("CARGO_PKG_VERSION"));
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> skillmatch_core::Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "skillmatch", &mut std::io::stdout());
        Ok(())
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries reports.
fn init_tracing(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when run() is called more than once in-process.
    let _ = match format {
        "json" => builder.json().with_target(true).try_init(),
        "compact" => builder.compact().with_target(false).try_init(),
        _ => builder.with_target(false).try_init(),
    };
}

/// Load the registry snapshot described by the config.
fn load_registry(config: &SkillmatchConfig) -> skillmatch_core::Result<SkillRegistry> {
    let layout = RegistryLayout {
        metadata_file: config.registry.metadata_file.clone(),
        document_file: config.registry.document_file.clone(),
    };
    SkillRegistry::load(&config.registry.root, layout)
}

fn build_matcher(config: &SkillmatchConfig) -> SkillMatcher {
    SkillMatcher::new()
        .with_keyword_threshold(config.matcher.keyword_threshold)
        .with_solves_threshold(config.matcher.solves_threshold)
        .with_min_term_length(config.matcher.min_term_length)
}
