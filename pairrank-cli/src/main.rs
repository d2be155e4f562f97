mod catalog;
mod config;
mod interactive;
mod logging;
mod output;
mod parse;
mod prompt;

use clap::Parser;
use pairrank_core::constants::{DEFAULT_POOL_PRESET, POOL_PRESETS};
use pairrank_core::{PoolOptions, PoolStats, RankError, Session, SessionConfig, build_pool, preset_size, share};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::config::PairrankConfig;
use crate::interactive::Exit;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "pairrank", version, about = "Rank a catalog by answering \"which do you prefer?\"")]
struct Cli {
    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank the pool interactively, then print the ranking and a share code
    Rank(RankArgs),
    /// Preview the pool a ranking session would use
    Pool(PoolArgs),
    /// Show a ranking from a share code
    Show(ShowArgs),
    /// Create a default config file at ~/.config/pairrank/config.toml
    Init,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Catalog JSON file
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Path to config file (default: ~/.config/pairrank/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
struct PoolArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Pool size: 25, 50, 100, 150, any number, or "all"
    #[arg(long)]
    pool_size: Option<String>,

    /// Leave cover songs out of the pool
    #[arg(long)]
    exclude_covers: bool,

    /// Offer the pool in random order instead of most played first
    #[arg(long)]
    shuffle: bool,

    /// Count side projects as originals in breakdowns
    #[arg(long)]
    merge_side_projects: bool,
}

#[derive(Parser)]
struct RankArgs {
    #[command(flatten)]
    pool: PoolArgs,

    /// Name attached to the share code
    #[arg(long)]
    owner: Option<String>,

    /// Disable skipping
    #[arg(long)]
    no_skip: bool,

    /// Refuse to produce a share code without --owner
    #[arg(long)]
    require_owner: bool,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ShowArgs {
    /// Share code, with or without the "share=" prefix
    code: String,

    #[command(flatten)]
    source: SourceArgs,
}

/// Everything a command needs after merging CLI args over the config file.
struct Settings {
    catalog: PathBuf,
    pool: PoolOptions,
    session: SessionConfig,
    owner: Option<String>,
}

fn load_file_config(source: &SourceArgs) -> (PathBuf, PairrankConfig) {
    let config_path = source.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);
    (config_path, cfg)
}

fn resolve_catalog(source: &SourceArgs, cfg: &PairrankConfig, config_path: &std::path::Path) -> PathBuf {
    source.catalog.clone()
        .or_else(|| cfg.catalog.clone().map(PathBuf::from))
        .unwrap_or_else(|| {
            bail(format!("No catalog specified. Pass --catalog or set it in {}", config_path.display()));
        })
}

fn resolve_settings(args: &PoolArgs) -> Settings {
    let (config_path, cfg) = load_file_config(&args.source);
    let catalog = resolve_catalog(&args.source, &cfg, &config_path);

    let pool_size = match args.pool_size.as_deref().or(cfg.pool_size.as_deref()) {
        Some(value) => preset_size(value)
            .unwrap_or_else(|| bail(format!("Invalid pool size \"{value}\". Use 25, 50, 100, 150, a number, or \"all\"."))),
        None => POOL_PRESETS[DEFAULT_POOL_PRESET].1,
    };

    let pool = PoolOptions {
        include_covers: !args.exclude_covers && cfg.include_covers.unwrap_or(true),
        pool_size,
        shuffle: args.shuffle || cfg.shuffle.unwrap_or(false),
    };

    let session = SessionConfig {
        merge_side_projects: args.merge_side_projects || cfg.merge_side_projects.unwrap_or(false),
        require_owner_name: cfg.require_owner_name.unwrap_or(false),
        allow_skip: cfg.allow_skip.unwrap_or(true),
    };

    Settings {
        catalog,
        pool,
        session,
        owner: cfg.owner,
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Pool(args) => run_pool(args),
        Commands::Show(args) => run_show(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your catalog, owner name, pool size, etc.");
        }
    }
}

fn run_pool(args: PoolArgs) {
    let settings = resolve_settings(&args);
    let catalog = catalog::load_catalog(&settings.catalog);
    let pool = build_pool(&catalog, &settings.pool);
    let stats = PoolStats::from_items(&pool, settings.session.merge_side_projects);
    output::print_pool_preview(&pool, &stats, settings.session.merge_side_projects);
}

/// Run the interactive loop. Under `--json` the prompts go to stderr so stdout
/// carries nothing but the final document.
fn run_interactive<'a, R: BufRead>(
    session: &mut Session,
    input: R,
    json: bool,
    stdout: &'a mut dyn Write,
    stderr: &'a mut dyn Write,
) -> io::Result<Exit> {
    let mut out = if json { stderr } else { stdout };
    interactive::run(session, input, &mut out)
}

fn run_rank(args: RankArgs) {
    let mut settings = resolve_settings(&args.pool);
    if args.no_skip {
        settings.session.allow_skip = false;
    }
    if args.require_owner {
        settings.session.require_owner_name = true;
    }
    let owner = args.owner.clone().or(settings.owner.clone());
    if settings.session.require_owner_name && owner.as_deref().is_none_or(|o| o.trim().is_empty()) {
        bail("An owner name is required. Pass --owner or set owner in the config file.");
    }

    let catalog = catalog::load_catalog(&settings.catalog);
    let pool = build_pool(&catalog, &settings.pool);
    if pool.is_empty() {
        bail("The pool is empty. Check the catalog and the pool filters.");
    }

    tracing::info!(
        pool = pool.len(),
        include_covers = settings.pool.include_covers,
        shuffle = settings.pool.shuffle,
        "starting ranking session"
    );

    let mut session = Session::new(pool, settings.session)
        .unwrap_or_else(|e| bail(format!("Failed to start session: {e}")));

    if !args.json {
        println!("Type ? for help. Each new song needs about log2(n) answers.");
    }

    let exit = run_interactive(
        &mut session,
        io::stdin().lock(),
        args.json,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
    .unwrap_or_else(|e| bail(format!("Terminal I/O failed: {e}")));

    if exit != Exit::Finished {
        tracing::info!(
            unranked = session.queue().len(),
            "session ended early; partial ranking follows"
        );
    }

    let share_code = match session.share_code(owner.as_deref().unwrap_or("")) {
        Ok(code) => Some(code),
        Err(RankError::OwnerNameRequired) => None,
        Err(e) => bail(e),
    };

    let scored = session.scores();
    if args.json {
        output::print_json(
            &scored,
            owner.as_deref(),
            share_code.as_deref(),
            session.queue().len(),
            session.total_comparisons(),
        );
    } else {
        println!();
        output::print_table(
            &scored,
            session.progress(),
            &session.ranked_breakdown(),
            session.config().merge_side_projects,
            session.total_comparisons(),
        );
        if let Some(code) = share_code.as_deref().filter(|_| !scored.is_empty()) {
            output::print_share_code(code);
        }
    }
}

fn run_show(args: ShowArgs) {
    let (config_path, cfg) = load_file_config(&args.source);
    let catalog_path = resolve_catalog(&args.source, &cfg, &config_path);
    let catalog = catalog::load_catalog(&catalog_path);

    match share::decode(&args.code, &catalog) {
        Ok(shared) => output::print_shared(&shared),
        Err(e) => bail(format!("No shared ranking found: {e}")),
    }
}
