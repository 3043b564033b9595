mod render;

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tc_core::{Config, TimeCloud, Tokenizer};
use tc_corpus::{discover_articles, load_config, load_stopwords, tokenize_file, tokenize_files};

use crate::render::{DebugRenderer, JsonLinesRenderer, ProgressRenderer, Renderer, render_all};

#[derive(Parser)]
#[command(
    name = "timecloud",
    about = "Sliding-window word frequency tracker for animated word clouds"
)]
struct Cli {
    /// TOML config file (also read from TIMECLOUD_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream articles through the window and render every snapshot
    Render {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Words to process per rendered frame
        #[arg(long)]
        words_per_frame: Option<usize>,

        /// In debug mode, show output every N frames
        #[arg(long)]
        debug_every: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Mode::Progress)]
        mode: Mode,
    },

    /// Tokenize articles and report word counts
    Tokenize {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Stream all articles and print the final top words
    Top {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Number of words to list (defaults to the display limit)
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Directory containing article .txt files
    #[arg(long, short = 'i', default_value = "articles")]
    input_dir: PathBuf,

    /// Don't convert words to lowercase
    #[arg(long)]
    no_lowercase: bool,

    /// Don't filter stopwords
    #[arg(long)]
    no_stopwords: bool,

    /// Path to stopwords file (one word per line)
    #[arg(long)]
    stopwords_file: Option<PathBuf>,

    /// Minimum word length to include
    #[arg(long)]
    min_word_length: Option<usize>,

    /// Reduce words to their English stems
    #[arg(long)]
    stemming: bool,
}

#[derive(Args)]
struct EngineArgs {
    /// Sliding window size
    #[arg(long)]
    queue_size: Option<usize>,

    /// Maximum words shown per snapshot
    #[arg(long)]
    display_words: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Periodic full state dump
    Debug,
    /// Single updating status line
    Progress,
    /// One JSON snapshot per line
    Jsonl,
}

impl InputArgs {
    fn apply(&self, config: &mut Config) {
        if self.no_lowercase {
            config.tokenizer.lowercase = false;
        }
        if self.no_stopwords {
            config.tokenizer.filter_stopwords = false;
        }
        if let Some(path) = &self.stopwords_file {
            config.tokenizer.stopwords_file = path.clone();
        }
        if let Some(n) = self.min_word_length {
            config.tokenizer.min_word_length = n;
        }
        if self.stemming {
            config.tokenizer.enable_stemming = true;
        }
    }
}

impl EngineArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(n) = self.queue_size {
            config.engine.max_queue_size = n;
        }
        if let Some(n) = self.display_words {
            config.engine.max_display_words = n;
        }
    }
}

/// `--verbose` turns on debug output for this workspace's crates only.
const VERBOSE_FILTER: &str = "timecloud=debug,tc_corpus=debug";

/// Logs go to stderr so `--mode jsonl` output on stdout stays parseable.
/// Without `--verbose`, `RUST_LOG` decides; unset means warnings only.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Render {
            input,
            engine,
            words_per_frame,
            debug_every,
            mode,
        } => {
            let mut config = base_config(&cli)?;
            input.apply(&mut config);
            engine.apply(&mut config);
            if let Some(n) = words_per_frame {
                config.render.words_per_frame = *n;
            }
            if let Some(n) = debug_every {
                config.render.debug_every = *n;
            }
            cmd_render(&config, &input.input_dir, *mode)
        }
        Commands::Tokenize { input } => {
            let mut config = base_config(&cli)?;
            input.apply(&mut config);
            cmd_tokenize(&config, &input.input_dir)
        }
        Commands::Top {
            input,
            engine,
            limit,
        } => {
            let mut config = base_config(&cli)?;
            input.apply(&mut config);
            engine.apply(&mut config);
            cmd_top(&config, &input.input_dir, *limit)
        }
    }
}

/// Defaults, overlaid by the config file when one is given.
fn base_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().or_else(|| {
        std::env::var("TIMECLOUD_CONFIG")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    });

    match path {
        Some(path) => load_config(&path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn find_articles(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        bail!("input directory not found: {}", dir.display());
    }
    let files = discover_articles(dir)
        .with_context(|| format!("failed to list {}", dir.display()))?;
    if files.is_empty() {
        bail!("no .txt files found in {}", dir.display());
    }
    tracing::info!("found {} article files", files.len());
    Ok(files)
}

fn build_tokenizer(config: &Config) -> Result<Tokenizer> {
    let stopwords = if config.tokenizer.filter_stopwords {
        load_stopwords(&config.tokenizer.stopwords_file).context("failed to load stopwords")?
    } else {
        HashSet::new()
    };
    Ok(Tokenizer::new(&config.tokenizer, stopwords))
}

/// Validate config, then read and tokenize every article under `dir`.
fn load_tokens(config: &Config, dir: &Path) -> Result<Vec<String>> {
    config.validate().context("invalid configuration")?;
    let files = find_articles(dir)?;
    let tokenizer = build_tokenizer(config)?;
    let tokens = tokenize_files(&tokenizer, &files).context("failed to tokenize articles")?;
    if tokens.is_empty() {
        bail!("no words to process after filtering");
    }
    tracing::info!("total words after filtering: {}", tokens.len());
    Ok(tokens)
}

fn cmd_render(config: &Config, dir: &Path, mode: Mode) -> Result<()> {
    let tokens = load_tokens(config, dir)?;
    let total = tokens.len();
    let mut cloud = TimeCloud::from_config(&config.engine)?;

    let stdout = io::stdout().lock();
    let mut renderer: Box<dyn Renderer> = match mode {
        Mode::Debug => Box::new(DebugRenderer::new(
            stdout,
            cloud.capacity(),
            config.render.debug_every,
        )),
        Mode::Progress => Box::new(ProgressRenderer::new(stdout, Some(total))),
        Mode::Jsonl => Box::new(JsonLinesRenderer::new(stdout)),
    };

    let batch = config.render.words_per_frame;
    tracing::info!("processing {total} words (batch size: {batch}, mode: {mode:?})");

    let frames = if batch == 1 {
        render_all(renderer.as_mut(), cloud.process(tokens))?
    } else {
        render_all(renderer.as_mut(), cloud.process_batched(tokens, batch)?)?
    };

    tracing::info!(
        "rendered {frames} frames; window {}/{}, {} distinct words",
        cloud.window_size(),
        cloud.capacity(),
        cloud.distinct_tokens()
    );
    Ok(())
}

fn cmd_tokenize(config: &Config, dir: &Path) -> Result<()> {
    config.validate().context("invalid configuration")?;
    let files = find_articles(dir)?;
    let tokenizer = build_tokenizer(config)?;

    let mut total = 0;
    let mut distinct = HashSet::new();
    for path in &files {
        let tokens = tokenize_file(&tokenizer, path)
            .with_context(|| format!("failed to tokenize {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed");
        println!("{name}: {} words", tokens.len());
        total += tokens.len();
        distinct.extend(tokens);
    }

    println!("files:      {}", files.len());
    println!("stopwords:  {}", tokenizer.stopword_count());
    println!("words:      {total}");
    println!("distinct:   {}", distinct.len());
    Ok(())
}

fn cmd_top(config: &Config, dir: &Path, limit: Option<usize>) -> Result<()> {
    let tokens = load_tokens(config, dir)?;
    let total = tokens.len();
    let mut cloud = TimeCloud::from_config(&config.engine)?;

    // One batch covering the whole stream: no per-token snapshots.
    cloud.process_batched(tokens, total)?.for_each(drop);

    let limit = limit.unwrap_or(cloud.display_limit());
    println!("processed:  {}", cloud.total_processed());
    println!("window:     {}/{}", cloud.window_size(), cloud.capacity());
    println!("distinct:   {}", cloud.distinct_tokens());
    println!("latest:     {}", cloud.latest_token().unwrap_or(""));
    println!();
    for (i, (word, count)) in cloud.top_n(limit).iter().enumerate() {
        println!("{:3}. {word:<20} {count}", i + 1);
    }
    Ok(())
}
