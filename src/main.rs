use anyhow::{Context, Result};
use bytefreq::cli::{Cli, Command, InspectArgs, OutputFormat, ScoreArgs, TrainArgs};
use bytefreq::config::Config;
use bytefreq::corpus::CorpusLoader;
use bytefreq::report::{self, ModelReport, ScoreRecord};
use bytefreq::{persistence, Analyzer, PersistenceOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// `--model` if given, else `[model] path` from the config
fn model_path(explicit: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    explicit
        .or_else(|| config.model.path.clone())
        .context("No model file: pass --model PATH or set [model] path in the config")
}

fn corpus_loader(
    config: &Config,
    max_depth: Option<usize>,
    hidden: bool,
) -> Result<CorpusLoader> {
    let mut loader = CorpusLoader::from_config(&config.corpus);
    if let Some(depth) = max_depth {
        if depth == 0 {
            anyhow::bail!("Invalid value for --max-depth: 0 (must be >= 1)");
        }
        loader = loader.with_max_depth(depth);
    }
    if hidden {
        loader = loader.with_hidden(true);
    }
    Ok(loader)
}

fn run_train(args: TrainArgs, config: &Config) -> Result<()> {
    let path = model_path(args.model, config)?;
    let analyzer = Analyzer::new();

    if args.append {
        if path.exists() {
            analyzer
                .restore(&path)
                .with_context(|| format!("Failed to restore {}", path.display()))?;
        } else {
            tracing::debug!("{} does not exist yet, starting fresh", path.display());
        }
    }

    let loader = corpus_loader(config, args.max_depth, args.hidden)?;
    let stats = loader.train(&analyzer, &args.inputs)?;

    let mut options = PersistenceOptions::new().with_legacy_layout(args.legacy);
    if let Some(desc) = args.description {
        options = options.with_description(desc);
    }
    analyzer
        .save_with(&path, &options)
        .with_context(|| format!("Failed to save {}", path.display()))?;

    println!(
        "Trained {} from {} input(s), {} bytes (model total: {} bytes)",
        path.display(),
        stats.files,
        stats.bytes,
        analyzer.size()
    );
    Ok(())
}

fn load_reference(args: &ScoreArgs, config: &Config) -> Result<Analyzer> {
    if let Some(preset) = args.preset {
        tracing::debug!("Scoring against preset {}", preset.name());
        return Ok(preset.analyzer());
    }

    let path = model_path(args.model.clone(), config)?;
    let analyzer = Analyzer::new();
    analyzer
        .restore(&path)
        .with_context(|| format!("Failed to restore {}", path.display()))?;
    Ok(analyzer)
}

fn run_score(args: ScoreArgs, config: &Config) -> Result<()> {
    let threshold = args.threshold.unwrap_or(config.score.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!(
            "Invalid value for --threshold: {} (must be within [0, 1])",
            threshold
        );
    }
    let mode = args.mode.unwrap_or(config.score.mode);

    let analyzer = load_reference(&args, config)?;
    if !analyzer.is_trained() {
        tracing::warn!("Reference model is untrained; every score will be NaN");
    }

    let mut records = Vec::new();
    if let Some(text) = &args.text {
        let score = analyzer.score_with_mode(text.as_bytes(), mode);
        records.push(ScoreRecord::new("<text>", text.len() as u64, score, threshold));
    } else {
        if args.inputs.is_empty() {
            anyhow::bail!(
                "Nothing to score: pass --text TEXT or one or more inputs (- for stdin)"
            );
        }
        let loader = CorpusLoader::from_config(&config.corpus);
        for source in loader.collect(&args.inputs)? {
            let contents = source.read()?;
            if contents.is_empty() {
                tracing::warn!("{} is empty; its score is undefined", source.name());
            }
            let score = analyzer.score_with_mode(&contents, mode);
            records.push(ScoreRecord::new(
                source.name(),
                contents.len() as u64,
                score,
                threshold,
            ));
        }
    }

    match args.format {
        OutputFormat::Text => print!("{}", report::format_scores_text(&records)),
        OutputFormat::Json => println!("{}", report::format_scores_json(&records)?),
    }
    Ok(())
}

fn run_inspect(args: InspectArgs, config: &Config) -> Result<()> {
    let path = model_path(args.model, config)?;
    let loaded = persistence::load_model(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    let report = ModelReport::new(
        path.display().to_string(),
        &loaded.histogram,
        loaded.metadata,
        args.top,
    );

    match args.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Command::Train(train) => run_train(train, &config),
        Command::Score(score) => run_score(score, &config),
        Command::Inspect(inspect) => run_inspect(inspect, &config),
    }
}
