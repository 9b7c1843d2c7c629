//! rapid-study - build study material from course notes.
//!
//! Reads a `.txt`/`.md` file, or every such file under a directory, and
//! writes the summary, keywords, flashcards, quiz, plan and a JSON dump
//! into one output directory per input.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;

use rapid_study::pipeline::format;
use rapid_study::{build_study_artifacts, KeywordStrategy, StudyConfig, StudySpec};

const INPUT_EXTENSIONS: [&str; 2] = ["txt", "md"];

#[derive(Debug, Parser)]
#[command(name = "rapid-study", version, about = "Generate study material from a text file")]
struct Cli {
    /// A .txt or .md file, or a directory to search for them
    input: PathBuf,

    /// Study spec JSON (`{"v": 1, "options": {...}}`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Language tag or name, e.g. "fr" or "french"
    #[arg(long)]
    language: Option<String>,

    /// Number of revision days
    #[arg(long)]
    days: Option<usize>,

    /// Minutes per revision day
    #[arg(long)]
    minutes: Option<usize>,

    /// Quiz shuffle seed
    #[arg(long)]
    seed: Option<u64>,

    /// Keyword strategy: tfidf or rake
    #[arg(long)]
    strategy: Option<KeywordStrategy>,

    /// Output directory (default: `<input stem>_study` beside the input)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info,rapid_study=debug",
        _ => "debug,rapid_study=trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let inputs = collect_inputs(&cli.input)?;
    if inputs.is_empty() {
        bail!("no .txt or .md files under {}", cli.input.display());
    }

    for input in &inputs {
        let out_dir = output_dir(input, cli.out.as_deref(), inputs.len() > 1);
        process_file(input, &out_dir, &config)?;
        println!("Wrote study files to {}", out_dir.display());
    }
    Ok(())
}

/// Spec file (if any) with command-line overrides on top
fn load_config(cli: &Cli) -> Result<StudyConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            StudySpec::from_json(&json)
                .and_then(|spec| spec.resolve())
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => StudyConfig::default(),
    };

    if let Some(language) = &cli.language {
        config.language = language.clone();
    }
    if let Some(days) = cli.days {
        config.total_days = days;
    }
    if let Some(minutes) = cli.minutes {
        config.daily_minutes = minutes;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(strategy) = cli.strategy {
        config.keyword_strategy = strategy;
    }
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INPUT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn collect_inputs(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("invalid path: {}", input.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", input.display()))?;
        if entry.file_type().is_file() && has_input_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// `<stem>_study`, beside the input or under `--out` when several inputs
/// share one output root.
fn output_dir(input: &Path, out: Option<&Path>, many: bool) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    let name = format!("{stem}_study");
    match out {
        Some(root) if many => root.join(name),
        Some(root) => root.to_path_buf(),
        None => input.with_file_name(name),
    }
}

fn process_file(input: &Path, out_dir: &Path, config: &StudyConfig) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let artifacts = build_study_artifacts(&text, config);
    if artifacts.is_empty() {
        tracing::warn!(input = %input.display(), "no usable text");
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let files = [
        ("summary.txt", format::render_summary(&artifacts)),
        ("keywords.txt", format::render_keywords(artifacts.keywords())),
        ("flashcards.txt", format::render_flashcards(artifacts.flashcards())),
        ("quiz.txt", format::render_quiz(artifacts.quiz())),
        ("plan.txt", format::render_plan(artifacts.plan())),
        ("artifacts.json", format::to_json(&artifacts)?),
    ];
    for (name, contents) in files {
        let path = out_dir.join(name);
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_dir() {
        let input = Path::new("notes/biology.md");
        assert_eq!(output_dir(input, None, false), PathBuf::from("notes/biology_study"));
        assert_eq!(output_dir(input, Some(Path::new("out")), false), PathBuf::from("out"));
        assert_eq!(
            output_dir(input, Some(Path::new("out")), true),
            PathBuf::from("out/biology_study")
        );
    }

    #[test]
    fn test_input_extensions() {
        assert!(has_input_extension(Path::new("a.txt")));
        assert!(has_input_extension(Path::new("a.MD")));
        assert!(!has_input_extension(Path::new("a.pdf")));
        assert!(!has_input_extension(Path::new("README")));
    }

    #[test]
    fn test_cli_parses_overrides() {
        let cli = Cli::try_parse_from([
            "rapid-study", "notes.txt", "--days", "3", "--strategy", "rake", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.days, Some(3));
        assert_eq!(cli.strategy, Some(KeywordStrategy::Rake));
        assert_eq!(cli.verbose, 2);
    }
}
