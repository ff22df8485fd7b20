use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use question_bank::config::{self, IngestConfig};
use question_bank::db;
use question_bank::pipeline::extraction::{extract_file, select_page, PdfTextExtractor};
use question_bank::pipeline::ingest::{ingest_document, AuthoringSession, IngestRunner, SqliteQuestionStore};
use question_bank::pipeline::segmentation::{compile, filter_matches, render_filtered, MatchMode};

use crate::cli::{Cli, Command};

pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Ingest { input } => ingest(cli, input),
        Command::Author => author(cli),
        Command::Page {
            input,
            page,
            filter,
            output,
        } => page_text(cli, input, *page, *filter, output.as_deref()),
    }
}

fn load_config(cli: &Cli, required: bool) -> Result<IngestConfig> {
    let path = cli.config.clone().unwrap_or_else(config::default_config_path);
    if !required && cli.config.is_none() && !path.exists() {
        return Ok(IngestConfig::default());
    }
    IngestConfig::load(&path).with_context(|| format!("loading {}", path.display()))
}

fn open_store(cli: &Cli, config: &IngestConfig) -> Result<SqliteQuestionStore> {
    let path = cli.database.clone().unwrap_or_else(|| config.database_path());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    SqliteQuestionStore::open(&path).with_context(|| format!("opening {}", path.display()))
}

fn ingest(cli: &Cli, input: &Path) -> Result<()> {
    let config = load_config(cli, true)?;
    let runner = IngestRunner::from_config(&config)?;
    let store = open_store(cli, &config)?;

    let result = ingest_document(&runner, &store, &PdfTextExtractor, input, None)?;

    println!("Stored {} question(s).", result.persisted_count);
    if result.failed_count > 0 {
        println!("Failed to store {} question(s):", result.failed_count);
        for error in &result.errors {
            println!("  {error}");
        }
    }
    Ok(())
}

fn author(cli: &Cli) -> Result<()> {
    let config = load_config(cli, false)?;
    let store = open_store(cli, &config)?;

    let stdin = io::stdin();
    let mut session = AuthoringSession::new(stdin.lock(), io::stdout(), config.record_defaults());
    let summary = session.run(&store)?;

    for (question_type, count) in db::count_by_type(store.connection())? {
        println!("  {question_type}: {count}");
    }
    println!("Stored {} question(s) this session.", summary.stored);
    Ok(())
}

fn page_text(cli: &Cli, input: &Path, page: usize, filter: bool, output: Option<&Path>) -> Result<()> {
    let pages = extract_file(&PdfTextExtractor, input)?;
    let text = &select_page(&pages, page)?.text;

    let rendered = if filter {
        let config = load_config(cli, true)?;
        let pattern = config
            .question_pattern
            .as_deref()
            .ok_or(config::ConfigError::MissingKey("question_pattern"))?;
        let matcher = compile("filter", pattern, MatchMode::MultiLine)?;
        let matches = filter_matches(text, &matcher)?;
        if matches.is_empty() {
            eprintln!("No content matched the configured pattern.");
        }
        render_filtered(&matches)
    } else {
        text.clone()
    };

    match output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("writing {}", path.display()))?;
            println!("Output written to: {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
