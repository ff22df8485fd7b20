use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Extract exam questions from documents and store them as typed records
#[derive(Parser, Debug)]
#[command(name = "question-bank", version, about)]
pub struct Cli {
    /// Path to the JSON configuration file.
    /// Defaults to ~/QuestionBank/config.json
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file. Overrides the `database` key of the configuration
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a PDF into chapters and store every matched question
    Ingest {
        /// Path to the input PDF
        input: PathBuf,
    },

    /// Enter questions by hand
    Author,

    /// Print one page of a PDF, optionally filtered by the question pattern
    Page {
        /// Path to the input PDF
        input: PathBuf,

        /// Page number, starting from 1
        #[arg(short, long)]
        page: usize,

        /// Keep only the text matched by the configured question pattern
        #[arg(short, long, default_value_t = false)]
        filter: bool,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
