use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notemaster", version)]
#[command(about = "Study notes with generated quiz questions and score history", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $NOTEMASTER_ROOT, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommands),

    /// Generate questions and answer them
    #[command(subcommand)]
    Quiz(QuizCommands),

    /// Score history
    #[command(subcommand)]
    Stats(StatsCommands),

    /// Manage the API key
    #[command(subcommand)]
    Key(KeyCommands),
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Create or overwrite a note
    #[command(alias = "n")]
    Add {
        title: String,

        /// Note text (read from stdin when omitted)
        content: Option<String>,
    },

    /// List notes
    #[command(alias = "ls")]
    List,

    /// Show a note in full
    #[command(alias = "v")]
    Show { title: String },

    /// Replace the content of an existing note
    #[command(alias = "e")]
    Edit {
        title: String,

        /// New note text (read from stdin when omitted)
        content: Option<String>,
    },

    /// Delete a note
    #[command(alias = "del")]
    Rm { title: String },
}

#[derive(Subcommand, Debug)]
pub enum QuizCommands {
    /// Generate questions from a note, replacing any previous set
    #[command(alias = "gen")]
    Generate { title: String },

    /// List the stored questions of a note
    #[command(alias = "ls")]
    List { title: String },

    /// Answer a question and record the score
    Answer {
        title: String,

        /// Question number, as shown by `quiz list`
        number: usize,

        /// Your answer (read from stdin when omitted)
        answer: Option<String>,
    },

    /// Delete the stored questions of a note
    Clear { title: String },
}

#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Show the score history of one note, or of every note
    Show { title: Option<String> },

    /// Delete the score history of one note, or of every note
    Clear { title: Option<String> },
}

#[derive(Subcommand, Debug)]
pub enum KeyCommands {
    /// Save an API key to the .env file in the data directory
    Set { key: String },

    /// Remove the .env file
    Reset,

    /// Show whether an API key is configured
    Status,
}
