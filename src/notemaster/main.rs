use clap::Parser;
use directories::ProjectDirs;
use notemaster::api::NotemasterApi;
use notemaster::commands::CmdResult;
use notemaster::config::Config;
use notemaster::error::{NotemasterError, Result};
use notemaster::llm::chat::ChatCompletionClient;
use notemaster::store::fs_backend::FsBackend;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod args;
mod print;
use args::{Cli, Commands, KeyCommands, NoteCommands, QuizCommands, StatsCommands};
use print::{
    print_evaluation, print_full_notes, print_messages, print_notes, print_questions, print_stats,
};

const ROOT_VAR: &str = "NOTEMASTER_ROOT";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

type AppApi = NotemasterApi<FsBackend, ChatCompletionClient>;

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let api = init_api(cli.root.clone())?;
    match cli.command {
        Commands::Note(cmd) => handle_note(&api, cmd),
        Commands::Quiz(cmd) => handle_quiz(&api, cmd),
        Commands::Stats(cmd) => handle_stats(&api, cmd),
        Commands::Key(cmd) => handle_key(&api, cmd),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// `--root`, then `$NOTEMASTER_ROOT`, then the platform data directory.
fn resolve_root(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| std::env::var_os(ROOT_VAR).filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| {
            ProjectDirs::from("com", "notemaster", "notemaster")
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_api(root: Option<PathBuf>) -> Result<AppApi> {
    let root = resolve_root(root);
    debug!("Using data directory {}", root.display());

    let config = Config::load(root.clone())?;
    let client = ChatCompletionClient::from_config(&config)?;
    let dotfile = config.dotfile_path();
    Ok(NotemasterApi::new(
        FsBackend::new(root),
        client,
        dotfile,
        config.credential,
    ))
}

/// Use the argument when given, otherwise read piped stdin.
fn text_or_stdin(text: Option<String>, what: &str) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(NotemasterError::Api(format!(
            "No {} given. Pass it as an argument or pipe it on stdin.",
            what
        )));
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn finish(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    Ok(())
}

fn handle_note(api: &AppApi, cmd: NoteCommands) -> Result<()> {
    match cmd {
        NoteCommands::Add { title, content } => {
            let content = text_or_stdin(content, "note content")?;
            finish(api.create_note(&title, &content)?)
        }
        NoteCommands::List => {
            let result = api.list_notes()?;
            print_notes(&result.notes);
            finish(result)
        }
        NoteCommands::Show { title } => {
            let result = api.view_note(&title)?;
            print_full_notes(&result.notes);
            finish(result)
        }
        NoteCommands::Edit { title, content } => {
            let content = text_or_stdin(content, "note content")?;
            finish(api.update_note(&title, &content)?)
        }
        NoteCommands::Rm { title } => finish(api.delete_note(&title)?),
    }
}

fn handle_quiz(api: &AppApi, cmd: QuizCommands) -> Result<()> {
    match cmd {
        QuizCommands::Generate { title } => {
            let result = api.generate_questions(&title)?;
            print_questions(&result.questions);
            finish(result)
        }
        QuizCommands::List { title } => {
            let result = api.list_questions(&title)?;
            print_questions(&result.questions);
            finish(result)
        }
        QuizCommands::Answer {
            title,
            number,
            answer,
        } => {
            let answer = text_or_stdin(answer, "answer")?;
            let result = api.answer_question(&title, number, &answer)?;
            if let Some(evaluation) = &result.evaluation {
                print_evaluation(evaluation);
            }
            finish(result)
        }
        QuizCommands::Clear { title } => finish(api.delete_questions(&title)?),
    }
}

fn handle_stats(api: &AppApi, cmd: StatsCommands) -> Result<()> {
    match cmd {
        StatsCommands::Show { title } => {
            let detailed = title.is_some();
            let result = match title {
                Some(title) => api.note_stats(&title)?,
                None => api.all_stats()?,
            };
            print_stats(&result.stats, detailed);
            finish(result)
        }
        StatsCommands::Clear { title } => finish(api.clear_stats(title.as_deref())?),
    }
}

fn handle_key(api: &AppApi, cmd: KeyCommands) -> Result<()> {
    match cmd {
        KeyCommands::Set { key } => finish(api.set_api_key(&key)?),
        KeyCommands::Reset => finish(api.reset_api_key()?),
        KeyCommands::Status => finish(api.key_status()),
    }
}
