use std::fmt;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use quiz_core::model::{OptionPresentation, Question, QuestionDraft};
use services::{
    Clock, DashboardVm, HistoryStore, InMemoryHistoryStore, QuestionSession, QuizService,
    StatsService, load_questions,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod sample;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidFile { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidFile { raw } => write!(f, "invalid --file value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- run    [--file <quiz.json>] [--json-stats]");
    eprintln!("  cargo run -p app -- sample   # print the built-in quiz as JSON");
    eprintln!();
    eprintln!("Without --file the built-in hiragana quiz is used.");
    eprintln!("Answer with the option letter; 'q' ends the quiz early.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE   default for --file");
    eprintln!("  RUST_LOG    log filter (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Run,
    Sample,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "run" => Some(Self::Run),
            "sample" => Some(Self::Sample),
            _ => None,
        }
    }
}

struct Args {
    file: Option<String>,
    json_stats: bool,
}

impl Args {
    fn parse_run(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut file = std::env::var("QUIZ_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let mut json_stats = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" => {
                    let value = require_value(args, "--file")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidFile { raw: value });
                    }
                    file = Some(value);
                }
                "--json-stats" => json_stats = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { file, json_stats })
    }
}

/// What the player typed for one question.
enum Reply {
    Pick(usize),
    Quit,
    Invalid,
}

fn parse_reply(line: &str, option_count: usize) -> Reply {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return Reply::Quit;
    }
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => {
            let index = usize::from(letter.to_ascii_uppercase() as u8 - b'A');
            if index < option_count {
                Reply::Pick(index)
            } else {
                Reply::Invalid
            }
        }
        _ => Reply::Invalid,
    }
}

fn render_options(session: &QuestionSession, out: &mut impl Write) -> io::Result<()> {
    let engine = session.engine();
    for (index, (label, presentation)) in session
        .question()
        .options()
        .iter()
        .zip(engine.presentations())
        .enumerate()
    {
        let marker = match presentation {
            OptionPresentation::Neutral | OptionPresentation::Dimmed => ' ',
            OptionPresentation::SelectedPendingLock => '>',
            OptionPresentation::Correct => '✓',
            OptionPresentation::IncorrectSelected => '✗',
        };
        let letter = engine.option_letter(index).unwrap_or('?');
        writeln!(out, "  {marker} {letter}) {label}")?;
    }
    Ok(())
}

fn render_dashboard(dashboard: &DashboardVm, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\nStatistics")?;
    for card in &dashboard.cards {
        writeln!(out, "\n{}", card.title)?;
        for row in &card.rows {
            writeln!(out, "  {:<26}{}", row.label, row.value)?;
        }
    }
    Ok(())
}

async fn play(
    quiz: &QuizService,
    questions: Vec<Question>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = questions.len();
    'questions: for (position, question) in questions.into_iter().enumerate() {
        let mut session = quiz.start(question);
        writeln!(out, "\n[{}/{}] {}", position + 1, total, session.question().prompt())?;
        render_options(&session, out)?;

        while !session.is_answered() {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break 'questions;
            }
            match parse_reply(&line, session.question().option_count()) {
                Reply::Pick(index) => {
                    quiz.answer(&mut session, index).await?;
                }
                Reply::Quit => break 'questions,
                Reply::Invalid => {
                    writeln!(out, "  pick a letter between A and {}", last_letter(&session))?;
                }
            }
        }

        render_options(&session, out)?;
        if let Some(feedback) = session.engine().feedback() {
            writeln!(out, "{feedback}")?;
        }
        if let Some(explanation) = session.engine().explanation() {
            writeln!(out, "{explanation}")?;
        }
    }
    Ok(())
}

fn last_letter(session: &QuestionSession) -> char {
    let last = session.question().option_count().saturating_sub(1);
    session.engine().option_letter(last).unwrap_or('Z')
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Run,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Run,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            io::Error::new(io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let skip = usize::from(argv.first().is_some_and(|first| !first.starts_with("--")));
    let mut iter = argv.into_iter().skip(skip);

    match cmd {
        Command::Sample => {
            println!("{}", serde_json::to_string_pretty(&sample::sample_quiz())?);
            Ok(())
        }
        Command::Run => {
            let parsed = Args::parse_run(&mut iter).map_err(|e| {
                eprintln!("{e}");
                print_usage();
                e
            })?;

            let questions = match parsed.file.as_deref() {
                Some(path) => load_questions(path)?,
                None => sample::sample_quiz()
                    .questions
                    .into_iter()
                    .map(QuestionDraft::validate)
                    .collect::<Result<Vec<_>, _>>()?,
            };
            info!(
                count = questions.len(),
                source = parsed.file.as_deref().unwrap_or("built-in"),
                "quiz loaded"
            );

            let history: Arc<dyn HistoryStore> = Arc::new(InMemoryHistoryStore::new());
            let quiz = QuizService::new(Clock::system(), Arc::clone(&history));
            let stats = StatsService::new(history);

            let stdin = io::stdin();
            let mut input = stdin.lock();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            play(&quiz, questions, &mut input, &mut out).await?;

            if parsed.json_stats {
                let session_stats = stats.session_stats().await?;
                writeln!(out, "{}", serde_json::to_string_pretty(&session_stats)?)?;
            } else {
                render_dashboard(&stats.dashboard().await?, &mut out)?;
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
