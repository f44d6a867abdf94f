use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use exam_quiz::clients::{ClientType, FlexibleClient};
use exam_quiz::config::QuizConfig;
use exam_quiz::export;
use exam_quiz::interceptors::FileInterceptor;
use exam_quiz::terminal::{read_key, KeyPress, TerminalUi, DISCLAIMER};
use exam_quiz::ui::run_round;
use exam_quiz::{Difficulty, ExamTrack, QuestionGenerator, QuestionRequest, SessionState};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Moderate,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Moderate => Difficulty::Moderate,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "AI-generated PMP/CAPM/DASM/PMI-ACP practice questions", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    GROQ_API_KEY         API key for the Groq client (GROK_API_KEY also accepted)
    DEEPSEEK_API_KEY     API key for the DeepSeek client
    QUIZ_PRIMARY_MODEL   Groq model tried first
    QUIZ_FALLBACK_MODEL  Groq model tried when the first fails (empty disables)
    QUIZ_DEEPSEEK_MODEL  DeepSeek model (default: deepseek-chat)
    RUST_LOG             Log filter (default: exam_quiz=info)

KEYS:
    n  next question     r  reset session
    e  export CSV        q  quit")]
struct Args {
    /// Topic for the questions; blank picks a random domain
    #[arg(short, long, default_value = "")]
    topic: String,

    #[arg(short, long, value_enum, default_value = "moderate")]
    difficulty: DifficultyArg,

    /// Exam track: pmp, capm, dasm, pmi-acp
    #[arg(long)]
    track: Option<ExamTrack>,

    /// Model client: groq, deepseek, mock [default: auto-detect from available keys]
    #[arg(short, long)]
    client: Option<ClientType>,

    /// Stop after this many answered questions
    #[arg(long)]
    rounds: Option<u32>,

    /// CSV file written by the export key and on exit
    #[arg(long, default_value = "quiz_history.csv")]
    export: PathBuf,

    /// Directory for prompt/response transcripts
    #[arg(long)]
    transcripts: Option<PathBuf>,
}

fn export_history(session: &SessionState, path: &Path) -> Result<()> {
    let rows = export::to_rows(session.history());
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    export::write_csv(&rows, file)?;
    println!("Exported {} answered question(s) to {}", rows.len(), path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("exam_quiz=info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = QuizConfig::from_env();

    let client_type = args.client.unwrap_or_default();
    let mut generator = QuestionGenerator::new(FlexibleClient::from_config(client_type, &config));
    if let Some(dir) = args.transcripts.clone().or_else(|| config.transcript_dir.clone()) {
        generator = generator.with_interceptor(Arc::new(FileInterceptor::new(dir)));
    }

    let request = QuestionRequest::new(
        args.topic.clone(),
        args.difficulty.into(),
        args.track.unwrap_or(config.exam_track),
    );

    println!("{} practice quiz ({}), client: {}", request.track, request.difficulty, client_type);
    println!("{}", DISCLAIMER);

    let mut session = SessionState::new();
    let mut ui = TerminalUi::new();

    loop {
        if args.rounds.is_some_and(|limit| session.total() >= limit) {
            break;
        }
        println!();
        println!("[n]ext  [r]eset  [e]xport  [q]uit");
        match read_key()? {
            KeyPress::Char('n') | KeyPress::Char('N') => {
                // Failures were already shown; the session is unchanged and the user may retry.
                let _ = run_round(&generator, &mut session, &request, &mut ui).await;
            }
            KeyPress::Char('r') | KeyPress::Char('R') => {
                session.reset();
                println!("Session reset.");
            }
            KeyPress::Char('e') | KeyPress::Char('E') => export_history(&session, &args.export)?,
            KeyPress::Char('q') | KeyPress::Char('Q') | KeyPress::Escape => break,
            KeyPress::Char(_) => {}
        }
    }

    println!(
        "Final score: {}/{} ({:.0}%)",
        session.score(),
        session.total(),
        session.score_percent()
    );
    if !session.history().is_empty() {
        export_history(&session, &args.export)?;
    }
    Ok(())
}
