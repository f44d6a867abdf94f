//! Terminal implementation of [`QuizUi`] using single keystrokes.

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal,
};
use std::io::{self, Write};
use std::time::Duration;

use crate::error::GenerationError;
use crate::question::{Label, QuestionRecord};
use crate::session::{AnswerOutcome, SessionState};
use crate::ui::QuizUi;

pub const DISCLAIMER: &str = "All questions are generated by AI and should be reviewed for accuracy. \
This tool is not affiliated with or endorsed by PMI.";

/// Key pressed at a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Escape,
}

/// Read one key in raw mode, falling back to a line of input.
pub fn read_key() -> io::Result<KeyPress> {
    match read_single_key() {
        Ok(key) => Ok(key),
        Err(_) => read_line_key(),
    }
}

fn read_single_key() -> io::Result<KeyPress> {
    terminal::enable_raw_mode()?;
    let result = wait_for_key();
    terminal::disable_raw_mode()?;
    result
}

fn wait_for_key() -> io::Result<KeyPress> {
    loop {
        if !event::poll(Duration::from_secs(300))? {
            return Ok(KeyPress::Escape);
        }
        if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
            if kind != KeyEventKind::Press {
                continue;
            }
            match code {
                KeyCode::Char(c) => return Ok(KeyPress::Char(c)),
                KeyCode::Esc => return Ok(KeyPress::Escape),
                _ => {}
            }
        }
    }
}

fn read_line_key() -> io::Result<KeyPress> {
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(KeyPress::Escape);
    }
    Ok(input.trim().chars().next().map(KeyPress::Char).unwrap_or(KeyPress::Escape))
}

#[derive(Debug, Default)]
pub struct TerminalUi;

impl TerminalUi {
    pub fn new() -> Self {
        Self
    }
}

impl QuizUi for TerminalUi {
    fn show_question(&mut self, question: &QuestionRecord, session: &SessionState) {
        println!();
        println!("Question {}  (score {}/{})", session.total() + 1, session.score(), session.total());
        println!("{}", question.prompt_text());
        for (label, text) in question.options() {
            println!("  {}. {}", label, text);
        }
        print!("Choose A-D (q to skip): ");
        let _ = io::stdout().flush();
    }

    fn collect_choice(&mut self) -> Option<Label> {
        loop {
            match read_key() {
                Ok(KeyPress::Char(c)) => {
                    if let Some(label) = Label::from_char(c) {
                        println!("{}", label);
                        return Some(label);
                    }
                    if c.eq_ignore_ascii_case(&'q') {
                        println!();
                        return None;
                    }
                }
                Ok(KeyPress::Escape) | Err(_) => {
                    println!();
                    return None;
                }
            }
        }
    }

    fn show_feedback(&mut self, outcome: &AnswerOutcome, question: &QuestionRecord, session: &SessionState) {
        if let AnswerOutcome::Recorded { is_correct, correct_label } = outcome {
            if *is_correct {
                println!("Correct.");
            } else {
                println!("Incorrect. The answer is {}. {}", correct_label, question.option(*correct_label));
            }
        }
        if !question.explanation().is_empty() {
            println!("Explanation: {}", question.explanation());
        }
        for (label, _) in question.options() {
            let rationale = question.rationale(label);
            if !rationale.is_empty() {
                println!("  {}: {}", label, rationale);
            }
        }
        println!("Score: {}/{} ({:.0}%)", session.score(), session.total(), session.score_percent());
    }

    fn show_error(&mut self, error: &GenerationError) {
        eprintln!("{}", error.user_message());
        if let Some(raw) = error.raw_output() {
            let preview: String = raw.chars().take(800).collect();
            eprintln!("{}", preview);
        }
    }
}
