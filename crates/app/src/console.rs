use std::io::{self, BufRead, Write};
use std::time::Duration;

use quiz_core::model::{HighScore, Seed};
use services::QuizLoopService;
use services::session::{
    ChoiceMark, QuestionView, QuizSession, SessionCompletion, announce_answer, announce_final,
    choice_label, feedback_marks, parse_choice_input,
};

const BAR_WIDTH: usize = 20;

/// Line-oriented terminal front end.
pub struct Console<R, W> {
    input: R,
    output: W,
}

enum PlayOutcome {
    Finished(SessionCompletion),
    Abandoned,
    Closed,
}

/// Leaves the seed prompt. Any other text there is a seed, `quit` included.
const SEED_QUIT: &str = ":q";

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), SEED_QUIT | "quit" | "exit" | "esc")
}

fn progress_bar(percent: u8) -> String {
    let filled = BAR_WIDTH * usize::from(percent) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn high_score_line(high: Option<&HighScore>) -> String {
    match high {
        Some(high) => format!("High score: {} / {}", high.score(), high.total()),
        None => "No high score yet".to_owned(),
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a prompt and read one line. `None` once input is closed.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }

    /// Start screen → quiz → result screen, until the user quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the terminal and any session contract violation.
    pub async fn run(
        &mut self,
        svc: &QuizLoopService,
        default_seed: Option<Seed>,
        feedback_delay: Duration,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            writeln!(self.output, "\n== Quiz ==")?;
            writeln!(self.output, "{}", high_score_line(svc.high_score().await.as_ref()))?;
            let hint = default_seed
                .as_ref()
                .map_or_else(|| "blank for random".to_owned(), |s| format!("blank keeps {s}"));
            let Some(line) = self.prompt(&format!("Seed ({hint}), or '{SEED_QUIT}' to quit: "))?
            else {
                return Ok(());
            };
            if line.trim() == SEED_QUIT {
                return Ok(());
            }
            let seed = Seed::from_input(&line).or_else(|| default_seed.clone());

            let mut session = svc.start_session(seed.as_ref())?;
            match self.play(svc, &mut session, feedback_delay).await? {
                PlayOutcome::Finished(completion) => {
                    writeln!(self.output, "\nYour score: {}", completion.final_score)?;
                    writeln!(
                        self.output,
                        "{}",
                        announce_final(completion.final_score, completion.high_score.as_ref())
                    )?;
                    let Some(line) = self.prompt("Press Enter to restart, or 'quit': ")? else {
                        return Ok(());
                    };
                    if is_quit(&line) {
                        return Ok(());
                    }
                }
                PlayOutcome::Abandoned => {}
                PlayOutcome::Closed => return Ok(()),
            }
        }
    }

    async fn play(
        &mut self,
        svc: &QuizLoopService,
        session: &mut QuizSession,
        feedback_delay: Duration,
    ) -> Result<PlayOutcome, Box<dyn std::error::Error>> {
        loop {
            let view = QuestionView::from_session(session)?;
            let question = session.current_question()?.clone();
            let progress = session.progress();

            writeln!(
                self.output,
                "\n{} {:>3}%  Question {} of {}  Score {}",
                progress_bar(progress.percent()),
                progress.percent(),
                view.number,
                view.total,
                progress.score
            )?;
            writeln!(self.output, "{}", view.heading)?;
            for choice in &view.choices {
                writeln!(self.output, "  {}) {}", choice.label, choice.text)?;
            }

            let last = choice_label(view.choices.len().saturating_sub(1)).unwrap_or('?');
            let choice = loop {
                let Some(line) = self.prompt("Answer: ")? else {
                    return Ok(PlayOutcome::Closed);
                };
                if is_quit(&line) {
                    return Ok(PlayOutcome::Abandoned);
                }
                match parse_choice_input(&line, view.choices.len()) {
                    Some(choice) => break choice,
                    None => writeln!(self.output, "Please pick A-{last}.")?,
                }
            };

            let answered = svc.answer_current(session, choice)?;
            for (choice, mark) in view
                .choices
                .iter()
                .zip(feedback_marks(&question, &answered.outcome))
            {
                let marker = match mark {
                    ChoiceMark::Correct => "+",
                    ChoiceMark::Incorrect => "x",
                    ChoiceMark::Unmarked => " ",
                };
                writeln!(self.output, "{marker} {}) {}", choice.label, choice.text)?;
            }
            writeln!(self.output, "{}", announce_answer(&question, &answered.outcome))?;

            if !feedback_delay.is_zero() {
                tokio::time::sleep(feedback_delay).await;
            }

            let advanced = svc.advance(session).await?;
            if let Some(completion) = advanced.completion {
                return Ok(PlayOutcome::Finished(completion));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionBank, QuestionDraft};
    use quiz_core::time::fixed_clock;
    use std::io::Cursor;
    use std::sync::Arc;
    use storage::repository::InMemoryRepository;

    fn svc() -> QuizLoopService {
        let bank = QuestionBank::from_drafts(vec![
            QuestionDraft::new("Which language runs in a web browser?", &["Java", "JavaScript"], 1),
            QuestionDraft::new("What does CSS stand for?", &["Cascading Style Sheets", "Cars"], 0),
        ])
        .unwrap();
        QuizLoopService::new(
            fixed_clock(),
            Arc::new(bank),
            Arc::new(InMemoryRepository::new()),
        )
    }

    async fn run_script(script: &str, default_seed: Option<Seed>) -> String {
        let mut console = Console::new(Cursor::new(script.to_owned()), Vec::new());
        console
            .run(&svc(), default_seed, Duration::ZERO)
            .await
            .unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(50), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(20)));
    }

    #[tokio::test]
    async fn plays_a_seeded_quiz_to_the_end() {
        let out = run_script("abc\nb\nb\nquit\n", None).await;
        assert!(out.contains("Q1. Which language runs in a web browser?"));
        assert!(out.contains("Correct!"));
        assert!(out.contains("Incorrect. The correct answer is A: Cascading Style Sheets"));
        assert!(out.contains("Your score: 1 / 2"));
        assert!(out.contains("New high score!"));
    }

    #[tokio::test]
    async fn rejects_unknown_choices_and_uses_default_seed() {
        let out = run_script("\nz\n2\n1\nquit\n", Some(Seed::from("abc"))).await;
        assert!(out.contains("blank keeps abc"));
        assert!(out.contains("Please pick A-B."));
        assert!(out.contains("Your score: 2 / 2"));
    }

    #[tokio::test]
    async fn quitting_mid_quiz_returns_to_start() {
        let out = run_script("abc\nquit\n:q\n", None).await;
        assert_eq!(out.matches("== Quiz ==").count(), 2);
        assert!(!out.contains("Your score"));
    }

    #[tokio::test]
    async fn restart_shows_high_score() {
        let out = run_script("abc\nb\na\n\nabc\nquit\n", None).await;
        assert!(out.contains("Your score: 2 / 2"));
        assert!(out.contains("High score: 2 / 2"));
    }

    #[tokio::test]
    async fn quit_words_are_valid_seeds() {
        let out = run_script("quit\nexit\n:q\n", None).await;
        assert!(out.contains("Q1. "));
        assert!(out.contains("Answer: "));
        assert!(!out.contains("Your score"));
    }
}
