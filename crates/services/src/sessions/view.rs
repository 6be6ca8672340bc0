use quiz_core::model::{FinalScore, Question};

use super::service::{AnswerOutcome, QuizSession};
use crate::error::SessionError;
use crate::high_score_service::HighScoreUpdate;

/// Letter shown next to a choice: `A`, `B`, `C`, …
#[must_use]
pub fn choice_label(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
}

/// Map typed input to a choice index.
///
/// Accepts a letter (`b`, `B`) or a 1-based number (`2`). Returns `None` for
/// anything that does not name one of `count` choices.
#[must_use]
pub fn parse_choice_input(raw: &str, count: usize) -> Option<usize> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<usize>() {
        return (1..=count).contains(&n).then(|| n - 1);
    }
    let mut chars = raw.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };
    let c = c.to_ascii_uppercase();
    if !c.is_ascii_uppercase() {
        return None;
    }
    let index = usize::from(c as u8 - b'A');
    (index < count).then_some(index)
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub index: usize,
    pub label: char,
    pub text: String,
}

/// Presentation-agnostic view of the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// 1-based question number.
    pub number: usize,
    pub total: usize,
    pub heading: String,
    pub choices: Vec<ChoiceView>,
}

impl QuestionView {
    /// # Errors
    ///
    /// Returns `SessionError::Finished` when there is no current question.
    pub fn from_session(session: &QuizSession) -> Result<Self, SessionError> {
        let question = session.current_question()?;
        let number = session.position() + 1;
        let choices = question
            .choices()
            .iter()
            .enumerate()
            .map(|(index, text)| ChoiceView {
                index,
                label: choice_label(index).unwrap_or('?'),
                text: text.clone(),
            })
            .collect();

        Ok(Self {
            number,
            total: session.total(),
            heading: format!("Q{number}. {}", question.text()),
            choices,
        })
    }
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
    Unmarked,
    Correct,
    Incorrect,
}

/// Per-choice marks after an answer: the correct choice is always revealed and a
/// wrong pick is flagged.
#[must_use]
pub fn feedback_marks(question: &Question, outcome: &AnswerOutcome) -> Vec<ChoiceMark> {
    (0..question.choice_count())
        .map(|i| {
            if i == outcome.correct_index {
                ChoiceMark::Correct
            } else if i == outcome.choice {
                ChoiceMark::Incorrect
            } else {
                ChoiceMark::Unmarked
            }
        })
        .collect()
}

/// Text for a live region announcing the answer outcome.
#[must_use]
pub fn announce_answer(question: &Question, outcome: &AnswerOutcome) -> String {
    if outcome.correct {
        return "Correct!".to_owned();
    }
    let label = choice_label(outcome.correct_index).unwrap_or('?');
    format!(
        "Incorrect. The correct answer is {label}: {}",
        question.correct_choice()
    )
}

/// Text announcing the end of a quiz.
#[must_use]
pub fn announce_final(final_score: FinalScore, high_score: Option<&HighScoreUpdate>) -> String {
    let mut text = format!("Quiz complete. You scored {final_score}.");
    match high_score {
        Some(update) if update.is_new_record => {
            text.push_str(" New high score!");
        }
        Some(update) => {
            text.push_str(&format!(" High score: {}.", update.best));
        }
        None => {}
    }
    text
}

//
// ─── FOCUS ─────────────────────────────────────────────────────────────────────
//

/// Keyboard focus over a question's choices.
///
/// Moving focus wraps around and never selects; selection is a separate action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceFocus {
    index: usize,
    count: usize,
}

impl ChoiceFocus {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn next(&mut self) -> usize {
        if self.count > 0 {
            self.index = (self.index + 1) % self.count;
        }
        self.index
    }

    pub fn previous(&mut self) -> usize {
        if self.count > 0 {
            self.index = (self.index + self.count - 1) % self.count;
        }
        self.index
    }
}
