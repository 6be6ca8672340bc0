use crate::model::question::{Question, QuestionDraft, QuestionError};

/// Read-only, ordered set of questions a quiz draws from.
///
/// Sessions refer to questions by their index in the bank, so the order here is
/// the identity order that gets shuffled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Validate every draft and build a bank from them.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` encountered, along with the draft's position.
    pub fn from_drafts(
        drafts: impl IntoIterator<Item = QuestionDraft>,
    ) -> Result<Self, (usize, QuestionError)> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(i, draft)| draft.validate().map_err(|err| (i, err)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { questions })
    }

    /// The default web-basics bank shipped with the quiz.
    ///
    /// # Panics
    ///
    /// Panics if the built-in drafts fail validation.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_drafts(builtin_drafts()).expect("built-in questions should be valid")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }
}

fn builtin_drafts() -> Vec<QuestionDraft> {
    vec![
        QuestionDraft::new(
            "Which language runs in a web browser?",
            &["Java", "C", "Python", "JavaScript"],
            3,
        ),
        QuestionDraft::new(
            "What does CSS stand for?",
            &[
                "Central Style Sheets",
                "Cascading Style Sheets",
                "Cascading Simple Sheets",
                "Cars SUVs Sailboats",
            ],
            1,
        ),
        QuestionDraft::new(
            "What does HTML stand for?",
            &[
                "HyperText Markup Language",
                "Hyperlinks Text Mark Language",
                "Home Tool Markup Language",
                "Hyperlinking Textual Markup Language",
            ],
            0,
        ),
        QuestionDraft::new(
            "Which CSS property controls the text size?",
            &["font-style", "text-size", "font-size", "text-style"],
            2,
        ),
        QuestionDraft::new(
            "Which built-in method adds one or more elements to the end of an array?",
            &["last()", "append()", "push()", "put()"],
            2,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_has_five_questions() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 5);
        assert_eq!(bank.get(0).unwrap().correct_choice(), "JavaScript");
        assert_eq!(bank.get(4).unwrap().correct_choice(), "push()");
        assert!(bank.get(5).is_none());
    }

    #[test]
    fn from_drafts_reports_failing_position() {
        let drafts = vec![
            QuestionDraft::new("ok", &["a", "b"], 0),
            QuestionDraft::new("bad", &["a", "b"], 9),
        ];
        let (pos, err) = QuestionBank::from_drafts(drafts).unwrap_err();
        assert_eq!(pos, 1);
        assert!(matches!(err, QuestionError::AnswerOutOfRange { .. }));
    }

    #[test]
    fn default_bank_is_empty() {
        assert!(QuestionBank::default().is_empty());
    }
}
