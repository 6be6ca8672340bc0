use std::sync::Arc;

use quiz_core::model::{FinalScore, HighScore, QuestionBank, QuestionDraft, Seed};
use quiz_core::time::{fixed_clock, fixed_now};
use services::{QuizLoopService, QuizSession, SessionError};
use storage::repository::{HighScoreRepository, InMemoryRepository};

fn two_question_bank() -> QuestionBank {
    QuestionBank::from_drafts(vec![
        QuestionDraft::new("Which language runs in a web browser?", &["Java", "JavaScript"], 1),
        QuestionDraft::new("What does CSS stand for?", &["Cascading Style Sheets", "Cars"], 0),
    ])
    .unwrap()
}

fn wrong_choice(session: &QuizSession) -> usize {
    let q = session.current_question().unwrap();
    (q.correct_index() + 1) % q.choice_count()
}

/// Answer the first `correct` questions right and the rest wrong.
async fn play(svc: &QuizLoopService, session: &mut QuizSession, correct: usize) -> FinalScore {
    let mut asked = 0;
    loop {
        let choice = if asked < correct {
            session.current_question().unwrap().correct_index()
        } else {
            wrong_choice(session)
        };
        svc.answer_current(session, choice).unwrap();
        asked += 1;
        let result = svc.advance(session).await.unwrap();
        if let Some(completion) = result.completion {
            return completion.final_score;
        }
    }
}

#[tokio::test]
async fn seeded_two_question_quiz_scores_one_of_two() {
    let svc = QuizLoopService::new(
        fixed_clock(),
        Arc::new(two_question_bank()),
        Arc::new(InMemoryRepository::new()),
    );
    let seed = Seed::from_input("abc");
    let mut session = svc.start_session(seed.as_ref()).unwrap();
    assert_eq!(session.order(), &[0, 1]);

    let correct = session.current_question().unwrap().correct_index();
    let first = svc.answer_current(&mut session, correct).unwrap();
    assert!(first.outcome.correct);
    assert_eq!(session.score(), 1);
    assert!(!svc.advance(&mut session).await.unwrap().finished());

    let wrong = wrong_choice(&session);
    let second = svc.answer_current(&mut session, wrong).unwrap();
    assert!(!second.outcome.correct);
    assert_eq!(session.score(), 1);

    let last = svc.advance(&mut session).await.unwrap();
    assert!(last.finished());
    let completion = last.completion.unwrap();
    assert_eq!(completion.final_score.to_string(), "1 / 2");
}

#[tokio::test]
async fn second_answer_is_rejected_without_changing_score() {
    let svc = QuizLoopService::new(
        fixed_clock(),
        Arc::new(QuestionBank::builtin()),
        Arc::new(InMemoryRepository::new()),
    );
    let mut session = svc.start_session(Some(&Seed::from(42))).unwrap();
    let correct = session.current_question().unwrap().correct_index();
    svc.answer_current(&mut session, correct).unwrap();

    let err = svc.answer_current(&mut session, correct).unwrap_err();
    assert_eq!(err, SessionError::AlreadyAnswered);
    assert_eq!(session.score(), 1);
}

#[tokio::test]
async fn restart_resets_score_and_position() {
    let svc = QuizLoopService::new(
        fixed_clock(),
        Arc::new(QuestionBank::builtin()),
        Arc::new(InMemoryRepository::new()),
    );
    let mut session = svc.start_session(Some(&Seed::from("restart"))).unwrap();
    let final_score = play(&svc, &mut session, 3).await;
    assert_eq!(final_score.to_string(), "3 / 5");

    let session = svc.start_session(Some(&Seed::from("restart"))).unwrap();
    assert_eq!(session.score(), 0);
    assert_eq!(session.position(), 0);
    assert!(!session.is_finished());
}

#[tokio::test]
async fn high_score_only_grows() {
    let repo = InMemoryRepository::with_high_score(HighScore::from_final(
        FinalScore::new(2, 5).unwrap(),
        fixed_now(),
    ));
    let svc = QuizLoopService::new(
        fixed_clock(),
        Arc::new(QuestionBank::builtin()),
        Arc::new(repo.clone()),
    );

    let mut session = svc.start_session(None).unwrap();
    assert_eq!(play(&svc, &mut session, 4).await.score(), 4);
    assert_eq!(repo.get_high_score().await.unwrap().unwrap().score(), 4);

    let mut session = svc.start_session(None).unwrap();
    assert_eq!(play(&svc, &mut session, 1).await.score(), 1);
    assert_eq!(repo.get_high_score().await.unwrap().unwrap().score(), 4);
    assert_eq!(svc.high_score().await.unwrap().score(), 4);
}

#[tokio::test]
async fn failing_storage_does_not_break_the_quiz() {
    let repo = InMemoryRepository::new();
    repo.set_unavailable(true);
    let svc = QuizLoopService::new(
        fixed_clock(),
        Arc::new(QuestionBank::builtin()),
        Arc::new(repo),
    );

    let mut session = svc.start_session(Some(&Seed::from(0))).unwrap();
    let final_score = play(&svc, &mut session, 5).await;
    assert!(final_score.is_perfect());
    assert_eq!(svc.high_score().await, None);
}

#[test]
fn equal_seeds_give_equal_orders() {
    let bank = Arc::new(QuestionBank::builtin());
    for raw in ["0", "42", "abc", "quiz night"] {
        let seed = Seed::from_input(raw);
        let a = QuizSession::start_seeded(Arc::clone(&bank), seed.as_ref()).unwrap();
        let b = QuizSession::start_seeded(Arc::clone(&bank), seed.as_ref()).unwrap();
        assert_eq!(a.order(), b.order(), "seed {raw}");
    }
}

#[test]
fn seed_strings_reproduce_known_orders() {
    let bank = Arc::new(QuestionBank::builtin());
    let order = |raw: &str| {
        let seed = Seed::from_input(raw);
        QuizSession::start_seeded(Arc::clone(&bank), seed.as_ref())
            .unwrap()
            .order()
            .to_vec()
    };
    assert_eq!(order("42"), vec![0, 1, 3, 4, 2]);
    assert_eq!(order("abc"), vec![2, 1, 0, 4, 3]);
    assert_eq!(order("1.5"), vec![1, 0, 2, 4, 3]);
    assert_eq!(order(".5"), vec![0, 3, 2, 4, 1]);
    // Hex and decimal spellings of one number share an order.
    assert_eq!(order("0x10"), vec![4, 2, 0, 3, 1]);
    assert_eq!(order("16"), order("0x10"));
}
