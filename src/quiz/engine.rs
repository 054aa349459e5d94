// src/quiz/engine.rs

use std::fmt;
use std::sync::Arc;

use crate::models::question::Question;

/// Errors raised by quiz state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizError {
    QuestionOutOfRange { index: usize, count: usize },
    OptionOutOfRange { index: usize, count: usize },
    Incomplete { answered: usize, total: usize },
    NotActive,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::QuestionOutOfRange { index, count } => {
                write!(f, "Question index {} out of range ({} questions)", index, count)
            }
            QuizError::OptionOutOfRange { index, count } => {
                write!(f, "Option index {} out of range ({} options)", index, count)
            }
            QuizError::Incomplete { answered, total } => {
                write!(
                    f,
                    "All questions must be answered before submitting ({}/{} answered)",
                    answered, total
                )
            }
            QuizError::NotActive => write!(f, "Quiz is not active"),
        }
    }
}

impl std::error::Error for QuizError {}

/// Score breakdown produced when a session finishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreReport {
    /// Percentage in [0, 100].
    pub score: f64,
    pub correct_count: usize,
    pub total_questions: usize,
}

/// The quiz state machine.
///
/// One value per running session. All methods are synchronous; the timer
/// and locking shell around it lives in `session`.
#[derive(Debug)]
pub struct QuizEngine {
    questions: Arc<Vec<Question>>,
    answers: Vec<Option<usize>>,
    is_active: bool,
    score: Option<f64>,
}

impl QuizEngine {
    /// Creates an active session with all answers unset.
    pub fn new(questions: Arc<Vec<Question>>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            answers,
            is_active: true,
            score: None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Records a choice for one question, overwriting any prior choice.
    /// Rejected once the session has finished.
    pub fn select_answer(
        &mut self,
        question_index: usize,
        option_index: usize,
    ) -> Result<(), QuizError> {
        if !self.is_active {
            return Err(QuizError::NotActive);
        }

        let count = self.questions.len();
        if question_index >= count {
            return Err(QuizError::QuestionOutOfRange {
                index: question_index,
                count,
            });
        }

        let options = self.questions[question_index].options.len();
        if option_index >= options {
            return Err(QuizError::OptionOutOfRange {
                index: option_index,
                count: options,
            });
        }

        self.answers[question_index] = Some(option_index);
        Ok(())
    }

    /// Finishes the session. Requires every question to be answered;
    /// submitting an already finished session is an error.
    pub fn submit(&mut self) -> Result<ScoreReport, QuizError> {
        if !self.is_active {
            return Err(QuizError::NotActive);
        }

        let answered = self.answered_count();
        let total = self.question_count();
        if answered < total {
            return Err(QuizError::Incomplete { answered, total });
        }

        Ok(self.finish())
    }

    /// Timer expiry: finishes the session regardless of unanswered slots;
    /// unset answers never match and count as incorrect.
    /// Returns `None` if the session already finished.
    pub fn expire(&mut self) -> Option<ScoreReport> {
        if !self.is_active {
            return None;
        }
        Some(self.finish())
    }

    /// Returns the session to its initial state: all answers cleared,
    /// active again, score cleared. Usable at any time.
    pub fn reset(&mut self) {
        self.answers = vec![None; self.questions.len()];
        self.is_active = true;
        self.score = None;
    }

    fn finish(&mut self) -> ScoreReport {
        let report = self.calculate_score();
        self.is_active = false;
        self.score = Some(report.score);
        report
    }

    /// score = 100 * matches / question_count
    fn calculate_score(&self) -> ScoreReport {
        let total_questions = self.question_count();
        if total_questions == 0 {
            return ScoreReport {
                score: 0.0,
                correct_count: 0,
                total_questions: 0,
            };
        }

        let correct_count = self
            .answers
            .iter()
            .zip(self.questions.iter())
            .filter(|(answer, question)| **answer == Some(question.correct_answer))
            .count();

        let score = (correct_count as f64 / total_questions as f64) * 100.0;
        ScoreReport {
            score,
            correct_count,
            total_questions,
        }
    }
}
