// src/quiz/session.rs

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::AbortHandle;

use crate::models::{
    question::{PublicQuestion, Question},
    quiz::QuizSnapshot,
};
use crate::quiz::engine::{QuizEngine, QuizError, ScoreReport};

struct SessionInner {
    engine: QuizEngine,
    remaining_seconds: u64,
    /// Bumped on every reactivation; ticks from older epochs are ignored.
    epoch: u64,
    timer: Option<AbortHandle>,
}

/// Shared handle to the single in-process quiz session.
///
/// Every state transition (answer selection, submit, reset, timer tick)
/// serializes on one mutex. The countdown task takes the lock once per tick
/// and never holds it across an await point.
#[derive(Clone)]
pub struct QuizSession {
    inner: Arc<Mutex<SessionInner>>,
    total_seconds: u64,
}

impl QuizSession {
    /// Creates an active session and starts its countdown.
    pub fn start(questions: Arc<Vec<Question>>, total_seconds: u64) -> Self {
        let session = Self {
            inner: Arc::new(Mutex::new(SessionInner {
                engine: QuizEngine::new(questions),
                remaining_seconds: total_seconds,
                epoch: 0,
                timer: None,
            })),
            total_seconds,
        };

        let handle = session.spawn_countdown(0);
        session.lock().timer = Some(handle);
        session
    }

    /// The question list with answer keys stripped.
    pub fn questions(&self) -> Vec<PublicQuestion> {
        self.lock()
            .engine
            .questions()
            .iter()
            .map(PublicQuestion::from)
            .collect()
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        let inner = self.lock();
        self.snapshot_inner(&inner)
    }

    /// Records one answer choice and returns the updated snapshot.
    pub fn select_answer(
        &self,
        question_index: usize,
        option_index: usize,
    ) -> Result<QuizSnapshot, QuizError> {
        let mut inner = self.lock();
        inner.engine.select_answer(question_index, option_index)?;
        Ok(self.snapshot_inner(&inner))
    }

    /// Finishes the session and stops the countdown.
    pub fn submit(&self) -> Result<ScoreReport, QuizError> {
        let mut inner = self.lock();
        let report = inner.engine.submit()?;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        Ok(report)
    }

    /// Starts a fresh attempt: answers cleared, countdown back at full
    /// duration, any previous timer cancelled.
    pub fn reset(&self) -> QuizSnapshot {
        let mut inner = self.lock();
        inner.engine.reset();
        inner.remaining_seconds = self.total_seconds;
        inner.epoch += 1;
        if let Some(timer) = inner.timer.take() {
            timer.abort();
        }
        let handle = self.spawn_countdown(inner.epoch);
        inner.timer = Some(handle);
        self.snapshot_inner(&inner)
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot_inner(&self, inner: &SessionInner) -> QuizSnapshot {
        QuizSnapshot {
            answers: inner.engine.answers().to_vec(),
            answered_count: inner.engine.answered_count(),
            total_questions: inner.engine.question_count(),
            is_active: inner.engine.is_active(),
            score: inner.engine.score(),
            remaining_seconds: inner.remaining_seconds,
            total_seconds: self.total_seconds,
        }
    }

    /// Spawns the once-per-second countdown for the given epoch.
    ///
    /// The task exits as soon as the session goes inactive or a reset has
    /// moved it to a newer epoch, so an aborted-but-in-flight tick can never
    /// touch the current session.
    fn spawn_countdown(&self, epoch: u64) -> AbortHandle {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;

                let mut guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
                if guard.epoch != epoch || !guard.engine.is_active() {
                    break;
                }

                guard.remaining_seconds = guard.remaining_seconds.saturating_sub(1);
                if guard.remaining_seconds == 0 {
                    if let Some(report) = guard.engine.expire() {
                        tracing::info!("Quiz time expired, final score {:.1}%", report.score);
                    }
                    guard.timer = None;
                    break;
                }
            }
        });
        task.abort_handle()
    }
}
