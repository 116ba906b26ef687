//! In-memory store of active sessions.

use std::collections::HashMap;

use chrono::TimeDelta;
use questboard_board::domain::entities::QuestField;
use questboard_core::clock::Clock;
use questboard_core::error::DomainError;
use questboard_core::ids::{QuestId, UserId};
use tracing::{debug, info};

use crate::domain::aggregates::{Session, SessionMode, SessionState, transition};
use crate::domain::commands::SessionInput;

/// Where the flow stands after an accepted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Still running, waiting for this field.
    Awaiting(QuestField),
    /// All three steps done; the session is gone.
    Completed,
    /// Abandoned; the session is gone.
    Cancelled,
}

/// Result of feeding one input to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// The quest owner.
    pub owner: UserId,
    /// The quest being filled in.
    pub quest: QuestId,
    /// Create or edit.
    pub mode: SessionMode,
    /// Field write the caller must apply to the board.
    pub write: Option<(QuestField, String)>,
    /// Where the flow stands now.
    pub progress: Progress,
}

/// Per-user sessions with optional idle expiry.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<UserId, Session>,
    timeout: Option<TimeDelta>,
}

impl SessionStore {
    /// Creates a store. Sessions idle for longer than `timeout` are dropped
    /// the next time they are looked at; `None` keeps them forever.
    #[must_use]
    pub fn new(timeout: Option<TimeDelta>) -> Self {
        Self {
            sessions: HashMap::new(),
            timeout,
        }
    }

    /// Starts a flow for `owner`, replacing any flow already running.
    pub fn start(
        &mut self,
        owner: UserId,
        quest: QuestId,
        mode: SessionMode,
        clock: &dyn Clock,
    ) -> &Session {
        if let Some(previous) = self.sessions.get(&owner) {
            debug!(user_id = %owner, quest = %previous.quest, "replacing unfinished session");
        }
        info!(user_id = %owner, quest = %quest, ?mode, "session started");

        let session = Session {
            owner,
            quest,
            mode,
            state: SessionState::AwaitingTitle,
            last_activity: clock.now(),
        };
        self.sessions.insert(owner, session);
        &self.sessions[&owner]
    }

    /// The user's live session, purging it first if it has expired.
    pub fn active(&mut self, user: UserId, clock: &dyn Clock) -> Option<&Session> {
        let expired = self
            .sessions
            .get(&user)
            .is_some_and(|session| self.is_expired(session, clock));
        if expired {
            self.sessions.remove(&user);
            info!(user_id = %user, "session expired");
        }
        self.sessions.get(&user)
    }

    /// Applies one input to the user's session.
    ///
    /// On success the session either moves to its next step or, when the
    /// flow completes or is cancelled, is removed. A rejected input leaves the
    /// session untouched.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoActiveSession` if the user has no live session
    /// and `DomainError::UnexpectedInput` if the input does not fit the step.
    pub fn advance(
        &mut self,
        user: UserId,
        input: SessionInput,
        clock: &dyn Clock,
    ) -> Result<Advance, DomainError> {
        let state = self
            .active(user, clock)
            .map(|session| session.state)
            .ok_or(DomainError::NoActiveSession(user))?;

        debug!(user_id = %user, input = input.input_type(), ?state, "session input");
        let step = transition(state, input)?;

        let progress = match (step.cancelled, step.next.awaited_field()) {
            (true, _) => Progress::Cancelled,
            (false, Some(field)) => Progress::Awaiting(field),
            (false, None) => Progress::Completed,
        };

        let session = match progress {
            Progress::Awaiting(_) => {
                let session = self
                    .sessions
                    .get_mut(&user)
                    .ok_or(DomainError::NoActiveSession(user))?;
                session.state = step.next;
                session.last_activity = clock.now();
                session.clone()
            }
            Progress::Completed | Progress::Cancelled => {
                let session = self
                    .sessions
                    .remove(&user)
                    .ok_or(DomainError::NoActiveSession(user))?;
                info!(user_id = %user, quest = %session.quest, ?progress, "session ended");
                session
            }
        };

        Ok(Advance {
            owner: session.owner,
            quest: session.quest,
            mode: session.mode,
            write: step.write,
            progress,
        })
    }

    /// Drops the user's session, returning it if there was one.
    pub fn end(&mut self, user: UserId) -> Option<Session> {
        self.sessions.remove(&user)
    }

    /// Number of sessions held, expired ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn is_expired(&self, session: &Session, clock: &dyn Clock) -> bool {
        self.timeout
            .is_some_and(|timeout| clock.elapsed_since(session.last_activity) > timeout)
    }
}
