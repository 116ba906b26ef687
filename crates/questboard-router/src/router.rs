//! The action router.

use std::sync::Arc;

use questboard_board::application::query_handlers::{
    get_accepted_quests, get_all_boards, get_archived_quest, get_board_view, get_quest_details,
};
use questboard_board::domain::aggregates::QuestBoard;
use questboard_board::domain::entities::QuestField;
use questboard_core::clock::Clock;
use questboard_core::error::DomainError;
use questboard_core::ids::{QuestId, UserId};
use questboard_core::policy::AdminPolicy;
use questboard_notify::fanout::{CommitKind, Mutation, fan_out};
use questboard_session::application::session_store::{Progress, SessionStore};
use questboard_session::domain::aggregates::SessionMode;
use questboard_session::domain::commands::SessionInput;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::action::{Action, Actor};
use crate::messages;
use crate::outcome::{Effect, FeedbackEntry, Outcome, Reply};
use crate::render;

/// Owns the board and the sessions, and applies actions to them.
///
/// Callers serialize access (the host keeps the router behind one mutex), so
/// every action sees and leaves a consistent state.
pub struct ActionRouter {
    board: QuestBoard,
    sessions: SessionStore,
    admins: Arc<dyn AdminPolicy>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ActionRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRouter")
            .field("users", &self.board.users().len())
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}

/// How a session input was phrased, kept for choosing the reply.
#[derive(Clone, Copy)]
enum InputKind {
    Text,
    Skip,
    Clear,
}

impl ActionRouter {
    /// Creates a router over a restored board.
    #[must_use]
    pub fn new(
        board: QuestBoard,
        sessions: SessionStore,
        admins: Arc<dyn AdminPolicy>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            board,
            sessions,
            admins,
            clock,
        }
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &QuestBoard {
        &self.board
    }

    /// Mutable access for host tasks such as the release broadcast.
    pub fn board_mut(&mut self) -> &mut QuestBoard {
        &mut self.board
    }

    /// Applies one action.
    ///
    /// User errors become a reply explaining what went wrong; infrastructure
    /// faults are logged and reported generically. Either way the router is
    /// ready for the next action.
    #[instrument(
        skip(self, actor, action),
        fields(correlation_id = %Uuid::new_v4(), actor = %actor.id, action = action.name())
    )]
    pub fn handle(&mut self, actor: &Actor, action: Action) -> Outcome {
        let name = action.name();
        match self.dispatch(actor, action) {
            Ok(outcome) => outcome,
            Err(err) if err.is_infrastructure() => {
                error!(error = %err, actor = %actor.id, action = name, "action failed");
                Outcome::reply(Reply::new(messages::GENERIC_FAILURE))
            }
            Err(err) => {
                warn!(error = %err, "action rejected");
                Outcome::reply(Reply::new(messages::describe(&err)))
            }
        }
    }

    fn dispatch(&mut self, actor: &Actor, action: Action) -> Result<Outcome, DomainError> {
        let user = actor.id;
        if action.requires_registration() {
            self.ensure_registered(user)?;
        }

        match action {
            Action::Help => Ok(Reply::new(messages::HELP).into()),
            Action::Register(name) => self.register(actor, name),
            Action::Feedback(text) => self.feedback(actor, &text),
            Action::Ban(target) => self.ban(user, target.as_deref()),
            Action::Restart => self.restart(user),
            Action::Unregister => Ok(Reply::new(messages::CONFIRM_UNREGISTER).into()),
            Action::UnregisterConfirmed => {
                self.remove(user);
                Ok(Reply::new(messages::UNREGISTERED).into())
            }
            Action::ListUsers => Ok(render::users(&self.board).into()),
            Action::Display(target) => self.display(user, target.as_deref()),
            Action::DisplayOwner(owner) => self.display_owner(user, owner),
            Action::MyAccepted => {
                let accepted = get_accepted_quests(&self.board, user);
                Ok(render::accepted(&self.board, &accepted).into())
            }
            Action::ShowAll => Ok(render::all_boards(&get_all_boards(&self.board, user)).into()),
            Action::ListArchive => Ok(get_archived_quest(&self.board, user)
                .map_or_else(|| Reply::new(messages::NO_ARCHIVE), |d| render::archive(&d))
                .into()),
            Action::StartCreate => self.start_create(user),
            Action::StartEdit { owner, quest } => self.start_edit(user, owner, quest),
            Action::SessionInput(input) => self.session_input(user, input),
            Action::Toggle { owner, quest } => self.toggle(user, owner, quest),
            Action::Delete { owner, quest } => self.delete(user, owner, quest),
            Action::Archive { owner, quest } => self.archive(user, owner, quest),
            Action::Show { owner, quest } => {
                let details = get_quest_details(&self.board, owner, quest)?;
                Ok(render::quest(&details).into())
            }
            Action::ListAccepters { owner, quest } => {
                let names = self.board.list_accepters(owner, quest)?;
                let title = self.board.quest(owner, quest)?.title();
                Ok(render::accepters(title, &names).into())
            }
        }
    }

    fn ensure_registered(&self, user: UserId) -> Result<(), DomainError> {
        if self.board.user_exists(user) {
            Ok(())
        } else {
            Err(DomainError::NotRegistered(user))
        }
    }

    fn ensure_admin(&self, user: UserId) -> Result<(), DomainError> {
        if self.admins.is_admin(user) {
            Ok(())
        } else {
            Err(DomainError::NotPermitted(user))
        }
    }

    fn remove(&mut self, user: UserId) {
        if self.sessions.end(user).is_some() {
            info!(user_id = %user, "session discarded with departing user");
        }
        self.board.remove_user(user);
    }

    fn register(&mut self, actor: &Actor, name: Option<String>) -> Result<Outcome, DomainError> {
        let name = name.or_else(|| actor.name.clone()).unwrap_or_default();
        self.board.register_user(actor.id, &name)?;
        Ok(Reply::new(messages::REGISTERED).into())
    }

    fn feedback(&self, actor: &Actor, text: &str) -> Result<Outcome, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyFeedback);
        }
        let name = self
            .board
            .display_name(actor.id)
            .map(str::to_owned)
            .or_else(|| actor.name.clone())
            .unwrap_or_default();
        let entry = FeedbackEntry {
            user: actor.id,
            name,
            received_at: self.clock.now(),
            text: text.to_owned(),
        };
        info!(user_id = %actor.id, "feedback received");
        Ok(Outcome::reply(Reply::new(messages::FEEDBACK_RECORDED))
            .with_effect(Effect::RecordFeedback(entry)))
    }

    fn ban(&mut self, actor: UserId, target: Option<&str>) -> Result<Outcome, DomainError> {
        self.ensure_admin(actor)?;
        let Some(target) = target else {
            return Ok(Reply::new(messages::BAN_USAGE).into());
        };
        let banned = self.board.find_user(target)?.id;
        self.remove(banned);
        info!(admin = %actor, banned = %banned, "user banned");
        Ok(Reply::new(messages::BANNED).into())
    }

    fn restart(&self, actor: UserId) -> Result<Outcome, DomainError> {
        self.ensure_admin(actor)?;
        info!(admin = %actor, "restart requested");
        Ok(Outcome::reply(Reply::new(messages::RESTARTING)).with_effect(Effect::Restart))
    }

    fn display(&self, actor: UserId, target: Option<&str>) -> Result<Outcome, DomainError> {
        let owner = match target {
            None => actor,
            Some(query) => self.board.find_user(query)?.id,
        };
        let view = get_board_view(&self.board, owner, actor)?;
        Ok(render::board(&view).into())
    }

    /// A board by exact id. A departed owner is reported, never substituted.
    fn display_owner(&self, actor: UserId, owner: UserId) -> Result<Outcome, DomainError> {
        if !self.board.user_exists(owner) {
            return Err(DomainError::NoMatchingName(owner.to_string()));
        }
        let view = get_board_view(&self.board, owner, actor)?;
        Ok(render::board(&view).into())
    }

    fn start_create(&mut self, actor: UserId) -> Result<Outcome, DomainError> {
        let quest = self.board.create_quest(actor)?;
        self.sessions
            .start(actor, quest, SessionMode::Create, self.clock.as_ref());
        Ok(Reply::new(messages::CREATE_PROMPT).into())
    }

    fn start_edit(
        &mut self,
        actor: UserId,
        owner: UserId,
        quest: QuestId,
    ) -> Result<Outcome, DomainError> {
        if actor != owner {
            return Err(DomainError::NotYourList { actor, owner });
        }
        self.board.quest(owner, quest)?;
        self.sessions
            .start(actor, quest, SessionMode::Edit, self.clock.as_ref());
        Ok(Reply::new(messages::EDIT_PROMPT).into())
    }

    fn session_input(&mut self, actor: UserId, input: SessionInput) -> Result<Outcome, DomainError> {
        let (owner, quest) = self
            .sessions
            .active(actor, self.clock.as_ref())
            .map(|session| (session.owner, session.quest))
            .ok_or(DomainError::NoActiveSession(actor))?;
        if self.board.quest(owner, quest).is_err() {
            self.sessions.end(actor);
            return Err(DomainError::QuestNotFound { owner, quest });
        }

        let kind = match &input {
            SessionInput::Text(_) | SessionInput::Cancel => InputKind::Text,
            SessionInput::Skip(_) => InputKind::Skip,
            SessionInput::Clear(_) => InputKind::Clear,
        };
        let step = self.sessions.advance(actor, input, self.clock.as_ref())?;
        if let Some((field, value)) = step.write {
            self.board.set_field(step.owner, step.quest, field, value)?;
        }

        let outcome = match step.progress {
            Progress::Awaiting(QuestField::Description) => Outcome::reply(Reply::new(match kind {
                InputKind::Text => messages::TITLE_SET,
                InputKind::Skip => messages::TITLE_SKIPPED,
                InputKind::Clear => messages::TITLE_CLEARED,
            })),
            Progress::Awaiting(QuestField::Reward) => Outcome::reply(Reply::new(match kind {
                InputKind::Text => messages::DESCRIPTION_SET,
                InputKind::Skip => messages::DESCRIPTION_SKIPPED,
                InputKind::Clear => messages::DESCRIPTION_CLEARED,
            })),
            Progress::Awaiting(QuestField::Title) => {
                Outcome::reply(Reply::new(messages::CREATE_PROMPT))
            }
            Progress::Completed => {
                let kind_of_commit = match step.mode {
                    SessionMode::Create => CommitKind::Created,
                    SessionMode::Edit => CommitKind::Edited,
                };
                info!(owner = %step.owner, quest = %step.quest, ?kind_of_commit, "quest committed");
                let notifications = fan_out(
                    &self.board,
                    &Mutation::QuestCommitted {
                        owner: step.owner,
                        quest: step.quest,
                        kind: kind_of_commit,
                    },
                );
                Outcome::reply(Reply::new(match kind {
                    InputKind::Text => messages::REWARD_SET,
                    InputKind::Skip => messages::REWARD_SKIPPED,
                    InputKind::Clear => messages::REWARD_CLEARED,
                }))
                .with_notifications(notifications)
            }
            Progress::Cancelled => Outcome::reply(Reply::new(messages::CANCELLED)),
        };
        Ok(outcome)
    }

    fn toggle(&mut self, actor: UserId, owner: UserId, quest: QuestId) -> Result<Outcome, DomainError> {
        let acceptance = self.board.toggle_accept(owner, quest, actor)?;
        let notifications = fan_out(
            &self.board,
            &Mutation::AcceptanceToggled {
                owner,
                quest,
                user: actor,
                acceptance,
            },
        );
        let view = get_board_view(&self.board, owner, actor)?;
        Ok(Outcome::reply(render::board(&view).in_place()).with_notifications(notifications))
    }

    fn delete(&mut self, actor: UserId, owner: UserId, quest: QuestId) -> Result<Outcome, DomainError> {
        let removed = self.board.delete_quest(actor, owner, quest)?;
        let notifications = fan_out(
            &self.board,
            &Mutation::QuestDeleted {
                owner,
                removed: &removed,
            },
        );
        let view = get_board_view(&self.board, owner, actor)?;
        Ok(Outcome::reply(render::board(&view).in_place()).with_notifications(notifications))
    }

    fn archive(&mut self, actor: UserId, owner: UserId, quest: QuestId) -> Result<Outcome, DomainError> {
        let removed = self.board.archive_quest(actor, owner, quest)?;
        let notifications = fan_out(
            &self.board,
            &Mutation::QuestArchived {
                owner,
                removed: &removed,
            },
        );
        let view = get_board_view(&self.board, owner, actor)?;
        Ok(Outcome::reply(render::board(&view).in_place()).with_notifications(notifications))
    }
}
