//! Optimistic like toggling.
//!
//! # Responsibility
//! - Flip a project's like state locally before the request is sent.
//! - Reconcile the local change with the remote like endpoint.
//!
//! # Invariants
//! - Without a session nothing changes locally and no request is sent.
//! - `likes_count` moves by exactly one per toggle and never goes below 0.
//! - A failed request reports `LIKE_FAILED_MESSAGE`; the optimistic change
//!   is reverted only under `RollbackPolicy::Revert`.

use crate::api::{ApiResult, LikeApi};
use crate::model::portfolio::{Portfolio, Project, RecordId};
use crate::session::Session;
use log::{info, warn};

pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to like a project.";
pub const LIKE_FAILED_MESSAGE: &str = "Failed to update like status.";

/// HTTP method of a like request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeMethod {
    Like,
    Unlike,
}

impl LikeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "POST",
            Self::Unlike => "DELETE",
        }
    }
}

/// Action bound to one rendered like control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeIntent {
    pub project_id: RecordId,
    /// Like state shown to the user when the control was activated.
    pub currently_liked: bool,
}

impl LikeIntent {
    pub fn for_project(project: &Project) -> Self {
        Self {
            project_id: project.id,
            currently_liked: project.liked_by_user,
        }
    }

    pub fn method(&self) -> LikeMethod {
        if self.currently_liked {
            LikeMethod::Unlike
        } else {
            LikeMethod::Like
        }
    }

    pub fn endpoint(&self) -> String {
        format!("/api/auth/portfolio/projects/{}/like", self.project_id)
    }
}

/// What happens to the optimistic change when the request fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RollbackPolicy {
    /// Leave the optimistic state in place.
    #[default]
    Keep,
    /// Restore the state observed before the toggle.
    Revert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// User-visible message produced by a page operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Local change applied by `LikeCoordinator::begin`, awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLike {
    intent: LikeIntent,
    previous_liked: bool,
    previous_count: u64,
}

impl PendingLike {
    pub fn intent(&self) -> LikeIntent {
        self.intent
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    Confirmed {
        project_id: RecordId,
        liked: bool,
        likes_count: u64,
    },
    Failed {
        notice: Notice,
        rolled_back: bool,
    },
    LoginRequired(Notice),
    /// The project is not part of the loaded portfolio; nothing was sent.
    UnknownProject(RecordId),
}

impl LikeOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Failed { notice, .. } | Self::LoginRequired(notice) => Some(notice),
            Self::Confirmed { .. } | Self::UnknownProject(_) => None,
        }
    }
}

/// Coordinates optimistic like toggles against a `LikeApi`.
pub struct LikeCoordinator<A: LikeApi> {
    api: A,
    policy: RollbackPolicy,
}

impl<A: LikeApi> LikeCoordinator<A> {
    pub fn new(api: A) -> Self {
        Self::with_policy(api, RollbackPolicy::default())
    }

    pub fn with_policy(api: A, policy: RollbackPolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> RollbackPolicy {
        self.policy
    }

    /// Applies the optimistic change.
    ///
    /// # Errors
    /// - `LikeOutcome::LoginRequired` without a session.
    /// - `LikeOutcome::UnknownProject` when `portfolio` lacks the project.
    pub fn begin(
        &self,
        session: Option<&Session>,
        portfolio: &mut Portfolio,
        intent: LikeIntent,
    ) -> Result<PendingLike, LikeOutcome> {
        if session.is_none() {
            info!(
                "event=like_toggle module=like status=skipped project_id={} reason=no_session",
                intent.project_id
            );
            return Err(LikeOutcome::LoginRequired(Notice::error(
                LOGIN_REQUIRED_MESSAGE,
            )));
        }
        let Some(project) = portfolio.project_mut(intent.project_id) else {
            warn!(
                "event=like_toggle module=like status=skipped project_id={} reason=unknown_project",
                intent.project_id
            );
            return Err(LikeOutcome::UnknownProject(intent.project_id));
        };

        let pending = PendingLike {
            intent,
            previous_liked: project.liked_by_user,
            previous_count: project.likes_count,
        };
        project.liked_by_user = !intent.currently_liked;
        project.likes_count = if intent.currently_liked {
            project.likes_count.saturating_sub(1)
        } else {
            project.likes_count.saturating_add(1)
        };
        Ok(pending)
    }

    /// Sends the like or unlike request for `pending`.
    pub async fn confirm(&self, session: &Session, pending: &PendingLike) -> ApiResult<()> {
        let project_id = pending.intent.project_id;
        match pending.intent.method() {
            LikeMethod::Like => self.api.like_project(session.token(), project_id).await,
            LikeMethod::Unlike => self.api.unlike_project(session.token(), project_id).await,
        }
    }

    /// Reconciles the local state with the request result.
    pub fn settle(
        &self,
        portfolio: &mut Portfolio,
        pending: PendingLike,
        result: ApiResult<()>,
    ) -> LikeOutcome {
        let project_id = pending.intent.project_id;
        let method = pending.intent.method().as_str();
        match result {
            Ok(()) => {
                info!(
                    "event=like_toggle module=like status=ok project_id={project_id} method={method}"
                );
                let (liked, likes_count) = portfolio
                    .project(project_id)
                    .map(|project| (project.liked_by_user, project.likes_count))
                    .unwrap_or((!pending.intent.currently_liked, pending.previous_count));
                LikeOutcome::Confirmed {
                    project_id,
                    liked,
                    likes_count,
                }
            }
            Err(err) => {
                warn!(
                    "event=like_toggle module=like status=error project_id={project_id} method={method} policy={:?} error={err}",
                    self.policy
                );
                let rolled_back = self.policy == RollbackPolicy::Revert
                    && match portfolio.project_mut(project_id) {
                        Some(project) => {
                            project.liked_by_user = pending.previous_liked;
                            project.likes_count = pending.previous_count;
                            true
                        }
                        None => false,
                    };
                LikeOutcome::Failed {
                    notice: Notice::error(LIKE_FAILED_MESSAGE),
                    rolled_back,
                }
            }
        }
    }

    /// Runs `begin`, `confirm` and `settle` in sequence.
    pub async fn toggle_like(
        &self,
        session: Option<&Session>,
        portfolio: &mut Portfolio,
        project_id: RecordId,
        currently_liked: bool,
    ) -> LikeOutcome {
        let intent = LikeIntent {
            project_id,
            currently_liked,
        };
        let pending = match self.begin(session, portfolio, intent) {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let Some(session) = session else {
            return LikeOutcome::LoginRequired(Notice::error(LOGIN_REQUIRED_MESSAGE));
        };
        let result = self.confirm(session, &pending).await;
        self.settle(portfolio, pending, result)
    }
}
