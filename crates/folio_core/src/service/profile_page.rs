//! Public profile page state.
//!
//! # Responsibility
//! - Load a portfolio, track loading/failed/missing/ready states and render
//!   the matching HTML.
//! - Route like toggles through the coordinator and collect notices.
//!
//! # Invariants
//! - A failed reload keeps an already loaded portfolio and reports a notice.
//! - Views are rebuilt from the current portfolio on every render.

use super::like_service::{LikeCoordinator, LikeOutcome, Notice, LOGIN_REQUIRED_MESSAGE};
use crate::api::{LikeApi, PortfolioApi};
use crate::layout::{page, ProfileQuery, ProfileView};
use crate::model::portfolio::{Portfolio, RecordId};
use crate::session::Session;
use log::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Failed(String),
    /// The user exists but never created a portfolio.
    Missing,
    Ready(Portfolio),
}

/// One open profile page.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    username: String,
    state: PageState,
    pub query: ProfileQuery,
    notices: Vec<Notice>,
}

impl ProfilePage {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            state: PageState::Loading,
            query: ProfileQuery::default(),
            notices: Vec::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn portfolio(&self) -> Option<&Portfolio> {
        match &self.state {
            PageState::Ready(portfolio) => Some(portfolio),
            _ => None,
        }
    }

    /// Fetches the portfolio, scoping like fields to `session` when given.
    pub async fn load<P>(&mut self, api: &P, session: Option<&Session>)
    where
        P: PortfolioApi + ?Sized,
    {
        let token = session.map(Session::token);
        match api.fetch_portfolio(&self.username, token).await {
            Ok(portfolio) => {
                info!(
                    "event=profile_load module=profile status=ok projects={} authenticated={}",
                    portfolio.projects.len(),
                    token.is_some()
                );
                self.state = PageState::Ready(portfolio);
            }
            Err(err) if err.is_not_found() => {
                info!("event=profile_load module=profile status=missing");
                if self.portfolio().is_none() {
                    self.state = PageState::Missing;
                } else {
                    self.notices.push(Notice::error(err.to_string()));
                }
            }
            Err(err) => {
                warn!("event=profile_load module=profile status=error error={err}");
                if self.portfolio().is_none() {
                    self.state = PageState::Failed(err.to_string());
                } else {
                    self.notices.push(Notice::error(err.to_string()));
                }
            }
        }
    }

    /// View for the current state, when a portfolio is loaded.
    pub fn view(&self) -> Option<ProfileView<'_>> {
        self.portfolio()
            .map(|portfolio| ProfileView::new(portfolio, &self.query))
    }

    pub fn render_html(&self) -> String {
        match &self.state {
            PageState::Loading => page::render_loading(),
            PageState::Failed(message) => page::render_error(message),
            PageState::Missing => page::render_missing(),
            PageState::Ready(portfolio) => page::render_profile(portfolio, &self.query),
        }
    }

    /// Toggles a like on a loaded project, recording any notice.
    pub async fn toggle_like<A>(
        &mut self,
        coordinator: &LikeCoordinator<A>,
        session: Option<&Session>,
        project_id: RecordId,
        currently_liked: bool,
    ) -> LikeOutcome
    where
        A: LikeApi,
    {
        if session.is_none() {
            let notice = Notice::error(LOGIN_REQUIRED_MESSAGE);
            self.notices.push(notice.clone());
            return LikeOutcome::LoginRequired(notice);
        }
        let PageState::Ready(portfolio) = &mut self.state else {
            return LikeOutcome::UnknownProject(project_id);
        };
        let outcome = coordinator
            .toggle_like(session, portfolio, project_id, currently_liked)
            .await;
        if let Some(notice) = outcome.notice() {
            self.notices.push(notice.clone());
        }
        outcome
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
