//! Owner-side portfolio editing.
//!
//! # Responsibility
//! - Turn editable forms (rich-text documents included) into API drafts.
//! - Create, update and delete projects and achievements; upload images.
//! - Prefill forms from the owner's current records so partial edits keep
//!   the fields they do not touch.
//!
//! # Invariants
//! - Rich-text fields are always sent as encoded document payloads.
//! - Every call requires a session and passes validation before any
//!   request is sent.

use super::{not_found_as, require_session, require_text, ServiceError, ServiceResult};
use crate::api::PortfolioApi;
use crate::codec;
use crate::layout::LayoutKind;
use crate::model::portfolio::{
    Achievement, AchievementDraft, Portfolio, PortfolioUpdate, Project, ProjectDraft, RecordId,
};
use crate::model::rich_text::RichDocument;
use crate::session::Session;
use chrono::{DateTime, Utc};
use log::info;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Editable portfolio header fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioForm {
    pub title: String,
    pub description: String,
    pub about_me: RichDocument,
    pub contact_info: String,
    pub layout: LayoutKind,
}

impl PortfolioForm {
    /// Prefills the form from a loaded portfolio.
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        Self {
            title: portfolio.title.clone(),
            description: portfolio.description.clone(),
            about_me: decode_or_empty(&portfolio.about_me),
            contact_info: portfolio.contact_info.clone(),
            layout: LayoutKind::for_portfolio(portfolio),
        }
    }

    pub fn to_update(&self) -> PortfolioUpdate {
        PortfolioUpdate {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            about_me: codec::encode(&self.about_me),
            contact_info: self.contact_info.trim().to_string(),
            layout: self.layout.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: RichDocument,
    pub technologies: String,
    pub link: String,
    pub image_url: String,
    pub featured: bool,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: decode_or_empty(&project.description),
            technologies: project.technologies.clone(),
            link: project.link.clone(),
            image_url: project.image_url.clone(),
            featured: project.featured,
        }
    }

    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.trim().to_string(),
            description: codec::encode(&self.description),
            technologies: self.technologies.trim().to_string(),
            link: self.link.trim().to_string(),
            image_url: self.image_url.trim().to_string(),
            featured: self.featured,
        }
    }

    fn validate(&self) -> ServiceResult<()> {
        require_text("title", &self.title)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AchievementForm {
    pub title: String,
    pub description: RichDocument,
    pub date: Option<DateTime<Utc>>,
}

impl AchievementForm {
    pub fn from_achievement(achievement: &Achievement) -> Self {
        Self {
            title: achievement.title.clone(),
            description: decode_or_empty(&achievement.description),
            date: achievement.date,
        }
    }

    pub fn to_draft(&self) -> AchievementDraft {
        AchievementDraft {
            title: self.title.trim().to_string(),
            description: codec::encode(&self.description),
            date: self.date,
        }
    }

    fn validate(&self) -> ServiceResult<()> {
        require_text("title", &self.title)
    }
}

/// Blank payloads open as an empty document rather than an empty paragraph.
fn decode_or_empty(payload: &str) -> RichDocument {
    if payload.trim().is_empty() {
        return RichDocument::new();
    }
    codec::decode(payload).into_document()
}

/// Owner-side editing use cases.
pub struct PortfolioEditor<P: PortfolioApi> {
    api: P,
}

impl<P: PortfolioApi> PortfolioEditor<P> {
    pub fn new(api: P) -> Self {
        Self { api }
    }

    /// Loads the signed-in owner's portfolio with like fields scoped to them.
    pub async fn load_own(&self, session: Option<&Session>) -> ServiceResult<Portfolio> {
        let session = require_session(session)?;
        let identity = session.identity();
        self.api
            .fetch_portfolio(&identity.username, Some(session.token()))
            .await
            .map_err(not_found_as("portfolio", identity.user_id))
    }

    /// Current header form; an owner without a portfolio starts blank.
    pub async fn portfolio_form(
        &self,
        session: Option<&Session>,
    ) -> ServiceResult<PortfolioForm> {
        match self.load_own(session).await {
            Ok(portfolio) => Ok(PortfolioForm::from_portfolio(&portfolio)),
            Err(ServiceError::NotFound { .. }) => Ok(PortfolioForm::default()),
            Err(err) => Err(err),
        }
    }

    pub async fn project_form(
        &self,
        session: Option<&Session>,
        id: RecordId,
    ) -> ServiceResult<ProjectForm> {
        let portfolio = self.load_own(session).await?;
        portfolio
            .project(id)
            .map(ProjectForm::from_project)
            .ok_or(ServiceError::NotFound { kind: "project", id })
    }

    pub async fn achievement_form(
        &self,
        session: Option<&Session>,
        id: RecordId,
    ) -> ServiceResult<AchievementForm> {
        let portfolio = self.load_own(session).await?;
        portfolio
            .achievement(id)
            .map(AchievementForm::from_achievement)
            .ok_or(ServiceError::NotFound {
                kind: "achievement",
                id,
            })
    }

    pub async fn update_portfolio(
        &self,
        session: Option<&Session>,
        form: &PortfolioForm,
    ) -> ServiceResult<Portfolio> {
        let session = require_session(session)?;
        let portfolio = self
            .api
            .update_portfolio(session.token(), &form.to_update())
            .await?;
        info!(
            "event=portfolio_update module=editor status=ok layout={}",
            form.layout.as_str()
        );
        Ok(portfolio)
    }

    pub async fn create_project(
        &self,
        session: Option<&Session>,
        form: &ProjectForm,
    ) -> ServiceResult<Project> {
        let session = require_session(session)?;
        form.validate()?;
        let project = self
            .api
            .create_project(session.token(), &form.to_draft())
            .await?;
        info!(
            "event=project_create module=editor status=ok project_id={}",
            project.id
        );
        Ok(project)
    }

    pub async fn update_project(
        &self,
        session: Option<&Session>,
        id: RecordId,
        form: &ProjectForm,
    ) -> ServiceResult<Project> {
        let session = require_session(session)?;
        form.validate()?;
        let project = self
            .api
            .update_project(session.token(), id, &form.to_draft())
            .await
            .map_err(not_found_as("project", id))?;
        info!("event=project_update module=editor status=ok project_id={id}");
        Ok(project)
    }

    pub async fn delete_project(&self, session: Option<&Session>, id: RecordId) -> ServiceResult<()> {
        let session = require_session(session)?;
        self.api
            .delete_project(session.token(), id)
            .await
            .map_err(not_found_as("project", id))?;
        info!("event=project_delete module=editor status=ok project_id={id}");
        Ok(())
    }

    pub async fn create_achievement(
        &self,
        session: Option<&Session>,
        form: &AchievementForm,
    ) -> ServiceResult<Achievement> {
        let session = require_session(session)?;
        form.validate()?;
        let achievement = self
            .api
            .create_achievement(session.token(), &form.to_draft())
            .await?;
        info!(
            "event=achievement_create module=editor status=ok achievement_id={}",
            achievement.id
        );
        Ok(achievement)
    }

    pub async fn update_achievement(
        &self,
        session: Option<&Session>,
        id: RecordId,
        form: &AchievementForm,
    ) -> ServiceResult<Achievement> {
        let session = require_session(session)?;
        form.validate()?;
        let achievement = self
            .api
            .update_achievement(session.token(), id, &form.to_draft())
            .await
            .map_err(not_found_as("achievement", id))?;
        info!("event=achievement_update module=editor status=ok achievement_id={id}");
        Ok(achievement)
    }

    pub async fn delete_achievement(
        &self,
        session: Option<&Session>,
        id: RecordId,
    ) -> ServiceResult<()> {
        let session = require_session(session)?;
        self.api
            .delete_achievement(session.token(), id)
            .await
            .map_err(not_found_as("achievement", id))?;
        info!("event=achievement_delete module=editor status=ok achievement_id={id}");
        Ok(())
    }

    /// Uploads an image and returns the URL to store on a project.
    pub async fn upload_image(
        &self,
        session: Option<&Session>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ServiceResult<String> {
        let session = require_session(session)?;
        require_text("file_name", file_name)?;
        if bytes.is_empty() {
            return Err(ServiceError::validation("image", "file is empty"));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ServiceError::validation(
                "image",
                format!("file exceeds {} MiB", MAX_UPLOAD_BYTES / (1024 * 1024)),
            ));
        }
        let size = bytes.len();
        let url = self
            .api
            .upload_image(session.token(), file_name.trim(), bytes)
            .await?;
        info!("event=image_upload module=editor status=ok bytes={size}");
        Ok(url)
    }
}
