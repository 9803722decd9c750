#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use folio_core::api::{
    ApiError, ApiResult, AuthApi, BlogApi, ContactApi, LikeApi, PortfolioApi, Registration,
    UserApi,
};
use folio_core::model::account::{PasswordChange, ProfileUpdate};
use folio_core::model::contact::ContactMessage;
use folio_core::model::portfolio::{
    Achievement, AchievementDraft, Portfolio, PortfolioUpdate, Project, ProjectDraft, RecordId,
};
use folio_core::model::post::{Post, PostDraft};
use folio_core::session::Session;
use std::sync::{Arc, Mutex};

pub fn token(user_id: RecordId, username: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let claims = URL_SAFE_NO_PAD
        .encode(format!(r#"{{"user_id":{user_id},"username":"{username}"}}"#).as_bytes());
    format!("{header}.{claims}.sig")
}

pub fn session(user_id: RecordId, username: &str) -> Session {
    Session::from_token(token(user_id, username)).unwrap()
}

pub fn project(id: RecordId, title: &str, technologies: &str, featured: bool) -> Project {
    Project {
        id,
        title: title.to_string(),
        technologies: technologies.to_string(),
        featured,
        ..Project::default()
    }
}

#[derive(Default)]
pub struct FakeState {
    pub calls: Vec<String>,
    pub portfolio: Option<Portfolio>,
    pub posts: Vec<Post>,
    pub fail_status: Option<u16>,
    pub login_token: Option<String>,
    pub contact_messages: Vec<ContactMessage>,
    pub project_drafts: Vec<ProjectDraft>,
    pub post_drafts: Vec<PostDraft>,
    pub achievement_drafts: Vec<AchievementDraft>,
    pub user_updates: Vec<ProfileUpdate>,
    /// When set, password changes with another old password get a 401.
    pub current_password: Option<String>,
}

/// In-memory API double recording every call as `METHOD path`.
#[derive(Clone, Default)]
pub struct FakeApi {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn with_portfolio(portfolio: Portfolio) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().portfolio = Some(portfolio);
        api
    }

    pub fn failing(status: u16) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().fail_status = Some(status);
        api
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.fail_status {
            Some(status) => Err(ApiError::Status {
                status,
                message: "fake failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthApi for FakeApi {
    async fn login(&self, username: &str, _password: &str) -> ApiResult<String> {
        self.record(format!("POST /api/login {username}"))?;
        let state = self.state.lock().unwrap();
        Ok(state.login_token.clone().unwrap_or_else(|| token(1, username)))
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        self.record(format!("POST /api/register {}", registration.username))
    }
}

#[async_trait]
impl PortfolioApi for FakeApi {
    async fn fetch_portfolio(&self, username: &str, token: Option<&str>) -> ApiResult<Portfolio> {
        self.record(format!(
            "GET /api/portfolio/{username} auth={}",
            token.is_some()
        ))?;
        self.state
            .lock()
            .unwrap()
            .portfolio
            .clone()
            .ok_or(ApiError::Status {
                status: 404,
                message: "Portfolio not found".to_string(),
            })
    }

    async fn update_portfolio(
        &self,
        _token: &str,
        update: &PortfolioUpdate,
    ) -> ApiResult<Portfolio> {
        self.record("PUT /api/auth/portfolio".to_string())?;
        Ok(Portfolio {
            title: update.title.clone(),
            about_me: update.about_me.clone(),
            layout: update.layout.clone(),
            ..Portfolio::default()
        })
    }

    async fn create_project(&self, _token: &str, draft: &ProjectDraft) -> ApiResult<Project> {
        self.record("POST /api/auth/portfolio/projects".to_string())?;
        self.state.lock().unwrap().project_drafts.push(draft.clone());
        Ok(Project {
            id: 42,
            title: draft.title.clone(),
            description: draft.description.clone(),
            ..Project::default()
        })
    }

    async fn update_project(
        &self,
        _token: &str,
        id: RecordId,
        draft: &ProjectDraft,
    ) -> ApiResult<Project> {
        self.record(format!("PUT /api/auth/portfolio/projects/{id}"))?;
        self.state.lock().unwrap().project_drafts.push(draft.clone());
        Ok(Project {
            id,
            title: draft.title.clone(),
            ..Project::default()
        })
    }

    async fn delete_project(&self, _token: &str, id: RecordId) -> ApiResult<()> {
        self.record(format!("DELETE /api/auth/portfolio/projects/{id}"))
    }

    async fn create_achievement(
        &self,
        _token: &str,
        draft: &AchievementDraft,
    ) -> ApiResult<Achievement> {
        self.record("POST /api/auth/portfolio/achievements".to_string())?;
        self.state.lock().unwrap().achievement_drafts.push(draft.clone());
        Ok(Achievement {
            id: 5,
            title: draft.title.clone(),
            description: draft.description.clone(),
            date: draft.date,
        })
    }

    async fn update_achievement(
        &self,
        _token: &str,
        id: RecordId,
        draft: &AchievementDraft,
    ) -> ApiResult<Achievement> {
        self.record(format!("PUT /api/auth/portfolio/achievements/{id}"))?;
        self.state.lock().unwrap().achievement_drafts.push(draft.clone());
        Ok(Achievement {
            id,
            title: draft.title.clone(),
            ..Achievement::default()
        })
    }

    async fn delete_achievement(&self, _token: &str, id: RecordId) -> ApiResult<()> {
        self.record(format!("DELETE /api/auth/portfolio/achievements/{id}"))
    }

    async fn upload_image(
        &self,
        _token: &str,
        file_name: &str,
        _bytes: Vec<u8>,
    ) -> ApiResult<String> {
        self.record(format!("POST /api/auth/upload {file_name}"))?;
        Ok(format!("/uploads/{file_name}"))
    }
}

#[async_trait]
impl LikeApi for FakeApi {
    async fn like_project(&self, _token: &str, project_id: RecordId) -> ApiResult<()> {
        self.record(format!("POST /api/auth/portfolio/projects/{project_id}/like"))
    }

    async fn unlike_project(&self, _token: &str, project_id: RecordId) -> ApiResult<()> {
        self.record(format!("DELETE /api/auth/portfolio/projects/{project_id}/like"))
    }
}

#[async_trait]
impl BlogApi for FakeApi {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.record("GET /api/posts".to_string())?;
        Ok(self.state.lock().unwrap().posts.clone())
    }

    async fn get_post(&self, id: RecordId) -> ApiResult<Post> {
        self.record(format!("GET /api/posts/{id}"))?;
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or(ApiError::Status {
                status: 404,
                message: "Post not found".to_string(),
            })
    }

    async fn create_post(&self, _token: &str, draft: &PostDraft) -> ApiResult<Post> {
        self.record("POST /api/auth/posts".to_string())?;
        self.state.lock().unwrap().post_drafts.push(draft.clone());
        Ok(Post {
            id: 11,
            title: draft.title.clone(),
            content: draft.content.clone(),
            ..Post::default()
        })
    }

    async fn update_post(&self, _token: &str, id: RecordId, draft: &PostDraft) -> ApiResult<Post> {
        self.record(format!("PUT /api/auth/posts/{id}"))?;
        Ok(Post {
            id,
            title: draft.title.clone(),
            content: draft.content.clone(),
            ..Post::default()
        })
    }

    async fn delete_post(&self, _token: &str, id: RecordId) -> ApiResult<()> {
        self.record(format!("DELETE /api/auth/posts/{id}"))
    }
}

#[async_trait]
impl ContactApi for FakeApi {
    async fn send_contact(&self, message: &ContactMessage) -> ApiResult<()> {
        self.record("POST /api/contact".to_string())?;
        self.state
            .lock()
            .unwrap()
            .contact_messages
            .push(message.clone());
        Ok(())
    }
}

#[async_trait]
impl UserApi for FakeApi {
    async fn update_user(&self, _token: &str, update: &ProfileUpdate) -> ApiResult<()> {
        self.record("PUT /api/auth/user".to_string())?;
        self.state.lock().unwrap().user_updates.push(update.clone());
        Ok(())
    }

    async fn change_password(&self, _token: &str, change: &PasswordChange) -> ApiResult<()> {
        self.record("PUT /api/auth/user/password".to_string())?;
        let mut state = self.state.lock().unwrap();
        match &state.current_password {
            Some(current) if current != &change.old_password => Err(ApiError::Status {
                status: 401,
                message: "Old password does not match".to_string(),
            }),
            _ => {
                state.current_password = Some(change.new_password.clone());
                Ok(())
            }
        }
    }
}
