//! Blog reading and authoring.
//!
//! # Responsibility
//! - List posts with plain-text previews and render single posts to HTML.
//! - Create, update and delete posts with codec-encoded content.
//!
//! # Invariants
//! - Legacy plain-text content is rendered as one escaped paragraph.
//! - Authoring calls require a session and a non-blank title.

use super::{not_found_as, require_session, require_text, ServiceResult};
use crate::api::BlogApi;
use crate::codec::{self, html};
use crate::model::dates::format_short;
use crate::model::portfolio::RecordId;
use crate::model::post::{Post, PostDraft};
use crate::model::rich_text::RichDocument;
use crate::session::Session;
use chrono::{DateTime, Utc};
use log::info;

/// Characters kept in a listing preview.
pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub id: RecordId,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub preview: Option<String>,
}

impl PostSummary {
    pub fn from_post(post: &Post) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            published_at: post.published_at,
            preview: codec::preview_text(&post.content, PREVIEW_CHARS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPost {
    pub id: RecordId,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub author_id: RecordId,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostForm {
    pub title: String,
    pub content: RichDocument,
}

impl PostForm {
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: codec::decode(&post.content).into_document(),
        }
    }

    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.trim().to_string(),
            content: codec::encode(&self.content),
        }
    }
}

pub struct BlogService<B: BlogApi> {
    api: B,
}

impl<B: BlogApi> BlogService<B> {
    pub fn new(api: B) -> Self {
        Self { api }
    }

    pub async fn list(&self) -> ServiceResult<Vec<PostSummary>> {
        let posts = self.api.list_posts().await?;
        info!("event=post_list module=blog status=ok count={}", posts.len());
        Ok(posts.iter().map(PostSummary::from_post).collect())
    }

    pub async fn get(&self, id: RecordId) -> ServiceResult<RenderedPost> {
        let post = self
            .api
            .get_post(id)
            .await
            .map_err(not_found_as("post", id))?;
        Ok(RenderedPost {
            id: post.id,
            title: post.title,
            published_at: post.published_at,
            author_id: post.user_id,
            html: codec::render(Some(post.content.as_str())),
        })
    }

    pub async fn create(&self, session: Option<&Session>, form: &PostForm) -> ServiceResult<Post> {
        let session = require_session(session)?;
        require_text("title", &form.title)?;
        let post = self.api.create_post(session.token(), &form.to_draft()).await?;
        info!("event=post_create module=blog status=ok post_id={}", post.id);
        Ok(post)
    }

    pub async fn update(
        &self,
        session: Option<&Session>,
        id: RecordId,
        form: &PostForm,
    ) -> ServiceResult<Post> {
        let session = require_session(session)?;
        require_text("title", &form.title)?;
        let post = self
            .api
            .update_post(session.token(), id, &form.to_draft())
            .await
            .map_err(not_found_as("post", id))?;
        info!("event=post_update module=blog status=ok post_id={id}");
        Ok(post)
    }

    pub async fn delete(&self, session: Option<&Session>, id: RecordId) -> ServiceResult<()> {
        let session = require_session(session)?;
        self.api
            .delete_post(session.token(), id)
            .await
            .map_err(not_found_as("post", id))?;
        info!("event=post_delete module=blog status=ok post_id={id}");
        Ok(())
    }
}

/// Renders the post listing.
pub fn render_post_list(posts: &[PostSummary]) -> String {
    let mut out = String::from("<section class=\"blog\">\n<h1>Blog Posts</h1>\n");
    if posts.is_empty() {
        out.push_str("<p>No blog posts yet.</p>\n");
    }
    for post in posts {
        out.push_str(&format!(
            "<article class=\"post-summary\" data-post-id=\"{}\">\n<h2>{}</h2>\n",
            post.id,
            html::escape_text(&post.title)
        ));
        if let Some(date) = &post.published_at {
            out.push_str(&format!(
                "<p class=\"date\">Published: {}</p>\n",
                format_short(date)
            ));
        }
        if let Some(preview) = &post.preview {
            out.push_str(&format!(
                "<p class=\"preview\">{}</p>\n",
                html::escape_text(preview)
            ));
        }
        out.push_str(&format!(
            "<a href=\"/blog/{}\">Read More</a>\n</article>\n",
            post.id
        ));
    }
    out.push_str("</section>\n");
    out
}

/// Renders one post page.
pub fn render_post_page(post: &RenderedPost) -> String {
    let mut out = format!(
        "<article class=\"post\">\n<h1>{}</h1>\n",
        html::escape_text(&post.title)
    );
    if let Some(date) = &post.published_at {
        out.push_str(&format!(
            "<p class=\"date\">Published: {}</p>\n",
            format_short(date)
        ));
    }
    out.push_str(&format!(
        "<div class=\"prose\">\n{}\n</div>\n</article>\n",
        post.html
    ));
    out
}
