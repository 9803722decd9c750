//! Portfolio, project and achievement records.
//!
//! # Responsibility
//! - Decode the public portfolio payload served by the API.
//! - Provide request bodies for owner-side edits.
//!
//! # Invariants
//! - `likes_count` and `liked_by_user` are scoped to the identity that
//!   fetched the portfolio.
//! - When a payload carries both the base `Projects` array and the
//!   like-enriched `projects` array, the enriched array is kept.

use crate::model::dates::{deserialize_opt, serialize_opt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric identifier assigned by the API.
pub type RecordId = u64;

/// Public portfolio of one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PortfolioWire")]
pub struct Portfolio {
    #[serde(rename = "ID")]
    pub id: RecordId,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Rich-text payload; blank when the owner never wrote one.
    #[serde(rename = "AboutMe")]
    pub about_me: String,
    #[serde(rename = "ContactInfo")]
    pub contact_info: String,
    /// Stored layout preference, resolved by `LayoutKind::select`.
    #[serde(rename = "Layout")]
    pub layout: String,
    #[serde(rename = "Projects")]
    pub projects: Vec<Project>,
    #[serde(rename = "Achievements")]
    pub achievements: Vec<Achievement>,
    #[serde(rename = "user", skip_serializing_if = "Option::is_none")]
    pub owner: Option<PublicUser>,
}

#[derive(Deserialize)]
struct PortfolioWire {
    #[serde(rename = "ID", default)]
    id: RecordId,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "AboutMe", default)]
    about_me: Option<String>,
    #[serde(rename = "ContactInfo", default)]
    contact_info: Option<String>,
    #[serde(rename = "Layout", default)]
    layout: Option<String>,
    #[serde(rename = "Projects", default)]
    base_projects: Option<Vec<Project>>,
    #[serde(rename = "projects", default)]
    public_projects: Option<Vec<Project>>,
    #[serde(rename = "Achievements", default)]
    achievements: Option<Vec<Achievement>>,
    #[serde(rename = "user", default)]
    owner: Option<PublicUser>,
}

impl From<PortfolioWire> for Portfolio {
    fn from(wire: PortfolioWire) -> Self {
        Self {
            id: wire.id,
            title: wire.title,
            description: wire.description,
            about_me: wire.about_me.unwrap_or_default(),
            contact_info: wire.contact_info.unwrap_or_default(),
            layout: wire.layout.unwrap_or_default(),
            projects: wire
                .public_projects
                .or(wire.base_projects)
                .unwrap_or_default(),
            achievements: wire.achievements.unwrap_or_default(),
            owner: wire.owner,
        }
    }
}

impl Portfolio {
    /// About-me payload, or `None` when blank.
    pub fn about_me(&self) -> Option<&str> {
        non_blank(&self.about_me)
    }

    pub fn project(&self, id: RecordId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn project_mut(&mut self, id: RecordId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|project| project.id == id)
    }

    pub fn achievement(&self, id: RecordId) -> Option<&Achievement> {
        self.achievements
            .iter()
            .find(|achievement| achievement.id == id)
    }
}

/// One showcased project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "ID", default)]
    pub id: RecordId,
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Rich-text payload.
    #[serde(rename = "Description", default)]
    pub description: String,
    /// Comma-separated technology tags.
    #[serde(rename = "Technologies", default)]
    pub technologies: String,
    #[serde(rename = "Link", default)]
    pub link: String,
    #[serde(rename = "ImageURL", default)]
    pub image_url: String,
    #[serde(rename = "Featured", default)]
    pub featured: bool,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub liked_by_user: bool,
}

impl Project {
    /// Trimmed, non-empty technology tags in declaration order.
    pub fn technology_tags(&self) -> Vec<&str> {
        self.technologies
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }

    /// Case-insensitive substring match against the raw technologies field.
    pub fn mentions_technology(&self, needle: &str) -> bool {
        self.technologies
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    pub fn link(&self) -> Option<&str> {
        non_blank(&self.link)
    }

    pub fn image_url(&self) -> Option<&str> {
        non_blank(&self.image_url)
    }
}

/// One dated achievement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(rename = "ID", default)]
    pub id: RecordId,
    #[serde(rename = "Title", default)]
    pub title: String,
    /// Rich-text payload.
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(
        rename = "Date",
        default,
        serialize_with = "serialize_opt",
        deserialize_with = "deserialize_opt"
    )]
    pub date: Option<DateTime<Utc>>,
}

/// Public owner card attached to a portfolio.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub bio: String,
    /// Comma-separated URLs.
    #[serde(default)]
    pub social_media_links: String,
    #[serde(default)]
    pub profile_picture_url: String,
}

impl PublicUser {
    pub fn social_links(&self) -> Vec<&str> {
        self.social_media_links
            .split(',')
            .map(str::trim)
            .filter(|link| !link.is_empty())
            .collect()
    }

    pub fn bio(&self) -> Option<&str> {
        non_blank(&self.bio)
    }

    pub fn profile_picture_url(&self) -> Option<&str> {
        non_blank(&self.profile_picture_url)
    }
}

/// Body of `PUT /api/auth/portfolio`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PortfolioUpdate {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Encoded rich-text payload.
    #[serde(rename = "AboutMe")]
    pub about_me: String,
    #[serde(rename = "ContactInfo")]
    pub contact_info: String,
    #[serde(rename = "Layout")]
    pub layout: String,
}

/// Body of project create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectDraft {
    #[serde(rename = "Title")]
    pub title: String,
    /// Encoded rich-text payload.
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Technologies")]
    pub technologies: String,
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "ImageURL")]
    pub image_url: String,
    #[serde(rename = "Featured")]
    pub featured: bool,
}

/// Body of achievement create/update requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AchievementDraft {
    #[serde(rename = "Title")]
    pub title: String,
    /// Encoded rich-text payload.
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(
        rename = "Date",
        serialize_with = "serialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
}

pub(crate) fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
