//! Client core for the Folio portfolio and blogging platform.
//! Rich-text codec, profile layouts, optimistic likes and the API glue
//! around them.

pub mod api;
pub mod codec;
pub mod config;
pub mod db;
pub mod layout;
pub mod logging;
pub mod model;
pub mod service;
pub mod session;

pub use api::{
    ApiError, ApiResult, AuthApi, BlogApi, ContactApi, HttpApiClient, LikeApi, PortfolioApi,
    Registration, UserApi,
};
pub use codec::{decode, encode, render, render_or, DecodeOutcome};
pub use config::{ClientConfig, ConfigError};
pub use layout::{select_layout, LayoutKind, ProfileQuery, ProfileView, ProjectQuery, SortOrder};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::portfolio::{Achievement, Portfolio, Project, PublicUser, RecordId};
pub use model::post::Post;
pub use model::rich_text::{Block, BlockType, HeadingLevel, InlineStyle, RichDocument};
pub use service::like_service::{
    LikeCoordinator, LikeIntent, LikeOutcome, Notice, NoticeLevel, RollbackPolicy,
};
pub use service::{ServiceError, ServiceResult};
pub use session::{AuthContext, Identity, Session, SessionError, SqliteTokenStore, TokenStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
