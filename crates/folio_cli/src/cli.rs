//! CLI argument definitions for Folio.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Folio - view portfolios, like projects and manage your own content.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about = "Client for the Folio portfolio platform", long_about = None)]
pub struct Cli {
    /// API base URL (defaults to http://localhost:8080)
    #[arg(long = "api-url", global = true, env = "FOLIO_API_URL")]
    pub api_url: Option<String>,

    /// Echo warnings and errors to stderr in addition to the log file
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a user's public profile page as HTML
    Profile {
        username: String,
        #[command(flatten)]
        filters: ProfileFilters,
        /// Also fetch the blog listing while the profile loads
        #[arg(long)]
        with_posts: bool,
    },

    /// Toggle your like on a project of a user's portfolio
    Like {
        username: String,
        project_id: u64,
        /// Undo the local change when the server rejects it
        #[arg(long)]
        revert_on_failure: bool,
    },

    /// Sign in and remember the session
    Login {
        username: String,
        #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the remembered session
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Blog posts
    Post {
        #[command(subcommand)]
        command: PostCommands,
    },

    /// Edit your own portfolio
    Portfolio {
        #[command(subcommand)]
        command: PortfolioCommands,
    },

    /// Edit your account card or password
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },

    /// Upload an image and print its URL
    Upload { path: PathBuf },

    /// Render a stored rich-text payload file to HTML
    Render {
        path: PathBuf,
        /// Placeholder used when the payload is empty
        #[arg(long)]
        placeholder: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProfileFilters {
    /// Only list non-featured projects mentioning this technology
    #[arg(long)]
    pub tech: Option<String>,
    /// Sort non-featured projects: date-desc, date-asc, title-asc, title-desc
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort featured projects (kept in API order when omitted)
    #[arg(long = "featured-sort")]
    pub featured_sort: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PostCommands {
    /// List published posts with previews
    List {
        /// Print HTML instead of plain text
        #[arg(long)]
        html: bool,
    },
    /// Show one post as HTML
    Show { id: u64 },
    /// Publish a post; content may be plain text or a rich-text payload
    Create {
        #[arg(long)]
        title: String,
        #[arg(long = "content-file")]
        content_file: PathBuf,
    },
    /// Replace a post's title and content
    Update {
        id: u64,
        #[arg(long)]
        title: String,
        #[arg(long = "content-file")]
        content_file: PathBuf,
    },
    /// Delete one of your posts
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum PortfolioCommands {
    /// Edit the portfolio header, about-me text and layout; omitted
    /// fields keep their current values
    Update {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Plain text or rich-text payload for the about-me section
        #[arg(long = "about-file")]
        about_file: Option<PathBuf>,
        #[arg(long = "contact-info")]
        contact_info: Option<String>,
        /// default, compact or grid
        #[arg(long)]
        layout: Option<String>,
    },
    /// Add a project
    AddProject {
        #[arg(long)]
        title: String,
        /// Plain text or rich-text payload for the description
        #[arg(long = "description-file")]
        description_file: Option<PathBuf>,
        /// Comma-separated technologies
        #[arg(long, default_value = "")]
        technologies: String,
        #[arg(long, default_value = "")]
        link: String,
        #[arg(long = "image-url", default_value = "")]
        image_url: String,
        #[arg(long)]
        featured: bool,
    },
    /// Edit a project; omitted fields keep their current values
    UpdateProject {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "description-file")]
        description_file: Option<PathBuf>,
        #[arg(long)]
        technologies: Option<String>,
        #[arg(long)]
        link: Option<String>,
        #[arg(long = "image-url")]
        image_url: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
    },
    /// Delete a project
    RemoveProject { id: u64 },
    /// Add an achievement
    AddAchievement {
        #[arg(long)]
        title: String,
        #[arg(long = "description-file")]
        description_file: Option<PathBuf>,
        /// YYYY-MM-DD or RFC 3339
        #[arg(long)]
        date: Option<String>,
    },
    /// Edit an achievement; omitted fields keep their current values
    UpdateAchievement {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "description-file")]
        description_file: Option<PathBuf>,
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an achievement
    RemoveAchievement { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// Replace username, email, bio, links and picture; omitted public
    /// fields keep their current values
    Update {
        /// Email is private, so it is always required
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        /// Repeat for each link; replaces the current list
        #[arg(long = "social-link")]
        social_links: Option<Vec<String>>,
        #[arg(long = "picture-url")]
        picture_url: Option<String>,
    },
    /// Change your password
    Password {
        #[arg(long = "old", env = "FOLIO_PASSWORD", hide_env_values = true)]
        old_password: String,
        #[arg(long = "new", env = "FOLIO_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },
}
