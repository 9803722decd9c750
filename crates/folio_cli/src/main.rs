//! Folio CLI entry point.
//!
//! # Responsibility
//! - Wire configuration, logging, the session store and the HTTP client
//!   into `folio_core` services.
//! - Print HTML or short status lines; errors go to stderr with exit code 1.

mod cli;

use clap::Parser;
use cli::{AccountCommands, Cli, Commands, PortfolioCommands, PostCommands, ProfileFilters};
use folio_core::api::{HttpApiClient, Registration};
use folio_core::codec;
use folio_core::config::{ClientConfig, API_URL_VAR};
use folio_core::db::open_db;
use folio_core::layout::{LayoutKind, ProfileQuery, ProjectQuery, SortOrder};
use folio_core::logging::{init_logging, LogSettings};
use folio_core::model::contact::ContactMessage;
use folio_core::model::dates::parse_date;
use folio_core::model::rich_text::RichDocument;
use folio_core::service::account_service::{
    AccountForm, AccountService, PASSWORD_CHANGED_MESSAGE,
};
use folio_core::service::blog_service::{self, BlogService, PostForm};
use folio_core::service::contact_service::{ContactService, CONTACT_SENT_MESSAGE};
use folio_core::service::like_service::{LikeCoordinator, LikeOutcome, RollbackPolicy};
use folio_core::service::portfolio_editor::{AchievementForm, PortfolioEditor, ProjectForm};
use folio_core::service::profile_page::{PageState, ProfilePage};
use folio_core::service::ServiceError;
use folio_core::session::{AuthContext, Session, SqliteTokenStore};
use log::{info, warn};
use std::error::Error;
use std::path::Path;
use std::process;

type CliResult = Result<(), Box<dyn Error>>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> CliResult {
    let api_url = cli.api_url.clone();
    let config = ClientConfig::from_lookup(|key| {
        if key == API_URL_VAR {
            api_url.clone()
        } else {
            std::env::var(key).ok()
        }
    })?;
    init_logging(&LogSettings {
        level: config.log_level.to_string(),
        log_dir: config.log_dir(),
        echo_stderr: cli.verbose,
    })?;

    let conn = open_db(config.session_db_path())?;
    let mut auth = AuthContext::init(SqliteTokenStore::new(&conn, config.api_base_url.as_str()))?;
    let api = HttpApiClient::from_config(&config)?;

    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Commands::Profile {
            username,
            filters,
            with_posts,
        } => show_profile(&api, auth.session(), username, &filters, with_posts).await,
        Commands::Like {
            username,
            project_id,
            revert_on_failure,
        } => {
            let policy = if revert_on_failure {
                RollbackPolicy::Revert
            } else {
                RollbackPolicy::Keep
            };
            toggle_like(&api, auth.session(), username, project_id, policy).await
        }
        Commands::Login { username, password } => {
            let identity = auth.login(&api, &username, &password).await?;
            println!("Logged in as {}", identity.username);
            Ok(())
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            let registration = Registration {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password,
            };
            auth.register(&api, &registration).await?;
            println!(
                "Account created. Run `folio login {}` to sign in.",
                registration.username
            );
            Ok(())
        }
        Commands::Logout => {
            auth.logout()?;
            println!("Logged out.");
            Ok(())
        }
        Commands::Whoami => {
            match auth.identity() {
                Some(identity) => println!("{} (user {})", identity.username, identity.user_id),
                None => println!("Not logged in."),
            }
            Ok(())
        }
        Commands::Post { command } => run_post(&api, auth.session(), command).await,
        Commands::Portfolio { command } => run_portfolio(&api, auth.session(), command).await,
        Commands::Account { command } => run_account(&api, auth.session(), command).await,
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let message = ContactMessage {
                name,
                email,
                subject,
                message,
            };
            ContactService::new(api).send(&message).await?;
            println!("{CONTACT_SENT_MESSAGE}");
            Ok(())
        }
        Commands::Upload { path } => {
            let bytes = std::fs::read(&path)?;
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("image");
            let url = PortfolioEditor::new(api)
                .upload_image(auth.session(), file_name, bytes)
                .await?;
            println!("{url}");
            Ok(())
        }
        Commands::Render { path, placeholder } => {
            let payload = std::fs::read_to_string(&path)?;
            let html = match placeholder {
                Some(placeholder) => codec::render_or(Some(payload.as_str()), &placeholder),
                None => codec::render(Some(payload.as_str())),
            };
            println!("{html}");
            Ok(())
        }
    }
}

async fn show_profile(
    api: &HttpApiClient,
    session: Option<&Session>,
    username: String,
    filters: &ProfileFilters,
    with_posts: bool,
) -> CliResult {
    let mut page = ProfilePage::new(username);
    page.query = profile_query(filters);

    if with_posts {
        let blog = BlogService::new(api.clone());
        let ((), posts) = tokio::join!(page.load(api, session), blog.list());
        println!("{}", page.render_html());
        match posts {
            Ok(posts) => println!("{}", blog_service::render_post_list(&posts)),
            Err(err) => {
                warn!("event=cli_posts module=cli status=error error={err}");
                eprintln!("Error: {err}");
            }
        }
    } else {
        page.load(api, session).await;
        println!("{}", page.render_html());
    }
    for notice in page.take_notices() {
        eprintln!("{}", notice.message);
    }
    Ok(())
}

fn profile_query(filters: &ProfileFilters) -> ProfileQuery {
    let mut query = ProfileQuery::default();
    query.other.technology = filters.tech.clone();
    if let Some(sort) = &filters.sort {
        query.other.sort = Some(SortOrder::parse(sort));
    }
    query.featured = ProjectQuery {
        technology: None,
        sort: filters.featured_sort.as_deref().map(SortOrder::parse),
    };
    query
}

async fn toggle_like(
    api: &HttpApiClient,
    session: Option<&Session>,
    username: String,
    project_id: u64,
    policy: RollbackPolicy,
) -> CliResult {
    let mut page = ProfilePage::new(username);
    page.load(api, session).await;
    let currently_liked = match page.state() {
        PageState::Ready(portfolio) => portfolio
            .project(project_id)
            .map(|project| project.liked_by_user)
            .ok_or_else(|| format!("project {project_id} is not part of this portfolio"))?,
        PageState::Failed(message) => return Err(message.clone().into()),
        PageState::Missing => return Err("This user has not created a portfolio yet.".into()),
        PageState::Loading => return Err("portfolio did not load".into()),
    };

    let coordinator = LikeCoordinator::with_policy(api.clone(), policy);
    match page
        .toggle_like(&coordinator, session, project_id, currently_liked)
        .await
    {
        LikeOutcome::Confirmed {
            liked, likes_count, ..
        } => {
            let verb = if liked { "Liked" } else { "Unliked" };
            println!("{verb} project {project_id} ({likes_count} likes)");
            Ok(())
        }
        outcome => Err(outcome
            .notice()
            .map(|notice| notice.message.clone())
            .unwrap_or_else(|| format!("project {project_id} is not part of this portfolio"))
            .into()),
    }
}

async fn run_post(
    api: &HttpApiClient,
    session: Option<&Session>,
    command: PostCommands,
) -> CliResult {
    let blog = BlogService::new(api.clone());
    match command {
        PostCommands::List { html } => {
            let posts = blog.list().await?;
            if html {
                println!("{}", blog_service::render_post_list(&posts));
            } else if posts.is_empty() {
                println!("No blog posts yet.");
            } else {
                for post in posts {
                    println!("#{} {}", post.id, post.title);
                    if let Some(preview) = post.preview {
                        println!("    {preview}");
                    }
                }
            }
        }
        PostCommands::Show { id } => {
            let post = blog.get(id).await?;
            println!("{}", blog_service::render_post_page(&post));
        }
        PostCommands::Create {
            title,
            content_file,
        } => {
            let form = PostForm {
                title,
                content: read_document(&content_file)?,
            };
            let post = blog.create(session, &form).await?;
            println!("Published post {}", post.id);
        }
        PostCommands::Update {
            id,
            title,
            content_file,
        } => {
            let form = PostForm {
                title,
                content: read_document(&content_file)?,
            };
            blog.update(session, id, &form).await?;
            println!("Updated post {id}");
        }
        PostCommands::Delete { id } => {
            blog.delete(session, id).await?;
            println!("Deleted post {id}");
        }
    }
    Ok(())
}

async fn run_portfolio(
    api: &HttpApiClient,
    session: Option<&Session>,
    command: PortfolioCommands,
) -> CliResult {
    let editor = PortfolioEditor::new(api.clone());
    match command {
        PortfolioCommands::Update {
            title,
            description,
            about_file,
            contact_info,
            layout,
        } => {
            let mut form = editor.portfolio_form(session).await?;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(path) = about_file {
                form.about_me = read_document(&path)?;
            }
            if let Some(contact_info) = contact_info {
                form.contact_info = contact_info;
            }
            if let Some(layout) = layout {
                form.layout = LayoutKind::select(Some(layout.as_str()));
            }
            editor.update_portfolio(session, &form).await?;
            println!("Portfolio updated ({} layout)", form.layout.as_str());
        }
        PortfolioCommands::AddProject {
            title,
            description_file,
            technologies,
            link,
            image_url,
            featured,
        } => {
            let form = ProjectForm {
                title,
                description: read_optional_document(description_file.as_deref())?,
                technologies,
                link,
                image_url,
                featured,
            };
            let project = editor.create_project(session, &form).await?;
            println!("Created project {}", project.id);
        }
        PortfolioCommands::UpdateProject {
            id,
            title,
            description_file,
            technologies,
            link,
            image_url,
            featured,
        } => {
            let mut form = editor.project_form(session, id).await?;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(path) = description_file {
                form.description = read_document(&path)?;
            }
            if let Some(technologies) = technologies {
                form.technologies = technologies;
            }
            if let Some(link) = link {
                form.link = link;
            }
            if let Some(image_url) = image_url {
                form.image_url = image_url;
            }
            if let Some(featured) = featured {
                form.featured = featured;
            }
            editor.update_project(session, id, &form).await?;
            println!("Updated project {id}");
        }
        PortfolioCommands::RemoveProject { id } => {
            editor.delete_project(session, id).await?;
            println!("Deleted project {id}");
        }
        PortfolioCommands::AddAchievement {
            title,
            description_file,
            date,
        } => {
            let date = date
                .map(|raw| parse_date(&raw).ok_or_else(|| format!("invalid date `{raw}`")))
                .transpose()?;
            let form = AchievementForm {
                title,
                description: read_optional_document(description_file.as_deref())?,
                date,
            };
            let achievement = editor.create_achievement(session, &form).await?;
            println!("Created achievement {}", achievement.id);
        }
        PortfolioCommands::UpdateAchievement {
            id,
            title,
            description_file,
            date,
        } => {
            let mut form = editor.achievement_form(session, id).await?;
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(path) = description_file {
                form.description = read_document(&path)?;
            }
            if let Some(raw) = date {
                form.date =
                    Some(parse_date(&raw).ok_or_else(|| format!("invalid date `{raw}`"))?);
            }
            editor.update_achievement(session, id, &form).await?;
            println!("Updated achievement {id}");
        }
        PortfolioCommands::RemoveAchievement { id } => {
            editor.delete_achievement(session, id).await?;
            println!("Deleted achievement {id}");
        }
    }
    Ok(())
}

async fn run_account(
    api: &HttpApiClient,
    session: Option<&Session>,
    command: AccountCommands,
) -> CliResult {
    let account = AccountService::new(api.clone());
    match command {
        AccountCommands::Update {
            email,
            username,
            bio,
            social_links,
            picture_url,
        } => {
            let mut form = match PortfolioEditor::new(api.clone()).load_own(session).await {
                Ok(portfolio) => portfolio
                    .owner
                    .as_ref()
                    .map(AccountForm::from_public_user)
                    .unwrap_or_default(),
                Err(ServiceError::NotFound { .. }) => AccountForm::default(),
                Err(err) => return Err(err.into()),
            };
            if form.username.trim().is_empty() {
                if let Some(session) = session {
                    form.username = session.identity().username.clone();
                }
            }
            form.email = email;
            if let Some(username) = username {
                form.username = username;
            }
            if let Some(bio) = bio {
                form.bio = bio;
            }
            if let Some(links) = social_links {
                form.social_links = links;
            }
            if let Some(url) = picture_url {
                form.profile_picture_url = url;
            }
            let updated = account.update_profile(session, &form).await?;
            println!("Profile updated.");
            if updated.username_changed {
                println!(
                    "Username changed; run `folio login {}` to refresh your session.",
                    form.username.trim()
                );
            }
        }
        AccountCommands::Password {
            old_password,
            new_password,
        } => {
            account
                .change_password(session, &old_password, &new_password)
                .await?;
            println!("{PASSWORD_CHANGED_MESSAGE}");
        }
    }
    Ok(())
}

/// Reads a file holding either a rich-text payload or plain text.
fn read_document(path: &Path) -> Result<RichDocument, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(codec::decode(&text).into_document())
}

fn read_optional_document(path: Option<&Path>) -> Result<RichDocument, Box<dyn Error>> {
    match path {
        Some(path) => read_document(path),
        None => Ok(RichDocument::new()),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Profile { .. } => "profile",
        Commands::Like { .. } => "like",
        Commands::Login { .. } => "login",
        Commands::Register { .. } => "register",
        Commands::Logout => "logout",
        Commands::Whoami => "whoami",
        Commands::Post { .. } => "post",
        Commands::Portfolio { .. } => "portfolio",
        Commands::Account { .. } => "account",
        Commands::Contact { .. } => "contact",
        Commands::Upload { .. } => "upload",
        Commands::Render { .. } => "render",
    }
}
