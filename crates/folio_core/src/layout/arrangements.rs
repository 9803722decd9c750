//! The three profile arrangements.
//!
//! All of them render the same sections (about me, featured projects, all
//! projects, achievements) from a `ProfileView`; they differ only in markup
//! density.

use super::{Arrangement, LayoutKind, ProfileView};
use crate::codec::{self, html};
use crate::model::dates::{format_long, format_short};
use crate::model::portfolio::{Achievement, Project};

const ABOUT_ME_PLACEHOLDER: &str = "This user has not written an \"About Me\" section yet.";
const NO_FEATURED: &str = "No featured projects to display.";
const NO_OTHER: &str = "No other projects to display.";
const NO_ACHIEVEMENTS: &str = "No achievements to display.";

/// Cards with images, tag chips and long dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultArrangement;

/// Dense single-column list with inline technology text.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactArrangement;

/// Image tiles in a fixed grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridArrangement;

impl Arrangement for DefaultArrangement {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Default
    }

    fn render(&self, view: &ProfileView<'_>) -> String {
        let mut out = open_main(self.kind());
        out.push_str(&about_section(view));
        out.push_str(&project_section(
            "Featured Projects",
            "project-cards",
            &view.featured_projects,
            NO_FEATURED,
            |project| default_card(view, project),
        ));
        out.push_str(&project_section(
            "All Projects",
            "project-cards",
            &view.other_projects,
            NO_OTHER,
            |project| default_card(view, project),
        ));
        out.push_str(&achievement_section(view, |achievement| {
            achievement_item(achievement, achievement.date.as_ref().map(format_long))
        }));
        out.push_str("</main>\n");
        out
    }
}

impl Arrangement for CompactArrangement {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Compact
    }

    fn render(&self, view: &ProfileView<'_>) -> String {
        let mut out = open_main(self.kind());
        out.push_str(&about_section(view));
        out.push_str(&project_section(
            "Featured Projects",
            "project-list",
            &view.featured_projects,
            NO_FEATURED,
            |project| compact_item(view, project),
        ));
        out.push_str(&project_section(
            "All Projects",
            "project-list",
            &view.other_projects,
            NO_OTHER,
            |project| compact_item(view, project),
        ));
        out.push_str(&achievement_section(view, |achievement| {
            achievement_item(
                achievement,
                achievement
                    .date
                    .as_ref()
                    .map(|date| format!("Date: {}", format_short(date))),
            )
        }));
        out.push_str("</main>\n");
        out
    }
}

impl Arrangement for GridArrangement {
    fn kind(&self) -> LayoutKind {
        LayoutKind::Grid
    }

    fn render(&self, view: &ProfileView<'_>) -> String {
        let mut out = open_main(self.kind());
        out.push_str(&about_section(view));
        out.push_str(&project_section(
            "Featured Projects",
            "project-grid",
            &view.featured_projects,
            NO_FEATURED,
            |project| grid_tile(view, project),
        ));
        out.push_str(&project_section(
            "All Projects",
            "project-grid",
            &view.other_projects,
            NO_OTHER,
            |project| grid_tile(view, project),
        ));
        out.push_str(&achievement_section(view, |achievement| {
            achievement_item(achievement, achievement.date.as_ref().map(format_short))
        }));
        out.push_str("</main>\n");
        out
    }
}

fn open_main(kind: LayoutKind) -> String {
    format!("<main class=\"layout-{}\">\n", kind.as_str())
}

fn about_section(view: &ProfileView<'_>) -> String {
    format!(
        "<section class=\"about-me\">\n<h2>About Me</h2>\n<div class=\"prose\">\n{}\n</div>\n</section>\n",
        codec::render_or(view.portfolio.about_me(), ABOUT_ME_PLACEHOLDER)
    )
}

fn project_section<F>(
    heading: &str,
    container_class: &str,
    projects: &[&Project],
    empty_message: &str,
    render_item: F,
) -> String
where
    F: Fn(&Project) -> String,
{
    let mut out = format!("<section>\n<h2>{}</h2>\n", html::escape_text(heading));
    if projects.is_empty() {
        out.push_str(&format!("<p>{}</p>\n", html::escape_text(empty_message)));
    } else {
        out.push_str(&format!("<div class=\"{container_class}\">\n"));
        for project in projects {
            out.push_str(&render_item(*project));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
    out
}

fn achievement_section<F>(view: &ProfileView<'_>, render_item: F) -> String
where
    F: Fn(&Achievement) -> String,
{
    let achievements = &view.portfolio.achievements;
    let mut out = String::from("<section>\n<h2>Achievements</h2>\n");
    if achievements.is_empty() {
        out.push_str(&format!("<p>{NO_ACHIEVEMENTS}</p>\n"));
    } else {
        out.push_str("<div class=\"achievements\">\n");
        for achievement in achievements {
            out.push_str(&render_item(achievement));
        }
        out.push_str("</div>\n");
    }
    out.push_str("</section>\n");
    out
}

fn achievement_item(achievement: &Achievement, date_label: Option<String>) -> String {
    let mut out = format!(
        "<article class=\"achievement\" data-achievement-id=\"{}\">\n<h3>{}</h3>\n",
        achievement.id,
        html::escape_text(&achievement.title)
    );
    if let Some(label) = date_label {
        out.push_str(&format!(
            "<p class=\"date\">{}</p>\n",
            html::escape_text(&label)
        ));
    }
    out.push_str(&format!(
        "<div class=\"description\">{}</div>\n</article>\n",
        codec::render(Some(achievement.description.as_str()))
    ));
    out
}

fn default_card(view: &ProfileView<'_>, project: &Project) -> String {
    let mut out = format!("<article class=\"project-card\" data-project-id=\"{}\">\n", project.id);
    out.push_str(&image(project));
    out.push_str(&format!("<h3>{}</h3>\n", html::escape_text(&project.title)));
    out.push_str(&description(project));
    let tags = project.technology_tags();
    if !tags.is_empty() {
        out.push_str("<div class=\"technologies\">\n<h4>Technologies Used:</h4>\n");
        for tag in tags {
            out.push_str(&format!("<span class=\"tag\">{}</span>\n", html::escape_text(tag)));
        }
        out.push_str("</div>\n");
    }
    out.push_str(&project_link(project, "button"));
    out.push_str(&like_control(view, project));
    out.push_str("</article>\n");
    out
}

fn compact_item(view: &ProfileView<'_>, project: &Project) -> String {
    let mut out = format!("<article class=\"project-item\" data-project-id=\"{}\">\n", project.id);
    out.push_str(&format!("<h3>{}</h3>\n", html::escape_text(&project.title)));
    out.push_str(&description(project));
    if !project.technologies.trim().is_empty() {
        out.push_str(&format!(
            "<p class=\"tech\">Tech: {}</p>\n",
            html::escape_text(project.technologies.trim())
        ));
    }
    out.push_str(&project_link(project, "inline"));
    out.push_str(&like_control(view, project));
    out.push_str("</article>\n");
    out
}

fn grid_tile(view: &ProfileView<'_>, project: &Project) -> String {
    let mut out = format!("<article class=\"project-tile\" data-project-id=\"{}\">\n", project.id);
    out.push_str(&image(project));
    out.push_str(&format!("<h3>{}</h3>\n", html::escape_text(&project.title)));
    out.push_str(&project_link(project, "tile"));
    out.push_str(&like_control(view, project));
    out.push_str("</article>\n");
    out
}

fn image(project: &Project) -> String {
    match project.image_url().and_then(html::safe_href) {
        Some(src) => format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            html::escape_attr(src),
            html::escape_attr(&project.title)
        ),
        None => String::new(),
    }
}

fn description(project: &Project) -> String {
    if project.description.trim().is_empty() {
        return String::new();
    }
    format!(
        "<div class=\"description\">{}</div>\n",
        codec::render(Some(project.description.as_str()))
    )
}

fn project_link(project: &Project, class: &str) -> String {
    match project.link().and_then(html::safe_href) {
        Some(href) => format!(
            "<a class=\"{class}\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View Project</a>\n",
            html::escape_attr(href)
        ),
        None => String::new(),
    }
}

fn like_control(view: &ProfileView<'_>, project: &Project) -> String {
    let intent = (view.on_like_toggle)(project);
    format!(
        "<div class=\"likes\"><button type=\"button\" class=\"like{}\" data-project-id=\"{}\" data-method=\"{}\" data-endpoint=\"{}\" aria-pressed=\"{}\">&#9829;</button><span class=\"likes-count\">{}</span></div>\n",
        if project.liked_by_user { " liked" } else { "" },
        intent.project_id,
        intent.method().as_str(),
        html::escape_attr(&intent.endpoint()),
        project.liked_by_user,
        project.likes_count
    )
}
