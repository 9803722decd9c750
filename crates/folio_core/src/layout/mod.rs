//! Public profile layout selection.
//!
//! # Responsibility
//! - Resolve the stored layout preference into one of three arrangements.
//! - Partition, filter and sort projects into the shared view contract.
//!
//! # Invariants
//! - Unknown or missing layout values resolve to `LayoutKind::Default`.
//! - Every project lands in exactly one of featured/other, decided only by
//!   its `featured` flag.
//! - Filtering and sorting return new reference lists; the portfolio is
//!   never mutated.

mod arrangements;
pub mod page;

pub use arrangements::{CompactArrangement, DefaultArrangement, GridArrangement};

use crate::model::portfolio::{Portfolio, Project};
use crate::service::like_service::LikeIntent;
use std::cmp::Ordering;

/// Presentational arrangement of a public profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    #[default]
    Default,
    Compact,
    Grid,
}

impl LayoutKind {
    /// Resolves a stored preference. Matching is trimmed and ASCII
    /// case-insensitive; anything unrecognized yields `Default`.
    pub fn select(value: Option<&str>) -> Self {
        match value.map(|raw| raw.trim().to_ascii_lowercase()).as_deref() {
            Some("compact") => Self::Compact,
            Some("grid") => Self::Grid,
            _ => Self::Default,
        }
    }

    /// Resolves the preference stored on a portfolio.
    pub fn for_portfolio(portfolio: &Portfolio) -> Self {
        Self::select(Some(portfolio.layout.as_str()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Compact => "compact",
            Self::Grid => "grid",
        }
    }
}

/// Resolves a stored layout preference.
pub fn select_layout(value: Option<&str>) -> LayoutKind {
    LayoutKind::select(value)
}

/// Project ordering. "Date" is insertion order, i.e. ascending id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    /// Parses `date-desc|date-asc|title-asc|title-desc`; unknown values
    /// yield `DateDesc`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "date-asc" => Self::DateAsc,
            "title-asc" => Self::TitleAsc,
            "title-desc" => Self::TitleDesc,
            _ => Self::DateDesc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
        }
    }

    fn compare(self, left: &Project, right: &Project) -> Ordering {
        match self {
            Self::DateAsc => left.id.cmp(&right.id),
            Self::DateDesc => right.id.cmp(&left.id),
            Self::TitleAsc => compare_titles(&left.title, &right.title),
            Self::TitleDesc => compare_titles(&right.title, &left.title),
        }
    }
}

fn compare_titles(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Filter and sort criteria for one project group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProjectQuery {
    /// Case-insensitive substring of the technologies field.
    pub technology: Option<String>,
    /// `None` keeps the order received from the API.
    pub sort: Option<SortOrder>,
}

impl ProjectQuery {
    /// Applies the filter and sort to `projects` without mutating it.
    pub fn apply<'a, I>(&self, projects: I) -> Vec<&'a Project>
    where
        I: IntoIterator<Item = &'a Project>,
    {
        let needle = self
            .technology
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty());
        let mut selected: Vec<&Project> = projects
            .into_iter()
            .filter(|project| needle.map_or(true, |needle| project.mentions_technology(needle)))
            .collect();
        if let Some(order) = self.sort {
            selected.sort_by(|left, right| order.compare(left, right));
        }
        selected
    }
}

/// Criteria for both project groups of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileQuery {
    pub featured: ProjectQuery,
    pub other: ProjectQuery,
}

impl Default for ProfileQuery {
    fn default() -> Self {
        Self {
            featured: ProjectQuery::default(),
            other: ProjectQuery {
                technology: None,
                sort: Some(SortOrder::DateDesc),
            },
        }
    }
}

/// Splits projects into (featured, other), preserving source order.
pub fn partition(projects: &[Project]) -> (Vec<&Project>, Vec<&Project>) {
    projects.iter().partition(|project| project.featured)
}

/// Data contract shared by every arrangement.
#[derive(Clone)]
pub struct ProfileView<'a> {
    pub portfolio: &'a Portfolio,
    pub featured_projects: Vec<&'a Project>,
    pub other_projects: Vec<&'a Project>,
    /// Builds the like action bound to each rendered like control.
    pub on_like_toggle: fn(&Project) -> LikeIntent,
}

impl<'a> ProfileView<'a> {
    /// Builds a fresh view from the current portfolio state.
    pub fn new(portfolio: &'a Portfolio, query: &ProfileQuery) -> Self {
        let (featured, other) = partition(&portfolio.projects);
        Self {
            portfolio,
            featured_projects: query.featured.apply(featured),
            other_projects: query.other.apply(other),
            on_like_toggle: LikeIntent::for_project,
        }
    }
}

impl std::fmt::Debug for ProfileView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileView")
            .field("portfolio_id", &self.portfolio.id)
            .field("featured_projects", &self.featured_projects.len())
            .field("other_projects", &self.other_projects.len())
            .finish_non_exhaustive()
    }
}

/// One presentational template for a public profile.
pub trait Arrangement {
    fn kind(&self) -> LayoutKind;
    fn render(&self, view: &ProfileView<'_>) -> String;
}

static DEFAULT_ARRANGEMENT: DefaultArrangement = DefaultArrangement;
static COMPACT_ARRANGEMENT: CompactArrangement = CompactArrangement;
static GRID_ARRANGEMENT: GridArrangement = GridArrangement;

/// Returns the arrangement implementing `kind`.
pub fn arrangement_for(kind: LayoutKind) -> &'static dyn Arrangement {
    match kind {
        LayoutKind::Default => &DEFAULT_ARRANGEMENT,
        LayoutKind::Compact => &COMPACT_ARRANGEMENT,
        LayoutKind::Grid => &GRID_ARRANGEMENT,
    }
}
