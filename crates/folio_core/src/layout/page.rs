//! Full public profile page: header, selected arrangement, contact form and
//! footer, plus the loading/error/missing states.

use super::{arrangement_for, LayoutKind, ProfileQuery, ProfileView};
use crate::codec::html;
use crate::model::portfolio::Portfolio;

/// Renders the complete profile page for a loaded portfolio.
pub fn render_profile(portfolio: &Portfolio, query: &ProfileQuery) -> String {
    let view = ProfileView::new(portfolio, query);
    let arrangement = arrangement_for(LayoutKind::for_portfolio(portfolio));

    let mut out = String::from("<div class=\"profile\">\n");
    out.push_str(&header(portfolio));
    out.push_str(&arrangement.render(&view));
    out.push_str(CONTACT_FORM);
    out.push_str(&format!(
        "<footer>\n<p>{}</p>\n</footer>\n</div>\n",
        html::escape_text(&portfolio.contact_info)
    ));
    out
}

pub fn render_loading() -> String {
    status_block("loading", "Loading...")
}

pub fn render_error(message: &str) -> String {
    status_block("error", &format!("Error: {message}"))
}

pub fn render_missing() -> String {
    status_block("missing", "This user has not created a portfolio yet.")
}

fn status_block(class: &str, message: &str) -> String {
    format!(
        "<div class=\"status {class}\">{}</div>\n",
        html::escape_text(message)
    )
}

fn header(portfolio: &Portfolio) -> String {
    let mut out = String::from("<header>\n");
    if let Some(owner) = &portfolio.owner {
        if let Some(src) = owner.profile_picture_url().and_then(html::safe_href) {
            out.push_str(&format!(
                "<img class=\"avatar\" src=\"{}\" alt=\"{}\">\n",
                html::escape_attr(src),
                html::escape_attr(&owner.username)
            ));
        }
    }
    out.push_str(&format!("<h1>{}</h1>\n", html::escape_text(&portfolio.title)));
    out.push_str(&format!(
        "<p class=\"description\">{}</p>\n",
        html::escape_text(&portfolio.description)
    ));
    if let Some(owner) = &portfolio.owner {
        if let Some(bio) = owner.bio() {
            out.push_str(&format!("<p class=\"bio\">{}</p>\n", html::escape_text(bio)));
        }
        let links: Vec<&str> = owner
            .social_links()
            .into_iter()
            .filter_map(html::safe_href)
            .collect();
        if !links.is_empty() {
            out.push_str("<nav class=\"social\">\n");
            for link in links {
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>\n",
                    html::escape_attr(link),
                    html::escape_text(link)
                ));
            }
            out.push_str("</nav>\n");
        }
    }
    out.push_str("</header>\n");
    out
}

const CONTACT_FORM: &str = "<form class=\"contact\" method=\"post\" action=\"/api/contact\">\n\
<input name=\"name\" placeholder=\"Name\" required>\n\
<input name=\"email\" type=\"email\" placeholder=\"Email\" required>\n\
<input name=\"subject\" placeholder=\"Subject\" required>\n\
<textarea name=\"message\" placeholder=\"Message\" required></textarea>\n\
<button type=\"submit\">Send</button>\n\
</form>\n";
