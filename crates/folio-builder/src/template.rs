//! HTML page template.

use std::fmt::Write;

/// Data for one entry of the navigation sidebar.
pub(crate) struct NavItemData {
    pub title: String,
    pub href: String,
    pub is_active: bool,
}

/// All data needed to render a page.
pub(crate) struct PageData<'a> {
    pub title: &'a str,
    pub project: &'a str,
    pub language: Option<&'a str>,
    pub html_content: &'a str,
    pub navigation: Vec<NavItemData>,
    /// Link to the site root from this page.
    pub root_href: String,
    /// Link to `searchindex.json` from this page.
    pub search_index_href: String,
    /// Suffix the search script appends to result links; empty for
    /// directory-style sites.
    pub file_suffix: &'a str,
}

/// Render a complete HTML page.
pub(crate) fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(4096 + page.html_content.len());

    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>",
        escape(page.language.unwrap_or("en"))
    );
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(
        html,
        "<title>{} - {}</title>",
        escape(page.title),
        escape(page.project)
    );
    html.push_str("</head>\n");
    let _ = writeln!(
        html,
        "<body data-url-root=\"{}\" data-search-index=\"{}\" data-file-suffix=\"{}\">",
        escape(&page.root_href),
        escape(&page.search_index_href),
        escape(page.file_suffix),
    );

    render_sidebar(&mut html, page);

    html.push_str("<main>\n<article>\n");
    html.push_str(page.html_content);
    html.push_str("\n</article>\n</main>\n");
    html.push_str("</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, page: &PageData<'_>) {
    html.push_str("<aside>\n");
    let _ = writeln!(
        html,
        "<a href=\"{}\" class=\"project\">{}</a>",
        escape(&page.root_href),
        escape(page.project)
    );
    if !page.navigation.is_empty() {
        html.push_str("<nav>\n<ul>\n");
        for item in &page.navigation {
            let class = if item.is_active { " class=\"current\"" } else { "" };
            let _ = writeln!(
                html,
                "<li{class}><a href=\"{}\">{}</a></li>",
                escape(&item.href),
                escape(&item.title),
            );
        }
        html.push_str("</ul>\n</nav>\n");
    }
    html.push_str("</aside>\n");
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
