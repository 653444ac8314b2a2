//! Markdown to HTML conversion for a single document.

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::builder::Builder;
use crate::scanner::resolve_link;

/// Output of the read phase for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderedDocument {
    pub docname: String,
    /// Text of the first level-one heading, or the document name.
    pub title: String,
    /// Body HTML with markdown links rewritten for the active builder.
    pub body: String,
}

/// Render `source`, rewriting links to other `.md` documents into links the
/// active builder will serve.
pub(crate) fn render_document(docname: &str, source: &str, builder: &dyn Builder) -> RenderedDocument {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_HEADING_ATTRIBUTES;

    let mut title: Option<String> = None;
    let mut in_title = false;
    let mut events = Vec::new();

    for event in Parser::new_ext(source, options) {
        match &event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) if title.is_none() => {
                in_title = true;
                title = Some(String::new());
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => in_title = false,
            Event::Text(text) | Event::Code(text) if in_title => {
                if let Some(t) = title.as_mut() {
                    t.push_str(text);
                }
            }
            _ => {}
        }
        events.push(rewrite_link(event, docname, builder));
    }

    let mut body = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut body, events.into_iter());

    RenderedDocument {
        docname: docname.to_owned(),
        title: title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| docname.to_owned()),
        body,
    }
}

fn rewrite_link<'a>(event: Event<'a>, docname: &str, builder: &dyn Builder) -> Event<'a> {
    let (link_type, dest_url, title, id) = match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => (link_type, dest_url, title, id),
        other => return other,
    };

    let rewritten = local_target(&dest_url).and_then(|(path, fragment)| {
        let target = resolve_link(docname, path)?;
        let mut uri = builder.relative_uri(docname, &target);
        if let Some(frag) = fragment {
            uri.push('#');
            uri.push_str(frag);
        }
        Some(uri)
    });

    Event::Start(Tag::Link {
        link_type,
        dest_url: rewritten.map_or(dest_url, CowStr::from),
        title,
        id,
    })
}

/// Split a relative link into path and fragment; `None` for external links.
fn local_target(href: &str) -> Option<(&str, Option<&str>)> {
    if href.contains("://") || href.starts_with('/') || href.starts_with("mailto:") {
        return None;
    }
    Some(match href.split_once('#') {
        Some((path, frag)) => (path, Some(frag)),
        None => (href, None),
    })
}
