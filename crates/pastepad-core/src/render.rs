//! Plain and Markdown preview rendering.
//!
//! Both modes end in the HTML sanitizer. `SafeHtml` can only be built here,
//! so anything that accepts it has been through sanitizing.

use std::fmt;

use pulldown_cmark::{Options, Parser};

use crate::document::RenderMode;

/// Sanitized markup ready for insertion into the display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeHtml(String);

impl SafeHtml {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeHtml {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Render raw document text for the given preview mode.
pub fn render(mode: RenderMode, raw: &str) -> SafeHtml {
    match mode {
        RenderMode::Plain => sanitize(raw),
        RenderMode::Markdown => sanitize(&markdown_to_html(raw)),
    }
}

fn markdown_to_html(raw: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(raw, options);
    let mut html = String::with_capacity(raw.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

fn sanitize(html: &str) -> SafeHtml {
    SafeHtml(ammonia::clean(html))
}
