//! Renderers for [`PublicationsView`].

use owo_colors::OwoColorize;
use std::fmt::Write;

use super::{PublicationItem, PublicationsView};

/// Escape text for use in HTML content and double-quoted attributes
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a view as `<li>` fragments for a `<ul>`/`<ol>` container.
///
/// Year headings are `<li class="pub-year">`, publications are
/// `<li class="pub-item">` with the title in an `<h4>` (linked when the
/// record has a link) and the summary in a `<p>`.
pub fn render_html(view: &PublicationsView) -> String {
    let mut out = String::new();

    match view {
        PublicationsView::Latest { items } => {
            for item in items {
                push_html_item(&mut out, item);
            }
        }
        PublicationsView::Grouped { groups } => {
            for group in groups {
                let _ = writeln!(out, "<li class=\"pub-year\">{}</li>", html_escape(&group.label));
                for item in &group.items {
                    push_html_item(&mut out, item);
                }
            }
        }
        PublicationsView::Unavailable { message } => {
            let _ = writeln!(out, "<li>{}</li>", html_escape(message));
        }
    }

    out
}

fn push_html_item(out: &mut String, item: &PublicationItem) {
    let title = html_escape(&item.title);
    let heading = match &item.link {
        Some(link) => format!(
            "<a href=\"{}\" target=\"_blank\">{}</a>",
            html_escape(link),
            title
        ),
        None => title,
    };

    let _ = writeln!(
        out,
        "<li class=\"pub-item\"><h4>{}</h4><p>{}</p></li>",
        heading,
        html_escape(&item.meta)
    );
}

/// Render a view as terminal text, optionally colored
pub fn render_plain(view: &PublicationsView, color: bool) -> String {
    let mut out = String::new();

    match view {
        PublicationsView::Latest { items } => {
            for item in items {
                push_plain_item(&mut out, item, color);
            }
        }
        PublicationsView::Grouped { groups } => {
            for (i, group) in groups.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                if color {
                    let _ = writeln!(out, "{}", group.label.yellow().bold());
                } else {
                    let _ = writeln!(out, "{}", group.label);
                }
                for item in &group.items {
                    push_plain_item(&mut out, item, color);
                }
            }
        }
        PublicationsView::Unavailable { message } => {
            if color {
                let _ = writeln!(out, "{}", message.red());
            } else {
                let _ = writeln!(out, "{}", message);
            }
        }
    }

    out
}

fn push_plain_item(out: &mut String, item: &PublicationItem, color: bool) {
    if color {
        let _ = writeln!(out, "{}", item.title.bold());
    } else {
        let _ = writeln!(out, "{}", item.title);
    }

    if !item.meta.is_empty() {
        let _ = writeln!(out, "  {}", item.meta);
    }

    if let Some(link) = &item.link {
        if color {
            let _ = writeln!(out, "  {}", link.cyan());
        } else {
            let _ = writeln!(out, "  {}", link);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::YearGroup;

    fn item(title: &str, link: Option<&str>, meta: &str) -> PublicationItem {
        PublicationItem {
            title: title.to_string(),
            link: link.map(str::to_string),
            meta: meta.to_string(),
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_html_latest() {
        let view = PublicationsView::Latest {
            items: vec![
                item("Linked & Loaded", Some("https://doi.org/10.1/x?a=1&b=2"), "A, B · 2024"),
                item("Plain", None, "C"),
            ],
        };

        let html = render_html(&view);
        let lines: Vec<_> = html.lines().collect();
        assert_eq!(
            lines[0],
            "<li class=\"pub-item\"><h4><a href=\"https://doi.org/10.1/x?a=1&amp;b=2\" target=\"_blank\">Linked &amp; Loaded</a></h4><p>A, B · 2024</p></li>"
        );
        assert_eq!(lines[1], "<li class=\"pub-item\"><h4>Plain</h4><p>C</p></li>");
    }

    #[test]
    fn test_render_html_grouped() {
        let view = PublicationsView::Grouped {
            groups: vec![
                YearGroup {
                    label: "2023".to_string(),
                    items: vec![item("One", None, "")],
                },
                YearGroup {
                    label: "Other".to_string(),
                    items: vec![item("Two", None, "")],
                },
            ],
        };

        let html = render_html(&view);
        let lines: Vec<_> = html.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "<li class=\"pub-year\">2023</li>");
        assert_eq!(lines[2], "<li class=\"pub-year\">Other</li>");
    }

    #[test]
    fn test_render_html_unavailable() {
        let html = render_html(&PublicationsView::unavailable());
        assert_eq!(html.trim_end(), "<li>Unable to load publications.</li>");
    }

    #[test]
    fn test_render_plain() {
        let view = PublicationsView::Latest {
            items: vec![item("Title", Some("https://example.com"), "Someone · 2020")],
        };

        assert_eq!(
            render_plain(&view, false),
            "Title\n  Someone · 2020\n  https://example.com\n"
        );
    }

    #[test]
    fn test_render_plain_unavailable() {
        assert_eq!(
            render_plain(&PublicationsView::unavailable(), false),
            "Unable to load publications.\n"
        );
    }
}
