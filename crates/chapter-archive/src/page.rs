/// HTML rendering of the chapter list.
///
/// Every chapter is always rendered; the visibility assigned by the search filter
/// only decides the element's `display` style, so the page mirrors the full
/// catalog in order.
use std::fmt::Write;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use chapter_common::filter::ChapterSlot;
use chapter_common::model::{SearchField, SearchQuery};

const PAGE_TITLE: &str = "En Guàrdia";

/// Bytes escaped in a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub fn render(slots: &[ChapterSlot<'_>], query: Option<&SearchQuery>) -> String {
    let mut html = String::with_capacity(1024 + slots.len() * 512);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"ca\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         <script src=\"/static/main.js\" defer></script>\n</head>\n<body>\n<h1>{title}</h1>\n",
        title = PAGE_TITLE
    );
    render_form(&mut html, query);

    html.push_str("<div id=\"chapters\">\n");
    for slot in slots {
        render_chapter(&mut html, slot);
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, query: Option<&SearchQuery>) {
    let term = query.map(|q| q.term.as_str()).unwrap_or("");
    let field = query.map(|q| &q.field);

    let _ = write!(
        html,
        "<form id=\"search-form\" method=\"get\" action=\"/\">\n\
         <input type=\"text\" id=\"search-term\" name=\"term\" value=\"{}\">\n\
         <select id=\"search-by\" name=\"by\">\n",
        escape(term)
    );
    for option in [SearchField::Title, SearchField::Description] {
        let selected = if field == Some(&option) { " selected" } else { "" };
        let label = match option {
            SearchField::Title => "Títol",
            _ => "Descripció",
        };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{label}</option>",
            option.as_str()
        );
    }
    html.push_str("</select>\n<button type=\"submit\">Cerca</button>\n</form>\n");
}

fn render_chapter(html: &mut String, slot: &ChapterSlot<'_>) {
    let chapter = slot.chapter;
    let _ = writeln!(
        html,
        "<div class=\"chapter\" style=\"display: {}\">",
        slot.visibility.display()
    );
    if !chapter.image.is_empty() {
        let _ = writeln!(
            html,
            "<img class=\"chapter-image\" src=\"{}\" alt=\"\">",
            escape(&chapter.image)
        );
    }
    let _ = writeln!(
        html,
        "<h2 class=\"chapter-title\">{}</h2>\n<p class=\"chapter-description\">{}</p>",
        escape(&chapter.title),
        escape(&chapter.description)
    );
    if !chapter.file.is_empty() {
        let _ = writeln!(
            html,
            "<audio controls preload=\"none\" src=\"/files/{}\"></audio>",
            escape(&utf8_percent_encode(&chapter.file, PATH_SEGMENT).to_string())
        );
    }
    html.push_str("</div>\n");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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
