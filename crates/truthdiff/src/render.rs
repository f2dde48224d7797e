//! Output formats for annotated comparisons

use anyhow::Result;
use clap::ValueEnum;
use derive_more::Display;
use line_diff::{ndiff, AnnotatedLine, CompareConfig, Comparison, Markers, TagPair};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Write;

/// How a comparison is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display)]
pub enum OutputFormat {
    /// Plain text with `<removed>` / `<added>` tags
    #[display(fmt = "text")]
    Text,

    /// Terminal colors
    #[display(fmt = "ansi")]
    Ansi,

    /// Streamlit-flavoured markdown (`:red[...]`, `:green[...]`)
    #[display(fmt = "markdown")]
    Markdown,

    /// Standalone HTML table
    #[display(fmt = "html")]
    Html,

    /// Serialized comparison
    #[display(fmt = "json")]
    Json,

    /// Raw token stream
    #[display(fmt = "ndiff")]
    Ndiff,
}

// Private-use characters stand in for HTML tags until the text is escaped
const REMOVED_OPEN: char = '\u{E000}';
const REMOVED_CLOSE: char = '\u{E001}';
const ADDED_OPEN: char = '\u{E002}';
const ADDED_CLOSE: char = '\u{E003}';

fn is_sentinel(c: char) -> bool {
    matches!(c, REMOVED_OPEN | REMOVED_CLOSE | ADDED_OPEN | ADDED_CLOSE)
}

impl OutputFormat {
    /// Tags the comparison should be built with for this format
    pub fn markers(self) -> Markers {
        match self {
            OutputFormat::Text | OutputFormat::Json | OutputFormat::Ndiff => Markers::xml(),
            OutputFormat::Ansi => Markers::ansi(),
            OutputFormat::Markdown => Markers::streamlit(),
            OutputFormat::Html => Markers::new(
                TagPair::new(REMOVED_OPEN, REMOVED_CLOSE),
                TagPair::new(ADDED_OPEN, ADDED_CLOSE),
            ),
        }
    }

    /// Input line as it goes into the comparison.
    ///
    /// HTML tag stand-ins already present in the input become U+FFFD so that
    /// only inserted tags turn into `<span>` elements.
    fn prepare(self, line: &str) -> Cow<'_, str> {
        if self == OutputFormat::Html && line.contains(is_sentinel) {
            Cow::Owned(line.replace(is_sentinel, "\u{FFFD}"))
        } else {
            Cow::Borrowed(line)
        }
    }
}

/// Headings and metadata printed around the two columns
#[derive(Debug, Clone, Default, Serialize)]
pub struct Header {
    pub title: String,
    pub left_heading: String,
    pub right_heading: String,
    pub left_note: Option<String>,
    pub right_note: Option<String>,
    pub image: Option<String>,
}

#[derive(Serialize)]
struct JsonView<'a> {
    header: &'a Header,
    comparison: &'a Comparison,
}

/// Compare two line sequences and render the result.
///
/// The ndiff format prints the token stream and never builds the columns.
pub fn render<L, R>(
    config: &CompareConfig,
    format: OutputFormat,
    header: &Header,
    left: &[L],
    right: &[R],
) -> Result<String>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let compare = || -> Result<Comparison> {
        let left: Vec<Cow<str>> = left.iter().map(|line| format.prepare(line.as_ref())).collect();
        let right: Vec<Cow<str>> = right.iter().map(|line| format.prepare(line.as_ref())).collect();
        Ok(config.compare(&left, &right)?)
    };

    match format {
        OutputFormat::Ndiff => render_ndiff(config, header, left, right),
        OutputFormat::Text | OutputFormat::Ansi => render_text(header, &compare()?),
        OutputFormat::Markdown => render_markdown(header, &compare()?),
        OutputFormat::Html => render_html(header, &compare()?),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonView {
            header,
            comparison: &compare()?,
        })?),
    }
}

fn render_ndiff<L, R>(config: &CompareConfig, header: &Header, left: &[L], right: &[R]) -> Result<String>
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let left: Vec<&str> = left.iter().map(|line| line.as_ref()).collect();
    let right: Vec<&str> = right.iter().map(|line| line.as_ref()).collect();

    let mut out = String::new();
    writeln!(out, "=== {} ===", header.title)?;
    out.push_str(&ndiff(&config.tokens(&left, &right)));
    Ok(out)
}

fn render_text(header: &Header, comparison: &Comparison) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "=== {} ===", header.title)?;

    for (heading, note, column) in [
        (&header.left_heading, &header.left_note, &comparison.left),
        (&header.right_heading, &header.right_note, &comparison.right),
    ] {
        writeln!(out)?;
        match note {
            Some(note) => writeln!(out, "{} ({})", heading, note)?,
            None => writeln!(out, "{}", heading)?,
        }
        writeln!(out, "{}", "-".repeat(heading.chars().count()))?;
        for (n, line) in column.iter().enumerate() {
            writeln!(out, "{:>4} → {}", n + 1, line.text)?;
        }
    }

    if let Some(image) = &header.image {
        writeln!(out, "\nImage: {}", image)?;
    }

    Ok(out)
}

fn render_markdown(header: &Header, comparison: &Comparison) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "## {}\n", header.title)?;

    for (heading, note, column) in [
        (&header.left_heading, &header.left_note, &comparison.left),
        (&header.right_heading, &header.right_note, &comparison.right),
    ] {
        writeln!(out, "### {}\n", heading)?;
        if let Some(note) = note {
            writeln!(out, "**{}**\n", note)?;
        }
        writeln!(out, "<hr />\n")?;
        for (n, line) in column.iter().enumerate() {
            writeln!(out, ":blue[{} &rarr;] {}  ", n + 1, line.text)?;
        }
        writeln!(out)?;
    }

    if let Some(image) = &header.image {
        writeln!(out, "<hr />\n\n![{}]({})", header.title, image)?;
    }

    Ok(out)
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        c if is_sentinel(c) => out.push('\u{FFFD}'),
        c => out.push(c),
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut out, c);
    }
    out
}

/// Escape a compared line, turning tag stand-ins into spans
fn highlight_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            REMOVED_OPEN => out.push_str("<span class=\"removed\">"),
            ADDED_OPEN => out.push_str("<span class=\"added\">"),
            REMOVED_CLOSE | ADDED_CLOSE => out.push_str("</span>"),
            c => push_escaped(&mut out, c),
        }
    }
    out
}

fn html_cell(line: Option<&AnnotatedLine>) -> String {
    match line {
        Some(line) if !line.is_placeholder() => {
            let class = line.status.to_string().to_lowercase();
            format!("<td class=\"{}\">{}</td>", class, highlight_html(&line.text))
        }
        _ => "<td class=\"placeholder\"></td>".to_string(),
    }
}

fn render_html(header: &Header, comparison: &Comparison) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "<h2>{}</h2>", escape_html(&header.title))?;
    writeln!(out, "<table class=\"comparison\">")?;
    writeln!(
        out,
        "<tr><th></th><th>{}</th><th>{}</th></tr>",
        escape_html(&header.left_heading),
        escape_html(&header.right_heading)
    )?;

    if header.left_note.is_some() || header.right_note.is_some() {
        writeln!(
            out,
            "<tr><td></td><td><b>{}</b></td><td><b>{}</b></td></tr>",
            escape_html(header.left_note.as_deref().unwrap_or_default()),
            escape_html(header.right_note.as_deref().unwrap_or_default())
        )?;
    }

    let rows = comparison.left.len().max(comparison.right.len());
    for row in 0..rows {
        writeln!(
            out,
            "<tr><td class=\"row\">{}</td>{}{}</tr>",
            row + 1,
            html_cell(comparison.left.get(row)),
            html_cell(comparison.right.get(row))
        )?;
    }
    writeln!(out, "</table>")?;

    if let Some(image) = &header.image {
        writeln!(out, "<img src=\"{}\" alt=\"\" />", escape_html(image))?;
    }

    Ok(out)
}
