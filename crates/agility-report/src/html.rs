//! HTML fragments per line kind and the full document.

use std::borrow::Cow;
use std::fmt::Write as _;

use agility_points::{
    OTHER_POINTS_LABEL, OtherPointsBucket, PointsLine, PointsReport, SectionMarker,
};
use quick_xml::escape::escape;

/// Opening tag shared by every table in the document.
pub const TABLE_HEADER: &str = r#"<table border="2" cellspacing="0" cellpadding="2">"#;

/// Options for HTML output.
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Page heading, followed by the report date when one is set.
    pub heading: String,
    /// Prefix of the per-line links; the line index is appended.
    pub link_prefix: String,
}

impl HtmlOptions {
    pub fn new(heading: impl Into<String>, link_prefix: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            link_prefix: link_prefix.into(),
        }
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self::new("Titling Points", "points:")
    }
}

/// Cell text: escaped, with a non-breaking space standing in for empty
/// text so the cell keeps its borders.
fn cell(text: &str) -> Cow<'_, str> {
    if text.is_empty() {
        Cow::Borrowed("&nbsp;")
    } else {
        escape(text)
    }
}

fn link(options: &HtmlOptions, index: usize, text: &str) -> String {
    format!(
        "<a href=\"{}{index}\">{}</a>",
        escape(options.link_prefix.as_str()),
        escape(text)
    )
}

fn row(cells: &[String]) -> String {
    let mut html = String::from("<tr>\n");
    for cell in cells {
        html.push_str(cell);
        html.push('\n');
    }
    html.push_str("</tr>\n");
    html
}

fn td(text: &str) -> String {
    format!("<td>{}</td>", cell(text))
}

fn td_right(content: &str) -> String {
    format!("<td align=\"right\">{content}</td>")
}

/// HTML fragment for one line. `index` is the line's position in the
/// report and becomes the target of the line's link. Markers render as
/// nothing; [`render_document`] handles them.
pub fn line_html(line: &PointsLine<'_>, index: usize, options: &HtmlOptions) -> String {
    let text = |column: usize| line.text(column);
    match line {
        PointsLine::Marker(_) => String::new(),
        PointsLine::Text(text_line) => {
            if text_line.in_html {
                row(&[td(&text_line.second)])
            } else {
                String::new()
            }
        }
        PointsLine::Dog(dog_line) => {
            let mut html = format!("<h1 align=\"center\">{}", escape(options.heading.as_str()));
            if let Some(as_of) = dog_line.as_of {
                let _ = write!(html, " {as_of}");
            }
            html.push_str("</h1>");
            html.push_str("<h1>");
            html.push_str(&link(options, index, &dog_line.dog.call_name));
            if !dog_line.dog.registered_name.is_empty() {
                let _ = write!(html, " [{}]", escape(dog_line.dog.registered_name.as_str()));
            }
            html.push_str("</h1>\n");
            html
        }
        PointsLine::Venue(venue_line) => {
            let venue = venue_line.venue;
            let mut html = String::from("<h2>");
            match venue.url.as_deref().filter(|url| !url.is_empty()) {
                Some(url) => {
                    let _ = write!(
                        html,
                        "<a href=\"{}\">{}</a>",
                        escape(url),
                        escape(venue.name.as_str())
                    );
                }
                None => html.push_str(&escape(venue.name.as_str())),
            }
            if let Some(reg_num) = venue_line.reg_num {
                let _ = write!(html, " [{}]", link(options, index, &reg_num.number));
            }
            html.push_str("</h2>\n");
            html
        }
        PointsLine::Title(_) => row(&[
            td(&text(1)),
            format!("<td>{}</td>", link(options, index, &text(2))),
        ]),
        PointsLine::Event(_) => row(&[
            td(&text(1)),
            td(&text(2)),
            td(&text(3)),
            format!("<td>{}</td>", link(options, index, &text(4))),
            td(&text(5)),
            td_right(&cell(&text(6))),
            td(&text(7)),
            td(&text(8)),
        ]),
        PointsLine::Lifetime(_) => {
            let mut html = String::from("<tr><td>&nbsp;</td></tr>\n");
            html.push_str(&row(&[
                td(&text(1)),
                td_right(&link(options, index, &text(2))),
            ]));
            html
        }
        PointsLine::LifetimeByName(_) => row(&[td(""), td_right(&cell(&text(2)))]),
        PointsLine::SpeedPoints(_) => row(&[
            td(&text(1)),
            "<td colspan=\"5\"/>".to_string(),
            td(&text(7)),
        ]),
        PointsLine::MultiQ(_) => row(&[
            "<td colspan=\"6\"/>".to_string(),
            format!("<td>{}</td>", link(options, index, &text(7))),
        ]),
        PointsLine::OtherPoints(other) => match other.bucket {
            OtherPointsBucket::All => row(&[
                td(&text(1)),
                td_right(&link(options, index, &text(2))),
            ]),
            OtherPointsBucket::Event(_) | OtherPointsBucket::Level(_) => row(&[
                td(""),
                td(&text(2)),
                td_right(&link(options, index, &text(3))),
            ]),
            OtherPointsBucket::LevelEvent { .. } => row(&[
                td(""),
                td(&text(2)),
                td(&text(3)),
                td_right(&link(options, index, &text(4))),
            ]),
        },
    }
}

fn marker_html(marker: SectionMarker) -> String {
    match marker {
        SectionMarker::TitlesStart => format!("<h3>Titles</h3>{TABLE_HEADER}\n"),
        SectionMarker::RunsStart => format!("<h3>Runs</h3>{TABLE_HEADER}\n"),
        SectionMarker::OtherPointsStart => {
            format!("<h2>{OTHER_POINTS_LABEL}</h2>{TABLE_HEADER}\n")
        }
        SectionMarker::TableEnd => "</table>\n".to_string(),
    }
}

/// Full printable page for a report.
pub fn render_document(report: &PointsReport<'_>, options: &HtmlOptions) -> String {
    let mut html = String::from("<html>\n<head>\n");
    let _ = writeln!(html, "<title>{}</title>", escape(options.heading.as_str()));
    html.push_str("</head>\n<body>\n");
    for (index, line) in report.iter().enumerate() {
        match line {
            PointsLine::Marker(marker) => html.push_str(&marker_html(*marker)),
            _ => html.push_str(&line_html(line, index, options)),
        }
    }
    html.push_str("</body>\n</html>\n");
    html
}
