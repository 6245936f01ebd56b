//! Points report rendering.
//!
//! Every line kind has an HTML fragment built from the same column text the
//! tabular view shows. [`render_document`] stitches the fragments into a
//! printable page, turning section markers into headings and table
//! boundaries.

mod html;

pub use html::{HtmlOptions, TABLE_HEADER, line_html, render_document};
