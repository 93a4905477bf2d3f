//! formgate HTML loader
//!
//! Builds `formgate_dom::Document`s from HTML5 source via html5ever.

mod parser;

use std::path::Path;

use formgate_dom::Document;

pub use parser::HtmlParser;

/// HTML loading error
#[derive(Debug, thiserror::Error)]
pub enum HtmlError {
    #[error("failed to read HTML input: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Result<Document, HtmlError> {
    HtmlParser::new().parse(html)
}

/// Read and parse an HTML file; the document URL is the file path
pub fn load_file(path: impl AsRef<Path>) -> Result<Document, HtmlError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    HtmlParser::new().parse_with_url(std::io::BufReader::new(file), &path.display().to_string())
}
