use quick_xml::events::Event;
use quick_xml::Reader;

use crate::LookupError;

/// An encyclopedia article normalized to prose: inline emphasis and
/// cross-references already resolved to markdown in each paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDocument {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl ArticleDocument {
    pub fn to_markdown(&self) -> String {
        format!("### {}\n\n{}", self.title, self.paragraphs.join("\n\n"))
    }
}

/// Parses a syndication article. The document is a tree of `title` and `p`
/// elements; inside a paragraph, `e` children mark emphasis and `xref`
/// children mark cross-references whose targets are not resolvable here, so
/// they link to a placeholder anchor.
pub fn parse_article(xml: &str) -> Result<ArticleDocument, LookupError> {
    let mut reader = Reader::from_str(xml);

    let mut title: Option<String> = None;
    let mut title_captured = false;
    let mut in_title = false;

    let mut paragraphs = Vec::new();
    let mut pieces: Vec<String> = Vec::new();
    let mut in_paragraph = false;
    // Depth below the current `p`: 1 means a direct child like `e`/`xref`,
    // deeper content is ignored. Only the leading text run of a child counts
    // as its text; anything after a nested element belongs to that element.
    let mut child_depth = 0usize;
    let mut child_tag: Vec<u8> = Vec::new();
    let mut child_has_nested = false;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(start) => {
                let name = start.name().as_ref().to_vec();
                if in_paragraph {
                    child_depth += 1;
                    if child_depth == 1 {
                        child_tag = name;
                        child_has_nested = false;
                    } else {
                        child_has_nested = true;
                    }
                } else if name == b"p" {
                    in_paragraph = true;
                    child_depth = 0;
                    pieces.clear();
                } else if name == b"title" && !title_captured {
                    in_title = true;
                }
            }
            Event::End(end) => {
                let name = end.name();
                if in_paragraph {
                    if child_depth > 0 {
                        child_depth -= 1;
                    } else if name.as_ref() == b"p" {
                        in_paragraph = false;
                        paragraphs.push(pieces.join(" "));
                        pieces.clear();
                    }
                } else if in_title && name.as_ref() == b"title" {
                    in_title = false;
                    title_captured = true;
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                if in_title {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        title
                            .get_or_insert_with(String::new)
                            .push_str(trimmed);
                    }
                } else if in_paragraph {
                    let trimmed = text.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    match child_depth {
                        0 => pieces.push(trimmed.to_string()),
                        1 if child_has_nested => {}
                        1 if child_tag == b"e" => pieces.push(format!("**{trimmed}**")),
                        1 if child_tag == b"xref" => pieces.push(format!("[{trimmed}](#)")),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    Ok(ArticleDocument {
        title: title.unwrap_or_else(|| "Unknown Title".to_string()),
        paragraphs,
    })
}
