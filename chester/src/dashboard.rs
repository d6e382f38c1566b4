use lookup::{definition_tree, format_senses, Lookup, LookupError, WordRelations};
use tracing::debug;

use crate::output_log::OutputLog;
use crate::render;
use crate::title_index::{TitleIndex, TitleRecord};

pub const NO_MATCHES: &str = "No matching articles found.";
pub const NO_ARTICLE: &str = "No Britannica entry found.";
pub const ARTICLE_PARSE_FAILED: &str = "Error parsing Britannica entry.";
pub const NO_DICT_ENTRY: &str = "Dictionary entry not found.";

/// Lookup lifecycle for one submission. The command loop is sequential, so
/// at most one lookup is ever in flight and submissions cannot overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardState {
    Idle,
    Searching,
    Displaying,
}

/// Routes a submitted word to the three lookups and each result to its
/// display region, and resolves article selections from the matches list.
pub struct Dashboard {
    lookup: Lookup,
    titles: TitleIndex,
    log: OutputLog,
    state: DashboardState,
    matches: Vec<String>,
}

impl Dashboard {
    pub fn new(lookup: Lookup, titles: TitleIndex, log: OutputLog) -> Self {
        Self {
            lookup,
            titles,
            log,
            state: DashboardState::Idle,
            matches: Vec::new(),
        }
    }

    pub fn state(&self) -> DashboardState {
        self.state
    }

    /// Runs the full lookup sequence for a submitted word: both remote
    /// lookups concurrently, each degrading to its own placeholder on
    /// failure, then the local title search.
    pub async fn submit_word(&mut self, word: &str) {
        self.state = DashboardState::Searching;
        self.log.append(format!("Searching for '{word}'."));

        let (relations, senses) = tokio::join!(
            self.lookup.word_relations(word),
            self.lookup.dictionary(word),
        );

        let tree = match relations {
            Ok(relations) => {
                debug!(word = relations.word.as_deref().unwrap_or("unknown"), "word relations received");
                definition_tree(&relations)
            }
            Err(error) => {
                self.log.append(format!("Word lookup failed: {error}"));
                definition_tree(&WordRelations::default())
            }
        };

        let dictionary = match senses {
            Ok(payload) => format_senses(&payload),
            Err(error) => {
                self.log.append(format!("Dictionary lookup failed: {error}"));
                NO_DICT_ENTRY.to_string()
            }
        };

        self.search_titles(word);

        println!("Word Details");
        render::tree(&tree);
        println!();
        render::markdown(&dictionary);
        self.print_matches();
    }

    /// Local substring search over the title catalogue, refreshing the
    /// selectable matches list.
    pub fn search_titles(&mut self, query: &str) {
        self.log
            .append(format!("Searching '{}' in the article catalogue.", query.trim()));
        let found = self.titles.search(query);
        self.matches.clear();
        if found.is_empty() {
            self.log.append("No article matches.");
            self.matches.push(NO_MATCHES.to_string());
        } else {
            self.log.append(format!("Found {} article matches.", found.len()));
            self.matches.extend(found.into_iter().map(encode_match));
        }
        self.state = DashboardState::Displaying;
    }

    pub fn print_matches(&self) {
        println!("Articles:");
        for (index, line) in self.matches.iter().enumerate() {
            println!("[{}]: {line}", index + 1);
        }
    }

    /// Resolves a 1-based position in the matches list, fetches the article
    /// behind it and renders it. Invalid selections are reported and logged
    /// without touching any other state.
    pub async fn select_article(&mut self, position: usize) {
        let Some(line) = position.checked_sub(1).and_then(|i| self.matches.get(i)) else {
            self.log
                .append(format!("Invalid article selection: {position}."));
            println!("No article at position {position}.");
            return;
        };
        let Some(article_id) = parse_selection(line) else {
            self.log
                .append(format!("Invalid selection in the articles list: {line}"));
            println!("Not an article entry.");
            return;
        };
        let article_id = article_id.to_string();
        self.log.append(format!("Fetching article {article_id}."));

        match self.lookup.article(&article_id).await {
            Ok(article) => {
                self.log.append(format!("Article title: {}", article.title));
                render::markdown(&collapsed(&article.to_markdown()));
            }
            Err(LookupError::Status { status, body }) => {
                self.log
                    .append(format!("Article fetch failed: {status} - {body}"));
                println!("{NO_ARTICLE}");
            }
            Err(error @ LookupError::ArticleParse(_)) => {
                self.log.append(format!("Article parsing failed: {error}"));
                println!("{ARTICLE_PARSE_FAILED}");
            }
            Err(error) => {
                self.log.append(format!("Article fetch failed: {error}"));
                println!("{NO_ARTICLE}");
            }
        }
    }

    pub fn print_log(&self) {
        for line in self.log.lines() {
            println!("{line}");
        }
    }
}

fn encode_match(record: &TitleRecord) -> String {
    format!("ID: {} - {}", record.article_id, record.title)
}

/// Extracts the article id from an encoded `ID: {id} - {title}` line.
/// Placeholder and malformed lines yield `None`.
pub fn parse_selection(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("ID: ")?;
    let (id, _title) = rest.split_once(" - ")?;
    let id = id.trim();
    (!id.is_empty()).then_some(id)
}

fn collapsed(markdown: &str) -> String {
    format!("<details><summary>Britannica Entry</summary>\n\n{markdown}\n\n</details>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookup::ApiKeys;
    use std::io::Write;

    fn dashboard_with(catalogue: &str) -> (Dashboard, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let articles = dir.path().join("articles.json");
        let mut file = std::fs::File::create(&articles).unwrap();
        file.write_all(catalogue.as_bytes()).unwrap();

        let titles = TitleIndex::load(&articles);
        let log = OutputLog::new(dir.path().join("debug.log"), 6);
        let dashboard = Dashboard::new(Lookup::new(ApiKeys::default()), titles, log);
        (dashboard, dir)
    }

    const CATALOGUE: &str = r#"[
        {"title": "Cat", "articleId": "9020744"},
        {"title": "Wildcat", "articleId": "9077003"}
    ]"#;

    #[test]
    fn starts_idle() {
        let (dashboard, _dir) = dashboard_with(CATALOGUE);
        assert_eq!(dashboard.state(), DashboardState::Idle);
    }

    #[test]
    fn title_search_populates_encoded_matches() {
        let (mut dashboard, _dir) = dashboard_with(CATALOGUE);
        dashboard.search_titles("cat");
        assert_eq!(
            dashboard.matches,
            vec!["ID: 9020744 - cat", "ID: 9077003 - wildcat"]
        );
        assert_eq!(dashboard.state(), DashboardState::Displaying);
    }

    #[test]
    fn unmatched_title_search_leaves_a_placeholder_entry() {
        let (mut dashboard, _dir) = dashboard_with(CATALOGUE);
        dashboard.search_titles("zebra");
        assert_eq!(dashboard.matches, vec![NO_MATCHES]);
    }

    #[tokio::test]
    async fn selecting_the_placeholder_is_ignored() {
        let (mut dashboard, _dir) = dashboard_with(CATALOGUE);
        dashboard.search_titles("zebra");
        dashboard.select_article(1).await;
        // The placeholder stays; no state was corrupted by the bad selection.
        assert_eq!(dashboard.matches, vec![NO_MATCHES]);
    }

    #[tokio::test]
    async fn out_of_range_selection_is_ignored() {
        let (mut dashboard, _dir) = dashboard_with(CATALOGUE);
        dashboard.search_titles("cat");
        dashboard.select_article(0).await;
        dashboard.select_article(99).await;
        assert_eq!(dashboard.matches.len(), 2);
    }

    #[test]
    fn parses_encoded_selection_lines() {
        assert_eq!(parse_selection("ID: 9020744 - cat"), Some("9020744"));
        assert_eq!(
            parse_selection("ID: abc-123 - great barrier reef"),
            Some("abc-123")
        );
    }

    #[test]
    fn rejects_placeholder_and_malformed_lines() {
        assert_eq!(parse_selection(NO_MATCHES), None);
        assert_eq!(parse_selection("9020744 - cat"), None);
        assert_eq!(parse_selection("ID: 9020744"), None);
        assert_eq!(parse_selection("ID:  - cat"), None);
    }

    #[test]
    fn encoded_lines_round_trip_through_the_parser() {
        let record = TitleRecord {
            title: "cat".to_string(),
            article_id: "9020744".to_string(),
        };
        assert_eq!(parse_selection(&encode_match(&record)), Some("9020744"));
    }

    #[test]
    fn article_markdown_is_wrapped_in_a_disclosure_block() {
        let wrapped = collapsed("### Cat\n\nbody");
        assert!(wrapped.starts_with("<details><summary>Britannica Entry</summary>"));
        assert!(wrapped.contains("### Cat\n\nbody"));
        assert!(wrapped.ends_with("</details>"));
    }
}
