use std::path::Path;

use serde::Deserialize;
use tracing::{info, warn};

/// One record of the local article catalogue. Titles are lowercased at load
/// so matching stays case-insensitive without per-query allocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRecord {
    pub title: String,
    pub article_id: String,
}

/// Read-only catalogue of encyclopedia titles, loaded once at startup and
/// never mutated afterwards.
pub struct TitleIndex {
    entries: Vec<TitleRecord>,
}

impl TitleIndex {
    /// Loads the catalogue. A missing or malformed file is recoverable: the
    /// process continues with an empty index.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(index) => {
                info!(
                    count = index.entries.len(),
                    path = %path.display(),
                    "loaded article titles"
                );
                index
            }
            Err(error) => {
                warn!(
                    path = %path.display(),
                    %error,
                    "failed to load article titles, continuing with an empty catalogue"
                );
                Self {
                    entries: Vec::new(),
                }
            }
        }
    }

    fn read(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let mut entries: Vec<TitleRecord> = serde_json::from_str(&raw)?;
        for record in &mut entries {
            record.title = record.title.to_lowercase();
        }
        Ok(Self { entries })
    }

    /// Case-insensitive substring search, preserving load order, no ranking.
    /// An empty or whitespace-only query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&TitleRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|record| record.title.contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn index_from(json: &str) -> TitleIndex {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        TitleIndex::load(file.path())
    }

    const CATALOGUE: &str = r#"[
        {"title": "Cat", "articleId": "9020744"},
        {"title": "Dog", "articleId": "9030843"},
        {"title": "Wildcat", "articleId": "9077003"},
        {"title": "Cattle", "articleId": "9020882"}
    ]"#;

    #[test]
    fn search_matches_substrings_in_load_order() {
        let index = index_from(CATALOGUE);
        let hits: Vec<&str> = index
            .search("cat")
            .iter()
            .map(|record| record.article_id.as_str())
            .collect();
        assert_eq!(hits, vec!["9020744", "9077003", "9020882"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let index = index_from(CATALOGUE);
        assert_eq!(index.search("CAT").len(), 3);
        assert_eq!(index.search("wIlD").len(), 1);
    }

    #[test]
    fn empty_query_matches_nothing() {
        let index = index_from(CATALOGUE);
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn unmatched_query_returns_no_records() {
        let index = index_from(CATALOGUE);
        assert!(index.search("zebra").is_empty());
    }

    #[test]
    fn missing_file_falls_back_to_empty_index() {
        let index = TitleIndex::load(Path::new("/nonexistent/articles.json"));
        assert!(index.entries.is_empty());
        assert!(index.search("cat").is_empty());
    }

    #[test]
    fn malformed_file_falls_back_to_empty_index() {
        let index = index_from("{not json");
        assert!(index.entries.is_empty());
    }

    #[test]
    fn titles_are_stored_lowercased() {
        let index = index_from(r#"[{"title": "Great Barrier Reef", "articleId": "1"}]"#);
        let hits = index.search("barrier");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "great barrier reef");
    }
}
