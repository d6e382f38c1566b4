use britannica_api::fetch_article_xml;
use collegiate_api::fetch_senses;
use words_api::fetch_relations;

mod article;
mod britannica_api;
mod collegiate;
mod collegiate_api;
mod relations;
mod words_api;

pub use article::{parse_article, ArticleDocument};
pub use collegiate::{format_senses, DictionaryEntry, NO_DICTIONARY_ENTRY};
pub use relations::{definition_tree, GroupedEntries, TreeNode, WordEntry, WordRelations};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("upstream returned {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode response body: {0}")]
    Deserialize(#[source] reqwest::Error),
    #[error("failed to parse article XML: {0}")]
    ArticleParse(#[from] quick_xml::Error),
}

/// Static API credentials, read from the environment by the caller. An empty
/// key is allowed and surfaces as a failed upstream call.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub words_api: String,
    pub collegiate: String,
    pub britannica: String,
}

pub struct Lookup {
    client: reqwest::Client,
    keys: ApiKeys,
}

impl Lookup {
    pub fn new(keys: ApiKeys) -> Self {
        Self {
            client: reqwest::Client::new(),
            keys,
        }
    }

    pub async fn word_relations(&self, word: &str) -> Result<WordRelations, LookupError> {
        fetch_relations(&self.client, &self.keys.words_api, word).await
    }

    /// The raw collegiate response body; the shape is too irregular for a
    /// typed model, so callers hand it to [`format_senses`].
    pub async fn dictionary(&self, word: &str) -> Result<serde_json::Value, LookupError> {
        fetch_senses(&self.client, &self.keys.collegiate, word).await
    }

    pub async fn article(&self, article_id: &str) -> Result<ArticleDocument, LookupError> {
        let xml = fetch_article_xml(&self.client, &self.keys.britannica, article_id).await?;
        parse_article(&xml)
    }
}
