use tracing::debug;

use crate::relations::WordRelations;
use crate::LookupError;

const WORDS_API_URL: &str = "https://wordsapiv1.p.rapidapi.com/words";
const WORDS_API_HOST: &str = "wordsapiv1.p.rapidapi.com";

pub(crate) async fn fetch_relations(
    client: &reqwest::Client,
    api_key: &str,
    word: &str,
) -> Result<WordRelations, LookupError> {
    debug!(word, "querying the words api");
    let res = client
        .get(format!("{WORDS_API_URL}/{word}"))
        .header("X-RapidAPI-Key", api_key)
        .header("X-RapidAPI-Host", WORDS_API_HOST)
        .send()
        .await
        .map_err(LookupError::Fetch)?;
    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(LookupError::Status { status, body });
    }
    res.json::<WordRelations>()
        .await
        .map_err(LookupError::Deserialize)
}
