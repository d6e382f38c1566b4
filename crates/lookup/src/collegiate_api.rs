use tracing::debug;

use crate::LookupError;

const MERRIAM_WEBSTER_URL: &str = "https://www.dictionaryapi.com/api/v3/references/collegiate/json";

pub(crate) async fn fetch_senses(
    client: &reqwest::Client,
    api_key: &str,
    word: &str,
) -> Result<serde_json::Value, LookupError> {
    debug!(word, "querying the collegiate dictionary");
    let res = client
        .get(format!("{MERRIAM_WEBSTER_URL}/{word}"))
        .query(&[("key", api_key)])
        .send()
        .await
        .map_err(LookupError::Fetch)?;
    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(LookupError::Status { status, body });
    }
    res.json::<serde_json::Value>()
        .await
        .map_err(LookupError::Deserialize)
}
