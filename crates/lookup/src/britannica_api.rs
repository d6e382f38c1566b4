use tracing::debug;

use crate::LookupError;

const BRITANNICA_URL: &str = "https://syndication.api.eb.com/production/article";

pub(crate) async fn fetch_article_xml(
    client: &reqwest::Client,
    api_key: &str,
    article_id: &str,
) -> Result<String, LookupError> {
    debug!(article_id, "fetching encyclopedia article");
    let res = client
        .get(format!("{BRITANNICA_URL}/{article_id}/xml"))
        .header("x-api-key", api_key)
        .send()
        .await
        .map_err(LookupError::Fetch)?;
    if !res.status().is_success() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(LookupError::Status { status, body });
    }
    res.text().await.map_err(LookupError::Deserialize)
}
