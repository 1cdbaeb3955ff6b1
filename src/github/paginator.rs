use reqwest::Client;
use serde::de::DeserializeOwned;

pub struct Paginator<'a> {
    client: &'a Client,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Walks numbered pages up to `max_pages`, stopping early on a failed
    /// request, an unparseable body, or a short page. Whatever was
    /// collected before the stop is returned; the walk never errors.
    pub async fn fetch_pages<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        max_pages: u32,
    ) -> Vec<T> {
        let mut all_items = Vec::new();

        for page in 1..=max_pages {
            let separator = if base_url.contains('?') { "&" } else { "?" };
            let url = format!("{}{}per_page={}&page={}", base_url, separator, per_page, page);
            tracing::debug!("Fetching: {}", url);

            let response = match self.client.get(&url).send().await {
                Ok(response) => response,
                Err(err) => {
                    tracing::warn!("Page {} request failed: {}", page, err);
                    break;
                }
            };

            if !response.status().is_success() {
                tracing::warn!("Page {} returned {}", page, response.status());
                break;
            }

            let items: Vec<T> = match response.json().await {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!("Page {} body did not parse: {}", page, err);
                    break;
                }
            };

            let items_count = items.len();
            all_items.extend(items);

            if items_count < per_page as usize {
                break;
            }
        }

        all_items
    }
}
