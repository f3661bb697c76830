use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{config::WikiConfig, models::Difficulty};

/// Client for the MediaWiki action API of one Wikipedia language edition
pub struct WikiClient {
    http_client: reqwest::Client,
    api_url: String,
    user_agent: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(rename = "continue")]
    continuation: Option<Continuation>,
    query: Option<Query>,
}

#[derive(Debug, Deserialize)]
struct Continuation {
    plcontinue: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Query {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    links: Vec<Link>,
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Link {
    title: String,
}

impl WikiClient {
    pub fn new(http_client: reqwest::Client, config: &WikiConfig) -> Self {
        Self {
            http_client,
            api_url: config.api_url(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Titles of all article links on a page, sorted
    pub async fn fetch_links(&self, title: &str) -> Result<Vec<String>> {
        let mut links = Vec::new();
        let mut plcontinue: Option<String> = None;

        loop {
            let mut params = vec![
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("prop", "links"),
                ("plnamespace", "0"),
                ("pllimit", "max"),
                ("titles", title),
            ];
            if let Some(token) = plcontinue.as_deref() {
                params.push(("plcontinue", token));
            }

            let response = self.query(&params).await?;

            if let Some(query) = response.query {
                for page in query.pages {
                    if page.missing {
                        anyhow::bail!("Wikipedia page '{}' does not exist", title);
                    }
                    links.extend(page.links.into_iter().map(|link| link.title));
                }
            }

            match response.continuation.and_then(|c| c.plcontinue) {
                Some(token) => plcontinue = Some(token),
                None => break,
            }
        }

        links.sort();
        tracing::info!("Fetched {} links from '{}'", links.len(), title);
        Ok(links)
    }

    /// Plain-text introduction of a page, or `None` if the page does not exist
    pub async fn fetch_summary(&self, title: &str) -> Result<Option<String>> {
        let params = [
            ("action", "query"),
            ("format", "json"),
            ("formatversion", "2"),
            ("prop", "extracts"),
            ("exintro", "1"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", title),
        ];

        let response = self.query(&params).await?;
        let summary = response
            .query
            .and_then(|query| query.pages.into_iter().next())
            .filter(|page| !page.missing)
            .and_then(|page| page.extract)
            .map(|extract| extract.trim().to_string())
            .filter(|extract| !extract.is_empty());

        Ok(summary)
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<QueryResponse> {
        let response = self
            .http_client
            .get(&self.api_url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(params)
            .send()
            .await
            .context("Failed to reach Wikipedia")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Wikipedia query failed: {} - {}", status, error_text);
            anyhow::bail!("Wikipedia query failed with status {}", status);
        }

        response
            .json::<QueryResponse>()
            .await
            .context("Failed to decode Wikipedia response")
    }
}

/// Pick puzzle words spread evenly across the (sorted) link titles.
///
/// Only purely alphabetic titles that fit on the grid are candidates.
pub fn select_game_words<S: AsRef<str>>(links: &[S], difficulty: Difficulty) -> Vec<String> {
    let grid_size = difficulty.grid_size();
    let num_words = difficulty.word_count();

    let candidates: Vec<&str> = links
        .iter()
        .map(|link| link.as_ref())
        .filter(|link| {
            !link.is_empty()
                && link.chars().all(|c| c.is_ascii_alphabetic())
                && link.len() <= grid_size
        })
        .collect();

    let step = if candidates.len() > num_words {
        candidates.len() / num_words
    } else {
        1
    };

    candidates
        .into_iter()
        .step_by(step)
        .take(num_words)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_filters_non_alphabetic_and_long_titles() {
        let links = [
            "African National Congress",
            "Apartheid",
            "Robben Island",
            "Soweto",
            "1994",
            "Xhosa",
            "Johannesburg",
        ];

        let words = select_game_words(&links, Difficulty::Easy);

        assert_eq!(words, vec!["Soweto", "Xhosa"]);
    }

    #[test]
    fn test_select_spreads_across_list() {
        let links: Vec<String> = (b'A'..=b'T')
            .map(|c| format!("{}WORD", c as char))
            .collect();

        let words = select_game_words(&links, Difficulty::Easy);

        // 20 candidates, 5 wanted: every 4th title
        assert_eq!(words, vec!["AWORD", "EWORD", "IWORD", "MWORD", "QWORD"]);
    }

    #[test]
    fn test_select_with_few_candidates() {
        let words = select_game_words(&["Cape", "Town"], Difficulty::Hard);
        assert_eq!(words, vec!["Cape", "Town"]);

        let none: [&str; 0] = [];
        assert!(select_game_words(&none, Difficulty::Medium).is_empty());
    }

    #[test]
    fn test_query_response_decoding() {
        let body = r#"{
            "continue": {"plcontinue": "123|0|Zulu", "continue": "||"},
            "query": {"pages": [{"pageid": 1, "ns": 0, "title": "Nelson Mandela",
                "links": [{"ns": 0, "title": "Apartheid"}, {"ns": 0, "title": "Soweto"}]}]}
        }"#;

        let response: QueryResponse = serde_json::from_str(body).unwrap();

        assert_eq!(
            response.continuation.and_then(|c| c.plcontinue).as_deref(),
            Some("123|0|Zulu")
        );
        let pages = response.query.unwrap().pages;
        assert_eq!(pages[0].links.len(), 2);
        assert!(!pages[0].missing);
    }

    #[test]
    fn test_missing_page_decoding() {
        let body = r#"{"query": {"pages": [{"ns": 0, "title": "Qwxz", "missing": true}]}}"#;

        let response: QueryResponse = serde_json::from_str(body).unwrap();

        let page = &response.query.unwrap().pages[0];
        assert!(page.missing);
        assert!(page.extract.is_none());
    }
}
