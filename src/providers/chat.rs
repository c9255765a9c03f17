//! Review generation through an OpenAI-compatible chat completions endpoint

use anyhow::Result;
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::ReviewGenerator;
use super::http::{self, HttpSettings};
use crate::config::ReviewConfig;
use crate::error::FetchError;
use crate::models::Review;

const COMPLETIONS_PATH: &str = "/chat/completions";
pub const MAX_REVIEWS: usize = 5;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

fn review_prompt(attraction: &str, city: &str) -> String {
    format!(
        "Write {MAX_REVIEWS} short visitor reviews of {attraction} in {city}. \
         Output one review per line as `name|rating|comment`, where rating is \
         a number from 1.0 to 5.0. Output nothing else."
    )
}

/// Extract `name|rating|comment` lines, skipping anything malformed.
///
/// A line is kept only when it splits into exactly three non-empty fields.
#[must_use]
pub fn parse_reviews(text: &str) -> Vec<Review> {
    text.lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('|').map(str::trim).collect();
            match fields.as_slice() {
                [author, rating, comment]
                    if !author.is_empty() && !rating.is_empty() && !comment.is_empty() =>
                {
                    Some(Review {
                        author: (*author).to_string(),
                        rating: (*rating).to_string(),
                        comment: (*comment).to_string(),
                    })
                }
                _ => None,
            }
        })
        .take(MAX_REVIEWS)
        .collect()
}

/// Chat completions client producing visitor reviews
pub struct ChatReviewClient {
    client: ClientWithMiddleware,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl ChatReviewClient {
    /// Create a new client
    pub fn new(config: &ReviewConfig) -> Result<Self> {
        let client = http::build_client(HttpSettings::new(
            config.timeout_seconds,
            config.max_retries,
            false,
        ))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ReviewGenerator for ChatReviewClient {
    #[instrument(skip(self))]
    async fn reviews(&self, attraction: &str, city: &str) -> Result<Vec<Review>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(FetchError::NotConfigured("Review API key"))?;

        let url = http::url_with_params(&self.base_url, COMPLETIONS_PATH, &[])?;
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: review_prompt(attraction, city),
            }],
            temperature: TEMPERATURE,
        };

        let response: ChatResponse = http::post_json(&self.client, url, api_key, &request).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| FetchError::Parse("completion has no content".to_string()))?;

        let reviews = parse_reviews(&content);
        debug!("Parsed {} reviews for {}", reviews.len(), attraction);
        if reviews.is_empty() {
            return Err(FetchError::Parse("no well-formed review lines".to_string()));
        }
        Ok(reviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reviews_keeps_well_formed_lines() {
        let text = "Li Wei|4.8|Stunning architecture\n\
                    not a review\n\
                    Zhang|  |missing rating\n\
                    Chen|4.0|Crowded but worth it|extra\n\
                    \n\
                    Wang Fang | 5.0 | Go early in the morning ";
        let reviews = parse_reviews(text);
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].author, "Li Wei");
        assert_eq!(reviews[1].author, "Wang Fang");
        assert_eq!(reviews[1].rating, "5.0");
        assert_eq!(reviews[1].comment, "Go early in the morning");
    }

    #[test]
    fn test_parse_reviews_caps_count() {
        let text = (1..=8)
            .map(|i| format!("Visitor {i}|4.{i}|Comment {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let reviews = parse_reviews(&text);
        assert_eq!(reviews.len(), MAX_REVIEWS);
        assert_eq!(reviews[4].author, "Visitor 5");
    }

    #[test]
    fn test_parse_reviews_empty_input() {
        assert!(parse_reviews("").is_empty());
        assert!(parse_reviews("Sorry, I cannot help with that.").is_empty());
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "llama-3.1-8b-instant",
            messages: vec![ChatMessage {
                role: "user",
                content: review_prompt("故宫", "北京"),
            }],
            temperature: TEMPERATURE,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama-3.1-8b-instant");
        assert_eq!(value["messages"][0]["role"], "user");
        assert!(value["messages"][0]["content"].as_str().unwrap().contains("故宫"));
    }

    #[test]
    fn test_response_without_choices_decodes() {
        let response: ChatResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(response.choices.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_not_configured() {
        let client = ChatReviewClient::new(&ReviewConfig::default()).unwrap();
        let result = client.reviews("故宫", "北京").await;
        assert!(matches!(result, Err(FetchError::NotConfigured(_))));
    }
}
