//! Stoic quote retrieval with an offline fallback.
//!
//! Quotes are fetched from a short, ordered list of public JSON endpoints.
//! Every failure on an endpoint (transport error, timeout, non-success
//! status, malformed payload) moves on to the next one. When none of them
//! produce a quote, one is picked at random from [`FALLBACK_QUOTES`], so
//! [`fetch_quote`] always returns something usable.

use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::blocking::Client;
use serde_json::{Map, Value};

/// Public endpoints tried in order.
pub const DEFAULT_ENDPOINTS: [&str; 2] = [
    "https://stoic-quotes.com/api/quote",
    "https://stoicquotesapi.com/v1/api/quotes/random",
];

/// Timeout applied to each endpoint request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Quotes used when every endpoint fails, as `(text, author)` pairs.
pub const FALLBACK_QUOTES: [(&str, &str); 5] = [
    (
        "You have power over your mind-not outside events. Realize this, and you will find strength.",
        "Marcus Aurelius",
    ),
    ("We suffer more often in imagination than in reality.", "Seneca"),
    (
        "First say to yourself what you would be; and then do what you have to do.",
        "Epictetus",
    ),
    (
        "If it is not right, do not do it, if it is not true, do not say it.",
        "Marcus Aurelius",
    ),
    ("No man is free who is not master of himself.", "Epictetus"),
];

const TEXT_FIELDS: [&str; 2] = ["text", "body"];
const AUTHOR_FIELDS: [&str; 3] = ["author", "title", "source"];

/// A quote shown alongside the journaling prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// The quote itself, never empty.
    pub text: String,
    /// Who said it, when known.
    pub author: Option<String>,
}

impl Quote {
    fn new(text: &str, author: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            author: author.map(str::to_string),
        }
    }
}

/// Fetches a quote from the default endpoints, falling back to local data.
pub fn fetch_quote(timeout: Duration) -> Quote {
    QuoteFetcher::new(timeout).fetch()
}

/// Picks one of the [`FALLBACK_QUOTES`] uniformly at random.
pub fn fallback_quote() -> Quote {
    let (text, author) = FALLBACK_QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_QUOTES[0]);
    Quote::new(text, Some(author))
}

/// Errors from a single endpoint. Never escape this module.
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("payload has no quote text")]
    NoText,
}

/// Tries a list of quote endpoints in order.
#[derive(Debug, Clone)]
pub struct QuoteFetcher {
    endpoints: Vec<String>,
    timeout: Duration,
}

impl QuoteFetcher {
    /// Creates a fetcher for the [`DEFAULT_ENDPOINTS`].
    pub fn new(timeout: Duration) -> Self {
        Self::with_endpoints(DEFAULT_ENDPOINTS, timeout)
    }

    /// Creates a fetcher for a custom endpoint list.
    pub fn with_endpoints<I, S>(endpoints: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
            timeout,
        }
    }

    /// Creates a fetcher that never touches the network.
    pub fn offline() -> Self {
        Self::with_endpoints(Vec::<String>::new(), DEFAULT_TIMEOUT)
    }

    /// Returns the first quote any endpoint yields, or a fallback quote.
    pub fn fetch(&self) -> Quote {
        if let Some(quote) = self.fetch_remote() {
            return quote;
        }

        let quote = fallback_quote();
        tracing::debug!("Using fallback quote by {:?}", quote.author);
        quote
    }

    fn fetch_remote(&self) -> Option<Quote> {
        if self.endpoints.is_empty() {
            return None;
        }

        let client = match Client::builder().timeout(self.timeout).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::debug!("Could not build HTTP client: {}", e);
                return None;
            }
        };

        for url in &self.endpoints {
            match fetch_from(&client, url) {
                Ok(quote) => {
                    tracing::debug!("Fetched quote from {}", url);
                    return Some(quote);
                }
                Err(e) => tracing::debug!("Quote endpoint {} failed: {}", url, e),
            }
        }

        None
    }
}

fn fetch_from(client: &Client, url: &str) -> Result<Quote, FetchError> {
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let payload: Value = response.json()?;
    parse_payload(&payload).ok_or(FetchError::NoText)
}

/// Extracts a quote from an endpoint payload.
///
/// Accepts a bare object or an array whose first element is an object.
/// Text comes from `text` or `body`, attribution from `author`, `title` or
/// `source`, whichever is first non-blank. Returns `None` when no text is
/// present.
pub fn parse_payload(payload: &Value) -> Option<Quote> {
    let object = match payload {
        Value::Array(items) => items.first()?,
        other => other,
    }
    .as_object()?;

    let text = first_non_blank(object, &TEXT_FIELDS)?;
    let author = first_non_blank(object, &AUTHOR_FIELDS);

    Some(Quote::new(text, author))
}

fn first_non_blank<'a>(object: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|field| object.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .find(|value| !value.is_empty())
}
