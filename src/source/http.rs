//! Blocking HTTP client for the public content APIs.

use super::{ContentSource, FetchError};
use crate::model::{Fact, Joke, Quote, Resolution};
use image::DynamicImage;
use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const QUOTE_URL: &str = "https://zenquotes.io/api/random";
const FACT_URL: &str = "https://uselessfacts.jsph.pl/random.json?language=en";
const JOKE_URL: &str = "https://official-joke-api.appspot.com/random_joke";
const UNSPLASH_RANDOM_URL: &str = "https://api.unsplash.com/photos/random";
const PICSUM_URL: &str = "https://picsum.photos";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Search topics for Unsplash backgrounds.
pub const BACKGROUND_TOPICS: &[&str] = &[
    "landscape",
    "cityscape",
    "nature",
    "mountain",
    "ocean",
    "sunset",
    "architecture",
    "forest",
    "city",
    "sky",
];

#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    a: String,
}

#[derive(Debug, Deserialize)]
struct UselessFact {
    text: String,
}

#[derive(Debug, Deserialize)]
struct OfficialJoke {
    setup: String,
    punchline: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}

/// Content source backed by zenquotes, uselessfacts, the official joke API,
/// Unsplash and Picsum.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    unsplash_access_key: Option<String>,
}

impl HttpSource {
    /// Build the client. Without an Unsplash key backgrounds come from Picsum.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the TLS backend cannot be initialized.
    pub fn new(unsplash_access_key: Option<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("quoteme/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            unsplash_access_key,
        })
    }

    fn get(&self, url: &str) -> Result<Response, FetchError> {
        self.get_with_query(url, &[])
    }

    /// GET `url` with `query` appended, percent-encoded.
    fn get_with_query(&self, url: &str, query: &[(&str, &str)]) -> Result<Response, FetchError> {
        debug!(url, "GET");
        let response = self.client.get(url).query(query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        Ok(self.get(url)?.json::<T>()?)
    }

    fn get_image(&self, url: &str) -> Result<DynamicImage, FetchError> {
        let bytes = self.get(url)?.bytes()?;
        Ok(image::load_from_memory(&bytes)?)
    }

}

/// Query string of an Unsplash random-photo search.
fn unsplash_query<'a>(topic: &'a str, key: &'a str) -> [(&'static str, &'a str); 3] {
    [
        ("query", topic),
        ("orientation", "landscape"),
        ("client_id", key),
    ]
}

/// Picsum URL for a blurred photo of exactly `resolution`.
pub fn picsum_url(resolution: Resolution, random_id: u32) -> String {
    format!(
        "{PICSUM_URL}/{}/{}?random={random_id}&blur=1",
        resolution.width, resolution.height
    )
}

impl ContentSource for HttpSource {
    fn random_quote(&self) -> Result<Quote, FetchError> {
        let quotes: Vec<ZenQuote> = self.get_json(QUOTE_URL)?;
        quotes
            .into_iter()
            .next()
            .map(|z| Quote::new(z.q, z.a))
            .ok_or_else(|| FetchError::Empty {
                url: QUOTE_URL.to_string(),
            })
    }

    fn random_fact(&self) -> Result<Fact, FetchError> {
        let fact: UselessFact = self.get_json(FACT_URL)?;
        Ok(Fact::new(fact.text))
    }

    fn random_joke(&self) -> Result<Joke, FetchError> {
        let joke: OfficialJoke = self.get_json(JOKE_URL)?;
        Ok(Joke::two_part(joke.setup, joke.punchline))
    }

    fn search_photo(&self, rng: &mut dyn RngCore) -> Result<Option<DynamicImage>, FetchError> {
        let Some(key) = self.unsplash_access_key.as_deref() else {
            return Ok(None);
        };
        let topic = BACKGROUND_TOPICS.choose(rng).copied().unwrap_or("landscape");
        let photo: UnsplashPhoto = self
            .get_with_query(UNSPLASH_RANDOM_URL, &unsplash_query(topic, key))?
            .json()?;
        self.get_image(&photo.urls.regular).map(Some)
    }

    fn random_photo(
        &self,
        resolution: Resolution,
        rng: &mut dyn RngCore,
    ) -> Result<DynamicImage, FetchError> {
        let random_id: u32 = rng.random_range(1..=1000);
        self.get_image(&picsum_url(resolution, random_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picsum_url_embeds_size_and_blur() {
        let url = picsum_url(Resolution::new(1920, 1080), 42);
        assert_eq!(url, "https://picsum.photos/1920/1080?random=42&blur=1");
    }

    #[test]
    fn unsplash_query_is_percent_encoded() {
        let request = Client::new()
            .get(UNSPLASH_RANDOM_URL)
            .query(&unsplash_query("city sky", "key&with=odd chars"))
            .build()
            .expect("valid request");

        assert_eq!(
            request.url().as_str(),
            "https://api.unsplash.com/photos/random?query=city+sky&orientation=landscape\
             &client_id=key%26with%3Dodd+chars"
        );
    }

    #[test]
    fn search_photo_without_key_is_skipped() {
        let source = HttpSource::new(None).expect("client");
        let mut rng = rand::rng();
        assert!(matches!(source.search_photo(&mut rng), Ok(None)));
    }

    #[test]
    fn zenquote_payload_deserializes() {
        let body = r#"[{"q":"Act now.","a":"Someone","h":"<blockquote>"}]"#;
        let parsed: Vec<ZenQuote> = serde_json::from_str(body).expect("valid payload");
        assert_eq!(parsed[0].q, "Act now.");
        assert_eq!(parsed[0].a, "Someone");
    }

    #[test]
    fn joke_payload_ignores_extra_fields() {
        let body = r#"{"type":"general","setup":"S?","punchline":"P!","id":7}"#;
        let parsed: OfficialJoke = serde_json::from_str(body).expect("valid payload");
        assert_eq!(parsed.setup, "S?");
        assert_eq!(parsed.punchline, "P!");
    }

    #[test]
    fn unsplash_payload_extracts_regular_url() {
        let body = r#"{"id":"x","urls":{"raw":"r","regular":"https://img/regular"}}"#;
        let parsed: UnsplashPhoto = serde_json::from_str(body).expect("valid payload");
        assert_eq!(parsed.urls.regular, "https://img/regular");
    }

    #[cfg(feature = "network-tests")]
    #[test]
    fn live_quote_api_returns_a_quote() {
        let source = HttpSource::new(None).expect("client");
        let quote = source.random_quote().expect("quote API reachable");
        assert!(!quote.text.is_empty());
    }
}
