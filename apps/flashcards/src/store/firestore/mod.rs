//! Cloud document store backed by the Firestore REST API.
//!
//! Decks live in the `Decks` collection, one document per deck id. Author
//! keys live in `Keys`; a key is valid when its document has
//! `role == "author"`.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::{DataStore, StoreError};
use crate::domain::Deck;

mod token;
pub mod value;

use token::TokenSource;
use value::Document;

pub const DECK_COLLECTION: &str = "Decks";
pub const KEYS_COLLECTION: &str = "Keys";

const FIRESTORE_HOST: &str = "https://firestore.googleapis.com";

/// Unreserved URL characters stay readable in document paths.
const DOCUMENT_ID: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Ids that would address the collection itself once the URL is normalised.
fn names_a_document(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirestoreConfig {
    pub project: String,
    pub database: String,
    /// `host:port` of a local emulator; disables authentication.
    pub emulator_host: Option<String>,
}

#[derive(Debug)]
pub struct FirestoreStore {
    client: reqwest::Client,
    documents_url: String,
    summary: String,
    token: TokenSource,
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig) -> Self {
        let (host, token) = match &config.emulator_host {
            Some(emulator) => (format!("http://{emulator}"), TokenSource::Anonymous),
            None => (FIRESTORE_HOST.to_string(), TokenSource::metadata()),
        };
        let documents_url = format!(
            "{host}/v1/projects/{}/databases/{}/documents",
            config.project, config.database
        );
        info!(project = %config.project, database = %config.database, "opening document store");

        Self {
            client: reqwest::Client::new(),
            documents_url,
            summary: format!("FirestoreStore({},{})", config.project, config.database),
            token,
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{collection}/{}",
            self.documents_url,
            utf8_percent_encode(id, DOCUMENT_ID)
        )
    }

    async fn request(
        &self,
        method: reqwest::Method,
        url: &str,
    ) -> Result<reqwest::RequestBuilder, StoreError> {
        let builder = self.client.request(method, url);
        Ok(match self.token.bearer(&self.client).await? {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Fetch a document, mapping 404 to `None`.
    async fn fetch(&self, url: &str) -> Result<Option<Document>, StoreError> {
        let response = self.request(reqwest::Method::GET, url).await?.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(StoreError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

#[async_trait]
impl DataStore for FirestoreStore {
    fn summary(&self) -> String {
        self.summary.clone()
    }

    async fn get_deck(&self, id: &str) -> Result<Option<Deck>, StoreError> {
        if !names_a_document(id) {
            debug!(deck_id = id, "not a deck document id");
            return Ok(None);
        }
        debug!(deck_id = id, "fetching deck document");
        let Some(document) = self.fetch(&self.document_url(DECK_COLLECTION, id)).await? else {
            debug!(deck_id = id, "deck document not found");
            return Ok(None);
        };

        let deck = serde_json::from_value(document.to_json()?)
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        Ok(Some(deck))
    }

    async fn put_deck(&self, id: &str, deck: &Deck) -> Result<(), StoreError> {
        info!(deck_id = id, cards = deck.cards.len(), "writing deck document");
        let json = serde_json::to_value(deck).map_err(|e| StoreError::Decode(e.to_string()))?;
        let document = Document::from_json(&json)?;

        // PATCH without an update mask replaces the whole document.
        let url = self.document_url(DECK_COLLECTION, id);
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .await?
            .json(&document)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        debug!(deck_id = id, "wrote deck document");
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, StoreError> {
        #[derive(serde::Deserialize)]
        struct ListResponse {
            #[serde(default)]
            documents: Vec<Document>,
        }

        let url = format!("{}/{DECK_COLLECTION}?pageSize=1", self.documents_url);
        let response = self.request(reqwest::Method::GET, &url).await?.send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status().as_u16(),
                url,
            });
        }
        let listing: ListResponse = response.json().await?;
        Ok(listing.documents.is_empty())
    }

    async fn is_valid_author(&self, key: &str) -> Result<bool, StoreError> {
        let key = key.trim();
        if !names_a_document(key) {
            return Ok(false);
        }

        match self.fetch(&self.document_url(KEYS_COLLECTION, key)).await? {
            None => {
                info!("author key not found");
                Ok(false)
            }
            Some(doc) if doc.string_field("role") == Some("author") => Ok(true),
            Some(_) => {
                warn!("key does not have author role");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(emulator: Option<&str>) -> FirestoreConfig {
        FirestoreConfig {
            project: "demo-project".to_string(),
            database: "(default)".to_string(),
            emulator_host: emulator.map(str::to_string),
        }
    }

    #[test]
    fn cloud_urls() {
        let store = FirestoreStore::new(&config(None));
        assert_eq!(
            store.document_url(DECK_COLLECTION, "AB12-CD34"),
            "https://firestore.googleapis.com/v1/projects/demo-project/databases/(default)/documents/Decks/AB12-CD34"
        );
        assert_eq!(store.summary(), "FirestoreStore(demo-project,(default))");
    }

    #[test]
    fn emulator_urls_use_plain_http() {
        let store = FirestoreStore::new(&config(Some("localhost:8200")));
        assert!(store
            .document_url(KEYS_COLLECTION, "my key")
            .starts_with("http://localhost:8200/v1/projects/demo-project/"));
        assert!(store.document_url(KEYS_COLLECTION, "my key").ends_with("/Keys/my%20key"));
    }

    #[tokio::test]
    async fn blank_author_key_is_rejected_without_a_request() {
        let store = FirestoreStore::new(&config(Some("127.0.0.1:1")));
        assert!(!store.is_valid_author("   ").await.unwrap());
        assert!(!store.is_valid_author("..").await.unwrap());
    }

    #[tokio::test]
    async fn collection_paths_are_not_decks() {
        // Nothing listens on port 1, so any request would fail.
        let store = FirestoreStore::new(&config(Some("127.0.0.1:1")));
        for id in ["", ".", ".."] {
            assert_eq!(store.get_deck(id).await.unwrap(), None, "{id:?}");
        }
        assert!(store.get_deck("AB12-CD34").await.is_err());
    }
}
