use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::fetch::JsonFetcher;

pub const UNKNOWN_TITLE: &str = "Unknown Title";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperMetadata {
    pub paper_id: String,
    pub title: String,
    pub published_year: Option<i32>,
    pub authors: Vec<String>,
    pub venue: Option<String>,
}

/// Fetch a work from the OpenAlex API and normalize it.
pub async fn fetch_paper_metadata(
    fetcher: &JsonFetcher,
    api_base: &str,
    paper_id: &str,
) -> Result<PaperMetadata, ReportError> {
    let url = format!("{}/works/{}", api_base, paper_lookup_key(paper_id));
    let payload: WorkPayload = fetcher.fetch(&url, None).await?;
    Ok(payload.into_metadata(paper_id))
}

/// The last `/` segment of the identifier, used verbatim as the lookup key.
pub fn paper_lookup_key(paper_id: &str) -> &str {
    paper_id.rsplit('/').next().unwrap_or(paper_id)
}

#[derive(Debug, Deserialize)]
pub struct WorkPayload {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    authorships: Vec<Authorship>,
    #[serde(default)]
    publication_year: Option<i32>,
    #[serde(default)]
    primary_location: Option<PrimaryLocation>,
    #[serde(default)]
    host_venue: Option<DisplayNamed>,
}

#[derive(Debug, Deserialize)]
struct Authorship {
    #[serde(default)]
    author: Option<DisplayNamed>,
}

#[derive(Debug, Deserialize)]
struct DisplayNamed {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PrimaryLocation {
    #[serde(default)]
    source: Option<LocationSource>,
}

#[derive(Debug, Deserialize)]
struct LocationSource {
    #[serde(default)]
    publication_year: Option<i32>,
}

impl WorkPayload {
    pub fn into_metadata(self, paper_id: &str) -> PaperMetadata {
        let WorkPayload {
            display_name,
            authorships,
            publication_year,
            primary_location,
            host_venue,
        } = self;

        let authors = authorships
            .into_iter()
            .filter_map(|authorship| authorship.author.and_then(|author| author.display_name))
            .filter(|name| !name.is_empty())
            .collect();

        // A zero year counts as missing, same as an absent one.
        let published_year = publication_year.filter(|year| *year != 0).or_else(|| {
            primary_location
                .and_then(|location| location.source)
                .and_then(|source| source.publication_year)
        });

        PaperMetadata {
            paper_id: paper_id.to_string(),
            title: display_name.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            published_year,
            authors,
            venue: host_venue.and_then(|venue| venue.display_name),
        }
    }
}
