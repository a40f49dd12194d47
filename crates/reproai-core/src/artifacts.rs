//! Placeholder artifact references.
//!
//! Nothing here is looked up yet: every report carries one fixed entry per
//! artifact kind, with only the model name echoing the repository.

use serde::{Deserialize, Serialize};

use crate::repository::RepositoryMetadata;

/// A flat record rendered as one table row, fields in column order.
pub trait ArtifactRecord {
    fn fields(&self) -> Vec<(&'static str, String)>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetArtifact {
    pub name: String,
    pub source: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub huggingface_model_id: String,
    pub downloads: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointArtifact {
    pub name: String,
    pub location: String,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactSet {
    pub datasets: Vec<DatasetArtifact>,
    pub models: Vec<ModelArtifact>,
    pub checkpoints: Vec<CheckpointArtifact>,
}

impl ArtifactRecord for DatasetArtifact {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("source", self.source.clone()),
            ("url", self.url.clone()),
        ]
    }
}

impl ArtifactRecord for ModelArtifact {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("huggingface_model_id", self.huggingface_model_id.clone()),
            ("downloads", self.downloads.to_string()),
        ]
    }
}

impl ArtifactRecord for CheckpointArtifact {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("location", self.location.clone()),
            ("sha256", self.sha256.clone()),
        ]
    }
}

pub fn build_artifacts(repo: &RepositoryMetadata) -> ArtifactSet {
    ArtifactSet {
        datasets: vec![DatasetArtifact {
            name: "Example Dataset".to_string(),
            source: "openalex".to_string(),
            url: "https://example.org/dataset".to_string(),
        }],
        models: vec![ModelArtifact {
            name: repo.github_id.clone(),
            huggingface_model_id: "org/model".to_string(),
            downloads: 0,
        }],
        checkpoints: vec![CheckpointArtifact {
            name: "checkpoint-v1".to_string(),
            location: "s3://bucket/checkpoints/checkpoint-v1.pt".to_string(),
            sha256: "<hash>".to_string(),
        }],
    }
}
