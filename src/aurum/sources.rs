// ABOUTME: Source catalog retrieval from GET /user/v2/users/{userId}/sources
// ABOUTME: Per-cycle catalog indexed by source type, first entry of a type wins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MijnAurum Collector Contributors

use std::collections::HashMap;

use mijnaurum_core::constants::{endpoints, operations};
use mijnaurum_core::models::{Session, Source, SourcesResponse};
use mijnaurum_core::{CollectorError, CollectorResult};
use tracing::{debug, warn};

use super::api_client::AurumApiClient;

impl AurumApiClient {
    /// Fetch every metering source of the account, in service order
    ///
    /// # Errors
    ///
    /// - `Transport` / `UnexpectedStatus` when the call fails
    /// - `Decode` when the body is not a `{"sources": [...]}` envelope
    pub async fn fetch_sources(&self, session: &Session) -> CollectorResult<Vec<Source>> {
        let url = self.user_url(session, endpoints::SOURCES);
        let body = self
            .get_authenticated(operations::SOURCES, session, &url)
            .await?;

        let parsed: SourcesResponse = serde_json::from_str(&body)
            .map_err(|e| CollectorError::decode(operations::SOURCES, &e))?;

        debug!(sources = parsed.sources.len(), "Fetched source catalog");
        Ok(parsed.sources)
    }
}

/// Source catalog of one gather cycle
///
/// Lookup by type keeps the first source of each type. Later sources of the
/// same type stay in the catalog (they still take part in the actuals filter)
/// but never donate metadata.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    sources: Vec<Source>,
    by_type: HashMap<String, usize>,
    duplicates: usize,
}

impl SourceCatalog {
    /// Index a freshly fetched catalog
    #[must_use]
    pub fn new(sources: Vec<Source>) -> Self {
        let mut by_type = HashMap::with_capacity(sources.len());
        let mut duplicates = 0;

        for (idx, source) in sources.iter().enumerate() {
            if let Some(&first) = by_type.get(&source.source_type) {
                duplicates += 1;
                let kept: &Source = &sources[first];
                warn!(
                    source_type = %source.source_type,
                    kept = %kept.source_id,
                    ignored = %source.source_id,
                    "Duplicate source type in catalog, keeping the first"
                );
                continue;
            }
            by_type.insert(source.source_type.clone(), idx);
        }

        Self {
            sources,
            by_type,
            duplicates,
        }
    }

    /// First source of the given type
    #[must_use]
    pub fn find_by_type(&self, source_type: &str) -> Option<&Source> {
        self.by_type
            .get(source_type)
            .and_then(|&idx| self.sources.get(idx))
    }

    /// Comma-joined ids of every source, in catalog order
    #[must_use]
    pub fn source_filter(&self) -> String {
        source_filter(&self.sources)
    }

    /// All sources, in catalog order
    #[must_use]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Number of sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the account has no sources
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of sources shadowed by an earlier source of the same type
    #[must_use]
    pub const fn duplicate_types(&self) -> usize {
        self.duplicates
    }
}

/// Comma-joined source ids, order preserved, no escaping
#[must_use]
pub fn source_filter(sources: &[Source]) -> String {
    sources
        .iter()
        .map(|source| source.source_id.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
