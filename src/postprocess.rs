use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::JobCollection;

/// Collapse repeated observations of the same listing.
///
/// Keyed by `link`, one pass, first-seen order preserved: when two records
/// share a link the earlier one is kept and the later one dropped.
pub fn deduplicate(collection: &JobCollection) -> JobCollection {
    let mut seen = HashSet::new();
    let deduped: JobCollection = collection
        .iter()
        .filter(|record| seen.insert(record.link.clone()))
        .cloned()
        .collect();

    let dropped = collection.len() - deduped.len();
    if dropped > 0 {
        log::info!("removed {} duplicate listings", dropped);
    }
    deduped
}

/// Declarative record filters, combined with logical AND.
///
/// Absent criteria impose no restriction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobFilters {
    /// Keep records where ANY whitespace-separated keyword matches the
    /// title, company or description, case-insensitively.
    pub keywords: Option<String>,
    /// Exact company names, case-insensitive.
    pub companies: Option<Vec<String>>,
    /// Substring match on location, case-insensitive.
    pub location: Option<String>,
}

impl JobFilters {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_none() && self.companies.is_none() && self.location.is_none()
    }
}

/// Apply filters, returning a new collection.
pub fn filter(collection: &JobCollection, filters: &JobFilters) -> JobCollection {
    let keywords: Option<Vec<String>> = filters
        .keywords
        .as_ref()
        .map(|k| k.to_lowercase().split_whitespace().map(String::from).collect())
        .filter(|tokens: &Vec<String>| !tokens.is_empty());
    let companies: Option<Vec<String>> = filters
        .companies
        .as_ref()
        .map(|list| list.iter().map(|c| c.to_lowercase()).collect());
    let location = filters.location.as_ref().map(|l| l.to_lowercase());

    collection
        .iter()
        .filter(|record| {
            if let Some(keywords) = &keywords {
                let title = record.title.to_lowercase();
                let company = record.company.to_lowercase();
                let description = record
                    .description
                    .as_ref()
                    .map(|d| d.to_lowercase())
                    .unwrap_or_default();
                let hit = keywords.iter().any(|k| {
                    title.contains(k) || company.contains(k) || description.contains(k)
                });
                if !hit {
                    return false;
                }
            }

            if let Some(companies) = &companies {
                if !companies.contains(&record.company.to_lowercase()) {
                    return false;
                }
            }

            if let Some(location) = &location {
                if !record.location.to_lowercase().contains(location) {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect()
}
