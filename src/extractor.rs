use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::{JobRecord, RawListing};
use crate::selectors::JobSelectors;

/// Extracts job records from a rendered page snapshot.
///
/// Every lookup runs through the fallback lists in [`JobSelectors`]: the
/// first strategy that yields a value wins. A malformed card never aborts
/// extraction of the remaining cards.
pub struct JobExtractor {
    selectors: JobSelectors,
}

impl JobExtractor {
    pub fn new() -> Self {
        Self {
            selectors: JobSelectors::default(),
        }
    }

    pub fn with_selectors(selectors: JobSelectors) -> Self {
        Self { selectors }
    }

    /// Extract all emittable records from a snapshot, in document order.
    ///
    /// A candidate is emitted only when title, company and link all
    /// resolve; skeleton cards are dropped silently.
    pub fn extract(&self, html: &str, base_url: &Url) -> Vec<JobRecord> {
        let document = Html::parse_document(html);

        let Some(card_selector) = self.probe_card_selector(&document) else {
            log::debug!("no job cards found on {}", base_url);
            return Vec::new();
        };

        let mut records = Vec::new();
        for card in document.select(&card_selector) {
            match self.extract_card(&card, base_url) {
                Some(record) => records.push(record),
                None => log::debug!("skipping incomplete card on {}", base_url),
            }
        }

        records
    }

    /// Pick the first card selector that matches anything in the snapshot.
    fn probe_card_selector(&self, document: &Html) -> Option<Selector> {
        for raw in &self.selectors.card {
            match Selector::parse(raw) {
                Ok(selector) => {
                    if document.select(&selector).next().is_some() {
                        return Some(selector);
                    }
                }
                Err(e) => log::warn!("invalid card selector {:?}: {}", raw, e),
            }
        }
        None
    }

    fn extract_card(&self, card: &ElementRef, base_url: &Url) -> Option<JobRecord> {
        let raw = RawListing {
            title: self.first_text(card, &self.selectors.title),
            company: self.first_text(card, &self.selectors.company),
            location: self.first_text(card, &self.selectors.location),
            link: self.first_attr(card, &self.selectors.link, "href"),
            posted_date: self.first_text(card, &self.selectors.posted_date),
        };

        let record = JobRecord::normalize(raw, base_url)?;
        if record.title.is_empty() || record.company.is_empty() {
            return None;
        }
        Some(record)
    }

    /// Extract the description from a job detail page snapshot.
    pub fn extract_description(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        for raw in &self.selectors.description {
            let Ok(selector) = Selector::parse(raw) else {
                log::warn!("invalid description selector {:?}", raw);
                continue;
            };
            if let Some(element) = document.select(&selector).next() {
                let text: String = element.text().collect();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// First non-empty text content across the fallback selectors.
    fn first_text(&self, scope: &ElementRef, selectors: &[String]) -> Option<String> {
        for raw in selectors {
            let Ok(selector) = Selector::parse(raw) else {
                log::warn!("invalid selector {:?}", raw);
                continue;
            };
            if let Some(element) = scope.select(&selector).next() {
                let text: String = element.text().collect();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }

    /// First non-empty attribute value across the fallback selectors.
    fn first_attr(&self, scope: &ElementRef, selectors: &[String], attr: &str) -> Option<String> {
        for raw in selectors {
            let Ok(selector) = Selector::parse(raw) else {
                log::warn!("invalid selector {:?}", raw);
                continue;
            };
            for element in scope.select(&selector) {
                if let Some(value) = element.value().attr(attr) {
                    if !value.trim().is_empty() {
                        return Some(value.to_string());
                    }
                }
            }
        }
        None
    }
}

impl Default for JobExtractor {
    fn default() -> Self {
        Self::new()
    }
}
