use serde::{Deserialize, Serialize};

/// Ordered fallback selectors per semantic field.
///
/// The catalog's markup drifts between releases, so every field carries a
/// list of selectors tried in order until one matches. Current classes come
/// first; guest-page and legacy markers follow as fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSelectors {
    pub card: Vec<String>,
    pub title: Vec<String>,
    pub company: Vec<String>,
    pub location: Vec<String>,
    pub link: Vec<String>,
    pub posted_date: Vec<String>,
    pub description: Vec<String>,
}

impl Default for JobSelectors {
    fn default() -> Self {
        Self {
            card: vec![
                ".job-search-card".to_string(),
                "[data-entity-urn*='jobPosting']".to_string(),
                "li.jobs-search-results__list-item".to_string(),
            ],
            title: vec![
                ".job-card-list__title".to_string(),
                "[class*='job-title']".to_string(),
                "h3.base-search-card__title".to_string(),
            ],
            company: vec![
                ".job-card-container__company-name".to_string(),
                "[class*='company-name']".to_string(),
                "h4.base-search-card__subtitle".to_string(),
            ],
            location: vec![
                ".job-card-container__metadata-item".to_string(),
                ".job-search-card__location".to_string(),
                "[class*='location']".to_string(),
            ],
            link: vec![
                "a.base-card__full-link".to_string(),
                "a[href*='/jobs/view/']".to_string(),
                "a[href]".to_string(),
            ],
            posted_date: vec![
                ".job-card-container__listed-time".to_string(),
                "time".to_string(),
            ],
            description: vec![
                ".jobs-description__content".to_string(),
                ".description__text".to_string(),
                ".show-more-less-html__markup".to_string(),
                "#job-details".to_string(),
            ],
        }
    }
}
