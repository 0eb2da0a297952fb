use url::Url;

use crate::models::{SearchIntent, WorkType};

/// Entry point of the catalog's search surface.
pub const SEARCH_BASE_URL: &str = "https://www.linkedin.com/jobs/search/";

/// Encode a search intent into a navigable URL.
///
/// Pure and total: every filter maps to exactly one query parameter in a
/// fixed order, so equal intents always produce byte-identical URLs.
pub fn build_search_url(intent: &SearchIntent) -> Url {
    let mut url = Url::parse(SEARCH_BASE_URL).expect("search base URL is valid");
    let options = &intent.options;

    let experience: String = options
        .experience_levels
        .iter()
        .map(|level| level.code())
        .collect::<Vec<_>>()
        .join(",");

    let work_type = options.work_type.unwrap_or(WorkType::Remote);

    url.query_pairs_mut()
        .append_pair("keywords", &intent.keywords)
        .append_pair("location", &intent.location)
        .append_pair("f_AL", if options.remote { "true" } else { "false" })
        .append_pair("f_E", &experience)
        .append_pair("f_JT", options.job_type.map(|t| t.code()).unwrap_or(""))
        .append_pair("f_WT", work_type.code())
        .append_pair("sortBy", options.sort_by.code())
        .append_pair("f_TPR", options.time_range.map(|t| t.code()).unwrap_or(""))
        .append_pair("position", "1")
        .append_pair("pageNum", "0");

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, FilterOptions, SortBy, TimeRange};

    fn intent() -> SearchIntent {
        SearchIntent {
            keywords: "systems analyst senior".to_string(),
            location: "Brazil".to_string(),
            options: FilterOptions {
                remote: true,
                experience_levels: vec![
                    ExperienceLevel::MidSenior,
                    ExperienceLevel::Director,
                    ExperienceLevel::Executive,
                ],
                job_type: None,
                work_type: None,
                sort_by: SortBy::MostRecent,
                time_range: Some(TimeRange::Last24h),
            },
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_search_url(&intent());
        let b = build_search_url(&intent());
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_build_maps_all_options() {
        let url = build_search_url(&intent());
        let query = url.query().unwrap();

        assert!(url.as_str().starts_with(SEARCH_BASE_URL));
        assert!(query.contains("keywords=systems+analyst+senior"));
        assert!(query.contains("location=Brazil"));
        assert!(query.contains("f_AL=true"));
        assert!(query.contains("f_E=4%2C5%2C6"));
        assert!(query.contains("f_TPR=r86400"));
        assert!(query.contains("sortBy=DD"));
        assert!(query.contains("position=1"));
        assert!(query.contains("pageNum=0"));
    }

    #[test]
    fn test_build_defaults() {
        let bare = SearchIntent {
            keywords: "rust".to_string(),
            location: "Remote".to_string(),
            options: FilterOptions::default(),
        };
        let url = build_search_url(&bare);
        let query = url.query().unwrap();

        // Catalog defaults: work type falls back to remote, sort to most
        // recent, everything else to empty values.
        assert!(query.contains("f_WT=2"));
        assert!(query.contains("sortBy=DD"));
        assert!(query.contains("f_AL=false"));
        assert!(query.contains("f_E=&"));
        assert!(query.contains("f_JT=&"));
    }
}
