use chrono::Local;
use serde::{Deserialize, Serialize};
use url::Url;

/// Source catalog tag stamped on every record.
pub const PLATFORM: &str = "LinkedIn";

/// Sentinel used when a card carries no location.
pub const LOCATION_FALLBACK: &str = "Not specified";

/// Sentinel used when a card carries no posting date.
pub const POSTED_FALLBACK: &str = "Recent";

/// A single job listing as captured from the catalog.
///
/// Immutable once created; `link` is the deduplication identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub posted_date: String,
    pub platform: String,
    pub captured_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Raw field values assembled from a candidate card before normalization.
#[derive(Debug, Default)]
pub struct RawListing {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub posted_date: Option<String>,
}

impl JobRecord {
    /// Normalize raw card fields into a record.
    ///
    /// Whitespace-only values count as absent. A missing or unresolvable
    /// link rejects the candidate, since without it the record has no
    /// identity. Every other field degrades to a default instead.
    pub fn normalize(raw: RawListing, base_url: &Url) -> Option<JobRecord> {
        let link = resolve_link(presence(raw.link)?, base_url)?;

        Some(JobRecord {
            title: presence(raw.title).unwrap_or_default(),
            company: presence(raw.company).unwrap_or_default(),
            location: presence(raw.location).unwrap_or_else(|| LOCATION_FALLBACK.to_string()),
            link,
            posted_date: presence(raw.posted_date).unwrap_or_else(|| POSTED_FALLBACK.to_string()),
            platform: PLATFORM.to_string(),
            captured_at: Local::now().to_rfc3339(),
            description: None,
        })
    }

    /// Returns a copy of this record carrying the given description.
    pub fn with_description(self, description: String) -> JobRecord {
        JobRecord {
            description: Some(description),
            ..self
        }
    }
}

fn presence(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn resolve_link(href: String, base_url: &Url) -> Option<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Url::parse(&href).ok().map(|u| u.to_string());
    }
    base_url.join(&href).ok().map(|u| u.to_string())
}

/// One search request: keywords plus location plus catalog filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIntent {
    pub keywords: String,
    pub location: String,
    #[serde(default)]
    pub options: FilterOptions,
}

/// Catalog-side search filters.
///
/// Absent options fall back to the catalog defaults (empty parameter
/// values), never to an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub remote: bool,
    pub experience_levels: Vec<ExperienceLevel>,
    pub job_type: Option<JobType>,
    pub work_type: Option<WorkType>,
    pub sort_by: SortBy,
    pub time_range: Option<TimeRange>,
}

// The catalog codes below are opaque; the variant names follow the
// meanings documented on the original search UI, nothing more.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Internship,
    EntryLevel,
    Associate,
    MidSenior,
    Director,
    Executive,
}

impl ExperienceLevel {
    pub fn code(&self) -> &'static str {
        match self {
            ExperienceLevel::Internship => "1",
            ExperienceLevel::EntryLevel => "2",
            ExperienceLevel::Associate => "3",
            ExperienceLevel::MidSenior => "4",
            ExperienceLevel::Director => "5",
            ExperienceLevel::Executive => "6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Temporary,
    Internship,
}

impl JobType {
    pub fn code(&self) -> &'static str {
        match self {
            JobType::FullTime => "F",
            JobType::PartTime => "P",
            JobType::Contract => "C",
            JobType::Temporary => "T",
            JobType::Internship => "I",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkType {
    OnSite,
    Remote,
    Hybrid,
}

impl WorkType {
    pub fn code(&self) -> &'static str {
        match self {
            WorkType::OnSite => "1",
            WorkType::Remote => "2",
            WorkType::Hybrid => "3",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    #[default]
    MostRecent,
    MostRelevant,
}

impl SortBy {
    pub fn code(&self) -> &'static str {
        match self {
            SortBy::MostRecent => "DD",
            SortBy::MostRelevant => "R",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "last-24h")]
    Last24h,
    #[serde(rename = "last-week")]
    LastWeek,
    #[serde(rename = "last-month")]
    LastMonth,
}

impl TimeRange {
    pub fn code(&self) -> &'static str {
        match self {
            TimeRange::Last24h => "r86400",
            TimeRange::LastWeek => "r604800",
            TimeRange::LastMonth => "r2592000",
        }
    }
}

/// Ordered, append-only collection of captured records.
///
/// Owned by the crawl orchestrator; post-processing builds new collections
/// rather than mutating this one in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobCollection(Vec<JobRecord>);

impl JobCollection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn append(&mut self, records: Vec<JobRecord>) {
        self.0.extend(records);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobRecord> {
        self.0.iter()
    }

    pub fn into_records(self) -> Vec<JobRecord> {
        self.0
    }
}

impl FromIterator<JobRecord> for JobCollection {
    fn from_iter<T: IntoIterator<Item = JobRecord>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<JobRecord>> for JobCollection {
    fn from(records: Vec<JobRecord>) -> Self {
        Self(records)
    }
}
