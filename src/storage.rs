use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::error::ScrapeError;
use crate::models::{JobCollection, JobRecord};

/// Envelope written to the persistence sink.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionExport<'a> {
    timestamp: String,
    total_jobs: usize,
    jobs: &'a [JobRecord],
}

/// Persist the collection as pretty-printed JSON.
pub fn write_json(path: &Path, collection: &JobCollection) -> Result<(), ScrapeError> {
    let export = CollectionExport {
        timestamp: Local::now().to_rfc3339(),
        total_jobs: collection.len(),
        jobs: collection.records(),
    };

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(path, json)?;

    log::info!("saved {} jobs to {}", collection.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str) -> JobRecord {
        JobRecord {
            title: "Dev".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            link: link.to_string(),
            posted_date: "Recent".to_string(),
            platform: "LinkedIn".to_string(),
            captured_at: "2026-01-01T00:00:00+00:00".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_export_envelope_shape() {
        let collection: JobCollection =
            vec![record("https://x.com/j/1"), record("https://x.com/j/2")]
                .into_iter()
                .collect();

        let export = CollectionExport {
            timestamp: Local::now().to_rfc3339(),
            total_jobs: collection.len(),
            jobs: collection.records(),
        };
        let json = serde_json::to_value(&export).unwrap();

        assert!(json.get("timestamp").is_some());
        assert_eq!(json["totalJobs"], 2);
        assert_eq!(json["jobs"].as_array().unwrap().len(), 2);
        assert_eq!(json["jobs"][0]["platform"], "LinkedIn");
    }

    #[test]
    fn test_write_json_roundtrip() {
        let dir = std::env::temp_dir().join("linkedin-jobs-scraper-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("jobs.json");

        let collection: JobCollection = vec![record("https://x.com/j/1")].into_iter().collect();
        write_json(&path, &collection).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["totalJobs"], 1);

        std::fs::remove_file(&path).ok();
    }
}
