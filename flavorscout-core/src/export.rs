use crate::record::ResultRecord;
use anyhow::Result;
use csv::Writer;
use std::sync::Mutex;
use tracing::debug;

/// CSV column order, mirrored by `render_csv` rows.
pub const CSV_HEADER: [&str; 5] = ["Flavor", "Description", "Keywords", "Categories", "Source"];

/// Render records as CSV: header row plus one row per record, keyword and
/// category lists comma-joined.
pub fn render_csv(records: &[ResultRecord]) -> Result<String> {
    debug!("Rendering {} records to CSV", records.len());

    let mut writer = Writer::from_writer(vec![]);
    writer.write_record(CSV_HEADER)?;
    for record in records {
        let keywords = record.keywords_joined();
        let categories = record.categories_joined();
        writer.write_record([
            record.flavor.as_str(),
            record.description.as_str(),
            keywords.as_str(),
            categories.as_str(),
            record.source.as_str(),
        ])?;
    }

    let bytes = writer.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

pub fn render_json(records: &[ResultRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Plain-text report for terminal display, one section per flavor.
pub fn generate_report(brand: &str, records: &[ResultRecord]) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str(&format!("# Results for {}\n", brand));
    report.push_str(&format!("  Flavors resolved: {}\n", records.len()));

    let found = records.iter().filter(|r| r.source != crate::record::SOURCE_SENTINEL).count();
    report.push_str(&format!("  Descriptions found: {}\n", found));

    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for record in records {
        report.push_str(&format!("## {}\n", record.flavor));
        report.push_str(&format!("  Description: {}\n", record.description));
        report.push_str(&format!("  Keywords:    {}\n", record.keywords_joined()));
        report.push_str(&format!("  Categories:  {}\n", record.categories_joined()));
        report.push_str(&format!("  Source:      {}\n\n", record.source));
    }

    report
}

/// Single-slot cache for the most recent run's CSV. Set on each successful
/// run, read on demand, empty before the first run. Holds one export only.
#[derive(Debug, Default)]
pub struct ExportCache {
    slot: Mutex<Option<String>>,
}

impl ExportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, csv: String) {
        *self.slot.lock().unwrap() = Some(csv);
    }

    /// The most recent export, or `None` before any run completed.
    pub fn latest(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{DESCRIPTION_SENTINEL, SOURCE_SENTINEL};

    fn sample_records() -> Vec<ResultRecord> {
        vec![
            ResultRecord {
                flavor: "mango".to_string(),
                description: "A cool mango ice flavor".to_string(),
                keywords: vec!["cool".into(), "mango".into(), "ice".into()],
                categories: vec!["cool".into(), "fruit".into()],
                source: "http://shop.example/product/mango".to_string(),
            },
            ResultRecord {
                flavor: "durian".to_string(),
                description: DESCRIPTION_SENTINEL.to_string(),
                keywords: vec![],
                categories: vec![],
                source: SOURCE_SENTINEL.to_string(),
            },
        ]
    }

    #[test]
    fn test_csv_header_and_rows() {
        let csv = render_csv(&sample_records()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next(),
            Some("Flavor,Description,Keywords,Categories,Source")
        );
        assert_eq!(
            lines.next(),
            Some("mango,A cool mango ice flavor,\"cool, mango, ice\",\"cool, fruit\",http://shop.example/product/mango")
        );
        assert_eq!(lines.next(), Some("durian,not found,,,N/A"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_of_empty_run_is_header_only() {
        let csv = render_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "Flavor,Description,Keywords,Categories,Source");
    }

    #[test]
    fn test_json_round_trips() {
        let json = render_json(&sample_records()).unwrap();
        let parsed: Vec<ResultRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_records());
    }

    #[test]
    fn test_report_contains_sections() {
        let report = generate_report("Acme Vapes", &sample_records());
        assert!(report.contains("# Results for Acme Vapes"));
        assert!(report.contains("## mango"));
        assert!(report.contains("Keywords:    cool, mango, ice"));
        assert!(report.contains("## durian"));
        assert!(report.contains("Description: not found"));
    }

    #[test]
    fn test_export_cache_lifecycle() {
        let cache = ExportCache::new();
        assert_eq!(cache.latest(), None);

        cache.store("first".to_string());
        assert_eq!(cache.latest().as_deref(), Some("first"));

        // Only the most recent run is retained.
        cache.store("second".to_string());
        assert_eq!(cache.latest().as_deref(), Some("second"));
    }
}
