// Record assembly: raw items and stored records through normalization into the store
use crate::extractor::{TokenClassifier, extract_skills};
use crate::model::{BackfillSummary, IngestSummary, JobRecord, PipelineError, RawJobItem};
use crate::normalizer::{SalaryNormalizer, resolve_country};
use crate::parser::Parser;
use crate::storage::JobStore;
use crate::utils::{collapse_whitespace, parse_posted_date};
use serde_json::Value;
use std::fmt::Display;
use tracing::{error, info, warn};

/// Builds canonical job records and writes them to the store, one at a time.
pub struct RecordAssembler<'a> {
    classifier: &'a dyn TokenClassifier,
    store: &'a dyn JobStore,
    salary: SalaryNormalizer,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(
        classifier: &'a dyn TokenClassifier,
        store: &'a dyn JobStore,
        strict_salary_check: bool,
    ) -> Self {
        Self {
            classifier,
            store,
            salary: SalaryNormalizer::new(strict_salary_check),
        }
    }

    /// Normalizes a scraped item into a record without persisting it.
    pub async fn build_record(&self, item: &RawJobItem) -> JobRecord {
        let description = collapse_whitespace(item.description.as_deref().unwrap_or_default());
        let label = item.url.as_deref().unwrap_or("<no url>");
        let skills = self.skills_for(label, &description).await;

        let salary = item
            .salary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let posted_date = item.posted.as_deref().and_then(|raw| {
            let parsed = parse_posted_date(raw);
            if parsed.is_none() {
                warn!("Failed to parse date '{}' for {}", raw, label);
            }
            parsed
        });

        JobRecord {
            title: item.title.clone().unwrap_or_default(),
            description,
            location: item.location.clone().unwrap_or_default(),
            country: resolve_country(item.location.as_deref()),
            company: item.company.clone().unwrap_or_default(),
            posted_date,
            salary_annual: self.salary.normalize(salary),
            url: item.url.clone().unwrap_or_default(),
            skills,
        }
    }

    /// Builds and inserts one record, returning its id.
    pub async fn ingest(&self, item: &RawJobItem) -> Result<i64, PipelineError> {
        let record = self.build_record(item).await;
        let id = self.store.insert_job(&record)?;
        info!(
            "Inserted: {} | {} | Salary: {:?} | {} skills",
            record.title,
            record.company,
            record.salary_annual,
            record.skills.len()
        );
        Ok(id)
    }

    /// Parses and ingests a batch of dataset items. Failed items are logged and counted.
    pub async fn ingest_items(
        &self,
        source: &str,
        items: &[Value],
        parser: &dyn Parser,
    ) -> IngestSummary {
        let mut summary = IngestSummary::default();

        for item in items {
            summary.processed += 1;
            let raw = match parser.parse(item) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping item from {}: {}", source, e);
                    summary.failed += 1;
                    continue;
                }
            };
            match self.ingest(&raw).await {
                Ok(_) => summary.inserted += 1,
                Err(e) => {
                    error!("Failed to store item from {}: {}", source, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Source {} done: {} processed, {} inserted, {} failed",
            source, summary.processed, summary.inserted, summary.failed
        );
        summary
    }

    /// Fills `Skills` on stored records that have a description but no skills yet.
    ///
    /// Records where nothing is found are left untouched.
    pub async fn backfill(&self) -> Result<BackfillSummary, PipelineError> {
        let jobs = self.store.find_missing_skills()?;
        let mut summary = BackfillSummary {
            total: jobs.len(),
            ..Default::default()
        };
        info!("Found {} documents missing skills.", summary.total);

        for job in jobs {
            let skills = self.skills_for(job.id, &job.record.description).await;
            if skills.is_empty() {
                warn!("No skills found for id {}", job.id);
                summary.skipped += 1;
                continue;
            }

            match self.store.update_skills(job.id, &skills) {
                Ok(true) => {
                    info!("Updated id {} with {} skills.", job.id, skills.len());
                    summary.updated += 1;
                }
                Ok(false) => {
                    warn!("Id {} already has skills, left as is", job.id);
                    summary.skipped += 1;
                }
                Err(e) => {
                    error!("Failed to update id {}: {}", job.id, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Backfill done. Total documents updated: {} / {}",
            summary.updated, summary.total
        );
        Ok(summary)
    }

    /// Skill extraction for one document; model failures degrade to no skills.
    async fn skills_for(&self, doc: impl Display, text: &str) -> Vec<String> {
        match extract_skills(self.classifier, text).await {
            Ok(skills) => skills,
            Err(e) => {
                warn!("Skill extraction failed for {}: {}", doc, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Provider;
    use crate::extractor::testing::LexiconClassifier;
    use crate::model::{StorageError, StoredJob};
    use crate::parser::ItemParser;
    use crate::storage::SqliteStorage;
    use chrono::NaiveDate;
    use serde_json::json;

    const TAGS: &[(&str, &'static str)] = &[
        ("python", "B"),
        ("sql", "B"),
        ("machine", "B"),
        ("learning", "I"),
    ];

    fn item(description: &str, salary: &str) -> RawJobItem {
        RawJobItem {
            title: Some("Data Scientist".into()),
            description: Some(description.into()),
            location: Some("Boston, MA".into()),
            company: Some("Initech".into()),
            posted: Some("2025-06-03T12:00:00Z".into()),
            salary: Some(salary.into()),
            url: Some("https://jobs.example/ds".into()),
        }
    }

    /// Store whose writes always fail.
    struct BrokenStore;

    impl JobStore for BrokenStore {
        fn insert_job(&self, _: &JobRecord) -> Result<i64, StorageError> {
            Err(StorageError::NotFound(0))
        }
        fn find_missing_skills(&self) -> Result<Vec<StoredJob>, StorageError> {
            Ok(vec![StoredJob {
                id: 7,
                record: JobRecord {
                    description: "python".into(),
                    ..Default::default()
                },
            }])
        }
        fn update_skills(&self, id: i64, _: &[String]) -> Result<bool, StorageError> {
            Err(StorageError::NotFound(id))
        }
        fn get_all_jobs(&self) -> Result<Vec<JobRecord>, StorageError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn builds_canonical_record() {
        let classifier = LexiconClassifier::new(512, TAGS);
        let store = SqliteStorage::new(":memory:").unwrap();
        let assembler = RecordAssembler::new(&classifier, &store, true);

        let record = assembler
            .build_record(&item("  We want\n python ,  sql and machine learning \t", "$45/hour"))
            .await;

        assert_eq!(record.description, "We want python , sql and machine learning");
        assert_eq!(record.skills, vec!["python", "sql", "machine learning"]);
        assert_eq!(record.salary_annual, Some(93_600));
        assert_eq!(record.location, "Boston, MA");
        assert_eq!(record.country, "United States");
        assert_eq!(record.posted_date, NaiveDate::from_ymd_opt(2025, 6, 3));
        assert_eq!(record.date_field().as_deref(), Some("03-06-2025"));
    }

    #[tokio::test]
    async fn missing_fields_fall_back() {
        let classifier = LexiconClassifier::new(512, TAGS);
        let store = SqliteStorage::new(":memory:").unwrap();
        let assembler = RecordAssembler::new(&classifier, &store, true);

        let record = assembler.build_record(&RawJobItem::default()).await;
        assert_eq!(record.country, "Unknown");
        assert!(record.skills.is_empty());
        assert_eq!(record.salary_annual, None);
        assert_eq!(record.posted_date, None);
        assert_eq!(classifier.calls(), 0);

        let odd = RawJobItem {
            posted: Some("yesterday".into()),
            salary: Some("  ".into()),
            ..RawJobItem::default()
        };
        let record = assembler.build_record(&odd).await;
        assert_eq!(record.posted_date, None);
        assert_eq!(record.salary_annual, None);
    }

    #[tokio::test]
    async fn oracle_failure_yields_no_skills_but_record_is_stored() {
        let classifier = LexiconClassifier::failing();
        let store = SqliteStorage::new(":memory:").unwrap();
        let assembler = RecordAssembler::new(&classifier, &store, true);

        let id = assembler.ingest(&item("python", "90000")).await.unwrap();
        let stored = store.get_job(id).unwrap();
        assert!(stored.record.skills.is_empty());
        assert_eq!(stored.record.salary_annual, Some(90_000));
    }

    #[tokio::test]
    async fn ingest_items_counts_outcomes() {
        let classifier = LexiconClassifier::new(512, TAGS);
        let store = SqliteStorage::new(":memory:").unwrap();
        let assembler = RecordAssembler::new(&classifier, &store, true);
        let items = vec![
            json!({"positionName": "Data Engineer", "description": "sql", "location": "Lyon, France"}),
            json!("not an object"),
            json!({"positionName": "Analyst", "salary": "2000 a month"}),
        ];

        let summary = assembler
            .ingest_items("indeed", &items, &ItemParser::new(Provider::Indeed))
            .await;
        assert_eq!(summary, IngestSummary { processed: 3, inserted: 2, failed: 1 });

        let jobs = store.get_all_jobs().unwrap();
        assert_eq!(jobs[0].country, "France");
        assert_eq!(jobs[0].skills, vec!["sql"]);
        assert_eq!(jobs[1].salary_annual, Some(24_000));
    }

    #[tokio::test]
    async fn persistence_failures_are_counted_not_fatal() {
        let classifier = LexiconClassifier::new(512, TAGS);
        let assembler = RecordAssembler::new(&classifier, &BrokenStore, true);

        assert!(matches!(
            assembler.ingest(&item("python", "")).await,
            Err(PipelineError::Storage(_))
        ));

        let items = vec![json!({"title": "a"}), json!({"title": "b"})];
        let summary = assembler
            .ingest_items("linkedin", &items, &ItemParser::new(Provider::LinkedIn))
            .await;
        assert_eq!(summary.failed, 2);

        let backfill = assembler.backfill().await.unwrap();
        assert_eq!(backfill, BackfillSummary { total: 1, updated: 0, skipped: 0, failed: 1 });
    }

    #[tokio::test]
    async fn backfill_sets_skills_only_when_found() {
        let classifier = LexiconClassifier::new(512, TAGS);
        let store = SqliteStorage::new(":memory:").unwrap();
        let assembler = RecordAssembler::new(&classifier, &store, true);

        let blank = |description: &str| JobRecord {
            title: "t".into(),
            description: description.into(),
            country: "Unknown".into(),
            ..Default::default()
        };
        let hit = store.insert_job(&blank("strong python and sql")).unwrap();
        let miss = store.insert_job(&blank("team player")).unwrap();
        let done = store
            .insert_job(&JobRecord {
                skills: vec!["Excel".into()],
                ..blank("python")
            })
            .unwrap();

        let summary = assembler.backfill().await.unwrap();
        assert_eq!(summary, BackfillSummary { total: 2, updated: 1, skipped: 1, failed: 0 });

        assert_eq!(store.get_job(hit).unwrap().record.skills, vec!["python", "sql"]);
        assert!(store.get_job(miss).unwrap().record.skills.is_empty());
        assert_eq!(store.get_job(done).unwrap().record.skills, vec!["Excel"]);

        // second pass only revisits the record that had nothing
        let again = assembler.backfill().await.unwrap();
        assert_eq!(again.total, 1);
        assert_eq!(again.updated, 0);
    }
}
