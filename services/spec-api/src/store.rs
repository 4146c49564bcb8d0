//! Specification Repository
//!
//! In-memory storage for parsed specification records. Lost on restart.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use trimflow_models::{ExportRecord, ParseResult, SpecRecord, SpecSummary, TrimMatch};
use trimflow_utils::{TrimflowError, TrimflowResult};

#[derive(Clone, Default)]
pub struct SpecRepository {
    records: Arc<RwLock<HashMap<Uuid, SpecRecord>>>,
}

impl SpecRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new record in the uploaded state
    pub async fn create(&self, filename: &str, file_type: &str, file_size: usize) -> SpecRecord {
        let record = SpecRecord::new(filename, file_type, file_size);
        self.records.write().await.insert(record.id, record.clone());
        record
    }

    /// Attach parsed data to an existing record
    pub async fn save_parsed(&self, id: Uuid, result: ParseResult) -> TrimflowResult<SpecRecord> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| not_found(id))?;
        record.save_parsed(result);
        Ok(record.clone())
    }

    pub async fn find_by_id(&self, id: Uuid) -> TrimflowResult<SpecRecord> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Summaries, most recently uploaded first
    pub async fn list(&self, limit: usize, offset: usize) -> Vec<SpecSummary> {
        let mut summaries: Vec<SpecSummary> = self
            .records
            .read()
            .await
            .values()
            .map(SpecRecord::summary)
            .collect();

        summaries.sort_by(|a, b| {
            b.uploaded_at
                .cmp(&a.uploaded_at)
                .then_with(|| a.filename.cmp(&b.filename))
        });
        summaries.into_iter().skip(offset).take(limit).collect()
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn delete(&self, id: Uuid) -> TrimflowResult<()> {
        self.records
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    pub async fn record_export(&self, id: Uuid, export: ExportRecord) -> TrimflowResult<()> {
        let mut records = self.records.write().await;
        let record = records.get_mut(&id).ok_or_else(|| not_found(id))?;
        record.record_export(export);
        Ok(())
    }

    pub async fn export_history(&self, id: Uuid) -> TrimflowResult<Vec<ExportRecord>> {
        Ok(self.find_by_id(id).await?.export_history())
    }

    /// Search trims by number or description, across every record or one.
    pub async fn search_trims(
        &self,
        term: &str,
        spec_id: Option<Uuid>,
    ) -> TrimflowResult<Vec<TrimMatch>> {
        let records = self.records.read().await;
        match spec_id {
            Some(id) => records
                .get(&id)
                .map(|record| record.search_trims(term))
                .ok_or_else(|| not_found(id)),
            None => {
                let mut matches: Vec<TrimMatch> = records
                    .values()
                    .flat_map(|record| record.search_trims(term))
                    .collect();
                matches.sort_by(|a, b| {
                    a.filename
                        .cmp(&b.filename)
                        .then_with(|| a.trim.number.cmp(&b.trim.number))
                });
                Ok(matches)
            }
        }
    }
}

fn not_found(id: Uuid) -> TrimflowError {
    TrimflowError::not_found(format!("Specification {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trimflow_models::{SpecStatus, Trim};

    fn result_with(trims: &[(&str, &str)]) -> ParseResult {
        ParseResult {
            trims: trims
                .iter()
                .map(|(number, description)| Trim::new(*number, *description))
                .collect(),
            ..ParseResult::default()
        }
    }

    #[tokio::test]
    async fn test_create_and_save_parsed() {
        let repo = SpecRepository::new();
        let record = repo.create("jacket.txt", "txt", 512).await;
        assert_eq!(record.status, SpecStatus::Uploaded);

        let saved = repo
            .save_parsed(record.id, result_with(&[("123456", "YKK Zipper")]))
            .await
            .unwrap();
        assert_eq!(saved.status, SpecStatus::Parsed);
        assert_eq!(saved.stats.total_trims, 1);

        let found = repo.find_by_id(record.id).await.unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_missing_record() {
        let repo = SpecRepository::new();
        let id = Uuid::new_v4();

        assert_eq!(repo.find_by_id(id).await.unwrap_err().error_code(), "NOT_FOUND");
        assert!(repo.delete(id).await.is_err());
        assert!(repo.save_parsed(id, ParseResult::default()).await.is_err());
        assert!(repo
            .record_export(id, ExportRecord::new("trims", "xlsx", "t.xlsx", 1))
            .await
            .is_err());
        assert!(repo.search_trims("zip", Some(id)).await.is_err());
    }

    #[tokio::test]
    async fn test_list_paginates_and_delete_removes() {
        let repo = SpecRepository::new();
        let first = repo.create("a.txt", "txt", 1).await;
        repo.create("b.txt", "txt", 2).await;
        repo.create("c.pdf", "pdf", 3).await;

        assert_eq!(repo.count().await, 3);
        assert_eq!(repo.list(100, 0).await.len(), 3);
        assert_eq!(repo.list(2, 0).await.len(), 2);
        assert_eq!(repo.list(100, 2).await.len(), 1);

        repo.delete(first.id).await.unwrap();
        assert_eq!(repo.count().await, 2);
        assert!(repo.list(100, 0).await.iter().all(|s| s.id != first.id));
    }

    #[tokio::test]
    async fn test_search_across_records() {
        let repo = SpecRepository::new();
        let jacket = repo.create("jacket.txt", "txt", 1).await;
        let pants = repo.create("pants.txt", "txt", 1).await;
        repo.save_parsed(jacket.id, result_with(&[("123456", "YKK Zipper"), ("222222", "Label")]))
            .await
            .unwrap();
        repo.save_parsed(pants.id, result_with(&[("333333", "Fly Zipper")]))
            .await
            .unwrap();

        let all = repo.search_trims("zipper", None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].filename, "jacket.txt");
        assert_eq!(all[1].spec_id, pants.id);

        let scoped = repo.search_trims("zipper", Some(pants.id)).await.unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].trim.number, "333333");
    }

    #[tokio::test]
    async fn test_export_history() {
        let repo = SpecRepository::new();
        let record = repo.create("jacket.txt", "txt", 1).await;
        repo.record_export(record.id, ExportRecord::new("trims", "csv", "trim_data.csv", 4))
            .await
            .unwrap();

        let history = repo.export_history(record.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].export_format, "csv");
        assert_eq!(repo.list(10, 0).await[0].export_count, 1);
    }
}
