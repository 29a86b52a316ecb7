/// Spreadsheet import staging
///
/// Rows parsed from an uploaded file become draft records the
/// administrator can edit or drop before anything is persisted. The
/// staging list and the server's list stay disjoint until commit; a
/// draft has no identifier until the server assigns one.

use std::collections::BTreeMap;
use std::future::Future;

use crate::batch::BatchOutcome;
use crate::error::Error;
use crate::import::parser;

/// A candidate record staged for import
///
/// Header-name-to-field matching happens in `from_row`: recognized
/// headers populate fields, unrecognized ones are ignored, and a
/// missing header simply leaves the field empty (validation then
/// blocks commit of that row).
pub trait Draft: Clone {
    /// Resource noun for captions ("user", "album")
    const KIND: &'static str;
    /// Editable fields, in display order
    const FIELDS: &'static [&'static str];
    /// Fields that must be non-empty before commit
    const REQUIRED: &'static [&'static str];

    fn from_row(row: &BTreeMap<String, String>) -> Self;
    fn field(&self, name: &str) -> &str;
    fn set_field(&mut self, name: &str, value: String);
    /// Short human-readable tag for error attribution
    fn label(&self) -> String;

    fn validate(&self) -> Result<(), Error> {
        for name in Self::REQUIRED {
            if self.field(name).trim().is_empty() {
                return Err(Error::Validation(format!("{} is required", name)));
            }
        }
        Ok(())
    }
}

/// Ordered, editable list of drafts pending commit
#[derive(Debug, Clone, Default)]
pub struct StagingList<R> {
    records: Vec<R>,
}

impl<R: Draft> StagingList<R> {
    /// Parse an uploaded file into a staging list
    pub fn from_file(file_name: &str, bytes: &[u8]) -> Result<Self, Error> {
        let rows = parser::parse(file_name, bytes)?;
        Ok(StagingList {
            records: rows.iter().map(|row| R::from_row(row)).collect(),
        })
    }

    pub fn from_records(records: Vec<R>) -> Self {
        StagingList { records }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace one field of one staged record; out-of-range indexes
    /// and unknown fields are ignored
    pub fn edit_field(&mut self, index: usize, field: &str, value: String) {
        if let Some(record) = self.records.get_mut(index) {
            record.set_field(field, value);
        }
    }

    /// Drop one staged record, reindexing the rest
    pub fn remove(&mut self, index: usize) {
        if index < self.records.len() {
            self.records.remove(index);
        }
    }
}

/// Result of committing a staging list
#[derive(Debug, Clone)]
pub struct CommitReport<R> {
    pub outcome: BatchOutcome,
    /// Records that did not make it, in their original order, so the
    /// view can keep them staged for correction
    pub rejected: Vec<R>,
}

/// Submit every staged record via the injected single-create
/// operation, in list order, one in-flight request at a time
///
/// Each record is validated client-side first; invalid rows are
/// rejected without contacting the server. A failure on one record
/// does not stop processing of subsequent records.
pub async fn commit_all<R, F, Fut>(records: Vec<R>, create: F) -> CommitReport<R>
where
    R: Draft,
    F: Fn(R) -> Fut,
    Fut: Future<Output = Result<(), Error>>,
{
    let mut outcome = BatchOutcome::default();
    let mut rejected = Vec::new();

    for record in records {
        let label = record.label();

        if let Err(error) = record.validate() {
            outcome.failed.push((label, error));
            rejected.push(record);
            continue;
        }

        match create(record.clone()).await {
            Ok(()) => outcome.succeeded += 1,
            Err(error) => {
                eprintln!("⚠️  Import row {} failed: {}", label, error);
                outcome.failed.push((label, error));
                rejected.push(record);
            }
        }
    }

    println!(
        "✅ Import complete: {} ok, {} rejected",
        outcome.succeeded,
        rejected.len()
    );
    CommitReport { outcome, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::AlbumDraft;
    use std::sync::{Arc, Mutex};

    const TWO_ALBUMS_CSV: &[u8] = b"title,userId\nquidem molestiae enim,1\nsunt qui excepturi,2\n";

    fn two_albums() -> StagingList<AlbumDraft> {
        StagingList::from_file("albums.csv", TWO_ALBUMS_CSV).unwrap()
    }

    #[test]
    fn test_parse_populates_fields_without_ids() {
        let list = two_albums();
        assert_eq!(list.len(), 2);
        assert_eq!(list.records()[0].title, "quidem molestiae enim");
        assert_eq!(list.records()[0].user_id, "1");
        assert_eq!(list.records()[1].user_id, "2");
    }

    #[test]
    fn test_edit_field_touches_only_one_record() {
        let mut list = two_albums();
        list.edit_field(0, "title", "New".to_string());
        assert_eq!(list.records()[0].title, "New");
        assert_eq!(list.records()[0].user_id, "1");
        assert_eq!(list.records()[1].title, "sunt qui excepturi");
    }

    #[test]
    fn test_edit_field_out_of_range_is_ignored() {
        let mut list = two_albums();
        list.edit_field(9, "title", "New".to_string());
        assert_eq!(list.records()[0].title, "quidem molestiae enim");
    }

    #[test]
    fn test_remove_reindexes() {
        let mut list = StagingList::from_records(vec![
            AlbumDraft {
                title: "first".to_string(),
                user_id: "1".to_string(),
            },
            AlbumDraft {
                title: "second".to_string(),
                user_id: "1".to_string(),
            },
            AlbumDraft {
                title: "third".to_string(),
                user_id: "1".to_string(),
            },
        ]);
        list.remove(1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.records()[0].title, "first");
        assert_eq!(list.records()[1].title, "third");
    }

    #[tokio::test]
    async fn test_commit_submits_in_order_and_continues_past_failures() {
        let submitted = Arc::new(Mutex::new(Vec::new()));
        let recorded = submitted.clone();

        let records = vec![
            AlbumDraft {
                title: "ok".to_string(),
                user_id: "1".to_string(),
            },
            AlbumDraft {
                title: "rejected".to_string(),
                user_id: "1".to_string(),
            },
            AlbumDraft {
                title: "also ok".to_string(),
                user_id: "2".to_string(),
            },
        ];

        let report = commit_all(records, move |draft: AlbumDraft| {
            let submitted = recorded.clone();
            async move {
                submitted.lock().unwrap().push(draft.title.clone());
                if draft.title == "rejected" {
                    Err(Error::Server("duplicate".to_string()))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(
            *submitted.lock().unwrap(),
            vec!["ok".to_string(), "rejected".to_string(), "also ok".to_string()]
        );
        assert_eq!(report.outcome.succeeded, 2);
        assert_eq!(
            report.outcome.failed,
            vec![("rejected".to_string(), Error::Server("duplicate".to_string()))]
        );
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].title, "rejected");
    }

    #[tokio::test]
    async fn test_invalid_rows_never_reach_the_server() {
        let calls = Arc::new(Mutex::new(0usize));
        let recorded = calls.clone();

        let records = vec![AlbumDraft {
            title: "Roadtrip".to_string(),
            user_id: String::new(),
        }];

        let report = commit_all(records, move |_draft: AlbumDraft| {
            let calls = recorded.clone();
            async move {
                *calls.lock().unwrap() += 1;
                Ok(())
            }
        })
        .await;

        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(report.outcome.succeeded, 0);
        assert_eq!(
            report.outcome.failed,
            vec![(
                "Roadtrip".to_string(),
                Error::Validation("userId is required".to_string())
            )]
        );
        assert_eq!(report.rejected.len(), 1);
    }
}
