//! Validation and expiry policy in front of the snippet store.

use crate::constants::{DEFAULT_MAX_CONTENT_SIZE, MAX_TITLE_CHARS};
use crate::db::SnippetStore;
use crate::error::AppError;
use crate::models::snippet::{ExpiryChoice, Snippet};
use std::sync::Arc;

/// Parse a raw snippet id from a request.
///
/// # Errors
/// [`AppError::Validation`] for anything that is not an integer `>= 1`.
pub fn parse_snippet_id(raw: &str) -> Result<u64, AppError> {
    let trimmed = raw.trim();
    match trimmed.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id as u64),
        Ok(_) => Err(AppError::Validation(format!(
            "Snippet id must be positive, got {}",
            trimmed
        ))),
        Err(_) => trimmed.parse::<u64>().map_err(|_| {
            AppError::Validation(format!("Snippet id '{}' is not a number", trimmed))
        }),
    }
}

/// Stateless front door to the snippet store.
#[derive(Clone)]
pub struct SnippetService {
    store: Arc<dyn SnippetStore>,
    max_content_size: usize,
}

impl SnippetService {
    pub fn new(store: Arc<dyn SnippetStore>) -> Self {
        Self::with_max_content_size(store, DEFAULT_MAX_CONTENT_SIZE)
    }

    /// Build a service that rejects content larger than `max_content_size` bytes.
    pub fn with_max_content_size(store: Arc<dyn SnippetStore>, max_content_size: usize) -> Self {
        Self {
            store,
            max_content_size,
        }
    }

    /// Validate a create request and persist it.
    ///
    /// # Returns
    /// The new snippet id.
    ///
    /// # Errors
    /// [`AppError::Validation`] for blank fields, an oversized title or body,
    /// or an unknown expiry choice; nothing is stored in that case. Store
    /// errors are passed through unchanged.
    pub fn create(&self, title: &str, content: &str, expires: &str) -> Result<u64, AppError> {
        if title.trim().is_empty() {
            return Err(AppError::Validation("Title cannot be blank".to_string()));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(AppError::Validation(format!(
                "Title cannot be longer than {} characters",
                MAX_TITLE_CHARS
            )));
        }
        if content.trim().is_empty() {
            return Err(AppError::Validation("Content cannot be blank".to_string()));
        }
        if content.len() > self.max_content_size {
            return Err(AppError::Validation(format!(
                "Content exceeds maximum of {} bytes",
                self.max_content_size
            )));
        }
        let choice: ExpiryChoice = expires.parse()?;

        self.store.insert(title, content, choice.days())
    }

    /// Look up a visible snippet from a raw request id.
    ///
    /// # Errors
    /// [`AppError::Validation`] for malformed ids, otherwise whatever the store
    /// reports ([`AppError::NotFound`] for missing or expired rows).
    pub fn show(&self, raw_id: &str) -> Result<Snippet, AppError> {
        let id = parse_snippet_id(raw_id)?;
        self.store.get(id)
    }

    /// Most recent visible snippets.
    pub fn list(&self) -> Result<Vec<Snippet>, AppError> {
        self.store.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::error::ErrorKind;
    use crate::test_support::setup_temp_db_with_clock;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store double that counts inserts and can be told to fail.
    #[derive(Default)]
    struct RecordingStore {
        inserts: AtomicUsize,
        fail: bool,
    }

    impl SnippetStore for RecordingStore {
        fn insert(&self, _title: &str, _content: &str, expiry_days: u32) -> Result<u64, AppError> {
            if self.fail {
                return Err(AppError::StorageMessage("connection refused".to_string()));
            }
            let n = self.inserts.fetch_add(1, Ordering::SeqCst) as u64;
            Ok(n * 1000 + u64::from(expiry_days))
        }

        fn get(&self, _id: u64) -> Result<Snippet, AppError> {
            if self.fail {
                return Err(AppError::StorageMessage("connection refused".to_string()));
            }
            Err(AppError::NotFound)
        }

        fn latest(&self) -> Result<Vec<Snippet>, AppError> {
            if self.fail {
                return Err(AppError::StorageMessage("connection refused".to_string()));
            }
            Ok(Vec::new())
        }
    }

    fn recording_service() -> (SnippetService, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::default());
        (SnippetService::new(store.clone()), store)
    }

    fn failing_service() -> SnippetService {
        SnippetService::new(Arc::new(RecordingStore {
            fail: true,
            ..RecordingStore::default()
        }))
    }

    #[test]
    fn parse_snippet_id_accepts_positive_integers() {
        assert_eq!(parse_snippet_id("1").unwrap(), 1);
        assert_eq!(parse_snippet_id(" 42 ").unwrap(), 42);
        assert_eq!(parse_snippet_id("18446744073709551615").unwrap(), u64::MAX);
    }

    #[test]
    fn parse_snippet_id_rejects_malformed_input() {
        for raw in ["", "0", "-5", "abc", "1.5", "1e3", "18446744073709551616"] {
            let err = parse_snippet_id(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "raw: {:?}", raw);
        }
    }

    #[test]
    fn create_rejects_blank_fields_without_touching_store() {
        let (service, store) = recording_service();

        for (title, content) in [("", "content"), ("title", ""), ("   ", "content"), ("t", "\n\t")] {
            let err = service.create(title, content, "7").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn create_rejects_unknown_expiry_without_touching_store() {
        let (service, store) = recording_service();

        for expires in ["", "0", "30", "never"] {
            let err = service.create("t", "c", expires).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "expires: {:?}", expires);
        }
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn create_enforces_size_limits() {
        let store = Arc::new(RecordingStore::default());
        let service = SnippetService::with_max_content_size(store.clone(), 8);

        let long_title = "x".repeat(MAX_TITLE_CHARS + 1);
        assert_eq!(
            service.create(&long_title, "c", "1").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            service.create("t", "123456789", "1").unwrap_err().kind(),
            ErrorKind::Validation
        );
        assert_eq!(store.inserts.load(Ordering::SeqCst), 0);

        let exact_title = "é".repeat(MAX_TITLE_CHARS);
        assert!(service.create(&exact_title, "12345678", "1").is_ok());
    }

    #[test]
    fn create_passes_choice_days_to_store() {
        let (service, _store) = recording_service();
        assert_eq!(service.create("t", "c", "1").unwrap(), 1);
        assert_eq!(service.create("t", "c", "7").unwrap(), 1007);
        assert_eq!(service.create("t", "c", "365").unwrap(), 2365);
    }

    #[test]
    fn storage_errors_propagate_unchanged() {
        let service = failing_service();

        assert_eq!(
            service.create("t", "c", "7").unwrap_err().kind(),
            ErrorKind::Storage
        );
        assert_eq!(service.show("1").unwrap_err().kind(), ErrorKind::Storage);
        assert_eq!(service.list().unwrap_err().kind(), ErrorKind::Storage);
    }

    #[test]
    fn show_validates_before_reaching_store() {
        let service = failing_service();
        assert_eq!(service.show("0").unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(service.show("-5").unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn hello_world_lifecycle() {
        let (db, clock, _temp) = setup_temp_db_with_clock();
        let service = SnippetService::new(db.snippets.clone());

        let id = service.create("Hello", "World", "1").expect("create");
        assert_eq!(id, 1);

        let shown = service.show("1").expect("show");
        assert_eq!(shown.title, "Hello");
        assert_eq!(shown.content, "World");
        assert_eq!(shown.created, clock.now());

        let listed = service.list().expect("list");
        assert_eq!(listed.first().map(|s| s.id), Some(1));

        clock.advance(Duration::days(1) + Duration::seconds(1));
        assert_eq!(service.show("1").unwrap_err().kind(), ErrorKind::NotFound);
        assert!(service.list().expect("list").iter().all(|s| s.id != 1));
    }

    #[test]
    fn list_is_stable_without_new_creates() {
        let (db, clock, _temp) = setup_temp_db_with_clock();
        let service = SnippetService::new(db.snippets.clone());
        for n in 0..4 {
            service.create(&format!("t{n}"), "c", "7").expect("create");
            clock.advance(Duration::seconds(30));
        }

        let first = service.list().expect("list");
        let second = service.list().expect("list");
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![4, 3, 2, 1]
        );
    }

    #[test]
    fn show_rejects_non_positive_ids_against_real_store() {
        let (db, _clock, _temp) = setup_temp_db_with_clock();
        let service = SnippetService::new(db.snippets.clone());
        service.create("t", "c", "7").expect("create");

        assert_eq!(service.show("0").unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(service.show("-5").unwrap_err().kind(), ErrorKind::Validation);
        assert_eq!(service.show("2").unwrap_err().kind(), ErrorKind::NotFound);
    }
}
