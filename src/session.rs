use crate::catalog::Catalog;
use crate::clipboard::ClipboardWriter;
use crate::copy::{CopyOutcome, CopySessionManager};
use crate::feedback::FeedbackSink;
use crate::search::filter;
use std::sync::Arc;
use tracing::debug;

/// Everything the domain view owns while it is on screen: the query, the
/// domains matching it, and the copy confirmation state.
///
/// Created with [`Session::mount`] and ended with [`Session::teardown`]
/// (dropping the session has the same effect).
pub struct Session<C, F> {
    catalog: Arc<Catalog>,
    query: String,
    visible: Vec<String>,
    copy: CopySessionManager<C, F>,
}

impl<C, F> Session<C, F> {
    pub fn mount(catalog: Arc<Catalog>, clipboard: C, feedback: F) -> Self {
        Self::with_copy_manager(catalog, CopySessionManager::new(clipboard, feedback))
    }

    pub fn with_copy_manager(catalog: Arc<Catalog>, copy: CopySessionManager<C, F>) -> Self {
        let visible = catalog.domains().to_vec();
        Self {
            catalog,
            query: String::new(),
            visible,
            copy,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query and refresh the visible domains.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.visible = filter(self.catalog.domains(), &self.query)
            .into_iter()
            .map(str::to_string)
            .collect();
        debug!(query = %self.query, matches = self.visible.len(), "Query changed");
    }

    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    pub fn is_filtered(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn is_confirmed(&self, domain: &str) -> bool {
        self.copy.is_confirmed(domain)
    }

    pub fn confirmed(&self) -> Option<String> {
        self.copy.confirmed()
    }

    /// End the session, cancelling any pending confirmation expiry.
    pub fn teardown(self) {
        self.copy.shutdown();
        debug!("Session torn down");
    }
}

impl<C: ClipboardWriter, F: FeedbackSink> Session<C, F> {
    pub async fn request_copy(&self, domain: &str) -> CopyOutcome {
        self.copy.request_copy(domain).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copy::CopyError;
    use crate::feedback::NoFeedback;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct OkClipboard;

    impl ClipboardWriter for OkClipboard {
        async fn write(&self, _text: &str) -> Result<(), CopyError> {
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl ClipboardWriter for BrokenClipboard {
        async fn write(&self, _text: &str) -> Result<(), CopyError> {
            Err(CopyError::write_failed("unsupported"))
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(["aaa.com", "bbb.com", "mail.aaa.com"]))
    }

    #[test]
    fn test_mount_shows_everything() {
        let session = Session::mount(catalog(), OkClipboard, NoFeedback);
        assert_eq!(session.query(), "");
        assert!(!session.is_filtered());
        assert_eq!(session.visible(), ["aaa.com", "bbb.com", "mail.aaa.com"]);
    }

    #[test]
    fn test_set_query_filters() {
        let mut session = Session::mount(catalog(), OkClipboard, NoFeedback);

        session.set_query("aaa");
        assert_eq!(session.visible(), ["aaa.com", "mail.aaa.com"]);

        session.set_query("zzz");
        assert!(session.visible().is_empty());

        session.set_query("");
        assert_eq!(session.visible(), session.catalog().domains());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_through_session() {
        let session = Session::mount(catalog(), OkClipboard, NoFeedback);

        assert!(session.request_copy("bbb.com").await.is_confirmed());
        assert!(session.is_confirmed("bbb.com"));
        assert_eq!(session.confirmed().as_deref(), Some("bbb.com"));

        tokio::time::advance(Duration::from_millis(1500)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert!(!session.is_confirmed("bbb.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_copy_changes_nothing() {
        let session = Session::mount(catalog(), BrokenClipboard, NoFeedback);

        let outcome = session.request_copy("bbb.com").await;
        assert_eq!(
            outcome,
            CopyOutcome::Failed(CopyError::ClipboardWriteFailed("unsupported".to_string()))
        );
        assert!(!session.is_confirmed("bbb.com"));
        assert_eq!(session.confirmed(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_change_keeps_confirmation() {
        let mut session = Session::mount(catalog(), OkClipboard, NoFeedback);
        session.request_copy("bbb.com").await;

        session.set_query("aaa");
        assert!(session.is_confirmed("bbb.com"));
    }
}
