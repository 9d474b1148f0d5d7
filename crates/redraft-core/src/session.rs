//! Editor session: the operator-facing facade.
//!
//! Owns the section store behind a lock, runs the route -> transform ->
//! reconcile pipeline for each instruction, tracks in-flight edits per key,
//! and fences late responses against store replacement. External calls are
//! bounded by the configured timeout and never overlap with a held lock.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tokio::sync::Semaphore;

use redraft_edit::{
    Applied, EditInstruction, EditOutcome, EditPlan, EditRouter, Reconciler, StructuralPlan,
};
use redraft_section::{
    first_image_src, Section, SectionId, SectionStore, SectionType, Segmenter,
};
use redraft_services::{
    ContentGenerator, DocumentAction, DocumentTransformRequest, DocumentTransformer,
    GenerateRequest, PublishReceipt, PublishRequest, PublishStatus, Publisher, ScreenshotRequest,
    ScreenshotService, SectionTransformRequest, SectionTransformer, ServiceError,
};

use crate::config::EditorConfig;
use crate::error::EditorError;

const SHORTEN_INSTRUCTION: &str = "전체 글의 흐름은 유지하면서 내용을 더 간결하게 줄여줘";
const LENGTHEN_INSTRUCTION: &str = "전체 글의 흐름은 유지하면서 내용을 더 자세하고 풍부하게 늘려줘";
const REGENERATE_INSTRUCTION: &str = "이 섹션을 같은 주제로 처음부터 다시 작성해줘";

/// Key an in-flight edit is tracked under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKey {
    /// Edit scoped to one section.
    Section(SectionId),
    /// Edit touching the document as a whole.
    Document,
}

impl std::fmt::Display for EditKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditKey::Section(id) => write!(f, "section {id}"),
            EditKey::Document => write!(f, "document"),
        }
    }
}

/// Handle for a registered document-replacement observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Direction for [`EditorSession::move_section`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Toward index 0.
    Up,
    /// Toward the end.
    Down,
}

/// Target for [`EditorSession::adjust_length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthTarget {
    /// Condense the document.
    Shorter,
    /// Expand the document.
    Longer,
}

/// The external services a session dispatches to.
#[derive(Clone)]
pub struct ServiceSet {
    /// Fresh document generation.
    pub generator: Arc<dyn ContentGenerator>,
    /// Section-scoped transforms.
    pub sections: Arc<dyn SectionTransformer>,
    /// Document-scoped and narrowed transforms.
    pub documents: Arc<dyn DocumentTransformer>,
    /// Screenshot capture.
    pub screenshots: Arc<dyn ScreenshotService>,
    /// Blog publishing.
    pub publisher: Arc<dyn Publisher>,
}

type DocumentObserver = Arc<dyn Fn(&SectionStore) + Send + Sync>;

/// One editing session over one document.
pub struct EditorSession {
    config: EditorConfig,
    services: ServiceSet,
    router: EditRouter,
    reconciler: Reconciler,
    store: RwLock<SectionStore>,
    title: RwLock<String>,
    busy: DashMap<EditKey, ()>,
    edit_permits: Semaphore,
    observers: Mutex<Vec<(SubscriptionId, DocumentObserver)>>,
    next_subscription: AtomicU64,
}

impl EditorSession {
    /// Session with an empty store.
    #[must_use]
    pub fn new(config: EditorConfig, services: ServiceSet) -> Self {
        let edit_permits = Semaphore::new(config.max_concurrent_edits);
        Self {
            config,
            services,
            router: EditRouter::new(),
            reconciler: Reconciler::new(),
            store: RwLock::new(SectionStore::new()),
            title: RwLock::new(String::new()),
            busy: DashMap::new(),
            edit_permits,
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Replace a custom edit router (swapped intent matcher).
    #[must_use]
    pub fn with_router(mut self, router: EditRouter) -> Self {
        self.router = router;
        self
    }

    // --- document lifecycle ---

    /// Segment `raw` and replace the store wholesale.
    ///
    /// Returns the number of sections. Fires document-replacement observers.
    pub fn load_document(&self, raw: &str) -> usize {
        let sections = Segmenter::new().segment(raw);
        let count = sections.len();
        {
            let mut store = self.store.write();
            store.replace_all(sections);
        }
        tracing::info!(sections = count, "document loaded");
        self.notify_document_replaced();
        count
    }

    /// Load a normalized article: title plus segmented content.
    pub fn load_article(&self, article: &crate::article::Article) -> usize {
        *self.title.write() = article.title.clone();
        self.load_document(&article.raw_content)
    }

    /// Generate a fresh document for the configured keyword and load it.
    ///
    /// Returns the generated title.
    pub async fn generate(&self) -> Result<String, EditorError> {
        let request = GenerateRequest {
            keyword: self.config.keyword.clone(),
            category: None,
        };
        let generated = self
            .bounded(self.services.generator.generate(request))
            .await
            .map_err(EditorError::Generate)?;

        *self.title.write() = generated.title.clone();
        self.load_document(&generated.content);
        Ok(generated.title)
    }

    // --- editing ---

    /// Route `instruction`, run the external transform, and reconcile.
    ///
    /// Edits are tracked per key; a second edit against a busy key is
    /// rejected, not queued. A response arriving after the store was
    /// replaced is discarded (`applied == false`).
    pub async fn issue_edit(&self, instruction: EditInstruction) -> Result<Applied, EditorError> {
        let (plan, generation) = {
            let store = self.store.read();
            let plan = self
                .router
                .route(&instruction, &store, &self.config.keyword)?;
            (plan, store.generation())
        };

        // Semaphore makes check-and-reserve one step; a raw length check on
        // the registry could be raced past by concurrent edits.
        let _permit = self
            .edit_permits
            .try_acquire()
            .map_err(|_| EditorError::Saturated(self.config.max_concurrent_edits))?;
        let key = plan.key_section().map_or(EditKey::Document, EditKey::Section);
        let _guard = BusyGuard::acquire(&self.busy, key)?;

        let outcome = self.execute(plan).await?;

        let applied = {
            let mut store = self.store.write();
            if store.generation() != generation {
                tracing::warn!(%key, "store replaced mid-edit; discarding response");
                return Ok(Applied {
                    applied: false,
                    document_replaced: false,
                    character_count: store.character_count(),
                });
            }
            self.reconciler.apply(outcome, &mut store)
        };

        if applied.document_replaced {
            self.notify_document_replaced();
        }
        Ok(applied)
    }

    /// Condense or expand the whole document.
    pub async fn adjust_length(&self, target: LengthTarget) -> Result<Applied, EditorError> {
        let text = match target {
            LengthTarget::Shorter => SHORTEN_INSTRUCTION,
            LengthTarget::Longer => LENGTHEN_INSTRUCTION,
        };
        self.issue_edit(EditInstruction::new(text)).await
    }

    /// Rewrite one section from scratch on the same topic.
    pub async fn regenerate_section(&self, id: SectionId) -> Result<Applied, EditorError> {
        self.issue_edit(EditInstruction::new(REGENERATE_INSTRUCTION).with_target(id))
            .await
    }

    async fn execute(&self, plan: EditPlan) -> Result<EditOutcome, EditorError> {
        match plan {
            EditPlan::Scoped(scoped) => {
                let previous_kind = scoped.kind;
                let request = SectionTransformRequest {
                    content: scoped.content,
                    instruction: scoped.instruction,
                    keyword: scoped.keyword,
                    kind: scoped.kind,
                };
                let content = self
                    .bounded(self.services.sections.transform_section(request))
                    .await
                    .map_err(EditorError::Transform)?;
                // A transform may answer a text section with figure markup,
                // e.g. "turn this into a screenshot".
                let kind_change = (previous_kind != SectionType::Image
                    && first_image_src(&content).is_some())
                .then_some(SectionType::Image);
                Ok(EditOutcome::SectionUpdated {
                    section_id: scoped.section_id,
                    content,
                    kind_change,
                })
            }
            EditPlan::Structural(StructuralPlan::CaptureScreenshot { anchor, url, query }) => {
                let capture = self
                    .bounded(self.services.screenshots.capture(ScreenshotRequest { url, query }))
                    .await
                    .map_err(EditorError::Transform)?;
                Ok(EditOutcome::ScreenshotCaptured {
                    anchor,
                    html: capture.figure_html,
                    image_url: capture.image_url,
                })
            }
            EditPlan::Structural(StructuralPlan::DeleteImage { section_id, ordinal }) => {
                tracing::info!(%section_id, ordinal, "structural image delete");
                Ok(EditOutcome::SectionDeleted { section_id })
            }
            EditPlan::Structural(StructuralPlan::ReplaceImage {
                section_id,
                ordinal,
                instruction,
                keyword,
            }) => {
                tracing::info!(%section_id, ordinal, "structural image replace");
                let document = self.store.read().assemble();
                let request = DocumentTransformRequest {
                    document,
                    instruction,
                    keyword,
                    target_section_id: Some(section_id),
                    action: Some(DocumentAction::ReplaceImage),
                };
                let content = self
                    .bounded(self.services.documents.transform_document(request))
                    .await
                    .map_err(EditorError::Transform)?;
                Ok(EditOutcome::SectionUpdated {
                    section_id,
                    content,
                    kind_change: None,
                })
            }
            EditPlan::DocumentScoped(doc) => {
                let request = DocumentTransformRequest {
                    document: doc.document,
                    instruction: doc.instruction,
                    keyword: self.config.keyword.clone(),
                    target_section_id: None,
                    action: None,
                };
                let content = self
                    .bounded(self.services.documents.transform_document(request))
                    .await
                    .map_err(EditorError::Transform)?;
                Ok(EditOutcome::DocumentReplaced { content })
            }
        }
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        match tokio::time::timeout(self.config.transform_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.config.transform_timeout)),
        }
    }

    // --- direct store operations ---

    /// Delete a section. Stale ids are a logged no-op.
    pub fn delete_section(&self, id: SectionId) -> bool {
        self.store.write().delete(id)
    }

    /// Move a section one step. No-op at the boundaries.
    pub fn move_section(&self, id: SectionId, direction: MoveDirection) -> bool {
        let mut store = self.store.write();
        let Some(index) = store.position(id) else {
            tracing::warn!(%id, "move against stale section id ignored");
            return false;
        };
        match direction {
            MoveDirection::Up => store.move_up(index),
            MoveDirection::Down => store.move_down(index),
        }
    }

    /// Insert a placeholder section of `kind` after `anchor` (append when
    /// absent). Returns the new section's id.
    pub fn insert_section(&self, anchor: Option<SectionId>, kind: SectionType) -> SectionId {
        self.store
            .write()
            .insert_after(anchor, Section::placeholder(kind))
    }

    /// Snapshot of the sections in index order.
    #[must_use]
    pub fn sections(&self) -> Vec<Section> {
        self.store.read().sections().to_vec()
    }

    /// The assembled document.
    #[must_use]
    pub fn assembled_document(&self) -> String {
        self.store.read().assemble()
    }

    /// Plain-text character count over the whole document.
    #[must_use]
    pub fn character_count(&self) -> usize {
        self.store.read().character_count()
    }

    /// Current document title.
    #[must_use]
    pub fn title(&self) -> String {
        self.title.read().clone()
    }

    // --- publishing ---

    /// Push the assembled document to the blog backend.
    ///
    /// A failure leaves the session fully editable.
    pub async fn publish(&self, status: PublishStatus) -> Result<PublishReceipt, EditorError> {
        let (title, content) = {
            let store = self.store.read();
            if store.is_empty() {
                return Err(EditorError::EmptyDocument);
            }
            (self.title.read().clone(), store.assemble())
        };

        let request = PublishRequest {
            title,
            content,
            status,
        };
        let receipt = self
            .bounded(self.services.publisher.publish(request))
            .await
            .map_err(EditorError::Publish)?;
        tracing::info!(post_id = receipt.post_id, status = status.as_str(), "published");
        Ok(receipt)
    }

    // --- observers ---

    /// Register a callback fired after every wholesale store replacement.
    ///
    /// Callbacks run without any session lock held and receive a snapshot of
    /// the replaced store, so they may call back into the session (including
    /// [`EditorSession::unsubscribe`]).
    pub fn on_document_replaced(
        &self,
        callback: impl Fn(&SectionStore) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.observers.lock().push((id, Arc::new(callback)));
        id
    }

    /// Remove a registered callback. Returns whether it existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|(sid, _)| *sid != id);
        observers.len() != before
    }

    fn notify_document_replaced(&self) {
        // Snapshot both the callback list and the store, then release every
        // lock before invoking: a callback that unsubscribes itself or
        // mutates the store must not deadlock.
        let callbacks: Vec<DocumentObserver> = {
            let observers = self.observers.lock();
            observers.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        if callbacks.is_empty() {
            return;
        }
        let snapshot = self.store.read().clone();
        for callback in callbacks {
            callback(&snapshot);
        }
    }
}

struct BusyGuard<'a> {
    busy: &'a DashMap<EditKey, ()>,
    key: EditKey,
}

impl<'a> BusyGuard<'a> {
    fn acquire(busy: &'a DashMap<EditKey, ()>, key: EditKey) -> Result<Self, EditorError> {
        match busy.entry(key) {
            Entry::Occupied(_) => Err(EditorError::Busy(key)),
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(Self { busy, key })
            }
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use redraft_services::{GeneratedDocument, ScreenshotCapture};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;
    use tokio::sync::Notify;

    struct FixedGenerator;

    #[async_trait]
    impl ContentGenerator for FixedGenerator {
        async fn generate(&self, request: GenerateRequest) -> Result<GeneratedDocument, ServiceError> {
            Ok(GeneratedDocument {
                title: format!("{} 가이드", request.keyword),
                content: "<h2>개요</h2><p>본문</p>".to_string(),
            })
        }
    }

    struct FixedSectionTransformer(String);

    #[async_trait]
    impl SectionTransformer for FixedSectionTransformer {
        async fn transform_section(
            &self,
            _request: SectionTransformRequest,
        ) -> Result<String, ServiceError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSectionTransformer;

    #[async_trait]
    impl SectionTransformer for FailingSectionTransformer {
        async fn transform_section(
            &self,
            _request: SectionTransformRequest,
        ) -> Result<String, ServiceError> {
            Err(ServiceError::Remote("model unavailable".to_string()))
        }
    }

    struct StalledSectionTransformer;

    #[async_trait]
    impl SectionTransformer for StalledSectionTransformer {
        async fn transform_section(
            &self,
            _request: SectionTransformRequest,
        ) -> Result<String, ServiceError> {
            std::future::pending().await
        }
    }

    struct BlockingSectionTransformer {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl SectionTransformer for BlockingSectionTransformer {
        async fn transform_section(
            &self,
            _request: SectionTransformRequest,
        ) -> Result<String, ServiceError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok("<p>late</p>".to_string())
        }
    }

    struct FixedDocumentTransformer(String);

    #[async_trait]
    impl DocumentTransformer for FixedDocumentTransformer {
        async fn transform_document(
            &self,
            _request: DocumentTransformRequest,
        ) -> Result<String, ServiceError> {
            Ok(self.0.clone())
        }
    }

    struct FixedScreenshot;

    #[async_trait]
    impl ScreenshotService for FixedScreenshot {
        async fn capture(&self, _request: ScreenshotRequest) -> Result<ScreenshotCapture, ServiceError> {
            Ok(ScreenshotCapture {
                image_url: "cap.png".to_string(),
                figure_html: "<figure><img src=\"cap.png\"></figure>".to_string(),
            })
        }
    }

    struct FixedPublisher;

    #[async_trait]
    impl Publisher for FixedPublisher {
        async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt, ServiceError> {
            Ok(PublishReceipt {
                post_id: 42,
                url: matches!(request.status, PublishStatus::Publish)
                    .then(|| "https://blog.example/42".to_string()),
            })
        }
    }

    struct FailingPublisher;

    #[async_trait]
    impl Publisher for FailingPublisher {
        async fn publish(&self, _request: PublishRequest) -> Result<PublishReceipt, ServiceError> {
            Err(ServiceError::Remote("backend down".to_string()))
        }
    }

    fn services() -> ServiceSet {
        ServiceSet {
            generator: Arc::new(FixedGenerator),
            sections: Arc::new(FixedSectionTransformer("<p>updated</p>".to_string())),
            documents: Arc::new(FixedDocumentTransformer(
                "<h2>New</h2><p>Rewritten</p>".to_string(),
            )),
            screenshots: Arc::new(FixedScreenshot),
            publisher: Arc::new(FixedPublisher),
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    fn session(services: ServiceSet) -> EditorSession {
        init_tracing();
        EditorSession::new(EditorConfig::new().with_keyword("연말정산"), services)
    }

    fn loaded(services: ServiceSet) -> EditorSession {
        let session = session(services);
        session.load_document("<h2>Title</h2><p>Hello world</p><p>Tail</p>");
        session
    }

    #[tokio::test]
    async fn scoped_edit_updates_target_and_preserves_neighbors() {
        let session = loaded(services());
        let sections = session.sections();
        let target = sections[1].id;

        let applied = session
            .issue_edit(EditInstruction::new("더 자세히").with_target(target))
            .await
            .unwrap();

        assert!(applied.applied);
        let after = session.sections();
        assert_eq!(after[0].content, sections[0].content);
        assert_eq!(after[1].content, "<p>updated</p>");
        assert_eq!(after[2].content, sections[2].content);
    }

    #[tokio::test]
    async fn failed_transform_leaves_document_unchanged() {
        let mut set = services();
        set.sections = Arc::new(FailingSectionTransformer);
        let session = loaded(set);
        let before = session.assembled_document();
        let target = session.sections()[1].id;

        let err = session
            .issue_edit(EditInstruction::new("더 자세히").with_target(target))
            .await
            .unwrap_err();

        assert!(matches!(err, EditorError::Transform(ServiceError::Remote(_))));
        assert_eq!(session.assembled_document(), before);
    }

    #[tokio::test]
    async fn stalled_transform_times_out_and_leaves_document_unchanged() {
        let mut set = services();
        set.sections = Arc::new(StalledSectionTransformer);
        let session = EditorSession::new(
            EditorConfig::new().with_transform_timeout(Duration::from_millis(20)),
            set,
        );
        session.load_document("<p>body</p>");
        let before = session.assembled_document();
        let target = session.sections()[0].id;

        let err = session
            .issue_edit(EditInstruction::new("x").with_target(target))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EditorError::Transform(ServiceError::Timeout(_))
        ));
        assert_eq!(session.assembled_document(), before);
        assert!(session.busy.is_empty());
    }

    #[tokio::test]
    async fn concurrent_edit_on_same_section_is_rejected() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let mut set = services();
        set.sections = Arc::new(BlockingSectionTransformer {
            started: started.clone(),
            release: release.clone(),
        });
        let session = Arc::new(loaded(set));
        let target = session.sections()[1].id;

        let background = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .issue_edit(EditInstruction::new("느리게").with_target(target))
                    .await
            })
        };
        started.notified().await;

        let err = session
            .issue_edit(EditInstruction::new("빠르게").with_target(target))
            .await
            .unwrap_err();
        assert!(matches!(err, EditorError::Busy(EditKey::Section(id)) if id == target));

        release.notify_one();
        let first = background.await.unwrap().unwrap();
        assert!(first.applied);
    }

    #[tokio::test]
    async fn saturated_session_rejects_new_edits() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let mut set = services();
        set.sections = Arc::new(BlockingSectionTransformer {
            started: started.clone(),
            release: release.clone(),
        });
        let session = Arc::new(EditorSession::new(
            EditorConfig::new().with_max_concurrent_edits(1),
            set,
        ));
        session.load_document("<p>one</p><p>two</p>");
        let first = session.sections()[0].id;
        let second = session.sections()[1].id;

        let background = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .issue_edit(EditInstruction::new("느리게").with_target(first))
                    .await
            })
        };
        started.notified().await;

        let err = session
            .issue_edit(EditInstruction::new("빠르게").with_target(second))
            .await
            .unwrap_err();
        assert!(matches!(err, EditorError::Saturated(1)));

        release.notify_one();
        background.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn response_after_document_replacement_is_discarded() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let mut set = services();
        set.sections = Arc::new(BlockingSectionTransformer {
            started: started.clone(),
            release: release.clone(),
        });
        let session = Arc::new(loaded(set));
        let target = session.sections()[1].id;

        let background = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .issue_edit(EditInstruction::new("느리게").with_target(target))
                    .await
            })
        };
        started.notified().await;

        session.load_document("<p>replaced while editing</p>");
        release.notify_one();

        let applied = background.await.unwrap().unwrap();
        assert!(!applied.applied);
        assert_eq!(session.assembled_document(), "<p>replaced while editing</p>");
    }

    #[tokio::test]
    async fn document_edit_replaces_store_and_fires_observer() {
        let session = loaded(services());
        let replacements = Arc::new(AtomicUsize::new(0));
        let seen = replacements.clone();
        session.on_document_replaced(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        let applied = session
            .issue_edit(EditInstruction::new("전체적으로 톤을 다듬어줘"))
            .await
            .unwrap();

        assert!(applied.document_replaced);
        assert_eq!(replacements.load(Ordering::SeqCst), 1);
        assert_eq!(session.assembled_document(), "<h2>New</h2>\n<p>Rewritten</p>");
    }

    #[tokio::test]
    async fn screenshot_edit_inserts_image_after_anchor() {
        let session = loaded(services());
        let anchor = session.sections()[0].id;

        let applied = session
            .issue_edit(
                EditInstruction::new("홈택스 화면 캡처해서 넣어줘")
                    .with_hint(redraft_edit::StructuralIntent::Screenshot {
                        url: Some("https://hometax.go.kr".to_string()),
                    })
                    .with_target(anchor),
            )
            .await
            .unwrap();

        assert!(applied.applied);
        let sections = session.sections();
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[1].kind, SectionType::Image);
        assert_eq!(sections[1].image_url.as_deref(), Some("cap.png"));
    }

    #[tokio::test]
    async fn delete_image_edit_needs_no_service() {
        let session = session(services());
        session.load_document(
            "<p>lead</p><figure><img src=\"a.png\"></figure><figure><img src=\"b.png\"></figure>",
        );

        let applied = session
            .issue_edit(EditInstruction::new("2번째 이미지 삭제해줘"))
            .await
            .unwrap();

        assert!(applied.applied);
        assert_eq!(session.sections().len(), 2);
        assert!(!session.assembled_document().contains("b.png"));
    }

    #[tokio::test]
    async fn adjust_length_reports_new_character_count() {
        let session = loaded(services());

        let applied = session.adjust_length(LengthTarget::Shorter).await.unwrap();

        assert!(applied.document_replaced);
        // "New" (3) + "Rewritten" (9)
        assert_eq!(applied.character_count, 12);
        assert_eq!(applied.character_count, session.character_count());
    }

    #[tokio::test]
    async fn regenerate_section_is_scoped_to_its_target() {
        let session = loaded(services());
        let before = session.sections();
        let target = before[2].id;

        let applied = session.regenerate_section(target).await.unwrap();

        assert!(applied.applied);
        let after = session.sections();
        assert_eq!(after[0].content, before[0].content);
        assert_eq!(after[1].content, before[1].content);
        assert_eq!(after[2].content, "<p>updated</p>");
    }

    #[tokio::test]
    async fn generate_seeds_title_and_store() {
        let session = session(services());

        let title = session.generate().await.unwrap();

        assert_eq!(title, "연말정산 가이드");
        assert_eq!(session.title(), "연말정산 가이드");
        assert_eq!(session.sections().len(), 2);
    }

    #[tokio::test]
    async fn publish_requires_content_and_returns_receipt() {
        let session = session(services());
        let err = session.publish(PublishStatus::Publish).await.unwrap_err();
        assert!(matches!(err, EditorError::EmptyDocument));

        session.load_document("<p>body</p>");
        let receipt = session.publish(PublishStatus::Publish).await.unwrap();
        assert_eq!(receipt.post_id, 42);
        assert_eq!(receipt.url.as_deref(), Some("https://blog.example/42"));

        let draft = session.publish(PublishStatus::Draft).await.unwrap();
        assert_eq!(draft.url, None);
    }

    #[tokio::test]
    async fn failed_publish_keeps_session_editable() {
        let mut set = services();
        set.publisher = Arc::new(FailingPublisher);
        let session = loaded(set);

        let err = session.publish(PublishStatus::Publish).await.unwrap_err();
        assert!(matches!(err, EditorError::Publish(_)));

        // Store operations still work.
        let id = session.insert_section(None, SectionType::Paragraph);
        assert!(session.delete_section(id));
    }

    #[test]
    fn direct_store_operations() {
        let session = loaded(services());
        let sections = session.sections();

        assert!(session.move_section(sections[2].id, MoveDirection::Up));
        assert!(!session.move_section(sections[0].id, MoveDirection::Up));
        assert!(!session.move_section(SectionId::new(), MoveDirection::Down));

        let inserted = session.insert_section(Some(sections[0].id), SectionType::List);
        assert_eq!(
            session.sections()[1].content,
            SectionType::List.default_content()
        );
        assert!(session.delete_section(inserted));
    }

    #[test]
    fn observer_can_unsubscribe_itself_during_callback() {
        let session = Arc::new(session(services()));
        let count = Arc::new(AtomicUsize::new(0));
        let slot = Arc::new(Mutex::new(None::<SubscriptionId>));

        let id = {
            let session = session.clone();
            let count = count.clone();
            let slot = slot.clone();
            session.clone().on_document_replaced(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
                if let Some(id) = *slot.lock() {
                    session.unsubscribe(id);
                }
            })
        };
        *slot.lock() = Some(id);

        // One-shot observer: fires once, then never again.
        session.load_document("<p>a</p>");
        session.load_document("<p>b</p>");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn observer_may_read_the_session_during_callback() {
        let session = Arc::new(session(services()));
        let seen_count = Arc::new(AtomicUsize::new(0));

        let handle = session.clone();
        let seen = seen_count.clone();
        session.on_document_replaced(move |store| {
            assert_eq!(handle.character_count(), store.character_count());
            seen.fetch_add(1, Ordering::SeqCst);
        });

        session.load_document("<p>Hello world</p>");
        assert_eq!(seen_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn busy_rejection_returns_its_capacity() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let mut set = services();
        set.sections = Arc::new(BlockingSectionTransformer {
            started: started.clone(),
            release: release.clone(),
        });
        let session = Arc::new(EditorSession::new(
            EditorConfig::new().with_max_concurrent_edits(2),
            set,
        ));
        session.load_document("<p>one</p><p>two</p>");
        let first = session.sections()[0].id;
        let second = session.sections()[1].id;

        let in_flight = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .issue_edit(EditInstruction::new("느리게").with_target(first))
                    .await
            })
        };
        started.notified().await;

        let err = session
            .issue_edit(EditInstruction::new("빠르게").with_target(first))
            .await
            .unwrap_err();
        assert!(matches!(err, EditorError::Busy(_)));

        // A leaked reservation from the rejection above would leave only one
        // slot; the second-key edit must still get in.
        let other = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .issue_edit(EditInstruction::new("느리게").with_target(second))
                    .await
            })
        };
        started.notified().await;

        release.notify_one();
        release.notify_one();
        assert!(in_flight.await.unwrap().unwrap().applied);
        assert!(other.await.unwrap().unwrap().applied);
    }

    #[test]
    fn unsubscribed_observer_stops_firing() {
        let session = session(services());
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let id = session.on_document_replaced(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        session.load_document("<p>a</p>");
        assert_eq!(count.load(Ordering::SeqCst), 1);

        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.load_document("<p>b</p>");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
