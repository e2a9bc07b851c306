//! Fixtures shared by the delivery scenarios.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actor_message_queue::{
    Actor, ActorNumber, ArchiveOutcome, ArchivedMessage, ArchivedMessageRepository, BundleId,
    BusinessReason, Clock, DeliveryConfig, DocumentError, DocumentFactory, DocumentFormat,
    DocumentHeader, DocumentType, DocumentWriter, EnqueueMessage, HashMapRepository,
    InMemoryArchive, MarketRole, MessageCategory, MessageDequeuer, MessageEnqueuer, MessagePeeker,
    MessageRecord, PeekOutcome, ProcessId, RepositoryError,
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new() -> Self {
        FixedClock {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::seconds(secs);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// What `RecordingWriter` renders: the header plus the records, as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub document_id: String,
    pub document_type: String,
    pub business_reason: String,
    pub sender: String,
    pub receiver: String,
    pub created_at: DateTime<Utc>,
    pub format: String,
    pub records: Vec<String>,
}

/// Renders every document type as JSON-encoded `RenderedDocument`, counting
/// renders. Handles Ebix only for aggregated measure data.
pub struct RecordingWriter {
    format: DocumentFormat,
    renders: Arc<AtomicUsize>,
}

impl DocumentWriter for RecordingWriter {
    fn handles_type(&self, document_type: DocumentType) -> bool {
        self.format != DocumentFormat::Ebix
            || document_type == DocumentType::NotifyAggregatedMeasureData
    }

    fn handles_format(&self, format: DocumentFormat) -> bool {
        self.format == format
    }

    fn write(
        &self,
        header: &DocumentHeader,
        records: &[MessageRecord],
    ) -> Result<Vec<u8>, DocumentError> {
        self.renders.fetch_add(1, Ordering::SeqCst);
        let document = RenderedDocument {
            document_id: header.document_id.to_string(),
            document_type: header.document_type.to_string(),
            business_reason: header.business_reason.to_string(),
            sender: header.sender.to_string(),
            receiver: header.receiver.to_string(),
            created_at: header.created_at,
            format: self.format.to_string(),
            records: records
                .iter()
                .map(|r| r.as_str().unwrap_or_default().to_string())
                .collect(),
        };
        serde_json::to_vec(&document).map_err(|e| DocumentError::Write(e.to_string()))
    }
}

/// A factory with a `RecordingWriter` for every format.
pub fn recording_factory(renders: Arc<AtomicUsize>) -> DocumentFactory {
    let mut factory = DocumentFactory::new();
    for format in [DocumentFormat::Xml, DocumentFormat::Json, DocumentFormat::Ebix] {
        factory.register(Box::new(RecordingWriter {
            format,
            renders: renders.clone(),
        }));
    }
    factory
}

pub fn decode(payload: &[u8]) -> RenderedDocument {
    serde_json::from_slice(payload).unwrap()
}

/// Archive that counts successful inserts and can be switched to fail.
#[derive(Default)]
pub struct CountingArchive {
    inner: InMemoryArchive,
    inserts: AtomicUsize,
    failing: AtomicBool,
}

impl CountingArchive {
    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl ArchivedMessageRepository for CountingArchive {
    async fn add(&self, message: ArchivedMessage) -> Result<ArchiveOutcome, RepositoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage("archive unavailable".into()));
        }
        let outcome = self.inner.add(message).await?;
        if outcome.was_inserted() {
            self.inserts.fetch_add(1, Ordering::SeqCst);
        }
        Ok(outcome)
    }

    async fn get_by_bundle(
        &self,
        bundle_id: BundleId,
    ) -> Result<Option<ArchivedMessage>, RepositoryError> {
        self.inner.get_by_bundle(bundle_id).await
    }
}

/// Archive that acknowledges the bundle on the receiver's behalf before
/// storing it, as a dequeue racing the materializing peek would.
pub struct DequeueingArchive {
    inner: InMemoryArchive,
    dequeuer: MessageDequeuer<HashMapRepository>,
    receiver: Actor,
}

impl DequeueingArchive {
    pub fn new(store: Arc<HashMapRepository>, receiver: Actor) -> Self {
        DequeueingArchive {
            inner: InMemoryArchive::new(),
            dequeuer: MessageDequeuer::new(store),
            receiver,
        }
    }
}

#[async_trait]
impl ArchivedMessageRepository for DequeueingArchive {
    async fn add(&self, message: ArchivedMessage) -> Result<ArchiveOutcome, RepositoryError> {
        let outcome = self
            .dequeuer
            .dequeue(&message.bundle_id.to_string(), &self.receiver)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        assert!(outcome.is_success());
        self.inner.add(message).await
    }

    async fn get_by_bundle(
        &self,
        bundle_id: BundleId,
    ) -> Result<Option<ArchivedMessage>, RepositoryError> {
        self.inner.get_by_bundle(bundle_id).await
    }
}

pub struct Harness {
    pub store: Arc<HashMapRepository>,
    pub archive: Arc<CountingArchive>,
    pub clock: Arc<FixedClock>,
    pub renders: Arc<AtomicUsize>,
    pub enqueuer: MessageEnqueuer<HashMapRepository>,
    pub peeker: MessagePeeker<HashMapRepository, CountingArchive>,
    pub dequeuer: MessageDequeuer<HashMapRepository>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(DeliveryConfig::default())
    }

    pub fn with_config(config: DeliveryConfig) -> Self {
        init_tracing();

        let store = Arc::new(HashMapRepository::new());
        let archive = Arc::new(CountingArchive::default());
        let clock = Arc::new(FixedClock::new());
        let renders = Arc::new(AtomicUsize::new(0));

        let factory = recording_factory(renders.clone());

        let enqueuer = MessageEnqueuer::new(store.clone())
            .with_clock(clock.clone())
            .with_config(config.clone());
        let peeker = MessagePeeker::new(store.clone(), archive.clone(), Arc::new(factory))
            .with_clock(clock.clone())
            .with_config(config.clone());
        let dequeuer = MessageDequeuer::new(store.clone()).with_config(config);

        Harness {
            store,
            archive,
            clock,
            renders,
            enqueuer,
            peeker,
            dequeuer,
        }
    }

    pub fn renders(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }

    pub async fn enqueue(&self, message: EnqueueMessage) {
        self.enqueuer.enqueue(message).await.unwrap();
        self.clock.advance_secs(1);
    }

    pub async fn peek(&self, receiver: &Actor, category: MessageCategory) -> PeekOutcome {
        self.peeker
            .peek(receiver, Some(category), DocumentFormat::Json)
            .await
            .unwrap()
    }
}

pub fn energy_supplier() -> Actor {
    Actor::new(
        ActorNumber::parse("5790001330583").unwrap(),
        MarketRole::EnergySupplier,
    )
}

pub fn balance_responsible() -> Actor {
    Actor::new(
        ActorNumber::parse("5790001330583").unwrap(),
        MarketRole::BalanceResponsibleParty,
    )
}

pub fn datahub() -> Actor {
    Actor::new(
        ActorNumber::parse("5790001330552").unwrap(),
        MarketRole::MeteredDataResponsible,
    )
}

pub fn message(
    receiver: &Actor,
    document_type: DocumentType,
    business_reason: BusinessReason,
    record: &str,
) -> EnqueueMessage {
    EnqueueMessage {
        document_type,
        business_reason,
        receiver: receiver.clone(),
        sender: datahub(),
        process_id: ProcessId::new(),
        record: MessageRecord::from(record),
    }
}

pub fn aggregation(receiver: &Actor, record: &str) -> EnqueueMessage {
    message(
        receiver,
        DocumentType::NotifyAggregatedMeasureData,
        BusinessReason::BalanceFixing,
        record,
    )
}

pub fn wholesale(receiver: &Actor, record: &str) -> EnqueueMessage {
    message(
        receiver,
        DocumentType::NotifyWholesaleServices,
        BusinessReason::WholesaleFixing,
        record,
    )
}
