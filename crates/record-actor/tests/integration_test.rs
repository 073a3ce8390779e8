use async_trait::async_trait;
use record_actor::{
    Change, FrameworkError, JsonFileStore, MemoryStore, Record, RecordActor, SequentialId,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

// --- Test Record ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
struct CounterId(u32);

impl std::fmt::Display for CounterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "counter_{}", self.0)
    }
}

impl SequentialId for CounterId {
    fn from_sequence(seq: u32) -> Self {
        CounterId(seq)
    }
    fn sequence(&self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Counter {
    id: CounterId,
    name: String,
    value: i64,
}

#[derive(Debug)]
struct CounterUpdate {
    name: Option<String>,
    value: Option<i64>,
}

#[derive(Debug)]
enum CounterAction {
    Increment(i64),
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum CounterError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("counter would go negative")]
    Negative,
}

/// Collects every committed change so tests can see what `on_committed` observed.
type Journal = Arc<Mutex<Vec<String>>>;

#[async_trait]
impl Record for Counter {
    type Id = CounterId;
    type Create = String;
    type Update = CounterUpdate;
    type Action = CounterAction;
    type ActionResult = i64;
    type Context = Journal;
    type Error = CounterError;

    fn id(&self) -> CounterId {
        self.id
    }

    fn from_create_params(id: CounterId, name: String) -> Result<Self, CounterError> {
        if name.trim().is_empty() {
            return Err(CounterError::EmptyName);
        }
        Ok(Self { id, name, value: 0 })
    }

    async fn on_update(&mut self, update: CounterUpdate, _ctx: &Journal) -> Result<(), CounterError> {
        // Apply the name first so a rejected value proves the copy was discarded.
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(value) = update.value {
            if value < 0 {
                return Err(CounterError::Negative);
            }
            self.value = value;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: CounterAction, _ctx: &Journal) -> Result<i64, CounterError> {
        match action {
            CounterAction::Increment(by) => {
                if self.value + by < 0 {
                    return Err(CounterError::Negative);
                }
                self.value += by;
                Ok(self.value)
            }
        }
    }

    async fn on_committed(&self, change: Change<'_, Self>, journal: &Journal) {
        let line = match change {
            Change::Created => format!("created {}", self.id),
            Change::Updated => format!("updated {}", self.id),
            Change::Deleted => format!("deleted {}", self.id),
            Change::Acted(value) => format!("acted {} -> {}", self.id, value),
        };
        journal.lock().unwrap().push(line);
    }
}

fn spawn_counter(store: MemoryStore<Counter>) -> (record_actor::RecordClient<Counter>, Journal) {
    let journal = Journal::default();
    let (actor, client) = RecordActor::new(10, store);
    tokio::spawn(actor.run(journal.clone()));
    (client, journal)
}

// --- Tests ---

#[tokio::test]
async fn test_full_lifecycle() {
    let (client, journal) = spawn_counter(MemoryStore::new());

    let counter = client.create("visits".into()).await.unwrap();
    assert_eq!(counter.id, CounterId(1));

    let value = client
        .perform_action(counter.id, CounterAction::Increment(5))
        .await
        .unwrap();
    assert_eq!(value, 5);

    let updated = client
        .update(
            counter.id,
            CounterUpdate {
                name: Some("hits".into()),
                value: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "hits");
    assert_eq!(updated.value, 5);

    let removed = client.delete(counter.id).await.unwrap();
    assert_eq!(removed.name, "hits");
    assert!(client.get(counter.id).await.unwrap().is_none());

    assert_eq!(
        *journal.lock().unwrap(),
        vec![
            "created counter_1",
            "acted counter_1 -> 5",
            "updated counter_1",
            "deleted counter_1",
        ]
    );
}

#[tokio::test]
async fn test_failed_hook_leaves_record_unchanged() {
    let store = MemoryStore::new();
    let (client, journal) = spawn_counter(store.clone());

    let counter = client.create("stock".into()).await.unwrap();
    client
        .perform_action(counter.id, CounterAction::Increment(3))
        .await
        .unwrap();

    let err = client
        .update(
            counter.id,
            CounterUpdate {
                name: Some("renamed".into()),
                value: Some(-1),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity_error::<CounterError>().unwrap(),
        CounterError::Negative
    );

    let current = client.get(counter.id).await.unwrap().unwrap();
    assert_eq!(current.name, "stock");
    assert_eq!(current.value, 3);
    assert_eq!(store.snapshot(), vec![current]);
    assert_eq!(journal.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_rejected_create_does_not_consume_an_id() {
    let (client, _journal) = spawn_counter(MemoryStore::new());

    let err = client.create("   ".into()).await.unwrap_err();
    assert!(matches!(
        err.into_entity_error::<CounterError>(),
        Ok(CounterError::EmptyName)
    ));

    let counter = client.create("ok".into()).await.unwrap();
    assert_eq!(counter.id, CounterId(1));
}

#[tokio::test]
async fn test_missing_record_is_not_found() {
    let (client, _journal) = spawn_counter(MemoryStore::new());

    let err = client
        .perform_action(CounterId(42), CounterAction::Increment(1))
        .await
        .unwrap_err();
    assert!(matches!(err, FrameworkError::NotFound(id) if id == "counter_42"));
}

#[tokio::test]
async fn test_list_where_filters_inside_actor() {
    let (client, _journal) = spawn_counter(MemoryStore::new());
    for name in ["a", "bb", "ccc"] {
        client.create(name.into()).await.unwrap();
    }

    let long = client.list_where(|c: &Counter| c.name.len() > 1).await.unwrap();
    let ids: Vec<_> = long.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![CounterId(2), CounterId(3)]);
    assert_eq!(client.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_restart_resumes_sequence() {
    let store = MemoryStore::new();
    {
        let (client, _journal) = spawn_counter(store.clone());
        client.create("first".into()).await.unwrap();
        let second = client.create("second".into()).await.unwrap();
        client.delete(CounterId(1)).await.unwrap();
        assert_eq!(second.id, CounterId(2));
    }

    let (actor, client) = RecordActor::new(10, store.clone());
    let mut actor = actor;
    assert_eq!(actor.hydrate().await.unwrap(), 1);
    tokio::spawn(actor.run(Journal::default()));

    let third = client.create("third".into()).await.unwrap();
    assert_eq!(third.id, CounterId(3));
    assert_eq!(client.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_seeded_store_continues_after_highest_id() {
    let seeded = |id: u32, name: &str| Counter {
        id: CounterId(id),
        name: name.to_string(),
        value: i64::from(id),
    };
    let store = MemoryStore::with_records(vec![seeded(9, "nine"), seeded(4, "four")]);

    let (mut actor, client) = RecordActor::new(10, store.clone());
    assert_eq!(actor.hydrate().await.unwrap(), 2);
    tokio::spawn(actor.run(Journal::default()));

    let ids: Vec<_> = client.list().await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![CounterId(4), CounterId(9)]);

    let next = client.create("ten".into()).await.unwrap();
    assert_eq!(next.id, CounterId(10));
    assert_eq!(store.snapshot().len(), 3);
}

#[tokio::test]
async fn test_json_file_store_survives_restart() {
    let dir = std::env::temp_dir().join(format!("record-actor-{}", uuid::Uuid::new_v4()));
    let path = dir.join("counters.json");

    {
        let (actor, client) = RecordActor::<Counter>::new(10, JsonFileStore::new(&path));
        tokio::spawn(actor.run(Journal::default()));
        let counter = client.create("persisted".into()).await.unwrap();
        client
            .perform_action(counter.id, CounterAction::Increment(7))
            .await
            .unwrap();
    }
    assert!(path.exists());

    let (actor, client) = RecordActor::<Counter>::new(10, JsonFileStore::new(&path));
    tokio::spawn(actor.run(Journal::default()));

    let restored = client.get(CounterId(1)).await.unwrap().unwrap();
    assert_eq!(restored.name, "persisted");
    assert_eq!(restored.value, 7);
    assert_eq!(client.create("next".into()).await.unwrap().id, CounterId(2));

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test]
async fn test_corrupt_store_closes_actor() {
    let dir = std::env::temp_dir().join(format!("record-actor-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("counters.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let (mut actor, _client) = RecordActor::<Counter>::new(10, JsonFileStore::new(&path));
    let err = actor.hydrate().await.unwrap_err();
    assert!(matches!(err, FrameworkError::Storage(_)));

    let (actor, client) = RecordActor::<Counter>::new(10, JsonFileStore::new(&path));
    tokio::spawn(actor.run(Journal::default()));
    let result = client.list().await;
    assert!(matches!(
        result,
        Err(FrameworkError::ActorClosed) | Err(FrameworkError::ActorDropped)
    ));

    let _ = std::fs::remove_dir_all(dir);
}
