//! # Mocks & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`RecordClient<T>`] whose requests are answered from a queue
//! of expectations instead of an actor. Use it to test client-side orchestration (bulk operations,
//! error mapping) without spawning actors, or to stand in for a dependency injected through a
//! record's `Context`.
//!
//! | | MockClient | Real actor + `MemoryStore` |
//! |---|---|---|
//! | Speed | instant | fast |
//! | State | none, scripted replies | real records |
//! | Error injection | `return_err(...)` | needs a failing store or record |
//!
//! Expectations are consumed in order. A request that does not match the next expectation (wrong
//! operation or wrong id) is answered with [`FrameworkError::NotFound`] and recorded;
//! [`MockClient::verify`] panics if any expectation is left over or any mismatch occurred.
//!
//! ```rust
//! use record_actor::mock::MockClient;
//! use record_actor::{FrameworkError, Record, SequentialId};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
//! struct SkuId(u32);
//! impl std::fmt::Display for SkuId {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "sku_{}", self.0) }
//! }
//! impl SequentialId for SkuId {
//!     fn from_sequence(seq: u32) -> Self { SkuId(seq) }
//!     fn sequence(&self) -> u32 { self.0 }
//! }
//! #[derive(Clone, Debug)] struct Sku { id: SkuId, stock: u32 }
//! #[derive(Debug, thiserror::Error)] #[error("sku error")] struct SkuError;
//!
//! #[async_trait]
//! impl Record for Sku {
//!     type Id = SkuId; type Create = u32; type Update = u32;
//!     type Action = (); type ActionResult = (); type Context = (); type Error = SkuError;
//!     fn id(&self) -> SkuId { self.id }
//!     fn from_create_params(id: SkuId, stock: u32) -> Result<Self, SkuError> { Ok(Self { id, stock }) }
//!     async fn on_update(&mut self, stock: u32, _: &()) -> Result<(), SkuError> { self.stock = stock; Ok(()) }
//!     async fn handle_action(&mut self, _: (), _: &()) -> Result<(), SkuError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Sku>::new();
//!     mock.expect_get(SkuId(1)).return_ok(Some(Sku { id: SkuId(1), stock: 3 }));
//!     mock.expect_get(SkuId(2)).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(SkuId(1)).await.unwrap().unwrap().stock, 3);
//!     assert!(matches!(client.get(SkuId(2)).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::RecordClient;
use crate::entity::Record;
use crate::error::FrameworkError;
use crate::message::RecordRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: Record> {
    Create {
        response: Result<T, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

pub struct MockClient<T: Record> {
    client: RecordClient<T>,
    expectations: Queue<T>,
    mismatches: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn mismatch(id: String) -> FrameworkError {
    FrameworkError::NotFound(format!("unexpected request for {id}"))
}

impl<T: Record> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<RecordRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let mismatches = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let errors = mismatches.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                let kind = request.kind();
                let note = |what: String| errors.lock().unwrap().push(what);

                match (request, next) {
                    (RecordRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (RecordRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        if id == want {
                            let _ = respond_to.send(response);
                        } else {
                            note(format!("get {id}, expected {want}"));
                            let _ = respond_to.send(Err(mismatch(id.to_string())));
                        }
                    }
                    (RecordRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        RecordRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => {
                        if id == want {
                            let _ = respond_to.send(response);
                        } else {
                            note(format!("update {id}, expected {want}"));
                            let _ = respond_to.send(Err(mismatch(id.to_string())));
                        }
                    }
                    (RecordRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        if id == want {
                            let _ = respond_to.send(response);
                        } else {
                            note(format!("delete {id}, expected {want}"));
                            let _ = respond_to.send(Err(mismatch(id.to_string())));
                        }
                    }
                    (
                        RecordRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => {
                        if id == want {
                            let _ = respond_to.send(response);
                        } else {
                            note(format!("action on {id}, expected {want}"));
                            let _ = respond_to.send(Err(mismatch(id.to_string())));
                        }
                    }
                    // Wrong operation or empty queue: the reply channel is dropped and the
                    // caller observes ActorDropped.
                    (_, Some(_)) => note(format!("unexpected {kind} request")),
                    (_, None) => note(format!("{kind} request with no expectation left")),
                }
            }
        });

        Self {
            client: RecordClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    pub fn client(&self) -> RecordClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    pub fn expect_create(&mut self) -> Expect<'_, T, T> {
        Expect::new(self, Expectation::create)
    }

    pub fn expect_get(&mut self, id: T::Id) -> Expect<'_, T, Option<T>> {
        Expect::new(self, move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> Expect<'_, T, Vec<T>> {
        Expect::new(self, |response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> Expect<'_, T, T> {
        Expect::new(self, move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Expect<'_, T, T> {
        Expect::new(self, move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Expect<'_, T, T::ActionResult> {
        Expect::new(self, move |response| Expectation::Action { id, response })
    }

    /// Panics if an expectation was not consumed or a request did not match.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Mock received unexpected requests: {mismatches:?}");
        }
        let left = self.expectations.lock().unwrap().len();
        if left > 0 {
            panic!("Not all expectations were met. {left} remaining");
        }
    }
}

impl<T: Record> Expectation<T> {
    fn create(response: Result<T, FrameworkError>) -> Self {
        Expectation::Create { response }
    }
}

/// Builder returned by the `expect_*` methods; pick the scripted reply.
pub struct Expect<'a, T: Record, R> {
    mock: &'a MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a>,
}

impl<'a, T: Record, R> Expect<'a, T, R> {
    fn new(
        mock: &'a MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'a,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// A client wired to a receiver the test drives by hand.
///
/// Useful when the test needs to inspect the exact payload a client sent, e.g. which action a
/// domain client built, before scripting the reply.
pub fn create_mock_client<T: Record>(
    buffer_size: usize,
) -> (RecordClient<T>, mpsc::Receiver<RecordRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (RecordClient::new(sender), receiver)
}

/// Next request if it is a Create.
pub async fn expect_create<T: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<T>>,
) -> Option<(T::Create, crate::message::Response<T>)> {
    match receiver.recv().await {
        Some(RecordRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request if it is an Action.
pub async fn expect_action<T: Record>(
    receiver: &mut mpsc::Receiver<RecordRequest<T>>,
) -> Option<(T::Id, T::Action, crate::message::Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(RecordRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
