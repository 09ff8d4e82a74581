//! # Mock Remote Collection
//!
//! `MockCollection<T>` implements [`RemoteCollection<T>`] entirely in memory. Tests queue
//! expected calls with canned responses, hand the collection to a
//! [`Synchronizer`](crate::Synchronizer) or [`SyncActor`](crate::SyncActor), and then
//! inspect the recorded calls (including the exact JSON bodies that would have been sent).
//!
//! | | MockCollection | HttpCollection + fake server |
//! |---|---|---|
//! | **Speed** | Instant | Binds a local port |
//! | **Error injection** | `return_err(..)` | Needs server-side handlers |
//! | **Covers** | Synchronizer logic | Wire format and status handling |
//!
//! ```rust,ignore
//! let mut mock = MockCollection::<Warehouse>::new();
//! mock.expect_list().return_ok(vec![warehouse]);
//! mock.expect_update(WarehouseId(1)).return_err(RemoteError::Transport("down".into()));
//!
//! let mut sync = Synchronizer::new(mock.collection(), SyncOptions::default());
//! // drive sync ...
//! assert_eq!(mock.calls().len(), 2);
//! mock.verify(); // every expectation was consumed
//! ```
//!
//! Calls arriving with no matching expectation panic, just like an unexpected request
//! to a strict mock should.

use crate::record::Record;
use crate::remote::{RemoteCollection, RemoteError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: Record> {
    List {
        response: Result<Vec<T>, RemoteError>,
    },
    Create {
        response: Result<T, RemoteError>,
    },
    Update {
        id: T::Id,
        response: Result<Option<T>, RemoteError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), RemoteError>,
    },
}

/// A call the mock received, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall<T: Record> {
    List,
    Create(T),
    Update(T::Id, T),
    Delete(T::Id),
}

impl<T: Record> RemoteCall<T> {
    /// The JSON body this call would have carried over HTTP.
    pub fn body(&self) -> Option<serde_json::Value> {
        match self {
            RemoteCall::Create(record) | RemoteCall::Update(_, record) => {
                serde_json::to_value(record).ok()
            }
            RemoteCall::List | RemoteCall::Delete(_) => None,
        }
    }
}

struct MockState<T: Record> {
    expectations: VecDeque<Expectation<T>>,
    calls: Vec<RemoteCall<T>>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

/// Expectation-driven stand-in for a remote collection.
pub struct MockCollection<T: Record> {
    state: Shared<T>,
}

impl<T: Record> Default for MockCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockCollection<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                expectations: VecDeque::new(),
                calls: Vec::new(),
            })),
        }
    }

    /// Returns a collection handle sharing this mock's expectations and call log.
    pub fn collection(&self) -> Box<dyn RemoteCollection<T>> {
        Box::new(MockHandle {
            state: self.state.clone(),
        })
    }

    /// Expects a `list` call.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Expects a `create` call.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            state: self.state.clone(),
        }
    }

    /// Expects an `update` call addressed at `id`.
    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Expects a `delete` call addressed at `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectationBuilder<T> {
        DeleteExpectationBuilder {
            id,
            state: self.state.clone(),
        }
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<RemoteCall<T>> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

fn push<T: Record>(state: &Shared<T>, expectation: Expectation<T>) {
    state.lock().unwrap().expectations.push_back(expectation);
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: Record> {
    state: Shared<T>,
}

impl<T: Record> ListExpectationBuilder<T> {
    pub fn return_ok(self, records: Vec<T>) {
        push(&self.state, Expectation::List { response: Ok(records) });
    }

    pub fn return_err(self, error: RemoteError) {
        push(&self.state, Expectation::List { response: Err(error) });
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectationBuilder<T: Record> {
    state: Shared<T>,
}

impl<T: Record> CreateExpectationBuilder<T> {
    /// The server answers with `created`, which should carry the assigned identity.
    pub fn return_ok(self, created: T) {
        push(&self.state, Expectation::Create { response: Ok(created) });
    }

    pub fn return_err(self, error: RemoteError) {
        push(&self.state, Expectation::Create { response: Err(error) });
    }
}

/// Builder for `update` expectations.
pub struct UpdateExpectationBuilder<T: Record> {
    id: T::Id,
    state: Shared<T>,
}

impl<T: Record> UpdateExpectationBuilder<T> {
    /// `None` models a bare acknowledgement.
    pub fn return_ok(self, echoed: Option<T>) {
        push(
            &self.state,
            Expectation::Update {
                id: self.id,
                response: Ok(echoed),
            },
        );
    }

    pub fn return_err(self, error: RemoteError) {
        push(
            &self.state,
            Expectation::Update {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

/// Builder for `delete` expectations.
pub struct DeleteExpectationBuilder<T: Record> {
    id: T::Id,
    state: Shared<T>,
}

impl<T: Record> DeleteExpectationBuilder<T> {
    pub fn return_ok(self, ack: ()) {
        push(
            &self.state,
            Expectation::Delete {
                id: self.id,
                response: Ok(ack),
            },
        );
    }

    pub fn return_err(self, error: RemoteError) {
        push(
            &self.state,
            Expectation::Delete {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

// =============================================================================
// THE MOCK COLLECTION
// =============================================================================

struct MockHandle<T: Record> {
    state: Shared<T>,
}

impl<T: Record> MockHandle<T> {
    fn next(&self, call: RemoteCall<T>) -> Expectation<T> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        match state.expectations.pop_front() {
            Some(expectation) => expectation,
            None => panic!("Unexpected call with no expectation left: {call:?}"),
        }
    }
}

#[async_trait]
impl<T: Record> RemoteCollection<T> for MockHandle<T> {
    async fn list(&self) -> Result<Vec<T>, RemoteError> {
        match self.next(RemoteCall::List) {
            Expectation::List { response } => response,
            _ => panic!("Unexpected request or expectation mismatch: list"),
        }
    }

    async fn create(&self, record: &T) -> Result<T, RemoteError> {
        match self.next(RemoteCall::Create(record.clone())) {
            Expectation::Create { response } => response,
            _ => panic!("Unexpected request or expectation mismatch: create"),
        }
    }

    async fn update(&self, id: T::Id, record: &T) -> Result<Option<T>, RemoteError> {
        match self.next(RemoteCall::Update(id, record.clone())) {
            Expectation::Update {
                id: expected,
                response,
            } => {
                assert_eq!(expected, id, "update addressed at the wrong identity");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: update {id}"),
        }
    }

    async fn delete(&self, id: T::Id) -> Result<(), RemoteError> {
        match self.next(RemoteCall::Delete(id)) {
            Expectation::Delete {
                id: expected,
                response,
            } => {
                assert_eq!(expected, id, "delete addressed at the wrong identity");
                response
            }
            _ => panic!("Unexpected request or expectation mismatch: delete {id}"),
        }
    }
}
