//! Request State
//!
//! Every view goes through the same cycle: nothing requested yet, waiting,
//! data, or an error message. [`RequestState`] models that cycle once so
//! views do not each juggle `loading`/`error`/`data` flags.
//!
//! [`RequestScope`] ties in-flight requests to the lifetime of a view.
//! Closing or dropping the scope aborts every pending request, so a result
//! never lands on a view that is already gone.

use futures_util::future::{AbortHandle, Abortable};
use std::collections::HashMap;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lifecycle of one request as seen by a view
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Success(T),
    Failure(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    /// Mark the request as in flight
    pub fn start(&mut self) {
        *self = RequestState::Loading;
    }

    /// Record the outcome; errors keep only their message
    pub fn finish<E: Display>(&mut self, result: Result<T, E>) {
        *self = match result {
            Ok(data) => RequestState::Success(data),
            Err(e) => RequestState::Failure(e.to_string()),
        };
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> RequestState<U> {
        match self {
            RequestState::Idle => RequestState::Idle,
            RequestState::Loading => RequestState::Loading,
            RequestState::Success(data) => RequestState::Success(f(data)),
            RequestState::Failure(message) => RequestState::Failure(message),
        }
    }
}

impl<T, E: Display> From<Result<T, E>> for RequestState<T> {
    fn from(result: Result<T, E>) -> Self {
        let mut state = RequestState::Idle;
        state.finish(result);
        state
    }
}

#[derive(Default)]
struct ScopeInner {
    closed: bool,
    next_id: u64,
    handles: HashMap<u64, AbortHandle>,
}

/// Cancels every request started for one view when the view goes away
#[derive(Default)]
pub struct RequestScope {
    inner: Mutex<ScopeInner>,
}

impl RequestScope {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ScopeInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `fut` unless the scope closes first
    ///
    /// Returns `None` if the scope was already closed or was closed while
    /// the future was pending.
    pub async fn track<F: Future>(&self, fut: F) -> Option<F::Output> {
        let (id, registration) = {
            let mut inner = self.lock();
            if inner.closed {
                return None;
            }
            let (handle, registration) = AbortHandle::new_pair();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.handles.insert(id, handle);
            (id, registration)
        };

        let _tracked = Tracked { scope: self, id };
        Abortable::new(fut, registration).await.ok()
    }

    /// Requests currently in flight
    pub fn pending(&self) -> usize {
        self.lock().handles.len()
    }

    /// Abort everything in flight and refuse new work
    pub fn close(&self) {
        let mut inner = self.lock();
        inner.closed = true;
        for (_, handle) in inner.handles.drain() {
            handle.abort();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

/// Forgets the abort handle once its request settles or is dropped
struct Tracked<'a> {
    scope: &'a RequestScope,
    id: u64,
}

impl Drop for Tracked<'_> {
    fn drop(&mut self) {
        self.scope.lock().handles.remove(&self.id);
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        self.close();
    }
}

/// Shared [`RequestState`] slot that only a live scope may update
#[derive(Debug)]
pub struct Loader<T> {
    state: Arc<Mutex<RequestState<T>>>,
}

impl<T> Clone for Loader<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(RequestState::Idle)),
        }
    }
}

impl<T: Clone> Loader<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn snapshot(&self) -> RequestState<T> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `fut` within `scope` and record its outcome
    ///
    /// If the scope closes before `fut` completes, the state stays
    /// `Loading` and `false` is returned.
    pub async fn load<F, E>(&self, scope: &RequestScope, fut: F) -> bool
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        if scope.is_closed() {
            return false;
        }
        self.set(|state| state.start());

        match scope.track(fut).await {
            Some(result) => {
                self.set(|state| state.finish(result));
                true
            }
            None => {
                tracing::debug!("Request abandoned: view closed");
                false
            }
        }
    }

    fn set<F: FnOnce(&mut RequestState<T>)>(&self, f: F) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }
}
