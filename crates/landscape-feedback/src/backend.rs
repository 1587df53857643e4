//! Text-generation backends and their lazily initialized holder.

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading or calling a backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("text backend unavailable: {0}")]
    Unavailable(String),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error talking to text backend: {0}")]
    Io(#[from] io::Error),

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("text backend produced non-UTF-8 output")]
    InvalidOutput,
}

/// A text-generation capability.
///
/// `Ok(None)` means the backend ran but had nothing to say; callers treat it
/// the same as an error and fall back to templated feedback.
pub trait TextBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Generate at most `max_length` characters for `prompt`.
    fn generate(&self, prompt: &str, max_length: usize) -> Result<Option<String>, BackendError>;
}

/// A backend that never produces text.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl TextBackend for NullBackend {
    fn name(&self) -> &str {
        "null"
    }

    fn generate(&self, _prompt: &str, _max_length: usize) -> Result<Option<String>, BackendError> {
        Ok(None)
    }
}

/// Builds a backend on first use.
pub type BackendLoader =
    Box<dyn Fn() -> Result<Arc<dyn TextBackend>, BackendError> + Send + Sync>;

/// Observable lifecycle of a [`BackendSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendPhase {
    Uninitialized,
    Attempting,
    Ready,
    Disabled,
}

enum BackendState {
    Uninitialized,
    Attempting,
    Ready(Arc<dyn TextBackend>),
    Disabled,
}

/// Holds a backend that is loaded at most once per process.
///
/// The first call to [`BackendSlot::backend`] runs the loader while holding
/// the slot lock, so concurrent callers wait for that attempt instead of
/// starting their own. A failed load disables the slot until
/// [`BackendSlot::reset`]. If the loader panics the lock is poisoned with the
/// state left at `Attempting`, which later callers treat as disabled.
pub struct BackendSlot {
    loader: BackendLoader,
    state: Mutex<BackendState>,
}

impl BackendSlot {
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn TextBackend>, BackendError> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            state: Mutex::new(BackendState::Uninitialized),
        }
    }

    /// A slot that already holds `backend`.
    pub fn ready(backend: Arc<dyn TextBackend>) -> Self {
        let reload = Arc::clone(&backend);
        Self {
            loader: Box::new(move || Ok(Arc::clone(&reload))),
            state: Mutex::new(BackendState::Ready(backend)),
        }
    }

    /// A slot that never yields a backend.
    pub fn disabled() -> Self {
        Self {
            loader: Box::new(|| Err(BackendError::Unavailable("disabled".to_string()))),
            state: Mutex::new(BackendState::Disabled),
        }
    }

    pub fn phase(&self) -> BackendPhase {
        match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            BackendState::Uninitialized => BackendPhase::Uninitialized,
            BackendState::Attempting => BackendPhase::Attempting,
            BackendState::Ready(_) => BackendPhase::Ready,
            BackendState::Disabled => BackendPhase::Disabled,
        }
    }

    /// The backend, loading it on first use. `None` when it is unavailable.
    pub fn backend(&self) -> Option<Arc<dyn TextBackend>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            BackendState::Ready(backend) => return Some(Arc::clone(backend)),
            BackendState::Attempting | BackendState::Disabled => return None,
            BackendState::Uninitialized => {}
        }

        *state = BackendState::Attempting;
        match (self.loader)() {
            Ok(backend) => {
                info!(backend = backend.name(), "text backend ready");
                *state = BackendState::Ready(Arc::clone(&backend));
                Some(backend)
            }
            Err(error) => {
                info!(%error, "text backend unavailable, using templated feedback");
                *state = BackendState::Disabled;
                None
            }
        }
    }

    /// Forget the current state so the next use loads again.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!("text backend slot reset");
        *state = BackendState::Uninitialized;
    }
}

impl fmt::Debug for BackendSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSlot")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn counting_slot(succeed: bool) -> (BackendSlot, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let slot = BackendSlot::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            if succeed {
                Ok(Arc::new(NullBackend) as Arc<dyn TextBackend>)
            } else {
                Err(BackendError::Unavailable("no model".to_string()))
            }
        });
        (slot, calls)
    }

    #[test]
    fn loads_once() {
        let (slot, calls) = counting_slot(true);
        assert_eq!(slot.phase(), BackendPhase::Uninitialized);
        assert!(slot.backend().is_some());
        assert!(slot.backend().is_some());
        assert_eq!(slot.phase(), BackendPhase::Ready);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_load_disables_until_reset() {
        let (slot, calls) = counting_slot(false);
        assert!(slot.backend().is_none());
        assert!(slot.backend().is_none());
        assert_eq!(slot.phase(), BackendPhase::Disabled);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        slot.reset();
        assert_eq!(slot.phase(), BackendPhase::Uninitialized);
        assert!(slot.backend().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn concurrent_first_use_loads_once() {
        let (slot, calls) = counting_slot(true);
        let slot = Arc::new(slot);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let slot = Arc::clone(&slot);
                thread::spawn(move || slot.backend().is_some())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("thread"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn panicking_loader_leaves_slot_unusable() {
        let slot = Arc::new(BackendSlot::new(|| panic!("loader exploded")));
        let panicking = Arc::clone(&slot);
        let joined = thread::spawn(move || panicking.backend()).join();
        assert!(joined.is_err());
        assert_eq!(slot.phase(), BackendPhase::Attempting);
        assert!(slot.backend().is_none());
    }

    #[test]
    fn prebuilt_slots() {
        assert_eq!(
            BackendSlot::ready(Arc::new(NullBackend)).phase(),
            BackendPhase::Ready
        );
        let disabled = BackendSlot::disabled();
        assert!(disabled.backend().is_none());
    }
}
