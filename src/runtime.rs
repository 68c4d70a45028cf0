//! Process-wide runtime state owned by the embedding system.
//!
//! The embedding system calls [`initialize`] once at startup with the
//! handler that should present errors to its users, and [`shutdown`] once
//! at teardown. Encoding and decoding never depend on this state.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::util::{Error, Result};

/// Callback presenting an error to the user.
pub type ErrorHandler = Arc<dyn Fn(&Error) + Send + Sync>;

struct Runtime {
    handler: ErrorHandler,
}

static RUNTIME: RwLock<Option<Runtime>> = parking_lot::const_rwlock(None);

/// Install the error handler.
pub fn initialize<F>(handler: F) -> Result<()>
where
    F: Fn(&Error) + Send + Sync + 'static,
{
    let mut rt = RUNTIME.write();
    if rt.is_some() {
        return Err(Error::AlreadyInitialized);
    }
    *rt = Some(Runtime { handler: Arc::new(handler) });
    tracing::debug!("runtime initialized");
    Ok(())
}

/// Remove the error handler.
pub fn shutdown() -> Result<()> {
    let mut rt = RUNTIME.write();
    if rt.take().is_none() {
        return Err(Error::NotInitialized);
    }
    tracing::debug!("runtime shut down");
    Ok(())
}

pub fn is_initialized() -> bool {
    RUNTIME.read().is_some()
}

/// Forward an error to the installed handler.
///
/// The handler runs without the runtime lock held, so it may itself call
/// [`shutdown`] or [`initialize`].
pub fn report(err: &Error) -> Result<()> {
    let handler = RUNTIME
        .read()
        .as_ref()
        .map(|rt| Arc::clone(&rt.handler))
        .ok_or(Error::NotInitialized)?;
    handler(err);
    Ok(())
}
