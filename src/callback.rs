//! Legacy callback adapter.
//!
//! Older consumers of the store used an `(error, result)` completion
//! callback instead of awaiting a result. This module translates between
//! the two conventions at the boundary so the store itself carries a
//! single async contract.

use std::future::Future;

use crate::error::{Result, StoreError};

/// Completion callback in the legacy `(error, result)` style, expressed as
/// a `Result` reference: `Err` on failure, `Ok` with the value on success.
pub type Callback<T> = Box<dyn FnOnce(std::result::Result<&T, &StoreError>) + Send>;

/// Run `op`, delivering its outcome through `callback` when one is given.
///
/// Every outcome is reported exactly once. With a callback, both success
/// and failure go to the callback; a failure consumed by the callback is
/// not additionally propagated, so the returned future resolves to
/// `Ok(None)`. Without a callback, failures propagate through the returned
/// `Result` as usual.
pub async fn with_callback<T, F>(callback: Option<Callback<T>>, op: F) -> Result<Option<T>>
where
    F: Future<Output = Result<T>>,
{
    match op.await {
        Ok(value) => {
            if let Some(cb) = callback {
                cb(Ok(&value));
            }
            Ok(Some(value))
        }
        Err(err) => match callback {
            Some(cb) => {
                cb(Err(&err));
                Ok(None)
            }
            None => Err(err),
        },
    }
}
