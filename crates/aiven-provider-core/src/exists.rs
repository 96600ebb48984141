//! Existence classification of remote read outcomes

use crate::error::RemoteError;

/// Decide whether a resource still exists after a remote call.
///
/// Returns `(exists, error)`. A 404 means the resource is gone and is not an
/// error. Any other failure keeps the resource (the host must not drop state
/// on an ambiguous failure) and hands the error back. A 2xx status surfaced
/// as an error is treated as success.
pub fn resource_exists(err: Option<RemoteError>) -> (bool, Option<RemoteError>) {
    let Some(err) = err else {
        return (true, None);
    };

    match err {
        RemoteError::Api { status: 404, .. } => (false, None),
        RemoteError::Api { status, .. } if (200..300).contains(&status) => (true, None),
        err => (true, Some(err)),
    }
}

/// Result of a remote read, as a handler consumes it.
#[derive(Debug)]
pub enum ReadOutcome<T> {
    /// The resource exists and was read
    Found(T),
    /// The remote reported the resource as missing
    Gone,
    /// The call failed; the resource is assumed to still exist
    Failed(RemoteError),
}

impl<T> ReadOutcome<T> {
    pub fn is_gone(&self) -> bool {
        matches!(self, ReadOutcome::Gone)
    }

    /// Collapse into `Ok(Some(_))`, `Ok(None)` for gone, or the error.
    pub fn into_result(self) -> Result<Option<T>, RemoteError> {
        match self {
            ReadOutcome::Found(value) => Ok(Some(value)),
            ReadOutcome::Gone => Ok(None),
            ReadOutcome::Failed(err) => Err(err),
        }
    }
}

impl<T> From<Result<T, RemoteError>> for ReadOutcome<T> {
    fn from(result: Result<T, RemoteError>) -> Self {
        match result {
            Ok(value) => ReadOutcome::Found(value),
            Err(err) => match resource_exists(Some(err)) {
                (false, _) => {
                    tracing::info!("Remote resource not found, dropping it from state");
                    ReadOutcome::Gone
                }
                (true, Some(err)) => {
                    tracing::warn!("Remote read failed, keeping state: {}", err);
                    ReadOutcome::Failed(err)
                }
                // A 2xx status carried no body we could use.
                (true, None) => ReadOutcome::Failed(RemoteError::Other(anyhow::anyhow!(
                    "remote call reported success without a result"
                ))),
            },
        }
    }
}
