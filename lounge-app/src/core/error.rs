//! Record store errors mapped onto [`AppError`]
//!
//! Whether a store failure is a read or a write decides its code, so the
//! mapping happens at the call site.

use lounge_client::{ClientError, ClientResult};
use shared::error::{AppError, ErrorCode};

/// Extension for store results
pub trait StoreResultExt<T> {
    /// Map a failed read to `RemoteReadFailed`
    fn on_read(self, context: &str) -> Result<T, AppError>;

    /// Map a failed write to `RemoteWriteFailed`
    fn on_write(self, context: &str) -> Result<T, AppError>;
}

impl<T> StoreResultExt<T> for ClientResult<T> {
    fn on_read(self, context: &str) -> Result<T, AppError> {
        self.map_err(|e| store_error(ErrorCode::RemoteReadFailed, context, e))
    }

    fn on_write(self, context: &str) -> Result<T, AppError> {
        self.map_err(|e| store_error(ErrorCode::RemoteWriteFailed, context, e))
    }
}

fn store_error(code: ErrorCode, context: &str, err: ClientError) -> AppError {
    let err = match err {
        ClientError::NotFound(what) => return AppError::not_found(what),
        other => other,
    };
    AppError::with_message(code, format!("{}: {}", context, err))
        .with_detail("context", context)
        .with_detail("source", err.to_string())
}
