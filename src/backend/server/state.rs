/**
 * Application State Management
 *
 * `AppState` is cloned into every handler. It holds the auth service and
 * the fatal signal used to stop the process when the store or signing
 * breaks. Nothing in it needs a lock: the service only shares read-only
 * keys and an `Arc` to the store.
 */

use axum::extract::FromRef;
use axum::http::Uri;
use tokio::sync::mpsc;

use crate::backend::auth::service::AuthService;
use crate::backend::error::{AuthError, ErrorBody};

/// Sender half of the process-wide fatal channel
#[derive(Debug, Clone)]
pub struct FatalSignal {
    tx: mpsc::UnboundedSender<String>,
}

/// Receiver half, owned by the binary's shutdown logic
#[derive(Debug)]
pub struct FatalReceiver {
    rx: mpsc::UnboundedReceiver<String>,
}

impl FatalSignal {
    pub fn channel() -> (Self, FatalReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, FatalReceiver { rx })
    }

    /// Ask the process to stop
    pub fn escalate(&self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::error!("Fatal error, shutting down: {}", reason);
        let _ = self.tx.send(reason);
    }
}

impl FatalReceiver {
    /// Wait for the first fatal report
    ///
    /// Pending forever if every sender is dropped without reporting.
    pub async fn recv(&mut self) -> String {
        match self.rx.recv().await {
            Some(reason) => reason,
            None => std::future::pending().await,
        }
    }
}

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub fatal: FatalSignal,
}

impl AppState {
    pub fn new(auth: AuthService, fatal: FatalSignal) -> Self {
        Self { auth, fatal }
    }

    /// Log a failed request with its path and pass the error on
    ///
    /// Fatal errors are also escalated so the server stops.
    pub fn reject(&self, uri: &Uri, err: AuthError) -> AuthError {
        let body = ErrorBody::from(&err);
        if err.is_fatal() {
            tracing::error!(
                path = %uri.path(),
                status = body.status,
                code = body.code,
                msg = %body.msg,
                "{}",
                err
            );
            self.fatal.escalate(err.to_string());
        } else {
            tracing::warn!(
                path = %uri.path(),
                status = body.status,
                code = body.code,
                msg = %body.msg,
                "Request rejected"
            );
        }
        err
    }
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
