//! Login/registration wired to the session gate.

use std::sync::Arc;

use thiserror::Error;

use kerala_client::{ApiClient, ApiError, LoginRequest, RegisterRequest, SendOtpRequest};
use kerala_session::{SessionGate, StoreError};

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Drives the auth flow: requests against the backend, gate flips on
/// success, and the global 401 teardown hook.
#[derive(Clone)]
pub struct SessionFlow {
    gate: SessionGate,
    client: ApiClient,
}

impl SessionFlow {
    pub fn new(gate: SessionGate, client: ApiClient) -> Self {
        Self { gate, client }
    }

    /// Install the 401 hook: any unauthorized response anywhere tears the
    /// session down, independent of which screen issued the call.
    pub fn install_unauthorized_hook(&self) {
        let gate = self.gate.clone();
        let client = self.client.clone();
        self.client.set_unauthorized_hook(move || {
            client.clear_token();
            let gate = gate.clone();
            tokio::spawn(async move {
                gate.on_unauthorized().await;
            });
        });
    }

    /// On cold start: settle the gate and, if a session is stored, arm the
    /// client with its token.
    pub async fn restore(&self) -> Result<(), FlowError> {
        use kerala_session::GateState;
        if self.gate.resolve().await == GateState::Authenticated {
            if let Some(session) = self.gate.stored_session().await? {
                self.client.set_token(session.access_token);
            }
        }
        Ok(())
    }

    /// Login; on success the gate flips synchronously so the transition
    /// feels immediate.
    pub async fn login(&self, req: &LoginRequest) -> Result<(), FlowError> {
        let session = self.client.login(req).await?.into_session();
        self.gate.on_login(&session).await?;
        Ok(())
    }

    pub async fn send_otp(&self, req: &SendOtpRequest) -> Result<(), FlowError> {
        self.client.send_otp(req).await?;
        Ok(())
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<(), FlowError> {
        let session = self.client.register(req).await?.into_session();
        self.gate.on_login(&session).await?;
        Ok(())
    }

    /// Explicit logout: clear the client token, purge storage, and let the
    /// embedder reset its navigation stack on the gate change.
    pub async fn logout(&self) -> Result<(), FlowError> {
        self.client.clear_token();
        self.gate.logout().await?;
        Ok(())
    }

    pub fn gate(&self) -> &SessionGate {
        &self.gate
    }
}

/// Convenience constructor over the default durable store.
pub fn durable_gate() -> anyhow::Result<SessionGate> {
    let store = kerala_session::SqliteStore::at_default_path()?;
    Ok(SessionGate::new(Arc::new(store)))
}
