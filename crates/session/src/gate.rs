//! The session gate: decides auth stack vs. main stack and keeps that
//! decision live.
//!
//! Cold start calls [`SessionGate::resolve`]; until it completes the state
//! is [`GateState::Pending`] and the embedder renders a loading indicator,
//! never either stack. Thereafter the state only moves through the reactive
//! paths: `on_login` (synchronous flip, no waiting for any poll),
//! `logout`, and `on_unauthorized` (the global 401 hook). `resolve` stays
//! callable for explicit reconciliation, e.g. on app foregrounding.

use std::sync::Arc;

use tokio::sync::watch;

use crate::session::{Session, UserType, keys};
use crate::store::{SessionStore, StoreError};

/// Gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Storage has not been read yet; render neither stack.
    Pending,
    Authenticated,
    Unauthenticated,
}

/// Auth-gating over a [`SessionStore`]. Cheap to clone.
#[derive(Clone)]
pub struct SessionGate {
    store: Arc<dyn SessionStore>,
    state_tx: Arc<watch::Sender<GateState>>,
}

impl SessionGate {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (state_tx, _) = watch::channel(GateState::Pending);
        Self {
            store,
            state_tx: Arc::new(state_tx),
        }
    }

    /// Current decision.
    pub fn state(&self) -> GateState {
        *self.state_tx.borrow()
    }

    /// Subscribe to gate decisions; the embedder swaps stacks on change.
    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state_tx.subscribe()
    }

    /// Read the persisted token and user-type marker and settle the gate.
    ///
    /// Authenticated iff the access token is non-empty AND the stored user
    /// type is the seller role. Any read error fails closed.
    pub async fn resolve(&self) -> GateState {
        let state = match self.read_marker().await {
            Ok(true) => GateState::Authenticated,
            Ok(false) => GateState::Unauthenticated,
            Err(err) => {
                tracing::warn!(error = %err, "session storage read failed; failing closed");
                GateState::Unauthenticated
            }
        };
        self.set_state(state);
        state
    }

    async fn read_marker(&self) -> Result<bool, StoreError> {
        let token = self.store.get(keys::ACCESS_TOKEN).await?;
        let user_type = self.store.get(keys::USER_TYPE).await?;
        let authenticated = token.is_some_and(|t| !t.trim().is_empty())
            && user_type.as_deref() == Some(UserType::Seller.as_str());
        Ok(authenticated)
    }

    /// Persist a fresh session and flip to authenticated immediately.
    pub async fn on_login(&self, session: &Session) -> Result<(), StoreError> {
        let profile = serde_json::to_string(&session.profile)
            .map_err(StoreError::backend)?;

        self.store.put(keys::ACCESS_TOKEN, &session.access_token).await?;
        self.store.put(keys::REFRESH_TOKEN, &session.refresh_token).await?;
        self.store.put(keys::API_TOKEN, &session.api_token).await?;
        self.store.put(keys::USER_TYPE, session.user_type.as_str()).await?;
        self.store.put(keys::SELLER_PROFILE, &profile).await?;

        self.set_state(GateState::Authenticated);
        tracing::info!(seller = %session.profile.id, "session established");
        Ok(())
    }

    /// Load the persisted profile, if any.
    pub async fn stored_session(&self) -> Result<Option<Session>, StoreError> {
        let Some(access_token) = self.store.get(keys::ACCESS_TOKEN).await? else {
            return Ok(None);
        };
        let Some(profile) = self.store.get(keys::SELLER_PROFILE).await? else {
            return Ok(None);
        };
        let profile = serde_json::from_str(&profile).map_err(StoreError::backend)?;
        Ok(Some(Session {
            access_token,
            refresh_token: self.store.get(keys::REFRESH_TOKEN).await?.unwrap_or_default(),
            api_token: self.store.get(keys::API_TOKEN).await?.unwrap_or_default(),
            user_type: UserType::Seller,
            profile,
        }))
    }

    /// Remove every session key and flip to unauthenticated.
    ///
    /// The embedder must also reset its navigation stack so no back action
    /// reaches an authenticated screen.
    pub async fn logout(&self) -> Result<(), StoreError> {
        for key in keys::ALL {
            self.store.remove(key).await?;
        }
        self.set_state(GateState::Unauthenticated);
        tracing::info!("session cleared");
        Ok(())
    }

    /// Global 401 teardown, installed in the request interceptor. Purges
    /// the session regardless of which call triggered it.
    pub async fn on_unauthorized(&self) {
        tracing::warn!("401 received; tearing down session");
        if let Err(err) = self.logout().await {
            // Still flip the flag; the stale keys die with the next purge.
            tracing::error!(error = %err, "failed to purge session keys");
            self.set_state(GateState::Unauthenticated);
        }
    }

    fn set_state(&self, state: GateState) {
        self.state_tx.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use kerala_core::SellerId;
    use crate::session::SellerProfile;

    fn seller_session(token: &str) -> Session {
        Session {
            access_token: token.to_string(),
            refresh_token: "refresh".to_string(),
            api_token: "api".to_string(),
            user_type: UserType::Seller,
            profile: SellerProfile {
                id: SellerId::new(),
                name: "Anju".to_string(),
                email: "anju@example.com".to_string(),
                phone: "9876543210".to_string(),
                shop_name: Some("Anju Stores".to_string()),
            },
        }
    }

    /// A store whose reads always fail; the gate must fail closed.
    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn get<'a>(&'a self, _key: &'a str) -> crate::store::StoreFuture<'a, Option<String>> {
            Box::pin(async { Err(StoreError::Backend("disk unavailable".to_string())) })
        }
        fn put<'a>(&'a self, _key: &'a str, _value: &'a str) -> crate::store::StoreFuture<'a, ()> {
            Box::pin(async { Err(StoreError::Backend("disk unavailable".to_string())) })
        }
        fn remove<'a>(&'a self, _key: &'a str) -> crate::store::StoreFuture<'a, ()> {
            Box::pin(async { Err(StoreError::Backend("disk unavailable".to_string())) })
        }
        fn clear(&self) -> crate::store::StoreFuture<'_, ()> {
            Box::pin(async { Err(StoreError::Backend("disk unavailable".to_string())) })
        }
    }

    #[tokio::test]
    async fn starts_pending_until_resolved() {
        let gate = SessionGate::new(Arc::new(MemoryStore::new()));
        assert_eq!(gate.state(), GateState::Pending);
        assert_eq!(gate.resolve().await, GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn resolves_authenticated_for_any_nonempty_token_with_seller_marker() {
        let store = Arc::new(MemoryStore::new());
        store.put(keys::ACCESS_TOKEN, "T").await.unwrap();
        store.put(keys::USER_TYPE, "seller").await.unwrap();

        let gate = SessionGate::new(store);
        assert_eq!(gate.resolve().await, GateState::Authenticated);
        // Idempotent: resolving again reaches the same decision.
        assert_eq!(gate.resolve().await, GateState::Authenticated);
    }

    #[tokio::test]
    async fn missing_either_key_is_unauthenticated() {
        let store = Arc::new(MemoryStore::new());
        store.put(keys::ACCESS_TOKEN, "T").await.unwrap();
        let gate = SessionGate::new(store.clone());
        assert_eq!(gate.resolve().await, GateState::Unauthenticated);

        store.remove(keys::ACCESS_TOKEN).await.unwrap();
        store.put(keys::USER_TYPE, "seller").await.unwrap();
        assert_eq!(gate.resolve().await, GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn empty_token_is_unauthenticated() {
        let store = Arc::new(MemoryStore::new());
        store.put(keys::ACCESS_TOKEN, "   ").await.unwrap();
        store.put(keys::USER_TYPE, "seller").await.unwrap();
        let gate = SessionGate::new(store);
        assert_eq!(gate.resolve().await, GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn read_errors_fail_closed() {
        let gate = SessionGate::new(Arc::new(BrokenStore));
        assert_eq!(gate.resolve().await, GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn login_flips_synchronously_and_persists_all_keys() {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(store.clone());
        let mut rx = gate.subscribe();

        gate.on_login(&seller_session("T")).await.unwrap();
        assert_eq!(gate.state(), GateState::Authenticated);
        assert!(rx.has_changed().unwrap());

        for key in keys::ALL {
            assert!(store.get(key).await.unwrap().is_some(), "missing {key}");
        }

        // A fresh gate over the same store agrees on cold start.
        let cold = SessionGate::new(store);
        assert_eq!(cold.resolve().await, GateState::Authenticated);
    }

    #[tokio::test]
    async fn logout_purges_every_key() {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(store.clone());
        gate.on_login(&seller_session("T")).await.unwrap();

        gate.logout().await.unwrap();
        assert_eq!(gate.state(), GateState::Unauthenticated);
        for key in keys::ALL {
            assert_eq!(store.get(key).await.unwrap(), None, "leaked {key}");
        }
    }

    #[tokio::test]
    async fn unauthorized_teardown_flips_even_when_purge_fails() {
        let gate = SessionGate::new(Arc::new(BrokenStore));
        gate.on_unauthorized().await;
        assert_eq!(gate.state(), GateState::Unauthenticated);
    }

    #[tokio::test]
    async fn stored_session_round_trips_profile() {
        let store = Arc::new(MemoryStore::new());
        let gate = SessionGate::new(store);
        let session = seller_session("T");
        gate.on_login(&session).await.unwrap();

        let loaded = gate.stored_session().await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }
}
