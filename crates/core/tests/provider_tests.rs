// ═══════════════════════════════════════════════════════════════════
// Provider Tests — RemoteSession / RemoteStore construction and
// offline behavior, StaticSession
// ═══════════════════════════════════════════════════════════════════

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use estate_tracker_core::errors::CoreError;
use estate_tracker_core::models::identity::Identity;
use estate_tracker_core::providers::remote_session::RemoteSession;
use estate_tracker_core::providers::remote_store::RemoteStore;
use estate_tracker_core::providers::static_session::StaticSession;
use estate_tracker_core::providers::traits::{PersistenceProvider, SessionProvider};

// ═══════════════════════════════════════════════════════════════════
//  RemoteSession (no network: token-less paths only)
// ═══════════════════════════════════════════════════════════════════

mod remote_session {
    use super::*;

    #[test]
    fn name() {
        let session = RemoteSession::new("https://example.supabase.co", "anon-key");
        assert_eq!(session.name(), "RemoteSession");
    }

    #[tokio::test]
    async fn no_token_means_no_identity() {
        let session = RemoteSession::new("https://example.supabase.co", "anon-key");
        // Without an access token there is nothing to look up — and no
        // network call is made.
        assert!(session.current_identity().await.unwrap().is_none());
    }

    #[test]
    fn access_token_roundtrip() {
        let session = RemoteSession::new("https://example.supabase.co", "anon-key");
        assert!(matches!(
            session.access_token(),
            Err(CoreError::NotSignedIn)
        ));

        session.set_access_token("jwt-token");
        assert_eq!(session.access_token().unwrap(), "jwt-token");
    }

    #[tokio::test]
    async fn sign_out_without_token_is_ok_and_notifies() {
        let session = RemoteSession::new("https://example.supabase.co", "anon-key");
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        session.on_identity_change(Box::new(move |identity| {
            assert!(identity.is_none());
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        session.sign_out().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            session.access_token(),
            Err(CoreError::NotSignedIn)
        ));
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        // Construction must not panic or double the slash later.
        let _session = RemoteSession::new("https://example.supabase.co/", "anon-key");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RemoteStore (construction only — calls need a live backend)
// ═══════════════════════════════════════════════════════════════════

mod remote_store {
    use super::*;

    #[test]
    fn name() {
        let store = RemoteStore::new("https://example.supabase.co", "anon-key", "jwt");
        assert_eq!(store.name(), "RemoteStore");
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let _store = RemoteStore::new("https://example.supabase.co/", "anon-key", "jwt");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  StaticSession
// ═══════════════════════════════════════════════════════════════════

mod static_session {
    use super::*;

    #[test]
    fn name() {
        let session = StaticSession::signed_out();
        assert_eq!(session.name(), "StaticSession");
    }

    #[tokio::test]
    async fn fixed_identity_until_sign_out() {
        let session = StaticSession::new(Identity::with_email("user-1", "a@b.cz"));

        let identity = session.current_identity().await.unwrap().unwrap();
        assert_eq!(identity.id, "user-1");
        assert_eq!(identity.email.as_deref(), Some("a@b.cz"));

        session.sign_out().await.unwrap();
        assert!(session.current_identity().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn signed_out_has_no_identity() {
        let session = StaticSession::signed_out();
        assert!(session.current_identity().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn every_listener_is_notified() {
        let session = StaticSession::new(Identity::new("user-1"));
        let calls = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = calls.clone();
            session.on_identity_change(Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        session.sign_out().await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
