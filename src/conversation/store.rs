use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use super::context::ConversationContext;
use super::StoreError;

/// Persistence seam for conversation contexts, keyed by customer: one
/// active conversation per customer at a time, expiring after a TTL so a
/// returning customer starts clean instead of resuming a stale thread.
///
/// `save` is a compare-and-set: the caller passes the revision it loaded,
/// and the store only writes if nobody else advanced the context since.
/// A conflict means a concurrent turn for the same customer won; the
/// losing turn reloads and retries or gives up.
pub trait ConversationStore {
    fn load(&self, customer_id: &str) -> Result<Option<ConversationContext>, StoreError>;

    /// Persist `context` under its customer with `revision` bumped, iff the
    /// stored revision still equals `expected_revision` (0 for a new or
    /// expired conversation). Returns the context as stored.
    fn save(
        &self,
        context: ConversationContext,
        expected_revision: u64,
        ttl: Duration,
    ) -> Result<ConversationContext, StoreError>;
}

impl<T: ConversationStore + ?Sized> ConversationStore for std::sync::Arc<T> {
    fn load(&self, customer_id: &str) -> Result<Option<ConversationContext>, StoreError> {
        (**self).load(customer_id)
    }

    fn save(
        &self,
        context: ConversationContext,
        expected_revision: u64,
        ttl: Duration,
    ) -> Result<ConversationContext, StoreError> {
        (**self).save(context, expected_revision, ttl)
    }
}

struct StoredEntry {
    context: ConversationContext,
    expires_at: Instant,
}

/// Mutex-guarded map store, the default for single-process deployments
/// and for tests.
#[derive(Default)]
pub struct InMemoryConversationStore {
    inner: Mutex<HashMap<String, StoredEntry>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn load(&self, customer_id: &str) -> Result<Option<ConversationContext>, StoreError> {
        let map = self.inner.lock().map_err(|e| StoreError::Lock(e.to_string()))?;
        Ok(map
            .get(customer_id)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.context.clone()))
    }

    fn save(
        &self,
        mut context: ConversationContext,
        expected_revision: u64,
        ttl: Duration,
    ) -> Result<ConversationContext, StoreError> {
        let mut map = self.inner.lock().map_err(|e| StoreError::Lock(e.to_string()))?;
        // An expired entry counts as absent for the revision check.
        let current = map
            .get(&context.customer_id)
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.context.revision)
            .unwrap_or(0);
        if current != expected_revision {
            return Err(StoreError::RevisionConflict {
                expected: expected_revision,
                found: current,
            });
        }
        context.revision = current + 1;
        debug!(
            customer = %context.customer_id,
            conversation = %context.id,
            revision = context.revision,
            "conversation saved"
        );
        map.insert(
            context.customer_id.clone(),
            StoredEntry {
                context: context.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(3600);

    #[test]
    fn save_bumps_revision_and_load_round_trips() {
        let store = InMemoryConversationStore::new();
        let ctx = ConversationContext::new("cust-1");

        let stored = store.save(ctx, 0, TTL).unwrap();
        assert_eq!(stored.revision, 1);

        let loaded = store.load("cust-1").unwrap().unwrap();
        assert_eq!(loaded.revision, 1);
        assert_eq!(loaded.customer_id, "cust-1");
    }

    #[test]
    fn stale_revision_is_rejected() {
        let store = InMemoryConversationStore::new();
        let ctx = ConversationContext::new("cust-1");

        let stored = store.save(ctx, 0, TTL).unwrap();
        // Writer A advances the context.
        let _ = store.save(stored.clone(), stored.revision, TTL).unwrap();
        // Writer B still holds revision 1 and must lose.
        let err = store.save(stored.clone(), stored.revision, TTL).unwrap_err();
        assert!(matches!(
            err,
            StoreError::RevisionConflict { expected: 1, found: 2 }
        ));
    }

    #[test]
    fn expired_conversation_loads_as_none_and_resets_revision() {
        let store = InMemoryConversationStore::new();
        let ctx = ConversationContext::new("cust-1");
        store.save(ctx, 0, Duration::ZERO).unwrap();

        assert!(store.load("cust-1").unwrap().is_none());
        // The expired entry no longer guards the revision.
        let fresh = store
            .save(ConversationContext::new("cust-1"), 0, TTL)
            .unwrap();
        assert_eq!(fresh.revision, 1);
    }

    #[test]
    fn unknown_customer_loads_as_none() {
        let store = InMemoryConversationStore::new();
        assert!(store.load("nobody").unwrap().is_none());
    }
}
