use std::collections::HashMap;
use std::hash::Hash;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Failures produced by the actor plumbing itself rather than by an entity.
///
/// Every entity error type converts from this, so clients only ever see
/// their own domain error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflicts with existing item: {0}")]
    Conflict(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: From<FrameworkError> + Send + Sync + Debug + 'static;

    /// Short name used in log output.
    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    /// Tenant the entity belongs to, used to scope `List` requests.
    fn tenant_id(&self) -> Option<&str> { None }

    /// Describes the clash when `self` may not coexist with an already stored entity.
    fn conflicts_with(&self, _existing: &Self) -> Option<String> { None }

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> { Ok(()) }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> { Ok(()) }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    List {
        tenant: Option<String>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    pub async fn run(mut self) {
        info!(entity = T::KIND, "Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::List { tenant, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list(tenant.as_deref())));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
            }
        }
        info!(entity = T::KIND, stored = self.store.len(), "Actor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, T::Error> {
        let id = (self.next_id_fn)();
        let mut item = T::from_create_params(id.clone(), params)?;
        if let Some(clash) = self.store.values().find_map(|existing| item.conflicts_with(existing)) {
            warn!(entity = T::KIND, %clash, "Create rejected");
            return Err(FrameworkError::Conflict(clash).into());
        }
        item.on_create()?;
        self.store.insert(id.clone(), item);
        debug!(entity = T::KIND, %id, "Created");
        Ok(id)
    }

    // Updates and actions run against a copy so a failed hook never leaves
    // a half-applied entity in the store.
    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        let current = self.store.get(&id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut updated = current.clone();
        updated.on_update(patch)?;
        let clash = self
            .store
            .iter()
            .filter(|(other_id, _)| **other_id != id)
            .find_map(|(_, existing)| updated.conflicts_with(existing));
        if let Some(clash) = clash {
            warn!(entity = T::KIND, %id, %clash, "Update rejected");
            return Err(FrameworkError::Conflict(clash).into());
        }
        self.store.insert(id, updated.clone());
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), T::Error> {
        let item = self.store.get(&id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete()?;
        self.store.remove(&id);
        debug!(entity = T::KIND, %id, "Deleted");
        Ok(())
    }

    fn handle_list(&self, tenant: Option<&str>) -> Vec<T> {
        self.store
            .values()
            .filter(|item| tenant.is_none() || item.tenant_id() == tenant)
            .cloned()
            .collect()
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, T::Error> {
        let current = self.store.get(&id).ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let mut working = current.clone();
        let result = working.handle_action(action)?;
        self.store.insert(id, working);
        Ok(result)
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Derived Clone would require `T: Clone` on the sender, which is not needed.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender.send(build(respond_to))
            .await.map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, T::Error> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, T::Error> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), T::Error> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn list(&self, tenant: Option<String>) -> Result<Vec<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::List { tenant, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, T::Error> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Bin {
        id: String,
        site: String,
        label: String,
        units: u32,
    }

    #[derive(Debug)]
    struct BinCreate {
        site: String,
        label: String,
    }

    #[derive(Debug)]
    struct BinPatch {
        label: Option<String>,
        units: Option<u32>,
    }

    #[derive(Debug)]
    enum BinAction {
        Take(u32),
    }

    #[derive(Debug, Clone, PartialEq, Error)]
    enum BinError {
        #[error("empty label")]
        EmptyLabel,
        #[error("short by {0}")]
        Short(u32),
        #[error(transparent)]
        Framework(#[from] FrameworkError),
    }

    impl Entity for Bin {
        type Id = String;
        type CreateParams = BinCreate;
        type Patch = BinPatch;
        type Action = BinAction;
        type ActionResult = u32;
        type Error = BinError;

        const KIND: &'static str = "bin";

        fn id(&self) -> &String { &self.id }

        fn from_create_params(id: String, params: BinCreate) -> Result<Self, BinError> {
            Ok(Self { id, site: params.site, label: params.label, units: 0 })
        }

        fn tenant_id(&self) -> Option<&str> { Some(&self.site) }

        fn conflicts_with(&self, existing: &Self) -> Option<String> {
            (self.site == existing.site && self.label == existing.label)
                .then(|| format!("label {} at {}", self.label, self.site))
        }

        fn on_update(&mut self, patch: BinPatch) -> Result<(), BinError> {
            if let Some(units) = patch.units {
                self.units = units;
            }
            if let Some(label) = patch.label {
                if label.is_empty() {
                    return Err(BinError::EmptyLabel);
                }
                self.label = label;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: BinAction) -> Result<u32, BinError> {
            match action {
                BinAction::Take(n) if n > self.units => Err(BinError::Short(n - self.units)),
                BinAction::Take(n) => {
                    self.units -= n;
                    Ok(self.units)
                }
            }
        }
    }

    fn start() -> ResourceClient<Bin> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("bin_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    fn bin(site: &str, label: &str) -> BinCreate {
        BinCreate { site: site.into(), label: label.into() }
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = start();
        let id = client.create(bin("north", "A1")).await.unwrap();
        assert_eq!(id, "bin_1");

        client.update(id.clone(), BinPatch { label: None, units: Some(5) }).await.unwrap();
        let left = client.perform_action(id.clone(), BinAction::Take(3)).await.unwrap();
        assert_eq!(left, 2);

        let err = client.perform_action(id.clone(), BinAction::Take(4)).await.unwrap_err();
        assert_eq!(err, BinError::Short(2));
        assert_eq!(client.get(id).await.unwrap().unwrap().units, 2);
    }

    #[tokio::test]
    async fn failed_update_leaves_entity_untouched() {
        let client = start();
        let id = client.create(bin("north", "A1")).await.unwrap();

        let err = client
            .update(id.clone(), BinPatch { label: Some(String::new()), units: Some(9) })
            .await
            .unwrap_err();
        assert_eq!(err, BinError::EmptyLabel);

        let stored = client.get(id).await.unwrap().unwrap();
        assert_eq!(stored.units, 0);
        assert_eq!(stored.label, "A1");
    }

    #[tokio::test]
    async fn conflicting_create_is_rejected() {
        let client = start();
        client.create(bin("north", "A1")).await.unwrap();
        client.create(bin("south", "A1")).await.unwrap();

        let err = client.create(bin("north", "A1")).await.unwrap_err();
        assert!(matches!(err, BinError::Framework(FrameworkError::Conflict(_))));
    }

    #[tokio::test]
    async fn update_into_existing_label_is_rejected() {
        let client = start();
        client.create(bin("north", "A1")).await.unwrap();
        let id = client.create(bin("north", "A2")).await.unwrap();

        // Re-saving its own label is not a clash.
        client.update(id.clone(), BinPatch { label: Some("A2".into()), units: Some(1) }).await.unwrap();

        let err = client
            .update(id.clone(), BinPatch { label: Some("A1".into()), units: Some(7) })
            .await
            .unwrap_err();
        assert!(matches!(err, BinError::Framework(FrameworkError::Conflict(_))));

        let stored = client.get(id).await.unwrap().unwrap();
        assert_eq!(stored.label, "A2");
        assert_eq!(stored.units, 1);
    }

    #[tokio::test]
    async fn list_is_scoped_by_tenant() {
        let client = start();
        client.create(bin("north", "A1")).await.unwrap();
        client.create(bin("north", "A2")).await.unwrap();
        client.create(bin("south", "B1")).await.unwrap();

        assert_eq!(client.list(Some("north".into())).await.unwrap().len(), 2);
        assert_eq!(client.list(Some("east".into())).await.unwrap().len(), 0);
        assert_eq!(client.list(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_ids_report_not_found() {
        let client = start();
        assert_eq!(client.get("bin_9".into()).await.unwrap(), None);
        assert_eq!(
            client.delete("bin_9".into()).await.unwrap_err(),
            BinError::Framework(FrameworkError::NotFound("bin_9".into()))
        );
    }

    #[tokio::test]
    async fn closed_actor_reports_communication_error() {
        let (actor, client) = ResourceActor::<Bin>::new(1, || "bin_x".to_string());
        drop(actor);
        let err = client.create(bin("north", "A1")).await.unwrap_err();
        assert_eq!(err, BinError::Framework(FrameworkError::ActorClosed));
    }
}
