//! Change dispatch table.
//!
//! The registry maps a [`ModelPath`] to the reactions that run when the value
//! at that path changes. Reactions receive the owning model explicitly, so a
//! model can keep its own registry: clone the reaction handles out with
//! [`ChangeRegistry::reactions_for`], then invoke them with `&mut self`.
//!
//! Reactions for a path run in registration order.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::core::ModelPath;

/// A reaction to a change, invoked with the model and the changed path.
pub type Reaction<T> = Rc<dyn Fn(&mut T, ModelPath)>;

/// Unique identifier for a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    /// Create a new subscription ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// A registered reaction.
pub struct Subscription<T> {
    /// Unique identifier.
    pub id: SubscriptionId,

    /// Human-readable name (for debugging).
    pub name: String,

    /// The path this subscription watches.
    pub path: ModelPath,

    reaction: Reaction<T>,
}

impl<T> Clone for Subscription<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            path: self.path,
            reaction: Rc::clone(&self.reaction),
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Registry of change reactions for a model of type `T`.
pub struct ChangeRegistry<T> {
    /// All subscriptions, in registration order.
    subscriptions: Vec<Subscription<T>>,

    /// Index by path for dispatch.
    by_path: FxHashMap<ModelPath, Vec<SubscriptionId>>,

    /// Next subscription ID to allocate.
    next_id: u32,
}

impl<T> Default for ChangeRegistry<T> {
    fn default() -> Self {
        Self {
            subscriptions: Vec::new(),
            by_path: FxHashMap::default(),
            next_id: 0,
        }
    }
}

impl<T> std::fmt::Debug for ChangeRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeRegistry")
            .field("subscriptions", &self.subscriptions)
            .finish()
    }
}

impl<T> ChangeRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reaction for a path, returns its ID.
    pub fn register<F>(&mut self, path: ModelPath, name: impl Into<String>, reaction: F) -> SubscriptionId
    where
        F: Fn(&mut T, ModelPath) + 'static,
    {
        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;

        self.by_path.entry(path).or_default().push(id);
        self.subscriptions.push(Subscription {
            id,
            name: name.into(),
            path,
            reaction: Rc::new(reaction),
        });
        id
    }

    /// Reactions registered for a path, in registration order.
    ///
    /// The handles are cloned out so the caller may invoke them while holding
    /// a mutable borrow of the model that owns this registry.
    #[must_use]
    pub fn reactions_for(&self, path: ModelPath) -> Vec<Reaction<T>> {
        let Some(ids) = self.by_path.get(&path) else {
            return Vec::new();
        };

        ids.iter()
            .filter_map(|id| self.subscriptions.iter().find(|s| s.id == *id))
            .map(|s| Rc::clone(&s.reaction))
            .collect()
    }

    /// All subscriptions, in registration order.
    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription<T>] {
        &self.subscriptions
    }

    /// Get total subscription count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
