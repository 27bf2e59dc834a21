// Extension points for the order ledger.
//
// Two chain shapes cover every hook the ledger exposes: an action chain
// (fire-and-forget observers) and a filter chain (each callback receives the
// value produced by the previous one and returns a replacement). Callbacks
// run synchronously, in registration order.

use std::fmt;
use std::sync::Arc;

/// Ordered list of observers invoked with a subject and a context.
pub struct ActionChain<A: ?Sized, C: ?Sized> {
    observers: Vec<Arc<dyn Fn(&A, &C) + Send + Sync>>,
}

impl<A: ?Sized, C: ?Sized> ActionChain<A, C> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Register an observer at the end of the chain
    pub fn register<F>(&mut self, observer: F)
    where
        F: Fn(&A, &C) + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
    }

    /// Invoke every observer in registration order
    pub fn fire(&self, subject: &A, context: &C) {
        for observer in &self.observers {
            observer(subject, context);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }
}

/// Ordered list of transforms threading a value through the chain.
pub struct FilterChain<V, C: ?Sized> {
    filters: Vec<Arc<dyn Fn(V, &C) -> V + Send + Sync>>,
}

impl<V, C: ?Sized> FilterChain<V, C> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Register a transform at the end of the chain
    pub fn register<F>(&mut self, filter: F)
    where
        F: Fn(V, &C) -> V + Send + Sync + 'static,
    {
        self.filters.push(Arc::new(filter));
    }

    /// Thread `value` through every registered transform in order
    pub fn apply(&self, value: V, context: &C) -> V {
        self.filters
            .iter()
            .fold(value, |value, filter| filter(value, context))
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }
}

impl<A: ?Sized, C: ?Sized> Default for ActionChain<A, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C: ?Sized> Default for FilterChain<V, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized, C: ?Sized> Clone for ActionChain<A, C> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
        }
    }
}

impl<V, C: ?Sized> Clone for FilterChain<V, C> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
        }
    }
}

impl<A: ?Sized, C: ?Sized> fmt::Debug for ActionChain<A, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionChain")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<V, C: ?Sized> fmt::Debug for FilterChain<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}
