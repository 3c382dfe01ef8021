// rest-client/src/resource.rs
use crate::client::Api;
use crate::http::HttpClient;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// A named group of endpoints sharing one dispatcher
pub trait Resource<C: HttpClient>: Send + Sync + 'static {
    /// Registry key; unique per resource group
    const NAME: &'static str;

    fn new(api: Api<C>) -> Self;
}

/// Memoizing factory for resource groups, keyed by name.
///
/// Entries are built on first access and live as long as the registry.
#[derive(Default)]
pub struct ResourceRegistry {
    instances: Mutex<HashMap<&'static str, Arc<dyn Any + Send + Sync>>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the instance registered as `R::NAME`, building it first if needed.
    ///
    /// The lock is held while building, so concurrent first accesses still
    /// produce exactly one instance.
    ///
    /// # Panics
    ///
    /// If `R::NAME` was already claimed by a different type.
    pub fn get_or_init<C, R>(&self, api: &Api<C>) -> Arc<R>
    where
        C: HttpClient,
        R: Resource<C>,
    {
        let mut instances = self
            .instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let instance = instances
            .entry(R::NAME)
            .or_insert_with(|| {
                debug!(resource = R::NAME, "building resource group");
                let instance: Arc<dyn Any + Send + Sync> = Arc::new(R::new(api.clone()));
                instance
            })
            .clone();
        drop(instances);

        match instance.downcast::<R>() {
            Ok(resource) => resource,
            Err(_) => panic!(
                "resource name `{}` is registered with a different type",
                R::NAME
            ),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let instances = self
            .instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = instances.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("ResourceRegistry")
            .field("instances", &names)
            .finish()
    }
}
