use super::{Module, ModuleList};
use bluecore_domain::value_objects::ModuleKey;
use std::fmt;
use std::sync::Arc;

type Constructor = Arc<dyn Fn() -> Arc<dyn Module> + Send + Sync>;

/// Named constructor bound to one module type
///
/// The registry calls the constructor once per `start_all`, when the module's
/// turn in the start order comes.
#[derive(Clone)]
pub struct ModuleFactory {
    key: ModuleKey,
    list_dependencies: fn(&mut ModuleList),
    constructor: Constructor,
    shared: bool,
}

impl ModuleFactory {
    /// Factory for `T` built by `constructor`
    pub fn new<T, F>(constructor: F) -> Self
    where
        T: Module,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            key: ModuleKey::of::<T>(),
            list_dependencies: T::list_dependencies,
            constructor: Arc::new(move || Arc::new(constructor()) as Arc<dyn Module>),
            shared: false,
        }
    }

    /// Factory for a `Default`-constructible module
    pub fn of<T: Module + Default>() -> Self {
        Self::new(T::default)
    }

    /// Factory that hands out a pre-built instance
    ///
    /// Used to inject test doubles. Every instantiation returns the same
    /// `Arc`, so the registry starts such a module at most once.
    pub fn from_instance<T: Module>(instance: Arc<T>) -> Self {
        Self {
            key: ModuleKey::of::<T>(),
            list_dependencies: T::list_dependencies,
            constructor: Arc::new(move || Arc::clone(&instance) as Arc<dyn Module>),
            shared: true,
        }
    }

    /// Key of the module type this factory builds
    pub fn key(&self) -> ModuleKey {
        self.key
    }

    /// Dependencies declared by the module type
    pub fn dependencies(&self) -> ModuleList {
        let mut list = ModuleList::new();
        (self.list_dependencies)(&mut list);
        list
    }

    /// Whether the factory itself keeps the instance alive
    pub(crate) fn is_shared_instance(&self) -> bool {
        self.shared
    }

    pub(crate) fn instantiate(&self) -> Arc<dyn Module> {
        (self.constructor)()
    }
}

impl fmt::Debug for ModuleFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleFactory")
            .field("module", &self.key.name())
            .finish_non_exhaustive()
    }
}
