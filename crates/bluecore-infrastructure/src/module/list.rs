use super::Module;
use bluecore_domain::value_objects::ModuleKey;

/// Ordered set of module types a module depends on
///
/// Adding the same type twice keeps the first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleList {
    keys: Vec<ModuleKey>,
}

impl ModuleList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dependency on module type `T`
    pub fn add<T: Module>(&mut self) -> &mut Self {
        self.add_key(ModuleKey::of::<T>())
    }

    /// Declare a dependency by key
    pub fn add_key(&mut self, key: ModuleKey) -> &mut Self {
        if !self.keys.contains(&key) {
            self.keys.push(key);
        }
        self
    }

    /// Whether `key` was declared
    pub fn contains(&self, key: &ModuleKey) -> bool {
        self.keys.contains(key)
    }

    /// Declared keys in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleKey> {
        self.keys.iter()
    }

    /// Number of declared dependencies
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing was declared
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Short names of the declared dependencies
    pub fn names(&self) -> Vec<String> {
        self.keys.iter().map(ModuleKey::name).collect()
    }
}

impl<'a> IntoIterator for &'a ModuleList {
    type Item = &'a ModuleKey;
    type IntoIter = std::slice::Iter<'a, ModuleKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
