//! Module identity and lifecycle state

use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Statically checked identifier of a module type
///
/// Keys are created from the module type itself, so a lookup can only name a
/// type that exists. Equality and hashing use the type identity; the name is
/// carried for logs and error messages.
#[derive(Clone, Copy)]
pub struct ModuleKey {
    type_id: TypeId,
    type_name: &'static str,
}

impl ModuleKey {
    /// Key of module type `T`
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without module paths, e.g. `FacadeModule<SecurityFacade>`
    pub fn name(&self) -> String {
        short_type_name(self.type_name)
    }

    /// Whether this key identifies `T`
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for ModuleKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ModuleKey {}

impl Hash for ModuleKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModuleKey").field(&self.name()).finish()
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Strip module paths from every path segment of a type name
///
/// `a::b::Outer<c::Inner, d::Other>` becomes `Outer<Inner, Other>`.
pub fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            segment.push(ch);
        } else {
            push_last_segment(&mut out, &segment);
            segment.clear();
            out.push(ch);
        }
    }
    push_last_segment(&mut out, &segment);
    out
}

fn push_last_segment(out: &mut String, path: &str) {
    out.push_str(path.rsplit("::").next().unwrap_or(path));
}

/// Lifecycle state of a registered module
///
/// ```text
/// Declared -> Starting -> Started -> Stopping -> Stopped
/// ```
///
/// `Stopped` is terminal for an instance; starting again requires a fresh
/// instance from the factory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ModuleState {
    /// Registered, not yet instantiated
    #[default]
    Declared,
    /// Instantiated, `start` in progress
    Starting,
    /// `start` returned successfully
    Started,
    /// `stop` in progress
    Stopping,
    /// Stopped and released
    Stopped,
}

impl ModuleState {
    /// Whether dependents may use the module
    pub fn is_started(self) -> bool {
        matches!(self, Self::Started)
    }

    /// Whether `next` is a legal successor of this state
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Declared, Self::Starting)
                | (Self::Starting, Self::Started)
                | (Self::Starting, Self::Stopped)
                | (Self::Started, Self::Stopping)
                | (Self::Stopping, Self::Stopped)
        )
    }
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Declared => "declared",
            Self::Starting => "starting",
            Self::Started => "started",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Snapshot of one registered module
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleStatus {
    /// Short module name
    pub name: String,
    /// Current lifecycle state
    pub state: ModuleState,
    /// Declared dependencies, in declaration order
    pub dependencies: Vec<String>,
}
