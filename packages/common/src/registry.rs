use pagetree_ast::BlockKind;
use std::collections::BTreeSet;

/// Answers whether a block type can be rendered.
///
/// This is the only thing the engine needs to know about blocks; prop
/// schemas and rendering live elsewhere.
pub trait TypeRegistry {
    fn is_known_type(&self, name: &str) -> bool;

    fn is_known_kind(&self, kind: &BlockKind) -> bool {
        self.is_known_type(kind.as_str())
    }
}

/// Registry of renderable block types, built once at startup
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    known: BTreeSet<String>,
}

impl ComponentRegistry {
    /// Registry with no types at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every built-in block
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for kind in BlockKind::BUILTINS.iter() {
            registry.register(kind.as_str());
        }
        registry
    }

    /// Register a block type added after the built-ins
    pub fn register(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !name.is_empty() {
            self.known.insert(name);
        }
        self
    }

    pub fn extend<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.register(name);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

impl TypeRegistry for ComponentRegistry {
    fn is_known_type(&self, name: &str) -> bool {
        self.known.contains(name)
    }
}

/// Fixed registry for tests
pub struct MockRegistry {
    pub known_types: BTreeSet<String>,
}

impl MockRegistry {
    pub fn new(names: &[&str]) -> Self {
        Self {
            known_types: names.iter().map(|name| name.to_string()).collect(),
        }
    }
}

impl TypeRegistry for MockRegistry {
    fn is_known_type(&self, name: &str) -> bool {
        self.known_types.contains(name)
    }
}

impl<R: TypeRegistry + ?Sized> TypeRegistry for &R {
    fn is_known_type(&self, name: &str) -> bool {
        (**self).is_known_type(name)
    }
}
