//! Memoized derivation of human-readable operation names.
//!
//! Deriving a display name for an intercepted operation (strip a conventional
//! suffix from the request type, normalize the service string, join the two)
//! is cheap once but happens on every intercepted call. The cache here makes
//! it a map lookup on the hot path.
//!
//! Derivation is a pure function of its inputs, so the cache is strictly a
//! performance optimization: two threads racing on the same miss may both
//! compute, and both arrive at the identical string. The map is keyed by the
//! type's numeric token, never by the descriptor itself, so a cache entry
//! cannot extend the lifetime of a dynamically generated type it names.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A borrowed type descriptor identifying the shape of an operation.
///
/// `token` must be stable and unique for the process lifetime of the type it
/// names; `simple_name` is the unqualified display name. The cache retains
/// neither — only the token and the derived string.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey<'a> {
    pub token: u64,
    pub simple_name: &'a str,
}

impl<'a> TypeKey<'a> {
    pub fn new(token: u64, simple_name: &'a str) -> Self {
        Self { token, simple_name }
    }
}

type NameFn = dyn Fn(&TypeKey<'_>) -> String + Send + Sync;
type NormalizeFn = dyn Fn(&str) -> String + Send + Sync;

/// Joins a normalized context string with a derived partial name.
///
/// `Join::suffix(".", f)` yields `f(context) + "." + partial`, e.g.
/// `"Storage" + "." + "PutObject"`.
pub struct Join {
    separator: String,
    normalize: Box<NormalizeFn>,
}

impl Join {
    pub fn suffix(
        separator: impl Into<String>,
        normalize: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            separator: separator.into(),
            normalize: Box::new(normalize),
        }
    }

    fn join(&self, context: &str, partial: &str) -> String {
        let normalized = (self.normalize)(context);
        format!("{normalized}{}{partial}", self.separator)
    }
}

/// Memoizes the qualified display name for (type, context) pairs.
///
/// Both derivation steps are supplied at construction and must be total and
/// side-effect-free. A panic inside either one propagates to the caller of
/// [`resolve`](Self::resolve) — a broken derivation is a defect in the
/// instrumentation, not an environmental fault to be contained.
pub struct QualifiedNameCache {
    name_of: Box<NameFn>,
    join: Join,
    names: RwLock<HashMap<u64, Arc<str>>>,
    qualified: RwLock<HashMap<(u64, String), Arc<str>>>,
}

impl QualifiedNameCache {
    pub fn new(name_of: impl Fn(&TypeKey<'_>) -> String + Send + Sync + 'static, join: Join) -> Self {
        Self {
            name_of: Box::new(name_of),
            join,
            names: RwLock::new(HashMap::new()),
            qualified: RwLock::new(HashMap::new()),
        }
    }

    /// The memoized primary derivation alone, e.g. `PutObjectRequest` ->
    /// `PutObject`.
    pub fn name(&self, key: &TypeKey<'_>) -> Arc<str> {
        if let Some(hit) = self.names.read().expect("name cache poisoned").get(&key.token) {
            return Arc::clone(hit);
        }
        // Compute outside the lock; a racing thread computing the same pure
        // result is harmless.
        let computed: Arc<str> = Arc::from((self.name_of)(key));
        let mut names = self.names.write().expect("name cache poisoned");
        Arc::clone(names.entry(key.token).or_insert(computed))
    }

    /// The memoized qualified display name for a (type, context) pair.
    pub fn resolve(&self, key: &TypeKey<'_>, context: &str) -> Arc<str> {
        {
            let qualified = self.qualified.read().expect("qualified cache poisoned");
            if let Some(hit) = qualified.get(&(key.token, context.to_string())) {
                return Arc::clone(hit);
            }
        }
        let partial = self.name(key);
        let computed: Arc<str> = Arc::from(self.join.join(context, &partial));
        let mut qualified = self.qualified.write().expect("qualified cache poisoned");
        Arc::clone(
            qualified
                .entry((key.token, context.to_string()))
                .or_insert(computed),
        )
    }

    /// Alias matching the decorator's call shape.
    pub fn qualified_name(&self, key: &TypeKey<'_>, context: &str) -> Arc<str> {
        self.resolve(key, context)
    }
}
