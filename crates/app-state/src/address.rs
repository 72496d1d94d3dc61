//! Address state adapter
//!
//! Reads the flat key/value map of the page address for one namespace and
//! commits a replacement map back through navigation.

use crate::namespace::Namespace;
use crate::navigator::Navigator;
use crate::search_params::SearchParams;

/// Namespaced view over a [`Navigator`]
#[derive(Debug, Clone)]
pub struct AddressState<N> {
    navigator: N,
}

impl<N: Navigator> AddressState<N> {
    /// Wrap a navigator
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    /// The wrapped navigator
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Full, unscoped query component
    pub fn snapshot(&self) -> SearchParams {
        self.navigator.search_params()
    }

    /// Entries owned by `namespace`, with the prefix stripped
    ///
    /// Unknown keys are returned verbatim; narrowing to declared filters
    /// happens in the callers.
    pub fn read(&self, namespace: &Namespace) -> SearchParams {
        scoped_entries(&self.navigator.search_params(), namespace)
    }

    /// Single value under `key` in `namespace`
    pub fn get(&self, key: &str, namespace: &Namespace) -> Option<String> {
        self.navigator
            .search_params()
            .get(&namespace.qualify(key))
            .map(str::to_string)
    }

    /// Replace every entry owned by `namespace` with `entries`, then navigate
    ///
    /// Entries outside the namespace are left untouched and keep their order.
    pub fn write(&self, namespace: &Namespace, entries: &SearchParams) {
        let next = replace_scope(&self.navigator.search_params(), namespace, entries);

        tracing::debug!(
            prefix = namespace.prefix().unwrap_or(""),
            entries = entries.len(),
            "Committing filters to address"
        );

        self.navigator.navigate(next);
    }
}

/// Entries of `params` owned by `namespace`, prefix stripped
pub fn scoped_entries(params: &SearchParams, namespace: &Namespace) -> SearchParams {
    params
        .iter()
        .filter_map(|(key, value)| namespace.strip(key).map(|bare| (bare, value)))
        .collect()
}

/// New params where `namespace` holds exactly `entries`
pub fn replace_scope(
    params: &SearchParams,
    namespace: &Namespace,
    entries: &SearchParams,
) -> SearchParams {
    let mut next = params.clone();
    next.retain(|key, _| !namespace.owns(key));
    for (key, value) in entries.iter() {
        next.append(namespace.qualify(key), value);
    }
    next
}
