//! Fingerprint-keyed memoization for generated scene artifacts.
//!
//! A [`FingerprintCache`] guarantees at-most-one computation per distinct
//! `(namespace, parameter fingerprint)` pair for its lifetime. Entries are
//! only ever appended, never evicted or mutated in place - the parameter
//! space one animation session touches is small and finite, bounded by the
//! UI's discrete control granularity. Single-threaded cooperative use is
//! assumed; the cache is not synchronized for concurrent mutation.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

/// Errors from cache lookups.
///
/// `Compute` carries a failure from the fallible entry point; nothing is
/// stored in that case, so the next lookup retries.
#[derive(Debug, thiserror::Error)]
pub enum CacheError<E = std::convert::Infallible> {
    /// The parameter record could not be serialized into a fingerprint.
    #[error("failed to fingerprint parameters: {0}")]
    Fingerprint(#[from] serde_json::Error),

    /// A namespace was reused with a different stored value type.
    #[error("namespace '{namespace}' holds a different value type")]
    TypeMismatch { namespace: String },

    /// The compute function itself failed.
    #[error("compute failed: {0}")]
    Compute(E),
}

/// Memoizes generator outputs keyed by a canonical parameter fingerprint.
///
/// The fingerprint is the JSON serialization of the parameter record; a
/// fixed struct field order makes equal records serialize identically.
/// Stored values are handed out as [`Arc`] clones, so repeated lookups
/// return the identical object.
#[derive(Default)]
pub struct FingerprintCache {
    namespaces: HashMap<String, HashMap<String, Arc<dyn Any + Send + Sync>>>,
}

impl FingerprintCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `params` under `namespace`, computing and storing the value
    /// on the first call.
    ///
    /// Every later call with a fingerprint-equal record returns a clone of
    /// the same `Arc` without invoking `compute` again.
    pub fn get_or_insert<P, T>(
        &mut self,
        namespace: &str,
        params: &P,
        compute: impl FnOnce(&P) -> T,
    ) -> Result<Arc<T>, CacheError>
    where
        P: Serialize,
        T: Send + Sync + 'static,
    {
        self.get_or_try_insert(namespace, params, |p| {
            Ok::<T, std::convert::Infallible>(compute(p))
        })
    }

    /// Fallible variant of [`get_or_insert`](Self::get_or_insert).
    ///
    /// A failed compute stores nothing; the next call with the same
    /// fingerprint runs `compute` again.
    pub fn get_or_try_insert<P, T, E>(
        &mut self,
        namespace: &str,
        params: &P,
        compute: impl FnOnce(&P) -> Result<T, E>,
    ) -> Result<Arc<T>, CacheError<E>>
    where
        P: Serialize,
        T: Send + Sync + 'static,
    {
        let fingerprint = serde_json::to_string(params).map_err(CacheError::Fingerprint)?;
        let entries = self.namespaces.entry(namespace.to_string()).or_default();

        if let Some(stored) = entries.get(&fingerprint) {
            return stored
                .clone()
                .downcast::<T>()
                .map_err(|_| CacheError::TypeMismatch {
                    namespace: namespace.to_string(),
                });
        }

        let value = Arc::new(compute(params).map_err(CacheError::Compute)?);
        entries.insert(fingerprint, value.clone());
        Ok(value)
    }

    /// Total number of stored entries across all namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(HashMap::len).sum()
    }

    /// Returns true if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Params {
        radius: f32,
        segments: u32,
    }

    #[test]
    fn test_compute_runs_exactly_once_per_fingerprint() {
        let mut cache = FingerprintCache::new();
        let params = Params {
            radius: 1.0,
            segments: 32,
        };

        let mut calls = 0;
        for _ in 0..5 {
            let value = cache
                .get_or_insert("sphere", &params, |p| {
                    calls += 1;
                    vec![p.radius; p.segments as usize]
                })
                .unwrap();
            assert_eq!(value.len(), 32);
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_repeated_lookup_returns_identical_object() {
        let mut cache = FingerprintCache::new();
        let params = Params {
            radius: 0.5,
            segments: 8,
        };

        let first = cache
            .get_or_insert("sphere", &params, |_| String::from("mesh"))
            .unwrap();
        let second = cache
            .get_or_insert("sphere", &params, |_| String::from("other"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_fingerprints_compute_separately() {
        let mut cache = FingerprintCache::new();
        let mut calls = 0;
        for segments in [8u32, 16, 8] {
            let params = Params {
                radius: 1.0,
                segments,
            };
            cache
                .get_or_insert("sphere", &params, |_| {
                    calls += 1;
                })
                .unwrap();
        }
        assert_eq!(calls, 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_namespaces_do_not_collide() {
        let mut cache = FingerprintCache::new();
        let params = Params {
            radius: 1.0,
            segments: 8,
        };

        let solid = cache
            .get_or_insert("sphere", &params, |_| 1u32)
            .unwrap();
        let wire = cache
            .get_or_insert("wireframe", &params, |_| 2u32)
            .unwrap();
        assert_eq!((*solid, *wire), (1, 2));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failed_compute_stores_nothing_and_retries() {
        let mut cache = FingerprintCache::new();
        let params = Params {
            radius: -1.0,
            segments: 8,
        };

        let mut calls = 0;
        let first: Result<Arc<u32>, CacheError<&str>> =
            cache.get_or_try_insert("sphere", &params, |_| {
                calls += 1;
                Err("bad radius")
            });
        assert!(matches!(first, Err(CacheError::Compute("bad radius"))));
        assert!(cache.is_empty());

        let second = cache.get_or_try_insert("sphere", &params, |_| {
            calls += 1;
            Ok::<u32, &str>(7)
        });
        assert_eq!(*second.unwrap(), 7);
        assert_eq!(calls, 2);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let mut cache = FingerprintCache::new();
        let params = Params {
            radius: 1.0,
            segments: 8,
        };

        cache.get_or_insert("sphere", &params, |_| 1u32).unwrap();
        let clash = cache.get_or_insert("sphere", &params, |_| String::new());
        assert!(matches!(clash, Err(CacheError::TypeMismatch { .. })));
    }
}
