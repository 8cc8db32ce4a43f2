use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::ClientError;

/// Maps a logical service name to one live `host:port` address.
///
/// Callers never hold literal addresses; which process answers a given
/// name is the resolver's business, so topology changes stay out of the
/// calling code.
pub trait ServiceResolver: Send + Sync {
    fn resolve(&self, service: &str) -> Result<String, ClientError>;
}

/// Resolver over a configured route table, selecting backends per call
/// in round-robin order. The table sits behind an `ArcSwap` so it can be
/// replaced at runtime without locking resolve calls.
pub struct StaticResolver {
    routes: ArcSwap<HashMap<String, Vec<String>>>,
    cursor: AtomicUsize,
}

impl StaticResolver {
    pub fn new(service: impl Into<String>, backends: Vec<String>) -> Self {
        let mut routes = HashMap::new();
        routes.insert(service.into(), backends);
        Self { routes: ArcSwap::from_pointee(routes), cursor: AtomicUsize::new(0) }
    }

    /// Replace the backend list for one service. In-flight resolves keep
    /// the table they already loaded; later calls see the new list.
    pub fn set_backends(&self, service: impl Into<String>, backends: Vec<String>) {
        let snapshot = self.routes.load_full();
        let mut routes = (*snapshot).clone();
        routes.insert(service.into(), backends);
        self.routes.store(Arc::new(routes));
    }
}

impl ServiceResolver for StaticResolver {
    fn resolve(&self, service: &str) -> Result<String, ClientError> {
        let routes = self.routes.load();
        let backends = routes
            .get(service)
            .filter(|b| !b.is_empty())
            .ok_or_else(|| ClientError::NoBackend { service: service.to_string() })?;
        let i = self.cursor.fetch_add(1, Ordering::Relaxed) % backends.len();
        Ok(backends[i].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_alternates_between_backends() {
        let resolver = StaticResolver::new(
            "employee-service",
            vec!["127.0.0.1:8080".to_string(), "127.0.0.1:8081".to_string()],
        );

        let a = resolver.resolve("employee-service").expect("resolve");
        let b = resolver.resolve("employee-service").expect("resolve");
        let c = resolver.resolve("employee-service").expect("resolve");

        assert_ne!(a, b, "round robin should rotate to a different backend");
        assert_eq!(c, a, "round robin should cycle back to the first backend");
    }

    #[test]
    fn unknown_or_empty_service_is_no_backend() {
        let resolver = StaticResolver::new("employee-service", Vec::new());
        assert!(matches!(
            resolver.resolve("employee-service"),
            Err(ClientError::NoBackend { .. })
        ));
        assert!(matches!(resolver.resolve("billing-service"), Err(ClientError::NoBackend { .. })));
    }

    #[test]
    fn set_backends_swaps_the_route_table() {
        let resolver = StaticResolver::new("employee-service", vec!["127.0.0.1:1".to_string()]);
        resolver.set_backends("employee-service", vec!["127.0.0.1:2".to_string()]);
        assert_eq!(resolver.resolve("employee-service").expect("resolve"), "127.0.0.1:2");
    }
}
