//! Prefix router.
//!
//! A [`Router`] keeps, per method, an ordered list of path prefixes. A request
//! goes to the handler with the longest prefix its path starts with; on equal
//! length the earliest registration wins. The matched prefix is removed from
//! the path before forwarding, so routers can be nested:
//!
//! ```text
//! GET /api/info
//!   └─ root router:  "/api"  matches  → forwards "/info"
//!        └─ api router: "/info" matches → forwards ""
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use crate::handler::{Handler, HandlerFuture};
use crate::http::request::{Method, Request};
use crate::http::response::Response;

struct Route {
    prefix: String,
    handler: Arc<dyn Handler>,
}

/// Dispatches requests by method and longest path prefix.
///
/// Routes are registered through `&mut self`, so once a router has been
/// handed to a [`Server`](crate::server::Server) its table can no longer
/// change.
#[derive(Default)]
pub struct Router {
    routes: HashMap<Method, Vec<Route>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a `GET` route.
    pub fn add_route(&mut self, prefix: impl Into<String>, handler: impl Handler + 'static) -> &mut Self {
        self.add_method_route(Method::GET, prefix, handler)
    }

    /// Registers `handler` for `prefix` under `method`.
    ///
    /// Registering the same method and prefix again replaces the handler but
    /// keeps the original registration order.
    pub fn add_method_route(
        &mut self,
        method: Method,
        prefix: impl Into<String>,
        handler: impl Handler + 'static,
    ) -> &mut Self {
        self.insert(method, prefix.into(), Arc::new(handler));
        self
    }

    /// Mounts `router` at `prefix` for every method.
    pub fn mount(&mut self, prefix: impl Into<String>, router: Router) -> &mut Self {
        let prefix = prefix.into();
        let shared: Arc<dyn Handler> = Arc::new(router);

        for method in Method::ALL {
            self.insert(method, prefix.clone(), Arc::clone(&shared));
        }
        self
    }

    fn insert(&mut self, method: Method, prefix: String, handler: Arc<dyn Handler>) {
        let routes = self.routes.entry(method).or_default();

        match routes.iter_mut().find(|r| r.prefix == prefix) {
            Some(route) => route.handler = handler,
            None => routes.push(Route { prefix, handler }),
        }
    }

    /// Finds the route whose prefix is the longest match for `path`.
    fn find(&self, method: Method, path: &str) -> Option<&Route> {
        let mut best: Option<&Route> = None;

        for route in self.routes.get(&method)? {
            if !path.starts_with(&route.prefix) {
                continue;
            }
            // strictly longer, so ties keep the earlier registration
            if best.is_none_or(|b| route.prefix.len() > b.prefix.len()) {
                best = Some(route);
            }
        }

        best
    }

    /// Number of registered (method, prefix) pairs.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Handler for Router {
    fn handle(&self, request: Request) -> HandlerFuture<'_> {
        let Some(route) = self.find(request.method, &request.path) else {
            tracing::debug!(
                method = %request.method,
                path = %request.path,
                "No route found"
            );
            let response: anyhow::Result<Response> = Ok(Response::not_found(&request.path));
            return Box::pin(async move { response });
        };

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            prefix = %route.prefix,
            "Routing request"
        );

        let remaining = request.path[route.prefix.len()..].to_string();
        route.handler.handle(request.with_path(remaining))
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (method, routes) in &self.routes {
            let prefixes: Vec<&str> = routes.iter().map(|r| r.prefix.as_str()).collect();
            map.entry(method, &prefixes);
        }
        map.finish()
    }
}
