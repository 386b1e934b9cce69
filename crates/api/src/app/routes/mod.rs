use axum::Router;
use axum::http::Method;

pub mod email;

/// A fixed path together with the only method it answers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub method: Method,
}

pub const CREATE: Route = Route {
    path: "/email/create",
    method: Method::POST,
};

pub const GET: Route = Route {
    path: "/email/get",
    method: Method::GET,
};

pub const GET_BATCH: Route = Route {
    path: "/email/get_batch",
    method: Method::GET,
};

pub const UPDATE: Route = Route {
    path: "/email/update",
    method: Method::PUT,
};

pub const DELETE: Route = Route {
    path: "/email/delete",
    method: Method::POST,
};

/// Every route the JSON API serves.
pub const ROUTES: [Route; 5] = [CREATE, GET, GET_BATCH, UPDATE, DELETE];

/// Router for every JSON API endpoint.
pub fn router() -> Router {
    Router::new().merge(email::router())
}
