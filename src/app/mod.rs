mod routes;

pub use routes::{DEFAULT_DOCUMENT_TITLE, Route, RouteName, not_found, resolve, routes};
