/// Document title applied when a route carries no title of its own.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Vitrina";

const CATCH_ALL_PATH: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Home,
    About,
    Contact,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub name: RouteName,
    pub path: &'static str,
    pub title: Option<&'static str>,
}

impl Route {
    pub fn document_title(&self) -> &'static str {
        self.title.unwrap_or(DEFAULT_DOCUMENT_TITLE)
    }
}

static ROUTES: [Route; 4] = [
    Route {
        name: RouteName::Home,
        path: "/",
        title: Some("Vitrina | Home"),
    },
    Route {
        name: RouteName::About,
        path: "/about",
        title: Some("Vitrina | About"),
    },
    Route {
        name: RouteName::Contact,
        path: "/contact",
        title: Some("Vitrina | Contact"),
    },
    Route {
        name: RouteName::NotFound,
        path: CATCH_ALL_PATH,
        title: Some("Vitrina | Page Not Found"),
    },
];

pub fn routes() -> &'static [Route] {
    &ROUTES
}

pub fn not_found() -> &'static Route {
    &ROUTES[ROUTES.len() - 1]
}

/// Resolves a request path to its route by exact match; anything else lands
/// on the catch-all not-found entry.
pub fn resolve(path: &str) -> &'static Route {
    ROUTES
        .iter()
        .find(|route| route.name != RouteName::NotFound && route.path == path)
        .unwrap_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_DOCUMENT_TITLE, Route, RouteName, not_found, resolve, routes};

    #[test]
    fn route_table_lists_content_pages_and_catch_all() {
        let names = routes().iter().map(|route| route.name).collect::<Vec<_>>();

        assert_eq!(
            names,
            vec![
                RouteName::Home,
                RouteName::About,
                RouteName::Contact,
                RouteName::NotFound
            ]
        );
    }

    #[test]
    fn resolve_matches_exact_paths() {
        assert_eq!(resolve("/").name, RouteName::Home);
        assert_eq!(resolve("/about").name, RouteName::About);
        assert_eq!(resolve("/contact").name, RouteName::Contact);
    }

    #[test]
    fn resolve_falls_back_to_not_found_for_unknown_paths() {
        assert_eq!(resolve("/missing").name, RouteName::NotFound);
        assert_eq!(resolve("/about/").name, RouteName::NotFound);
        assert_eq!(resolve("").name, RouteName::NotFound);
    }

    #[test]
    fn resolve_never_matches_the_catch_all_path_literally() {
        assert_eq!(resolve("*").name, RouteName::NotFound);
        assert_eq!(not_found().name, RouteName::NotFound);
    }

    #[test]
    fn document_title_prefers_route_title() {
        assert_eq!(resolve("/").document_title(), "Vitrina | Home");
        assert_eq!(
            resolve("/nowhere").document_title(),
            "Vitrina | Page Not Found"
        );
    }

    #[test]
    fn document_title_falls_back_to_default_when_unset() {
        let untitled = Route {
            name: RouteName::Home,
            path: "/",
            title: None,
        };

        assert_eq!(untitled.document_title(), DEFAULT_DOCUMENT_TITLE);
    }
}
