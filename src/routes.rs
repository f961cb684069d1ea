//! URL paths of the site and where each one is written on disk.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Services,
    Portfolio,
    PortfolioItem(String),
    Blog,
    BlogPost(String),
    Contact,
    Privacy,
    Terms,
    NotFound,
}

impl Route {
    /// Resolve a request path. Query strings, fragments and a trailing slash
    /// are ignored.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["services"] => Route::Services,
            ["portfolio"] => Route::Portfolio,
            ["portfolio", id] => Route::PortfolioItem(id.to_string()),
            ["blog"] => Route::Blog,
            ["blog", id] => Route::BlogPost(id.to_string()),
            ["contact"] => Route::Contact,
            ["privacy"] => Route::Privacy,
            ["terms"] => Route::Terms,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Services => "/services".to_string(),
            Route::Portfolio => "/portfolio".to_string(),
            Route::PortfolioItem(id) => format!("/portfolio/{id}"),
            Route::Blog => "/blog".to_string(),
            Route::BlogPost(id) => format!("/blog/{id}"),
            Route::Contact => "/contact".to_string(),
            Route::Privacy => "/privacy".to_string(),
            Route::Terms => "/terms".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// Output file relative to the dist root.
    pub fn output_file(&self) -> String {
        match self {
            Route::Home => "index.html".to_string(),
            Route::NotFound => "404.html".to_string(),
            other => format!("{}/index.html", other.path().trim_start_matches('/')),
        }
    }

    /// Listing a detail route belongs to, for "back to" links.
    pub fn parent(&self) -> Option<Route> {
        match self {
            Route::PortfolioItem(_) => Some(Route::Portfolio),
            Route::BlogPost(_) => Some(Route::Blog),
            _ => None,
        }
    }

    /// Path of the primary navigation entry to highlight on this route.
    pub fn nav_section(&self) -> Option<&'static str> {
        match self {
            Route::Home => Some("/"),
            Route::About => Some("/about"),
            Route::Services => Some("/services"),
            Route::Portfolio | Route::PortfolioItem(_) => Some("/portfolio"),
            Route::Blog | Route::BlogPost(_) => Some("/blog"),
            Route::Contact => Some("/contact"),
            Route::Privacy | Route::Terms | Route::NotFound => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Link target for a route: absolute, directory-style (`/about/`).
pub fn href(route: &Route) -> String {
    match route {
        Route::Home => "/".to_string(),
        Route::NotFound => "/404.html".to_string(),
        other => format!("{}/", other.path()),
    }
}

/// [`href`] for a raw navigation path such as `"/about"`.
pub fn href_path(path: &str) -> String {
    href(&Route::parse(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_pages() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/about"), Route::About);
        assert_eq!(Route::parse("/services/"), Route::Services);
        assert_eq!(Route::parse("/contact?ref=nav"), Route::Contact);
        assert_eq!(Route::parse("/privacy"), Route::Privacy);
        assert_eq!(Route::parse("/terms#cookies"), Route::Terms);
    }

    #[test]
    fn parses_detail_routes() {
        assert_eq!(Route::parse("/portfolio/3"), Route::PortfolioItem("3".into()));
        assert_eq!(
            Route::parse("/blog/spring-trends/"),
            Route::BlogPost("spring-trends".into())
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(Route::parse("/pricing"), Route::NotFound);
        assert_eq!(Route::parse("/portfolio/1/extra"), Route::NotFound);
        assert_eq!(Route::parse("/blog/a/b"), Route::NotFound);
    }

    #[test]
    fn path_round_trips_through_parse() {
        for route in [
            Route::Home,
            Route::About,
            Route::PortfolioItem("7".into()),
            Route::BlogPost("x".into()),
            Route::Terms,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn output_files() {
        assert_eq!(Route::Home.output_file(), "index.html");
        assert_eq!(Route::About.output_file(), "about/index.html");
        assert_eq!(
            Route::PortfolioItem("2".into()).output_file(),
            "portfolio/2/index.html"
        );
        assert_eq!(Route::NotFound.output_file(), "404.html");
    }

    #[test]
    fn detail_routes_know_their_listing() {
        assert_eq!(Route::BlogPost("a".into()).parent(), Some(Route::Blog));
        assert_eq!(Route::PortfolioItem("a".into()).parent(), Some(Route::Portfolio));
        assert_eq!(Route::Contact.parent(), None);
    }

    #[test]
    fn hrefs_are_directory_style() {
        assert_eq!(href(&Route::Home), "/");
        assert_eq!(href(&Route::About), "/about/");
        assert_eq!(href(&Route::BlogPost("x".into())), "/blog/x/");
        assert_eq!(href(&Route::NotFound), "/404.html");
        assert_eq!(href_path("/portfolio"), "/portfolio/");
        assert_eq!(href_path("/"), "/");
    }

    #[test]
    fn nav_section_groups_details_under_listing() {
        assert_eq!(Route::BlogPost("a".into()).nav_section(), Some("/blog"));
        assert_eq!(Route::Privacy.nav_section(), None);
    }
}
