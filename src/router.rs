use worker::Method;

/// What an inbound request is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Preflight,
    Search,
    Info,
    NotFound,
}

impl Route {
    /// Classifies a request by method and path.
    ///
    /// `OPTIONS` is a preflight on any path. A single trailing slash on
    /// a non-root path is ignored.
    pub fn resolve(method: &Method, path: &str) -> Route {
        if *method == Method::Options {
            return Route::Preflight;
        }
        if *method != Method::Get {
            return Route::NotFound;
        }

        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };

        match path {
            "/api/search" => Route::Search,
            "/api/get_info" => Route::Info,
            _ => Route::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_is_preflight_anywhere() {
        assert_eq!(Route::resolve(&Method::Options, "/api/search"), Route::Preflight);
        assert_eq!(Route::resolve(&Method::Options, "/whatever"), Route::Preflight);
    }

    #[test]
    fn known_get_routes() {
        assert_eq!(Route::resolve(&Method::Get, "/api/search"), Route::Search);
        assert_eq!(Route::resolve(&Method::Get, "/api/get_info"), Route::Info);
        assert_eq!(Route::resolve(&Method::Get, "/api/search/"), Route::Search);
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(Route::resolve(&Method::Get, "/api/unknown"), Route::NotFound);
        assert_eq!(Route::resolve(&Method::Get, "/"), Route::NotFound);
        assert_eq!(Route::resolve(&Method::Get, "/api/search//"), Route::NotFound);
    }

    #[test]
    fn wrong_method_is_not_found() {
        assert_eq!(Route::resolve(&Method::Post, "/api/search"), Route::NotFound);
        assert_eq!(Route::resolve(&Method::Delete, "/api/get_info"), Route::NotFound);
    }
}
