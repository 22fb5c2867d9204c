//! Screen routes and the auth gate in front of them.

use folio_client::Session;
use folio_types::ResourceKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    SignIn,
    List(ResourceKind),
    Create(ResourceKind),
    Edit(ResourceKind, String),
    Generate,
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["signin"] => Route::SignIn,
            [screen, rest @ ..] => match (screen_kind(screen), rest) {
                (Some(kind), []) => Route::List(kind),
                (Some(kind), ["create"]) => Route::Create(kind),
                (Some(kind), ["edit", id]) => Route::Edit(kind, (*id).to_string()),
                (Some(ResourceKind::Blog), ["generate"]) => Route::Generate,
                _ => Route::NotFound(path.to_string()),
            },
            [] => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::SignIn => "/signin".to_string(),
            Route::List(kind) => format!("/{}", kind.screen()),
            Route::Create(kind) => format!("/{}/create", kind.screen()),
            Route::Edit(kind, id) => format!("/{}/edit/{}", kind.screen(), id),
            Route::Generate => "/blogs/generate".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::SignIn)
    }

    /// Redirect to sign-in when the route needs a session that is absent.
    pub fn guard(self, session: &Session) -> Route {
        if self.requires_auth() && !session.is_signed_in() {
            tracing::debug!(route = %self, "redirecting to sign-in");
            Route::SignIn
        } else {
            self
        }
    }
}

fn screen_kind(segment: &str) -> Option<ResourceKind> {
    [ResourceKind::Blog, ResourceKind::Portfolio]
        .into_iter()
        .find(|kind| kind.screen() == segment)
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/signin"), Route::SignIn);
        assert_eq!(Route::parse("/blogs"), Route::List(ResourceKind::Blog));
        assert_eq!(Route::parse("/blogs/"), Route::List(ResourceKind::Blog));
        assert_eq!(Route::parse("/blogs/create"), Route::Create(ResourceKind::Blog));
        assert_eq!(
            Route::parse("/blogs/edit/42"),
            Route::Edit(ResourceKind::Blog, "42".into())
        );
        assert_eq!(Route::parse("/blogs/generate"), Route::Generate);
        assert_eq!(Route::parse("/portfolios"), Route::List(ResourceKind::Portfolio));
        assert_eq!(
            Route::parse("/portfolios/edit/p1"),
            Route::Edit(ResourceKind::Portfolio, "p1".into())
        );
    }

    #[test]
    fn test_unknown_paths_are_not_found() {
        for path in ["/", "/portfolio", "/portfolios/generate", "/blogs/edit", "/charts"] {
            assert_eq!(Route::parse(path), Route::NotFound(path.to_string()), "{}", path);
        }
    }

    #[test]
    fn test_path_round_trips() {
        let routes = [
            Route::SignIn,
            Route::List(ResourceKind::Portfolio),
            Route::Create(ResourceKind::Blog),
            Route::Edit(ResourceKind::Portfolio, "7".into()),
            Route::Generate,
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_guard_redirects_when_signed_out() {
        let signed_out = Session::new();
        let signed_in = Session::with_token("t");

        assert_eq!(Route::List(ResourceKind::Blog).guard(&signed_out), Route::SignIn);
        assert_eq!(Route::SignIn.guard(&signed_out), Route::SignIn);
        assert_eq!(
            Route::NotFound("/x".into()).guard(&signed_out),
            Route::SignIn
        );
        assert_eq!(
            Route::List(ResourceKind::Blog).guard(&signed_in),
            Route::List(ResourceKind::Blog)
        );
    }
}
