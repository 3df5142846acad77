/// Path prefixes that the authentication gate never looks at.
///
/// Matching is a plain string prefix on the request path, so `/auth` also
/// covers `/auth/signin` and `/authz`.
#[derive(Debug, Clone, Default)]
pub struct RouteExemptions {
    prefixes: Vec<String>,
}

impl RouteExemptions {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exemptions() -> RouteExemptions {
        RouteExemptions::new(vec!["/auth".into(), "/error".into()])
    }

    #[test]
    fn prefix_match() {
        let ex = exemptions();
        assert!(ex.is_exempt("/auth"));
        assert!(ex.is_exempt("/auth/signin"));
        assert!(ex.is_exempt("/authz"));
        assert!(ex.is_exempt("/error"));
    }

    #[test]
    fn other_paths_are_gated() {
        let ex = exemptions();
        assert!(!ex.is_exempt("/"));
        assert!(!ex.is_exempt("/api/v1/auth"));
        assert!(!ex.is_exempt("/todos"));
    }

    #[test]
    fn empty_set_exempts_nothing() {
        assert!(!RouteExemptions::default().is_exempt("/auth"));
    }
}
