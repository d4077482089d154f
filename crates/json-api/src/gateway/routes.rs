//! Gateway route table.

use url::Url;

#[derive(Debug, Clone)]
struct Route {
    prefix: String,
    upstream: Url,
}

/// A resolved request: which upstream serves it and at what path.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Resolved<'a> {
    pub prefix: &'a str,
    pub url: Url,
}

/// Prefix routes, longest first.
#[derive(Debug, Clone)]
pub(crate) struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub(crate) fn new(upstreams: Vec<(&'static str, Url)>) -> Self {
        let mut routes: Vec<Route> = upstreams
            .into_iter()
            .map(|(prefix, upstream)| Route {
                prefix: prefix.trim_end_matches('/').to_string(),
                upstream,
            })
            .collect();

        routes.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));

        Self { routes }
    }

    /// Match `path` on a segment boundary and build the upstream URL with the
    /// prefix stripped and `query` kept.
    pub(crate) fn resolve(&self, path: &str, query: Option<&str>) -> Option<Resolved<'_>> {
        self.routes.iter().find_map(|route| {
            let rest = path.strip_prefix(route.prefix.as_str())?;

            if !rest.is_empty() && !rest.starts_with('/') {
                return None;
            }

            Some(Resolved {
                prefix: route.prefix.as_str(),
                url: upstream_url(&route.upstream, rest, query),
            })
        })
    }
}

fn upstream_url(base: &Url, rest: &str, query: Option<&str>) -> Url {
    let mut url = base.clone();

    let rest = if rest.is_empty() { "/" } else { rest };
    let path = format!("{}{rest}", base.path().trim_end_matches('/'));

    url.set_path(&path);
    url.set_query(query.filter(|query| !query.is_empty()));

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        let url = |raw: &str| Url::parse(raw).expect("valid url");

        RouteTable::new(vec![
            ("/api/cart", url("http://cart:8003")),
            ("/api/products", url("http://products:8002/v1/")),
            ("/api/cart/admin", url("http://admin:9000")),
        ])
    }

    fn resolve(path: &str, query: Option<&str>) -> Option<String> {
        table()
            .resolve(path, query)
            .map(|resolved| resolved.url.to_string())
    }

    #[test]
    fn prefix_is_stripped_and_empty_rest_becomes_root() {
        assert_eq!(resolve("/api/cart", None).as_deref(), Some("http://cart:8003/"));
        assert_eq!(
            resolve("/api/cart/add", None).as_deref(),
            Some("http://cart:8003/add")
        );
    }

    #[test]
    fn prefix_matches_only_on_segment_boundary() {
        assert_eq!(resolve("/api/cartography", None), None);
        assert_eq!(resolve("/api", None), None);
        assert_eq!(resolve("/", None), None);
    }

    #[test]
    fn longest_prefix_wins() {
        assert_eq!(
            resolve("/api/cart/admin/stats", None).as_deref(),
            Some("http://admin:9000/stats")
        );
    }

    #[test]
    fn query_and_base_path_are_kept() {
        assert_eq!(
            resolve("/api/products/search", Some("q=lamp&page=2")).as_deref(),
            Some("http://products:8002/v1/search?q=lamp&page=2")
        );
    }
}
