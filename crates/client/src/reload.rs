//! Planning for fragment reloads.
//!
//! Everything here is pure string work so it can be tested on the host:
//! given a listing URL, [`ReloadPlan`] decides which URL to fetch (the
//! fragment endpoint) and which URL to record in browser history (the
//! shareable one). Applying a response is [`apply`], which either yields
//! the three fragments to swap in or an error that leaves the page as-is.

use vitrine_catalog::criteria::AJAX_PARAM;
use vitrine_catalog::fragments::FragmentResponse;

/// Header sent with every fragment request, mirroring what the server
/// logs when it is absent.
pub const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// A reload failed before any DOM mutation happened.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error("fragment request failed with status {0}")]
    Status(u16),
    #[error("fragment response had no body")]
    MissingBody,
    #[error("invalid fragment body: {0}")]
    Body(#[from] serde_json::Error),
}

/// The two URLs derived from one listing URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadPlan {
    /// URL to fetch: the listing URL with `ajax=1` forced on.
    pub fetch_url: String,
    /// URL to store via `history.replaceState`: the listing URL with
    /// every `ajax` pair stripped.
    pub history_url: String,
}

impl ReloadPlan {
    /// Derives both URLs from a listing URL, preserving the order and
    /// repetition of every other query pair.
    pub fn for_url(url: &str) -> Self {
        let (path, query) = match url.split_once('?') {
            Some((path, query)) => (path, query),
            None => (url, ""),
        };
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .filter(|(name, _)| name != AJAX_PARAM)
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();

        let mut fetch = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &pairs {
            fetch.append_pair(name, value);
        }
        fetch.append_pair(AJAX_PARAM, "1");
        let fetch_url = format!("{}?{}", path, fetch.finish());

        let history_url = if pairs.is_empty() {
            path.to_string()
        } else {
            let mut history = form_urlencoded::Serializer::new(String::new());
            for (name, value) in &pairs {
                history.append_pair(name, value);
            }
            format!("{}?{}", path, history.finish())
        };

        ReloadPlan {
            fetch_url,
            history_url,
        }
    }
}

/// Serializes form fields into a query string, keeping repeated names
/// (`categories[]`) as repeated pairs.
pub fn serialize_fields<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (name, value) in fields {
        out.append_pair(name, value);
    }
    out.finish()
}

/// Builds the listing URL a form submission navigates to.
pub fn form_url(action_path: &str, query: &str) -> String {
    if query.is_empty() {
        action_path.to_string()
    } else {
        format!("{}?{}", action_path, query)
    }
}

/// What to do with the page once a response arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyPlan {
    pub content: String,
    pub sorting: String,
    pub pagination: String,
    pub history_url: String,
}

/// Turns a response into an [`ApplyPlan`], or an error when nothing on
/// the page should change.
pub fn apply(plan: &ReloadPlan, status: u16, body: Option<&str>) -> Result<ApplyPlan, ReloadError> {
    if !(200..300).contains(&status) {
        return Err(ReloadError::Status(status));
    }
    let body = body.ok_or(ReloadError::MissingBody)?;
    let fragments: FragmentResponse = serde_json::from_str(body)?;
    Ok(ApplyPlan {
        content: fragments.content,
        sorting: fragments.sorting,
        pagination: fragments.pagination,
        history_url: plan.history_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_url_forces_ajax() {
        let plan = ReloadPlan::for_url("/?q=lampe&page=2");
        assert_eq!(plan.fetch_url, "/?q=lampe&page=2&ajax=1");
    }

    #[test]
    fn test_history_url_strips_ajax() {
        let plan = ReloadPlan::for_url("/?q=lampe&ajax=1&page=2");
        assert_eq!(plan.history_url, "/?q=lampe&page=2");
        assert_eq!(plan.fetch_url, "/?q=lampe&page=2&ajax=1");
    }

    #[test]
    fn test_bare_path_keeps_bare_history_url() {
        let plan = ReloadPlan::for_url("/");
        assert_eq!(plan.history_url, "/");
        assert_eq!(plan.fetch_url, "/?ajax=1");
    }

    #[test]
    fn test_repeated_pairs_survive() {
        let plan = ReloadPlan::for_url("/?categories%5B%5D=3&categories%5B%5D=7");
        assert_eq!(plan.history_url, "/?categories%5B%5D=3&categories%5B%5D=7");
        assert_eq!(
            plan.fetch_url,
            "/?categories%5B%5D=3&categories%5B%5D=7&ajax=1"
        );
    }

    #[test]
    fn test_every_ajax_pair_is_stripped() {
        let plan = ReloadPlan::for_url("/?ajax=1&q=a&ajax=true");
        assert_eq!(plan.history_url, "/?q=a");
    }

    #[test]
    fn test_serialize_fields_keeps_repeats() {
        let query = serialize_fields([
            ("q", "tapis"),
            ("categories[]", "3"),
            ("categories[]", "7"),
        ]);
        assert_eq!(query, "q=tapis&categories%5B%5D=3&categories%5B%5D=7");
    }

    #[test]
    fn test_form_url_without_fields_is_the_action() {
        assert_eq!(form_url("/", ""), "/");
        assert_eq!(form_url("/", "q=a"), "/?q=a");
    }

    #[test]
    fn test_apply_success_carries_all_three_fragments() {
        let plan = ReloadPlan::for_url("/?q=lampe");
        let body = r#"{"content":"<div></div>","sorting":"<p>1</p>","pagination":""}"#;
        let apply = apply(&plan, 200, Some(body)).unwrap();
        assert_eq!(apply.content, "<div></div>");
        assert_eq!(apply.sorting, "<p>1</p>");
        assert_eq!(apply.pagination, "");
        assert_eq!(apply.history_url, "/?q=lampe");
    }

    #[test]
    fn test_http_failure_mutates_nothing() {
        let plan = ReloadPlan::for_url("/?q=lampe");
        let err = apply(&plan, 500, Some("boom")).unwrap_err();
        assert!(matches!(err, ReloadError::Status(500)));
    }

    #[test]
    fn test_malformed_body_mutates_nothing() {
        let plan = ReloadPlan::for_url("/");
        let err = apply(&plan, 200, Some("{\"content\":")).unwrap_err();
        assert!(matches!(err, ReloadError::Body(_)));
    }

    #[test]
    fn test_extra_fragment_keys_are_rejected() {
        let plan = ReloadPlan::for_url("/");
        let body = r#"{"content":"","sorting":"","pagination":"","extra":""}"#;
        assert!(apply(&plan, 200, Some(body)).is_err());
    }
}
