//! Cache keys for read requests.
//!
//! A key is the api path (relative to `/api/`) of the read. `None` means the
//! request must not be issued yet, for example before authentication has
//! resolved or while a route parameter is missing.

use std::fmt::Display;

pub type QueryKey = Option<String>;

/// Key for a list endpoint with optional query parameters.
///
/// Blank parameters are dropped; the rest keep their declaration order so
/// equal filters always produce equal keys.
pub fn list_key(
    authenticated: bool,
    path: &str,
    params: &[(&str, Option<String>)],
) -> QueryKey {
    if !authenticated {
        return None;
    }
    let query: Vec<String> = params
        .iter()
        .filter_map(|(name, value)| {
            let value = value.as_deref()?.trim();
            (!value.is_empty()).then(|| format!("{name}={}", encode(value)))
        })
        .collect();
    if query.is_empty() {
        Some(path.to_string())
    } else {
        Some(format!("{path}?{}", query.join("&")))
    }
}

/// Key for one record. Needs both authentication and the id.
pub fn detail_key<I: Display>(
    authenticated: bool,
    path: &str,
    id: Option<I>,
) -> QueryKey {
    if !authenticated {
        return None;
    }
    id.map(|id| format!("{path}/{id}"))
}

/// Key for a collection nested under a parent record, like the tasks of one
/// project (`projects/4/tasks`).
pub fn nested_key<I: Display>(
    authenticated: bool,
    parent: &str,
    id: Option<I>,
    child: &str,
) -> QueryKey {
    detail_key(authenticated, parent, id).map(|key| format!("{key}/{child}"))
}

/// Percent-encode the few characters that break a query string.
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '+' => out.push_str("%2B"),
            ' ' => out.push_str("%20"),
            '%' => out.push_str("%25"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_never_fetches() {
        assert_eq!(list_key(false, "attendances", &[]), None);
        assert_eq!(detail_key(false, "employees", Some(3)), None);
    }

    #[test]
    fn missing_route_param_never_fetches() {
        assert_eq!(detail_key::<i64>(true, "employees", None), None);
        assert_eq!(nested_key::<i64>(true, "projects", None, "tasks"), None);
        assert_eq!(
            nested_key(true, "projects", Some(4), "tasks"),
            Some("projects/4/tasks".to_string())
        );
    }

    #[test]
    fn params_in_order_and_blank_dropped() {
        let key = list_key(
            true,
            "attendances",
            &[
                ("date", Some("2024-05-01".into())),
                ("department", None),
                ("employee", Some("12".into())),
                ("status", Some("  ".into())),
            ],
        );
        assert_eq!(
            key.as_deref(),
            Some("attendances?date=2024-05-01&employee=12")
        );
        assert_eq!(
            list_key(true, "attendances", &[("department", None)]).as_deref(),
            Some("attendances")
        );
    }

    #[test]
    fn values_are_escaped() {
        let key = list_key(true, "clients", &[("name", Some("A&B Co".into()))]);
        assert_eq!(key.as_deref(), Some("clients?name=A%26B%20Co"));
    }
}
