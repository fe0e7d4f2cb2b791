//! List-endpoint query parsing.
//!
//! `GET /job` accepts free-form query parameters. A handful of names are
//! reserved for list shaping (`page`, `sort`, `limit`, `fields`, `search`);
//! everything else becomes an exact-match filter term. Filter values are
//! always strings — a numeric field stored as a number will not match a
//! query-string value, which is the documented coercion fragility of this
//! endpoint.

use std::collections::HashMap;

use bson::{doc, Document};

/// Query parameter names that shape the list instead of filtering it.
const RESERVED: [&str; 5] = ["page", "sort", "limit", "fields", "search"];

/// Parsed list query: filter, projection, sort and pagination window.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub filter: Document,
    pub projection: Option<Document>,
    pub sort: Option<Document>,
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Parse raw query parameters for the public job list.
    ///
    /// - `search` becomes a case-insensitive substring match on `title`
    /// - `fields` (comma-separated) switches to an inclusion projection;
    ///   otherwise the summary projection hides `banner`, `description`
    ///   and `company`
    /// - `sort` is a comma-separated field list, `-` prefix for descending
    /// - `limit` and `page` paginate; `page` without `limit` has no effect
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut filter = Document::new();
        for (key, value) in params {
            if RESERVED.contains(&key.as_str()) {
                continue;
            }
            filter.insert(key.clone(), value.clone());
        }

        if let Some(search) = params.get("search").filter(|s| !s.is_empty()) {
            filter.insert(
                "title",
                doc! { "$regex": search.clone(), "$options": "i" },
            );
        }

        let projection = match params.get("fields").map(|f| parse_fields(f)) {
            Some(fields) if !fields.is_empty() => Some(fields),
            _ => Some(summary_projection()),
        };

        let sort = params
            .get("sort")
            .map(|s| parse_sort(s))
            .filter(|s| !s.is_empty());

        let limit = params
            .get("limit")
            .and_then(|l| l.parse::<i64>().ok())
            .filter(|l| *l > 0);

        let page = params
            .get("page")
            .and_then(|p| p.parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        // both factors are caller-controlled; on overflow the skip is
        // dropped rather than wrapping to a garbage offset
        let skip = limit
            .and_then(|l| (page - 1).checked_mul(l as u64))
            .filter(|s| *s > 0);

        Self {
            filter,
            projection,
            sort,
            skip,
            limit,
        }
    }

    /// Query over jobs owned by the given identity. Full documents.
    pub fn owned_by(email: &str) -> Self {
        Self {
            filter: doc! { "created_by.email": email },
            ..Self::default()
        }
    }

    /// Query over jobs the given identity has applied to. The candidate
    /// list itself is projected out.
    pub fn applied_by(email: &str) -> Self {
        Self {
            filter: doc! { "candidates.email": email },
            projection: Some(doc! { "candidates": 0 }),
            ..Self::default()
        }
    }
}

/// Default projection for the public list view: a summary without the
/// heavyweight presentation fields.
fn summary_projection() -> Document {
    doc! { "banner": 0, "description": 0, "company": 0 }
}

fn parse_fields(fields: &str) -> Document {
    let mut projection = Document::new();
    for field in fields.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        projection.insert(field, 1);
    }
    projection
}

fn parse_sort(sort: &str) -> Document {
    let mut order = Document::new();
    for field in sort.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        match field.strip_prefix('-') {
            Some(name) if !name.is_empty() => order.insert(name, -1),
            Some(_) => None,
            None => order.insert(field, 1),
        };
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn reserved_names_are_excluded_from_filter() {
        let query = ListQuery::from_params(&params(&[
            ("page", "2"),
            ("sort", "deadline"),
            ("limit", "10"),
            ("fields", "title"),
            ("search", "rust"),
            ("type", "remote"),
        ]));
        assert_eq!(query.filter.get_str("type").unwrap(), "remote");
        assert!(!query.filter.contains_key("page"));
        assert!(!query.filter.contains_key("limit"));
        assert!(!query.filter.contains_key("fields"));
        assert!(!query.filter.contains_key("sort"));
        assert!(!query.filter.contains_key("search"));
    }

    #[test]
    fn search_becomes_case_insensitive_title_regex() {
        let query = ListQuery::from_params(&params(&[("search", "engineer")]));
        let title = query.filter.get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), "engineer");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn default_projection_hides_summary_fields() {
        let query = ListQuery::from_params(&HashMap::new());
        let projection = query.projection.unwrap();
        assert_eq!(projection.get_i32("banner").unwrap(), 0);
        assert_eq!(projection.get_i32("description").unwrap(), 0);
        assert_eq!(projection.get_i32("company").unwrap(), 0);
    }

    #[test]
    fn fields_param_switches_to_inclusion_projection() {
        let query = ListQuery::from_params(&params(&[("fields", "title, deadline")]));
        let projection = query.projection.unwrap();
        assert_eq!(projection.get_i32("title").unwrap(), 1);
        assert_eq!(projection.get_i32("deadline").unwrap(), 1);
        assert!(!projection.contains_key("banner"));
    }

    #[test]
    fn sort_supports_descending_prefix() {
        let query = ListQuery::from_params(&params(&[("sort", "deadline,-min_salary")]));
        let sort = query.sort.unwrap();
        assert_eq!(sort.get_i32("deadline").unwrap(), 1);
        assert_eq!(sort.get_i32("min_salary").unwrap(), -1);
    }

    #[test]
    fn pagination_computes_skip_from_page_and_limit() {
        let query = ListQuery::from_params(&params(&[("page", "3"), ("limit", "20")]));
        assert_eq!(query.limit, Some(20));
        assert_eq!(query.skip, Some(40));

        // page without limit cannot paginate
        let query = ListQuery::from_params(&params(&[("page", "3")]));
        assert_eq!(query.limit, None);
        assert_eq!(query.skip, None);

        // nonsense values are ignored
        let query = ListQuery::from_params(&params(&[("page", "zero"), ("limit", "-5")]));
        assert_eq!(query.limit, None);
        assert_eq!(query.skip, None);
    }

    #[test]
    fn oversized_page_drops_the_skip_instead_of_wrapping() {
        let query = ListQuery::from_params(&params(&[
            ("page", "18446744073709551615"),
            ("limit", "100"),
        ]));
        assert_eq!(query.limit, Some(100));
        assert_eq!(query.skip, None);
    }

    #[test]
    fn filter_values_stay_strings() {
        // Documented coercion fragility: "90000" will not match a numeric
        // min_salary stored in the document.
        let query = ListQuery::from_params(&params(&[("min_salary", "90000")]));
        assert_eq!(query.filter.get_str("min_salary").unwrap(), "90000");
    }

    #[test]
    fn owned_by_filters_on_stored_owner() {
        let query = ListQuery::owned_by("owner@x.com");
        assert_eq!(
            query.filter.get_str("created_by.email").unwrap(),
            "owner@x.com"
        );
        assert!(query.projection.is_none());
    }

    #[test]
    fn applied_by_projects_out_candidates() {
        let query = ListQuery::applied_by("a@x.com");
        assert_eq!(query.filter.get_str("candidates.email").unwrap(), "a@x.com");
        assert_eq!(query.projection.unwrap().get_i32("candidates").unwrap(), 0);
    }
}
