//! REST query parameters.

use std::fmt::Display;

use storefront::pagination::PageRange;

/// Filter, ordering and paging parameters for a table request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Columns and embedded relations to return, e.g. `id, name, files (id, url)`.
    #[must_use]
    pub fn select(self, columns: &str) -> Self {
        let columns: String = columns.chars().filter(|c| !c.is_whitespace()).collect();

        self.push("select", columns)
    }

    /// `column = value`
    #[must_use]
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("eq.{value}"))
    }

    /// `column IN (values)`
    #[must_use]
    pub fn in_list<I>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let values = values
            .into_iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",");

        self.push(column, format!("in.({values})"))
    }

    /// Order by `column`.
    #[must_use]
    pub fn order(self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };

        self.push("order", format!("{column}.{direction}"))
    }

    /// Page window.
    #[must_use]
    pub fn range(self, range: PageRange) -> Self {
        self.push("offset", range.offset.to_string())
            .limit(range.limit)
    }

    #[must_use]
    pub fn limit(self, limit: u64) -> Self {
        self.push("limit", limit.to_string())
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    fn push(mut self, key: &str, value: String) -> Self {
        self.pairs.push((key.to_string(), value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn builds_filters_in_call_order() {
        let query = Query::new()
            .select("id, name,\n files (id, url)")
            .eq("main_category", "shirts")
            .order("price", false)
            .range(PageRange {
                offset: 16,
                limit: 8,
            });

        assert_eq!(
            query.pairs(),
            &[
                pair("select", "id,name,files(id,url)"),
                pair("main_category", "eq.shirts"),
                pair("order", "price.desc"),
                pair("offset", "16"),
                pair("limit", "8"),
            ]
        );
    }

    #[test]
    fn in_list_joins_values() {
        let query = Query::new().in_list("id", [3, 5, 8]);

        assert_eq!(query.pairs(), &[pair("id", "in.(3,5,8)")]);
    }
}
