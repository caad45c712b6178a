/// Largest `limit` the service accepts.
pub const MAX_LIMIT: usize = 500;

/// Builder for the service's textual query language.
///
/// ```
/// use questlog_igdb::Query;
///
/// let body = Query::new(&["id", "name"]).search("Chrono Trigger").limit(5).build();
/// assert_eq!(body, "fields id,name; search \"Chrono Trigger\"; limit 5;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    fields: Vec<String>,
    search: Option<String>,
    ids: Vec<u64>,
    limit: Option<usize>,
}

impl Query {
    pub fn new(fields: &[&str]) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Free-text search over game names.
    pub fn search(mut self, text: &str) -> Self {
        self.search = Some(text.to_string());
        self
    }

    /// Restrict to records whose id is in `ids`.
    pub fn where_ids(mut self, ids: &[u64]) -> Self {
        self.ids = ids.to_vec();
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.clamp(1, MAX_LIMIT));
        self
    }

    pub fn build(&self) -> String {
        let mut parts = Vec::new();

        let fields = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(",")
        };
        parts.push(format!("fields {};", fields));

        if let Some(ref text) = self.search {
            parts.push(format!("search \"{}\";", escape_search(text)));
        }
        if !self.ids.is_empty() {
            let ids: Vec<String> = self.ids.iter().map(|id| id.to_string()).collect();
            parts.push(format!("where id = ({});", ids.join(",")));
        }
        if let Some(limit) = self.limit {
            parts.push(format!("limit {};", limit));
        }

        parts.join(" ")
    }
}

fn escape_search(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "tests/query_tests.rs"]
mod tests;
