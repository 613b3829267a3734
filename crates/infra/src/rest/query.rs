use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDir {
    Asc,
    Desc,
}

impl OrderDir {
    fn as_str(self) -> &'static str {
        match self {
            OrderDir::Asc => "asc",
            OrderDir::Desc => "desc",
        }
    }
}

/// Builder for the query parameters of a collection read:
/// `select=`, `order={column}.{dir}`, `limit=`, `{column}=eq.{value}`.
#[derive(Debug, Clone, Default)]
pub struct Select {
    columns: Option<String>,
    order: Option<String>,
    limit: Option<usize>,
    filters: Vec<(String, String)>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: &str) -> Self {
        self.columns = Some(columns.to_string());
        self
    }

    pub fn order(mut self, column: &str, dir: OrderDir) -> Self {
        self.order = Some(format!("{column}.{}", dir.as_str()));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn eq<V: fmt::Display>(mut self, column: &str, value: V) -> Self {
        self.filters.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn into_params(self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(columns) = self.columns {
            params.push(("select".to_string(), columns));
        }
        for (column, filter) in self.filters {
            params.push((column, filter));
        }
        if let Some(order) = self.order {
            params.push(("order".to_string(), order));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::{OrderDir, Select};

    #[test]
    fn renders_order_and_limit() {
        let params = Select::new()
            .order("created_at", OrderDir::Desc)
            .limit(3)
            .into_params();
        assert_eq!(
            params,
            vec![
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn renders_eq_filters_in_insertion_order() {
        let params = Select::new()
            .eq("is_active", "true")
            .eq("category", "philosophy")
            .into_params();
        assert_eq!(
            params,
            vec![
                ("is_active".to_string(), "eq.true".to_string()),
                ("category".to_string(), "eq.philosophy".to_string()),
            ]
        );
    }

    #[test]
    fn renders_column_selection() {
        let params = Select::new().columns("id,discussion_id").into_params();
        assert_eq!(
            params,
            vec![("select".to_string(), "id,discussion_id".to_string())]
        );
    }

    #[test]
    fn empty_builder_renders_no_params() {
        assert!(Select::new().into_params().is_empty());
    }
}
