use crate::models::MetricsQuery;

pub(crate) const METRIC_COLUMNS: &str =
    "id, service_name, metric_type, value, unit, extra_data, timestamp";

pub(crate) const SERVICE_COLUMNS: &str =
    "id, name, description, url, status, created_at, updated_at";

/// `GET /metrics` translated into one parameterized statement.
///
/// Text filters bind in order as `$1..$n`; the limit is always the last parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsFilter {
    pub sql: String,
    pub params: Vec<String>,
    pub limit: i64,
}

impl MetricsFilter {
    pub fn from_query(query: &MetricsQuery) -> Self {
        let mut predicates = Vec::new();
        let mut params = Vec::new();

        // Empty strings mean "no filter", same as omitting the parameter.
        let filters = [
            ("service_name", query.service_name.as_deref()),
            ("metric_type", query.metric_type.as_deref()),
        ];
        for (column, value) in filters {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                params.push(value.to_string());
                predicates.push(format!("{} = ${}", column, params.len()));
            }
        }

        let mut sql = format!("SELECT {} FROM service_metrics", METRIC_COLUMNS);
        if !predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&predicates.join(" AND "));
        }
        // id breaks ties between samples written within the same microsecond.
        sql.push_str(&format!(
            " ORDER BY timestamp DESC, id DESC LIMIT ${}",
            params.len() + 1
        ));

        Self {
            sql,
            params,
            limit: query.limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filters() {
        let filter = MetricsFilter::from_query(&MetricsQuery::default());

        assert_eq!(
            filter.sql,
            "SELECT id, service_name, metric_type, value, unit, extra_data, timestamp \
             FROM service_metrics ORDER BY timestamp DESC, id DESC LIMIT $1"
        );
        assert!(filter.params.is_empty());
        assert_eq!(filter.limit, 100);
    }

    #[test]
    fn test_both_filters_are_conjunctive() {
        let filter = MetricsFilter::from_query(&MetricsQuery {
            service_name: Some("worker".into()),
            metric_type: Some("memory".into()),
            limit: Some(5),
        });

        assert!(filter
            .sql
            .contains("WHERE service_name = $1 AND metric_type = $2 ORDER BY"));
        assert!(filter.sql.ends_with("LIMIT $3"));
        assert_eq!(filter.params, vec!["worker", "memory"]);
        assert_eq!(filter.limit, 5);
    }

    #[test]
    fn test_single_filter_numbering() {
        let filter = MetricsFilter::from_query(&MetricsQuery {
            metric_type: Some("cpu".into()),
            ..Default::default()
        });

        assert!(filter.sql.contains("WHERE metric_type = $1 ORDER BY"));
        assert!(filter.sql.ends_with("LIMIT $2"));
    }

    #[test]
    fn test_empty_filter_is_ignored() {
        let filter = MetricsFilter::from_query(&MetricsQuery {
            service_name: Some(String::new()),
            ..Default::default()
        });

        assert!(!filter.sql.contains("WHERE"));
        assert!(filter.params.is_empty());
    }

    #[test]
    fn test_values_are_never_interpolated() {
        let filter = MetricsFilter::from_query(&MetricsQuery {
            service_name: Some("x' OR '1'='1".into()),
            ..Default::default()
        });

        assert!(!filter.sql.contains("OR '1'"));
        assert_eq!(filter.params[0], "x' OR '1'='1");
    }
}
