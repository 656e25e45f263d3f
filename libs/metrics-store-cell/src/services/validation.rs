// =====================================================================================
// REQUEST VALIDATION
// =====================================================================================
//
// Runs before any statement reaches the database, so a rejected request never
// leaves a partial write behind.

use shared_models::validation::{FieldViolation, Validator};

use crate::models::{
    CreateMetricRequest, CreateServiceRequest, MetricsQuery, NewMetric, NewService,
    MAX_METRIC_TYPE_LEN, MAX_SERVICE_NAME_LEN, MAX_UNIT_LEN,
};

pub fn validate_metric(request: CreateMetricRequest) -> Result<NewMetric, Vec<FieldViolation>> {
    let mut v = Validator::new();

    let service_name = v
        .required_text("service_name", request.service_name.as_deref(), 1, MAX_SERVICE_NAME_LEN)
        .map(str::to_owned);
    let metric_type = v
        .required_text("metric_type", request.metric_type.as_deref(), 1, MAX_METRIC_TYPE_LEN)
        .map(str::to_owned);
    let value = v.required_non_negative("value", request.value);
    let unit = v
        .required_text("unit", request.unit.as_deref(), 1, MAX_UNIT_LEN)
        .map(str::to_owned);

    match (service_name, metric_type, value, unit) {
        (Some(service_name), Some(metric_type), Some(value), Some(unit)) if v.is_empty() => {
            Ok(NewMetric {
                service_name,
                metric_type,
                value,
                unit,
                extra_data: request.extra_data,
            })
        }
        _ => Err(v.into_violations()),
    }
}

pub fn validate_service(request: CreateServiceRequest) -> Result<NewService, Vec<FieldViolation>> {
    let mut v = Validator::new();
    let name = v
        .required_text("name", request.name.as_deref(), 1, MAX_SERVICE_NAME_LEN)
        .map(str::to_owned);

    match name {
        Some(name) if v.is_empty() => Ok(NewService {
            name,
            description: request.description,
            url: request.url,
        }),
        _ => Err(v.into_violations()),
    }
}

pub fn validate_query(query: &MetricsQuery) -> Result<(), Vec<FieldViolation>> {
    let mut v = Validator::new();
    if query.limit() < 0 {
        v.reject("limit", "must be greater than or equal to 0");
    }
    v.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_metric() -> CreateMetricRequest {
        CreateMetricRequest {
            service_name: Some("api-gateway".into()),
            metric_type: Some("cpu".into()),
            value: Some(45.5),
            unit: Some("percent".into()),
            extra_data: None,
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_valid_metric_passes_unchanged() {
        let mut request = valid_metric();
        request.extra_data = json!({"host": "server-01"}).as_object().cloned();

        let metric = validate_metric(request).unwrap();
        assert_eq!(metric.service_name, "api-gateway");
        assert_eq!(metric.value, 45.5);
        assert_eq!(metric.extra_data.unwrap()["host"], "server-01");
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let request = CreateMetricRequest {
            service_name: Some("api-gateway".into()),
            metric_type: Some("cpu".into()),
            ..Default::default()
        };

        let violations = validate_metric(request).unwrap_err();
        assert_eq!(fields(&violations), vec!["value", "unit"]);
    }

    #[test]
    fn test_metric_bounds() {
        let request = CreateMetricRequest {
            service_name: Some("s".repeat(101)),
            metric_type: Some(String::new()),
            value: Some(-1.0),
            unit: Some("u".repeat(21)),
            extra_data: None,
        };

        let violations = validate_metric(request).unwrap_err();
        assert_eq!(fields(&violations), vec!["service_name", "metric_type", "value", "unit"]);
    }

    #[test]
    fn test_zero_value_and_limits_are_accepted() {
        let request = CreateMetricRequest {
            service_name: Some("s".repeat(100)),
            metric_type: Some("m".repeat(50)),
            value: Some(0.0),
            unit: Some("u".repeat(20)),
            extra_data: None,
        };
        assert!(validate_metric(request).is_ok());
    }

    #[test]
    fn test_service_name_required() {
        let violations = validate_service(CreateServiceRequest::default()).unwrap_err();
        assert_eq!(fields(&violations), vec!["name"]);

        let violations = validate_service(CreateServiceRequest {
            name: Some(String::new()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(violations[0].message, "must be at least 1 character(s)");
    }

    #[test]
    fn test_negative_limit_rejected() {
        let query = MetricsQuery {
            limit: Some(-1),
            ..Default::default()
        };
        assert!(validate_query(&query).is_err());
        assert!(validate_query(&MetricsQuery::default()).is_ok());
    }
}
