use serde::{Deserialize, Serialize};

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collects violations across all fields of a request so they are reported together.
#[derive(Debug, Default)]
pub struct Validator {
    violations: Vec<FieldViolation>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(field, message));
    }

    /// Required string with a character-count range. Returns the value when present.
    pub fn required_text<'a>(
        &mut self,
        field: &str,
        value: Option<&'a str>,
        min: usize,
        max: usize,
    ) -> Option<&'a str> {
        match value {
            None => {
                self.reject(field, "field required");
                None
            }
            Some(text) => {
                self.check_length(field, text, min, max);
                Some(text)
            }
        }
    }

    pub fn required_non_negative(&mut self, field: &str, value: Option<f64>) -> Option<f64> {
        match value {
            None => {
                self.reject(field, "field required");
                None
            }
            Some(v) if !v.is_finite() => {
                self.reject(field, "must be a finite number");
                None
            }
            Some(v) if v < 0.0 => {
                self.reject(field, "must be greater than or equal to 0");
                None
            }
            Some(v) => Some(v),
        }
    }

    fn check_length(&mut self, field: &str, text: &str, min: usize, max: usize) {
        let len = text.chars().count();
        if len < min {
            self.reject(field, format!("must be at least {} character(s)", min));
        } else if len > max {
            self.reject(field, format!("must be at most {} characters", max));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    pub fn finish(self) -> Result<(), Vec<FieldViolation>> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_bounds() {
        let mut v = Validator::new();
        v.required_text("a", Some(""), 1, 5);
        v.required_text("b", Some("abcdef"), 1, 5);
        v.required_text("c", None, 1, 5);
        assert_eq!(v.required_text("d", Some("ok"), 1, 5), Some("ok"));

        let violations = v.finish().unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
        assert_eq!(violations[2].message, "field required");
    }

    #[test]
    fn test_length_counts_characters() {
        let mut v = Validator::new();
        // 5 characters, 10 bytes
        v.required_text("name", Some("ééééé"), 1, 5);
        assert!(v.finish().is_ok());
    }

    #[test]
    fn test_non_negative() {
        let mut v = Validator::new();
        assert_eq!(v.required_non_negative("value", Some(0.0)), Some(0.0));
        assert_eq!(v.required_non_negative("value", Some(-0.5)), None);
        assert_eq!(v.required_non_negative("value", None), None);

        assert_eq!(v.finish().unwrap_err().len(), 2);
    }
}
