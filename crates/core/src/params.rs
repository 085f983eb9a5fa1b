//! Typed lookups over a JSON object of scene overrides.
//!
//! Scalar lookups never fail: a missing key or a value of the wrong JSON type
//! yields the supplied fallback. Only structured values (point lists) report
//! malformed input, since there is no sensible partial reading of them.

use serde_json::Value;

use crate::error::FieldError;
use crate::source::PointSource;

/// Read-only view over a JSON overrides object.
#[derive(Debug, Clone, Copy)]
pub struct Overrides<'a> {
    params: &'a Value,
}

impl<'a> Overrides<'a> {
    pub fn new(params: &'a Value) -> Self {
        Self { params }
    }

    /// True if `name` is present, whatever its type.
    pub fn has(&self, name: &str) -> bool {
        self.params.get(name).is_some()
    }

    /// Number under `name`, accepting integers as well as floats.
    pub fn f64(&self, name: &str, fallback: f64) -> f64 {
        self.params
            .get(name)
            .and_then(Value::as_f64)
            .unwrap_or(fallback)
    }

    /// Non-negative integer under `name`.
    pub fn usize(&self, name: &str, fallback: usize) -> usize {
        self.params
            .get(name)
            .and_then(Value::as_u64)
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(fallback)
    }

    pub fn bool(&self, name: &str, fallback: bool) -> bool {
        self.params
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(fallback)
    }

    pub fn string(&self, name: &str, fallback: &str) -> String {
        self.params
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_owned()
    }

    /// Optional number: `null` clears the value, a number sets it, anything
    /// else (or a missing key) keeps `fallback`.
    pub fn optional_f64(&self, name: &str, fallback: Option<f64>) -> Option<f64> {
        match self.params.get(name) {
            Some(Value::Null) => None,
            Some(v) => v.as_f64().or(fallback),
            None => fallback,
        }
    }

    /// List of `[x, y]` pairs under `name`, or `None` if the key is absent.
    pub fn points(&self, name: &str) -> Result<Option<Vec<PointSource>>, FieldError> {
        let Some(value) = self.params.get(name) else {
            return Ok(None);
        };
        let malformed =
            || FieldError::InvalidScene(format!("'{name}' must be a list of [x, y] pairs"));
        let items = value.as_array().ok_or_else(malformed)?;
        items
            .iter()
            .map(|item| match item.as_array().map(Vec::as_slice) {
                Some([x, y]) => match (x.as_f64(), y.as_f64()) {
                    (Some(x), Some(y)) => Ok(PointSource::new(x, y)),
                    _ => Err(malformed()),
                },
                _ => Err(malformed()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn f64_accepts_integers() {
        let params = json!({"step": 2});
        assert_eq!(Overrides::new(&params).f64("step", 1.0), 2.0);
    }

    #[test]
    fn f64_falls_back_on_wrong_type() {
        let params = json!({"step": "wide"});
        assert_eq!(Overrides::new(&params).f64("step", 1.5), 1.5);
    }

    #[test]
    fn scalars_fall_back_for_non_object() {
        let params = json!("not an object");
        let o = Overrides::new(&params);
        assert_eq!(o.f64("step", 7.0), 7.0);
        assert_eq!(o.usize("width", 3), 3);
        assert!(o.bool("snap", true));
        assert_eq!(o.string("policy", "skip"), "skip");
    }

    #[test]
    fn usize_rejects_negative_and_fractional() {
        let params = json!({"a": -1, "b": 2.5, "c": 64});
        let o = Overrides::new(&params);
        assert_eq!(o.usize("a", 5), 5);
        assert_eq!(o.usize("b", 9), 9);
        assert_eq!(o.usize("c", 0), 64);
    }

    #[test]
    fn bool_and_string_lookups() {
        let params = json!({"snap": true, "policy": "epsilon"});
        let o = Overrides::new(&params);
        assert!(o.bool("snap", false));
        assert_eq!(o.string("policy", "skip"), "epsilon");
        assert!(o.has("policy"));
        assert!(!o.has("ceiling"));
    }

    #[test]
    fn optional_f64_null_clears() {
        let params = json!({"ceiling": null});
        assert_eq!(Overrides::new(&params).optional_f64("ceiling", Some(1.0)), None);
    }

    #[test]
    fn optional_f64_number_sets_and_missing_keeps() {
        let params = json!({"ceiling": 2.0});
        let o = Overrides::new(&params);
        assert_eq!(o.optional_f64("ceiling", None), Some(2.0));
        assert_eq!(o.optional_f64("other", Some(1.0)), Some(1.0));
    }

    #[test]
    fn points_parses_pairs() {
        let params = json!({"sources": [[0, 0], [10.5, 2]]});
        let points = Overrides::new(&params).points("sources").unwrap().unwrap();
        assert_eq!(
            points,
            vec![PointSource::new(0.0, 0.0), PointSource::new(10.5, 2.0)]
        );
    }

    #[test]
    fn points_absent_is_none() {
        let params = json!({});
        assert!(Overrides::new(&params).points("sources").unwrap().is_none());
    }

    #[test]
    fn points_rejects_malformed_entries() {
        let cases = [
            json!({"sources": 3}),
            json!({"sources": [[1]]}),
            json!({"sources": [["a", 2]]}),
        ];
        for bad in cases {
            let result = Overrides::new(&bad).points("sources");
            assert!(
                matches!(result, Err(FieldError::InvalidScene(_))),
                "accepted {bad}"
            );
        }
    }
}
