//! Dynamically-typed step parameters and their coercion rules.
//!
//! Scenario steps carry an open key/value parameter bag. Values are modeled
//! as a tagged variant rather than raw JSON so that every coercion an action
//! handler performs is total: a missing key or a value of the wrong shape
//! degrades to a neutral default (`0`, `""`, `[]`, `{}`, `false`) instead of
//! failing the step. Callers that send sloppy payloads get best-effort
//! behavior, which is the documented contract of the scenario interface.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single dynamically-typed parameter value.
///
/// Deserialized untagged, so JSON payloads map naturally: numbers land in
/// [`ParamValue::Int`] when integral and [`ParamValue::Float`] otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ParamValue>),
    Map(HashMap<String, ParamValue>),
}

/// Parameter bag attached to a scenario step.
pub type ParamMap = HashMap<String, ParamValue>;

impl ParamValue {
    /// Coerce to an integer. Floats are truncated, numeric strings are
    /// parsed; anything else yields 0.
    pub fn coerce_int(&self) -> i64 {
        match self {
            ParamValue::Int(v) => *v,
            ParamValue::Float(v) => *v as i64,
            ParamValue::Str(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Coerce to a boolean. Only genuine booleans count; any other shape
    /// yields false.
    pub fn coerce_bool(&self) -> bool {
        matches!(self, ParamValue::Bool(true))
    }
}

impl fmt::Display for ParamValue {
    /// Canonical string rendering, used when a map field carries a
    /// non-string value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Str(s) => write!(f, "{}", s),
            ParamValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            ParamValue::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}={}", key, map[*key])?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// Extract an integer field; absent or unparseable values yield 0.
pub fn int_param(params: &ParamMap, key: &str) -> i64 {
    params.get(key).map(ParamValue::coerce_int).unwrap_or(0)
}

/// Extract an integer field only when the key is present.
pub fn opt_int_param(params: &ParamMap, key: &str) -> Option<i64> {
    params.get(key).map(ParamValue::coerce_int)
}

/// Extract a string field verbatim; absent or non-string values yield "".
pub fn str_param(params: &ParamMap, key: &str) -> String {
    match params.get(key) {
        Some(ParamValue::Str(s)) => s.clone(),
        _ => String::new(),
    }
}

/// Extract a boolean field; anything but a genuine boolean yields false.
pub fn bool_param(params: &ParamMap, key: &str) -> bool {
    params.get(key).map(ParamValue::coerce_bool).unwrap_or(false)
}

/// Extract a list of strings. Non-string elements are dropped; a non-list
/// value yields an empty list.
pub fn str_list_param(params: &ParamMap, key: &str) -> Vec<String> {
    match params.get(key) {
        Some(ParamValue::List(items)) => items
            .iter()
            .filter_map(|item| match item {
                ParamValue::Str(s) => Some(s.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract a list of integers, coercing each element; a non-list value
/// yields an empty list.
pub fn int_list_param(params: &ParamMap, key: &str) -> Vec<i64> {
    match params.get(key) {
        Some(ParamValue::List(items)) => items.iter().map(ParamValue::coerce_int).collect(),
        _ => Vec::new(),
    }
}

/// Extract a string-to-string map. String values are taken verbatim, other
/// value shapes are rendered to their canonical string form; a non-map value
/// yields an empty map.
pub fn str_map_param(params: &ParamMap, key: &str) -> HashMap<String, String> {
    match params.get(key) {
        Some(ParamValue::Map(map)) => map
            .iter()
            .map(|(k, v)| match v {
                ParamValue::Str(s) => (k.clone(), s.clone()),
                other => (k.clone(), other.to_string()),
            })
            .collect(),
        _ => HashMap::new(),
    }
}

/// Merge a step's built-in parameters with caller-supplied overrides.
///
/// The result contains every key from `base`, then every key from
/// `overrides`, overwriting on collision. Both inputs are left untouched.
/// When a templated request carries overrides, this merge is applied
/// independently to every step of the template, so a single override key is
/// broadcast to all steps that declare it.
pub fn merge_params(base: &ParamMap, overrides: &ParamMap) -> ParamMap {
    let mut merged = base.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, ParamValue)]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_int_coercion_accepts_numbers_and_numeric_strings() {
        let p = params(&[
            ("int", ParamValue::Int(42)),
            ("float", ParamValue::Float(7.9)),
            ("string", ParamValue::Str("100".to_string())),
            ("junk", ParamValue::Str("not a number".to_string())),
            ("bool", ParamValue::Bool(true)),
        ]);

        assert_eq!(int_param(&p, "int"), 42);
        assert_eq!(int_param(&p, "float"), 7); // truncated, not rounded
        assert_eq!(int_param(&p, "string"), 100);
        assert_eq!(int_param(&p, "junk"), 0);
        assert_eq!(int_param(&p, "bool"), 0);
        assert_eq!(int_param(&p, "missing"), 0);
    }

    #[test]
    fn test_opt_int_distinguishes_absent_from_zero() {
        let p = params(&[("vlan", ParamValue::Int(0))]);

        assert_eq!(opt_int_param(&p, "vlan"), Some(0));
        assert_eq!(opt_int_param(&p, "missing"), None);
    }

    #[test]
    fn test_str_coercion_is_verbatim_or_empty() {
        let p = params(&[
            ("name", ParamValue::Str("br0".to_string())),
            ("number", ParamValue::Int(5)),
        ]);

        assert_eq!(str_param(&p, "name"), "br0");
        assert_eq!(str_param(&p, "number"), ""); // no implicit rendering
        assert_eq!(str_param(&p, "missing"), "");
    }

    #[test]
    fn test_bool_coercion_rejects_truthy_lookalikes() {
        let p = params(&[
            ("on", ParamValue::Bool(true)),
            ("off", ParamValue::Bool(false)),
            ("one", ParamValue::Int(1)),
            ("word", ParamValue::Str("true".to_string())),
        ]);

        assert!(bool_param(&p, "on"));
        assert!(!bool_param(&p, "off"));
        assert!(!bool_param(&p, "one"));
        assert!(!bool_param(&p, "word"));
        assert!(!bool_param(&p, "missing"));
    }

    #[test]
    fn test_str_list_drops_non_string_elements() {
        let p = params(&[(
            "slaves",
            ParamValue::List(vec![
                ParamValue::Str("eth0".to_string()),
                ParamValue::Int(3),
                ParamValue::Str("eth1".to_string()),
                ParamValue::Bool(false),
            ]),
        )]);

        assert_eq!(str_list_param(&p, "slaves"), vec!["eth0", "eth1"]);
        assert!(str_list_param(&p, "missing").is_empty());
    }

    #[test]
    fn test_int_list_coerces_each_element() {
        let p = params(&[(
            "trunks",
            ParamValue::List(vec![
                ParamValue::Int(10),
                ParamValue::Float(20.5),
                ParamValue::Str("30".to_string()),
                ParamValue::Str("oops".to_string()),
            ]),
        )]);

        assert_eq!(int_list_param(&p, "trunks"), vec![10, 20, 30, 0]);
    }

    #[test]
    fn test_str_map_renders_non_string_values() {
        let p = params(&[(
            "options",
            ParamValue::Map(HashMap::from([
                (
                    "remote_ip".to_string(),
                    ParamValue::Str("10.0.0.1".to_string()),
                ),
                ("key".to_string(), ParamValue::Int(5000)),
                ("csum".to_string(), ParamValue::Bool(true)),
            ])),
        )]);

        let map = str_map_param(&p, "options");
        assert_eq!(map["remote_ip"], "10.0.0.1");
        assert_eq!(map["key"], "5000");
        assert_eq!(map["csum"], "true");
    }

    #[test]
    fn test_merge_override_wins_on_collision() {
        let base = params(&[("a", ParamValue::Int(1)), ("b", ParamValue::Int(2))]);
        let overrides = params(&[("b", ParamValue::Int(9)), ("c", ParamValue::Int(7))]);

        let merged = merge_params(&base, &overrides);

        assert_eq!(merged["a"], ParamValue::Int(1));
        assert_eq!(merged["b"], ParamValue::Int(9));
        assert_eq!(merged["c"], ParamValue::Int(7));
        // inputs untouched
        assert_eq!(base["b"], ParamValue::Int(2));
        assert_eq!(overrides.len(), 2);
    }

    #[test]
    fn test_untagged_json_deserialization() {
        let json = r#"{
            "name": "br-int",
            "tag": 100,
            "rate": 1.5,
            "enable": true,
            "slaves": ["eth0", "eth1"],
            "options": {"remote_ip": "10.0.0.1"}
        }"#;

        let p: ParamMap = serde_json::from_str(json).unwrap();
        assert_eq!(p["name"], ParamValue::Str("br-int".to_string()));
        assert_eq!(p["tag"], ParamValue::Int(100));
        assert_eq!(p["rate"], ParamValue::Float(1.5));
        assert_eq!(p["enable"], ParamValue::Bool(true));
        assert_eq!(str_list_param(&p, "slaves"), vec!["eth0", "eth1"]);
    }
}
