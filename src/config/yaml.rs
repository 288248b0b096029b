//! # YAML Config Flattening
//!
//! Flattens `application.yaml` into the same dotted-key map a `.properties`
//! file produces, so both sources resolve keys identically.

use serde_yaml::Value;
use std::collections::HashMap;

/// Parse YAML content and flatten nested mappings to dotted keys.
///
/// Sequences become indexed keys (`hosts[0]`), `null` becomes an empty string.
pub fn flatten_yaml(content: &str) -> Result<HashMap<String, String>, serde_yaml::Error> {
    let mut out = HashMap::new();
    if content.trim().is_empty() {
        return Ok(out);
    }
    let value: Value = serde_yaml::from_str(content)?;
    flatten_into("", &value, &mut out);
    Ok(out)
}

fn flatten_into(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Mapping(map) => {
            for (k, v) in map {
                let Some(key) = scalar_to_string(k) else {
                    continue;
                };
                let full = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(&full, v, out);
            }
        }
        Value::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(&format!("{prefix}[{i}]"), item, out);
            }
        }
        Value::Tagged(tagged) => flatten_into(prefix, &tagged.value, out),
        Value::Null => {
            if !prefix.is_empty() {
                out.insert(prefix.to_string(), String::new());
            }
        }
        scalar => {
            if prefix.is_empty() {
                return;
            }
            if let Some(s) = scalar_to_string(scalar) {
                out.insert(prefix.to_string(), s);
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_nested_mapping() {
        let yaml = r"
my:
  secret: hello
azure:
  keyvault:
    uri: https://other.vault.azure.net
    secret-name: db-password
poller:
  interval-seconds: 5
";
        let flat = flatten_yaml(yaml).unwrap();
        assert_eq!(flat["my.secret"], "hello");
        assert_eq!(flat["azure.keyvault.uri"], "https://other.vault.azure.net");
        assert_eq!(flat["azure.keyvault.secret-name"], "db-password");
        assert_eq!(flat["poller.interval-seconds"], "5");
    }

    #[test]
    fn test_flatten_dotted_key_at_top_level() {
        let flat = flatten_yaml("my.secret: inline\n").unwrap();
        assert_eq!(flat["my.secret"], "inline");
    }

    #[test]
    fn test_flatten_sequences_and_nulls() {
        let yaml = "hosts:\n  - a\n  - b\nempty:\nenabled: true\n";
        let flat = flatten_yaml(yaml).unwrap();
        assert_eq!(flat["hosts[0]"], "a");
        assert_eq!(flat["hosts[1]"], "b");
        assert_eq!(flat["empty"], "");
        assert_eq!(flat["enabled"], "true");
    }

    #[test]
    fn test_flatten_empty_document() {
        let flat = flatten_yaml("").unwrap();
        assert!(flat.is_empty());
    }

    #[test]
    fn test_flatten_rejects_malformed_yaml() {
        assert!(flatten_yaml("my: [unclosed").is_err());
    }
}
