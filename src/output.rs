//! Rendering of outputs as `TF_VAR_` assignments.

use crate::config::ProgramConfig;
use crate::terraform::OutputMap;

const VAR_PREFIX: &str = "TF_VAR_";

pub fn env_var_name(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}{}_{}", VAR_PREFIX, prefix, key),
        None => format!("{}{}", VAR_PREFIX, key),
    }
}

/// Formats every output as `NAME=value`, joined by single spaces.
///
/// ```text
/// TF_VAR_foo=bar TF_VAR_baz=qux
/// ```
pub fn output_state(config: &ProgramConfig, outputs: &OutputMap) -> String {
    outputs
        .iter()
        .map(|(key, value)| format!("{}={}", env_var_name(config.prefix.as_deref(), key), value))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terraform::OutputValue;

    fn outputs(pairs: &[(&str, &str)]) -> OutputMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OutputValue::from(*v)))
            .collect()
    }

    fn sorted_tokens(line: &str) -> Vec<&str> {
        let mut tokens: Vec<&str> = line.split(' ').collect();
        tokens.sort_unstable();
        tokens
    }

    #[test]
    fn test_output_state_plain() {
        let config = ProgramConfig::new("http");
        let line = output_state(&config, &outputs(&[("foo", "bar"), ("baz", "qux")]));
        assert_eq!(sorted_tokens(&line), vec!["TF_VAR_baz=qux", "TF_VAR_foo=bar"]);
    }

    #[test]
    fn test_output_state_prefixed() {
        let config = ProgramConfig::new("http").with_prefix("foobar");
        let line = output_state(&config, &outputs(&[("foo", "bar"), ("baz", "qux")]));
        assert_eq!(
            sorted_tokens(&line),
            vec!["TF_VAR_foobar_baz=qux", "TF_VAR_foobar_foo=bar"]
        );
    }

    #[test]
    fn test_output_state_empty_map_any_prefix() {
        let empty = OutputMap::new();
        assert_eq!(output_state(&ProgramConfig::default(), &empty), "");
        assert_eq!(
            output_state(&ProgramConfig::default().with_prefix("p"), &empty),
            ""
        );
    }

    #[test]
    fn test_output_state_one_token_per_output() {
        let map = outputs(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);
        let line = output_state(&ProgramConfig::default().with_prefix("env"), &map);

        let tokens: Vec<&str> = line.split(' ').collect();
        assert_eq!(tokens.len(), map.len());
        for (key, value) in &map {
            assert!(tokens.contains(&format!("TF_VAR_env_{}={}", key, value).as_str()));
        }
        assert!(!line.ends_with(' '));
    }

    #[test]
    fn test_output_state_composite_value() {
        let mut map = OutputMap::new();
        map.insert(
            "subnets".to_string(),
            OutputValue::from(serde_json::json!(["10.0.1.0/24", "10.0.2.0/24"])),
        );
        let line = output_state(&ProgramConfig::default(), &map);
        assert_eq!(line, r#"TF_VAR_subnets=["10.0.1.0/24","10.0.2.0/24"]"#);
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name(None, "region"), "TF_VAR_region");
        assert_eq!(env_var_name(Some("net"), "region"), "TF_VAR_net_region");
    }
}
