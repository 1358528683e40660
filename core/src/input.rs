use std::collections::HashMap;
use anyhow::{anyhow, Result};

use crate::config::KNOWN_LEAVE_TYPES;

/// Free words plus `key:value` metadata, e.g. `Jane Smith date:today type:sick`.
#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub name: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut name_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() && !key.contains(' ') {
                metadata.insert(key.to_lowercase(), value.trim().to_string());
                continue;
            }
        }
        name_parts.push(arg.trim());
    }

    ParsedInput {
        name: name_parts.join(" "),
        metadata,
    }
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Map user input onto a known leave type where it names one unambiguously.
///
/// `sick`, `Sick Leave` and `si` all give "Sick Leave". Anything else is kept
/// as typed, since the set of leave types is open.
pub fn resolve_leave_type(input: &str) -> Result<String> {
    let wanted = input.trim().to_lowercase();
    if wanted.is_empty() {
        return Err(anyhow!("Leave type is empty"));
    }

    if let Some(exact) = KNOWN_LEAVE_TYPES
        .iter()
        .find(|t| t.to_lowercase() == wanted || t.to_lowercase() == format!("{} leave", wanted))
    {
        return Ok(exact.to_string());
    }

    let matches: Vec<&str> = KNOWN_LEAVE_TYPES
        .iter()
        .filter(|t| t.to_lowercase().starts_with(&wanted))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Ok(input.trim().to_string()),
        _ => Err(anyhow!("Ambiguous leave type: '{}' matches {:?}", input.trim(), matches)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let args = vec![
            "Jane".to_string(),
            "Smith".to_string(),
            "date:2024-01-05".to_string(),
            "Type:sick".to_string(),
            "comment:flu, resting".to_string(),
        ];
        let parsed = parse_args(&args);
        assert_eq!(parsed.name, "Jane Smith");
        assert_eq!(parsed.metadata.get("date"), Some(&"2024-01-05".to_string()));
        assert_eq!(parsed.metadata.get("type"), Some(&"sick".to_string()));
        assert_eq!(parsed.metadata.get("comment"), Some(&"flu, resting".to_string()));
    }

    #[test]
    fn test_expand_key() {
        let candidates = vec!["date", "until", "type", "comment"];

        assert_eq!(expand_key("d", &candidates).unwrap(), "date");
        assert_eq!(expand_key("un", &candidates).unwrap(), "until");
        assert_eq!(expand_key("type", &candidates).unwrap(), "type");
        assert_eq!(expand_key("c", &candidates).unwrap(), "comment");

        // Unknown
        assert!(expand_key("x", &candidates).is_err());
    }

    #[test]
    fn test_expand_key_ambiguous() {
        let candidates = vec!["from", "force"];
        assert!(expand_key("f", &candidates).is_err());
        assert_eq!(expand_key("fr", &candidates).unwrap(), "from");
    }

    #[test]
    fn test_resolve_leave_type() {
        assert_eq!(resolve_leave_type("sick").unwrap(), "Sick Leave");
        assert_eq!(resolve_leave_type("ANNUAL LEAVE").unwrap(), "Annual Leave");
        assert_eq!(resolve_leave_type("bere").unwrap(), "Bereavement Leave");
        assert_eq!(resolve_leave_type("Sabbatical").unwrap(), "Sabbatical");
        // Paternity and Personal
        assert!(resolve_leave_type("p").is_err());
        assert!(resolve_leave_type(" ").is_err());
    }
}
