// Presence and type checks for tool arguments

use crate::error::{ToolError, ToolOutcome};
use serde_json::{Map, Value};

/// Borrowed view over a call's `arguments` object.
pub struct Arguments<'a> {
    values: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    pub fn new(tool: &str, arguments: &'a Value) -> ToolOutcome<Self> {
        let values = arguments
            .as_object()
            .ok_or_else(|| ToolError::InvalidArguments {
                tool: tool.to_string(),
                reason: "arguments must be a JSON object".to_string(),
            })?;
        Ok(Self { values })
    }

    /// A string that must be present.
    pub fn required_str(&self, name: &str) -> ToolOutcome<&'a str> {
        self.optional_str(name)?
            .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
    }

    /// A string that may be absent or null.
    pub fn optional_str(&self, name: &str) -> ToolOutcome<Option<&'a str>> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(ToolError::InvalidArgument {
                name: name.to_string(),
                expected: "a string",
            }),
        }
    }

    /// A non-negative whole number, or `default` when absent.
    pub fn count_or(&self, name: &str, default: u32) -> ToolOutcome<u32> {
        let invalid = || ToolError::InvalidArgument {
            name: name.to_string(),
            expected: "a non-negative integer",
        };

        match self.values.get(name) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Number(number)) => {
                if let Some(count) = number.as_u64() {
                    return u32::try_from(count).map_err(|_| invalid());
                }
                match number.as_f64() {
                    Some(count) if count >= 0.0 && count.fract() == 0.0 && count <= u32::MAX as f64 => {
                        Ok(count as u32)
                    }
                    _ => Err(invalid()),
                }
            }
            Some(_) => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arguments_must_be_an_object() {
        let value = json!(["siteUrl"]);
        let err = Arguments::new("get_list_items", &value).err().unwrap();
        assert_eq!(
            err.to_string(),
            "Invalid arguments for get_list_items: arguments must be a JSON object"
        );
    }

    #[test]
    fn test_required_str() {
        let value = json!({"siteUrl": "https://contoso.sharepoint.com", "listTitle": 7, "filter": null});
        let args = Arguments::new("t", &value).unwrap();

        assert_eq!(args.required_str("siteUrl").unwrap(), "https://contoso.sharepoint.com");
        assert!(args
            .required_str("searchQuery")
            .unwrap_err()
            .to_string()
            .contains("searchQuery"));
        assert!(args
            .required_str("listTitle")
            .unwrap_err()
            .to_string()
            .contains("listTitle"));
        assert!(matches!(
            args.required_str("filter"),
            Err(ToolError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_optional_str() {
        let value = json!({"filter": "fields/Status eq 'Active'", "other": false});
        let args = Arguments::new("t", &value).unwrap();

        assert_eq!(args.optional_str("filter").unwrap(), Some("fields/Status eq 'Active'"));
        assert_eq!(args.optional_str("missing").unwrap(), None);
        assert!(args.optional_str("other").is_err());
    }

    #[test]
    fn test_count_or() {
        let value = json!({"a": 2, "b": 25.0, "c": -1, "d": 2.5, "e": "10", "f": null, "g": 5000000000u64});
        let args = Arguments::new("t", &value).unwrap();

        assert_eq!(args.count_or("a", 50).unwrap(), 2);
        assert_eq!(args.count_or("b", 50).unwrap(), 25);
        assert_eq!(args.count_or("missing", 50).unwrap(), 50);
        assert_eq!(args.count_or("f", 100).unwrap(), 100);

        for name in ["c", "d", "e", "g"] {
            let err = args.count_or(name, 50).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Invalid argument {}: expected a non-negative integer", name)
            );
        }
    }
}
