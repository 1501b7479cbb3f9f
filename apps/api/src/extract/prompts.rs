// Resume extraction prompt and response schema. All prompt text for the
// extract module lives here.

use serde_json::{json, Value};

pub const RESUME_PARSE_PROMPT: &str = "\
Please analyze this resume and extract the following information into a JSON \
format: first name, last name, email, phone number, address, and a brief \
summary of relevant physical or maintenance experience. If a field is not \
found, leave it as an empty string.";

/// Structured-output schema sent with every extraction call. Field names match
/// `ParsedResumeData` exactly, so the reply deserializes without remapping.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "first_name": { "type": "STRING" },
            "last_name": { "type": "STRING" },
            "email": { "type": "STRING" },
            "phone": { "type": "STRING" },
            "address": { "type": "STRING" },
            "experience_summary": { "type": "STRING" }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_covers_every_overlay_field() {
        let schema = response_schema();
        let properties = schema["properties"].as_object().unwrap();
        let expected = [
            "first_name",
            "last_name",
            "email",
            "phone",
            "address",
            "experience_summary",
        ];
        assert_eq!(properties.len(), expected.len());
        for field in expected {
            assert!(properties.contains_key(field), "schema missing {field}");
        }
    }
}
