//! Key-casing conversion between the storage convention (`resume_url`) and the
//! transport convention (`resumeUrl`).
//!
//! Conversion recurses into nested objects and into arrays whose elements are
//! objects. Scalars and non-object array elements are left untouched. Keys with
//! consecutive capitals (`URLPath`) or embedded separators are converted
//! mechanically and are not guaranteed to round-trip.

use serde_json::{Map, Value};

const SEPARATOR: char = '_';

/// `resumeUrl` -> `resume_url`
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push(SEPARATOR);
        }
        out.extend(ch.to_lowercase());
    }
    out
}

/// `resume_url` -> `resumeUrl`
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for (i, segment) in key.split(SEPARATOR).enumerate() {
        if i == 0 {
            out.push_str(&segment.to_lowercase());
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}

pub fn to_storage_keys(document: Map<String, Value>) -> Map<String, Value> {
    rename_keys(document, to_snake_case)
}

pub fn to_transport_keys(document: Map<String, Value>) -> Map<String, Value> {
    rename_keys(document, to_camel_case)
}

fn rename_keys(document: Map<String, Value>, rename: fn(&str) -> String) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(key, value)| (rename(&key), rename_value(value, rename)))
        .collect()
}

fn rename_value(value: Value, rename: fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(rename_keys(map, rename)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => Value::Object(rename_keys(map, rename)),
                    other => other,
                })
                .collect(),
        ),
        scalar => scalar,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn converts_single_keys() {
        assert_eq!(to_snake_case("resumeUrl"), "resume_url");
        assert_eq!(to_snake_case("candidateId"), "candidate_id");
        assert_eq!(to_snake_case("email"), "email");
        assert_eq!(to_camel_case("resume_url"), "resumeUrl");
        assert_eq!(to_camel_case("last_updated"), "lastUpdated");
        assert_eq!(to_camel_case("phone"), "phone");
    }

    #[test]
    fn leading_capital_gets_no_separator() {
        assert_eq!(to_snake_case("Name"), "name");
        assert_eq!(to_snake_case("JobId"), "job_id");
    }

    #[test]
    fn transport_conversion_normalizes_segment_case() {
        assert_eq!(to_camel_case("RESUME_URL"), "resumeUrl");
        assert_eq!(to_camel_case("current_STAGE"), "currentStage");
    }

    #[test]
    fn recurses_into_objects_and_arrays_of_objects() {
        let doc = object(json!({
            "candidateId": 456,
            "status": { "currentStage": "Applied" },
            "workHistory": [
                { "companyName": "Acme", "startYear": 2020 },
                "freeText",
                [ { "innerKey": 1 } ]
            ],
            "skillTags": ["rustLang", "sqlDb"]
        }));

        let stored = to_storage_keys(doc);

        assert_eq!(stored["candidate_id"], json!(456));
        assert_eq!(stored["status"]["current_stage"], json!("Applied"));
        assert_eq!(stored["work_history"][0]["company_name"], json!("Acme"));
        assert_eq!(stored["work_history"][0]["start_year"], json!(2020));
        assert_eq!(stored["work_history"][1], json!("freeText"));
        // nested arrays are not documents and pass through untouched
        assert_eq!(stored["work_history"][2], json!([{ "innerKey": 1 }]));
        assert_eq!(stored["skill_tags"], json!(["rustLang", "sqlDb"]));
    }

    #[test]
    fn scalar_values_are_never_rewritten() {
        let doc = object(json!({ "resume_url": "https://x/someFile_name.pdf", "flag": true, "empty": null }));
        let transport = to_transport_keys(doc);
        assert_eq!(transport["resumeUrl"], json!("https://x/someFile_name.pdf"));
        assert_eq!(transport["flag"], json!(true));
        assert_eq!(transport["empty"], Value::Null);
    }

    #[test]
    fn storage_then_transport_round_trips() {
        let original = object(json!({
            "applicationId": "65f1c0ffee0000000000beef",
            "jobId": 123,
            "candidateId": "c-456",
            "resumeUrl": "https://x/r.pdf",
            "status": { "currentStage": "Applied", "lastUpdated": "2025-01-01T00:00:00Z" },
            "education": [ { "schoolName": "MIT", "graduationYear": 2019 } ],
            "address2Line": "Suite 5"
        }));

        let round_tripped = to_transport_keys(to_storage_keys(original.clone()));
        assert_eq!(round_tripped, original);
    }
}
