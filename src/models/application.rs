use serde_json::{Map, Value};
use std::fmt;

use crate::error::{Error, Result};

/// A schema-flexible application document. Only the identifier fields and the
/// status sub-document have fixed meaning; everything else passes through.
pub type Document = Map<String, Value>;

pub const APPLICATION_ID: &str = "application_id";
pub const CANDIDATE_ID: &str = "candidate_id";
pub const JOB_ID: &str = "job_id";
pub const RESUME_URL: &str = "resume_url";
pub const STATUS: &str = "status";
pub const CURRENT_STAGE: &str = "current_stage";
pub const LAST_UPDATED: &str = "last_updated";

pub const DEFAULT_STAGE: &str = "Applied";

/// Canonical text form of a job or candidate identifier. Callers send these as
/// JSON strings or numbers; `456`, `456.0` and `"456"` are the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
            }
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self(i.to_string()))
                } else if let Some(u) = n.as_u64() {
                    Some(Self(u.to_string()))
                } else {
                    let f = n.as_f64()?;
                    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                        Some(Self((f as i64).to_string()))
                    } else {
                        Some(Self(n.to_string()))
                    }
                }
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The statically-typed part of a storage-convention document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationKey {
    pub application_id: String,
    pub candidate_id: Identifier,
    pub job_id: Identifier,
}

impl ApplicationKey {
    pub fn from_storage(document: &Document) -> Result<Self> {
        let job_id = document.get(JOB_ID).and_then(Identifier::from_value);
        let candidate_id = document.get(CANDIDATE_ID).and_then(Identifier::from_value);
        let (Some(job_id), Some(candidate_id)) = (job_id, candidate_id) else {
            return Err(Error::MissingRequiredField(
                "jobId and candidateId are required".to_string(),
            ));
        };

        let application_id = document
            .get(APPLICATION_ID)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::MissingRequiredField("applicationId is required".to_string()))?
            .to_string();

        Ok(Self {
            application_id,
            candidate_id,
            job_id,
        })
    }
}
