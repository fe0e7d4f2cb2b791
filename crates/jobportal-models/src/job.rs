//! Job document model and creation payload.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::deadline::{normalize_deadline, now_timestamp, DeadlineError};

/// Company embedded in a job posting. Extra fields (logo, website, ...)
/// are carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Identity of the user who posted a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedBy {
    pub name: String,
    pub email: String,
}

/// A candidate who applied to a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub email: String,
}

/// A job posting document as stored in the `job` collection.
///
/// `_id` is absent until the document is inserted; in JSON responses it is
/// rendered as the 24-character hex string rather than extended JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(
        rename = "_id",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_object_id_hex",
        default
    )]
    pub id: Option<ObjectId>,

    pub title: String,

    /// Employment type (e.g. "full-time", "remote").
    #[serde(rename = "type")]
    pub job_type: String,

    /// Application deadline, normalized to UTC RFC 3339 with milliseconds.
    pub deadline: String,

    /// Salary band. Zero is a valid value; min <= max is not enforced.
    pub min_salary: f64,
    pub max_salary: f64,

    pub company: Company,

    /// Owning identity of the posting.
    pub created_by: PostedBy,

    /// Server-set creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,

    /// Applicants so far. Append-only via the apply action.
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Applicant counter, incremented together with `candidates`.
    #[serde(default)]
    pub applicants: i64,

    /// Pass-through fields (banner, description, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn serialize_object_id_hex<S>(id: &Option<ObjectId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match id {
        Some(oid) => serializer.serialize_str(&oid.to_hex()),
        None => serializer.serialize_none(),
    }
}

/// Error returned when a job creation payload fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobValidationError {
    #[error("missing or empty field: {0}")]
    EmptyField(&'static str),
    #[error(transparent)]
    Deadline(#[from] DeadlineError),
}

/// Payload for `POST /job`.
///
/// Serde enforces field presence, so a salary of `0` passes (presence, not
/// truthiness). [`CreateJobRequest::validate`] additionally rejects empty
/// strings, matching the contract that blank titles or emails are invalid.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub deadline: String,
    pub min_salary: f64,
    pub max_salary: f64,
    pub company: Company,
    pub created_by: PostedBy,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreateJobRequest {
    /// Reject payloads whose required string fields are empty or blank.
    pub fn validate(&self) -> Result<(), JobValidationError> {
        let required = [
            ("title", &self.title),
            ("type", &self.job_type),
            ("deadline", &self.deadline),
            ("company.name", &self.company.name),
            ("created_by.name", &self.created_by.name),
            ("created_by.email", &self.created_by.email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(JobValidationError::EmptyField(field));
            }
        }
        Ok(())
    }

    /// Validate and turn the payload into an insertable document: deadline
    /// normalized, counters zeroed, `createdAt` stamped.
    pub fn into_job(self) -> Result<Job, JobValidationError> {
        self.validate()?;
        let deadline = normalize_deadline(&self.deadline)?;
        Ok(Job {
            id: None,
            title: self.title,
            job_type: self.job_type,
            deadline,
            min_salary: self.min_salary,
            max_salary: self.max_salary,
            company: self.company,
            created_by: self.created_by,
            created_at: now_timestamp(),
            candidates: Vec::new(),
            applicants: 0,
            extra: self.extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> serde_json::Value {
        serde_json::json!({
            "title": "Backend Engineer",
            "type": "full-time",
            "deadline": "2024-06-15",
            "min_salary": 0,
            "max_salary": 90000,
            "company": { "name": "Acme", "logo": "https://acme.test/logo.png" },
            "created_by": { "name": "Owner", "email": "owner@x.com" },
            "description": "Build services"
        })
    }

    #[test]
    fn valid_payload_becomes_fresh_job() {
        let req: CreateJobRequest = serde_json::from_value(sample_payload()).unwrap();
        let job = req.into_job().unwrap();

        assert_eq!(job.applicants, 0);
        assert!(job.candidates.is_empty());
        assert!(job.id.is_none());
        assert_eq!(job.deadline, "2024-06-15T00:00:00.000Z");
        assert_eq!(job.created_by.email, "owner@x.com");
        // pass-through fields survive
        assert_eq!(job.extra["description"], "Build services");
        assert_eq!(job.company.extra["logo"], "https://acme.test/logo.png");
    }

    #[test]
    fn zero_salary_is_accepted() {
        let req: CreateJobRequest = serde_json::from_value(sample_payload()).unwrap();
        assert_eq!(req.min_salary, 0.0);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_required_field_fails_deserialization() {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove("min_salary");
        assert!(serde_json::from_value::<CreateJobRequest>(payload).is_err());

        let mut payload = sample_payload();
        payload["company"].as_object_mut().unwrap().remove("name");
        assert!(serde_json::from_value::<CreateJobRequest>(payload).is_err());
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut payload = sample_payload();
        payload["title"] = serde_json::json!("   ");
        let req: CreateJobRequest = serde_json::from_value(payload).unwrap();
        assert_eq!(
            req.validate(),
            Err(JobValidationError::EmptyField("title"))
        );
    }

    #[test]
    fn bad_deadline_is_rejected() {
        let mut payload = sample_payload();
        payload["deadline"] = serde_json::json!("whenever");
        let req: CreateJobRequest = serde_json::from_value(payload).unwrap();
        assert!(matches!(
            req.into_job(),
            Err(JobValidationError::Deadline(_))
        ));
    }

    #[test]
    fn inserted_id_serializes_as_hex_string() {
        let req: CreateJobRequest = serde_json::from_value(sample_payload()).unwrap();
        let mut job = req.into_job().unwrap();
        job.id = Some(ObjectId::parse_str("65f1a2b3c4d5e6f708192a3b").unwrap());

        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["_id"], "65f1a2b3c4d5e6f708192a3b");
        assert_eq!(json["type"], "full-time");
        assert_eq!(json["createdAt"], job.created_at);
    }

    #[test]
    fn fresh_job_omits_id_when_serialized() {
        let req: CreateJobRequest = serde_json::from_value(sample_payload()).unwrap();
        let job = req.into_job().unwrap();
        let json = serde_json::to_value(&job).unwrap();
        assert!(json.get("_id").is_none());
    }
}
