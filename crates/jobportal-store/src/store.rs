//! The job collection store.
//!
//! One [`JobStore`] is created at startup, pinged to verify connectivity,
//! shared across all requests and explicitly closed on shutdown. All
//! operations are attempted once; there is no retry policy.

use bson::{doc, oid::ObjectId, Bson, Document};
use futures_util::TryStreamExt;
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};
use serde::Serialize;
use tracing::{debug, info};

use jobportal_models::{Candidate, Job};

use crate::error::{StoreError, StoreResult};
use crate::query::ListQuery;

/// Collection holding job documents.
const JOB_COLLECTION: &str = "job";

/// Outcome of an update operation, surfaced to the caller.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdateReport {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Outcome of a delete operation. A zero count is a normal result: delete
/// is idempotent from the caller's point of view.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeleteReport {
    pub deleted_count: u64,
}

/// Result of the atomic apply-to-job update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The candidate was appended and the counter incremented.
    Applied,
    /// The job exists but already lists this email among its candidates.
    AlreadyApplied,
    /// No job with this id.
    NotFound,
}

/// Handle to the `job` collection.
#[derive(Clone)]
pub struct JobStore {
    client: Client,
    jobs: Collection<Document>,
}

impl JobStore {
    /// Connect to the database, negotiating Stable API v1, and verify the
    /// connection with a ping.
    pub async fn connect(uri: &str, db_name: &str) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_api =
            Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.app_name = Some("jobportal-api".to_string());

        let client = Client::with_options(options)?;
        let jobs = client.database(db_name).collection::<Document>(JOB_COLLECTION);

        let store = Self { client, jobs };
        store.ping().await?;
        info!(database = db_name, "database connection established");
        Ok(store)
    }

    /// Verify connectivity. Used at startup and by the readiness probe.
    pub async fn ping(&self) -> StoreResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    /// Release the connection pool. Called once on graceful shutdown.
    pub async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("database connection closed");
    }

    /// Parse a path parameter into an object id.
    pub fn parse_id(id: &str) -> StoreResult<ObjectId> {
        ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
    }

    /// Insert a freshly validated job document. Returns the new id as hex.
    pub async fn insert_job(&self, job: &Job) -> StoreResult<String> {
        let document = bson::to_document(job)?;
        let result = self.jobs.insert_one(document).await?;
        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        debug!(job_id = %id, "job inserted");
        Ok(id)
    }

    /// Run a list query and return the matching documents as JSON values.
    pub async fn list_jobs(&self, query: &ListQuery) -> StoreResult<Vec<serde_json::Value>> {
        let mut find = self.jobs.find(query.filter.clone());
        if let Some(projection) = &query.projection {
            find = find.projection(projection.clone());
        }
        if let Some(sort) = &query.sort {
            find = find.sort(sort.clone());
        }
        if let Some(skip) = query.skip {
            find = find.skip(skip);
        }
        if let Some(limit) = query.limit {
            find = find.limit(limit);
        }

        let documents: Vec<Document> = find.await?.try_collect().await?;
        Ok(documents.into_iter().map(document_to_json).collect())
    }

    /// Fetch a single job by id.
    pub async fn find_job(&self, id: &ObjectId) -> StoreResult<Option<serde_json::Value>> {
        let document = self.jobs.find_one(doc! { "_id": id }).await?;
        Ok(document.map(document_to_json))
    }

    /// Wholesale `$set` of the given fields. `_id` is stripped: it is
    /// immutable and the server would reject the write.
    pub async fn update_job(
        &self,
        id: &ObjectId,
        mut changes: Document,
    ) -> StoreResult<UpdateReport> {
        changes.remove("_id");
        let result = self
            .jobs
            .update_one(doc! { "_id": id }, doc! { "$set": changes })
            .await?;
        Ok(UpdateReport {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    /// Delete a job by id.
    pub async fn delete_job(&self, id: &ObjectId) -> StoreResult<DeleteReport> {
        let result = self.jobs.delete_one(doc! { "_id": id }).await?;
        Ok(DeleteReport {
            deleted_count: result.deleted_count,
        })
    }

    /// Register a candidate on a job, atomically.
    ///
    /// The duplicate check lives inside the update predicate: the document
    /// only matches while no candidate carries this email, so concurrent
    /// first-time applies from the same identity cannot both append. The
    /// follow-up read merely classifies the miss.
    pub async fn apply_to_job(
        &self,
        id: &ObjectId,
        candidate: &Candidate,
    ) -> StoreResult<ApplyOutcome> {
        let result = self
            .jobs
            .update_one(apply_filter(id, &candidate.email), apply_update(candidate))
            .await?;

        if result.modified_count == 1 {
            debug!(job_id = %id, email = %candidate.email, "candidate registered");
            return Ok(ApplyOutcome::Applied);
        }

        match self.jobs.find_one(doc! { "_id": id }).await? {
            Some(_) => Ok(ApplyOutcome::AlreadyApplied),
            None => Ok(ApplyOutcome::NotFound),
        }
    }
}

/// Filter for the apply update: matches the job only while the email is
/// absent from its candidate list.
fn apply_filter(id: &ObjectId, email: &str) -> Document {
    doc! { "_id": id, "candidates.email": { "$ne": email } }
}

/// Update for the apply action: counter and candidate list move together.
fn apply_update(candidate: &Candidate) -> Document {
    doc! {
        "$inc": { "applicants": 1 },
        "$push": {
            "candidates": {
                "name": &candidate.name,
                "email": &candidate.email,
            }
        }
    }
}

/// Convert a stored document to a response-ready JSON value, rendering
/// `_id` as its hex string.
fn document_to_json(mut document: Document) -> serde_json::Value {
    if let Some(Bson::ObjectId(oid)) = document.get("_id") {
        let hex = oid.to_hex();
        document.insert("_id", hex);
    }
    Bson::Document(document).into_relaxed_extjson()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_filter_guards_on_candidate_email() {
        let id = ObjectId::new();
        let filter = apply_filter(&id, "a@x.com");

        assert_eq!(filter.get_object_id("_id").unwrap(), id);
        let guard = filter.get_document("candidates.email").unwrap();
        assert_eq!(guard.get_str("$ne").unwrap(), "a@x.com");
    }

    #[test]
    fn apply_update_moves_counter_and_list_together() {
        let candidate = Candidate {
            name: "Ada".to_string(),
            email: "a@x.com".to_string(),
        };
        let update = apply_update(&candidate);

        let inc = update.get_document("$inc").unwrap();
        assert_eq!(inc.get_i32("applicants").unwrap(), 1);

        let pushed = update
            .get_document("$push")
            .unwrap()
            .get_document("candidates")
            .unwrap();
        assert_eq!(pushed.get_str("name").unwrap(), "Ada");
        assert_eq!(pushed.get_str("email").unwrap(), "a@x.com");
    }

    #[test]
    fn document_json_renders_id_as_hex() {
        let id = ObjectId::parse_str("65f1a2b3c4d5e6f708192a3b").unwrap();
        let document = doc! { "_id": id, "title": "Backend Engineer", "applicants": 3_i64 };

        let json = document_to_json(document);
        assert_eq!(json["_id"], "65f1a2b3c4d5e6f708192a3b");
        assert_eq!(json["title"], "Backend Engineer");
        assert_eq!(json["applicants"], 3);
    }

    #[test]
    fn parse_id_rejects_malformed_input() {
        assert!(JobStore::parse_id("not-a-hex-id").is_err());
        assert!(JobStore::parse_id("65f1a2b3c4d5e6f708192a3b").is_ok());
    }
}
