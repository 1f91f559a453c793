use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt::Debug;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Records and Queries)
// =============================================================================

/// Trait that any record must implement to live in a [`ResourceActor`] collection.
pub trait Entity: Clone + Send + Sync + Debug + 'static {
    /// Name of the remote collection, used in logs.
    const COLLECTION: &'static str;

    /// Get the ID of the record
    fn id(&self) -> &str;

    /// Read a named field for query evaluation.
    ///
    /// Returns `None` when the record has no field with that name; optional
    /// fields that are merely unset return `Some(FieldValue::Null)`.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// A single comparable field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Time(DateTime<Utc>),
}

impl FieldValue {
    /// Orders two values of the same kind. Values of different kinds compare equal
    /// so a sort over mixed data keeps its input order.
    fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Str(a), FieldValue::Str(b)) => a.cmp(b),
            (FieldValue::Time(a), FieldValue::Time(b)) => a.cmp(b),
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Time(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Eq(String, FieldValue),
    In(String, Vec<FieldValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// `where` / `orderBy` / `limit` for a list call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub conditions: Vec<Condition>,
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.conditions
            .push(Condition::Eq(field.to_string(), value.into()));
        self
    }

    pub fn filter_in<V: Into<FieldValue>>(
        mut self,
        field: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.conditions.push(Condition::In(field.to_string(), values));
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches<T: Entity>(&self, item: &T) -> Result<bool, StoreError> {
        for condition in &self.conditions {
            let hit = match condition {
                Condition::Eq(field, expected) => read_field(item, field)? == *expected,
                Condition::In(field, candidates) => {
                    let value = read_field(item, field)?;
                    candidates.iter().any(|c| *c == value)
                }
            };
            if !hit {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Evaluates the query over `records`. Ties in the sort keep the order of `records`.
    fn apply<T: Entity>(&self, records: &[T]) -> Result<Vec<T>, StoreError> {
        let mut hits = Vec::new();
        for item in records {
            if self.matches(item)? {
                hits.push(item);
            }
        }

        let mut out: Vec<T> = match &self.order_by {
            Some(order) => {
                let mut keyed = Vec::with_capacity(hits.len());
                for item in hits {
                    keyed.push((read_field(item, &order.field)?, item));
                }
                keyed.sort_by(|(a, _), (b, _)| match order.direction {
                    Direction::Asc => a.compare(b),
                    Direction::Desc => b.compare(a),
                });
                keyed.into_iter().map(|(_, item)| item.clone()).collect()
            }
            None => hits.into_iter().cloned().collect(),
        };

        if let Some(limit) = self.limit {
            out.truncate(limit);
        }
        Ok(out)
    }
}

fn read_field<T: Entity>(item: &T, field: &str) -> Result<FieldValue, StoreError> {
    item.field(field)
        .ok_or_else(|| StoreError::UnknownField(T::COLLECTION, field.to_string()))
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Record already exists: {0}")]
    Duplicate(String),
    #[error("Unknown field {1} on {0}")]
    UnknownField(&'static str, String),
    #[error("Actor closed")]
    Closed,
    #[error("Actor dropped")]
    Dropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        query: ListQuery,
        respond_to: Response<Vec<T>>,
    },
    Create {
        record: T,
        respond_to: Response<T>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// In-memory collection standing in for one remote table.
///
/// Records are kept in insertion order, which is the natural order a list call
/// returns when no `order_by` is given.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    records: Vec<T>,
    ids: HashSet<String>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize, initial: Vec<T>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut ids = HashSet::with_capacity(initial.len());
        let mut records = Vec::with_capacity(initial.len());
        for record in initial {
            if ids.insert(record.id().to_string()) {
                records.push(record);
            } else {
                warn!(collection = T::COLLECTION, id = record.id(), "Skipping duplicate seed record");
            }
        }
        let actor = Self {
            receiver,
            records,
            ids,
        };
        (actor, ResourceClient::new(sender))
    }

    #[instrument(name = "resource_actor", skip(self), fields(collection = T::COLLECTION))]
    pub async fn run(mut self) {
        info!(records = self.records.len(), "Collection starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { query, respond_to } => {
                    let result = query.apply(&self.records);
                    if let Ok(rows) = &result {
                        debug!(rows = rows.len(), "List served");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Create { record, respond_to } => {
                    let id = record.id().to_string();
                    if !self.ids.insert(id.clone()) {
                        let _ = respond_to.send(Err(StoreError::Duplicate(id)));
                        continue;
                    }
                    debug!(id = %id, "Record created");
                    self.records.push(record.clone());
                    let _ = respond_to.send(Ok(record));
                }
            }
        }

        info!("Collection stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Debug)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn list(&self, query: ListQuery) -> Result<Vec<T>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::List { query, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn create(&self, record: T) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Create { record, respond_to })
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Track {
        id: String,
        artist: String,
        plays: i64,
        note: Option<String>,
    }

    impl Entity for Track {
        const COLLECTION: &'static str = "tracks";

        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "id" => Some(self.id.as_str().into()),
                "artist" => Some(self.artist.as_str().into()),
                "plays" => Some(self.plays.into()),
                "note" => Some(self.note.clone().into()),
                _ => None,
            }
        }
    }

    fn track(id: &str, artist: &str, plays: i64) -> Track {
        Track {
            id: id.into(),
            artist: artist.into(),
            plays,
            note: None,
        }
    }

    fn start(initial: Vec<Track>) -> ResourceClient<Track> {
        let (actor, client) = ResourceActor::new(10, initial);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_list_filters_orders_and_limits() {
        let client = start(vec![
            track("t1", "ada", 5),
            track("t2", "bo", 9),
            track("t3", "ada", 9),
            track("t4", "ada", 1),
        ]);

        let rows = client
            .list(
                ListQuery::new()
                    .filter_eq("artist", "ada")
                    .order_by("plays", Direction::Desc)
                    .limit(2),
            )
            .await
            .unwrap();

        let ids: Vec<_> = rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "t1"]);
    }

    #[tokio::test]
    async fn test_sort_ties_keep_insertion_order() {
        let client = start(vec![
            track("t1", "ada", 3),
            track("t2", "bo", 7),
            track("t3", "cy", 3),
            track("t4", "di", 7),
        ]);

        let rows = client
            .list(ListQuery::new().order_by("plays", Direction::Desc))
            .await
            .unwrap();

        let ids: Vec<_> = rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2", "t4", "t1", "t3"]);
    }

    #[tokio::test]
    async fn test_filter_in_and_null_fields() {
        let mut noted = track("t2", "bo", 2);
        noted.note = Some("live".into());
        let client = start(vec![track("t1", "ada", 1), noted, track("t3", "cy", 3)]);

        let rows = client
            .list(ListQuery::new().filter_in("id", ["t1", "t3", "missing"]))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);

        let rows = client
            .list(ListQuery::new().filter_eq("note", FieldValue::Null))
            .await
            .unwrap();
        let ids: Vec<_> = rows.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }

    #[tokio::test]
    async fn test_unknown_field_fails_the_request() {
        let client = start(vec![track("t1", "ada", 1)]);

        let err = client
            .list(ListQuery::new().filter_eq("genre", "jazz"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::UnknownField("tracks", "genre".into()));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_ids() {
        let client = start(vec![track("t1", "ada", 1)]);

        let created = client.create(track("t2", "bo", 0)).await.unwrap();
        assert_eq!(created.id, "t2");

        let err = client.create(track("t1", "cy", 0)).await.unwrap_err();
        assert_eq!(err, StoreError::Duplicate("t1".into()));

        let rows = client.list(ListQuery::new()).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let (actor, client) = ResourceActor::<Track>::new(1, Vec::new());
        drop(actor);

        let err = client.list(ListQuery::new()).await.unwrap_err();
        assert_eq!(err, StoreError::Closed);
    }
}
