//! # Mock Framework
//!
//! Utilities for testing clients and pages in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use [`expect_list`] or [`expect_create`] to assert what was asked of the
//! store and to answer it, success or failure, by hand.

use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ListQuery, Response, ResourceClient, ResourceRequest};

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(ListQuery, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Celebrity};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Celebrity>(10);

        let list_task = tokio::spawn(async move {
            client.list(ListQuery::new().filter_eq("id", "c1")).await
        });

        let (query, responder) = expect_list(&mut receiver).await.expect("Expected List request");
        assert_eq!(query, ListQuery::new().filter_eq("id", "c1"));
        let row = Celebrity::new("c1", "Lena Lark", Category::Music, 100);
        responder.send(Ok(vec![row.clone()])).unwrap();

        let result = list_task.await.unwrap();
        assert_eq!(result, Ok(vec![row]));
    }
}
