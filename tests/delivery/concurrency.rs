use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use actor_message_queue::{DeliveryConfig, MessageCategory, PeekOutcome};

use crate::support::{aggregation, decode, energy_supplier, Harness};

const MESSAGES: usize = 40;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_enqueues_land_in_one_bundle() {
    let h = Arc::new(Harness::new());
    let actor = energy_supplier();

    let mut tasks = Vec::new();
    for i in 0..MESSAGES {
        let h = h.clone();
        let actor = actor.clone();
        tasks.push(tokio::spawn(async move {
            h.enqueuer
                .enqueue(aggregation(&actor, &format!("m{}", i)))
                .await
                .unwrap()
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let document = h
        .peek(&actor, MessageCategory::Aggregations)
        .await
        .into_document()
        .unwrap();
    let records: HashSet<String> = decode(&document.payload).records.into_iter().collect();
    let expected: HashSet<String> = (0..MESSAGES).map(|i| format!("m{}", i)).collect();
    assert_eq!(records, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_peeks_share_one_bundle_and_archive_entry() {
    let h = Arc::new(Harness::new());
    let actor = energy_supplier();
    for i in 0..5 {
        h.enqueue(aggregation(&actor, &format!("m{}", i))).await;
    }

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let h = h.clone();
        let actor = actor.clone();
        tasks.push(tokio::spawn(async move {
            h.peek(&actor, MessageCategory::Aggregations).await
        }));
    }

    let mut outcomes = Vec::new();
    for task in tasks {
        outcomes.push(task.await.unwrap());
    }

    let first = outcomes[0].clone();
    assert!(matches!(first, PeekOutcome::Delivered(_)));
    assert!(outcomes.iter().all(|o| *o == first));
    assert_eq!(h.archive.len(), 1);
    assert_eq!(h.archive.inserts(), 1);
    assert_eq!(decode(&first.into_document().unwrap().payload).records.len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_message_is_delivered_exactly_once_while_enqueues_race_peeks() {
    let h = Arc::new(Harness::with_config(
        DeliveryConfig::default().with_max_commit_attempts(1_000),
    ));
    let actor = energy_supplier();

    let mut producers = Vec::new();
    for i in 0..MESSAGES {
        let h = h.clone();
        let actor = actor.clone();
        producers.push(tokio::spawn(async move {
            h.enqueuer
                .enqueue(aggregation(&actor, &format!("m{}", i)))
                .await
                .unwrap()
        }));
    }

    let consumer = {
        let h = h.clone();
        let actor = actor.clone();
        tokio::spawn(async move {
            let mut delivered = Vec::new();
            while delivered.len() < MESSAGES {
                match h.peek(&actor, MessageCategory::Aggregations).await {
                    PeekOutcome::Delivered(document) => {
                        delivered.extend(decode(&document.payload).records);
                        let outcome = h
                            .dequeuer
                            .dequeue(&document.bundle_id.to_string(), &actor)
                            .await
                            .unwrap();
                        assert!(outcome.is_success());
                    }
                    PeekOutcome::Empty => tokio::task::yield_now().await,
                }
            }
            delivered
        })
    };

    for producer in producers {
        producer.await.unwrap();
    }
    let delivered = tokio::time::timeout(Duration::from_secs(30), consumer)
        .await
        .expect("consumer did not drain the queue")
        .unwrap();

    assert_eq!(delivered.len(), MESSAGES);
    let unique: HashSet<_> = delivered.iter().cloned().collect();
    assert_eq!(unique.len(), MESSAGES);
    assert!(h
        .peek(&actor, MessageCategory::Aggregations)
        .await
        .is_empty());
}
