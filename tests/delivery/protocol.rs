use actor_message_queue::protocol::{contract, legacy};
use actor_message_queue::{
    ActorNumber, DeliveryError, DocumentFormat, MarketRole, MessageCategory, ParseError,
};

use crate::support::{aggregation, decode, energy_supplier, wholesale, Harness};

fn peek_request(category: MessageCategory) -> contract::PeekRequest {
    contract::PeekRequest {
        actor_number: ActorNumber::parse("5790001330583").unwrap(),
        actor_role: MarketRole::EnergySupplier,
        category,
        format: DocumentFormat::Xml,
    }
}

fn legacy_peek() -> legacy::PeekRequestDto {
    legacy::PeekRequestDto {
        actor_number: "5790001330583".into(),
        actor_role: "DDQ".into(),
        document_format: "xml".into(),
    }
}

fn legacy_dequeue(message_id: &str) -> legacy::DequeueRequestDto {
    legacy::DequeueRequestDto {
        message_id: message_id.into(),
        actor_number: "5790001330583".into(),
        actor_role: "EnergySupplier".into(),
    }
}

#[tokio::test]
async fn contract_peek_and_dequeue() {
    let h = Harness::new();
    h.enqueue(aggregation(&energy_supplier(), "a")).await;

    assert!(contract::peek(&h.peeker, peek_request(MessageCategory::MasterData))
        .await
        .unwrap()
        .is_none());

    let response = contract::peek(&h.peeker, peek_request(MessageCategory::Aggregations))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(decode(&response.payload).format, "Xml");

    let request = contract::DequeueRequest {
        message_id: response.bundle_id.to_string(),
        actor_number: ActorNumber::parse("5790001330583").unwrap(),
        actor_role: MarketRole::EnergySupplier,
    };
    assert!(contract::dequeue(&h.dequeuer, request.clone()).await.unwrap().success);
    assert!(!contract::dequeue(&h.dequeuer, request).await.unwrap().success);
}

#[tokio::test]
async fn legacy_peek_spans_categories_in_arrival_order() {
    let h = Harness::new();
    let actor = energy_supplier();
    h.enqueue(wholesale(&actor, "w")).await;
    h.enqueue(aggregation(&actor, "a")).await;

    let first = legacy::peek(&h.peeker, legacy_peek()).await.unwrap();
    let first_id = first.message_id.clone().unwrap();
    assert_eq!(decode(&first.bundle.unwrap()).records, vec!["w"]);
    assert!(legacy::dequeue(&h.dequeuer, legacy_dequeue(&first_id))
        .await
        .unwrap());

    let second = legacy::peek(&h.peeker, legacy_peek()).await.unwrap();
    let second_id = second.message_id.clone().unwrap();
    assert_eq!(decode(&second.bundle.unwrap()).records, vec!["a"]);
    assert!(legacy::dequeue(&h.dequeuer, legacy_dequeue(&second_id))
        .await
        .unwrap());

    assert_eq!(
        legacy::peek(&h.peeker, legacy_peek()).await.unwrap(),
        legacy::PeekResultDto::empty()
    );
}

#[tokio::test]
async fn legacy_rejects_malformed_fields() {
    let h = Harness::new();

    let mut request = legacy_peek();
    request.actor_number = "12".into();
    let err = legacy::peek(&h.peeker, request).await.unwrap_err();
    assert_eq!(err, DeliveryError::Parse(ParseError::ActorNumber("12".into())));

    let mut request = legacy_peek();
    request.document_format = "csv".into();
    let err = legacy::peek(&h.peeker, request).await.unwrap_err();
    assert_eq!(err, DeliveryError::Parse(ParseError::DocumentFormat("csv".into())));
}

#[tokio::test]
async fn legacy_dequeue_of_malformed_id_fails_softly() {
    let h = Harness::new();
    assert!(!legacy::dequeue(&h.dequeuer, legacy_dequeue("bundle-1"))
        .await
        .unwrap());
}
