mod common;

use common::*;
use std::sync::{mpsc, Arc};
use wallet_connector::prelude::*;

#[test]
fn fee_is_required_once_arguments_are_complete() {
    let (connector, _) = connector();

    assert!(matches!(
        connector.create_transaction(&args(&[]), None),
        Err(ConnectorError::InvalidTransactionArguments(_))
    ));
    assert!(matches!(
        connector.create_transaction(&transfer(), None),
        Err(ConnectorError::MissingFee)
    ));

    let tx = connector.create_transaction(&transfer(), Some(&fee())).unwrap();
    assert!(!tx.is_signed());
    assert_eq!(tx.identifier(), None);
    assert_eq!(tx.state(), &TransactionState::Unsigned);

    // a fee in the arguments wins over the default
    let mut priced = transfer();
    priced.insert("gasPrice".to_string(), "0x1".to_string());
    let cheap = connector.create_transaction(&priced, None).unwrap();
    assert_ne!(cheap.serialization().data(), tx.serialization().data());
}

#[test]
fn malformed_arguments() {
    let (connector, _) = connector();
    for (name, value) in [("nonce", "0xzz"), ("to", "0x1234"), ("data", "0xabc"), ("value", "-1")] {
        let mut arguments = transfer();
        arguments.insert(name.to_string(), value.to_string());
        assert!(
            matches!(
                connector.create_transaction(&arguments, Some(&fee())),
                Err(ConnectorError::InvalidTransactionArguments(_))
            ),
            "{name}={value}"
        );
    }
}

#[test]
fn serialization_round_trip() {
    let (connector, _) = connector();
    let key = connector.create_key(PHRASE).unwrap();
    let unsigned = connector.create_transaction(&transfer(), Some(&fee())).unwrap();

    let reparsed = connector
        .create_transaction_from_serialization(
            &connector.create_serialization(unsigned.serialization().data()),
        )
        .unwrap();
    assert_eq!(reparsed, unsigned);

    let signed = connector.sign_transaction(&unsigned, &key).unwrap();
    let reparsed = connector
        .create_transaction_from_serialization(
            &connector.create_serialization(signed.serialization().data()),
        )
        .unwrap();
    assert!(reparsed.is_signed());
    assert_eq!(reparsed.identifier(), signed.identifier());
    assert_eq!(reparsed.serialization().data(), signed.serialization().data());
}

#[test]
fn parsing_a_valid_serialization_succeeds() {
    let (connector, _) = connector();
    // EIP-155 signing payload of the example transaction in the EIP
    let payload = hex::decode(concat!(
        "ec098504a817c800825208943535353535353535353535353535353535353535",
        "880de0b6b3a764000080018080",
    ))
    .unwrap();
    let tx = connector
        .create_transaction_from_serialization(&connector.create_serialization(payload.clone()))
        .unwrap();
    assert!(!tx.is_signed());
    assert_eq!(tx.serialization().data(), &payload[..]);

    let garbage = connector.create_serialization(vec![0x01]);
    assert!(matches!(
        connector.create_transaction_from_serialization(&garbage),
        Err(ConnectorError::InvalidTransactionSerialization(_))
    ));
}

#[test]
fn signing_produces_a_new_signed_transaction() {
    let (connector, _) = connector();
    let key = connector.create_key(PHRASE).unwrap();
    let unsigned = connector.create_transaction(&transfer(), Some(&fee())).unwrap();

    let signed = connector.sign_transaction(&unsigned, &key).unwrap();
    assert!(signed.is_signed());
    assert_eq!(signed.identifier().map(<[u8]>::len), Some(32));
    assert!(!unsigned.is_signed());
    assert_eq!(unsigned.identifier(), None);

    let other = connector.create_key(PHRASE).unwrap();
    for key in [&key, &other] {
        assert!(matches!(
            connector.sign_transaction(&signed, key),
            Err(ConnectorError::PreviouslySignedTransaction)
        ));
    }
}

#[tokio::test]
async fn submit_broadcasts_signed_transaction() {
    let (connector, broadcaster) = connector();
    let key = connector.create_key(PHRASE).unwrap();
    let unsigned = connector.create_transaction(&transfer(), Some(&fee())).unwrap();
    let signed = connector.sign_transaction(&unsigned, &key).unwrap();

    let submitted = connector.submit(signed.clone()).await.unwrap();
    assert_eq!(submitted, signed);

    let calls = broadcaster.calls();
    assert_eq!(calls.len(), 1);
    let (uids, payload, identifier) = &calls[0];
    assert_eq!(uids, "ethereum-mainnet");
    assert_eq!(payload, signed.serialization().data());
    assert!(identifier.starts_with("WalletConnect: ethereum-mainnet:"));
}

#[tokio::test]
async fn submit_preconditions_never_reach_the_network() {
    let (a, broadcaster) = connector();
    let (b, _) = connector();
    let key = a.create_key(PHRASE).unwrap();
    let unsigned = a.create_transaction(&transfer(), Some(&fee())).unwrap();
    let signed = a.sign_transaction(&unsigned, &key).unwrap();

    assert!(matches!(a.submit(unsigned).await, Err(ConnectorError::UnsignedTransaction)));
    assert!(matches!(b.submit(signed).await, Err(ConnectorError::UnknownEntity)));
    assert!(broadcaster.calls().is_empty());
}

#[tokio::test]
async fn rejected_submission() {
    init_tracing();
    let broadcaster = Arc::new(RecordingBroadcaster::rejecting("nonce too low"));
    let connector = EthereumConnector::create(mainnet(), broadcaster.clone()).unwrap();
    let key = connector.create_key(PHRASE).unwrap();
    let unsigned = connector.create_transaction(&transfer(), Some(&fee())).unwrap();
    let signed = connector.sign_transaction(&unsigned, &key).unwrap();

    let err = connector.submit(signed).await.unwrap_err();
    assert!(matches!(
        err,
        ConnectorError::SubmitFailed(BroadcastError::Rejected(ref reason))
            if reason == "nonce too low"
    ));
    assert_eq!(broadcaster.calls().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn submit_with_completes_exactly_once() {
    let (connector, _) = connector();
    let key = connector.create_key(PHRASE).unwrap();
    let unsigned = connector.create_transaction(&transfer(), Some(&fee())).unwrap();
    let signed = connector.sign_transaction(&unsigned, &key).unwrap();

    let (tx, rx) = mpsc::channel();
    for transaction in [unsigned, signed] {
        let tx = tx.clone();
        connector.submit_with(transaction, move |result| tx.send(result.is_ok()).unwrap());
    }
    drop(tx);

    let outcomes =
        tokio::task::spawn_blocking(move || rx.iter().collect::<Vec<_>>()).await.unwrap();
    assert_eq!(outcomes, vec![false, true]);
}
