#![allow(dead_code)]

use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing_subscriber::EnvFilter;
use wallet_connector::prelude::*;

pub const PHRASE: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

/// Address of the first account derived from [`PHRASE`]
pub const ADDRESS: &str = "0x9858effd232b4033e47d90003d41ec34ecaeda94";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records every broadcast and answers with a fixed transaction id
#[derive(Debug, Default)]
pub struct RecordingBroadcaster {
    pub calls: Mutex<Vec<(String, Vec<u8>, String)>>,
    pub rejection: Option<String>,
}

impl RecordingBroadcaster {
    pub fn rejecting(reason: &str) -> Self {
        Self { rejection: Some(reason.to_string()), ..Default::default() }
    }

    pub fn calls(&self) -> Vec<(String, Vec<u8>, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broadcaster for RecordingBroadcaster {
    async fn submit_transaction(
        &self,
        network_uids: &str,
        payload: &[u8],
        identifier: &str,
    ) -> Result<String, BroadcastError> {
        self.calls.lock().unwrap().push((
            network_uids.to_string(),
            payload.to_vec(),
            identifier.to_string(),
        ));
        match &self.rejection {
            Some(reason) => Err(BroadcastError::Rejected(reason.clone())),
            None => Ok("0x01".to_string()),
        }
    }
}

pub fn mainnet() -> Network {
    Network::from_json(r#"{"uids":"ethereum-mainnet","type":"eth","chainId":1}"#).unwrap()
}

pub fn connector() -> (EthereumConnector, Arc<RecordingBroadcaster>) {
    init_tracing();
    let broadcaster = Arc::new(RecordingBroadcaster::default());
    (EthereumConnector::create(mainnet(), broadcaster.clone()).unwrap(), broadcaster)
}

pub fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

/// A plain ether transfer, without a fee
pub fn transfer() -> HashMap<String, String> {
    args(&[
        ("from", ADDRESS),
        ("to", "0x3535353535353535353535353535353535353535"),
        ("nonce", "0x0"),
        ("gas", "0x5208"),
        ("value", "0xde0b6b3a7640000"),
    ])
}

pub fn fee() -> NetworkFee {
    NetworkFee::new(20_000_000_000, 15_000)
}
