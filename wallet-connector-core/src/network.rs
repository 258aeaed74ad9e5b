//! Network descriptions handed to a connector at creation time.
use serde::{Deserialize, Serialize};
use std::fmt;

/// The blockchain family a [`Network`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Btc,
    Bch,
    Bsv,
    Ltc,
    Doge,
    Eth,
    Xrp,
    Hbar,
    Xtz,
    Xlm,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NetworkType::Btc => "btc",
            NetworkType::Bch => "bch",
            NetworkType::Bsv => "bsv",
            NetworkType::Ltc => "ltc",
            NetworkType::Doge => "doge",
            NetworkType::Eth => "eth",
            NetworkType::Xrp => "xrp",
            NetworkType::Hbar => "hbar",
            NetworkType::Xtz => "xtz",
            NetworkType::Xlm => "xlm",
        };
        f.write_str(name)
    }
}

/// A network a connector session is bound to.
///
/// Networks are usually described by the embedding wallet in JSON:
///
/// ```
/// use wallet_connector_core::{Network, NetworkType};
///
/// let network = Network::from_json(
///     r#"{ "uids": "ethereum-mainnet", "type": "eth", "chainId": 1 }"#,
/// ).unwrap();
/// assert_eq!(network.network_type, NetworkType::Eth);
/// assert_eq!(network.chain_id, Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Unique identifier of the network, e.g. `ethereum-mainnet`. Used when relaying
    /// transactions to the broadcaster.
    pub uids: String,
    /// The blockchain family.
    #[serde(rename = "type")]
    pub network_type: NetworkType,
    /// Chain id for networks that have one (EIP-155 for Ethereum).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
}

impl Network {
    pub fn new(uids: impl Into<String>, network_type: NetworkType) -> Self {
        Self { uids: uids.into(), network_type, chain_id: None }
    }

    /// Sets the network's chain id
    #[must_use]
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// Parses a network description from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uids)
    }
}

/// A caller-supplied fee to fall back on when transaction arguments do not carry one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFee {
    /// Price paid per unit of cost, in the network's base unit (gas price in wei for
    /// Ethereum).
    pub price_per_cost_factor: u128,
    /// Expected confirmation time, in milliseconds.
    #[serde(default)]
    pub confirmation_time_in_milliseconds: u64,
}

impl NetworkFee {
    pub fn new(price_per_cost_factor: u128, confirmation_time_in_milliseconds: u64) -> Self {
        Self { price_per_cost_factor, confirmation_time_in_milliseconds }
    }
}
