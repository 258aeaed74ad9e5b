//! Legacy (EIP-155) Ethereum transactions built from JSON-RPC style arguments.
use ethers_core::types::{Address, Signature, TransactionRequest, U256};
use rlp::{DecoderError, Rlp};
use std::collections::HashMap;
use wallet_connector_core::{EngineError, NetworkFee};

/// Number of fields of a signed (or EIP-155 unsigned) legacy transaction
const NUM_TX_FIELDS: usize = 9;

/// Builds a transaction from `eth_sendTransaction` arguments.
///
/// `nonce` and `gas` (or `gasLimit`) are required. `gasPrice` falls back on
/// `default_fee`. `to`, `value` and `data` (or `input`) are optional, `from` is ignored.
/// If a `chainId` is given it must match `chain_id`.
pub(crate) fn request_from_arguments(
    arguments: &HashMap<String, String>,
    default_fee: Option<&NetworkFee>,
    chain_id: u64,
) -> Result<TransactionRequest, EngineError> {
    let arg = |names: &[&str]| lookup(arguments, names);

    let nonce = arg(&["nonce"]).ok_or_else(|| missing("nonce"))?;
    let gas = arg(&["gas", "gasLimit"]).ok_or_else(|| missing("gas"))?;

    if let Some(requested) = arg(&["chainId"]) {
        if parse_quantity("chainId", requested)? != U256::from(chain_id) {
            return Err(EngineError::InvalidTransactionArguments(format!(
                "chainId {requested} does not match network chain id {chain_id}"
            )))
        }
    }

    let gas_price = match (arg(&["gasPrice"]), default_fee) {
        (Some(price), _) => parse_quantity("gasPrice", price)?,
        (None, Some(fee)) => U256::from(fee.price_per_cost_factor),
        (None, None) => return Err(EngineError::MissingFee),
    };

    let mut request = TransactionRequest::new()
        .nonce(parse_quantity("nonce", nonce)?)
        .gas_price(gas_price)
        .gas(parse_quantity("gas", gas)?)
        .chain_id(chain_id);
    if let Some(to) = arg(&["to"]) {
        request = request.to(parse_address("to", to)?);
    }
    if let Some(value) = arg(&["value"]) {
        request = request.value(parse_quantity("value", value)?);
    }
    if let Some(data) = arg(&["data", "input"]) {
        let data = parse_data("data", data)?;
        if !data.is_empty() {
            request = request.data(data);
        }
    }
    Ok(request)
}

/// A decoded transaction serialization
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DecodedTransaction {
    /// The transaction, with `chain_id` set if it commits to one and `from` set if signed
    pub(crate) request: TransactionRequest,
    /// Present iff the transaction is signed
    pub(crate) signature: Option<Signature>,
}

impl DecodedTransaction {
    /// Decodes a legacy transaction, signed or unsigned.
    ///
    /// The input must be exactly one RLP list of 6 or 9 items. A 9 item list with
    /// `r == s == 0` is an EIP-155 signing payload; otherwise `v` must be 27, 28 or in
    /// EIP-155 form and the signature must recover.
    pub(crate) fn decode(data: &[u8]) -> Result<Self, EngineError> {
        let rlp = Rlp::new(data);
        if !rlp.is_list() {
            return Err(invalid(DecoderError::RlpExpectedToBeList))
        }
        if rlp.as_raw().len() != data.len() {
            return Err(invalid(DecoderError::RlpInconsistentLengthAndData))
        }

        match rlp.item_count().map_err(invalid)? {
            n if n == NUM_TX_FIELDS - 3 => Self::decode_unsigned(&rlp),
            NUM_TX_FIELDS => {
                let v: u64 = rlp.val_at(6).map_err(invalid)?;
                let r: U256 = rlp.val_at(7).map_err(invalid)?;
                let s: U256 = rlp.val_at(8).map_err(invalid)?;
                if r.is_zero() && s.is_zero() {
                    // EIP-155 signing payload, `v` holds the chain id
                    return Self::decode_unsigned(&rlp)
                }
                if !(v == 27 || v == 28 || v >= 35) {
                    return Err(EngineError::InvalidSerialization(format!(
                        "signature v {v} is neither 27, 28 nor EIP-155"
                    )))
                }
                let (request, signature) =
                    TransactionRequest::decode_signed_rlp(&rlp).map_err(invalid)?;
                Ok(Self { request, signature: Some(signature) })
            }
            n => Err(EngineError::InvalidSerialization(format!(
                "expected a list of 6 or 9 items, found {n}"
            ))),
        }
    }

    fn decode_unsigned(rlp: &Rlp<'_>) -> Result<Self, EngineError> {
        let request = TransactionRequest::decode_unsigned_rlp(rlp).map_err(invalid)?;
        Ok(Self { request, signature: None })
    }

    /// Chain id the transaction commits to, if any
    pub(crate) fn chain_id(&self) -> Option<u64> {
        self.request.chain_id.map(|chain_id| chain_id.as_u64())
    }
}

fn invalid(err: impl std::fmt::Display) -> EngineError {
    EngineError::InvalidSerialization(err.to_string())
}

/// The value of the first of `names` present in `arguments`
fn lookup<'a>(arguments: &'a HashMap<String, String>, names: &[&str]) -> Option<&'a String> {
    names.iter().find_map(|name| arguments.get(*name))
}

fn missing(name: &str) -> EngineError {
    EngineError::InvalidTransactionArguments(format!("missing required argument `{name}`"))
}

fn malformed(name: &str, value: &str) -> EngineError {
    EngineError::InvalidTransactionArguments(format!("malformed `{name}`: {value:?}"))
}

fn strip_hex_prefix(value: &str) -> Option<&str> {
    value.strip_prefix("0x").or_else(|| value.strip_prefix("0X"))
}

/// Parses a `0x` prefixed hex or a decimal quantity
fn parse_quantity(name: &str, value: &str) -> Result<U256, EngineError> {
    let value = value.trim();
    match strip_hex_prefix(value) {
        Some("") => Err(malformed(name, value)),
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|_| malformed(name, value)),
        None => U256::from_dec_str(value).map_err(|_| malformed(name, value)),
    }
}

fn parse_address(name: &str, value: &str) -> Result<Address, EngineError> {
    let value = value.trim();
    value.parse::<Address>().map_err(|_| malformed(name, value))
}

fn parse_data(name: &str, value: &str) -> Result<Vec<u8>, EngineError> {
    let value = value.trim();
    hex::decode(strip_hex_prefix(value).unwrap_or(value)).map_err(|_| malformed(name, value))
}
