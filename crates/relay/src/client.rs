use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{address, Address, U256};
use reqwest::header::ACCEPT;
use tracing::debug;
use types::{binary, generate_watermarked_salt, json, num, Order, SignedOrder};

use crate::{FeeQuote, FeeRequest, RelayError, SearchParams};

/// Relay this client talks to unless told otherwise.
pub const DEFAULT_RELAY_URL: &str = "https://api.openrelay.xyz";

/// Fee recipient stamped on created orders when none is given.
pub const DEFAULT_FEE_RECIPIENT: Address = address!("c22d5b2951db72b44cfb8089bb8cd374a3c354ea");

/// Orders created without an explicit expiration last one day.
pub const DEFAULT_ORDER_DURATION_SECS: u64 = 24 * 60 * 60;

const API_VERSION: &str = "v0.0";
const OCTET_STREAM: &str = "application/octet-stream";

/// When a created order stops being fillable.
#[derive(Debug, Clone, Copy)]
pub enum Expiration {
    /// Absolute unix timestamp in seconds.
    At(u64),
    /// Seconds from now.
    After(u64),
}

impl Default for Expiration {
    fn default() -> Self {
        Self::After(DEFAULT_ORDER_DURATION_SECS)
    }
}

impl Expiration {
    fn resolve(self) -> U256 {
        let timestamp = match self {
            Self::At(at) => at,
            Self::After(duration) => now_secs() + duration,
        };
        U256::from(timestamp)
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Terms for an order to be created against the relay's fee quote.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub exchange_contract_address: Address,
    pub maker: Address,
    pub maker_token_address: Address,
    pub maker_token_amount: U256,
    pub taker_token_address: Address,
    pub taker_token_amount: U256,
    pub expiration: Expiration,
    /// Overrides [`DEFAULT_FEE_RECIPIENT`] in the fee request.
    pub fee_recipient: Option<Address>,
    /// Maker's share of the quoted total fee, in basis points. This relay
    /// lets the maker apportion fees; others may require the quote as is.
    pub maker_fee_bps: Option<u16>,
}

/// Async client for a relay's fee, submission and search endpoints.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_VERSION, path)
    }

    /// Asks the relay for its fee terms. POST `/v0.0/fees`.
    pub async fn fees(&self, request: &FeeRequest) -> Result<FeeQuote, RelayError> {
        let response = self
            .http
            .post(self.endpoint("fees"))
            .json(request)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    /// Builds an unsigned order from the relay's fee quote, stamping a
    /// watermarked salt and resolving the expiration.
    pub async fn create_order(&self, new: NewOrder) -> Result<Order, RelayError> {
        if let Some(bps) = new.maker_fee_bps {
            if bps > 10_000 {
                return Err(RelayError::BadRequest(format!(
                    "maker fee share {bps} exceeds 10000 bps"
                )));
            }
        }
        let salt = generate_watermarked_salt();
        let expiration = new.expiration.resolve();
        let request = FeeRequest {
            maker_token_address: new.maker_token_address,
            maker_token_amount: new.maker_token_amount,
            taker_token_address: new.taker_token_address,
            taker_token_amount: new.taker_token_amount,
            expiration_unix_timestamp_sec: expiration,
            salt,
            fee_recipient: new.fee_recipient.unwrap_or(DEFAULT_FEE_RECIPIENT),
        };
        let quote = self.fees(&request).await?;
        let (maker_fee, taker_fee) = match new.maker_fee_bps {
            Some(bps) => {
                let total = quote
                    .maker_fee
                    .checked_add(quote.taker_fee)
                    .ok_or_else(|| RelayError::Api("quoted fees overflow".into()))?;
                let maker_fee = num::mul_div(total, U256::from(bps), U256::from(10_000u64));
                (maker_fee, total - maker_fee)
            }
            None => (quote.maker_fee, quote.taker_fee),
        };
        Ok(Order {
            exchange_contract_address: new.exchange_contract_address,
            maker: new.maker,
            taker: quote.taker_to_specify.unwrap_or(Address::ZERO),
            maker_token_address: new.maker_token_address,
            taker_token_address: new.taker_token_address,
            fee_recipient: quote.fee_recipient,
            maker_token_amount: new.maker_token_amount,
            taker_token_amount: new.taker_token_amount,
            maker_fee,
            taker_fee,
            expiration_unix_timestamp_sec: expiration,
            salt,
        })
    }

    /// Submits a signed order for listing. POST `/v0.0/order`.
    pub async fn submit_order(&self, order: &SignedOrder) -> Result<(), RelayError> {
        debug!(maker = %order.order.maker, "submitting order");
        let response = self
            .http
            .post(self.endpoint("order"))
            .json(order)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Searches the relay's order book. GET `/v0.0/orders` as JSON.
    /// Availability is re-derived for each result; signatures are not
    /// verified here.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<SignedOrder>, RelayError> {
        let response = self
            .http
            .get(self.endpoint("orders"))
            .query(params)
            .send()
            .await?;
        let orders: Vec<SignedOrder> = check(response).await?.json().await?;
        debug!(count = orders.len(), "search returned");
        orders
            .into_iter()
            .map(|order| json::process(order, false).map_err(RelayError::from))
            .collect()
    }

    /// [`search`](Self::search), but over the relay's fixed-record
    /// octet-stream encoding.
    pub async fn search_binary(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<SignedOrder>, RelayError> {
        let response = self
            .http
            .get(self.endpoint("orders"))
            .query(params)
            .header(ACCEPT, OCTET_STREAM)
            .send()
            .await?;
        let body = check(response).await?.bytes().await?;
        Ok(binary::parse_list(&body)?)
    }
}

async fn check(response: reqwest::Response) -> Result<reqwest::Response, RelayError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(RelayError::Api(format!("{status}: {body}")))
    }
}
