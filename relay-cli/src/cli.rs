use alloy_primitives::Address;
use clap::Parser;
use relay::SearchParams;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(long, env = "RELAY_URL", default_value = relay::DEFAULT_RELAY_URL)]
    pub relay_url: String,

    #[arg(long)]
    pub exchange_contract_address: Option<Address>,

    /// Match orders trading the token on either side.
    #[arg(long)]
    pub token_address: Option<Address>,

    #[arg(long)]
    pub maker_token_address: Option<Address>,

    #[arg(long)]
    pub taker_token_address: Option<Address>,

    #[arg(long)]
    pub maker: Option<Address>,

    #[arg(long)]
    pub taker: Option<Address>,

    /// Match orders where the address is maker or taker.
    #[arg(long)]
    pub trader: Option<Address>,

    #[arg(long)]
    pub fee_recipient: Option<Address>,

    /// Fetch the relay's fixed-record binary encoding instead of JSON.
    #[arg(long)]
    pub binary: bool,
}

impl Cli {
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            exchange_contract_address: self.exchange_contract_address,
            token_address: self.token_address,
            maker_token_address: self.maker_token_address,
            taker_token_address: self.taker_token_address,
            maker: self.maker,
            taker: self.taker,
            trader: self.trader,
            fee_recipient: self.fee_recipient,
        }
    }
}
