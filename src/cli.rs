//! Command line interface.

use crate::trade::TradeParams;
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// What to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Place an order from recorded positions.
    Trade,
    /// Record the screen position of every control.
    #[value(name = "record_positions")]
    RecordPositions,
    /// Write the default settings file.
    #[value(name = "init_config")]
    InitConfig,
}

/// Place orders in a desktop trading application by replaying recorded clicks.
#[derive(Debug, Parser)]
#[command(name = "clicktrader", version, about)]
pub struct Cli {
    /// Mode to run in.
    #[arg(value_enum)]
    pub mode: Mode,

    /// Trade stocks or options.
    #[arg(long = "trade_type", default_value = "stocks")]
    pub trade_type: String,

    /// Account: roth, traditional, hsa, brokeragelink or individual.
    #[arg(long)]
    pub account: Option<String>,

    /// Ticker symbol.
    #[arg(long)]
    pub ticker: Option<String>,

    /// buy or sell.
    #[arg(long)]
    pub action: Option<String>,

    /// Number of shares.
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// market or limit.
    #[arg(long = "order_type")]
    pub order_type: Option<String>,

    /// Limit price, required for limit orders.
    #[arg(long = "limit_price")]
    pub limit_price: Option<Decimal>,

    /// Use the extended hours (Day+) duration.
    #[arg(long = "extended_hours")]
    pub extended_hours: bool,

    /// Number of times to place the same order.
    #[arg(long, default_value_t = 1)]
    pub repeat: u32,

    /// Minimum pause between repeats, in seconds.
    #[arg(long = "min_pause", default_value_t = 1.0)]
    pub min_pause: f64,

    /// Maximum pause between repeats, in seconds.
    #[arg(long = "max_pause", default_value_t = 3.0)]
    pub max_pause: f64,

    /// Keep existing positions for skipped prompts when recording.
    #[arg(long)]
    pub update: bool,

    /// Settings file (TOML).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Coordinate store file, overriding the configured one.
    #[arg(long)]
    pub positions: Option<PathBuf>,
}

impl Cli {
    /// Trade parameters as given. Not yet validated.
    pub fn trade_params(&self) -> TradeParams {
        TradeParams {
            trade_type: self.trade_type.clone(),
            account: self.account.clone(),
            ticker: self.ticker.clone(),
            action: self.action.clone(),
            amount: self.amount,
            order_type: self.order_type.clone(),
            limit_price: self.limit_price,
            extended_hours: self.extended_hours,
            repeat: self.repeat,
            min_pause: self.min_pause,
            max_pause: self.max_pause,
        }
    }
}
