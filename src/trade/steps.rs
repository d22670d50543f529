//! The trade state table.
//!
//! A trade is a fixed walk through [`TradeStep`]s. Each step is planned into
//! a list of [`Primitive`]s before any of them run, so enumerated values and
//! anchors are checked before the step touches the screen.

use super::params::{
    Account, OrderType, TradeAction, TradeParams, TradeType, format_price, format_quantity,
};
use crate::config::RedundancyConfig;
use crate::error::Result;
use crate::positions::{Anchor, CoordinateMap};
use std::fmt;
use std::str::FromStr;

/// One state of the trade sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeStep {
    SelectTradeType,
    SelectAccount,
    EnterTicker,
    SelectAction,
    EnterAmount,
    ConfigureOrderType,
    Submit,
}

impl TradeStep {
    /// Entry state of every trade.
    pub const FIRST: TradeStep = TradeStep::SelectTradeType;

    /// Every state, in execution order.
    pub const ALL: [TradeStep; 7] = [
        TradeStep::SelectTradeType,
        TradeStep::SelectAccount,
        TradeStep::EnterTicker,
        TradeStep::SelectAction,
        TradeStep::EnterAmount,
        TradeStep::ConfigureOrderType,
        TradeStep::Submit,
    ];

    /// The following state, or `None` after submission.
    pub fn next(self) -> Option<TradeStep> {
        match self {
            Self::SelectTradeType => Some(Self::SelectAccount),
            Self::SelectAccount => Some(Self::EnterTicker),
            Self::EnterTicker => Some(Self::SelectAction),
            Self::SelectAction => Some(Self::EnterAmount),
            Self::EnterAmount => Some(Self::ConfigureOrderType),
            Self::ConfigureOrderType => Some(Self::Submit),
            Self::Submit => None,
        }
    }

    /// Gerund phrase used in error messages ("error selecting account: …").
    pub fn activity(&self) -> &'static str {
        match self {
            Self::SelectTradeType => "clicking trade type button",
            Self::SelectAccount => "selecting account",
            Self::EnterTicker => "entering ticker",
            Self::SelectAction => "selecting trade action",
            Self::EnterAmount => "entering amount",
            Self::ConfigureOrderType => "setting order type",
            Self::Submit => "submitting order",
        }
    }
}

impl fmt::Display for TradeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SelectTradeType => "SelectTradeType",
            Self::SelectAccount => "SelectAccount",
            Self::EnterTicker => "EnterTicker",
            Self::SelectAction => "SelectAction",
            Self::EnterAmount => "EnterAmount",
            Self::ConfigureOrderType => "ConfigureOrderType",
            Self::Submit => "Submit",
        };
        f.write_str(name)
    }
}

/// Named settle waits. Resolved against the timing profile at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Step,
    TickerResolve,
    LimitReveal,
    PriceField,
}

/// One injected action or wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Primitive {
    /// Move to `at` and click `times` times there.
    Click {
        label: &'static str,
        at: Anchor,
        times: u32,
    },
    /// Type `text` one character at a time, optionally followed by Enter.
    Type { text: String, confirm: bool },
    /// Wait for the UI to catch up.
    Settle(Pace),
}

fn click(positions: &CoordinateMap, label: &'static str, times: u32) -> Result<Primitive> {
    Ok(Primitive::Click {
        label,
        at: positions.anchor(label)?,
        times,
    })
}

fn type_text(text: impl Into<String>) -> Primitive {
    Primitive::Type {
        text: text.into(),
        confirm: true,
    }
}

/// Plans the primitives of each step for one set of trade parameters.
#[derive(Debug, Clone, Copy)]
pub struct StepPlanner<'a> {
    positions: &'a CoordinateMap,
    redundancy: &'a RedundancyConfig,
}

impl<'a> StepPlanner<'a> {
    pub fn new(positions: &'a CoordinateMap, redundancy: &'a RedundancyConfig) -> Self {
        Self {
            positions,
            redundancy,
        }
    }

    /// The primitives for `step`. Fails without side effects.
    pub fn plan(&self, step: TradeStep, params: &TradeParams) -> Result<Vec<Primitive>> {
        match step {
            TradeStep::SelectTradeType => self.select_trade_type(params),
            TradeStep::SelectAccount => self.select_account(params),
            TradeStep::EnterTicker => self.enter_ticker(params),
            TradeStep::SelectAction => self.select_action(params),
            TradeStep::EnterAmount => self.enter_amount(params),
            TradeStep::ConfigureOrderType => self.configure_order_type(params),
            TradeStep::Submit => self.submit(),
        }
    }

    fn select_trade_type(&self, params: &TradeParams) -> Result<Vec<Primitive>> {
        let trade_type = TradeType::from_str(&params.trade_type)?;
        // The toggle drops clicks while the window is regaining focus.
        Ok(vec![click(
            self.positions,
            trade_type.anchor_label(),
            self.redundancy.trade_type_clicks,
        )?])
    }

    fn select_account(&self, params: &TradeParams) -> Result<Vec<Primitive>> {
        let account = Account::from_str(params.account_str())?;
        let entry = click(self.positions, account.anchor_label(), 1)?;
        Ok(vec![
            click(self.positions, "account_dropdown", 1)?,
            Primitive::Settle(Pace::Step),
            entry,
            Primitive::Settle(Pace::Step),
        ])
    }

    fn enter_ticker(&self, params: &TradeParams) -> Result<Vec<Primitive>> {
        Ok(vec![
            click(self.positions, "ticker_box", 1)?,
            type_text(params.ticker_str()),
            Primitive::Settle(Pace::TickerResolve),
        ])
    }

    fn select_action(&self, params: &TradeParams) -> Result<Vec<Primitive>> {
        let action = TradeAction::from_str(params.action_str())?;
        Ok(vec![
            click(self.positions, action.anchor_label(), 1)?,
            Primitive::Settle(Pace::Step),
        ])
    }

    fn enter_amount(&self, params: &TradeParams) -> Result<Vec<Primitive>> {
        Ok(vec![
            click(self.positions, "amount_box", 1)?,
            type_text(format_quantity(params.amount_value())),
            Primitive::Settle(Pace::Step),
        ])
    }

    fn configure_order_type(&self, params: &TradeParams) -> Result<Vec<Primitive>> {
        let order_type = OrderType::from_str(params.order_type_str())?;
        let passes = self.redundancy.order_type_clicks as usize;
        let option = click(self.positions, order_type.anchor_label(), 1)?;

        // Each pass is a separate move-and-click; single clicks here are often lost.
        let mut plan = vec![option; passes];

        if order_type == OrderType::Limit {
            let price = params.limit_price.unwrap_or_default();
            plan.extend([
                Primitive::Settle(Pace::LimitReveal),
                click(self.positions, "limit_price_box", 1)?,
                Primitive::Settle(Pace::PriceField),
                type_text(format_price(price)),
                Primitive::Settle(Pace::PriceField),
            ]);
        }

        let duration = if params.extended_hours {
            "day_plus_option"
        } else {
            "day_option"
        };
        plan.extend([
            click(self.positions, "day_dropdown", 1)?,
            Primitive::Settle(Pace::Step),
            click(self.positions, duration, 1)?,
            Primitive::Settle(Pace::Step),
            Primitive::Settle(Pace::Step),
        ]);

        Ok(plan)
    }

    fn submit(&self) -> Result<Vec<Primitive>> {
        Ok(vec![click(self.positions, "place_order_button", 1)?])
    }
}
