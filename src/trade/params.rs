//! Trade parameters, validation and the enumerated choices they carry.

use crate::error::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Operator-supplied trade parameters, as given on the command line.
///
/// Enumerated fields stay as strings. [`TradeParams::validate`] checks them
/// before a trade starts, and the step that uses one parses it again.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeParams {
    /// `stocks` or `options`.
    pub trade_type: String,
    /// `roth`, `traditional`, `hsa`, `brokeragelink` or `individual`.
    pub account: Option<String>,
    /// Ticker symbol.
    pub ticker: Option<String>,
    /// `buy` or `sell`.
    pub action: Option<String>,
    /// Share quantity.
    pub amount: Option<Decimal>,
    /// `market` or `limit`.
    pub order_type: Option<String>,
    /// Required for limit orders.
    pub limit_price: Option<Decimal>,
    /// Select the extended-hours ("Day+") duration.
    pub extended_hours: bool,
    /// Number of times to place the same order.
    pub repeat: u32,
    /// Lower bound of the pause between repeats, in seconds.
    pub min_pause: f64,
    /// Upper bound of the pause between repeats, in seconds.
    pub max_pause: f64,
}

impl Default for TradeParams {
    fn default() -> Self {
        Self {
            trade_type: "stocks".to_string(),
            account: None,
            ticker: None,
            action: None,
            amount: None,
            order_type: None,
            limit_price: None,
            extended_hours: false,
            repeat: 1,
            min_pause: 1.0,
            max_pause: 3.0,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|s| s.trim().is_empty())
}

impl TradeParams {
    /// Reject missing or out-of-range fields. Runs before any input is injected.
    pub fn validate(&self) -> Result<()> {
        if self.trade_type.trim().is_empty() {
            return Err(Error::validation("trade_type is required"));
        }
        TradeType::from_str(&self.trade_type)?;
        if is_blank(&self.account) {
            return Err(Error::validation("account is required"));
        }
        if is_blank(&self.ticker) {
            return Err(Error::validation("ticker is required"));
        }
        if is_blank(&self.action) {
            return Err(Error::validation("action is required"));
        }
        if self.amount.is_none_or(|a| a <= Decimal::ZERO) {
            return Err(Error::validation("amount must be greater than 0"));
        }
        if is_blank(&self.order_type) {
            return Err(Error::validation("order_type is required"));
        }

        // Parsed again by the step planner. No step may start on a bad value.
        Account::from_str(self.account_str())?;
        TradeAction::from_str(self.action_str())?;
        let order_type = OrderType::from_str(self.order_type_str())?;

        if order_type == OrderType::Limit && self.limit_price.is_none_or(|p| p <= Decimal::ZERO) {
            return Err(Error::validation("limit_price is required for limit orders"));
        }
        if self.repeat == 0 {
            return Err(Error::validation("repeat must be at least 1"));
        }
        if !self.min_pause.is_finite() || self.min_pause < 0.0 {
            return Err(Error::validation("min_pause must be a non-negative number"));
        }
        if !self.max_pause.is_finite() || self.min_pause > self.max_pause {
            return Err(Error::validation("min_pause must not exceed max_pause"));
        }
        Ok(())
    }

    pub(crate) fn account_str(&self) -> &str {
        self.account.as_deref().unwrap_or_default()
    }

    pub(crate) fn ticker_str(&self) -> &str {
        self.ticker.as_deref().map(str::trim).unwrap_or_default()
    }

    pub(crate) fn action_str(&self) -> &str {
        self.action.as_deref().unwrap_or_default()
    }

    pub(crate) fn order_type_str(&self) -> &str {
        self.order_type.as_deref().unwrap_or_default()
    }

    pub(crate) fn amount_value(&self) -> Decimal {
        self.amount.unwrap_or_default()
    }
}

/// Stocks or options ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeType {
    Stocks,
    Options,
}

impl FromStr for TradeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stocks" => Ok(Self::Stocks),
            "options" => Ok(Self::Options),
            _ => Err(Error::validation(format!(
                "trade_type must be 'stocks' or 'options', got '{s}'"
            ))),
        }
    }
}

impl TradeType {
    /// Anchor label of the ticket toggle.
    pub fn anchor_label(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks_button",
            Self::Options => "options_button",
        }
    }
}

/// Brokerage account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Account {
    Roth,
    Traditional,
    Hsa,
    BrokerageLink,
    Individual,
}

impl FromStr for Account {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "roth" => Ok(Self::Roth),
            "traditional" => Ok(Self::Traditional),
            "hsa" => Ok(Self::Hsa),
            "brokeragelink" => Ok(Self::BrokerageLink),
            "individual" => Ok(Self::Individual),
            _ => Err(Error::UnknownAccount(s.to_string())),
        }
    }
}

impl Account {
    /// Anchor label of this account's dropdown entry.
    pub fn anchor_label(&self) -> &'static str {
        match self {
            Self::Roth => "account_roth",
            Self::Traditional => "account_traditional",
            Self::Hsa => "account_hsa",
            Self::BrokerageLink => "account_brokeragelink",
            Self::Individual => "account_individual",
        }
    }
}

/// Buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl FromStr for TradeAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

impl TradeAction {
    pub fn anchor_label(&self) -> &'static str {
        match self {
            Self::Buy => "buy_button",
            Self::Sell => "sell_button",
        }
    }
}

/// Market or limit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
}

impl FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "market" => Ok(Self::Market),
            "limit" => Ok(Self::Limit),
            _ => Err(Error::InvalidOrderType(s.to_string())),
        }
    }
}

impl OrderType {
    pub fn anchor_label(&self) -> &'static str {
        match self {
            Self::Market => "market_order",
            Self::Limit => "limit_order",
        }
    }
}

/// Share quantity as typed into the amount box: no decimal places, ties to even.
pub fn format_quantity(amount: Decimal) -> String {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_string()
}

/// Limit price as typed into the price box: two decimal places.
pub fn format_price(price: Decimal) -> String {
    let mut price = price;
    price.rescale(2);
    price.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rust_decimal_macros::dec;

    fn market_buy() -> TradeParams {
        TradeParams {
            account: Some("roth".to_string()),
            ticker: Some("AAPL".to_string()),
            action: Some("buy".to_string()),
            amount: Some(dec!(10)),
            order_type: Some("market".to_string()),
            ..TradeParams::default()
        }
    }

    fn validation_message(params: &TradeParams) -> String {
        let err = params.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        err.to_string()
    }

    #[test]
    fn test_valid_market_order() {
        assert!(market_buy().validate().is_ok());
    }

    #[test]
    fn test_required_fields() {
        let mut params = market_buy();
        params.account = None;
        assert_eq!(validation_message(&params), "account is required");

        let mut params = market_buy();
        params.ticker = Some("   ".to_string());
        assert_eq!(validation_message(&params), "ticker is required");

        let mut params = market_buy();
        params.action = None;
        assert_eq!(validation_message(&params), "action is required");

        let mut params = market_buy();
        params.order_type = None;
        assert_eq!(validation_message(&params), "order_type is required");
    }

    #[test]
    fn test_amount_must_be_positive() {
        for amount in [None, Some(dec!(0)), Some(dec!(-5))] {
            let params = TradeParams {
                amount,
                ..market_buy()
            };
            assert_eq!(validation_message(&params), "amount must be greater than 0");
        }
    }

    #[test]
    fn test_limit_requires_positive_price() {
        for limit_price in [None, Some(dec!(0)), Some(dec!(-1.5))] {
            let params = TradeParams {
                order_type: Some("Limit".to_string()),
                limit_price,
                ..market_buy()
            };
            assert_eq!(
                validation_message(&params),
                "limit_price is required for limit orders"
            );
        }

        let params = TradeParams {
            order_type: Some("limit".to_string()),
            limit_price: Some(dec!(187.5)),
            ..market_buy()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_market_ignores_limit_price() {
        let params = TradeParams {
            limit_price: Some(dec!(0)),
            ..market_buy()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_repeat_and_pause_bounds() {
        let params = TradeParams {
            repeat: 0,
            ..market_buy()
        };
        assert_eq!(validation_message(&params), "repeat must be at least 1");

        let params = TradeParams {
            min_pause: 4.0,
            max_pause: 2.0,
            ..market_buy()
        };
        assert_eq!(validation_message(&params), "min_pause must not exceed max_pause");

        let params = TradeParams {
            min_pause: -1.0,
            ..market_buy()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_trade_type_must_be_known() {
        let params = TradeParams {
            trade_type: "futures".to_string(),
            ..market_buy()
        };
        assert!(validation_message(&params).contains("trade_type"));

        let params = TradeParams {
            trade_type: "Options".to_string(),
            ..market_buy()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_enumerated_values_rejected_up_front() {
        let params = TradeParams {
            account: Some("Individual_TOD".to_string()),
            ..market_buy()
        };
        assert_eq!(params.validate().unwrap_err().kind(), ErrorKind::UnknownAccount);

        let params = TradeParams {
            action: Some("hold".to_string()),
            ..market_buy()
        };
        assert_eq!(params.validate().unwrap_err().kind(), ErrorKind::InvalidAction);

        let params = TradeParams {
            order_type: Some("stop".to_string()),
            ..market_buy()
        };
        assert_eq!(params.validate().unwrap_err().kind(), ErrorKind::InvalidOrderType);

        let params = TradeParams {
            account: Some("HSA".to_string()),
            action: Some("Sell".to_string()),
            order_type: Some("MARKET".to_string()),
            ..market_buy()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_accounts_parse_case_insensitively() {
        assert_eq!("ROTH".parse::<Account>().unwrap(), Account::Roth);
        assert_eq!(
            "BrokerageLink".parse::<Account>().unwrap(),
            Account::BrokerageLink
        );
        assert_eq!("hsa".parse::<Account>().unwrap().anchor_label(), "account_hsa");

        for bad in ["ira", "", "individual_tod", "roth ira"] {
            let err = bad.parse::<Account>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnknownAccount);
        }
    }

    #[test]
    fn test_action_and_order_type_errors() {
        assert_eq!("SELL".parse::<TradeAction>().unwrap(), TradeAction::Sell);
        assert_eq!(
            "hold".parse::<TradeAction>().unwrap_err().kind(),
            ErrorKind::InvalidAction
        );
        assert_eq!(
            "stop".parse::<OrderType>().unwrap_err().kind(),
            ErrorKind::InvalidOrderType
        );
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_quantity(dec!(10)), "10");
        assert_eq!(format_quantity(dec!(10.0)), "10");
        assert_eq!(format_quantity(dec!(25.4)), "25");
        assert_eq!(format_quantity(dec!(2.5)), "2");
        assert_eq!(format_quantity(dec!(3.5)), "4");
        assert_eq!(format_quantity(dec!(7.51)), "8");
        assert_eq!(format_price(dec!(150)), "150.00");
        assert_eq!(format_price(dec!(187.5)), "187.50");
        assert_eq!(format_price(dec!(0.123)), "0.12");
    }
}
