/// One prompt of the recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingStep {
    pub label: &'static str,
    pub prompt: &'static str,
}

const fn step(label: &'static str, prompt: &'static str) -> RecordingStep {
    RecordingStep { label, prompt }
}

const REOPEN_ACCOUNTS: &str = "Click the account dropdown AGAIN to reopen it";
const REOPEN_DAY: &str = "Click the day dropdown AGAIN to reopen it";

/// The ordered prompts of a recording session.
///
/// Dropdowns are revisited between their options; the last click on a
/// repeated label is the one kept.
pub const RECORDING_SCRIPT: [RecordingStep; 30] = [
    step("screen_focus", "Click the screen to focus it"),
    step("options_button", "Click the Options button"),
    step("stocks_button", "Click the Stocks button"),
    step("account_dropdown", "Click the account dropdown"),
    step("account_roth", "Click the Roth account option"),
    step("account_dropdown", REOPEN_ACCOUNTS),
    step("account_dropdown", REOPEN_ACCOUNTS),
    step("account_traditional", "Click the Traditional account option"),
    step("account_dropdown", REOPEN_ACCOUNTS),
    step("account_dropdown", REOPEN_ACCOUNTS),
    step("account_hsa", "Click the HSA account option"),
    step("account_dropdown", REOPEN_ACCOUNTS),
    step("account_dropdown", REOPEN_ACCOUNTS),
    step("account_brokeragelink", "Click the Brokeragelink account option"),
    step("account_dropdown", REOPEN_ACCOUNTS),
    step("account_dropdown", REOPEN_ACCOUNTS),
    step("account_individual", "Click the Individual account option"),
    step("ticker_box", "Click inside the ticker input box"),
    step("buy_button", "Click the Buy button"),
    step("sell_button", "Click the Sell button"),
    step("amount_box", "Click inside the amount input box"),
    step("market_order", "Click the Market order option"),
    step("limit_order", "Click the Limit order option"),
    step("limit_price_box", "Click inside the Limit price input box"),
    step("day_dropdown", "Click the day dropdown"),
    step("day_option", "Click the day option"),
    step("day_dropdown", REOPEN_DAY),
    step("day_dropdown", REOPEN_DAY),
    step("day_plus_option", "Click the Day+ option"),
    step("place_order_button", "Click the Place Order button"),
];
