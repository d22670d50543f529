//! Executes one trade against the target application.

use super::params::TradeParams;
use super::steps::{Pace, Primitive, StepPlanner, TradeStep};
use crate::config::Settings;
use crate::error::Result;
use crate::events::Key;
use crate::input::InputDriver;
use crate::pacing::{Pacer, PauseRange};
use crate::positions::{Anchor, CoordinateMap};
use tracing::{debug, info};

/// Runs the trade state table through an [`InputDriver`].
///
/// Execution is open-loop: the sequencer never looks at the screen, so a
/// trade counts as submitted once the final click is delivered without an
/// injection error.
pub struct TradeSequencer<'a, D: InputDriver> {
    driver: &'a mut D,
    pacer: &'a mut Pacer,
    positions: &'a CoordinateMap,
    settings: &'a Settings,
}

impl<'a, D: InputDriver> TradeSequencer<'a, D> {
    pub fn new(
        driver: &'a mut D,
        pacer: &'a mut Pacer,
        positions: &'a CoordinateMap,
        settings: &'a Settings,
    ) -> Self {
        Self {
            driver,
            pacer,
            positions,
            settings,
        }
    }

    /// The pacer shared with the batch controller.
    pub(crate) fn pacer(&mut self) -> &mut Pacer {
        &mut *self.pacer
    }

    /// Place one order. `batch` numbers the repetition in the log, if any.
    ///
    /// The first failing step aborts the rest; the error names that step.
    pub async fn execute(&mut self, params: &TradeParams, batch: Option<u32>) -> Result<()> {
        let batch_info = batch.map(|n| format!(" (Batch {n})")).unwrap_or_default();
        info!(
            "Executing {} order{}: {} shares of {} as {} order",
            params.action_str(),
            batch_info,
            super::format_quantity(params.amount_value()),
            params.ticker_str(),
            params.order_type_str(),
        );

        let planner = StepPlanner::new(self.positions, &self.settings.redundancy);
        let mut state = Some(TradeStep::FIRST);

        while let Some(step) = state {
            debug!("Step {}", step);
            let plan = planner.plan(step, params).map_err(|e| e.in_step(step))?;
            for primitive in &plan {
                self.perform(primitive).await.map_err(|e| e.in_step(step))?;
            }
            state = step.next();
        }

        info!("Order submitted{}", batch_info);
        Ok(())
    }

    async fn perform(&mut self, primitive: &Primitive) -> Result<()> {
        match primitive {
            Primitive::Click { label, at, times } => {
                debug!("Click {} at {} x{}", label, at, times);
                self.click_at(*at, *times).await
            }
            Primitive::Type { text, confirm } => self.type_text(text, *confirm).await,
            Primitive::Settle(pace) => {
                let range = self.pace_range(*pace);
                self.pacer.delay(range).await;
                Ok(())
            }
        }
    }

    async fn click_at(&mut self, at: Anchor, times: u32) -> Result<()> {
        let timing = &self.settings.timing;
        self.driver.move_to(at)?;
        self.pacer.delay(timing.pointer_settle).await;

        for _ in 0..times {
            self.driver.click()?;
            self.pacer.delay(timing.click_gap).await;
        }

        self.pacer.delay(timing.click_settle).await;
        Ok(())
    }

    async fn type_text(&mut self, text: &str, confirm: bool) -> Result<()> {
        let timing = &self.settings.timing;
        let target = &self.settings.target;

        if target.focus_before_typing {
            if let Err(e) = self.driver.focus_window(&target.window_name) {
                debug!("Window focus skipped: {}", e);
            }
            self.pacer.delay(timing.focus_settle).await;
        }

        for c in text.chars() {
            self.driver.type_char(c)?;
            self.pacer.delay(timing.keystroke).await;
        }

        self.pacer.delay(timing.type_settle).await;
        if confirm {
            self.driver.tap_key(Key::Enter)?;
        }
        self.pacer.delay(timing.type_settle).await;

        Ok(())
    }

    fn pace_range(&self, pace: Pace) -> PauseRange {
        let timing = &self.settings.timing;
        match pace {
            Pace::Step => timing.step_settle,
            Pace::TickerResolve => timing.ticker_resolve,
            Pace::LimitReveal => timing.limit_reveal,
            Pace::PriceField => timing.price_field,
        }
    }
}
