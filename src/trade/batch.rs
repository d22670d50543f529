//! Repeats one trade with randomized pauses in between.

use super::params::{TradeParams, format_quantity};
use super::sequencer::TradeSequencer;
use crate::error::Result;
use crate::input::InputDriver;
use crate::pacing::PauseRange;
use std::time::Duration;
use tracing::{info, warn};

/// Outcome of a completed batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Repetitions that ran to submission.
    pub completed: u32,
    /// Pauses taken between repetitions, in order.
    pub pauses: Vec<Duration>,
}

/// Runs a [`TradeSequencer`] `repeat` times.
pub struct BatchController<'a, D: InputDriver> {
    sequencer: TradeSequencer<'a, D>,
}

impl<'a, D: InputDriver> BatchController<'a, D> {
    pub fn new(sequencer: TradeSequencer<'a, D>) -> Self {
        Self { sequencer }
    }

    /// Place the order `params.repeat` times.
    ///
    /// Stops at the first failing repetition; the error carries its index.
    pub async fn run(&mut self, params: &TradeParams) -> Result<BatchReport> {
        let total = params.repeat.max(1);
        if total == 1 {
            self.sequencer.execute(params, None).await?;
            return Ok(BatchReport {
                completed: 1,
                pauses: Vec::new(),
            });
        }

        let quantity = format_quantity(params.amount_value());
        println!(
            "Executing the same {} order for {} shares {} times",
            params.action_str(),
            quantity,
            total
        );
        info!("Starting batch of {} orders", total);

        let range = PauseRange::between(params.min_pause, params.max_pause);
        let mut report = BatchReport::default();

        for index in 1..=total {
            println!("Executing order {index}/{total} for {quantity} shares");

            if let Err(e) = self.sequencer.execute(params, Some(index)).await {
                println!("Failed at repeat {index}: {e}. Stopping.");
                warn!("Batch stopped at repeat {}/{}: {}", index, total, e);
                return Err(e.in_repetition(index, total));
            }
            report.completed = index;

            if index < total {
                let pacer = self.sequencer.pacer();
                let pause = pacer.draw(range);
                println!(
                    "Pausing for {:.2} seconds before next repeat...",
                    pause.as_secs_f64()
                );
                info!("Pausing {:.2}s before repeat {}", pause.as_secs_f64(), index + 1);
                pacer.clock().sleep(pause).await;
                report.pauses.push(pause);
            }
        }

        Ok(report)
    }
}
