//! Main application module.
//!
//! `App` owns the loaded settings and wires the concrete adapters (enigo
//! driver, device_query listener, tokio clock) into the trade and recording
//! flows.

use crate::cli::{Cli, Mode};
use crate::config::Settings;
use crate::error::Result;
use crate::events::GlobalListener;
use crate::input::{EnigoDriver, InputDriver};
use crate::pacing::{Clock, Pacer, TokioClock};
use crate::positions::{CoordinateMap, CoordinateStore};
use crate::recorder::PositionRecorder;
use crate::trade::{BatchController, BatchReport, TradeParams, TradeSequencer};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};
use tracing::{debug, info};

/// The main application.
pub struct App {
    settings: Settings,
}

impl App {
    /// Create a new application.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run the mode selected on the command line.
    pub async fn run(&self, cli: &Cli) -> Result<()> {
        match cli.mode {
            Mode::Trade => self.trade(&cli.trade_params()).await.map(|_| ()),
            Mode::RecordPositions => self.record(cli.update).await.map(|_| ()),
            Mode::InitConfig => self.init_config(cli.config.clone()).map(|_| ()),
        }
    }

    fn store(&self) -> CoordinateStore {
        CoordinateStore::new(&self.settings.paths.positions_file)
    }

    /// Validate, load the coordinate store, then place the order(s).
    pub async fn trade(&self, params: &TradeParams) -> Result<BatchReport> {
        params.validate()?;

        let positions = self.store().load()?;
        let mut driver = EnigoDriver::new(&self.settings.target)?;
        let mut pacer = Pacer::new(Arc::new(TokioClock));

        self.run_trade(&mut driver, &mut pacer, &positions, params)
            .await
    }

    /// Place the order(s) through `driver`. Nothing is injected if `params`
    /// fail validation.
    pub async fn run_trade<D: InputDriver>(
        &self,
        driver: &mut D,
        pacer: &mut Pacer,
        positions: &CoordinateMap,
        params: &TradeParams,
    ) -> Result<BatchReport> {
        params.validate()?;

        let sequencer = TradeSequencer::new(driver, pacer, positions, &self.settings);
        let report = BatchController::new(sequencer).run(params).await?;
        info!("Placed {} order(s)", report.completed);
        Ok(report)
    }

    /// Record positions interactively. Ctrl+C aborts without writing.
    ///
    /// With `update`, labels skipped this session keep their stored values.
    pub async fn record(&self, update: bool) -> Result<CoordinateMap> {
        let store = self.store();
        let seed = if update && store.path().exists() {
            store.load()?
        } else {
            CoordinateMap::new()
        };

        let mut listener = GlobalListener::default();
        let clock: Arc<dyn Clock> = Arc::new(TokioClock);
        let mut recorder = PositionRecorder::new(&mut listener, clock, &self.settings.recorder)?;

        let abort = arm_interrupt(tokio::signal::ctrl_c());
        recorder.run(seed, &store, abort).await
    }

    /// Write the default settings file and return where it went.
    pub fn init_config(&self, path: Option<PathBuf>) -> Result<PathBuf> {
        let written = Settings::default().save(path)?;
        println!("Settings written to {}", written.display());
        info!("Wrote default settings to {}", written.display());
        Ok(written)
    }
}

/// Poll `signal` once so its handler is installed before the listener
/// starts, then wrap it as an abort future.
///
/// A signal that cannot be installed never aborts.
fn arm_interrupt<F>(signal: F) -> impl Future<Output = ()>
where
    F: Future<Output = std::io::Result<()>>,
{
    let mut signal = Box::pin(signal);
    let first = signal
        .as_mut()
        .poll(&mut Context::from_waker(Waker::noop()));

    async move {
        let result = match first {
            Poll::Ready(result) => result,
            Poll::Pending => signal.await,
        };
        if let Err(e) = result {
            debug!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
