//! Interactive position recording.
//!
//! The recorder walks [`RECORDING_SCRIPT`], prompting the operator for each
//! label and taking the pointer position of the next left click. The skip key
//! advances without recording. The listener is released on every exit path,
//! including operator abort.

mod script;

pub use script::{RECORDING_SCRIPT, RecordingStep};

use crate::config::RecorderConfig;
use crate::error::{Error, Result};
use crate::events::{EventSource, InputEvent, Key};
use crate::pacing::Clock;
use crate::positions::{Anchor, CoordinateMap, CoordinateStore};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// What the operator did at one prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Recorded(Anchor),
    Skipped,
}

/// Records anchors from live input into a [`CoordinateStore`].
pub struct PositionRecorder<'a, E: EventSource> {
    events: &'a mut E,
    clock: Arc<dyn Clock>,
    skip_key: Key,
    poll_interval: Duration,
}

impl<'a, E: EventSource> PositionRecorder<'a, E> {
    pub fn new(events: &'a mut E, clock: Arc<dyn Clock>, config: &RecorderConfig) -> Result<Self> {
        let skip_key = Key::from_binding(&config.skip_key).ok_or_else(|| {
            Error::config(format!("unrecognized skip key '{}'", config.skip_key))
        })?;

        Ok(Self {
            events,
            clock,
            skip_key,
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
        })
    }

    /// Run the whole script and persist the result.
    ///
    /// `seed` supplies values kept for skipped labels. `abort` resolving ends
    /// the session with [`Error::Aborted`] and nothing is written.
    pub async fn run<F>(
        &mut self,
        seed: CoordinateMap,
        store: &CoordinateStore,
        abort: F,
    ) -> Result<CoordinateMap>
    where
        F: Future<Output = ()>,
    {
        println!("Move the mouse to each element and LEFT-click to record.");
        println!(
            "Press {} to skip optional elements or Ctrl+C to abort the entire process.\n",
            self.skip_key.label()
        );
        println!("Starting event listener...");

        self.events.start()?;
        info!("Recording session started");

        let result = self.record_all(seed, abort).await;
        self.events.stop();

        let positions = result?;
        store.save(&positions)?;

        println!("All positions saved to {}", store.path().display());
        info!(
            "Recorded {} positions to {}",
            positions.len(),
            store.path().display()
        );
        Ok(positions)
    }

    async fn record_all<F>(&mut self, seed: CoordinateMap, abort: F) -> Result<CoordinateMap>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(abort);
        let mut positions = seed;
        let total = RECORDING_SCRIPT.len();

        for (index, step) in RECORDING_SCRIPT.iter().enumerate() {
            println!(
                "[{}/{}] {} (press {} to skip)",
                index + 1,
                total,
                step.prompt,
                self.skip_key.label()
            );

            match self.wait_for_outcome(abort.as_mut()).await? {
                Outcome::Recorded(at) => {
                    positions.set(step.label, at);
                    println!("Recorded {at}\n");
                    debug!("Recorded {} at {}", step.label, at);
                }
                Outcome::Skipped => {
                    println!("Skipped {}\n", step.prompt);
                    debug!("Skipped {}", step.label);
                }
            }
        }

        Ok(positions)
    }

    /// Poll until a left click or the skip key. No timeout.
    async fn wait_for_outcome<F>(&mut self, mut abort: std::pin::Pin<&mut F>) -> Result<Outcome>
    where
        F: Future<Output = ()>,
    {
        loop {
            while let Some(event) = self.events.try_next() {
                if let Some(outcome) = self.classify(event) {
                    return Ok(outcome);
                }
            }

            tokio::select! {
                biased;
                _ = abort.as_mut() => {
                    info!("Recording aborted by operator");
                    return Err(Error::Aborted);
                }
                _ = self.clock.sleep(self.poll_interval) => {}
            }
        }
    }

    fn classify(&self, event: InputEvent) -> Option<Outcome> {
        if let Some(at) = event.left_click_position() {
            Some(Outcome::Recorded(at))
        } else if event.is_key(self.skip_key) {
            Some(Outcome::Skipped)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::events::PointerButton;
    use crate::testing::{RecordingClock, ScriptedEvents};
    use pretty_assertions::assert_eq;
    use std::future::{pending, ready};

    fn clicks_for_every_step() -> Vec<Option<InputEvent>> {
        (0..RECORDING_SCRIPT.len() as i32)
            .map(|i| Some(InputEvent::left_click(Anchor::new(i, i * 2))))
            .collect()
    }

    fn recorder<'a>(events: &'a mut ScriptedEvents) -> PositionRecorder<'a, ScriptedEvents> {
        PositionRecorder::new(
            events,
            Arc::new(RecordingClock::default()),
            &RecorderConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_last_click_wins_for_repeated_labels() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoordinateStore::new(dir.path().join("click_positions.json"));
        let mut events = ScriptedEvents::new(clicks_for_every_step());

        let positions = recorder(&mut events)
            .run(CoordinateMap::new(), &store, pending())
            .await
            .unwrap();

        assert_eq!(positions.len(), 20);
        // Last account_dropdown prompt is step 16, last day_dropdown is step 28.
        assert_eq!(positions.anchor("account_dropdown").unwrap(), Anchor::new(15, 30));
        assert_eq!(positions.anchor("day_dropdown").unwrap(), Anchor::new(27, 54));
        assert_eq!(positions.anchor("place_order_button").unwrap(), Anchor::new(29, 58));
        assert_eq!(store.load().unwrap(), positions);
        assert_eq!(events.stops, 1);
        assert!(!events.running);
    }

    #[tokio::test]
    async fn test_skip_keeps_seed_value_or_leaves_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoordinateStore::new(dir.path().join("click_positions.json"));
        let seed: CoordinateMap = [("sell_button", Anchor::new(1, 1))].into_iter().collect();

        let mut script = clicks_for_every_step();
        let sell = RECORDING_SCRIPT.iter().position(|s| s.label == "sell_button").unwrap();
        let limit = RECORDING_SCRIPT
            .iter()
            .position(|s| s.label == "limit_price_box")
            .unwrap();
        script[sell] = Some(InputEvent::KeyDown(Key::Escape));
        script[limit] = Some(InputEvent::KeyDown(Key::Escape));
        let mut events = ScriptedEvents::new(script);

        let positions = recorder(&mut events).run(seed, &store, pending()).await.unwrap();

        assert_eq!(positions.anchor("sell_button").unwrap(), Anchor::new(1, 1));
        assert!(!positions.contains("limit_price_box"));
        assert_eq!(positions.len(), 19);
    }

    #[tokio::test]
    async fn test_ignores_other_buttons_keys_and_empty_polls() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoordinateStore::new(dir.path().join("click_positions.json"));

        let mut script = vec![
            None,
            Some(InputEvent::ButtonDown {
                button: PointerButton::Right,
                at: Anchor::new(900, 900),
            }),
            Some(InputEvent::KeyDown(Key::Char('q'))),
            None,
        ];
        script.extend(clicks_for_every_step());
        let mut events = ScriptedEvents::new(script);

        let positions = recorder(&mut events)
            .run(CoordinateMap::new(), &store, pending())
            .await
            .unwrap();

        assert_eq!(positions.anchor("screen_focus").unwrap(), Anchor::new(0, 0));
        assert_eq!(events.remaining(), 0);
    }

    #[tokio::test]
    async fn test_configured_skip_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoordinateStore::new(dir.path().join("click_positions.json"));
        let config = RecorderConfig {
            skip_key: "F2".to_string(),
            ..RecorderConfig::default()
        };

        // Escape is not the skip key here, so the first prompt waits for F2.
        let mut script = vec![
            Some(InputEvent::KeyDown(Key::Escape)),
            Some(InputEvent::KeyDown(Key::F(2))),
        ];
        script.extend(clicks_for_every_step().into_iter().skip(1));
        let mut events = ScriptedEvents::new(script);

        let mut recorder =
            PositionRecorder::new(&mut events, Arc::new(RecordingClock::default()), &config).unwrap();
        let positions = recorder
            .run(CoordinateMap::new(), &store, pending())
            .await
            .unwrap();

        assert!(!positions.contains("screen_focus"));
        assert_eq!(positions.len(), 19);
    }

    #[tokio::test]
    async fn test_abort_stops_listener_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoordinateStore::new(dir.path().join("click_positions.json"));
        let mut events = ScriptedEvents::new([Some(InputEvent::left_click(Anchor::new(3, 4)))]);

        let err = recorder(&mut events)
            .run(CoordinateMap::new(), &store, ready(()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Aborted);
        assert_eq!(events.starts, 1);
        assert_eq!(events.stops, 1);
        assert!(!events.running);
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_listener_start_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = CoordinateStore::new(dir.path().join("click_positions.json"));
        let mut events = ScriptedEvents {
            fail_start: true,
            ..ScriptedEvents::default()
        };

        let err = recorder(&mut events)
            .run(CoordinateMap::new(), &store, pending())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Listener);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_unknown_skip_key_rejected() {
        let mut events = ScriptedEvents::default();
        let config = RecorderConfig {
            skip_key: "Hyper".to_string(),
            ..RecorderConfig::default()
        };
        let result = PositionRecorder::new(&mut events, Arc::new(RecordingClock::default()), &config);
        assert!(result.is_err());
    }
}
