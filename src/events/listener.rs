//! OS-level global listener backed by device_query.

use super::{EventSource, InputEvent, Key, PointerButton};
use crate::error::{Error, Result};
use crate::positions::Anchor;
use device_query::{DeviceEvents, DeviceEventsHandler, DeviceQuery, DeviceState, Keycode, MouseButton};
use std::any::Any;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Forwards global mouse-down and key-down events into a queue.
///
/// Callbacks run on device_query's polling thread; dropping their guards
/// unregisters them, which is what [`EventSource::stop`] does.
pub struct GlobalListener {
    sample_interval: Duration,
    handler: Option<DeviceEventsHandler>,
    guards: Vec<Box<dyn Any>>,
    event_rx: Option<mpsc::UnboundedReceiver<InputEvent>>,
}

impl GlobalListener {
    /// Create a listener that samples device state every `sample_interval`.
    pub fn new(sample_interval: Duration) -> Self {
        Self {
            sample_interval,
            handler: None,
            guards: Vec::new(),
            event_rx: None,
        }
    }

    /// Whether the listener is currently capturing.
    pub fn is_running(&self) -> bool {
        self.event_rx.is_some()
    }
}

impl Default for GlobalListener {
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

impl EventSource for GlobalListener {
    fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }

        let handler = DeviceEventsHandler::new(self.sample_interval)
            .ok_or_else(|| Error::listener("global input hooks are unavailable"))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let mouse_tx = event_tx.clone();
        let mouse_guard = handler.on_mouse_down(move |button: &MouseButton| {
            let at = Anchor::from(DeviceState::new().get_mouse().coords);
            let _ = mouse_tx.send(InputEvent::ButtonDown {
                button: PointerButton::from(*button),
                at,
            });
        });

        let key_guard = handler.on_key_down(move |key: &Keycode| {
            let _ = event_tx.send(InputEvent::KeyDown(Key::from(key.clone())));
        });

        self.guards = vec![Box::new(mouse_guard), Box::new(key_guard)];
        self.handler = Some(handler);
        self.event_rx = Some(event_rx);

        info!("Global input listener started");
        Ok(())
    }

    fn try_next(&mut self) -> Option<InputEvent> {
        self.event_rx.as_mut()?.try_recv().ok()
    }

    fn stop(&mut self) {
        if !self.is_running() {
            return;
        }

        self.guards.clear();
        self.event_rx = None;
        self.handler = None;
        debug!("Global input listener stopped");
    }
}

impl Drop for GlobalListener {
    fn drop(&mut self) {
        self.stop();
    }
}
