//! Composition root that owns the dispatcher, the context and the inbox
//! drained on the UI thread.

use std::fmt;

use crate::kernel::{DispatchError, Dispatcher, PanelError, Registry};
use crate::services::bus::{nav_bus, NavBusReceiver, NavBusSender, NavMessage};

use super::context::NavContext;

#[derive(Debug)]
pub enum HostError {
    Dispatch(DispatchError),
    Panel(PanelError),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Dispatch(e) => write!(f, "{}", e),
            HostError::Panel(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Dispatch(e) => Some(e),
            HostError::Panel(e) => Some(e),
        }
    }
}

impl From<DispatchError> for HostError {
    fn from(e: DispatchError) -> Self {
        HostError::Dispatch(e)
    }
}

impl From<PanelError> for HostError {
    fn from(e: PanelError) -> Self {
        HostError::Panel(e)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PumpSummary {
    pub applied: usize,
    pub failed: usize,
    /// Escape requests no node resolved; the shell picks the fallback.
    pub unhandled_escapes: usize,
}

pub struct NavigationHost {
    dispatcher: Dispatcher<NavContext>,
    cx: NavContext,
    bus: NavBusSender,
    rx: NavBusReceiver,
}

impl NavigationHost {
    pub fn new(registry: Registry<NavContext>, cx: NavContext) -> Self {
        let (bus, rx) = nav_bus();
        Self {
            dispatcher: Dispatcher::new(registry),
            cx,
            bus,
            rx,
        }
    }

    /// A handle other threads use to queue requests for [`pump`](Self::pump).
    pub fn sender(&self) -> NavBusSender {
        self.bus.clone()
    }

    pub fn context(&self) -> &NavContext {
        &self.cx
    }

    pub fn context_mut(&mut self) -> &mut NavContext {
        &mut self.cx
    }

    pub fn dispatcher(&self) -> &Dispatcher<NavContext> {
        &self.dispatcher
    }

    pub fn replace_registry(&mut self, registry: Registry<NavContext>) -> Registry<NavContext> {
        self.dispatcher.replace_registry(registry)
    }

    pub fn publish(&mut self, key: &str) -> Result<(), DispatchError> {
        self.dispatcher.publish(key, &mut self.cx)
    }

    pub fn handle_escape(&mut self) -> Result<bool, PanelError> {
        self.cx.panels_mut().handle_escape()
    }

    /// Applies one request. Returns `false` only for an unhandled escape.
    pub fn apply(&mut self, msg: NavMessage) -> Result<bool, HostError> {
        match msg {
            NavMessage::Publish(key) => self.publish(&key)?,
            NavMessage::OpenPanel { panel, params } => {
                self.cx.panels_mut().open_panel(&panel, params)?;
            }
            NavMessage::ShowWindow { panel, params } => {
                self.cx.panels_mut().show_window(&panel, params)?;
            }
            NavMessage::ClosePanel(node) => self.cx.panels_mut().close_panel(node)?,
            NavMessage::Escape => return Ok(self.handle_escape()?),
        }
        Ok(true)
    }

    /// Drains every queued request. A failing request is logged and skipped.
    pub fn pump(&mut self) -> PumpSummary {
        let mut summary = PumpSummary::default();
        while let Ok(msg) = self.rx.try_recv() {
            let label = format!("{:?}", msg);
            match self.apply(msg) {
                Ok(handled) => {
                    summary.applied += 1;
                    if !handled {
                        summary.unhandled_escapes += 1;
                    }
                }
                Err(error) => {
                    tracing::warn!(request = %label, error = %error, "navigation request abandoned");
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/host.rs"]
mod tests;
