//! Marshals navigation requests from other threads onto the UI thread.

use std::sync::mpsc::{self, Receiver, SendError, Sender, TryRecvError};

use crate::core::{EventKey, PanelId};
use crate::models::{NodeId, PanelParams};

#[derive(Debug, Clone, PartialEq)]
pub enum NavMessage {
    Publish(EventKey),
    OpenPanel {
        panel: PanelId,
        params: Option<PanelParams>,
    },
    ShowWindow {
        panel: PanelId,
        params: Option<PanelParams>,
    },
    ClosePanel(NodeId),
    Escape,
}

#[derive(Clone)]
pub struct NavBusSender {
    tx: Sender<NavMessage>,
}

pub struct NavBusReceiver {
    rx: Receiver<NavMessage>,
}

pub fn nav_bus() -> (NavBusSender, NavBusReceiver) {
    let (tx, rx) = mpsc::channel();
    (NavBusSender { tx }, NavBusReceiver { rx })
}

impl NavBusSender {
    pub fn send(&self, msg: NavMessage) -> Result<(), SendError<NavMessage>> {
        self.tx.send(msg)
    }

    pub fn publish(&self, key: impl Into<EventKey>) -> Result<(), SendError<NavMessage>> {
        self.send(NavMessage::Publish(key.into()))
    }

    pub fn open_panel(
        &self,
        panel: impl Into<PanelId>,
        params: Option<PanelParams>,
    ) -> Result<(), SendError<NavMessage>> {
        self.send(NavMessage::OpenPanel {
            panel: panel.into(),
            params,
        })
    }

    pub fn escape(&self) -> Result<(), SendError<NavMessage>> {
        self.send(NavMessage::Escape)
    }
}

impl NavBusReceiver {
    pub fn try_recv(&mut self) -> Result<NavMessage, TryRecvError> {
        self.rx.try_recv()
    }
}
