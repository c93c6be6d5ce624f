//! Line-driven shell around the navigation core.
//!
//! Reads commands from stdin: `publish <key>`, `open <panel>`,
//! `window <panel>`, `close`, `escape`, `dump`, `quit`.

use std::io::{self, BufRead, Write};
use std::path::Path;

use navkit::app::{NavContext, NavigationHost};
use navkit::core::{EscapePolicy, Layer, PanelId};
use navkit::kernel::{
    Handler, HandlerDef, HandlerResult, PanelCatalog, PanelDescriptor, PanelError, PanelManager,
    Registry,
};
use navkit::models::{NodeBehavior, NodeId, PanelParams};
use navkit::services::{load_settings, NavMessage, NavSettings};

struct Announce(&'static str);

impl NodeBehavior for Announce {
    fn on_construct(&mut self, node: NodeId, _params: Option<&PanelParams>) {
        println!("  + {} {:?}", self.0, node);
    }

    fn on_reopen(&mut self, node: NodeId, _params: Option<&PanelParams>) {
        println!("  ^ {} {:?}", self.0, node);
    }

    fn on_hide(&mut self, node: NodeId) {
        println!("  ~ {} {:?}", self.0, node);
    }

    fn on_destroy(&mut self, node: NodeId) {
        println!("  - {} {:?}", self.0, node);
    }
}

/// Swallows escape while shown; loading cannot be cancelled.
struct Blocking;

impl NodeBehavior for Blocking {
    fn on_construct(&mut self, node: NodeId, _params: Option<&PanelParams>) {
        println!("  + LoadingOverlay {:?}", node);
    }

    fn on_escape(&mut self, _node: NodeId) -> bool {
        println!("  loading, escape ignored");
        true
    }
}

fn catalog() -> Result<PanelCatalog, PanelError> {
    PanelCatalog::new()
        .with(
            PanelDescriptor::new("TitleScreen", Layer::Background)
                .escape(EscapePolicy::Ignore)
                .behavior(|| Box::new(Announce("TitleScreen"))),
        )?
        .with(
            PanelDescriptor::new("MainMenu", Layer::Main)
                .escape(EscapePolicy::Hide)
                .behavior(|| Box::new(Announce("MainMenu"))),
        )?
        .with(
            PanelDescriptor::new("LoginPanel", Layer::Popup)
                .behavior(|| Box::new(Announce("LoginPanel"))),
        )?
        .with(
            PanelDescriptor::new("Toast", Layer::Popup).behavior(|| Box::new(Announce("Toast"))),
        )?
        .with(
            PanelDescriptor::new("LoadingOverlay", Layer::System)
                .escape(EscapePolicy::Custom)
                .full_screen(true)
                .behavior(|| Box::new(Blocking)),
        )
}

#[derive(Default)]
struct Launch;

impl Handler<NavContext> for Launch {
    fn on_publish(&self, cx: &mut NavContext) -> HandlerResult {
        cx.panels_mut().open_panel("TitleScreen", None)?;
        cx.panels_mut().open_panel("MainMenu", None)?;
        Ok(())
    }
}

#[derive(Default)]
struct Login;

impl Handler<NavContext> for Login {
    fn on_publish(&self, cx: &mut NavContext) -> HandlerResult {
        cx.panels_mut().open_panel("LoginPanel", None)?;
        Ok(())
    }
}

#[derive(Default)]
struct Load;

impl Handler<NavContext> for Load {
    fn on_publish(&self, cx: &mut NavContext) -> HandlerResult {
        cx.panels_mut().open_panel("LoadingOverlay", None)?;
        Ok(())
    }
}

fn parse_command(line: &str, host: &NavigationHost) -> Option<NavMessage> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    let arg = parts.next();
    match (verb, arg) {
        ("publish", Some(key)) => Some(NavMessage::Publish(key.into())),
        ("open", Some(panel)) => Some(NavMessage::OpenPanel {
            panel: PanelId::from(panel),
            params: None,
        }),
        ("window", Some(panel)) => Some(NavMessage::ShowWindow {
            panel: PanelId::from(panel),
            params: None,
        }),
        ("close", None) => host.context().panels().top().map(NavMessage::ClosePanel),
        ("escape", None) => Some(NavMessage::Escape),
        _ => None,
    }
}

fn dump(host: &NavigationHost) {
    let panels = host.context().panels();
    for layer in Layer::ALL.into_iter().rev() {
        let names: Vec<String> = panels
            .stack(layer)
            .iter()
            .filter_map(|id| panels.tree().get(*id).ok())
            .map(|node| {
                let name = node.panel().map_or("?", |p| p.as_str());
                match (node.is_visible(), node.is_interactive()) {
                    (true, true) => name.to_string(),
                    (true, false) => format!("{name} (blocked)"),
                    (false, _) => format!("{name} (hidden)"),
                }
            })
            .collect();
        println!("{:>10}: {}", layer.name(), names.join(", "));
    }
}

fn main() -> io::Result<()> {
    let _logging = navkit::logging::init(&std::env::temp_dir().join("navkit").join("logs"));

    let settings = match std::env::args().nth(1) {
        Some(path) => load_settings(Path::new(&path)).unwrap_or_else(|e| {
            eprintln!("{e}; using defaults");
            NavSettings::default()
        }),
        None => NavSettings::default(),
    };

    let catalog = catalog().map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let registry = Registry::build([
        HandlerDef::of::<Launch>("Launch"),
        HandlerDef::of::<Login>("Login"),
        HandlerDef::of::<Load>("Load"),
    ])
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let cx = NavContext::new(PanelManager::with_settings(catalog, &settings));
    let mut host = NavigationHost::new(registry, cx);
    let tx = host.sender();
    if let Err(e) = host.publish("Launch") {
        eprintln!("launch failed: {e}");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        match line {
            "" => {}
            "quit" => break,
            "dump" => dump(&host),
            _ => match parse_command(line, &host) {
                Some(msg) => {
                    let _ = tx.send(msg);
                    let summary = host.pump();
                    if summary.failed > 0 {
                        println!("  request failed, see log");
                    }
                    if summary.unhandled_escapes > 0 {
                        println!("nothing left to go back to, exiting");
                        break;
                    }
                }
                None => println!("  unknown command: {line}"),
            },
        }
        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    Ok(())
}
