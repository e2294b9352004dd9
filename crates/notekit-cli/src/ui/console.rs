use is_terminal::IsTerminal;
use notekit_runtime::navigation::{Navigator, Route};
use notekit_runtime::notify::{NoticeKind, Notifier};
use owo_colors::OwoColorize;
use std::sync::Mutex;

/// Notices go to stderr so stdout stays parseable.
pub struct ConsoleNotifier {
    color: bool,
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            color: std::io::stderr().is_terminal(),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn show(&self, message: &str, kind: NoticeKind) {
        match (kind, self.color) {
            (NoticeKind::Success, true) => eprintln!("{} {}", "✓".green(), message),
            (NoticeKind::Success, false) => eprintln!("✓ {}", message),
            (NoticeKind::Neutral, true) => eprintln!("{} {}", "!".yellow(), message),
            (NoticeKind::Neutral, false) => eprintln!("! {}", message),
        }
    }

    fn loading(&self, label: Option<&str>) {
        if self.color {
            eprintln!("{}", label.unwrap_or("Loading...").dimmed());
        }
    }

    fn loaded(&self) {}
}

/// There are no screens in a terminal; routes only turn into hints.
#[derive(Default)]
pub struct ConsoleNavigator {
    current: Mutex<Option<Route>>,
}

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Navigator for ConsoleNavigator {
    fn go_to(&self, route: Route) {
        tracing::debug!(route = %route.path(), "navigate");
        if route == Route::SignIn {
            eprintln!("Sign in with: notekit login --phone <PHONE> --password <PASSWORD> --agree");
        }
        if let Ok(mut current) = self.current.lock() {
            *current = Some(route);
        }
    }

    fn current(&self) -> Option<Route> {
        self.current.lock().ok().and_then(|current| current.clone())
    }
}
