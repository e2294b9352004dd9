//! Notifier and navigator doubles that remember what they were asked to do.

use notekit_runtime::navigation::{Navigator, Route};
use notekit_runtime::notify::{NoticeKind, Notifier};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(String, NoticeKind)>>,
    spinner_depth: Mutex<i64>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        lock(&self.notices).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.notices)
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        lock(&self.notices).len()
    }

    pub fn contains(&self, message: &str) -> bool {
        lock(&self.notices).iter().any(|(m, _)| m == message)
    }

    pub fn last(&self) -> Option<(String, NoticeKind)> {
        lock(&self.notices).last().cloned()
    }

    /// Spinners started and not yet ended.
    pub fn open_spinners(&self) -> i64 {
        *lock(&self.spinner_depth)
    }

    pub fn clear(&self) {
        lock(&self.notices).clear();
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, kind: NoticeKind) {
        lock(&self.notices).push((message.to_string(), kind));
    }

    fn loading(&self, _label: Option<&str>) {
        *lock(&self.spinner_depth) += 1;
    }

    fn loaded(&self) {
        *lock(&self.spinner_depth) -= 1;
    }
}

/// Navigator that tracks the current screen.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
    current: Mutex<Option<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on `route` without recording a transition.
    pub fn starting_at(route: Route) -> Self {
        let navigator = Self::new();
        *lock(&navigator.current) = Some(route);
        navigator
    }

    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }

    pub fn count(&self, route: &Route) -> usize {
        lock(&self.routes).iter().filter(|r| *r == route).count()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: Route) {
        *lock(&self.current) = Some(route.clone());
        lock(&self.routes).push(route);
    }

    fn current(&self) -> Option<Route> {
        lock(&self.current).clone()
    }
}
