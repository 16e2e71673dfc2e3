//! Navigation stack.

use std::sync::Mutex;

use tracing::debug;

use crate::capabilities::{NavigationService, Route};

/// Routes pushed above the root screen. An empty stack shows the root.
#[derive(Debug, Default)]
pub struct NavigationStack {
    routes: Mutex<Vec<Route>>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NavigationService for NavigationStack {
    fn push(&self, route: Route) {
        let mut routes = self.routes.lock().expect("Navigation mutex poisoned");
        debug!(?route, depth = routes.len() + 1, "Navigate");
        routes.push(route);
    }

    fn pop(&self) -> Option<Route> {
        self.routes.lock().expect("Navigation mutex poisoned").pop()
    }

    fn pop_to_root(&self) {
        self.routes.lock().expect("Navigation mutex poisoned").clear();
    }

    fn path(&self) -> Vec<Route> {
        self.routes.lock().expect("Navigation mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let nav = NavigationStack::new();
        assert_eq!(nav.pop(), None);

        nav.push(Route::Journal);
        nav.push(Route::EntryDetail {
            entry_id: "e1".to_string(),
        });
        assert_eq!(nav.path().len(), 2);

        assert_eq!(
            nav.pop(),
            Some(Route::EntryDetail {
                entry_id: "e1".to_string()
            })
        );
        assert_eq!(nav.path(), vec![Route::Journal]);

        nav.push(Route::Settings);
        nav.pop_to_root();
        assert!(nav.path().is_empty());
    }
}
