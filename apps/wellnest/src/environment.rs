//! # Environment
//!
//! The value screens receive to reach their services. Created once at the
//! top of the app with the production container; tests and previews derive
//! child environments that point somewhere else.
//!
//! ```text
//!   root env ─────────────► AppContainer
//!      │
//!      ├── with_container(mock_a) ──► MockContainer A   (child 1)
//!      │
//!      └── with_container(mock_b) ──► MockContainer B   (child 2)
//!              │
//!              └── without_override() ──► AppContainer
//! ```
//!
//! Children are independent values: deriving one never changes its parent
//! or its siblings.

use std::fmt;
use std::sync::Arc;

use crate::container::ServiceContainer;

#[derive(Clone)]
pub struct Environment {
    root: Arc<dyn ServiceContainer>,
    scoped: Option<Arc<dyn ServiceContainer>>,
}

impl Environment {
    pub fn new(root: Arc<dyn ServiceContainer>) -> Self {
        Environment { root, scoped: None }
    }

    /// The override if one is set, otherwise the root container.
    pub fn container(&self) -> Arc<dyn ServiceContainer> {
        Arc::clone(self.scoped.as_ref().unwrap_or(&self.root))
    }

    /// A child environment resolving to `container`.
    pub fn with_container(&self, container: Arc<dyn ServiceContainer>) -> Self {
        Environment {
            root: Arc::clone(&self.root),
            scoped: Some(container),
        }
    }

    /// A child environment resolving to the root container again.
    pub fn without_override(&self) -> Self {
        Environment::new(Arc::clone(&self.root))
    }

    pub fn is_overridden(&self) -> bool {
        self.scoped.is_some()
    }

    pub fn root(&self) -> Arc<dyn ServiceContainer> {
        Arc::clone(&self.root)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("overridden", &self.is_overridden())
            .finish()
    }
}
