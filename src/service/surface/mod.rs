pub mod terminal;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Notice, Res, Void};

// Traits.

/// Generic interactive form surface that front ends must implement.
///
/// The session loop only needs a few things from a front end: read a value for a
/// labelled field, render a notice, and offer a pick list.  Anything that can do
/// that (a terminal, a web form, a test script) can drive a support session.
#[async_trait]
pub trait GenericSurface: Send + Sync + 'static {
    /// Show the title banner at session start.
    async fn show_banner(&self) -> Void;

    /// Read one value for a labelled field.
    ///
    /// `default` is the previously entered value, if any; front ends may prefill it.
    /// Returns `None` once the user has closed the session (e.g., end of input).
    async fn read_field(&self, label: &str, default: Option<&str>) -> Res<Option<String>>;

    /// Render a notice as success, info, warning, or error.
    async fn render(&self, notice: &Notice) -> Void;

    /// Offer a list of options and return the index of the chosen one.
    ///
    /// Returns `None` if the user backs out without choosing.
    async fn choose(&self, label: &str, options: &[&str]) -> Res<Option<usize>>;
}

// Structs.

/// Form surface for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Surface {
    inner: Arc<dyn GenericSurface>,
}

impl Deref for Surface {
    type Target = dyn GenericSurface;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl Surface {
    pub fn new(inner: Arc<dyn GenericSurface>) -> Self {
        Self { inner }
    }
}
