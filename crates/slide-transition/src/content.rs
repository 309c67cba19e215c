#![forbid(unsafe_code)]

//! Presented content: a root view and a live preferred size.

use slide_core::{ContentContainer, Size, ViewId};
use slide_runtime::{Observable, Subscription};

/// Content handed to the host for presentation.
///
/// The preferred content size is an [`Observable`] so the host can watch it
/// and forward changes to the presentation controller while presented.
#[derive(Debug, Clone)]
pub struct PresentedContent {
    view: ViewId,
    preferred_size: Observable<Size>,
}

impl PresentedContent {
    pub fn new(view: ViewId, preferred_size: Size) -> Self {
        Self {
            view,
            preferred_size: Observable::new(preferred_size),
        }
    }

    /// Update the preferred size; subscribers run if it changed.
    pub fn set_preferred_content_size(&self, size: Size) {
        self.preferred_size.set(size);
    }

    /// Watch preferred-size changes.
    pub fn on_preferred_size_change(&self, callback: impl Fn(&Size) + 'static) -> Subscription {
        self.preferred_size.subscribe(callback)
    }

    pub fn preferred_size(&self) -> &Observable<Size> {
        &self.preferred_size
    }
}

impl ContentContainer for PresentedContent {
    fn view(&self) -> ViewId {
        self.view
    }

    fn preferred_content_size(&self) -> Size {
        self.preferred_size.get()
    }
}
