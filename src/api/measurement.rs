use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ChartResult;

/// Measured content box of the chart container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentBox {
    pub width: f64,
    pub height: f64,
}

impl ContentBox {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

pub type ResizeCallback = Box<dyn FnMut(ContentBox)>;

/// Host-side resize observation of the chart container.
///
/// `observe` registers the callback invoked on every content-box change;
/// `disconnect` releases it. An `Err` from `observe` means observation is
/// unsupported and the chart keeps its last known width.
pub trait ResizeObserver {
    fn observe(&mut self, callback: ResizeCallback) -> ChartResult<()>;
    fn disconnect(&mut self);
}

/// Last measured content box shared with the active observer callback.
#[derive(Debug, Clone, Default)]
pub(super) struct MeasuredSize(Rc<Cell<ContentBox>>);

impl MeasuredSize {
    pub(super) fn get(&self) -> ContentBox {
        self.0.get()
    }

    /// Stores `content_box`; unusable measurements keep the previous value.
    pub(super) fn set(&self, content_box: ContentBox) -> bool {
        if !content_box.is_usable() {
            warn!(
                width = content_box.width,
                height = content_box.height,
                "ignoring unusable content box measurement"
            );
            return false;
        }
        self.0.set(content_box);
        true
    }

    pub(super) fn callback(&self) -> ResizeCallback {
        let measured = self.clone();
        Box::new(move |content_box| {
            if measured.set(content_box) {
                debug!(
                    width = content_box.width,
                    height = content_box.height,
                    "chart container resized"
                );
            }
        })
    }
}

/// Scoped resize observation; dropping it disconnects the observer.
pub struct ResizeSubscription<O: ResizeObserver> {
    observer: Option<O>,
}

impl<O: ResizeObserver> ResizeSubscription<O> {
    pub(super) fn establish(mut observer: O, measured: &MeasuredSize) -> Self {
        match observer.observe(measured.callback()) {
            Ok(()) => Self {
                observer: Some(observer),
            },
            Err(err) => {
                warn!(
                    error = %err,
                    "resize observation unavailable; keeping last known width"
                );
                Self { observer: None }
            }
        }
    }

    /// `false` when the observer refused to observe.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.observer.is_some()
    }

    pub fn observer_mut(&mut self) -> Option<&mut O> {
        self.observer.as_mut()
    }
}

impl<O: ResizeObserver> Drop for ResizeSubscription<O> {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer.disconnect();
        }
    }
}

/// Observer driven explicitly by the host (or by tests).
#[derive(Default)]
pub struct ManualResizeObserver {
    callback: Option<ResizeCallback>,
}

impl ManualResizeObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.callback.is_some()
    }

    /// Delivers a content-box change; ignored while disconnected.
    pub fn emit(&mut self, content_box: ContentBox) {
        if let Some(callback) = self.callback.as_mut() {
            callback(content_box);
        }
    }
}

impl std::fmt::Debug for ManualResizeObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualResizeObserver")
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl ResizeObserver for ManualResizeObserver {
    fn observe(&mut self, callback: ResizeCallback) -> ChartResult<()> {
        self.callback = Some(callback);
        Ok(())
    }

    fn disconnect(&mut self) {
        self.callback = None;
    }
}
