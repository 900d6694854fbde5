use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Responsive fallback is capped at this width.
pub const MAX_FALLBACK_WIDTH: f64 = 600.0;
/// Margin subtracted from the window width before the container reports.
pub const WINDOW_MARGIN: f64 = 40.0;

/// Width used before any container measurement arrives.
pub fn fallback_width(window_width: f64) -> f64 {
    (window_width - WINDOW_MARGIN).min(MAX_FALLBACK_WIDTH).max(0.0)
}

/// An explicit width wins verbatim, then the measured container width,
/// then the capped window fallback. Never NaN.
pub fn resolve_width(explicit: Option<f64>, measured: Option<f64>, window_width: f64) -> f64 {
    explicit
        .filter(|w| w.is_finite())
        .or(measured.filter(|w| w.is_finite() && *w > 0.0))
        .unwrap_or_else(|| fallback_width(window_width))
}

type Listener = Box<dyn Fn(f64) + Send + Sync>;

struct Inner {
    width: RwLock<Option<f64>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: Mutex<u64>,
}

/// A shared, observable container width. The embedder publishes resize
/// measurements; each mounted diagram subscribes and lets the guard's
/// `Drop` deregister it, so unmounting can never leak a listener.
#[derive(Clone)]
pub struct WidthSource {
    inner: Arc<Inner>,
}

impl WidthSource {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                width: RwLock::new(None),
                listeners: Mutex::new(Vec::new()),
                next_id: Mutex::new(0),
            }),
        }
    }

    pub fn measured(&self) -> Option<f64> {
        *self.inner.width.read()
    }

    pub fn publish(&self, width: f64) {
        if !width.is_finite() {
            log::warn!("ignoring non-finite width measurement");
            return;
        }
        *self.inner.width.write() = Some(width);
        for (_, listener) in self.inner.listeners.lock().iter() {
            listener(width);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(f64) + Send + Sync + 'static) -> WidthSubscription {
        let id = {
            let mut next = self.inner.next_id.lock();
            *next += 1;
            *next
        };
        self.inner.listeners.lock().push((id, Box::new(listener)));
        WidthSubscription {
            inner: Arc::clone(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

impl Default for WidthSource {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII handle for one subscription; dropping it removes the listener.
pub struct WidthSubscription {
    inner: Arc<Inner>,
    id: u64,
}

impl Drop for WidthSubscription {
    fn drop(&mut self) {
        self.inner.listeners.lock().retain(|(id, _)| *id != self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn explicit_width_wins_verbatim() {
        assert_eq!(resolve_width(Some(432.0), Some(900.0), 1280.0), 432.0);
    }

    #[test]
    fn measured_width_beats_the_fallback() {
        assert_eq!(resolve_width(None, Some(512.0), 1280.0), 512.0);
    }

    #[test]
    fn fallback_is_window_minus_margin_capped() {
        assert_eq!(resolve_width(None, None, 1280.0), 600.0);
        assert_eq!(resolve_width(None, None, 500.0), 460.0);
        // tiny windows never go negative
        assert_eq!(resolve_width(None, None, 10.0), 0.0);
    }

    #[test]
    fn non_finite_inputs_never_leak_through() {
        assert_eq!(resolve_width(Some(f64::NAN), None, 1280.0), 600.0);
        assert_eq!(resolve_width(None, Some(f64::INFINITY), 1280.0), 600.0);
        assert_eq!(resolve_width(None, Some(-5.0), 1280.0), 600.0);
    }

    #[test]
    fn subscriptions_deliver_and_deregister_on_drop() {
        let source = WidthSource::new();
        let seen = Arc::new(AtomicU64::new(0));

        let sub = {
            let seen = Arc::clone(&seen);
            source.subscribe(move |w| {
                seen.store(w as u64, Ordering::SeqCst);
            })
        };
        assert_eq!(source.listener_count(), 1);

        source.publish(640.0);
        assert_eq!(seen.load(Ordering::SeqCst), 640);
        assert_eq!(source.measured(), Some(640.0));

        drop(sub);
        assert_eq!(source.listener_count(), 0);

        source.publish(720.0);
        assert_eq!(seen.load(Ordering::SeqCst), 640);
    }

    #[test]
    fn non_finite_measurements_are_ignored() {
        let source = WidthSource::new();
        source.publish(f64::NAN);
        assert_eq!(source.measured(), None);
    }
}
