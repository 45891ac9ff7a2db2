//! Drag Interaction Tracker
//!
//! Turns horizontal pointer motion during a drag into a nesting decision.
//! Pure state: no rendering, no listeners.

use crate::item::ItemId;

/// Nesting intent derived from horizontal offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    /// No parent change
    #[default]
    Keep,
    /// Adopt the item above (or its parent) as parent
    Nest,
    /// Promote to top-level
    Unnest,
}

/// Classify an offset against a threshold.
///
/// `Unnest` is only possible for an item that currently has a parent.
pub fn classify(offset_x: f64, threshold: f64, has_parent: bool) -> Classification {
    if offset_x > threshold {
        Classification::Nest
    } else if offset_x < -threshold && has_parent {
        Classification::Unnest
    } else {
        Classification::Keep
    }
}

/// What a finished gesture amounted to
#[derive(Debug, Clone, PartialEq)]
pub struct GestureOutcome {
    pub dragged: ItemId,
    pub offset_x: f64,
    pub classification: Classification,
}

#[derive(Debug, Clone)]
struct DragSession {
    dragged: ItemId,
    had_parent: bool,
    /// Set by the first sample
    baseline_x: Option<f64>,
    offset_x: f64,
    classification: Classification,
}

/// Tracks at most one drag session at a time
#[derive(Debug, Clone)]
pub struct DragTracker {
    threshold: f64,
    session: Option<DragSession>,
}

impl DragTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn dragged(&self) -> Option<&ItemId> {
        self.session.as_ref().map(|s| &s.dragged)
    }

    /// Current live classification (`Keep` when idle)
    pub fn classification(&self) -> Classification {
        self.session
            .as_ref()
            .map(|s| s.classification)
            .unwrap_or_default()
    }

    pub fn offset_x(&self) -> f64 {
        self.session.as_ref().map(|s| s.offset_x).unwrap_or(0.0)
    }

    /// Begin a session; any previous session is discarded
    pub fn on_gesture_start(&mut self, item_id: ItemId, has_parent: bool) {
        self.session = Some(DragSession {
            dragged: item_id,
            had_parent: has_parent,
            baseline_x: None,
            offset_x: 0.0,
            classification: Classification::Keep,
        });
    }

    /// Feed a pointer x coordinate.
    ///
    /// Returns the new classification only when it changed. Samples without
    /// a session and non-finite samples are ignored.
    pub fn on_pointer_sample(&mut self, client_x: f64) -> Option<Classification> {
        if !client_x.is_finite() {
            return None;
        }
        let threshold = self.threshold;
        let session = self.session.as_mut()?;

        let Some(baseline) = session.baseline_x else {
            session.baseline_x = Some(client_x);
            return None;
        };

        session.offset_x = client_x - baseline;
        let next = classify(session.offset_x, threshold, session.had_parent);
        if next == session.classification {
            return None;
        }
        session.classification = next;
        Some(next)
    }

    /// Close the session, returning the final offset and classification.
    ///
    /// State is cleared unconditionally.
    pub fn on_gesture_end(&mut self) -> Option<GestureOutcome> {
        let session = self.session.take()?;
        Some(GestureOutcome {
            classification: classify(session.offset_x, self.threshold, session.had_parent),
            offset_x: session.offset_x,
            dragged: session.dragged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> DragTracker {
        DragTracker::new(30.0)
    }

    #[test]
    fn test_first_sample_sets_baseline() {
        let mut t = tracker();
        t.on_gesture_start("a".into(), false);
        // A large first jump must not classify
        assert_eq!(t.on_pointer_sample(500.0), None);
        assert_eq!(t.offset_x(), 0.0);
        assert_eq!(t.on_pointer_sample(510.0), None);
        assert_eq!(t.offset_x(), 10.0);
    }

    #[test]
    fn test_nest_past_threshold() {
        let mut t = tracker();
        t.on_gesture_start("a".into(), false);
        t.on_pointer_sample(100.0);
        assert_eq!(t.on_pointer_sample(131.0), Some(Classification::Nest));
        // Unchanged classification is not reported again
        assert_eq!(t.on_pointer_sample(150.0), None);

        let outcome = t.on_gesture_end().unwrap();
        assert_eq!(outcome.classification, Classification::Nest);
        assert_eq!(outcome.offset_x, 50.0);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(classify(30.0, 30.0, true), Classification::Keep);
        assert_eq!(classify(-30.0, 30.0, true), Classification::Keep);
        assert_eq!(classify(30.5, 30.0, true), Classification::Nest);
    }

    #[test]
    fn test_unnest_requires_parent() {
        assert_eq!(classify(-80.0, 30.0, false), Classification::Keep);
        assert_eq!(classify(-80.0, 30.0, true), Classification::Unnest);
    }

    #[test]
    fn test_back_to_keep_is_reported() {
        let mut t = tracker();
        t.on_gesture_start("b".into(), true);
        t.on_pointer_sample(100.0);
        assert_eq!(t.on_pointer_sample(40.0), Some(Classification::Unnest));
        assert_eq!(t.on_pointer_sample(95.0), Some(Classification::Keep));
    }

    #[test]
    fn test_ignores_samples_without_session() {
        let mut t = tracker();
        assert_eq!(t.on_pointer_sample(10.0), None);
        assert!(t.on_gesture_end().is_none());
    }

    #[test]
    fn test_ignores_non_finite_samples() {
        let mut t = tracker();
        t.on_gesture_start("a".into(), false);
        assert_eq!(t.on_pointer_sample(f64::NAN), None);
        t.on_pointer_sample(10.0);
        assert_eq!(t.on_pointer_sample(f64::INFINITY), None);
        assert_eq!(t.offset_x(), 0.0);
    }

    #[test]
    fn test_end_clears_session() {
        let mut t = tracker();
        t.on_gesture_start("a".into(), false);
        t.on_pointer_sample(0.0);
        t.on_pointer_sample(90.0);
        t.on_gesture_end();
        assert!(!t.is_active());
        assert_eq!(t.classification(), Classification::Keep);
        assert_eq!(t.offset_x(), 0.0);
    }
}
