//! Hover selection: the single marker currently under the pointer.
//!
//! Invariant: at most one marker in a [`MarkerSet`] is `Hovered`, and it is
//! the one recorded in [`HoverSelection`]. Switching markers always restores
//! the previous one to `Normal` (and reports "no selection") before the new
//! one is highlighted.

use crate::dataset::LocationRecord;
use crate::marker::{Highlight, MarkerId, MarkerSet};

/// Receiver for hover changes, typically a details panel.
pub trait SelectionSink {
    fn selection_changed(&mut self, record: Option<&LocationRecord>);
}

impl<F> SelectionSink for F
where
    F: FnMut(Option<&LocationRecord>),
{
    fn selection_changed(&mut self, record: Option<&LocationRecord>) {
        self(record)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverTransition {
    Unchanged,
    Entered(MarkerId),
    Left(MarkerId),
    Switched { from: MarkerId, to: MarkerId },
}

#[derive(Clone, Debug, Default)]
pub struct HoverSelection {
    hovered: Option<MarkerId>,
}

impl HoverSelection {
    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    /// Move the selection to `hit`, notifying `sink` of every change.
    ///
    /// A hit on the already hovered marker is a no-op. Ids outside `markers`
    /// count as no hit.
    pub fn update(
        &mut self,
        hit: Option<MarkerId>,
        markers: &mut MarkerSet,
        sink: &mut dyn SelectionSink,
    ) -> HoverTransition {
        let hit = hit.filter(|id| markers.get(*id).is_some());
        let previous = self.hovered;
        if previous == hit {
            return HoverTransition::Unchanged;
        }

        if let Some(prev) = previous {
            if let Some(m) = markers.get_mut(prev) {
                m.set_highlight(Highlight::Normal);
            }
            self.hovered = None;
            sink.selection_changed(None);
        }

        if let Some(id) = hit {
            if let Some(m) = markers.get_mut(id) {
                m.set_highlight(Highlight::Hovered);
                self.hovered = Some(id);
                sink.selection_changed(Some(&m.record));
            }
        }

        match (previous, self.hovered) {
            (None, None) => HoverTransition::Unchanged,
            (None, Some(to)) => HoverTransition::Entered(to),
            (Some(from), None) => HoverTransition::Left(from),
            (Some(from), Some(to)) => HoverTransition::Switched { from, to },
        }
    }

    pub fn clear(&mut self, markers: &mut MarkerSet, sink: &mut dyn SelectionSink) -> HoverTransition {
        self.update(None, markers, sink)
    }
}
