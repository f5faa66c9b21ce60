//! Event summaries for listing output

use crate::segment::EventTimeline;
use chrono::{DateTime, Local};

/// Timestamp format for event span listings
const SPAN_FORMAT: &str = "%m/%d %H:%M";

/// Per-event statistics derived from a timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    /// Event id, 1 is the most recent event
    pub event_id: u32,
    /// Number of photos in the event
    pub count: usize,
    /// Oldest photo timestamp
    pub oldest: DateTime<Local>,
    /// Newest photo timestamp
    pub newest: DateTime<Local>,
}

impl EventSummary {
    /// Summarize one event, or None when the event has no photos
    pub fn for_event(timeline: &EventTimeline, event_id: u32) -> Option<Self> {
        let group = timeline.event_group(event_id);
        let newest = group.first()?.photo.timestamp;
        let oldest = group.last()?.photo.timestamp;

        Some(EventSummary {
            event_id,
            count: group.len(),
            oldest,
            newest,
        })
    }

    /// The event's time range, oldest first
    pub fn span(&self) -> String {
        format!(
            "{} - {}",
            self.oldest.format(SPAN_FORMAT),
            self.newest.format(SPAN_FORMAT)
        )
    }

    /// The photo count with its noun, e.g. "1 photo" or "12 photos"
    pub fn count_label(&self) -> String {
        if self.count == 1 {
            format!("{} photo", self.count)
        } else {
            format!("{} photos", self.count)
        }
    }
}
