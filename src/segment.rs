//! Event segmentation by time gaps
//!
//! Photos are sorted newest-first and split into events wherever the
//! gap between two consecutive timestamps exceeds the configured
//! threshold. Event ids are dense and start at 1, so event 1 is always
//! the most recent one.

use crate::collect::PhotoRecord;
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use tracing::debug;

/// A photo together with the event it was assigned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedRecord {
    /// The underlying photo record
    pub photo: PhotoRecord,
    /// Event id, 1 is the most recent event
    pub event_id: u32,
}

/// The result of segmenting a photo collection into events.
///
/// Records are kept sorted newest-first, which makes every event a
/// contiguous run and allows event lookups to return slices.
#[derive(Debug, Clone)]
pub struct EventTimeline {
    records: Vec<SegmentedRecord>,
    max_event_id: u32,
}

/// Split `records` into events separated by more than `gap_hours`.
///
/// The sort is stable, so photos sharing a timestamp keep their input
/// order. Ordering and gaps compare the underlying instants, so a
/// clock shift between two shots can neither reorder them nor stretch
/// the gap. Each gap is measured against the directly preceding photo,
/// not against the start of the current event, so a long chain of
/// small gaps still forms a single event. A gap of exactly
/// `gap_hours` does not split.
pub fn segment(mut records: Vec<PhotoRecord>, gap_hours: f64) -> Result<EventTimeline> {
    if records.is_empty() {
        return Err(Error::EmptyInput);
    }

    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut segmented = Vec::with_capacity(records.len());
    let mut current_event_id: u32 = 1;
    let mut previous = records[0].timestamp;

    for photo in records {
        let gap = hours_between(previous, photo.timestamp);
        if gap > gap_hours {
            current_event_id += 1;
            debug!(
                event = current_event_id,
                gap_hours = gap,
                "Gap exceeded threshold, starting new event"
            );
        }
        previous = photo.timestamp;
        segmented.push(SegmentedRecord {
            photo,
            event_id: current_event_id,
        });
    }

    debug!(
        photos = segmented.len(),
        events = current_event_id,
        "Segmentation finished"
    );
    Ok(EventTimeline {
        records: segmented,
        max_event_id: current_event_id,
    })
}

/// Fractional hours from `earlier` up to `later`
fn hours_between(later: DateTime<Local>, earlier: DateTime<Local>) -> f64 {
    later.signed_duration_since(earlier).num_milliseconds() as f64 / 3_600_000.0
}

impl EventTimeline {
    /// All records, newest-first
    pub fn records(&self) -> &[SegmentedRecord] {
        &self.records
    }

    /// The highest event id, equal to the number of events
    pub fn max_event_id(&self) -> u32 {
        self.max_event_id
    }

    /// Number of photos across all events
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the timeline holds no photos
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The photos of event `event_id` as a contiguous slice,
    /// newest-first. Unknown ids yield an empty slice.
    pub fn event_group(&self, event_id: u32) -> &[SegmentedRecord] {
        let start = self.records.partition_point(|r| r.event_id < event_id);
        let end = self.records.partition_point(|r| r.event_id <= event_id);
        &self.records[start..end]
    }

    /// The most recent event
    pub fn latest(&self) -> &[SegmentedRecord] {
        self.event_group(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use std::path::PathBuf;

    fn ts(hour: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, hour, min, 0).unwrap()
    }

    fn record(name: &str, timestamp: DateTime<Local>) -> PhotoRecord {
        PhotoRecord {
            path: PathBuf::from(name),
            timestamp,
        }
    }

    #[test]
    fn test_segment_assigns_dense_event_ids() {
        let records = vec![
            record("a", ts(10, 0)),
            record("b", ts(9, 50)),
            record("c", ts(8, 0)),
            record("d", ts(7, 55)),
            record("e", ts(6, 0)),
        ];

        let timeline = segment(records, 1.0).unwrap();
        let ids: Vec<u32> = timeline.records().iter().map(|r| r.event_id).collect();

        assert_eq!(ids, vec![1, 1, 2, 2, 3]);
        assert_eq!(timeline.max_event_id(), 3);
        assert_eq!(timeline.len(), 5);
    }

    #[test]
    fn test_segment_sorts_newest_first() {
        let records = vec![
            record("old", ts(6, 0)),
            record("new", ts(10, 0)),
            record("mid", ts(8, 0)),
        ];

        let timeline = segment(records, 1.0).unwrap();
        let names: Vec<&str> = timeline
            .records()
            .iter()
            .map(|r| r.photo.path.to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_exact_threshold_gap_does_not_split() {
        let records = vec![record("a", ts(10, 0)), record("b", ts(9, 0))];

        let timeline = segment(records, 1.0).unwrap();

        assert_eq!(timeline.max_event_id(), 1);
    }

    #[test]
    fn test_gap_one_second_over_threshold_splits() {
        let later = ts(10, 0);
        let earlier = later - chrono::Duration::seconds(3601);
        let records = vec![record("a", later), record("b", earlier)];

        let timeline = segment(records, 1.0).unwrap();

        assert_eq!(timeline.max_event_id(), 2);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let records = vec![
            record("first", ts(9, 0)),
            record("second", ts(9, 0)),
            record("third", ts(9, 0)),
        ];

        let timeline = segment(records, 1.0).unwrap();
        let names: Vec<&str> = timeline
            .records()
            .iter()
            .map(|r| r.photo.path.to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["first", "second", "third"]);
        assert_eq!(timeline.max_event_id(), 1);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let result = segment(Vec::new(), 1.0);

        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_single_photo_is_event_one() {
        let timeline = segment(vec![record("only", ts(12, 0))], 1.0).unwrap();

        assert_eq!(timeline.max_event_id(), 1);
        assert_eq!(timeline.latest().len(), 1);
    }

    #[test]
    fn test_gap_is_measured_against_previous_photo() {
        // 40-minute steps never exceed one hour even though the event
        // spans more than two hours in total.
        let records = vec![
            record("a", ts(12, 0)),
            record("b", ts(11, 20)),
            record("c", ts(10, 40)),
            record("d", ts(10, 0)),
        ];

        let timeline = segment(records, 1.0).unwrap();

        assert_eq!(timeline.max_event_id(), 1);
    }

    #[test]
    fn test_fall_back_hour_keeps_real_photo_order() {
        // US Eastern 2024-11-03: clocks fall back 02:00 EDT -> 01:00 EST,
        // so 01:03 EST is five real minutes after 01:58 EDT even though
        // its wall-clock reading is earlier.
        let edt = FixedOffset::west_opt(4 * 3600).unwrap();
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let before_shift = edt
            .with_ymd_and_hms(2024, 11, 3, 1, 58, 0)
            .unwrap()
            .with_timezone(&Local);
        let after_shift = est
            .with_ymd_and_hms(2024, 11, 3, 1, 3, 0)
            .unwrap()
            .with_timezone(&Local);

        let records = vec![
            record("before_shift", before_shift),
            record("after_shift", after_shift),
        ];

        let timeline = segment(records, 1.0).unwrap();
        let names: Vec<&str> = timeline
            .records()
            .iter()
            .map(|r| r.photo.path.to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["after_shift", "before_shift"]);
        assert_eq!(timeline.max_event_id(), 1);
    }

    #[test]
    fn test_spring_forward_hour_does_not_split_an_event() {
        // US Eastern 2024-03-10: 01:58 EST and 03:03 EDT are five real
        // minutes apart despite the wall clock jumping an hour.
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let edt = FixedOffset::west_opt(4 * 3600).unwrap();
        let before_shift = est
            .with_ymd_and_hms(2024, 3, 10, 1, 58, 0)
            .unwrap()
            .with_timezone(&Local);
        let after_shift = edt
            .with_ymd_and_hms(2024, 3, 10, 3, 3, 0)
            .unwrap()
            .with_timezone(&Local);

        let records = vec![
            record("before_shift", before_shift),
            record("after_shift", after_shift),
        ];

        let timeline = segment(records, 1.0).unwrap();

        assert_eq!(timeline.max_event_id(), 1);
    }

    #[test]
    fn test_zero_threshold_splits_every_positive_gap() {
        let records = vec![
            record("a", ts(10, 0)),
            record("b", ts(9, 59)),
            record("c", ts(9, 58)),
        ];

        let timeline = segment(records, 0.0).unwrap();

        assert_eq!(timeline.max_event_id(), 3);
    }

    #[test]
    fn test_event_group_returns_contiguous_slice() {
        let records = vec![
            record("a", ts(10, 0)),
            record("b", ts(9, 50)),
            record("c", ts(8, 0)),
            record("d", ts(7, 55)),
            record("e", ts(6, 0)),
        ];

        let timeline = segment(records, 1.0).unwrap();
        let group = timeline.event_group(2);
        let names: Vec<&str> = group
            .iter()
            .map(|r| r.photo.path.to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["c", "d"]);
        assert_eq!(timeline.latest().len(), 2);
        assert_eq!(timeline.event_group(3).len(), 1);
    }

    #[test]
    fn test_event_group_unknown_id_is_empty() {
        let timeline = segment(vec![record("a", ts(10, 0))], 1.0).unwrap();

        assert!(timeline.event_group(0).is_empty());
        assert!(timeline.event_group(99).is_empty());
    }

    #[test]
    fn test_event_ids_are_dense_and_cover_all_photos() {
        let records = vec![
            record("a", ts(23, 0)),
            record("b", ts(20, 0)),
            record("c", ts(15, 30)),
            record("d", ts(15, 0)),
            record("e", ts(3, 0)),
        ];

        let timeline = segment(records, 1.0).unwrap();

        let mut seen = 0;
        for id in 1..=timeline.max_event_id() {
            let group = timeline.event_group(id);
            assert!(!group.is_empty());
            seen += group.len();
        }
        assert_eq!(seen, timeline.len());

        for pair in timeline.records().windows(2) {
            assert!(pair[1].event_id >= pair[0].event_id);
            assert!(pair[1].event_id - pair[0].event_id <= 1);
        }
    }

    #[test]
    fn test_segmentation_is_stable_over_input_order() {
        let records = vec![
            record("a", ts(10, 0)),
            record("b", ts(9, 50)),
            record("c", ts(8, 0)),
        ];
        let mut shuffled = records.clone();
        shuffled.reverse();

        let timeline = segment(records, 1.0).unwrap();
        let timeline_shuffled = segment(shuffled, 1.0).unwrap();

        let ids: Vec<(String, u32)> = timeline
            .records()
            .iter()
            .map(|r| (r.photo.path.display().to_string(), r.event_id))
            .collect();
        let ids_shuffled: Vec<(String, u32)> = timeline_shuffled
            .records()
            .iter()
            .map(|r| (r.photo.path.display().to_string(), r.event_id))
            .collect();

        assert_eq!(ids, ids_shuffled);
    }
}
