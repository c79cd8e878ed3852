use std::borrow::Cow;

use crate::project::{AreaCollection, NtracsTrack};

pub fn create_empty_track() -> NtracsTrack {
    NtracsTrack::default()
}

pub fn create_track_with_areas(areas: Vec<AreaCollection>) -> NtracsTrack {
    NtracsTrack { areas }
}

/// Moves the entry at `from_index` to `to_index`.
///
/// Out-of-range or equal indices return `Cow::Borrowed(entries)`.
pub fn move_track_area_entry(
    entries: &[AreaCollection],
    from_index: usize,
    to_index: usize,
) -> Cow<'_, [AreaCollection]> {
    if from_index >= entries.len() || to_index >= entries.len() || from_index == to_index {
        return Cow::Borrowed(entries);
    }

    let mut next = entries.to_vec();
    let target = next.remove(from_index);
    next.insert(to_index, target);
    Cow::Owned(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<AreaCollection> {
        names.iter().copied().map(AreaCollection::new).collect()
    }

    fn names(entries: &[AreaCollection]) -> Vec<&str> {
        entries.iter().map(|entry| entry.area_name.as_str()).collect()
    }

    #[test]
    fn move_track_area_entry_relocates_forward_and_backward() {
        let list = entries(&["a", "b", "c", "d"]);

        let forward = move_track_area_entry(&list, 0, 2);
        assert_eq!(names(&forward), vec!["b", "c", "a", "d"]);

        let backward = move_track_area_entry(&list, 3, 1);
        assert_eq!(names(&backward), vec!["a", "d", "b", "c"]);

        assert_eq!(names(&list), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn move_to_same_index_returns_identical_slice() {
        let list = entries(&["a", "b", "c"]);
        let moved = move_track_area_entry(&list, 1, 1);

        assert!(matches!(moved, Cow::Borrowed(_)));
        assert!(std::ptr::eq(moved.as_ptr(), list.as_ptr()));
    }

    #[test]
    fn move_out_of_range_returns_identical_slice() {
        let list = entries(&["a", "b"]);
        assert!(matches!(move_track_area_entry(&list, 2, 0), Cow::Borrowed(_)));
        assert!(matches!(move_track_area_entry(&list, 0, 5), Cow::Borrowed(_)));
        assert!(matches!(move_track_area_entry(&[], 0, 0), Cow::Borrowed(_)));
    }

    #[test]
    fn create_track_with_areas_keeps_order() {
        let track = create_track_with_areas(entries(&["z", "a"]));
        assert_eq!(names(&track.areas), vec!["z", "a"]);
        assert!(create_empty_track().areas.is_empty());
    }
}
