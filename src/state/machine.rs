use super::{EditMode, EditModeEvent};

/// Transition table. `None` means the event is not defined for `mode`.
pub const fn next_mode(mode: EditMode, event: EditModeEvent) -> Option<EditMode> {
    use EditModeEvent::*;
    match (mode, event) {
        (EditMode::EditArea, OpenAreaEditor) => Some(EditMode::EditArea),
        (EditMode::EditArea, OpenTrackEditor) => Some(EditMode::EditTrack),
        (EditMode::EditArea, StartAddArea) => Some(EditMode::AddArea),
        (EditMode::AddArea, OpenAreaEditor) => Some(EditMode::EditArea),
        (EditMode::AddArea, OpenTrackEditor) => Some(EditMode::EditTrack),
        (EditMode::AddArea, FinishAddArea) => Some(EditMode::EditArea),
        (EditMode::AddArea, CancelAddArea) => Some(EditMode::EditArea),
        (EditMode::EditTrack, OpenAreaEditor) => Some(EditMode::EditArea),
        (EditMode::EditTrack, OpenTrackEditor) => Some(EditMode::EditTrack),
        _ => None,
    }
}

pub const fn can_transition(mode: EditMode, event: EditModeEvent) -> bool {
    next_mode(mode, event).is_some()
}

/// Applies `event`; undefined events keep the current mode.
pub fn transition_edit_mode(mode: EditMode, event: EditModeEvent) -> EditMode {
    match next_mode(mode, event) {
        Some(next) => {
            tracing::debug!(from = mode.label(), to = next.label(), ?event, "edit mode transition");
            next
        }
        None => {
            tracing::debug!(mode = mode.label(), ?event, "edit mode event ignored");
            mode
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [EditMode; 3] = [EditMode::EditArea, EditMode::AddArea, EditMode::EditTrack];

    #[test]
    fn can_transition_tracks_defined_and_undefined_events() {
        assert!(can_transition(EditMode::EditArea, EditModeEvent::StartAddArea));
        assert!(!can_transition(EditMode::EditArea, EditModeEvent::FinishAddArea));
        assert!(!can_transition(EditMode::EditArea, EditModeEvent::CancelAddArea));

        assert!(can_transition(EditMode::AddArea, EditModeEvent::CancelAddArea));
        assert!(!can_transition(EditMode::AddArea, EditModeEvent::StartAddArea));

        assert!(!can_transition(EditMode::EditTrack, EditModeEvent::StartAddArea));
        assert!(!can_transition(EditMode::EditTrack, EditModeEvent::FinishAddArea));
    }

    #[test]
    fn undefined_events_leave_mode_unchanged() {
        for mode in MODES {
            for event in EditModeEvent::ALL {
                if !can_transition(mode, event) {
                    assert_eq!(
                        transition_edit_mode(mode, event),
                        mode,
                        "{mode:?} + {event:?} should be a no-op"
                    );
                }
            }
        }
    }

    #[test]
    fn add_area_round_trip_returns_to_edit_area() {
        let mode = transition_edit_mode(EditMode::EditArea, EditModeEvent::StartAddArea);
        assert_eq!(mode, EditMode::AddArea);
        let mode = transition_edit_mode(mode, EditModeEvent::FinishAddArea);
        assert_eq!(mode, EditMode::EditArea);

        let mode = transition_edit_mode(mode, EditModeEvent::StartAddArea);
        assert_eq!(
            transition_edit_mode(mode, EditModeEvent::CancelAddArea),
            EditMode::EditArea
        );
    }

    #[test]
    fn editor_open_events_reach_expected_modes_from_everywhere() {
        for mode in MODES {
            assert_eq!(
                transition_edit_mode(mode, EditModeEvent::OpenAreaEditor),
                EditMode::EditArea
            );
            assert_eq!(
                transition_edit_mode(mode, EditModeEvent::OpenTrackEditor),
                EditMode::EditTrack
            );
        }
    }
}
