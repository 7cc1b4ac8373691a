//! Door-closing animation step logic

/// Offset at which the doors are fully open (off-screen)
pub const DOOR_OPEN_OFFSET: i8 = -55;

/// Offset at which the doors abut in the closed position
pub const DOOR_CLOSED_OFFSET: i8 = 0;

/// Units the doors travel per animation frame
pub const DOOR_SLIDE_STEP: i8 = 5;

/// Final x-position of the left door when closed
pub const DOOR_LEFT_CLOSED_X: i32 = 0;

/// Final x-position of the right door when closed
pub const DOOR_RIGHT_CLOSED_X: i32 = 60;

/// Advance the door offset by one frame toward the closed position.
///
/// Returns the new offset and whether the doors are still moving.
pub fn advance(offset: i8) -> (i8, bool) {
    let next = offset
        .saturating_add(DOOR_SLIDE_STEP)
        .clamp(DOOR_OPEN_OFFSET, DOOR_CLOSED_OFFSET);
    (next, next < DOOR_CLOSED_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_advance_moves_toward_closed() {
        assert_eq!(advance(DOOR_OPEN_OFFSET), (-50, true));
        assert_eq!(advance(-5), (0, false));
        assert_eq!(advance(DOOR_CLOSED_OFFSET), (0, false));
    }

    #[test]
    fn test_full_travel_takes_eleven_frames() {
        let mut offset = DOOR_OPEN_OFFSET;
        let mut frames = 0;
        loop {
            let (next, moving) = advance(offset);
            assert!(next >= offset);
            offset = next;
            frames += 1;
            if !moving {
                break;
            }
        }
        assert_eq!(offset, DOOR_CLOSED_OFFSET);
        assert_eq!(frames, 11);
    }

    proptest! {
        #[test]
        fn advance_is_monotonic_and_terminates(start in DOOR_OPEN_OFFSET..=DOOR_CLOSED_OFFSET) {
            let mut offset = start;
            let mut frames = 0u32;
            loop {
                let (next, moving) = advance(offset);
                prop_assert!(next >= offset);
                prop_assert!((DOOR_OPEN_OFFSET..=DOOR_CLOSED_OFFSET).contains(&next));
                offset = next;
                frames += 1;
                if !moving {
                    break;
                }
            }
            prop_assert_eq!(offset, DOOR_CLOSED_OFFSET);
            prop_assert!(frames <= 11);
        }
    }
}
