//! Playback controller: current frame, signed step size, and the commands
//! that move them.

/// Step magnitudes selectable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepMagnitude {
    One,
    Five,
    Ten,
    Twenty,
    Thirty,
}

impl StepMagnitude {
    pub const ALL: [StepMagnitude; 5] = [
        StepMagnitude::One,
        StepMagnitude::Five,
        StepMagnitude::Ten,
        StepMagnitude::Twenty,
        StepMagnitude::Thirty,
    ];

    /// Frames per step.
    pub fn frames(self) -> i64 {
        match self {
            StepMagnitude::One => 1,
            StepMagnitude::Five => 5,
            StepMagnitude::Ten => 10,
            StepMagnitude::Twenty => 20,
            StepMagnitude::Thirty => 30,
        }
    }

    /// Magnitude for a frame count, if it is one of the selectable ones.
    pub fn from_frames(frames: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.frames() == frames)
    }
}

/// Discrete input commands understood by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackCommand {
    /// Change step magnitude, keeping direction.
    SetStepMagnitude(StepMagnitude),
    /// Flip step direction.
    ReverseDirection,
    /// Move the current frame by the signed step.
    Advance,
    /// End playback.
    Quit,
}

/// Result of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Idle,
    /// The signed step size changed.
    StepChanged(i64),
    /// The current frame moved.
    FrameChanged { from: usize, to: usize },
    /// Playback should end.
    Quit,
}

/// Playback position within a frame table of fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackState {
    current_frame: usize,
    step_size: i64,
    last_frame: usize,
}

impl PlaybackState {
    /// Starts at frame 0 with a zero step.
    pub fn new(last_frame: usize) -> Self {
        Self::with_step(last_frame, 0)
    }

    /// Starts at frame 0 with the given signed step.
    pub fn with_step(last_frame: usize, step_size: i64) -> Self {
        Self {
            current_frame: 0,
            step_size,
            last_frame,
        }
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn step_size(&self) -> i64 {
        self.step_size
    }

    pub fn last_frame(&self) -> usize {
        self.last_frame
    }

    pub fn at_end(&self) -> bool {
        self.current_frame == self.last_frame
    }

    pub fn apply(&mut self, command: PlaybackCommand) -> Transition {
        match command {
            PlaybackCommand::SetStepMagnitude(magnitude) => {
                let sign = if self.step_size < 0 { -1 } else { 1 };
                self.set_step(sign * magnitude.frames())
            }
            PlaybackCommand::ReverseDirection => self.set_step(-self.step_size),
            PlaybackCommand::Advance => self.advance(),
            PlaybackCommand::Quit => Transition::Quit,
        }
    }

    fn set_step(&mut self, step_size: i64) -> Transition {
        if step_size == self.step_size {
            return Transition::Idle;
        }
        self.step_size = step_size;
        Transition::StepChanged(step_size)
    }

    fn advance(&mut self) -> Transition {
        let from = self.current_frame;

        // The last frame is terminal in both directions.
        if self.step_size == 0 || self.at_end() {
            return Transition::Idle;
        }

        let target = from as i64 + self.step_size;
        self.current_frame = target.clamp(0, self.last_frame as i64) as usize;
        debug_assert!(
            self.current_frame <= self.last_frame,
            "frame index {} out of range 0..={}",
            self.current_frame,
            self.last_frame
        );

        if self.current_frame == from {
            Transition::Idle
        } else {
            Transition::FrameChanged {
                from,
                to: self.current_frame,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn set(m: StepMagnitude) -> PlaybackCommand {
        PlaybackCommand::SetStepMagnitude(m)
    }

    #[test]
    fn test_initial_state() {
        let state = PlaybackState::new(9);
        assert_eq!(state.current_frame(), 0);
        assert_eq!(state.step_size(), 0);
        assert_eq!(state.last_frame(), 9);
    }

    #[test]
    fn test_advance_with_zero_step_is_noop() {
        let mut state = PlaybackState::new(9);
        assert_eq!(state.apply(PlaybackCommand::Advance), Transition::Idle);
        assert_eq!(state.current_frame(), 0);
    }

    #[test]
    fn test_set_magnitude_from_zero_is_forward() {
        let mut state = PlaybackState::new(9);
        assert_eq!(state.apply(set(StepMagnitude::Five)), Transition::StepChanged(5));
    }

    #[test]
    fn test_set_magnitude_preserves_direction() {
        let mut state = PlaybackState::new(99);
        state.apply(set(StepMagnitude::Ten));
        state.apply(PlaybackCommand::ReverseDirection);
        assert_eq!(state.step_size(), -10);

        state.apply(set(StepMagnitude::Thirty));
        assert_eq!(state.step_size(), -30);
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        for magnitude in StepMagnitude::ALL {
            let mut state = PlaybackState::new(99);
            state.apply(set(magnitude));
            let before = state.step_size();
            state.apply(PlaybackCommand::ReverseDirection);
            state.apply(PlaybackCommand::ReverseDirection);
            assert_eq!(state.step_size(), before);
        }
    }

    #[test]
    fn test_reverse_zero_step_is_idle() {
        let mut state = PlaybackState::new(9);
        assert_eq!(state.apply(PlaybackCommand::ReverseDirection), Transition::Idle);
    }

    #[test]
    fn test_advance_moves_by_step() {
        let mut state = PlaybackState::new(99);
        state.apply(set(StepMagnitude::Twenty));
        assert_eq!(
            state.apply(PlaybackCommand::Advance),
            Transition::FrameChanged { from: 0, to: 20 }
        );
    }

    #[test]
    fn test_forward_overshoot_clamps_to_last_frame() {
        let mut state = PlaybackState::new(12);
        state.apply(set(StepMagnitude::Ten));
        state.apply(PlaybackCommand::Advance);
        assert_eq!(
            state.apply(PlaybackCommand::Advance),
            Transition::FrameChanged { from: 10, to: 12 }
        );
        assert_eq!(state.apply(PlaybackCommand::Advance), Transition::Idle);
        assert!(state.at_end());
    }

    #[test]
    fn test_backward_overshoot_clamps_to_first_frame() {
        let mut state = PlaybackState::new(50);
        state.apply(set(StepMagnitude::Five));
        state.apply(PlaybackCommand::Advance);
        state.apply(set(StepMagnitude::Thirty));
        state.apply(PlaybackCommand::ReverseDirection);

        assert_eq!(
            state.apply(PlaybackCommand::Advance),
            Transition::FrameChanged { from: 5, to: 0 }
        );
        assert_eq!(state.apply(PlaybackCommand::Advance), Transition::Idle);
    }

    #[test]
    fn test_last_frame_is_terminal_after_reverse() {
        let mut state = PlaybackState::new(3);
        state.apply(set(StepMagnitude::Thirty));
        state.apply(PlaybackCommand::Advance);
        assert!(state.at_end());

        state.apply(PlaybackCommand::ReverseDirection);
        assert_eq!(state.step_size(), -30);
        assert_eq!(state.apply(PlaybackCommand::Advance), Transition::Idle);
        assert_eq!(state.current_frame(), 3);

        state.apply(set(StepMagnitude::One));
        assert_eq!(state.apply(PlaybackCommand::Advance), Transition::Idle);
        assert_eq!(state.current_frame(), 3);
    }

    #[test]
    fn test_single_frame_log_never_moves() {
        let mut state = PlaybackState::new(0);
        state.apply(set(StepMagnitude::One));
        assert_eq!(state.apply(PlaybackCommand::Advance), Transition::Idle);
        state.apply(PlaybackCommand::ReverseDirection);
        assert_eq!(state.apply(PlaybackCommand::Advance), Transition::Idle);
    }

    #[test]
    fn test_quit() {
        let mut state = PlaybackState::new(3);
        assert_eq!(state.apply(PlaybackCommand::Quit), Transition::Quit);
    }

    #[test]
    fn test_repeated_advance_converges_and_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(2024);

        for _ in 0..300 {
            let last = rng.gen_range(0..200usize);
            let magnitude = StepMagnitude::ALL[rng.gen_range(0..5)];
            let backward = rng.gen_bool(0.5);

            let mut state = PlaybackState::new(last);
            // Random starting frame.
            state.apply(set(StepMagnitude::One));
            for _ in 0..rng.gen_range(0..=last) {
                state.apply(PlaybackCommand::Advance);
            }
            let start = state.current_frame();

            state.apply(set(magnitude));
            if backward {
                state.apply(PlaybackCommand::ReverseDirection);
            }

            for _ in 0..=last {
                state.apply(PlaybackCommand::Advance);
                assert!(state.current_frame() <= last);
            }

            // Reaching the last frame ends playback in either direction.
            let expected = if backward && start < last { 0 } else { last };
            assert_eq!(state.current_frame(), expected);
            assert_eq!(state.apply(PlaybackCommand::Advance), Transition::Idle);
        }
    }

    #[test]
    fn test_step_magnitude_from_frames() {
        assert_eq!(StepMagnitude::from_frames(20), Some(StepMagnitude::Twenty));
        assert_eq!(StepMagnitude::from_frames(7), None);
    }
}
