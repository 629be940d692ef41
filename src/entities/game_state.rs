/// Coarse mode of the whole game. Only `Playing` runs the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Level banner shown, formation not spawned yet
    LevelIntro,
    Playing,
    Paused,
    LevelComplete,
    GameOver,
    /// Player left voluntarily
    Quit,
}

impl GameState {
    /// Waiting on the player with the simulation stopped; quitting is allowed
    pub fn is_waiting(&self) -> bool {
        matches!(
            self,
            GameState::Paused | GameState::LevelIntro | GameState::LevelComplete
        )
    }

    /// States that only an explicit restart can leave
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameState::GameOver | GameState::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiting_and_terminal_states_are_disjoint() {
        let all = [
            GameState::LevelIntro,
            GameState::Playing,
            GameState::Paused,
            GameState::LevelComplete,
            GameState::GameOver,
            GameState::Quit,
        ];
        for state in all {
            assert!(!(state.is_waiting() && state.is_terminal()));
        }
        assert!(!GameState::Playing.is_waiting());
        assert!(!GameState::Playing.is_terminal());
    }
}
