pub mod game;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::game::Game;

    /// Create a test game with the given id and title and plausible defaults
    /// for everything else.
    pub fn make_game(id: &str, title: &str) -> Game {
        Game {
            id: id.to_string(),
            title: title.to_string(),
            image: "default.jpg".to_string(),
            age_range: "8+".to_string(),
            setup_difficulty: 2,
            play_difficulty: 3,
            duration: 45.0,
            fun_rating: 4,
            description: None,
            resources: None,
        }
    }

    /// Create `n` test games with sequential ids starting at 1.
    pub fn make_games(n: usize) -> Vec<Game> {
        (0..n)
            .map(|i| make_game(&format!("game-{}", i + 1), &format!("Game {}", i + 1)))
            .collect()
    }
}
