use std::collections::HashMap;
use std::fmt;

/// Outcome of applying one player action to a running game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameProgress {
    /// The game continues; more actions are expected
    Continue,
    /// The game is finished; the session can be torn down
    Over,
}

/// Trait that concrete games implement to become matchable
///
/// Games never see player identity. Actions arrive tagged with a seat
/// index: the player's position in the room's arrival-ordered membership,
/// fixed when the room forms.
pub trait Game: Send + Sync {
    /// Human-readable game name; matches the registry key
    fn name(&self) -> &str;

    /// Number of players a session of this game requires
    fn required_players(&self) -> usize;

    /// Apply one action from the given seat
    fn apply(&mut self, seat: usize, action: serde_json::Value)
        -> Result<GameProgress, GameError>;

    /// Broadcastable snapshot of the current game state
    fn state(&self) -> serde_json::Value;
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("seat {0} is out of range")]
    UnknownSeat(usize),

    #[error("it is not seat {0}'s turn")]
    NotYourTurn(usize),

    #[error("invalid action: {0}")]
    InvalidAction(String),

    #[error("the game is already over")]
    AlreadyOver,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Constructor stored in the registry for each game name
pub type GameCtor = Box<dyn Fn() -> Box<dyn Game> + Send + Sync>;

/// Registry entry: everything matchmaking needs before a game exists
pub struct GameDescriptor {
    required_players: usize,
    ctor: GameCtor,
}

impl GameDescriptor {
    pub fn new<F>(required_players: usize, ctor: F) -> Self
    where
        F: Fn() -> Box<dyn Game> + Send + Sync + 'static,
    {
        Self {
            required_players,
            ctor: Box::new(ctor),
        }
    }

    /// Player count a room must reach before this game starts
    pub fn required_players(&self) -> usize {
        self.required_players
    }

    /// Construct a fresh game instance
    pub fn construct(&self) -> Box<dyn Game> {
        (self.ctor)()
    }
}

impl fmt::Debug for GameDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameDescriptor")
            .field("required_players", &self.required_players)
            .finish_non_exhaustive()
    }
}

/// Lookup table from game name to descriptor
///
/// Populated once at startup. The session manager takes it by value and
/// only ever reads it afterwards.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: HashMap<String, GameDescriptor>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a game under its lookup name
    pub fn register(&mut self, name: impl Into<String>, descriptor: GameDescriptor) {
        self.games.insert(name.into(), descriptor);
    }

    pub fn get(&self, name: &str) -> Option<&GameDescriptor> {
        self.games.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.games.contains_key(name)
    }

    /// Registered game names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.games.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
