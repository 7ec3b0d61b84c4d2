pub mod leaderboard;
pub mod player;
pub mod round;
pub mod score;
pub mod utils;

pub use leaderboard::*;
pub use player::*;
pub use round::*;
pub use score::*;
pub use utils::*;
