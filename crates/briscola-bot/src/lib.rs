pub mod decision;
pub mod eval;
pub mod policy;
pub mod runner;
pub mod search;

pub use decision::{Decision, choose_play};
pub use eval::evaluate;
pub use policy::SearchPolicy;
pub use runner::{GameEvent, GameReport, GameRunner, RunError, RunnerConfig};
pub use search::{SearchConfig, SearchStats, minimax};
