pub mod matchmaking_steps;
pub mod teardown_steps;
