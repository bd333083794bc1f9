pub const SETS: &str = "sets";
pub const STREAKS: &str = "streaks";
