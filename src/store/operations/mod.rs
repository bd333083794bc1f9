pub mod sets;
pub mod streaks;
