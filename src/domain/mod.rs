pub mod error;
pub mod menu;

// Image asset optimization module
pub mod assets;
