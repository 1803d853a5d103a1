pub mod overview;
pub mod processes;
pub mod system;
