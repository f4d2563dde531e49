pub mod loader;
pub mod ops;
pub mod writer;

pub use loader::load;
pub use ops::{join, lslr, SaveOptions};
pub use writer::{render, write, OutputLayout};
