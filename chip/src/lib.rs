pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod opcode;
mod error;

// reexporting for convinience
mod runner;
pub use error::*;
pub use runner::*;
