//! The full implementation of the chip8 virtual machine, from the machine state and the
//! instruction execution to an option to pretty print the state.
mod chipset;
mod opcodes;
mod print;

/// reexport chipset structs and data for simpler usage
pub use chipset::*;
pub use print::StateDump;
