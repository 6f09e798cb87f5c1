use thiserror::Error;

use crate::opcode::{InstructionKind, Opcode};

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'")]
    Decode(#[from] DecodeError),
    #[error("Invalid execution state '{0}'")]
    Execution(#[from] ExecutionError),
    #[error("Invalid stack state '{0}'")]
    Stack(#[from] StackError),
    #[error("Invalid memory state '{0}'")]
    Memory(#[from] MemoryError),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum DecodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    MemoryInvalid { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ExecutionError {
    #[error("There is no handler for the instruction kind {0:?}.")]
    Unsupported(InstructionKind),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum MemoryError {
    #[error("Unable to write {len} bytes at {offset:#06X}, the memory is only {size} bytes long.")]
    Overflow {
        offset: usize,
        len: usize,
        size: usize,
    },
    #[error("Reading {len} bytes from {address:#06X} is out of bounds.")]
    OutOfBounds { address: usize, len: usize },
}
