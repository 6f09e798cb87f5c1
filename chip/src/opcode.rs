//! Opcode abstractions, functionality and constants.
use std::{convert::TryFrom, fmt};

use crate::{definitions::memory, DecodeError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the mask for the first and the last four bits
const OPCODE_MASK_F00F: u16 = OPCODE_MASK_F000 | OPCODE_MASK_000F;

/// the mask for the first four and the last eight bits
const OPCODE_MASK_F0FF: u16 = OPCODE_MASK_F000 | OPCODE_MASK_00FF;

/// the size of a single nibble
const NIBBLE_SIZE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::DecodeError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # let err = DecodeError::MemoryInvalid {pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(
/// #    Err(err),
/// #    build_opcode(&SPLIT_OPCODE, pointer)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, DecodeError> {
    // controlling that there is no illegal access here
    if pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(DecodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        })
    }
}

/// These are special traits used to filter out information
/// from opcodes, the extraction is the same for every opcode
/// regardless of the instruction it encodes.
pub trait OpcodeTrait {
    /// this is an opcode extractor that will return the
    /// opcode type (the highest nibble) shifted down
    fn t(&self) -> u8;

    /// the lowest nibble `N` of the opcode `TXYN`
    fn n(&self) -> u8;

    /// the address `NNN` of the opcode `TNNN`
    fn nnn(&self) -> u16;

    /// the register index `X` of the opcode `TXYN`
    fn x(&self) -> usize;

    /// the register index `Y` of the opcode `TXYN`
    fn y(&self) -> usize;

    /// the constant `KK` of the opcode `TXKK`
    fn kk(&self) -> u8;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE_SIZE)) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.n(), 0xA);
    /// ```
    fn n(&self) -> u8 {
        (self & OPCODE_MASK_000F) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> u16 {
        self & OPCODE_MASK_0FFF
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE_SIZE)) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.y(), 0xD);
    /// ```
    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self & MASK) >> NIBBLE_SIZE) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.kk(), 0xDA);
    /// ```
    fn kk(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }
}

/// All the instructions the chip understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    /// `00E0` - clears the display
    Cls,
    /// `00EE` - returns from a subroutine
    Ret,
    /// `1NNN` - jumps to `NNN`
    Jp,
    /// `2NNN` - calls the subroutine at `NNN`
    Call,
    /// `3XKK` - skips the next instruction if `VX == KK`
    SeVxByte,
    /// `4XKK` - skips the next instruction if `VX != KK`
    SneVxByte,
    /// `5XY_` - skips the next instruction if `VX == VY`
    SeVxVy,
    /// `6XKK` - `VX = KK`
    LdVxByte,
    /// `7XKK` - `VX += KK`, the carry is dropped
    AddVxByte,
    /// `8XY0` - `VX = VY`
    LdVxVy,
    /// `8XY1` - `VX |= VY`
    OrVxVy,
    /// `8XY2` - `VX &= VY`
    AndVxVy,
    /// `8XY3` - `VX ^= VY`
    XorVxVy,
    /// `8XY4` - `VX += VY`, `VF` is the carry
    AddVxVy,
    /// `8XY5` - `VX -= VY`, `VF` is set if `VX > VY`
    SubVxVy,
    /// `8XY6` - `VX >>= 1`, `VF` is the shifted out bit
    ShrVxVy,
    /// `8XY7` - `VX = VY - VX`, `VF` is set if `VY > VX`
    SubnVxVy,
    /// `8XY8` - `VX <<= 1`
    ShlVxVy,
    /// `9XY_` - skips the next instruction if `VX != VY`
    SneVxVy,
    /// `ANNN` - `I = NNN`
    LdI,
    /// `BNNN` - jumps to `V0 + NNN`
    JpV0,
    /// `CXKK` - `VX = rand() & KK`
    RndVxByte,
    /// `DXYN` - draws a sprite with the height `N`
    DrwVxVy,
    /// `FX07` - `VX = DT`
    LdVxDt,
    /// `FX15` - `DT = VX`
    LdDtVx,
    /// `FX18` - `ST = VX`
    LdStVx,
    /// `FX1E` - `I += VX`
    AddIVx,
}

/// The decoding table, it is evaluated from top to bottom and the
/// first entry where `opcode & mask == pattern` holds wins.
const DECODE_TABLE: [(u16, u16, InstructionKind); 27] = [
    (OPCODE_MASK_FFFF, 0x00E0, InstructionKind::Cls),
    (OPCODE_MASK_FFFF, 0x00EE, InstructionKind::Ret),
    (OPCODE_MASK_F000, 0x1000, InstructionKind::Jp),
    (OPCODE_MASK_F000, 0x2000, InstructionKind::Call),
    (OPCODE_MASK_F000, 0x3000, InstructionKind::SeVxByte),
    (OPCODE_MASK_F000, 0x4000, InstructionKind::SneVxByte),
    (OPCODE_MASK_F000, 0x5000, InstructionKind::SeVxVy),
    (OPCODE_MASK_F000, 0x6000, InstructionKind::LdVxByte),
    (OPCODE_MASK_F000, 0x7000, InstructionKind::AddVxByte),
    (OPCODE_MASK_F00F, 0x8000, InstructionKind::LdVxVy),
    (OPCODE_MASK_F00F, 0x8001, InstructionKind::OrVxVy),
    (OPCODE_MASK_F00F, 0x8002, InstructionKind::AndVxVy),
    (OPCODE_MASK_F00F, 0x8003, InstructionKind::XorVxVy),
    (OPCODE_MASK_F00F, 0x8004, InstructionKind::AddVxVy),
    (OPCODE_MASK_F00F, 0x8005, InstructionKind::SubVxVy),
    (OPCODE_MASK_F00F, 0x8006, InstructionKind::ShrVxVy),
    (OPCODE_MASK_F00F, 0x8007, InstructionKind::SubnVxVy),
    (OPCODE_MASK_F00F, 0x8008, InstructionKind::ShlVxVy),
    (OPCODE_MASK_F000, 0x9000, InstructionKind::SneVxVy),
    (OPCODE_MASK_F000, 0xA000, InstructionKind::LdI),
    (OPCODE_MASK_F000, 0xB000, InstructionKind::JpV0),
    (OPCODE_MASK_F000, 0xC000, InstructionKind::RndVxByte),
    (OPCODE_MASK_F000, 0xD000, InstructionKind::DrwVxVy),
    (OPCODE_MASK_F0FF, 0xF007, InstructionKind::LdVxDt),
    (OPCODE_MASK_F0FF, 0xF015, InstructionKind::LdDtVx),
    (OPCODE_MASK_F0FF, 0xF018, InstructionKind::LdStVx),
    (OPCODE_MASK_F0FF, 0xF01E, InstructionKind::AddIVx),
];

/// A decoded opcode, all the operand fields are extracted for every
/// instruction, the kind decides which of them are relevant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub n: u8,
    pub nnn: u16,
    pub x: usize,
    pub y: usize,
    pub kk: u8,
}

impl Instruction {
    /// Creates an instruction of the given kind with the fields taken from `opcode`.
    pub fn new(kind: InstructionKind, opcode: Opcode) -> Self {
        Self {
            kind,
            n: opcode.n(),
            nnn: opcode.nnn(),
            x: opcode.x(),
            y: opcode.y(),
            kk: opcode.kk(),
        }
    }
}

/// Will decode the given opcode into an instruction.
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// let instruction = decode(0x1ABC).expect("a valid jump");
/// assert_eq!(instruction.kind, InstructionKind::Jp);
/// assert_eq!(instruction.nnn, 0xABC);
/// assert!(decode(0xE19E).is_err());
/// ```
pub fn decode(opcode: Opcode) -> Result<Instruction, DecodeError> {
    DECODE_TABLE
        .iter()
        .find(|(mask, pattern, _)| opcode & mask == *pattern)
        .map(|(_, _, kind)| Instruction::new(*kind, opcode))
        .ok_or(DecodeError::InvalidOpcode(opcode))
}

impl TryFrom<Opcode> for Instruction {
    type Error = DecodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        decode(value)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use InstructionKind::*;

        let (x, y) = (self.x, self.y);
        match self.kind {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jp => write!(f, "JP {:#05X}", self.nnn),
            Call => write!(f, "CALL {:#05X}", self.nnn),
            SeVxByte => write!(f, "SE V{:X}, {:#04X}", x, self.kk),
            SneVxByte => write!(f, "SNE V{:X}, {:#04X}", x, self.kk),
            SeVxVy => write!(f, "SE V{:X}, V{:X}", x, y),
            LdVxByte => write!(f, "LD V{:X}, {:#04X}", x, self.kk),
            AddVxByte => write!(f, "ADD V{:X}, {:#04X}", x, self.kk),
            LdVxVy => write!(f, "LD V{:X}, V{:X}", x, y),
            OrVxVy => write!(f, "OR V{:X}, V{:X}", x, y),
            AndVxVy => write!(f, "AND V{:X}, V{:X}", x, y),
            XorVxVy => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddVxVy => write!(f, "ADD V{:X}, V{:X}", x, y),
            SubVxVy => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShrVxVy => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubnVxVy => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShlVxVy => write!(f, "SHL V{:X}, V{:X}", x, y),
            SneVxVy => write!(f, "SNE V{:X}, V{:X}", x, y),
            LdI => write!(f, "LD I, {:#05X}", self.nnn),
            JpV0 => write!(f, "JP V0, {:#05X}", self.nnn),
            RndVxByte => write!(f, "RND V{:X}, {:#04X}", x, self.kk),
            DrwVxVy => write!(f, "DRW V{:X}, V{:X}, {}", x, y, self.n),
            LdVxDt => write!(f, "LD V{:X}, DT", x),
            LdDtVx => write!(f, "LD DT, V{:X}", x),
            LdStVx => write!(f, "LD ST, V{:X}", x),
            AddIVx => write!(f, "ADD I, V{:X}", x),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take after an instruction was executed.
pub enum ProgramCounterStep {
    /// Will increment the program counter to the next instruction
    Next,
    /// Will skip the next instruction
    Skip,
    /// The instruction has already written the program counter
    /// itself, whether there is an additional advance is up to
    /// the chip configuration.
    Jump,
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Maps the [`ProgramCounterStep`](ProgramCounterStep) to the corresponding movement distance.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Skip.step(false), 4);
    /// assert_eq!(ProgramCounterStep::Jump.step(true), 2);
    /// assert_eq!(ProgramCounterStep::Jump.step(false), 0);
    /// ```
    #[inline]
    pub fn step(&self, advance_after_jump: bool) -> usize {
        match *self {
            ProgramCounterStep::Next => memory::opcodes::SIZE,
            ProgramCounterStep::Skip => 2 * memory::opcodes::SIZE,
            ProgramCounterStep::Jump if advance_after_jump => memory::opcodes::SIZE,
            ProgramCounterStep::Jump => 0,
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step.
    fn advance(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the renderer.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The display was cleared.
    Clear,
    /// The display buffer has changed.
    Draw,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as
/// [`calc`](ChipOpcodes::calc) moves the program counter after every executed instruction.
pub trait ChipOpcodes: ProgramCounter {
    /// will run the instruction and move the program counter afterwards
    fn calc(&mut self, instruction: &Instruction) -> Result<Operation, ProcessError> {
        let (step, operation) = self.execute(instruction)?;
        self.advance(step);
        Ok(operation)
    }

    /// will run the instruction, the program counter is only touched by the
    /// instructions that write it as part of their semantics.
    fn execute(
        &mut self,
        instruction: &Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        use InstructionKind::*;

        let none = |step: ProgramCounterStep| (step, Operation::None);

        let res = match instruction.kind {
            Cls | Ret => self.zero(instruction)?,
            Jp => self.one(instruction).map(none)?,
            Call => self.two(instruction).map(none)?,
            SeVxByte => self.three(instruction).map(none)?,
            SneVxByte => self.four(instruction).map(none)?,
            SeVxVy => self.five(instruction).map(none)?,
            LdVxByte => self.six(instruction).map(none)?,
            AddVxByte => self.seven(instruction).map(none)?,
            LdVxVy | OrVxVy | AndVxVy | XorVxVy | AddVxVy | SubVxVy | ShrVxVy | SubnVxVy
            | ShlVxVy => self.eight(instruction).map(none)?,
            SneVxVy => self.nine(instruction).map(none)?,
            LdI => self.a(instruction).map(none)?,
            JpV0 => self.b(instruction).map(none)?,
            RndVxByte => self.c(instruction).map(none)?,
            DrwVxVy => self.d(instruction)?,
            LdVxDt | LdDtVx | LdStVx | AddIVx => self.f(instruction).map(none)?,
        };
        Ok(res)
    }

    /// A multiuse opcode base for type `00TT`
    ///
    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    ///
    /// Returns any possible error
    fn zero(
        &mut self,
        instruction: &Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    ///
    /// Returns any possible error
    fn one(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    ///
    /// Returns any possible error
    fn two(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XKK` - Cond     - `if(Vx==KK)`          - Skips the next instruction if `VX` equals `KK`.
    ///
    /// Returns any possible error
    fn three(&self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XKK` - Cond     - `if(Vx!=KK)`          - Skips the next instruction if `VX` doesn't equal `KK`.
    ///
    /// Returns any possible error
    fn four(&self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XYN` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    ///
    /// Returns any possible error
    fn five(&self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XKK` - Const    - `Vx = KK`             - Sets `VX` to `KK`.
    ///
    /// Returns any possible error
    fn six(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XKK` - Const    - `Vx += KK`            - Adds `KK` to `VX`. (Carry flag is not changed)
    ///
    /// Returns any possible error
    fn seven(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// A mutiuse opcode base for type `8XYT` (T is a sub opcode)
    ///
    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `1` when `VX` is bigger than `VY`, and to `0` otherwise.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `1` when `VY` is bigger than `VX`, and to `0` otherwise.
    /// - `8XY8` - BitOp    - `Vx<<=1`              - Stores the flag bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    ///
    /// Returns any possible error
    fn eight(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XYN` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    ///
    /// Returns any possible error
    fn nine(&self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    ///
    /// Returns any possible error
    fn a(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    ///
    /// Returns any possible error
    fn b(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXKK` - Rand     - `Vx=rand()&KK`        - Sets `VX` to the result of a bitwise and operation on a random number (`0 to 255`) and `KK`.
    ///
    /// Returns any possible error
    fn c(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. Each row of `8` pixels is read as bit-coded starting from memory location `I`; `I` value doesn’t change after the execution of this instruction. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen. Sprites are clipped at the display edges.
    ///
    /// Returns any possible error
    fn d(
        &mut self,
        instruction: &Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// A multiuse opcode base for type `FXTT` (T is a sub opcode)
    ///
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    ///
    /// Returns any possible error
    fn f(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError>;
}

#[cfg(test)]
mod tests {
    use std::convert::TryInto;

    use super::*;

    fn kind(opcode: Opcode) -> Result<InstructionKind, DecodeError> {
        decode(opcode).map(|instruction| instruction.kind)
    }

    #[test]
    fn test_tryfrom_opcode_simple() {
        let value: Opcode = 0x00E0;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv.map(|i| i.kind), Ok(InstructionKind::Cls));
    }

    #[test]
    fn test_tryfrom_opcode_simple_fail() {
        let value: Opcode = 0x00E1;
        let conv: Result<Instruction, _> = value.try_into();
        assert_eq!(conv, Err(DecodeError::InvalidOpcode(value)));
    }

    #[test]
    fn test_fields_are_extracted_for_every_kind() {
        let instruction = decode(0xD12F).expect("a valid draw");
        assert_eq!(
            instruction,
            Instruction {
                kind: InstructionKind::DrwVxVy,
                n: 0xF,
                nnn: 0x12F,
                x: 0x1,
                y: 0x2,
                kk: 0x2F,
            }
        );
    }

    #[test]
    fn test_jump_decodes_address() {
        let instruction = decode(0x1ABC).expect("a valid jump");
        assert_eq!(instruction.kind, InstructionKind::Jp);
        assert_eq!(instruction.nnn, 0xABC);
    }

    #[test]
    fn test_decode_multiple() {
        use InstructionKind::*;

        let tests = [
            (0x00E0, Ok(Cls)),
            (0x00EE, Ok(Ret)),
            (0x00E1, Err(())),
            (0x0123, Err(())),
            (0x1919, Ok(Jp)),
            (0x2222, Ok(Call)),
            (0x3123, Ok(SeVxByte)),
            (0x4123, Ok(SneVxByte)),
            (0x5120, Ok(SeVxVy)),
            // only the highest nibble is relevant for this one
            (0x5121, Ok(SeVxVy)),
            (0x6123, Ok(LdVxByte)),
            (0x7123, Ok(AddVxByte)),
            (0x9120, Ok(SneVxVy)),
            (0x912F, Ok(SneVxVy)),
            (0xA222, Ok(LdI)),
            (0xB222, Ok(JpV0)),
            (0xC123, Ok(RndVxByte)),
            (0xD123, Ok(DrwVxVy)),
            (0xE19E, Err(())),
            (0xE1A1, Err(())),
            (0xF007, Ok(LdVxDt)),
            (0xF00A, Err(())),
            (0xF115, Ok(LdDtVx)),
            (0xF218, Ok(LdStVx)),
            (0xF31E, Ok(AddIVx)),
            (0xF029, Err(())),
            (0xF033, Err(())),
            (0xF055, Err(())),
            (0xF065, Err(())),
        ];
        for (value, res) in tests.iter() {
            assert_eq!(
                kind(*value),
                res.map_err(|_| DecodeError::InvalidOpcode(*value)),
                "opcode {:#06X}",
                value
            );
        }
    }

    mod eight {
        use super::*;

        #[test]
        fn test_load() {
            assert_eq!(kind(0x8AB0), Ok(InstructionKind::LdVxVy));
        }

        #[test]
        fn test_or() {
            assert_eq!(kind(0x8AB1), Ok(InstructionKind::OrVxVy));
        }

        #[test]
        fn test_and() {
            assert_eq!(kind(0x8AB2), Ok(InstructionKind::AndVxVy));
        }

        #[test]
        fn test_xor() {
            assert_eq!(kind(0x8AB3), Ok(InstructionKind::XorVxVy));
        }

        #[test]
        fn test_add() {
            assert_eq!(kind(0x8AB4), Ok(InstructionKind::AddVxVy));
        }

        #[test]
        fn test_sub() {
            assert_eq!(kind(0x8AB5), Ok(InstructionKind::SubVxVy));
        }

        #[test]
        fn test_shift_right() {
            assert_eq!(kind(0x8AB6), Ok(InstructionKind::ShrVxVy));
        }

        #[test]
        fn test_reverse_sub() {
            assert_eq!(kind(0x8AB7), Ok(InstructionKind::SubnVxVy));
        }

        #[test]
        fn test_shift_left_uses_eight() {
            let instruction = decode(0x8AB8).expect("a valid shift");
            assert_eq!(instruction.kind, InstructionKind::ShlVxVy);
            assert_eq!((instruction.x, instruction.y), (0xA, 0xB));
        }

        #[test]
        fn test_unknown_sub_opcodes() {
            for n in 0x9..=0xF {
                let opcode = 0x8AB0 | n;
                assert_eq!(kind(opcode), Err(DecodeError::InvalidOpcode(opcode)));
            }
        }
    }

    #[test]
    fn test_display_mnemonics() {
        let tests = [
            (0x00E0, "CLS"),
            (0x1ABC, "JP 0xABC"),
            (0x6122, "LD V1, 0x22"),
            (0x8AB4, "ADD VA, VB"),
            (0xD015, "DRW V0, V1, 5"),
            (0xF31E, "ADD I, V3"),
        ];
        for (opcode, text) in tests.iter() {
            let instruction = decode(*opcode).expect("a valid opcode");
            assert_eq!(instruction.to_string(), *text);
        }
    }
}
