use {
    crate::{
        definitions::{cpu, display, memory},
        opcode::{self, ChipOpcodes, Opcode, Operation, ProgramCounter, ProgramCounterStep},
        MemoryError, ProcessError, StackError,
    },
    rand::RngCore,
};

/// The behaviour switches of the chip, the defaults reproduce the
/// reference behaviour of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// If set the program counter is moved to the next instruction even after
    /// an instruction has written it (`JP`, `CALL`, `JP V0`), so the jump lands
    /// one instruction after its target.
    pub advance_after_jump: bool,
    /// If set `SHL` stores the most significant bit in `VF`, otherwise the
    /// bit `0x10` is used.
    pub shl_flag_from_msb: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            advance_after_jump: true,
            shl_flag_from_msb: false,
        }
    }
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// the last fetched opcode, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x0A0` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Box<[u8; memory::SIZE]>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions. In an addition operation, `VF` is the carry flag, while in subtraction, it is
    /// the "no borrow" flag. In the draw instruction `VF` is set upon pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`. It is not masked to the address space.
    pub(super) index_register: u16,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: u16,
    /// The stack is only used to store return addresses when subroutines are called.
    pub(super) stack: [u16; cpu::stack::SIZE],
    /// Points to the last written stack slot, `0` means the stack is empty.
    pub(super) stack_pointer: usize,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read, counting it down is up to the host.
    pub(super) delay_timer: u8,
    /// Sound timer: This timer is used for sound effects. Its value can be set, counting it down
    /// is up to the host.
    pub(super) sound_timer: u8,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`, stored row by row.
    pub(super) display: Box<[bool; display::RESOLUTION]>,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    /// The behaviour switches
    pub(super) quirks: Quirks,
}

impl Default for ChipSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipSet {
    /// will create a new chipset object with all the memory and registers set to 0
    pub fn new() -> Self {
        Self::with_config(Quirks::default())
    }

    /// will create a new chipset object using the given behaviour switches
    pub fn with_config(quirks: Quirks) -> Self {
        Self::with_rng(quirks, Box::new(rand::rngs::OsRng))
    }

    /// will create a new chipset object drawing its random numbers from `rng`
    pub fn with_rng(quirks: Quirks, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            opcode: 0,
            memory: Box::new([0; memory::SIZE]),
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER as u16,
            stack: [0; cpu::stack::SIZE],
            stack_pointer: 0,
            delay_timer: 0,
            sound_timer: 0,
            display: Box::new([false; display::RESOLUTION]),
            rng,
            quirks,
        }
    }

    /// will create a new chipset with the default font and the given rom loaded
    pub fn from_rom(rom: &[u8]) -> Result<Self, ProcessError> {
        let mut chip = Self::new();
        chip.load_font(&display::fontset::FONTSET)?;
        chip.load_rom(rom)?;
        Ok(chip)
    }

    /// will write the rom data into memory starting at the program counter start
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), ProcessError> {
        self.write_memory(cpu::PROGRAM_COUNTER, rom)?;
        log::debug!("loaded rom with {} bytes", rom.len());
        Ok(())
    }

    /// will write the font table into memory at the font location
    pub fn load_font(&mut self, font: &[u8]) -> Result<(), ProcessError> {
        self.write_memory(display::fontset::LOCATION, font)
    }

    fn write_memory(&mut self, offset: usize, data: &[u8]) -> Result<(), ProcessError> {
        let end = offset + data.len();
        if end > memory::SIZE {
            return Err(MemoryError::Overflow {
                offset,
                len: data.len(),
                size: memory::SIZE,
            }
            .into());
        }
        self.memory[offset..end].copy_from_slice(data);
        Ok(())
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), ProcessError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory[..], self.program_counter as usize)?;
        Ok(())
    }

    /// will advance the program by a single step
    ///
    /// On error the program counter still points to the failing instruction.
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        let res = self.set_opcode().and_then(|_| {
            let instruction = opcode::decode(self.opcode)?;
            log::trace!(
                "{:#06X}: {:#06X} {}",
                self.program_counter,
                self.opcode,
                instruction
            );
            self.calc(&instruction)
        });

        if let Err(err) = &res {
            log::warn!("step at {:#06X} failed: {}", self.program_counter, err);
        }
        res
    }

    /// will return the behaviour switches in use
    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// will return the last fetched opcode
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    /// will return the full memory
    pub fn memory(&self) -> &[u8] {
        &self.memory[..]
    }

    /// will return the data registers `V0` to `VF`
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// will return the index register `I`
    pub fn index_register(&self) -> u16 {
        self.index_register
    }

    /// will return the program counter
    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    /// will return all the stack slots
    pub fn stack(&self) -> &[u16] {
        &self.stack
    }

    /// will return the stack pointer
    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    /// will return the sound timer
    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// will return the delay timer
    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    /// Will return a immutable slice of the current display configuration
    /// in row major order (`index = y * WIDTH + x`).
    pub fn display(&self) -> &[bool] {
        &self.display[..]
    }

    /// Will return the pixel at the given coordinates, anything outside
    /// the display is off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < display::WIDTH && y < display::HEIGHT && self.display[y * display::WIDTH + x]
    }

    /// Will push the current pointer to the stack
    /// the stack pointer is moved before the write
    pub(super) fn push_stack(&mut self, pointer: u16) -> Result<(), StackError> {
        if self.stack_pointer + 1 >= cpu::stack::SIZE {
            Err(StackError::Full)
        } else {
            self.stack_pointer += 1;
            self.stack[self.stack_pointer] = pointer;
            log::debug!("push {:#06X} to stack slot {}", pointer, self.stack_pointer);
            Ok(())
        }
    }

    /// Will pop from the stack
    /// the stack pointer is moved after the read
    pub(super) fn pop_stack(&mut self) -> Result<u16, StackError> {
        if self.stack_pointer == 0 {
            Err(StackError::Empty)
        } else {
            let pointer = self.stack[self.stack_pointer];
            log::debug!("pop {:#06X} from stack slot {}", pointer, self.stack_pointer);
            self.stack_pointer -= 1;
            Ok(pointer)
        }
    }
}

impl ProgramCounter for ChipSet {
    fn advance(&mut self, step: ProgramCounterStep) {
        let distance = step.step(self.quirks.advance_after_jump) as u16;
        self.program_counter = self.program_counter.wrapping_add(distance);
    }
}
