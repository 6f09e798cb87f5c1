use crate::{
    definitions::{cpu, display},
    opcode::{ChipOpcodes, Instruction, InstructionKind, Operation, ProgramCounterStep},
    ExecutionError, MemoryError, ProcessError,
};

use super::ChipSet;

/// the bit tested by `SHL` unless the most significant bit is requested
const SHL_FLAG: u8 = 0x10;
/// the most significant bit of a register
const SHL_FLAG_MSB: u8 = 0x80;

impl ChipSet {
    /// writes the flag register `VF`
    fn set_flag(&mut self, flag: bool) {
        self.registers[cpu::register::LAST] = flag as u8;
    }
}

fn unsupported<T>(instruction: &Instruction) -> Result<T, ProcessError> {
    Err(ExecutionError::Unsupported(instruction.kind).into())
}

impl ChipOpcodes for ChipSet {
    fn zero(
        &mut self,
        instruction: &Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match instruction.kind {
            InstructionKind::Cls => {
                // 00E0
                // clear display
                self.display.iter_mut().for_each(|pixel| *pixel = false);
                Ok((ProgramCounterStep::Next, Operation::Clear))
            }
            InstructionKind::Ret => {
                // 00EE
                // Return from sub routine => pop from stack
                // The popped address is the call itself, so the
                // regular advance moves past it.
                self.program_counter = self.pop_stack()?;
                Ok((ProgramCounterStep::Next, Operation::None))
            }
            _ => unsupported(instruction),
        }
    }

    fn one(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        // Jumps to address NNN.
        self.program_counter = instruction.nnn;
        Ok(ProgramCounterStep::Jump)
    }

    fn two(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // Calls subroutine at NNN, the address of the call itself is stored
        self.push_stack(self.program_counter)?;
        self.program_counter = instruction.nnn;
        Ok(ProgramCounterStep::Jump)
    }

    fn three(&self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 3XKK
        // Skips the next instruction if VX equals KK.
        Ok(ProgramCounterStep::cond(
            self.registers[instruction.x] == instruction.kk,
        ))
    }

    fn four(&self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 4XKK
        // Skips the next instruction if VX doesn't equal KK.
        Ok(ProgramCounterStep::cond(
            self.registers[instruction.x] != instruction.kk,
        ))
    }

    fn five(&self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 5XYN
        // Skips the next instruction if VX equals VY.
        let Instruction { x, y, .. } = *instruction;
        Ok(ProgramCounterStep::cond(
            self.registers[x] == self.registers[y],
        ))
    }

    fn six(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 6XKK
        // Sets VX to KK.
        self.registers[instruction.x] = instruction.kk;
        Ok(ProgramCounterStep::Next)
    }

    fn seven(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 7XKK
        // Adds KK to VX. (Carry flag is not changed)
        let x = instruction.x;
        self.registers[x] = self.registers[x].wrapping_add(instruction.kk);
        Ok(ProgramCounterStep::Next)
    }

    fn eight(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        let Instruction { x, y, .. } = *instruction;
        // operands for the flag, the result is computed from the
        // registers after VF was written
        let (vx, vy) = (self.registers[x], self.registers[y]);

        match instruction.kind {
            InstructionKind::LdVxVy => {
                // 8XY0
                // Sets VX to the value of VY.
                self.registers[x] = vy;
            }
            InstructionKind::OrVxVy => {
                // 8XY1
                self.registers[x] = vx | vy;
            }
            InstructionKind::AndVxVy => {
                // 8XY2
                self.registers[x] = vx & vy;
            }
            InstructionKind::XorVxVy => {
                // 8XY3
                self.registers[x] = vx ^ vy;
            }
            InstructionKind::AddVxVy => {
                // 8XY4
                // Adds VY to VX. VF is set to 1 when there's a carry, and to 0 when there isn't.
                let res = vx as u16 + vy as u16;
                self.set_flag(res > u8::MAX as u16);
                self.registers[x] = res as u8;
            }
            InstructionKind::SubVxVy => {
                // 8XY5
                // VY is subtracted from VX. VF is set when VX is strictly bigger than VY.
                self.set_flag(vx > vy);
                self.registers[x] = self.registers[x].wrapping_sub(self.registers[y]);
            }
            InstructionKind::ShrVxVy => {
                // 8XY6
                // Stores the least significant bit of VX in VF and then shifts VX to the right
                // by 1.
                self.set_flag(vx & 1 == 1);
                self.registers[x] >>= 1;
            }
            InstructionKind::SubnVxVy => {
                // 8XY7
                // Sets VX to VY minus VX. VF is set when VY is strictly bigger than VX.
                self.set_flag(vy > vx);
                self.registers[x] = self.registers[y].wrapping_sub(self.registers[x]);
            }
            InstructionKind::ShlVxVy => {
                // 8XY8
                // Stores the flag bit of VX in VF and then shifts VX to the left by 1.
                let mask = if self.quirks.shl_flag_from_msb {
                    SHL_FLAG_MSB
                } else {
                    SHL_FLAG
                };
                self.set_flag(vx & mask == mask);
                self.registers[x] <<= 1;
            }
            _ => return unsupported(instruction),
        }
        Ok(ProgramCounterStep::Next)
    }

    fn nine(&self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // 9XYN
        // Skips the next instruction if VX doesn't equal VY.
        let Instruction { x, y, .. } = *instruction;
        Ok(ProgramCounterStep::cond(
            self.registers[x] != self.registers[y],
        ))
    }

    fn a(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        // Sets I to the address NNN.
        self.index_register = instruction.nnn;
        Ok(ProgramCounterStep::Next)
    }

    fn b(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        // Jumps to the address NNN plus V0.
        self.program_counter = instruction.nnn + self.registers[0] as u16;
        Ok(ProgramCounterStep::Jump)
    }

    fn c(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        // CXKK
        // Sets VX to the result of a bitwise and operation on a random number and KK.

        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[instruction.x] = instruction.kk & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn d(
        &mut self,
        instruction: &Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        let Instruction { x, y, n, .. } = *instruction;

        let index = self.index_register as usize;
        let len = n as usize;
        // a sprite without rows reads nothing, so I may point anywhere
        let sprite: &[u8] = if len == 0 {
            &[]
        } else {
            self.memory
                .get(index..(index + len))
                .ok_or(MemoryError::OutOfBounds {
                    address: index,
                    len,
                })?
        };

        let coorx = self.registers[x] as usize % display::WIDTH;
        let coory = self.registers[y] as usize % display::HEIGHT;

        // VF is only set once the whole sprite was drawn
        let mut collision = false;

        const BYTE: usize = display::sprite::WIDTH;

        for (i, row) in sprite.iter().enumerate() {
            let y = coory + i;

            // no wrapping at the bottom
            if y >= display::HEIGHT {
                break;
            }

            for (m, j) in (0..BYTE).rev().zip(0..BYTE) {
                let x = coorx + j;

                // no wrapping at the right side
                if x >= display::WIDTH {
                    break;
                }

                let cpixel = (*row >> m) & 1 == 1;
                let pixel = &mut self.display[y * display::WIDTH + x];
                let spixel = *pixel;

                *pixel = spixel ^ cpixel;

                if spixel && !*pixel {
                    collision = true;
                }
            }
        }

        self.set_flag(collision);
        log::debug!(
            "draw {} rows at ({}, {}) collision {}",
            len,
            coorx,
            coory,
            collision
        );

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn f(&mut self, instruction: &Instruction) -> Result<ProgramCounterStep, ProcessError> {
        let x = instruction.x;
        match instruction.kind {
            InstructionKind::LdVxDt => {
                // FX07
                // Sets VX to the value of the delay timer.
                self.registers[x] = self.delay_timer;
            }
            InstructionKind::LdDtVx => {
                // FX15
                // Sets the delay timer to VX.
                self.delay_timer = self.registers[x];
            }
            InstructionKind::LdStVx => {
                // FX18
                // Sets the sound timer to VX.
                self.sound_timer = self.registers[x];
            }
            InstructionKind::AddIVx => {
                // FX1E
                // Adds VX to I. VF is not affected, I is allowed to leave the address space.
                self.index_register = self
                    .index_register
                    .wrapping_add(self.registers[x] as u16);
            }
            _ => return unsupported(instruction),
        }
        Ok(ProgramCounterStep::Next)
    }
}
