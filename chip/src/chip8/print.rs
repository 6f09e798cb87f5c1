//! The diagnostic dump of the [`chipset`](super::ChipSet), both as a plain snapshot
//! ([`StateDump`]) and as a pretty print.
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use super::ChipSet;
use crate::definitions::cpu;
use once_cell::sync::Lazy;
use std::fmt;

/// A read only copy of the cpu state, taking it has no effect on the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateDump {
    pub registers: [u8; cpu::register::SIZE],
    pub stack: [u16; cpu::stack::SIZE],
    pub stack_pointer: usize,
    pub program_counter: u16,
    pub index_register: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl ChipSet {
    /// Will take a snapshot of the registers, the stack and the timers.
    pub fn dump(&self) -> StateDump {
        StateDump {
            registers: self.registers,
            stack: self.stack,
            stack_pointer: self.stack_pointer,
            program_counter: self.program_counter,
            index_register: self.index_register,
            delay_timer: self.delay_timer,
            sound_timer: self.sound_timer,
        }
    }
}

/// The length of the pretty print data
/// as a single instruction is u16 the octa
/// size will show how often the block shall
/// be repeated has to be bigger then 0
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// Will add an indent post processing
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

macro_rules! intformat {
    () => {
        // The formatted string will be 2 sysbols for the prefix (0x)
        // and 4 for the rest long.
        "{:#06X}"
    };
}

static POINTER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut line = String::with_capacity(20);
    // If there was an error panicing here is correct,
    // as some essential component of printing went
    // wrongly.
    pointer_print::formatter(&mut line, 0, 0).unwrap();
    line.len()
});

static INTEGER_LEN: Lazy<usize> = Lazy::new(|| {
    let mut string = String::new();
    // SAFETY: if something went wrong here panicing is correct.
    integer_print::formatter(&mut string, 0u8).unwrap();
    string.len()
});

// calculate a line lenght (This is a bit bigger then the actual line will be)
static LENLINE: Lazy<usize> =
    Lazy::new(|| INDENT_SIZE + HEX_PRINT_STEP * (*INTEGER_LEN + 1) + 1 + *POINTER_LEN);

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::Write;
    /// will formatt the pointers according to definition
    pub(super) fn formatter(
        line: &mut String,
        from: usize,
        to: usize,
    ) -> Result<(), std::fmt::Error> {
        write!(
            line,
            concat!(intformat!(), " - ", intformat!(), " :"),
            from, to
        )
    }
}

/// Handles all the memory prints
mod memory_print {
    use super::{integer_print, pointer_print, HEX_PRINT_STEP};
    use crate::{definitions::memory, opcode::Opcode};
    use once_cell::sync::Lazy;
    use std::fmt::{self, Write};

    /// The internal length of the given data
    /// as the data is stored as u8 and an opcode
    /// is u16 long
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;
    /// The values that are used when there are at lease two rows of zeros.
    const FILLER_BASE: &str = "...";

    /// Prepares the line that will be used, in the case that there is at least two lines of only zeros.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let mut formatted = String::new();
        // SAFTY: If there is an error here panicing is correct
        integer_print::formatter(&mut formatted, 0u16).unwrap();
        let lenght =
            formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1) - FILLER_BASE.len();
        let filler = " ".repeat(lenght / 2);

        format!(
            "{}{}{}{}{}",
            formatted, filler, FILLER_BASE, filler, formatted
        )
    });

    /// this struct will simulate a single row of opcodes (only in this context)
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        only_null: bool,
    }

    /// using the fmt::Display` for simple printing of the data later on
    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::with_capacity(*super::LENLINE);
            pointer_print::formatter(&mut res, self.from, self.to)?;
            res.push(' ');

            if !self.only_null {
                for entry in self.data.iter() {
                    integer_print::formatter(&mut res, *entry)?;
                    res.push(' ');
                }
                if let Some(index) = res.rfind(' ') {
                    res.truncate(index);
                }
            } else {
                res.push_str(&ZERO_FILLER)
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory
    /// this functions assumes the full data to be passed
    /// as the offset is calculated from the beginning of the
    /// memory block
    pub(super) fn printer(memory: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT);

        for (chunk_index, chunk) in memory.chunks(POINTER_INCREMENT).enumerate() {
            let from = chunk_index * POINTER_INCREMENT;
            let to = from + chunk.len() - 1;

            let mut data = [0; HEX_PRINT_STEP];
            for (entry, pair) in data.iter_mut().zip(chunk.chunks(memory::opcodes::SIZE)) {
                let high = pair[0];
                let low = pair.get(1).copied().unwrap_or(0);
                *entry = Opcode::from_be_bytes([high, low]);
            }
            let only_null = data.iter().all(|entry| *entry == 0);

            // create the row that shall be used later on
            let mut row = Row {
                from,
                to,
                data,
                only_null,
            };

            // consecutive zero rows are merged into a single one
            if only_null {
                if let Some(last_row) = rows.last() {
                    if last_row.only_null {
                        row.from = last_row.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row)
        }

        // create the end structure to be used for calculations
        let mut string = String::with_capacity((*super::LENLINE + 1) * rows.len());
        for row in rows {
            super::indent_helper(&mut string, indent);
            write!(string, "{}{}", row, super::END_OF_LINE)?;
        }
        if let Some(index) = string.rfind(super::END_OF_LINE) {
            string.truncate(index);
        }
        Ok(string)
    }
}

/// handles printting of any and all of intergers.
mod integer_print {
    use super::{pointer_print, HEX_PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> Result<(), fmt::Error>
    where
        T: fmt::Display + fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, intformat!(), data)
    }

    /// will pretty print all the integer data given
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::Display + fmt::UpperHex + Unsigned + Copy,
    {
        let result_size = *super::LENLINE * (data.len() / HEX_PRINT_STEP + 1);

        let mut res = String::with_capacity(result_size);
        for (chunk_index, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = chunk_index * HEX_PRINT_STEP;

            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(super::END_OF_LINE);
        }

        // Remove unneded new line
        if let Some(index) = res.rfind(super::END_OF_LINE) {
            res.truncate(index);
        }

        Ok(res)
    }
}

/// will write a single value with the given indent
fn single<T>(value: T) -> Result<String, fmt::Error>
where
    T: fmt::Display + fmt::UpperHex + num_traits::Unsigned + Copy,
{
    let mut res = String::with_capacity(INDENT_SIZE + *INTEGER_LEN);
    indent_helper(&mut res, INDENT_SIZE);
    integer_print::formatter(&mut res, value)?;
    Ok(res)
}

impl fmt::Display for StateDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prc = single(self.program_counter)?;
        let idx = single(self.index_register)?;
        let stp = single(self.stack_pointer)?;
        let dlt = single(self.delay_timer)?;
        let sdt = single(self.sound_timer)?;
        let sta = integer_print::printer(&self.stack, INDENT_SIZE)?;
        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;

        write!(
            f,
            "\tProgram Counter :\n{}\n\
             \tIndex Register :\n{}\n\
             \tDelay Timer :\n{}\n\
             \tSound Timer :\n{}\n\
             \tStack Pointer :\n{}\n\
             \tStack :\n{}\n\
             \tRegister :\n{}",
            prc, idx, dlt, sdt, stp, sta, reg
        )
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let opc = single(self.opcode)?;
        let mem = memory_print::printer(self.memory(), INDENT_SIZE)?;

        write!(
            f,
            "Chipset {{\n\
                \tOpcode :\n{}\n\
                {}\n\
                \tMemory :\n{}\n\
                }}",
            opc,
            self.dump(),
            mem
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests;
    use crate::definitions::display;

    const OUTPUT_PRINT: &str = "\
        Chipset {\n\
            \tOpcode :\n\
                \t\t0x0000\n\
            \tProgram Counter :\n\
                \t\t0x0200\n\
            \tIndex Register :\n\
                \t\t0x0000\n\
            \tDelay Timer :\n\
                \t\t0x0000\n\
            \tSound Timer :\n\
                \t\t0x0000\n\
            \tStack Pointer :\n\
                \t\t0x0000\n\
            \tStack :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tRegister :\n\
                \t\t0x0000 - 0x0007 : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
                \t\t0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000\n\
            \tMemory :\n\
                \t\t0x0000 - 0x004F : 0x0000                    ...                    0x0000\n\
                \t\t0x0050 - 0x005F : 0xF090 0x9090 0xF020 0x6020 0x2070 0xF010 0xF080 0xF0F0\n\
                \t\t0x0060 - 0x006F : 0x10F0 0x10F0 0x9090 0xF010 0x10F0 0x80F0 0x10F0 0xF080\n\
                \t\t0x0070 - 0x007F : 0xF090 0xF0F0 0x1020 0x4040 0xF090 0xF090 0xF0F0 0x90F0\n\
                \t\t0x0080 - 0x008F : 0x10F0 0xF090 0xF090 0x90E0 0x90E0 0x90E0 0xF080 0x8080\n\
                \t\t0x0090 - 0x009F : 0xF0E0 0x9090 0x90E0 0xF080 0xF080 0xF0F0 0x80F0 0x8080\n\
                \t\t0x00A0 - 0x01FF : 0x0000                    ...                    0x0000\n\
                \t\t0x0200 - 0x020F : 0x00E0 0x6C00 0x4C00 0x6E0F 0xA203 0x6020 0xF055 0x00E0\n\
                \t\t0x0210 - 0x0FFF : 0x0000                    ...                    0x0000\n\
        }";

    const ROM: [u8; 16] = [
        0x00, 0xE0, 0x6C, 0x00, 0x4C, 0x00, 0x6E, 0x0F, 0xA2, 0x03, 0x60, 0x20, 0xF0, 0x55,
        0x00, 0xE0,
    ];

    #[test]
    /// tests if the pretty print output is as expected
    /// this test is mainly for coverage purposes, as
    /// the given module takes up a multitude of lines.
    fn test_full_print() {
        let mut chip = tests::setup_chip(&ROM);
        // override the chip register as they are generated randomly
        chip.registers = [0; 16];

        let actual_full = format!("{}", chip);
        let actual_split = actual_full.split('\n');
        let expected = OUTPUT_PRINT.split('\n');

        for (exp, act) in expected.zip(actual_split) {
            assert_eq!(exp, act);
        }
        assert_eq!(OUTPUT_PRINT.len(), actual_full.len());
    }

    #[test]
    fn test_dump_is_a_snapshot() {
        let mut chip = tests::get_default_chip();
        let dump = chip.dump();

        assert_eq!(dump.registers, chip.registers);
        assert_eq!(dump.program_counter, chip.program_counter);
        assert_eq!(dump.stack_pointer, 0);

        // later changes do not leak into the snapshot
        chip.registers[0] = chip.registers[0].wrapping_add(1);
        chip.display[0] = true;
        assert_ne!(dump.registers, chip.registers);
        assert_eq!(chip.display().len(), display::RESOLUTION);
    }

    #[test]
    fn test_dump_print() {
        let mut chip = tests::get_default_chip();
        chip.registers = [0; 16];
        chip.registers[0xF] = 0xAB;
        chip.delay_timer = 0x3C;

        let printed = chip.dump().to_string();

        assert!(printed.contains("\tDelay Timer :\n\t\t0x003C\n"));
        assert!(printed.ends_with("0x0008 - 0x000F : 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x0000 0x00AB"));
    }
}
