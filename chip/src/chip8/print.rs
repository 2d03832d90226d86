//! The pretty print implementation for the [`chipset`](super::ChipSet), together with the
//! disassembly and memory dump used to inspect a running program.
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use std::{
    convert::TryFrom,
    fmt::{self, Write},
};

use once_cell::sync::Lazy;

use super::ChipSet;
use crate::{
    definitions::{cpu, keyboard, memory},
    devices::{DisplayBuffer, KeyState},
    opcode::{self, Instruction, Opcode},
};

/// The length of the pretty print data
/// as a single instruction is u16 the octa
/// size will show how often the block shall
/// be repeated has to be bigger then 0
const HEX_PRINT_STEP: usize = 8;

/// The amount of bytes per line in a memory dump
const DUMP_STEP: usize = 16;

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

static POINTER_LEN: Lazy<usize> =
    Lazy::new(|| format!(concat!(intformat!(), " - ", intformat!(), " :"), 0, 0).len());

static INTEGER_LEN: Lazy<usize> = Lazy::new(|| format!(intformat!(), 0u8).len());

// calculate a line lenght (This is a bit bigger then the actual line will be)
static LENLINE: Lazy<usize> =
    Lazy::new(|| INDENT_SIZE + HEX_PRINT_STEP * (*INTEGER_LEN + 1) + 1 + *POINTER_LEN);

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::{self, Write};

    /// will formatt the pointers according to definition
    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> fmt::Result {
        write!(
            line,
            concat!(intformat!(), " - ", intformat!(), " :"),
            from, to
        )
    }
}

/// Handles all the opcode prints
mod opcode_print {
    use super::{integer_print, pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use crate::{definitions::memory, opcode::Opcode};
    use once_cell::sync::Lazy;
    use std::fmt::{self, Write};

    /// The internal length of the given data
    /// as the data is stored as u8 and an opcode
    /// is u16 long
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;
    /// The values that are used when there are at lease two rows of zeros.
    const FILLER_BASE: &str = "...";

    /// Prepares the line that will be used, in the case that there is at least two lines of
    /// only zeros.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let formatted = format!(intformat!(), 0u16);
        let length =
            formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1) - FILLER_BASE.len();
        let filler = " ".repeat(length / 2);

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

            if self.only_null {
                res.push_str(&ZERO_FILLER);
            } else {
                for entry in self.data.iter() {
                    integer_print::formatter(&mut res, *entry)?;
                    res.push(' ');
                }
                res.pop();
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the content of the raw memory
    /// this functions assumes the full data to be passed
    /// as the offset is calculated from the beginning of the
    /// memory block
    pub(super) fn printer(memory: &[u8], indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::with_capacity(memory.len() / POINTER_INCREMENT + 1);

        for (index, chunk) in memory.chunks(POINTER_INCREMENT).enumerate() {
            let from = index * POINTER_INCREMENT;
            let to = from + chunk.len() - 1;

            let mut data = [0; HEX_PRINT_STEP];
            for (entry, bytes) in data.iter_mut().zip(chunk.chunks_exact(memory::opcodes::SIZE)) {
                *entry = Opcode::from_be_bytes([bytes[0], bytes[1]]);
            }
            let only_null = data.iter().all(|entry| *entry == 0);

            // create the row that shall be used later on
            let mut row = Row {
                from,
                to,
                data,
                only_null,
            };

            // consecutive rows of zeros are merged into one
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

        let mut string = String::with_capacity((*super::LENLINE + 1) * rows.len());
        for row in rows {
            super::indent_helper(&mut string, indent);
            write!(string, "{}{}", row, END_OF_LINE)?;
        }
        string.pop();

        Ok(string)
    }
}

/// handles printting of any and all of intergers.
mod integer_print {
    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use num_traits::Unsigned;
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        write!(line, intformat!(), data)
    }

    /// will pretty print all the integer data given
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Unsigned + Copy,
    {
        let mut res = String::with_capacity(*super::LENLINE * (data.len() / HEX_PRINT_STEP + 1));

        for (index, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = index * HEX_PRINT_STEP;

            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(END_OF_LINE);
        }

        // Remove unneded new line
        res.pop();
        Ok(res)
    }
}

/// Handles all the boolean data types.
mod bool_print {
    use super::{pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use once_cell::sync::Lazy;
    use std::fmt;

    /// the prepared true string
    static TRUE: Lazy<String> = Lazy::new(|| formatter("true"));
    /// the prepared false string
    static FALSE: Lazy<String> = Lazy::new(|| formatter("false"));

    /// a function to keep the correct format length
    fn formatter(message: &str) -> String {
        format!("{:<width$}", message, width = *super::INTEGER_LEN)
    }

    /// will pretty print all the boolean data given
    /// the offset will be calculated automatically from
    /// the data block
    pub(super) fn printer(data: &[bool], indent: usize) -> Result<String, fmt::Error> {
        let mut res = String::with_capacity(*super::LENLINE * (data.len() / HEX_PRINT_STEP + 1));

        let check_type = |val: bool| if val { &*TRUE } else { &*FALSE };

        for (index, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = index * HEX_PRINT_STEP;
            super::indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for value in chunk {
                res.push(' ');
                res.push_str(check_type(*value));
            }
            // the padding of the last entry is not needed
            res.truncate(res.trim_end().len());
            res.push(END_OF_LINE);
        }
        // Remove unneeded new line
        res.pop();

        Ok(res)
    }
}

/// A single disassembled memory location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disassembly {
    /// the address of the opcode
    pub address: usize,
    /// the raw opcode
    pub opcode: Opcode,
    /// the decoded instruction, `None` if the opcode is not valid
    pub instruction: Option<Instruction>,
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, concat!(intformat!(), " ", intformat!(), " "), self.address, self.opcode)?;
        match self.instruction {
            Some(instruction) => write!(f, "{}", instruction),
            None => write!(f, "*** Unknown instruction"),
        }
    }
}

impl<D, K> ChipSet<D, K>
where
    D: DisplayBuffer,
    K: KeyState,
{
    /// Will decode `count` opcodes starting at `from`, invalid opcodes are
    /// kept with a missing instruction. Stops early at the end of memory.
    pub fn disassemble(&self, from: usize, count: usize) -> Vec<Disassembly> {
        if from >= memory::SIZE {
            return Vec::new();
        }

        (from..memory::SIZE)
            .step_by(memory::opcodes::SIZE)
            .take(count)
            .map_while(|address| {
                let opcode = opcode::build_opcode(&self.memory, address).ok()?;
                Some(Disassembly {
                    address,
                    opcode,
                    instruction: Instruction::try_from(opcode).ok(),
                })
            })
            .collect()
    }

    /// Will return a hex dump of `count` bytes starting at `from`, with
    /// sixteen bytes per line.
    pub fn dump(&self, from: usize, count: usize) -> String {
        let from = from.min(memory::SIZE);
        let to = from.saturating_add(count).min(memory::SIZE);

        let mut res = String::with_capacity((to - from) * 3 + (to - from) / DUMP_STEP * 10);
        for (index, chunk) in self.memory[from..to].chunks(DUMP_STEP).enumerate() {
            res.push_str(&format!(concat!(intformat!(), " :"), from + index * DUMP_STEP));
            for byte in chunk {
                res.push_str(&format!(" {:02X}", byte));
            }
            res.push(END_OF_LINE);
        }
        res.pop();
        res
    }
}

impl<D, K> fmt::Display for ChipSet<D, K>
where
    D: DisplayBuffer,
    K: KeyState,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // prepate the rom name
        let mut nam = String::with_capacity(INDENT_SIZE + self.name.len());
        indent_helper(&mut nam, INDENT_SIZE);
        nam.push_str(&self.name);

        let single = |value: usize| -> Result<String, fmt::Error> {
            let mut line = String::with_capacity(*INTEGER_LEN + INDENT_SIZE);
            indent_helper(&mut line, INDENT_SIZE);
            integer_print::formatter(&mut line, value)?;
            Ok(line)
        };

        let opc = single(self.opcode as usize)?;
        let prc = single(self.program_counter)?;
        let idx = single(self.index_register)?;
        let stp = single(self.stack.len())?;
        let dly = single(self.get_delay_timer() as usize)?;
        let snd = single(self.get_sound_timer() as usize)?;

        let mut sta = String::new();
        indent_helper(&mut sta, INDENT_SIZE);
        write!(sta, "{}", self.state)?;

        let mem = opcode_print::printer(&self.memory, INDENT_SIZE)?;

        let keys: Vec<bool> = (0..keyboard::SIZE as u8)
            .map(|key| self.keyboard.is_pressed(key))
            .collect();
        let key = bool_print::printer(&keys, INDENT_SIZE)?;

        // handle stack specially as it needes to be filled up if empty
        let mut stack = [0; cpu::stack::SIZE];
        stack[0..self.stack.len()].copy_from_slice(&self.stack);
        let stk = integer_print::printer(&stack, INDENT_SIZE)?;

        let reg = integer_print::printer(&self.registers, INDENT_SIZE)?;

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex Register :\n{}\n\
                \tStack Pointer :\n{}\n\
                \tDelay Timer :\n{}\n\
                \tSound Timer :\n{}\n\
                \tState :\n{}\n\
                \tMemory :\n{}\n\
                \tKeyboard :\n{}\n\
                \tStack :\n{}\n\
                \tRegister :\n{}\n\
                }}",
            nam, opc, prc, idx, stp, dly, snd, sta, mem, key, stk, reg
        )
    }
}
