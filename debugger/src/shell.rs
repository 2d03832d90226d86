use std::io::{self, BufRead, Write};

use chip::chip8::{ChipSet, Disassembly, State};

use crate::command::{Command, COMMANDS};

const PROMPT: &str = "(debugger) ";

/// A minimal line based shell around a single chipset.
pub struct Shell<R, W> {
    chip: ChipSet,
    input: R,
    output: W,
    last_command: Option<Command>,
}

impl<R, W> Shell<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(chip: ChipSet, input: R, output: W) -> Self {
        Self {
            chip,
            input,
            output,
            last_command: None,
        }
    }

    /// Will read and execute commands until `quit` or the end of the input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut line = String::new();
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }

            // an empty line repeats the last command
            let command = if line.trim().is_empty() {
                match self.last_command {
                    Some(command) => command,
                    None => continue,
                }
            } else {
                match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        writeln!(self.output, "{}", err)?;
                        continue;
                    }
                }
            };

            log::debug!("executing {:?}", command);
            self.last_command = Some(command);
            if let Command::Quit = command {
                return Ok(());
            }
            self.execute(command)?;
        }
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Disassemble { address, count } => {
                for entry in self.chip.disassemble(address, count) {
                    self.print_entry(&entry)?;
                }
            }
            Command::Registers => self.print_registers()?,
            Command::Step { count } => self.step(count)?,
            Command::Video => writeln!(self.output, "{}", self.chip.get_display())?,
            Command::Dump { address, count } => {
                writeln!(self.output, "{}", self.chip.dump(address, count))?
            }
            Command::Press { key } => self.chip.get_keyboard_mut().set_pressed(key),
            Command::Release { key } => self.chip.get_keyboard_mut().set_released(key),
            Command::Tick { count } => {
                for _ in 0..count {
                    self.chip.tick_timers();
                }
            }
            Command::Help => {
                for (name, short, usage) in COMMANDS.iter() {
                    writeln!(self.output, "{:<12} {:<3} {}", name, short, usage)?;
                }
            }
            Command::Quit => {}
        }
        Ok(())
    }

    fn print_entry(&mut self, entry: &Disassembly) -> io::Result<()> {
        let marker = if entry.address == self.chip.get_program_counter() {
            " <<<"
        } else {
            ""
        };
        writeln!(self.output, "{}{}", entry, marker)
    }

    fn print_registers(&mut self) -> io::Result<()> {
        for (index, value) in self.chip.get_registers().iter().enumerate() {
            writeln!(self.output, "V{:X}: {:#04X}", index, value)?;
        }
        writeln!(self.output, "I: {:#06X}", self.chip.get_index_register())?;
        writeln!(self.output, "DT: {:#04X}", self.chip.get_delay_timer())?;
        writeln!(self.output, "ST: {:#04X}", self.chip.get_sound_timer())?;
        writeln!(self.output, "PC: {:#06X}", self.chip.get_program_counter())?;
        writeln!(self.output, "SP: {:#04X}", self.chip.get_stack_pointer())?;
        writeln!(self.output, "State: {}", self.chip.get_state())
    }

    fn step(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            match self.chip.get_state() {
                State::Running => {
                    let pc = self.chip.get_program_counter();
                    if let Some(entry) = self.chip.disassemble(pc, 1).first() {
                        self.print_entry(entry)?;
                    }
                }
                state @ State::AwaitingKey(_) => writeln!(self.output, "{}", state)?,
            }

            if let Err(err) = self.chip.next() {
                writeln!(self.output, "{}", err)?;
                break;
            }
        }
        Ok(())
    }
}
