use std::{convert::TryFrom, fmt, ops::Range};

use {
    crate::{
        definitions::{cpu, display, keyboard, memory},
        devices::{Display, DisplayBuffer, KeyState, Keyboard},
        opcode::{
            self, ChipOpcodes, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep,
        },
        resources::Rom,
        timer::{Timed, Timer},
        MemoryError, ProcessError, RomError, StackError,
    },
    rand::RngCore,
    tinyvec::ArrayVec,
};

/// The execution state of the chipset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Normal fetch and execute
    Running,
    /// `FX0A` was executed, every step polls the keyboard instead of running the
    /// next instruction until a key is found, which is then stored in the register.
    AwaitingKey(usize),
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Running => write!(f, "Running"),
            State::AwaitingKey(register) => write!(f, "Awaiting key for V{:X}", register),
        }
    }
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet<D = Display, K = Keyboard>
where
    D: DisplayBuffer,
    K: KeyState,
{
    /// name of the loaded rom
    pub(super) name: String,
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x050-0x0A0` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: usize,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; modern implementations usually have more.
    /// (here we are using `16`)
    /// The length of the stack doubles as the stack pointer.
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: Timer,
    /// Running or waiting for a key press
    pub(super) state: State,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`.
    pub(super) display: D,
    /// Input is done with a hex keyboard that has 16 keys ranging `0-F`.
    pub(super) keyboard: K,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl ChipSet<Display, Keyboard> {
    /// will create a new chipset object with the default display and keyboard
    pub fn new(rom: Rom) -> Result<Self, RomError> {
        Self::with_devices(rom, Display::new(), Keyboard::new())
    }
}

impl<D, K> ChipSet<D, K>
where
    D: DisplayBuffer,
    K: KeyState,
{
    /// will create a new chipset object drawing to the given display and reading the given
    /// keyboard
    pub fn with_devices(rom: Rom, display: D, keyboard: K) -> Result<Self, RomError> {
        // initialize all the memory with 0
        let mut ram = vec![0; memory::SIZE];

        // load fonts
        ram[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);

        let mut chip = Self {
            name: String::new(),
            opcode: 0,
            memory: ram,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            state: State::Running,
            display,
            keyboard,
            rng: Box::new(rand::rngs::OsRng),
        };

        chip.load(&rom)?;
        Ok(chip)
    }

    /// Will replace the random number generator, used to get reproducible
    /// results from `CXNN`.
    pub fn with_rng<R>(mut self, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        self.rng = Box::new(rng);
        self
    }

    /// Will start a new session with the given rom: the program area is
    /// cleared and the rom written into it, the cpu state is reset and the
    /// program counter points at the first instruction. The font set, the
    /// display and the keyboard are kept.
    pub fn load(&mut self, rom: &Rom) -> Result<(), RomError> {
        let data = rom.get_data();
        if data.len() > cpu::PROGRAM_SIZE {
            return Err(RomError::TooLarge {
                len: data.len(),
                max: cpu::PROGRAM_SIZE,
            });
        }

        let program = &mut self.memory[cpu::PROGRAM_COUNTER..];
        program.fill(0);
        program[..data.len()].copy_from_slice(data);

        self.name = rom.get_name().to_string();
        self.opcode = 0;
        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.delay_timer.set_value(0);
        self.sound_timer.set_value(0);
        self.state = State::Running;

        log::debug!("loaded rom {} with {} bytes", self.name, data.len());
        Ok(())
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), ProcessError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory, self.program_counter)?;
        Ok(())
    }

    /// will advance the program by a single step
    ///
    /// While the chipset awaits a key press this will only poll the keyboard
    /// and return [`Operation::Wait`] until a key is found.
    pub fn next(&mut self) -> Result<Operation, ProcessError> {
        if let State::AwaitingKey(register) = self.state {
            return Ok(self.poll_key(register));
        }

        // get next opcode
        self.set_opcode()?;
        let instruction = Instruction::try_from(self.opcode)?;
        log::debug!(
            "{:#06X}: {:#06X} {}",
            self.program_counter,
            self.opcode,
            instruction
        );

        // the counter points to the following instruction while this one runs
        self.program_counter = (self.program_counter + memory::opcodes::SIZE) & memory::ADDRESS_MASK;

        // run the opcode
        self.calc(&instruction)
    }

    /// Will store the lowest pressed key into the register and resume execution.
    fn poll_key(&mut self, register: usize) -> Operation {
        let pressed = (0..keyboard::SIZE as u8).find(|key| self.keyboard.is_pressed(*key));

        match pressed {
            Some(key) => {
                log::debug!("key {:#X} pressed, stored into V{:X}", key, register);
                self.registers[register] = key;
                self.state = State::Running;
                Operation::None
            }
            None => Operation::Wait,
        }
    }

    /// Will count both timers down by one, has to be called at 60Hz by the host.
    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer.tick();
        log::trace!(
            "timers ticked delay {} sound {}",
            self.delay_timer.get_value(),
            self.sound_timer.get_value()
        );
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer.get_value()
    }

    /// Will return the display the chipset draws to
    pub fn get_display(&self) -> &D {
        &self.display
    }

    /// Will return the keyboard the chipset reads from
    pub fn get_keyboard(&self) -> &K {
        &self.keyboard
    }

    /// Will return the keyboard, so that the host can press and release keys
    pub fn get_keyboard_mut(&mut self) -> &mut K {
        &mut self.keyboard
    }

    /// Will return the name of the loaded rom
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Will return the registers `V0` to `VF`
    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    /// Will return the index register `I`
    pub fn get_index_register(&self) -> usize {
        self.index_register
    }

    /// Will return the address of the next instruction
    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    /// Will return the return addresses on the stack, the latest one last
    pub fn get_stack(&self) -> &[usize] {
        &self.stack
    }

    /// The stack pointer is the amount of entries on the stack
    pub fn get_stack_pointer(&self) -> usize {
        self.stack.len()
    }

    /// Will return the whole `4096` bytes of memory
    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    /// Will return if the chipset is running or awaiting a key press
    pub fn get_state(&self) -> State {
        self.state
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        if self.stack.len() == self.stack.capacity() {
            Err(StackError::Full)
        } else {
            self.stack.push(pointer);
            Ok(())
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }
}

/// Returns the memory range `from..from + len` or an error if it would run
/// past the end of memory.
pub(super) fn memory_range(from: usize, len: usize) -> Result<Range<usize>, MemoryError> {
    let to = from + len;
    if to <= memory::SIZE {
        Ok(from..to)
    } else {
        Err(MemoryError::OutOfBounds { from, len })
    }
}

impl<D: DisplayBuffer, K: KeyState> ProgramCounter for ChipSet<D, K> {
    fn step(&mut self, step: ProgramCounterStep) {
        let pointer = match step {
            ProgramCounterStep::Next => self.program_counter,
            ProgramCounterStep::Skip => self.program_counter + memory::opcodes::SIZE,
            ProgramCounterStep::Jump(pointer) => pointer,
        };
        self.program_counter = pointer & memory::ADDRESS_MASK;
    }
}
