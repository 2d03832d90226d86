//! Opcode abstractions, decoding and constants.
use std::{convert::TryFrom, fmt};

use tinyvec::ArrayVec;

use crate::{OpcodeError, ProcessError};

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
/// # use chip::OpcodeError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # let err = OpcodeError::MemoryInvalid {pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(
/// #    Err(err),
/// #    build_opcode(&SPLIT_OPCODE, pointer)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, OpcodeError> {
    // controlling that there is no illegal access here
    match pointer.checked_add(1) {
        Some(next) if next < data.len() => Ok(Opcode::from_be_bytes([data[pointer], data[next]])),
        _ => Err(OpcodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        }),
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// this is an opcode extractor that will return the
    /// opcode type `T` of any opcode
    fn t(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TNNN`
    /// - `T` is the opcode type
    /// - `NNN` is an address
    fn nnn(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TXNN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `NN` is a constant
    fn xnn(&self) -> (usize, u8);

    /// this is an opcode extractor for the opcode type `TXYN`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `Y` is a register index
    /// - `N` is a constant or a opcode subtype
    fn xyn(&self) -> (usize, usize, usize);

    /// this is an opcode extractor for the opcode type `TXYT`
    /// - `T` is the opcode type
    /// - `X` is a register index
    /// - `Y` is a register index
    fn xy(&self) -> (usize, usize);

    /// this is an opcode extractor for the opcode type `TXTT`
    /// - `T` is the opcode type
    /// - `X` is a register index
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> usize {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE_SIZE)) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        let x = self.x();
        let nn = (self & OPCODE_MASK_00FF) as u8;
        (x, nn)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, usize) {
        let (x, y) = self.xy();
        let n = (self & OPCODE_MASK_000F) as usize;
        (x, y, n)
    }

    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xy(), (0xE, 0xD));
    /// ```
    fn xy(&self) -> (usize, usize) {
        let x = self.x();
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        let y = ((self & MASK) >> NIBBLE_SIZE) as usize;
        (x, y)
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
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the program steps that the chip can take after an instruction
/// was executed. The program counter already points past the executed
/// instruction at that moment.
pub enum ProgramCounterStep {
    /// Will leave the program counter at the following instruction
    Next,
    /// Will skip the following instruction
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(usize),
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
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter according to the step.
    fn step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the host.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// If the host shall wait for the next key press
    Wait,
    /// The display buffer changed and should be redrawn
    Draw,
}

/// A single decoded instruction with its typed operands.
///
/// Register indices are `x` and `y`, `kk` is an immediate byte, `n` a nibble
/// count and `nnn` a twelve bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `0nnn` - SYS addr, ignored by modern interpreters
    Sys { nnn: usize },
    /// `00E0` - CLS
    Clear,
    /// `00EE` - RET
    Return,
    /// `1nnn` - JP addr
    Jump { nnn: usize },
    /// `2nnn` - CALL addr
    Call { nnn: usize },
    /// `3xkk` - SE Vx, byte
    SkipEqualByte { x: usize, kk: u8 },
    /// `4xkk` - SNE Vx, byte
    SkipNotEqualByte { x: usize, kk: u8 },
    /// `5xy0` - SE Vx, Vy
    SkipEqual { x: usize, y: usize },
    /// `6xkk` - LD Vx, byte
    LoadByte { x: usize, kk: u8 },
    /// `7xkk` - ADD Vx, byte
    AddByte { x: usize, kk: u8 },
    /// `8xy0` - LD Vx, Vy
    Load { x: usize, y: usize },
    /// `8xy1` - OR Vx, Vy
    Or { x: usize, y: usize },
    /// `8xy2` - AND Vx, Vy
    And { x: usize, y: usize },
    /// `8xy3` - XOR Vx, Vy
    Xor { x: usize, y: usize },
    /// `8xy4` - ADD Vx, Vy
    Add { x: usize, y: usize },
    /// `8xy5` - SUB Vx, Vy
    Sub { x: usize, y: usize },
    /// `8xy6` - SHR Vx
    ShiftRight { x: usize, y: usize },
    /// `8xy7` - SUBN Vx, Vy
    SubReverse { x: usize, y: usize },
    /// `8xyE` - SHL Vx
    ShiftLeft { x: usize, y: usize },
    /// `9xy0` - SNE Vx, Vy
    SkipNotEqual { x: usize, y: usize },
    /// `Annn` - LD I, addr
    LoadIndex { nnn: usize },
    /// `Bnnn` - JP V0, addr
    JumpOffset { nnn: usize },
    /// `Cxkk` - RND Vx, byte
    Random { x: usize, kk: u8 },
    /// `Dxyn` - DRW Vx, Vy, nibble
    Draw { x: usize, y: usize, n: usize },
    /// `Ex9E` - SKP Vx
    SkipKeyPressed { x: usize },
    /// `ExA1` - SKNP Vx
    SkipKeyNotPressed { x: usize },
    /// `Fx07` - LD Vx, DT
    LoadDelayTimer { x: usize },
    /// `Fx0A` - LD Vx, K
    WaitKey { x: usize },
    /// `Fx15` - LD DT, Vx
    SetDelayTimer { x: usize },
    /// `Fx18` - LD ST, Vx
    SetSoundTimer { x: usize },
    /// `Fx1E` - ADD I, Vx
    AddIndex { x: usize },
    /// `Fx29` - LD F, Vx
    LoadFont { x: usize },
    /// `Fx33` - LD B, Vx
    StoreBcd { x: usize },
    /// `Fx55` - LD [I], Vx
    StoreRegisters { x: usize },
    /// `Fx65` - LD Vx, [I]
    LoadRegisters { x: usize },
}

/// The ordered operands of an instruction, at most three are used.
pub type Operands = ArrayVec<[usize; 3]>;

impl Instruction {
    /// The pattern of the instruction, literal nibbles in upper case hex and the
    /// wildcards `x`, `y`, `n`, `kk` and `nnn` in lower case.
    ///
    /// # Example
    /// ```rust
    /// # use std::convert::TryFrom;
    /// # use chip::opcode::Instruction;
    /// let instruction = Instruction::try_from(0x8124).unwrap();
    /// assert_eq!(instruction.pattern(), "8xy4");
    /// ```
    pub fn pattern(&self) -> &'static str {
        match self {
            Instruction::Sys { .. } => "0nnn",
            Instruction::Clear => "00E0",
            Instruction::Return => "00EE",
            Instruction::Jump { .. } => "1nnn",
            Instruction::Call { .. } => "2nnn",
            Instruction::SkipEqualByte { .. } => "3xkk",
            Instruction::SkipNotEqualByte { .. } => "4xkk",
            Instruction::SkipEqual { .. } => "5xy0",
            Instruction::LoadByte { .. } => "6xkk",
            Instruction::AddByte { .. } => "7xkk",
            Instruction::Load { .. } => "8xy0",
            Instruction::Or { .. } => "8xy1",
            Instruction::And { .. } => "8xy2",
            Instruction::Xor { .. } => "8xy3",
            Instruction::Add { .. } => "8xy4",
            Instruction::Sub { .. } => "8xy5",
            Instruction::ShiftRight { .. } => "8xy6",
            Instruction::SubReverse { .. } => "8xy7",
            Instruction::ShiftLeft { .. } => "8xyE",
            Instruction::SkipNotEqual { .. } => "9xy0",
            Instruction::LoadIndex { .. } => "Annn",
            Instruction::JumpOffset { .. } => "Bnnn",
            Instruction::Random { .. } => "Cxkk",
            Instruction::Draw { .. } => "Dxyn",
            Instruction::SkipKeyPressed { .. } => "Ex9E",
            Instruction::SkipKeyNotPressed { .. } => "ExA1",
            Instruction::LoadDelayTimer { .. } => "Fx07",
            Instruction::WaitKey { .. } => "Fx0A",
            Instruction::SetDelayTimer { .. } => "Fx15",
            Instruction::SetSoundTimer { .. } => "Fx18",
            Instruction::AddIndex { .. } => "Fx1E",
            Instruction::LoadFont { .. } => "Fx29",
            Instruction::StoreBcd { .. } => "Fx33",
            Instruction::StoreRegisters { .. } => "Fx55",
            Instruction::LoadRegisters { .. } => "Fx65",
        }
    }

    /// The operand values in the order their wildcards appear in the pattern.
    ///
    /// # Example
    /// ```rust
    /// # use std::convert::TryFrom;
    /// # use chip::opcode::Instruction;
    /// let instruction = Instruction::try_from(0xD457).unwrap();
    /// assert_eq!(&instruction.operands()[..], &[4, 5, 7]);
    /// ```
    pub fn operands(&self) -> Operands {
        let mut operands = Operands::new();
        match *self {
            Instruction::Clear | Instruction::Return => {}
            Instruction::Sys { nnn }
            | Instruction::Jump { nnn }
            | Instruction::Call { nnn }
            | Instruction::LoadIndex { nnn }
            | Instruction::JumpOffset { nnn } => operands.push(nnn),
            Instruction::SkipEqualByte { x, kk }
            | Instruction::SkipNotEqualByte { x, kk }
            | Instruction::LoadByte { x, kk }
            | Instruction::AddByte { x, kk }
            | Instruction::Random { x, kk } => {
                operands.push(x);
                operands.push(kk as usize);
            }
            Instruction::SkipEqual { x, y }
            | Instruction::Load { x, y }
            | Instruction::Or { x, y }
            | Instruction::And { x, y }
            | Instruction::Xor { x, y }
            | Instruction::Add { x, y }
            | Instruction::Sub { x, y }
            | Instruction::ShiftRight { x, y }
            | Instruction::SubReverse { x, y }
            | Instruction::ShiftLeft { x, y }
            | Instruction::SkipNotEqual { x, y } => {
                operands.push(x);
                operands.push(y);
            }
            Instruction::Draw { x, y, n } => {
                operands.push(x);
                operands.push(y);
                operands.push(n);
            }
            Instruction::SkipKeyPressed { x }
            | Instruction::SkipKeyNotPressed { x }
            | Instruction::LoadDelayTimer { x }
            | Instruction::WaitKey { x }
            | Instruction::SetDelayTimer { x }
            | Instruction::SetSoundTimer { x }
            | Instruction::AddIndex { x }
            | Instruction::LoadFont { x }
            | Instruction::StoreBcd { x }
            | Instruction::StoreRegisters { x }
            | Instruction::LoadRegisters { x } => operands.push(x),
        }
        operands
    }
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    /// Decodes the opcode by its nibbles.
    ///
    /// The arms are ordered so that patterns with more literal nibbles are tried
    /// before the ones with more wildcards, `00E0` and `00EE` therefore take
    /// precedence over `0nnn`.
    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let (x, y, n) = value.xyn();
        let (_, kk) = value.xnn();
        let nnn = value.nnn();

        let instruction = match (value.t(), x, y, n) {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0xE, _, 0x9, 0xE) => Instruction::SkipKeyPressed { x },
            (0xE, _, 0xA, 0x1) => Instruction::SkipKeyNotPressed { x },
            (0xF, _, 0x0, 0x7) => Instruction::LoadDelayTimer { x },
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelayTimer { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSoundTimer { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex { x },
            (0xF, _, 0x2, 0x9) => Instruction::LoadFont { x },
            (0xF, _, 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => Instruction::LoadRegisters { x },
            (0x5, _, _, 0x0) => Instruction::SkipEqual { x, y },
            (0x8, _, _, 0x0) => Instruction::Load { x, y },
            (0x8, _, _, 0x1) => Instruction::Or { x, y },
            (0x8, _, _, 0x2) => Instruction::And { x, y },
            (0x8, _, _, 0x3) => Instruction::Xor { x, y },
            (0x8, _, _, 0x4) => Instruction::Add { x, y },
            (0x8, _, _, 0x5) => Instruction::Sub { x, y },
            (0x8, _, _, 0x6) => Instruction::ShiftRight { x, y },
            (0x8, _, _, 0x7) => Instruction::SubReverse { x, y },
            (0x8, _, _, 0xE) => Instruction::ShiftLeft { x, y },
            (0x9, _, _, 0x0) => Instruction::SkipNotEqual { x, y },
            (0x0, ..) => Instruction::Sys { nnn },
            (0x1, ..) => Instruction::Jump { nnn },
            (0x2, ..) => Instruction::Call { nnn },
            (0x3, ..) => Instruction::SkipEqualByte { x, kk },
            (0x4, ..) => Instruction::SkipNotEqualByte { x, kk },
            (0x6, ..) => Instruction::LoadByte { x, kk },
            (0x7, ..) => Instruction::AddByte { x, kk },
            (0xA, ..) => Instruction::LoadIndex { nnn },
            (0xB, ..) => Instruction::JumpOffset { nnn },
            (0xC, ..) => Instruction::Random { x, kk },
            (0xD, ..) => Instruction::Draw { x, y, n },
            _ => return Err(OpcodeError::InvalidOpcode(value)),
        };
        Ok(instruction)
    }
}

/// Prints the instruction in the common assembler syntax, e.g. `LD V1, 0x2A`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Sys { nnn } => write!(f, "SYS {:#06X}", nnn),
            Instruction::Clear => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump { nnn } => write!(f, "JP {:#06X}", nnn),
            Instruction::Call { nnn } => write!(f, "CALL {:#06X}", nnn),
            Instruction::SkipEqualByte { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SkipNotEqualByte { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SkipEqual { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LoadByte { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddByte { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::Load { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::Add { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight { x, .. } => write!(f, "SHR V{:X}", x),
            Instruction::SubReverse { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft { x, .. } => write!(f, "SHL V{:X}", x),
            Instruction::SkipNotEqual { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LoadIndex { nnn } => write!(f, "LD I, {:#06X}", nnn),
            Instruction::JumpOffset { nnn } => write!(f, "JP V0, {:#06X}", nnn),
            Instruction::Random { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LoadDelayTimer { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelayTimer { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSoundTimer { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadFont { x } => write!(f, "LD F, V{:X}", x),
            Instruction::StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the  [`ProgramCounter`](ProgramCounter) trait, as
/// every executed instruction ends with a program counter step.
pub trait ChipOpcodes: ProgramCounter {
    /// will run a single, already decoded instruction and move the program counter
    fn calc(&mut self, instruction: &Instruction) -> Result<Operation, ProcessError> {
        let (step, operation) = self.execute(instruction)?;
        self.step(step);
        Ok(operation)
    }

    /// Applies the semantics of the instruction.
    ///
    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte and `NN`.
    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a `8xN` sprite at `(VX, VY)`, `VF` is set on collision.
    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the sprite for the character in `VX`.
    /// - `FX33` - BCD      - `set_BCD(Vx)`         - Stores the binary-coded decimal representation of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`.
    ///
    /// Returns any possible error
    fn execute(
        &mut self,
        instruction: &Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}
