use crate::{
    definitions::{cpu, display, keyboard, memory},
    devices::{DisplayBuffer, KeyState},
    opcode::{ChipOpcodes, Instruction, Operation, ProgramCounterStep},
    timer::Timed,
    MemoryError, ProcessError,
};
use rand::RngCore;

use super::{chipset::memory_range, ChipSet, State};

/// The amount of pixels a single sprite row is wide
const SPRITE_WIDTH: usize = 8;

impl<D, K> ChipSet<D, K>
where
    D: DisplayBuffer,
    K: KeyState,
{
    /// Will check if the key stored in the register is pressed
    fn key_pressed(&self, x: usize) -> bool {
        let key = self.registers[x];
        if key as usize >= keyboard::SIZE {
            log::warn!("V{:X} holds {:#04X}, which is not a key", x, key);
        }
        self.keyboard.is_pressed(key)
    }

    /// Draws the `8xN` sprite at `I` to the position `(VX, VY)`. Pixels beyond
    /// the right or bottom edge are not drawn. `VF` is set to 1 if any lit
    /// pixel got unlit.
    fn draw(&mut self, x: usize, y: usize, n: usize) -> Result<(), MemoryError> {
        let origin_x = self.registers[x] as usize;
        let origin_y = self.registers[y] as usize;
        let sprite = memory_range(self.index_register, n)?;

        self.registers[cpu::register::LAST] = 0;
        let (width, height) = (self.display.width(), self.display.height());

        for (row, line) in self.memory[sprite].iter().enumerate() {
            let y = origin_y + row;
            if y >= height {
                break;
            }

            for column in 0..SPRITE_WIDTH {
                let x = origin_x + column;
                if x >= width {
                    break;
                }
                // a zero bit leaves the pixel as is
                if line & (0x80u8 >> column) == 0 {
                    continue;
                }

                let lit = self.display.get(x, y);
                if lit {
                    self.registers[cpu::register::LAST] = 1;
                }
                self.display.set(x, y, !lit);
            }
        }
        Ok(())
    }
}

impl<D, K> ChipOpcodes for ChipSet<D, K>
where
    D: DisplayBuffer,
    K: KeyState,
{
    fn execute(
        &mut self,
        instruction: &Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let mut operation = Operation::None;

        let step = match *instruction {
            Instruction::Sys { nnn } => {
                // 0NNN
                // Calls machine code routine at address NNN. Not necessary for most ROMs.
                log::warn!("ignoring machine code routine at {:#06X}", nnn);
                ProgramCounterStep::Next
            }
            Instruction::Clear => {
                // 00E0
                // clear display
                self.display.clear();
                operation = Operation::Draw;
                ProgramCounterStep::Next
            }
            Instruction::Return => {
                // 00EE
                // Return from sub routine => pop from stack
                let pc = self.pop_stack()?;
                log::debug!("return to {:#06X}", pc);
                ProgramCounterStep::Jump(pc)
            }
            Instruction::Jump { nnn } => {
                // 1NNN
                // Jumps to address NNN.
                ProgramCounterStep::Jump(nnn)
            }
            Instruction::Call { nnn } => {
                // 2NNN
                // Calls subroutine at NNN, the program counter already points at the
                // instruction to return to.
                self.push_stack(self.program_counter)?;
                ProgramCounterStep::Jump(nnn)
            }
            Instruction::SkipEqualByte { x, kk } => {
                // 3XNN
                // Skips the next instruction if VX equals NN.
                ProgramCounterStep::cond(self.registers[x] == kk)
            }
            Instruction::SkipNotEqualByte { x, kk } => {
                // 4XNN
                // Skips the next instruction if VX doesn't equal NN.
                ProgramCounterStep::cond(self.registers[x] != kk)
            }
            Instruction::SkipEqual { x, y } => {
                // 5XY0
                // Skips the next instruction if VX equals VY.
                ProgramCounterStep::cond(self.registers[x] == self.registers[y])
            }
            Instruction::LoadByte { x, kk } => {
                // 6XNN
                // Sets VX to NN.
                self.registers[x] = kk;
                ProgramCounterStep::Next
            }
            Instruction::AddByte { x, kk } => {
                // 7XNN
                // Adds NN to VX. (Carry flag is not changed)
                self.registers[x] = self.registers[x].wrapping_add(kk);
                ProgramCounterStep::Next
            }
            Instruction::Load { x, y } => {
                // 8XY0
                // Sets VX to the value of VY.
                self.registers[x] = self.registers[y];
                ProgramCounterStep::Next
            }
            Instruction::Or { x, y } => {
                // 8XY1
                // Sets VX to VX or VY. (Bitwise OR operation)
                self.registers[x] |= self.registers[y];
                ProgramCounterStep::Next
            }
            Instruction::And { x, y } => {
                // 8XY2
                // Sets VX to VX and VY. (Bitwise AND operation)
                self.registers[x] &= self.registers[y];
                ProgramCounterStep::Next
            }
            Instruction::Xor { x, y } => {
                // 8XY3
                // Sets VX to VX xor VY.
                self.registers[x] ^= self.registers[y];
                ProgramCounterStep::Next
            }
            Instruction::Add { x, y } => {
                // 8XY4
                // Adds VY to VX. VF is set to 1 when there's a carry, and to 0 when there
                // isn't.
                let (result, carry) = self.registers[x].overflowing_add(self.registers[y]);
                self.registers[x] = result;
                self.registers[cpu::register::LAST] = carry as u8;
                ProgramCounterStep::Next
            }
            Instruction::Sub { x, y } => {
                // 8XY5
                // VY is subtracted from VX. VF is set to 0 when there's a borrow, and 1 when
                // there isn't.
                let (result, borrow) = self.registers[x].overflowing_sub(self.registers[y]);
                self.registers[x] = result;
                self.registers[cpu::register::LAST] = (!borrow) as u8;
                ProgramCounterStep::Next
            }
            Instruction::ShiftRight { x, .. } => {
                // 8XY6
                // Stores the least significant bit of VX in VF and then shifts VX to the
                // right by 1.
                let value = self.registers[x];
                self.registers[x] = value >> 1;
                self.registers[cpu::register::LAST] = value & 0x1;
                ProgramCounterStep::Next
            }
            Instruction::SubReverse { x, y } => {
                // 8XY7
                // Sets VX to VY minus VX. VF is set to 0 when there's a borrow, and 1 when
                // there isn't.
                let (result, borrow) = self.registers[y].overflowing_sub(self.registers[x]);
                self.registers[x] = result;
                self.registers[cpu::register::LAST] = (!borrow) as u8;
                ProgramCounterStep::Next
            }
            Instruction::ShiftLeft { x, .. } => {
                // 8XYE
                // Stores the most significant bit of VX in VF and then shifts VX to the
                // left by 1.
                let value = self.registers[x];
                self.registers[x] = value << 1;
                self.registers[cpu::register::LAST] = value >> 7;
                ProgramCounterStep::Next
            }
            Instruction::SkipNotEqual { x, y } => {
                // 9XY0
                // Skips the next instruction if VX doesn't equal VY.
                ProgramCounterStep::cond(self.registers[x] != self.registers[y])
            }
            Instruction::LoadIndex { nnn } => {
                // ANNN
                // Sets I to the address NNN.
                self.index_register = nnn;
                ProgramCounterStep::Next
            }
            Instruction::JumpOffset { nnn } => {
                // BNNN
                // Jumps to the address NNN plus V0.
                ProgramCounterStep::Jump(nnn + self.registers[0] as usize)
            }
            Instruction::Random { x, kk } => {
                // CXNN
                // Sets VX to the result of a bitwise and operation on a random number and NN.
                let mut random = [0u8; 1];
                self.rng.fill_bytes(&mut random);
                self.registers[x] = random[0] & kk;
                ProgramCounterStep::Next
            }
            Instruction::Draw { x, y, n } => {
                // DXYN
                // Draws a sprite at coordinate (VX, VY) that has a width of 8 pixels and a
                // height of N pixels. Each row of 8 pixels is read as bit-coded starting from
                // memory location I.
                self.draw(x, y, n)?;
                operation = Operation::Draw;
                ProgramCounterStep::Next
            }
            Instruction::SkipKeyPressed { x } => {
                // EX9E
                // Skips the next instruction if the key stored in VX is pressed.
                ProgramCounterStep::cond(self.key_pressed(x))
            }
            Instruction::SkipKeyNotPressed { x } => {
                // EXA1
                // Skips the next instruction if the key stored in VX isn't pressed.
                ProgramCounterStep::cond(!self.key_pressed(x))
            }
            Instruction::LoadDelayTimer { x } => {
                // FX07
                // Sets VX to the value of the delay timer.
                self.registers[x] = self.delay_timer.get_value();
                ProgramCounterStep::Next
            }
            Instruction::WaitKey { x } => {
                // FX0A
                // A key press is awaited, and then stored in VX. The following steps poll
                // the keyboard until then.
                self.state = State::AwaitingKey(x);
                operation = Operation::Wait;
                ProgramCounterStep::Next
            }
            Instruction::SetDelayTimer { x } => {
                // FX15
                // Sets the delay timer to VX.
                self.delay_timer.set_value(self.registers[x]);
                ProgramCounterStep::Next
            }
            Instruction::SetSoundTimer { x } => {
                // FX18
                // Sets the sound timer to VX.
                self.sound_timer.set_value(self.registers[x]);
                ProgramCounterStep::Next
            }
            Instruction::AddIndex { x } => {
                // FX1E
                // Adds VX to I. VF is not affected.
                self.index_register =
                    (self.index_register + self.registers[x] as usize) & memory::ADDRESS_MASK;
                ProgramCounterStep::Next
            }
            Instruction::LoadFont { x } => {
                // FX29
                // Sets I to the location of the sprite for the character in VX.
                let character = self.registers[x] as usize;
                if character > 0xF {
                    log::warn!("V{:X} holds {:#04X}, which has no font sprite", x, character);
                }
                self.index_register = display::fontset::LOCATION
                    + character * display::fontset::CHARACTER_SIZE;
                ProgramCounterStep::Next
            }
            Instruction::StoreBcd { x } => {
                // FX33
                // Stores the binary-coded decimal representation of VX, with the most
                // significant of three digits at the address in I.
                let range = memory_range(self.index_register, 3)?;
                let value = self.registers[x];
                self.memory[range].copy_from_slice(&[value / 100, (value / 10) % 10, value % 10]);
                ProgramCounterStep::Next
            }
            Instruction::StoreRegisters { x } => {
                // FX55
                // Stores V0 to VX (including VX) in memory starting at address I. I itself
                // is left unmodified.
                let range = memory_range(self.index_register, x + 1)?;
                self.memory[range].copy_from_slice(&self.registers[..=x]);
                ProgramCounterStep::Next
            }
            Instruction::LoadRegisters { x } => {
                // FX65
                // Fills V0 to VX (including VX) with values from memory starting at address
                // I. I itself is left unmodified.
                let range = memory_range(self.index_register, x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[range]);
                ProgramCounterStep::Next
            }
        };

        Ok((step, operation))
    }
}
