//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::config::{self, Config};
use crate::emulator::display::Display;
use crate::emulator::error::{Error, Fault};
use crate::emulator::input::Keypad;
use crate::emulator::instruction::*;
use crate::emulator::memory::{self, Memory};
use crate::emulator::observer::Observer;
use crate::emulator::random::{RandomSource, RngSource};
use crate::emulator::stack::CallStack;
use crate::emulator::timers::Timers;
use crate::util::opcode::Opcode;
use std::fmt;

const NUM_REGISTERS: usize = 16;
const FLAG: usize = 0xF;

/// What a successful call to [`Emulator::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(Instruction),
    /// `Fx0A` found no key down. The program counter was not moved,
    /// update the keypad and step again.
    Blocked { register: u8 },
    /// Not an instruction, nothing happened except moving past it.
    Unknown { opcode: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MachineState {
    Running,
    AwaitingKey { register: u8 },
    /// Stopped by a fault, only [`Emulator::reset`] gets it going again.
    Halted(Fault),
}

/// A copy of the registers and stack at some point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub registers: [u8; NUM_REGISTERS],
    pub i: u16,
    pub program_counter: u16,
    pub stack_pointer: usize,
    pub stack: Vec<u16>,
    pub delay_timer: u8,
    pub sound_timer: u8,
}

/// Where the program counter goes after an instruction.
enum Flow {
    Next,
    Skip,
    Jump(u16),
    Wait(u8),
}

impl Flow {
    fn skip_if(condition: bool) -> Flow {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

pub struct Emulator {
    config: Config,
    memory: Memory,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack: CallStack,
    timers: Timers,
    display: Display,
    keypad: Keypad,
    random: Box<dyn RandomSource>,
    observer: Option<Box<dyn Observer>>,
    state: MachineState,
    // Last loaded program, restored by reset
    program: Vec<u8>,
}

impl fmt::Display for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display)
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {

    /// Create a new emulator with the standard 4K memory, 16 level stack and 64x32 screen.
    pub fn new() -> Emulator {
        Emulator::build(Config::default())
    }

    /// Create a new emulator with custom capacities.
    pub fn with_config(config: Config) -> Result<Emulator, Error> {
        config.validate()?;
        Ok(Emulator::build(config))
    }

    fn build(config: Config) -> Emulator {
        Emulator {
            config,
            memory: Memory::new(config.memory_size, config.program_start),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: config.program_start as u16,
            stack: CallStack::new(config.stack_depth),
            timers: Timers::default(),
            display: Display::new(config.display_width, config.display_height),
            keypad: Keypad::new(),
            random: Box::new(RngSource::from_entropy()),
            observer: None,
            state: MachineState::Running,
            program: Vec::new(),
        }
    }

    /// Copy a program into memory at the program start.
    /// A program that does not fit is rejected and memory is left as it was.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Error> {
        self.memory.load(program)?;
        self.program = program.to_vec();
        Ok(())
    }

    /// Back to the power-on state, with the last loaded program in memory again.
    /// Keypad, random source and observer are kept.
    pub fn reset(&mut self) {
        let config = self.config;
        self.memory = Memory::new(config.memory_size, config.program_start);
        if let Err(error) = self.memory.load(&self.program) {
            // Only programs that fit are ever stored
            log::error!("Could not reload program: {}", error);
        }
        self.registers = [0; NUM_REGISTERS];
        self.i = 0;
        self.program_counter = config.program_start as u16;
        self.stack = CallStack::new(config.stack_depth);
        self.timers = Timers::default();
        self.display = Display::new(self.display.width(), self.display.height());
        self.state = MachineState::Running;
        log::debug!("Reset");
    }

    /// Fetch, decode and execute a single instruction.
    ///
    /// A fault halts the machine, and every later step reports the same
    /// fault until the machine is reset.
    pub fn step(&mut self) -> Result<Step, Fault> {
        if let MachineState::Halted(fault) = &self.state {
            return Err(fault.clone());
        }

        let pc = self.program_counter;
        let opcode = match self.fetch() {
            Ok(opcode) => opcode,
            Err(fault) => return Err(self.halt(fault)),
        };
        let instruction = Instruction::decode(opcode);

        log::trace!("{:#05x}: {:?}", pc, instruction);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_cycle(pc, opcode.value(), &instruction);
        }

        self.run(instruction)
    }

    /// Execute a single instruction without fetching it from memory.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<Step, Fault> {
        if let MachineState::Halted(fault) = &self.state {
            return Err(fault.clone());
        }
        self.run(instruction)
    }

    /// Execute instructions in order, stopping at the first fault.
    /// An instruction that would block does not stop the sequence.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), Fault> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Count both timers down by one, call this at 60 Hz.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn set_keypad(&mut self, keypad: impl Into<Keypad>) {
        self.keypad = keypad.into();
    }

    pub fn set_random_source(&mut self, source: impl RandomSource + 'static) {
        self.random = Box::new(source);
    }

    pub fn set_observer(&mut self, observer: impl Observer + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn remove_observer(&mut self) {
        self.observer = None;
    }

    /// Change the screen size, which also clears it.
    /// Returns whether the size actually changed.
    pub fn resize_display(&mut self, width: usize, height: usize) -> Result<bool, Error> {
        config::check_display_size(width, height)?;
        let resized = self.display.resize(width, height);
        if resized {
            log::debug!("Display resized to {}x{}", width, height);
        }
        Ok(resized)
    }

    pub fn state(&self) -> &MachineState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack.depth()
    }

    pub fn stack(&self) -> &[u16] {
        self.stack.frames()
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    /// Whether the display changed since the last call.
    pub fn take_redraw(&mut self) -> bool {
        self.display.take_redraw()
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            registers: self.registers,
            i: self.i,
            program_counter: self.program_counter,
            stack_pointer: self.stack.depth(),
            stack: self.stack.frames().to_vec(),
            delay_timer: self.timers.delay,
            sound_timer: self.timers.sound,
        }
    }

    /// Read the opcode at the program counter, it is two bytes wide.
    fn fetch(&self) -> Result<Opcode, Fault> {
        let pc = self.program_counter as usize;
        let high = self.memory.read(pc)?;
        let low = self.memory.read(pc + 1)?;
        Ok(Opcode::from_bytes(high, low))
    }

    fn halt(&mut self, fault: Fault) -> Fault {
        log::error!("Halted at {:#05x}: {}", self.program_counter, fault);
        self.state = MachineState::Halted(fault.clone());
        fault
    }

    fn run(&mut self, instruction: Instruction) -> Result<Step, Fault> {
        let flow = match self.execute(instruction) {
            Ok(flow) => flow,
            Err(fault) => return Err(self.halt(fault)),
        };

        let pc = self.program_counter as usize;
        let next = match flow {
            Flow::Next => pc + 2,
            Flow::Skip => pc + 4,
            Flow::Jump(addr) => addr as usize,
            Flow::Wait(register) => {
                self.state = MachineState::AwaitingKey { register };
                return Ok(Step::Blocked { register });
            }
        };

        // The program counter never leaves memory
        if next >= self.memory.as_slice().len() {
            return Err(self.halt(Fault::AddressFault { addr: next }));
        }
        self.program_counter = next as u16;
        self.state = MachineState::Running;

        Ok(match instruction {
            Instruction::Unknown(opcode) => Step::Unknown { opcode },
            _ => Step::Executed(instruction),
        })
    }

    /// Perform the state change of an instruction, except for the default
    /// program counter advance which is left to the returned `Flow`.
    fn execute(&mut self, instruction: Instruction) -> Result<Flow, Fault> {
        let flow = match instruction {

            // Clear the screen
            Instruction::ClearScreen => {
                self.display.clear();
                Flow::Next
            }

            // Return to the previous call site via the stack.
            Instruction::Return => Flow::Jump(self.stack.pop()?),

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => Flow::Jump(addr),

            // Store the address after this one on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.stack.push(self.program_counter.wrapping_add(2))?;
                Flow::Jump(addr)
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(Reg(x), Const(n)) => Flow::skip_if(self.reg(x) == n),

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => Flow::skip_if(self.reg(x) != n),

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => Flow::skip_if(self.reg(x) == self.reg(y)),

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.set_reg(x, n);
                Flow::Next
            }

            // No carry flag for this one
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
                Flow::Next
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(y));
                Flow::Next
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
                Flow::Next
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
                Flow::Next
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
                Flow::Next
            }

            // VF is the carry
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_with_flag(x, sum, carry as u8)
            }

            // VF is 1 when there is no borrow
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_with_flag(x, vx.wrapping_sub(vy), (vx >= vy) as u8)
            }

            // VF is the bit shifted out
            Instruction::BitshiftRight(Reg(x)) => {
                let vx = self.reg(x);
                self.set_with_flag(x, vx >> 1, vx & 1)
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_with_flag(x, vy.wrapping_sub(vx), (vy >= vx) as u8)
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let vx = self.reg(x);
                self.set_with_flag(x, vx << 1, (vx >> 7) & 1)
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => Flow::skip_if(self.reg(x) != self.reg(y)),

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
                Flow::Next
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => Flow::Jump(addr + self.reg(0) as u16),

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let byte = self.random.next_byte();
                self.set_reg(x, byte & n);
                Flow::Next
            }

            // XOR the sprite at I onto the screen, VF is set if a lit pixel goes dark
            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                let x_coord = self.reg(x) as usize;
                let y_coord = self.reg(y) as usize;
                let sprite = self.memory.slice(self.i as usize, sprite_height as usize)?;

                let mut any_collisions = false;
                for (row, byte) in sprite.iter().enumerate() {
                    any_collisions |= self.display.draw_row(x_coord, y_coord + row, *byte);
                }

                self.registers[FLAG] = any_collisions as u8;
                Flow::Next
            }

            Instruction::IfKeyEqVx(Reg(x)) => Flow::skip_if(self.keypad.is_pressed(self.reg(x))),

            Instruction::IfKeyNeqVx(Reg(x)) => Flow::skip_if(!self.keypad.is_pressed(self.reg(x))),

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.set_reg(x, self.timers.delay);
                Flow::Next
            }

            // Wait for a key press, without moving on
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => {
                    self.set_reg(x, key);
                    Flow::Next
                }
                None => Flow::Wait(x),
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.timers.delay = self.reg(x);
                Flow::Next
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.timers.sound = self.reg(x);
                Flow::Next
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.reg(x) as u16);
                Flow::Next
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = memory::glyph_addr(self.reg(x)) as u16;
                Flow::Next
            }

            // Hundreds, tens and ones at I, I + 1 and I + 2
            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let vx = self.reg(x);
                self.write_block(&[vx / 100, vx / 10 % 10, vx % 10])?;
                Flow::Next
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let registers = self.registers;
                self.write_block(&registers[..=x as usize])?;
                Flow::Next
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let count = x as usize + 1;
                let values = self.memory.slice(self.i as usize, count)?;
                self.registers[..count].copy_from_slice(values);
                Flow::Next
            }

            Instruction::Unknown(opcode) => {
                log::warn!("Unknown opcode {:#06x} at {:#05x}", opcode, self.program_counter);
                Flow::Next
            }
        };

        Ok(flow)
    }

    fn reg(&self, x: u8) -> u8 {
        self.registers[x as usize]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.registers[x as usize] = value;
    }

    /// Store a result, then the flag. With x = F the flag wins.
    fn set_with_flag(&mut self, x: u8, value: u8, flag: u8) -> Flow {
        self.set_reg(x, value);
        self.registers[FLAG] = flag;
        Flow::Next
    }

    /// Write bytes starting at I. Nothing is written unless all of them fit.
    fn write_block(&mut self, bytes: &[u8]) -> Result<(), Fault> {
        let start = self.i as usize;
        self.memory.slice(start, bytes.len())?;
        for (offset, byte) in bytes.iter().enumerate() {
            self.memory.write(start + offset, *byte)?;
        }
        Ok(())
    }
}
