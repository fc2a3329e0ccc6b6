/*!

The core of a CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

The core does no I/O of its own. The host loads program bytes, supplies the keypad state,
calls `step` to run one instruction and `tick_timers` at 60 Hz, and reads the display
buffer back to show it however it likes.

# Headless runner

To try the core on a program, run `cargo run --release --bin headless -- <program>`.
It runs for a fixed number of cycles and prints the final screen.

# Library

The main way of running a program is to load instructions as bytes.

```rust
use chip8_core::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let program = [
    0x6A, 0x05, // VA = 5
    0x00, 0xE0, // Clear the display
];
emulator.load(&program).unwrap();
emulator.step().unwrap();
emulator.step().unwrap();

assert_eq!(emulator.registers()[0xA], 5);
assert_eq!(emulator.program_counter(), 0x204);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_core::emulator::Emulator;
use chip8_core::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();

assert_eq!(emulator.registers()[0xB], 35);
```

## Input, randomness and faults

`Fx0A` never blocks the thread. The step reports that it is waiting, and the host
steps again once the keypad has changed.

```rust
use chip8_core::emulator::{Emulator, Keypad, Step, Fault};
use chip8_core::emulator::random::Sequence;

let mut emulator = Emulator::new();
emulator.load(&[0xF1, 0x0A, 0xC2, 0x0F, 0x00, 0xEE]).unwrap();
emulator.set_random_source(Sequence::new(vec![0xAB]));

assert_eq!(emulator.step(), Ok(Step::Blocked { register: 1 }));

let mut keypad = Keypad::new();
keypad.press(0x7);
emulator.set_keypad(keypad);
emulator.step().unwrap();
assert_eq!(emulator.registers()[1], 0x7);

emulator.step().unwrap();
assert_eq!(emulator.registers()[2], 0x0B);

// Returning with nothing on the stack halts the machine
assert_eq!(emulator.step(), Err(Fault::StackUnderflow));
```
*/

pub mod emulator;
pub mod util;
