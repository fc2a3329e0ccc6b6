use crate::emulator::instruction::Instruction;

/// Watches every cycle just before its instruction runs.
pub trait Observer {
    fn on_cycle(&mut self, pc: u16, opcode: u16, instruction: &Instruction);
}

/// Forwards cycles to the `log` facade at trace level.
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_cycle(&mut self, pc: u16, opcode: u16, instruction: &Instruction) {
        log::trace!("{:#05x}: {:04x} {}", pc, opcode, instruction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::Emulator;

    #[test]
    fn log_observer_can_be_attached() {
        let mut emulator = Emulator::new();
        emulator.load(&[0x60, 0x01]).unwrap();
        emulator.set_observer(LogObserver);
        emulator.step().unwrap();
        assert_eq!(emulator.registers()[0], 1);
    }
}
