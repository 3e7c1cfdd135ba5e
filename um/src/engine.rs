use super::constants::{INPUT_EOF, OUTPUT_MAX};
use super::decode::{decode, Instruction, Operator};
use super::error::{Error, InvalidOperationKind};
use super::heap::ArrayHeap;
use super::io::IoPort;
use super::register::RegisterFile;
use super::Word;

/// The fetch-decode-execute engine. Generic over the I/O port so tests can
/// swap in in-memory buffers where the CLI front-end wires up real stdio.
pub struct Engine<P: IoPort> {
    registers: RegisterFile,
    heap: ArrayHeap,
    finger: Word,
    io: P,
}

impl<P: IoPort> Engine<P> {
    /// Builds a machine whose array 0 is `program`, finger at zero.
    pub fn new(program: Vec<Word>, io: P) -> Engine<P> {
        Engine {
            registers: RegisterFile::new(),
            heap: ArrayHeap::new(program),
            finger: 0,
            io,
        }
    }

    /// The array heap, for harnesses that need to seed arrays or inspect
    /// array 0 before or after a run.
    pub fn heap(&self) -> &ArrayHeap {
        &self.heap
    }

    /// Mutable access to the array heap, for harnesses that seed arrays
    /// before running.
    pub fn heap_mut(&mut self) -> &mut ArrayHeap {
        &mut self.heap
    }

    /// The general-purpose registers.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Mutable access to the registers, for harnesses that seed state
    /// a program would otherwise have to compute for itself.
    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    /// Consumes the engine, returning its I/O port (e.g. to recover a
    /// buffered writer's contents).
    pub fn into_io(self) -> P {
        self.io
    }

    /// Runs until a halt or a failing operator. `Ok(())` is a normal halt;
    /// there is no separate success value to report.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            let at = self.finger;
            let word = self.fetch(at)?;
            self.finger = at.wrapping_add(1);

            let instruction = decode(word, at)?;
            tracing::trace!(finger = at, ?instruction, "tick");

            match instruction {
                Instruction::Immediate { a, value } => self.registers.set(a, value),
                Instruction::Standard { op, a, b, c } => {
                    if self.execute(op, a, b, c, at)? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Executes one standard-form operator. Returns `Ok(true)` on halt.
    fn execute(
        &mut self,
        op: Operator,
        a: usize,
        b: usize,
        c: usize,
        finger: Word,
    ) -> Result<bool, Error> {
        match op {
            Operator::ConditionalMove => {
                if self.registers.get(c) != 0 {
                    self.registers.set(a, self.registers.get(b));
                }
            }
            Operator::ArrayIndex => {
                let value = self
                    .heap
                    .read(self.registers.get(b), self.registers.get(c), finger)?;
                self.registers.set(a, value);
            }
            Operator::ArrayAmendment => {
                self.heap.write(
                    self.registers.get(a),
                    self.registers.get(b),
                    self.registers.get(c),
                    finger,
                )?;
            }
            Operator::Addition => {
                let value = self.registers.get(b).wrapping_add(self.registers.get(c));
                self.registers.set(a, value);
            }
            Operator::Multiplication => {
                let value = self.registers.get(b).wrapping_mul(self.registers.get(c));
                self.registers.set(a, value);
            }
            Operator::Division => {
                let divisor = self.registers.get(c);
                if divisor == 0 {
                    return Err(Error::invalid_operation(
                        finger,
                        InvalidOperationKind::DivisionByZero,
                    ));
                }
                self.registers.set(a, self.registers.get(b) / divisor);
            }
            Operator::NotAnd => {
                let value = !(self.registers.get(b) & self.registers.get(c));
                self.registers.set(a, value);
            }
            Operator::Halt => return Ok(true),
            Operator::Allocation => {
                let id = self.heap.allocate(self.registers.get(c));
                self.registers.set(b, id);
            }
            Operator::Abandonment => {
                self.heap.abandon(self.registers.get(c), finger)?;
            }
            Operator::Output => {
                let value = self.registers.get(c);
                if value > OUTPUT_MAX {
                    return Err(Error::invalid_operation(
                        finger,
                        InvalidOperationKind::OutputOverflow { value },
                    ));
                }
                self.io.write_byte(value as u8)?;
            }
            Operator::Input => {
                let value = match self.io.read_byte()? {
                    Some(byte) => Word::from(byte),
                    None => INPUT_EOF,
                };
                self.registers.set(c, value);
            }
            Operator::LoadProgram => {
                let id = self.registers.get(b);
                self.heap.load_program(id, finger)?;
                self.finger = self.registers.get(c);
            }
            Operator::Orthography => unreachable!("operator 13 only ever decodes as Immediate"),
        }

        Ok(false)
    }

    fn fetch(&self, finger: Word) -> Result<Word, Error> {
        let program = self.heap.program();
        program.get(finger as usize).copied().ok_or_else(|| {
            Error::invalid_operation(
                finger,
                InvalidOperationKind::OutOfRange {
                    id: 0,
                    offset: finger,
                    length: program.len(),
                },
            )
        })
    }
}
