use super::Word;

/// Everything that can end a run of the machine other than a normal halt.
///
/// `NormalHalt` from the specification's error-kind list is deliberately not
/// a variant here: operator 7 is the success path of [`crate::Engine::run`],
/// not a failure one.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("program image length {0} bytes is not a multiple of 4")]
    MalformedImage(usize),

    #[error("I/O failure")]
    Io(#[from] std::io::Error),

    #[error("invalid instruction {opcode:#x} at finger {finger}")]
    InvalidInstruction { finger: Word, opcode: u32 },

    #[error("invalid operation at finger {finger}: {kind}")]
    InvalidOperation {
        finger: Word,
        kind: InvalidOperationKind,
    },
}

/// The specific reason an `InvalidOperation` was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOperationKind {
    #[error("division by zero")]
    DivisionByZero,

    #[error("array {id} is not live")]
    UnknownArray { id: Word },

    #[error("offset {offset} out of range for array {id} (length {length})")]
    OutOfRange {
        id: Word,
        offset: Word,
        length: usize,
    },

    #[error("attempted to abandon array 0")]
    AbandonReserved,

    #[error("OUTPUT value {value} does not fit in a byte")]
    OutputOverflow { value: Word },
}

impl Error {
    pub fn invalid_operation(finger: Word, kind: InvalidOperationKind) -> Error {
        Error::InvalidOperation { finger, kind }
    }
}
