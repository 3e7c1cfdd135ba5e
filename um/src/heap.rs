use super::error::{Error, InvalidOperationKind};
use super::Word;

/// The dynamically-allocated array heap.
///
/// Array 0 always exists and holds the currently executing program image.
/// Every other identifier is either *live* (a `Some` slot) or *free* (a
/// `None` slot whose identifier sits on the free list, available for
/// `allocate` to reissue). An indexed container with a side free list is
/// enough here: identifiers are small dense integers, not pointers, so
/// there's no need for a separate handle table.
#[derive(Debug, Default)]
pub struct ArrayHeap {
    arrays: Vec<Option<Vec<Word>>>,
    free: Vec<Word>,
}

impl ArrayHeap {
    /// Creates a heap whose array 0 is the given program image.
    pub fn new(program: Vec<Word>) -> ArrayHeap {
        ArrayHeap {
            arrays: vec![Some(program)],
            free: Vec::new(),
        }
    }

    /// Returns a fresh or recycled identifier mapped to a zero-filled array
    /// of `length` words. Never returns 0.
    pub fn allocate(&mut self, length: Word) -> Word {
        let array = vec![0; length as usize];

        if let Some(id) = self.free.pop() {
            self.arrays[id as usize] = Some(array);
            id
        } else {
            let id = self.arrays.len() as Word;
            self.arrays.push(Some(array));
            id
        }
    }

    /// Releases the array at `id`, returning its identifier to the free
    /// list. `id` must not be 0 and must currently be live.
    pub fn abandon(&mut self, id: Word, finger: Word) -> Result<(), Error> {
        if id == 0 {
            return Err(Error::invalid_operation(
                finger,
                InvalidOperationKind::AbandonReserved,
            ));
        }

        let slot = self
            .arrays
            .get_mut(id as usize)
            .ok_or_else(|| Error::invalid_operation(finger, InvalidOperationKind::UnknownArray { id }))?;

        if slot.take().is_none() {
            return Err(Error::invalid_operation(
                finger,
                InvalidOperationKind::UnknownArray { id },
            ));
        }

        self.free.push(id);
        Ok(())
    }

    /// Reads the word at `offset` within array `id`.
    pub fn read(&self, id: Word, offset: Word, finger: Word) -> Result<Word, Error> {
        let array = self.live(id, finger)?;
        array.get(offset as usize).copied().ok_or_else(|| {
            Error::invalid_operation(
                finger,
                InvalidOperationKind::OutOfRange {
                    id,
                    offset,
                    length: array.len(),
                },
            )
        })
    }

    /// Writes `value` at `offset` within array `id`.
    pub fn write(&mut self, id: Word, offset: Word, value: Word, finger: Word) -> Result<(), Error> {
        let array = self.live_mut(id, finger)?;
        let length = array.len();
        match array.get_mut(offset as usize) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::invalid_operation(
                finger,
                InvalidOperationKind::OutOfRange { id, offset, length },
            )),
        }
    }

    /// Replaces array 0 with a duplicate of array `id`, unless `id` is 0 (in
    /// which case array 0 is left untouched — it would already be its own
    /// duplicate). The source array remains allocated and unchanged.
    pub fn load_program(&mut self, id: Word, finger: Word) -> Result<(), Error> {
        if id == 0 {
            return Ok(());
        }

        let duplicate = self.live(id, finger)?.clone();
        self.arrays[0] = Some(duplicate);
        Ok(())
    }

    /// The currently executing program image (array 0).
    pub fn program(&self) -> &[Word] {
        self.arrays[0]
            .as_ref()
            .expect("array 0 is never abandoned")
    }

    fn live(&self, id: Word, finger: Word) -> Result<&Vec<Word>, Error> {
        self.arrays
            .get(id as usize)
            .and_then(|slot| slot.as_ref())
            .ok_or_else(|| Error::invalid_operation(finger, InvalidOperationKind::UnknownArray { id }))
    }

    fn live_mut(&mut self, id: Word, finger: Word) -> Result<&mut Vec<Word>, Error> {
        self.arrays
            .get_mut(id as usize)
            .and_then(|slot| slot.as_mut())
            .ok_or_else(|| Error::invalid_operation(finger, InvalidOperationKind::UnknownArray { id }))
    }
}
