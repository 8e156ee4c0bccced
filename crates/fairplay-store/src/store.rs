//! Match store — maps match ids to their fixed-size records.
//!
//! Records are keyed by [`RecordKey`] (`prefix || be_u64(id)`), created
//! zero-filled, mutated in place, and never deleted. Every byte-level
//! access is checked against the record bounds and the field table.

use std::collections::HashMap;

use fairplay_types::{
    FairplayError, Field, FieldWrite, MatchId, MatchRecord, MatchState, RecordKey, Result,
    constants::RECORD_SIZE,
};

/// Proof that a record exists for a match. Obtained only from
/// [`MatchStore::allocate`] or [`MatchStore::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordHandle {
    match_id: MatchId,
}

impl RecordHandle {
    #[must_use]
    pub fn match_id(&self) -> MatchId {
        self.match_id
    }
}

/// Holds every match record.
pub struct MatchStore {
    /// Storage name prefix for record keys.
    prefix: Vec<u8>,
    /// Raw records indexed by their storage name.
    records: HashMap<RecordKey, [u8; RECORD_SIZE]>,
}

impl MatchStore {
    /// Create an empty store using `prefix` for record names.
    #[must_use]
    pub fn new(prefix: &[u8]) -> Self {
        Self {
            prefix: prefix.to_vec(),
            records: HashMap::new(),
        }
    }

    /// The storage name of a match's record.
    #[must_use]
    pub fn key_for(&self, match_id: MatchId) -> RecordKey {
        RecordKey::derive(&self.prefix, match_id)
    }

    /// Create a zero-filled record for `match_id`.
    ///
    /// # Errors
    /// Returns `AlreadyExists` if the match already has a record.
    pub fn allocate(&mut self, match_id: MatchId) -> Result<RecordHandle> {
        let key = self.key_for(match_id);
        if self.records.contains_key(&key) {
            return Err(FairplayError::AlreadyExists(match_id));
        }
        tracing::debug!(%match_id, key = %key, "Record allocated");
        self.records.insert(key, [0u8; RECORD_SIZE]);
        Ok(RecordHandle { match_id })
    }

    /// Look up an existing record.
    ///
    /// # Errors
    /// Returns `NotFound` if no record was allocated for `match_id`.
    pub fn get(&self, match_id: MatchId) -> Result<RecordHandle> {
        if self.records.contains_key(&self.key_for(match_id)) {
            Ok(RecordHandle { match_id })
        } else {
            Err(FairplayError::NotFound(match_id))
        }
    }

    /// Bounds-checked read of one slot.
    ///
    /// # Errors
    /// - `OutOfRange` if `offset + width > 192`
    /// - `LengthMismatch` if `(offset, width)` is in range but is not exactly
    ///   one slot of the field table
    pub fn read_field(&self, handle: RecordHandle, offset: usize, width: usize) -> Result<&[u8]> {
        slot_for(offset, width)?;
        let raw = self.raw(handle)?;
        Ok(&raw[offset..offset + width])
    }

    /// Bounds-checked in-place overwrite of one slot.
    ///
    /// # Errors
    /// Same conditions as [`read_field`](Self::read_field), with
    /// `bytes.len()` as the width, plus `InvalidState` for a `state` value
    /// outside the lifecycle enum.
    pub fn replace_field(&mut self, handle: RecordHandle, offset: usize, bytes: &[u8]) -> Result<()> {
        let field = slot_for(offset, bytes.len())?;
        check_value(field, bytes)?;
        let raw = self.raw_mut(handle)?;
        raw[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    /// Decode the full record.
    pub fn load(&self, handle: RecordHandle) -> Result<MatchRecord> {
        MatchRecord::decode(self.raw(handle)?)
    }

    /// Apply several slot writes as one unit.
    ///
    /// Every write is validated before any is applied: either all land or
    /// the record is unchanged.
    pub fn apply(&mut self, handle: RecordHandle, writes: &[FieldWrite]) -> Result<()> {
        for write in writes {
            let field = slot_for(write.offset(), write.bytes.len())?;
            if field != write.field {
                return Err(FairplayError::LengthMismatch {
                    expected: write.field.width(),
                    got: write.bytes.len(),
                });
            }
            check_value(field, &write.bytes)?;
        }

        let raw = self.raw_mut(handle)?;
        for write in writes {
            raw[write.field.offset()..write.field.end()].copy_from_slice(&write.bytes);
        }

        tracing::debug!(
            match_id = %handle.match_id,
            fields = ?writes.iter().map(|w| w.field.name()).collect::<Vec<_>>(),
            "Record updated"
        );
        Ok(())
    }

    /// The raw 192 bytes of a record.
    pub fn raw(&self, handle: RecordHandle) -> Result<&[u8; RECORD_SIZE]> {
        self.records
            .get(&self.key_for(handle.match_id))
            .ok_or(FairplayError::NotFound(handle.match_id))
    }

    fn raw_mut(&mut self, handle: RecordHandle) -> Result<&mut [u8; RECORD_SIZE]> {
        let key = self.key_for(handle.match_id);
        self.records
            .get_mut(&key)
            .ok_or(FairplayError::NotFound(handle.match_id))
    }

    /// Number of records allocated.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolve `(offset, width)` to a slot of the field table.
fn slot_for(offset: usize, width: usize) -> Result<Field> {
    let in_bounds = offset
        .checked_add(width)
        .is_some_and(|end| end <= RECORD_SIZE);
    if !in_bounds {
        return Err(FairplayError::OutOfRange { offset, width });
    }

    // In bounds, so some slot contains `offset`.
    let field = Field::containing(offset).ok_or(FairplayError::OutOfRange { offset, width })?;
    if field.offset() != offset || field.width() != width {
        return Err(FairplayError::LengthMismatch {
            expected: field.width(),
            got: width,
        });
    }
    Ok(field)
}

/// Keep every record decodable: the state slot only takes lifecycle values.
fn check_value(field: Field, bytes: &[u8]) -> Result<()> {
    if field == Field::State {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        MatchState::from_u64(u64::from_be_bytes(raw))?;
    }
    Ok(())
}
