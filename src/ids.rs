// src/ids.rs
//! Row identifiers for inserted addresses, locations and aliases.

use uuid::Uuid;

pub trait IdGenerator {
    fn next_id(&mut self) -> Uuid;
}

/// Random v4 ids. Used for real migrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Deterministic ids counting up from 1, so rendered plans can be compared verbatim.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> Uuid {
        let id = Uuid::from_u128(self.next);
        self.next += 1;
        id
    }
}
