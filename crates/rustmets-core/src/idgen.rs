//! Random identifier minting.

use std::collections::HashSet;

use rand::Rng;

use crate::error::{RustMetsError, RustMetsResult};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const ALPHANUMERICS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Mints random identifiers that are valid XML `ID` values.
///
/// Identifiers are drawn from `[a-z0-9]` and always start with a letter. A
/// generator never hands out the same identifier twice until [`reset`].
///
/// [`reset`]: IdGenerator::reset
#[derive(Debug, Clone)]
pub struct IdGenerator {
    length: usize,
    minted: HashSet<String>,
}

impl IdGenerator {
    /// A generator for identifiers of `length` characters (at least one).
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
            minted: HashSet::new(),
        }
    }

    /// Identifier length.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of identifiers minted since creation or the last reset.
    #[must_use]
    pub fn minted(&self) -> usize {
        self.minted.len()
    }

    /// Mint a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RustMetsError::IdSpaceExhausted`] once every identifier of
    /// this length has been handed out.
    pub fn mint(&mut self) -> RustMetsResult<String> {
        if self.capacity().is_some_and(|cap| self.minted.len() >= cap) {
            return Err(RustMetsError::IdSpaceExhausted {
                length: self.length,
            });
        }

        let mut rng = rand::rng();
        let mut buf = vec![0u8; self.length];
        loop {
            rng.fill_bytes(&mut buf);
            let id: String = buf
                .iter()
                .enumerate()
                .map(|(i, b)| {
                    let alphabet = if i == 0 { LETTERS } else { ALPHANUMERICS };
                    char::from(alphabet[usize::from(*b) % alphabet.len()])
                })
                .collect();
            if self.minted.insert(id.clone()) {
                return Ok(id);
            }
        }
    }

    /// Forget every identifier minted so far.
    pub fn reset(&mut self) {
        self.minted.clear();
    }

    /// Number of distinct identifiers of this length, if it fits in `usize`.
    fn capacity(&self) -> Option<usize> {
        let tail = u32::try_from(self.length - 1).ok()?;
        ALPHANUMERICS
            .len()
            .checked_pow(tail)?
            .checked_mul(LETTERS.len())
    }
}
