use super::{AnimationDefinition, SequenceDecoder};
use crate::{ByteCursor, Error};
use std::collections::BTreeMap;

/// What [`AnimationArchive::get`] looks up when asked for an id outside the
/// archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupFallback {
    /// Substitute the given id. The game client substitutes id 0.
    Id(u32),

    /// Return nothing
    None,
}

impl Default for LookupFallback {
    fn default() -> Self {
        LookupFallback::Id(0)
    }
}

/// Sequence definitions keyed by id.
///
/// The archive has a logical size (one past the highest id it was loaded
/// with). Ids within that size may still be unset.
///
/// ```
/// use rscodec::anim::{AnimationArchive, LookupFallback};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = AnimationArchive::from_entries(vec![(0, vec![5u8, 1, 0]), (3, vec![5u8, 7, 0])])?;
/// assert_eq!(archive.len(), 4);
/// assert_eq!(archive.get(3).map(|d| d.priority), Some(7));
/// assert_eq!(archive.get(2), None);
///
/// // out of range ids resolve to id 0
/// assert_eq!(archive.get(-1).map(|d| d.priority), Some(1));
/// assert_eq!(archive.get(4).map(|d| d.priority), Some(1));
///
/// let strict = archive.with_fallback(LookupFallback::None);
/// assert_eq!(strict.get(4), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnimationArchive {
    definitions: BTreeMap<u32, AnimationDefinition>,
    len: usize,
    packed_count: usize,
    fallback: LookupFallback,
    decoder: SequenceDecoder,
}

impl AnimationArchive {
    pub fn new() -> Self {
        AnimationArchive::default()
    }

    /// Builds an archive from independently stored payloads
    pub fn from_entries<I, D>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (u32, D)>,
        D: AsRef<[u8]>,
    {
        let mut archive = AnimationArchive::new();
        archive.load_entries(entries)?;
        Ok(archive)
    }

    /// Replaces the lookup policy for out of range ids
    pub fn with_fallback(mut self, fallback: LookupFallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Replaces the decoder used by subsequent loads
    pub fn with_decoder(mut self, decoder: SequenceDecoder) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn fallback(&self) -> LookupFallback {
        self.fallback
    }

    /// Replaces the archive's contents with the given payloads. The size
    /// becomes one past the highest id.
    pub fn load_entries<I, D>(&mut self, entries: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (u32, D)>,
        D: AsRef<[u8]>,
    {
        let mut definitions = BTreeMap::new();
        for (id, data) in entries {
            definitions.insert(id, self.decoder.decode(data.as_ref())?);
        }

        self.len = definitions
            .keys()
            .next_back()
            .map_or(0, |&id| id as usize + 1);
        self.definitions = definitions;
        Ok(())
    }

    /// Loads a packed payload: a 16 bit count followed by that many
    /// definitions back to back, assigned ids from 0. Definitions at higher
    /// ids from an earlier load are kept, as is the larger of the two sizes.
    /// The archive is left unchanged if any definition fails to decode.
    pub fn load_packed(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut cursor = ByteCursor::new(data);
        let count = cursor.read_u16()?;
        let definitions = (0..count)
            .map(|_| self.decoder.decode_from(&mut cursor))
            .collect::<Result<Vec<_>, _>>()?;

        for (id, definition) in (0u32..).zip(definitions) {
            self.definitions.insert(id, definition);
        }

        self.packed_count = usize::from(count);
        self.len = self.len.max(self.packed_count);
        Ok(())
    }

    /// Number of definitions in the last packed payload
    pub fn count(&self) -> usize {
        self.packed_count
    }

    /// Logical size of the archive
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The id a lookup of `id` resolves to under the archive's fallback
    /// policy, or `None` if the lookup has no target
    pub fn resolve_id(&self, id: i32) -> Option<u32> {
        if id >= 0 && (id as usize) < self.len {
            return Some(id as u32);
        }

        match self.fallback {
            LookupFallback::Id(fallback) => Some(fallback),
            LookupFallback::None => None,
        }
    }

    /// Returns the definition for the id, applying the fallback policy to ids
    /// outside the archive. The resolved slot may be unset.
    pub fn get(&self, id: i32) -> Option<&AnimationDefinition> {
        self.resolve_id(id)
            .and_then(|resolved| self.definitions.get(&resolved))
    }

    /// Iterates over the set definitions in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &AnimationDefinition)> + '_ {
        self.definitions.iter().map(|(&id, def)| (id, def))
    }
}
