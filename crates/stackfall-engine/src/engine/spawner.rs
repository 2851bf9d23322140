use std::{fmt::Write as _, sync::Arc};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Shape, ShapeCatalog, ShapeDefinition, ShapePosition};

use super::lookahead::LookaheadQueue;

/// Seed for deterministic shape selection.
///
/// A 128-bit seed for the spawner's random number generator. Two spawners
/// built from the same catalog and seed produce the same shape sequence.
///
/// Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use stackfall_engine::{ShapeCatalog, ShapePosition, SpawnSeed, Spawner};
///
/// let seed: SpawnSeed = rand::rng().random();
/// let mut a = Spawner::with_seed(ShapeCatalog::standard(), false, ShapePosition::new(4, 0), seed);
/// let mut b = Spawner::with_seed(ShapeCatalog::standard(), false, ShapePosition::new(4, 0), seed);
/// assert_eq!(a.spawn().definition().name(), b.spawn().definition().name());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSeed([u8; 16]);

impl SpawnSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Builds a seed from a 64-bit value, e.g. one typed on the command line.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl Serialize for SpawnSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").map_err(<S::Error as serde::ser::Error>::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for SpawnSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<SpawnSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SpawnSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SpawnSeed(seed)
    }
}

/// Produces falling shapes from a catalog.
///
/// Each draw picks a catalog index uniformly at random. With lookahead
/// enabled, shapes come out of a 2-slot [`LookaheadQueue`] instead, so the
/// next shape can be previewed before it spawns; each spawn consumes the head
/// and backfills the tail with a fresh draw.
///
/// Every spawned shape starts at the same spawn position and shares its
/// template with the catalog.
#[derive(Debug, Clone)]
pub struct Spawner {
    catalog: ShapeCatalog,
    rng: Pcg32,
    lookahead: Option<LookaheadQueue>,
    spawn_position: ShapePosition,
}

impl Spawner {
    /// Creates a spawner with a random seed.
    #[must_use]
    pub fn new(catalog: ShapeCatalog, lookahead: bool, spawn_position: ShapePosition) -> Self {
        Self::with_seed(catalog, lookahead, spawn_position, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible sequence.
    #[must_use]
    pub fn with_seed(
        catalog: ShapeCatalog,
        lookahead: bool,
        spawn_position: ShapePosition,
        seed: SpawnSeed,
    ) -> Self {
        let mut this = Self {
            catalog,
            rng: Pcg32::from_seed(seed.0),
            lookahead: None,
            spawn_position,
        };
        if lookahead {
            let head = this.draw();
            let tail = this.draw();
            this.lookahead = Some(LookaheadQueue::new(head, tail));
        }
        this
    }

    #[must_use]
    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn spawn_position(&self) -> ShapePosition {
        self.spawn_position
    }

    fn draw(&mut self) -> Arc<ShapeDefinition> {
        let index = self.rng.random_range(0..self.catalog.len());
        match self.catalog.get(index) {
            Some(def) => Arc::clone(def),
            None => unreachable!("index {index} drawn within catalog bounds"),
        }
    }

    /// Produces the next falling shape at the spawn position.
    pub fn spawn(&mut self) -> Shape {
        let definition = match self.lookahead.take() {
            Some(mut queue) => {
                let fresh = self.draw();
                let head = queue.advance(fresh);
                self.lookahead = Some(queue);
                head
            }
            None => self.draw(),
        };
        Shape::new(definition, self.spawn_position)
    }

    /// Returns the template the next [`Self::spawn`] will use, if lookahead is enabled.
    #[must_use]
    pub fn next(&self) -> Option<&Arc<ShapeDefinition>> {
        self.lookahead.as_ref().map(LookaheadQueue::head)
    }

    #[must_use]
    pub fn lookahead(&self) -> Option<&LookaheadQueue> {
        self.lookahead.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPAWN: ShapePosition = ShapePosition::new(4, 0);

    fn seed_from_bytes(bytes: [u8; 16]) -> SpawnSeed {
        SpawnSeed(bytes)
    }

    mod spawn_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: SpawnSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: SpawnSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = seed_from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
        }

        #[test]
        fn test_from_u64_fills_low_bytes() {
            let seed = SpawnSeed::from_u64(0xff);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"000000000000000000000000000000ff\"");
        }

        #[test]
        fn test_deserialize_uppercase_hex() {
            let json = "\"0123456789ABCDEFFEDCBA9876543210\"";
            let deserialized: SpawnSeed = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized.0[0], 0x01);
            assert_eq!(deserialized.0[15], 0x10);
        }

        #[test]
        fn test_error_bad_length_or_chars() {
            for json in [
                "\"\"",
                "\"0123456789abcdef0123456789abcde\"",
                "\"0123456789abcdef0123456789abcdef0\"",
                "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
            ] {
                let err = serde_json::from_str::<SpawnSeed>(json).unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{json}");
            }
        }
    }

    #[test]
    fn test_spawn_uses_spawn_position() {
        let mut spawner = Spawner::new(ShapeCatalog::standard(), false, SPAWN);
        for _ in 0..20 {
            let shape = spawner.spawn();
            assert_eq!(shape.position(), SPAWN);
            let def = shape.definition();
            assert!(def.width() <= 4 && def.height() <= 4);
            assert!(spawner.catalog().index_of(def).is_some());
        }
    }

    #[test]
    fn test_simple_spawner_has_no_lookahead() {
        let spawner = Spawner::new(ShapeCatalog::standard(), false, SPAWN);
        assert!(spawner.next().is_none());
        assert!(spawner.lookahead().is_none());
    }

    #[test]
    fn test_deterministic_with_same_seed() {
        let seed = seed_from_bytes([
            0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66,
            0x77, 0x88,
        ]);
        for lookahead in [false, true] {
            let mut a = Spawner::with_seed(ShapeCatalog::standard(), lookahead, SPAWN, seed);
            let mut b = Spawner::with_seed(ShapeCatalog::standard(), lookahead, SPAWN, seed);
            for _ in 0..30 {
                let sa = a.spawn();
                let sb = b.spawn();
                assert_eq!(
                    a.catalog().index_of(sa.definition()),
                    b.catalog().index_of(sb.definition())
                );
            }
        }
    }

    #[test]
    fn test_spawn_returns_previewed_next() {
        let mut spawner = Spawner::new(ShapeCatalog::normalized(), true, SPAWN);
        for _ in 0..50 {
            let previewed = Arc::clone(spawner.next().unwrap());
            let after = Arc::clone(&spawner.lookahead().unwrap().slots()[1]);
            let shape = spawner.spawn();
            assert!(Arc::ptr_eq(shape.definition(), &previewed));
            // Slot 1 shifted into slot 0
            assert!(Arc::ptr_eq(spawner.next().unwrap(), &after));
        }
    }

    #[test]
    fn test_draws_cover_catalog() {
        let mut spawner = Spawner::new(ShapeCatalog::standard(), false, SPAWN);
        let mut seen = [false; 11];
        for _ in 0..2000 {
            let shape = spawner.spawn();
            let index = spawner.catalog().index_of(shape.definition()).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s), "every shape should be drawn: {seen:?}");
    }
}
