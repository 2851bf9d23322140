use std::sync::Arc;

use crate::{EmptyCatalogError, GameVariant, ShapeDefinition};

/// Side length of the normalized shape matrices and of the preview grid.
pub const NORMALIZED_SIZE: usize = 4;

const STANDARD_SHAPES: [(&str, &[&[u8]]); 11] = [
    ("Square", &[&[1, 1], &[1, 1]]),
    ("Horizontal line", &[&[1, 1, 1, 1]]),
    ("Vertical line", &[&[1], &[1], &[1], &[1]]),
    ("Z", &[&[1, 1, 0], &[0, 1, 1]]),
    ("Reverse Z", &[&[0, 1, 1], &[1, 1, 0]]),
    ("L", &[&[0, 1, 0], &[1, 1, 1]]),
    ("Reverse L", &[&[1, 0, 0], &[1, 1, 1]]),
    ("T", &[&[1, 1, 1], &[0, 1, 0]]),
    ("Reverse T", &[&[0, 1, 0], &[1, 1, 1]]),
    ("Left cross", &[&[1, 0, 0], &[1, 1, 0], &[1, 0, 0]]),
    ("Right cross", &[&[0, 0, 1], &[0, 1, 1], &[0, 0, 1]]),
];

/// Ordered, non-empty set of shape templates a game draws from.
///
/// # Example
///
/// ```
/// use stackfall_engine::ShapeCatalog;
///
/// let catalog = ShapeCatalog::standard();
/// assert_eq!(catalog.len(), 11);
/// assert_eq!(catalog.get(0).unwrap().name(), "Square");
/// ```
#[derive(Debug, Clone)]
pub struct ShapeCatalog {
    shapes: Vec<Arc<ShapeDefinition>>,
}

impl ShapeCatalog {
    /// Builds a catalog from custom definitions.
    pub fn new<I>(shapes: I) -> Result<Self, EmptyCatalogError>
    where
        I: IntoIterator<Item = ShapeDefinition>,
    {
        let shapes: Vec<_> = shapes.into_iter().map(Arc::new).collect();
        if shapes.is_empty() {
            return Err(EmptyCatalogError);
        }
        Ok(Self { shapes })
    }

    /// The eleven shapes with their natural, variable matrix sizes.
    #[must_use]
    pub fn standard() -> Self {
        let shapes = STANDARD_SHAPES
            .iter()
            .map(|(name, rows)| {
                let def = ShapeDefinition::from_rows(*name, rows);
                Arc::new(def.unwrap_or_else(|e| unreachable!("built-in shape is valid: {e}")))
            })
            .collect();
        Self { shapes }
    }

    /// The standard shapes, each zero-padded to a 4×4 matrix.
    #[must_use]
    pub fn normalized() -> Self {
        let shapes = Self::standard()
            .shapes
            .iter()
            .map(|def| Arc::new(def.padded_to(NORMALIZED_SIZE)))
            .collect();
        Self { shapes }
    }

    #[must_use]
    pub fn for_variant(variant: GameVariant) -> Self {
        match variant {
            GameVariant::Simple => Self::standard(),
            GameVariant::Extended => Self::normalized(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<ShapeDefinition>> {
        self.shapes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ShapeDefinition>> {
        self.shapes.iter()
    }

    /// Returns the catalog index of `definition`, compared by identity.
    #[must_use]
    pub fn index_of(&self, definition: &Arc<ShapeDefinition>) -> Option<usize> {
        self.shapes.iter().position(|s| Arc::ptr_eq(s, definition))
    }
}
