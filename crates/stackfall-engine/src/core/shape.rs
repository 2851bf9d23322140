use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::ShapeDefinitionError;

/// Occupancy pattern of a shape, relative to its top-left corner.
///
/// Definitions are templates: a catalog creates each one once and every
/// spawned [`Shape`] shares it through an [`Arc`]. The matrix is never
/// mutated after construction, and this type has no mutating API, so sharing
/// one template between the falling shape, the lookahead queue and the catalog
/// is sound. Code that needs a different pattern must build a new definition.
///
/// # Example
///
/// ```
/// use stackfall_engine::ShapeDefinition;
///
/// let z = ShapeDefinition::from_rows("Z", &[&[1, 1, 0], &[0, 1, 1]]).unwrap();
/// assert_eq!((z.width(), z.height()), (3, 2));
/// assert!(z.is_occupied(0, 0));
/// assert!(!z.is_occupied(2, 0));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ShapeDefinition {
    name: String,
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl fmt::Debug for ShapeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeDefinition")
            .field("name", &self.name)
            .field("size", &(self.width, self.height))
            .finish_non_exhaustive()
    }
}

impl ShapeDefinition {
    /// Builds a definition from rows of `0`/`1` values.
    ///
    /// All rows must have the same non-zero length.
    pub fn from_rows(name: impl Into<String>, rows: &[&[u8]]) -> Result<Self, ShapeDefinitionError> {
        let name = name.into();
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 {
            return Err(ShapeDefinitionError::Empty { name });
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(ShapeDefinitionError::Ragged {
                    name,
                    row,
                    len: values.len(),
                    expected: width,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => {
                        return Err(ShapeDefinitionError::NonBinary {
                            name,
                            row,
                            col,
                            value,
                        });
                    }
                }
            }
        }

        Ok(Self {
            name,
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Returns a copy of this pattern zero-padded to `size`×`size`.
    ///
    /// The occupied cells keep their offsets from the top-left corner.
    /// Patterns already larger than `size` in a dimension keep that dimension.
    #[must_use]
    pub fn padded_to(&self, size: usize) -> Self {
        let width = self.width.max(size);
        let height = self.height.max(size);
        let mut cells = vec![false; width * height];
        for (x, y) in self.occupied_offsets() {
            cells[y * width + x] = true;
        }
        Self {
            name: self.name.clone(),
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether the relative cell `(x, y)` is occupied.
    ///
    /// Cells outside the matrix are reported as unoccupied.
    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Returns an iterator over the occupied `(x, y)` offsets, row by row.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }
}

/// Board offset of a shape's top-left corner.
///
/// Signed so that a tentative move past the left wall can be represented
/// before collision detection rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShapePosition {
    pub x: i32,
    pub y: i32,
}

impl ShapePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A shape on the board: a shared template plus its current position.
#[derive(Debug, Clone)]
pub struct Shape {
    definition: Arc<ShapeDefinition>,
    position: ShapePosition,
}

impl Shape {
    #[must_use]
    pub fn new(definition: Arc<ShapeDefinition>, position: ShapePosition) -> Self {
        Self {
            definition,
            position,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &Arc<ShapeDefinition> {
        &self.definition
    }

    #[must_use]
    pub fn position(&self) -> ShapePosition {
        self.position
    }

    pub fn set_position(&mut self, position: ShapePosition) {
        self.position = position;
    }

    pub fn shift(&mut self, dx: i32, dy: i32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    /// Returns an iterator over the absolute `(x, y)` cells the shape occupies.
    ///
    /// Coordinates may lie outside the board; callers decide how to treat them.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let ShapePosition { x, y } = self.position;
        self.definition
            .occupied_offsets()
            .map(move |(dx, dy)| (x + offset(dx), y + offset(dy)))
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn offset(d: usize) -> i32 {
    d as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_rejects_empty() {
        assert_eq!(
            ShapeDefinition::from_rows("none", &[]),
            Err(ShapeDefinitionError::Empty {
                name: "none".to_owned()
            })
        );
        assert!(ShapeDefinition::from_rows("blank row", &[&[]]).is_err());
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = ShapeDefinition::from_rows("ragged", &[&[1, 1], &[1]]).unwrap_err();
        assert_eq!(
            err,
            ShapeDefinitionError::Ragged {
                name: "ragged".to_owned(),
                row: 1,
                len: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_non_binary() {
        let err = ShapeDefinition::from_rows("two", &[&[1, 2]]).unwrap_err();
        assert!(err.to_string().contains("non-binary value 2"));
    }

    #[test]
    fn test_occupied_offsets_row_major() {
        let t = ShapeDefinition::from_rows("T", &[&[1, 1, 1], &[0, 1, 0]]).unwrap();
        let offsets: Vec<_> = t.occupied_offsets().collect();
        assert_eq!(offsets, vec![(0, 0), (1, 0), (2, 0), (1, 1)]);
        assert_eq!(t.occupied_count(), 4);
    }

    #[test]
    fn test_padded_keeps_offsets() {
        let line = ShapeDefinition::from_rows("Horizontal line", &[&[1, 1, 1, 1]]).unwrap();
        let padded = line.padded_to(4);
        assert_eq!((padded.width(), padded.height()), (4, 4));
        assert_eq!(
            padded.occupied_offsets().collect::<Vec<_>>(),
            line.occupied_offsets().collect::<Vec<_>>()
        );
        assert!(!padded.is_occupied(0, 1));
        assert_eq!(padded.name(), "Horizontal line");
    }

    #[test]
    fn test_shape_positions_follow_offset() {
        let square = Arc::new(ShapeDefinition::from_rows("Square", &[&[1, 1], &[1, 1]]).unwrap());
        let mut shape = Shape::new(Arc::clone(&square), ShapePosition::new(4, 0));
        shape.shift(-1, 2);
        assert_eq!(shape.position(), ShapePosition::new(3, 2));
        let cells: Vec<_> = shape.occupied_positions().collect();
        assert_eq!(cells, vec![(3, 2), (4, 2), (3, 3), (4, 3)]);
        assert!(Arc::ptr_eq(shape.definition(), &square));
    }
}
