//! Pin model: map markers and the draw-ordered store that owns them.
//!
//! Pins arrive from the data source as JSON (`x`/`y` may be `null` for pins
//! that have not been placed yet). The store keeps them in list order, which
//! is also draw order: later pins are drawn on top and win hit-tests.
//!
//! The engine never creates or deletes pins. It only replaces the whole set on
//! refresh and rewrites coordinates for placements.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::camera::Point;

/// Opaque pin identifier assigned by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(pub String);

impl PinId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored coordinates exactly as the data source sent them, valid or not.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coords {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Coords {
    #[must_use]
    pub fn at(p: Point) -> Self {
        Self { x: Some(p.x), y: Some(p.y) }
    }
}

/// A labeled marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Stable identifier; survives refreshes.
    pub id: PinId,
    /// Display label.
    pub name: String,
    /// Classification; only affects color.
    #[serde(default)]
    pub category: Option<String>,
    /// Editorial status shown by the host UI.
    #[serde(default)]
    pub status: Option<String>,
    /// Free text shown by the host UI.
    #[serde(default)]
    pub description: String,
    /// Free-form tags shown by the host UI.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Normalized horizontal position, `None` while unplaced.
    #[serde(default)]
    pub x: Option<f64>,
    /// Normalized vertical position, `None` while unplaced.
    #[serde(default)]
    pub y: Option<f64>,
}

impl Pin {
    /// Create an unplaced pin with only an id and name.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: PinId::new(id),
            name: name.into(),
            category: None,
            status: None,
            description: String::new(),
            tags: Vec::new(),
            x: None,
            y: None,
        }
    }

    /// Builder: set the normalized position.
    #[must_use]
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Builder: set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Normalized position when both coordinates are present, finite and in `[0,1]`.
    #[must_use]
    pub fn position(&self) -> Option<Point> {
        let p = Point::new(self.x?, self.y?);
        (p.x.is_finite() && p.y.is_finite() && p.in_unit_square()).then_some(p)
    }

    /// Whether the pin has a valid position on the map.
    #[must_use]
    pub fn is_placed(&self) -> bool {
        self.position().is_some()
    }

    /// Raw stored coordinates, including ones [`Pin::position`] rejects.
    #[must_use]
    pub fn coords(&self) -> Coords {
        Coords { x: self.x, y: self.y }
    }

    fn set_coords(&mut self, coords: Coords) {
        self.x = coords.x;
        self.y = coords.y;
    }
}

/// In-memory, draw-ordered store of pins.
#[derive(Debug, Default)]
pub struct PinStore {
    pins: Vec<Pin>,
    index: HashMap<PinId, usize>,
}

impl PinStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all pins with a fresh list from the data source. On duplicate
    /// ids the later entry wins and takes the earlier slot's place in draw order.
    pub fn load_snapshot(&mut self, pins: Vec<Pin>) {
        self.pins.clear();
        self.index.clear();
        for pin in pins {
            if let Some(&slot) = self.index.get(&pin.id) {
                self.pins[slot] = pin;
            } else {
                self.index.insert(pin.id.clone(), self.pins.len());
                self.pins.push(pin);
            }
        }
    }

    /// Look up a pin by id.
    #[must_use]
    pub fn get(&self, id: &PinId) -> Option<&Pin> {
        self.index.get(id).and_then(|&i| self.pins.get(i))
    }

    #[must_use]
    pub fn contains(&self, id: &PinId) -> bool {
        self.index.contains_key(id)
    }

    /// Overwrite a pin's coordinates, returning the raw previous pair.
    /// Returns `None` (and changes nothing) when the pin is unknown.
    pub fn set_position(&mut self, id: &PinId, pos: Option<Point>) -> Option<Coords> {
        self.restore(id, pos.map_or_else(Coords::default, Coords::at))
    }

    /// Write raw coordinates back verbatim, returning the previous pair.
    pub fn restore(&mut self, id: &PinId, coords: Coords) -> Option<Coords> {
        let &i = self.index.get(id)?;
        let pin = self.pins.get_mut(i)?;
        let previous = pin.coords();
        pin.set_coords(coords);
        Some(previous)
    }

    /// All pins in draw order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Pin> {
        self.pins.iter()
    }

    /// Placed pins in draw order (bottom first).
    pub fn placed(&self) -> impl DoubleEndedIterator<Item = &Pin> {
        self.pins.iter().filter(|p| p.is_placed())
    }

    /// Number of pins in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns `true` if the store contains no pins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
