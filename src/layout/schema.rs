use super::key::{Key, Location};
use crate::error::{KaResult, KeyAnnealError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// On-disk layout document: rows of key descriptors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub layout: Vec<Vec<KeyDescriptor>>,
}

/// One key as written in a layout file. Either `name` (a fixed,
/// non-printing key) or `base` + `shift` (a printable key) must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl KeyDescriptor {
    pub fn fixed(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: Some(name.into()),
            base: None,
            shift: None,
            x,
            y,
            width: None,
        }
    }

    pub fn printable(base: impl Into<String>, shift: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: None,
            base: Some(base.into()),
            shift: Some(shift.into()),
            x,
            y,
            width: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}

/// A validated descriptor, ready for layout construction.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySpec {
    Fixed {
        name: String,
        location: Location,
        width: Option<f64>,
    },
    Printable {
        base: String,
        shift: String,
        location: Location,
        width: Option<f64>,
    },
}

impl KeySpec {
    pub fn location(&self) -> Location {
        match self {
            Self::Fixed { location, .. } | Self::Printable { location, .. } => *location,
        }
    }
}

impl LayoutDocument {
    pub fn from_json_str(content: &str) -> KaResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KaResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json_pretty(&self) -> KaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> KaResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_pretty()?)?;
        info!("Layout written to {}", path.display());
        Ok(())
    }

    pub fn key_count(&self) -> usize {
        self.layout.iter().map(Vec::len).sum()
    }

    /// Validates every descriptor, in document order.
    pub fn key_specs(&self) -> KaResult<Vec<KeySpec>> {
        let mut specs = Vec::with_capacity(self.key_count());
        for (r, row) in self.layout.iter().enumerate() {
            for (c, desc) in row.iter().enumerate() {
                specs.push(validate_descriptor(desc, r, c)?);
            }
        }
        Ok(specs)
    }

    /// Rebuilds a document from keys: rows grouped by `y` ascending, keys
    /// sorted by `x` within a row. Immovable keys are written as `name`
    /// descriptors. Keys without a usable location are skipped.
    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a Key>,
    {
        let mut placed: Vec<(Location, KeyDescriptor)> = Vec::new();

        for key in keys {
            let loc = match key.location {
                Some(loc) if loc.is_finite() => loc,
                other => {
                    warn!(
                        "Skipping key '{}' with invalid location {:?}",
                        key.base, other
                    );
                    continue;
                }
            };

            let mut desc = if key.is_immovable {
                KeyDescriptor::fixed(key.base.clone(), loc.x, loc.y)
            } else {
                KeyDescriptor::printable(key.base.clone(), key.shift.clone(), loc.x, loc.y)
            };
            desc.width = key.width;
            placed.push((loc, desc));
        }

        placed.sort_by(|(a, _), (b, _)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

        let layout: Vec<Vec<KeyDescriptor>> = placed
            .into_iter()
            .chunk_by(|(loc, _)| loc.y)
            .into_iter()
            .map(|(_, row)| row.map(|(_, desc)| desc).collect::<Vec<_>>())
            .collect();

        Self { layout }
    }
}

fn validate_descriptor(desc: &KeyDescriptor, row: usize, col: usize) -> KaResult<KeySpec> {
    let location = Location::new(desc.x, desc.y);
    if !location.is_finite() {
        return Err(KeyAnnealError::Schema(format!(
            "row {}, key {}: coordinates must be finite, got {}",
            row, col, location
        )));
    }
    if let Some(w) = desc.width {
        if !w.is_finite() || w <= 0.0 {
            return Err(KeyAnnealError::Schema(format!(
                "row {}, key {}: width must be positive, got {}",
                row, col, w
            )));
        }
    }

    if let Some(name) = &desc.name {
        return Ok(KeySpec::Fixed {
            name: name.clone(),
            location,
            width: desc.width,
        });
    }

    match (&desc.base, &desc.shift) {
        (Some(base), Some(shift)) => Ok(KeySpec::Printable {
            base: base.clone(),
            shift: shift.clone(),
            location,
            width: desc.width,
        }),
        (Some(_), None) => Err(KeyAnnealError::Schema(format!(
            "row {}, key {}: printable key has `base` but no `shift`",
            row, col
        ))),
        (None, Some(_)) => Err(KeyAnnealError::Schema(format!(
            "row {}, key {}: printable key has `shift` but no `base`",
            row, col
        ))),
        (None, None) => Err(KeyAnnealError::Schema(format!(
            "row {}, key {}: descriptor needs either `name` or both `base` and `shift`",
            row, col
        ))),
    }
}
