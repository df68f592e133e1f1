//! Prompt records and the deck they are loaded into.

use serde::{Deserialize, Deserializer, Serialize};

/// Validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lon: f64,
}

impl Coords {
    /// Both components are finite numbers.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// One guessing round: a media title and the city it was filmed in.
///
/// Immutable once loaded. Coordinates are kept raw; `coords` performs the
/// validation the scoring pipeline relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub title: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub city: String,
    /// Raw `[lat, lon]` pair; `None` when absent or malformed in the source.
    #[serde(default, deserialize_with = "lenient_coordinates")]
    pub coordinates: Option<[f64; 2]>,
    /// Opaque poster reference for the display layer.
    #[serde(default)]
    pub poster: String,
}

impl Prompt {
    /// Validated coordinates, or `None` when the prompt is unscoreable.
    #[must_use]
    pub fn coords(&self) -> Option<Coords> {
        let [lat, lon] = self.coordinates?;
        let coords = Coords { lat, lon };
        coords.is_valid().then_some(coords)
    }
}

/// Accept `[lat, lon]` arrays but degrade anything else (missing, null,
/// wrong arity, non-numeric entries) to `None` instead of failing the
/// whole deck load. Such prompts stay in the deck and are auto-skipped
/// by the guess-submission path.
fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Option<[f64; 2]>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let Some(entries) = value.as_array() else {
        return Ok(None);
    };
    if entries.len() != 2 {
        return Ok(None);
    }
    match (entries[0].as_f64(), entries[1].as_f64()) {
        (Some(lat), Some(lon)) => Ok(Some([lat, lon])),
        _ => Ok(None),
    }
}

/// Container for all prompt data loaded at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PromptSet {
    pub prompts: Vec<Prompt>,
}

impl PromptSet {
    /// Create an empty prompt set (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            prompts: Vec::new(),
        }
    }

    /// Load prompt data from a JSON array string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into prompt records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create a prompt set from pre-built prompts.
    #[must_use]
    pub fn from_prompts(prompts: Vec<Prompt>) -> Self {
        Self { prompts }
    }

    /// Load the bundled prompt data shipped with the crate.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(include_str!("../assets/prompts.json"))
            .expect("bundled prompt data is valid JSON")
    }

    /// Rewrite poster references to the flat `img/series/` layout used by
    /// display layers, keeping only the file name of whatever path the
    /// data source shipped.
    pub fn normalize_poster_paths(&mut self) {
        for prompt in &mut self.prompts {
            if prompt.poster.is_empty() {
                continue;
            }
            let file_name = prompt
                .poster
                .rsplit('/')
                .next()
                .unwrap_or(prompt.poster.as_str());
            prompt.poster = format!("img/series/{file_name}");
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Consume the set, returning the prompt records.
    #[must_use]
    pub fn into_prompts(self) -> Vec<Prompt> {
        self.prompts
    }
}
