use crate::sanitize::strip_html;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::fmt;

pub const PLACEHOLDER: &str = "N/A";
pub const RUNNING: &str = "Running";

/// Why a field could not be taken from the source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// The key is not in the record at all.
    Absent,
    /// The key is there, but its value is `null`.
    Null,
}

/// Substitute shown for a field that could not be read.
///
/// The catalog reports an unfinished show with `"ended": null`, so that one
/// case reads as "Running". Everything else, including an `ended` key that is
/// missing entirely, is "N/A".
pub fn placeholder(field: &str, missing: Missing) -> &'static str {
    match (field, missing) {
        ("ended", Missing::Null) => RUNNING,
        _ => PLACEHOLDER,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Placeholder(&'static str),
}

impl FieldValue {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Number(n) => FieldValue::Number(n.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Placeholder(p) => f.write_str(p),
        }
    }
}

impl PartialEq<&str> for FieldValue {
    fn eq(&self, other: &&str) -> bool {
        match self {
            FieldValue::Text(s) => s == other,
            FieldValue::Placeholder(p) => p == other,
            FieldValue::Number(_) => false,
        }
    }
}

/// A show as printed by `--search`, with every gap filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowRecord {
    pub name: FieldValue,
    pub kind: FieldValue,
    pub language: FieldValue,
    pub genres: Vec<String>,
    pub status: FieldValue,
    pub average_runtime: FieldValue,
    pub premiered: FieldValue,
    pub ended: FieldValue,
    pub rating: FieldValue,
    pub summary: FieldValue,
}

impl ShowRecord {
    pub fn from_json(raw: &Value) -> Self {
        let empty = Map::new();
        let obj = raw.as_object().unwrap_or(&empty);

        let rating = match lookup(obj, "rating") {
            Ok(Value::Object(rating)) => field(rating, "average"),
            Ok(_) => FieldValue::Placeholder(placeholder("rating", Missing::Absent)),
            Err(missing) => FieldValue::Placeholder(placeholder("rating", missing)),
        };

        let summary = match field(obj, "summary") {
            FieldValue::Text(s) => FieldValue::Text(strip_html(&s)),
            other => other,
        };

        ShowRecord {
            name: field(obj, "name"),
            kind: field(obj, "type"),
            language: field(obj, "language"),
            genres: genres_of(raw).into_iter().map(String::from).collect(),
            status: field(obj, "status"),
            average_runtime: field(obj, "averageRuntime"),
            premiered: field(obj, "premiered"),
            ended: field(obj, "ended"),
            rating,
            summary,
        }
    }
}

impl fmt::Display for ShowRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Genres: {}", self.genres.join(", "))?;
        writeln!(f, "Status: {}", self.status)?;
        writeln!(f, "Average Runtime: {}", self.average_runtime)?;
        writeln!(f, "Premiered: {}", self.premiered)?;
        writeln!(f, "Ended: {}", self.ended)?;
        writeln!(f, "Rating: {}", self.rating)?;
        write!(f, "Summary: {}", self.summary)
    }
}

/// One entry of the full catalog listing, kept as the catalog sent it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawShow(pub Value);

impl RawShow {
    pub fn name(&self) -> &str {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(PLACEHOLDER)
    }

    pub fn genres(&self) -> Vec<&str> {
        genres_of(&self.0)
    }

    /// `rating.average`, when both levels are present and not null.
    pub fn rating(&self) -> Option<f64> {
        self.0.get("rating")?.get("average")?.as_f64()
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        let wanted = genre.to_lowercase();
        self.genres().iter().any(|g| g.to_lowercase() == wanted)
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Value, Missing> {
    match obj.get(key) {
        None => Err(Missing::Absent),
        Some(Value::Null) => Err(Missing::Null),
        Some(value) => Ok(value),
    }
}

fn field(obj: &Map<String, Value>, key: &str) -> FieldValue {
    match lookup(obj, key) {
        Ok(value) => FieldValue::from_json(value),
        Err(missing) => FieldValue::Placeholder(placeholder(key, missing)),
    }
}

fn genres_of(raw: &Value) -> Vec<&str> {
    raw.get("genres")
        .and_then(Value::as_array)
        .map(|genres| genres.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
