//! JAMS annotation document model
//!
//! Only `chord` namespace annotations are editable. Entries from other
//! namespaces and any fields this editor does not interpret are carried
//! through import and export untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{AnnotatorError, Result};

pub const CHORD_NAMESPACE: &str = "chord";

/// Origin of an annotation set
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum DataSource {
    /// Automatic analysis; never deleted or overwritten
    Program,
    User,
    Collaborative,
    /// Any other value found in an imported file
    Other(String),
}

impl DataSource {
    pub fn as_str(&self) -> &str {
        match self {
            DataSource::Program => "program",
            DataSource::User => "user",
            DataSource::Collaborative => "collaborative",
            DataSource::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for DataSource {
    fn from(s: String) -> Self {
        match s.as_str() {
            "program" => DataSource::Program,
            "user" => DataSource::User,
            "collaborative" => DataSource::Collaborative,
            _ => DataSource::Other(s),
        }
    }
}

impl From<DataSource> for String {
    fn from(source: DataSource) -> Self {
        source.as_str().to_string()
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::User
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Curator {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AnnotationMetadata {
    #[serde(default)]
    pub curator: Curator,
    #[serde(default)]
    pub data_source: DataSource,
    #[serde(default)]
    pub annotation_tools: String,
    #[serde(default)]
    pub annotation_rules: String,
    #[serde(default)]
    pub validation: String,
    #[serde(default)]
    pub corpus: String,
    #[serde(default)]
    pub version: String,

    /// Unrecognised metadata (e.g. `annotator`)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Sandbox {
    #[serde(default)]
    pub description: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One time-stamped chord observation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Observation {
    pub time: f64,
    pub duration: f64,
    pub value: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Observation {
    pub fn new(time: f64, duration: f64, value: &str) -> Self {
        Self {
            time,
            duration,
            value: value.to_string(),
            confidence: None,
        }
    }
}

/// One complete labelling pass over the track
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotationSet {
    pub annotation_metadata: AnnotationMetadata,
    pub namespace: String,
    #[serde(default)]
    pub sandbox: Sandbox,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub duration: Option<f64>,
    pub data: Vec<Observation>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnnotationSet {
    /// Create a chord annotation with the given metadata and observations
    pub fn new(metadata: AnnotationMetadata, description: &str, data: Vec<Observation>) -> Self {
        Self {
            annotation_metadata: metadata,
            namespace: CHORD_NAMESPACE.to_string(),
            sandbox: Sandbox {
                description: description.to_string(),
                extra: Map::new(),
            },
            time: 0.0,
            duration: None,
            data,
            extra: Map::new(),
        }
    }

    pub fn data_source(&self) -> &DataSource {
        &self.annotation_metadata.data_source
    }

    pub fn is_program(&self) -> bool {
        *self.data_source() == DataSource::Program
    }

    /// Text shown for this set in the annotation list
    pub fn list_label(&self) -> String {
        match self.data_source() {
            DataSource::Program => "(automatic analysis)".to_string(),
            _ => format!("Edit by {}", self.annotation_metadata.curator.name),
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        for (i, obs) in self.data.iter().enumerate() {
            if !obs.time.is_finite() || obs.time < 0.0 {
                return Err(AnnotatorError::InvalidDocument(format!(
                    "annotation {} observation {}: invalid time {}",
                    index, i, obs.time
                )));
            }
            if !obs.duration.is_finite() || obs.duration < 0.0 {
                return Err(AnnotatorError::InvalidDocument(format!(
                    "annotation {} observation {}: invalid duration {}",
                    index, i, obs.duration
                )));
            }
        }
        Ok(())
    }
}

/// Metadata typed into the save prompt
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct AnnotationForm {
    pub curator_name: String,
    pub data_source: DataSource,
    pub description: String,
}

#[derive(Serialize, Deserialize)]
struct RawDocument {
    annotations: Vec<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Serialize)]
struct RawDocumentOut<'a> {
    annotations: Vec<Value>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// In-memory annotation file
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationDocument {
    /// Editable chord annotations, in file order
    pub annotations: Vec<AnnotationSet>,

    /// Annotations of other namespaces with their position in the file
    other_annotations: Vec<(usize, Value)>,

    /// Top-level fields besides `annotations` (`file_metadata`, `sandbox`, ...)
    extra: Map<String, Value>,
}

/// Result of a successful import
#[derive(Clone, Debug, PartialEq)]
pub struct ImportedDocument {
    pub document: AnnotationDocument,

    /// Non-fatal problems (skipped namespaces)
    pub warnings: Vec<AnnotatorError>,
}

impl AnnotationDocument {
    pub fn new(annotations: Vec<AnnotationSet>) -> Self {
        Self {
            annotations,
            other_annotations: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Parse a JAMS file
    pub fn from_json_bytes(bytes: &[u8]) -> Result<ImportedDocument> {
        let raw: RawDocument = serde_json::from_slice(bytes)?;
        let mut document = AnnotationDocument {
            annotations: Vec::new(),
            other_annotations: Vec::new(),
            extra: raw.extra,
        };
        let mut warnings = Vec::new();

        for (index, value) in raw.annotations.into_iter().enumerate() {
            let namespace = value
                .get("namespace")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    AnnotatorError::InvalidDocument(format!("annotation {} has no namespace", index))
                })?
                .to_string();

            if namespace != CHORD_NAMESPACE {
                log::warn!("Skipping annotation {} with unsupported namespace '{}'", index, namespace);
                warnings.push(AnnotatorError::UnsupportedNamespace { namespace, index });
                document.other_annotations.push((index, value));
                continue;
            }

            let set: AnnotationSet = serde_json::from_value(value).map_err(|e| {
                AnnotatorError::InvalidDocument(format!("annotation {}: {}", index, e))
            })?;
            set.validate(index)?;
            document.annotations.push(set);
        }

        if document.annotations.is_empty() {
            return Err(AnnotatorError::InvalidDocument(
                "no chord annotations found".to_string(),
            ));
        }

        log::info!(
            "Imported {} chord annotation(s), skipped {}",
            document.annotations.len(),
            warnings.len()
        );
        Ok(ImportedDocument { document, warnings })
    }

    /// Serialize back to JAMS (2-space indented JSON).
    ///
    /// Other-namespace entries go back to their original positions; chord
    /// annotations fill the remaining slots in order.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let total = self.annotations.len() + self.other_annotations.len();
        let mut annotations = Vec::with_capacity(total);
        let mut chords = self.annotations.iter().peekable();
        let mut others = self.other_annotations.iter().peekable();

        for position in 0..total {
            let other_due = others.peek().map_or(false, |(index, _)| *index <= position);
            match chords.peek() {
                Some(set) if !other_due => {
                    annotations.push(serde_json::to_value(set)?);
                    chords.next();
                }
                _ => {
                    if let Some((_, value)) = others.next() {
                        annotations.push(value.clone());
                    }
                }
            }
        }

        let out = RawDocumentOut {
            annotations,
            extra: &self.extra,
        };
        Ok(serde_json::to_vec_pretty(&out)?)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AnnotationSet> {
        self.annotations.get(index)
    }

    /// Track length recorded in `file_metadata.duration`, if any
    pub fn file_duration(&self) -> Option<f64> {
        self.extra
            .get("file_metadata")
            .and_then(|meta| meta.get("duration"))
            .and_then(Value::as_f64)
            .filter(|d| d.is_finite() && *d > 0.0)
    }

    pub fn append(&mut self, set: AnnotationSet) -> usize {
        self.annotations.push(set);
        self.annotations.len() - 1
    }

    pub fn replace_at(&mut self, index: usize, set: AnnotationSet) -> Option<AnnotationSet> {
        let slot = self.annotations.get_mut(index)?;
        Some(std::mem::replace(slot, set))
    }

    pub fn remove_at(&mut self, index: usize) -> Option<AnnotationSet> {
        if index < self.annotations.len() {
            Some(self.annotations.remove(index))
        } else {
            None
        }
    }
}
