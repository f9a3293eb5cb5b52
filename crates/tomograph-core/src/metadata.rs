//! Patient and study metadata carried from image load to DICOM export.
//!
//! The field set is fixed. Every field always has a value: fields the
//! source does not provide hold [`PLACEHOLDER`]. Each entry keeps the value
//! read from the source next to the value edited by the user, and edits
//! produce a new [`MetaData`] instead of mutating a shared one.

use serde::{Deserialize, Serialize};

/// Value shown for fields missing from the source image.
pub const PLACEHOLDER: &str = "-";

/// The metadata fields exchanged with the DICOM boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetaField {
    PatientName,
    PatientId,
    PatientSex,
    PatientBirthDate,
    StudyDate,
    AdditionalPatientHistory,
}

impl MetaField {
    /// All fields in display order.
    pub const ALL: [MetaField; 6] = [
        MetaField::PatientName,
        MetaField::PatientId,
        MetaField::PatientSex,
        MetaField::PatientBirthDate,
        MetaField::StudyDate,
        MetaField::AdditionalPatientHistory,
    ];

    /// DICOM attribute keyword.
    pub fn name(self) -> &'static str {
        match self {
            MetaField::PatientName => "PatientName",
            MetaField::PatientId => "PatientID",
            MetaField::PatientSex => "PatientSex",
            MetaField::PatientBirthDate => "PatientBirthDate",
            MetaField::StudyDate => "StudyDate",
            MetaField::AdditionalPatientHistory => "AdditionalPatientHistory",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            MetaField::PatientName => "Patient's name",
            MetaField::PatientId => "Patient's ID",
            MetaField::PatientSex => "Patient's sex",
            MetaField::PatientBirthDate => "Patient's birth date",
            MetaField::StudyDate => "Study date",
            MetaField::AdditionalPatientHistory => "Comment",
        }
    }

    /// Look a field up by its DICOM keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// One metadata field with its source value and its edited value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaEntry {
    field: MetaField,
    decoded: String,
    edited: String,
}

impl MetaEntry {
    fn new(field: MetaField, decoded: String) -> Self {
        Self {
            field,
            edited: decoded.clone(),
            decoded,
        }
    }

    pub fn field(&self) -> MetaField {
        self.field
    }

    /// Value read from the source (or the placeholder).
    pub fn decoded(&self) -> &str {
        &self.decoded
    }

    /// Value to export. Starts equal to the decoded value.
    pub fn edited(&self) -> &str {
        &self.edited
    }

    /// Check if the user changed this field.
    pub fn is_edited(&self) -> bool {
        self.decoded != self.edited
    }
}

/// The full, ordered metadata record for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaData {
    entries: Vec<MetaEntry>,
}

impl Default for MetaData {
    fn default() -> Self {
        Self::from_source(|_| None)
    }
}

impl MetaData {
    /// Build the record by asking `lookup` for each field's DICOM keyword.
    ///
    /// Fields for which `lookup` returns `None` get [`PLACEHOLDER`].
    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let entries = MetaField::ALL
            .into_iter()
            .map(|field| {
                let value = lookup(field.name()).unwrap_or_else(|| PLACEHOLDER.to_string());
                MetaEntry::new(field, value)
            })
            .collect();
        Self { entries }
    }

    /// Build the record from `(keyword, value)` pairs. Unknown keywords are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let known: Vec<(MetaField, String)> = pairs
            .into_iter()
            .filter_map(|(key, value)| {
                MetaField::from_name(key.as_ref()).map(|field| (field, value.into()))
            })
            .collect();

        Self::from_source(|name| {
            known
                .iter()
                .find(|(field, _)| field.name() == name)
                .map(|(_, value)| value.clone())
        })
    }

    /// Return a copy with `field`'s edited value replaced.
    pub fn with_edit(&self, field: MetaField, value: impl Into<String>) -> Self {
        let value = value.into();
        let entries = self
            .entries
            .iter()
            .map(|entry| {
                if entry.field == field {
                    MetaEntry {
                        edited: value.clone(),
                        ..entry.clone()
                    }
                } else {
                    entry.clone()
                }
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, field: MetaField) -> &MetaEntry {
        // Every field is present by construction, in ALL order
        &self.entries[field as usize]
    }

    /// Entries in display order.
    pub fn entries(&self) -> &[MetaEntry] {
        &self.entries
    }

    /// `(DICOM keyword, edited value)` pairs in display order.
    pub fn edited_pairs(&self) -> Vec<(&'static str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.field.name(), entry.edited()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_placeholders() {
        let meta = MetaData::default();
        assert_eq!(meta.entries().len(), 6);
        for entry in meta.entries() {
            assert_eq!(entry.decoded(), PLACEHOLDER);
            assert_eq!(entry.edited(), PLACEHOLDER);
            assert!(!entry.is_edited());
        }
    }

    #[test]
    fn test_entries_in_display_order() {
        let meta = MetaData::default();
        let fields: Vec<MetaField> = meta.entries().iter().map(MetaEntry::field).collect();
        assert_eq!(fields, MetaField::ALL.to_vec());
        for field in MetaField::ALL {
            assert_eq!(meta.get(field).field(), field);
        }
    }

    #[test]
    fn test_from_pairs_fills_missing() {
        let meta = MetaData::from_pairs([
            ("PatientName", "Jan Kowalski"),
            ("StudyDate", "20210315"),
            ("Modality", "CT"),
        ]);
        assert_eq!(meta.get(MetaField::PatientName).decoded(), "Jan Kowalski");
        assert_eq!(meta.get(MetaField::StudyDate).decoded(), "20210315");
        assert_eq!(meta.get(MetaField::PatientId).decoded(), PLACEHOLDER);
        assert_eq!(meta.get(MetaField::AdditionalPatientHistory).decoded(), PLACEHOLDER);
    }

    #[test]
    fn test_with_edit_does_not_alias() {
        let original = MetaData::from_pairs([("PatientSex", "F")]);
        let edited = original.with_edit(MetaField::PatientSex, "M");

        assert_eq!(original.get(MetaField::PatientSex).edited(), "F");
        assert_eq!(edited.get(MetaField::PatientSex).decoded(), "F");
        assert_eq!(edited.get(MetaField::PatientSex).edited(), "M");
        assert!(edited.get(MetaField::PatientSex).is_edited());
        assert!(!edited.get(MetaField::PatientName).is_edited());
    }

    #[test]
    fn test_edited_pairs() {
        let meta = MetaData::default().with_edit(MetaField::PatientId, "42");
        let pairs = meta.edited_pairs();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], ("PatientName", "-"));
        assert_eq!(pairs[1], ("PatientID", "42"));
        assert_eq!(pairs[5], ("AdditionalPatientHistory", "-"));
    }

    #[test]
    fn test_field_names_and_labels() {
        assert_eq!(MetaField::PatientId.name(), "PatientID");
        assert_eq!(MetaField::AdditionalPatientHistory.label(), "Comment");
        assert_eq!(MetaField::from_name("PatientBirthDate"), Some(MetaField::PatientBirthDate));
        assert_eq!(MetaField::from_name("PatientAge"), None);
    }
}
