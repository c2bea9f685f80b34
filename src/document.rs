use serde::{Deserialize, Serialize};

/// How a field's value is treated by the writer.
///
/// `TEXT` is analyzed and posted with positions; `KEYWORD` is lowercased and
/// posted as a single token at position 0; `STORED` never reaches the
/// inverted index, it is kept in the document store only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    Keyword,
    Stored,
}

/// A named, typed value on a [`Document`].
///
/// Numeric values are accepted as `value` but must already be stringified by
/// the caller; the core never parses or reformats field values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub field_type: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            field_type,
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldType::Text)
    }

    pub fn keyword(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldType::Keyword)
    }

    pub fn stored(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, value, FieldType::Stored)
    }
}

/// A document: an opaque identifier plus an ordered sequence of fields.
///
/// `doc_id` is opaque to the core; an ingestion driver typically uses a
/// filesystem path. Field order is preserved for the stored form but is not
/// semantically meaningful to indexing, except that positions within a
/// single `TEXT` field are dense and 0-based (see [`crate::writer::IndexWriter::add_document`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub fields: Vec<Field>,
}

impl Document {
    pub fn new(doc_id: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, field: Field) -> &mut Self {
        self.fields.push(field);
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_field_preserves_order() {
        let mut doc = Document::new("1");
        doc.add_field(Field::text("title", "a"))
            .add_field(Field::text("body", "b"));
        assert_eq!(doc.fields[0].name, "title");
        assert_eq!(doc.fields[1].name, "body");
    }

    #[test]
    fn get_field_returns_first_match() {
        let mut doc = Document::new("1");
        doc.add_field(Field::keyword("tag", "a"));
        assert_eq!(doc.get_field("tag").unwrap().value, "a");
        assert!(doc.get_field("missing").is_none());
    }
}
