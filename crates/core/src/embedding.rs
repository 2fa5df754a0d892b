use serde_json::{Map, Value};

use crate::CompareError;

/// A single embedding vector.
pub type Embedding = Vec<f64>;

/// Embeddings keyed by caller-chosen id, in the order they were supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingSet {
  entries: Vec<(String, Embedding)>,
}

impl EmbeddingSet {
  /// Check that every value is an array whose elements are all floats.
  ///
  /// The check is type-exact on the source text: integer literals such as `1`
  /// or `100000000000000000000` are rejected, only numbers written as floats
  /// (`1.0`, `1e3`) pass. Literals that overflow `f64` are rejected too.
  ///
  /// # Errors
  ///
  /// Returns [`CompareError::InvalidEmbeddingFormat`] naming the first id whose
  /// value is not an array of floats.
  pub fn validate(raw: Map<String, Value>) -> Result<Self, CompareError> {
    let entries = raw
      .into_iter()
      .map(|(id, value)| match parse_embedding(&value) {
        Some(embedding) => Ok((id, embedding)),
        None => {
          tracing::error!(id = %id, "Invalid embedding format detected");
          Err(CompareError::InvalidEmbeddingFormat { id })
        }
      })
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self { entries })
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
    self
      .entries
      .iter()
      .map(|(id, embedding)| (id.as_str(), embedding.as_slice()))
  }
}

impl<K: Into<String>> FromIterator<(K, Embedding)> for EmbeddingSet {
  fn from_iter<I: IntoIterator<Item = (K, Embedding)>>(iter: I) -> Self {
    Self {
      entries: iter.into_iter().map(|(id, e)| (id.into(), e)).collect(),
    }
  }
}

fn parse_embedding(value: &Value) -> Option<Embedding> {
  let Value::Array(items) = value else {
    return None;
  };

  items
    .iter()
    .map(|item| match item {
      Value::Number(n) => parse_float_literal(&n.to_string()),
      _ => None,
    })
    .collect()
}

/// Accept a number only when its source text is written as a float.
fn parse_float_literal(text: &str) -> Option<f64> {
  if !text.contains(['.', 'e', 'E']) {
    return None;
  }
  text.parse::<f64>().ok().filter(|value| value.is_finite())
}
