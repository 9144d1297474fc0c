//! Caller-supplied parameter streams.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One parameter stream: either a single scalar or a list aligned
/// positionally with the target surfaces.
///
/// In YAML/JSON a channel may be written as a bare scalar (`0.8`) or a
/// sequence (`[0.15, 0.18]`). A missing channel is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel<T>(Vec<T>);

impl<T> Channel<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self(values)
    }

    pub fn scalar(value: T) -> Self {
        Self(vec![value])
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.0
    }

    pub fn first(&self) -> Option<&T> {
        self.0.first()
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Channel<T> {
    fn from(values: Vec<T>) -> Self {
        Self(values)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Channel<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<U> {
            List(Vec<U>),
            Scalar(U),
        }

        Ok(match Repr::<T>::deserialize(deserializer)? {
            Repr::List(values) => Self(values),
            Repr::Scalar(value) => Self(vec![value]),
        })
    }
}

impl<T: Serialize> Serialize for Channel<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_and_list_forms() {
        let scalar: Channel<f64> = serde_yaml::from_str("0.8").unwrap();
        assert_eq!(scalar.values(), &[0.8]);

        let list: Channel<f64> = serde_yaml::from_str("[0.15, 0.18]").unwrap();
        assert_eq!(list.values(), &[0.15, 0.18]);

        let names: Channel<String> = serde_json::from_str("\"south roof\"").unwrap();
        assert_eq!(names.first().map(String::as_str), Some("south roof"));
    }

    #[test]
    fn serializes_as_sequence() {
        let channel = Channel::scalar(3_i64);
        assert_eq!(serde_json::to_string(&channel).unwrap(), "[3]");
    }
}
