use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Metadata is an open-ended bag of provider facts (usage, model id, ...).
pub type Metadata = BTreeMap<String, MetaValue>;

/// MetaValue is a single metadata value.
///
/// Serialized untagged, so a bag renders as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Map(Metadata),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetaValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetaValue::Int(v) => Some(*v as f64),
            MetaValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Metadata> {
        match self {
            MetaValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(v: &str) -> Self {
        MetaValue::String(v.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(v: String) -> Self {
        MetaValue::String(v)
    }
}

impl From<i64> for MetaValue {
    fn from(v: i64) -> Self {
        MetaValue::Int(v)
    }
}

impl From<u32> for MetaValue {
    fn from(v: u32) -> Self {
        MetaValue::Int(v.into())
    }
}

impl From<f64> for MetaValue {
    fn from(v: f64) -> Self {
        MetaValue::Float(v)
    }
}

impl From<bool> for MetaValue {
    fn from(v: bool) -> Self {
        MetaValue::Bool(v)
    }
}

impl From<Metadata> for MetaValue {
    fn from(v: Metadata) -> Self {
        MetaValue::Map(v)
    }
}

/// Merge `src` into `dst`. Integers under the same key are summed;
/// nested maps merge recursively; anything else is overwritten.
pub(crate) fn merge_summing(dst: &mut Metadata, src: Metadata) {
    for (key, value) in src {
        match (dst.get_mut(&key), value) {
            (Some(MetaValue::Int(a)), MetaValue::Int(b)) => *a = a.saturating_add(b),
            (Some(MetaValue::Map(a)), MetaValue::Map(b)) => merge_summing(a, b),
            (_, value) => {
                dst.insert(key, value);
            }
        }
    }
}
