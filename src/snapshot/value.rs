use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::snapshot::hasher::{HashCode, Hashable, Hasher};
use crate::snapshot::structural::{SnapshotKind, StructuralSnapshot};

const TAG_NULL: u8 = 0;
const TAG_BOOLEAN: u8 = 1;
const TAG_INTEGER: u8 = 2;
const TAG_LONG: u8 = 3;
const TAG_STRING: u8 = 4;
const TAG_ENUM: u8 = 5;
const TAG_HASHED: u8 = 6;
const TAG_LIST: u8 = 7;
const TAG_MAP: u8 = 8;
const TAG_MANAGED: u8 = 9;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Unsupported number in snapshot: {0}")]
    UnsupportedNumber(String),
}

/// Immutable description of a value, for equality and cache keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ValueSnapshot {
    Null,
    Boolean(bool),
    Integer(i32),
    Long(i64),
    String(String),
    Enum { type_name: String, name: String },
    /// A value already reduced to a digest, e.g. file contents.
    Hashed(HashCode),
    List(Vec<ValueSnapshot>),
    Map(Vec<(ValueSnapshot, ValueSnapshot)>),
    Managed(ManagedValueSnapshot),
}

impl ValueSnapshot {
    /// Snapshot a JSON value. Integers become `Long`.
    ///
    /// Fractional numbers are rejected since they have no stable identity,
    /// and so are integers above `i64::MAX`, which `Long` cannot hold.
    pub fn from_json(value: &Value) -> Result<Self, SnapshotError> {
        let snapshot = match value {
            Value::Null => ValueSnapshot::Null,
            Value::Bool(b) => ValueSnapshot::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ValueSnapshot::Long(i),
                None => return Err(SnapshotError::UnsupportedNumber(n.to_string())),
            },
            Value::String(s) => ValueSnapshot::String(s.clone()),
            Value::Array(items) => ValueSnapshot::List(
                items
                    .iter()
                    .map(ValueSnapshot::from_json)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => {
                let mut entries = map
                    .iter()
                    .map(|(k, v)| -> Result<_, SnapshotError> {
                        Ok((k.as_str(), ValueSnapshot::from_json(v)?))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                // Must not depend on whether serde_json preserves insertion order.
                entries.sort_by(|a, b| a.0.cmp(b.0));
                ValueSnapshot::Map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (ValueSnapshot::String(k.to_string()), v))
                        .collect(),
                )
            }
        };

        Ok(snapshot)
    }
}

impl Hashable for ValueSnapshot {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        match self {
            ValueSnapshot::Null => hasher.put_byte(TAG_NULL),
            ValueSnapshot::Boolean(b) => {
                hasher.put_byte(TAG_BOOLEAN);
                hasher.put_bool(*b);
            }
            ValueSnapshot::Integer(i) => {
                hasher.put_byte(TAG_INTEGER);
                hasher.put_int(*i);
            }
            ValueSnapshot::Long(l) => {
                hasher.put_byte(TAG_LONG);
                hasher.put_long(*l);
            }
            ValueSnapshot::String(s) => {
                hasher.put_byte(TAG_STRING);
                hasher.put_string(s);
            }
            ValueSnapshot::Enum { type_name, name } => {
                hasher.put_byte(TAG_ENUM);
                hasher.put_string(type_name);
                hasher.put_string(name);
            }
            ValueSnapshot::Hashed(hash) => {
                hasher.put_byte(TAG_HASHED);
                hasher.put_hash(hash);
            }
            ValueSnapshot::List(items) => {
                hasher.put_byte(TAG_LIST);
                hasher.put_long(items.len() as i64);
                for item in items {
                    item.append_to_hasher(hasher);
                }
            }
            ValueSnapshot::Map(entries) => {
                hasher.put_byte(TAG_MAP);
                hasher.put_long(entries.len() as i64);
                for (key, value) in entries {
                    key.append_to_hasher(hasher);
                    value.append_to_hasher(hasher);
                }
            }
            ValueSnapshot::Managed(managed) => {
                hasher.put_byte(TAG_MANAGED);
                managed.append_to_hasher(hasher);
            }
        }
    }
}

impl From<&str> for ValueSnapshot {
    fn from(value: &str) -> Self {
        ValueSnapshot::String(value.to_string())
    }
}

impl From<String> for ValueSnapshot {
    fn from(value: String) -> Self {
        ValueSnapshot::String(value)
    }
}

impl From<bool> for ValueSnapshot {
    fn from(value: bool) -> Self {
        ValueSnapshot::Boolean(value)
    }
}

impl From<i32> for ValueSnapshot {
    fn from(value: i32) -> Self {
        ValueSnapshot::Integer(value)
    }
}

impl From<i64> for ValueSnapshot {
    fn from(value: i64) -> Self {
        ValueSnapshot::Long(value)
    }
}

impl From<ManagedValueSnapshot> for ValueSnapshot {
    fn from(value: ManagedValueSnapshot) -> Self {
        ValueSnapshot::Managed(value)
    }
}

/// Snapshot of a managed value: its type plus its field values in declared
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManagedValueSnapshot {
    type_name: String,
    state: StructuralSnapshot<ValueSnapshot>,
}

impl ManagedValueSnapshot {
    pub fn new(type_name: impl Into<String>, fields: Vec<ValueSnapshot>) -> Self {
        Self::with_kind(SnapshotKind::Managed, type_name, fields)
    }

    pub fn immutable(type_name: impl Into<String>, fields: Vec<ValueSnapshot>) -> Self {
        Self::with_kind(SnapshotKind::ImmutableManaged, type_name, fields)
    }

    fn with_kind(
        kind: SnapshotKind,
        type_name: impl Into<String>,
        fields: Vec<ValueSnapshot>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            state: StructuralSnapshot::new(kind, fields),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn kind(&self) -> SnapshotKind {
        self.state.kind()
    }

    pub fn state(&self) -> &StructuralSnapshot<ValueSnapshot> {
        &self.state
    }

    pub fn fields(&self) -> &[ValueSnapshot] {
        self.state.state()
    }
}

impl Hashable for ManagedValueSnapshot {
    fn append_to_hasher(&self, hasher: &mut Hasher) {
        hasher.put_byte(self.state.kind().hash_tag());
        hasher.put_string(&self.type_name);
        // Field count keeps nested managed values self-delimiting.
        hasher.put_long(self.state.len() as i64);
        self.state.append_to_hasher(hasher);
    }
}
