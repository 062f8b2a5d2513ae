use postsign_core::hash::{base64_decode, base64_encode};
use postsign_core::Result;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single constraint clause in a policy document.
///
/// The wire form is positional: equality clauses are one-entry JSON objects,
/// prefix clauses are `["starts-with", "$field", prefix]` triples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    /// Requires the form field to equal the value exactly.
    Equal {
        /// Form field checked by the storage provider.
        field: String,
        /// Exact value the field must carry.
        value: String,
    },
    /// Requires the form field to start with the prefix.
    StartsWith {
        /// Form field checked by the storage provider.
        field: String,
        /// Prefix the field must start with. Empty accepts anything.
        prefix: String,
    },
}

impl Condition {
    /// Build an equality clause.
    pub fn equal(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equal {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Build a prefix-match clause.
    pub fn starts_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::StartsWith {
            field: field.into(),
            prefix: prefix.into(),
        }
    }
}

impl Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Condition::Equal { field, value } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(field, value)?;
                map.end()
            }
            Condition::StartsWith { field, prefix } => {
                let mut seq = serializer.serialize_tuple(3)?;
                seq.serialize_element("starts-with")?;
                seq.serialize_element(&format!("${field}"))?;
                seq.serialize_element(prefix)?;
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ConditionVisitor;

        impl<'de> Visitor<'de> for ConditionVisitor {
            type Value = Condition;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a one-entry object or a [\"starts-with\", \"$field\", prefix] triple")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let (field, value): (String, String) = map
                    .next_entry()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if map.next_entry::<String, String>()?.is_some() {
                    return Err(de::Error::custom(
                        "equality clause must hold exactly one entry",
                    ));
                }

                Ok(Condition::Equal { field, value })
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let op: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                if op != "starts-with" {
                    return Err(de::Error::custom(format!(
                        "unsupported condition operator: {op}"
                    )));
                }
                let field: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let prefix: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let field = field
                    .strip_prefix('$')
                    .ok_or_else(|| de::Error::custom("condition field must begin with '$'"))?;

                Ok(Condition::StartsWith {
                    field: field.to_string(),
                    prefix,
                })
            }
        }

        deserializer.deserialize_any(ConditionVisitor)
    }
}

/// The policy document that gets signed: a hard expiration plus the ordered
/// constraint clauses the upload form must satisfy.
///
/// Field order matters for the wire encoding and is fixed by the struct
/// declaration; the conditions keep their insertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// Hard validity boundary, ISO 8601 UTC. Uploads after this instant are
    /// rejected by the storage provider.
    pub expiration: String,
    /// Ordered constraint clauses. Never sorted, never deduplicated.
    pub conditions: Vec<Condition>,
}

impl PolicyDocument {
    /// Serialize to canonical JSON and base64-encode the bytes.
    pub fn encode(&self) -> Result<String> {
        Ok(base64_encode(&serde_json::to_vec(self)?))
    }

    /// Decode a base64 policy back into document form.
    pub fn decode(policy: &str) -> Result<Self> {
        let bytes = base64_decode(policy)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
