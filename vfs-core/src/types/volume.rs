//! Volume domain types.
//!
//! `CreateVolumeRequest` mirrors the wire message of the volume RPC protocol
//! and serializes with that protocol's canonical JSON mapping: lowerCamelCase
//! field names, 64-bit integers as strings, enums by name, default values
//! omitted, map keys sorted. Decoding also accepts original snake_case
//! names, numeric integers and numeric enum values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request payload used to provision a volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateVolumeRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(alias = "capacity_range", skip_serializing_if = "Option::is_none")]
    pub capacity_range: Option<CapacityRange>,

    #[serde(alias = "volume_capabilities", skip_serializing_if = "Vec::is_empty")]
    pub volume_capabilities: Vec<VolumeCapability>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, String>,

    #[serde(alias = "controller_create_secrets", skip_serializing_if = "BTreeMap::is_empty")]
    pub controller_create_secrets: BTreeMap<String, String>,
}

impl CreateVolumeRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Capacity to record for this request: the required size if set,
    /// otherwise the limit, otherwise zero.
    pub fn requested_capacity(&self) -> i64 {
        match &self.capacity_range {
            Some(range) if range.required_bytes != 0 => range.required_bytes,
            Some(range) => range.limit_bytes,
            None => 0,
        }
    }
}

/// Size bounds for a new volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CapacityRange {
    #[serde(alias = "required_bytes", with = "int64", skip_serializing_if = "is_zero")]
    pub required_bytes: i64,

    #[serde(alias = "limit_bytes", with = "int64", skip_serializing_if = "is_zero")]
    pub limit_bytes: i64,
}

/// How a volume will be accessed once published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeCapability {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockVolume>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount: Option<MountVolume>,

    #[serde(alias = "access_mode", skip_serializing_if = "Option::is_none")]
    pub access_mode: Option<AccessMode>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockVolume {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MountVolume {
    #[serde(alias = "fs_type", skip_serializing_if = "String::is_empty")]
    pub fs_type: String,

    #[serde(alias = "mount_flags", skip_serializing_if = "Vec::is_empty")]
    pub mount_flags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessMode {
    #[serde(skip_serializing_if = "AccessModeKind::is_unknown")]
    pub mode: AccessModeKind,
}

/// Access mode enumeration, numbered as on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "EnumRepr")]
pub enum AccessModeKind {
    #[default]
    Unknown,
    SingleNodeWriter,
    SingleNodeReaderOnly,
    MultiNodeReaderOnly,
    MultiNodeSingleWriter,
    MultiNodeMultiWriter,
}

impl AccessModeKind {
    const ALL: [AccessModeKind; 6] = [
        Self::Unknown,
        Self::SingleNodeWriter,
        Self::SingleNodeReaderOnly,
        Self::MultiNodeReaderOnly,
        Self::MultiNodeSingleWriter,
        Self::MultiNodeMultiWriter,
    ];

    fn is_unknown(&self) -> bool {
        *self == Self::Unknown
    }

    fn wire_name(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::SingleNodeWriter => "SINGLE_NODE_WRITER",
            Self::SingleNodeReaderOnly => "SINGLE_NODE_READER_ONLY",
            Self::MultiNodeReaderOnly => "MULTI_NODE_READER_ONLY",
            Self::MultiNodeSingleWriter => "MULTI_NODE_SINGLE_WRITER",
            Self::MultiNodeMultiWriter => "MULTI_NODE_MULTI_WRITER",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Name(String),
    Number(i64),
}

impl TryFrom<EnumRepr> for AccessModeKind {
    type Error = String;

    fn try_from(repr: EnumRepr) -> Result<Self, Self::Error> {
        match repr {
            EnumRepr::Name(name) => Self::ALL
                .into_iter()
                .find(|m| m.wire_name() == name)
                .ok_or_else(|| format!("unknown access mode: {}", name)),
            EnumRepr::Number(n) => usize::try_from(n)
                .ok()
                .and_then(|i| Self::ALL.get(i).copied())
                .ok_or_else(|| format!("unknown access mode: {}", n)),
        }
    }
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

/// 64-bit integers travel as JSON strings; numbers are accepted on input.
mod int64 {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Public view of a volume handed back to RPC callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume ID (same as its name)
    pub id: String,

    /// Recorded capacity in bytes
    pub capacity_bytes: i64,

    /// Creation parameters, re-exposed as volume attributes
    pub attributes: BTreeMap<String, String>,
}
