//! Property value kind tag.

/// Tag distinguishing how a record's value bytes are interpreted.
///
/// Exactly one kind per record. The discriminants are the tag byte of the
/// binary record layout and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ValueKind {
    /// Opaque, pre-validated JSON sub-document (raw bytes).
    Json = 0,
    /// 4-byte little-endian signed integer.
    Int32 = 1,
    /// UTF-8 text (unescaped).
    Utf8String = 2,
    /// Boolean `true`; the kind alone is the value, payload is empty.
    BooleanTrue = 3,
    /// Boolean `false`; payload is empty.
    BooleanFalse = 4,
    /// Explicit JSON `null`, distinct from absence.
    Null = 5,
    /// Tombstone: logically removed, retained for occupancy bookkeeping.
    Removed = 6,
}

impl ValueKind {
    pub fn from_u8(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => ValueKind::Json,
            1 => ValueKind::Int32,
            2 => ValueKind::Utf8String,
            3 => ValueKind::BooleanTrue,
            4 => ValueKind::BooleanFalse,
            5 => ValueKind::Null,
            6 => ValueKind::Removed,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Json => "json",
            ValueKind::Int32 => "int32",
            ValueKind::Utf8String => "string",
            ValueKind::BooleanTrue => "true",
            ValueKind::BooleanFalse => "false",
            ValueKind::Null => "null",
            ValueKind::Removed => "removed",
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, ValueKind::BooleanTrue | ValueKind::BooleanFalse)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_roundtrip() {
        for kind in [
            ValueKind::Json,
            ValueKind::Int32,
            ValueKind::Utf8String,
            ValueKind::BooleanTrue,
            ValueKind::BooleanFalse,
            ValueKind::Null,
            ValueKind::Removed,
        ] {
            assert_eq!(ValueKind::from_u8(kind as u8), Some(kind));
        }
        assert_eq!(ValueKind::from_u8(7), None);
        assert_eq!(ValueKind::from_u8(255), None);
    }

    #[test]
    fn test_is_boolean() {
        assert!(ValueKind::BooleanTrue.is_boolean());
        assert!(ValueKind::BooleanFalse.is_boolean());
        assert!(!ValueKind::Null.is_boolean());
    }
}
