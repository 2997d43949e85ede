use serde::{Deserialize, Serialize};

/// Fixed-width integer kind used for scalar fields, sequence count prefixes,
/// enum representations and hierarchy tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
        }
    }

    /// Serialized width in bytes.
    pub fn byte_len(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
            Self::U64 | Self::I64 => 8,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Smallest value representable by this kind.
    pub fn min_value(self) -> i128 {
        match self {
            Self::U8 | Self::U16 | Self::U32 | Self::U64 => 0,
            Self::I8 => i8::MIN as i128,
            Self::I16 => i16::MIN as i128,
            Self::I32 => i32::MIN as i128,
            Self::I64 => i64::MIN as i128,
        }
    }

    /// Largest value representable by this kind.
    pub fn max_value(self) -> i128 {
        match self {
            Self::U8 => u8::MAX as i128,
            Self::U16 => u16::MAX as i128,
            Self::U32 => u32::MAX as i128,
            Self::U64 => u64::MAX as i128,
            Self::I8 => i8::MAX as i128,
            Self::I16 => i16::MAX as i128,
            Self::I32 => i32::MAX as i128,
            Self::I64 => i64::MAX as i128,
        }
    }

    /// Whether `value` is representable by this kind.
    pub fn fits(self, value: i128) -> bool {
        value >= self.min_value() && value <= self.max_value()
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_len() {
        assert_eq!(ScalarKind::U8.byte_len(), 1);
        assert_eq!(ScalarKind::I16.byte_len(), 2);
        assert_eq!(ScalarKind::U32.byte_len(), 4);
        assert_eq!(ScalarKind::I64.byte_len(), 8);
    }

    #[test]
    fn test_fits_unsigned() {
        assert!(ScalarKind::U8.fits(0));
        assert!(ScalarKind::U8.fits(255));
        assert!(!ScalarKind::U8.fits(256));
        assert!(!ScalarKind::U8.fits(-1));
        assert!(ScalarKind::U64.fits(u64::MAX as i128));
        assert!(!ScalarKind::U64.fits(u64::MAX as i128 + 1));
    }

    #[test]
    fn test_fits_signed() {
        assert!(ScalarKind::I8.fits(-128));
        assert!(ScalarKind::I8.fits(127));
        assert!(!ScalarKind::I8.fits(128));
        assert!(ScalarKind::I64.fits(i64::MIN as i128));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ScalarKind::U16).unwrap();
        assert_eq!(json, "\"u16\"");
        let back: ScalarKind = serde_json::from_str("\"i64\"").unwrap();
        assert_eq!(back, ScalarKind::I64);
    }
}
