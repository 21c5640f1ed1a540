// StorageType
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use std::fmt;

/// S3 storage classes, named as they appear in the `StorageType` dimension
/// of the `BucketSizeBytes` CloudWatch metric.
///
/// Variant order is the order tiers are queried in and reported in.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum StorageType {
    /// `StandardStorage`
    Standard,
    /// `StandardIAStorage`
    StandardIA,
    /// `ReducedRedundancyStorage`
    ReducedRedundancy,
    /// `GlacierStorage`
    Glacier,
    /// `DeepArchiveStorage`
    DeepArchive,
    /// `IntelligentTieringStorage`
    IntelligentTiering,
    /// `OneZoneIAStorage`
    OneZoneIA,
}

impl StorageType {
    /// Every storage type that bucket sizes are looked up for.
    pub const ALL: [Self; 7] = [
        Self::Standard,
        Self::StandardIA,
        Self::ReducedRedundancy,
        Self::Glacier,
        Self::DeepArchive,
        Self::IntelligentTiering,
        Self::OneZoneIA,
    ];

    /// Storage type that sizes obtained by listing objects are reported
    /// under.
    ///
    /// An object listing can't tell us how a bucket is split across storage
    /// classes, so the whole size is attributed to standard storage.
    pub const FALLBACK: Self = Self::Standard;

    /// Returns the CloudWatch dimension value for this storage type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard           => "StandardStorage",
            Self::StandardIA         => "StandardIAStorage",
            Self::ReducedRedundancy  => "ReducedRedundancyStorage",
            Self::Glacier            => "GlacierStorage",
            Self::DeepArchive        => "DeepArchiveStorage",
            Self::IntelligentTiering => "IntelligentTieringStorage",
            Self::OneZoneIA          => "OneZoneIAStorage",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
