use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::gurl::Gurl;

/// Serialized as the persisted blob string
impl Serialize for Gurl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&crate::serializer::serialize(self))
    }
}

/// Decoded with the strict, current-version-only decoder; serde input is not
/// trusted enough for the re-parse fallback to kick in silently
impl<'de> Deserialize<'de> for Gurl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Gurl::deserialize_latest_version_only(&text).map_err(de::Error::custom)
    }
}
