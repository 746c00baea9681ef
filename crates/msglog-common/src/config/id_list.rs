//! Comma-separated id lists used by the ignore settings

use msglog_core::Snowflake;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A set of ids entered as `"123, 456,789"`
///
/// Blank entries are dropped. Entries that are not ids are dropped with a
/// warning, so a typo never blocks the rest of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdList(Vec<Snowflake>);

impl IdList {
    /// Parse a comma-separated list
    pub fn parse(raw: &str) -> Self {
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match s.parse::<Snowflake>() {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!(entry = s, error = %e, "Skipping invalid id in ignore list");
                    None
                }
            })
            .collect();
        Self(ids)
    }

    #[inline]
    pub fn contains(&self, id: Snowflake) -> bool {
        self.0.contains(&id)
    }

    /// Check membership of an optional id; `None` never matches
    #[inline]
    pub fn contains_opt(&self, id: Option<Snowflake>) -> bool {
        id.is_some_and(|id| self.contains(id))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[Snowflake] {
        &self.0
    }
}

impl From<Vec<Snowflake>> for IdList {
    fn from(ids: Vec<Snowflake>) -> Self {
        Self(ids)
    }
}

impl FromIterator<Snowflake> for IdList {
    fn from_iter<I: IntoIterator<Item = Snowflake>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for IdList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl Serialize for IdList {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// Accepts the settings-UI string form, a single number, or a sequence
impl<'de> Deserialize<'de> for IdList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, SeqAccess, Visitor};

        struct IdListVisitor;

        impl<'de> Visitor<'de> for IdListVisitor {
            type Value = IdList;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a comma-separated id string or a list of ids")
            }

            fn visit_str<E>(self, value: &str) -> Result<IdList, E>
            where
                E: de::Error,
            {
                Ok(IdList::parse(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<IdList, E>
            where
                E: de::Error,
            {
                Ok(IdList(vec![Snowflake::new(value)]))
            }

            fn visit_u64<E>(self, value: u64) -> Result<IdList, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(|v| IdList(vec![Snowflake::new(v)]))
                    .map_err(|_| de::Error::custom("id out of range"))
            }

            fn visit_unit<E>(self) -> Result<IdList, E>
            where
                E: de::Error,
            {
                Ok(IdList::default())
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<IdList, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut ids = Vec::new();
                while let Some(id) = seq.next_element::<Snowflake>()? {
                    ids.push(id);
                }
                Ok(IdList(ids))
            }
        }

        deserializer.deserialize_any(IdListVisitor)
    }
}
