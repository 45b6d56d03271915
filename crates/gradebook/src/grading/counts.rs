use super::policy::CutoffPolicy;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Number of students per letter, in policy order with the failing letter last.
///
/// Every letter the policy can produce is present, including those nobody
/// earned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeCounts {
    entries: Vec<(String, usize)>,
}

impl GradeCounts {
    pub fn zeroed(policy: &CutoffPolicy) -> Self {
        Self {
            entries: policy
                .letters()
                .map(|letter| (letter.to_string(), 0))
                .collect(),
        }
    }

    pub fn tally<'a, I>(policy: &CutoffPolicy, grades: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::zeroed(policy);
        for grade in grades {
            if let Some(entry) = counts
                .entries
                .iter_mut()
                .find(|(letter, _)| letter == grade)
            {
                entry.1 += 1;
            }
        }
        counts
    }

    pub fn get(&self, letter: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(known, _)| known == letter)
            .map(|(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries
            .iter()
            .map(|(letter, count)| (letter.as_str(), *count))
    }
}

impl Serialize for GradeCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (letter, count) in &self.entries {
            map.serialize_entry(letter, count)?;
        }
        map.end()
    }
}
