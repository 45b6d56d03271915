use super::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_FAILING_LETTER: &str = "F";

fn default_failing_letter() -> String {
    DEFAULT_FAILING_LETTER.to_string()
}

/// A passing grade and the percentage a student must exceed to earn it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub letter: String,
    pub cutoff: f64,
}

impl GradeBand {
    pub fn new(letter: impl Into<String>, cutoff: f64) -> Self {
        Self {
            letter: letter.into(),
            cutoff,
        }
    }
}

/// Ordered passing bands, highest first, plus the grade given below them all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CutoffPolicy {
    pub(crate) bands: Vec<GradeBand>,
    pub(crate) failing_letter: String,
}

impl CutoffPolicy {
    pub fn new(
        bands: Vec<GradeBand>,
        failing_letter: impl Into<String>,
    ) -> Result<Self, PolicyError> {
        let failing_letter = failing_letter.into();
        validate(&bands, &failing_letter)?;
        Ok(Self {
            bands,
            failing_letter,
        })
    }

    /// Builds a policy from `(letter, cutoff)` pairs with the default failing letter.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(letter, cutoff)| GradeBand::new(letter, cutoff))
                .collect(),
            DEFAULT_FAILING_LETTER,
        )
    }

    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }

    pub fn failing_letter(&self) -> &str {
        &self.failing_letter
    }

    pub fn cutoffs(&self) -> impl Iterator<Item = f64> + '_ {
        self.bands.iter().map(|band| band.cutoff)
    }

    /// Every grade this policy can produce, best first, failing letter last.
    pub fn letters(&self) -> impl Iterator<Item = &str> + '_ {
        self.bands
            .iter()
            .map(|band| band.letter.as_str())
            .chain(std::iter::once(self.failing_letter.as_str()))
    }

    /// Whether cutoffs are still strictly descending.
    pub fn is_ordered(&self) -> bool {
        self.bands
            .windows(2)
            .all(|pair| pair[0].cutoff > pair[1].cutoff)
    }

    /// Same letters with replacement cutoffs, one per band.
    ///
    /// Ordering is not re-validated: moderated cutoffs are only guaranteed to
    /// stay inside their own windows.
    pub(crate) fn with_cutoffs(&self, cutoffs: Vec<f64>) -> Self {
        debug_assert_eq!(cutoffs.len(), self.bands.len());
        let bands = self
            .bands
            .iter()
            .zip(cutoffs)
            .map(|(band, cutoff)| GradeBand::new(band.letter.clone(), cutoff))
            .collect();
        Self {
            bands,
            failing_letter: self.failing_letter.clone(),
        }
    }
}

fn validate(bands: &[GradeBand], failing_letter: &str) -> Result<(), PolicyError> {
    if bands.is_empty() {
        return Err(PolicyError::Empty);
    }

    let mut seen = HashSet::new();
    let letters = bands
        .iter()
        .map(|band| band.letter.as_str())
        .chain(std::iter::once(failing_letter));
    for (position, letter) in letters.enumerate() {
        if letter.trim().is_empty() {
            return Err(PolicyError::BlankLetter(position));
        }
        if !seen.insert(letter) {
            return Err(PolicyError::DuplicateLetter(letter.to_string()));
        }
    }

    if let Some(band) = bands.iter().find(|band| !band.cutoff.is_finite()) {
        return Err(PolicyError::NonFiniteCutoff {
            letter: band.letter.clone(),
        });
    }

    for pair in bands.windows(2) {
        if pair[1].cutoff >= pair[0].cutoff {
            return Err(PolicyError::NotDescending {
                upper: pair[0].letter.clone(),
                upper_cutoff: pair[0].cutoff,
                lower: pair[1].letter.clone(),
                lower_cutoff: pair[1].cutoff,
            });
        }
    }

    Ok(())
}

#[derive(Deserialize)]
struct RawPolicy {
    bands: Vec<GradeBand>,
    #[serde(default = "default_failing_letter")]
    failing_letter: String,
}

impl<'de> Deserialize<'de> for CutoffPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawPolicy::deserialize(deserializer)?;
        CutoffPolicy::new(raw.bands, raw.failing_letter).map_err(serde::de::Error::custom)
    }
}
