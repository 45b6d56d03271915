use super::error::WeightTableError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Allowed drift when checking that weights add up to 100.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

const fn default_out_of() -> f64 {
    100.0
}

/// One graded component and its share of the final percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    /// Percentage of the final mark, e.g. `30.0` for 30%.
    pub weight: f64,
    /// Maximum raw mark for the component.
    #[serde(default = "default_out_of")]
    pub out_of: f64,
}

impl Component {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            out_of: default_out_of(),
        }
    }

    pub fn with_out_of(mut self, out_of: f64) -> Self {
        self.out_of = out_of;
        self
    }

    /// Contribution of `mark` to the final percentage.
    pub(crate) fn scale(&self, mark: f64) -> f64 {
        mark * self.weight / self.out_of
    }
}

/// Validated, ordered list of components whose weights total 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeightTable {
    pub(crate) components: Vec<Component>,
}

impl WeightTable {
    pub fn new(components: Vec<Component>) -> Result<Self, WeightTableError> {
        if components.is_empty() {
            return Err(WeightTableError::Empty);
        }

        let mut seen = HashSet::new();
        for (position, component) in components.iter().enumerate() {
            let name = component.name.trim();
            if name.is_empty() {
                return Err(WeightTableError::BlankName(position));
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(WeightTableError::DuplicateComponent(name.to_string()));
            }
            if !component.weight.is_finite() || component.weight < 0.0 {
                return Err(WeightTableError::InvalidWeight {
                    name: name.to_string(),
                    weight: component.weight,
                });
            }
            if !component.out_of.is_finite() || component.out_of <= 0.0 {
                return Err(WeightTableError::InvalidOutOf {
                    name: name.to_string(),
                    out_of: component.out_of,
                });
            }
        }

        let total: f64 = components.iter().map(|component| component.weight).sum();
        if (total - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightTableError::WeightSum(total));
        }

        Ok(Self { components })
    }

    /// Convenience constructor for `(name, weight)` pairs marked out of 100.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, WeightTableError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, weight)| Component::new(name, weight))
                .collect(),
        )
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<'de> Deserialize<'de> for WeightTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let components = Vec::<Component>::deserialize(deserializer)?;
        WeightTable::new(components).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_weights_summing_to_one_hundred() {
        let table = WeightTable::from_pairs([
            ("labs", 30.0),
            ("mid", 15.0),
            ("assign", 30.0),
            ("end", 25.0),
        ])
        .expect("valid table");
        assert_eq!(table.len(), 4);
        assert_eq!(table.components()[1].name, "mid");
        assert_eq!(table.components()[1].out_of, 100.0);
    }

    #[test]
    fn rejects_empty_table() {
        assert_eq!(WeightTable::new(Vec::new()), Err(WeightTableError::Empty));
    }

    #[test]
    fn rejects_weights_not_summing_to_one_hundred() {
        let error =
            WeightTable::from_pairs([("labs", 30.0), ("exam", 60.0)]).expect_err("sum is 90");
        assert_eq!(error, WeightTableError::WeightSum(90.0));
    }

    #[test]
    fn rejects_duplicate_and_blank_names() {
        let error =
            WeightTable::from_pairs([("Labs", 50.0), ("labs", 50.0)]).expect_err("duplicate");
        assert_eq!(
            error,
            WeightTableError::DuplicateComponent("labs".to_string())
        );

        let error = WeightTable::from_pairs([("labs", 50.0), ("  ", 50.0)]).expect_err("blank");
        assert_eq!(error, WeightTableError::BlankName(1));
    }

    #[test]
    fn rejects_negative_weight_and_zero_out_of() {
        let error = WeightTable::from_pairs([("labs", 110.0), ("bonus", -10.0)])
            .expect_err("negative");
        assert!(matches!(error, WeightTableError::InvalidWeight { .. }));

        let error = WeightTable::new(vec![Component::new("labs", 100.0).with_out_of(0.0)])
            .expect_err("zero out_of");
        assert!(matches!(error, WeightTableError::InvalidOutOf { .. }));
    }

    #[test]
    fn deserializing_validates_the_table() {
        let table: WeightTable = serde_json::from_str(
            r#"[{"name":"quiz","weight":40,"out_of":20},{"name":"final","weight":60}]"#,
        )
        .expect("valid json table");
        assert_eq!(table.components()[0].out_of, 20.0);
        assert_eq!(table.components()[1].out_of, 100.0);

        let error = serde_json::from_str::<WeightTable>(r#"[{"name":"quiz","weight":40}]"#)
            .expect_err("sum check applies");
        assert!(error.to_string().contains("sum to 40"));
    }
}
