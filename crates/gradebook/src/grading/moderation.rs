//! Gap-based relocation of grade cutoffs.
//!
//! Each cutoff looks at the percentages within [`MODERATION_RADIUS`] points
//! of itself and moves to the midpoint of the widest gap between neighbouring
//! scores in that window. Cutoffs are moderated independently against the
//! same, unmodified score set.

use super::domain::round2;
use super::policy::CutoffPolicy;
use serde::Serialize;
use tracing::debug;

/// Half-width of the window searched around each cutoff, in percentage points.
pub const MODERATION_RADIUS: f64 = 2.0;

/// Absorbs representation error on window edges; scores carry two decimals.
const WINDOW_EPSILON: f64 = 1e-9;

/// How a single cutoff arrived at its final value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ModerationRule {
    /// Moderation was switched off for the batch.
    Disabled,
    /// No score fell inside the window.
    EmptyCluster,
    /// Exactly one distinct score fell inside the window.
    SoleMember,
    /// The cutoff moved to the midpoint of the widest gap.
    LargestGap { upper: f64, lower: f64, gap: f64 },
}

impl ModerationRule {
    pub fn label(&self) -> &'static str {
        match self {
            ModerationRule::Disabled => "disabled",
            ModerationRule::EmptyCluster => "unchanged (no nearby scores)",
            ModerationRule::SoleMember => "moved to sole nearby score",
            ModerationRule::LargestGap { .. } => "moved to widest gap",
        }
    }
}

/// Audit record for one band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandModeration {
    pub letter: String,
    pub original_cutoff: f64,
    pub final_cutoff: f64,
    /// Distinct scores inside the window, highest first.
    pub cluster: Vec<f64>,
    #[serde(flatten)]
    pub rule: ModerationRule,
}

impl BandModeration {
    pub fn moved(&self) -> bool {
        self.final_cutoff != self.original_cutoff
    }
}

/// A moderated policy together with the per-band audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct Moderation {
    pub policy: CutoffPolicy,
    pub bands: Vec<BandModeration>,
}

impl Moderation {
    /// Keeps `policy` as-is and records every band as [`ModerationRule::Disabled`].
    pub fn disabled(policy: &CutoffPolicy) -> Self {
        let bands = policy
            .bands()
            .iter()
            .map(|band| BandModeration {
                letter: band.letter.clone(),
                original_cutoff: band.cutoff,
                final_cutoff: band.cutoff,
                cluster: Vec::new(),
                rule: ModerationRule::Disabled,
            })
            .collect();
        Self {
            policy: policy.clone(),
            bands,
        }
    }
}

/// Moderates every cutoff of `policy` against `percentages`.
///
/// Never fails; an empty score set leaves every cutoff where it was.
pub fn moderate(policy: &CutoffPolicy, percentages: &[f64]) -> Moderation {
    let bands: Vec<BandModeration> = policy
        .bands()
        .iter()
        .map(|band| {
            let cluster = cluster_around(band.cutoff, percentages);
            let (final_cutoff, rule) = relocate(band.cutoff, &cluster);
            if final_cutoff != band.cutoff {
                debug!(
                    letter = %band.letter,
                    from = band.cutoff,
                    to = final_cutoff,
                    cluster = cluster.len(),
                    "cutoff relocated"
                );
            }
            BandModeration {
                letter: band.letter.clone(),
                original_cutoff: band.cutoff,
                final_cutoff,
                cluster,
                rule,
            }
        })
        .collect();

    let cutoffs = bands.iter().map(|band| band.final_cutoff).collect();
    let policy = policy.with_cutoffs(cutoffs);
    Moderation { policy, bands }
}

/// Distinct scores within the window around `cutoff`, sorted descending.
fn cluster_around(cutoff: f64, percentages: &[f64]) -> Vec<f64> {
    let mut cluster: Vec<f64> = percentages
        .iter()
        .copied()
        .filter(|score| (score - cutoff).abs() <= MODERATION_RADIUS + WINDOW_EPSILON)
        .collect();
    cluster.sort_by(|a, b| b.total_cmp(a));
    cluster.dedup();
    cluster
}

fn relocate(cutoff: f64, cluster: &[f64]) -> (f64, ModerationRule) {
    match cluster {
        [] => (cutoff, ModerationRule::EmptyCluster),
        [sole] => (*sole, ModerationRule::SoleMember),
        _ => {
            let (index, gap) = widest_gap(cluster);
            let upper = cluster[index - 1];
            let lower = cluster[index];
            let midpoint = round2((upper + lower) / 2.0);
            (midpoint, ModerationRule::LargestGap { upper, lower, gap })
        }
    }
}

/// Index `k` of the widest gap `t[k-1] - t[k]`; the first one wins a tie.
fn widest_gap(sorted_desc: &[f64]) -> (usize, f64) {
    let mut best = (1, sorted_desc[0] - sorted_desc[1]);
    for k in 2..sorted_desc.len() {
        let gap = sorted_desc[k - 1] - sorted_desc[k];
        if gap > best.1 {
            best = (k, gap);
        }
    }
    best
}
