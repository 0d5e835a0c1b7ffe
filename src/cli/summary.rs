//! Per-leg before/after report printed on stderr

use butterfly_guidance::RouteDocument;

/// Step and distance totals of one leg before and after reduction
#[derive(Debug, Clone, PartialEq)]
pub struct LegSummary {
    pub leg: usize,
    pub steps_before: usize,
    pub steps_after: usize,
    pub distance_before: f64,
    pub distance_after: f64,
}

impl LegSummary {
    pub fn removed(&self) -> usize {
        self.steps_before.saturating_sub(self.steps_after)
    }

    pub fn line(&self) -> String {
        format!(
            "leg {}: {} -> {} steps ({} removed), {:.1}m",
            self.leg,
            self.steps_before,
            self.steps_after,
            self.removed(),
            self.distance_after
        )
    }
}

/// Pair up the legs of both documents in order
pub fn summarize(before: &RouteDocument, after: &RouteDocument) -> Vec<LegSummary> {
    before
        .legs()
        .zip(after.legs())
        .map(|((leg, original), (_, reduced))| LegSummary {
            leg,
            steps_before: original.steps.len(),
            steps_after: reduced.steps.len(),
            distance_before: original.distance(),
            distance_after: reduced.distance(),
        })
        .collect()
}

pub fn print_summary(summaries: &[LegSummary]) {
    for summary in summaries {
        eprintln!("  {}", summary.line());
        if (summary.distance_before - summary.distance_after).abs() > 1e-6 {
            log::warn!(
                "leg {}: distance changed from {:.3}m to {:.3}m",
                summary.leg,
                summary.distance_before,
                summary.distance_after
            );
        }
    }

    let before: usize = summaries.iter().map(|s| s.steps_before).sum();
    let after: usize = summaries.iter().map(|s| s.steps_after).sum();
    eprintln!("✅ {} legs: {} -> {} steps", summaries.len(), before, after);
}
