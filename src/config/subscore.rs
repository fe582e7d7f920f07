//! Visibility subscores
//!
//! Each base analysis is split into a seen and an unseen variant by ANDing a
//! visibility predicate onto its trial filter. Derived specs are built from
//! the immutable base plus a [`SubscoreOverride`].

use serde::Serialize;

use super::analysis::AnalysisSpec;

/// Analyses that are themselves about visibility and are never split.
pub const EXCLUDED_FROM_SUBSCORES: &[&str] = &["m_visibilities", "m_seen"];

/// Name suffix and extra filter for a derived analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscoreOverride {
    /// Appended to the base name
    pub suffix: &'static str,
    /// ANDed onto the base query
    pub query: &'static str,
}

/// Trials reported as seen.
pub const SEEN: SubscoreOverride = SubscoreOverride { suffix: "-seen", query: "detect_seen == True" };

/// Trials reported as unseen.
pub const UNSEEN: SubscoreOverride =
    SubscoreOverride { suffix: "-unseen", query: "detect_seen == False" };

/// Build one derived analysis.
pub fn derive(base: &AnalysisSpec, over: &SubscoreOverride) -> AnalysisSpec {
    let query = match base.query() {
        Some(q) => format!("({q}) and {}", over.query),
        None => over.query.to_string(),
    };
    base.derived(format!("{}{}", base.name(), over.suffix), Some(query))
}

fn is_excluded(spec: &AnalysisSpec) -> bool {
    EXCLUDED_FROM_SUBSCORES.contains(&spec.name())
}

/// Base analyses followed by their seen and unseen variants.
///
/// Excluded names contribute only themselves.
pub fn subscores(analyses: &[AnalysisSpec]) -> Vec<AnalysisSpec> {
    let mut out = Vec::with_capacity(analyses.len() * 3);
    for base in analyses {
        out.push(base.clone());
        if !is_excluded(base) {
            out.push(derive(base, &SEEN));
            out.push(derive(base, &UNSEEN));
        }
    }
    out
}

/// Seen-minus-unseen comparison of one analysis. Chance is 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscoreDifference {
    /// Base analysis name
    pub name: String,
    /// Minuend subscore
    pub contrast1: String,
    /// Subtrahend subscore
    pub contrast2: String,
    /// Expected difference under the null
    pub chance: f64,
}

/// Second-order contrasts, one per non-excluded analysis.
pub fn second_order(analyses: &[AnalysisSpec]) -> Vec<SubscoreDifference> {
    analyses
        .iter()
        .filter(|a| !is_excluded(a))
        .map(|a| SubscoreDifference {
            name: a.name().to_string(),
            contrast1: format!("{}{}", a.name(), SEEN.suffix),
            contrast2: format!("{}{}", a.name(), UNSEEN.suffix),
            chance: 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::analysis::DecodingType;

    #[test]
    fn test_derive_ands_base_query() {
        let base = AnalysisSpec::new("target_contrast_pst", DecodingType::Regress)
            .with_condition("target_contrast")
            .with_query("target_present == True");
        let seen = derive(&base, &SEEN);
        assert_eq!(seen.name(), "target_contrast_pst-seen");
        assert_eq!(seen.query(), Some("(target_present == True) and detect_seen == True"));
        assert_eq!(seen.condition(), "target_contrast");
        assert_eq!(seen.contrast(), "target_contrast_pst");
        assert_eq!(seen.chance(), base.chance());
        // base is untouched
        assert_eq!(base.query(), Some("target_present == True"));
    }

    #[test]
    fn test_derive_without_base_query() {
        let base = AnalysisSpec::new("probe_tilt", DecodingType::Categorize);
        let unseen = derive(&base, &UNSEEN);
        assert_eq!(unseen.name(), "probe_tilt-unseen");
        assert_eq!(unseen.query(), Some("detect_seen == False"));
    }

    #[test]
    fn test_excluded_names_are_not_split() {
        let analyses = vec![
            AnalysisSpec::new("m_seen", DecodingType::Categorize),
            AnalysisSpec::new("a", DecodingType::Categorize),
        ];
        let subs = subscores(&analyses);
        let names: Vec<&str> = subs.iter().map(AnalysisSpec::name).collect();
        assert_eq!(names, vec!["m_seen", "a", "a-seen", "a-unseen"]);
        assert_eq!(second_order(&analyses).len(), 1);
    }

    #[test]
    fn test_second_order_pairs() {
        let d = &second_order(&[AnalysisSpec::new("x", DecodingType::Regress)])[0];
        assert_eq!(d.contrast1, "x-seen");
        assert_eq!(d.contrast2, "x-unseen");
        assert_eq!(d.chance, 0.0);
    }
}
