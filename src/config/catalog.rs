//! Built-in analyses and contrasts of the orientation/visibility experiment.

use super::analysis::{AnalysisSpec, DecodingType, DEFAULT_ANGLE_BINS};
use super::contrast::{Contrast, ValueSet};
use crate::data::TOY_ANGLES;
use crate::error::{Error, Result};

const CATEGORIZE: DecodingType = DecodingType::Categorize;
const REGRESS: DecodingType = DecodingType::Regress;
const CIRC_REGRESS: DecodingType = DecodingType::CircularRegress { n_angle_bins: DEFAULT_ANGLE_BINS };

/// (name, decoding type, condition, query)
type Entry = (&'static str, DecodingType, Option<&'static str>, Option<&'static str>);

const ANALYSES: &[Entry] = &[
    ("target_present", CATEGORIZE, None, None),
    ("target_contrast", REGRESS, None, None),
    ("target_contrast_pst", REGRESS, Some("target_contrast"), Some("target_present == True")),
    ("target_spatialFreq", CATEGORIZE, None, None),
    ("target_circAngle", CIRC_REGRESS, None, None),
    ("probe_circAngle", CIRC_REGRESS, None, None),
    ("probe_tilt", CATEGORIZE, None, None),
    ("discrim_button", CATEGORIZE, None, None),
    ("discrim_correct", CATEGORIZE, None, None),
    ("detect_button", REGRESS, None, None),
    ("detect_button_pst", REGRESS, Some("detect_button"), Some("target_present == True")),
    ("detect_seen", CATEGORIZE, None, None),
    ("detect_seen_pst", CATEGORIZE, Some("detect_seen"), Some("target_present == True")),
];

fn build(&(name, decoding, condition, query): &Entry) -> AnalysisSpec {
    let mut spec = AnalysisSpec::new(name, decoding);
    if let Some(c) = condition {
        spec = spec.with_condition(c);
    }
    if let Some(q) = query {
        spec = spec.with_query(q);
    }
    spec
}

/// Every built-in analysis, in declaration order.
pub fn default_analyses() -> Vec<AnalysisSpec> {
    ANALYSES.iter().map(build).collect()
}

/// Built-in analysis by name.
pub fn find_analysis(name: &str) -> Result<AnalysisSpec> {
    ANALYSES
        .iter()
        .find(|(n, ..)| *n == name)
        .map(build)
        .ok_or_else(|| Error::config(name, "not a built-in analysis"))
}

/// Orientation labels shifted onto bin centres, encoded as cos or sin of the doubled angle.
fn doubled_components(f: fn(f64) -> f64) -> Vec<f64> {
    TOY_ANGLES.iter().map(|a| f((2.0 * (a + 7.5)).to_radians())).collect()
}

/// Built-in classification contrasts.
pub fn classification_contrasts() -> Vec<Contrast> {
    let absent = ValueSet::new("present", [0.0]);
    vec![
        Contrast {
            name: "targetAngle".into(),
            include: ValueSet::new("orientation_target", TOY_ANGLES),
            exclude: vec![absent.clone()],
        },
        Contrast {
            name: "probeAngle".into(),
            include: ValueSet::new("orientation_probe", TOY_ANGLES),
            exclude: vec![],
        },
        Contrast {
            name: "4visibilitiesPresent".into(),
            include: ValueSet::new("response_visibilityCode", [1.0, 2.0, 3.0, 4.0]),
            exclude: vec![absent.clone()],
        },
        Contrast {
            name: "visibilityPresent".into(),
            include: ValueSet::new("seen_unseen", [0.0, 1.0]),
            exclude: vec![absent.clone()],
        },
        Contrast {
            name: "presentAbsent".into(),
            include: ValueSet::new("present", [0.0, 1.0]),
            exclude: vec![],
        },
        Contrast {
            name: "accuracy".into(),
            include: ValueSet::new("correct", [0.0, 1.0]),
            exclude: vec![ValueSet::new("correct", [f64::NAN])],
        },
        Contrast {
            name: "lambda".into(),
            include: ValueSet::new("lambda", [1.0, 2.0]),
            exclude: vec![absent.clone()],
        },
        Contrast {
            name: "tilt".into(),
            include: ValueSet::new("tilt", [-1.0, 1.0]),
            exclude: vec![absent],
        },
        Contrast {
            name: "responseButton".into(),
            include: ValueSet::new("response_tilt", [-1.0, 1.0]),
            exclude: vec![ValueSet::new("response_tilt", [0.0])],
        },
    ]
}

/// Built-in regression contrasts.
pub fn regression_contrasts() -> Vec<Contrast> {
    let absent = ValueSet::new("present", [0.0]);
    vec![
        Contrast {
            name: "targetAngle_cos".into(),
            include: ValueSet::new("orientation_target_cos", doubled_components(f64::cos)),
            exclude: vec![absent.clone()],
        },
        Contrast {
            name: "targetAngle_sin".into(),
            include: ValueSet::new("orientation_target_sin", doubled_components(f64::sin)),
            exclude: vec![absent.clone()],
        },
        Contrast {
            name: "probeAngle_cos".into(),
            include: ValueSet::new("orientation_probe_cos", doubled_components(f64::cos)),
            exclude: vec![absent.clone()],
        },
        Contrast {
            name: "probeAngle_sin".into(),
            include: ValueSet::new("orientation_probe_sin", doubled_components(f64::sin)),
            exclude: vec![absent.clone()],
        },
        Contrast {
            name: "4visibilitiesPresent".into(),
            include: ValueSet::new("response_visibilityCode", [1.0, 2.0, 3.0, 4.0]),
            exclude: vec![absent],
        },
        Contrast {
            name: "targetContrast".into(),
            include: ValueSet::new("contrast", [0.0, 0.5, 0.75, 1.0]),
            exclude: vec![],
        },
    ]
}

/// Built-in contrast by name, classification contrasts first.
pub fn find_contrast(name: &str) -> Option<Contrast> {
    classification_contrasts()
        .into_iter()
        .chain(regression_contrasts())
        .find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::subscore::subscores;

    #[test]
    fn test_catalogue_is_complete() {
        let all = default_analyses();
        assert_eq!(all.len(), 13);
        for a in &all {
            a.validate().unwrap();
        }
        let count = |d: DecodingType| all.iter().filter(|a| a.decoding() == d).count();
        assert_eq!(count(DecodingType::Categorize), 7);
        assert_eq!(count(DecodingType::Regress), 4);
        assert_eq!(count(DecodingType::circular()), 2);
    }

    #[test]
    fn test_catalogue_round_trips_through_names() {
        for a in default_analyses() {
            assert_eq!(find_analysis(a.name()).unwrap(), a);
        }
    }

    #[test]
    fn test_subscores_triple_the_catalogue() {
        let all = default_analyses();
        assert_eq!(subscores(&all).len(), 3 * all.len());
    }

    #[test]
    fn test_find_analysis() {
        let a = find_analysis("target_circAngle").unwrap();
        assert_eq!(a.decoding(), DecodingType::circular());
        let p = find_analysis("detect_seen_pst").unwrap();
        assert_eq!(p.condition(), "detect_seen");
        assert_eq!(p.query(), Some("target_present == True"));
        assert!(find_analysis("nope").is_err());
    }

    #[test]
    fn test_regression_contrast_values_are_unit_components() {
        let c = find_contrast("targetAngle_cos").unwrap();
        let s = find_contrast("targetAngle_sin").unwrap();
        for (x, y) in c.include.values.iter().zip(&s.include.values) {
            assert!((x * x + y * y - 1.0).abs() < 1e-12);
        }
    }
}
