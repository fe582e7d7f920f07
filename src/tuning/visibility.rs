//! Visibility subgroups

/// Trials matching a visibility code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// No trial matched
    Empty,
    /// Boolean mask over all trials plus the matching indices
    Trials { mask: Vec<bool>, indices: Vec<usize> },
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Matching trial indices (none for `Empty`).
    pub fn indices(&self) -> &[usize] {
        match self {
            Selection::Empty => &[],
            Selection::Trials { indices, .. } => indices,
        }
    }
}

/// Select trials whose visibility code equals `target_code`.
///
/// Missing codes (NaN) never match.
pub fn subdivide_by_visibility(codes: &[f64], target_code: f64) -> Selection {
    let mask: Vec<bool> = codes.iter().map(|&c| c == target_code).collect();
    let indices: Vec<usize> = mask.iter().enumerate().filter(|(_, m)| **m).map(|(i, _)| i).collect();
    if indices.is_empty() {
        Selection::Empty
    } else {
        Selection::Trials { mask, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_matching_codes() {
        let sel = subdivide_by_visibility(&[1.0, 2.0, 2.0, f64::NAN], 2.0);
        assert_eq!(sel.indices(), &[1, 2]);
        match sel {
            Selection::Trials { mask, .. } => assert_eq!(mask, vec![false, true, true, false]),
            Selection::Empty => panic!("expected trials"),
        }
    }

    #[test]
    fn test_empty_selection_is_explicit() {
        let sel = subdivide_by_visibility(&[1.0, 1.0], 4.0);
        assert!(sel.is_empty());
        assert!(sel.indices().is_empty());
    }
}
