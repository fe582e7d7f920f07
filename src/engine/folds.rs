//! Cross-validation fold planning

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Shuffled K-Fold splitter
#[derive(Clone, Debug)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl KFold {
    /// Create a new KFold splitter
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits, shuffle: true, seed: 42 }
    }

    /// Set random seed for shuffling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Disable shuffling
    pub fn without_shuffle(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Assign each of `n_samples` trials to a fold
    pub fn plan(&self, n_samples: usize) -> Result<FoldPlan> {
        check_splits(self.n_splits, n_samples)?;
        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            indices.shuffle(&mut StdRng::seed_from_u64(self.seed));
        }

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;
        let mut assignment = vec![0; n_samples];
        let mut start = 0;
        for fold in 0..self.n_splits {
            let end = start + fold_size + usize::from(fold < remainder);
            for &i in &indices[start..end] {
                assignment[i] = fold;
            }
            start = end;
        }
        Ok(FoldPlan { n_folds: self.n_splits, assignment })
    }
}

/// K-Fold splitter preserving class proportions in every fold
#[derive(Clone, Debug)]
pub struct StratifiedKFold {
    n_splits: usize,
    seed: u64,
}

impl StratifiedKFold {
    /// Create a new stratified splitter
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits, seed: 42 }
    }

    /// Set random seed for shuffling within each class
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Assign trials to folds; each class is shuffled then dealt round-robin,
    /// continuing where the previous class stopped.
    pub fn plan(&self, labels: &[usize]) -> Result<FoldPlan> {
        check_splits(self.n_splits, labels.len())?;
        let n_classes = labels.iter().max().map_or(0, |m| m + 1);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut assignment = vec![0; labels.len()];
        let mut next = 0;
        for class in 0..n_classes {
            let mut members: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == class).collect();
            members.shuffle(&mut rng);
            for i in members {
                assignment[i] = next % self.n_splits;
                next += 1;
            }
        }
        Ok(FoldPlan { n_folds: self.n_splits, assignment })
    }
}

fn check_splits(n_splits: usize, n_samples: usize) -> Result<()> {
    if n_splits < 2 {
        return Err(Error::config("cv", format!("need at least 2 folds, got {n_splits}")));
    }
    if n_splits > n_samples {
        return Err(Error::config(
            "cv",
            format!("cannot split {n_samples} trials into {n_splits} folds"),
        ));
    }
    Ok(())
}

/// Fold membership of every trial, planned once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoldPlan {
    n_folds: usize,
    assignment: Vec<usize>,
}

impl FoldPlan {
    /// Number of folds
    pub fn n_folds(&self) -> usize {
        self.n_folds
    }

    /// Number of trials
    pub fn n_trials(&self) -> usize {
        self.assignment.len()
    }

    /// Fold of each trial
    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Held-out trials of `fold`, ascending
    pub fn test_indices(&self, fold: usize) -> Vec<usize> {
        (0..self.assignment.len()).filter(|&i| self.assignment[i] == fold).collect()
    }

    /// Training trials of `fold`, ascending
    pub fn train_indices(&self, fold: usize) -> Vec<usize> {
        (0..self.assignment.len()).filter(|&i| self.assignment[i] != fold).collect()
    }

    /// `(train, test)` pairs for every fold
    pub fn splits(&self) -> Vec<(Vec<usize>, Vec<usize>)> {
        (0..self.n_folds).map(|f| (self.train_indices(f), self.test_indices(f))).collect()
    }
}
