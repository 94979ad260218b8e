//! # Catalog Selector
//!
//! Shared minimum-excess search used by the flexural, shear and side-face
//! stages. Each stage lists its feasible catalog combinations as
//! [`Candidate`]s; the selector returns the adequate candidate with the least
//! provided area, or the largest candidate marked unsolved when nothing in
//! the catalog reaches the target.

use std::cmp::Ordering;

use crate::units::round_to;

/// A feasible reinforcement combination.
pub trait Candidate {
    /// Ordering among candidates with equal provided area; lower wins.
    type TieBreak: Ord;

    /// Provided area, already rounded to the reporting precision
    fn provided_area(&self) -> f64;

    fn tie_break(&self) -> Self::TieBreak;
}

/// Result of a catalog search.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<C> {
    pub candidate: C,
    /// `true` when the candidate provides at least the target area
    pub solved: bool,
}

/// Select the minimum-excess candidate providing at least `target`.
///
/// Returns `None` only when `candidates` is empty.
pub fn select_min_excess<C, I>(candidates: I, target: f64) -> Option<Choice<C>>
where
    C: Candidate,
    I: IntoIterator<Item = C>,
{
    let mut pool: Vec<C> = candidates.into_iter().collect();

    let adequate = pool
        .iter()
        .enumerate()
        .filter(|(_, c)| c.provided_area() >= target)
        .min_by(|(_, a), (_, b)| compare(*a, *b))
        .map(|(index, _)| index);

    let (index, solved) = match adequate {
        Some(index) => (index, true),
        None => {
            // Largest area; among equals the preferred tie-break.
            let index = pool
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| {
                    area_key(a.provided_area())
                        .cmp(&area_key(b.provided_area()))
                        .then_with(|| b.tie_break().cmp(&a.tie_break()))
                })
                .map(|(index, _)| index)?;
            (index, false)
        }
    };

    Some(Choice {
        candidate: pool.swap_remove(index),
        solved,
    })
}

fn compare<C: Candidate>(a: &C, b: &C) -> Ordering {
    area_key(a.provided_area())
        .cmp(&area_key(b.provided_area()))
        .then_with(|| a.tie_break().cmp(&b.tie_break()))
}

/// Areas compare at 0.001 resolution so float noise never decides a tie.
fn area_key(area: f64) -> i64 {
    (area * 1000.0).round() as i64
}

/// Area searched for: the demand, or the minimum-reinforcement floor when
/// the demand is below it.
pub fn search_target(demand: f64, floor: f64) -> f64 {
    demand.max(floor)
}

/// Utilization as a percentage, rounded to one decimal.
///
/// Zero when there is no demand (minimum reinforcement governs) or nothing
/// is provided.
pub fn utilization(demand: f64, provided: f64) -> f64 {
    if demand <= 0.0 || provided <= 0.0 {
        return 0.0;
    }
    round_to(demand / provided * 100.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Combo {
        area: f64,
        rank: u32,
    }

    impl Candidate for Combo {
        type TieBreak = u32;
        fn provided_area(&self) -> f64 {
            self.area
        }
        fn tie_break(&self) -> u32 {
            self.rank
        }
    }

    fn pool() -> Vec<Combo> {
        vec![
            Combo { area: 1473.0, rank: 1 },
            Combo { area: 942.0, rank: 2 },
            Combo { area: 942.0, rank: 1 },
            Combo { area: 2076.0, rank: 2 },
        ]
    }

    #[test]
    fn test_picks_minimum_excess() {
        let choice = select_min_excess(pool(), 1000.0).unwrap();
        assert_eq!(choice.candidate.area, 1473.0);
        assert!(choice.solved);
    }

    #[test]
    fn test_tie_broken_by_rank() {
        let choice = select_min_excess(pool(), 703.0).unwrap();
        assert_eq!(choice.candidate, Combo { area: 942.0, rank: 1 });
    }

    #[test]
    fn test_exact_match_is_adequate() {
        let choice = select_min_excess(pool(), 2076.0).unwrap();
        assert_eq!(choice.candidate.area, 2076.0);
        assert!(choice.solved);
    }

    #[test]
    fn test_unsolved_returns_largest() {
        let choice = select_min_excess(pool(), 5000.0).unwrap();
        assert_eq!(choice.candidate.area, 2076.0);
        assert!(!choice.solved);
    }

    #[test]
    fn test_empty_catalog() {
        assert!(select_min_excess(Vec::<Combo>::new(), 100.0).is_none());
    }

    #[test]
    fn test_utilization() {
        assert_eq!(utilization(1979.0, 2076.0), 95.3);
        assert_eq!(utilization(0.0, 1810.0), 0.0);
        assert_eq!(utilization(100.0, 0.0), 0.0);
        assert_eq!(utilization(6000.0, 4825.0), 124.4);
    }

    #[test]
    fn test_search_target_floor() {
        assert_eq!(search_target(0.0, 390.0), 390.0);
        assert_eq!(search_target(1979.0, 390.0), 1979.0);
    }
}
