//! Heuristic selection by name.
//!
//! [`Heuristic`] names every improver in the crate so a driver can pick one
//! from a config file or command line and get a boxed [`TourImprover`]
//! bound to its distance table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constructive::{AdjacentSwap, NearestNeighbor};
use crate::distance::DistanceTable;
use crate::error::TspError;
use crate::local_search::{AffinityTwoOpt, SearchStats, Termination, ThreeOpt, TourImprover, TwoOpt};
use crate::models::Tour;

/// Available tour heuristics.
///
/// # Examples
///
/// ```
/// use u_tsp::heuristic::Heuristic;
/// use u_tsp::models::{Point, Tour};
/// use u_tsp::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_points(&[
///     Point::new(0.0, 0.0),
///     Point::new(1.0, 0.0),
///     Point::new(0.0, 1.0),
///     Point::new(1.0, 1.0),
/// ]);
///
/// let heuristic: Heuristic = "two-opt".parse().unwrap();
/// let mut tour = Tour::identity(4);
/// heuristic.build(&dm, 0).apply(&mut tour).unwrap();
/// assert!((tour.distance(&dm) - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// Leave the tour as it is.
    #[default]
    None,
    /// Nearest-neighbor sweep.
    Greedy,
    /// Adjacent-swap sweep.
    AdjacentSwap,
    /// Exhaustive 2-opt.
    TwoOpt,
    /// Segment-swap 3-opt.
    ThreeOpt,
    /// Affinity-guided 2-opt.
    AffinityTwoOpt,
}

impl Heuristic {
    /// Every heuristic, in declaration order.
    pub const ALL: [Heuristic; 6] = [
        Heuristic::None,
        Heuristic::Greedy,
        Heuristic::AdjacentSwap,
        Heuristic::TwoOpt,
        Heuristic::ThreeOpt,
        Heuristic::AffinityTwoOpt,
    ];

    /// Kebab-case name, identical to the improver's [`TourImprover::name`].
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::None => "none",
            Heuristic::Greedy => "greedy",
            Heuristic::AdjacentSwap => "adjacent-swap",
            Heuristic::TwoOpt => "two-opt",
            Heuristic::ThreeOpt => "three-opt",
            Heuristic::AffinityTwoOpt => "affinity-two-opt",
        }
    }

    /// Builds the improver with default configuration.
    ///
    /// `seed` only matters for [`Heuristic::AffinityTwoOpt`].
    pub fn build<'a, D>(self, distances: &'a D, seed: u64) -> Box<dyn TourImprover + 'a>
    where
        D: DistanceTable + ?Sized,
    {
        match self {
            Heuristic::None => Box::new(Unchanged { distances }),
            Heuristic::Greedy => Box::new(NearestNeighbor::new(distances)),
            Heuristic::AdjacentSwap => Box::new(AdjacentSwap::new(distances)),
            Heuristic::TwoOpt => Box::new(TwoOpt::new(distances)),
            Heuristic::ThreeOpt => Box::new(ThreeOpt::new(distances)),
            Heuristic::AffinityTwoOpt => Box::new(AffinityTwoOpt::seeded(distances, seed)),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = TspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TspError::InvalidConfig(format!("unknown heuristic `{wanted}`")))
    }
}

/// Improver that only checks the tour.
struct Unchanged<'a, D: ?Sized> {
    distances: &'a D,
}

impl<D: DistanceTable + ?Sized> TourImprover for Unchanged<'_, D> {
    fn name(&self) -> &'static str {
        "none"
    }

    fn apply(&mut self, tour: &mut Tour) -> Result<SearchStats, TspError> {
        tour.validate_against(self.distances)?;
        Ok(SearchStats {
            passes: 0,
            moves: 0,
            termination: Termination::Converged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Point;

    fn square() -> DistanceMatrix {
        DistanceMatrix::from_points(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
        ])
    }

    #[test]
    fn test_parse_and_display() {
        for h in Heuristic::ALL {
            assert_eq!(h.to_string().parse::<Heuristic>(), Ok(h));
        }
        assert_eq!(" Three-Opt ".parse::<Heuristic>(), Ok(Heuristic::ThreeOpt));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "or-opt".parse::<Heuristic>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: unknown heuristic `or-opt`"
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Heuristic::AffinityTwoOpt).unwrap();
        assert_eq!(json, "\"affinity-two-opt\"");
        let back: Heuristic = serde_json::from_str("\"adjacent-swap\"").unwrap();
        assert_eq!(back, Heuristic::AdjacentSwap);
    }

    #[test]
    fn test_built_improver_names_match() {
        let dm = square();
        for h in Heuristic::ALL {
            assert_eq!(h.build(&dm, 7).name(), h.name());
        }
    }

    #[test]
    fn test_none_leaves_tour() {
        let dm = square();
        let mut tour = Tour::identity(4);
        let stats = Heuristic::None.build(&dm, 0).apply(&mut tour).unwrap();
        assert_eq!(tour, Tour::identity(4));
        assert!(!stats.modified());
    }

    #[test]
    fn test_none_still_validates() {
        let dm = square();
        let mut tour = Tour::new(vec![0, 1, 9]).unwrap();
        assert!(Heuristic::None.build(&dm, 0).apply(&mut tour).is_err());
    }

    #[test]
    fn test_build_through_trait_object() {
        let dm = square();
        let table: &dyn DistanceTable = &dm;
        let mut tour = Tour::identity(4);
        Heuristic::ThreeOpt.build(table, 0).apply(&mut tour).unwrap();
        assert_eq!(tour.len(), 4);
    }
}
