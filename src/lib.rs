//! Incremental primal-dual solver for dense linear assignment problems.
//!
//! Computes a minimum-cost perfect matching between `n` rows and `n`
//! columns with integer costs, and re-optimizes cheaply after individual
//! pairings are forbidden or re-priced instead of restarting from
//! scratch. Branch-and-bound
//! searches over routing and scheduling problems call an assignment
//! relaxation thousands of times with lightly mutated cost matrices;
//! repairing the previous optimum is much cheaper than recomputing it.
//!
//! The algorithm is the primal-dual scheme of Carpaneto, Martello and
//! Toth, "Algorithms and codes for the assignment problem" (Annals of
//! Operations Research 13, 1988). A greedy two-phase initialization runs
//! once, lazily; every subsequent [`AssignmentSolver::solve`] grows a
//! shortest augmenting path for each unassigned row, shifting the dual
//! potentials so the zero reduced-cost frontier keeps expanding.
//!
//! # Example
//!
//! ```
//! use incremental_assignment::{AssignmentSolver, PrimalDualSolver};
//!
//! # fn main() -> anyhow::Result<()> {
//! let costs = [
//!     [25, 40, 9, 15],
//!     [12, 33, 22, 31],
//!     [18, 37, 18, 30],
//!     [32, 11, 12, 26],
//! ];
//! let mut solver: PrimalDualSolver<i32> = PrimalDualSolver::new(4);
//! for (row, row_costs) in costs.iter().enumerate() {
//!     for (col, &cost) in row_costs.iter().enumerate() {
//!         solver.set_cost(row, col, cost)?;
//!     }
//! }
//! solver.solve()?;
//! assert_eq!(solver.objective()?, 56);
//! assert!(solver.is_assigned(0, 3)?);
//!
//! // Forbid the arc the optimum used for row 0 and repair: only row 0 is
//! // re-assigned, the duals and the rest of the matching are reused.
//! solver.remove_arc_with_cost(0, 3, 1000)?;
//! solver.solve()?;
//! assert_eq!(solver.objective()?, 62);
//! assert!(!solver.is_assigned(0, 3)?);
//! # Ok(())
//! # }
//! ```

pub mod primal_dual;
pub mod solution;
pub mod solver;

pub use crate::primal_dual::PrimalDualSolver;
pub use crate::solution::{Assignment, IntCost};
pub use crate::solver::AssignmentSolver;
