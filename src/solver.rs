use crate::solution::IntCost;
use anyhow::Result;
use std::fmt::Write;

/// Contract shared by assignment solvers over a square integer cost matrix.
///
/// The mutating operations ([`solve`](AssignmentSolver::solve),
/// [`set_cost`](AssignmentSolver::set_cost),
/// [`remove_arc`](AssignmentSolver::remove_arc)) may be interleaved freely;
/// the read accessors are only valid once at least one solve has run and
/// must error before that rather than hand back stale zeros. Out-of-range
/// indices are caller errors and are rejected, never clamped.
pub trait AssignmentSolver<C: IntCost> {
    /// Number of rows (and columns) of the problem, fixed at construction.
    fn size(&self) -> usize;

    /// Compute an optimal assignment, or repair the current one.
    ///
    /// Rows left without a partner by [`remove_arc`](Self::remove_arc) are
    /// re-assigned without restarting the algorithm. Errors if some row can
    /// no longer reach any column, which indicates a structurally
    /// degenerate cost matrix or an internal invariant breach.
    fn solve(&mut self) -> Result<()>;

    /// Overwrite the cost of arc `(row, col)`.
    ///
    /// Valid at any time. An existing pairing on the arc is deliberately
    /// left in place; pair with [`remove_arc`](Self::remove_arc) to force a
    /// re-assignment of the affected row on the next solve.
    fn set_cost(&mut self, row: usize, col: usize, value: C) -> Result<()>;

    /// Drop the pairing `row → col` iff it is currently active.
    ///
    /// Removing an arc that is not part of the assignment is a no-op, so a
    /// caller can forbid a batch of arcs and only pay re-solve work for the
    /// rows that were actually disrupted.
    fn remove_arc(&mut self, row: usize, col: usize) -> Result<()>;

    /// Overwrite the arc cost, then drop the pairing if it is active.
    ///
    /// The cost overwrite applies even when the arc is not assigned; this
    /// is the usual way to forbid an arc outright with a penalty cost.
    fn remove_arc_with_cost(&mut self, row: usize, col: usize, value: C) -> Result<()> {
        self.set_cost(row, col, value)?;
        self.remove_arc(row, col)
    }

    /// Objective value `Σu + Σv` of the most recent solve.
    fn objective(&self) -> Result<C>;

    /// Whether `(row, col)` is part of the current assignment.
    fn is_assigned(&self, row: usize, col: usize) -> Result<bool>;

    /// `cost[row][col] - u[row] - v[col]`; nonnegative after a solve and
    /// zero on every assigned arc.
    fn reduced_cost(&self, row: usize, col: usize) -> Result<C>;

    /// Dual potential of `row`.
    fn row_dual(&self, row: usize) -> Result<C>;

    /// Dual potential of `col`.
    fn col_dual(&self, col: usize) -> Result<C>;

    /// Render the solver state as a diagnostic table: objective, both dual
    /// vectors, the reduced-cost grid and the assignment markers.
    fn write_diagnostics(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{:=<72}", "")?;
        writeln!(out, "z\t{:>5}", self.objective()?)?;

        write!(out, "\nu\t")?;
        for row in 0..self.size() {
            write!(out, "{:>5}", self.row_dual(row)?)?;
        }
        write!(out, "\nv\t")?;
        for col in 0..self.size() {
            write!(out, "{:>5}", self.col_dual(col)?)?;
        }
        writeln!(out)?;

        write!(out, "\nrc\t")?;
        for row in 0..self.size() {
            for col in 0..self.size() {
                write!(out, "{:>5}", self.reduced_cost(row, col)?)?;
            }
            write!(out, "\n\t")?;
        }

        write!(out, "\nx\t")?;
        for row in 0..self.size() {
            for col in 0..self.size() {
                let mark = if self.is_assigned(row, col)? { "1" } else { "-" };
                write!(out, "{:>5}", mark)?;
            }
            writeln!(out)?;
            if row + 1 < self.size() {
                write!(out, "\t")?;
            }
        }
        writeln!(out, "{:-<72}", "")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::AssignmentSolver;
    use crate::primal_dual::PrimalDualSolver;

    #[test]
    fn diagnostics_expose_solution_state() {
        let mut solver: PrimalDualSolver<i32> = PrimalDualSolver::new(2);
        solver.set_cost(0, 0, 3).unwrap();
        solver.set_cost(0, 1, 5).unwrap();
        solver.set_cost(1, 0, 9).unwrap();
        solver.set_cost(1, 1, 4).unwrap();
        solver.solve().unwrap();

        let mut rendered = String::new();
        solver.write_diagnostics(&mut rendered).unwrap();

        assert!(rendered.contains("z\t    7"));
        assert!(rendered.contains("u\t"));
        assert!(rendered.contains("v\t"));
        assert!(rendered.contains("rc\t"));
        // one assignment marker per row in the x grid
        let markers = rendered.split("\nx\t").nth(1).unwrap();
        assert_eq!(markers.matches('1').count(), 2);
    }

    #[test]
    fn diagnostics_before_solve_error_out() {
        let solver: PrimalDualSolver<i32> = PrimalDualSolver::new(2);
        let mut rendered = String::new();
        assert!(solver.write_diagnostics(&mut rendered).is_err());
    }
}
