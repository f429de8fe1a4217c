use crate::solution::{Assignment, IntCost};
use crate::solver::AssignmentSolver;
use anyhow::{bail, ensure, Result};
use tracing::{debug, trace};

/// Incremental primal-dual solver for the dense assignment problem.
///
/// Implements the primal-dual scheme of Carpaneto, Martello and Toth
/// (Annals of Operations Research 13, 1988). A two-phase greedy
/// initialization runs once, lazily, on the first [`solve`]; every later
/// [`solve`] only repairs the rows left unassigned by
/// [`remove_arc`], growing a shortest augmenting path from each and
/// shifting the dual potentials as it goes. This makes re-solving cheap
/// inside branch-and-bound loops that forbid a handful of arcs between
/// iterations.
///
/// Once a solution exists the duals stay feasible across
/// [`remove_arc_with_cost`] calls that only raise costs. Lowering a cost
/// under its reduced-cost floor leaves existing pairings untouched and
/// forfeits the optimality guarantee until the caller removes the affected
/// arcs and re-solves.
///
/// [`solve`]: AssignmentSolver::solve
/// [`remove_arc`]: AssignmentSolver::remove_arc
/// [`remove_arc_with_cost`]: AssignmentSolver::remove_arc_with_cost
#[derive(Debug, Clone)]
pub struct PrimalDualSolver<C: IntCost> {
    size: usize,
    /// Row-major `size × size` cost matrix.
    costs: Vec<C>,
    /// Row dual potentials.
    u: Vec<C>,
    /// Column dual potentials.
    v: Vec<C>,
    /// Objective of the most recent solve, `Σu + Σv`.
    z: C,
    matching: Assignment,
    /// Per-row resume point for the phase-2 forward scan; meaningless once
    /// initialization is over.
    scan_from: Vec<usize>,
    initialized: bool,
}

impl<C: IntCost> PrimalDualSolver<C> {
    /// A solver for a `size × size` problem with every cost zero.
    pub fn new(size: usize) -> PrimalDualSolver<C> {
        PrimalDualSolver {
            size,
            costs: vec![C::zero(); size * size],
            u: vec![C::zero(); size],
            v: vec![C::zero(); size],
            z: C::zero(),
            matching: Assignment::new(size),
            scan_from: vec![0; size],
            initialized: false,
        }
    }

    #[inline]
    fn cost(&self, row: usize, col: usize) -> C {
        self.costs[row * self.size + col]
    }

    #[inline]
    fn rc(&self, row: usize, col: usize) -> C {
        self.cost(row, col) - self.u[row] - self.v[col]
    }

    #[inline]
    fn check_pair(&self, row: usize, col: usize) -> Result<()> {
        ensure!(
            row < self.size && col < self.size,
            "arc ({}, {}) out of range for problem size {}",
            row,
            col,
            self.size
        );
        Ok(())
    }

    #[inline]
    fn check_solved(&self) -> Result<()> {
        ensure!(
            self.initialized,
            "no solution yet: call solve() before reading results"
        );
        Ok(())
    }

    fn initialize(&mut self) {
        self.init_column_minima();
        self.init_forward_scan();
        self.initialized = true;
    }

    /// Phase 1: set each column dual to its column minimum and greedily
    /// pair the minimizing row while it is still free.
    fn init_column_minima(&mut self) {
        for col in 0..self.size {
            let row = self.min_cost_row(col);
            self.v[col] = self.cost(row, col);
            if self.matching.column_of(row).is_none() {
                self.matching.link(row, col);
                self.u[row] = C::zero();
                self.scan_from[row] = col + 1;
            }
        }
    }

    /// Row of minimum cost in `col`; ties prefer a row that is still free.
    fn min_cost_row(&self, col: usize) -> usize {
        let mut best = 0;
        let mut best_cost = self.cost(0, col);
        for row in 1..self.size {
            let cost = self.cost(row, col);
            if cost < best_cost || (cost == best_cost && self.matching.column_of(row).is_none()) {
                best = row;
                best_cost = cost;
            }
        }
        best
    }

    /// Phase 2: for every row phase 1 left free, anchor its dual on its
    /// cheapest reduced-cost column, then scan forward for a zero
    /// reduced-cost column that is free or whose owner can be re-pointed to
    /// another free zero column.
    fn init_forward_scan(&mut self) {
        for row in 0..self.size {
            if self.matching.column_of(row).is_some() {
                continue;
            }

            let mut col = self.min_reduced_col(row);
            self.u[row] = self.cost(row, col) - self.v[col];

            let mut paired = self.matching.row_of(col).is_none();
            while !paired && col < self.size {
                if self.rc(row, col).is_zero() {
                    match self.matching.row_of(col) {
                        None => paired = true,
                        Some(owner) => {
                            let mut alt = self.scan_from[owner];
                            while !paired && alt < self.size {
                                if self.matching.row_of(alt).is_none()
                                    && self.rc(owner, alt).is_zero()
                                {
                                    self.matching.link(owner, alt);
                                    paired = true;
                                } else {
                                    alt += 1;
                                }
                            }
                            // The 1988 paper advances the owner's pointer to
                            // alt + 1; the published Fortran resets it to n,
                            // which changes how later ties break. We follow
                            // the Fortran.
                            self.scan_from[owner] = self.size;
                        }
                    }
                }
                if !paired {
                    col += 1;
                }
            }

            if paired {
                trace!("initializer paired row {} with column {}", row, col);
                self.matching.link(row, col);
                self.scan_from[row] = col + 1;
            }
        }
    }

    /// Column of minimum reduced cost for a row that has no dual yet
    /// (only column duals apply). Ties prefer a column without an owner.
    fn min_reduced_col(&self, row: usize) -> usize {
        let mut best = 0;
        let mut best_rc = self.cost(row, 0) - self.v[0];
        for col in 1..self.size {
            let rc = self.cost(row, col) - self.v[col];
            if rc < best_rc || (rc == best_rc && self.matching.row_of(col).is_none()) {
                best = col;
                best_rc = rc;
            }
        }
        best
    }

    /// Grow a shortest augmenting path from `row`, adjusting duals until a
    /// free zero-reduced-cost column is reachable. Returns that column and
    /// the per-column predecessor rows of the search tree.
    fn augmenting_path(&mut self, row: usize) -> Result<(usize, Vec<usize>)> {
        let n = self.size;
        // Per-search scratch, rebuilt on every call: the labelled-row
        // sequence, the unlabelled-column mask, each column's predecessor
        // row and its best reduced cost seen from any labelled row.
        let mut labelled = Vec::with_capacity(n);
        labelled.push(row);
        let mut unlabelled = vec![true; n];
        let mut pred = vec![row; n];
        let mut slack = vec![C::max_value(); n];
        let mut frontier = row;

        loop {
            // relax every unlabelled column against the newest labelled row
            for col in 0..n {
                if unlabelled[col] {
                    let rc = self.rc(frontier, col);
                    if rc < slack[col] {
                        slack[col] = rc;
                        pred[col] = frontier;
                    }
                }
            }

            if !(0..n).any(|col| unlabelled[col] && slack[col].is_zero()) {
                // No zero reduced cost on the frontier: shift the duals by
                // the smallest slack to create one without losing dual
                // feasibility.
                let step = (0..n)
                    .filter(|&col| unlabelled[col])
                    .map(|col| slack[col])
                    .min();
                let step = match step {
                    Some(step) => step,
                    None => bail!(
                        "no augmenting path from row {}: every column is labelled and none is free",
                        row
                    ),
                };
                for &labelled_row in &labelled {
                    self.u[labelled_row] += step;
                }
                for col in 0..n {
                    if slack[col].is_zero() {
                        self.v[col] -= step;
                    } else {
                        slack[col] -= step;
                    }
                }
                trace!("dual adjustment by {} for row {}", step, row);
            }

            // Deterministic choice: lowest-index unlabelled column at zero.
            let col = match (0..n).find(|&col| unlabelled[col] && slack[col].is_zero()) {
                Some(col) => col,
                None => bail!(
                    "no zero reduced-cost column for row {} after dual adjustment",
                    row
                ),
            };

            match self.matching.row_of(col) {
                Some(owner) => {
                    trace!("column {} owned by row {}, labelling it", col, owner);
                    labelled.push(owner);
                    unlabelled[col] = false;
                    frontier = owner;
                }
                None => return Ok((col, pred)),
            }
        }
    }

    /// Flip ownership along the path ending at `col`, walking the recorded
    /// predecessors back to the row that started the search.
    fn augment(&mut self, mut col: usize, pred: &[usize]) {
        loop {
            let owner = pred[col];
            let displaced = self.matching.column_of(owner);
            self.matching.link(owner, col);
            match displaced {
                Some(next) => col = next,
                // only the row that started the search had no column
                None => break,
            }
        }
    }
}

impl<C: IntCost> AssignmentSolver<C> for PrimalDualSolver<C> {
    fn size(&self) -> usize {
        self.size
    }

    fn solve(&mut self) -> Result<()> {
        if !self.initialized {
            self.initialize();
        }

        for row in 0..self.size {
            if self.matching.column_of(row).is_none() {
                trace!("searching augmenting path for row {}", row);
                let (col, pred) = self.augmenting_path(row)?;
                self.augment(col, &pred);
            }
        }

        let sum = |duals: &[C]| duals.iter().fold(C::zero(), |acc, &d| acc + d);
        self.z = sum(&self.u) + sum(&self.v);
        debug!("solved: objective {}", self.z);
        Ok(())
    }

    fn set_cost(&mut self, row: usize, col: usize, value: C) -> Result<()> {
        self.check_pair(row, col)?;
        self.costs[row * self.size + col] = value;
        Ok(())
    }

    fn remove_arc(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_pair(row, col)?;
        if self.matching.unlink(row, col) {
            trace!("removed active arc ({}, {})", row, col);
        }
        Ok(())
    }

    fn objective(&self) -> Result<C> {
        self.check_solved()?;
        Ok(self.z)
    }

    fn is_assigned(&self, row: usize, col: usize) -> Result<bool> {
        self.check_pair(row, col)?;
        self.check_solved()?;
        Ok(self.matching.contains(row, col))
    }

    fn reduced_cost(&self, row: usize, col: usize) -> Result<C> {
        self.check_pair(row, col)?;
        self.check_solved()?;
        Ok(self.rc(row, col))
    }

    fn row_dual(&self, row: usize) -> Result<C> {
        ensure!(
            row < self.size,
            "row {} out of range for problem size {}",
            row,
            self.size
        );
        self.check_solved()?;
        Ok(self.u[row])
    }

    fn col_dual(&self, col: usize) -> Result<C> {
        ensure!(
            col < self.size,
            "column {} out of range for problem size {}",
            col,
            self.size
        );
        self.check_solved()?;
        Ok(self.v[col])
    }
}
