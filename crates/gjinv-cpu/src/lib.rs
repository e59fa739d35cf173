use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use gjinv_core::{GjError, GjResult};
use gjinv_hal::{CellFn, DispatchProperties, Grid, GridDispatcher};
use gjinv_math::Scalar;

fn check_extent(grid: Grid, out_len: usize) -> GjResult<()> {
    if out_len != grid.cells() {
        return Err(GjError::ShapeMismatch {
            expected: (grid.rows, grid.cols),
            // Flat buffer, reported as a single row.
            found: (1, out_len),
        });
    }
    Ok(())
}

/// Walks the grid row by row on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialDispatcher;

impl<T: Scalar> GridDispatcher<T> for SerialDispatcher {
    fn properties(&self) -> DispatchProperties {
        DispatchProperties { engine: "SERIAL (CALLER THREAD)", workers: 1 }
    }

    fn dispatch(&self, grid: Grid, out: &mut [T], cell: &CellFn<'_, T>) -> GjResult<()> {
        check_extent(grid, out.len())?;
        if grid.cells() == 0 { return Ok(()); }

        for (y, row) in out.chunks_mut(grid.cols).enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = cell(x, y);
            }
        }
        Ok(())
    }
}

/// Rows of the grid are spread over a dedicated rayon pool.
pub struct RayonDispatcher {
    pool: ThreadPool,
    pinned: bool,
}

impl RayonDispatcher {
    /// `threads == 0` lets rayon pick (one per logical CPU).
    /// With `pin_cores`, worker `i` is bound to core `i % cores`.
    pub fn new(threads: usize, pin_cores: bool) -> anyhow::Result<Self> {
        let mut builder = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("gjinv-grid-{}", i));

        let mut pinned = false;
        if pin_cores {
            match core_affinity::get_core_ids() {
                Some(cores) if !cores.is_empty() => {
                    builder = builder.start_handler(move |idx| {
                        let core = cores[idx % cores.len()];
                        if !core_affinity::set_for_current(core) {
                            warn!("[GRID] worker {} could not be pinned to core {}", idx, core.id);
                        }
                    });
                    pinned = true;
                }
                _ => warn!("[GRID] core ids unavailable, running unpinned"),
            }
        }

        let pool = builder.build()?;
        info!(
            "[GRID] rayon pool ready: {} workers{}",
            pool.current_num_threads(),
            if pinned { " (pinned)" } else { "" }
        );
        Ok(Self { pool, pinned })
    }

    pub fn is_pinned(&self) -> bool { self.pinned }
}

impl<T: Scalar> GridDispatcher<T> for RayonDispatcher {
    fn properties(&self) -> DispatchProperties {
        DispatchProperties { engine: "RAYON (ROW-PARALLEL)", workers: self.pool.current_num_threads() }
    }

    fn dispatch(&self, grid: Grid, out: &mut [T], cell: &CellFn<'_, T>) -> GjResult<()> {
        check_extent(grid, out.len())?;
        if grid.cells() == 0 { return Ok(()); }

        debug!("[GRID] dispatch {}x{}", grid.rows, grid.cols);
        // install() blocks until every row is written.
        self.pool.install(|| {
            out.par_chunks_mut(grid.cols)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, v) in row.iter_mut().enumerate() {
                        *v = cell(x, y);
                    }
                });
        });
        Ok(())
    }
}
