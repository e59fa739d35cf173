use gjinv_core::Stage;
use gjinv_hal::Grid;

/// Static description of a grid kernel: its name and the output grid it
/// covers for a given matrix size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelDesc {
    pub name: &'static str,
    pub stage: Stage,
}

impl KernelDesc {
    pub const fn new(stage: Stage) -> Self {
        Self { name: stage.name(), stage }
    }

    pub fn grid(&self, n: usize) -> Grid {
        let (rows, cols) = self.stage.extent(n);
        Grid::new(rows, cols)
    }
}

/// (input, n) -> {y: n, x: 2n}
pub const AUGMENT_INIT: KernelDesc = KernelDesc::new(Stage::AugmentInit);
/// (aug, n, r) -> {y: n, x: 2n}
pub const ROW_ELIMINATE: KernelDesc = KernelDesc::new(Stage::RowEliminate);
/// (aug, n) -> {y: n, x: n}
pub const EXTRACT_RESULT: KernelDesc = KernelDesc::new(Stage::ExtractResult);
