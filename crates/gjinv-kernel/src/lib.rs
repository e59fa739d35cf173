#![no_std]
#![forbid(unsafe_code)]

pub mod cells;
pub mod desc;
mod passes;

pub use desc::{KernelDesc, AUGMENT_INIT, EXTRACT_RESULT, ROW_ELIMINATE};
pub use passes::{
    augment_init, augment_init_into, extract_result, extract_result_into, row_eliminate,
    row_eliminate_into,
};
