use gjinv_math::{Matrix, Scalar};

/// Fixed-precision cells joined by " \t ", one row per line.
pub fn format_matrix<T: Scalar>(m: &Matrix<T>, precision: usize) -> String {
    m.to_rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| format!("{:.*}", precision, v.to_f64()))
                .collect::<Vec<_>>()
                .join(" \t ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
