use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Parses one row per line. Cells are separated by whitespace and/or commas;
/// blank lines and `#` comments are skipped.
pub fn parse_rows(text: &str) -> anyhow::Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() { continue; }

        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                tok.parse::<f64>()
                    .with_context(|| format!("line {}: bad number {:?}", lineno + 1, tok))
            })
            .collect::<anyhow::Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if rows.is_empty() { bail!("no matrix rows in input"); }
    Ok(rows)
}

/// Row-wise diagonally dominant matrix, so no pivot can collapse to zero.
pub fn random_rows(n: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|r| {
            let mut row: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
            let off: f64 = row.iter().map(|v| v.abs()).sum();
            row[r] = off + rng.gen_range(0.5..2.0);
            row
        })
        .collect()
}

/// The 2x2 example matrix used by `--demo`.
pub fn demo_rows() -> Vec<Vec<f64>> {
    vec![vec![1.0, 2.0], vec![3.0, 4.0]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let rows = parse_rows("# header\n1, 2 3\n\n4\t5,6  # trailing\n").unwrap();
        assert_eq!(rows, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_rows("").is_err());
        assert!(parse_rows("# only comments\n").is_err());
        let err = parse_rows("1 2\n3 x\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_random_rows_deterministic() {
        let a = random_rows(4, 7);
        assert_eq!(a, random_rows(4, 7));
        assert_eq!(a.len(), 4);
        for (r, row) in a.iter().enumerate() {
            let off: f64 = row.iter().enumerate().filter(|(c, _)| *c != r).map(|(_, v)| v.abs()).sum();
            assert!(row[r] > off);
        }
    }
}
