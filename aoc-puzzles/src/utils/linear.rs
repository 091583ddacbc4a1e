//! Exact Gauss-Jordan elimination
//!
//! Rows are augmented: the first `vars` columns hold coefficients, the rest
//! hold right-hand sides. All arithmetic is over [`BigRational`], so there is
//! no rounding and no overflow however large the puzzle coordinates get.

use num::{BigInt, BigRational, One, Signed, Zero};

/// Lift an integer into the rationals
pub fn rational(value: impl Into<BigInt>) -> BigRational {
    BigRational::from_integer(value.into())
}

/// Build an augmented matrix from integer rows
pub fn matrix(rows: &[Vec<i64>]) -> Vec<Vec<BigRational>> {
    rows.iter()
        .map(|row| row.iter().copied().map(rational).collect())
        .collect()
}

/// Reduce `rows` in place to reduced row echelon form, pivoting only within
/// the first `vars` columns.
///
/// Returns the pivot column of each leading row; rows past the returned
/// length are zero in every coefficient column.
pub fn reduced_row_echelon(rows: &mut [Vec<BigRational>], vars: usize) -> Vec<usize> {
    let mut pivots = Vec::new();
    let mut row = 0;
    for col in 0..vars {
        if row == rows.len() {
            break;
        }
        let Some(found) = (row..rows.len()).find(|&r| !rows[r][col].is_zero()) else {
            continue;
        };
        rows.swap(row, found);

        let lead = rows[row][col].clone();
        for value in rows[row].iter_mut() {
            *value /= lead.clone();
        }

        let pivot_row = rows[row].clone();
        for (r, other) in rows.iter_mut().enumerate() {
            if r == row || other[col].is_zero() {
                continue;
            }
            let factor = other[col].clone();
            for (value, p) in other.iter_mut().zip(&pivot_row) {
                *value -= factor.clone() * p;
            }
        }

        pivots.push(col);
        row += 1;
    }
    pivots
}

/// Whether some all-zero coefficient row has a non-zero right-hand side
pub fn is_inconsistent(rows: &[Vec<BigRational>], vars: usize, rank: usize) -> bool {
    rows[rank..]
        .iter()
        .any(|row| row[vars..].iter().any(|v| !v.is_zero()))
}

/// Solve a square-or-taller system with one right-hand column.
///
/// Returns `None` when the system is inconsistent or has free variables.
pub fn solve_unique(mut rows: Vec<Vec<BigRational>>) -> Option<Vec<BigRational>> {
    let vars = rows.first()?.len().checked_sub(1)?;
    let pivots = reduced_row_echelon(&mut rows, vars);
    if pivots.len() != vars || is_inconsistent(&rows, vars, pivots.len()) {
        return None;
    }
    Some(rows.into_iter().take(vars).map(|row| row[vars].clone()).collect())
}

/// Convert an integral rational back to `i64`
pub fn to_i64(value: &BigRational) -> Option<i64> {
    use num::ToPrimitive;
    value.is_integer().then(|| value.to_integer().to_i64()).flatten()
}

/// Whether `value` is a non-negative integer
pub fn is_natural(value: &BigRational) -> bool {
    value.is_integer() && !value.is_negative()
}

/// Least common multiple of the denominators, for scaling a row to integers
pub fn denominator_lcm<'a>(values: impl IntoIterator<Item = &'a BigRational>) -> BigInt {
    use num::Integer;
    values
        .into_iter()
        .fold(BigInt::one(), |acc, v| acc.lcm(v.denom()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_three_by_three() {
        // x + y + z = 6, 2y + 5z = -4, 2x + 5y - z = 27
        let rows = matrix(&[vec![1, 1, 1, 6], vec![0, 2, 5, -4], vec![2, 5, -1, 27]]);
        let solution = solve_unique(rows).unwrap();
        let ints: Vec<_> = solution.iter().map(|v| to_i64(v).unwrap()).collect();
        assert_eq!(ints, vec![5, 3, -2]);
    }

    #[test]
    fn fractional_solution_is_exact() {
        // 3x = 1
        let solution = solve_unique(matrix(&[vec![3, 1]])).unwrap();
        assert_eq!(solution[0], BigRational::new(1.into(), 3.into()));
        assert_eq!(to_i64(&solution[0]), None);
    }

    #[test]
    fn singular_and_inconsistent_systems() {
        // x + y = 2 twice: a free variable
        assert!(solve_unique(matrix(&[vec![1, 1, 2], vec![2, 2, 4]])).is_none());
        // x + y = 2 and x + y = 3
        let mut rows = matrix(&[vec![1, 1, 2], vec![1, 1, 3]]);
        let pivots = reduced_row_echelon(&mut rows, 2);
        assert_eq!(pivots, vec![0]);
        assert!(is_inconsistent(&rows, 2, pivots.len()));
    }

    #[test]
    fn free_columns_are_skipped() {
        // x + 2z = 1, y + z = 2
        let mut rows = matrix(&[vec![1, 0, 2, 1], vec![0, 1, 1, 2]]);
        assert_eq!(reduced_row_echelon(&mut rows, 3), vec![0, 1]);
        assert_eq!(denominator_lcm(&rows[0]), BigInt::one());
    }
}
