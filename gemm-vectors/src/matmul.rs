use crate::range::ValueRange;

/// INT8 matrix-matrix multiply: C[i][j] = sum(A[i][p] * B[p][j]) for p in 0..k
///
/// All types: i8 x i8 -> i32 accumulate. Row-major everywhere:
///   a:   (m, k)
///   b:   (k, n)
///   out: (m, n)
///
/// The caller guarantees the accumulator cannot overflow (see [`accumulator_fits`]);
/// release builds keep overflow checks on, so a violated guarantee panics
/// rather than wrapping.
pub fn matmul_i8(a: &[i8], b: &[i8], out: &mut [i32], m: usize, k: usize, n: usize) {
    assert!(a.len() >= m * k);
    assert!(b.len() >= k * n);
    assert!(out.len() >= m * n);

    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let mut acc: i32 = 0;
            for (p, &x) in a_row.iter().enumerate() {
                acc += x as i32 * b[p * n + j] as i32;
            }
            out[i * n + j] = acc;
        }
    }
}

/// Worst-case |A[i][p] * B[p][j]| for operands drawn from the two ranges.
pub fn max_abs_product(a_range: ValueRange, b_range: ValueRange) -> i64 {
    a_range.max_abs() * b_range.max_abs()
}

/// Worst-case |sum| of a length-`k` dot product, in i128 so huge K cannot
/// overflow the bound itself.
pub fn accumulator_bound(k: usize, a_range: ValueRange, b_range: ValueRange) -> i128 {
    k as i128 * max_abs_product(a_range, b_range) as i128
}

/// True when every partial sum of a length-`k` dot product stays inside i32.
///
/// Full int8 ranges give 128 * 128 = 16384 per product, so K may reach
/// 131071 before the positive side (-128 * -128 summed) can pass i32::MAX.
pub fn accumulator_fits(k: usize, a_range: ValueRange, b_range: ValueRange) -> bool {
    accumulator_bound(k, a_range, b_range) <= i32::MAX as i128
}
