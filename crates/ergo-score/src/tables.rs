//! Published RULA and REBA lookup tables.
//!
//! The integers are the assessment standards themselves and must not be tuned.
//! Lookups take 1-based component scores and clamp every index into range, so
//! out-of-range scores saturate instead of panicking.

/// RULA Table A: `[upper_arm][lower_arm][wrist]`.
///
/// The 8 wrist columns are the published wrist(1-4) x wrist-twist(1-2) grid.
pub const RULA_TABLE_A: [[[u8; 8]; 3]; 6] = [
    [
        [1, 2, 2, 2, 2, 3, 3, 3],
        [2, 2, 2, 2, 3, 3, 3, 3],
        [2, 3, 3, 3, 3, 3, 4, 4],
    ],
    [
        [2, 3, 3, 3, 3, 4, 4, 4],
        [3, 3, 3, 3, 3, 4, 4, 4],
        [3, 4, 4, 4, 4, 4, 5, 5],
    ],
    [
        [3, 3, 4, 4, 4, 4, 5, 5],
        [3, 4, 4, 4, 4, 4, 5, 5],
        [4, 4, 4, 4, 4, 5, 5, 5],
    ],
    [
        [4, 4, 4, 4, 4, 5, 5, 5],
        [4, 4, 4, 4, 4, 5, 5, 5],
        [4, 4, 4, 5, 5, 5, 6, 6],
    ],
    [
        [5, 5, 5, 5, 5, 6, 6, 7],
        [5, 6, 6, 6, 6, 7, 7, 7],
        [6, 6, 6, 7, 7, 7, 7, 8],
    ],
    [
        [7, 7, 7, 7, 7, 8, 8, 9],
        [8, 8, 8, 8, 8, 9, 9, 9],
        [9, 9, 9, 9, 9, 9, 9, 9],
    ],
];

/// RULA Table B: `[neck][trunk]`, legs-supported column of the published table.
pub const RULA_TABLE_B: [[u8; 6]; 6] = [
    [1, 2, 3, 5, 6, 7],
    [2, 2, 4, 5, 6, 7],
    [3, 3, 4, 5, 6, 7],
    [5, 5, 6, 7, 7, 8],
    [7, 7, 7, 8, 8, 8],
    [8, 8, 8, 8, 9, 9],
];

/// RULA Table C: `[score_a][score_b]`, rows 8+ and columns 7+ saturate.
pub const RULA_TABLE_C: [[u8; 7]; 8] = [
    [1, 2, 3, 3, 4, 5, 5],
    [2, 2, 3, 4, 4, 5, 5],
    [3, 3, 3, 4, 4, 5, 6],
    [3, 3, 3, 4, 5, 6, 6],
    [4, 4, 4, 5, 6, 7, 7],
    [4, 4, 5, 6, 6, 7, 7],
    [5, 5, 6, 6, 7, 7, 7],
    [5, 5, 6, 7, 7, 7, 7],
];

/// REBA Table A as a 2D grid: `[neck][legs]`.
///
/// This is the neck=1 slice of the published table with trunk rows, indexed by
/// neck instead of trunk. Selected by `RebaTableLayout::Collapsed`.
pub const REBA_TABLE_A_COLLAPSED: [[u8; 4]; 5] = [
    [1, 2, 3, 4],
    [2, 3, 4, 5],
    [2, 4, 5, 6],
    [3, 5, 6, 7],
    [4, 6, 7, 8],
];

/// REBA Table B as a 2D grid: `[upper_arm][wrist]`, the lower-arm=1 slice.
pub const REBA_TABLE_B_COLLAPSED: [[u8; 3]; 6] = [
    [1, 2, 2],
    [1, 2, 3],
    [3, 4, 5],
    [4, 5, 5],
    [6, 7, 8],
    [7, 8, 8],
];

/// Published REBA Table A: `[trunk][neck][legs]`.
pub const REBA_TABLE_A: [[[u8; 4]; 3]; 5] = [
    [[1, 2, 3, 4], [1, 2, 3, 4], [3, 3, 5, 6]],
    [[2, 3, 4, 5], [3, 4, 5, 6], [4, 5, 6, 7]],
    [[2, 4, 5, 6], [4, 5, 6, 7], [5, 6, 7, 8]],
    [[3, 5, 6, 7], [5, 6, 7, 8], [6, 7, 8, 9]],
    [[4, 6, 7, 8], [6, 7, 8, 9], [7, 8, 9, 9]],
];

/// Published REBA Table B: `[lower_arm][upper_arm][wrist]`.
pub const REBA_TABLE_B: [[[u8; 3]; 6]; 2] = [
    [
        [1, 2, 2],
        [1, 2, 3],
        [3, 4, 5],
        [4, 5, 5],
        [6, 7, 8],
        [7, 8, 8],
    ],
    [
        [1, 2, 3],
        [2, 3, 4],
        [4, 5, 5],
        [5, 6, 7],
        [7, 8, 8],
        [8, 9, 9],
    ],
];

/// REBA Table C: `[score_a][score_b]`.
pub const REBA_TABLE_C: [[u8; 12]; 12] = [
    [1, 1, 1, 2, 3, 3, 4, 5, 6, 7, 7, 7],
    [1, 2, 2, 3, 4, 4, 5, 6, 6, 7, 7, 8],
    [2, 3, 3, 3, 4, 5, 6, 7, 7, 8, 8, 8],
    [3, 4, 4, 4, 5, 6, 7, 8, 8, 9, 9, 9],
    [4, 4, 4, 5, 6, 7, 8, 8, 9, 9, 9, 9],
    [6, 6, 6, 7, 8, 8, 9, 9, 10, 10, 10, 10],
    [7, 7, 7, 8, 9, 9, 9, 10, 10, 11, 11, 11],
    [8, 8, 8, 9, 10, 10, 10, 10, 10, 11, 11, 11],
    [9, 9, 9, 10, 10, 10, 11, 11, 11, 12, 12, 12],
    [10, 10, 10, 11, 11, 11, 11, 12, 12, 12, 12, 12],
    [11, 11, 11, 11, 12, 12, 12, 12, 12, 12, 12, 12],
    [12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12, 12],
];

/// 0-based index for a 1-based score, clamped into `0..len`.
pub fn clamp_index(score: u8, len: usize) -> usize {
    (score.max(1) as usize - 1).min(len - 1)
}

pub fn lookup2<const R: usize, const C: usize>(table: &[[u8; C]; R], row: u8, col: u8) -> u8 {
    table[clamp_index(row, R)][clamp_index(col, C)]
}

pub fn lookup3<const P: usize, const R: usize, const C: usize>(
    table: &[[[u8; C]; R]; P],
    plane: u8,
    row: u8,
    col: u8,
) -> u8 {
    lookup2(&table[clamp_index(plane, P)], row, col)
}
