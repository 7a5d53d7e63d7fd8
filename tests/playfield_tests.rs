//! Playfield tests - placement rules and row clearing

use blockfall::core::{PieceCatalog, Playfield, Shape};
use blockfall::types::{PieceName, FIELD_HEIGHT, FIELD_WIDTH};

fn field() -> Playfield {
    Playfield::new(FIELD_WIDTH, FIELD_HEIGHT).unwrap()
}

fn shape(name: PieceName) -> Shape {
    PieceCatalog::standard().shape(name).unwrap().clone()
}

fn fill_row(field: &mut Playfield, row: i32) {
    for col in 0..field.width() as i32 {
        field.set(row, col, Some(PieceName::L));
    }
}

#[test]
fn test_new_field_is_empty() {
    let field = field();
    assert_eq!(field.width(), 10);
    assert_eq!(field.height(), 20);
    for row in 0..20 {
        for col in 0..10 {
            assert_eq!(field.get(row, col), Some(None));
        }
    }
}

#[test]
fn test_out_of_bounds_reads() {
    let field = field();
    assert_eq!(field.get(-1, 0), None);
    assert_eq!(field.get(0, -1), None);
    assert_eq!(field.get(20, 0), None);
    assert_eq!(field.get(0, 10), None);
}

#[test]
fn test_placement_at_spawn_is_valid() {
    let field = field();
    assert!(field.is_valid_placement(&shape(PieceName::I), -1, 3));
    assert!(field.is_valid_placement(&shape(PieceName::T), -2, 3));
}

#[test]
fn test_i_bar_left_wall() {
    let field = field();
    let i = shape(PieceName::I);
    // Horizontal I covers matrix row 1, all four columns.
    assert!(field.is_valid_placement(&i, 5, 0));
    assert!(!field.is_valid_placement(&i, 5, -1));
    assert!(field.is_valid_placement(&i, 5, 6));
    assert!(!field.is_valid_placement(&i, 5, 7));
}

#[test]
fn test_empty_matrix_columns_may_hang_over_wall() {
    let field = field();
    // Vertical I lives in matrix column 2, so the matrix may start at -2.
    let vertical = shape(PieceName::I).rotated();
    assert!(field.is_valid_placement(&vertical, 0, -2));
    assert!(!field.is_valid_placement(&vertical, 0, -3));
}

#[test]
fn test_floor() {
    let field = field();
    let o = shape(PieceName::O);
    assert!(field.is_valid_placement(&o, 18, 0));
    assert!(!field.is_valid_placement(&o, 19, 0));
}

#[test]
fn test_spawn_buffer_columns_still_checked() {
    let field = field();
    let o = shape(PieceName::O);
    assert!(!field.is_valid_placement(&o, -2, -1));
    assert!(!field.is_valid_placement(&o, -2, 9));
}

#[test]
fn test_overlap_rejected() {
    let mut field = field();
    field.set(10, 4, Some(PieceName::Z));
    let o = shape(PieceName::O);
    assert!(!field.is_valid_placement(&o, 9, 3));
    assert!(!field.is_valid_placement(&o, 9, 4));
    assert!(field.is_valid_placement(&o, 9, 5));
}

#[test]
fn test_commit_writes_name() {
    let mut field = field();
    let written = field.commit(&shape(PieceName::T), PieceName::T, 18, 0);
    assert_eq!(written, 4);
    assert_eq!(field.get(18, 1), Some(Some(PieceName::T)));
    assert_eq!(field.get(19, 0), Some(Some(PieceName::T)));
    assert_eq!(field.get(18, 0), Some(None));
}

#[test]
fn test_commit_skips_spawn_buffer() {
    let mut field = field();
    // T at row -1: its top cell is at row -1, the bar on row 0.
    let written = field.commit(&shape(PieceName::T), PieceName::T, -1, 3);
    assert_eq!(written, 3);
    assert_eq!(field.filled_count(), 3);
}

#[test]
fn test_clear_single_full_row() {
    let mut field = field();
    fill_row(&mut field, 19);
    field.set(18, 0, Some(PieceName::J));

    assert_eq!(field.clear_full_rows(), 1);
    assert_eq!(field.get(19, 0), Some(Some(PieceName::J)));
    assert_eq!(field.filled_count(), 1);
}

#[test]
fn test_clear_non_adjacent_rows_shifts_correctly() {
    let mut field = field();
    fill_row(&mut field, 2);
    fill_row(&mut field, 5);
    // Markers above, between and below the full rows.
    field.set(1, 0, Some(PieceName::I));
    field.set(3, 1, Some(PieceName::O));
    field.set(4, 2, Some(PieceName::S));
    field.set(6, 3, Some(PieceName::Z));

    assert_eq!(field.clear_full_rows(), 2);

    // Below the lowest cleared row: unchanged.
    assert_eq!(field.get(6, 3), Some(Some(PieceName::Z)));
    // Between the two: down by one.
    assert_eq!(field.get(5, 2), Some(Some(PieceName::S)));
    assert_eq!(field.get(4, 1), Some(Some(PieceName::O)));
    // Above both: down by two.
    assert_eq!(field.get(3, 0), Some(Some(PieceName::I)));
    // Vacated top rows are empty.
    assert!(field.row(0).unwrap().iter().all(Option::is_none));
    assert!(field.row(1).unwrap().iter().all(Option::is_none));
    assert_eq!(field.filled_count(), 4);
}

#[test]
fn test_clear_four_rows() {
    let mut field = field();
    for row in 16..20 {
        fill_row(&mut field, row);
    }
    field.set(15, 9, Some(PieceName::T));
    assert_eq!(field.clear_full_rows(), 4);
    assert_eq!(field.get(19, 9), Some(Some(PieceName::T)));
    assert_eq!(field.filled_count(), 1);
}

#[test]
fn test_clear_top_row() {
    let mut field = field();
    fill_row(&mut field, 0);
    assert_eq!(field.clear_full_rows(), 1);
    assert_eq!(field.filled_count(), 0);
}

#[test]
fn test_nothing_to_clear() {
    let mut field = field();
    field.set(19, 0, Some(PieceName::I));
    let before = field.clone();
    assert_eq!(field.clear_full_rows(), 0);
    assert_eq!(field, before);
}
