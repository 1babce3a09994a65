use super::*;

#[test]
fn zero_density_is_empty_and_full_density_is_full() {
    let mut rng = Rng64::new(1);
    assert!(generate(200.0, 140.0, 20.0, 0.0, &mut rng).is_empty());

    let full = generate(200.0, 140.0, 20.0, 1.0, &mut rng);
    assert_eq!(full.len(), 10 * 7);
    assert_eq!(full[0].position, Point::new(0.0, 0.0));
    assert_eq!(full[10].position, Point::new(0.0, 20.0));
    assert_eq!(full[69].position, Point::new(180.0, 120.0));
}

#[test]
fn partial_cells_are_not_candidates() {
    assert_eq!(grid_dimensions(219.9, 139.9, 20.0), (10, 6));
    assert_eq!(grid_dimensions(19.0, 100.0, 20.0), (0, 5));
    assert_eq!(grid_dimensions(100.0, 100.0, 0.0), (0, 0));
    assert_eq!(grid_dimensions(f64::INFINITY, 100.0, 10.0), (0, 10));
}

#[test]
fn oversized_areas_generate_nothing() {
    let mut rng = Rng64::new(3);
    assert!(generate(f64::MAX, f64::MAX, 1.0, 1.0, &mut rng).is_empty());
    assert!(generate(1e12, 1e12, 0.5, 0.5, &mut rng).is_empty());
    assert!(generate(10_000.0, 10_000.0, 1.0, 1.0, &mut rng).is_empty());

    // 1024 x 1024 sits exactly on the cap.
    let full = generate(1024.0, 1024.0, 1.0, 1.0, &mut rng);
    assert_eq!(full.len(), MAX_GRID_POSITIONS);
}

#[test]
fn out_of_range_density_is_clamped() {
    let mut rng = Rng64::new(2);
    assert!(generate(200.0, 140.0, 20.0, -0.5, &mut rng).is_empty());
    assert!(generate(200.0, 140.0, 20.0, f64::NAN, &mut rng).is_empty());
    assert_eq!(generate(200.0, 140.0, 20.0, 7.0, &mut rng).len(), 70);
}

#[test]
fn mean_cardinality_tracks_density() {
    let mut rng = Rng64::new(0xC0FFEE);
    let trials = 400;
    let total: usize = (0..trials)
        .map(|_| generate(200.0, 140.0, 20.0, 0.15, &mut rng).len())
        .sum();
    let mean = total as f64 / trials as f64;
    let expected = 0.15 * 70.0;
    // std of the mean is sqrt(70 * 0.15 * 0.85) / 20 ~= 0.15
    assert!((mean - expected).abs() < 0.75, "mean = {mean}");
}

#[test]
fn same_seed_same_grid() {
    let a = generate(300.0, 300.0, 21.0, 0.3, &mut Rng64::new(5));
    let b = generate(300.0, 300.0, 21.0, 0.3, &mut Rng64::new(5));
    assert_eq!(a, b);
}

#[test]
fn mutate_keeps_positions_and_count() {
    let mut rng = Rng64::new(11);
    let mut cells = generate(200.0, 140.0, 20.0, 1.0, &mut rng);
    let before = cells.clone();

    mutate(&mut cells, 0.0, &mut rng);
    assert_eq!(cells, before);

    for _ in 0..50 {
        mutate(&mut cells, 0.3, &mut rng);
    }
    assert_eq!(cells.len(), before.len());
    for (a, b) in cells.iter().zip(&before) {
        assert_eq!(a.position, b.position);
    }
    assert!(cells.iter().zip(&before).any(|(a, b)| a.value != b.value));
}

#[test]
fn cell_grid_regenerates_wholesale() {
    let mut rng = Rng64::new(3);
    let mut grid = CellGrid::generate(200.0, 140.0, 20.0, 1.0, &mut rng);
    assert_eq!(grid.len(), 70);
    grid.regenerate(100.0, 40.0, &mut rng);
    assert_eq!(grid.len(), 5 * 2);
    grid.regenerate(0.0, 40.0, &mut rng);
    assert!(grid.is_empty());
}

#[test]
fn bit_helpers() {
    assert_eq!(Bit::Zero.flipped(), Bit::One);
    assert_eq!(Bit::One.as_char(), '1');
}
