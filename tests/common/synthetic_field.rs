use optima_register::ScalarField;

/// Vertical step edge: 0 left of `split_x`, 1 from `split_x` on.
pub fn step_field(width: usize, height: usize, split_x: usize) -> ScalarField {
    assert!(width > 0 && height > 0, "field dimensions must be positive");
    let mut f = ScalarField::new(width, height);
    for y in 0..height {
        for x in split_x.min(width)..width {
            f.set(x, y, 1.0);
        }
    }
    f
}

/// Checkerboard with values in {0.125, 0.875}.
pub fn checkerboard_field(width: usize, height: usize, cell: usize) -> ScalarField {
    assert!(cell > 0, "cell size must be positive");
    let mut f = ScalarField::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = if (x / cell + y / cell) & 1 == 0 { 0.125 } else { 0.875 };
            f.set(x, y, v);
        }
    }
    f
}
