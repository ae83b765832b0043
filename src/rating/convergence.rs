pub fn has_converged(lower: f64, upper: f64, tolerance: f64) -> bool {
    (upper - lower).abs() <= tolerance
}

pub fn should_continue(iteration: usize, max_iterations: usize) -> bool {
    iteration < max_iterations
}
