// This test is an integration test and must be run with mpirun.
// Example: mpirun -n 4 cargo test --features mpi --test mpi_integration_test -- --nocapture

// This annotation ensures this test is only compiled when the "mpi" feature is enabled.
#[cfg(feature = "mpi")]
mod mpi_tests {
    use mpi::traits::*;
    use trapnd::fixtures::{FirstIntegral, PiIntegral};
    use trapnd::integrand::Integrand;
    use trapnd::mpi::parallel_integral_mpi;
    use trapnd::trapezoid::sequential_integral;

    #[test]
    fn test_mpi_trapezoid_integration() {
        let universe = mpi::initialize().unwrap();
        let world = universe.world();
        let rank = world.rank();

        let pi = PiIntegral::new();
        let result =
            parallel_integral_mpi(&pi, pi.lower_bound(), pi.upper_bound(), 1000, &world).unwrap();

        let square = FirstIntegral::new();
        let parallel =
            parallel_integral_mpi(&square, square.lower_bound(), square.upper_bound(), 500, &world)
                .unwrap();

        if rank == 0 {
            assert!((result - std::f64::consts::PI).abs() < 1e-3);

            let sequential =
                sequential_integral(&square, square.lower_bound(), square.upper_bound(), 500)
                    .unwrap();
            assert!(((parallel - sequential) / sequential).abs() < 1e-9);
        } else {
            assert_eq!(result, 0.0);
        }
    }
}
