/// Asserts that an agent is no longer in the world.
#[macro_export]
macro_rules! assert_removed {
    ($world:expr, $id:expr) => {
        assert!(
            !$world.entities().contains($id),
            "Agent {} should be gone but was found alive",
            $id
        );
    };
}

/// Asserts that an agent is still in the world.
#[macro_export]
macro_rules! assert_alive {
    ($world:expr, $id:expr) => {
        assert!(
            $world.entities().contains($id),
            "Agent {} should be alive",
            $id
        );
    };
}

/// Asserts that a float is within `eps` of the expected value.
#[macro_export]
macro_rules! assert_approx {
    ($actual:expr, $expected:expr, $eps:expr) => {
        let (a, e) = ($actual, $expected);
        assert!((a - e).abs() <= $eps, "{} is not within {} of {}", a, $eps, e);
    };
}
