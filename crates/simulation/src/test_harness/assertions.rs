//! Assertion helpers for `TestRun` integration tests.

use crate::pool::Partition;
use crate::session::RunPhase;

use super::TestRun;

impl TestRun {
    /// Assert the ghost's x is within `tolerance` of `expected`.
    pub fn assert_ghost_x_near(&mut self, expected: f32, tolerance: f32) {
        let x = self.ghost_x();
        assert!(
            (x - expected).abs() <= tolerance,
            "Expected ghost x ≈ {expected} (±{tolerance}), got {x}"
        );
    }

    /// Assert the ghost is standing on the floor with no vertical motion.
    pub fn assert_ghost_at_rest(&mut self) {
        let y = self.ghost_position().y;
        let vy = self.ghost_body().velocity.y;
        assert!(
            (y - crate::physics::rest_height()).abs() < 1e-5 && vy == 0.0,
            "Expected ghost at rest on the floor, got y={y} vy={vy}"
        );
    }

    pub fn assert_phase(&self, expected: RunPhase) {
        let phase = self.session().phase;
        assert_eq!(phase, expected, "Expected run phase {expected:?}, got {phase:?}");
    }

    /// Assert whether `id` is still active in `partition`.
    pub fn assert_active(&self, partition: Partition, id: u32, expected: bool) {
        let active = self.object(partition, id).is_some();
        assert_eq!(
            active, expected,
            "Expected object {id} in {partition:?} active={expected}, got active={active}"
        );
    }
}
