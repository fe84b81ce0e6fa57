//! Invaders: the mobile units that march down a lane.

/// A unit advancing along a lane toward the opponent's base.
///
/// Defense and stun resistance are fixed at spawn. Health only ever goes
/// down; the invader is removed from its lane once it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invader {
    pub(crate) position: usize,
    pub(crate) health: i32,
    pub(crate) max_health: i32,
    pub(crate) defense: i32,
    pub(crate) stun_resistance: i32,
    pub(crate) stun_remaining: i32,
}

impl Invader {
    /// Create a fresh invader at the start of the lane.
    ///
    /// Negative defense or stun resistance is clamped to zero.
    #[must_use]
    pub fn new(health: i32, defense: i32, stun_resistance: i32) -> Self {
        Self {
            position: 0,
            health,
            max_health: health,
            defense: defense.max(0),
            stun_resistance: stun_resistance.max(0),
            stun_remaining: 0,
        }
    }

    /// Lane slot currently occupied.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Health at spawn.
    #[must_use]
    pub const fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Flat damage reduction per hit.
    #[must_use]
    pub const fn defense(&self) -> i32 {
        self.defense
    }

    /// Flat reduction of incoming stun duration.
    #[must_use]
    pub const fn stun_resistance(&self) -> i32 {
        self.stun_resistance
    }

    /// Turns left before the invader may move again.
    #[must_use]
    pub const fn stun_remaining(&self) -> i32 {
        self.stun_remaining
    }

    /// Whether the invader is currently stunned.
    #[must_use]
    pub const fn is_stunned(&self) -> bool {
        self.stun_remaining > 0
    }

    /// Apply one hit of `power`.
    ///
    /// Defense reduces the hit but never below 1. Returns `true` if the
    /// invader died and must be removed.
    pub fn damage(&mut self, power: i32) -> bool {
        self.health = self.health.saturating_sub(power.saturating_sub(self.defense).max(1));
        self.health <= 0
    }

    /// Apply a stun of `power`, reduced by stun resistance.
    ///
    /// Overwrites any stun in progress.
    pub fn stun(&mut self, power: i32) {
        self.stun_remaining = power.saturating_sub(self.stun_resistance).max(0);
    }

    /// Count down one turn of stun.
    pub(crate) fn tick_stun(&mut self) {
        self.stun_remaining = (self.stun_remaining - 1).max(0);
    }

    /// Fraction of health left, in `(0, 1]` for a living invader.
    #[must_use]
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        f64::from(self.health) / f64::from(self.max_health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_invader_starts_at_zero() {
        let invader = Invader::new(10, 2, 1);
        assert_eq!(invader.position(), 0);
        assert_eq!(invader.health(), 10);
        assert_eq!(invader.max_health(), 10);
        assert!(!invader.is_stunned());
    }

    #[test]
    fn test_negative_stats_clamped() {
        let invader = Invader::new(10, -3, -7);
        assert_eq!(invader.defense(), 0);
        assert_eq!(invader.stun_resistance(), 0);
    }

    #[test]
    fn test_damage_minimum_one() {
        let mut invader = Invader::new(10, 50, 0);
        assert!(!invader.damage(1));
        assert_eq!(invader.health(), 9);
        assert!(!invader.damage(49));
        assert_eq!(invader.health(), 8);
    }

    #[test]
    fn test_damage_overkill_reports_death() {
        let mut invader = Invader::new(10, 0, 0);
        assert!(invader.damage(12));
        assert_eq!(invader.health(), -2);
    }

    #[test]
    fn test_damage_exactly_lethal() {
        let mut invader = Invader::new(10, 3, 0);
        assert!(invader.damage(13));
        assert_eq!(invader.health(), 0);
    }

    #[test]
    fn test_stun_reduced_by_resistance() {
        let mut invader = Invader::new(10, 0, 2);
        invader.stun(5);
        assert_eq!(invader.stun_remaining(), 3);

        invader.stun(1);
        assert_eq!(invader.stun_remaining(), 0);
    }

    #[test]
    fn test_tick_stun_never_negative() {
        let mut invader = Invader::new(10, 0, 0);
        invader.stun(1);
        invader.tick_stun();
        invader.tick_stun();
        assert_eq!(invader.stun_remaining(), 0);
    }

    #[test]
    fn test_health_fraction() {
        let mut invader = Invader::new(20, 0, 0);
        invader.damage(5);
        assert!((invader.health_fraction() - 0.75).abs() < 1e-9);
    }
}
