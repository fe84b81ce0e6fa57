//! Game state: two lanes, two economies, the turn counter and the
//! running/over status.
//!
//! The phases of a turn are exposed as separate methods so the engine can
//! interleave them with bot consultation. Actions only reach the lanes and
//! economies through [`GameState::apply_action`].

use std::fmt;

use crate::game::{
    Action, ActionRecord, Economy, Growth, Invader, LANE_LEN, Lane, Rejection, Ruleset, Side,
    Stat, Tower, TowerKind, TurnReport, TurnView,
};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// At least one side ran out of life.
    LifeDepleted,
    /// The turn cap was reached with both sides alive.
    TurnLimit,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LifeDepleted => f.write_str("life depleted"),
            Self::TurnLimit => f.write_str("turn limit"),
        }
    }
}

/// Terminal state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    /// Turn on which the game ended.
    pub turn: u32,
    /// Which sides reached zero life, indexed by [`Side::index`].
    pub defeated: [bool; 2],
    /// Why the game ended.
    pub reason: EndReason,
}

impl GameOver {
    /// The sole surviving side, or `None` on a tie.
    #[must_use]
    pub const fn winner(&self) -> Option<Side> {
        match self.defeated {
            [true, false] => Some(Side::Right),
            [false, true] => Some(Side::Left),
            _ => None,
        }
    }

    /// Whether `side` was defeated.
    #[must_use]
    pub const fn is_defeated(&self, side: Side) -> bool {
        self.defeated[side.index()]
    }

    /// Whether neither side won.
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        self.winner().is_none()
    }
}

/// Complete game state.
#[derive(Debug, Clone, Copy)]
pub struct GameState {
    ruleset: Ruleset,
    lanes: [Lane; 2],
    economies: [Economy; 2],
    turn: u32,
    over: Option<GameOver>,
}

impl GameState {
    /// Create a fresh game under `ruleset`.
    #[must_use]
    pub fn new(ruleset: Ruleset) -> Self {
        let economy = Economy::new(&ruleset);
        Self {
            lanes: [Lane::new(Side::Left), Lane::new(Side::Right)],
            economies: [economy; 2],
            ruleset,
            turn: 0,
            over: None,
        }
    }

    /// Rules in force.
    #[must_use]
    pub const fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Current turn number (0 before the first step).
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Lane carrying `side`'s invaders.
    #[must_use]
    pub const fn lane(&self, side: Side) -> &Lane {
        &self.lanes[side.index()]
    }

    /// Economy of `side`.
    #[must_use]
    pub const fn economy(&self, side: Side) -> &Economy {
        &self.economies[side.index()]
    }

    /// Whether the game has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over.is_some()
    }

    /// Terminal state, once reached.
    #[must_use]
    pub const fn game_over(&self) -> Option<&GameOver> {
        self.over.as_ref()
    }

    /// Observation for `side`'s bot.
    #[must_use]
    pub fn view(&self, side: Side) -> TurnView<'_> {
        TurnView {
            turn: self.turn,
            side,
            own: self.economy(side),
            opponent: self.economy(side.opponent()),
            attacking: self.lane(side),
            defending: self.lane(side.opponent()),
            ruleset: &self.ruleset,
        }
    }

    /// Resolve both lanes and settle kill gold, breach rewards and life.
    ///
    /// Kill gold goes to the side whose towers stand in the lane; breach
    /// rewards go to the side whose invader got through.
    pub fn resolve_lanes(&mut self, report: &mut TurnReport) {
        for attacker in Side::BOTH {
            let defender = attacker.opponent();
            let outcome = self.lanes[attacker.index()].step(&self.ruleset);

            self.economies[defender.index()].gold += outcome.strike.gold;
            let ledger = report.side_mut(defender);
            ledger.kill_gold += outcome.strike.gold;
            ledger.kills += outcome.strike.kills;

            if let Some(invader) = outcome.breach {
                self.settle_breach(attacker, &invader, report);
            }
        }
    }

    fn settle_breach(&mut self, attacker: Side, invader: &Invader, report: &mut TurnReport) {
        let defender = attacker.opponent();
        let payout = {
            let economy = &mut self.economies[attacker.index()];
            let payout = self.ruleset.breach.payout(invader, economy.income);
            economy.gold += payout.gold;
            economy.income += payout.income;
            payout
        };
        self.economies[defender.index()].life -= 1;

        let ledger = report.side_mut(attacker);
        ledger.breaches += 1;
        ledger.breach_gold += payout.gold;
        ledger.breach_income += payout.income;
        report.side_mut(defender).life_lost += 1;
    }

    /// Advance the turn counter by one.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
    }

    /// Pay income to both sides on income turns.
    pub fn collect_income(&mut self, report: &mut TurnReport) {
        if !self.ruleset.is_income_turn(self.turn) {
            return;
        }
        for side in Side::BOTH {
            let economy = &mut self.economies[side.index()];
            economy.gold += economy.income;
            report.side_mut(side).income_collected += economy.income;
        }
    }

    /// Grow income and boost cap for both sides on growth turns.
    pub fn grow_economies(&mut self, growth: &dyn Growth, report: &mut TurnReport) {
        if !self.ruleset.is_growth_turn(self.turn) {
            return;
        }
        let step = growth.grow(self.turn);
        for side in Side::BOTH {
            let economy = &mut self.economies[side.index()];
            economy.income += step.income;
            economy.boost_cap += step.boost;
            report.side_mut(side).growth = step;
        }
    }

    /// Validate and apply `side`'s action atomically.
    ///
    /// On success returns the gold change (negative for purchases). On
    /// failure nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] describing the first failed precondition.
    pub fn apply_action(&mut self, side: Side, action: Action) -> Result<i64, Rejection> {
        match action {
            Action::Spawn {
                hp,
                defense,
                stun_res,
            } => self.spawn_invader(side, hp, defense, stun_res),
            Action::Build { kind, pos } => self.build_tower(side, kind, pos),
            Action::Upgrade { pos, stat } => self.upgrade_tower(side, pos, stat),
            Action::Destroy { pos } => self.destroy_tower(side, pos),
        }
    }

    /// Apply an action and describe the result for a report.
    pub fn record_action(&mut self, side: Side, action: Action) -> ActionRecord {
        match self.apply_action(side, action) {
            Ok(gold_delta) => ActionRecord::Applied { action, gold_delta },
            Err(reason) => {
                tracing::debug!(turn = self.turn, %side, %action, %reason, "action rejected");
                ActionRecord::Rejected { action, reason }
            }
        }
    }

    fn spawn_invader(
        &mut self,
        side: Side,
        hp: i32,
        defense: i32,
        stun_res: i32,
    ) -> Result<i64, Rejection> {
        let (hp, defense, stun_res) = (hp.max(0), defense.max(0), stun_res.max(0));
        let economy = &self.economies[side.index()];

        if !self.lanes[side.index()].is_spawn_clear() {
            return Err(Rejection::SpawnBlocked);
        }
        let requested = i64::from(hp) + i64::from(defense) + i64::from(stun_res);
        if requested > economy.boost_cap {
            return Err(Rejection::BoostOverCap {
                requested,
                cap: economy.boost_cap,
            });
        }
        let cost = self.ruleset.invaders.spawn_cost(hp, defense, stun_res);
        if !economy.can_afford(cost) {
            return Err(Rejection::InsufficientGold {
                cost,
                gold: economy.gold,
            });
        }

        let health = self.ruleset.invaders.base_hp.saturating_add(hp);
        self.lanes[side.index()].spawn(Invader::new(health, defense, stun_res));
        self.economies[side.index()].gold -= cost;
        Ok(-cost)
    }

    fn build_tower(&mut self, side: Side, kind: TowerKind, pos: usize) -> Result<i64, Rejection> {
        let lane = &self.lanes[side.opponent().index()];
        let economy = &self.economies[side.index()];

        if pos >= LANE_LEN {
            return Err(Rejection::SlotOutOfRange(pos));
        }
        if lane.tower(pos).is_some() {
            return Err(Rejection::SlotOccupied(pos));
        }
        let cost = economy.build_cost(&self.ruleset);
        if !economy.can_afford(cost) {
            return Err(Rejection::InsufficientGold {
                cost,
                gold: economy.gold,
            });
        }

        let tower = Tower::new(kind, pos, &self.ruleset);
        self.lanes[side.opponent().index()].place_tower(tower);
        let economy = &mut self.economies[side.index()];
        economy.gold -= cost;
        economy.inflation += tower.inflation_contributed;
        Ok(-cost)
    }

    fn upgrade_tower(&mut self, side: Side, pos: usize, stat: Stat) -> Result<i64, Rejection> {
        let economy = &self.economies[side.index()];
        if self.lanes[side.opponent().index()].tower(pos).is_none() {
            return Err(Rejection::NoTower(pos));
        }
        let cost = economy.upgrade_cost(&self.ruleset);
        if !economy.can_afford(cost) {
            return Err(Rejection::InsufficientGold {
                cost,
                gold: economy.gold,
            });
        }

        if let Some(tower) = self.lanes[side.opponent().index()].tower_mut(pos) {
            tower.upgrade(stat, &self.ruleset);
        }
        let economy = &mut self.economies[side.index()];
        economy.gold -= cost;
        economy.inflation += self.ruleset.costs.upgrade_inflation;
        Ok(-cost)
    }

    fn destroy_tower(&mut self, side: Side, pos: usize) -> Result<i64, Rejection> {
        let tower = self.lanes[side.opponent().index()]
            .remove_tower(pos)
            .ok_or(Rejection::NoTower(pos))?;

        let refund = self.ruleset.costs.refund(tower.level);
        let economy = &mut self.economies[side.index()];
        economy.gold += refund;
        economy.inflation -= tower.inflation_contributed;
        Ok(refund)
    }

    /// End the game if the turn cap is reached or either side is out of
    /// life. Once over, the state never changes again.
    pub fn check_game_over(&mut self) {
        if self.over.is_some() {
            return;
        }

        let defeated = [
            self.economies[0].is_defeated(),
            self.economies[1].is_defeated(),
        ];
        let reason = if defeated.contains(&true) {
            EndReason::LifeDepleted
        } else if self.turn >= self.ruleset.max_turns {
            EndReason::TurnLimit
        } else {
            return;
        };

        self.over = Some(GameOver {
            turn: self.turn,
            defeated,
            reason,
        });
    }

    /// Mutable lane access for test setup.
    #[cfg(test)]
    pub(crate) fn lane_mut(&mut self, side: Side) -> &mut Lane {
        &mut self.lanes[side.index()]
    }

    /// Mutable economy access for test setup.
    #[cfg(test)]
    pub(crate) fn economy_mut(&mut self, side: Side) -> &mut Economy {
        &mut self.economies[side.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GrowthLaw;

    fn rich_game() -> GameState {
        let mut game = GameState::new(Ruleset::default());
        for side in Side::BOTH {
            game.economy_mut(side).gold = 10_000;
            game.economy_mut(side).boost_cap = 10;
        }
        game
    }

    #[test]
    fn test_game_state_creation() {
        let game = GameState::new(Ruleset::default());
        assert_eq!(game.turn(), 0);
        assert!(!game.is_over());
        assert_eq!(game.economy(Side::Left).gold(), 500);
        assert_eq!(game.lane(Side::Right).side(), Side::Right);
    }

    #[test]
    fn test_view_orients_lanes() {
        let game = GameState::new(Ruleset::default());
        let view = game.view(Side::Right);
        assert_eq!(view.attacking.side(), Side::Right);
        assert_eq!(view.defending.side(), Side::Left);
        assert_eq!(view.build_cost(), 50);
    }

    #[test]
    fn test_build_on_opponent_lane() {
        let mut game = GameState::new(Ruleset::default());
        let delta = game.apply_action(Side::Left, Action::build(TowerKind::Turret, 50));

        assert_eq!(delta, Ok(-50));
        assert_eq!(game.economy(Side::Left).gold(), 450);
        assert_eq!(game.economy(Side::Left).inflation(), 10);
        let tower = game.lane(Side::Right).tower(50).copied();
        assert_eq!(tower.map(|t| (t.kind(), t.power(), t.range())), Some((TowerKind::Turret, 1, 1)));
        assert!(game.lane(Side::Left).tower(50).is_none());
    }

    #[test]
    fn test_build_rejections() {
        let mut game = GameState::new(Ruleset::default());
        assert_eq!(
            game.apply_action(Side::Left, Action::build(TowerKind::Bomb, LANE_LEN)),
            Err(Rejection::SlotOutOfRange(LANE_LEN))
        );
        game.apply_action(Side::Left, Action::build(TowerKind::Bomb, 5)).unwrap();
        assert_eq!(
            game.apply_action(Side::Left, Action::build(TowerKind::Turret, 5)),
            Err(Rejection::SlotOccupied(5))
        );
        game.economy_mut(Side::Left).gold = 59;
        assert_eq!(
            game.apply_action(Side::Left, Action::build(TowerKind::Turret, 6)),
            Err(Rejection::InsufficientGold { cost: 60, gold: 59 })
        );
        assert_eq!(game.economy(Side::Left).gold(), 59);
    }

    #[test]
    fn test_spawn_checks_and_costs() {
        let mut game = rich_game();
        assert_eq!(
            game.apply_action(Side::Left, Action::spawn(6, 3, 2)),
            Err(Rejection::BoostOverCap { requested: 11, cap: 10 })
        );
        assert_eq!(game.apply_action(Side::Left, Action::spawn(5, 3, 2)), Ok(-(10 + 5 + 30 + 20)));

        let invader = game.lane(Side::Left).invader(0).copied().unwrap();
        assert_eq!(invader.max_health(), 15);
        assert_eq!(invader.defense(), 3);
        assert_eq!(invader.stun_resistance(), 2);

        assert_eq!(
            game.apply_action(Side::Left, Action::spawn(0, 0, 0)),
            Err(Rejection::SpawnBlocked)
        );
    }

    #[test]
    fn test_spawn_clamps_negative_boosts() {
        let mut game = GameState::new(Ruleset::default());
        assert_eq!(game.apply_action(Side::Right, Action::spawn(-5, -1, -9)), Ok(-10));
        let invader = game.lane(Side::Right).invader(0).copied().unwrap();
        assert_eq!(invader.max_health(), 10);
        assert_eq!(invader.defense(), 0);
    }

    #[test]
    fn test_upgrade_and_destroy_refund() {
        let mut game = rich_game();
        game.apply_action(Side::Right, Action::build(TowerKind::Turret, 20)).unwrap();
        // 75 + floor(10 * 1.5)
        assert_eq!(game.apply_action(Side::Right, Action::upgrade(20, Stat::Power)), Ok(-90));
        assert_eq!(game.economy(Side::Right).inflation(), 15);

        let tower = game.lane(Side::Left).tower(20).copied().unwrap();
        assert_eq!(tower.power(), 2);
        assert_eq!(tower.level(), 2);
        assert_eq!(tower.cooldown(), 10);

        // (50 + 75) / 2
        assert_eq!(game.apply_action(Side::Right, Action::destroy(20)), Ok(62));
        assert_eq!(game.economy(Side::Right).inflation(), 0);
        assert!(game.lane(Side::Left).tower(20).is_none());
    }

    #[test]
    fn test_upgrade_and_destroy_need_tower() {
        let mut game = rich_game();
        assert_eq!(
            game.apply_action(Side::Left, Action::upgrade(3, Stat::Range)),
            Err(Rejection::NoTower(3))
        );
        assert_eq!(game.apply_action(Side::Left, Action::destroy(3)), Err(Rejection::NoTower(3)));
        assert_eq!(
            game.apply_action(Side::Left, Action::destroy(usize::MAX)),
            Err(Rejection::NoTower(usize::MAX))
        );
    }

    #[test]
    fn test_kill_gold_goes_to_defender() {
        let mut game = GameState::new(Ruleset::default());
        let mut turret = Tower::new(TowerKind::Turret, 40, game.ruleset());
        turret.cooldown = 0;
        turret.power = 12;
        game.lane_mut(Side::Left).place_tower(turret);
        game.lane_mut(Side::Left).insert_invader(40, Invader::new(10, 0, 0));

        let mut report = TurnReport::new(1);
        game.resolve_lanes(&mut report);

        assert_eq!(game.economy(Side::Right).gold(), 501);
        assert_eq!(game.economy(Side::Left).gold(), 500);
        assert_eq!(report.side(Side::Right).kills, 1);
    }

    #[test]
    fn test_breach_settlement() {
        let mut game = GameState::new(Ruleset::default());
        game.lane_mut(Side::Left).insert_invader(LANE_LEN - 1, Invader::new(10, 0, 0));

        let mut report = TurnReport::new(1);
        game.resolve_lanes(&mut report);

        let attacker = game.economy(Side::Left);
        assert_eq!(attacker.gold(), 510);
        assert_eq!(attacker.income(), 11);
        assert_eq!(game.economy(Side::Right).life(), 99);
        assert_eq!(report.side(Side::Left).breaches, 1);
        assert_eq!(report.side(Side::Right).life_lost, 1);
    }

    #[test]
    fn test_income_and_growth_ticks() {
        let mut game = GameState::new(Ruleset::default());
        let growth = GrowthLaw::default();
        for _ in 0..100 {
            let mut report = TurnReport::new(game.turn() + 1);
            game.advance_turn();
            game.collect_income(&mut report);
            game.grow_economies(&growth, &mut report);
        }

        let economy = game.economy(Side::Left);
        assert_eq!(economy.gold(), 500 + 10 * 10);
        assert_eq!(economy.income(), 13);
        assert_eq!(economy.boost_cap(), 5);
    }

    #[test]
    fn test_game_over_on_turn_limit() {
        let mut game = GameState::new(Ruleset {
            max_turns: 3,
            ..Ruleset::default()
        });
        for _ in 0..3 {
            game.check_game_over();
            assert!(!game.is_over());
            game.advance_turn();
        }
        game.check_game_over();

        let over = game.game_over().copied().unwrap();
        assert_eq!(over.reason, EndReason::TurnLimit);
        assert!(over.is_draw());
    }

    #[test]
    fn test_game_over_both_defeated_is_tie() {
        let mut game = GameState::new(Ruleset::default());
        game.economy_mut(Side::Left).life = 0;
        game.economy_mut(Side::Right).life = -1;
        game.check_game_over();

        let over = game.game_over().copied().unwrap();
        assert_eq!(over.reason, EndReason::LifeDepleted);
        assert_eq!(over.defeated, [true, true]);
        assert_eq!(over.winner(), None);
    }

    #[test]
    fn test_single_defeat_names_winner() {
        let mut game = GameState::new(Ruleset::default());
        game.economy_mut(Side::Right).life = 0;
        game.check_game_over();
        assert_eq!(game.game_over().and_then(GameOver::winner), Some(Side::Left));
    }
}
