//! Action layer: owns the whole game state and executes one action at a time.
//!
//! The host serializes actions, so there is no internal locking. Every action
//! validates and derives first, then commits in a final section that cannot
//! fail: a rejected action leaves no trace, including the epoch rollover it
//! would have performed. Token movements go through the [`TokenLedger`]
//! collaborator and are ordered last among the fallible steps, so a ledger
//! refusal also aborts cleanly.

use std::collections::{BTreeMap, BTreeSet};

use burrow_types::{
    Address, Board, EngineError, EpochState, Event, LimitConfig, LockedRewards, Player,
    PlayerView, PurchaseConfig, PurchaseResult, RaceConfig, RoundId, RoundRecord, RoundResult,
    ScoreRules, TokenKind, VestingConfig,
};
use tracing::{debug, info};

use crate::board;
use crate::entropy::{derive_dice, mix_entropy, SEED_LEN};
use crate::epoch::EpochScheduler;
use crate::quota::{consume_play, refreshed_daily_plays, refreshed_weekly_purchases};
use crate::vesting::{
    accrue, recognize_matured, unlock as release_week, validate_unlock_batch,
    validate_unlock_week,
};

/// External token accounting the engine instructs but does not own.
pub trait TokenLedger {
    fn balance(&self, address: &Address, kind: TokenKind) -> u64;

    /// Pay out `amount` from the engine's treasury to `to`.
    fn transfer(
        &mut self,
        to: &Address,
        kind: TokenKind,
        amount: u64,
    ) -> Result<(), EngineError>;

    /// Move `amount` between two external accounts.
    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        kind: TokenKind,
        amount: u64,
    ) -> Result<(), EngineError>;
}

/// Per-action ambient inputs supplied by the host.
#[derive(Clone, Debug)]
pub struct ActionContext {
    pub sender: Address,
    /// Wall-clock seconds.
    pub now: u64,
    /// Block height the action executes at.
    pub height: u64,
    /// Per-height random seed; `None` until revealed for this height.
    pub seed: Option<[u8; SEED_LEN]>,
}

/// The game engine: configuration, per-address state, round history, and the
/// rolling epoch.
pub struct Engine {
    board: Board,
    limits: LimitConfig,
    purchase: PurchaseConfig,
    vesting: VestingConfig,
    score_rules: Option<ScoreRules>,
    race: Option<RaceConfig>,
    epoch: Option<EpochState>,
    managers: BTreeSet<Address>,
    treasury: Address,
    players: BTreeMap<Address, Player>,
    rounds: BTreeMap<RoundId, RoundRecord>,
    ledgers: BTreeMap<Address, LockedRewards>,
    events: Vec<Event>,
}

impl Engine {
    /// Create an engine with default configuration. `admin` is the first
    /// manager and the treasury account purchases pay into.
    pub fn new(admin: Address) -> Self {
        let mut managers = BTreeSet::new();
        managers.insert(admin.clone());
        Self {
            board: Board::default(),
            limits: LimitConfig::default(),
            purchase: PurchaseConfig::default(),
            vesting: VestingConfig::default(),
            score_rules: None,
            race: None,
            epoch: None,
            managers,
            treasury: admin,
            players: BTreeMap::new(),
            rounds: BTreeMap::new(),
            ledgers: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    /// Drain events emitted since the last call, in emission order.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn ensure_manager(&self, sender: &Address) -> Result<(), EngineError> {
        if self.managers.contains(sender) {
            Ok(())
        } else {
            Err(EngineError::PermissionDenied(
                "sender is not a manager".into(),
            ))
        }
    }

    /// Current epoch advanced to `now`, without committing the rollover.
    fn touched_epoch(&self, now: u64) -> Result<EpochState, EngineError> {
        let race = self
            .race
            .as_ref()
            .ok_or_else(|| EngineError::InvalidState("race window not configured".into()))?;
        let state = self
            .epoch
            .ok_or_else(|| EngineError::InvalidState("race window not configured".into()))?;
        Ok(EpochScheduler::new(race).touch(&state, now))
    }

    // ---- configuration -----------------------------------------------------

    /// Configure (or reconfigure) the race window. The first call seeds the
    /// epoch; later calls rebase it onto the new window, keeping the week.
    pub fn configure_race(
        &mut self,
        ctx: &ActionContext,
        config: RaceConfig,
    ) -> Result<(), EngineError> {
        self.ensure_manager(&ctx.sender)?;
        config
            .validate()
            .map_err(|e| EngineError::InvalidArgument(e.into()))?;

        let epoch = match (&self.race, self.epoch) {
            (Some(old), Some(state)) if old.game_secs() > 0 => {
                EpochScheduler::new(old).rebase(&state, &config)
            }
            _ => EpochState::seed(&config),
        };
        info!(
            begin = config.begin,
            game_hours = config.game_hours,
            week = epoch.week,
            "race window configured"
        );
        self.race = Some(config);
        self.epoch = Some(epoch);
        Ok(())
    }

    pub fn set_score_rules(
        &mut self,
        ctx: &ActionContext,
        rules: ScoreRules,
    ) -> Result<(), EngineError> {
        self.ensure_manager(&ctx.sender)?;
        rules
            .validate()
            .map_err(|e| EngineError::InvalidArgument(e.into()))?;
        self.score_rules = Some(rules);
        Ok(())
    }

    pub fn set_limit_config(
        &mut self,
        ctx: &ActionContext,
        limits: LimitConfig,
    ) -> Result<(), EngineError> {
        self.ensure_manager(&ctx.sender)?;
        limits
            .validate()
            .map_err(|e| EngineError::InvalidArgument(e.into()))?;
        self.limits = limits;
        Ok(())
    }

    pub fn set_purchase_config(
        &mut self,
        ctx: &ActionContext,
        purchase: PurchaseConfig,
    ) -> Result<(), EngineError> {
        self.ensure_manager(&ctx.sender)?;
        purchase
            .validate()
            .map_err(|e| EngineError::InvalidArgument(e.into()))?;
        self.purchase = purchase;
        Ok(())
    }

    pub fn set_board(&mut self, ctx: &ActionContext, board: Board) -> Result<(), EngineError> {
        self.ensure_manager(&ctx.sender)?;
        self.board = board;
        Ok(())
    }

    pub fn add_manager(
        &mut self,
        ctx: &ActionContext,
        manager: Address,
    ) -> Result<(), EngineError> {
        self.ensure_manager(&ctx.sender)?;
        self.managers.insert(manager);
        Ok(())
    }

    // ---- actions -----------------------------------------------------------

    /// Resolve one play for the sender.
    ///
    /// A `dice_count` of zero is normalized to one die; above the maximum it
    /// is rejected. `reset_position` zeroes the position before movement.
    pub fn play<L: TokenLedger>(
        &mut self,
        ctx: &ActionContext,
        ledger: &L,
        round_id: RoundId,
        dice_count: u8,
        reset_position: bool,
    ) -> Result<RoundResult, EngineError> {
        if dice_count > burrow_types::MAX_DICE_COUNT {
            return Err(EngineError::InvalidArgument(format!(
                "dice count must be at most {} (got {})",
                burrow_types::MAX_DICE_COUNT,
                dice_count
            )));
        }
        let dice_count = dice_count.max(1);
        if self.rounds.contains_key(&round_id) {
            return Err(EngineError::InvalidArgument(format!(
                "round {:?} already resolved",
                round_id
            )));
        }
        let epoch = self.touched_epoch(ctx.now)?;
        let seed = ctx
            .seed
            .ok_or_else(|| EngineError::NotReady(format!("no seed at height {}", ctx.height)))?;

        let mut player = self
            .players
            .get(&ctx.sender)
            .cloned()
            .unwrap_or_default();
        let has_pass = ledger.balance(&ctx.sender, TokenKind::Pass) > 0;
        player.daily_plays = refreshed_daily_plays(&player, &self.limits, ctx.now, has_pass);
        consume_play(&mut player)?;

        let entropy = mix_entropy(&seed, &round_id);
        let dice = derive_dice(&entropy, dice_count)?;
        let start = if reset_position { 0 } else { player.position };
        let resolved = board::resolve(
            &entropy,
            &dice,
            start,
            &self.board,
            self.score_rules.as_ref(),
            ctx.now,
        );

        player.position = resolved.end_position;
        player.sum_scores = player.sum_scores.saturating_add(resolved.score);
        player.last_play_ts = Some(ctx.now);
        player.last_height = ctx.height;

        let mut rewards = self
            .ledgers
            .get(&ctx.sender)
            .cloned()
            .unwrap_or_default();
        accrue(
            &mut rewards,
            epoch.week,
            resolved.score,
            epoch.settle_begin,
            self.vesting.lock_secs,
        );
        let weekly_accrued = rewards
            .get(epoch.week)
            .map(|entry| entry.amount)
            .unwrap_or(0);
        let recognized = recognize_matured(&mut rewards, ctx.now);
        player.locked_total = player.locked_total.saturating_add(recognized);

        // All fallible steps passed; commit.
        debug!(
            player = ?ctx.sender,
            ?round_id,
            ?dice,
            end = resolved.end_position,
            score = resolved.score,
            week = epoch.week,
            "round resolved"
        );
        self.epoch = Some(epoch);
        self.rounds.insert(
            round_id,
            RoundRecord {
                player: ctx.sender.clone(),
                requested_at: ctx.now,
                dice: dice.clone(),
                start_position: resolved.start_position,
                end_position: resolved.end_position,
                cell: resolved.cell,
                score: resolved.score,
                height: ctx.height,
            },
        );
        self.events.push(Event::RoundResolved {
            round_id,
            player: ctx.sender.clone(),
            dice: dice.clone(),
            start_position: resolved.start_position,
            end_position: resolved.end_position,
            cell: resolved.cell,
            score: resolved.score,
            week: epoch.week,
            weekly_accrued,
            locked_total: player.locked_total,
            purchased_chances: player.purchased_chances,
            height: ctx.height,
        });
        self.ledgers.insert(ctx.sender.clone(), rewards);
        self.players.insert(ctx.sender.clone(), player);

        Ok(RoundResult {
            start_position: resolved.start_position,
            end_position: resolved.end_position,
            cell: resolved.cell,
            score: resolved.score,
            dice,
            week: epoch.week,
        })
    }

    /// Buy `count` extra chances against the weekly allowance.
    pub fn purchase_chance<L: TokenLedger>(
        &mut self,
        ctx: &ActionContext,
        ledger: &mut L,
        count: u32,
    ) -> Result<PurchaseResult, EngineError> {
        if count == 0 {
            return Err(EngineError::InvalidArgument(
                "purchase count must be greater than zero".into(),
            ));
        }
        let epoch = self.touched_epoch(ctx.now)?;
        if self.purchase.unit_price == 0 {
            return Err(EngineError::InvalidState(
                "purchasing is disabled (unit price is zero)".into(),
            ));
        }

        let mut player = self
            .players
            .get(&ctx.sender)
            .cloned()
            .unwrap_or_default();
        let allowance = refreshed_weekly_purchases(&player, &self.purchase, epoch.window_begin);
        if count > allowance {
            return Err(EngineError::QuotaExceeded(format!(
                "weekly purchase allowance is {} (requested {})",
                allowance, count
            )));
        }

        let total_cost = self.purchase.unit_price.saturating_mul(count as u64);
        let available = ledger.balance(&ctx.sender, TokenKind::Reward);
        if available < total_cost {
            return Err(EngineError::InsufficientBalance {
                needed: total_cost,
                available,
            });
        }
        ledger.transfer_from(&ctx.sender, &self.treasury, TokenKind::Reward, total_cost)?;

        player.weekly_purchases_remaining = allowance - count;
        player.purchased_chances = player.purchased_chances.saturating_add(count);
        player.last_purchase_ts = Some(ctx.now);

        debug!(
            player = ?ctx.sender,
            count,
            total_cost,
            remaining = player.weekly_purchases_remaining,
            "chances purchased"
        );
        let result = PurchaseResult {
            total_cost,
            remaining_quota: player.weekly_purchases_remaining,
        };
        self.epoch = Some(epoch);
        self.events.push(Event::ChancePurchased {
            player: ctx.sender.clone(),
            count,
            total_cost,
            purchased_chances: player.purchased_chances,
            remaining_quota: player.weekly_purchases_remaining,
        });
        self.players.insert(ctx.sender.clone(), player);
        Ok(result)
    }

    /// Release one player's locked reward for a settled week.
    pub fn unlock<L: TokenLedger>(
        &mut self,
        ctx: &ActionContext,
        ledger: &mut L,
        address: &Address,
        week: u32,
    ) -> Result<(), EngineError> {
        self.batch_unlock(ctx, ledger, std::slice::from_ref(address), week)
    }

    /// Release locked rewards for a settled week across up to twenty
    /// addresses. Addresses without a releasable entry are skipped silently.
    pub fn batch_unlock<L: TokenLedger>(
        &mut self,
        ctx: &ActionContext,
        ledger: &mut L,
        addresses: &[Address],
        week: u32,
    ) -> Result<(), EngineError> {
        self.ensure_manager(&ctx.sender)?;
        validate_unlock_batch(addresses.len())?;
        let epoch = self.touched_epoch(ctx.now)?;
        validate_unlock_week(week, epoch.week)?;

        // Stage the payable entries read-only (deduplicating repeated
        // addresses), then move all funds. Release flags and events commit
        // only once every transfer has succeeded, so a ledger refusal leaves
        // every entry payable and emits nothing.
        let mut payouts: BTreeMap<&Address, u64> = BTreeMap::new();
        for address in addresses {
            let Some(rewards) = self.ledgers.get(address) else {
                continue;
            };
            match rewards.get(week) {
                Some(entry) if !entry.released => {
                    payouts.entry(address).or_insert(entry.amount);
                }
                _ => {}
            }
        }
        for (address, amount) in &payouts {
            ledger.transfer(address, TokenKind::Reward, *amount)?;
        }

        for (address, amount) in payouts {
            if let Some(rewards) = self.ledgers.get_mut(address) {
                release_week(rewards, week);
            }
            debug!(player = ?address, week, amount, "reward unlocked");
            self.events.push(Event::RewardUnlocked {
                player: address.clone(),
                week,
                amount,
            });
        }
        self.epoch = Some(epoch);
        Ok(())
    }

    // ---- queries -----------------------------------------------------------

    /// Live view of a player's state, with quota and maturity derived as of
    /// `ctx.now` without mutating anything.
    pub fn player<L: TokenLedger>(&self, ctx: &ActionContext, ledger: &L, address: &Address) -> PlayerView {
        let player = self.players.get(address).cloned().unwrap_or_default();
        let has_pass = ledger.balance(address, TokenKind::Pass) > 0;
        let epoch = self.touched_epoch(ctx.now).ok();

        let plays_remaining = refreshed_daily_plays(&player, &self.limits, ctx.now, has_pass);
        let weekly_purchases_remaining = epoch
            .map(|e| refreshed_weekly_purchases(&player, &self.purchase, e.window_begin))
            .unwrap_or(player.weekly_purchases_remaining);
        let pending_matured: u64 = self
            .ledgers
            .get(address)
            .map(|rewards| {
                rewards
                    .iter()
                    .filter(|e| !e.recognized && !e.released && e.is_matured(ctx.now))
                    .fold(0u64, |acc, e| acc.saturating_add(e.amount))
            })
            .unwrap_or(0);

        PlayerView {
            position: player.position,
            plays_remaining,
            purchased_chances: player.purchased_chances,
            weekly_purchases_remaining,
            sum_scores: player.sum_scores,
            locked_total: player.locked_total.saturating_add(pending_matured),
            week: epoch.map(|e| e.week).unwrap_or(0),
            has_pass,
        }
    }

    /// Look up a resolved round by its identifier.
    pub fn round(&self, id: &RoundId) -> Result<&RoundRecord, EngineError> {
        self.rounds
            .get(id)
            .ok_or_else(|| EngineError::NotFound(format!("round {:?}", id)))
    }

    /// The epoch as it stands at `now`, including any pending rollover.
    pub fn epoch(&self, now: u64) -> Result<EpochState, EngineError> {
        self.touched_epoch(now)
    }

    /// The locked-reward ledger for `address`, if any rounds accrued.
    pub fn locked_rewards(&self, address: &Address) -> Option<&LockedRewards> {
        self.ledgers.get(address)
    }
}
