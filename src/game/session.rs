//! Matching-game session state machine.
//!
//! ## Lifecycle
//!
//! `Playing -> Finished` when the countdown reaches zero, or
//! `Playing -> Revealed` on an explicit reveal. Both terminal phases stay
//! terminal until `reset` deals a new round.
//!
//! ## Card accounting
//!
//! Every description card lives in exactly one place: the shuffled `pool`
//! of not-yet-placed cards, or the match list of the colleague it was
//! dropped onto. Drops are recorded without judgment; whether a placement
//! was right is settled entirely at scoring time.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Colleague, ColleagueId, DescriptionCard, GameRng};

/// Session phase, governing which actions are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Cards can be dropped; the countdown is running.
    Playing,
    /// The countdown hit zero; the score has been computed.
    Finished,
    /// The answer key is shown; matches hold the ground truth.
    Revealed,
}

/// Session tunables.
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    /// Round duration in seconds.
    pub round_seconds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { round_seconds: 35 }
    }
}

/// A single game session.
///
/// Pure state machine: every operation mutates only the session itself.
/// I/O (fetching the roster, scheduling ticks) belongs to the composition
/// layer.
pub struct GameSession {
    colleagues: Vec<Colleague>,
    pool: Vec<DescriptionCard>,
    matches: FxHashMap<ColleagueId, Vec<DescriptionCard>>,
    score: u32,
    time_remaining: u32,
    total_descriptions: u32,
    phase: Phase,
    epoch: u64,
    config: SessionConfig,
    rng: GameRng,
}

impl GameSession {
    /// Create a session and deal the first round.
    #[must_use]
    pub fn new(colleagues: Vec<Colleague>, config: SessionConfig, rng: GameRng) -> Self {
        let mut session = Self {
            colleagues: Vec::new(),
            pool: Vec::new(),
            matches: FxHashMap::default(),
            score: 0,
            time_remaining: 0,
            total_descriptions: 0,
            phase: Phase::Playing,
            epoch: 0,
            config,
            rng,
        };
        session.initialize(colleagues);
        session
    }

    /// Rebuild the session from a colleague set.
    ///
    /// The pool becomes a shuffled permutation of every description tagged
    /// with its owning colleague; matches, score, and the countdown reset.
    /// Every description appears exactly once in the pool afterwards.
    /// Bumping the epoch makes ticks from any previously armed timer inert.
    pub fn initialize(&mut self, colleagues: Vec<Colleague>) {
        let mut pool: Vec<DescriptionCard> = colleagues
            .iter()
            .flat_map(DescriptionCard::for_colleague)
            .collect();
        self.rng.shuffle(&mut pool);

        self.total_descriptions = pool.len() as u32;
        self.pool = pool;
        self.colleagues = colleagues;
        self.matches = FxHashMap::default();
        self.score = 0;
        self.time_remaining = self.config.round_seconds;
        self.phase = Phase::Playing;
        self.epoch += 1;
    }

    /// Re-deal with the last-known colleague set.
    pub fn reset(&mut self) {
        let colleagues = std::mem::take(&mut self.colleagues);
        self.initialize(colleagues);
    }

    // === Countdown ===

    /// Advance the countdown by one elapsed second.
    ///
    /// Returns `true` while further ticks should be scheduled. When the
    /// clock would go below zero it clamps to zero and the round finishes.
    /// Outside `Playing` this is a no-op.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        if self.time_remaining <= 1 {
            self.time_remaining = 0;
            self.end_game();
            return false;
        }
        self.time_remaining -= 1;
        true
    }

    /// Epoch-guarded tick for timer tasks.
    ///
    /// A task armed before a re-initialization carries a stale epoch and
    /// must not touch the newer round's clock.
    pub fn tick_current(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.tick()
    }

    // === Matching ===

    /// Drop a card onto a colleague's target area.
    ///
    /// Removes exactly one pool card with equal content and appends it to
    /// the target's match list. Whether the placement is *correct* is not
    /// judged here. Returns `false` when the session is not in `Playing`
    /// or no pooled card matches (dropping on an empty pool is a no-op).
    pub fn drop_card(&mut self, target: ColleagueId, card: &DescriptionCard) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(pos) = self.pool.iter().position(|c| c.content == card.content) else {
            return false;
        };
        let card = self.pool.remove(pos);
        self.matches.entry(target).or_default().push(card);
        true
    }

    /// Drop a serialized drag payload onto a colleague.
    ///
    /// The payload must parse as a typed card; malformed transfers are
    /// rejected without touching session state.
    pub fn drop_payload(
        &mut self,
        target: ColleagueId,
        payload: &str,
    ) -> Result<bool, serde_json::Error> {
        let card = DescriptionCard::from_payload(payload)?;
        Ok(self.drop_card(target, &card))
    }

    // === Terminal transitions ===

    /// Finish the round and compute the score.
    ///
    /// A matched card counts when its content appears in the description
    /// list of the colleague it was dropped onto. This is membership in the
    /// drop target's own list, not origin-id equality: a card from
    /// colleague A dropped onto colleague B scores only if B happens to
    /// carry the identical description string.
    pub fn end_game(&mut self) {
        self.phase = Phase::Finished;
        self.score = self.compute_score();
    }

    fn compute_score(&self) -> u32 {
        self.matches
            .iter()
            .map(|(target, cards)| {
                let Some(colleague) = self.colleagues.iter().find(|c| c.id == *target) else {
                    return 0;
                };
                cards
                    .iter()
                    .filter(|card| colleague.descriptions.iter().any(|d| *d == card.content))
                    .count() as u32
            })
            .sum()
    }

    /// Show the answer key: every colleague mapped to all of its own cards.
    ///
    /// Distinct from scoring; the score keeps whatever value it had.
    pub fn reveal(&mut self) {
        self.phase = Phase::Revealed;
        self.pool.clear();
        self.matches = self
            .colleagues
            .iter()
            .map(|c| (c.id, DescriptionCard::for_colleague(c).collect()))
            .collect();
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Count of all description strings across the roster.
    #[must_use]
    pub fn total_descriptions(&self) -> u32 {
        self.total_descriptions
    }

    /// Initialization counter; bumped on every deal.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Not-yet-placed cards, in shuffled order.
    #[must_use]
    pub fn pool(&self) -> &[DescriptionCard] {
        &self.pool
    }

    /// Cards dropped onto a colleague so far.
    #[must_use]
    pub fn matches_for(&self, id: ColleagueId) -> &[DescriptionCard] {
        self.matches.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The roster this session was dealt from.
    #[must_use]
    pub fn colleagues(&self) -> &[Colleague] {
        &self.colleagues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colleague(id: i64, name: &str, descriptions: &[&str]) -> Colleague {
        Colleague {
            id: ColleagueId::new(id),
            name: name.to_string(),
            photo: String::new(),
            descriptions: descriptions.iter().map(|d| (*d).to_string()).collect(),
        }
    }

    fn session() -> GameSession {
        GameSession::new(
            vec![
                colleague(1, "Alex", &["A", "B"]),
                colleague(2, "Sam", &["C"]),
            ],
            SessionConfig::default(),
            GameRng::new(42),
        )
    }

    #[test]
    fn test_initialize_deals_every_description_once() {
        let session = session();

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.total_descriptions(), 3);
        assert_eq!(session.pool().len(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_remaining(), 35);

        let mut contents: Vec<_> = session.pool().iter().map(|c| c.content.clone()).collect();
        contents.sort();
        assert_eq!(contents, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_initialize_empty_roster() {
        let session = GameSession::new(vec![], SessionConfig::default(), GameRng::new(42));

        assert_eq!(session.total_descriptions(), 0);
        assert!(session.pool().is_empty());
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_drop_moves_exactly_one_card() {
        let mut session = session();
        let card = DescriptionCard::new(ColleagueId::new(1), "A");

        assert!(session.drop_card(ColleagueId::new(1), &card));

        assert_eq!(session.pool().len(), 2);
        assert!(session.pool().iter().all(|c| c.content != "A"));
        assert_eq!(session.matches_for(ColleagueId::new(1)).len(), 1);
        assert_eq!(session.matches_for(ColleagueId::new(1))[0].content, "A");
    }

    #[test]
    fn test_drop_unknown_content_is_noop() {
        let mut session = session();
        let card = DescriptionCard::new(ColleagueId::new(1), "missing");

        assert!(!session.drop_card(ColleagueId::new(1), &card));
        assert_eq!(session.pool().len(), 3);
    }

    #[test]
    fn test_drop_on_empty_pool_is_noop() {
        let mut session = GameSession::new(vec![], SessionConfig::default(), GameRng::new(42));
        let card = DescriptionCard::new(ColleagueId::new(1), "A");

        assert!(!session.drop_card(ColleagueId::new(1), &card));
    }

    #[test]
    fn test_drop_outside_playing_is_rejected() {
        let mut session = session();
        session.end_game();

        let card = DescriptionCard::new(ColleagueId::new(1), "A");
        assert!(!session.drop_card(ColleagueId::new(1), &card));
        assert_eq!(session.pool().len(), 3);
    }

    #[test]
    fn test_end_game_scores_target_membership() {
        let mut session = session();
        let card = DescriptionCard::new(ColleagueId::new(1), "A");
        session.drop_card(ColleagueId::new(1), &card);

        session.end_game();

        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_misplaced_card_does_not_score() {
        let mut session = session();
        let card = DescriptionCard::new(ColleagueId::new(1), "A");
        session.drop_card(ColleagueId::new(2), &card);

        session.end_game();

        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_shared_description_scores_on_either_target() {
        // Two colleagues carrying an identical description string: a card
        // that originated with one still scores when dropped on the other,
        // because scoring checks content membership in the target's list.
        let mut session = GameSession::new(
            vec![
                colleague(1, "Alex", &["shared"]),
                colleague(2, "Sam", &["shared"]),
            ],
            SessionConfig::default(),
            GameRng::new(42),
        );

        let card = DescriptionCard::new(ColleagueId::new(1), "shared");
        session.drop_card(ColleagueId::new(2), &card);
        session.end_game();

        assert_eq!(session.score(), 1);
    }

    #[test]
    fn test_score_is_deterministic_from_matches() {
        let mut session = session();
        for content in ["A", "B", "C"] {
            let card = DescriptionCard::new(ColleagueId::new(1), content);
            session.drop_card(ColleagueId::new(1), &card);
        }

        session.end_game();

        // "A" and "B" belong to colleague 1; "C" does not.
        assert_eq!(session.score(), 2);
        assert!(session.score() <= session.total_descriptions());
    }

    #[test]
    fn test_tick_counts_down() {
        let mut session = session();

        assert!(session.tick());
        assert_eq!(session.time_remaining(), 34);
        assert_eq!(session.phase(), Phase::Playing);
    }

    #[test]
    fn test_tick_to_zero_finishes() {
        let mut session = GameSession::new(
            vec![colleague(1, "Alex", &["A"])],
            SessionConfig { round_seconds: 2 },
            GameRng::new(42),
        );

        assert!(session.tick());
        assert!(!session.tick());

        assert_eq!(session.time_remaining(), 0);
        assert_eq!(session.phase(), Phase::Finished);
    }

    #[test]
    fn test_tick_outside_playing_is_noop() {
        let mut session = session();
        session.reveal();

        assert!(!session.tick());
        assert_eq!(session.time_remaining(), 35);
    }

    #[test]
    fn test_stale_epoch_tick_is_inert() {
        let mut session = session();
        let stale = session.epoch();

        session.reset(); // bumps the epoch

        assert!(!session.tick_current(stale));
        assert_eq!(session.time_remaining(), 35);

        assert!(session.tick_current(session.epoch()));
        assert_eq!(session.time_remaining(), 34);
    }

    #[test]
    fn test_reveal_restores_ground_truth() {
        let mut session = session();
        let card = DescriptionCard::new(ColleagueId::new(1), "A");
        session.drop_card(ColleagueId::new(2), &card);

        session.reveal();

        assert_eq!(session.phase(), Phase::Revealed);
        assert!(session.pool().is_empty());

        let alex: Vec<_> = session
            .matches_for(ColleagueId::new(1))
            .iter()
            .map(|c| c.content.clone())
            .collect();
        assert_eq!(alex, vec!["A", "B"]);

        let sam: Vec<_> = session
            .matches_for(ColleagueId::new(2))
            .iter()
            .map(|c| c.content.clone())
            .collect();
        assert_eq!(sam, vec!["C"]);
    }

    #[test]
    fn test_reset_deals_a_new_round() {
        let mut session = session();
        let card = DescriptionCard::new(ColleagueId::new(1), "A");
        session.drop_card(ColleagueId::new(1), &card);
        session.end_game();

        session.reset();

        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.pool().len(), 3);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_remaining(), 35);
        assert!(session.matches_for(ColleagueId::new(1)).is_empty());
    }

    #[test]
    fn test_drop_payload_parses_and_drops() {
        let mut session = session();
        let payload = r#"{"colleague_id":1,"content":"A"}"#;

        assert!(session.drop_payload(ColleagueId::new(1), payload).unwrap());
        assert_eq!(session.pool().len(), 2);
    }

    #[test]
    fn test_drop_payload_rejects_malformed() {
        let mut session = session();

        assert!(session.drop_payload(ColleagueId::new(1), "garbage").is_err());
        assert_eq!(session.pool().len(), 3);
    }
}
