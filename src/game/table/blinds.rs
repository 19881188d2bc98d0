//! Blind posting.
//!
//! Blind seats are fixed offsets from the button: small blind one seat
//! after, big blind two. Short stacks post what they have and are
//! all-in; the table bet to match is the larger of the two actual
//! posts, so a short big blind cannot leave the bet below a live
//! small-blind chip count.

use super::Table;
use crate::game::events::TableEvent;

impl Table {
    pub(crate) fn post_blinds(&mut self) {
        let n = self.hand_order.len();
        let sb_pos = (self.dealer_pos + 1) % n;
        let bb_pos = (self.dealer_pos + 2) % n;

        let small_blind = self.config.small_blind;
        let big_blind = self.config.big_blind;

        let sb_posted = self.player_at_mut(sb_pos).place_bet(small_blind);
        let bb_posted = self.player_at_mut(bb_pos).place_bet(big_blind);
        self.pot += sb_posted + bb_posted;

        self.current_bet = sb_posted.max(bb_posted);
        self.min_raise = big_blind;

        let sb_player = self.player_at(sb_pos).id.clone();
        let bb_player = self.player_at(bb_pos).id.clone();
        tracing::debug!(
            table = %self.table_id,
            %sb_player,
            sb_posted,
            %bb_player,
            bb_posted,
            "blinds posted"
        );

        self.broadcast(TableEvent::BlindsPosted {
            small_blind_player: sb_player,
            small_blind_amount: sb_posted,
            big_blind_player: bb_player,
            big_blind_amount: bb_posted,
            pot: self.pot,
        });
    }
}
