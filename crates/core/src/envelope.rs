/// Frame counter. Tick 0 is the state before the first step.
pub type Tick = u64;
pub type PlayerId = u8;
pub type ActionId = u64;

/// A player input tagged with the frame it should be applied on.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionEnvelope<A> {
    pub player_id: PlayerId,
    pub action_id: ActionId,
    pub intended_tick: Tick,
    pub payload: A,
}

impl<A> ActionEnvelope<A> {
    pub fn new(player_id: PlayerId, action_id: ActionId, intended_tick: Tick, payload: A) -> Self {
        Self {
            player_id,
            action_id,
            intended_tick,
            payload,
        }
    }

    /// Ordering key used when several inputs land on the same frame.
    pub fn order_key(&self) -> (PlayerId, ActionId) {
        (self.player_id, self.action_id)
    }
}
