use common::Trade;

/// Long-only, single-slot position tracker.
///
/// `enter` only succeeds from `Flat` and `exit` only from `Holding`, so at most
/// one position is open at any time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PositionState {
    #[default]
    Flat,
    Holding { time: i64, price: f64 },
}

impl PositionState {
    pub fn is_holding(&self) -> bool {
        matches!(self, PositionState::Holding { .. })
    }

    /// Open a position. Returns `false` (and changes nothing) when already holding.
    pub fn enter(&mut self, time: i64, price: f64) -> bool {
        match self {
            PositionState::Flat => {
                *self = PositionState::Holding { time, price };
                true
            }
            PositionState::Holding { .. } => false,
        }
    }

    /// Close the open position and return the resulting trade.
    /// Returns `None` (and changes nothing) when flat.
    pub fn exit(&mut self, time: i64, price: f64) -> Option<Trade> {
        match *self {
            PositionState::Flat => None,
            PositionState::Holding { time: buy_time, price: buy_price } => {
                *self = PositionState::Flat;
                Some(Trade {
                    buy_time,
                    sell_time: time,
                    buy_price,
                    sell_price: price,
                    percentage_change: (price - buy_price) / buy_price * 100.0,
                })
            }
        }
    }
}
