//! 거래소 커넥터.

mod oanda;

pub use oanda::OandaV20Client;
