//! 도메인 타입.

pub mod market;
pub mod outcome;
pub mod records;

pub use market::{InvestorCategory, MarketSegment};
pub use outcome::QueryOutcome;
pub use records::{Fundamental, InvestorFlow, ProgramTrading, ShortInterest, StockSnapshot};
