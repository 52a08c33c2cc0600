mod money;
mod theme;
mod transaction;
mod views;

pub use money::*;
pub use theme::*;
pub use transaction::*;
pub use views::*;
