mod ad;
mod appearance;
mod campaign;
mod catalog;
mod client;
mod date_range;
mod hiring;
mod money;
mod web_page;

pub use ad::*;
pub use appearance::*;
pub use campaign::*;
pub use catalog::*;
pub use client::*;
pub use date_range::*;
pub use hiring::*;
pub use money::*;
pub use web_page::*;

/// Maximum length of the unique `name` of catalog entries and campaigns.
pub const NAME_MAX_LEN: usize = 50;

/// Maximum length of catalog descriptions.
pub const DESCRIPTION_MAX_LEN: usize = 150;
