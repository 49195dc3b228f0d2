//! Data administration for an advertising agency.
//!
//! Campaigns group ads; ads appear on web pages and are hired by clients.
//! Every record is kept in one SQL store behind [`AgencyService`], and no
//! record can be deleted while another still references it.

pub mod model;
pub mod record;
pub mod service;

mod store_impls;
mod validate;

pub use service::AgencyService;
pub use service::AgencyConfig;
pub use service::ad::{AdFilters, CreateAdInput};
pub use service::appearance::{AppearanceFilters, CreateAppearanceInput};
pub use service::campaign::CreateCampaignInput;
pub use service::catalog::CatalogInput;
pub use service::client::{ClientFilters, CreateClientInput};
pub use service::hiring::{CreateHiringInput, HiringFilters};
pub use service::web_page::{CreateWebPageInput, WebPageFilters};
