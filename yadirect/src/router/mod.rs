pub mod bids;
pub mod campaigns;
pub mod dispatch;
pub mod paginate;
pub mod reports;

pub mod util;
