// Library exports for besthit
pub mod best_hit;
pub mod error;
pub mod histogram;
pub mod record;
pub mod table;
