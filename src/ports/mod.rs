pub mod hotel_search;
pub mod inventory_provider;
