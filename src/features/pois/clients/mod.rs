mod poi_store_client;

pub use poi_store_client::PoiStoreClient;
