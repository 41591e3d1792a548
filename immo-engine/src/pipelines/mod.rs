pub mod asset_detection;
