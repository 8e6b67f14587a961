pub mod config_ops;
pub mod snapshot_ops;
