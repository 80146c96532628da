pub mod bar;
pub mod metrics;
pub mod pair;
pub mod request_params;
