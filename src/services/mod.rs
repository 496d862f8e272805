pub mod format_service;
pub mod label_service;
pub mod order_service;
pub mod publish_service;
