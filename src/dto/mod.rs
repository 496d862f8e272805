pub mod labels;
pub mod qr_codes;
