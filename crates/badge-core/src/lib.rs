#![cfg_attr(not(test), no_std)]

//! Badge rendering core: a QR code with its caption flowed beside it.

pub mod caption;
pub mod layout;
pub mod metrics;
pub mod qr;
pub mod scene;
