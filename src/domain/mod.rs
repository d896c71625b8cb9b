pub mod catalog;
pub mod identity;
pub mod money;
pub mod order;
pub mod payment;
pub mod ports;
pub mod wallet;
