pub mod checkout;
pub mod menu;
pub mod orders;
