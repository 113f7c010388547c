#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Checkout forms for a terminal shopping cart.
//!
//! [`checkout`] holds the delivery and card payment controllers. They validate
//! fields against declarative rule tables ([`form`]), guard against duplicate
//! submissions, write validated records to an injected [`order::OrderState`],
//! and place the order through a [`purchase::PurchaseApi`]. [`tui`] is the
//! ratatui front end the binary runs.

pub mod checkout;
pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod order;
pub mod purchase;
pub mod tui;
