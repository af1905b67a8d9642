//! Page view models.
//!
//! Views load a cart snapshot once on open, mutate it in response to
//! page events, persist the full snapshot after every mutation, and
//! render display models the hosting page binds.

pub mod cart;

pub use cart::{CartPage, CartPageModel, CartRowModel};
