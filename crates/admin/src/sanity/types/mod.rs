//! Raw document types for the content backend.
//!
//! These mirror the wire shape of stored documents (`_id`, `_type`,
//! `_createdAt`, camelCase field names). View-facing shapes live with the
//! screens that render them; explicit patch/create payloads live here next
//! to the documents they mutate.

pub mod common;
pub mod message;
pub mod order;
pub mod product;
pub mod user;

pub use common::{ImageAsset, ImageRef, PostalAddress, Reference};
pub use message::{MessageDoc, MessagePatch};
pub use order::{LineItem, OrderDoc, OrderPatch};
pub use product::{NewProduct, ProductDoc, ProductPatch};
pub use user::{NewUser, UserDoc, UserPatch};
