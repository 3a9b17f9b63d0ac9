//! Geometry and interaction engine for the workshop floor planner.
//!
//! This crate is compiled to WebAssembly and runs in the browser next to the
//! shop editor. It owns everything spatial about a shop layout: oriented
//! equipment footprints, the feet-to-pixel view transform, grid snapping and
//! wall clamping, collision checks between placements, and clearance-zone
//! warnings. The host JavaScript layer draws the scene and persists the
//! [`engine::Action`]s the engine returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Editing session: owns the shop, selection, and drag state |
//! | [`shop`] | Shop dimensions and the ordered placement collection |
//! | [`footprint`] | Oriented footprints, bounding boxes, and points |
//! | [`view`] | Feet ↔ pixel view transform |
//! | [`snap`] | Grid snapping and clamping to the shop walls |
//! | [`collision`] | Placement overlap checks |
//! | [`clearance`] | Clearance rules, clearance boxes, and issue detection |
//! | [`hit`] | Topmost-placement lookup under a point |
//! | [`catalog`] | Equipment types supplied by the catalog collaborator |
//! | [`input`] | Drag state machine and UI flags |
//! | [`config`] | Environment-driven engine configuration |
//! | [`error`] | Boundary error type |
//! | [`wasm`] | `wasm-bindgen` facade for the browser host |
//! | [`consts`] | Shared numeric constants |

pub mod catalog;
pub mod clearance;
pub mod collision;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod footprint;
pub mod hit;
pub mod input;
pub mod shop;
pub mod snap;
pub mod view;
pub mod wasm;
