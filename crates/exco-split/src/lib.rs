//! # exco-split — Shipment Splitting
//!
//! A parcel heavier than the container maximum must travel as several
//! containers. This crate decides how much weight each container carries.
//!
//! - [`split`]: first container at the maximum, the remainder shared evenly.
//! - [`plan_containers`]: turns caller-supplied [`ContainerAllocation`]s
//!   (items, declared value, optional weight override) into validated
//!   [`ContainerPlan`]s.
//!
//! ## Contract
//!
//! The caller chooses the container count. When that count cannot hold the
//! weight within bounds the splitter says so ([`SplitError::InsufficientContainers`]
//! or [`SplitError::UnderweightContainer`]) instead of returning a plan that
//! breaks a bound or loses weight.
//!
//! Only weight is allocated here. Which items and how much declared value go
//! into each container is the caller's decision, and each container is
//! re-evaluated for compliance on its own.

pub mod plan;
pub mod splitter;

pub use plan::{plan_containers, ContainerAllocation, ContainerPlan};
pub use splitter::{split, SplitError};
