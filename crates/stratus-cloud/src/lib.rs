#![doc = include_str!("../readme.md")]

pub mod broker;
pub mod datacenter;
pub mod events;
pub mod network;
pub mod record;
pub mod simulation;
pub mod specs;
