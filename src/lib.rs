//! skicam - Compute initial 3D map camera poses from ski piste geometry

pub mod assign;
pub mod audit;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod geojson;
pub mod geometry;
pub mod passes;
pub mod resorts;
