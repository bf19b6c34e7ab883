//! HTTP API handlers for civitas-hub

pub mod alerts;
pub mod assist;
pub mod buildinfo;
pub mod health;
pub mod mesh;
pub mod missions;
pub mod reports;

pub use alerts::alert_routes;
pub use assist::assist_routes;
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use mesh::mesh_routes;
pub use missions::mission_routes;
pub use reports::report_routes;
