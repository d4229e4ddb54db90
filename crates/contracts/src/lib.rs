pub mod dashboards;
pub mod demo;
pub mod domain;
pub mod enums;
pub mod system;
