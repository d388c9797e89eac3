pub mod artist;
pub mod drink;
pub mod form;
pub mod healthz;
pub mod response;
pub mod show;
pub mod venue;
