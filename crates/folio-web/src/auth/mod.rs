pub mod client_ip;
pub mod jwt;
pub mod middleware;
pub mod password;
