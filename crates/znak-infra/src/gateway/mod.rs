mod http;

pub use http::{GatewayConfig, HttpDocumentGateway};
