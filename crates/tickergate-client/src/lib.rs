pub mod category;
pub mod client_ext;
pub mod envelope;
pub mod error;

pub mod prelude {
    pub use crate::category::Category;
    pub use crate::client_ext::polygon::validate_request;
    pub use crate::client_ext::polygon::ClientPolygonExt as Polygon;
    pub use crate::envelope::Envelope;
    pub use crate::error::GatewayError;

    /// User agent of the outbound client, e.g. `"tickergate/0.1.0"`.
    pub const USER_AGENT: &str = concat!("tickergate/", env!("CARGO_PKG_VERSION"));

    pub fn build_client() -> anyhow::Result<reqwest::Client> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(client)
    }
}
