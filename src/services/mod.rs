pub mod api_client;
pub mod transport;

pub use api_client::{ApiClient, ApiResponse, RequestOptions};
pub use transport::{GlooTransport, HttpMethod, HttpTransport};
